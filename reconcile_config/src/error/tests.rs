//! Unit tests for error construction and conversion.

use rstest::rstest;

use super::ReconcileError;
use crate::{ConfigFormat, ReconcileResult, ReconcileResultExt};

#[test]
fn invalid_spec_reports_path() {
    let err = ReconcileError::invalid_spec("audio.volume", "default is out of range");
    assert_eq!(
        err.to_string(),
        "Invalid configuration spec at 'audio.volume': default is out of range"
    );
}

#[test]
fn json_errors_become_parse_errors() {
    let outcome: ReconcileResult<serde_json::Value> =
        serde_json::from_str::<serde_json::Value>("{ broken").into_reconcile();
    let err = outcome.expect_err("malformed JSON must fail");
    assert!(
        matches!(
            err.as_ref(),
            ReconcileError::Parse {
                format: ConfigFormat::Json,
                ..
            }
        ),
        "unexpected error: {err:?}"
    );
}

#[rstest]
#[case::duplicate(
    ReconcileError::DuplicateRegistration { key: "audio/main-common".into() },
    "configuration 'audio/main-common' is already registered"
)]
#[case::unknown(
    ReconcileError::UnknownRegistration { key: "audio/main-client".into() },
    "no configuration registered under 'audio/main-client'"
)]
fn registry_errors_render_key(#[case] err: ReconcileError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}

#[test]
fn figment_errors_become_binding_errors() {
    let err: ReconcileError = figment::Error::from("missing field `volume`").into();
    assert!(err.to_string().contains("missing field `volume`"));
}
