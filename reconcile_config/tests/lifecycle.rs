//! End-to-end lifecycle tests: files on disk, bound values and remote
//! overlays driven through the public API.
#![cfg(feature = "toml")]

use anyhow::{Context, Result, anyhow, ensure};
use reconcile_config::{
    ConfigFormat, ConfigRegistry, Element, FormatCodec, Leaf, Mapping, ReconcileResult,
    Registration, RegistrationBuilder, Scope, Section, SpecTree, TomlCodec, ValueBinding,
};
use rstest::{fixture, rstest};
use serde::{Deserialize, Serialize};
use serde_json::json;
use test_helpers::{TempConfigRoot, text};

const KEY: &str = "reactor/core-common";
const TOML_PATH: &str = "reactor/core-common.toml";
const JSON_PATH: &str = "reactor/core-common.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Turbine {
    rotor_drag: f64,
    allow_overspeed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Display {
    units: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ReactorSettings {
    enable_advanced_config: bool,
    fuel_usage: f64,
    max_height: i64,
    turbine: Turbine,
    display: Display,
}

impl Default for ReactorSettings {
    fn default() -> Self {
        Self {
            enable_advanced_config: false,
            fuel_usage: 1.0,
            max_height: 48,
            turbine: Turbine {
                rotor_drag: 0.01,
                allow_overspeed: false,
            },
            display: Display {
                units: String::from("metric"),
            },
        }
    }
}

fn reactor_spec() -> ReconcileResult<SpecTree> {
    SpecTree::builder(Scope::Common)
        .comment("Reactor simulation settings")
        .leaf(
            Leaf::float("fuel_usage", 1.0)
                .range(0.0, 10.0)
                .reloadable(true)
                .comment("Fuel consumed per tick"),
        )
        .leaf(
            Leaf::integer("max_height", 48)
                .range(3.0, 256.0)
                .comment("Tallest buildable reactor"),
        )
        .section(
            Section::new("turbine")
                .comment("Turbine tuning")
                .leaf(Leaf::float("rotor_drag", 0.01).reloadable(true))
                .leaf(Leaf::boolean("allow_overspeed", false).advanced()),
        )
        .section(
            Section::new("display")
                .scope(Scope::Client)
                .leaf(Leaf::enumeration("units", ["metric", "imperial"], "metric").reloadable(true)),
        )
        .build()
}

type ReactorRegistration = Registration<ValueBinding<ReactorSettings>>;

fn registration(
    root: &TempConfigRoot,
    live: &ValueBinding<ReactorSettings>,
) -> Result<ReactorRegistration> {
    let spec = reactor_spec().map_err(|err| anyhow!(err.to_string()))?;
    RegistrationBuilder::new("core")
        .folder("reactor")
        .format(ConfigFormat::Toml)
        .root(root.config_dir())
        .build(spec, live.clone())
        .map_err(|err| anyhow!(err.to_string()))
}

fn tree(value: serde_json::Value) -> Result<Element> {
    Element::from_json(value).context("tree must not be null")
}

#[fixture]
fn root() -> TempConfigRoot {
    TempConfigRoot::new().expect("temporary config root")
}

#[rstest]
fn generated_file_documents_visible_options(root: TempConfigRoot) -> Result<()> {
    let live = ValueBinding::new(ReactorSettings::default());
    registration(&root, &live)?.load_local_config_file(false);

    let contents = root.read(TOML_PATH)?;
    let header = text::comment_header(&contents, "#");
    ensure!(
        header.first().map(String::as_str) == Some("Reactor simulation settings"),
        "unexpected header {header:?}"
    );
    for expected in [
        "enable_advanced_config (bool, default: false)",
        "fuel_usage (float, default: 1.0, range: 0 to 10)",
        "    Fuel consumed per tick",
        "max_height (integer, default: 48, range: 3 to 256, requires restart)",
        "[turbine] Turbine tuning",
        "display.units (one of [metric, imperial], default: \"metric\")",
    ] {
        ensure!(
            header.iter().any(|line| line == expected),
            "missing header line {expected:?} in {header:?}"
        );
    }
    ensure!(
        !contents.contains("allow_overspeed"),
        "advanced option leaked into {contents}"
    );

    let body = TomlCodec
        .parse(text::strip_comment_header(&contents, "#"))
        .map_err(|err| anyhow!(err.to_string()))?;
    ensure!(body.lookup("turbine.rotor_drag") == Some(&Element::from(0.01)));
    ensure!(body.lookup("display.units") == Some(&Element::from("metric")));
    Ok(())
}

#[rstest]
fn load_pipeline_is_idempotent(root: TempConfigRoot) -> Result<()> {
    root.write(
        TOML_PATH,
        "legacy = true\nmax_height = 1000\n\n[turbine]\nrotor_drag = 0.5\n\n[display]\nunits = \"furlongs\"\n",
    )?;

    let first_live = ValueBinding::new(ReactorSettings::default());
    registration(&root, &first_live)?.load_local_config_file(false);
    let first_file = root.read(TOML_PATH)?;

    let second_live = ValueBinding::new(ReactorSettings::default());
    registration(&root, &second_live)?.load_local_config_file(false);

    ensure!(root.read(TOML_PATH)? == first_file, "file changed on second pass");
    ensure!(first_live.snapshot() == second_live.snapshot());

    let settings = second_live.snapshot();
    ensure!(settings.max_height == 48, "out-of-range height kept");
    ensure!(settings.turbine.rotor_drag == 0.5);
    ensure!(settings.display.units == "metric", "invalid enum kept");
    ensure!(!first_file.contains("legacy"), "unknown key persisted");
    Ok(())
}

#[rstest]
fn stale_alternate_format_is_replaced(root: TempConfigRoot) -> Result<()> {
    root.write(JSON_PATH, r#"{ "fuel_usage": 2.5 }"#)?;
    let live = ValueBinding::new(ReactorSettings::default());
    registration(&root, &live)?.load_local_config_file(false);

    ensure!(live.snapshot().fuel_usage == 2.5);
    ensure!(root.exists(TOML_PATH), "canonical file missing");
    ensure!(!root.exists(JSON_PATH), "stale file kept");
    Ok(())
}

#[rstest]
fn declared_format_wins_over_stale_variant(root: TempConfigRoot) -> Result<()> {
    root.write(JSON_PATH, r#"{ "fuel_usage": 2.0 }"#)?;
    root.write(TOML_PATH, "fuel_usage = 3.0\n")?;
    let live = ValueBinding::new(ReactorSettings::default());
    registration(&root, &live)?.load_local_config_file(false);

    ensure!(live.snapshot().fuel_usage == 3.0);
    ensure!(!root.exists(JSON_PATH), "stale file kept");
    Ok(())
}

#[rstest]
fn unreadable_file_falls_back_to_defaults(root: TempConfigRoot) -> Result<()> {
    root.write(TOML_PATH, "fuel_usage = = 3\n[[[")?;
    let live = ValueBinding::new(ReactorSettings {
        fuel_usage: 9.0,
        ..ReactorSettings::default()
    });
    registration(&root, &live)?.load_local_config_file(false);

    ensure!(live.snapshot() == ReactorSettings::default());
    let contents = root.read(TOML_PATH)?;
    let body = TomlCodec
        .parse(&contents)
        .map_err(|err| anyhow!(err.to_string()))?;
    ensure!(body.lookup("fuel_usage") == Some(&Element::from(1.0)));
    Ok(())
}

#[rstest]
fn reload_never_changes_restart_options(root: TempConfigRoot) -> Result<()> {
    let live = ValueBinding::new(ReactorSettings::default());
    let mut registry = ConfigRegistry::new();
    registry
        .register(registration(&root, &live)?)
        .map_err(|err| anyhow!(err.to_string()))?;

    root.write(
        TOML_PATH,
        "enable_advanced_config = true\nfuel_usage = 4.0\nmax_height = 100\n\n[turbine]\nrotor_drag = 0.2\nallow_overspeed = true\n\n[display]\nunits = \"imperial\"\n",
    )?;
    registry.reload_local();

    let settings = live.snapshot();
    ensure!(settings.enable_advanced_config);
    ensure!(settings.fuel_usage == 4.0);
    ensure!(settings.turbine.rotor_drag == 0.2);
    ensure!(settings.display.units == "imperial");
    ensure!(settings.max_height == 48, "restart option reloaded");
    ensure!(!settings.turbine.allow_overspeed, "restart option reloaded");

    let contents = root.read(TOML_PATH)?;
    ensure!(contents.contains("allow_overspeed = true"), "advanced option hidden: {contents}");
    ensure!(contents.contains("max_height = 100"), "on-disk value lost: {contents}");
    Ok(())
}

#[rstest]
fn overlay_is_withdrawn_exactly(root: TempConfigRoot) -> Result<()> {
    root.write(TOML_PATH, "fuel_usage = 2.0\nmax_height = 64\n")?;
    let live = ValueBinding::new(ReactorSettings::default());
    let mut registry = ConfigRegistry::new();
    registry
        .register(registration(&root, &live)?)
        .map_err(|err| anyhow!(err.to_string()))?;
    let local = registry.sync_payload();
    let local_display = live.snapshot().display;

    let mut remote = Mapping::new();
    remote.insert(
        KEY,
        tree(json!({
            "fuel_usage": 0.8,
            "max_height": "tall",
            "cheat_code": "xyzzy",
            "display": { "units": "imperial" }
        }))?,
    );
    registry
        .apply_remote(&remote, false)
        .map_err(|err| anyhow!(err.to_string()))?;

    let overlaid = live.snapshot();
    ensure!(overlaid.fuel_usage == 0.8);
    ensure!(overlaid.max_height == 48, "invalid remote value not corrected");
    ensure!(overlaid.display == local_display, "client option overlaid");

    registry.withdraw_remote();
    ensure!(registry.sync_payload() == local, "local state not restored");
    ensure!(live.snapshot().fuel_usage == 2.0);
    ensure!(live.snapshot().max_height == 64);
    ensure!(
        root.read(TOML_PATH)?.contains("fuel_usage = 2.0"),
        "overlay must never reach the local file"
    );
    Ok(())
}

#[rstest]
fn authority_payload_round_trips_to_peer() -> Result<()> {
    let authority_root = TempConfigRoot::new()?;
    let peer_root = TempConfigRoot::new()?;
    authority_root.write(TOML_PATH, "fuel_usage = 5.0\n\n[display]\nunits = \"imperial\"\n")?;

    let authority_live = ValueBinding::new(ReactorSettings::default());
    let mut authority = ConfigRegistry::new();
    authority
        .register(registration(&authority_root, &authority_live)?)
        .map_err(|err| anyhow!(err.to_string()))?;

    let peer_live = ValueBinding::new(ReactorSettings::default());
    let mut peer = ConfigRegistry::new();
    peer.register(registration(&peer_root, &peer_live)?)
        .map_err(|err| anyhow!(err.to_string()))?;

    let payload = authority.sync_payload();
    let outbound = payload.get(KEY).context("authority payload missing")?;
    let spec = reactor_spec().map_err(|err| anyhow!(err.to_string()))?;
    ensure!(
        spec.remove_unknown_elements(outbound).as_ref() == Some(outbound),
        "outbound payload is not a fixed point of stripping"
    );
    ensure!(outbound.lookup("display").is_none(), "client option sent");

    peer.apply_remote(&payload, false)
        .map_err(|err| anyhow!(err.to_string()))?;
    ensure!(peer_live.snapshot().fuel_usage == 5.0);
    ensure!(peer_live.snapshot().display.units == "metric");

    peer.withdraw_remote();
    ensure!(peer_live.snapshot() == ReactorSettings::default());
    Ok(())
}
