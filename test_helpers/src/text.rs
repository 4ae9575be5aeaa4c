//! Text helpers for asserting on generated configuration files.

/// Returns the body of a generated file with its leading comment header
/// removed.
///
/// Lines starting with `prefix` are skipped, followed by a single blank
/// separator line when present.
#[must_use]
pub fn strip_comment_header<'a>(contents: &'a str, prefix: &str) -> &'a str {
    let mut rest = contents;
    while let Some((line, tail)) = rest.split_once('\n') {
        if !line.trim_start().starts_with(prefix) {
            break;
        }
        rest = tail;
    }
    rest.strip_prefix('\n').unwrap_or(rest)
}

/// Collects the comment lines at the top of a generated file with `prefix`
/// and one following space removed.
#[must_use]
pub fn comment_header(contents: &str, prefix: &str) -> Vec<String> {
    contents
        .lines()
        .map_while(|line| line.trim_start().strip_prefix(prefix))
        .map(|line| line.strip_prefix(' ').unwrap_or(line).to_owned())
        .collect()
}
