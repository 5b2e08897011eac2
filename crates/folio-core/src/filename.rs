//! Filename derivation from series titles.

/// Derive the output filename (without extension) for a series title.
///
/// Lowercases, replaces spaces with underscores, strips newlines and
/// periods, and drops one leading underscore if present. The same derivation
/// is used to match series against existing files, so it must stay stable.
pub fn filename_from_title(title: &str) -> String {
    let raw = title
        .to_lowercase()
        .replace(' ', "_")
        .replace('\n', "")
        .replace('.', "");
    raw.strip_prefix('_').unwrap_or(&raw).to_string()
}
