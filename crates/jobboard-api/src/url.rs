//! URL resolution against the service base address.

/// Whether `path` already carries a URL scheme (`http://`, `https://`, ...).
pub fn has_scheme(path: &str) -> bool {
    match path.split_once("://") {
        Some((scheme, _)) => {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Resolve `path` against `base`.
///
/// Absolute URLs are returned verbatim. Relative paths are joined with
/// exactly one `/` between base and path, whatever slashes either side
/// already carries.
pub fn build_url(base: &str, path: &str) -> String {
    if has_scheme(path) {
        return path.to_string();
    }

    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    format!("{base}/{path}")
}
