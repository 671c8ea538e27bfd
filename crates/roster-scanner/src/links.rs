//! Resolution of raw `href` attributes against a site's base URL.

use roster_browser::origin_of;

/// Resolve an `href` the way roster links are written in practice.
///
/// - missing or empty: empty string
/// - starts with `http`: passed through
/// - protocol-relative (`//host/...`): given the base URL's scheme
/// - root-relative (`/...`): prefixed with the base URL's origin
/// - anything else: joined to the base URL with a `/`
#[must_use]
pub fn resolve_href(href: Option<&str>, base_url: &str) -> String {
    let Some(href) = href.map(str::trim).filter(|href| !href.is_empty()) else {
        return String::new();
    };

    let base = base_url.trim_end_matches('/');

    if href.starts_with("http") {
        href.to_string()
    } else if href.starts_with("//") {
        let scheme = base.split_once("://").map_or("https", |(scheme, _)| scheme);
        format!("{scheme}:{href}")
    } else if href.starts_with('/') {
        let origin = origin_of(base).unwrap_or_else(|_| base.to_string());
        format!("{origin}{href}")
    } else {
        format!("{base}/{href}")
    }
}
