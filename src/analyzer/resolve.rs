//! `Location` header resolution.

use url::Url;

/// Resolves a `Location` header value against the URL that returned it.
///
/// Forms are tried in a fixed order: protocol-relative (`//host/path`), then
/// absolute path (`/path`), then scheme-prefixed (`http://…`, `https://…`), and
/// finally anything else as a path relative to `current`.
///
/// # Errors
///
/// Returns the parse error when the location cannot form a valid URL.
pub fn resolve_location(current: &Url, location: &str) -> Result<Url, url::ParseError> {
    let location = location.trim();
    if location.starts_with("//") {
        Url::parse(&format!("{}:{}", current.scheme(), location))
    } else if location.starts_with('/') {
        Url::parse(&format!(
            "{}{}",
            current.origin().ascii_serialization(),
            location
        ))
    } else if has_http_scheme(location) {
        Url::parse(location)
    } else {
        current.join(location)
    }
}

/// Scheme of a URL in `protocol` form, i.e. with a trailing colon.
pub fn protocol_of(url: &Url) -> String {
    format!("{}:", url.scheme())
}

fn has_http_scheme(location: &str) -> bool {
    let lower = location.get(..8).unwrap_or(location).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
