//! URL validation and normalization utilities.

use log::warn;

use crate::config::MAX_URL_LENGTH;

/// Validates and normalizes a URL given on the command line or in an input file.
///
/// Adds an `https://` prefix if no scheme is present, then checks that the URL
/// parses and uses http/https. Logs a warning and returns `None` for overlong,
/// invalid, or non-HTTP URLs.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    let url = url.trim();

    if url.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping URL exceeding maximum length ({} > {}): {}...",
            url.len(),
            MAX_URL_LENGTH,
            url.chars().take(50).collect::<String>()
        );
        return None;
    }

    let normalized = if url.contains("://") {
        url.to_string()
    } else {
        format!("https://{url}")
    };

    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping normalized URL exceeding maximum length ({} > {})",
            normalized.len(),
            MAX_URL_LENGTH
        );
        return None;
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" if parsed.host_str().is_some() => Some(normalized),
            "http" | "https" => {
                warn!("Skipping URL without host: {url}");
                None
            }
            _ => {
                warn!("Skipping unsupported scheme for URL: {url}");
                None
            }
        },
        Err(_) => {
            warn!("Skipping invalid URL: {url}");
            None
        }
    }
}
