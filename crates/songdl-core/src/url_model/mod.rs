//! Source URL validation and output filename sanitization.
//!
//! URLs are parsed before yt-dlp is spawned so malformed input fails fast as
//! [`DownloadError::InvalidUrl`] without touching the network.

mod normalize;
mod sanitize;

pub use normalize::normalize_query;
pub use sanitize::sanitize_filename_for_linux;

use crate::error::DownloadError;
use url::Url;

/// Parses and normalizes a source URL.
///
/// Accepts only `http`/`https` URLs with a host. Share links that carry a
/// second `?` inside the query (`watch?v=ID?si=TOKEN`) are repaired so the
/// extra parameter becomes `&si=TOKEN`.
pub fn parse_source_url(raw: &str) -> Result<Url, DownloadError> {
    let trimmed = raw.trim();
    let invalid = |reason: String| DownloadError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    if trimmed.is_empty() {
        return Err(invalid("empty URL".to_string()));
    }

    let mut url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme {other:?}"))),
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }

    if let Some(query) = url.query() {
        let fixed = normalize_query(query);
        if fixed != query {
            tracing::debug!(from = %query, to = %fixed, "normalized query string");
            url.set_query(Some(&fixed));
        }
    }
    Ok(url)
}
