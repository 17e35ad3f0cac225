//! Source URL lists: the built-in set and plain-text list files.

use anyhow::{Context, Result};
use std::path::Path;

/// URLs fetched when neither the command line nor the config names any.
pub const BUILTIN_SOURCES: [&str; 7] = [
    "https://www.youtube.com/watch?v=XR7Ev14vUh8?si=38w94UeGbeGKXxSS",
    "https://www.youtube.com/watch?v=4NRXx6U8ABQ?si=h11hcE2xSqv50vIJ",
    "https://www.youtube.com/watch?v=JGwWNGJdvx8?si=Ffr-K_B5E1df7LpJ",
    "https://www.youtube.com/watch?v=7-x3uD5z1bQ?si=Lcm1xaXkIuTHu44o",
    "https://www.youtube.com/watch?v=1j_XvebOg4c?si=yxSduURK_XGoKSrJ",
    "https://www.youtube.com/watch?v=ERkKTCCl5DI?si=v_8oYGgm3trQay9x",
    "https://www.youtube.com/watch?v=g-FXA0nSn8U?si=kJh3W6rcvp28lQyU",
];

pub fn builtin_sources() -> Vec<String> {
    BUILTIN_SOURCES.iter().map(|s| s.to_string()).collect()
}

/// One URL per line; blank lines and lines starting with `#` are skipped.
/// URLs are not validated here (the downloader does that per item).
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn load_url_list(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read URL list {}", path.display()))?;
    Ok(parse_url_list(&text))
}

/// Picks the URLs for a run: explicit ones first, then configured, then built-in.
pub fn resolve_sources(explicit: Vec<String>, configured: &[String]) -> Vec<String> {
    if !explicit.is_empty() {
        explicit
    } else if !configured.is_empty() {
        configured.to_vec()
    } else {
        builtin_sources()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url_model::parse_source_url;

    #[test]
    fn builtin_sources_all_parse() {
        for raw in BUILTIN_SOURCES {
            let url = parse_source_url(raw).unwrap();
            assert!(url.query_pairs().any(|(k, _)| k == "si"), "{raw}");
        }
    }

    #[test]
    fn list_skips_comments_and_blanks() {
        let text = "# favourites\n\nhttps://a.example/1\n   https://a.example/2  \n#https://a.example/3\n";
        assert_eq!(
            parse_url_list(text),
            vec!["https://a.example/1", "https://a.example/2"]
        );
    }

    #[test]
    fn load_missing_file_has_context() {
        let err = load_url_list(Path::new("/nonexistent/urls.txt")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/urls.txt"));
    }

    #[test]
    fn resolve_precedence() {
        let cfg = vec!["https://cfg.example/1".to_string()];
        assert_eq!(
            resolve_sources(vec!["https://cli.example/1".into()], &cfg),
            vec!["https://cli.example/1"]
        );
        assert_eq!(resolve_sources(vec![], &cfg), cfg);
        assert_eq!(resolve_sources(vec![], &[]).len(), BUILTIN_SOURCES.len());
    }
}
