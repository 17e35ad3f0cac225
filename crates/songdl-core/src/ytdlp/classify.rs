//! Classify yt-dlp diagnostics into typed download errors.

use crate::error::{DownloadError, ErrorKind};

const ENCODER_PATTERNS: &[&str] = &[
    "ffprobe and ffmpeg not found",
    "ffmpeg not found",
    "ffprobe not found",
    "audio conversion failed",
    "postprocessing:",
    "ffmpeg-location",
];

const UNSUPPORTED_PATTERNS: &[&str] = &["unsupported url", "no suitable extractor"];

const INVALID_PATTERNS: &[&str] = &["is not a valid url"];

const NETWORK_PATTERNS: &[&str] = &[
    "unable to download webpage",
    "unable to download api page",
    "unable to download json metadata",
    "urlopen error",
    "name or service not known",
    "temporary failure in name resolution",
    "nodename nor servname",
    "getaddrinfo failed",
    "failed to resolve",
    "connection refused",
    "connection reset",
    "network is unreachable",
    "timed out",
    "http error",
    "video unavailable",
    "private video",
    "not available in your country",
    "sign in to confirm",
];

/// Maps one diagnostic message to an error kind.
pub fn classify_message(message: &str) -> ErrorKind {
    let lower = message.to_ascii_lowercase();
    let has = |patterns: &[&str]| patterns.iter().any(|p| lower.contains(p));
    if has(ENCODER_PATTERNS) {
        ErrorKind::Encoder
    } else if has(INVALID_PATTERNS) {
        ErrorKind::InvalidInput
    } else if has(UNSUPPORTED_PATTERNS) {
        ErrorKind::Unsupported
    } else if has(NETWORK_PATTERNS) {
        ErrorKind::Network
    } else {
        ErrorKind::Tool
    }
}

/// Builds the error for a yt-dlp run that exited unsuccessfully.
///
/// `ERROR:` lines take precedence over other stderr output; the first one whose
/// kind is not [`ErrorKind::Tool`] decides the variant.
pub fn error_from_output(url: &str, status: &str, stderr: &[String]) -> DownloadError {
    let errors: Vec<&str> = stderr
        .iter()
        .filter_map(|l| l.trim().strip_prefix("ERROR:"))
        .map(str::trim)
        .collect();

    let candidates: Vec<&str> = if errors.is_empty() {
        stderr
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect()
    } else {
        errors
    };

    let classified = candidates
        .iter()
        .map(|m| (classify_message(m), *m))
        .find(|(kind, _)| *kind != ErrorKind::Tool);

    match classified {
        Some((ErrorKind::Encoder, m)) => DownloadError::MissingEncoder(m.to_string()),
        Some((ErrorKind::InvalidInput, m)) => DownloadError::InvalidUrl {
            url: url.to_string(),
            reason: m.to_string(),
        },
        Some((ErrorKind::Unsupported, m)) => DownloadError::Unsupported(m.to_string()),
        Some((ErrorKind::Network, m)) => DownloadError::Network(m.to_string()),
        _ => DownloadError::ToolFailed {
            status: status.to_string(),
            message: candidates
                .last()
                .map(|m| m.to_string())
                .unwrap_or_else(|| "no diagnostic output".to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn messages() {
        assert_eq!(
            classify_message("Postprocessing: ffprobe and ffmpeg not found. Please install or provide the path using --ffmpeg-location"),
            ErrorKind::Encoder
        );
        assert_eq!(
            classify_message("[generic] Unable to download webpage: <urlopen error [Errno -3] Temporary failure in name resolution>"),
            ErrorKind::Network
        );
        assert_eq!(
            classify_message("[youtube] abc: Video unavailable"),
            ErrorKind::Network
        );
        assert_eq!(
            classify_message("Unsupported URL: https://example.com/"),
            ErrorKind::Unsupported
        );
        assert_eq!(
            classify_message("'abc' is not a valid URL. Set --default-search \"ytsearch\""),
            ErrorKind::InvalidInput
        );
        assert_eq!(classify_message("something odd"), ErrorKind::Tool);
    }

    #[test]
    fn error_lines_win_over_warnings() {
        let stderr = lines(&[
            "WARNING: [youtube] Falling back to generic n function search",
            "ERROR: [youtube] XR7Ev14vUh8: Private video. Sign in if you've been granted access",
        ]);
        match error_from_output("u", "exit status: 1", &stderr) {
            DownloadError::Network(m) => assert!(m.starts_with("[youtube] XR7Ev14vUh8")),
            other => panic!("expected Network, got {other:?}"),
        }
    }

    #[test]
    fn encoder_failure() {
        let stderr = lines(&["ERROR: Postprocessing: ffprobe and ffmpeg not found."]);
        assert!(matches!(
            error_from_output("u", "exit status: 1", &stderr),
            DownloadError::MissingEncoder(_)
        ));
    }

    #[test]
    fn invalid_url_keeps_url() {
        let stderr = lines(&["ERROR: 'x' is not a valid URL."]);
        match error_from_output("x", "exit status: 2", &stderr) {
            DownloadError::InvalidUrl { url, .. } => assert_eq!(url, "x"),
            other => panic!("expected InvalidUrl, got {other:?}"),
        }
    }

    #[test]
    fn unknown_failure_reports_last_line() {
        let stderr = lines(&["", "Traceback (most recent call last):", "KeyError: 'formats'"]);
        match error_from_output("u", "exit status: 1", &stderr) {
            DownloadError::ToolFailed { status, message } => {
                assert_eq!(status, "exit status: 1");
                assert_eq!(message, "KeyError: 'formats'");
            }
            other => panic!("expected ToolFailed, got {other:?}"),
        }
        match error_from_output("u", "signal: 9", &[]) {
            DownloadError::ToolFailed { message, .. } => assert_eq!(message, "no diagnostic output"),
            other => panic!("expected ToolFailed, got {other:?}"),
        }
    }
}
