//! Typed failures of a single download.
//!
//! Every way a download can fail ends up as one [`DownloadError`]; the batch
//! runner records it per URL instead of letting it escape.

use std::path::PathBuf;
use thiserror::Error;

/// Coarse category of a [`DownloadError`], used for user-facing hints and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The URL was malformed or rejected before any network access.
    InvalidInput,
    /// DNS, connection, HTTP or geo/availability failures reported by yt-dlp.
    Network,
    /// Audio was fetched but could not be converted (ffmpeg/ffprobe missing or failing).
    Encoder,
    /// yt-dlp has no extractor for the URL.
    Unsupported,
    /// An external program is missing or failed in an unrecognized way.
    Tool,
    /// Local filesystem failure.
    Io,
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{tool} not found or not executable: {source}")]
    ToolMissing {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("audio conversion failed: {0}")]
    MissingEncoder(String),

    #[error("unsupported URL: {0}")]
    Unsupported(String),

    #[error("yt-dlp exited with {status}: {message}")]
    ToolFailed { status: String, message: String },

    #[error("no output file produced{}", .0.as_ref().map(|p| format!(" at {}", p.display())).unwrap_or_default())]
    NoOutput(Option<PathBuf>),

    #[error("could not read media metadata: {0}")]
    Metadata(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DownloadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DownloadError::InvalidUrl { .. } => ErrorKind::InvalidInput,
            DownloadError::Network(_) => ErrorKind::Network,
            DownloadError::MissingEncoder(_) => ErrorKind::Encoder,
            DownloadError::Unsupported(_) => ErrorKind::Unsupported,
            DownloadError::ToolMissing { .. }
            | DownloadError::ToolFailed { .. }
            | DownloadError::Metadata(_) => ErrorKind::Tool,
            DownloadError::NoOutput(_) | DownloadError::Io(_) => ErrorKind::Io,
        }
    }

    /// Extra guidance printed after the error, if any applies to this failure.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            DownloadError::MissingEncoder(_) => Some(
                "The audio may have been downloaded but not converted to MP3. \
                 Install ffmpeg to enable automatic conversion.",
            ),
            DownloadError::ToolMissing { tool, .. } if tool.contains("yt-dlp") => {
                Some("Install yt-dlp (e.g. `pipx install yt-dlp`) or set `ytdlp_path` in the config.")
            }
            _ => None,
        }
    }
}
