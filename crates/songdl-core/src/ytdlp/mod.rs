//! yt-dlp invocation details: command-line arguments, output line protocol,
//! and classification of failures.
//!
//! Retrieval, format negotiation and transcoding all happen inside yt-dlp
//! (and the ffmpeg it drives); this module only describes what to ask for
//! and how to read the answer.

mod args;
mod classify;
mod output;

pub use args::DownloadOptions;
pub use classify::{classify_message, error_from_output};
pub use output::{parse_line, OutputLine, FILE_MARKER, PROGRESS_MARKER};
