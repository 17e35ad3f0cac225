//! Line protocol for reading yt-dlp's stdout/stderr.

use crate::progress::ProgressStats;
use std::path::PathBuf;

/// Prefix of progress lines produced by [`PROGRESS_TEMPLATE`].
pub const PROGRESS_MARKER: &str = "[songdl-progress]";
/// Prefix of the line carrying the final file path, produced by [`FILE_PRINT_TEMPLATE`].
pub const FILE_MARKER: &str = "[songdl-file]";

pub(crate) const PROGRESS_TEMPLATE: &str = "download:[songdl-progress] %(progress.downloaded_bytes)s %(progress.total_bytes,progress.total_bytes_estimate)s %(progress.elapsed)s";
pub(crate) const FILE_PRINT_TEMPLATE: &str = "after_move:[songdl-file] %(filepath)s";

/// One line of yt-dlp output, interpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputLine {
    Progress(ProgressStats),
    /// Final path of the converted file (after post-processing and moves).
    FinalPath(PathBuf),
    Other(String),
}

/// Interprets one output line. `index` is the URL's position in the batch.
pub fn parse_line(line: &str, index: usize) -> OutputLine {
    let line = line.trim_end_matches(['\r', '\n']);
    let body = line.trim_start();

    if let Some(rest) = body.strip_prefix(FILE_MARKER) {
        let path = rest.trim_start_matches(' ');
        if !path.is_empty() && path != "NA" {
            return OutputLine::FinalPath(PathBuf::from(path));
        }
    } else if let Some(rest) = body.strip_prefix(PROGRESS_MARKER) {
        if let Some(stats) = parse_progress(rest, index) {
            return OutputLine::Progress(stats);
        }
    }
    OutputLine::Other(line.to_string())
}

fn parse_progress(rest: &str, index: usize) -> Option<ProgressStats> {
    let mut fields = rest.split_whitespace();
    let bytes_done = number(fields.next()?)? as u64;
    let total_bytes = fields.next().and_then(number).map(|n| n as u64);
    let elapsed_secs = fields.next().and_then(number).unwrap_or(0.0);
    Some(ProgressStats {
        index,
        bytes_done,
        total_bytes,
        elapsed_secs,
    })
}

/// yt-dlp prints `NA` for unknown values and floats for estimates.
fn number(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|n| n.is_finite() && *n >= 0.0)
}
