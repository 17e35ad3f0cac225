//! Download invocation: one URL in, one converted audio file out.
//!
//! The heavy lifting (extraction, format selection, transfer, transcoding) is
//! done by a yt-dlp child process. This module prepares the output directory,
//! runs the child to completion, streams its progress, and turns its exit into
//! a [`DownloadOutcome`] or a typed [`DownloadError`].

use crate::error::DownloadError;
use crate::progress::ProgressStats;
use crate::url_model::parse_source_url;
use crate::ytdlp::{error_from_output, parse_line, DownloadOptions, OutputLine};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

/// A finished download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub url: String,
    /// Path of the converted file as reported by yt-dlp.
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Runs yt-dlp for one URL at a time with a fixed set of options.
#[derive(Debug, Clone)]
pub struct AudioDownloader {
    options: DownloadOptions,
}

/// What was read from one of the child's output streams.
#[derive(Debug, Default)]
struct Drained {
    final_path: Option<PathBuf>,
    lines: Vec<String>,
}

impl AudioDownloader {
    pub fn new(options: DownloadOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DownloadOptions {
        &self.options
    }

    /// Creates the output directory if it is absent. An existing directory,
    /// and anything already in it, is left as is.
    pub async fn ensure_output_dir(&self) -> Result<(), DownloadError> {
        ensure_dir(&self.options.output_dir).await
    }

    /// Downloads the best audio stream of `raw_url` and converts it.
    ///
    /// `index` identifies the URL in progress reports. Progress is best-effort:
    /// reports are dropped when the channel is full or closed.
    pub async fn download_audio(
        &self,
        raw_url: &str,
        index: usize,
        progress: Option<&mpsc::Sender<ProgressStats>>,
    ) -> Result<DownloadOutcome, DownloadError> {
        let url = parse_source_url(raw_url)?;
        self.ensure_output_dir().await?;

        let args = self.options.download_args(&url);
        tracing::info!(url = %url, dir = %self.options.output_dir.display(), "starting download");
        tracing::debug!(program = %self.options.program.display(), ?args, "spawning yt-dlp");

        let mut child = Command::new(&self.options.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| spawn_error(&self.options.program, e))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| DownloadError::Io(std::io::Error::other("yt-dlp stdout not captured")))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| DownloadError::Io(std::io::Error::other("yt-dlp stderr not captured")))?;

        // Both pipes are drained together so neither can fill up and stall the child.
        let (out, err) = tokio::join!(
            drain(stdout, index, progress, false),
            drain(stderr, index, progress, true)
        );
        let (out, err) = (out?, err?);
        let status = child.wait().await?;

        if !status.success() {
            let err = error_from_output(url.as_str(), &status.to_string(), &err.lines);
            tracing::warn!(url = %url, %status, "download failed: {}", err);
            return Err(err);
        }

        let reported = out.final_path.or(err.final_path);
        let path = match reported {
            Some(p) => p,
            None => {
                // --ignore-errors lets yt-dlp exit 0 after an error it skipped.
                let has_error = err.lines.iter().any(|l| l.trim_start().starts_with("ERROR:"));
                let err = if has_error {
                    error_from_output(url.as_str(), &status.to_string(), &err.lines)
                } else {
                    DownloadError::NoOutput(None)
                };
                tracing::warn!(url = %url, "download produced no file: {}", err);
                return Err(err);
            }
        };

        let size_bytes = match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() && meta.len() > 0 => meta.len(),
            _ => return Err(DownloadError::NoOutput(Some(path))),
        };

        tracing::info!(url = %url, path = %path.display(), size_bytes, "download completed");
        Ok(DownloadOutcome {
            url: url.to_string(),
            path,
            size_bytes,
        })
    }
}

pub(crate) async fn ensure_dir(dir: &Path) -> Result<(), DownloadError> {
    if tokio::fs::metadata(dir).await.map(|m| m.is_dir()).unwrap_or(false) {
        return Ok(());
    }
    tokio::fs::create_dir_all(dir).await?;
    tracing::debug!(dir = %dir.display(), "created output directory");
    Ok(())
}

/// Maps a spawn failure: an absent or non-executable program is `ToolMissing`.
pub(crate) fn spawn_error(program: &Path, e: std::io::Error) -> DownloadError {
    match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
            DownloadError::ToolMissing {
                tool: program.display().to_string(),
                source: e,
            }
        }
        _ => DownloadError::Io(e),
    }
}

async fn drain<R>(
    reader: R,
    index: usize,
    progress: Option<&mpsc::Sender<ProgressStats>>,
    is_stderr: bool,
) -> Result<Drained, DownloadError>
where
    R: AsyncRead + Unpin,
{
    let mut drained = Drained::default();
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        // Output may not be UTF-8 (non-UTF-8 locales, raw titles).
        let line = String::from_utf8_lossy(&buf);
        match parse_line(&line, index) {
            OutputLine::Progress(stats) => {
                if let Some(tx) = progress {
                    let _ = tx.try_send(stats);
                }
            }
            OutputLine::FinalPath(p) => drained.final_path = Some(p),
            OutputLine::Other(l) => {
                if l.trim().is_empty() {
                    continue;
                }
                if is_stderr && l.starts_with("WARNING:") {
                    tracing::warn!(target: "songdl_core::ytdlp", "{}", l);
                } else {
                    tracing::debug!(target: "songdl_core::ytdlp", "{}", l);
                }
                drained.lines.push(l);
            }
        }
    }
    Ok(drained)
}
