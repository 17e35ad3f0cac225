//! Availability checks for the external programs songdl drives.

use crate::config::SongdlConfig;
use crate::error::DownloadError;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Result of probing one external program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    pub program: PathBuf,
    /// First line of the version output.
    pub version: String,
}

/// Runs `<program> <version_arg>` and returns the first line it prints.
///
/// A program that cannot be spawned, or exits unsuccessfully, is reported
/// as [`DownloadError::ToolMissing`].
pub async fn probe_tool(program: &Path, version_arg: &str) -> Result<ToolStatus, DownloadError> {
    let tool = program.display().to_string();
    let output = Command::new(program)
        .arg(version_arg)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| DownloadError::ToolMissing {
            tool: tool.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(DownloadError::ToolMissing {
            tool,
            source: std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("`{version_arg}` exited with {}", output.status),
            ),
        });
    }

    let version = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("unknown version")
        .to_string();

    Ok(ToolStatus {
        program: program.to_path_buf(),
        version,
    })
}

/// Availability of yt-dlp and the encoder it uses for post-processing.
#[derive(Debug)]
pub struct Toolchain {
    pub ytdlp: Result<ToolStatus, DownloadError>,
    pub ffmpeg: Result<ToolStatus, DownloadError>,
}

impl Toolchain {
    pub async fn probe(cfg: &SongdlConfig) -> Self {
        let ytdlp = probe_tool(Path::new(&cfg.ytdlp_path), "--version").await;
        let ffmpeg = probe_tool(&cfg.ffmpeg_program(), "-version").await;
        match &ytdlp {
            Ok(s) => tracing::debug!(program = %s.program.display(), version = %s.version, "yt-dlp found"),
            Err(e) => tracing::warn!("yt-dlp unavailable: {}", e),
        }
        match &ffmpeg {
            Ok(s) => tracing::debug!(program = %s.program.display(), version = %s.version, "ffmpeg found"),
            Err(e) => tracing::warn!("ffmpeg unavailable: {}", e),
        }
        Self { ytdlp, ffmpeg }
    }

    /// Downloads are possible at all (conversion may still fail without ffmpeg).
    pub fn can_download(&self) -> bool {
        self.ytdlp.is_ok()
    }

    pub fn can_convert(&self) -> bool {
        self.ffmpeg.is_ok()
    }
}
