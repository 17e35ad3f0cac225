//! Metadata probe (`yt-dlp -J`) used for dry runs and the `info` command.

use crate::downloader::spawn_error;
use crate::error::DownloadError;
use crate::url_model::parse_source_url;
use crate::ytdlp::{error_from_output, DownloadOptions};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// Subset of yt-dlp's info dict that songdl uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub webpage_url: Option<String>,
}

impl MediaInfo {
    /// Template values as they will be after audio extraction: `ext` is the target codec.
    pub fn template_values(&self, audio_codec: &str) -> HashMap<String, String> {
        let mut values = HashMap::new();
        values.insert("id".to_string(), self.id.clone());
        values.insert("title".to_string(), self.title.clone());
        values.insert("ext".to_string(), audio_codec.to_string());
        if let Some(u) = &self.uploader {
            values.insert("uploader".to_string(), u.clone());
        }
        if let Some(d) = self.duration {
            values.insert("duration".to_string(), format!("{}", d.round() as u64));
        }
        values
    }

    /// Where the converted file is expected to land with `options`.
    pub fn expected_path(&self, options: &DownloadOptions) -> PathBuf {
        options.template.render_path(
            &options.output_dir,
            &self.template_values(&options.audio_codec),
        )
    }

    /// Duration as `m:ss` (or `h:mm:ss`), if known.
    pub fn duration_display(&self) -> Option<String> {
        let total = self.duration?.round() as u64;
        let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
        Some(if h > 0 {
            format!("{h}:{m:02}:{s:02}")
        } else {
            format!("{m}:{s:02}")
        })
    }
}

/// Asks yt-dlp for the metadata of `raw_url` without downloading anything.
pub async fn probe_media(options: &DownloadOptions, raw_url: &str) -> Result<MediaInfo, DownloadError> {
    let url = parse_source_url(raw_url)?;
    let output = Command::new(&options.program)
        .args(options.probe_args(&url))
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| spawn_error(&options.program, e))?;

    if !output.status.success() {
        let stderr: Vec<String> = String::from_utf8_lossy(&output.stderr)
            .lines()
            .map(str::to_string)
            .collect();
        return Err(error_from_output(url.as_str(), &output.status.to_string(), &stderr));
    }

    parse_media_info(&output.stdout)
}

pub fn parse_media_info(json: &[u8]) -> Result<MediaInfo, DownloadError> {
    serde_json::from_slice(json).map_err(|e| DownloadError::Metadata(e.to_string()))
}
