//! The download configuration record and the yt-dlp arguments derived from it.

use crate::config::SongdlConfig;
use crate::template::{OutputTemplate, TemplateError};
use crate::ytdlp::output::{FILE_PRINT_TEMPLATE, PROGRESS_TEMPLATE};
use std::path::PathBuf;
use url::Url;

/// Everything yt-dlp needs to fetch one URL as an audio file.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// yt-dlp program name or path.
    pub program: PathBuf,
    /// Format selector, `bestaudio/best` by default.
    pub format: String,
    pub output_dir: PathBuf,
    pub template: OutputTemplate,
    /// Codec for the audio-extraction post-processor.
    pub audio_codec: String,
    pub audio_quality_kbps: u32,
    pub ignore_errors: bool,
    pub ffmpeg_location: Option<PathBuf>,
    pub extra_args: Vec<String>,
}

impl DownloadOptions {
    pub fn from_config(cfg: &SongdlConfig) -> Result<Self, TemplateError> {
        Ok(Self {
            program: PathBuf::from(&cfg.ytdlp_path),
            format: cfg.format.clone(),
            output_dir: cfg.output_dir.clone(),
            template: OutputTemplate::parse(&cfg.output_template)?,
            audio_codec: cfg.audio.codec.clone(),
            audio_quality_kbps: cfg.audio.quality_kbps,
            ignore_errors: cfg.ignore_errors,
            ffmpeg_location: cfg.ffmpeg_location.clone(),
            extra_args: cfg.extra_args.clone(),
        })
    }

    /// Arguments for downloading `url`, extracting audio and converting it.
    ///
    /// Progress and the final file path are reported through marker lines
    /// (see [`crate::ytdlp::parse_line`]).
    pub fn download_args(&self, url: &Url) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "-f".into(),
            self.format.clone(),
            "-x".into(),
            "--audio-format".into(),
            self.audio_codec.clone(),
            "--audio-quality".into(),
            format!("{}K", self.audio_quality_kbps),
            "-o".into(),
            self.template.in_dir(&self.output_dir),
            "--no-playlist".into(),
            "--newline".into(),
            "--progress".into(),
            "--progress-template".into(),
            PROGRESS_TEMPLATE.into(),
            "--no-simulate".into(),
            "--print".into(),
            FILE_PRINT_TEMPLATE.into(),
        ];
        if self.ignore_errors {
            args.push("--ignore-errors".into());
        }
        self.push_common(&mut args);
        args.extend(self.extra_args.iter().cloned());
        args.push("--".into());
        args.push(url.as_str().to_string());
        args
    }

    /// Arguments for a metadata-only probe printing one JSON document.
    pub fn probe_args(&self, url: &Url) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "-J".into(),
            "--skip-download".into(),
            "--no-playlist".into(),
            "-f".into(),
            self.format.clone(),
        ];
        self.push_common(&mut args);
        args.push("--".into());
        args.push(url.as_str().to_string());
        args
    }

    fn push_common(&self, args: &mut Vec<String>) {
        if let Some(loc) = &self.ffmpeg_location {
            args.push("--ffmpeg-location".into());
            args.push(loc.to_string_lossy().into_owned());
        }
    }
}
