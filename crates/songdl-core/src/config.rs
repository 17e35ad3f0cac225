use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Audio post-processing parameters (optional `[audio]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Target codec handed to yt-dlp's audio extraction (e.g. "mp3").
    pub codec: String,
    /// Target bitrate in kbps.
    pub quality_kbps: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            codec: "mp3".to_string(),
            quality_kbps: 192,
        }
    }
}

/// Global configuration loaded from `~/.config/songdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongdlConfig {
    /// Directory the converted files are written to (relative to the working directory unless absolute).
    pub output_dir: PathBuf,
    /// Filename template with yt-dlp placeholders, e.g. `%(title)s.%(ext)s`.
    pub output_template: String,
    /// yt-dlp format selector.
    pub format: String,
    /// Keep going when yt-dlp hits a per-item error (`--ignore-errors`).
    pub ignore_errors: bool,
    /// Program name or path of yt-dlp.
    pub ytdlp_path: String,
    #[serde(default)]
    pub audio: AudioConfig,
    /// Location of ffmpeg (binary or directory), passed as `--ffmpeg-location`.
    #[serde(default)]
    pub ffmpeg_location: Option<PathBuf>,
    /// Extra arguments appended verbatim to every yt-dlp download.
    #[serde(default)]
    pub extra_args: Vec<String>,
    /// Source URLs used when none are given on the command line.
    #[serde(default)]
    pub sources: Vec<String>,
}

impl Default for SongdlConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("public/songs"),
            output_template: "%(title)s.%(ext)s".to_string(),
            format: "bestaudio/best".to_string(),
            ignore_errors: true,
            ytdlp_path: "yt-dlp".to_string(),
            audio: AudioConfig::default(),
            ffmpeg_location: None,
            extra_args: Vec::new(),
            sources: Vec::new(),
        }
    }
}

impl SongdlConfig {
    /// Program used for the encoder probe: the configured ffmpeg location, or `ffmpeg` on PATH.
    pub fn ffmpeg_program(&self) -> PathBuf {
        match &self.ffmpeg_location {
            Some(loc) if loc.is_dir() => loc.join("ffmpeg"),
            Some(loc) => loc.clone(),
            None => PathBuf::from("ffmpeg"),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("songdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SongdlConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] with an explicit path (used by tests).
pub fn load_or_init_at(path: &Path) -> Result<SongdlConfig> {
    if !path.exists() {
        let default_cfg = SongdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: SongdlConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
