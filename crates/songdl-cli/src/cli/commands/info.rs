//! `songdl info <url>` – show metadata without downloading.

use anyhow::{Context, Result};
use songdl_core::config::SongdlConfig;
use songdl_core::info::probe_media;
use songdl_core::ytdlp::DownloadOptions;

pub async fn run_info(cfg: &SongdlConfig, url: &str) -> Result<()> {
    let options = DownloadOptions::from_config(cfg).context("invalid output template")?;
    let info = probe_media(&options, url)
        .await
        .with_context(|| format!("look up {url}"))?;

    println!("{:<10} {}", "Title", info.title);
    println!("{:<10} {}", "ID", info.id);
    if let Some(uploader) = &info.uploader {
        println!("{:<10} {}", "Uploader", uploader);
    }
    if let Some(duration) = info.duration_display() {
        println!("{:<10} {}", "Duration", duration);
    }
    if let Some(page) = &info.webpage_url {
        println!("{:<10} {}", "Page", page);
    }
    println!("{:<10} {}", "Saves to", info.expected_path(&options).display());
    Ok(())
}
