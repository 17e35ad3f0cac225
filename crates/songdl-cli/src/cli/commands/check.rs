//! `songdl check` – report whether yt-dlp and ffmpeg are usable.

use anyhow::Result;
use songdl_core::config::SongdlConfig;
use songdl_core::error::DownloadError;
use songdl_core::tools::{ToolStatus, Toolchain};

pub async fn run_check(cfg: &SongdlConfig) -> Result<()> {
    let tools = Toolchain::probe(cfg).await;
    print_status("yt-dlp", &tools.ytdlp);
    print_status("ffmpeg", &tools.ffmpeg);

    if !tools.can_convert() {
        println!("Note: without ffmpeg, downloads cannot be converted to MP3.");
    }
    if !tools.can_download() {
        anyhow::bail!("yt-dlp is required");
    }
    Ok(())
}

fn print_status(name: &str, status: &Result<ToolStatus, DownloadError>) {
    match status {
        Ok(s) => println!("{:<8} ok       {} ({})", name, s.version, s.program.display()),
        Err(e) => {
            println!("{:<8} missing  {}", name, e);
            if let Some(hint) = e.hint() {
                println!("         {hint}");
            }
        }
    }
}
