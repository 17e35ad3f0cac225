//! `songdl fetch [URL]...` – download and convert, one URL at a time.

use anyhow::{Context, Result};
use songdl_core::batch::{self, BatchReport, ItemResult};
use songdl_core::config::SongdlConfig;
use songdl_core::downloader::AudioDownloader;
use songdl_core::info::probe_media;
use songdl_core::sources;
use songdl_core::tools::Toolchain;
use songdl_core::ytdlp::DownloadOptions;

use crate::cli::progress::spawn_progress_printer;
use crate::cli::FetchArgs;

pub async fn run_fetch(cfg: SongdlConfig, args: &FetchArgs) -> Result<()> {
    let cfg = apply_overrides(cfg, args);
    let urls = collect_urls(&cfg, args)?;
    let options = DownloadOptions::from_config(&cfg).context("invalid output template")?;

    if args.dry_run {
        return dry_run(&options, &urls).await;
    }

    let tools = Toolchain::probe(&cfg).await;
    if let Err(e) = tools.ytdlp {
        if let Some(hint) = e.hint() {
            eprintln!("Note: {hint}");
        }
        return Err(e).context("cannot download without yt-dlp");
    }
    if let Err(e) = &tools.ffmpeg {
        eprintln!("Warning: {e}");
        eprintln!("Note: without ffmpeg the audio cannot be converted to MP3.");
    }

    let downloader = AudioDownloader::new(options);
    downloader
        .ensure_output_dir()
        .await
        .with_context(|| format!("create output directory {}", cfg.output_dir.display()))?;

    let (progress_tx, progress_handle) = spawn_progress_printer(urls.len());
    let report = batch::run_batch(&downloader, &urls, Some(&progress_tx), print_item).await;
    drop(progress_tx);
    let _ = progress_handle.await;

    print!("{}", format_summary(&report));
    if !report.all_succeeded() && args.strict {
        anyhow::bail!("{} of {} downloads failed", report.failed(), report.items.len());
    }
    Ok(())
}

/// Command-line flags take precedence over the config file.
pub(crate) fn apply_overrides(mut cfg: SongdlConfig, args: &FetchArgs) -> SongdlConfig {
    if let Some(dir) = &args.output_dir {
        cfg.output_dir = dir.clone();
    }
    if let Some(t) = &args.template {
        cfg.output_template = t.clone();
    }
    if let Some(q) = args.quality {
        cfg.audio.quality_kbps = q;
    }
    cfg
}

/// Positional URLs plus the `--list` file. Configured, then built-in sources are
/// used only when neither was given; a named list without URLs is an error.
pub(crate) fn collect_urls(cfg: &SongdlConfig, args: &FetchArgs) -> Result<Vec<String>> {
    let mut explicit = args.urls.clone();
    if let Some(path) = &args.list {
        let listed = sources::load_url_list(path)?;
        if listed.is_empty() && explicit.is_empty() {
            anyhow::bail!("no URLs in {}", path.display());
        }
        explicit.extend(listed);
    }
    Ok(sources::resolve_sources(explicit, &cfg.sources))
}

fn print_item(item: &ItemResult) {
    let message = format_item(item);
    if item.result.is_ok() {
        print!("{message}");
    } else {
        eprint!("{message}");
    }
}

/// Console message for one finished item, newline-terminated.
pub(crate) fn format_item(item: &ItemResult) -> String {
    match &item.result {
        Ok(outcome) => format!(
            "Download completed successfully: {}\n",
            outcome.path.display()
        ),
        Err(e) => {
            let mut message = format!("Error during download of {}: {}\n", item.url, e);
            if let Some(hint) = e.hint() {
                message.push_str(&format!("Note: {hint}\n"));
            }
            message
        }
    }
}

/// Summary printed after the batch: the success count, then failures per kind.
pub(crate) fn format_summary(report: &BatchReport) -> String {
    let mut summary = format!(
        "{} of {} downloads succeeded.\n",
        report.succeeded(),
        report.items.len()
    );
    if !report.all_succeeded() {
        let kinds: Vec<String> = report
            .failures_by_kind()
            .into_iter()
            .map(|(kind, n)| format!("{kind}={n}"))
            .collect();
        summary.push_str(&format!("Failures: {}\n", kinds.join(", ")));
    }
    summary
}

async fn dry_run(options: &DownloadOptions, urls: &[String]) -> Result<()> {
    for url in urls {
        match probe_media(options, url).await {
            Ok(info) => println!("{url}\n  -> {}", info.expected_path(options).display()),
            Err(e) => eprintln!("{url}\n  !! {e}"),
        }
    }
    Ok(())
}
