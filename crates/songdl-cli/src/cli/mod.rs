//! CLI for songdl.

mod commands;
mod progress;

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use songdl_core::config;
use std::path::PathBuf;

use commands::{run_check, run_completions, run_config, run_fetch, run_info, run_man};

/// Top-level CLI for songdl.
#[derive(Debug, Parser)]
#[command(name = "songdl", version)]
#[command(about = "songdl: fetch audio from video URLs with yt-dlp and convert it to MP3", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Options of `songdl fetch`.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Video URLs to fetch. Defaults to the configured sources, then the built-in list.
    pub urls: Vec<String>,

    /// Read additional URLs from a file (one per line, `#` starts a comment).
    #[arg(long, value_name = "FILE")]
    pub list: Option<PathBuf>,

    /// Directory for the converted files (overrides `output_dir`).
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output filename template, e.g. "%(title)s.%(ext)s" (overrides `output_template`).
    #[arg(long, value_name = "TEMPLATE")]
    pub template: Option<String>,

    /// MP3 bitrate in kbps (overrides `audio.quality_kbps`).
    #[arg(long, value_name = "KBPS", value_parser = clap::value_parser!(u32).range(8..=320))]
    pub quality: Option<u32>,

    /// Only look up metadata and print where each file would be written.
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with an error if any download failed.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download audio from video URLs and convert it to MP3, one after another.
    Fetch(FetchArgs),

    /// Show metadata for a URL and the path its audio would be saved to.
    Info {
        /// Video URL.
        url: String,
    },

    /// Check that yt-dlp and ffmpeg are installed.
    Check,

    /// Print the config file location and the effective configuration.
    Config,

    /// Generate shell completions on stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },

    /// Render the man page (roff) on stdout.
    Man,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Completions { shell } => return run_completions(shell, &mut Cli::command()),
            CliCommand::Man => return run_man(Cli::command()),
            _ => {}
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch(args) => run_fetch(cfg, &args).await?,
            CliCommand::Info { url } => run_info(&cfg, &url).await?,
            CliCommand::Check => run_check(&cfg).await?,
            CliCommand::Config => run_config(&cfg)?,
            CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
