//! `songdl config` – show where the config lives and what it says.

use anyhow::Result;
use songdl_core::config::{self, SongdlConfig};

pub fn run_config(cfg: &SongdlConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
