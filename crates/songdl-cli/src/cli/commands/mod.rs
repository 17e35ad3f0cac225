//! CLI command handlers. Each command is in its own file.

mod check;
mod completions;
mod config;
mod fetch;
mod info;

pub use check::run_check;
pub use completions::{run_completions, run_man};
pub use config::run_config;
pub use fetch::run_fetch;
pub use info::run_info;

#[cfg(test)]
pub(crate) use fetch::{apply_overrides, collect_urls, format_item, format_summary};
