//! `songdl completions <shell>` and `songdl man`.

use anyhow::Result;
use clap_complete::Shell;
use std::io;

pub fn run_completions(shell: Shell, cmd: &mut clap::Command) -> Result<()> {
    clap_complete::generate(shell, cmd, "songdl", &mut io::stdout());
    Ok(())
}

pub fn run_man(cmd: clap::Command) -> Result<()> {
    clap_mangen::Man::new(cmd).render(&mut io::stdout())?;
    Ok(())
}
