//! `colrank completions`: shell completion scripts.

use std::io::Write;

use clap::Args;
use clap_complete::{Shell, generate};

/// Arguments for `colrank completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script generation.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `shell` to stdout.
pub fn run_completions(args: &CompletionsArgs, command: &mut clap::Command) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_completions(args.shell, command, &mut out);
    out.flush()?;
    Ok(())
}

fn write_completions(shell: Shell, command: &mut clap::Command, out: &mut dyn Write) {
    let name = command.get_name().to_owned();
    generate(shell, command, name, out);
}
