pub mod completions;
pub mod graph;
pub mod scores;
pub mod stats;

use std::path::PathBuf;

use clap::Args;
use colrank_core::MessageLog;
use colrank_rank::MentionGraph;
use tracing::info;

use crate::output::{CliError, OutputMode, render_error};

/// Message log argument shared by every analysis command.
#[derive(Args, Debug, Clone)]
pub struct LogArgs {
    /// Relay message log: JSON array, graph_data dump, or JSON Lines. `-` reads stdin.
    #[arg(value_name = "LOG")]
    pub log: PathBuf,
}

/// Read the log named in `args` and build its mention graph.
///
/// Failures are rendered to stderr in `output` mode before being returned.
pub fn load_graph(args: &LogArgs, output: OutputMode) -> anyhow::Result<MentionGraph> {
    let log = match MessageLog::from_path(&args.log) {
        Ok(log) => log,
        Err(err) => {
            render_error(output, &CliError::from_code(err.code(), err.to_string()))?;
            anyhow::bail!("{}: {err}", err.code());
        }
    };

    let graph = MentionGraph::build(log.messages());
    info!(
        path = %args.log.display(),
        messages = log.len(),
        agents = graph.agent_count(),
        "read message log"
    );
    Ok(graph)
}
