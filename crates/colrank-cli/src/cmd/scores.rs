//! `colrank scores`: ranked intelligence scores.
//!
//! Scores are directed eigenvector centrality over the mention graph, with
//! the top agent at 1.0. Equal scores are listed in the order the agents
//! first appear in the log.

use std::io::{self, Write};

use clap::Args;
use colrank_core::config::DisplayConfig;
use colrank_core::error::ErrorCode;
use colrank_rank::metrics::eigenvector::{MAX_ITERATIONS, TOLERANCE, Termination};
use colrank_rank::{RankedAgent, compute_scores};
use serde::Serialize;

use crate::cmd::{LogArgs, load_graph};
use crate::output::{CliError, OutputMode, pretty_section, render_error, render_mode};

/// Arguments for `colrank scores`.
#[derive(Args, Debug)]
pub struct ScoresArgs {
    #[command(flatten)]
    pub log: LogArgs,

    /// Show only the N highest-ranked agents (overrides `display.top`).
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Report a single agent instead of the full ranking.
    #[arg(long, value_name = "NAME")]
    pub agent: Option<String>,
}

/// Report payload for `colrank scores`.
#[derive(Debug, Serialize)]
pub struct ScoreReport {
    pub scores: Vec<RankedAgent>,
    pub agent_count: usize,
    pub iterations: usize,
    pub converged: bool,
    pub termination: Termination,
    pub tolerance: f64,
    pub max_iterations: usize,
    #[serde(skip)]
    bar_width: usize,
}

/// Execute `colrank scores`.
pub fn run_scores(
    args: &ScoresArgs,
    display: &DisplayConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let graph = load_graph(&args.log, output)?;
    let scores = compute_scores(&graph.adjacency, &graph.agents);

    let mut ranked = scores.ranked();
    if let Some(ref name) = args.agent {
        ranked.retain(|row| &row.agent == name);
        if ranked.is_empty() {
            render_error(
                output,
                &CliError::from_code(
                    ErrorCode::AgentNotFound,
                    format!("agent '{name}' does not appear in the message log"),
                ),
            )?;
            anyhow::bail!("{}: agent '{name}' not found", ErrorCode::AgentNotFound);
        }
    } else if let Some(limit) = args.top.or(display.top) {
        ranked.truncate(limit);
    }

    let report = ScoreReport {
        scores: ranked,
        agent_count: scores.len(),
        iterations: scores.iterations(),
        converged: scores.converged(),
        termination: scores.termination(),
        tolerance: TOLERANCE,
        max_iterations: MAX_ITERATIONS,
        bar_width: display.bar_width,
    };

    render_mode(output, &report, render_scores_text, render_scores_human)
}

/// Number of `#` characters drawn for `score`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn bar_len(score: f64, width: usize) -> usize {
    (score * width as f64).floor().max(0.0) as usize
}

fn render_scores_text(report: &ScoreReport, w: &mut dyn Write) -> io::Result<()> {
    for row in &report.scores {
        writeln!(w, "{}  {}  {:.6}", row.rank, row.agent, row.score)?;
    }
    Ok(())
}

fn render_scores_human(report: &ScoreReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Intelligence Scores (I_a)")?;
    writeln!(w, "I_a = EigenvectorCentrality(G)")?;
    writeln!(w)?;

    if report.scores.is_empty() {
        writeln!(w, "  (no agents)")?;
    }
    for row in &report.scores {
        writeln!(
            w,
            "  {}. {}: {:.4} {}",
            row.rank,
            row.agent,
            row.score,
            "#".repeat(bar_len(row.score, report.bar_width))
        )?;
    }

    writeln!(w)?;
    let status = match report.termination {
        Termination::Converged => format!("converged after {} iterations", report.iterations),
        Termination::IterationCap => format!("stopped at {} iterations", report.iterations),
        Termination::ZeroNorm => "no mention cycle; uniform scores".to_owned(),
        Termination::Empty => "empty graph".to_owned(),
    };
    writeln!(
        w,
        "Protocol: tolerance {:e}, max iterations {} ({status})",
        report.tolerance, report.max_iterations
    )
}
