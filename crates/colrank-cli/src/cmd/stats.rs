//! `colrank stats`: structural summary of the mention graph.

use std::io::{self, Write};

use clap::Args;
use colrank_rank::graph::GraphStats;

use crate::cmd::{LogArgs, load_graph};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `colrank stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub log: LogArgs,
}

/// Execute `colrank stats`.
pub fn run_stats(args: &StatsArgs, output: OutputMode) -> anyhow::Result<()> {
    let graph = load_graph(&args.log, output)?;
    let stats = GraphStats::from_graph(&graph);
    render_mode(output, &stats, render_stats_text, render_stats_human)
}

fn render_stats_text(stats: &GraphStats, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "agents  {}", stats.agent_count)?;
    writeln!(w, "edges  {}", stats.edge_count)?;
    writeln!(w, "mentions  {}", stats.total_weight)?;
    writeln!(w, "density  {:.4}", stats.density)?;
    writeln!(w, "components  {}", stats.component_count)?;
    writeln!(w, "largest_ratio  {:.4}", stats.largest_component_ratio)?;
    writeln!(w, "isolated  {}", stats.isolated_count)?;
    writeln!(w, "max_in  {}", stats.max_in_degree)?;
    writeln!(w, "max_out  {}", stats.max_out_degree)?;
    writeln!(w, "mutual  {}", stats.mutual_pair_count)?;
    writeln!(w, "integration  {}", stats.integration_ref_count)?;
    writeln!(w, "hash  {}", stats.content_hash)
}

fn render_stats_human(stats: &GraphStats, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Mention Graph Stats")?;
    pretty_kv(w, "Agents", stats.agent_count.to_string())?;
    pretty_kv(w, "Edges", stats.edge_count.to_string())?;
    pretty_kv(w, "Mentions (total weight)", stats.total_weight.to_string())?;
    pretty_kv(w, "Density", format!("{:.4}", stats.density))?;
    pretty_kv(w, "Components", stats.component_count.to_string())?;
    pretty_kv(
        w,
        "Largest component",
        format!("{:.2}%", stats.largest_component_ratio * 100.0),
    )?;
    pretty_kv(w, "Collaboration", stats.collaboration.describe())?;
    pretty_kv(w, "Isolated agents", stats.isolated_count.to_string())?;
    pretty_kv(w, "Max in-degree", stats.max_in_degree.to_string())?;
    pretty_kv(w, "Max out-degree", stats.max_out_degree.to_string())?;
    pretty_kv(w, "Mutual pairs", stats.mutual_pair_count.to_string())?;
    pretty_kv(w, "Integration refs", stats.integration_ref_count.to_string())?;
    pretty_kv(w, "Content hash", &stats.content_hash)
}
