//! `colrank graph`: mention graph report.
//!
//! - `colrank graph <LOG>`: agents, weighted edges, mutual references,
//!   components and the collaboration ratio
//! - `colrank graph <LOG> --dot`: Graphviz DOT of the weighted graph
//!
//! Edge `A -> B (xN)` means A mentioned B in N distinct messages.

use std::io::{self, Write};

use clap::Args;
use colrank_core::config::GraphConfig;
use colrank_rank::MentionGraph;
use colrank_rank::graph::{
    Agent, CollaborationLevel, Component, IntegrationReference, MutualPair, component_ratio,
    connected_components, mutual_references,
};
use petgraph::dot::Dot;
use serde::Serialize;

use crate::cmd::{LogArgs, load_graph};
use crate::output::{OutputMode, pretty_section, render_mode};

/// Arguments for `colrank graph`.
#[derive(Args, Debug)]
pub struct GraphArgs {
    #[command(flatten)]
    pub log: LogArgs,

    /// Emit Graphviz DOT instead of the report.
    #[arg(long)]
    pub dot: bool,
}

#[derive(Debug, Serialize)]
struct EdgeRow {
    from: Agent,
    to: Agent,
    weight: u32,
}

/// Report payload for `colrank graph`.
#[derive(Debug, Serialize)]
pub struct GraphReport {
    agents: Vec<Agent>,
    edges: Vec<EdgeRow>,
    mutual: Vec<MutualPair>,
    components: Vec<Component>,
    largest_component_ratio: f64,
    collaboration: CollaborationLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    integration: Option<Vec<IntegrationReference>>,
}

impl GraphReport {
    fn from_graph(graph: &MentionGraph, show_integration: bool) -> Self {
        let components = connected_components(&graph.adjacency, &graph.agents);
        let ratio = component_ratio(&components);

        Self {
            agents: graph.agents.clone(),
            edges: graph
                .edges()
                .into_iter()
                .map(|(from, to, weight)| EdgeRow {
                    from: from.to_owned(),
                    to: to.to_owned(),
                    weight,
                })
                .collect(),
            mutual: mutual_references(&graph.adjacency).into_iter().collect(),
            components,
            largest_component_ratio: ratio,
            collaboration: CollaborationLevel::from_ratio(ratio),
            integration: show_integration.then(|| graph.integration_refs.clone()),
        }
    }
}

/// Execute `colrank graph`.
pub fn run_graph(args: &GraphArgs, config: &GraphConfig, output: OutputMode) -> anyhow::Result<()> {
    let graph = load_graph(&args.log, output)?;

    if args.dot {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_dot(&graph, &mut out)?;
        return Ok(());
    }

    let report = GraphReport::from_graph(&graph, config.show_integration);
    render_mode(output, &report, render_graph_text, render_graph_human)
}

fn write_dot(graph: &MentionGraph, w: &mut dyn Write) -> io::Result<()> {
    let dg = graph.to_digraph();
    write!(w, "{}", Dot::new(&dg))
}

fn render_graph_text(report: &GraphReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "agents  {}", report.agents.len())?;
    writeln!(w, "edges  {}", report.edges.len())?;
    for edge in &report.edges {
        writeln!(w, "edge  {}  {}  {}", edge.from, edge.to, edge.weight)?;
    }
    for pair in &report.mutual {
        writeln!(w, "mutual  {}  {}", pair.a, pair.b)?;
    }
    for (i, component) in report.components.iter().enumerate() {
        writeln!(w, "component  {}  {}", i + 1, component.join(","))?;
    }
    writeln!(
        w,
        "ratio  {:.4}  {}",
        report.largest_component_ratio,
        level_name(report.collaboration)
    )?;
    if let Some(ref refs) = report.integration {
        for r in refs {
            writeln!(w, "integration  {}  {}", r.from, r.references.join(","))?;
        }
    }
    Ok(())
}

fn render_graph_human(report: &GraphReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Collaboration Graph")?;
    writeln!(w, "Nodes: {}", report.agents.len())?;
    writeln!(w, "Agents: {}", report.agents.join(", "))?;
    writeln!(w)?;

    writeln!(w, "Edges: {}", report.edges.len())?;
    for edge in &report.edges {
        writeln!(w, "  {} -> {} (x{})", edge.from, edge.to, edge.weight)?;
    }
    writeln!(w)?;

    writeln!(w, "Mutual References: {}", report.mutual.len())?;
    for pair in &report.mutual {
        writeln!(w, "  {} <-> {}", pair.a, pair.b)?;
    }
    writeln!(w)?;

    writeln!(w, "Connected Components: {}", report.components.len())?;
    for (i, component) in report.components.iter().enumerate() {
        writeln!(w, "  Component {}: {}", i + 1, component.join(", "))?;
    }
    writeln!(w)?;

    writeln!(
        w,
        "Collaboration Ratio: {:.2}%",
        report.largest_component_ratio * 100.0
    )?;
    writeln!(w, "  -> {}", report.collaboration.describe())?;

    if let Some(ref refs) = report.integration {
        writeln!(w)?;
        writeln!(w, "Integration References: {}", refs.len())?;
        for r in refs {
            writeln!(w, "  {} builds on {}", r.from, r.references.join(", "))?;
        }
    }
    Ok(())
}

const fn level_name(level: CollaborationLevel) -> &'static str {
    match level {
        CollaborationLevel::Full => "full",
        CollaborationLevel::Emerging => "emerging",
        CollaborationLevel::Fragmented => "fragmented",
    }
}
