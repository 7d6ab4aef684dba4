#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use colrank_core::config::resolve_config;
use colrank_core::error::ErrorCode;
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "colrank: rank collaborating agents by who important agents mention",
    long_about = None
)]
struct Cli {
    /// Enable debug logging (ignored when COLRANK_LOG is set).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors (ignored when COLRANK_LOG is set).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Output format. Defaults to pretty on a terminal, text when piped.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output (same as `--format json`).
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Analysis",
        about = "Rank agents by eigenvector centrality",
        long_about = "Build the mention graph from a message log and rank every agent by directed eigenvector centrality. The top agent scores 1.0.",
        after_help = "EXAMPLES:\n    # Rank everyone in a relay dump\n    colrank scores relay.json\n\n    # Top three only\n    colrank scores relay.json --top 3\n\n    # One agent, machine-readable\n    colrank scores relay.jsonl --agent Alice --json"
    )]
    Scores(cmd::scores::ScoresArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Show the mention graph",
        long_about = "Show agents, weighted mention edges, mutual references, connected components and the collaboration ratio.",
        after_help = "EXAMPLES:\n    # Human-readable report\n    colrank graph relay.json\n\n    # Render with Graphviz\n    colrank graph relay.json --dot | dot -Tsvg > graph.svg"
    )]
    Graph(cmd::graph::GraphArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Summarize graph structure",
        long_about = "Summarize the mention graph: size, density, components, degrees, and a content hash for comparing logs.",
        after_help = "EXAMPLES:\n    # Summary of a log read from stdin\n    cat relay.jsonl | colrank stats -"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Project Maintenance",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    colrank completions bash"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn default_log_filter(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose || env::var("DEBUG").is_ok() {
        "colrank=debug,info"
    } else {
        "colrank=info,warn"
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env("COLRANK_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(verbose, quiet)));

    let format = env::var("COLRANK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let cwd = env::current_dir()?;
    let json_requested = cli.json || cli.format.is_some_and(OutputMode::is_json);
    let config = match resolve_config(&cwd, json_requested) {
        Ok(config) => config,
        Err(err) => {
            let output = if json_requested {
                OutputMode::Json
            } else {
                OutputMode::Text
            };
            render_error(
                output,
                &CliError::from_code(ErrorCode::ConfigParseError, format!("{err:#}")),
            )?;
            return Err(err);
        }
    };

    let output = resolve_output_mode(cli.format, &config.resolved_output);
    debug!(?output, "resolved output mode");

    match cli.command {
        Commands::Scores(ref args) => {
            cmd::scores::run_scores(args, &config.project.display, output)
        }
        Commands::Graph(ref args) => cmd::graph::run_graph(args, &config.project.graph, output),
        Commands::Stats(ref args) => cmd::stats::run_stats(args, output),
        Commands::Completions(ref args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args, &mut command)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_parses_before_subcommand() {
        let cli = Cli::parse_from(["colrank", "--json", "scores", "log.json"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Scores(_)));
    }

    #[test]
    fn json_flag_parses_after_subcommand() {
        let cli = Cli::parse_from(["colrank", "stats", "log.json", "--json"]);
        assert!(cli.json);
    }

    #[test]
    fn format_flag_accepts_modes() {
        let cli = Cli::parse_from(["colrank", "--format", "pretty", "graph", "log.json"]);
        assert_eq!(cli.format, Some(OutputMode::Pretty));
        let cli = Cli::parse_from(["colrank", "graph", "log.json", "--format", "text"]);
        assert_eq!(cli.format, Some(OutputMode::Text));
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["colrank", "-v", "-q", "stats", "log.json"]).is_err());
    }

    #[test]
    fn default_filter_follows_flags() {
        assert_eq!(default_log_filter(false, true), "error");
        assert_eq!(default_log_filter(true, false), "colrank=debug,info");
    }

    #[test]
    fn scores_options_parse() {
        let cli = Cli::parse_from([
            "colrank", "scores", "log.json", "--top", "3", "--agent", "Alice",
        ]);
        match cli.command {
            Commands::Scores(args) => {
                assert_eq!(args.log.log.to_str(), Some("log.json"));
                assert_eq!(args.top, Some(3));
                assert_eq!(args.agent.as_deref(), Some("Alice"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn graph_dot_flag_parses() {
        let cli = Cli::parse_from(["colrank", "graph", "-", "--dot"]);
        assert!(matches!(cli.command, Commands::Graph(ref args) if args.dot));
    }

    #[test]
    fn log_argument_is_required() {
        assert!(Cli::try_parse_from(["colrank", "scores"]).is_err());
    }

    #[test]
    fn completions_subcommand_parses() {
        let cli = Cli::parse_from(["colrank", "completions", "zsh"]);
        assert!(matches!(
            cli.command,
            Commands::Completions(cmd::completions::CompletionsArgs {
                shell: clap_complete::Shell::Zsh,
            })
        ));
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
