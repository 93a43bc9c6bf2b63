use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use incite_graph::config::{DuplicatePolicy, ExportOptions, GraphConfig, LayoutConfig, RadiusStep};
use incite_graph::highlight::paper_details;
use incite_graph::search::search_titles;
use incite_graph::util::{format_influence, short_title};
use incite_graph::{analyze, flow_graph, mermaid_diagram, resolve_reference_click, select_node};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Paper list as JSON (array or `{ "graph": [...] }`); `-` reads stdin.
    #[arg(long, short, default_value = "-")]
    input: String,

    #[arg(long, default_value_t = 300.0)]
    center_x: f64,

    #[arg(long, default_value_t = 200.0)]
    center_y: f64,

    /// Fixed ring spacing instead of the size-scaled default.
    #[arg(long)]
    radius_step: Option<f64>,

    /// Keep the first record for a repeated id instead of the last.
    #[arg(long)]
    first_wins: bool,

    #[arg(long)]
    dedup_edges: bool,

    #[arg(long, default_value = "TD")]
    direction: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Node/edge graph with positions, as JSON.
    Graph,
    /// Mermaid flowchart with its token map.
    Mermaid {
        /// Print only the diagram text.
        #[arg(long)]
        raw: bool,
    },
    /// Every analyzed node with references, influence and position.
    Nodes,
    /// Highlight roles for every node relative to one paper.
    Select { id: String },
    /// Decide what a click on a reference label does.
    Resolve { reference: String },
    Details { id: String },
    Search {
        query: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Most cited papers.
    Top {
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Rank by outgoing references instead.
        #[arg(long)]
        citing: bool,
    },
}

impl Args {
    fn graph_config(&self) -> GraphConfig {
        GraphConfig {
            layout: LayoutConfig {
                center_x: self.center_x,
                center_y: self.center_y,
                radius: self
                    .radius_step
                    .map(RadiusStep::Fixed)
                    .unwrap_or_default(),
            },
            duplicates: if self.first_wins {
                DuplicatePolicy::FirstWins
            } else {
                DuplicatePolicy::LastWins
            },
        }
    }

    fn export_options(&self) -> ExportOptions {
        ExportOptions {
            dedup_edges: self.dedup_edges,
            direction: self.direction.clone(),
        }
    }
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "incite_graph=info".into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read paper list from stdin")?;
        return Ok(raw);
    }

    let path = PathBuf::from(input);
    std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read paper list from {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{rendered}");
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let input = read_input(&args.input)?;
    let graph = analyze(&input, &args.graph_config())?;
    let options = args.export_options();

    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        dangling = graph.dangling_references().len(),
        "citation graph ready"
    );

    match &args.command {
        Command::Graph => print_json(&flow_graph(&graph, &options)),
        Command::Mermaid { raw } => {
            let export = mermaid_diagram(&graph, &options);
            if export.has_collisions() {
                tracing::warn!(
                    collisions = export.collisions().len(),
                    "distinct papers share a diagram token; suffixed tokens were assigned"
                );
            }
            if *raw {
                print!("{}", export.text);
                Ok(())
            } else {
                print_json(&export)
            }
        }
        Command::Nodes => print_json(&graph.nodes),
        Command::Select { id } => {
            let state =
                select_node(&graph, id).ok_or_else(|| anyhow!("no paper with id {id:?}"))?;
            print_json(&state)
        }
        Command::Resolve { reference } => print_json(&resolve_reference_click(&graph, reference)),
        Command::Details { id } => {
            let details =
                paper_details(&graph, id).ok_or_else(|| anyhow!("no paper with id {id:?}"))?;
            print_json(&details)
        }
        Command::Search { query, limit } => print_json(&search_titles(&graph, query, *limit)),
        Command::Top { limit, citing } => {
            let ranked = if *citing {
                graph.most_citing(*limit)
            } else {
                graph.most_cited(*limit)
            };
            for node in ranked {
                println!(
                    "{}  in {:>3}  out {:>3}  {}",
                    format_influence(node.influence),
                    node.num_in,
                    node.num_out,
                    short_title(&node.id, 72)
                );
            }
            Ok(())
        }
    }
}
