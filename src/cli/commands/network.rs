//! Network command - breadth-first search and packet delivery over a topology

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Result, anyhow};
use clap::Parser;
use serde::Serialize;

use crate::{
    adapters::prompt,
    cli::{config::TopologyConfig, output::print_banner},
    network::{Graph, NodeId, PacketTrace, SearchResult},
};

#[derive(Parser, Debug, Default)]
#[command(about = "Search a network and trace a packet along the shortest path")]
pub struct NetworkArgs {
    /// JSON topology file (defaults to the built-in A..E network)
    #[arg(long, short = 't')]
    pub topology: Option<PathBuf>,

    /// Node the packet starts from (prompted for when omitted)
    #[arg(long, short = 's')]
    pub source: Option<String>,

    /// Node the packet is sent to (prompted for when omitted)
    #[arg(long, short = 'd')]
    pub target: Option<String>,

    /// Print a JSON search report instead of the console walkthrough
    #[arg(long)]
    pub json: bool,
}

/// Distance of one node in a [`SearchReport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeDistance {
    pub name: String,
    pub distance: Option<usize>,
}

/// Machine-readable result of one network run
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub source: String,
    pub target: String,
    pub distances: Vec<NodeDistance>,
    pub path: Option<Vec<String>>,
    pub packet: Option<PacketTrace>,
}

impl SearchReport {
    pub fn new(graph: &Graph, result: &SearchResult, target: NodeId) -> crate::Result<Self> {
        let distances = graph
            .nodes()
            .map(|(id, name)| NodeDistance {
                name: name.to_string(),
                distance: result.distance(id),
            })
            .collect();
        let path = result
            .path_to(target)
            .map(|path| path_names(graph, &path))
            .transpose()?;
        Ok(Self {
            source: graph.node_name(result.source())?.to_string(),
            target: graph.node_name(target)?.to_string(),
            distances,
            path,
            packet: PacketTrace::route(graph, result, target)?,
        })
    }
}

pub fn execute(args: NetworkArgs) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&args, &mut stdin.lock(), &mut stdout.lock())
}

/// Run the network demo reading answers from `input` and writing to `output`
pub fn run<R: BufRead, W: Write>(args: &NetworkArgs, input: &mut R, output: &mut W) -> Result<()> {
    let config = match &args.topology {
        Some(path) => TopologyConfig::load(path)?,
        None => TopologyConfig::default(),
    };
    let graph = config.build()?;

    if args.json {
        let (source, target) = endpoints_from_args(&graph, args)?;
        let result = graph.bfs(source)?;
        let report = SearchReport::new(&graph, &result, target)?;
        serde_json::to_writer_pretty(&mut *output, &report)?;
        writeln!(output)?;
        return Ok(());
    }

    writeln!(output, "=== SIMPLE UNINFORMED SEARCH (BFS) WITH PACKET SENDING ===")?;
    writeln!(output, "\nNetwork connections:")?;
    write!(output, "{graph}")?;

    let (source, target) = match (&args.source, &args.target) {
        (Some(_), Some(_)) => endpoints_from_args(&graph, args)?,
        _ => prompt_endpoints(&graph, args, input, output)?,
    };

    let result = graph.bfs(source)?;
    let source_name = graph.node_name(source)?;
    let target_name = graph.node_name(target)?;

    print_banner(output, &format!("BFS SEARCH FROM NODE {source_name}"))?;
    print_traversal(&graph, &result, output)?;

    print_banner(output, "SHORTEST DISTANCES")?;
    print_distances(&graph, &result, output)?;

    print_banner(output, "SHORTEST PATH")?;
    match result.path_to(target) {
        Some(path) => writeln!(
            output,
            "Shortest path from {source_name} to {target_name} (distance: {}):\n{}",
            path.len() - 1,
            path_names(&graph, &path)?.join(" -> ")
        )?,
        None => writeln!(output, "No path exists from {source_name} to {target_name}")?,
    }

    print_banner(output, "PACKET SENDING FEATURE")?;
    match PacketTrace::route(&graph, &result, target)? {
        Some(trace) => {
            writeln!(output)?;
            writeln!(output, "{trace}")?;
        }
        None => writeln!(
            output,
            "Cannot send packet: No path exists from {source_name} to {target_name}"
        )?,
    }
    Ok(())
}

/// Endpoints named on the command line; a missing name means the first
/// (source) or last (target) node
fn endpoints_from_args(graph: &Graph, args: &NetworkArgs) -> Result<(NodeId, NodeId)> {
    let (first, last) = default_endpoints(graph)?;
    let source = match &args.source {
        Some(name) => graph.lookup(name)?,
        None => first,
    };
    let target = match &args.target {
        Some(name) => graph.lookup(name)?,
        None => last,
    };
    Ok((source, target))
}

/// Ask for any endpoint not given on the command line. Unknown names fall
/// back to the first and last node.
fn prompt_endpoints<R: BufRead, W: Write>(
    graph: &Graph,
    args: &NetworkArgs,
    input: &mut R,
    output: &mut W,
) -> Result<(NodeId, NodeId)> {
    writeln!(output)?;
    let source_name = match &args.source {
        Some(name) => name.clone(),
        None => first_word(prompt(
            input,
            output,
            "Enter START node name for packet sending: ",
            "start node name",
        )?),
    };
    let target_name = match &args.target {
        Some(name) => name.clone(),
        None => first_word(prompt(
            input,
            output,
            "Enter END node name for packet sending: ",
            "end node name",
        )?),
    };

    match (graph.find(&source_name), graph.find(&target_name)) {
        (Some(source), Some(target)) => Ok((source, target)),
        _ => {
            let (first, last) = default_endpoints(graph)?;
            tracing::debug!(%source_name, %target_name, "unknown endpoint, using defaults");
            writeln!(
                output,
                "Invalid node name(s) entered. Using default: {} to {}.",
                graph.node_name(first)?,
                graph.node_name(last)?
            )?;
            Ok((first, last))
        }
    }
}

fn default_endpoints(graph: &Graph) -> Result<(NodeId, NodeId)> {
    let last = graph
        .node_count()
        .checked_sub(1)
        .ok_or_else(|| anyhow!("network has no nodes"))?;
    Ok((NodeId::new(0), NodeId::new(last)))
}

fn first_word(answer: String) -> String {
    answer.split_whitespace().next().unwrap_or_default().to_string()
}

fn path_names(graph: &Graph, path: &[NodeId]) -> crate::Result<Vec<String>> {
    path.iter()
        .map(|&id| graph.node_name(id).map(str::to_string))
        .collect()
}

fn print_traversal<W: Write>(graph: &Graph, result: &SearchResult, output: &mut W) -> Result<()> {
    for &node in result.expansion_order() {
        writeln!(output, "Visiting: {}", graph.node_name(node)?)?;
        for found in result.discovered_from(node) {
            let distance = result
                .distance(found)
                .ok_or_else(|| anyhow!("discovered node {found} has no distance"))?;
            writeln!(
                output,
                "  Found neighbor: {} (distance: {distance})",
                graph.node_name(found)?
            )?;
        }
    }
    Ok(())
}

fn print_distances<W: Write>(graph: &Graph, result: &SearchResult, output: &mut W) -> Result<()> {
    for (id, name) in graph.nodes() {
        match result.distance(id) {
            Some(steps) => writeln!(output, "{name}: {steps} steps")?,
            None => writeln!(output, "{name}: Not reachable")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn run_with_input(args: &NetworkArgs, input: &str) -> String {
        let mut output = Vec::new();
        run(args, &mut Cursor::new(input.to_string()), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn prompted_endpoints_drive_the_walkthrough() {
        let text = run_with_input(&NetworkArgs::default(), "A\nE\n");

        assert!(text.contains("Network connections:\nA: B C\n"));
        assert!(text.contains("Visiting: A\n  Found neighbor: B (distance: 1)\n"));
        assert!(text.contains("E: 2 steps"));
        assert!(text.contains("A -> C -> E"));
        assert!(text.contains("Packet at: C (HOP 1)"));
        assert!(text.contains("Total hops: 2"));
    }

    #[test]
    fn unknown_prompted_name_falls_back_to_first_and_last() {
        let text = run_with_input(&NetworkArgs::default(), "Z\nB\n");
        assert!(text.contains("Invalid node name(s) entered. Using default: A to E."));
        assert!(text.contains("Sending packet from A to E..."));
    }

    #[test]
    fn search_starts_from_chosen_source() {
        let args = NetworkArgs {
            source: Some("D".to_string()),
            target: Some("A".to_string()),
            ..NetworkArgs::default()
        };
        let text = run_with_input(&args, "");
        assert!(text.contains("=== BFS SEARCH FROM NODE D ==="));
        assert!(text.contains("D: 0 steps"));
        assert!(text.contains("D -> B -> A"));
    }

    #[test]
    fn unknown_name_on_command_line_is_an_error() {
        let args = NetworkArgs {
            source: Some("Q".to_string()),
            target: Some("A".to_string()),
            ..NetworkArgs::default()
        };
        let mut output = Vec::new();
        assert!(run(&args, &mut Cursor::new(String::new()), &mut output).is_err());
    }

    #[test]
    fn json_report_lists_distances_and_path() {
        let args = NetworkArgs {
            json: true,
            ..NetworkArgs::default()
        };
        let text = run_with_input(&args, "");
        let report: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(report["source"], "A");
        assert_eq!(report["target"], "E");
        assert_eq!(report["path"], serde_json::json!(["A", "C", "E"]));
        assert_eq!(report["distances"][3]["distance"], 2);
        assert_eq!(report["packet"]["total_hops"], 2);
    }
}
