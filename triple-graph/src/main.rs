//! Triple Graph CLI
//!
//! Loads a serialized graph file into an in-memory store and prints its
//! canonical form. Given a node as second argument, prints the depth-first
//! `parent_of` walk from that node instead, indented by depth.

use std::env;
use std::process::ExitCode;

use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use triple_graph::{Graph, GraphConfig, GraphError, MemoryStore, Node};

const USAGE: &str = "usage: triple-graph <file> [root-node]";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("triple_graph=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(path: &str, root: Option<&str>) -> Result<(), GraphError> {
    let config = GraphConfig::from_env()?;

    let graph = Graph::from_file_with_config(MemoryStore::shared(), None, path, config)?;

    info!(
        graph = %graph.name(),
        path = %path,
        count = graph.triples_count(),
        "Loaded graph"
    );

    match root {
        Some(root) => {
            let root = Node::parse(root)?;
            graph.visit_depth_first(&root, |node, depth| {
                println!("{}{}", "  ".repeat(depth), node);
            })?;
        }
        None => {
            let bytes = graph.marshal()?;
            if !bytes.is_empty() {
                println!("{}", String::from_utf8_lossy(&bytes));
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    dotenv().ok();
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(path) = args.first() else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };

    match run(path, args.get(1).map(String::as_str)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "triple-graph failed");
            ExitCode::FAILURE
        }
    }
}
