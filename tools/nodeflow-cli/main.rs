use ahash::AHashMap;
use clap::Parser;
use nodeflow::error::GraphConversionError;
use nodeflow::prelude::*;
use serde::Deserialize;
use std::fs;
use std::io::{self, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// --- JSON Deserialization Structs (Input Format Specific) ---
// These structs match the editor's pipeline export and are only used here for conversion.

#[derive(Deserialize)]
struct RawPipeline {
    nodes: Vec<RawNode>,
    #[serde(default)]
    edges: Vec<RawEdge>,
}

#[derive(Deserialize)]
struct RawNode {
    id: String,
    #[serde(default)]
    position: Position,
    data: RawNodeData,
    #[serde(default)]
    style: NodeStyle,
}

#[derive(Deserialize)]
struct RawNodeData {
    #[serde(rename = "nodeType")]
    node_type: String,
    #[serde(flatten)]
    fields: AHashMap<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct RawEdge {
    id: Option<String>,
    source: String,
    #[serde(alias = "sourceHandle")]
    source_handle: Option<String>,
    target: String,
    #[serde(alias = "targetHandle")]
    target_handle: Option<String>,
}

// --- Converter Implementation ---

impl IntoGraph for RawPipeline {
    fn into_graph(self) -> std::result::Result<GraphDefinition, GraphConversionError> {
        let nodes = self
            .nodes
            .into_iter()
            .map(|raw| {
                if raw.id.is_empty() {
                    return Err(GraphConversionError::ValidationError(
                        "node without an id".to_string(),
                    ));
                }
                let mut node =
                    GraphNode::new(&raw.id, &raw.data.node_type, raw.position).with_style(raw.style);
                for (key, value) in raw.data.fields {
                    // The export repeats the node id inside `data`.
                    if key == "id" {
                        continue;
                    }
                    let text = match value {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    };
                    node.data.insert(key, text);
                }
                Ok(node)
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let edges = self
            .edges
            .into_iter()
            .map(|raw| {
                let connection = Connection {
                    source: raw.source,
                    source_handle: raw.source_handle,
                    target: raw.target,
                    target_handle: raw.target_handle,
                };
                let mut edge = GraphEdge::from_connection(connection);
                if let Some(id) = raw.id {
                    edge.id = id;
                }
                edge
            })
            .collect();

        Ok(GraphDefinition { nodes, edges })
    }
}

/// Inspect and validate node graph pipelines
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a pipeline JSON export to analyze
    pipeline_path: Option<String>,

    /// List the node palette grouped by category
    #[arg(short, long)]
    palette: bool,

    /// Run in interactive mode and build a pipeline step by step
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,

    /// Log store activity (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let registry = Arc::new(
        NodeTypeRegistry::builtin()
            .unwrap_or_else(|e| exit_with_error(&format!("Invalid node catalog: {}", e))),
    );

    if cli.palette {
        print_palette(&registry);
    }

    if cli.human {
        run_interactive(registry);
    } else if let Some(path) = cli.pipeline_path {
        run_analysis(&path);
    } else if !cli.palette {
        exit_with_error("A pipeline path is required in non-interactive mode.");
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "nodeflow=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_palette(registry: &NodeTypeRegistry) {
    println!("--- Node Palette ---");
    for (category, definitions) in registry.by_category() {
        println!("[{}]", category);
        for definition in definitions {
            println!(
                "  {} {:<10} {:<14} {}",
                definition.meta.icon.as_deref().unwrap_or(" "),
                definition.meta.title,
                definition.id,
                definition.meta.description.as_deref().unwrap_or("")
            );
        }
    }
    println!();
}

fn run_analysis(path: &str) {
    let json = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read pipeline file '{}': {}", path, e))
    });
    let raw: RawPipeline = serde_json::from_str(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse pipeline JSON: {}", e)));
    let graph = raw
        .into_graph()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to convert pipeline: {}", e)));

    if graph.nodes.is_empty() {
        exit_with_error(&SubmitError::EmptyPipeline.to_string());
    }
    print_analysis(&analyze(&graph.nodes, &graph.edges));
}

fn print_analysis(analysis: &PipelineAnalysis) {
    println!("\n--- Pipeline Analysis ---");
    println!("Nodes:  {}", analysis.num_nodes);
    println!("Edges:  {}", analysis.num_edges);
    if analysis.is_dag {
        println!("Status: Valid DAG");
    } else {
        println!("Status: Invalid - Contains Cycles");
    }
    println!();
}

/// Runs the CLI as an interactive editing session against a live store.
fn run_interactive(registry: Arc<NodeTypeRegistry>) {
    println!("--- nodeflow Interactive Mode ---");
    println!("Commands:");
    println!("  add <type> [x y]              spawn a node");
    println!("  connect <node:port> <node:port>");
    println!("  set <node> <field> <value...> patch a field");
    println!("  remove <node>                 remove a node");
    println!("  show                          list nodes and edges");
    println!("  submit                        analyze the pipeline");
    println!("  quit");

    let mut store = PipelineStore::builder(registry).with_snap_grid(20.0).build();

    loop {
        let line = prompt_for_input("nodeflow", None);
        let mut words = line.split_whitespace();
        match words.next() {
            Some("add") => {
                let Some(node_type) = words.next() else {
                    println!("Usage: add <type> [x y]");
                    continue;
                };
                let x = words.next().and_then(|w| w.parse().ok()).unwrap_or(0.0);
                let y = words.next().and_then(|w| w.parse().ok()).unwrap_or(0.0);
                let id = store.spawn_node(node_type, Position::new(x, y));
                if store.definition_of(&id).is_none() {
                    println!("Added {} (unknown node type, shown as placeholder)", id);
                } else {
                    println!("Added {}", id);
                }
            }
            Some("connect") => {
                let source = words.next().and_then(split_endpoint);
                let target = words.next().and_then(split_endpoint);
                let (Some((source, source_port)), Some((target, target_port))) = (source, target)
                else {
                    println!("Usage: connect <node:port> <node:port>");
                    continue;
                };
                match store.connect(Connection::new(source, source_port, target, target_port)) {
                    Ok(edge_id) => println!("Connected ({})", edge_id),
                    Err(e) => println!("Error: {}", e),
                }
            }
            Some("set") => {
                let (Some(node_id), Some(key)) = (words.next(), words.next()) else {
                    println!("Usage: set <node> <field> <value...>");
                    continue;
                };
                let value = words.collect::<Vec<_>>().join(" ");
                if !store.patch_field(node_id, key, &value) {
                    println!("No node named '{}'", node_id);
                }
            }
            Some("remove") => match words.next() {
                Some(node_id) => store.apply_node_changes(&[NodeChange::Remove {
                    id: node_id.to_string(),
                }]),
                None => println!("Usage: remove <node>"),
            },
            Some("show") => print_store(&store),
            Some("submit") => match store.submit() {
                Ok(analysis) => print_analysis(&analysis),
                Err(e) => println!("Error: {}", e),
            },
            Some("quit") | Some("exit") => break,
            Some(other) => println!("Unknown command '{}'", other),
            None => {}
        }
    }
}

fn split_endpoint(word: &str) -> Option<(&str, &str)> {
    word.split_once(':')
}

fn print_store(store: &PipelineStore) {
    for node in store.nodes() {
        let Some(view) = store.view(&node.id) else {
            continue;
        };
        println!(
            "{} [{}] at ({}, {})",
            node.id,
            view.title(),
            node.position.x,
            node.position.y
        );
        if let NodeView::Known { fields, ports, .. } = &view {
            for field in fields {
                println!("    {} = {:?}", field.label(), field.value);
            }
            let inputs: Vec<&str> = ports.left.iter().map(|p| p.id.as_str()).collect();
            let outputs: Vec<&str> = ports.right.iter().map(|p| p.id.as_str()).collect();
            println!("    in: {:?}  out: {:?}", inputs, outputs);
        }
    }
    for edge in store.edges() {
        println!(
            "{}:{} -> {}:{}",
            edge.source,
            edge.source_handle.as_deref().unwrap_or("?"),
            edge.target,
            edge.target_handle.as_deref().unwrap_or("?")
        );
    }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    if io::stdout().flush().is_err() {
        exit_with_error("Failed to write to stdout");
    }

    match io::stdin().read_line(&mut line) {
        Ok(0) => return "quit".to_string(),
        Ok(_) => {}
        Err(e) => exit_with_error(&format!("Failed to read line: {}", e)),
    }
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
