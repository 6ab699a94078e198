//! # nodeflow - Schema-Driven Node Graph Model
//!
//! **nodeflow** is the model behind a visual pipeline editor: typed node templates
//! with parameter schemas and port layouts, a mutable graph store that owns the nodes
//! and edges a user places on a canvas, ports derived on the fly from field content,
//! and a validity check that tells whether the pipeline is a DAG.
//!
//! Rendering, form widgets and execution live outside this crate. They read the
//! store's snapshots and [`view`] models and feed user actions back as store calls.
//!
//! ## Core Workflow
//!
//! 1.  **Build a Registry**: Use [`NodeTypeRegistry::builtin`](registry::NodeTypeRegistry::builtin) or assemble your own catalog with a `RegistryBuilder`.
//! 2.  **Create a Store**: `PipelineStore::builder(registry)` configures the connection policy and grid snapping.
//! 3.  **Edit**: Spawn nodes, connect ports, patch fields and sizes, and apply the canvas's structural change batches.
//! 4.  **Submit**: `submit()` analyzes the current graph and reports node/edge counts and whether it is acyclic.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nodeflow::prelude::*;
//! use std::sync::Arc;
//!
//! fn main() -> Result<()> {
//!     let registry = Arc::new(NodeTypeRegistry::builtin()?);
//!     let mut store = PipelineStore::builder(registry).with_snap_grid(20.0).build();
//!
//!     // Drop an input and a text node onto the canvas.
//!     let input = store.spawn_node("customInput", Position::new(0.0, 0.0));
//!     let text = store.spawn_node("text", Position::new(300.0, 0.0));
//!
//!     // Referencing `{{question}}` gives the text node a `var_question` input port.
//!     store.patch_field(&text, "text", "Answer this: {{question}}");
//!     store.connect(Connection::new(&input, "output", &text, "var_question"))?;
//!
//!     let analysis = store.submit()?;
//!     println!(
//!         "{} nodes, {} edges, DAG: {}",
//!         analysis.num_nodes, analysis.num_edges, analysis.is_dag
//!     );
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod derive;
pub mod error;
pub mod graph;
pub mod prelude;
pub mod registry;
pub mod store;
pub mod view;
