//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the nodeflow
//! crate. Import it to get the core functionality without naming each type.
//!
//! # Example
//!
//! ```rust,no_run
//! use nodeflow::prelude::*;
//! use std::sync::Arc;
//!
//! # fn run_example() -> Result<()> {
//! let registry = Arc::new(NodeTypeRegistry::builtin()?);
//! let mut store = PipelineStore::new(registry);
//!
//! let id = store.spawn_node("llm", Position::new(100.0, 40.0));
//! store.patch_field(&id, "temperature", "0.2");
//!
//! println!("{:?}", store.submit()?);
//! # Ok(())
//! # }
//! ```

// Registry
pub use crate::registry::{
    DefaultValue, DynamicPortRule, FieldKind, FieldSchema, NodeMeta, NodeTypeDefinition,
    NodeTypeRegistry, PortDecl, PortSide, PortSpec, RegistryBuilder, Size,
};

// Graph model
pub use crate::graph::{
    Connection, EdgeChange, EdgeKind, GraphDefinition, GraphEdge, GraphNode, IntoGraph,
    NodeChange, NodeStyle, Position,
};

// Store, derivation and analysis
pub use crate::analysis::{PipelineAnalysis, analyze};
pub use crate::derive::{ResolvedPorts, derive_variables, resolve_ports};
pub use crate::store::{ConnectionPolicy, GraphSnapshot, PipelineStore};
pub use crate::view::{AutoResize, FieldView, NodeView, PortLayout};

// Error types
pub use crate::error::{ConnectError, DropError, SchemaError, SubmitError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
