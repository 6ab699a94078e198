use super::{GraphEdge, GraphNode};
use crate::error::GraphConversionError;

/// A node/edge collection in nodeflow's own types.
#[derive(Debug, Clone, Default)]
pub struct GraphDefinition {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// A trait for custom data models that can be converted into a [`GraphDefinition`].
///
/// Implement this on the structs that describe your own export format to feed it
/// to [`analyze`](crate::analysis::analyze) or to anything else that consumes
/// nodeflow's graph types.
///
/// # Example
///
/// ```rust,no_run
/// use nodeflow::prelude::*;
/// use nodeflow::error::GraphConversionError;
///
/// struct MyStep { name: String, kind: String }
/// struct MyPipeline { steps: Vec<MyStep> }
///
/// impl IntoGraph for MyPipeline {
///     fn into_graph(self) -> std::result::Result<GraphDefinition, GraphConversionError> {
///         let nodes = self
///             .steps
///             .into_iter()
///             .map(|s| GraphNode::new(&s.name, &s.kind, Position::default()))
///             .collect();
///         Ok(GraphDefinition { nodes, edges: vec![] })
///     }
/// }
/// ```
pub trait IntoGraph {
    /// Consumes the object and converts it into nodeflow graph types.
    fn into_graph(self) -> Result<GraphDefinition, GraphConversionError>;
}
