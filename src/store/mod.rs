//! The mutable pipeline state.
//!
//! [`PipelineStore`] owns the authoritative node and edge collections for one editing
//! session. Collections hold `Arc`s: an edit clones only the element it touches, so a
//! [`GraphSnapshot`] taken earlier keeps observing the state it was taken from.

use crate::analysis::{self, PipelineAnalysis};
use crate::derive::{self, ResolvedPorts};
use crate::error::{ConnectError, SubmitError};
use crate::graph::{
    Connection, EdgeChange, GraphEdge, GraphNode, NodeChange, NodeStyle, Position, apply_changes,
};
use crate::registry::{NodeTypeDefinition, NodeTypeRegistry};
use crate::view::NodeView;
use ahash::AHashSet;
use std::sync::Arc;

mod drop;
mod ids;

pub use drop::DropPayload;
pub use ids::NodeIdCounters;

/// How strictly `connect` and later edits treat edge endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionPolicy {
    /// Endpoints must name existing nodes and ports; edges left dangling by node
    /// removal or by a vanished dynamic port are pruned.
    #[default]
    Validated,
    /// Every connection is accepted and nothing is pruned.
    Unchecked,
}

/// A point-in-time copy of the store's collections.
#[derive(Debug, Clone, Default)]
pub struct GraphSnapshot {
    pub nodes: Vec<Arc<GraphNode>>,
    pub edges: Vec<Arc<GraphEdge>>,
}

pub struct PipelineStore {
    registry: Arc<NodeTypeRegistry>,
    nodes: Vec<Arc<GraphNode>>,
    edges: Vec<Arc<GraphEdge>>,
    counters: NodeIdCounters,
    policy: ConnectionPolicy,
    snap_grid: Option<f64>,
}

pub struct StoreBuilder {
    registry: Arc<NodeTypeRegistry>,
    policy: ConnectionPolicy,
    snap_grid: Option<f64>,
}

impl StoreBuilder {
    pub fn new(registry: Arc<NodeTypeRegistry>) -> Self {
        Self {
            registry,
            policy: ConnectionPolicy::default(),
            snap_grid: None,
        }
    }

    pub fn with_connection_policy(mut self, policy: ConnectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Snaps positions of spawned nodes to a grid of `size` canvas units.
    pub fn with_snap_grid(mut self, size: f64) -> Self {
        self.snap_grid = Some(size);
        self
    }

    pub fn build(self) -> PipelineStore {
        PipelineStore {
            registry: self.registry,
            nodes: Vec::new(),
            edges: Vec::new(),
            counters: NodeIdCounters::default(),
            policy: self.policy,
            snap_grid: self.snap_grid,
        }
    }
}

impl PipelineStore {
    pub fn builder(registry: Arc<NodeTypeRegistry>) -> StoreBuilder {
        StoreBuilder::new(registry)
    }

    pub fn new(registry: Arc<NodeTypeRegistry>) -> Self {
        StoreBuilder::new(registry).build()
    }

    pub fn registry(&self) -> &NodeTypeRegistry {
        &self.registry
    }

    pub fn policy(&self) -> ConnectionPolicy {
        self.policy
    }

    // --- Read accessors ---

    pub fn nodes(&self) -> &[Arc<GraphNode>] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Arc<GraphEdge>] {
        &self.edges
    }

    pub fn node(&self, node_id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == node_id).map(Arc::as_ref)
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    /// The definition of a node's type, `None` if the node or its type is unknown.
    pub fn definition_of(&self, node_id: &str) -> Option<&NodeTypeDefinition> {
        self.node(node_id)
            .and_then(|node| self.registry.lookup(&node.node_type))
    }

    /// The node's current ports, dynamic ones recomputed from its field values.
    pub fn ports_of(&self, node_id: &str) -> Option<ResolvedPorts> {
        let node = self.node(node_id)?;
        let definition = self.registry.lookup(&node.node_type)?;
        Some(derive::resolve_ports(definition, node))
    }

    /// Read model for rendering one node.
    pub fn view(&self, node_id: &str) -> Option<NodeView<'_>> {
        self.node(node_id)
            .map(|node| NodeView::of(&self.registry, node))
    }

    // --- Node lifecycle ---

    /// Increments the counter of `type_id` and returns the new node identifier.
    pub fn issue_node_id(&mut self, type_id: &str) -> String {
        self.counters.issue(type_id)
    }

    pub fn counters(&self) -> &NodeIdCounters {
        &self.counters
    }

    /// Appends a node. The caller is responsible for the id being unique.
    pub fn add_node(&mut self, node: GraphNode) {
        tracing::debug!(node_id = %node.id, node_type = %node.node_type, "node added");
        self.nodes.push(Arc::new(node));
    }

    /// Creates a node of `type_id` at `position` with default size and field values.
    ///
    /// An unregistered type still yields a node; it has no size and no fields, and
    /// renders as a placeholder.
    pub fn spawn_node(&mut self, type_id: &str, position: Position) -> String {
        let node_id = self.issue_node_id(type_id);
        let style = match self.registry.lookup(type_id) {
            Some(definition) => NodeStyle::sized(definition.meta.default_size),
            None => {
                tracing::warn!(node_type = type_id, "spawning node of unregistered type");
                NodeStyle::default()
            }
        };
        let position = match self.snap_grid {
            Some(grid) => position.snapped(grid),
            None => position,
        };

        self.add_node(GraphNode::new(&node_id, type_id, position).with_style(style));
        self.initialize_fields(&node_id);
        node_id
    }

    /// Spawns a node from a palette drop payload. A payload without a usable node
    /// type is skipped and `None` is returned.
    pub fn drop_node(&mut self, payload: &str, position: Position) -> Option<String> {
        match DropPayload::parse_node_type(payload) {
            Ok(node_type) => Some(self.spawn_node(&node_type, position)),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring drop");
                None
            }
        }
    }

    /// Fills every schema field the node does not have yet with its resolved default.
    /// Present values are never overwritten. Returns false if the node does not exist.
    pub fn initialize_fields(&mut self, node_id: &str) -> bool {
        let Some(index) = self.position_of(node_id) else {
            return false;
        };
        let Some(definition) = self.registry.lookup(&self.nodes[index].node_type) else {
            return true;
        };

        let missing: Vec<(String, String)> = definition
            .fields
            .iter()
            .filter(|field| !self.nodes[index].data.contains_key(&field.key))
            .map(|field| (field.key.clone(), field.default.resolve(node_id)))
            .collect();

        if !missing.is_empty() {
            Arc::make_mut(&mut self.nodes[index]).data.extend(missing);
        }
        true
    }

    // --- Structural changes ---

    /// Applies a batch of node changes as one update.
    pub fn apply_node_changes(&mut self, changes: &[NodeChange]) {
        let next = apply_changes(changes, &self.nodes);

        if self.policy == ConnectionPolicy::Validated && next.len() != self.nodes.len() {
            let before = self.edges.len();
            {
                let remaining: AHashSet<&str> = next.iter().map(|n| n.id.as_str()).collect();
                self.edges.retain(|e| {
                    remaining.contains(e.source.as_str()) && remaining.contains(e.target.as_str())
                });
            }
            if self.edges.len() != before {
                tracing::debug!(pruned = before - self.edges.len(), "edges of removed nodes pruned");
            }
        }
        self.nodes = next;
    }

    /// Applies a batch of edge changes as one update.
    pub fn apply_edge_changes(&mut self, changes: &[EdgeChange]) {
        self.edges = apply_changes(changes, &self.edges);
    }

    /// Adds an edge for `connection` and returns its id.
    ///
    /// Under [`ConnectionPolicy::Validated`] both endpoints must exist and expose the
    /// named ports, and an edge joining the same ports must not exist yet. Cycles are
    /// never rejected here; see [`PipelineStore::analyze`].
    pub fn connect(&mut self, connection: Connection) -> Result<String, ConnectError> {
        if self.policy == ConnectionPolicy::Validated {
            if let Err(e) = self.validate_connection(&connection) {
                tracing::warn!(error = %e, "connection rejected");
                return Err(e);
            }
        }

        let mut edge = GraphEdge::from_connection(connection);
        edge.id = self.unused_edge_id(edge.id);
        let edge_id = edge.id.clone();
        tracing::debug!(edge_id = %edge_id, "edge added");
        self.edges.push(Arc::new(edge));
        Ok(edge_id)
    }

    /// Edge ids concatenate node and port ids, so distinct connections can share a
    /// base id. Later ones get a `~{n}` suffix to keep every live id unique.
    fn unused_edge_id(&self, base: String) -> String {
        let taken = |id: &str| self.edges.iter().any(|e| e.id == id);
        if !taken(&base) {
            return base;
        }
        let mut n = 2u64;
        loop {
            let candidate = format!("{base}~{n}");
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    fn validate_connection(&self, connection: &Connection) -> Result<(), ConnectError> {
        let source_ports = self.endpoint_ports(&connection.source)?;
        let source_port = connection
            .source_handle
            .as_deref()
            .ok_or_else(|| ConnectError::MissingPort {
                node_id: connection.source.clone(),
            })?;
        if !source_ports.has_source(source_port) {
            return Err(ConnectError::PortNotFound {
                node_id: connection.source.clone(),
                port_id: source_port.to_string(),
                direction: "source",
            });
        }

        let target_ports = self.endpoint_ports(&connection.target)?;
        let target_port = connection
            .target_handle
            .as_deref()
            .ok_or_else(|| ConnectError::MissingPort {
                node_id: connection.target.clone(),
            })?;
        if !target_ports.has_target(target_port) {
            return Err(ConnectError::PortNotFound {
                node_id: connection.target.clone(),
                port_id: target_port.to_string(),
                direction: "target",
            });
        }

        if self.edges.iter().any(|e| e.same_endpoints(connection)) {
            return Err(ConnectError::DuplicateEdge {
                source_id: connection.source.clone(),
                target_id: connection.target.clone(),
            });
        }
        Ok(())
    }

    fn endpoint_ports(&self, node_id: &str) -> Result<ResolvedPorts, ConnectError> {
        let node = self
            .node(node_id)
            .ok_or_else(|| ConnectError::NodeNotFound(node_id.to_string()))?;
        let definition = self
            .registry
            .lookup(&node.node_type)
            .ok_or_else(|| ConnectError::UnknownNodeType(node_id.to_string()))?;
        Ok(derive::resolve_ports(definition, node))
    }

    // --- Field and size patches ---

    /// Replaces one field value of one node. A missing node is a no-op and returns false.
    ///
    /// The store does not check the value against the field's kind.
    pub fn patch_field(&mut self, node_id: &str, key: &str, value: &str) -> bool {
        let Some(index) = self.position_of(node_id) else {
            return false;
        };
        Arc::make_mut(&mut self.nodes[index])
            .data
            .insert(key.to_string(), value.to_string());

        if self.policy == ConnectionPolicy::Validated && self.watches(index, key) {
            self.prune_dangling_edges(node_id);
        }
        true
    }

    /// Merges the supplied dimensions into the node's style. A missing node is a
    /// no-op and returns false.
    pub fn patch_size(&mut self, node_id: &str, width: Option<f64>, height: Option<f64>) -> bool {
        let Some(index) = self.position_of(node_id) else {
            return false;
        };
        Arc::make_mut(&mut self.nodes[index])
            .style
            .merge(width, height);
        true
    }

    // --- Validation ---

    pub fn analyze(&self) -> PipelineAnalysis {
        analysis::analyze(&self.nodes, &self.edges)
    }

    /// Validates the pipeline for submission. An empty pipeline is refused.
    pub fn submit(&self) -> Result<PipelineAnalysis, SubmitError> {
        if self.nodes.is_empty() {
            return Err(SubmitError::EmptyPipeline);
        }
        let result = self.analyze();
        tracing::info!(
            num_nodes = result.num_nodes,
            num_edges = result.num_edges,
            is_dag = result.is_dag,
            "pipeline submitted"
        );
        Ok(result)
    }

    fn position_of(&self, node_id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == node_id)
    }

    fn watches(&self, index: usize, key: &str) -> bool {
        self.registry
            .lookup(&self.nodes[index].node_type)
            .and_then(|d| d.ports.dynamic.as_ref())
            .is_some_and(|rule| rule.watch == key)
    }

    /// Drops edges attached to ports `node_id` no longer exposes.
    fn prune_dangling_edges(&mut self, node_id: &str) {
        let Some(ports) = self.ports_of(node_id) else {
            return;
        };
        let before = self.edges.len();
        self.edges.retain(|edge| {
            let source_ok = edge.source != node_id
                || edge
                    .source_handle
                    .as_deref()
                    .is_none_or(|h| ports.has_source(h));
            let target_ok = edge.target != node_id
                || edge
                    .target_handle
                    .as_deref()
                    .is_none_or(|h| ports.has_target(h));
            source_ok && target_ok
        });
        if self.edges.len() != before {
            tracing::debug!(
                node_id,
                pruned = before - self.edges.len(),
                "edges of vanished ports pruned"
            );
        }
    }
}
