use super::Identified;
use serde::{Deserialize, Serialize};

/// How an edge path is routed between its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeRouting {
    #[default]
    SmoothStep,
    Bezier,
    Straight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerShape {
    Arrow,
    #[default]
    ArrowClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeMarker {
    pub shape: MarkerShape,
    pub width: f64,
    pub height: f64,
}

/// Visual and behavioral kind of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeKind {
    pub routing: EdgeRouting,
    pub animated: bool,
    pub marker_end: Option<EdgeMarker>,
}

impl Default for EdgeKind {
    /// Smooth-step routing, animated, closed arrow at the target end.
    fn default() -> Self {
        Self {
            routing: EdgeRouting::SmoothStep,
            animated: true,
            marker_end: Some(EdgeMarker {
                shape: MarkerShape::ArrowClosed,
                width: 20.0,
                height: 20.0,
            }),
        }
    }
}

/// A request to connect two ports, as issued by the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub source: String,
    pub source_handle: Option<String>,
    pub target: String,
    pub target_handle: Option<String>,
}

impl Connection {
    pub fn new(source: &str, source_handle: &str, target: &str, target_handle: &str) -> Self {
        Self {
            source: source.to_string(),
            source_handle: Some(source_handle.to_string()),
            target: target.to_string(),
            target_handle: Some(target_handle.to_string()),
        }
    }

    /// The identifier an edge created from this connection receives.
    pub fn edge_id(&self) -> String {
        format!(
            "edge__{}{}-{}{}",
            self.source,
            self.source_handle.as_deref().unwrap_or(""),
            self.target,
            self.target_handle.as_deref().unwrap_or("")
        )
    }
}

/// A directed connection between two node ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub source_handle: Option<String>,
    pub target: String,
    pub target_handle: Option<String>,
    #[serde(default)]
    pub kind: EdgeKind,
    #[serde(default)]
    pub selected: bool,
}

impl GraphEdge {
    /// Builds an edge with the default [`EdgeKind`].
    pub fn from_connection(connection: Connection) -> Self {
        Self {
            id: connection.edge_id(),
            source: connection.source,
            source_handle: connection.source_handle,
            target: connection.target,
            target_handle: connection.target_handle,
            kind: EdgeKind::default(),
            selected: false,
        }
    }

    /// True when this edge joins the same ports as `other`.
    pub fn same_endpoints(&self, other: &Connection) -> bool {
        self.source == other.source
            && self.target == other.target
            && self.source_handle == other.source_handle
            && self.target_handle == other.target_handle
    }
}

impl Identified for GraphEdge {
    fn id(&self) -> &str {
        &self.id
    }
}
