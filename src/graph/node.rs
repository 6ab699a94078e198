use super::Identified;
use crate::registry::Size;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rounds both coordinates to the nearest multiple of `grid`. A grid that is not
    /// a positive finite number leaves the position unchanged.
    pub fn snapped(self, grid: f64) -> Self {
        if !(grid.is_finite() && grid > 0.0) {
            return self;
        }
        Self {
            x: (self.x / grid).round() * grid,
            y: (self.y / grid).round() * grid,
        }
    }
}

/// Explicit size overrides applied by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl NodeStyle {
    pub fn sized(size: Size) -> Self {
        Self {
            width: Some(size.width),
            height: Some(size.height),
        }
    }

    /// Overwrites only the supplied dimensions.
    pub fn merge(&mut self, width: Option<f64>, height: Option<f64>) {
        if let Some(width) = width {
            self.width = Some(width);
        }
        if let Some(height) = height {
            self.height = Some(height);
        }
    }
}

/// A node placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub node_type: String,
    pub position: Position,
    #[serde(default)]
    pub style: NodeStyle,
    /// Field values keyed by `FieldSchema::key`.
    #[serde(default)]
    pub data: AHashMap<String, String>,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub dragging: bool,
    #[serde(default)]
    pub resizing: bool,
    /// Size measured by the renderer, reported through dimension changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measured: Option<Size>,
}

impl GraphNode {
    pub fn new(id: &str, node_type: &str, position: Position) -> Self {
        Self {
            id: id.to_string(),
            node_type: node_type.to_string(),
            position,
            style: NodeStyle::default(),
            data: AHashMap::new(),
            selected: false,
            dragging: false,
            resizing: false,
            measured: None,
        }
    }

    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_field(mut self, key: &str, value: &str) -> Self {
        self.data.insert(key.to_string(), value.to_string());
        self
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

impl Identified for GraphNode {
    fn id(&self) -> &str {
        &self.id
    }
}
