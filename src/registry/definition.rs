use super::ports::PortSpec;
use super::schema::FieldSchema;
use serde::{Deserialize, Serialize};

/// Width and height in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Display metadata of a node type.
#[derive(Debug, Clone)]
pub struct NodeMeta {
    pub title: String,
    pub icon: Option<String>,
    pub category: Option<String>,
    /// Style token the renderer maps to a color.
    pub color: String,
    pub default_size: Size,
    pub resizable: bool,
    pub show_in_palette: bool,
    pub description: Option<String>,
}

/// The complete template of a node type: metadata, parameters and ports.
#[derive(Debug, Clone)]
pub struct NodeTypeDefinition {
    pub id: String,
    pub meta: NodeMeta,
    pub fields: Vec<FieldSchema>,
    pub ports: PortSpec,
    /// Static text rendered below the fields.
    pub content: Option<String>,
}

impl NodeTypeDefinition {
    pub fn field(&self, key: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.key == key)
    }
}
