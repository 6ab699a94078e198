//! Read models for the canvas and form widgets.

use crate::derive;
use crate::graph::GraphNode;
use crate::registry::{NodeTypeDefinition, NodeTypeRegistry};

mod field;
mod layout;

pub use field::{AutoResize, FieldView};
pub use layout::{PlacedPort, PortLayout, PortRole};

/// Everything needed to draw one node.
#[derive(Debug, Clone)]
pub enum NodeView<'a> {
    Known {
        node: &'a GraphNode,
        definition: &'a NodeTypeDefinition,
        fields: Vec<FieldView<'a>>,
        ports: PortLayout,
    },
    /// The node's type is not registered; draw a placeholder.
    Unknown { node: &'a GraphNode },
}

impl<'a> NodeView<'a> {
    pub fn of(registry: &'a NodeTypeRegistry, node: &'a GraphNode) -> Self {
        let Some(definition) = registry.lookup(&node.node_type) else {
            return NodeView::Unknown { node };
        };

        let fields = definition
            .fields
            .iter()
            .map(|schema| FieldView {
                schema,
                value: node.field(&schema.key).unwrap_or(""),
            })
            .collect();
        let ports = PortLayout::from_ports(&derive::resolve_ports(definition, node));

        NodeView::Known {
            node,
            definition,
            fields,
            ports,
        }
    }

    pub fn node(&self) -> &'a GraphNode {
        match self {
            NodeView::Known { node, .. } | NodeView::Unknown { node } => *node,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, NodeView::Known { .. })
    }

    /// The header title, or a placeholder message for an unknown type.
    pub fn title(&self) -> String {
        match self {
            NodeView::Known { definition, .. } => definition.meta.title.clone(),
            NodeView::Unknown { node } => format!("Unknown node type: {}", node.node_type),
        }
    }

    pub fn field(&self, key: &str) -> Option<&FieldView<'a>> {
        match self {
            NodeView::Known { fields, .. } => fields.iter().find(|f| f.key() == key),
            NodeView::Unknown { .. } => None,
        }
    }
}
