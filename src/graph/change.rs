use super::{GraphEdge, GraphNode, Identified, Position};
use crate::registry::Size;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A single structural edit the canvas reports for a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeChange {
    Position {
        id: String,
        position: Option<Position>,
        dragging: Option<bool>,
    },
    /// A measured size. While `resizing` is true the size is also written to the style.
    Dimensions {
        id: String,
        dimensions: Option<Size>,
        resizing: Option<bool>,
    },
    Select {
        id: String,
        selected: bool,
    },
    Remove {
        id: String,
    },
}

/// A single structural edit the canvas reports for an edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EdgeChange {
    Select { id: String, selected: bool },
    Remove { id: String },
}

/// Defines how one kind of change is applied to the collection it targets.
pub trait StructuralChange {
    type Target: Identified + Clone;

    fn target_id(&self) -> &str;
    fn is_removal(&self) -> bool;
    fn apply_to(&self, target: &mut Self::Target);
}

impl StructuralChange for NodeChange {
    type Target = GraphNode;

    fn target_id(&self) -> &str {
        match self {
            NodeChange::Position { id, .. }
            | NodeChange::Dimensions { id, .. }
            | NodeChange::Select { id, .. }
            | NodeChange::Remove { id } => id,
        }
    }

    fn is_removal(&self) -> bool {
        matches!(self, NodeChange::Remove { .. })
    }

    fn apply_to(&self, node: &mut GraphNode) {
        match self {
            NodeChange::Position {
                position, dragging, ..
            } => {
                if let Some(position) = position {
                    node.position = *position;
                }
                if let Some(dragging) = dragging {
                    node.dragging = *dragging;
                }
            }
            NodeChange::Dimensions {
                dimensions,
                resizing,
                ..
            } => {
                if let Some(resizing) = resizing {
                    node.resizing = *resizing;
                }
                if let Some(size) = dimensions {
                    node.measured = Some(*size);
                    if node.resizing {
                        node.style.merge(Some(size.width), Some(size.height));
                    }
                }
            }
            NodeChange::Select { selected, .. } => node.selected = *selected,
            NodeChange::Remove { .. } => {}
        }
    }
}

impl StructuralChange for EdgeChange {
    type Target = GraphEdge;

    fn target_id(&self) -> &str {
        match self {
            EdgeChange::Select { id, .. } | EdgeChange::Remove { id } => id,
        }
    }

    fn is_removal(&self) -> bool {
        matches!(self, EdgeChange::Remove { .. })
    }

    fn apply_to(&self, edge: &mut GraphEdge) {
        if let EdgeChange::Select { selected, .. } = self {
            edge.selected = *selected;
        }
    }
}

/// Applies a batch of changes and returns the resulting collection.
///
/// Removal anywhere in the batch wins for that id. The remaining changes of an id
/// apply in batch order. Entries no change names are reused untouched and keep
/// their relative order; changes naming unknown ids are ignored.
pub fn apply_changes<C: StructuralChange>(
    changes: &[C],
    items: &[Arc<C::Target>],
) -> Vec<Arc<C::Target>> {
    let mut by_id: AHashMap<&str, Vec<&C>> = AHashMap::new();
    for change in changes {
        by_id.entry(change.target_id()).or_default().push(change);
    }

    items
        .iter()
        .filter_map(|item| {
            let Some(pending) = by_id.get(item.id()) else {
                return Some(Arc::clone(item));
            };
            if pending.iter().any(|c| c.is_removal()) {
                return None;
            }
            let mut updated = C::Target::clone(item);
            for change in pending {
                change.apply_to(&mut updated);
            }
            Some(Arc::new(updated))
        })
        .collect()
}
