//! The node type catalog.
//!
//! A [`NodeTypeRegistry`] is assembled once through a [`RegistryBuilder`] and never
//! mutated afterwards. Share it by wrapping it in an `Arc` and handing clones to the
//! store and to whatever renders the palette.

use crate::error::SchemaError;
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;

mod builtin;
pub mod definition;
pub mod ports;
pub mod schema;

pub use builtin::TEMPLATE_VARIABLE_PATTERN;
pub use definition::*;
pub use ports::*;
pub use schema::*;

/// Immutable, ordered catalog of node types.
#[derive(Debug, Clone, Default)]
pub struct NodeTypeRegistry {
    definitions: Vec<NodeTypeDefinition>,
    index: AHashMap<String, usize>,
}

impl NodeTypeRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The stock catalog shipped with the editor.
    pub fn builtin() -> Result<Self, SchemaError> {
        RegistryBuilder::new().with_builtin_types()?.build()
    }

    /// Looks up a node type. A miss is not an error; callers render a placeholder.
    pub fn lookup(&self, type_id: &str) -> Option<&NodeTypeDefinition> {
        self.index.get(type_id).map(|&i| &self.definitions[i])
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.index.contains_key(type_id)
    }

    /// All definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeTypeDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definitions flagged for the palette, in declaration order.
    pub fn palette(&self) -> impl Iterator<Item = &NodeTypeDefinition> {
        self.definitions.iter().filter(|d| d.meta.show_in_palette)
    }

    /// Palette entries grouped by category, categories in order of first appearance.
    /// Entries without a category are grouped under `"other"`.
    pub fn by_category(&self) -> Vec<(&str, Vec<&NodeTypeDefinition>)> {
        let categories: Vec<&str> = self
            .palette()
            .map(|d| d.meta.category.as_deref().unwrap_or("other"))
            .unique()
            .collect();

        categories
            .into_iter()
            .map(|category| {
                let members = self
                    .palette()
                    .filter(|d| d.meta.category.as_deref().unwrap_or("other") == category)
                    .collect();
                (category, members)
            })
            .collect()
    }
}

/// Collects node type definitions and validates them into a [`NodeTypeRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    definitions: Vec<NodeTypeDefinition>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node_type(mut self, definition: NodeTypeDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    pub fn with_builtin_types(self) -> Result<Self, SchemaError> {
        builtin::register_builtin_types(self)
    }

    pub fn build(self) -> Result<NodeTypeRegistry, SchemaError> {
        let mut index = AHashMap::with_capacity(self.definitions.len());
        for (i, definition) in self.definitions.iter().enumerate() {
            validate_definition(definition)?;
            if index.insert(definition.id.clone(), i).is_some() {
                return Err(SchemaError::DuplicateNodeType(definition.id.clone()));
            }
        }
        Ok(NodeTypeRegistry {
            definitions: self.definitions,
            index,
        })
    }
}

fn validate_definition(definition: &NodeTypeDefinition) -> Result<(), SchemaError> {
    let mut keys = AHashSet::new();
    for field in &definition.fields {
        if !keys.insert(field.key.as_str()) {
            return Err(SchemaError::DuplicateFieldKey {
                node_type: definition.id.clone(),
                key: field.key.clone(),
            });
        }
    }

    if let Some(rule) = &definition.ports.dynamic {
        if !keys.contains(rule.watch.as_str()) {
            return Err(SchemaError::UnknownWatchedField {
                node_type: definition.id.clone(),
                field: rule.watch.clone(),
            });
        }
    }
    Ok(())
}
