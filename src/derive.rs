//! Dynamic port derivation.
//!
//! Ports derived from a field's text are never stored. They are recomputed from the
//! current value every time they are needed, so they cannot go stale.

use crate::graph::GraphNode;
use crate::registry::{DynamicPortRule, NodeTypeDefinition, PortDecl, PortSide};
use itertools::Itertools;
use regex::Regex;

/// Extracts the distinct names captured by `pattern` in `text`, in order of first
/// appearance. A missing or empty text yields no names.
pub fn derive_variables(text: Option<&str>, pattern: &Regex) -> Vec<String> {
    let Some(text) = text else {
        return Vec::new();
    };

    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| !name.is_empty())
        .unique()
        .map(str::to_string)
        .collect()
}

/// The full set of ports implied by the watched field's current value.
pub fn dynamic_ports(rule: &DynamicPortRule, value: Option<&str>) -> Vec<PortDecl> {
    derive_variables(value, &rule.pattern)
        .into_iter()
        .map(|name| PortDecl {
            id: DynamicPortRule::port_id(&name),
            label: Some(name),
        })
        .collect()
}

/// The effective ports of a node: static declarations followed by derived ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPorts {
    pub sources: Vec<PortDecl>,
    pub targets: Vec<PortDecl>,
}

impl ResolvedPorts {
    pub fn has_source(&self, port_id: &str) -> bool {
        self.sources.iter().any(|p| p.id == port_id)
    }

    pub fn has_target(&self, port_id: &str) -> bool {
        self.targets.iter().any(|p| p.id == port_id)
    }
}

/// Resolves the ports `node` exposes under `definition`.
pub fn resolve_ports(definition: &NodeTypeDefinition, node: &GraphNode) -> ResolvedPorts {
    let mut resolved = ResolvedPorts {
        sources: definition.ports.sources.clone(),
        targets: definition.ports.targets.clone(),
    };

    if let Some(rule) = &definition.ports.dynamic {
        let derived = dynamic_ports(rule, node.field(&rule.watch));
        match rule.side {
            PortSide::Left => resolved.targets.extend(derived),
            PortSide::Right => resolved.sources.extend(derived),
        }
    }
    resolved
}
