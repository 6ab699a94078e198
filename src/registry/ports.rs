use crate::error::SchemaError;
use regex::Regex;

/// Which edge of a node a group of ports is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSide {
    /// Inputs. Ports on this side are connection targets.
    Left,
    /// Outputs. Ports on this side are connection sources.
    Right,
}

/// A statically declared port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortDecl {
    pub id: String,
    pub label: Option<String>,
}

impl PortDecl {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: Some(label.to_string()),
        }
    }
}

/// Derives extra ports from the text of one field.
///
/// The pattern is compiled when the rule is built, so a registry that
/// holds a rule always holds a working pattern with a single capture group.
#[derive(Debug, Clone)]
pub struct DynamicPortRule {
    pub watch: String,
    pub pattern: Regex,
    pub side: PortSide,
}

impl DynamicPortRule {
    /// Compiles `pattern` for the node type `node_type`.
    pub fn compile(
        node_type: &str,
        watch: &str,
        pattern: &str,
        side: PortSide,
    ) -> Result<Self, SchemaError> {
        let pattern = Regex::new(pattern).map_err(|e| SchemaError::InvalidPattern {
            node_type: node_type.to_string(),
            message: e.to_string(),
        })?;
        // captures_len counts the implicit whole-match group
        let groups = pattern.captures_len() - 1;
        if groups != 1 {
            return Err(SchemaError::CaptureGroupCount {
                node_type: node_type.to_string(),
                found: groups,
            });
        }
        Ok(Self {
            watch: watch.to_string(),
            pattern,
            side,
        })
    }

    /// The id a derived port gets for a captured name.
    pub fn port_id(name: &str) -> String {
        format!("var_{}", name)
    }
}

/// Port layout of a node type.
#[derive(Debug, Clone, Default)]
pub struct PortSpec {
    pub sources: Vec<PortDecl>,
    pub targets: Vec<PortDecl>,
    pub dynamic: Option<DynamicPortRule>,
}
