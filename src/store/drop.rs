use crate::error::DropError;
use serde::Deserialize;

/// Payload carried by a palette drag, e.g. `{"nodeType": "llm"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DropPayload {
    #[serde(alias = "nodeType")]
    pub node_type: Option<String>,
}

impl DropPayload {
    /// Parses the raw payload and returns the node type it names.
    pub fn parse_node_type(raw: &str) -> Result<String, DropError> {
        let payload: DropPayload =
            serde_json::from_str(raw).map_err(|e| DropError::Malformed(e.to_string()))?;
        match payload.node_type {
            Some(node_type) if !node_type.is_empty() => Ok(node_type),
            _ => Err(DropError::MissingNodeType),
        }
    }
}
