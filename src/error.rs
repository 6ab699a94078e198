use thiserror::Error;

/// Errors raised while assembling a node type catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Node type '{0}' is registered more than once")]
    DuplicateNodeType(String),

    #[error("Node type '{node_type}' declares field '{key}' more than once")]
    DuplicateFieldKey { node_type: String, key: String },

    #[error("Node type '{node_type}' has an invalid dynamic port pattern: {message}")]
    InvalidPattern { node_type: String, message: String },

    #[error(
        "Dynamic port pattern of node type '{node_type}' must have exactly one capture group, found {found}"
    )]
    CaptureGroupCount { node_type: String, found: usize },

    #[error("Node type '{node_type}' derives dynamic ports from unknown field '{field}'")]
    UnknownWatchedField { node_type: String, field: String },
}

/// Reasons a connection request is refused under the validated policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("Connection endpoint node '{0}' does not exist")]
    NodeNotFound(String),

    #[error("Node '{0}' has an unregistered node type, its ports are unknown")]
    UnknownNodeType(String),

    #[error("Connection to node '{node_id}' is missing a port identifier")]
    MissingPort { node_id: String },

    #[error("Node '{node_id}' has no {direction} port named '{port_id}'")]
    PortNotFound {
        node_id: String,
        port_id: String,
        direction: &'static str,
    },

    #[error("An edge from '{source_id}' to '{target_id}' on the same ports already exists")]
    DuplicateEdge {
        source_id: String,
        target_id: String,
    },
}

/// Errors that can occur when decoding a palette drop payload.
#[derive(Error, Debug, Clone)]
pub enum DropError {
    #[error("Failed to parse drop payload: {0}")]
    Malformed(String),

    #[error("Drop payload does not name a node type")]
    MissingNodeType,
}

/// Errors that can occur when submitting the pipeline for validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Pipeline is empty, add some nodes before submitting")]
    EmptyPipeline,
}

/// Errors that can occur when converting a custom user format into nodeflow graph types.
#[derive(Error, Debug, Clone)]
pub enum GraphConversionError {
    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}
