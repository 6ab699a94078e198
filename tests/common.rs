//! Common test utilities for building registries, stores and graphs.
use nodeflow::prelude::*;
use std::sync::Arc;

/// The stock catalog, shared the way an application would share it.
#[allow(dead_code)]
pub fn builtin_registry() -> Arc<NodeTypeRegistry> {
    Arc::new(NodeTypeRegistry::builtin().expect("builtin catalog is valid"))
}

/// An empty store over the stock catalog with the default (validated) policy.
#[allow(dead_code)]
pub fn validated_store() -> PipelineStore {
    PipelineStore::new(builtin_registry())
}

/// An empty store that accepts every connection and prunes nothing.
#[allow(dead_code)]
pub fn unchecked_store() -> PipelineStore {
    PipelineStore::builder(builtin_registry())
        .with_connection_policy(ConnectionPolicy::Unchecked)
        .build()
}

/// A bare node with no fields, for analyzer tests.
#[allow(dead_code)]
pub fn node(id: &str) -> GraphNode {
    GraphNode::new(id, "logger", Position::default())
}

/// An edge between two node ids on generic ports.
#[allow(dead_code)]
pub fn edge(source: &str, target: &str) -> GraphEdge {
    GraphEdge::from_connection(Connection::new(source, "output", target, "input"))
}

/// Store with `customInput-1 -> text-1 (var_question)` and `text-1 -> customOutput-1`.
///
/// The text node's template references `{{question}}`.
#[allow(dead_code)]
pub fn create_prompt_pipeline(store: &mut PipelineStore) -> (String, String, String) {
    let input = store.spawn_node("customInput", Position::new(0.0, 0.0));
    let text = store.spawn_node("text", Position::new(300.0, 0.0));
    let output = store.spawn_node("customOutput", Position::new(600.0, 0.0));

    store.patch_field(&text, "text", "Answer this: {{question}}");
    store
        .connect(Connection::new(&input, "output", &text, "var_question"))
        .expect("input -> text connects");
    store
        .connect(Connection::new(&text, "output", &output, "input"))
        .expect("text -> output connects");

    (input, text, output)
}
