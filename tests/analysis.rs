//! Tests for DAG validation.
mod common;
use common::*;
use nodeflow::prelude::*;

#[test]
fn test_empty_graph_is_a_dag() {
    let nodes: Vec<GraphNode> = Vec::new();
    let edges: Vec<GraphEdge> = Vec::new();
    assert_eq!(
        analyze(&nodes, &edges),
        PipelineAnalysis {
            num_nodes: 0,
            num_edges: 0,
            is_dag: true,
        }
    );
}

#[test]
fn test_chain_is_a_dag() {
    let nodes = vec![node("A"), node("B"), node("C")];
    let edges = vec![edge("A", "B"), edge("B", "C")];

    let result = analyze(&nodes, &edges);
    assert!(result.is_dag);
    assert_eq!(result.num_nodes, 3);
    assert_eq!(result.num_edges, 2);
}

#[test]
fn test_two_cycle_is_not_a_dag() {
    let nodes = vec![node("A"), node("B")];
    let edges = vec![edge("A", "B"), edge("B", "A")];
    assert!(!analyze(&nodes, &edges).is_dag);
}

#[test]
fn test_self_loop_is_not_a_dag() {
    let nodes = vec![node("A")];
    let edges = vec![edge("A", "A")];
    assert!(!analyze(&nodes, &edges).is_dag);
}

#[test]
fn test_diamond_is_a_dag() {
    // A shared descendant reached twice is not a cycle.
    let nodes = vec![node("A"), node("B"), node("C"), node("D")];
    let edges = vec![
        edge("A", "B"),
        edge("A", "C"),
        edge("B", "D"),
        edge("C", "D"),
    ];
    assert!(analyze(&nodes, &edges).is_dag);
}

#[test]
fn test_cycle_in_later_component() {
    let nodes = vec![node("A"), node("B"), node("X"), node("Y"), node("Z")];
    let edges = vec![
        edge("A", "B"),
        edge("X", "Y"),
        edge("Y", "Z"),
        edge("Z", "X"),
    ];
    assert!(!analyze(&nodes, &edges).is_dag);
}

#[test]
fn test_cycle_found_from_node_visited_after_its_target() {
    // C is finished before the traversal from B reaches it again.
    let nodes = vec![node("C"), node("B"), node("A")];
    let edges = vec![edge("A", "B"), edge("B", "C"), edge("C", "A")];
    assert!(!analyze(&nodes, &edges).is_dag);

    let nodes = vec![node("C"), node("B"), node("A")];
    let edges = vec![edge("A", "B"), edge("B", "C")];
    assert!(analyze(&nodes, &edges).is_dag);
}

#[test]
fn test_edges_from_unknown_sources_are_ignored() {
    let nodes = vec![node("A"), node("B")];
    let edges = vec![edge("A", "B"), edge("ghost", "A"), edge("B", "ghost")];

    let result = analyze(&nodes, &edges);
    assert!(result.is_dag);
    assert_eq!(result.num_edges, 3);
}

#[test]
fn test_long_chain_does_not_overflow() {
    let ids: Vec<String> = (0..50_000).map(|i| format!("n{i}")).collect();
    let nodes: Vec<GraphNode> = ids.iter().map(|id| node(id)).collect();
    let mut edges: Vec<GraphEdge> = ids.windows(2).map(|w| edge(&w[0], &w[1])).collect();
    assert!(analyze(&nodes, &edges).is_dag);

    edges.push(edge("n49999", "n0"));
    assert!(!analyze(&nodes, &edges).is_dag);
}

#[test]
fn test_analysis_serializes_with_snake_case_keys() {
    let result = PipelineAnalysis {
        num_nodes: 2,
        num_edges: 1,
        is_dag: true,
    };
    let json = serde_json::to_value(result).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "num_nodes": 2, "num_edges": 1, "is_dag": true })
    );
}

#[test]
fn test_store_snapshot_analysis() {
    let mut store = validated_store();
    let (_, text, output) = create_prompt_pipeline(&mut store);
    let snapshot = store.snapshot();
    assert!(analyze(&snapshot.nodes, &snapshot.edges).is_dag);

    // Feeding the output back into the text node closes a loop.
    let mut unchecked = unchecked_store();
    create_prompt_pipeline(&mut unchecked);
    unchecked
        .connect(Connection::new(&output, "input", &text, "var_question"))
        .unwrap();
    assert!(!unchecked.analyze().is_dag);
}
