//! Tests for the pipeline store: identity, initialization, patches, changes and connections.
mod common;
use common::*;
use nodeflow::prelude::*;
use std::sync::Arc;

#[test]
fn test_issue_node_id_is_per_type_and_monotonic() {
    let mut store = validated_store();

    let llm_ids: Vec<String> = (0..3).map(|_| store.issue_node_id("llm")).collect();
    assert_eq!(llm_ids, vec!["llm-1", "llm-2", "llm-3"]);

    assert_eq!(store.issue_node_id("text"), "text-1");
    assert_eq!(store.issue_node_id("llm"), "llm-4");
    assert_eq!(store.counters().last_issued("llm"), Some(4));
    assert_eq!(store.counters().last_issued("math"), None);
}

#[test]
fn test_ids_are_never_reused_after_removal() {
    let mut store = validated_store();
    let first = store.spawn_node("math", Position::default());
    store.apply_node_changes(&[NodeChange::Remove { id: first.clone() }]);

    let second = store.spawn_node("math", Position::default());
    assert_eq!(first, "math-1");
    assert_eq!(second, "math-2");
}

#[test]
fn test_spawn_populates_every_field_with_defaults() {
    let mut store = validated_store();
    let registry = builtin_registry();

    for definition in registry.iter() {
        let id = store.spawn_node(&definition.id, Position::default());
        let node = store.node(&id).unwrap();
        assert_eq!(node.data.len(), definition.fields.len(), "{}", definition.id);
        for field in &definition.fields {
            assert_eq!(
                node.field(&field.key),
                Some(field.default.resolve(&id).as_str()),
                "{}.{}",
                definition.id,
                field.key
            );
        }
        assert_eq!(node.style.width, Some(definition.meta.default_size.width));
        assert_eq!(node.style.height, Some(definition.meta.default_size.height));
    }

    let input = store.node("customInput-1").unwrap();
    assert_eq!(input.field("name"), Some("input_1"));
    assert_eq!(input.field("type"), Some("Text"));
}

#[test]
fn test_initialize_fields_never_overwrites_edits() {
    let mut store = validated_store();
    let id = store.spawn_node("customInput", Position::default());

    store.patch_field(&id, "name", "customer_query");
    assert!(store.initialize_fields(&id));
    assert!(store.initialize_fields(&id));

    assert_eq!(store.node(&id).unwrap().field("name"), Some("customer_query"));
}

#[test]
fn test_initialize_fields_backfills_added_nodes() {
    let mut store = validated_store();
    let id = store.issue_node_id("delay");
    store.add_node(GraphNode::new(&id, "delay", Position::default()));
    assert!(store.node(&id).unwrap().data.is_empty());

    store.initialize_fields(&id);
    assert_eq!(store.node(&id).unwrap().field("ms"), Some("1000"));
    assert!(!store.initialize_fields("delay-99"));
}

#[test]
fn test_spawn_unknown_type_creates_unsized_placeholder() {
    let mut store = validated_store();
    let id = store.spawn_node("mystery", Position::new(10.0, 10.0));

    let node = store.node(&id).unwrap();
    assert_eq!(id, "mystery-1");
    assert_eq!(node.style, NodeStyle::default());
    assert!(node.data.is_empty());
    assert!(store.definition_of(&id).is_none());
    assert!(!store.view(&id).unwrap().is_known());
}

#[test]
fn test_spawn_snaps_to_grid() {
    let mut store = PipelineStore::builder(builtin_registry())
        .with_snap_grid(20.0)
        .build();
    let id = store.spawn_node("logger", Position::new(29.0, 51.0));
    assert_eq!(store.node(&id).unwrap().position, Position::new(20.0, 60.0));
}

#[test]
fn test_degenerate_snap_grid_leaves_position_alone() {
    for grid in [0.0, -10.0, f64::NAN, f64::INFINITY] {
        let mut store = PipelineStore::builder(builtin_registry())
            .with_snap_grid(grid)
            .build();
        let id = store.spawn_node("logger", Position::new(29.0, 51.0));
        assert_eq!(store.node(&id).unwrap().position, Position::new(29.0, 51.0));
    }
}

#[test]
fn test_drop_node_parses_payload() {
    let mut store = validated_store();
    let id = store.drop_node(r#"{"nodeType": "api"}"#, Position::new(5.0, 5.0));

    assert_eq!(id.as_deref(), Some("api-1"));
    assert_eq!(store.nodes().len(), 1);
    assert_eq!(store.node("api-1").unwrap().field("method"), Some("GET"));
}

#[test]
fn test_malformed_drop_is_skipped() {
    let mut store = validated_store();
    for payload in ["", "not json", "{}", r#"{"nodeType": ""}"#, r#"{"nodeType": 3}"#] {
        assert!(store.drop_node(payload, Position::default()).is_none(), "{payload}");
    }
    assert!(store.nodes().is_empty());
    assert_eq!(store.counters().last_issued(""), None);
}

#[test]
fn test_patch_field_on_missing_node_is_noop() {
    let mut store = validated_store();
    store.spawn_node("math", Position::default());
    let before = store.snapshot();

    assert!(!store.patch_field("math-42", "expression", "a * b"));

    assert_eq!(store.nodes().len(), before.nodes.len());
    for (now, then) in store.nodes().iter().zip(&before.nodes) {
        assert!(Arc::ptr_eq(now, then));
    }
}

#[test]
fn test_patch_field_touches_only_target_node() {
    let mut store = validated_store();
    let a = store.spawn_node("math", Position::new(1.0, 2.0));
    let b = store.spawn_node("math", Position::default());
    let before = store.snapshot();

    assert!(store.patch_field(&a, "expression", "a * b"));

    let patched = store.node(&a).unwrap();
    assert_eq!(patched.field("expression"), Some("a * b"));
    assert_eq!(patched.position, Position::new(1.0, 2.0));
    assert_eq!(patched.style, before.nodes[0].style);

    // The earlier snapshot is unaffected and the other node is shared.
    assert_eq!(before.nodes[0].field("expression"), Some("a + b"));
    assert!(Arc::ptr_eq(&store.nodes()[1], &before.nodes[1]));
    assert_eq!(store.node(&b).unwrap().field("expression"), Some("a + b"));
}

#[test]
fn test_patch_field_accepts_any_value() {
    let mut store = validated_store();
    let id = store.spawn_node("delay", Position::default());
    assert!(store.patch_field(&id, "ms", "soon-ish"));
    assert!(store.patch_field(&id, "undeclared", "kept"));

    let node = store.node(&id).unwrap();
    assert_eq!(node.field("ms"), Some("soon-ish"));
    assert_eq!(node.field("undeclared"), Some("kept"));
}

#[test]
fn test_patch_size_composes_partial_updates() {
    let mut store = validated_store();
    let id = store.spawn_node("text", Position::default());

    assert!(store.patch_size(&id, None, Some(150.0)));
    assert!(store.patch_size(&id, Some(200.0), None));

    let style = store.node(&id).unwrap().style;
    assert_eq!(style.width, Some(200.0));
    assert_eq!(style.height, Some(150.0));
    assert!(!store.patch_size("text-9", Some(1.0), None));
}

#[test]
fn test_remove_change_keeps_order_of_others() {
    let mut store = validated_store();
    let ids: Vec<String> = ["logger", "math", "delay", "api"]
        .iter()
        .map(|t| store.spawn_node(t, Position::default()))
        .collect();
    let before = store.snapshot();

    store.apply_node_changes(&[NodeChange::Remove { id: ids[1].clone() }]);

    let remaining: Vec<&str> = store.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(remaining, vec!["logger-1", "delay-1", "api-1"]);
    assert!(Arc::ptr_eq(&store.nodes()[0], &before.nodes[0]));
    assert!(Arc::ptr_eq(&store.nodes()[1], &before.nodes[2]));
    assert!(Arc::ptr_eq(&store.nodes()[2], &before.nodes[3]));
}

#[test]
fn test_batched_node_changes() {
    let mut store = validated_store();
    let a = store.spawn_node("logger", Position::default());
    let b = store.spawn_node("logger", Position::default());

    store.apply_node_changes(&[
        NodeChange::Position {
            id: a.clone(),
            position: Some(Position::new(40.0, 80.0)),
            dragging: Some(true),
        },
        NodeChange::Select {
            id: a.clone(),
            selected: true,
        },
        NodeChange::Select {
            id: b.clone(),
            selected: true,
        },
        NodeChange::Remove { id: b.clone() },
        NodeChange::Select {
            id: "ghost-1".to_string(),
            selected: true,
        },
    ]);

    assert_eq!(store.nodes().len(), 1);
    let node = store.node(&a).unwrap();
    assert_eq!(node.position, Position::new(40.0, 80.0));
    assert!(node.dragging);
    assert!(node.selected);
}

#[test]
fn test_dimension_changes() {
    let mut store = validated_store();
    let id = store.spawn_node("api", Position::default());

    store.apply_node_changes(&[NodeChange::Dimensions {
        id: id.clone(),
        dimensions: Some(Size::new(300.0, 190.0)),
        resizing: None,
    }]);
    let node = store.node(&id).unwrap();
    assert_eq!(node.measured, Some(Size::new(300.0, 190.0)));
    assert_eq!(node.style.width, Some(280.0));

    store.apply_node_changes(&[NodeChange::Dimensions {
        id: id.clone(),
        dimensions: Some(Size::new(320.0, 200.0)),
        resizing: Some(true),
    }]);
    let node = store.node(&id).unwrap();
    assert!(node.resizing);
    assert_eq!(node.style.width, Some(320.0));
    assert_eq!(node.style.height, Some(200.0));
}

#[test]
fn test_connect_builds_default_edge_kind() {
    let mut store = validated_store();
    let input = store.spawn_node("customInput", Position::default());
    let llm = store.spawn_node("llm", Position::default());

    let edge_id = store
        .connect(Connection::new(&input, "output", &llm, "prompt"))
        .unwrap();

    assert_eq!(edge_id, "edge__customInput-1output-llm-1prompt");
    let edge = &store.edges()[0];
    assert_eq!(edge.kind, EdgeKind::default());
    assert!(edge.kind.animated);
    assert_eq!(edge.source_handle.as_deref(), Some("output"));
    assert_eq!(edge.target_handle.as_deref(), Some("prompt"));
}

#[test]
fn test_validated_connect_rejects_bad_endpoints() {
    let mut store = validated_store();
    let input = store.spawn_node("customInput", Position::default());
    let llm = store.spawn_node("llm", Position::default());
    store.spawn_node("mystery", Position::default());

    assert_eq!(
        store.connect(Connection::new("ghost-1", "output", &llm, "prompt")),
        Err(ConnectError::NodeNotFound("ghost-1".to_string()))
    );
    assert!(matches!(
        store.connect(Connection::new(&input, "output", &llm, "nope")),
        Err(ConnectError::PortNotFound { direction: "target", .. })
    ));
    // Ports are directional: "prompt" is an input of the LLM, not an output.
    assert!(matches!(
        store.connect(Connection::new(&llm, "prompt", &input, "output")),
        Err(ConnectError::PortNotFound { direction: "source", .. })
    ));
    assert_eq!(
        store.connect(Connection::new(&input, "output", "mystery-1", "in")),
        Err(ConnectError::UnknownNodeType("mystery-1".to_string()))
    );
    let headless = Connection {
        source: input.clone(),
        source_handle: None,
        target: llm.clone(),
        target_handle: Some("prompt".to_string()),
    };
    assert!(matches!(
        store.connect(headless),
        Err(ConnectError::MissingPort { .. })
    ));

    assert!(store.edges().is_empty());
}

#[test]
fn test_validated_connect_rejects_duplicates_but_not_cycles() {
    let mut store = validated_store();
    let a = store.spawn_node("delay", Position::default());
    let b = store.spawn_node("delay", Position::default());

    store.connect(Connection::new(&a, "output", &b, "input")).unwrap();
    assert!(matches!(
        store.connect(Connection::new(&a, "output", &b, "input")),
        Err(ConnectError::DuplicateEdge { .. })
    ));

    store.connect(Connection::new(&b, "output", &a, "input")).unwrap();
    assert_eq!(store.edges().len(), 2);
    assert!(!store.analyze().is_dag);
}

#[test]
fn test_connect_to_dynamic_port() {
    let mut store = validated_store();
    let input = store.spawn_node("customInput", Position::default());
    let text = store.spawn_node("text", Position::default());

    assert!(store
        .connect(Connection::new(&input, "output", &text, "var_topic"))
        .is_err());

    store.patch_field(&text, "text", "Write about {{topic}}");
    assert!(store
        .connect(Connection::new(&input, "output", &text, "var_topic"))
        .is_ok());
}

#[test]
fn test_vanished_dynamic_port_prunes_edges() {
    let mut store = validated_store();
    let (input, text, output) = create_prompt_pipeline(&mut store);
    let other = store.spawn_node("customInput", Position::default());
    store.patch_field(&text, "text", "{{question}} {{context}}");
    store
        .connect(Connection::new(&other, "output", &text, "var_context"))
        .unwrap();
    assert_eq!(store.edges().len(), 3);

    store.patch_field(&text, "text", "Only {{context}} now");

    let remaining: Vec<(&str, &str)> = store
        .edges()
        .iter()
        .map(|e| (e.source.as_str(), e.target.as_str()))
        .collect();
    assert_eq!(
        remaining,
        vec![(text.as_str(), output.as_str()), (other.as_str(), text.as_str())]
    );
    assert!(store.edges().iter().all(|e| e.source != input));
}

#[test]
fn test_node_removal_prunes_incident_edges() {
    let mut store = validated_store();
    let (input, text, output) = create_prompt_pipeline(&mut store);

    store.apply_node_changes(&[NodeChange::Remove { id: text.clone() }]);

    assert!(store.edges().is_empty());
    assert!(store.node(&input).is_some());
    assert!(store.node(&output).is_some());
}

#[test]
fn test_unchecked_policy_keeps_dangling_edges() {
    let mut store = unchecked_store();
    let (_, text, _) = create_prompt_pipeline(&mut store);

    store
        .connect(Connection::new("ghost-1", "anything", &text, "var_missing"))
        .unwrap();
    store.patch_field(&text, "text", "no variables");
    store.apply_node_changes(&[NodeChange::Remove { id: text.clone() }]);

    assert_eq!(store.edges().len(), 3);
    assert_eq!(store.policy(), ConnectionPolicy::Unchecked);
}

#[test]
fn test_edge_ids_stay_unique_when_ids_run_together() {
    let mut store = unchecked_store();
    let first = store
        .connect(Connection::new("x", "out", "y", "in"))
        .unwrap();
    let second = store
        .connect(Connection::new("xo", "ut", "y", "in"))
        .unwrap();
    let repeat = store
        .connect(Connection::new("x", "out", "y", "in"))
        .unwrap();

    assert_eq!(first, "edge__xout-yin");
    assert_eq!(second, "edge__xout-yin~2");
    assert_eq!(repeat, "edge__xout-yin~3");

    store.apply_edge_changes(&[EdgeChange::Remove { id: first }]);
    let left: Vec<&str> = store.edges().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(left, vec![second.as_str(), repeat.as_str()]);
    assert_eq!(store.edges()[0].source, "xo");
}

#[test]
fn test_edge_changes() {
    let mut store = validated_store();
    create_prompt_pipeline(&mut store);
    let first = store.edges()[0].id.clone();
    let second = store.edges()[1].id.clone();

    store.apply_edge_changes(&[EdgeChange::Select {
        id: second.clone(),
        selected: true,
    }]);
    assert!(store.edges()[1].selected);
    assert!(!store.edges()[0].selected);

    store.apply_edge_changes(&[EdgeChange::Remove { id: first }]);
    assert_eq!(store.edges().len(), 1);
    assert_eq!(store.edges()[0].id, second);
}

#[test]
fn test_submit_refuses_empty_pipeline() {
    let mut store = validated_store();
    assert_eq!(store.submit(), Err(SubmitError::EmptyPipeline));

    create_prompt_pipeline(&mut store);
    let analysis = store.submit().unwrap();
    assert_eq!(
        analysis,
        PipelineAnalysis {
            num_nodes: 3,
            num_edges: 2,
            is_dag: true,
        }
    );
}
