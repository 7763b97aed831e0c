//! Integration tests for the editing loop
//!
//! Exercises the public API end to end: mutate, observe the verdict,
//! request and apply layout, the way a canvas front end would drive it.

use dagedit::{
    ConnectOutcome, Direction, Editor, GraphDoc, InvalidReason, LayoutConfig, NodeId, Verdict,
};

fn id(s: &str) -> NodeId {
    NodeId::new(s).unwrap()
}

#[test]
fn test_editing_session_reaches_valid_dag() {
    let mut editor = Editor::new();
    assert_eq!(
        editor.verdict(),
        Verdict::Invalid(InvalidReason::TooFewNodes)
    );

    let fetch = editor.add_node("Fetch").unwrap().id;
    assert_eq!(
        editor.verdict(),
        Verdict::Invalid(InvalidReason::TooFewNodes)
    );

    let parse = editor.add_node("Parse").unwrap().id;
    // two nodes, no edges yet: both isolated
    assert_eq!(
        editor.verdict(),
        Verdict::Invalid(InvalidReason::IsolatedNode)
    );

    assert!(matches!(
        editor.connect(&fetch, &parse),
        ConnectOutcome::Connected(_)
    ));
    assert_eq!(editor.verdict(), Verdict::Valid);
}

#[test]
fn test_cycle_surfaces_and_recovers() {
    let mut editor = Editor::new();
    let a = editor.add_node("A").unwrap().id;
    let b = editor.add_node("B").unwrap().id;
    editor.connect(&a, &b);
    editor.connect(&b, &a);
    assert_eq!(
        editor.verdict(),
        Verdict::Invalid(InvalidReason::CycleDetected)
    );

    editor.select_edge(&b, &a);
    editor.delete_selected();
    assert_eq!(editor.verdict(), Verdict::Valid);
}

#[test]
fn test_layout_round_trip_through_editor() {
    let mut editor = Editor::new();
    let a = editor.add_node("A").unwrap().id;
    let b = editor.add_node("B").unwrap().id;
    let c = editor.add_node("C").unwrap().id;
    editor.connect(&a, &b);
    editor.connect(&a, &c);

    let result = editor.request_layout().unwrap();
    assert_eq!(result.positions.len(), 3);

    let bounds = editor.apply_layout(&result).unwrap();
    assert!(bounds.width() >= bounds.height());

    // every edge advances along x in the default left-to-right direction
    for edge in editor.graph().edges() {
        let source = editor.graph().get_node(&edge.source).unwrap().position;
        let target = editor.graph().get_node(&edge.target).unwrap().position;
        assert!(target.x > source.x);
    }
}

#[test]
fn test_top_to_bottom_session() {
    let mut editor = Editor::new();
    editor.set_layout_config(LayoutConfig {
        direction: Direction::TopToBottom,
        ..LayoutConfig::default()
    });

    let a = editor.add_node("A").unwrap().id;
    let b = editor.add_node("B").unwrap().id;
    editor.connect(&a, &b);

    let result = editor.request_layout().unwrap();
    editor.apply_layout(&result).unwrap();

    let pa = editor.graph().get_node(&a).unwrap().position;
    let pb = editor.graph().get_node(&b).unwrap().position;
    assert!(pb.y > pa.y);
    assert_eq!(pa.x, pb.x);
}

#[test]
fn test_document_to_editor_to_document() {
    let doc = GraphDoc::from_yaml(
        r#"
nodes:
  - id: node_0
    label: Source
  - id: node_1
    label: Sink
edges:
  - source: node_0
    target: node_1
"#,
    )
    .unwrap();

    let mut editor = Editor::from_graph(doc.into_graph().unwrap()).unwrap();
    assert_eq!(editor.verdict(), Verdict::Valid);

    // fresh ids continue past the loaded ones
    let added = editor.add_node("Extra").unwrap();
    assert_eq!(added.id.as_str(), "node_2");

    editor.connect(&id("node_1"), &added.id);
    let result = editor.request_layout().unwrap();
    editor.apply_layout(&result).unwrap();

    let out = GraphDoc::from_graph(editor.graph());
    assert_eq!(out.nodes.len(), 3);
    assert_eq!(out.edges.len(), 2);
    // positions were written back
    assert!(out.nodes.iter().any(|n| n.position.x != 0.0));
}

#[test]
fn test_delete_everything_returns_to_too_few() {
    let mut editor = Editor::new();
    let a = editor.add_node("A").unwrap().id;
    let b = editor.add_node("B").unwrap().id;
    editor.connect(&a, &b);
    assert_eq!(editor.verdict(), Verdict::Valid);

    editor.select_node(&a);
    editor.select_node(&b);
    editor.delete_selected();

    assert!(editor.graph().is_empty());
    assert_eq!(
        editor.verdict(),
        Verdict::Invalid(InvalidReason::TooFewNodes)
    );
}
