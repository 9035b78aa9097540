use std::collections::HashSet;

use taskflow_document::{CUSTOM_NODE_KIND, DEFAULT_EDGE_TYPE, EdgeDef, FlowDocument, NodeDef};
use taskflow_graph::{Edge, EdgeKind, GraphStore, Node, NodeKind};
use tracing::{info, warn};

use crate::error::CodecError;

/// What an import put into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
  pub node_count: usize,
  pub edge_count: usize,
  /// Edges loaded with a missing endpoint. They are kept as-is.
  pub dangling_edges: usize,
}

/// Parse `text` into a flow document without touching any store.
///
/// Node ids and edge ids must each be unique within the document.
pub fn decode(text: &str) -> Result<FlowDocument, CodecError> {
  let document: FlowDocument = serde_json::from_str(text).map_err(CodecError::Parse)?;

  let mut node_ids = HashSet::new();
  for node in &document.nodes {
    if !node_ids.insert(node.id.as_str()) {
      return Err(CodecError::DuplicateNodeId {
        node_id: node.id.clone(),
      });
    }
  }

  let mut edge_ids = HashSet::new();
  for edge in &document.edges {
    if !edge_ids.insert(edge.id.as_str()) {
      return Err(CodecError::DuplicateEdgeId {
        edge_id: edge.id.clone(),
      });
    }
  }

  Ok(document)
}

/// Parse `text` and replace the whole graph with it.
///
/// On error the store is left exactly as it was.
pub fn import(store: &mut GraphStore, text: &str) -> Result<ImportSummary, CodecError> {
  let document = decode(text)?;
  Ok(import_document(store, document))
}

/// Replace the whole graph with an already-decoded document.
///
/// Both id allocators are reseeded above the highest matching id in the
/// document. Edge endpoints are not checked.
pub fn import_document(store: &mut GraphStore, document: FlowDocument) -> ImportSummary {
  store
    .node_ids_mut()
    .reseed_from(document.nodes.iter().map(|n| n.id.as_str()));
  store
    .edge_ids_mut()
    .reseed_from(document.edges.iter().map(|e| e.id.as_str()));

  let nodes: Vec<Node> = document.nodes.into_iter().map(node_from_def).collect();
  let edges: Vec<Edge> = document.edges.into_iter().map(edge_from_def).collect();

  store.replace_all(nodes, edges);

  let summary = ImportSummary {
    node_count: store.nodes().len(),
    edge_count: store.edges().len(),
    dangling_edges: store.dangling_edges().len(),
  };

  if summary.dangling_edges > 0 {
    warn!(
      dangling_edges = summary.dangling_edges,
      "imported document contains edges with missing endpoints"
    );
  }
  info!(
    nodes = summary.node_count,
    edges = summary.edge_count,
    next_node_id = store.node_ids().peek(),
    "imported flow document"
  );

  summary
}

fn node_from_def(def: NodeDef) -> Node {
  let kind = if def.kind == CUSTOM_NODE_KIND {
    NodeKind::Task
  } else {
    NodeKind::Other(def.kind)
  };

  Node {
    id: def.id,
    kind,
    position: def.position,
    fields: def.data,
  }
}

fn edge_from_def(def: EdgeDef) -> Edge {
  let kind = if def.edge_type == DEFAULT_EDGE_TYPE {
    EdgeKind::Default
  } else {
    EdgeKind::Other(def.edge_type)
  };

  Edge {
    id: def.id,
    source: def.source,
    target: def.target,
    kind,
    style: def.style,
    marker_end: def.marker_end,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use taskflow_graph::{Position, TaskFields};

  fn snapshot(store: &GraphStore) -> (Vec<Node>, Vec<Edge>, u64, u64) {
    (
      store.nodes().to_vec(),
      store.edges().to_vec(),
      store.node_ids().peek(),
      store.edge_ids().peek(),
    )
  }

  #[test]
  fn test_import_reseeds_node_ids() {
    let nodes: Vec<String> = (0..8)
      .map(|i| {
        format!(
          r#"{{"id": "node_{i}", "kind": "custom", "position": {{"x": 0, "y": 0}}, "data": {{}}}}"#
        )
      })
      .collect();
    let text = format!(r#"{{"nodes": [{}], "edges": []}}"#, nodes.join(","));

    let mut store = GraphStore::new();
    import(&mut store, &text).unwrap();

    let id = store.add_node(Position::default(), TaskFields::default()).id.clone();
    assert_eq!(id, "node_8");
  }

  #[test]
  fn test_import_ignores_non_matching_ids() {
    let text = r#"{
      "nodes": [
        {"id": "start", "kind": "custom", "position": {"x": 0, "y": 0}},
        {"id": "node_2", "kind": "custom", "position": {"x": 0, "y": 0}},
        {"id": "node_x9", "kind": "custom", "position": {"x": 0, "y": 0}}
      ],
      "edges": [
        {"id": "reactflow__edge-start-node_2", "source": "start", "target": "node_2", "type": "default"},
        {"id": "edge_4", "source": "node_2", "target": "start", "type": "default"}
      ]
    }"#;

    let mut store = GraphStore::new();
    let summary = import(&mut store, text).unwrap();

    assert_eq!(summary.node_count, 3);
    assert_eq!(summary.edge_count, 2);
    assert_eq!(store.node_ids().peek(), 3);
    assert_eq!(store.edge_ids().peek(), 5);
    assert_eq!(store.connect("start", "node_2").id, "edge_5");
  }

  #[test]
  fn test_import_keeps_dangling_edges() {
    let text = r#"{
      "nodes": [{"id": "node_0", "type": "custom", "position": {"x": 1, "y": 2}}],
      "edges": [{"id": "edge_0", "source": "node_0", "target": "node_9", "type": "default"}]
    }"#;

    let mut store = GraphStore::new();
    let summary = import(&mut store, text).unwrap();

    assert_eq!(summary.dangling_edges, 1);
    assert_eq!(store.edges().len(), 1);
    assert_eq!(store.edges()[0].target, "node_9");
  }

  #[test]
  fn test_import_preserves_unknown_kinds() {
    let text = r#"{
      "nodes": [{"id": "n", "kind": "group", "position": {"x": 0, "y": 0}}],
      "edges": [{"id": "e", "source": "n", "target": "n", "type": "smoothstep"}]
    }"#;

    let mut store = GraphStore::new();
    import(&mut store, text).unwrap();

    assert_eq!(store.nodes()[0].kind, NodeKind::Other("group".to_string()));
    assert_eq!(store.edges()[0].kind, EdgeKind::Other("smoothstep".to_string()));
  }

  #[test]
  fn test_malformed_import_leaves_store_unchanged() {
    let mut store = GraphStore::new();
    store.add_node(Position::new(1.0, 2.0), TaskFields::new("t0", "a.sh", "100&10", ""));
    store.connect("node_0", "node_5");
    let before = snapshot(&store);

    for text in [
      "{not json",
      r#"{"edges": []}"#,
      r#"{"nodes": [{"id": 3, "position": {"x": 0, "y": 0}}]}"#,
      r#"{"nodes": [{"id": "node_40"}]}"#,
    ] {
      let err = import(&mut store, text).unwrap_err();
      assert!(matches!(err, CodecError::Parse(_)), "unexpected error for {text}: {err}");
      assert_eq!(snapshot(&store), before);
    }
  }

  #[test]
  fn test_duplicate_ids_rejected() {
    let mut store = GraphStore::new();

    let text = r#"{"nodes": [
      {"id": "node_1", "position": {"x": 0, "y": 0}},
      {"id": "node_1", "position": {"x": 5, "y": 5}}
    ]}"#;
    let err = import(&mut store, text).unwrap_err();
    assert!(matches!(err, CodecError::DuplicateNodeId { ref node_id } if node_id == "node_1"));

    let text = r#"{"nodes": [], "edges": [
      {"id": "e", "source": "a", "target": "b"},
      {"id": "e", "source": "b", "target": "a"}
    ]}"#;
    let err = import(&mut store, text).unwrap_err();
    assert!(err.is_malformed());
    assert_eq!(store.node_ids().peek(), 0);
  }
}
