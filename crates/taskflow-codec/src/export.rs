use std::collections::HashSet;

use taskflow_document::{CUSTOM_NODE_KIND, DEFAULT_EDGE_TYPE, EdgeDef, FlowDocument, NodeDef};
use taskflow_graph::{Edge, EdgeKind, GraphStore, Node, NodeKind, Position};
use tracing::debug;

use crate::error::CodecError;

/// Build a flow document from the current graph.
///
/// Only edges whose source and target both name a node in the graph are
/// emitted; the rest are dropped silently.
pub fn export(store: &GraphStore) -> FlowDocument {
  let node_ids: HashSet<&str> = store.nodes().iter().map(|n| n.id.as_str()).collect();

  let nodes: Vec<NodeDef> = store.nodes().iter().map(node_def).collect();
  let edges: Vec<EdgeDef> = store
    .edges()
    .iter()
    .filter(|e| {
      let keep = node_ids.contains(e.source.as_str()) && node_ids.contains(e.target.as_str());
      if !keep {
        debug!(edge_id = %e.id, source = %e.source, target = %e.target, "dropping dangling edge");
      }
      keep
    })
    .map(edge_def)
    .collect();

  FlowDocument { nodes, edges }
}

/// Export the graph as pretty-printed JSON.
///
/// Fails if any node sits at a non-finite position: JSON would write it as
/// `null` and the document could not be imported again.
pub fn export_json(store: &GraphStore) -> Result<String, CodecError> {
  if let Some(node) = store.nodes().iter().find(|n| !is_finite(n.position)) {
    return Err(CodecError::NonFinitePosition {
      node_id: node.id.clone(),
      x: node.position.x,
      y: node.position.y,
    });
  }
  serde_json::to_string_pretty(&export(store)).map_err(CodecError::Encode)
}

fn is_finite(position: Position) -> bool {
  position.x.is_finite() && position.y.is_finite()
}

fn node_def(node: &Node) -> NodeDef {
  let kind = match &node.kind {
    NodeKind::Task => CUSTOM_NODE_KIND.to_string(),
    NodeKind::Other(kind) => kind.clone(),
  };

  NodeDef {
    id: node.id.clone(),
    kind,
    position: node.position,
    data: node.fields.clone(),
  }
}

fn edge_def(edge: &Edge) -> EdgeDef {
  let edge_type = match &edge.kind {
    EdgeKind::Default => DEFAULT_EDGE_TYPE.to_string(),
    EdgeKind::Other(kind) => kind.clone(),
  };

  EdgeDef {
    id: edge.id.clone(),
    source: edge.source.clone(),
    target: edge.target.clone(),
    edge_type,
    style: edge.style.clone(),
    marker_end: edge.marker_end.clone(),
  }
}
