use serde::{Deserialize, Serialize};

use crate::edge::EdgeDef;
use crate::node::NodeDef;

/// A complete flow document.
///
/// `nodes` is required; a document without an `edges` array is read as
/// having no edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowDocument {
  pub nodes: Vec<NodeDef>,
  #[serde(default)]
  pub edges: Vec<EdgeDef>,
}

impl FlowDocument {
  /// Get a node by ID.
  pub fn get_node(&self, node_id: &str) -> Option<&NodeDef> {
    self.nodes.iter().find(|n| n.id == node_id)
  }
}
