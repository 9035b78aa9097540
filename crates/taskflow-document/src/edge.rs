use serde::{Deserialize, Serialize};

/// Edge type written for dependency edges.
pub const DEFAULT_EDGE_TYPE: &str = "default";

/// A directed dependency edge as it appears in a flow document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDef {
  pub id: String,
  pub source: String,
  pub target: String,
  #[serde(rename = "type", alias = "kind", default = "default_edge_type")]
  pub edge_type: String,
  /// Opaque rendering style, carried through unchanged.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub style: Option<serde_json::Value>,
  /// Opaque arrow marker, carried through unchanged.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub marker_end: Option<serde_json::Value>,
}

fn default_edge_type() -> String {
  DEFAULT_EDGE_TYPE.to_string()
}
