use serde::{Deserialize, Serialize};

/// Classification of an edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
  Default,
  Other(String),
}

/// Opaque rendering attributes attached to new edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeAppearance {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub style: Option<serde_json::Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub marker_end: Option<serde_json::Value>,
}

/// A directed dependency edge in the live graph.
///
/// `source` and `target` are not guaranteed to name existing nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
  pub id: String,
  pub source: String,
  pub target: String,
  pub kind: EdgeKind,
  pub style: Option<serde_json::Value>,
  pub marker_end: Option<serde_json::Value>,
}

impl Edge {
  pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      source: source.into(),
      target: target.into(),
      kind: EdgeKind::Default,
      style: None,
      marker_end: None,
    }
  }

  pub fn with_appearance(mut self, appearance: EdgeAppearance) -> Self {
    self.style = appearance.style;
    self.marker_end = appearance.marker_end;
    self
  }

  pub fn is_self_loop(&self) -> bool {
    self.source == self.target
  }

  /// Check whether this edge links `source` to `target`.
  pub fn connects(&self, source: &str, target: &str) -> bool {
    self.source == source && self.target == target
  }
}
