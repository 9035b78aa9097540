use serde::{Deserialize, Deserializer, Serialize};

use crate::fields::TaskFields;

/// Node kind written for task nodes.
pub const CUSTOM_NODE_KIND: &str = "custom";

/// Canvas coordinates of a node, in model space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
  pub x: f64,
  pub y: f64,
}

impl Position {
  pub fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }
}

/// A node as it appears in a flow document.
///
/// Only data-representable attributes are present. Older documents used
/// `type` instead of `kind`; both are accepted on read. A missing or `null`
/// `data` reads as empty fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDef {
  pub id: String,
  #[serde(alias = "type", default = "default_node_kind")]
  pub kind: String,
  pub position: Position,
  #[serde(default, deserialize_with = "null_as_default")]
  pub data: TaskFields,
}

fn default_node_kind() -> String {
  CUSTOM_NODE_KIND.to_string()
}

fn null_as_default<'de, D>(deserializer: D) -> Result<TaskFields, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<TaskFields>::deserialize(deserializer)?.unwrap_or_default())
}
