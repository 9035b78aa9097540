use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use taskflow_document::{Position, TaskFields};

use crate::error::GraphError;

/// Classification of a node on the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
  /// A pipeline task.
  Task,
  /// Any other kind found in an imported document, kept verbatim.
  Other(String),
}

/// A task node in the live graph.
///
/// Holds values only. Field edits are applied through
/// [`GraphStore::update_field`](crate::GraphStore::update_field) by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
  pub id: String,
  pub kind: NodeKind,
  pub position: Position,
  pub fields: TaskFields,
}

impl Node {
  pub fn task(id: impl Into<String>, position: Position, fields: TaskFields) -> Self {
    Self {
      id: id.into(),
      kind: NodeKind::Task,
      position,
      fields,
    }
  }
}

/// Names one of the editable task fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
  TaskId,
  TaskName,
  #[serde(rename = "memThread")]
  ResourceSpec,
  Params,
}

impl FieldKey {
  pub const ALL: [FieldKey; 4] = [
    FieldKey::TaskId,
    FieldKey::TaskName,
    FieldKey::ResourceSpec,
    FieldKey::Params,
  ];

  /// Key name as written in flow documents.
  pub fn as_str(&self) -> &'static str {
    match self {
      FieldKey::TaskId => "taskId",
      FieldKey::TaskName => "taskName",
      FieldKey::ResourceSpec => "memThread",
      FieldKey::Params => "params",
    }
  }

  pub fn get<'a>(&self, fields: &'a TaskFields) -> &'a str {
    match self {
      FieldKey::TaskId => &fields.task_id,
      FieldKey::TaskName => &fields.task_name,
      FieldKey::ResourceSpec => &fields.resource_spec,
      FieldKey::Params => &fields.params,
    }
  }

  pub(crate) fn slot<'a>(&self, fields: &'a mut TaskFields) -> &'a mut String {
    match self {
      FieldKey::TaskId => &mut fields.task_id,
      FieldKey::TaskName => &mut fields.task_name,
      FieldKey::ResourceSpec => &mut fields.resource_spec,
      FieldKey::Params => &mut fields.params,
    }
  }
}

impl fmt::Display for FieldKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for FieldKey {
  type Err = GraphError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "taskId" => Ok(FieldKey::TaskId),
      "taskName" => Ok(FieldKey::TaskName),
      "memThread" | "resourceSpec" => Ok(FieldKey::ResourceSpec),
      "params" => Ok(FieldKey::Params),
      other => Err(GraphError::UnknownField(other.to_string())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_field_key_parse() {
    assert_eq!("taskName".parse::<FieldKey>(), Ok(FieldKey::TaskName));
    assert_eq!("resourceSpec".parse::<FieldKey>(), Ok(FieldKey::ResourceSpec));
    assert_eq!("memThread".parse::<FieldKey>(), Ok(FieldKey::ResourceSpec));
    assert_eq!(
      "onChange".parse::<FieldKey>(),
      Err(GraphError::UnknownField("onChange".to_string()))
    );
  }

  #[test]
  fn test_field_key_names_round_trip() {
    for key in FieldKey::ALL {
      assert_eq!(key.as_str().parse::<FieldKey>(), Ok(key));
    }
  }

  #[test]
  fn test_field_key_get() {
    let fields = TaskFields::new("t0", "run.sh", "100&10", "-x");
    assert_eq!(FieldKey::TaskId.get(&fields), "t0");
    assert_eq!(FieldKey::ResourceSpec.get(&fields), "100&10");
    assert_eq!(FieldKey::Params.get(&fields), "-x");
  }
}
