//! Editor configuration.
//!
//! Every field has a default, so a config file only needs the keys it wants
//! to change:
//!
//! ```json
//! {
//!   "task_name": "run_{contractid}.sh",
//!   "resource_spec": "200&8",
//!   "spawn_offset": 50
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use taskflow_codec::EXPORT_FILE_NAME;
use taskflow_graph::{EdgeAppearance, TaskFields};
use tracing::debug;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
  /// New nodes get `taskId = <prefix><n>`, `n` being the node's id number.
  pub task_id_prefix: String,
  pub task_name: String,
  pub resource_spec: String,
  pub params: String,
  /// Maximum distance from the viewport center, per axis, of a new node.
  pub spawn_offset: f64,
  pub export_file_name: String,
  /// Rendering attributes attached to every new edge.
  pub edge_appearance: EdgeAppearance,
}

impl Default for EditorConfig {
  fn default() -> Self {
    Self {
      task_id_prefix: "task".to_string(),
      task_name: "test_{contractid}.sh".to_string(),
      resource_spec: "100&10".to_string(),
      params: String::new(),
      spawn_offset: 200.0,
      export_file_name: EXPORT_FILE_NAME.to_string(),
      edge_appearance: EdgeAppearance {
        style: Some(serde_json::json!({ "stroke": "#0077cc", "strokeWidth": 2 })),
        marker_end: Some(serde_json::json!({ "type": "arrowclosed" })),
      },
    }
  }
}

impl EditorConfig {
  /// Load a config file. The file must exist.
  pub async fn load(path: &Path) -> Result<Self, ConfigError> {
    let text = tokio::fs::read_to_string(path)
      .await
      .map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
      })?;

    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Load a config file, falling back to defaults when it does not exist.
  pub async fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
      debug!(path = %path.display(), "no config file, using defaults");
      return Ok(Self::default());
    }
    Self::load(path).await
  }

  /// Initial fields for the node that will receive id number `n`.
  pub fn initial_fields(&self, n: u64) -> TaskFields {
    TaskFields::new(
      format!("{}{}", self.task_id_prefix, n),
      self.task_name.clone(),
      self.resource_spec.clone(),
      self.params.clone(),
    )
  }
}
