//! Task field values carried by every node.
//!
//! All four fields are opaque strings. In particular the resource
//! specification (`memThread`, e.g. `"100&10"`) is never parsed here; it is
//! forwarded verbatim to whatever consumes the exported document.
//!
//! # Examples
//!
//! ```json
//! {
//!   "taskId": "task0",
//!   "taskName": "test_{contractid}.sh",
//!   "memThread": "100&10",
//!   "params": "--verbose"
//! }
//! ```
//!
//! Missing keys deserialize to empty strings, and `resourceSpec` is accepted
//! as an alias of `memThread`.

use serde::{Deserialize, Serialize};

/// The editable values of a task node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFields {
  #[serde(default)]
  pub task_id: String,
  #[serde(default)]
  pub task_name: String,
  /// Resource specification, e.g. `"100&10"`.
  #[serde(default, rename = "memThread", alias = "resourceSpec")]
  pub resource_spec: String,
  #[serde(default)]
  pub params: String,
}

impl TaskFields {
  pub fn new(
    task_id: impl Into<String>,
    task_name: impl Into<String>,
    resource_spec: impl Into<String>,
    params: impl Into<String>,
  ) -> Self {
    Self {
      task_id: task_id.into(),
      task_name: task_name.into(),
      resource_spec: resource_spec.into(),
      params: params.into(),
    }
  }
}
