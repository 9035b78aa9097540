use taskflow_graph::GraphStore;
use tracing::{debug, info};

use crate::selection::SelectionTracker;

/// A keyboard key as reported by the interaction layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
  Delete,
  Backspace,
  Other(String),
}

impl Key {
  /// Map a key name such as `"Delete"` or `"Backspace"`.
  pub fn from_name(name: &str) -> Self {
    match name {
      "Delete" => Key::Delete,
      "Backspace" => Key::Backspace,
      other => Key::Other(other.to_string()),
    }
  }

  pub fn is_delete_intent(&self) -> bool {
    matches!(self, Key::Delete | Key::Backspace)
  }
}

/// Reports whether keystrokes currently go to a text-editing control.
///
/// Implemented for any `Fn() -> bool`.
pub trait EditableFocus: Send + Sync {
  fn is_editable_focus_active(&self) -> bool;
}

impl<F> EditableFocus for F
where
  F: Fn() -> bool + Send + Sync,
{
  fn is_editable_focus_active(&self) -> bool {
    self()
  }
}

/// What a key event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
  /// The key does not express delete intent.
  NotDeleteKey,
  /// A text control had focus; the key belongs to it.
  FocusInEditor,
  /// The selection was removed. Lists the ids that actually existed.
  Deleted {
    node_ids: Vec<String>,
    edge_ids: Vec<String>,
  },
}

/// Removes the selected elements on delete intent.
pub struct DeletionCoordinator {
  focus: Box<dyn EditableFocus>,
}

impl DeletionCoordinator {
  pub fn new(focus: impl EditableFocus + 'static) -> Self {
    Self {
      focus: Box::new(focus),
    }
  }

  /// Handle a key event.
  ///
  /// The selection is left as it was, even when its ids are now gone.
  pub fn handle_key(
    &self,
    key: &Key,
    selection: &SelectionTracker,
    store: &mut GraphStore,
  ) -> DeleteOutcome {
    if !key.is_delete_intent() {
      return DeleteOutcome::NotDeleteKey;
    }

    if self.focus.is_editable_focus_active() {
      debug!(key = ?key, "delete key consumed by text input");
      return DeleteOutcome::FocusInEditor;
    }

    let node_ids = store.remove_nodes(selection.selected_nodes());
    let edge_ids = store.remove_edges(selection.selected_edges());
    info!(
      nodes = node_ids.len(),
      edges = edge_ids.len(),
      "deleted selection"
    );

    DeleteOutcome::Deleted { node_ids, edge_ids }
  }
}

impl Default for DeletionCoordinator {
  /// A coordinator for front ends without text inputs.
  fn default() -> Self {
    Self::new(|| false)
  }
}

impl std::fmt::Debug for DeletionCoordinator {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("DeletionCoordinator").finish_non_exhaustive()
  }
}
