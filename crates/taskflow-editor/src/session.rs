use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use taskflow_codec::{CodecError, ImportSummary};
use taskflow_document::FlowDocument;
use taskflow_graph::{
  Edge, FieldKey, GraphError, GraphObserver, GraphStore, NoopObserver, Node, Position,
};
use tracing::{debug, info};

use crate::config::EditorConfig;
use crate::deletion::{DeleteOutcome, DeletionCoordinator, EditableFocus, Key};
use crate::error::EditorError;
use crate::selection::{SelectionChange, SelectionTracker};
use crate::viewport::ViewportProjection;

/// Largest per-axis spread used when placing a new node.
pub const MAX_SPAWN_OFFSET: f64 = 1.0e6;

/// One editing session: the graph, the selection and the user actions.
pub struct EditorSession {
  store: GraphStore,
  selection: SelectionTracker,
  deletion: DeletionCoordinator,
  config: EditorConfig,
  rng: StdRng,
}

impl EditorSession {
  /// Create an empty session with no observer and no text inputs.
  pub fn new(config: EditorConfig) -> Self {
    Self::with_observer(config, Arc::new(NoopObserver))
  }

  /// Create an empty session that reports graph and selection changes.
  pub fn with_observer(config: EditorConfig, observer: Arc<dyn GraphObserver>) -> Self {
    Self {
      store: GraphStore::with_observer(Arc::clone(&observer)),
      selection: SelectionTracker::with_observer(observer),
      deletion: DeletionCoordinator::default(),
      config,
      rng: StdRng::from_os_rng(),
    }
  }

  /// Use `focus` to decide whether delete keys belong to a text input.
  pub fn with_focus(mut self, focus: impl EditableFocus + 'static) -> Self {
    self.deletion = DeletionCoordinator::new(focus);
    self
  }

  /// Make node placement deterministic.
  pub fn with_seed(mut self, seed: u64) -> Self {
    self.rng = StdRng::seed_from_u64(seed);
    self
  }

  pub fn store(&self) -> &GraphStore {
    &self.store
  }

  pub fn selection(&self) -> &SelectionTracker {
    &self.selection
  }

  pub fn config(&self) -> &EditorConfig {
    &self.config
  }

  /// Add Node: insert a task near the viewport center.
  ///
  /// The position is offset on each axis by a random amount of at most
  /// `spawn_offset`, capped at [`MAX_SPAWN_OFFSET`].
  pub fn add_node(&mut self, viewport: &impl ViewportProjection) -> &Node {
    let center = viewport.model_center();
    let spread = self.config.spawn_offset.abs();
    let (dx, dy) = if spread.is_finite() && spread > 0.0 {
      let spread = spread.min(MAX_SPAWN_OFFSET);
      (
        self.rng.random_range(-spread..=spread),
        self.rng.random_range(-spread..=spread),
      )
    } else {
      (0.0, 0.0)
    };

    self.add_node_at(Position::new(center.x + dx, center.y + dy))
  }

  /// Insert a task at an exact model position with the configured initial fields.
  pub fn add_node_at(&mut self, position: Position) -> &Node {
    let fields = self.config.initial_fields(self.store.node_ids().peek());
    self.store.add_node(position, fields)
  }

  /// Field change callback.
  ///
  /// Returns `Ok(false)` when the node no longer exists; that is not an
  /// error. An unrecognised key is.
  pub fn update_field(&mut self, node_id: &str, key: &str, value: &str) -> Result<bool, EditorError> {
    let key: FieldKey = key.parse()?;
    match self.store.update_field(node_id, key, value) {
      Ok(()) => Ok(true),
      Err(GraphError::NodeNotFound(_)) => {
        debug!(node_id = %node_id, key = %key, "field update for missing node ignored");
        Ok(false)
      }
      Err(e) => Err(e.into()),
    }
  }

  /// Connect callback. The proposal is accepted as given.
  pub fn connect(&mut self, source: &str, target: &str) -> &Edge {
    let appearance = self.config.edge_appearance.clone();
    self.store.connect_with(source, target, appearance)
  }

  /// Selection change callback.
  pub fn on_selection_change(&mut self, change: SelectionChange) {
    self.selection.on_selection_change(change);
  }

  /// Global key handler.
  pub fn on_key(&mut self, key: &Key) -> DeleteOutcome {
    self
      .deletion
      .handle_key(key, &self.selection, &mut self.store)
  }

  /// Build the export document without writing it.
  pub fn export_document(&self) -> FlowDocument {
    taskflow_codec::export(&self.store)
  }

  pub fn export_json(&self) -> Result<String, EditorError> {
    Ok(taskflow_codec::export_json(&self.store)?)
  }

  /// Export: write the document into `dir` under the configured file name.
  pub async fn export_to(&self, dir: &Path) -> Result<PathBuf, EditorError> {
    let path = dir.join(&self.config.export_file_name);
    taskflow_codec::write_export_to(&self.store, &path).await?;
    Ok(path)
  }

  /// Export to an explicit file path, e.g. back to the file that was imported.
  pub async fn export_to_file(&self, path: &Path) -> Result<(), EditorError> {
    taskflow_codec::write_export_to(&self.store, path).await?;
    Ok(())
  }

  /// Import a document held in memory.
  pub fn import_json(&mut self, text: &str) -> Result<ImportSummary, EditorError> {
    Ok(taskflow_codec::import(&mut self.store, text)?)
  }

  /// Import: read a document file and replace the graph with it.
  ///
  /// The session is borrowed exclusively until the read completes, so two
  /// imports can never interleave.
  pub async fn import_file(&mut self, path: &Path) -> Result<ImportSummary, EditorError> {
    let text = tokio::fs::read_to_string(path)
      .await
      .map_err(CodecError::from)?;
    let summary = self.import_json(&text)?;
    info!(path = %path.display(), nodes = summary.node_count, "loaded flow file");
    Ok(summary)
  }
}

impl std::fmt::Debug for EditorSession {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("EditorSession")
      .field("store", &self.store)
      .field("selection", &self.selection)
      .field("config", &self.config)
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::viewport::Viewport;

  #[test]
  fn test_add_node_near_center() {
    let mut session = EditorSession::new(EditorConfig::default()).with_seed(7);
    let viewport = Viewport::default();

    for _ in 0..20 {
      let node = session.add_node(&viewport);
      assert!((node.position.x - 400.0).abs() <= 200.0);
      assert!((node.position.y - 300.0).abs() <= 200.0);
    }
  }

  #[test]
  fn test_add_node_without_spread() {
    let config = EditorConfig {
      spawn_offset: 0.0,
      ..EditorConfig::default()
    };
    let mut session = EditorSession::new(config);

    let node = session.add_node(&Viewport::default());
    assert_eq!(node.position, Position::new(400.0, 300.0));
  }

  #[test]
  fn test_add_node_with_huge_spread() {
    for spawn_offset in [1e308, f64::MAX, -f64::MAX] {
      let config = EditorConfig {
        spawn_offset,
        ..EditorConfig::default()
      };
      let mut session = EditorSession::new(config).with_seed(3);

      let node = session.add_node(&Viewport::default());
      assert!((node.position.x - 400.0).abs() <= MAX_SPAWN_OFFSET);
      assert!((node.position.y - 300.0).abs() <= MAX_SPAWN_OFFSET);
    }
  }

  #[test]
  fn test_add_node_with_non_finite_spread() {
    for spawn_offset in [f64::NAN, f64::INFINITY] {
      let config = EditorConfig {
        spawn_offset,
        ..EditorConfig::default()
      };
      let mut session = EditorSession::new(config);

      let node = session.add_node(&Viewport::default());
      assert_eq!(node.position, Position::new(400.0, 300.0));
    }
  }

  #[test]
  fn test_initial_fields_follow_id() {
    let mut session = EditorSession::new(EditorConfig::default());
    session.add_node_at(Position::default());
    let node = session.add_node_at(Position::default());

    assert_eq!(node.id, "node_1");
    assert_eq!(node.fields.task_id, "task1");
    assert_eq!(node.fields.task_name, "test_{contractid}.sh");
    assert_eq!(node.fields.resource_spec, "100&10");
  }

  #[test]
  fn test_update_field_callback() {
    let mut session = EditorSession::new(EditorConfig::default());
    let id = session.add_node_at(Position::default()).id.clone();

    assert!(session.update_field(&id, "params", "--dry-run").unwrap());
    assert!(!session.update_field("node_42", "params", "x").unwrap());
    assert!(matches!(
      session.update_field(&id, "label", "x"),
      Err(EditorError::Graph(GraphError::UnknownField(_)))
    ));
    assert_eq!(session.store().node(&id).unwrap().fields.params, "--dry-run");
  }

  #[test]
  fn test_connect_uses_configured_appearance() {
    let mut session = EditorSession::new(EditorConfig::default());
    let edge = session.connect("node_0", "node_1");

    assert_eq!(edge.marker_end.as_ref().unwrap()["type"], "arrowclosed");
    assert_eq!(edge.style.as_ref().unwrap()["strokeWidth"], 2);
  }
}
