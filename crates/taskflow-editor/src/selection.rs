use std::collections::HashSet;
use std::sync::Arc;

use taskflow_graph::{GraphEvent, GraphObserver, NoopObserver};

/// A selection report from the rendering layer.
///
/// Always carries the full current selection, never a delta.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionChange {
  pub nodes: Vec<String>,
  pub edges: Vec<String>,
}

impl SelectionChange {
  pub fn new<N, E>(nodes: N, edges: E) -> Self
  where
    N: IntoIterator,
    N::Item: Into<String>,
    E: IntoIterator,
    E::Item: Into<String>,
  {
    Self {
      nodes: nodes.into_iter().map(Into::into).collect(),
      edges: edges.into_iter().map(Into::into).collect(),
    }
  }

  /// A selection of nodes only.
  pub fn nodes<N>(nodes: N) -> Self
  where
    N: IntoIterator,
    N::Item: Into<String>,
  {
    Self::new(nodes, Vec::<String>::new())
  }

  /// A selection of edges only.
  pub fn edges<E>(edges: E) -> Self
  where
    E: IntoIterator,
    E::Item: Into<String>,
  {
    Self::new(Vec::<String>::new(), edges)
  }
}

/// Mirrors the rendering layer's current selection.
///
/// Ids are recorded as reported. They are not checked against the graph, so
/// an id may outlive its element; consumers must ignore missing ids.
pub struct SelectionTracker {
  nodes: HashSet<String>,
  edges: HashSet<String>,
  observer: Arc<dyn GraphObserver>,
}

impl SelectionTracker {
  pub fn new() -> Self {
    Self::with_observer(Arc::new(NoopObserver))
  }

  pub fn with_observer(observer: Arc<dyn GraphObserver>) -> Self {
    Self {
      nodes: HashSet::new(),
      edges: HashSet::new(),
      observer,
    }
  }

  /// Replace the recorded selection wholesale.
  pub fn on_selection_change(&mut self, change: SelectionChange) {
    self.nodes = change.nodes.iter().cloned().collect();
    self.edges = change.edges.iter().cloned().collect();
    self.observer.notify(GraphEvent::SelectionChanged {
      node_ids: change.nodes,
      edge_ids: change.edges,
    });
  }

  pub fn selected_nodes(&self) -> &HashSet<String> {
    &self.nodes
  }

  pub fn selected_edges(&self) -> &HashSet<String> {
    &self.edges
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty() && self.edges.is_empty()
  }
}

impl Default for SelectionTracker {
  fn default() -> Self {
    Self::new()
  }
}

impl std::fmt::Debug for SelectionTracker {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SelectionTracker")
      .field("nodes", &self.nodes)
      .field("edges", &self.edges)
      .finish_non_exhaustive()
  }
}
