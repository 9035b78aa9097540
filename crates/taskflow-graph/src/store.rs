use std::collections::HashSet;
use std::sync::Arc;

use taskflow_document::{Position, TaskFields};
use tracing::{debug, warn};

use crate::edge::{Edge, EdgeAppearance};
use crate::error::GraphError;
use crate::events::{GraphEvent, GraphObserver, NoopObserver};
use crate::id::IdAllocator;
use crate::node::{FieldKey, Node};
use crate::topology::Topology;

/// The authoritative node and edge collections of an editing session.
///
/// Nodes keep creation order. Removing a node does not remove its incident
/// edges; those dangle until the next export drops them.
pub struct GraphStore {
  nodes: Vec<Node>,
  edges: Vec<Edge>,
  node_ids: IdAllocator,
  edge_ids: IdAllocator,
  observer: Arc<dyn GraphObserver>,
}

impl GraphStore {
  pub fn new() -> Self {
    Self::with_observer(Arc::new(NoopObserver))
  }

  /// Create an empty store that reports changes to `observer`.
  pub fn with_observer(observer: Arc<dyn GraphObserver>) -> Self {
    Self {
      nodes: Vec::new(),
      edges: Vec::new(),
      node_ids: IdAllocator::for_nodes(),
      edge_ids: IdAllocator::for_edges(),
      observer,
    }
  }

  pub fn nodes(&self) -> &[Node] {
    &self.nodes
  }

  pub fn edges(&self) -> &[Edge] {
    &self.edges
  }

  /// Get a node by ID.
  pub fn node(&self, node_id: &str) -> Option<&Node> {
    self.nodes.iter().find(|n| n.id == node_id)
  }

  /// Get an edge by ID.
  pub fn edge(&self, edge_id: &str) -> Option<&Edge> {
    self.edges.iter().find(|e| e.id == edge_id)
  }

  pub fn contains_node(&self, node_id: &str) -> bool {
    self.node(node_id).is_some()
  }

  pub fn node_ids(&self) -> &IdAllocator {
    &self.node_ids
  }

  pub fn node_ids_mut(&mut self) -> &mut IdAllocator {
    &mut self.node_ids
  }

  pub fn edge_ids(&self) -> &IdAllocator {
    &self.edge_ids
  }

  pub fn edge_ids_mut(&mut self) -> &mut IdAllocator {
    &mut self.edge_ids
  }

  pub fn observer(&self) -> Arc<dyn GraphObserver> {
    Arc::clone(&self.observer)
  }

  /// Append a task node with a freshly allocated id.
  pub fn add_node(&mut self, position: Position, fields: TaskFields) -> &Node {
    let id = self.node_ids.next_id();
    debug!(node_id = %id, x = position.x, y = position.y, "adding node");

    self.nodes.push(Node::task(id.clone(), position, fields));
    self.observer.notify(GraphEvent::NodeAdded { node_id: id });
    &self.nodes[self.nodes.len() - 1]
  }

  /// Replace exactly one field of exactly one node.
  pub fn update_field(
    &mut self,
    node_id: &str,
    key: FieldKey,
    value: impl Into<String>,
  ) -> Result<(), GraphError> {
    let node = self
      .nodes
      .iter_mut()
      .find(|n| n.id == node_id)
      .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;

    let value = value.into();
    *key.slot(&mut node.fields) = value.clone();

    self.observer.notify(GraphEvent::FieldChanged {
      node_id: node_id.to_string(),
      key,
      value,
    });
    Ok(())
  }

  /// Append a default edge from `source` to `target`.
  ///
  /// Endpoints are not validated. Self-loops and repeated pairs are accepted
  /// and only logged.
  pub fn connect(&mut self, source: &str, target: &str) -> &Edge {
    self.connect_with(source, target, EdgeAppearance::default())
  }

  /// Like [`connect`](Self::connect), attaching opaque rendering attributes.
  pub fn connect_with(&mut self, source: &str, target: &str, appearance: EdgeAppearance) -> &Edge {
    if source == target {
      warn!(node_id = %source, "connecting node to itself");
    }
    if self.edges.iter().any(|e| e.connects(source, target)) {
      warn!(source = %source, target = %target, "duplicate edge");
    }

    let id = self.edge_ids.next_id();
    debug!(edge_id = %id, source = %source, target = %target, "connecting nodes");

    self
      .edges
      .push(Edge::new(id.clone(), source, target).with_appearance(appearance));
    self.observer.notify(GraphEvent::EdgeConnected {
      edge_id: id,
      source: source.to_string(),
      target: target.to_string(),
    });
    &self.edges[self.edges.len() - 1]
  }

  /// Drop every node whose id is in `ids`. Incident edges are kept.
  ///
  /// Returns the ids that were actually removed, in graph order.
  pub fn remove_nodes(&mut self, ids: &HashSet<String>) -> Vec<String> {
    let mut removed = Vec::new();
    self.nodes.retain(|n| {
      let keep = !ids.contains(&n.id);
      if !keep {
        removed.push(n.id.clone());
      }
      keep
    });

    if !removed.is_empty() {
      debug!(count = removed.len(), "removed nodes");
      self.observer.notify(GraphEvent::NodesRemoved {
        node_ids: removed.clone(),
      });
    }
    removed
  }

  /// Drop every edge whose id is in `ids`.
  ///
  /// Returns the ids that were actually removed, in graph order.
  pub fn remove_edges(&mut self, ids: &HashSet<String>) -> Vec<String> {
    let mut removed = Vec::new();
    self.edges.retain(|e| {
      let keep = !ids.contains(&e.id);
      if !keep {
        removed.push(e.id.clone());
      }
      keep
    });

    if !removed.is_empty() {
      debug!(count = removed.len(), "removed edges");
      self.observer.notify(GraphEvent::EdgesRemoved {
        edge_ids: removed.clone(),
      });
    }
    removed
  }

  /// Swap the entire graph in one step.
  pub fn replace_all(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) {
    self.nodes = nodes;
    self.edges = edges;
    debug!(
      nodes = self.nodes.len(),
      edges = self.edges.len(),
      "replaced graph"
    );
    self.observer.notify(GraphEvent::GraphReplaced {
      node_count: self.nodes.len(),
      edge_count: self.edges.len(),
    });
  }

  /// Edges whose source or target does not name an existing node.
  pub fn dangling_edges(&self) -> Vec<&Edge> {
    let node_ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
    self
      .edges
      .iter()
      .filter(|e| !node_ids.contains(e.source.as_str()) || !node_ids.contains(e.target.as_str()))
      .collect()
  }

  /// Build the topology view for traversal.
  pub fn topology(&self) -> Topology {
    Topology::new(&self.nodes, &self.edges)
  }
}

impl Default for GraphStore {
  fn default() -> Self {
    Self::new()
  }
}

impl std::fmt::Debug for GraphStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("GraphStore")
      .field("nodes", &self.nodes)
      .field("edges", &self.edges)
      .field("node_ids", &self.node_ids)
      .field("edge_ids", &self.edge_ids)
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::events::ChannelObserver;
  use tokio::sync::mpsc;

  fn fields(name: &str) -> TaskFields {
    TaskFields::new("task", name, "100&10", "")
  }

  fn ids(values: &[&str]) -> HashSet<String> {
    values.iter().map(|v| v.to_string()).collect()
  }

  #[test]
  fn test_add_node_sequential_ids() {
    let mut store = GraphStore::new();
    let issued: Vec<String> = (0..5)
      .map(|i| {
        store
          .add_node(Position::new(i as f64, 0.0), fields("a.sh"))
          .id
          .clone()
      })
      .collect();

    assert_eq!(issued, vec!["node_0", "node_1", "node_2", "node_3", "node_4"]);
    let order: Vec<&str> = store.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(order, vec!["node_0", "node_1", "node_2", "node_3", "node_4"]);
  }

  #[test]
  fn test_update_field_isolation() {
    let mut store = GraphStore::new();
    let a = store.add_node(Position::new(0.0, 0.0), fields("a.sh")).id.clone();
    let b = store.add_node(Position::new(1.0, 1.0), fields("b.sh")).id.clone();
    let before_a = store.node(&a).unwrap().clone();
    let before_b = store.node(&b).unwrap().clone();

    store.update_field(&a, FieldKey::TaskName, "x").unwrap();

    let after_a = store.node(&a).unwrap();
    assert_eq!(after_a.fields.task_name, "x");
    assert_eq!(after_a.fields.task_id, before_a.fields.task_id);
    assert_eq!(after_a.fields.resource_spec, before_a.fields.resource_spec);
    assert_eq!(after_a.fields.params, before_a.fields.params);
    assert_eq!(after_a.position, before_a.position);
    assert_eq!(store.node(&b).unwrap(), &before_b);
  }

  #[test]
  fn test_update_field_unknown_node() {
    let mut store = GraphStore::new();
    store.add_node(Position::default(), fields("a.sh"));

    let result = store.update_field("node_9", FieldKey::Params, "--x");
    assert_eq!(result, Err(GraphError::NodeNotFound("node_9".to_string())));
    assert_eq!(store.nodes()[0].fields.params, "");
  }

  #[test]
  fn test_connect_accepts_self_loops_and_duplicates() {
    let mut store = GraphStore::new();
    let a = store.add_node(Position::default(), fields("a.sh")).id.clone();

    let e0 = store.connect(&a, &a).id.clone();
    let e1 = store.connect(&a, &a).id.clone();
    let e2 = store.connect(&a, "node_404").id.clone();

    assert_eq!(e0, "edge_0");
    assert_eq!(e1, "edge_1");
    assert_eq!(e2, "edge_2");
    assert_eq!(store.edges().len(), 3);
    assert!(store.edge(&e0).unwrap().is_self_loop());
  }

  #[test]
  fn test_connect_with_appearance() {
    let mut store = GraphStore::new();
    let appearance = EdgeAppearance {
      style: Some(serde_json::json!({"stroke": "#0077cc"})),
      marker_end: Some(serde_json::json!({"type": "arrowclosed"})),
    };

    let edge = store.connect_with("node_0", "node_1", appearance);
    assert_eq!(edge.style.as_ref().unwrap()["stroke"], "#0077cc");
    assert_eq!(edge.marker_end.as_ref().unwrap()["type"], "arrowclosed");
  }

  #[test]
  fn test_remove_nodes_does_not_cascade() {
    let mut store = GraphStore::new();
    let a = store.add_node(Position::default(), fields("a.sh")).id.clone();
    let b = store.add_node(Position::default(), fields("b.sh")).id.clone();
    let e = store.connect(&a, &b).id.clone();

    let removed = store.remove_nodes(&ids(&[a.as_str(), "node_77"]));

    assert_eq!(removed, vec![a.clone()]);
    assert!(!store.contains_node(&a));
    assert!(store.edge(&e).is_some());
    let dangling: Vec<&str> = store.dangling_edges().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(dangling, vec![e.as_str()]);
  }

  #[test]
  fn test_remove_edges() {
    let mut store = GraphStore::new();
    let e0 = store.connect("node_0", "node_1").id.clone();
    let e1 = store.connect("node_1", "node_2").id.clone();

    let removed = store.remove_edges(&ids(&[e0.as_str()]));
    assert_eq!(removed, vec![e0]);
    assert_eq!(store.edges().len(), 1);
    assert_eq!(store.edges()[0].id, e1);
  }

  #[test]
  fn test_replace_all() {
    let mut store = GraphStore::new();
    store.add_node(Position::default(), fields("old.sh"));
    store.connect("node_0", "node_0");

    let nodes = vec![Node::task("start", Position::new(5.0, 5.0), fields("new.sh"))];
    store.replace_all(nodes.clone(), vec![]);

    assert_eq!(store.nodes(), nodes.as_slice());
    assert!(store.edges().is_empty());
    // Counters are left to the caller
    assert_eq!(store.node_ids().peek(), 1);
  }

  #[test]
  fn test_observer_receives_events() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut store = GraphStore::with_observer(Arc::new(ChannelObserver::new(tx)));

    let a = store.add_node(Position::default(), fields("a.sh")).id.clone();
    store.update_field(&a, FieldKey::Params, "-v").unwrap();
    let e = store.connect(&a, &a).id.clone();
    store.remove_edges(&ids(&[e.as_str()]));
    store.remove_nodes(&ids(&["missing"]));
    store.remove_nodes(&ids(&[a.as_str()]));

    let events: Vec<GraphEvent> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
    assert_eq!(
      events,
      vec![
        GraphEvent::NodeAdded {
          node_id: a.clone()
        },
        GraphEvent::FieldChanged {
          node_id: a.clone(),
          key: FieldKey::Params,
          value: "-v".to_string(),
        },
        GraphEvent::EdgeConnected {
          edge_id: e.clone(),
          source: a.clone(),
          target: a.clone(),
        },
        GraphEvent::EdgesRemoved { edge_ids: vec![e] },
        GraphEvent::NodesRemoved { node_ids: vec![a] },
      ]
    );
  }
}
