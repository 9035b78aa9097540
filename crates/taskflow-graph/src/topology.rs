use std::collections::{HashMap, HashSet, VecDeque};

use crate::edge::Edge;
use crate::node::Node;

/// Read-only adjacency view of a graph.
///
/// Dangling edges are left out; they are not part of the pipeline.
#[derive(Debug, Clone)]
pub struct Topology {
  /// Node ids in graph order.
  order: Vec<String>,
  /// Adjacency list: node_id -> list of downstream node_ids.
  adjacency: HashMap<String, Vec<String>>,
  /// Reverse adjacency: node_id -> list of upstream node_ids.
  reverse_adjacency: HashMap<String, Vec<String>>,
  /// Nodes with no incoming edges.
  entry_points: Vec<String>,
  /// Nodes with multiple incoming edges (join points).
  join_points: HashSet<String>,
}

impl Topology {
  /// Build a topology from nodes and edges.
  pub fn new(nodes: &[Node], edges: &[Edge]) -> Self {
    let mut adjacency: HashMap<String, Vec<String>> = HashMap::new();
    let mut reverse_adjacency: HashMap<String, Vec<String>> = HashMap::new();

    // Initialize all nodes
    for node in nodes {
      adjacency.entry(node.id.clone()).or_default();
      reverse_adjacency.entry(node.id.clone()).or_default();
    }

    // Build adjacency lists, skipping edges with a missing endpoint
    for edge in edges {
      if !adjacency.contains_key(&edge.source) || !adjacency.contains_key(&edge.target) {
        continue;
      }
      adjacency
        .entry(edge.source.clone())
        .or_default()
        .push(edge.target.clone());
      reverse_adjacency
        .entry(edge.target.clone())
        .or_default()
        .push(edge.source.clone());
    }

    let order: Vec<String> = nodes.iter().map(|n| n.id.clone()).collect();

    // Find entry points (no incoming edges)
    let entry_points: Vec<String> = order
      .iter()
      .filter(|id| reverse_adjacency.get(*id).is_none_or(|v| v.is_empty()))
      .cloned()
      .collect();

    // Find join points (multiple incoming edges)
    let join_points: HashSet<String> = reverse_adjacency
      .iter()
      .filter(|(_, incoming)| incoming.len() > 1)
      .map(|(id, _)| id.clone())
      .collect();

    Self {
      order,
      adjacency,
      reverse_adjacency,
      entry_points,
      join_points,
    }
  }

  /// Get entry points (nodes with no incoming edges).
  pub fn entry_points(&self) -> &[String] {
    &self.entry_points
  }

  /// Get downstream nodes for a given node.
  pub fn downstream(&self, node_id: &str) -> &[String] {
    self
      .adjacency
      .get(node_id)
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  /// Get upstream nodes for a given node.
  pub fn upstream(&self, node_id: &str) -> &[String] {
    self
      .reverse_adjacency
      .get(node_id)
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  /// Check if a node is a join point (has multiple incoming edges).
  pub fn is_join_point(&self, node_id: &str) -> bool {
    self.join_points.contains(node_id)
  }

  /// Get all join points.
  pub fn join_points(&self) -> &HashSet<String> {
    &self.join_points
  }

  /// Order nodes so every edge points forward, or `None` if the graph has a cycle.
  ///
  /// Ties are broken by graph order.
  pub fn topological_order(&self) -> Option<Vec<String>> {
    let mut in_degree: HashMap<&str, usize> = self
      .order
      .iter()
      .map(|id| (id.as_str(), self.upstream(id).len()))
      .collect();

    let mut ready: VecDeque<&str> = self
      .order
      .iter()
      .map(|id| id.as_str())
      .filter(|id| in_degree.get(id) == Some(&0))
      .collect();

    let mut sorted = Vec::with_capacity(self.order.len());
    while let Some(id) = ready.pop_front() {
      sorted.push(id.to_string());
      for next in self.downstream(id) {
        if let Some(degree) = in_degree.get_mut(next.as_str()) {
          *degree -= 1;
          if *degree == 0 {
            ready.push_back(next.as_str());
          }
        }
      }
    }

    (sorted.len() == self.order.len()).then_some(sorted)
  }

  pub fn has_cycle(&self) -> bool {
    self.topological_order().is_none()
  }
}
