//! Graph change events and observers.
//!
//! The store emits an event after every mutation so a rendering layer can
//! mirror the graph without polling. Observers decide what to do with them
//! (redraw, persist, log, ignore).

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::node::FieldKey;

/// Events emitted while editing a graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GraphEvent {
  /// A node was appended.
  NodeAdded { node_id: String },

  /// One field of one node was replaced.
  FieldChanged {
    node_id: String,
    key: FieldKey,
    value: String,
  },

  /// An edge was appended.
  EdgeConnected {
    edge_id: String,
    source: String,
    target: String,
  },

  /// Nodes were removed. Only ids that were actually present are listed.
  NodesRemoved { node_ids: Vec<String> },

  /// Edges were removed. Only ids that were actually present are listed.
  EdgesRemoved { edge_ids: Vec<String> },

  /// The current selection was replaced.
  SelectionChanged {
    node_ids: Vec<String>,
    edge_ids: Vec<String>,
  },

  /// The whole graph was swapped out, e.g. by an import.
  GraphReplaced { node_count: usize, edge_count: usize },
}

/// Trait for receiving graph events.
pub trait GraphObserver: Send + Sync {
  /// Called after each change.
  fn notify(&self, event: GraphEvent);
}

/// An observer that discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopObserver;

impl GraphObserver for NoopObserver {
  fn notify(&self, _event: GraphEvent) {}
}

/// An observer that forwards events to an unbounded channel.
///
/// Use this when a front end consumes events on its own task.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
  // Unbounded so a slow consumer never stalls an edit. One event per user
  // action keeps the volume low.
  sender: mpsc::UnboundedSender<GraphEvent>,
}

impl ChannelObserver {
  pub fn new(sender: mpsc::UnboundedSender<GraphEvent>) -> Self {
    Self { sender }
  }
}

impl GraphObserver for ChannelObserver {
  fn notify(&self, event: GraphEvent) {
    // Receiver may have been dropped
    let _ = self.sender.send(event);
  }
}
