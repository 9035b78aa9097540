//! Taskflow Graph
//!
//! This crate owns the live graph state of an editing session. It is the
//! authoritative store behind the canvas: every node and edge the user sees
//! lives in a [`GraphStore`], and every change goes through one of its
//! mutation operations.
//!
//! Key differences from `taskflow-document`:
//! - Node and edge ids are allocated here, by per-store [`IdAllocator`]s
//! - Field updates are resolved by node id at call time
//! - Edges may reference missing nodes; integrity is restored on export
//! - Changes are reported to a [`GraphObserver`]

mod edge;
mod error;
mod events;
mod id;
mod node;
mod store;
mod topology;

pub use edge::{Edge, EdgeAppearance, EdgeKind};
pub use error::GraphError;
pub use events::{ChannelObserver, GraphEvent, GraphObserver, NoopObserver};
pub use id::{EDGE_ID_PREFIX, IdAllocator, NODE_ID_PREFIX};
pub use node::{FieldKey, Node, NodeKind};
pub use store::GraphStore;
pub use topology::Topology;

pub use taskflow_document::{Position, TaskFields};
