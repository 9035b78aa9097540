//! Taskflow Document
//!
//! This crate contains the serializable document types for Taskflow. A flow
//! document is the portable snapshot of an editing session: the task nodes,
//! their canvas positions and field values, and the dependency edges between
//! them.
//!
//! Documents are exchanged as JSON (`flow.json`). They are plain values: no
//! per-node callbacks or session state ever appear in them. Converting to and
//! from the live graph is done by `taskflow-codec`.

mod document;
mod edge;
mod fields;
mod node;

pub use document::FlowDocument;
pub use edge::{DEFAULT_EDGE_TYPE, EdgeDef};
pub use fields::TaskFields;
pub use node::{CUSTOM_NODE_KIND, NodeDef, Position};
