//! Taskflow Editor
//!
//! A headless editing session for task pipelines. The rendering layer owns
//! the canvas; this crate owns everything with an invariant behind it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       EditorSession                         │
//! │  - Add Node / Export / Import actions                       │
//! │  - field, connect and selection callbacks                   │
//! │  - key events                                               │
//! └─────────────────────────────────────────────────────────────┘
//!          │                    │                     │
//!          ▼                    ▼                     ▼
//! ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────┐
//! │ SelectionTracker │ │DeletionCoordinat.│ │  taskflow-codec  │
//! │ - last reported  │ │ - Delete/Bksp    │ │ - export/import  │
//! │   selection      │ │ - focus gating   │ │ - flow.json      │
//! └──────────────────┘ └──────────────────┘ └──────────────────┘
//!                               │                     │
//!                               ▼                     ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  GraphStore (taskflow-graph)                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use taskflow_editor::{EditorConfig, EditorSession, Key, SelectionChange, Viewport};
//!
//! let mut session = EditorSession::new(EditorConfig::default())
//!   .with_focus(|| text_box_has_focus());
//!
//! let a = session.add_node(&Viewport::default()).id.clone();
//! let b = session.add_node(&Viewport::default()).id.clone();
//! session.connect(&a, &b);
//!
//! session.on_selection_change(SelectionChange::nodes([a]));
//! session.on_key(&Key::Delete);
//!
//! session.export_to(Path::new(".")).await?;
//! ```

mod config;
mod deletion;
mod error;
mod selection;
mod session;
mod viewport;

pub use config::EditorConfig;
pub use deletion::{DeleteOutcome, DeletionCoordinator, EditableFocus, Key};
pub use error::{ConfigError, EditorError};
pub use selection::{SelectionChange, SelectionTracker};
pub use session::{EditorSession, MAX_SPAWN_OFFSET};
pub use viewport::{Viewport, ViewportProjection};
