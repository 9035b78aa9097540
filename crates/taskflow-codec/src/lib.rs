//! Taskflow Codec
//!
//! Converts between the live [`GraphStore`](taskflow_graph::GraphStore) and
//! the portable [`FlowDocument`](taskflow_document::FlowDocument).
//!
//! - [`export`] builds a document from the store. Edges with a missing
//!   endpoint are dropped here; this is the one place referential integrity
//!   is restored.
//! - [`import`] parses a document and swaps it into the store, reseeding the
//!   id allocators above every id it contains. A document that fails to
//!   parse leaves the store untouched.
//! - [`write_export`] and [`read_import`] do the same against `flow.json`
//!   files on disk.

mod error;
mod export;
mod file;
mod import;

pub use error::CodecError;
pub use export::{export, export_json};
pub use file::{EXPORT_FILE_NAME, read_import, write_export, write_export_to};
pub use import::{ImportSummary, decode, import, import_document};
