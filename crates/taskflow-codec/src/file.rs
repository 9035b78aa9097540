use std::path::{Path, PathBuf};

use taskflow_graph::GraphStore;
use tracing::info;

use crate::error::CodecError;
use crate::export::export_json;
use crate::import::{ImportSummary, import};

/// File name used for exported documents.
pub const EXPORT_FILE_NAME: &str = "flow.json";

/// Export the graph to `<dir>/flow.json`, returning the written path.
pub async fn write_export(store: &GraphStore, dir: &Path) -> Result<PathBuf, CodecError> {
  let path = dir.join(EXPORT_FILE_NAME);
  write_export_to(store, &path).await?;
  Ok(path)
}

/// Export the graph to an explicit path.
pub async fn write_export_to(store: &GraphStore, path: &Path) -> Result<(), CodecError> {
  // Encode before touching the file so a failure leaves it intact
  let json = export_json(store)?;
  tokio::fs::write(path, json).await?;
  info!(path = %path.display(), "exported flow document");
  Ok(())
}

/// Read a document file and import it into the store.
///
/// The store is only touched once the whole file has been read and parsed.
pub async fn read_import(store: &mut GraphStore, path: &Path) -> Result<ImportSummary, CodecError> {
  let text = tokio::fs::read_to_string(path).await?;
  import(store, &text)
}
