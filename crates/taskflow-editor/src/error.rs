use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by editor actions.
#[derive(Debug, Error)]
pub enum EditorError {
  #[error(transparent)]
  Graph(#[from] taskflow_graph::GraphError),

  #[error(transparent)]
  Codec(#[from] taskflow_codec::CodecError),
}

/// Errors raised while loading an [`EditorConfig`](crate::EditorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config file {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid config file {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}
