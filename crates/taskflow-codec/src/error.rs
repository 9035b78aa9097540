use thiserror::Error;

/// Errors that can occur while exporting or importing a flow document.
#[derive(Debug, Error)]
pub enum CodecError {
  /// The document is not well-formed JSON or does not have the flow shape.
  #[error("malformed flow document: {0}")]
  Parse(#[source] serde_json::Error),

  /// Two nodes in the document share an id.
  #[error("duplicate node id: {node_id}")]
  DuplicateNodeId { node_id: String },

  /// Two edges in the document share an id.
  #[error("duplicate edge id: {edge_id}")]
  DuplicateEdgeId { edge_id: String },

  /// A node position is NaN or infinite, which JSON cannot represent.
  #[error("node {node_id} has a non-finite position ({x}, {y})")]
  NonFinitePosition { node_id: String, x: f64, y: f64 },

  /// The document could not be encoded.
  #[error("failed to encode flow document: {0}")]
  Encode(#[source] serde_json::Error),

  /// Reading or writing a document file failed.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

impl CodecError {
  /// Whether the error means the document itself is unusable.
  pub fn is_malformed(&self) -> bool {
    matches!(
      self,
      CodecError::Parse(_) | CodecError::DuplicateNodeId { .. } | CodecError::DuplicateEdgeId { .. }
    )
  }
}
