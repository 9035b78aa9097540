use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
  #[error("node not found: {0}")]
  NodeNotFound(String),

  #[error("unknown task field: {0}")]
  UnknownField(String),
}
