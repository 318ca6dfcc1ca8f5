use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  /// The allocator could not reserve the requested bytes.
  #[error("allocation of {requested} bytes failed")]
  AllocationFailure { requested: usize },

  #[error("refusing to allocate a zero-sized buffer")]
  EmptyRequest,

  #[error("write at index {index} overruns buffer of capacity {capacity}")]
  Overrun { index: usize, capacity: usize },
}
