use crate::demo::HEAP_CAPACITY;

/// Allocator the dynamic buffer is requested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeapSource {
  /// The process allocator (`malloc`).
  #[default]
  System,
  /// [`BrkHeap`](crate::BrkHeap), growing the program break directly.
  ProgramBreak,
}

/// What happens to the dynamic buffer when the routine returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Release {
  #[default]
  OnDrop,
  /// Keep the buffer alive until the process exits, as the classic C demo does.
  Leak,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  pub heap: HeapSource,
  pub heap_capacity: usize,
  pub release: Release,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      heap: HeapSource::default(),
      heap_capacity: HEAP_CAPACITY,
      release: Release::default(),
    }
  }
}
