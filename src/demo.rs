use std::alloc::GlobalAlloc;

use crate::{
  buffer::{FixedBuffer, HeapBuffer},
  config::{Config, HeapSource, Release},
  error::Result,
  heap::{BrkHeap, System},
  region::{Region, View},
};

pub const DATA_TEXT: [u8; 28] = *b"THIS IS ON THE DATA SEGMENT\0";
pub const STACK_TEXT: [u8; 21] = *b"THIS IS ON THE STACK\0";
pub const HEAP_TEXT: [u8; 20] = *b"THIS IS ON THE HEAP\0";

pub const HEAP_CAPACITY: usize = 20;

/// Initialised at load time, never written.
pub static DATA_SEGMENT: FixedBuffer<28> = FixedBuffer::new(DATA_TEXT);

/// The three buffers of one run, alive while it is inspected.
pub struct Frame<'a> {
  data: &'static FixedBuffer<28>,
  stack: &'a FixedBuffer<21>,
  heap: &'a [u8],
}

impl<'a> Frame<'a> {
  pub fn data(&self) -> View<'static> {
    View::new(Region::Data, self.data.as_bytes())
  }

  pub fn stack(&self) -> View<'a> {
    View::new(Region::Stack, self.stack.as_bytes())
  }

  pub fn heap(&self) -> View<'a> {
    View::new(Region::Heap, self.heap)
  }

  pub fn views(&self) -> [View<'a>; 3] {
    [self.data(), self.stack(), self.heap()]
  }
}

/// Builds the data, stack and heap buffers, hands them to `inspect`, and returns
/// what it returns.
///
/// The heap buffer is released on the way out unless `config.release` says to
/// leak it. Allocation failure is returned before anything is written.
pub fn run_with<A, F, R>(
  heap: &A,
  config: &Config,
  inspect: F,
) -> Result<R>
where
  A: GlobalAlloc,
  F: FnOnce(&Frame<'_>) -> R,
{
  let data = &DATA_SEGMENT;

  let stack = FixedBuffer::new(STACK_TEXT);

  let mut dynamic = HeapBuffer::allocate(heap, config.heap_capacity)?;
  for (index, &byte) in HEAP_TEXT.iter().enumerate() {
    dynamic.set(index, byte)?;
  }

  match config.release {
    Release::OnDrop => Ok(inspect(&Frame {
      data,
      stack: &stack,
      heap: dynamic.as_bytes(),
    })),
    Release::Leak => {
      log::warn!("leaking {} heap bytes at {:?}", dynamic.capacity(), dynamic.as_ptr());
      let leaked = dynamic.leak();

      Ok(inspect(&Frame {
        data,
        stack: &stack,
        heap: leaked,
      }))
    }
  }
}

/// Runs the demonstration against `heap`, logging each buffer at debug level.
pub fn run<A: GlobalAlloc>(
  heap: &A,
  config: &Config,
) -> Result<()> {
  run_with(heap, config, |frame| {
    for view in frame.views() {
      log::debug!("{}", view);
    }
  })
}

/// Runs the demonstration against the allocator `config` names.
pub fn run_configured(config: &Config) -> Result<()> {
  match config.heap {
    HeapSource::System => run(&System, config),
    HeapSource::ProgramBreak => run(&BrkHeap::new(), config),
  }
}

#[cfg(test)]
mod tests {
  use std::ffi::CStr;

  use super::*;
  use crate::{error::Error, heap::LimitedHeap};

  fn texts(frame: &Frame<'_>) -> Vec<(Region, String, usize)> {
    frame
      .views()
      .iter()
      .map(|view| {
        let text = view.text().map(|text| text.to_string_lossy().into_owned());
        (view.region, text.unwrap_or_default(), view.capacity())
      })
      .collect()
  }

  fn expected(
    region: Region,
    text: &str,
    capacity: usize,
  ) -> (Region, String, usize) {
    (region, text.to_owned(), capacity)
  }

  #[test]
  fn test_static_buffer_is_constant() {
    assert_eq!(DATA_SEGMENT.as_bytes(), b"THIS IS ON THE DATA SEGMENT\0");
    assert_eq!(DATA_SEGMENT.capacity(), 28);

    let first = run_with(&System, &Config::default(), |frame| frame.data().address()).unwrap();
    let second = run_with(&System, &Config::default(), |frame| frame.data().address()).unwrap();
    assert_eq!(first, second);
    assert_eq!(DATA_SEGMENT.as_bytes(), &DATA_TEXT);
  }

  #[test]
  fn test_run_fills_all_three_regions() {
    let found = run_with(&System, &Config::default(), texts).unwrap();

    assert_eq!(
      found,
      vec![
        expected(Region::Data, "THIS IS ON THE DATA SEGMENT", 28),
        expected(Region::Stack, "THIS IS ON THE STACK", 21),
        expected(Region::Heap, "THIS IS ON THE HEAP", 20),
      ]
    );
  }

  #[test]
  fn test_heap_bytes_end_with_terminator() {
    let bytes = run_with(&System, &Config::default(), |frame| frame.heap().bytes.to_vec()).unwrap();

    assert_eq!(bytes.len(), HEAP_CAPACITY);
    assert_eq!(bytes[19], 0);
    assert_eq!(&bytes[..19], b"THIS IS ON THE HEAP");
    assert!(bytes[..19].iter().all(|&b| b != 0));
  }

  #[test]
  fn test_larger_capacity_keeps_logical_string() {
    let config = Config {
      heap_capacity: 64,
      ..Config::default()
    };

    let (text, capacity) = run_with(&System, &config, |frame| {
      (frame.heap().text().map(CStr::to_owned), frame.heap().capacity())
    })
    .unwrap();

    assert_eq!(text.as_deref(), Some(c"THIS IS ON THE HEAP"));
    assert_eq!(capacity, 64);
  }

  #[test]
  fn test_undersized_capacity_overruns() {
    let config = Config {
      heap_capacity: 19,
      ..Config::default()
    };

    let result = run_with(&System, &config, |_| ());
    assert_eq!(result, Err(Error::Overrun { index: 19, capacity: 19 }));
  }

  #[test]
  fn test_exhausted_heap_fails_cleanly() {
    let heap = LimitedHeap::exhausted(System);
    let mut inspected = false;

    let result = run_with(&heap, &Config::default(), |_| inspected = true);

    assert_eq!(result, Err(Error::AllocationFailure { requested: 20 }));
    assert!(!inspected);
  }

  #[test]
  fn test_heap_buffer_released_on_every_path() {
    let heap = LimitedHeap::new(System, 20);

    run(&heap, &Config::default()).unwrap();
    assert_eq!(heap.remaining(), 20);

    let config = Config {
      heap_capacity: 10,
      ..Config::default()
    };
    assert!(run(&heap, &config).is_err());
    assert_eq!(heap.remaining(), 20);
  }

  #[test]
  fn test_leak_keeps_heap_buffer() {
    let heap = LimitedHeap::new(System, 20);
    let config = Config {
      release: Release::Leak,
      ..Config::default()
    };

    let text = run_with(&heap, &config, |frame| frame.heap().text().map(CStr::to_owned)).unwrap();

    assert_eq!(text.as_deref(), Some(c"THIS IS ON THE HEAP"));
    assert_eq!(heap.remaining(), 0);
  }

  #[test]
  fn test_program_break_heap() {
    let _guard = crate::brk::BREAK_LOCK
      .lock()
      .unwrap_or_else(|poisoned| poisoned.into_inner());
    let heap = BrkHeap::new();

    let found = run_with(&heap, &Config::default(), texts).unwrap();
    assert_eq!(found[2], expected(Region::Heap, "THIS IS ON THE HEAP", 20));

    let config = Config {
      heap: HeapSource::ProgramBreak,
      ..Config::default()
    };
    assert_eq!(run_configured(&config), Ok(()));
  }

  #[test]
  fn test_runs_are_repeatable() {
    let first = run_with(&System, &Config::default(), texts).unwrap();
    let second = run_with(&System, &Config::default(), texts).unwrap();

    assert_eq!(first, second);
  }
}
