use std::{
  alloc::{GlobalAlloc, Layout},
  mem,
  ptr::NonNull,
  slice,
};

use crate::error::{Error, Result};

/// Fixed-size, terminated character buffer.
///
/// Lives wherever its owner puts it: a `static` for the data segment, a local
/// binding for the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedBuffer<const N: usize> {
  bytes: [u8; N],
}

impl<const N: usize> FixedBuffer<N> {
  /// Panics (at compile time in const context) unless the last byte is the terminator.
  pub const fn new(bytes: [u8; N]) -> Self {
    assert!(N > 0 && bytes[N - 1] == 0, "buffer must end with a terminator");
    Self { bytes }
  }

  pub const fn as_bytes(&self) -> &[u8] {
    &self.bytes
  }

  pub const fn capacity(&self) -> usize {
    N
  }
}

/// Exclusively owned buffer obtained from an allocator.
///
/// The memory goes back to the allocator it came from when the handle is
/// dropped, on every exit path. [`HeapBuffer::leak`] opts out.
pub struct HeapBuffer<'h, A: GlobalAlloc> {
  heap: &'h A,
  addr: NonNull<u8>,
  layout: Layout,
}

impl<'h, A: GlobalAlloc> HeapBuffer<'h, A> {
  /// Requests `capacity` zero-filled bytes from `heap`.
  ///
  /// A null answer from the allocator becomes [`Error::AllocationFailure`]; nothing
  /// is written in that case.
  pub fn allocate(
    heap: &'h A,
    capacity: usize,
  ) -> Result<Self> {
    if capacity == 0 {
      return Err(Error::EmptyRequest);
    }

    let failure = Error::AllocationFailure { requested: capacity };
    let layout = Layout::array::<u8>(capacity).map_err(|_| failure.clone())?;
    let addr = unsafe { heap.alloc_zeroed(layout) };

    match NonNull::new(addr) {
      Some(addr) => Ok(Self { heap, addr, layout }),
      None => Err(failure),
    }
  }

  /// Writes one character.
  pub fn set(
    &mut self,
    index: usize,
    byte: u8,
  ) -> Result<()> {
    if index >= self.capacity() {
      return Err(Error::Overrun {
        index,
        capacity: self.capacity(),
      });
    }

    unsafe { self.addr.as_ptr().add(index).write(byte) };
    Ok(())
  }

  pub fn as_bytes(&self) -> &[u8] {
    unsafe { slice::from_raw_parts(self.addr.as_ptr(), self.capacity()) }
  }

  pub fn as_ptr(&self) -> *const u8 {
    self.addr.as_ptr()
  }

  pub fn capacity(&self) -> usize {
    self.layout.size()
  }

  /// Gives up ownership without releasing the memory.
  pub fn leak(self) -> &'h mut [u8] {
    let this = mem::ManuallyDrop::new(self);
    unsafe { slice::from_raw_parts_mut(this.addr.as_ptr(), this.capacity()) }
  }
}

impl<A: GlobalAlloc> Drop for HeapBuffer<'_, A> {
  fn drop(&mut self) {
    unsafe { self.heap.dealloc(self.addr.as_ptr(), self.layout) };
  }
}
