use std::{
  alloc::{GlobalAlloc, Layout},
  cell::Cell,
  ptr,
};

pub use std::alloc::System;

pub use crate::brk::{BrkHeap, program_break};

/// Allocator wrapper that refuses requests once a byte budget is spent.
///
/// Released memory is credited back to the budget.
pub struct LimitedHeap<A> {
  inner: A,
  remaining: Cell<usize>,
}

impl<A: GlobalAlloc> LimitedHeap<A> {
  pub const fn new(
    inner: A,
    budget: usize,
  ) -> Self {
    Self {
      inner,
      remaining: Cell::new(budget),
    }
  }

  /// A heap that fails every request.
  pub const fn exhausted(inner: A) -> Self {
    Self::new(inner, 0)
  }

  pub fn remaining(&self) -> usize {
    self.remaining.get()
  }

  fn reserve(
    &self,
    layout: Layout,
  ) -> bool {
    match self.remaining.get().checked_sub(layout.size()) {
      Some(left) => {
        self.remaining.set(left);
        true
      }
      None => false,
    }
  }

  fn credit(
    &self,
    layout: Layout,
  ) {
    self.remaining.set(self.remaining.get() + layout.size());
  }
}

unsafe impl<A: GlobalAlloc> GlobalAlloc for LimitedHeap<A> {
  unsafe fn alloc(
    &self,
    layout: Layout,
  ) -> *mut u8 {
    if !self.reserve(layout) {
      return ptr::null_mut();
    }

    let addr = unsafe { self.inner.alloc(layout) };
    if addr.is_null() {
      self.credit(layout);
    }
    addr
  }

  unsafe fn alloc_zeroed(
    &self,
    layout: Layout,
  ) -> *mut u8 {
    if !self.reserve(layout) {
      return ptr::null_mut();
    }

    let addr = unsafe { self.inner.alloc_zeroed(layout) };
    if addr.is_null() {
      self.credit(layout);
    }
    addr
  }

  unsafe fn dealloc(
    &self,
    addr: *mut u8,
    layout: Layout,
  ) {
    unsafe { self.inner.dealloc(addr, layout) };
    self.credit(layout);
  }
}
