use std::{
  alloc::{GlobalAlloc, Layout},
  cell::Cell,
  mem, ptr,
};

use libc::{c_void, intptr_t, sbrk};

use crate::{align, block::Block};

/// Current program break, as reported by `sbrk(0)`.
pub fn program_break() -> *mut u8 {
  unsafe { sbrk(0) as *mut u8 }
}

fn describe_alloc(
  layout: Layout,
  addr: *mut u8,
  brk: *mut u8,
) -> String {
  format!(
    "Allocated {} bytes, address = {:?}, program break = {:?}",
    layout.size(),
    addr,
    brk
  )
}

/// First-fit heap that grows the program break with `sbrk(2)`.
///
/// Blocks are kept in a singly linked list in address order. Freed blocks are
/// reused by later requests that fit; a freed tail block is handed back to the OS
/// as long as nothing else moved the break past it.
///
/// Not thread-safe: `sbrk` itself is not, and neither is the block list.
pub struct BrkHeap {
  first: Cell<*mut Block>,
  last: Cell<*mut Block>,
}

impl BrkHeap {
  pub const fn new() -> Self {
    Self {
      first: Cell::new(ptr::null_mut()),
      last: Cell::new(ptr::null_mut()),
    }
  }

  /// Number of blocks currently tracked, free or not.
  pub fn blocks(&self) -> usize {
    let mut count = 0;
    let mut current = self.first.get();

    while !current.is_null() {
      count += 1;
      current = unsafe { (*current).next };
    }

    count
  }

  unsafe fn find_free_block(
    &self,
    size: usize,
  ) -> *mut Block {
    unsafe {
      let mut current = self.first.get();

      while !current.is_null() {
        if (*current).is_free && (*current).size >= size {
          return current;
        }
        current = (*current).next;
      }

      ptr::null_mut()
    }
  }

  unsafe fn grow(
    &self,
    size: usize,
  ) -> *mut Block {
    unsafe {
      let brk = program_break() as usize;
      let padding = align!(brk) - brk;
      let increment = Block::checked_span(size)
        .and_then(|span| span.checked_add(padding))
        .and_then(|total| intptr_t::try_from(total).ok());

      let Some(increment) = increment else {
        return ptr::null_mut();
      };

      let address = sbrk(increment);

      if address == usize::MAX as *mut c_void {
        return ptr::null_mut();
      }

      let block = (address as *mut u8).add(padding) as *mut Block;
      block.write(Block {
        size,
        is_free: false,
        next: ptr::null_mut(),
      });

      let last = self.last.get();
      if last.is_null() {
        self.first.set(block);
      } else {
        (*last).next = block;
      }
      self.last.set(block);

      block
    }
  }

  /// Gives free tail blocks back to the OS while the break still ends at them.
  unsafe fn trim(&self) {
    unsafe {
      loop {
        let last = self.last.get();

        if last.is_null() || !(*last).is_free || Block::end(last) != program_break() {
          return;
        }

        let previous = self.predecessor(last);
        if previous.is_null() {
          self.first.set(ptr::null_mut());
        } else {
          (*previous).next = ptr::null_mut();
        }
        self.last.set(previous);

        let decrement = 0 - Block::span((*last).size) as intptr_t;
        sbrk(decrement);
      }
    }
  }

  unsafe fn predecessor(
    &self,
    block: *mut Block,
  ) -> *mut Block {
    unsafe {
      let mut current = self.first.get();

      if current == block {
        return ptr::null_mut();
      }

      while !current.is_null() && (*current).next != block {
        current = (*current).next;
      }

      current
    }
  }
}

impl Default for BrkHeap {
  fn default() -> Self {
    Self::new()
  }
}

unsafe impl GlobalAlloc for BrkHeap {
  unsafe fn alloc(
    &self,
    layout: Layout,
  ) -> *mut u8 {
    if layout.align() > mem::size_of::<usize>() {
      return ptr::null_mut();
    }

    unsafe {
      let mut block = self.find_free_block(layout.size());

      if block.is_null() {
        block = self.grow(layout.size());
        if block.is_null() {
          return ptr::null_mut();
        }
      } else {
        (*block).is_free = false;
      }

      let addr = Block::data(block);
      log::trace!("{}", describe_alloc(layout, addr, program_break()));
      addr
    }
  }

  unsafe fn dealloc(
    &self,
    addr: *mut u8,
    _layout: Layout,
  ) {
    if addr.is_null() {
      return;
    }

    unsafe {
      (*Block::from_data(addr)).is_free = true;
      self.trim();
    }
  }
}

/// Serialises tests that move the program break.
#[cfg(test)]
pub(crate) static BREAK_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
