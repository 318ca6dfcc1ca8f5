use std::mem;

/// Header written in front of every program-break allocation.
pub struct Block {
  /// Usable bytes after the header.
  pub size: usize,
  pub is_free: bool,
  pub next: *mut Block,
}

impl Block {
  pub const HEADER: usize = crate::align!(mem::size_of::<Block>());

  /// Bytes taken from the program break for a block of `size` usable bytes.
  pub const fn span(size: usize) -> usize {
    crate::align!(Self::HEADER + size)
  }

  /// [`Block::span`] for sizes that may not fit in the address space.
  pub fn checked_span(size: usize) -> Option<usize> {
    let word = mem::size_of::<usize>();
    let total = Self::HEADER.checked_add(size)?.checked_add(word - 1)?;
    Some(total & !(word - 1))
  }

  /// Pointer handed out to callers for `block`.
  pub unsafe fn data(block: *mut Block) -> *mut u8 {
    unsafe { (block as *mut u8).add(Self::HEADER) }
  }

  /// Recovers the header from a pointer returned by [`Block::data`].
  pub unsafe fn from_data(data: *mut u8) -> *mut Block {
    unsafe { data.sub(Self::HEADER) as *mut Block }
  }

  /// One past the last byte this block occupies.
  pub unsafe fn end(block: *mut Block) -> *mut u8 {
    unsafe { (block as *mut u8).add(Self::span((*block).size)) }
  }
}
