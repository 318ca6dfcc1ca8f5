use std::{ffi::CStr, fmt};

/// Storage class a buffer lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
  Data,
  Stack,
  Heap,
}

impl fmt::Display for Region {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    f.write_str(match self {
      Region::Data => "data",
      Region::Stack => "stack",
      Region::Heap => "heap",
    })
  }
}

/// Read-only window onto a buffer, tagged with the region it lives in.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
  pub region: Region,
  pub bytes: &'a [u8],
}

impl<'a> View<'a> {
  pub fn new(
    region: Region,
    bytes: &'a [u8],
  ) -> Self {
    Self { region, bytes }
  }

  /// Logical string: everything before the first terminator.
  pub fn text(&self) -> Option<&'a CStr> {
    CStr::from_bytes_until_nul(self.bytes).ok()
  }

  pub fn address(&self) -> *const u8 {
    self.bytes.as_ptr()
  }

  pub fn capacity(&self) -> usize {
    self.bytes.len()
  }
}

impl fmt::Display for View<'_> {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(f, "[{}] {:?} ({} bytes): ", self.region, self.address(), self.capacity())?;
    match self.text() {
      Some(text) => write!(f, "{:?}", text),
      None => f.write_str("<unterminated>"),
    }
  }
}
