/// Rounds `$value` up to the next multiple of the machine word size.
///
/// # Examples
///
/// ```rust
/// use std::mem;
/// use rsegments::align;
///
/// match mem::size_of::<usize>() {
///     8 => assert_eq!(align!(13), 16), // 64 bit machine.
///     4 => assert_eq!(align!(11), 12), // 32 bit machine.
///     _ => {},
/// };
/// ```
#[macro_export]
macro_rules! align {
  ($value:expr) => {
    $crate::align_to!($value, ::std::mem::size_of::<usize>())
  };
}

/// Rounds `$value` up to the next multiple of `$align`, which must be a power of two.
///
/// ```rust
/// use rsegments::align_to;
///
/// assert_eq!(align_to!(0x1001usize, 0x10), 0x1010);
/// assert_eq!(align_to!(0x1010usize, 0x10), 0x1010);
/// ```
#[macro_export]
macro_rules! align_to {
  ($value:expr, $align:expr) => {
    ($value + $align - 1) & !($align - 1)
  };
}
