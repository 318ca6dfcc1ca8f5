//! # rsegments - Data, Stack and Heap Buffers Side by Side
//!
//! This crate materialises the same kind of value, a terminated character
//! buffer, in the three places a process keeps memory:
//!
//! ```text
//!   High Address ┌─────────────────────┐
//!                │       Stack         │ ← "THIS IS ON THE STACK"
//!                │         │           │   (frame of the routine)
//!                │         ▼           │
//!                │                     │
//!                │         ▲           │
//!                │         │           │
//!                │       Heap          │ ← "THIS IS ON THE HEAP"
//!                ├─────────────────────┤   (malloc or sbrk)
//!                │   Uninitialized     │
//!                │       Data          │
//!                ├─────────────────────┤
//!                │   Initialized       │ ← "THIS IS ON THE DATA SEGMENT"
//!                │       Data          │   (static, fixed at load)
//!                ├─────────────────────┤
//!                │       Text          │
//!   Low Address  └─────────────────────┘
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//!   rsegments
//!   ├── align      - Alignment macros (align!, align_to!)
//!   ├── block      - Program-break block header (internal)
//!   ├── brk        - BrkHeap, an sbrk-backed first-fit heap
//!   ├── buffer     - FixedBuffer and the owning HeapBuffer handle
//!   ├── config     - Config, HeapSource, Release
//!   ├── demo       - The demonstration routine and its Frame
//!   ├── error      - Error and Result
//!   ├── heap       - LimitedHeap and allocator re-exports
//!   └── region     - Region and View for inspecting buffers
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rsegments::{Config, System, run_with};
//!
//! let heap_text = run_with(&System, &Config::default(), |frame| {
//!   frame.heap().text().map(|text| text.to_owned())
//! })
//! .unwrap();
//!
//! assert_eq!(heap_text.as_deref(), Some(c"THIS IS ON THE HEAP"));
//! ```
//!
//! ## Heap Ownership
//!
//! The heap buffer is a [`HeapBuffer`], which owns its allocation and hands it
//! back to the allocator on drop:
//!
//! ```text
//!   allocate ──► null? ──yes──► Error::AllocationFailure (nothing written)
//!                  │
//!                  no
//!                  ▼
//!             set(0..=19) ──► inspect ──► drop ──► dealloc
//!                  │
//!                  └── index >= capacity ──► Error::Overrun ──► drop ──► dealloc
//! ```
//!
//! [`Release::Leak`] reproduces the classic C version, which never frees it.
//!
//! ## Safety
//!
//! [`BrkHeap`] moves the program break directly and is not thread-safe. Everything
//! else is safe to use from safe code.

pub mod align;
mod block;
mod brk;
mod buffer;
mod config;
mod demo;
mod error;
mod heap;
mod region;

pub use buffer::{FixedBuffer, HeapBuffer};
pub use config::{Config, HeapSource, Release};
pub use demo::{
  DATA_SEGMENT, DATA_TEXT, Frame, HEAP_CAPACITY, HEAP_TEXT, STACK_TEXT, run, run_configured, run_with,
};
pub use error::{Error, Result};
pub use heap::{BrkHeap, LimitedHeap, System, program_break};
pub use region::{Region, View};
