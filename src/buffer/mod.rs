//! The chunked byte queue and its `bytes` integration.
//!
//! - [`ChunkedByteQueue`] - Append at the tail, consume from the head
//! - [`Spans`] - Iterator over the live contiguous spans

mod buf;
mod chunk;
mod queue;

pub use queue::{ChunkedByteQueue, Spans};
