//! chunkring
//!
//! A chunked append/consume byte queue for streaming I/O.
//!
//! `chunkring` stages bytes between a producer and a consumer that work at
//! different rates and in different unit sizes. It is designed as a small,
//! composable primitive for:
//!
//! - socket and file read/write paths
//! - line-oriented protocol readers
//! - push-back parsers that need to unget a few bytes
//!
//! The crate intentionally:
//! - does NOT perform any I/O on its own
//! - does NOT decode characters
//! - does NOT frame or parse messages
//! - does NOT synchronize access
//!
//! It only does one thing: **bytes in at the tail → bytes out at the head**,
//! across a list of chunks so that growth never reallocates one big buffer.
//!
//! # Sync
//!
//! ```
//! use chunkring::ChunkedByteQueue;
//!
//! let mut queue = ChunkedByteQueue::with_chunk_size(8);
//! queue.append(b"GET / HTTP/1.1\r\n");
//! queue.append(b"Host: example\r\n");
//!
//! while queue.can_read_line() {
//!     let mut line = [0u8; 64];
//!     let n = queue.read_line(&mut line).unwrap_or(0);
//!     println!("{:?}", std::str::from_utf8(&line[..n]));
//! }
//! assert!(queue.is_empty());
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use chunkring::ChunkedByteQueue;
//! use futures_io::{AsyncRead, AsyncWrite};
//!
//! async fn pump<R, W>(reader: R, writer: W) -> Result<(), chunkring::QueueError>
//! where
//!     R: AsyncRead + Unpin,
//!     W: AsyncWrite + Unpin,
//! {
//!     let mut queue = ChunkedByteQueue::new();
//!     queue.read_from_async(reader, usize::MAX).await?;
//!     queue.write_to_async(writer).await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod config;
mod error;

mod io; // internal std::io adapters

#[cfg(feature = "async-io")]
mod async_io;

//
// Public surface (intentionally tiny)
//

pub use buffer::{ChunkedByteQueue, Spans};
pub use config::{DEFAULT_CHUNK_SIZE, MAX_ALLOC_SIZE, QueueConfig};
pub use error::QueueError;

#[cfg(feature = "async-io")]
pub use async_io::{ReadFrom, WriteTo};
