//! Async transport support.
//!
//! This module provides asynchronous adapters using the `futures-io` traits,
//! making it runtime-agnostic and compatible with tokio (through
//! `tokio-util`'s compat layer), async-std, smol, and other async runtimes.
//!
//! - [`ReadFrom`] - Future filling a queue from an async reader
//! - [`WriteTo`] - Future draining a queue into an async writer
//!
//! The queue itself also implements `AsyncRead`, `AsyncBufRead` and
//! `AsyncWrite`; those never return `Pending`.
//!
//! This module requires the `async-io` feature to be enabled.

mod transfer;

pub use transfer::{ReadFrom, WriteTo};
