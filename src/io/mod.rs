//! Synchronous transport adapters.
//!
//! The queue implements [`std::io::Read`], [`std::io::Write`] and
//! [`std::io::BufRead`], and offers two loops for moving data between a
//! transport and the queue without intermediate copies:
//!
//! - [`ChunkedByteQueue::read_from`](crate::ChunkedByteQueue::read_from) - Reader into reserved tail space
//! - [`ChunkedByteQueue::write_to`](crate::ChunkedByteQueue::write_to) - Head spans out to a writer

mod transport;
