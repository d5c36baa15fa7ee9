//! Async transfer futures and `futures-io` trait implementations.
//!
//! # Example
//!
//! ```ignore
//! use chunkring::ChunkedByteQueue;
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), chunkring::QueueError> {
//!     let mut queue = ChunkedByteQueue::new();
//!     queue.read_from_async(reader, 64 * 1024).await?;
//!
//!     while queue.can_read_line() {
//!         let mut line = [0u8; 256];
//!         let n = queue.read_line(&mut line).unwrap_or(0);
//!         println!("line: {} bytes", n);
//!     }
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::io::{self, ErrorKind};
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_io::{AsyncBufRead, AsyncRead, AsyncWrite};
use log::debug;
use pin_project_lite::pin_project;

use crate::buffer::ChunkedByteQueue;
use crate::error::QueueError;

impl ChunkedByteQueue {
    /// Returns a future that fills the queue from `reader`.
    ///
    /// The async counterpart of [`read_from`](Self::read_from): it resolves
    /// once `max` bytes have arrived, the reader hits end of stream, or the
    /// reader would block after some progress was made.
    pub fn read_from_async<R: AsyncRead>(&mut self, reader: R, max: usize) -> ReadFrom<'_, R> {
        ReadFrom {
            queue: self,
            reader,
            max,
            total: 0,
        }
    }

    /// Returns a future that drains the queue into `writer`.
    ///
    /// The async counterpart of [`write_to`](Self::write_to). Resolves to the
    /// number of bytes written once the queue is empty.
    pub fn write_to_async<W: AsyncWrite>(&mut self, writer: W) -> WriteTo<'_, W> {
        WriteTo {
            queue: self,
            writer,
            total: 0,
        }
    }
}

pin_project! {
    /// Future returned by [`ChunkedByteQueue::read_from_async`].
    #[must_use = "futures do nothing unless polled"]
    pub struct ReadFrom<'a, R> {
        queue: &'a mut ChunkedByteQueue,
        #[pin]
        reader: R,
        max: usize,
        total: usize,
    }
}

impl<R: AsyncRead> Future for ReadFrom<'_, R> {
    type Output = Result<usize, QueueError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        while *this.total < *this.max {
            let want = (*this.max - *this.total).min(this.queue.chunk_size().max(1));
            let region = this.queue.reserve(want);
            match this.reader.as_mut().poll_read(cx, region) {
                Poll::Ready(Ok(0)) => {
                    this.queue.chop(want);
                    debug!("reader reached end of stream after {} bytes", this.total);
                    break;
                }
                Poll::Ready(Ok(n)) => {
                    this.queue.chop(want - n);
                    *this.total += n;
                }
                Poll::Ready(Err(e)) if e.kind() == ErrorKind::Interrupted => {
                    this.queue.chop(want);
                }
                Poll::Ready(Err(e)) => {
                    this.queue.chop(want);
                    return Poll::Ready(Err(e.into()));
                }
                Poll::Pending => {
                    this.queue.chop(want);
                    if *this.total > 0 {
                        break;
                    }
                    return Poll::Pending;
                }
            }
        }

        Poll::Ready(Ok(*this.total))
    }
}

pin_project! {
    /// Future returned by [`ChunkedByteQueue::write_to_async`].
    #[must_use = "futures do nothing unless polled"]
    pub struct WriteTo<'a, W> {
        queue: &'a mut ChunkedByteQueue,
        #[pin]
        writer: W,
        total: usize,
    }
}

impl<W: AsyncWrite> Future for WriteTo<'_, W> {
    type Output = Result<usize, QueueError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        while let Some(span) = this.queue.read_pointer() {
            match this.writer.as_mut().poll_write(cx, span) {
                Poll::Ready(Ok(0)) => {
                    return Poll::Ready(Err(io::Error::from(ErrorKind::WriteZero).into()));
                }
                Poll::Ready(Ok(n)) => {
                    this.queue.free(n);
                    *this.total += n;
                }
                Poll::Ready(Err(e)) if e.kind() == ErrorKind::Interrupted => {}
                Poll::Ready(Err(e)) => return Poll::Ready(Err(e.into())),
                Poll::Pending => return Poll::Pending,
            }
        }

        Poll::Ready(Ok(*this.total))
    }
}

impl AsyncRead for ChunkedByteQueue {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Ok(self.get_mut().read(buf)))
    }
}

impl AsyncBufRead for ChunkedByteQueue {
    fn poll_fill_buf(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<&[u8]>> {
        let this = self.get_mut();
        Poll::Ready(Ok(this.read_pointer().unwrap_or(&[])))
    }

    fn consume(self: Pin<&mut Self>, amt: usize) {
        self.get_mut().free(amt);
    }
}

impl AsyncWrite for ChunkedByteQueue {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.get_mut().append(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
