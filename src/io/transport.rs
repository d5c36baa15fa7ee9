//! `std::io` implementations and transfer loops.

use std::io::{self, BufRead, ErrorKind, Read, Write};

use log::debug;

use crate::buffer::ChunkedByteQueue;
use crate::error::QueueError;

impl ChunkedByteQueue {
    /// Reads from `reader` straight into the tail until `max` bytes have
    /// arrived or the reader reports end of stream.
    ///
    /// Each read targets one reservation of at most
    /// [`chunk_size`](Self::chunk_size) bytes; whatever the reader leaves
    /// unfilled is chopped off again. `Interrupted` is retried. A
    /// `WouldBlock` after some progress ends the loop with what was read.
    ///
    /// # Example
    ///
    /// ```
    /// use chunkring::ChunkedByteQueue;
    ///
    /// let mut queue = ChunkedByteQueue::with_chunk_size(4);
    /// let n = queue.read_from(&mut &b"streamed input"[..], usize::MAX)?;
    /// assert_eq!(n, 14);
    /// assert_eq!(&queue.read_all()[..], b"streamed input");
    /// # Ok::<(), chunkring::QueueError>(())
    /// ```
    pub fn read_from<R: Read + ?Sized>(
        &mut self,
        reader: &mut R,
        max: usize,
    ) -> Result<usize, QueueError> {
        let mut total = 0;
        while total < max {
            let want = (max - total).min(self.chunk_size().max(1));
            let region = self.reserve(want);
            match reader.read(region) {
                Ok(0) => {
                    self.chop(want);
                    debug!("reader reached end of stream after {} bytes", total);
                    break;
                }
                Ok(n) => {
                    self.chop(want - n);
                    total += n;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => self.chop(want),
                Err(e) if e.kind() == ErrorKind::WouldBlock && total > 0 => {
                    self.chop(want);
                    break;
                }
                Err(e) => {
                    self.chop(want);
                    return Err(e.into());
                }
            }
        }
        Ok(total)
    }

    /// Writes the queued bytes to `writer`, one contiguous span per call,
    /// consuming whatever the writer accepts.
    ///
    /// Returns the number of bytes written. A writer that accepts zero bytes
    /// fails with `WriteZero`. A `WouldBlock` after some progress returns
    /// early with the count so far.
    pub fn write_to<W: Write + ?Sized>(&mut self, writer: &mut W) -> Result<usize, QueueError> {
        let mut total = 0;
        while let Some(span) = self.read_pointer() {
            match writer.write(span) {
                Ok(0) => return Err(io::Error::from(ErrorKind::WriteZero).into()),
                Ok(n) => {
                    self.free(n);
                    total += n;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) if e.kind() == ErrorKind::WouldBlock && total > 0 => break,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(total)
    }
}

impl Read for ChunkedByteQueue {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(ChunkedByteQueue::read(self, buf))
    }
}

impl BufRead for ChunkedByteQueue {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(self.read_pointer().unwrap_or(&[]))
    }

    fn consume(&mut self, amt: usize) {
        self.free(amt);
    }
}

impl Write for ChunkedByteQueue {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf);
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.append(buf);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out at most `step` bytes per read, failing once in between.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
        fail_next: Option<ErrorKind>,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if let Some(kind) = self.fail_next.take() {
                return Err(kind.into());
            }
            let n = self.data.len().min(self.step).min(buf.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    /// Accepts at most `limit` bytes per write.
    struct Narrow {
        out: Vec<u8>,
        limit: usize,
    }

    impl Write for Narrow {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = buf.len().min(self.limit);
            self.out.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_read_from_partial_reads() {
        let mut queue = ChunkedByteQueue::with_chunk_size(8);
        let mut reader = Trickle {
            data: b"0123456789abcdef",
            step: 3,
            fail_next: Some(ErrorKind::Interrupted),
        };
        assert_eq!(queue.read_from(&mut reader, usize::MAX).unwrap(), 16);
        assert_eq!(&queue.read_all()[..], b"0123456789abcdef");
    }

    #[test]
    fn test_read_from_respects_max() {
        let mut queue = ChunkedByteQueue::with_chunk_size(4);
        let mut reader = &b"0123456789"[..];
        assert_eq!(queue.read_from(&mut reader, 6).unwrap(), 6);
        assert_eq!(queue.len(), 6);
        assert_eq!(reader, b"6789");
    }

    #[test]
    fn test_read_from_error_leaves_queue_intact() {
        let mut queue = ChunkedByteQueue::with_chunk_size(4);
        queue.append(b"kept");
        let mut reader = Trickle {
            data: b"",
            step: 1,
            fail_next: Some(ErrorKind::ConnectionReset),
        };
        let err = queue.read_from(&mut reader, 10).unwrap_err();
        assert!(matches!(err, QueueError::Io(ref e) if e.kind() == ErrorKind::ConnectionReset));
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.chunk_count(), 1);
    }

    #[test]
    fn test_read_from_eof_on_empty_queue() {
        let mut queue = ChunkedByteQueue::new();
        assert_eq!(queue.read_from(&mut io::empty(), 100).unwrap(), 0);
        assert!(queue.is_empty());
        assert_eq!(queue.chunk_count(), 0);
    }

    #[test]
    fn test_write_to_loops_over_spans() {
        let mut queue = ChunkedByteQueue::with_chunk_size(4);
        queue.append(b"abcd");
        queue.append(b"efgh");
        queue.append(b"ij");
        let mut writer = Narrow {
            out: Vec::new(),
            limit: 3,
        };
        assert_eq!(queue.write_to(&mut writer).unwrap(), 10);
        assert_eq!(writer.out, b"abcdefghij");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_write_to_write_zero() {
        let mut queue = ChunkedByteQueue::new();
        queue.append(b"stuck");
        let mut writer = Narrow {
            out: Vec::new(),
            limit: 0,
        };
        let err = queue.write_to(&mut writer).unwrap_err();
        assert!(matches!(err, QueueError::Io(ref e) if e.kind() == ErrorKind::WriteZero));
        assert_eq!(queue.len(), 5);
    }

    #[test]
    fn test_std_traits() {
        let mut queue = ChunkedByteQueue::with_chunk_size(4);
        write!(queue, "line {}\nrest", 1).unwrap();

        let mut line = String::new();
        BufRead::read_line(&mut queue, &mut line).unwrap();
        assert_eq!(line, "line 1\n");

        let mut rest = Vec::new();
        Read::read_to_end(&mut queue, &mut rest).unwrap();
        assert_eq!(rest, b"rest");
    }
}
