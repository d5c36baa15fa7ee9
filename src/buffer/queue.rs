//! The chunked byte queue.
//!
//! Bytes live in a deque of independently allocated chunks. Only the first
//! chunk has a consumed prefix (`..head`) and only the last chunk has unused
//! room (`tail..`); every chunk in between is live end to end. Chunks are
//! dropped as soon as either end drains them, so a long-running stream never
//! pays for one big contiguous reallocation.
//!
//! # Example
//!
//! ```
//! use chunkring::ChunkedByteQueue;
//!
//! let mut queue = ChunkedByteQueue::with_chunk_size(4);
//! queue.append(b"hello\nworld");
//!
//! assert_eq!(queue.len(), 11);
//! assert_eq!(queue.index_of(b'\n'), Some(5));
//!
//! let mut line = [0u8; 32];
//! let n = queue.read_line(&mut line).unwrap();
//! assert_eq!(&line[..n], b"hello\n");
//! assert_eq!(&queue.read_all()[..], b"world");
//! ```

use std::collections::VecDeque;

use bytes::Bytes;
use log::trace;

use super::chunk::{alloc_chunk, check_request};
use crate::config::{MAX_ALLOC_SIZE, QueueConfig};

/// A byte queue built from a list of chunks.
///
/// Writes go to the tail ([`reserve`](Self::reserve), [`append`](Self::append)),
/// reads come from the head ([`read`](Self::read), [`free`](Self::free)), and
/// [`peek_at`](Self::peek_at) / [`index_of_in`](Self::index_of_in) look at any
/// offset without consuming anything.
///
/// The queue is not synchronized. Read views borrow the queue, so they cannot
/// outlive the next mutation.
#[derive(Debug, Clone)]
pub struct ChunkedByteQueue {
    chunks: VecDeque<Vec<u8>>,
    /// Offset of the first live byte in `chunks[0]`.
    head: usize,
    /// One past the last live byte in `chunks[tail_chunk]`.
    tail: usize,
    /// Always `chunks.len() - 1`, or 0 when empty.
    tail_chunk: usize,
    chunk_size: usize,
    len: usize,
}

impl ChunkedByteQueue {
    /// Creates an empty queue with the default chunk size.
    pub fn new() -> Self {
        Self::with_config(QueueConfig::default())
    }

    /// Creates an empty queue that grows in `chunk_size` steps.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunks: VecDeque::new(),
            head: 0,
            tail: 0,
            tail_chunk: 0,
            chunk_size,
            len: 0,
        }
    }

    /// Creates an empty queue from a configuration.
    pub fn with_config(config: QueueConfig) -> Self {
        Self::with_chunk_size(config.chunk_size())
    }

    /// Returns the growth size used for new chunks.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Sets the growth size used for new chunks.
    ///
    /// Existing chunks are left as they are.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size;
    }

    /// Returns the number of bytes stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the queue holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of chunks currently allocated.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Returns how many bytes [`read_pointer`](Self::read_pointer) exposes,
    /// i.e. the live remainder of the head chunk.
    ///
    /// Callers moving more than this must loop, re-querying after each
    /// [`free`](Self::free).
    pub fn next_contiguous_span(&self) -> usize {
        let end = if self.tail_chunk == 0 {
            self.tail
        } else {
            self.chunks[0].len()
        };
        end - self.head
    }

    /// Returns the head span, or `None` if the queue is empty.
    pub fn read_pointer(&self) -> Option<&[u8]> {
        if self.len == 0 {
            return None;
        }
        let end = self.head + self.next_contiguous_span();
        Some(&self.chunks[0][self.head..end])
    }

    /// Returns the bytes from logical offset `pos` up to the end of the chunk
    /// holding it.
    ///
    /// Returns `None` if `pos >= len()`.
    ///
    /// # Example
    ///
    /// ```
    /// use chunkring::ChunkedByteQueue;
    ///
    /// let mut queue = ChunkedByteQueue::with_chunk_size(4);
    /// queue.append(b"abcd");
    /// queue.append(b"efgh");
    ///
    /// assert_eq!(queue.read_pointer_at(2), Some(&b"cd"[..]));
    /// assert_eq!(queue.read_pointer_at(5), Some(&b"fgh"[..]));
    /// assert_eq!(queue.read_pointer_at(8), None);
    /// ```
    pub fn read_pointer_at(&self, pos: usize) -> Option<&[u8]> {
        let (index, offset) = self.locate(pos)?;
        Some(&self.chunks[index][offset..self.span_end(index)])
    }

    /// Returns an iterator over the live spans, head first.
    pub fn spans(&self) -> Spans<'_> {
        Spans {
            queue: self,
            index: 0,
            start: self.head,
        }
    }

    /// Live spans starting at logical offset `pos`.
    fn spans_from(&self, pos: usize) -> Spans<'_> {
        match self.locate(pos) {
            Some((index, start)) => Spans {
                queue: self,
                index,
                start,
            },
            None => Spans {
                queue: self,
                index: self.chunks.len(),
                start: 0,
            },
        }
    }

    /// Maps a logical offset to `(chunk index, offset within chunk)`.
    fn locate(&self, pos: usize) -> Option<(usize, usize)> {
        if pos >= self.len {
            return None;
        }
        let mut pos = pos + self.head;
        for index in 0..self.chunks.len() {
            let end = self.span_end(index);
            if pos < end {
                return Some((index, pos));
            }
            pos -= end;
        }
        None
    }

    fn span_end(&self, index: usize) -> usize {
        if index == self.tail_chunk {
            self.tail
        } else {
            self.chunks[index].len()
        }
    }

    /// Grows the queue by `bytes` at the tail and returns the new region.
    ///
    /// The region is always contiguous. If the tail chunk lacks room, a new
    /// chunk of at least [`chunk_size`](Self::chunk_size) bytes is appended
    /// and the region starts there. The contents of the region are
    /// unspecified until written.
    ///
    /// # Panics
    ///
    /// Panics if `bytes >= MAX_ALLOC_SIZE`.
    pub fn reserve(&mut self, bytes: usize) -> &mut [u8] {
        check_request(bytes);
        if bytes == 0 {
            return &mut [];
        }

        if self.len == 0 {
            self.chunks.clear();
            self.chunks.push_back(alloc_chunk(self.chunk_size, bytes));
            self.head = 0;
            self.tail = 0;
            self.tail_chunk = 0;
        } else {
            let needed = self.tail + bytes;
            let chunk_size = self.chunk_size;
            let last = &mut self.chunks[self.tail_chunk];
            if needed > last.len() {
                if needed > last.capacity() && (self.tail >= chunk_size || needed >= MAX_ALLOC_SIZE)
                {
                    // Seal the current tail chunk at its live end.
                    last.truncate(self.tail);
                    self.chunks.push_back(alloc_chunk(chunk_size, bytes));
                    self.tail_chunk += 1;
                    self.tail = 0;
                } else {
                    last.resize(chunk_size.max(needed), 0);
                }
            }
        }

        let start = self.tail;
        self.tail += bytes;
        self.len += bytes;
        &mut self.chunks[self.tail_chunk][start..self.tail]
    }

    /// Grows the queue by `bytes` in front of the head and returns the new
    /// region, which starts at the new head.
    ///
    /// Reuses the consumed prefix of the head chunk when it is large enough,
    /// otherwise prepends a new chunk.
    ///
    /// # Panics
    ///
    /// Panics if `bytes >= MAX_ALLOC_SIZE`.
    pub fn reserve_front(&mut self, bytes: usize) -> &mut [u8] {
        check_request(bytes);
        if bytes == 0 {
            return &mut [];
        }

        if self.head < bytes {
            if self.head > 0 {
                self.chunks[0].drain(..self.head);
                if self.tail_chunk == 0 {
                    self.tail -= self.head;
                }
            }

            let chunk = alloc_chunk(self.chunk_size, bytes);
            let size = chunk.len();
            if self.len == 0 {
                self.chunks.clear();
                self.chunks.push_back(chunk);
                self.tail = size;
                self.tail_chunk = 0;
            } else {
                trace!("prepending {} byte chunk", size);
                self.chunks.push_front(chunk);
                self.tail_chunk += 1;
            }
            self.head = size;
        }

        self.head -= bytes;
        self.len += bytes;
        let end = self.head + bytes;
        &mut self.chunks[0][self.head..end]
    }

    /// Removes up to `bytes` from the head.
    ///
    /// Asking for more than [`len`](Self::len) drains the queue.
    pub fn free(&mut self, bytes: usize) {
        let mut bytes = bytes.min(self.len);
        while bytes > 0 {
            let block = self.chunks[0].len() - self.head;
            if self.tail_chunk == 0 || block > bytes {
                if self.len <= bytes {
                    self.clear();
                } else {
                    self.head += bytes;
                    self.len -= bytes;
                }
                return;
            }

            self.len -= block;
            bytes -= block;
            self.chunks.pop_front();
            self.tail_chunk -= 1;
            self.head = 0;
            trace!("evicted head chunk, {} chunks left", self.chunks.len());
        }
    }

    /// Removes up to `bytes` from the tail.
    ///
    /// Asking for more than [`len`](Self::len) drains the queue.
    pub fn chop(&mut self, bytes: usize) {
        let mut bytes = bytes.min(self.len);
        while bytes > 0 {
            if self.tail_chunk == 0 || self.tail > bytes {
                if self.len <= bytes {
                    self.clear();
                } else {
                    self.tail -= bytes;
                    self.len -= bytes;
                }
                return;
            }

            self.len -= self.tail;
            bytes -= self.tail;
            self.chunks.pop_back();
            self.tail_chunk -= 1;
            self.tail = self.chunks[self.tail_chunk].len();
            trace!("evicted tail chunk, {} chunks left", self.chunks.len());
        }
    }

    /// Keeps only the first `pos` bytes. No-op if `pos >= len()`.
    pub fn truncate(&mut self, pos: usize) {
        if pos < self.len {
            self.chop(self.len - pos);
        }
    }

    /// Drops every chunk and resets the cursors.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.head = 0;
        self.tail = 0;
        self.tail_chunk = 0;
        self.len = 0;
    }

    /// Copies `data` to the tail.
    pub fn append(&mut self, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        self.reserve(data.len()).copy_from_slice(data);
    }

    /// Adopts `data` as a new tail chunk without copying it.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() >= MAX_ALLOC_SIZE`.
    pub fn append_vec(&mut self, data: Vec<u8>) {
        check_request(data.len());
        if data.is_empty() {
            return;
        }

        let size = data.len();
        if self.len == 0 {
            self.chunks.clear();
            self.chunks.push_back(data);
            self.head = 0;
            self.tail_chunk = 0;
        } else {
            let tail = self.tail;
            self.chunks[self.tail_chunk].truncate(tail);
            self.chunks.push_back(data);
            self.tail_chunk += 1;
        }
        self.tail = size;
        self.len += size;
    }

    /// Reads and removes one byte, or returns `None` if empty.
    pub fn get_char(&mut self) -> Option<u8> {
        let c = *self.read_pointer()?.first()?;
        self.free(1);
        Some(c)
    }

    /// Appends one byte.
    pub fn put_char(&mut self, c: u8) {
        self.reserve(1)[0] = c;
    }

    /// Pushes one byte back in front of the head.
    ///
    /// Writes in place when the head chunk has a consumed prefix.
    pub fn unget_char(&mut self, c: u8) {
        if self.head > 0 {
            self.head -= 1;
            self.chunks[0][self.head] = c;
            self.len += 1;
        } else {
            self.reserve_front(1)[0] = c;
        }
    }

    /// Returns the offset of the first `byte` in the queue.
    pub fn index_of(&self, byte: u8) -> Option<usize> {
        self.index_of_in(byte, self.len, 0)
    }

    /// Searches `max_len` bytes starting at `pos` for `byte`.
    ///
    /// The returned offset is measured from the head, not from `pos`.
    ///
    /// # Example
    ///
    /// ```
    /// use chunkring::ChunkedByteQueue;
    ///
    /// let mut queue = ChunkedByteQueue::new();
    /// queue.append(b"a,b,c");
    ///
    /// assert_eq!(queue.index_of_in(b',', 5, 2), Some(3));
    /// assert_eq!(queue.index_of_in(b',', 1, 2), None);
    /// ```
    pub fn index_of_in(&self, byte: u8, max_len: usize, pos: usize) -> Option<usize> {
        let mut remaining = max_len;
        let mut offset = pos;
        for span in self.spans_from(pos) {
            if remaining == 0 {
                break;
            }
            let span = &span[..span.len().min(remaining)];
            if let Some(i) = span.iter().position(|&b| b == byte) {
                return Some(offset + i);
            }
            offset += span.len();
            remaining -= span.len();
        }
        None
    }

    /// Copies bytes from the head into `buf` without consuming them.
    pub fn peek(&self, buf: &mut [u8]) -> usize {
        self.peek_at(buf, 0)
    }

    /// Copies bytes starting at offset `pos` into `buf` without consuming
    /// them. Returns how many were copied.
    pub fn peek_at(&self, buf: &mut [u8], pos: usize) -> usize {
        let mut copied = 0;
        for span in self.spans_from(pos) {
            if copied == buf.len() {
                break;
            }
            let n = span.len().min(buf.len() - copied);
            buf[copied..copied + n].copy_from_slice(&span[..n]);
            copied += n;
        }
        copied
    }

    /// Moves up to `buf.len()` bytes from the head into `buf`.
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        let n = self.peek(buf);
        self.free(n);
        n
    }

    /// Drains the whole queue into one buffer.
    ///
    /// A single-chunk queue hands its chunk over without copying.
    pub fn read_all(&mut self) -> Bytes {
        if self.len == 0 {
            return Bytes::new();
        }

        if self.tail_chunk == 0 {
            if let Some(mut chunk) = self.chunks.pop_front() {
                chunk.truncate(self.tail);
                let head = self.head;
                self.clear();
                return Bytes::from(chunk).slice(head..);
            }
        }

        let mut data = Vec::with_capacity(self.len);
        for span in self.spans() {
            data.extend_from_slice(span);
        }
        self.clear();
        Bytes::from(data)
    }

    /// Discards up to `bytes` from the head and returns how many went.
    pub fn skip(&mut self, bytes: usize) -> usize {
        let bytes = bytes.min(self.len);
        self.free(bytes);
        bytes
    }

    /// Reads one line into `buf`, newline included.
    ///
    /// At most `buf.len() - 1` bytes are read so a NUL terminator always
    /// fits after them. Without a newline in range, reads up to that limit.
    /// Returns `None` if the queue is empty or `buf` is shorter than two
    /// bytes.
    pub fn read_line(&mut self, buf: &mut [u8]) -> Option<usize> {
        if self.len == 0 || buf.len() < 2 {
            return None;
        }

        let max = buf.len() - 1;
        let want = match self.index_of_in(b'\n', max, 0) {
            Some(i) => i + 1,
            None => max,
        };
        let n = self.read(&mut buf[..want]);
        buf[n] = 0;
        Some(n)
    }

    /// Returns true if a full line is buffered.
    pub fn can_read_line(&self) -> bool {
        self.index_of(b'\n').is_some()
    }
}

impl Default for ChunkedByteQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<u8>> for ChunkedByteQueue {
    fn from(data: Vec<u8>) -> Self {
        let mut queue = Self::new();
        queue.append_vec(data);
        queue
    }
}

impl From<&[u8]> for ChunkedByteQueue {
    fn from(data: &[u8]) -> Self {
        let mut queue = Self::new();
        queue.append(data);
        queue
    }
}

/// Iterator over the live spans of a [`ChunkedByteQueue`].
///
/// Created by [`ChunkedByteQueue::spans`].
#[derive(Debug, Clone)]
pub struct Spans<'a> {
    queue: &'a ChunkedByteQueue,
    index: usize,
    start: usize,
}

impl<'a> Iterator for Spans<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let queue = self.queue;
        if queue.len == 0 || self.index > queue.tail_chunk {
            return None;
        }

        let start = self.start;
        let end = queue.span_end(self.index);
        let span = &queue.chunks[self.index][start..end];
        self.index += 1;
        self.start = 0;
        Some(span)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = if self.queue.len == 0 {
            0
        } else {
            (self.queue.tail_chunk + 1).saturating_sub(self.index)
        };
        (left, Some(left))
    }
}

impl ExactSizeIterator for Spans<'_> {}
