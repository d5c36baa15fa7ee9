//! Configuration for queue growth.
//!
//! - [`QueueConfig`] - Controls how large newly allocated chunks are
//!
//! # Example
//!
//! ```
//! use chunkring::{ChunkedByteQueue, QueueConfig};
//!
//! let config = QueueConfig::new(16 * 1024)?;
//! let queue = ChunkedByteQueue::with_config(config);
//! assert_eq!(queue.chunk_size(), 16 * 1024);
//!
//! # Ok::<(), chunkring::QueueError>(())
//! ```

use crate::error::QueueError;

/// Default growth size for new chunks (4 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 4 * 1024;

/// Upper bound (exclusive) for a single reservation.
///
/// Any one request for this many bytes or more means the caller's size
/// arithmetic has gone wrong, and the queue panics rather than trying to
/// allocate it.
pub const MAX_ALLOC_SIZE: usize = isize::MAX as usize;

/// Configuration for a [`ChunkedByteQueue`](crate::ChunkedByteQueue).
///
/// The chunk size is a growth hint: a new chunk is at least this large, and
/// larger when a single reservation asks for more. Changing it never
/// reshapes chunks that already exist.
///
/// # Example
///
/// ```
/// use chunkring::QueueConfig;
///
/// let config = QueueConfig::default().with_chunk_size(512);
/// assert_eq!(config.chunk_size(), 512);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueueConfig {
    /// Growth size in bytes for new chunks.
    chunk_size: usize,
}

impl QueueConfig {
    /// Creates a new configuration with the given chunk size.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::InvalidConfig`] if:
    /// - `chunk_size` is zero
    /// - `chunk_size` is not below [`MAX_ALLOC_SIZE`]
    pub fn new(chunk_size: usize) -> Result<Self, QueueError> {
        if chunk_size == 0 {
            return Err(QueueError::InvalidConfig {
                message: "chunk size must be non-zero",
            });
        }

        if chunk_size >= MAX_ALLOC_SIZE {
            return Err(QueueError::InvalidConfig {
                message: "chunk size must be below the allocation ceiling",
            });
        }

        Ok(Self { chunk_size })
    }

    /// Sets the chunk size.
    ///
    /// Note: This does not validate the configuration. Use [`QueueConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Returns the chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use chunkring::QueueConfig;
    ///
    /// let config = QueueConfig::default().with_chunk_size(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), QueueError> {
        Self::new(self.chunk_size).map(|_| ())
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}
