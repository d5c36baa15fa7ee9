//! Error types for chunkring.
//!
//! Only recoverable conditions live here. Oversized reservations are caller
//! bugs and panic instead (see [`MAX_ALLOC_SIZE`](crate::MAX_ALLOC_SIZE)).

use std::fmt;

/// Errors that can occur while configuring or feeding a queue.
#[derive(Debug)]
pub enum QueueError {
    /// An I/O error occurred while moving data to or from a transport.
    Io(std::io::Error),

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::Io(e) => write!(f, "io error: {}", e),
            QueueError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for QueueError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QueueError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for QueueError {
    fn from(e: std::io::Error) -> Self {
        QueueError::Io(e)
    }
}

impl From<QueueError> for std::io::Error {
    fn from(e: QueueError) -> Self {
        match e {
            QueueError::Io(e) => e,
            other => std::io::Error::new(std::io::ErrorKind::InvalidInput, other),
        }
    }
}
