//! Chunk allocation and the single-request size ceiling.

use log::trace;

use crate::config::MAX_ALLOC_SIZE;

/// Panics if a single request reaches the allocation ceiling.
#[track_caller]
pub(crate) fn check_request(bytes: usize) {
    assert!(
        bytes < MAX_ALLOC_SIZE,
        "requested {} bytes, at or above the allocation ceiling of {} bytes",
        bytes,
        MAX_ALLOC_SIZE
    );
}

/// Allocates a chunk able to hold `bytes`, never smaller than `chunk_size`.
pub(crate) fn alloc_chunk(chunk_size: usize, bytes: usize) -> Vec<u8> {
    let size = chunk_size.max(bytes);
    trace!("allocating {} byte chunk for a {} byte request", size, bytes);
    vec![0u8; size]
}
