//! [`bytes::Buf`] support, so a queue can be handed to any `Buf` consumer.

use std::io::IoSlice;

use bytes::{Buf, Bytes};

use super::ChunkedByteQueue;

impl Buf for ChunkedByteQueue {
    fn remaining(&self) -> usize {
        self.len()
    }

    fn chunk(&self) -> &[u8] {
        self.read_pointer().unwrap_or(&[])
    }

    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= self.len(),
            "cannot advance past `remaining`: {:?} <= {:?}",
            cnt,
            self.len()
        );
        self.free(cnt);
    }

    fn chunks_vectored<'a>(&'a self, dst: &mut [IoSlice<'a>]) -> usize {
        let mut filled = 0;
        for (slot, span) in dst.iter_mut().zip(self.spans()) {
            *slot = IoSlice::new(span);
            filled += 1;
        }
        filled
    }

    fn copy_to_bytes(&mut self, len: usize) -> Bytes {
        assert!(len <= self.len(), "`len` greater than remaining");
        if len == self.len() {
            return self.read_all();
        }
        let mut data = vec![0u8; len];
        self.read(&mut data);
        Bytes::from(data)
    }
}
