#![no_main]

use chunkring::ChunkedByteQueue;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<u8>| {
    // Feed the input in uneven pieces, then read it back line by line
    // through a small line buffer.
    let mut queue = ChunkedByteQueue::with_chunk_size(7);
    let mut start = 0;
    let mut step = 1;
    while start < data.len() {
        let end = (start + step).min(data.len());
        queue.append(&data[start..end]);
        start = end;
        step = step % 13 + 1;
    }
    assert_eq!(queue.len(), data.len());

    let mut out = Vec::with_capacity(data.len());
    let mut line = [0u8; 16];
    while let Some(n) = queue.read_line(&mut line) {
        assert!(n > 0 && n < line.len());
        assert_eq!(line[n], 0);
        // Verify: a line ends at the first newline, or fills the buffer
        match line[..n].iter().position(|&b| b == b'\n') {
            Some(i) => assert_eq!(i, n - 1),
            None => assert!(n == line.len() - 1 || queue.is_empty()),
        }
        out.extend_from_slice(&line[..n]);
    }

    // Verify: line reading loses nothing
    assert_eq!(out, data);
    assert!(!queue.can_read_line());
});
