#![no_main]

use std::collections::VecDeque;

use chunkring::ChunkedByteQueue;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<u8>| {
    // Interpret the input as a stream of (opcode, argument) pairs and replay
    // them against both the queue and a flat model.
    let chunk_size = data.first().map_or(4, |&b| usize::from(b % 32) + 1);
    let mut queue = ChunkedByteQueue::with_chunk_size(chunk_size);
    let mut model: VecDeque<u8> = VecDeque::new();

    for pair in data.chunks_exact(2).skip(1) {
        let (op, arg) = (pair[0], pair[1]);
        let n = usize::from(arg);
        match op % 10 {
            0 => {
                let bytes = vec![arg; n % 40];
                queue.append(&bytes);
                model.extend(&bytes);
            }
            1 => {
                queue.reserve(n).fill(arg);
                model.extend(std::iter::repeat_n(arg, n));
            }
            2 => {
                queue.reserve_front(n % 20).fill(arg);
                for _ in 0..n % 20 {
                    model.push_front(arg);
                }
            }
            3 => {
                queue.free(n);
                model.drain(..n.min(model.len()));
            }
            4 => {
                queue.chop(n);
                model.truncate(model.len() - n.min(model.len()));
            }
            5 => {
                queue.unget_char(arg);
                model.push_front(arg);
            }
            6 => assert_eq!(queue.get_char(), model.pop_front()),
            7 => {
                let mut buf = vec![0u8; n];
                let got = queue.peek_at(&mut buf, n / 3);
                let want: Vec<u8> = model.iter().skip(n / 3).take(n).copied().collect();
                assert_eq!(&buf[..got], &want[..]);
            }
            8 => {
                let want = model.iter().position(|&b| b == arg);
                assert_eq!(queue.index_of(arg), want);
            }
            _ => queue.append_vec(vec![arg; n % 17]),
        }
        if op % 10 == 9 {
            model.extend(std::iter::repeat_n(arg, n % 17));
        }

        // Verify: size and contents always match the model
        assert_eq!(queue.len(), model.len());
        assert!(queue.spans().flatten().eq(model.iter()));
        if queue.is_empty() {
            assert_eq!(queue.chunk_count(), 0);
        }
    }

    // Verify: draining returns everything in order
    let all = queue.read_all();
    assert!(all.iter().eq(model.iter()));
    assert!(queue.is_empty());
});
