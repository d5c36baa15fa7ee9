// Integration tests for the ChunkedByteQueue public API
// Tests cover: size accounting, round-trips, peeking, line scanning, push-back

use chunkring::{ChunkedByteQueue, QueueConfig};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Builds a queue whose contents are spread over several chunks.
fn fragmented(chunk_size: usize, parts: &[&[u8]]) -> ChunkedByteQueue {
    let mut queue = ChunkedByteQueue::with_chunk_size(chunk_size);
    for part in parts {
        queue.append(part);
    }
    queue
}

// ============================================================================
// Size Accounting
// ============================================================================

#[test]
fn test_size_tracks_appends_and_frees() {
    init_logging();
    let mut queue = ChunkedByteQueue::with_chunk_size(16);
    let mut expected = 0usize;

    for round in 0..50usize {
        let data = vec![round as u8; round * 7 % 23 + 1];
        queue.append(&data);
        expected += data.len();
        assert_eq!(queue.len(), expected);

        let freed = queue.skip(round % 11);
        expected -= freed;
        assert_eq!(queue.len(), expected);
    }

    let mut buf = vec![0u8; 40];
    while !queue.is_empty() {
        let n = queue.read(&mut buf);
        assert!(n > 0);
        expected -= n;
        assert_eq!(queue.len(), expected);
    }
    assert_eq!(expected, 0);
}

#[test]
fn test_free_and_skip_clamp() {
    let mut queue = fragmented(4, &[b"abcd", b"efgh"]);
    assert_eq!(queue.skip(100), 8);
    assert!(queue.is_empty());

    queue.append(b"xyz");
    queue.free(50);
    assert!(queue.is_empty());
    queue.chop(50);
    assert!(queue.is_empty());
}

// ============================================================================
// Round Trips
// ============================================================================

#[test]
fn test_append_read_all_round_trip() {
    init_logging();
    let data: Vec<u8> = (0..10_000).map(|i| (i % 251) as u8).collect();

    for chunk_size in [1, 7, 64, 4096, 65536] {
        let mut queue = ChunkedByteQueue::with_chunk_size(chunk_size);
        for piece in data.chunks(333) {
            queue.append(piece);
        }
        assert_eq!(&queue.read_all()[..], &data[..]);
        assert!(queue.is_empty());
    }
}

#[test]
fn test_single_chunk_round_trip() {
    let mut queue = ChunkedByteQueue::new();
    queue.append(b"one chunk only");
    assert_eq!(queue.chunk_count(), 1);
    assert_eq!(&queue.read_all()[..], b"one chunk only");
    assert_eq!(queue.chunk_count(), 0);
}

#[test]
fn test_clear_then_reuse() {
    let mut queue = fragmented(3, &[b"abc", b"def", b"ghi"]);
    queue.free(4);
    queue.unget_char(b'!');
    queue.clear();

    assert_eq!(queue.len(), 0);
    assert!(queue.is_empty());
    assert_eq!(queue.chunk_count(), 0);
    assert!(queue.read_pointer().is_none());

    queue.append(b"fresh");
    assert_eq!(&queue.read_all()[..], b"fresh");
}

// ============================================================================
// Peeking and Random Access
// ============================================================================

#[test]
fn test_peek_does_not_consume() {
    let queue = fragmented(4, &[b"0123", b"4567", b"89"]);
    let mut first = [0u8; 6];
    let mut second = [0u8; 6];

    assert_eq!(queue.peek_at(&mut first, 2), 6);
    assert_eq!(queue.peek_at(&mut second, 2), 6);
    assert_eq!(first, second);
    assert_eq!(&first, b"234567");
    assert_eq!(queue.len(), 10);
}

#[test]
fn test_peek_then_read_agree() {
    let mut queue = fragmented(5, &[b"hello", b" ", b"world"]);
    let mut peeked = [0u8; 11];
    let mut read = [0u8; 11];

    assert_eq!(queue.peek(&mut peeked), 11);
    assert_eq!(queue.read(&mut read), 11);
    assert_eq!(peeked, read);
    assert!(queue.is_empty());
}

#[test]
fn test_peek_past_end() {
    let queue = fragmented(4, &[b"ab"]);
    let mut buf = [0u8; 8];
    assert_eq!(queue.peek_at(&mut buf, 1), 1);
    assert_eq!(queue.peek_at(&mut buf, 2), 0);
    assert_eq!(queue.peek_at(&mut buf, 99), 0);
}

#[test]
fn test_read_pointer_loop_covers_everything() {
    let mut queue = fragmented(4, &[b"abcd", b"efgh", b"ij"]);
    let mut seen = Vec::new();

    while let Some(span) = queue.read_pointer() {
        assert_eq!(span.len(), queue.next_contiguous_span());
        seen.extend_from_slice(span);
        let n = span.len();
        queue.free(n);
    }
    assert_eq!(seen, b"abcdefghij");
}

#[test]
fn test_read_pointer_at_every_offset() {
    let queue = fragmented(3, &[b"abc", b"def", b"gh"]);
    let data = b"abcdefgh";

    for pos in 0..data.len() {
        let span = queue.read_pointer_at(pos).unwrap();
        assert!(!span.is_empty());
        assert_eq!(span, &data[pos..pos + span.len()]);
    }
    assert!(queue.read_pointer_at(data.len()).is_none());
}

// ============================================================================
// Reservations
// ============================================================================

#[test]
fn test_reserve_is_contiguous_after_fragmentation() {
    let mut queue = fragmented(8, &[b"12345678", b"123"]);
    queue.free(5);

    let region = queue.reserve(20);
    assert_eq!(region.len(), 20);
    region.copy_from_slice(&[9u8; 20]);

    let mut out = vec![0u8; queue.len()];
    queue.peek(&mut out);
    assert_eq!(&out[..6], b"678123");
    assert!(out[6..].iter().all(|&b| b == 9));
}

#[test]
fn test_large_append_is_one_reservation() {
    let mut queue = ChunkedByteQueue::with_chunk_size(16);
    queue.append(b"head");
    queue.append(&[7u8; 16]);
    let before = queue.chunk_count();

    let big = vec![3u8; 1000];
    queue.append(&big);
    // A single new chunk holds the whole payload.
    assert_eq!(queue.chunk_count(), before + 1);
    assert_eq!(queue.read_pointer_at(20).unwrap().len(), 1000);
}

#[test]
fn test_reserve_front_then_read() {
    let mut queue = fragmented(4, &[b"body"]);
    queue.reserve_front(7).copy_from_slice(b"header:");
    assert_eq!(queue.len(), 11);
    assert_eq!(&queue.read_all()[..], b"header:body");
}

#[test]
fn test_append_vec_adopts_chunk() {
    let mut queue = ChunkedByteQueue::with_chunk_size(4);
    queue.append(b"ab");
    queue.append_vec(vec![b'c'; 100]);
    queue.append(b"d");

    assert_eq!(queue.len(), 103);
    assert_eq!(queue.read_pointer_at(2).unwrap().len(), 100);
    let all = queue.read_all();
    assert_eq!(&all[..2], b"ab");
    assert_eq!(all[102], b'd');
}

// ============================================================================
// Characters and Push-Back
// ============================================================================

#[test]
fn test_unget_then_get() {
    let mut queue = fragmented(4, &[b"abcd", b"efgh"]);

    for _ in 0..3 {
        queue.get_char();
    }
    let before = queue.len();
    queue.unget_char(b'Z');
    assert_eq!(queue.get_char(), Some(b'Z'));
    assert_eq!(queue.len(), before);

    let mut empty = ChunkedByteQueue::new();
    empty.unget_char(b'Q');
    assert_eq!(empty.get_char(), Some(b'Q'));
    assert_eq!(empty.get_char(), None);
}

#[test]
fn test_unget_many_prepends() {
    let mut queue = ChunkedByteQueue::with_chunk_size(2);
    queue.append(b"end");
    for c in b"trats".iter() {
        queue.unget_char(*c);
    }
    assert_eq!(&queue.read_all()[..], b"startend");
}

#[test]
fn test_put_char_get_char_all_values() {
    let mut queue = ChunkedByteQueue::with_chunk_size(16);
    for b in 0..=255u8 {
        queue.put_char(b);
    }
    for b in 0..=255u8 {
        assert_eq!(queue.get_char(), Some(b));
    }
    assert_eq!(queue.get_char(), None);
}

// ============================================================================
// Scanning and Lines
// ============================================================================

#[test]
fn test_index_of_in_last_chunk() {
    let mut queue = ChunkedByteQueue::with_chunk_size(4);
    queue.append(b"aaaa");
    queue.append(b"bbbb");
    queue.append(b"cc#c");
    assert!(queue.chunk_count() >= 3);

    assert_eq!(queue.index_of(b'#'), Some(10));
    assert_eq!(queue.index_of_in(b'#', 100, 9), Some(10));
    assert_eq!(queue.index_of_in(b'#', 2, 8), None);
    assert_eq!(queue.index_of_in(b'#', 3, 8), Some(10));
}

#[test]
fn test_index_of_after_free() {
    let mut queue = fragmented(4, &[b"x\nyy", b"yy\nz"]);
    queue.free(2);
    assert_eq!(queue.index_of(b'\n'), Some(4));
}

#[test]
fn test_read_line_splits_on_newline() {
    let mut queue = ChunkedByteQueue::new();
    queue.append(b"ab\ncd");
    assert!(queue.can_read_line());

    let mut buf = [0u8; 16];
    assert_eq!(queue.read_line(&mut buf), Some(3));
    assert_eq!(&buf[..4], b"ab\n\0");
    assert_eq!(queue.len(), 2);
    assert!(!queue.can_read_line());

    assert_eq!(queue.read_line(&mut buf), Some(2));
    assert_eq!(&buf[..2], b"cd");
    assert_eq!(queue.read_line(&mut buf), None);
}

#[test]
fn test_read_line_across_chunks() {
    let mut queue = fragmented(3, &[b"one", b" tw", b"o\nth", b"ree\n"]);
    let mut buf = [0u8; 32];

    let n = queue.read_line(&mut buf).unwrap();
    assert_eq!(&buf[..n], b"one two\n");
    let n = queue.read_line(&mut buf).unwrap();
    assert_eq!(&buf[..n], b"three\n");
    assert!(queue.is_empty());
}

#[test]
fn test_can_read_line_tracks_newline() {
    let mut queue = ChunkedByteQueue::with_chunk_size(2);
    assert!(!queue.can_read_line());
    queue.append(b"partial");
    assert!(!queue.can_read_line());
    queue.put_char(b'\n');
    assert!(queue.can_read_line());
    queue.chop(1);
    assert!(!queue.can_read_line());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_with_config() {
    let config = QueueConfig::new(32).unwrap();
    let mut queue = ChunkedByteQueue::with_config(config);
    assert_eq!(queue.chunk_size(), 32);

    queue.set_chunk_size(128);
    assert_eq!(queue.chunk_size(), 128);
}

#[test]
fn test_default_queue() {
    let queue = ChunkedByteQueue::default();
    assert_eq!(queue.chunk_size(), chunkring::DEFAULT_CHUNK_SIZE);
    assert!(queue.is_empty());
}

#[test]
fn test_from_conversions() {
    let mut queue = ChunkedByteQueue::from(b"vec".to_vec());
    assert_eq!(queue.chunk_count(), 1);
    queue.append(b"!");
    assert_eq!(&queue.read_all()[..], b"vec!");

    let mut queue = ChunkedByteQueue::from(&b"slice"[..]);
    assert_eq!(&queue.read_all()[..], b"slice");
}
