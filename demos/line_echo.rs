//! Line echo through a chunked queue.
//!
//! Reads stdin into a queue, numbers every complete line, and writes the
//! result to stdout through a second queue.
//!
//! Run with:
//!     printf 'alpha\nbeta\ngamma' | cargo run --example line_echo

use std::io::{self, Write};

use chunkring::{ChunkedByteQueue, QueueConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = QueueConfig::new(1024)?;
    let mut input = ChunkedByteQueue::with_config(config);
    let mut output = ChunkedByteQueue::with_config(config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut stdin = stdin.lock();
    let mut stdout = stdout.lock();

    let mut line = [0u8; 4096];
    let mut number = 0usize;

    loop {
        let n = input.read_from(&mut stdin, 8 * 1024)?;

        while input.can_read_line() || (n == 0 && !input.is_empty()) {
            let len = input.read_line(&mut line).unwrap_or(0);
            number += 1;
            write!(output, "{:>5}: ", number)?;
            output.append(&line[..len]);
            if line[..len].last() != Some(&b'\n') && input.is_empty() {
                output.put_char(b'\n');
            }
        }

        output.write_to(&mut stdout)?;
        if n == 0 {
            break;
        }
    }

    stdout.flush()?;
    eprintln!("\n{} lines echoed", number);
    Ok(())
}
