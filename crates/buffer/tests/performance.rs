// Chunk: docs/chunks/splice_buffer - Non-destructive splice buffer over an immutable source

//! Performance sanity checks for the splice buffer.
//!
//! These tests verify that a single-file rewriting pass completes within
//! reasonable time bounds. They are not formal benchmarks but guard against
//! obvious performance regressions.

use splice_buffer::SpliceBuffer;
use std::time::{Duration, Instant};

/// A source shaped like a mid-sized code file: 2000 short lines.
fn sample_source() -> String {
    (0..2000)
        .map(|i| format!("let value_{i} = compute({i});\n"))
        .collect()
}

#[test]
fn wrap_every_line_under_500ms() {
    let source = sample_source();
    let line_starts: Vec<usize> = std::iter::once(0)
        .chain(source.match_indices('\n').map(|(i, _)| i + 1))
        .filter(|&i| i < source.len())
        .collect();
    let mut buffer = SpliceBuffer::from(source.as_str());
    let start = Instant::now();

    for &at in &line_starts {
        buffer.insert_right(at, "/* checked */ ", false).unwrap();
    }
    let output = buffer.generate();

    let elapsed = start.elapsed();
    assert!(
        elapsed < Duration::from_millis(500),
        "Wrapping {} lines took {:?}, expected < 500ms",
        line_starts.len(),
        elapsed
    );
    assert_eq!(output.len(), source.len() + line_starts.len() * 14);
}

#[test]
fn many_removals_under_500ms() {
    let source = sample_source();
    let mut buffer = SpliceBuffer::from(source.as_str());
    let start = Instant::now();

    // Remove every other line, last to first, then once more as a no-op.
    let lines: Vec<(usize, usize)> = source
        .split_inclusive('\n')
        .scan(0, |offset, line| {
            let at = *offset;
            *offset += line.len();
            Some((at, line.len()))
        })
        .step_by(2)
        .collect();
    for &(at, len) in lines.iter().rev() {
        buffer.remove(at, len).unwrap();
    }
    for &(at, len) in &lines {
        buffer.remove(at, len).unwrap();
    }

    let elapsed = start.elapsed();
    assert!(
        elapsed < Duration::from_millis(500),
        "Removing {} lines twice took {:?}, expected < 500ms",
        lines.len(),
        elapsed
    );
    assert_eq!(buffer.removed_ranges().len(), lines.len());
}

#[test]
fn repeated_generate_is_cheap() {
    let source = "x".repeat(100_000);
    let mut buffer = SpliceBuffer::from(source.as_str());
    for i in (0..100_000).step_by(1000) {
        buffer.insert_left(i, "|", false).unwrap();
    }
    let start = Instant::now();

    for _ in 0..100 {
        assert_eq!(buffer.generated_len(), 100_100);
        let _ = buffer.generate();
    }

    let elapsed = start.elapsed();
    assert!(
        elapsed < Duration::from_millis(500),
        "100 generations took {:?}, expected < 500ms",
        elapsed
    );
}
