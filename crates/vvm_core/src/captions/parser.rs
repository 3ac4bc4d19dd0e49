//! SRT subtitle parser.
//!
//! Parses SubRip (.srt) content back into caption blocks. The writer is
//! the primary producer in this pipeline; the parser exists so written
//! tracks can be verified and so externally supplied tracks can be
//! inspected.
//!
//! # Format Overview
//!
//! ```text
//! 1
//! 00:00:01,000 --> 00:00:04,000
//! Hello, world!
//!
//! 2
//! 00:00:05,000 --> 00:00:08,000
//! Another line.
//! ```

use super::error::ParseError;
use super::types::CaptionBlock;

/// Parse SRT content into caption blocks.
///
/// Indices are regenerated 1-based in document order; the index lines in
/// the input are ignored. Blocks without text are skipped.
pub fn parse_srt(content: &str) -> Result<Vec<CaptionBlock>, ParseError> {
    let content = content.replace("\r\n", "\n").replace('\r', "\n");

    let mut blocks = Vec::new();
    let mut line_offset = 0usize;

    for raw_block in content.split("\n\n") {
        let block_offset = line_offset;
        // Each piece spans its own newlines plus the two-newline separator.
        line_offset += raw_block.matches('\n').count() + 2;

        if raw_block.trim().is_empty() {
            continue;
        }

        let lines: Vec<&str> = raw_block.lines().collect();
        let Some((timing_idx, timing_line)) = find_timing_line(&lines) else {
            return Err(ParseError::MissingTiming {
                line: block_offset + 1,
            });
        };

        let timing_line_num = block_offset + timing_idx + 1;
        let (start_ms, end_ms) = parse_srt_timing(timing_line)
            .ok_or_else(|| ParseError::invalid_time(timing_line_num, timing_line))?;

        let text = lines[timing_idx + 1..].join("\n");
        if !text.is_empty() {
            blocks.push(CaptionBlock::new(
                blocks.len() + 1,
                start_ms / 1000.0,
                end_ms / 1000.0,
                text,
            ));
        }
    }

    Ok(blocks)
}

/// Find the timing line in a block of lines.
fn find_timing_line<'a>(lines: &[&'a str]) -> Option<(usize, &'a str)> {
    lines
        .iter()
        .enumerate()
        .find(|(_, line)| line.contains(" --> "))
        .map(|(i, line)| (i, *line))
}

/// Parse an SRT timing line: `HH:MM:SS,mmm --> HH:MM:SS,mmm`.
///
/// Returns (start_ms, end_ms).
fn parse_srt_timing(line: &str) -> Option<(f64, f64)> {
    let mut parts = line.split(" --> ");
    let start = parse_srt_time(parts.next()?)?;
    let end = parse_srt_time(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some((start, end))
}

/// Parse an SRT timestamp (`HH:MM:SS,mmm`, `.` accepted for `,`).
///
/// Returns time in milliseconds.
pub fn parse_srt_time(s: &str) -> Option<f64> {
    let s = s.trim().replace(',', ".");

    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 {
        return None;
    }

    let hours: f64 = parts[0].parse().ok()?;
    let minutes: f64 = parts[1].parse().ok()?;
    let seconds: f64 = parts[2].parse().ok()?;

    Some(hours * 3_600_000.0 + minutes * 60_000.0 + seconds * 1000.0)
}
