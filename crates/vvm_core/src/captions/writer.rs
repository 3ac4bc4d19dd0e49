//! SRT subtitle writer.
//!
//! Serializes caption blocks to SubRip format.
//!
//! # Timing Precision
//!
//! SRT uses millisecond timing (HH:MM:SS,mmm). Fractional milliseconds
//! are truncated (floor), never rounded up, so a block can lose up to
//! one millisecond at write time but never gains time it does not have.

use std::fs;
use std::io;
use std::path::Path;

use super::types::CaptionBlock;

/// Encode caption blocks as an SRT document.
///
/// Each block is written as:
/// ```text
/// {index}
/// HH:MM:SS,mmm --> HH:MM:SS,mmm
/// {text}
///
/// ```
///
/// An empty block sequence produces an empty (valid, captionless) track.
pub fn encode_srt(blocks: &[CaptionBlock]) -> String {
    let mut output = String::new();

    for block in blocks {
        output.push_str(&format!("{}\n", block.index));
        output.push_str(&format!(
            "{} --> {}\n",
            format_srt_time(block.start_ms()),
            format_srt_time(block.end_ms())
        ));
        output.push_str(&block.text);
        output.push_str("\n\n");
    }

    output
}

/// Encode blocks and write the track to `path`.
pub fn write_srt_file(blocks: &[CaptionBlock], path: &Path) -> io::Result<()> {
    fs::write(path, encode_srt(blocks))
}

/// Format float milliseconds as an SRT timestamp (HH:MM:SS,mmm).
///
/// Truncates to whole milliseconds. Hours are not capped, so
/// hours-scale durations format without overflow.
pub fn format_srt_time(ms: f64) -> String {
    let ms = ms.max(0.0).floor() as u64;

    let millis = ms % 1000;
    let total_secs = ms / 1000;
    let secs = total_secs % 60;
    let total_mins = total_secs / 60;
    let mins = total_mins % 60;
    let hours = total_mins / 60;

    format!("{:02}:{:02}:{:02},{:03}", hours, mins, secs, millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_srt_time() {
        assert_eq!(format_srt_time(0.0), "00:00:00,000");
        assert_eq!(format_srt_time(1000.0), "00:00:01,000");
        assert_eq!(format_srt_time(1500.0), "00:00:01,500");
        assert_eq!(format_srt_time(60000.0), "00:01:00,000");
        assert_eq!(format_srt_time(3600000.0), "01:00:00,000");

        // Floor, not round-to-nearest
        assert_eq!(format_srt_time(1234.9), "00:00:01,234");

        // Negative inputs clamp to zero rather than wrapping
        assert_eq!(format_srt_time(-5.0), "00:00:00,000");

        // Hours-scale durations do not overflow or wrap
        assert_eq!(format_srt_time(100.0 * 3600000.0), "100:00:00,000");
    }

    #[test]
    fn test_encode_basic_srt() {
        let blocks = vec![
            CaptionBlock::new(1, 0.0, 5.0, "one two three four five"),
            CaptionBlock::new(2, 5.0, 7.0, "six seven"),
        ];

        let expected = "1\n00:00:00,000 --> 00:00:05,000\none two three four five\n\n\
                        2\n00:00:05,000 --> 00:00:07,000\nsix seven\n\n";

        assert_eq!(encode_srt(&blocks), expected);
    }

    #[test]
    fn empty_blocks_produce_empty_track() {
        assert_eq!(encode_srt(&[]), "");
    }

    #[test]
    fn writes_track_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("captions.srt");
        let blocks = vec![CaptionBlock::new(1, 0.0, 1.0, "hello")];

        write_srt_file(&blocks, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("1\n00:00:00,000 --> 00:00:01,000\nhello"));
    }
}
