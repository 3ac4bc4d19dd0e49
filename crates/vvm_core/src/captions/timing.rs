//! Caption timing estimation.
//!
//! The voice synthesis stage returns audio without timestamps, so block
//! timing assumes a uniform speaking rate across the whole track. This
//! is an approximation; it drifts on scripts with long pauses, but for
//! 30-second narration it stays within a block of the true timing.

use crate::models::Script;

use super::error::CaptionError;
use super::types::CaptionBlock;

/// Default number of words per caption block.
pub const DEFAULT_BLOCK_SIZE: usize = 5;

/// Estimate caption blocks for a script spoken over a known duration.
///
/// Words are partitioned into consecutive groups of `block_size` (the
/// final group may be shorter). With `rate = word_count / duration`,
/// the group starting at word offset `k` spans
/// `[k / rate, (k + block_size) / rate)`; the last block's end is
/// clamped to the audio duration so captions never outlive the track.
///
/// Guarantees for the returned blocks:
/// - 1-based indices in order
/// - first block starts at 0.0
/// - contiguous and non-overlapping
/// - block count is `ceil(word_count / block_size)`
pub fn estimate_captions(
    script: &Script,
    audio_duration_secs: f64,
    block_size: usize,
) -> Result<Vec<CaptionBlock>, CaptionError> {
    if script.is_empty() {
        return Err(CaptionError::EmptyScript);
    }
    if !audio_duration_secs.is_finite() || audio_duration_secs <= 0.0 {
        return Err(CaptionError::InvalidDuration(audio_duration_secs));
    }
    if block_size == 0 {
        return Err(CaptionError::InvalidBlockSize);
    }

    let rate = script.word_count() as f64 / audio_duration_secs;

    let mut blocks = Vec::with_capacity(script.word_count().div_ceil(block_size));
    for (i, group) in script.words().chunks(block_size).enumerate() {
        let offset = i * block_size;
        let start_secs = offset as f64 / rate;
        let end_secs = ((offset + block_size) as f64 / rate).min(audio_duration_secs);
        blocks.push(CaptionBlock::new(i + 1, start_secs, end_secs, group.join(" ")));
    }

    tracing::debug!(
        blocks = blocks.len(),
        words = script.word_count(),
        duration_secs = audio_duration_secs,
        "estimated caption timing"
    );

    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> Script {
        Script::from_words((0..n).map(|i| format!("w{i}")))
    }

    #[test]
    fn worked_scenario_seven_words() {
        let script = Script::from_narration("one two three four five six seven");
        let blocks = estimate_captions(&script, 7.0, 5).unwrap();

        assert_eq!(blocks.len(), 2);

        assert_eq!(blocks[0].index, 1);
        assert_eq!(blocks[0].text, "one two three four five");
        assert!((blocks[0].start_secs - 0.0).abs() < 1e-9);
        assert!((blocks[0].end_secs - 5.0).abs() < 1e-9);

        assert_eq!(blocks[1].index, 2);
        assert_eq!(blocks[1].text, "six seven");
        assert!((blocks[1].start_secs - 5.0).abs() < 1e-9);
        assert!((blocks[1].end_secs - 7.0).abs() < 1e-9);
    }

    #[test]
    fn blocks_are_contiguous_and_ordered() {
        let blocks = estimate_captions(&words(23), 11.3, 4).unwrap();

        assert_eq!(blocks.len(), 23usize.div_ceil(4));
        assert!((blocks[0].start_secs - 0.0).abs() < 1e-9);

        for pair in blocks.windows(2) {
            assert!((pair[0].end_secs - pair[1].start_secs).abs() < 1e-9);
            assert!(pair[0].start_secs < pair[0].end_secs);
        }
    }

    #[test]
    fn last_block_end_clamped_to_duration() {
        let blocks = estimate_captions(&words(7), 7.0, 5).unwrap();
        assert!((blocks.last().unwrap().end_secs - 7.0).abs() < 1e-9);

        // Divisible case lands exactly on the duration without clamping.
        let blocks = estimate_captions(&words(10), 5.0, 5).unwrap();
        assert!((blocks.last().unwrap().end_secs - 5.0).abs() < 1e-9);
    }

    #[test]
    fn divisible_count_yields_no_empty_final_block() {
        let blocks = estimate_captions(&words(10), 5.0, 5).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].text.split_whitespace().count(), 5);
    }

    #[test]
    fn remainder_sizes_final_block() {
        let blocks = estimate_captions(&words(13), 6.5, 5).unwrap();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[2].text.split_whitespace().count(), 3);
    }

    #[test]
    fn empty_script_is_rejected() {
        let script = Script::from_narration("");
        assert!(matches!(
            estimate_captions(&script, 10.0, 5),
            Err(CaptionError::EmptyScript)
        ));
    }

    #[test]
    fn bad_duration_is_rejected() {
        let script = words(3);
        assert!(matches!(
            estimate_captions(&script, 0.0, 5),
            Err(CaptionError::InvalidDuration(_))
        ));
        assert!(matches!(
            estimate_captions(&script, -1.0, 5),
            Err(CaptionError::InvalidDuration(_))
        ));
        assert!(matches!(
            estimate_captions(&script, f64::NAN, 5),
            Err(CaptionError::InvalidDuration(_))
        ));
        assert!(matches!(
            estimate_captions(&script, f64::INFINITY, 5),
            Err(CaptionError::InvalidDuration(_))
        ));
    }

    #[test]
    fn zero_block_size_is_rejected() {
        assert!(matches!(
            estimate_captions(&words(3), 10.0, 0),
            Err(CaptionError::InvalidBlockSize)
        ));
    }

    #[test]
    fn single_word_script() {
        let blocks = estimate_captions(&words(1), 2.0, 5).unwrap();
        assert_eq!(blocks.len(), 1);
        assert!((blocks[0].start_secs - 0.0).abs() < 1e-9);
        assert!((blocks[0].end_secs - 2.0).abs() < 1e-9);
    }
}
