use crate::stego::embed::{ZWJ, ZWNJ};

/// Char-level reading of an embedded text.
///
/// The encoder interleaves cover and marker chars, so markers sit at odd
/// char positions. Reading those positions gives the bit stream without
/// touching raw bytes:
/// - ZWJ  => 1
/// - ZWNJ => 0
/// - anything else at an odd position is skipped
///
/// Works only on valid UTF-8 and only for the default zero-width pattern;
/// the byte scanner is the general tool, this is a cross-check.
pub fn extract_bits(text: &str) -> Vec<bool> {
    text.chars()
        .skip(1)
        .step_by(2)
        .filter_map(|ch| match ch {
            ZWJ => Some(true),
            ZWNJ => Some(false),
            _ => None,
        })
        .collect()
}

/// Count of ZWNJ and ZWJ chars anywhere in `text`.
pub fn count_zero_width(text: &str) -> (usize, usize) {
    text.chars().fold((0, 0), |(nj, j), ch| match ch {
        ZWNJ => (nj + 1, j),
        ZWJ => (nj, j + 1),
        _ => (nj, j),
    })
}
