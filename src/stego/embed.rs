use thiserror::Error;

use crate::stego::{bytes_to_bits, zw_text};
use crate::xor;

/// Zero-width companion encoder.
///
/// Encoding model:
/// - The secret is optionally XOR'd with a single-byte key.
/// - Secret bytes -> bits, MSB-first.
/// - One zero-width char goes after each cover char, until the bits run out:
///   - bit 0 => U+200C ZERO WIDTH NON-JOINER (ZWNJ)
///   - bit 1 => U+200D ZERO WIDTH JOINER (ZWJ)
///
/// In UTF-8 these are `E2 80 8C` and `E2 80 8D`, the default marker pattern
/// the byte scanner looks for. A cover that already holds either char
/// would add stray bits on decode, so it is rejected.
pub const ZWNJ: char = '\u{200C}';
pub const ZWJ: char = '\u{200D}';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmbedError {
    #[error("cover too small: need {needed} chars for {needed} bits, have {available}")]
    CoverTooSmall { needed: usize, available: usize },

    #[error("cover already contains {count} ZWNJ/ZWJ chars; they would decode as extra bits")]
    CoverHasMarkers { count: usize },
}

/// Number of bits a cover text can carry.
pub fn capacity_bits(cover: &str) -> usize {
    cover.chars().count()
}

/// Embed `secret` into `cover`, XOR'ing it with `key` first when given.
pub fn embed(cover: &str, secret: &[u8], key: Option<u8>) -> Result<String, EmbedError> {
    let payload = match key {
        Some(k) => xor::apply_key(secret, k),
        None => secret.to_vec(),
    };
    embed_bits(cover, &bytes_to_bits(&payload))
}

pub fn embed_bits(cover: &str, bits: &[bool]) -> Result<String, EmbedError> {
    let (zwnj, zwj) = zw_text::count_zero_width(cover);
    if zwnj + zwj > 0 {
        return Err(EmbedError::CoverHasMarkers { count: zwnj + zwj });
    }

    let available = capacity_bits(cover);
    if bits.len() > available {
        return Err(EmbedError::CoverTooSmall {
            needed: bits.len(),
            available,
        });
    }

    let mut out = String::with_capacity(cover.len() + bits.len() * ZWJ.len_utf8());
    let mut bits = bits.iter();
    for ch in cover.chars() {
        out.push(ch);
        if let Some(&bit) = bits.next() {
            out.push(if bit { ZWJ } else { ZWNJ });
        }
    }

    tracing::debug!(
        cover_chars = available,
        out_bytes = out.len(),
        "embedded zero-width bits"
    );
    Ok(out)
}
