pub mod embed;
pub mod scanner;
pub mod zw_text;

// ── Raw bit ↔ byte conversion ───────────────────────────────────────────

/// Convert bytes to bits (MSB-first per byte).
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &b in bytes {
        for i in (0..8).rev() {
            bits.push(((b >> i) & 1) == 1);
        }
    }
    bits
}

/// Convert bits to bytes (MSB-first per byte).
/// Trailing bits that don't fill a full byte are discarded.
pub fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|group| group.iter().fold(0u8, |b, &bit| (b << 1) | bit as u8))
        .collect()
}

/// Render bits as a string of `0` / `1`.
pub fn bits_to_string(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}
