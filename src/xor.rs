//! Single-byte XOR key search.
//!
//! Every key from `0x00` to `0xFF` is tried against the reconstructed bytes,
//! in ascending order. Nothing is scored or filtered: picking the right
//! candidate is left to whoever reads the output.

use serde::Serialize;

/// Number of distinct single-byte keys.
pub const KEY_SPACE: usize = 256;

/// One XOR-decoded rendering of the byte sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub key: u8,
    pub bytes: Vec<u8>,
}

/// XOR every byte with `key`.
pub fn apply_key(data: &[u8], key: u8) -> Vec<u8> {
    data.iter().map(|&b| b ^ key).collect()
}

/// Lazily yield the candidate for every key, `0` first and `255` last.
pub fn candidates(data: &[u8]) -> impl Iterator<Item = Candidate> + '_ {
    (0..=u8::MAX).map(move |key| Candidate {
        key,
        bytes: apply_key(data, key),
    })
}

/// All 256 candidates.
pub fn brute_force(data: &[u8]) -> Vec<Candidate> {
    candidates(data).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_whole_key_space_in_order() {
        let all = brute_force(b"hi");
        assert_eq!(all.len(), KEY_SPACE);
        assert_eq!(all.first().map(|c| c.key), Some(0));
        assert_eq!(all.last().map(|c| c.key), Some(255));
        assert!(all.windows(2).all(|w| w[0].key < w[1].key));
    }

    #[test]
    fn key_zero_is_identity() {
        assert_eq!(apply_key(b"secret", 0), b"secret");
    }

    #[test]
    fn known_key_recovers_plaintext() {
        let hidden = apply_key(b"attack at 3pm", 0x5A);
        let found = brute_force(&hidden)
            .into_iter()
            .find(|c| c.bytes == b"attack at 3pm")
            .map(|c| c.key);
        assert_eq!(found, Some(0x5A));
    }
}
