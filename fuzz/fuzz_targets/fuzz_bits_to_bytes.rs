#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz bit packing with arbitrary-length bit patterns.
///
/// Each input byte contributes one bit, so lengths that are not a multiple
/// of eight are common. The partial tail must be dropped, not padded.
fuzz_target!(|data: &[u8]| {
    let bits: Vec<bool> = data.iter().map(|b| b & 1 == 1).collect();

    let bytes = zwcrack::stego::bits_to_bytes(&bits);
    assert_eq!(bytes.len(), bits.len() / 8);
    assert_eq!(zwcrack::stego::bytes_to_bits(&bytes), bits[..bytes.len() * 8]);
});
