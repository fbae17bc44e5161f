#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the char-level zero-width reader with arbitrary text.
///
/// Hostile input may contain any Unicode, stray joiners, or none at all.
/// Must not panic.
fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = zwcrack::stego::zw_text::extract_bits(text);
        let _ = zwcrack::stego::zw_text::count_zero_width(text);
    }
});
