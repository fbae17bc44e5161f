//! Decode pipeline tests: window behaviour, marker recognition under both
//! rules, bit packing and the 256-candidate key search.

use zwcrack::{
    config::{MarkerPattern, RecognitionRule, ScanOptions},
    stego::scanner::{scan_bytes, Scanner, Window},
    xor::KEY_SPACE,
};

const SCENARIO: [u8; 5] = [0x41, 0xE2, 0x80, 0x8C, 0x42];

fn indicator() -> ScanOptions {
    ScanOptions::default()
}

fn any_third() -> ScanOptions {
    ScanOptions {
        rule: RecognitionRule::AnyThird,
        ..ScanOptions::default()
    }
}

fn windows(scan: &zwcrack::Scan) -> Vec<[u8; 3]> {
    scan.trace.iter().map(|e| e.window.bytes()).collect()
}

// ── Sliding window ──────────────────────────────────────────────────

#[test]
fn window_starts_seeded_with_zeros() {
    let scanner = Scanner::new(indicator());
    assert_eq!(scanner.window(), Window::seeded());
    assert_eq!(scanner.window().bytes(), [0, 0, 0]);
    assert!(scanner.bits().is_empty());
}

#[test]
fn feeding_byte_by_byte_accumulates_bits() {
    let mut scanner = Scanner::new(indicator());
    for &b in "x\u{200D}".as_bytes() {
        let entry = scanner.feed(b);
        assert_eq!(scanner.window().current(), b);
        assert_eq!(entry.window, scanner.window());
    }
    assert_eq!(scanner.bits(), &[true]);

    for &b in "y\u{200C}".as_bytes() {
        scanner.feed(b);
    }
    assert_eq!(scanner.bits(), &[true, false]);
}

#[test]
fn scenario_windows_slide_one_byte_at_a_time() {
    let scan = scan_bytes(&SCENARIO, indicator());
    assert_eq!(
        windows(&scan),
        vec![
            [0x00, 0x00, 0x41],
            [0x00, 0x41, 0xE2],
            [0x41, 0xE2, 0x80],
            [0xE2, 0x80, 0x8C],
            [0x80, 0x8C, 0x42],
        ]
    );
}

// ── Recognition rule ────────────────────────────────────────────────

#[test]
fn scenario_indicator_rule_matches_zwnj() {
    let scan = scan_bytes(&SCENARIO, indicator());
    assert_eq!(scan.bits, vec![false]);

    let hits: Vec<usize> = scan
        .trace
        .iter()
        .enumerate()
        .filter_map(|(i, e)| e.bit.map(|_| i))
        .collect();
    assert_eq!(hits, vec![3], "only the fourth window is a marker");
}

#[test]
fn indicator_rule_rejects_non_indicator_third_byte() {
    let input = [0x41, 0xE2, 0x80, 0x41, 0x42];
    let scan = scan_bytes(&input, indicator());
    assert!(scan.bits.is_empty());
}

#[test]
fn any_third_rule_accepts_non_indicator_third_byte() {
    let input = [0x41, 0xE2, 0x80, 0x41, 0x42];
    let scan = scan_bytes(&input, any_third());
    // 0x41 has its low bit set.
    assert_eq!(scan.bits, vec![true]);
}

#[test]
fn any_third_rule_agrees_with_indicator_rule_on_real_markers() {
    let scan_a = scan_bytes(&SCENARIO, indicator());
    let scan_b = scan_bytes(&SCENARIO, any_third());
    assert_eq!(scan_a.bits, scan_b.bits);
}

#[test]
fn zwj_yields_one_and_zwnj_yields_zero() {
    let text = "a\u{200D}b\u{200C}c\u{200D}";
    let scan = scan_bytes(text.as_bytes(), indicator());
    assert_eq!(scan.bits, vec![true, false, true]);
}

#[test]
fn other_zero_width_chars_are_not_markers() {
    // U+200B ZERO WIDTH SPACE is E2 80 8B.
    let text = "a\u{200B}b\u{200B}";
    assert!(scan_bytes(text.as_bytes(), indicator()).bits.is_empty());
    assert_eq!(scan_bytes(text.as_bytes(), any_third()).bits, vec![true, true]);
}

#[test]
fn custom_pattern_is_honoured() {
    let pattern = MarkerPattern {
        prefix_1: b'<',
        prefix_2: b'<',
        indicator_a: b'0',
        indicator_b: b'1',
    };
    let opts = ScanOptions {
        pattern,
        rule: RecognitionRule::Indicator,
    };
    let scan = scan_bytes(b"x<<1y<<0z<<2", opts);
    assert_eq!(scan.bits, vec![true, false]);
}

// ── Diagnostic trace ────────────────────────────────────────────────

#[test]
fn marker_flag_tracks_current_byte_only() {
    let scan = scan_bytes(&SCENARIO, indicator());
    let flags: Vec<bool> = scan.trace.iter().map(|e| e.marker).collect();
    assert_eq!(flags, vec![false, true, true, true, false]);
}

#[test]
fn marker_flag_does_not_add_bits() {
    // Every byte is marker-related, but the order never forms a marker.
    let input = [0x8C, 0x8D, 0x80, 0xE2];
    let scan = scan_bytes(&input, any_third());
    assert!(scan.trace.iter().all(|e| e.marker));
    assert!(scan.bits.is_empty());
}

// ── Full pipeline ───────────────────────────────────────────────────

#[test]
fn decode_packs_bits_and_tries_every_key() {
    let stego = zwcrack::stego::embed::embed(&"x".repeat(16), b"Hi", None).expect("embed ok");
    let report = zwcrack::decode(stego.as_bytes(), indicator());

    assert_eq!(report.bits().len(), 16);
    assert_eq!(report.bytes, b"Hi");
    assert_eq!(report.candidates.len(), KEY_SPACE);
    assert_eq!(report.candidates[0].bytes, report.bytes);
    assert_eq!(report.candidates[0x20].bytes, b"hI");
}

#[test]
fn empty_input_gives_256_empty_candidates() {
    let report = zwcrack::decode(&[], indicator());
    assert!(report.scan.trace.is_empty());
    assert!(report.bits().is_empty());
    assert!(report.bytes.is_empty());
    assert_eq!(report.candidates.len(), KEY_SPACE);
    assert!(report.candidates.iter().all(|c| c.bytes.is_empty()));
}
