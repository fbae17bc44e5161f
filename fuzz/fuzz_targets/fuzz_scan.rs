#![no_main]
use libfuzzer_sys::fuzz_target;
use zwcrack::config::{RecognitionRule, ScanOptions};

/// Fuzz the whole decode pipeline with arbitrary bytes under both rules.
///
/// Any byte soup must decode to a report with one trace entry per byte
/// and exactly 256 candidates. Must not panic.
fuzz_target!(|data: &[u8]| {
    for rule in [RecognitionRule::Indicator, RecognitionRule::AnyThird] {
        let report = zwcrack::decode(data, ScanOptions { rule, ..ScanOptions::default() });
        assert_eq!(report.scan.trace.len(), data.len());
        assert_eq!(report.candidates.len(), 256);
    }
});
