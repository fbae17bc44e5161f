use std::io::{BufReader, Read};

use serde::Serialize;

use crate::config::ScanOptions;

/// Byte-level marker scanner.
///
/// Bytes pass through a 3-slot window, oldest first. Before the first byte
/// the window holds `[0, 0]`, so no marker can be recognized until at
/// least three bytes have been read.
///
/// After each shift the window is checked:
/// - `window[0] == prefix_1` and `window[1] == prefix_2`
/// - the recognition rule accepts `window[2]`
///
/// Each recognized marker appends `window[2] & 1` to the bit accumulator.
/// With the default pattern that is ZWNJ (`E2 80 8C`) => 0 and
/// ZWJ (`E2 80 8D`) => 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Window([u8; 3]);

impl Window {
    /// Window before any byte has been read.
    pub fn seeded() -> Self {
        Self([0; 3])
    }

    /// Evict the oldest byte and append `byte`.
    pub fn push(&mut self, byte: u8) {
        self.0[0] = self.0[1];
        self.0[1] = self.0[2];
        self.0[2] = byte;
    }

    pub fn bytes(&self) -> [u8; 3] {
        self.0
    }

    pub fn current(&self) -> u8 {
        self.0[2]
    }
}

/// Diagnostic record for one consumed byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraceEntry {
    pub byte: u8,
    /// The byte equals one of the four marker-related bytes.
    pub marker: bool,
    pub window: Window,
    /// Bit appended for this byte, if a marker ended here.
    pub bit: Option<bool>,
}

/// Result of scanning a whole stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Scan {
    pub trace: Vec<TraceEntry>,
    pub bits: Vec<bool>,
    /// Set when a read failure ended the stream early.
    pub read_error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Scanner {
    opts: ScanOptions,
    window: Window,
    trace: Vec<TraceEntry>,
    bits: Vec<bool>,
}

impl Scanner {
    pub fn new(opts: ScanOptions) -> Self {
        Self {
            opts,
            window: Window::seeded(),
            trace: Vec::new(),
            bits: Vec::new(),
        }
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Consume one byte and return its trace entry.
    pub fn feed(&mut self, byte: u8) -> TraceEntry {
        self.window.push(byte);
        let [w0, w1, _] = self.window.bytes();
        let current = self.window.current();
        let pattern = &self.opts.pattern;

        let bit = (w0 == pattern.prefix_1
            && w1 == pattern.prefix_2
            && self.opts.rule.accepts(pattern, current))
        .then_some(current & 1 == 1);

        if let Some(b) = bit {
            self.bits.push(b);
        }

        let entry = TraceEntry {
            byte,
            marker: pattern.touches(current),
            window: self.window,
            bit,
        };
        self.trace.push(entry);
        entry
    }

    pub fn finish(self, read_error: Option<std::io::Error>) -> Scan {
        Scan {
            trace: self.trace,
            bits: self.bits,
            read_error: read_error.map(|e| e.to_string()),
        }
    }
}

/// Scan an in-memory byte slice.
pub fn scan_bytes(bytes: &[u8], opts: ScanOptions) -> Scan {
    let mut scanner = Scanner::new(opts);
    for &b in bytes {
        scanner.feed(b);
    }
    scanner.finish(None)
}

/// Scan a reader front to back, one byte at a time.
///
/// A read failure ends the scan exactly like end-of-stream; the error is
/// kept in [`Scan::read_error`] rather than returned.
pub fn scan_reader<R: Read>(reader: R, opts: ScanOptions) -> Scan {
    let mut scanner = Scanner::new(opts);
    let mut read_error = None;

    for byte in BufReader::new(reader).bytes() {
        match byte {
            Ok(b) => {
                scanner.feed(b);
            }
            Err(e) => {
                tracing::warn!(error = %e, "read failed, ending scan early");
                read_error = Some(e);
                break;
            }
        }
    }

    let scan = scanner.finish(read_error);
    tracing::debug!(bytes = scan.trace.len(), bits = scan.bits.len(), "scan finished");
    scan
}
