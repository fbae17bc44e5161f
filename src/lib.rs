//! zwcrack core library.
//!
//! This crate provides the primitives for recovering a message hidden with
//! zero-width Unicode markers and a single-byte XOR key:
//! - Byte-level marker scanner over a 3-byte sliding window
//! - Bit accumulator -> byte reconstruction (MSB-first, partial byte dropped)
//! - Exhaustive single-byte XOR key search (all 256 candidates, unranked)
//! - Text and JSON rendering of the decode report
//! - The companion zero-width embedder

pub mod config;
pub mod error;
pub mod render;
pub mod stego;
pub mod xor;

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use serde::Serialize;

pub use config::{MarkerPattern, RecognitionRule, ScanOptions};
pub use error::InputError;
pub use stego::scanner::{Scan, TraceEntry, Window};
pub use xor::Candidate;

/// Default input path, as used by the historical tool.
pub const DEFAULT_INPUT: &str = "steg_text.txt";

/// Everything the decode pipeline produced, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeReport {
    pub options: ScanOptions,
    pub scan: Scan,
    /// Bit accumulator packed MSB-first.
    pub bytes: Vec<u8>,
    /// One entry per key, ascending.
    pub candidates: Vec<Candidate>,
}

impl DecodeReport {
    fn from_scan(scan: Scan, options: ScanOptions) -> Self {
        let bytes = stego::bits_to_bytes(&scan.bits);
        let candidates = xor::brute_force(&bytes);
        Self {
            options,
            scan,
            bytes,
            candidates,
        }
    }

    pub fn bits(&self) -> &[bool] {
        &self.scan.bits
    }
}

/// Run the full pipeline over an in-memory buffer.
pub fn decode(input: &[u8], options: ScanOptions) -> DecodeReport {
    DecodeReport::from_scan(stego::scanner::scan_bytes(input, options), options)
}

/// Run the full pipeline over a reader, consuming it once.
pub fn decode_reader<R: Read>(reader: R, options: ScanOptions) -> DecodeReport {
    DecodeReport::from_scan(stego::scanner::scan_reader(reader, options), options)
}

/// Open `path` and run the full pipeline over its bytes.
///
/// An empty file is not an error; a missing or unopenable one is.
pub fn decode_file(path: &Path, options: ScanOptions) -> Result<DecodeReport, InputError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => InputError::NotFound {
            path: path.to_path_buf(),
        },
        _ => InputError::Open {
            path: path.to_path_buf(),
            source,
        },
    })?;
    tracing::info!(path = %path.display(), "scanning input");
    Ok(decode_reader(file, options))
}
