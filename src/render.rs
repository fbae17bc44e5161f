//! Human- and machine-readable output for a [`DecodeReport`].
//!
//! The text layout follows the historical tool line for line, so existing
//! notes and diffs against old runs stay comparable.

use std::io::{self, Write};

use serde::Serialize;

use crate::stego::bits_to_string;
use crate::DecodeReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Write bytes verbatim instead of escaping non-printable ones.
    pub raw: bool,
    /// Include the per-byte diagnostic trace.
    pub trace: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            raw: false,
            trace: true,
        }
    }
}

/// Printable ASCII as-is, everything else as a Rust-style escape.
pub fn escape_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b' '..=b'~' => out.push(b as char),
            _ => out.extend(b.escape_ascii().map(char::from)),
        }
    }
    out
}

fn write_chars<W: Write>(w: &mut W, bytes: &[u8], raw: bool) -> io::Result<()> {
    if raw {
        w.write_all(bytes)
    } else {
        w.write_all(escape_bytes(bytes).as_bytes())
    }
}

pub fn write_trace<W: Write>(w: &mut W, report: &DecodeReport, raw: bool) -> io::Result<()> {
    for entry in &report.scan.trace {
        w.write_all(b"Char: ")?;
        write_chars(w, &[entry.byte], raw)?;
        write!(w, "\tbits: {:08b}", entry.byte)?;
        if entry.marker {
            w.write_all(b"\t*")?;
        }
        w.write_all(b"\n")?;
    }
    Ok(())
}

/// Write the full text report: trace, bits, bytes, then all 256 candidates.
pub fn write_text<W: Write>(w: &mut W, report: &DecodeReport, opts: RenderOptions) -> io::Result<()> {
    if opts.trace {
        write_trace(w, report, opts.raw)?;
    }

    writeln!(w, "\n\nHidden message in binary:\n{}", bits_to_string(report.bits()))?;

    w.write_all(b"Converted to ASCII: ")?;
    write_chars(w, &report.bytes, opts.raw)?;
    w.write_all(b"\n\n")?;

    w.write_all(b"Trying different XOR keys\n\n")?;
    for candidate in &report.candidates {
        writeln!(w, "For key: {:08b} ({})", candidate.key, candidate.key)?;
        w.write_all(b"Resulting hidden message: ")?;
        write_chars(w, &candidate.bytes, opts.raw)?;
        w.write_all(b"\n\n")?;
    }
    w.flush()
}

#[derive(Serialize)]
struct JsonCandidate {
    key: u8,
    key_binary: String,
    text: String,
    hex: String,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    rule: &'static str,
    pattern: &'a crate::MarkerPattern,
    bytes_read: usize,
    read_error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<&'a [crate::TraceEntry]>,
    bits: String,
    message: String,
    message_hex: String,
    candidates: Vec<JsonCandidate>,
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Write the report as pretty-printed JSON.
pub fn write_json<W: Write>(w: &mut W, report: &DecodeReport, opts: RenderOptions) -> anyhow::Result<()> {
    let json = JsonReport {
        rule: report.options.rule.as_str(),
        pattern: &report.options.pattern,
        bytes_read: report.scan.trace.len(),
        read_error: report.scan.read_error.as_deref(),
        trace: opts.trace.then_some(report.scan.trace.as_slice()),
        bits: bits_to_string(report.bits()),
        message: escape_bytes(&report.bytes),
        message_hex: hex(&report.bytes),
        candidates: report
            .candidates
            .iter()
            .map(|c| JsonCandidate {
                key: c.key,
                key_binary: format!("{:08b}", c.key),
                text: escape_bytes(&c.bytes),
                hex: hex(&c.bytes),
            })
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *w, &json)?;
    writeln!(w)?;
    Ok(())
}
