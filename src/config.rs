use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// UTF-8 lead byte shared by U+200C and U+200D.
pub const ZW_PREFIX_1: u8 = 0xE2;
/// UTF-8 continuation byte shared by U+200C and U+200D.
pub const ZW_PREFIX_2: u8 = 0x80;
/// Final byte of U+200C ZERO WIDTH NON-JOINER (carries bit 0).
pub const ZWNJ_FINAL: u8 = 0x8C;
/// Final byte of U+200D ZERO WIDTH JOINER (carries bit 1).
pub const ZWJ_FINAL: u8 = 0x8D;

/// The 3-byte marker identifying an embedding site.
///
/// A marker is `prefix_1 prefix_2 X`, where `X` is one of the two
/// payload-indicator bytes. The payload bit is the low bit of `X`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerPattern {
    pub prefix_1: u8,
    pub prefix_2: u8,
    pub indicator_a: u8,
    pub indicator_b: u8,
}

impl Default for MarkerPattern {
    fn default() -> Self {
        Self::zero_width_joiners()
    }
}

impl MarkerPattern {
    /// ZWNJ / ZWJ as encoded in UTF-8 (`E2 80 8C` / `E2 80 8D`).
    pub const fn zero_width_joiners() -> Self {
        Self {
            prefix_1: ZW_PREFIX_1,
            prefix_2: ZW_PREFIX_2,
            indicator_a: ZWNJ_FINAL,
            indicator_b: ZWJ_FINAL,
        }
    }

    /// True if `b` is any of the four marker-related bytes.
    pub fn touches(&self, b: u8) -> bool {
        b == self.prefix_1 || b == self.prefix_2 || b == self.indicator_a || b == self.indicator_b
    }

    /// True if `b` is one of the two payload-indicator bytes.
    pub fn is_indicator(&self, b: u8) -> bool {
        b == self.indicator_a || b == self.indicator_b
    }

    /// Load a pattern from a JSON file such as
    /// `{"prefix_1":226,"prefix_2":128,"indicator_a":140,"indicator_b":141}`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read marker pattern: {}", path.display()))?;
        let pattern: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parse marker pattern: {}", path.display()))?;
        tracing::debug!(?pattern, "loaded marker pattern");
        Ok(pattern)
    }
}

/// How the third window byte is checked once both prefix bytes match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecognitionRule {
    /// Third byte must be `indicator_a` or `indicator_b`.
    #[default]
    Indicator,
    /// Any third byte is accepted. Reproduces the historical decoder,
    /// whose indicator test was always true.
    AnyThird,
}

impl RecognitionRule {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "indicator" | "strict" => Ok(Self::Indicator),
            "any-third" | "any" | "legacy" => Ok(Self::AnyThird),
            _ => bail!("Unknown recognition rule: {s}. Expected: indicator | any-third"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecognitionRule::Indicator => "indicator",
            RecognitionRule::AnyThird => "any-third",
        }
    }

    pub fn accepts(&self, pattern: &MarkerPattern, third: u8) -> bool {
        match self {
            RecognitionRule::Indicator => pattern.is_indicator(third),
            RecognitionRule::AnyThird => true,
        }
    }
}

/// Everything the scanner needs to know about what it is looking for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    pub pattern: MarkerPattern,
    pub rule: RecognitionRule,
}
