use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use zwcrack::{
    config::{MarkerPattern, RecognitionRule, ScanOptions},
    render::{self, RenderOptions},
    stego, DEFAULT_INPUT,
};

#[derive(Parser)]
#[command(
    name = "zwcrack",
    version,
    about = "Recover zero-width hidden bits from a text file and try every single-byte XOR key.",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a file for markers, rebuild the hidden bytes and print all 256 XOR candidates
    Decode(DecodeArgs),

    /// Hide a message in a cover text with zero-width joiners
    Embed {
        /// Path to cover text file
        #[arg(long)]
        cover: PathBuf,

        /// Output stego text file
        #[arg(long)]
        out: PathBuf,

        /// Message to embed (mutually exclusive with --secret)
        #[arg(long)]
        message: Option<String>,

        /// File whose bytes to embed (mutually exclusive with --message)
        #[arg(long)]
        secret: Option<PathBuf>,

        /// Single-byte XOR key applied before embedding (0-255)
        #[arg(long)]
        key: Option<u8>,
    },

    /// Summarize marker bytes, zero-width chars and capacity of a file (informational)
    Scan {
        /// Path to the file to inspect
        #[arg(default_value = DEFAULT_INPUT)]
        path: PathBuf,

        /// JSON file overriding the marker pattern
        #[arg(long)]
        pattern: Option<PathBuf>,
    },
}

#[derive(Parser)]
#[command(name = "zwcrack")]
struct DecodeArgs {
    /// Path to the stego text file
    #[arg(default_value = DEFAULT_INPUT)]
    path: PathBuf,

    /// Marker recognition rule: indicator | any-third
    #[arg(long, default_value = "indicator")]
    rule: String,

    /// JSON file overriding the marker pattern
    #[arg(long)]
    pattern: Option<PathBuf>,

    /// Write bytes verbatim instead of escaping non-printable ones
    #[arg(long, default_value_t = false)]
    raw: bool,

    /// Emit the report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Skip the per-byte trace
    #[arg(long, default_value_t = false)]
    no_trace: bool,

    /// Fail instead of decoding empty data when the input cannot be opened
    #[arg(long, default_value_t = false)]
    strict: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        // Bare invocation decodes the default input with clap's defaults.
        None => cmd_decode(DecodeArgs::parse_from(["zwcrack"])),
        Some(Commands::Decode(args)) => cmd_decode(args),
        Some(Commands::Embed {
            cover,
            out,
            message,
            secret,
            key,
        }) => cmd_embed(&cover, &out, message.as_deref(), secret.as_deref(), key),
        Some(Commands::Scan { path, pattern }) => cmd_scan(&path, pattern.as_deref()),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_pattern(path: Option<&Path>) -> Result<MarkerPattern> {
    match path {
        Some(p) => MarkerPattern::load(p),
        None => Ok(MarkerPattern::default()),
    }
}

fn cmd_decode(args: DecodeArgs) -> Result<()> {
    let options = ScanOptions {
        pattern: load_pattern(args.pattern.as_deref())?,
        rule: RecognitionRule::parse(&args.rule)?,
    };

    let report = match zwcrack::decode_file(&args.path, options) {
        Ok(report) => report,
        Err(e) if args.strict => return Err(e).context("decode failed"),
        Err(e) => {
            tracing::warn!(path = %e.path().display(), error = %e, "continuing with empty input");
            zwcrack::decode(&[], options)
        }
    };

    let opts = RenderOptions {
        raw: args.raw,
        trace: !args.no_trace,
    };

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if args.json {
        render::write_json(&mut out, &report, opts)?;
    } else {
        render::write_text(&mut out, &report, opts).context("write report")?;
    }
    out.flush()?;
    Ok(())
}

fn cmd_embed(
    cover_path: &Path,
    out_path: &Path,
    message: Option<&str>,
    secret_path: Option<&Path>,
    key: Option<u8>,
) -> Result<()> {
    let secret: Vec<u8> = match (message, secret_path) {
        (Some(_), Some(_)) => bail!("Use either --message or --secret, not both."),
        (None, None) => bail!("Provide one of --message or --secret."),
        (Some(msg), None) => msg.as_bytes().to_vec(),
        (None, Some(p)) => {
            std::fs::read(p).with_context(|| format!("read secret file: {}", p.display()))?
        }
    };

    let cover = std::fs::read_to_string(cover_path)
        .with_context(|| format!("read cover file: {}", cover_path.display()))?;

    let stego_text = stego::embed::embed(&cover, &secret, key).context("embed failed")?;

    std::fs::write(out_path, stego_text.as_bytes())
        .with_context(|| format!("write stego text: {}", out_path.display()))?;

    println!(
        "OK: embedded {} bytes ({} bits) into {} cover chars",
        secret.len(),
        secret.len() * 8,
        stego::embed::capacity_bits(&cover)
    );
    if let Some(k) = key {
        println!("XOR key: {k:08b} ({k})");
    }
    println!("Wrote: {}", out_path.display());
    Ok(())
}

fn cmd_scan(path: &Path, pattern: Option<&Path>) -> Result<()> {
    let pattern = load_pattern(pattern)?;
    let bytes = std::fs::read(path).with_context(|| format!("read file: {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes);

    let count = |b: u8| bytes.iter().filter(|&&x| x == b).count();

    let strict = stego::scanner::scan_bytes(
        &bytes,
        ScanOptions {
            pattern,
            rule: RecognitionRule::Indicator,
        },
    );
    let loose = stego::scanner::scan_bytes(
        &bytes,
        ScanOptions {
            pattern,
            rule: RecognitionRule::AnyThird,
        },
    );

    let (zwnj, zwj) = stego::zw_text::count_zero_width(&text);
    let text_bits = stego::zw_text::extract_bits(&text);

    println!("Scan results for: {}", path.display());
    println!("  File size:       {} bytes", bytes.len());
    println!("  Valid UTF-8:     {}", std::str::from_utf8(&bytes).is_ok());
    println!();
    println!("  Marker bytes:");
    println!("    prefix 1    0x{:02X}: {}", pattern.prefix_1, count(pattern.prefix_1));
    println!("    prefix 2    0x{:02X}: {}", pattern.prefix_2, count(pattern.prefix_2));
    println!("    indicator A 0x{:02X}: {}", pattern.indicator_a, count(pattern.indicator_a));
    println!("    indicator B 0x{:02X}: {}", pattern.indicator_b, count(pattern.indicator_b));
    println!();
    println!("  Markers (indicator rule): {} bits -> {} bytes", strict.bits.len(), strict.bits.len() / 8);
    println!("  Markers (any-third rule): {} bits -> {} bytes", loose.bits.len(), loose.bits.len() / 8);
    println!("  Zero-width chars:         {zwnj} ZWNJ, {zwj} ZWJ");
    println!("  Odd-position ZW bits:     {}", text_bits.len());
    println!();
    println!(
        "  Capacity as cover:        {} bits ({} bytes)",
        stego::embed::capacity_bits(&text),
        stego::embed::capacity_bits(&text) / 8
    );

    let mut warnings = Vec::new();
    if strict.bits.len() % 8 != 0 {
        warnings.push(format!(
            "{} trailing bits do not fill a byte and will be dropped.",
            strict.bits.len() % 8
        ));
    }
    if strict.bits.len() != loose.bits.len() {
        warnings.push(format!(
            "{} prefix pairs are followed by a non-indicator byte; \
             the any-third rule reads them as bits.",
            loose.bits.len() - strict.bits.len()
        ));
    }
    if text_bits != strict.bits {
        warnings.push(
            "Odd-position zero-width reading disagrees with the byte scanner; \
             markers may not be interleaved one per cover char."
                .to_string(),
        );
    }

    if !warnings.is_empty() {
        println!();
        for (i, w) in warnings.iter().enumerate() {
            println!("  WARNING {}: {}", i + 1, w);
        }
    }

    Ok(())
}
