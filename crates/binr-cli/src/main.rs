/// binr command-line tool: decode binary fields from files or pipes.
///
/// # Command overview
///
/// ```text
/// binr <COMMAND> [OPTIONS]
///
/// Commands:
///   decode     Decode one record from a file (or `-` for stdin)
///   types      List the decoder catalogue
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Log chunk pulls and decoding progress to stderr
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                         |
/// |------|-------------------------------------------------|
/// | 0    | Success                                         |
/// | 1    | Error (I/O failure, bad layout, short input...) |
///
/// Decoded output goes to stdout; logs and errors go to stderr.
use std::process;

use binr_decoder::config::DEFAULT_CHUNK_SIZE;
use clap::{Parser, Subcommand};

mod cmd_decode;
mod cmd_types;
mod layout;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Streaming binary-field decoder.
#[derive(Parser)]
#[command(name = "binr", version, about = "Decode binary fields from a byte stream")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level (`RUST_LOG` takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Decode one record described by a layout.
    Decode(DecodeArgs),
    /// List the available field types.
    Types,
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `binr decode`.
///
/// ```text
/// ┌──────────────┬───────────────────────────────────────────────────────┐
/// │ Flag         │ Effect                                                │
/// ├──────────────┼───────────────────────────────────────────────────────┤
/// │ --layout L   │ Fields to decode, e.g. `len:leuint16,body:bytes(len)` │
/// │ --json       │ Print the record as JSON                              │
/// │ --chunk-size │ Bytes requested per read (default 8192)               │
/// │ --strict     │ Fail if bytes remain after the last field             │
/// └──────────────┴───────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Input file, or `-` for stdin.
    pub file: String,

    /// Comma-separated field list: `[name:]type[(length)][[count]]`.
    ///
    /// Lengths and counts are integers or the name of an earlier integer
    /// field. Run `binr types` for the type names.
    #[arg(short, long)]
    pub layout: String,

    /// Print the decoded record as JSON.
    #[arg(long)]
    pub json: bool,

    /// Upper bound on bytes requested from the input per read.
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Fail if the input has bytes left after the last field.
    #[arg(long)]
    pub strict: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match cli.command {
        Commands::Decode(args) => cmd_decode::run(&args),
        Commands::Types => cmd_types::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
