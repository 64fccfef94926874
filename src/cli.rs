// Command-line front end for Oxidiff.
//
// Diffs two files as bytes or as lines and prints one summary line per hunk.
// Exit status follows diff(1): 0 identical, 1 different, 2 trouble.

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::engine::DiffOptions;
use crate::hunk::DEFAULT_CONTEXT;
use crate::io::{self, DiffMode, DiffStats};

const EXIT_SAME: i32 = 0;
const EXIT_DIFFERENT: i32 = 1;
const EXIT_TROUBLE: i32 = 2;

// ---------------------------------------------------------------------------
// Byte size parsing (supports K, M, G suffixes)
// ---------------------------------------------------------------------------

fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty size string".into());
    }
    let (num_part, multiplier) = match s.as_bytes().last() {
        Some(b'k' | b'K') => (&s[..s.len() - 1], 1024u64),
        Some(b'm' | b'M') => (&s[..s.len() - 1], 1024 * 1024),
        Some(b'g' | b'G') => (&s[..s.len() - 1], 1024 * 1024 * 1024),
        _ => (s, 1u64),
    };
    let num: u64 = num_part
        .trim()
        .parse()
        .map_err(|e| format!("invalid size '{s}': {e}"))?;
    num.checked_mul(multiplier)
        .ok_or_else(|| format!("size overflow: '{s}'"))
}

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Myers sequence diff over bytes or lines.
#[derive(Parser, Debug)]
#[command(
    name = "oxidiff",
    version,
    about = "Myers diff: byte and line hunk summaries",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Quiet mode (report only through the exit status).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON on stdout.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Diff two files byte by byte.
    Bytes(BytesArgs),
    /// Diff two text files line by line.
    Lines(LinesArgs),
    /// Print build/configuration details.
    Config,
}

#[derive(Args, Debug)]
struct HunkArgs {
    /// Unchanged elements shown around each change.
    #[arg(long, short = 'U', default_value_t = DEFAULT_CONTEXT)]
    context: usize,

    /// Emit one hunk spanning every change instead of splitting by locality.
    #[arg(long = "single-hunk")]
    single_hunk: bool,

    /// Refuse inputs whose combined length exceeds this (supports K/M/G suffix).
    #[arg(long = "max-size", value_parser = parse_byte_size)]
    max_size: Option<u64>,
}

#[derive(Args, Debug)]
struct BytesArgs {
    /// Original file.
    source: PathBuf,

    /// Changed file.
    target: PathBuf,

    /// Start comparing the source at this byte offset (supports K/M/G suffix).
    #[arg(long, value_parser = parse_byte_size, default_value = "0")]
    offset: u64,

    #[command(flatten)]
    hunks: HunkArgs,
}

#[derive(Args, Debug)]
struct LinesArgs {
    /// Original file.
    source: PathBuf,

    /// Changed file.
    target: PathBuf,

    #[command(flatten)]
    hunks: HunkArgs,
}

// ---------------------------------------------------------------------------
// Resolved command + options (flattened from Cli)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Bytes,
    Lines,
    Config,
}

struct Options {
    command: Command,
    quiet: bool,
    verbose: u8,
    json_output: bool,
    context: usize,
    split_hunks: bool,
    max_size: Option<u64>,
    source_offset: u64,
    source_file: Option<PathBuf>,
    target_file: Option<PathBuf>,
}

fn resolve_options(cli: Cli) -> Options {
    let mut opts = Options {
        command: Command::Config,
        quiet: cli.quiet,
        verbose: cli.verbose.min(2),
        json_output: cli.json_output,
        context: DEFAULT_CONTEXT,
        split_hunks: true,
        max_size: None,
        source_offset: 0,
        source_file: None,
        target_file: None,
    };

    let hunks = match cli.command {
        Cmd::Bytes(args) => {
            opts.command = Command::Bytes;
            opts.source_offset = args.offset;
            opts.source_file = Some(args.source);
            opts.target_file = Some(args.target);
            Some(args.hunks)
        }
        Cmd::Lines(args) => {
            opts.command = Command::Lines;
            opts.source_file = Some(args.source);
            opts.target_file = Some(args.target);
            Some(args.hunks)
        }
        Cmd::Config => None,
    };

    if let Some(h) = hunks {
        opts.context = h.context;
        opts.split_hunks = !h.single_hunk;
        opts.max_size = h.max_size;
    }
    opts
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("oxidiff".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

// ---------------------------------------------------------------------------
// Config command
// ---------------------------------------------------------------------------

fn cmd_config() -> i32 {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!("oxidiff version {version} (Rust)");

    let parallel = cfg!(feature = "parallel") as u8;
    let ptr_size = std::mem::size_of::<*const ()>();

    eprintln!("PARALLEL={parallel}");
    eprintln!("DEFAULT_CONTEXT={DEFAULT_CONTEXT}");
    eprintln!("DEFAULT_SPLIT_HUNKS=1");
    eprintln!("sizeof(usize)={ptr_size}");

    EXIT_SAME
}

// ---------------------------------------------------------------------------
// Build DiffOptions from CLI options
// ---------------------------------------------------------------------------

fn build_diff_options(opts: &Options) -> DiffOptions {
    DiffOptions {
        context: opts.context,
        split_hunks: opts.split_hunks,
        max_input_len: opts
            .max_size
            .map(|n| usize::try_from(n).unwrap_or(usize::MAX)),
    }
}

// ---------------------------------------------------------------------------
// Diff commands
// ---------------------------------------------------------------------------

fn cmd_diff(opts: &Options) -> i32 {
    let (Some(source), Some(target)) = (&opts.source_file, &opts.target_file) else {
        eprintln!("oxidiff: diff commands require a source and a target file");
        return EXIT_TROUBLE;
    };
    let Ok(offset) = usize::try_from(opts.source_offset) else {
        eprintln!("oxidiff: offset {} does not fit in memory", opts.source_offset);
        return EXIT_TROUBLE;
    };

    let mode = match opts.command {
        Command::Lines => DiffMode::Lines,
        _ => DiffMode::Bytes,
    };
    let diff_opts = build_diff_options(opts);

    let stats = match io::diff_files(source, target, mode, offset, &diff_opts) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("oxidiff: {e}");
            return EXIT_TROUBLE;
        }
    };

    if opts.json_output {
        println!("{:#}", stats_json(mode, &stats));
    } else if !opts.quiet {
        print_hunks(&stats);
    }

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "oxidiff: source size: {}, target size: {}, matched {}, deleted {}, inserted {}, hunks: {}",
            stats.source_size,
            stats.target_size,
            stats.matches,
            stats.deletions,
            stats.insertions,
            stats.hunks.len()
        );
    }

    if stats.is_identical() {
        EXIT_SAME
    } else {
        EXIT_DIFFERENT
    }
}

fn print_hunks(stats: &DiffStats) {
    for (i, h) in stats.hunks.iter().enumerate() {
        println!(
            "hunk {}: source {}..{}, target {}..{} (-{} +{})",
            i + 1,
            h.pos_x,
            h.end_x,
            h.pos_y,
            h.end_y,
            h.deletions,
            h.insertions
        );
    }
}

fn stats_json(mode: DiffMode, stats: &DiffStats) -> serde_json::Value {
    let hunks: Vec<serde_json::Value> = stats
        .hunks
        .iter()
        .map(|h| {
            serde_json::json!({
                "pos_x": h.pos_x,
                "end_x": h.end_x,
                "pos_y": h.pos_y,
                "end_y": h.end_y,
                "deletions": h.deletions,
                "insertions": h.insertions,
            })
        })
        .collect();

    serde_json::json!({
        "command": match mode {
            DiffMode::Bytes => "bytes",
            DiffMode::Lines => "lines",
        },
        "source_size": stats.source_size,
        "target_size": stats.target_size,
        "matches": stats.matches,
        "deletions": stats.deletions,
        "insertions": stats.insertions,
        "identical": stats.is_identical(),
        "hunks": hunks,
    })
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    let cli = Cli::parse();
    let opts = resolve_options(cli);

    let default_filter = match opts.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let exit_code = match opts.command {
        Command::Bytes | Command::Lines => cmd_diff(&opts),
        Command::Config => cmd_config(),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
