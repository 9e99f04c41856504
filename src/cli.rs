// Command-line front end for Oxirle.
//
// One subcommand per operation: text encode/decode through hex, file
// encode/decode to derived sibling paths, a record inspector, and a build
// configuration dump. Handlers take a resolved `Options` and return an exit
// code.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::hex;
use crate::io::{self as file_io, BatchEntry, Direction};
use crate::rle;
use crate::text;

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Run-length encoder/decoder for text and files.
#[derive(Parser, Debug)]
#[command(
    name = "oxirle",
    version,
    about = "Run-length encoder/decoder with hex text output",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Force overwrite existing output files.
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON to stderr.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// RLE-encode text and print it as hex.
    EncodeText(TextArgs),
    /// Decode hex-encoded RLE data and print it as text.
    DecodeText(TextArgs),
    /// RLE-encode files into `<FILE>.encoded`.
    Encode(FileArgs),
    /// RLE-decode files into `<FILE>.decoded`.
    Decode(FileArgs),
    /// List the (count, value) records of an encoded file.
    Records(RecordsArgs),
    /// Print build/configuration details.
    Config,
}

#[derive(Args, Debug)]
struct TextArgs {
    /// Input text (default: stdin).
    text: Option<String>,
}

#[derive(Args, Debug)]
struct FileArgs {
    /// Input files.
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    inputs: Vec<PathBuf>,

    /// Output file instead of the derived sibling path (single input only).
    #[arg(long, short = 'o', value_hint = ValueHint::FilePath, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Write output to stdout (single input only).
    #[arg(short = 'c', long)]
    stdout: bool,
}

#[derive(Args, Debug)]
struct RecordsArgs {
    /// Encoded input file.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Stop after this many records.
    #[arg(long, short = 'n')]
    limit: Option<usize>,
}

// ---------------------------------------------------------------------------
// Resolved command + options (flattened from Cli)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    EncodeText,
    DecodeText,
    Encode,
    Decode,
    Records,
    Config,
}

#[derive(Debug)]
struct Options {
    command: Command,
    force: bool,
    quiet: bool,
    verbose: u8,
    json_output: bool,
    text: Option<String>,
    inputs: Vec<PathBuf>,
    output_file: Option<PathBuf>,
    use_stdout: bool,
    limit: Option<usize>,
}

fn resolve_options(cli: Cli) -> Options {
    let mut opts = Options {
        command: Command::Config,
        force: cli.force,
        quiet: cli.quiet,
        verbose: cli.verbose.min(2),
        json_output: cli.json_output,
        text: None,
        inputs: Vec::new(),
        output_file: None,
        use_stdout: false,
        limit: None,
    };

    match cli.command {
        Cmd::EncodeText(args) => {
            opts.command = Command::EncodeText;
            opts.text = args.text;
        }
        Cmd::DecodeText(args) => {
            opts.command = Command::DecodeText;
            opts.text = args.text;
        }
        Cmd::Encode(args) => {
            opts.command = Command::Encode;
            apply_file_args(&mut opts, args);
        }
        Cmd::Decode(args) => {
            opts.command = Command::Decode;
            apply_file_args(&mut opts, args);
        }
        Cmd::Records(args) => {
            opts.command = Command::Records;
            opts.inputs = vec![args.input];
            opts.limit = args.limit;
        }
        Cmd::Config => {}
    }
    opts
}

fn apply_file_args(opts: &mut Options, args: FileArgs) {
    opts.inputs = args.inputs;
    opts.output_file = args.output;
    opts.use_stdout = args.stdout;
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("oxirle".to_string())
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
    eprintln!("oxirle version {version} (Rust)");

    let sha256 = cfg!(feature = "file-io") as u8;
    let parallel = cfg!(feature = "parallel") as u8;

    eprintln!("SHA256_STATS={sha256}");
    eprintln!("PARALLEL={parallel}");
    eprintln!("MAX_RECORD_COUNT={}", rle::Record::MAX_COUNT);
    eprintln!("ENCODED_SUFFIX={}", file_io::ENCODED_SUFFIX);
    eprintln!("DECODED_SUFFIX={}", file_io::DECODED_SUFFIX);

    0
}

// ---------------------------------------------------------------------------
// Text commands
// ---------------------------------------------------------------------------

/// Text from the argument, or all of stdin minus one trailing newline.
fn read_text(opts: &Options) -> io::Result<String> {
    if let Some(text) = &opts.text {
        return Ok(text.clone());
    }
    let mut buf = String::new();
    io::stdin().lock().read_to_string(&mut buf)?;
    Ok(strip_newline(&buf).to_string())
}

fn strip_newline(s: &str) -> &str {
    s.strip_suffix("\r\n")
        .or_else(|| s.strip_suffix('\n'))
        .unwrap_or(s)
}

fn print_line(line: &str) -> i32 {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = writeln!(out, "{line}").and_then(|_| out.flush()) {
        eprintln!("oxirle: write: {e}");
        return 1;
    }
    0
}

fn cmd_encode_text(opts: &Options) -> i32 {
    let input = match read_text(opts) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("oxirle: stdin: {e}");
            return 1;
        }
    };

    let hex_text = text::encode_text(&input);

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "oxirle: encode-text: {} bytes in, {} hex digits out",
            input.len(),
            hex_text.len()
        );
    }
    if opts.json_output {
        let json = serde_json::json!({
            "command": "encode-text",
            "input_size": input.len(),
            "records": hex_text.len() / (2 * rle::RECORD_LEN),
        });
        print_json(&json);
    }

    print_line(&hex_text)
}

fn cmd_decode_text(opts: &Options) -> i32 {
    let input = match read_text(opts) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("oxirle: stdin: {e}");
            return 1;
        }
    };

    let decoded = match text::decode_text(input.trim()) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("oxirle: decode-text: {e}");
            return 1;
        }
    };

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "oxirle: decode-text: {} hex digits in, {} bytes out",
            input.trim().len(),
            decoded.len()
        );
    }
    if opts.json_output {
        let json = serde_json::json!({
            "command": "decode-text",
            "input_size": input.trim().len(),
            "output_size": decoded.len(),
        });
        print_json(&json);
    }

    print_line(&decoded)
}

// ---------------------------------------------------------------------------
// File commands
// ---------------------------------------------------------------------------

fn cmd_file(opts: &Options, direction: Direction) -> i32 {
    let name = direction.name();

    if opts.inputs.len() > 1 && (opts.output_file.is_some() || opts.use_stdout) {
        eprintln!("oxirle: {name}: --output and --stdout take a single input file");
        return 1;
    }

    if opts.use_stdout {
        return file_to_stdout(opts, direction);
    }

    if let Some(output) = &opts.output_file {
        let input = &opts.inputs[0];
        if refuse_overwrite(opts, output) {
            return 1;
        }
        let entry = BatchEntry {
            input: input.clone(),
            output: output.clone(),
            result: file_io::process_file(direction, input, output),
        };
        return report(opts, direction, &[entry]);
    }

    // Derived sibling paths; skip any whose output already exists.
    let mut status = 0;
    let mut todo = Vec::with_capacity(opts.inputs.len());
    for input in &opts.inputs {
        if refuse_overwrite(opts, &direction.output_path(input)) {
            status = 1;
        } else {
            todo.push(input.clone());
        }
    }

    let entries = file_io::process_files(direction, &todo);
    status.max(report(opts, direction, &entries))
}

fn refuse_overwrite(opts: &Options, output: &Path) -> bool {
    if output.exists() && !opts.force {
        eprintln!(
            "oxirle: output file exists, use -f to overwrite: {}",
            output.display()
        );
        return true;
    }
    false
}

fn file_to_stdout(opts: &Options, direction: Direction) -> i32 {
    let input = &opts.inputs[0];
    let data = match std::fs::read(input) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("oxirle: input file: {}: {e}", input.display());
            return 1;
        }
    };
    let output = match direction.apply(&data) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("oxirle: {}: {}: {e}", direction.name(), input.display());
            return 1;
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = out.write_all(&output).and_then(|_| out.flush()) {
        eprintln!("oxirle: write: {e}");
        return 1;
    }

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "oxirle: {}: {}: {} -> {} bytes",
            direction.name(),
            input.display(),
            data.len(),
            output.len()
        );
    }
    0
}

fn report(opts: &Options, direction: Direction, entries: &[BatchEntry]) -> i32 {
    let name = direction.name();
    let mut status = 0;
    let mut json_files = Vec::new();

    for BatchEntry {
        input,
        output,
        result,
    } in entries
    {
        match result {
            Ok(stats) => {
                if opts.verbose > 0 && !opts.quiet {
                    eprintln!(
                        "oxirle: {name}: {} -> {} ({} -> {} bytes, {} records)",
                        input.display(),
                        output.display(),
                        stats.input_size,
                        stats.output_size,
                        stats.records
                    );
                }
                if opts.json_output {
                    json_files.push(serde_json::json!({
                        "input": input.display().to_string(),
                        "output": output.display().to_string(),
                        "input_size": stats.input_size,
                        "output_size": stats.output_size,
                        "records": stats.records,
                        "input_sha256": stats.input_sha256.map(|d| hex::to_hex(&d)),
                        "output_sha256": stats.output_sha256.map(|d| hex::to_hex(&d)),
                    }));
                }
            }
            Err(e) => {
                eprintln!("oxirle: {name}: {}: {e}", input.display());
                status = 1;
            }
        }
    }

    if opts.json_output {
        let json = serde_json::json!({
            "command": name,
            "files": json_files,
        });
        print_json(&json);
    }

    status
}

// ---------------------------------------------------------------------------
// Records command
// ---------------------------------------------------------------------------

fn cmd_records(opts: &Options) -> i32 {
    let input = &opts.inputs[0];
    let data = match std::fs::read(input) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("oxirle: input file: {}: {e}", input.display());
            return 1;
        }
    };
    let records = match rle::records(&data) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("oxirle: records: {}: {e}", input.display());
            return 1;
        }
    };

    let total = records.len();
    let decoded_size: usize = records.clone().map(rle::Record::expanded_len).sum();
    let shown = opts.limit.unwrap_or(total).min(total);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (i, record) in records.take(shown).enumerate() {
        let line = format!(
            "{i:>8}  count={:<3}  value=0x{:02x}  {}",
            record.count,
            record.value,
            printable(record.value)
        );
        if let Err(e) = writeln!(out, "{line}") {
            eprintln!("oxirle: write: {e}");
            return 1;
        }
    }
    if let Err(e) = out.flush() {
        eprintln!("oxirle: write: {e}");
        return 1;
    }

    if !opts.quiet {
        eprintln!("oxirle: records: {total}, decoded size: {decoded_size}");
    }
    if opts.json_output {
        let json = serde_json::json!({
            "command": "records",
            "input": input.display().to_string(),
            "records": total,
            "decoded_size": decoded_size,
        });
        print_json(&json);
    }
    0
}

fn printable(value: u8) -> String {
    if value.is_ascii_graphic() || value == b' ' {
        format!("'{}'", value as char)
    } else {
        String::new()
    }
}

fn print_json(json: &serde_json::Value) {
    match serde_json::to_string_pretty(json) {
        Ok(s) => eprintln!("{s}"),
        Err(e) => eprintln!("oxirle: json: {e}"),
    }
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
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let exit_code = match opts.command {
        Command::EncodeText => cmd_encode_text(&opts),
        Command::DecodeText => cmd_decode_text(&opts),
        Command::Encode => cmd_file(&opts, Direction::Encode),
        Command::Decode => cmd_file(&opts, Direction::Decode),
        Command::Records => cmd_records(&opts),
        Command::Config => cmd_config(),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
