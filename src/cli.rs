// Command-line front end for zlc.
//
// Resolution is pure: tokens in, `Action` out, no filesystem access. `run`
// is the only place that prints errors and picks the process exit code.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser, ValueHint};
use log::LevelFilter;

use crate::action::{Action, Direction, InputSpec, Level, OutputSpec, Transcode};
use crate::error::Error;
use crate::transcode;

const BIN_NAME: &str = "zlc";

const AFTER_HELP: &str = "\
INPUT defaults to stdin and OUTPUT to stdout; `-` names either stream.
An OUTPUT of `∅` (U+2205 EMPTY SET) discards the result, as does --test;
use it to check the integrity of a compressed stream. Files literally
named `-` or `∅` can be given as `./-` and `./∅`.

Exit status: 0 on success, 1 on I/O or format errors, 2 on usage errors.";

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// zlib stream compressor/decompressor.
#[derive(Parser, Debug)]
#[command(
    name = BIN_NAME,
    version,
    about = "Compress or decompress zlib streams",
    after_help = AFTER_HELP
)]
struct Cli {
    /// Decompress a zlib stream.
    #[arg(short = 'd', long, conflicts_with = "compress")]
    decompress: bool,

    /// Compress to a zlib stream (default).
    #[arg(short = 'z', long)]
    compress: bool,

    /// Compression level (0-9).
    #[arg(long, short = 'l', value_parser = clap::value_parser!(u32).range(0..=9), default_value_t = Level::DEFAULT.get())]
    level: u32,

    /// Overwrite an existing output file.
    #[arg(short = 'f', long)]
    force: bool,

    /// Input file (default: stdin).
    #[arg(long, short = 'i', value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(long, short = 'o', value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Write output to stdout.
    #[arg(short = 'c', long, conflicts_with = "output")]
    stdout: bool,

    /// Check only: decode or encode but discard the output.
    #[arg(short = 't', long, conflicts_with_all = ["output", "stdout"])]
    test: bool,

    /// Quiet mode (errors only).
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// [INPUT] [OUTPUT], positional form.
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    files: Vec<PathBuf>,
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HelpKind {
    Short,
    Long,
}

/// `-h`/`--help` anywhere before a `--` terminator wins over everything else,
/// including `h` bundled in a short-flag cluster such as `-dh`.
fn help_requested(tokens: &[OsString]) -> Option<HelpKind> {
    for token in tokens {
        match token.to_str() {
            Some("--") => return None,
            Some("--help") => return Some(HelpKind::Long),
            Some(s) if s.starts_with('-') && !s.starts_with("--") => {
                if cluster_has_help(&s[1..]) {
                    return Some(HelpKind::Short);
                }
            }
            _ => {}
        }
    }
    None
}

/// Scan a short-flag cluster; the rest of the token after a flag that takes
/// a value is that value.
fn cluster_has_help(cluster: &str) -> bool {
    for c in cluster.chars() {
        match c {
            'h' => return true,
            'l' | 'i' | 'o' => return false,
            _ => {}
        }
    }
    false
}

/// First line of a clap error, without clap's `error: ` prefix.
fn usage_message(e: &clap::Error) -> String {
    let rendered = e.render().to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

fn log_filter(cli: &Cli) -> LevelFilter {
    if cli.quiet {
        return LevelFilter::Error;
    }
    match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

fn resolve_transcode(cli: Cli) -> Result<Transcode, Error> {
    let direction = match (cli.compress, cli.decompress) {
        (_, true) => Direction::Decompress,
        (_, false) => Direction::Compress,
    };

    // Positionals fill whichever of input/output was not given as a flag.
    let mut files = cli.files.into_iter();
    let input = cli.input.or_else(|| files.next());
    let output = cli.output.or_else(|| files.next());
    if let Some(extra) = files.next() {
        return Err(Error::Usage(format!(
            "unexpected extra operand '{}' (one input and one output at most)",
            extra.display()
        )));
    }

    let output = match output {
        Some(path) if cli.test || cli.stdout => {
            let flag = if cli.test { "--test" } else { "--stdout" };
            return Err(Error::Usage(format!(
                "{flag} cannot be combined with output file '{}'",
                path.display()
            )));
        }
        Some(path) => OutputSpec::from_path(path),
        None if cli.test => OutputSpec::Discard,
        None => OutputSpec::Stdout,
    };

    Ok(Transcode {
        direction,
        level: Level::new(cli.level)?,
        input: input.map_or(InputSpec::Stdin, InputSpec::from_path),
        output,
        overwrite: cli.force,
    })
}

/// Resolve `tokens` (program name excluded) into an action and the log level
/// requested by `-v`/`-q`.
pub fn parse<I, T>(tokens: I) -> Result<(Action, LevelFilter), Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let tokens: Vec<OsString> = tokens.into_iter().map(Into::into).collect();

    if let Some(kind) = help_requested(&tokens) {
        let mut cmd = Cli::command();
        let text = match kind {
            HelpKind::Short => cmd.render_help(),
            HelpKind::Long => cmd.render_long_help(),
        };
        return Ok((Action::Help(text.to_string()), LevelFilter::Warn));
    }

    let argv = std::iter::once(OsString::from(BIN_NAME)).chain(tokens);
    let cli = match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(e) => {
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    Ok((Action::Help(e.render().to_string()), LevelFilter::Warn))
                }
                _ => Err(Error::Usage(usage_message(&e))),
            };
        }
    };

    let filter = log_filter(&cli);
    Ok((Action::Transcode(resolve_transcode(cli)?), filter))
}

/// Resolve `tokens` (program name excluded) into an `Action`.
pub fn resolve<I, T>(tokens: I) -> Result<Action, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    parse(tokens).map(|(action, _)| action)
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_resolve(args: &[String]) {
    let _ = resolve(args.iter().cloned());
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn init_logging(filter: LevelFilter) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter.as_str()))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn exit_code(result: Result<(), Error>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{BIN_NAME}: {e}");
            e.exit_code()
        }
    }
}

/// Main CLI entry point. Resolves arguments, runs the action, exits.
pub fn run() -> ! {
    let code = match parse(std::env::args_os().skip(1)) {
        Ok((Action::Help(text), _)) => {
            let mut stdout = io::stdout().lock();
            match stdout.write_all(text.as_bytes()).and_then(|()| stdout.flush()) {
                Ok(()) => 0,
                Err(e) => exit_code(Err(Error::io("writing help", e))),
            }
        }
        Ok((Action::Transcode(job), filter)) => {
            init_logging(filter);
            exit_code(transcode::run(&job))
        }
        Err(e) => exit_code(Err(e)),
    };

    process::exit(code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
