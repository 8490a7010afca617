// Resolved, immutable description of one invocation.
//
// Built once by the resolver in `cli` and consumed once by the executor in
// `transcode`. Sentinel tokens are turned into enum variants here so that the
// I/O code never compares strings.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Token that selects a standard stream (stdin for input, stdout for output).
pub const STDIO_SENTINEL: &str = "-";

/// Token that selects the discard sink for output (U+2205 EMPTY SET).
pub const DISCARD_SENTINEL: &str = "\u{2205}";

// ---------------------------------------------------------------------------
// Direction / level
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Compress,
    Decompress,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compress => f.write_str("compress"),
            Self::Decompress => f.write_str("decompress"),
        }
    }
}

/// Compression level in the zlib range `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level(u32);

impl Level {
    pub const MIN: u32 = 0;
    pub const MAX: u32 = 9;
    /// zlib's "default" tier.
    pub const DEFAULT: Level = Level(6);

    pub fn new(level: u32) -> Result<Self, Error> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(Error::Usage(format!(
                "invalid compression level {level} (expected {}-{})",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<Level> for flate2::Compression {
    fn from(level: Level) -> Self {
        flate2::Compression::new(level.0)
    }
}

// ---------------------------------------------------------------------------
// Endpoint specs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputSpec {
    #[default]
    Stdin,
    Path(PathBuf),
}

impl InputSpec {
    /// `-` selects stdin; anything else is a file path.
    pub fn from_path(path: PathBuf) -> Self {
        if path.as_os_str() == OsStr::new(STDIO_SENTINEL) {
            Self::Stdin
        } else {
            Self::Path(path)
        }
    }
}

impl fmt::Display for InputSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("stdin"),
            Self::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputSpec {
    #[default]
    Stdout,
    Discard,
    Path(PathBuf),
}

impl OutputSpec {
    /// `-` selects stdout, `∅` the discard sink; anything else is a file path.
    pub fn from_path(path: PathBuf) -> Self {
        let os = path.as_os_str();
        if os == OsStr::new(STDIO_SENTINEL) {
            Self::Stdout
        } else if os == OsStr::new(DISCARD_SENTINEL) {
            Self::Discard
        } else {
            Self::Path(path)
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Path(p) => Some(p),
            Self::Stdout | Self::Discard => None,
        }
    }
}

impl fmt::Display for OutputSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::Discard => f.write_str("discard"),
            Self::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// A runnable transcode: everything the executor needs, nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transcode {
    pub direction: Direction,
    /// Only consulted when compressing.
    pub level: Level,
    pub input: InputSpec,
    pub output: OutputSpec,
    /// Truncate an existing output file instead of refusing to open it.
    pub overwrite: bool,
}

/// Outcome of resolving a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print this text to stdout and exit successfully (help or version).
    Help(String),
    Transcode(Transcode),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
