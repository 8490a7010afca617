// Endpoint binding for the transcode executor.
//
// Turns an `InputSpec` / `OutputSpec` into an open, buffered stream and
// defines `Release`, the explicit teardown step each endpoint goes through
// once the copy is over. Standard streams are process-owned: releasing them
// flushes but never closes.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;

use crate::action::{InputSpec, OutputSpec};
use crate::error::Error;

// ---------------------------------------------------------------------------
// Default buffer size
// ---------------------------------------------------------------------------

pub(crate) const BUF_SIZE: usize = 64 * 1024; // 64 KiB

// ---------------------------------------------------------------------------
// Release
// ---------------------------------------------------------------------------

/// Explicit, fallible teardown of an endpoint.
///
/// Called exactly once, after the copy, whether or not the copy succeeded.
pub trait Release {
    fn release(self) -> io::Result<()>;
}

// In-memory endpoints hold no resources.

impl Release for &[u8] {
    fn release(self) -> io::Result<()> {
        Ok(())
    }
}

impl Release for &mut Vec<u8> {
    fn release(self) -> io::Result<()> {
        Ok(())
    }
}

impl Release for io::Sink {
    fn release(self) -> io::Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// An open input endpoint.
pub enum Input {
    Stdin(io::StdinLock<'static>),
    File(BufReader<File>),
}

impl Input {
    pub fn open(spec: &InputSpec) -> Result<Self, Error> {
        match spec {
            InputSpec::Stdin => {
                debug!("input: stdin");
                Ok(Self::Stdin(io::stdin().lock()))
            }
            InputSpec::Path(path) => {
                let file = File::open(path)
                    .map_err(|e| Error::io(format!("open input {}", path.display()), e))?;
                debug!("input: {}", path.display());
                Ok(Self::File(BufReader::with_capacity(BUF_SIZE, file)))
            }
        }
    }
}

impl Read for Input {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Stdin(r) => r.read(buf),
            Self::File(r) => r.read(buf),
        }
    }
}

impl BufRead for Input {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            Self::Stdin(r) => r.fill_buf(),
            Self::File(r) => r.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            Self::Stdin(r) => r.consume(amt),
            Self::File(r) => r.consume(amt),
        }
    }
}

impl Release for Input {
    fn release(self) -> io::Result<()> {
        // Read-only handles have nothing to report on close; stdin stays open.
        if matches!(self, Self::File(_)) {
            debug!("input: closed");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// An open output endpoint.
pub enum Output {
    Stdout(BufWriter<io::StdoutLock<'static>>),
    Discard(io::Sink),
    File(BufWriter<File>),
}

impl Output {
    /// Bind `spec`. A named file is created if absent; an existing one is
    /// truncated only when `overwrite` is set, and otherwise left untouched.
    pub fn open(spec: &OutputSpec, overwrite: bool) -> Result<Self, Error> {
        match spec {
            OutputSpec::Stdout => {
                debug!("output: stdout");
                Ok(Self::Stdout(BufWriter::with_capacity(
                    BUF_SIZE,
                    io::stdout().lock(),
                )))
            }
            OutputSpec::Discard => {
                debug!("output: discard");
                Ok(Self::Discard(io::sink()))
            }
            OutputSpec::Path(path) => {
                let file = create_file(path, overwrite)?;
                debug!("output: {} (overwrite={overwrite})", path.display());
                Ok(Self::File(BufWriter::with_capacity(BUF_SIZE, file)))
            }
        }
    }
}

fn create_file(path: &Path, overwrite: bool) -> Result<File, Error> {
    let mut opts = OpenOptions::new();
    opts.write(true);
    if overwrite {
        opts.create(true).truncate(true);
    } else {
        // Atomic: fails on an existing file without touching it.
        opts.create_new(true);
    }
    opts.open(path).map_err(|e| {
        if e.kind() == io::ErrorKind::AlreadyExists {
            Error::io(
                format!("output file exists, use -f to overwrite: {}", path.display()),
                e,
            )
        } else {
            Error::io(format!("create output {}", path.display()), e)
        }
    })
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(w) => w.write(buf),
            Self::Discard(w) => w.write(buf),
            Self::File(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::Discard(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Release for Output {
    fn release(self) -> io::Result<()> {
        match self {
            Self::Stdout(mut w) => w.flush(),
            Self::Discard(_) => Ok(()),
            Self::File(w) => {
                let file = w.into_inner().map_err(|e| e.into_error())?;
                drop(file);
                debug!("output: closed");
                Ok(())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
