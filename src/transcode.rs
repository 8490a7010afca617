// Transcode executor.
//
// One sequential pass per invocation: open input, open output, wrap one of
// them in a zlib stream, copy, finalize, then release output and input. The
// release steps always run; the first error seen in that order is the one
// returned.

use std::io::{self, BufRead, Read, Write};

use log::{debug, info};

use crate::action::{Direction, Level, Transcode};
use crate::error::Error;
use crate::io::{BUF_SIZE, Input, Output, Release};
use crate::zlib::{self, ZlibReader};

// ---------------------------------------------------------------------------
// First-error slot
// ---------------------------------------------------------------------------

/// Keeps the chronologically first error; later ones are logged and dropped.
#[derive(Debug, Default)]
pub struct FirstError(Option<Error>);

impl FirstError {
    pub fn record(&mut self, result: Result<(), Error>) {
        if let Err(err) = result {
            if self.0.is_none() {
                self.0 = Some(err);
            } else {
                debug!("suppressed after earlier failure: {err}");
            }
        }
    }

    pub fn into_result(self) -> Result<(), Error> {
        self.0.map_or(Ok(()), Err)
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Bind the endpoints named by `job` and run it.
pub fn run(job: &Transcode) -> Result<(), Error> {
    info!("{}: {} -> {}", job.direction, job.input, job.output);
    let input = Input::open(&job.input)?;
    // An open failure here drops `input`, which has nothing to report.
    let output = Output::open(&job.output, job.overwrite)?;
    execute(job.direction, job.level, input, output)
}

/// Run one transcode over already-bound endpoints, then release both.
///
/// `level` is ignored when decompressing.
pub fn execute<R, W>(
    direction: Direction,
    level: Level,
    mut input: R,
    mut output: W,
) -> Result<(), Error>
where
    R: BufRead + Release,
    W: Write + Release,
{
    let mut first = FirstError::default();

    first.record(match direction {
        Direction::Compress => compress(&mut input, &mut output, level),
        Direction::Decompress => decompress(&mut input, &mut output),
    });
    first.record(output.release().map_err(|source| Error::Close {
        context: "closing output",
        source,
    }));
    first.record(input.release().map_err(|source| Error::Close {
        context: "closing input",
        source,
    }));

    first.into_result()
}

/// Compress `data` into a new zlib container.
pub fn compress_bytes(data: &[u8], level: Level) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    execute(Direction::Compress, level, data, &mut out)?;
    Ok(out)
}

/// Decompress a complete zlib container held in memory.
pub fn decompress_bytes(container: &[u8]) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    execute(Direction::Decompress, Level::DEFAULT, container, &mut out)?;
    Ok(out)
}

// ---------------------------------------------------------------------------
// Directions
// ---------------------------------------------------------------------------

fn compress<R, W>(input: &mut R, output: &mut W, level: Level) -> Result<(), Error>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    debug!("compress: level {}", level.get());
    let mut encoder = zlib::writer(output, level);
    // On failure the encoder is dropped unfinished: no trailer is written.
    pump(input, &mut encoder).map_err(|e| Error::io("compress", e.into_inner()))?;
    encoder.finish().map_err(|source| Error::Close {
        context: "compress closing",
        source,
    })?;
    Ok(())
}

fn decompress<R, W>(input: &mut R, output: &mut W) -> Result<(), Error>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    let mut reader = ZlibReader::new(input).map_err(|e| match zlib::stream_error(&e) {
        Some(reason) => Error::format("failed creating decompress reader", reason),
        None => Error::io("failed creating decompress reader", e),
    })?;
    let header = reader.header();
    debug!(
        "decompress: window {} bytes, level hint {:?}",
        header.window_size(),
        header.level_hint()
    );

    pump(&mut reader, output).map_err(|e| match e {
        PumpError::Read(e) => match zlib::stream_error(&e) {
            Some(reason) => Error::format("decompress", reason),
            None => Error::io("decompress", e),
        },
        PumpError::Write(e) => Error::io("decompress", e),
    })
}

// ---------------------------------------------------------------------------
// Copy loop
// ---------------------------------------------------------------------------

enum PumpError {
    Read(io::Error),
    Write(io::Error),
}

impl PumpError {
    fn into_inner(self) -> io::Error {
        match self {
            Self::Read(e) | Self::Write(e) => e,
        }
    }
}

/// Copy `reader` into `writer` until EOF, keeping track of which side failed.
fn pump<R, W>(reader: &mut R, writer: &mut W) -> Result<(), PumpError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(()),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(PumpError::Read(e)),
        };
        writer.write_all(&buf[..n]).map_err(PumpError::Write)?;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
