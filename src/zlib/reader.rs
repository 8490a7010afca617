// Streaming zlib decoder.
//
// ZlibReader wraps flate2's low-level `Decompress` state with:
//   - Header validation at construction (fail before any output is produced)
//   - Corrupt payload / Adler-32 mismatch reported as `InvalidData`
//   - A stream that ends before its trailer reported as `UnexpectedEof`
//
// Errors raised by the container itself carry a `StreamError` payload so
// callers can tell them apart from I/O failures of the underlying reader.

use std::io::{self, BufRead, Chain, Cursor, Read};

use flate2::{Decompress, DecompressError, FlushDecompress, Status};

use super::header::{Header, HeaderError};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a zlib stream could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("unexpected end of input before zlib header")]
    MissingHeader,
    #[error(transparent)]
    Header(#[from] HeaderError),
    #[error("corrupt deflate stream: {0}")]
    Corrupt(DecompressError),
    #[error("unexpected end of zlib stream")]
    Truncated,
}

impl StreamError {
    fn into_io(self) -> io::Error {
        let kind = match self {
            Self::MissingHeader | Self::Truncated => io::ErrorKind::UnexpectedEof,
            Self::Header(_) | Self::Corrupt(_) => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, self)
    }
}

/// The container error carried by `err`, if it came from a `ZlibReader`.
pub fn stream_error(err: &io::Error) -> Option<&StreamError> {
    err.get_ref()?.downcast_ref::<StreamError>()
}

// ---------------------------------------------------------------------------
// ZlibReader
// ---------------------------------------------------------------------------

/// Decompressing reader over a zlib container.
pub struct ZlibReader<R> {
    // The header bytes are replayed into the inflater ahead of the body.
    inner: Chain<Cursor<[u8; 2]>, R>,
    state: Decompress,
    header: Header,
    done: bool,
}

impl<R: BufRead> ZlibReader<R> {
    /// Read and validate the container header.
    ///
    /// Fails with an error carrying a `StreamError` when the input is empty
    /// or the header is malformed; other read failures pass through unchanged.
    pub fn new(mut inner: R) -> io::Result<Self> {
        let mut raw = [0u8; 2];
        if let Err(e) = inner.read_exact(&mut raw) {
            return Err(match e.kind() {
                io::ErrorKind::UnexpectedEof => StreamError::MissingHeader.into_io(),
                _ => e,
            });
        }
        let header = Header::parse(raw).map_err(|e| StreamError::from(e).into_io())?;
        Ok(Self {
            inner: Cursor::new(raw).chain(inner),
            state: Decompress::new(true),
            header,
            done: false,
        })
    }

    pub fn header(&self) -> Header {
        self.header
    }

    /// Whether the trailer has been read and verified.
    #[cfg(test)]
    fn is_finished(&self) -> bool {
        self.done
    }
}

impl<R: BufRead> Read for ZlibReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.done || buf.is_empty() {
            return Ok(0);
        }
        loop {
            let input = self.inner.fill_buf()?;
            let eof = input.is_empty();
            let flush = if eof {
                FlushDecompress::Finish
            } else {
                FlushDecompress::None
            };

            let before_in = self.state.total_in();
            let before_out = self.state.total_out();
            let status = self
                .state
                .decompress(input, buf, flush)
                .map_err(|e| StreamError::Corrupt(e).into_io())?;
            let consumed = (self.state.total_in() - before_in) as usize;
            let produced = (self.state.total_out() - before_out) as usize;
            self.inner.consume(consumed);

            match status {
                Status::StreamEnd => {
                    self.done = true;
                    return Ok(produced);
                }
                Status::Ok | Status::BufError if produced == 0 => {
                    if eof {
                        return Err(StreamError::Truncated.into_io());
                    }
                }
                Status::Ok | Status::BufError => return Ok(produced),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
