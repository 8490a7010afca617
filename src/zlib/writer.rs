// Streaming zlib encoder.
//
// ZlibWriter drives flate2's low-level `Compress` state directly. The final
// deflate block and the Adler-32 trailer are written only by `finish()`;
// dropping the writer discards whatever is still buffered, so an aborted copy
// never leaves a well-formed container behind.

use std::io::{self, Write};

use flate2::{Compress, FlushCompress, Status};

use crate::action::Level;
use crate::io::BUF_SIZE;

/// Compressing writer producing a zlib container.
pub struct ZlibWriter<W: Write> {
    inner: W,
    state: Compress,
    // Compressed bytes not yet handed to `inner`.
    buf: Vec<u8>,
}

impl<W: Write> ZlibWriter<W> {
    pub fn new(inner: W, level: Level) -> Self {
        Self {
            inner,
            state: Compress::new(level.into(), true),
            buf: Vec::with_capacity(BUF_SIZE),
        }
    }

    /// Write the final block and trailer, flush, and hand back the sink.
    pub fn finish(mut self) -> io::Result<W> {
        loop {
            self.dump()?;
            let status = self.run(&[], FlushCompress::Finish)?;
            if matches!(status, Status::StreamEnd) {
                break;
            }
        }
        self.dump()?;
        self.inner.flush()?;
        Ok(self.inner)
    }

    fn run(&mut self, input: &[u8], flush: FlushCompress) -> io::Result<Status> {
        self.state
            .compress_vec(input, &mut self.buf, flush)
            .map_err(io::Error::other)
    }

    fn dump(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            self.inner.write_all(&self.buf)?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl<W: Write> Write for ZlibWriter<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        loop {
            self.dump()?;
            let before = self.state.total_in();
            self.run(data, FlushCompress::None)?;
            let consumed = (self.state.total_in() - before) as usize;
            // Nothing consumed means the output buffer filled up; drain and retry.
            if consumed > 0 || data.is_empty() || self.buf.is_empty() {
                return Ok(consumed);
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.dump()?;
        self.run(&[], FlushCompress::Sync)?;
        loop {
            self.dump()?;
            let before = self.state.total_out();
            self.run(&[], FlushCompress::None)?;
            if before == self.state.total_out() {
                break;
            }
        }
        self.inner.flush()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
