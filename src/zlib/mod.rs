// zlib container (RFC 1950) plumbing around flate2.
//
// - `header`: CMF/FLG validation
// - `reader`: streaming decode with header check up front
// - `writer`: streaming encode, trailer written only by `finish()`

pub mod header;
pub mod reader;
pub mod writer;

use std::io::Write;

pub use header::{Header, HeaderError, LevelHint};
pub use reader::{StreamError, ZlibReader, stream_error};
pub use writer::ZlibWriter;

use crate::action::Level;

/// Wrap `writer` in a zlib compressor. Call `finish()` to emit the trailer.
pub fn writer<W: Write>(writer: W, level: Level) -> ZlibWriter<W> {
    ZlibWriter::new(writer, level)
}
