//! zlc: a zlib stream compressor/decompressor.
//!
//! The crate provides:
//! - Immutable action descriptors (`action`)
//! - Endpoint binding with overwrite protection (`io`)
//! - zlib container plumbing over flate2 (`zlib`)
//! - The resource-safe transcode executor (`transcode`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```no_run
//! use zlc::action::Level;
//! use zlc::transcode;
//!
//! let container = transcode::compress_bytes(b"hello zlib", Level::DEFAULT).unwrap();
//! let raw = transcode::decompress_bytes(&container).unwrap();
//! assert_eq!(raw, b"hello zlib");
//! ```

pub mod action;
pub mod error;
pub mod io;
pub mod transcode;
pub mod zlib;

#[cfg(feature = "cli")]
pub mod cli;

pub use action::{Action, Direction, InputSpec, Level, OutputSpec, Transcode};
pub use error::Error;
