// zlib container header parsing (RFC 1950, section 2.2).
//
// The two header bytes are CMF (method + window size) and FLG (check bits,
// preset dictionary flag, level hint). `(CMF * 256 + FLG)` must be a
// multiple of 31.

// ---------------------------------------------------------------------------
// Field layout
// ---------------------------------------------------------------------------

/// Compression method "deflate" (CM = 8).
pub const CM_DEFLATE: u8 = 8;
/// Largest permitted CINFO (32 KiB window).
pub const CINFO_MAX: u8 = 7;
/// FDICT bit in FLG.
pub const FLG_FDICT: u8 = 1 << 5;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeaderError {
    #[error("invalid zlib header checksum")]
    Checksum,
    #[error("unsupported compression method {0}")]
    Method(u8),
    #[error("invalid window size (CINFO={0})")]
    WindowSize(u8),
    #[error("preset dictionary not supported")]
    PresetDictionary,
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Compression effort advertised by the encoder (FLEVEL). Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelHint {
    Fastest,
    Fast,
    Default,
    Maximum,
}

/// A validated zlib header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    cmf: u8,
    flg: u8,
}

impl Header {
    /// Validate the two leading bytes of a zlib stream.
    pub fn parse(bytes: [u8; 2]) -> Result<Self, HeaderError> {
        let [cmf, flg] = bytes;
        if u16::from_be_bytes(bytes) % 31 != 0 {
            return Err(HeaderError::Checksum);
        }
        if cmf & 0x0F != CM_DEFLATE {
            return Err(HeaderError::Method(cmf & 0x0F));
        }
        if cmf >> 4 > CINFO_MAX {
            return Err(HeaderError::WindowSize(cmf >> 4));
        }
        if flg & FLG_FDICT != 0 {
            return Err(HeaderError::PresetDictionary);
        }
        Ok(Self { cmf, flg })
    }

    /// LZ77 window size in bytes.
    pub fn window_size(&self) -> usize {
        1 << ((self.cmf >> 4) + 8)
    }

    pub fn level_hint(&self) -> LevelHint {
        match self.flg >> 6 {
            0 => LevelHint::Fastest,
            1 => LevelHint::Fast,
            2 => LevelHint::Default,
            _ => LevelHint::Maximum,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
