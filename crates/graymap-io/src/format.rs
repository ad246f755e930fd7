//! Graymap variant detection
//!
//! Detects the graymap variant by examining the magic number at the
//! start of the data.

use crate::{IoError, IoResult};

/// Magic numbers for the supported graymap variants
mod magic {
    /// PGM ASCII: "P2"
    pub const PGM_ASCII: &[u8] = b"P2";

    /// PGM binary: "P5"
    pub const PGM_BINARY: &[u8] = b"P5";
}

/// Graymap variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PgmVariant {
    /// Plain text variant (`P2`): decimal samples separated by whitespace
    Ascii,
    /// Raw binary variant (`P5`): one byte per sample
    Binary,
}

impl PgmVariant {
    /// The two-byte magic number of this variant.
    pub fn magic(self) -> &'static str {
        match self {
            Self::Ascii => "P2",
            Self::Binary => "P5",
        }
    }

    /// Map a magic token to a variant.
    ///
    /// Returns `None` unless `token` is exactly `P2` or `P5`.
    pub fn from_magic(token: &[u8]) -> Option<Self> {
        match token {
            magic::PGM_ASCII => Some(Self::Ascii),
            magic::PGM_BINARY => Some(Self::Binary),
            _ => None,
        }
    }
}

/// Detect the graymap variant from the first bytes of a file.
pub fn detect_variant(data: &[u8]) -> IoResult<PgmVariant> {
    data.get(..2)
        .and_then(PgmVariant::from_magic)
        .ok_or_else(|| IoError::UnsupportedFormat("not a P2 or P5 graymap".to_string()))
}
