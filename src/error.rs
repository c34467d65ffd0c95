use crate::std::string::String;

use thiserror::Error;

use crate::Standard;

/// Errors returned by parsing, encoding, decoding and conversion.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum Error {
    /// The data does not follow the grammar of the standard.
    ///
    /// Covers wrong lengths, non-digit characters and missing prefixes.
    #[error("data is not valid {0}")]
    Validation(Standard),
    /// The data is well formed but carries the wrong check digit(s).
    #[error("checksum mismatch, expected {expected} but found {found}")]
    ChecksumMismatch {
        /// The check digits computed from the payload.
        expected: String,
        /// The check digits that were supplied.
        found: String,
    },
    /// A replacement part does not fit into its field.
    #[error("part of length {len} does not fit a field of width {width}")]
    LengthViolation { len: usize, width: usize },
    /// A symbol could not be decoded.
    #[error("malformed symbol: {0}")]
    Format(#[from] DecodingError),
    /// A conversion between two standards is not possible for this value.
    #[error("{from} can not be converted to {to}")]
    Incompatible { from: Standard, to: Standard },
    /// A byte can not be represented in Code 128.
    #[error("byte {0:#04x} is outside of the Code 128 range")]
    EncodingDomain(u8),
}

/// Reasons a bit sequence was rejected by a decoder.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Error)]
pub enum DecodingError {
    /// A group of modules resulted in an unknown pattern.
    #[error("pattern {0:b} not recognized")]
    Pattern(u16),
    /// A bar's width or spacing is not valid.
    #[error("bars are not valid")]
    InvalidBars,
    /// A start, center or stop guard pattern is missing.
    #[error("guard pattern not found")]
    Guard,
    /// The odd/even parity sequence of a group of digits is not defined.
    #[error("parity sequence not recognized")]
    Parity,
    /// The stop code at the end is wrong.
    #[error("wrong stop code")]
    WrongStop,
    /// The input was too short.
    #[error("code too short to be valid")]
    Short,
    /// The code's length can not fit an allowed sequence of symbols.
    #[error("length not correct")]
    Length,
    /// The checksum did not match.
    #[error("checksum mismatch")]
    Checksum,
    /// The code did not start with a mode signal.
    #[error("start char did not signal mode")]
    NoMode,
    /// A symbol occurred in a mode that did not support it.
    #[error("unexpected character {0:x}")]
    Unexpected(u8),
    /// A textual bit string contained something other than `0` and `1`.
    #[error("bit strings may only contain 0 and 1")]
    NotBinary,
}

#[test]
fn test_format_conversion() {
    let err: Error = DecodingError::Guard.into();
    assert_eq!(err, Error::Format(DecodingError::Guard));
}

#[cfg(feature = "std")]
#[test]
fn test_messages() {
    use crate::std::string::ToString;

    assert_eq!(
        Error::Validation(Standard::UpcE).to_string(),
        "data is not valid UPC-E"
    );
    assert_eq!(
        Error::EncodingDomain(0x80).to_string(),
        "byte 0x80 is outside of the Code 128 range"
    );
    assert_eq!(
        Error::Format(DecodingError::Checksum).to_string(),
        "malformed symbol: checksum mismatch"
    );
}
