//! This crate implements encoding and decoding of linear barcodes: EAN-13
//! (with its ISMN range), UPC-A, UPC-E, the EAN-2 add-on, MSI Plessey and
//! Code 128.
//!
//! Digit based standards go through a validated [`BarcodeValue`] which
//! computes or verifies the check digit(s) and encodes to a [`Symbol`], a
//! sequence of modules framed by the guard patterns of the standard.
//!
//! ## Example
//!
//! ```rust
//! use linear_barcode::{BarcodeValue, Standard};
//!
//! let upce = BarcodeValue::parse(Standard::UpcE, "0124013", false)?;
//! assert_eq!(upce.checksum(), "6");
//! assert_eq!(upce.to_upca()?.data(true), "012400000016");
//!
//! let symbol = upce.encode();
//! assert_eq!(BarcodeValue::decode(Standard::UpcE, &symbol)?, upce);
//! # Ok::<(), linear_barcode::Error>(())
//! ```
//!
//! Code 128 handles arbitrary ASCII and lives in its own [module](code128):
//!
//! ```rust
//! use linear_barcode::{code128::Code128, bars_to_blocks};
//!
//! let code = Code128::encode(b"Hello!")?;
//! println!("{}", bars_to_blocks(code.bars()));
//! # Ok::<(), linear_barcode::Error>(())
//! ```
//!
//! ## Rendering
//!
//! Drawing is left to the caller. A [`Symbol`] has one flag per module and
//! [`Section`]s telling which modules are guard patterns, which are usually
//! drawn [longer](GUARD_MULTIPLIER). [`BarcodeValue::printable`] gives the
//! text printed below the bars.
#![no_std]

#[cfg(not(feature = "std"))]
extern crate alloc as std;
#[cfg(feature = "std")]
extern crate std;

mod checksum;
pub mod code128;
mod ean;
mod error;
mod msi;
mod standard;
mod symbol;
mod tables;
#[cfg(feature = "unicode")]
mod unicode;
mod upc;
mod value;

pub use checksum::ChecksumScheme;
pub use error::{DecodingError, Error};
pub use standard::Standard;
pub use symbol::{Section, Symbol, GUARD_MULTIPLIER};
pub use upc::{upca_to_upce, upce_to_upca};
pub use value::BarcodeValue;

#[cfg(feature = "unicode")]
pub use unicode::bars_to_blocks;

/// Representation of a "black line" in the code.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Bar {
    /// The width of the line in modules.
    ///
    /// Ranges from one to four for Code 128.
    pub width: u8,
    /// White space after the line.
    pub space: u8,
}

/// A coordinate of a bar in a barcode.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct BarCoordinate {
    /// The x coordinate, started from the left.
    ///
    /// The first bar will always be at 10, which is the
    /// offset for the left quiet zone.
    pub x: u32,
    /// The width of the bar.
    pub width: u8,
}
