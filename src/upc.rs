//! Conversions within the UPC family.
//!
//! A UPC-E body is a compressed UPC-A: its last digit tells where zeros were
//! dropped from the manufacturer and product codes. UPC-E and the expanded
//! UPC-A share the number system and the check digit.

use crate::std::string::String;

use crate::{BarcodeValue, Error, Standard};

/// Source of each of the ten UPC-A manufacturer and product digits, keyed by
/// the last UPC-E digit. A value `i` copies UPC-E digit `i`, `0` inserts a
/// zero.
const EXPANSION: [[u8; 10]; 10] = [
    [1, 2, 6, 0, 0, 0, 0, 3, 4, 5],
    [1, 2, 6, 0, 0, 0, 0, 3, 4, 5],
    [1, 2, 6, 0, 0, 0, 0, 3, 4, 5],
    [1, 2, 3, 0, 0, 0, 0, 0, 4, 5],
    [1, 2, 3, 4, 0, 0, 0, 0, 0, 5],
    [1, 2, 3, 4, 5, 0, 0, 0, 0, 6],
    [1, 2, 3, 4, 5, 0, 0, 0, 0, 6],
    [1, 2, 3, 4, 5, 0, 0, 0, 0, 6],
    [1, 2, 3, 4, 5, 0, 0, 0, 0, 6],
    [1, 2, 3, 4, 5, 0, 0, 0, 0, 6],
];

/// Expand seven UPC-E digits (without check digit) to eleven UPC-A digits.
pub(crate) fn expand(upce: &[u8; 7]) -> [u8; 11] {
    let mut upca = [b'0'; 11];
    upca[0] = upce[0];
    let row = &EXPANSION[(upce[6] - b'0') as usize];
    for (digit, &source) in upca[1..].iter_mut().zip(row) {
        if source != 0 {
            *digit = upce[source as usize];
        }
    }
    upca
}

/// Search the UPC-E body that expands to the eleven UPC-A digits.
pub(crate) fn compress(upca: &[u8; 11]) -> Option<[u8; 7]> {
    if !matches!(upca[0], b'0' | b'1') {
        return None;
    }
    (0..10u8).find_map(|last| {
        let mut upce = [b'0'; 7];
        upce[0] = upca[0];
        upce[6] = b'0' + last;
        for (&source, &digit) in EXPANSION[last as usize].iter().zip(&upca[1..]) {
            if source != 0 {
                upce[source as usize] = digit;
            }
        }
        (is_canonical(&upce) && expand(&upce) == *upca).then_some(upce)
    })
}

/// Whether the UPC-E body is the one the standard prescribes for its UPC-A.
///
/// Without this restriction three pairs of bodies would expand to the same
/// UPC-A.
pub(crate) fn is_canonical(upce: &[u8]) -> bool {
    match upce.get(6) {
        Some(b'3') => upce[3] >= b'3',
        Some(b'4') => upce[4] != b'0',
        Some(b'5'..=b'9') => upce[5] != b'0',
        _ => true,
    }
}

/// Expand UPC-E data to UPC-A data.
///
/// The check digit is kept if `has_checksum` is set, it is the same for both.
///
/// ```
/// # use linear_barcode::upce_to_upca;
/// assert_eq!(upce_to_upca("01240136", true)?, "012400000016");
/// assert_eq!(upce_to_upca("0123456", false)?, "01234500006");
/// # Ok::<(), linear_barcode::Error>(())
/// ```
pub fn upce_to_upca(data: &str, has_checksum: bool) -> Result<String, Error> {
    let upce = BarcodeValue::parse(Standard::UpcE, data, has_checksum)?;
    Ok(upce.to_upca()?.data(has_checksum).into())
}

/// Compress UPC-A data to UPC-E data.
///
/// Fails with [`Error::Incompatible`] if the UPC-A has no UPC-E form.
pub fn upca_to_upce(data: &str, has_checksum: bool) -> Result<String, Error> {
    let upca = BarcodeValue::parse(Standard::UpcA, data, has_checksum)?;
    Ok(upca.to_upce()?.data(has_checksum).into())
}

impl BarcodeValue {
    /// Whether this value can be represented as UPC-A.
    pub fn is_upca_compatible(&self) -> bool {
        match self.standard() {
            Standard::UpcA | Standard::UpcE => true,
            Standard::Ean13 => self.data(true).starts_with('0'),
            _ => false,
        }
    }

    /// Convert to UPC-A.
    ///
    /// EAN-13 values need a leading `0`.
    pub fn to_upca(&self) -> Result<Self, Error> {
        match self.standard() {
            Standard::UpcA => Ok(self.clone()),
            Standard::UpcE => {
                let body = self
                    .payload_array::<7>()
                    .ok_or_else(|| self.incompatible(Standard::UpcA))?;
                let mut data = String::with_capacity(12);
                data.extend(expand(&body).iter().map(|&b| b as char));
                data.push_str(self.checksum());
                Self::parse(Standard::UpcA, &data, true)
            }
            Standard::Ean13 if self.is_upca_compatible() => {
                Self::parse(Standard::UpcA, &self.data(true)[1..], true)
            }
            _ => Err(self.incompatible(Standard::UpcA)),
        }
    }

    /// Convert to UPC-E.
    ///
    /// Only UPC-A values (or EAN-13 values with a leading `0`) whose
    /// manufacturer and product codes contain the required runs of zeros
    /// have a UPC-E form.
    pub fn to_upce(&self) -> Result<Self, Error> {
        match self.standard() {
            Standard::UpcE => Ok(self.clone()),
            Standard::UpcA | Standard::Ean13 => {
                let upca = self.to_upca()?;
                let body = upca
                    .payload_array::<11>()
                    .and_then(|upca| compress(&upca))
                    .ok_or_else(|| self.incompatible(Standard::UpcE))?;
                let mut data = String::with_capacity(8);
                data.extend(body.iter().map(|&b| b as char));
                data.push_str(upca.checksum());
                Self::parse(Standard::UpcE, &data, true)
            }
            _ => Err(self.incompatible(Standard::UpcE)),
        }
    }

    /// Convert to EAN-13.
    pub fn to_ean13(&self) -> Result<Self, Error> {
        match self.standard() {
            Standard::Ean13 => Ok(self.clone()),
            Standard::Ismn => Self::parse(Standard::Ean13, self.data(true), true),
            Standard::UpcA | Standard::UpcE => {
                let upca = self.to_upca()?;
                let mut data = String::with_capacity(13);
                data.push('0');
                data.push_str(upca.data(true));
                Self::parse(Standard::Ean13, &data, true)
            }
            _ => Err(self.incompatible(Standard::Ean13)),
        }
    }

    fn payload_array<const N: usize>(&self) -> Option<[u8; N]> {
        self.data(false).as_bytes().try_into().ok()
    }
}

#[test]
fn test_expand() {
    let cases: [(&[u8; 7], &[u8; 11]); 6] = [
        (b"0120000", b"01200000000"),
        (b"0124011", b"01210000401"),
        (b"0124012", b"01220000401"),
        (b"0124013", b"01240000001"),
        (b"0123454", b"01234000005"),
        (b"0123456", b"01234500006"),
    ];
    for (upce, upca) in cases {
        assert_eq!(&expand(upce), upca);
        assert_eq!(compress(upca).as_ref(), Some(upce));
    }
}

#[test]
fn test_compress_rejects() {
    // no zero run in the manufacturer code
    assert_eq!(compress(b"01234567890"), None);
    // number system 2 has no UPC-E form
    assert_eq!(compress(b"21200000000"), None);
}

#[test]
fn test_conversions() {
    let upce = BarcodeValue::parse(Standard::UpcE, "01240136", true).unwrap();
    let upca = upce.to_upca().unwrap();
    assert_eq!(upca.data(true), "012400000016");
    assert_eq!(upca.to_upce().unwrap(), upce);

    let ean = upce.to_ean13().unwrap();
    assert_eq!(ean.data(true), "0012400000016");
    assert_eq!(ean.to_upce().unwrap(), upce);
    assert_eq!(ean.to_upca().unwrap(), upca);
}

#[test]
fn test_incompatible() {
    let ean = BarcodeValue::parse(Standard::Ean13, "4006381333931", true).unwrap();
    assert!(!ean.is_upca_compatible());
    assert_eq!(
        ean.to_upca(),
        Err(Error::Incompatible {
            from: Standard::Ean13,
            to: Standard::UpcA
        })
    );
    let upca = BarcodeValue::parse(Standard::UpcA, "036000291452", true).unwrap();
    assert_eq!(
        upca.to_upce(),
        Err(Error::Incompatible {
            from: Standard::UpcA,
            to: Standard::UpcE
        })
    );
    assert_eq!(
        upca_to_upce("036000291452", true),
        Err(Error::Incompatible {
            from: Standard::UpcA,
            to: Standard::UpcE
        })
    );
}
