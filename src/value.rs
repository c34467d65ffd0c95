use crate::std::string::String;

use crate::{ean, msi, ChecksumScheme, Error, Standard, Symbol};

/// Validated barcode data of one of the [`Standard`]s.
///
/// A value always carries its check digit(s); it is never changed in place,
/// operations replacing parts of it return a freshly validated value.
///
/// ```
/// # use linear_barcode::{BarcodeValue, Standard};
/// let ean = BarcodeValue::parse(Standard::Ean13, "400638133393", false)?;
/// assert_eq!(ean.checksum(), "1");
/// assert_eq!(ean.printable(), "4 006381333931");
///
/// let other = ean.with_product_code("42")?;
/// assert_eq!(other.data(false), "400638100042");
/// # Ok::<(), linear_barcode::Error>(())
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct BarcodeValue {
    standard: Standard,
    /// Payload followed by the check digits.
    digits: String,
    payload_len: usize,
}

impl BarcodeValue {
    /// Validate `data` and build a value.
    ///
    /// If `has_checksum` is set the trailing check digit(s) of `data` are
    /// verified, otherwise they are computed and appended. UPC-E and EAN-2
    /// data shorter than its full width is padded with zeros on the left.
    pub fn parse(standard: Standard, data: &str, has_checksum: bool) -> Result<Self, Error> {
        let width = match standard {
            Standard::UpcE => Some(7 + has_checksum as usize),
            Standard::Ean2 => Some(2),
            _ => None,
        };
        let padded;
        let data = match width {
            Some(width) => {
                padded = pad_zeros(data, width).ok_or(Error::Validation(standard))?;
                padded.as_str()
            }
            None => data,
        };
        if !standard.accepts(data, has_checksum) {
            return Err(Error::Validation(standard));
        }

        let payload_len = if has_checksum {
            data.len() - standard.checksum_width()
        } else {
            data.len()
        };
        let (payload, supplied) = data.split_at(payload_len);
        let expected = standard
            .compute_checksum(payload)
            .ok_or(Error::Validation(standard))?;
        if has_checksum && supplied != expected {
            return Err(Error::ChecksumMismatch {
                expected,
                found: supplied.into(),
            });
        }

        let mut digits = String::with_capacity(payload_len + expected.len());
        digits.push_str(payload);
        digits.push_str(&expected);
        Ok(Self {
            standard,
            digits,
            payload_len,
        })
    }

    /// Parse MSI data whose checksum scheme is not known upfront.
    ///
    /// The schemes of [`Standard::MSI_SCHEMES`] are tried in order and the
    /// first one that validates wins. If none does, the error of the last
    /// attempt is returned. Without `has_checksum` the data is taken as MSI
    /// without checksum.
    pub fn parse_msi(data: &str, has_checksum: bool) -> Result<Self, Error> {
        if !has_checksum {
            return Self::parse(Standard::Msi(None), data, false);
        }
        let mut last = Error::Validation(Standard::Msi(None));
        for scheme in Standard::MSI_SCHEMES {
            match Self::parse(Standard::Msi(Some(scheme)), data, true) {
                Ok(value) => {
                    tracing::debug!(%scheme, "detected MSI checksum scheme");
                    return Ok(value);
                }
                Err(err) => last = err,
            }
        }
        Err(last)
    }

    /// The standard of this value.
    pub fn standard(&self) -> Standard {
        self.standard
    }

    /// The data, with or without the check digit(s).
    pub fn data(&self, with_checksum: bool) -> &str {
        if with_checksum {
            &self.digits
        } else {
            &self.digits[..self.payload_len]
        }
    }

    /// The check digit(s), empty for MSI without checksum.
    pub fn checksum(&self) -> &str {
        &self.digits[self.payload_len..]
    }

    /// Up to `len` digits of the data (including the check digits) starting
    /// at `start`.
    pub fn part(&self, start: usize, len: usize) -> &str {
        let start = start.min(self.digits.len());
        let end = start.saturating_add(len).min(self.digits.len());
        &self.digits[start..end]
    }

    /// A new value with the payload digits `start..start + len` replaced.
    ///
    /// `part` is padded with zeros on the left to `len` digits. The check
    /// digits are computed again.
    pub fn with_part(&self, part: &str, start: usize, len: usize) -> Result<Self, Error> {
        if part.len() > len {
            return Err(Error::LengthViolation {
                len: part.len(),
                width: len,
            });
        }
        let payload = self.data(false);
        let end = start
            .checked_add(len)
            .filter(|&end| end <= payload.len())
            .ok_or(Error::LengthViolation {
                len: start.saturating_add(len),
                width: payload.len(),
            })?;

        let mut data = String::with_capacity(payload.len());
        data.push_str(&payload[..start]);
        data.extend(core::iter::repeat('0').take(len - part.len()));
        data.push_str(part);
        data.push_str(&payload[end..]);
        Self::parse(self.standard, &data, false)
    }

    /// The same MSI payload under another checksum scheme.
    pub fn with_checksum_scheme(&self, scheme: Option<ChecksumScheme>) -> Result<Self, Error> {
        match self.standard {
            Standard::Msi(_) => Self::parse(Standard::Msi(scheme), self.data(false), false),
            _ => Err(self.incompatible(Standard::Msi(scheme))),
        }
    }

    /// Encode as a [`Symbol`].
    pub fn encode(&self) -> Symbol {
        let digits = self.digits.as_bytes();
        match self.standard {
            Standard::Ean13 | Standard::Ismn => ean::encode_ean13(digits[0] - b'0', &digits[1..]),
            Standard::UpcA => ean::encode_ean13(0, digits),
            Standard::UpcE => ean::encode_upce(digits),
            Standard::Ean2 => ean::encode_ean2(digits),
            Standard::Msi(_) => msi::encode(digits),
        }
    }

    /// Decode a [`Symbol`] of the given standard.
    ///
    /// The recovered check digit(s) are verified.
    pub fn decode(standard: Standard, symbol: &Symbol) -> Result<Self, Error> {
        let digits = match standard {
            Standard::Ean13 | Standard::Ismn | Standard::UpcA => ean::decode_ean13(symbol)?,
            Standard::UpcE => ean::decode_upce(symbol)?,
            Standard::Ean2 => ean::decode_ean2(symbol)?,
            Standard::Msi(_) => msi::decode(symbol)?,
        };
        if standard == Standard::UpcA {
            return match digits.strip_prefix('0') {
                Some(upca) => Self::parse(standard, upca, true),
                None => Err(Error::Incompatible {
                    from: Standard::Ean13,
                    to: Standard::UpcA,
                }),
            };
        }
        Self::parse(standard, &digits, true)
    }

    /// The data as printed below the bars.
    pub fn printable(&self) -> String {
        let d = self.digits.as_str();
        let mut out = String::with_capacity(d.len() + 3);
        let groups: &[usize] = match self.standard {
            Standard::Ean13 | Standard::Ismn => &[1],
            Standard::UpcA => &[1, 6, 11],
            Standard::UpcE => &[1, 7],
            Standard::Ean2 | Standard::Msi(_) => &[],
        };
        let mut from = 0;
        for &to in groups {
            out.push_str(&d[from..to]);
            out.push(' ');
            from = to;
        }
        out.push_str(&d[from..]);
        out
    }

    pub(crate) fn incompatible(&self, to: Standard) -> Error {
        Error::Incompatible {
            from: self.standard,
            to,
        }
    }
}

/// Pad `data` with zeros on the left up to `width` digits.
fn pad_zeros(data: &str, width: usize) -> Option<String> {
    if data.is_empty() {
        return None;
    }
    if data.len() >= width {
        return Some(data.into());
    }
    let mut padded = String::with_capacity(width);
    padded.extend(core::iter::repeat('0').take(width - data.len()));
    padded.push_str(data);
    Some(padded)
}

#[test]
fn test_pad() {
    assert_eq!(pad_zeros("1240136", 8).as_deref(), Some("01240136"));
    assert_eq!(pad_zeros("8", 8).as_deref(), Some("00000008"));
    assert_eq!(pad_zeros("124013", 7).as_deref(), Some("0124013"));
    assert_eq!(pad_zeros("012401366", 8).as_deref(), Some("012401366"));
    assert_eq!(pad_zeros("1", 2).as_deref(), Some("01"));
    assert_eq!(pad_zeros("", 7), None);
}

#[test]
fn test_parse_ean13() {
    let ean = BarcodeValue::parse(Standard::Ean13, "4006381333931", true).unwrap();
    assert_eq!(ean.data(false), "400638133393");
    assert_eq!(ean.data(true), "4006381333931");
    assert_eq!(ean.checksum(), "1");
    assert_eq!(
        BarcodeValue::parse(Standard::Ean13, "4006381333932", true),
        Err(Error::ChecksumMismatch {
            expected: "1".into(),
            found: "2".into()
        })
    );
    assert_eq!(
        BarcodeValue::parse(Standard::Ean13, "400638133393", true),
        Err(Error::Validation(Standard::Ean13))
    );
}

#[test]
fn test_parse_upce() {
    // (data, has checksum, valid)
    let cases = [
        ("01240136", true, true),
        ("01234565", true, true),
        ("1234565", true, true),
        ("1240136", true, true),
        ("2124013", false, false),
        ("01240135", true, false),
        ("8", true, false),
        ("", false, false),
    ];
    for (data, has_checksum, valid) in cases {
        let value = BarcodeValue::parse(Standard::UpcE, data, has_checksum);
        assert_eq!(value.is_ok(), valid, "{data}");
        if let Ok(value) = value {
            let back = value.to_upca().unwrap().to_upce().unwrap();
            assert!(back.data(true).ends_with(data));
            assert_eq!(back, value);
        }
    }
}

#[test]
fn test_parse_msi() {
    let mod10 = BarcodeValue::parse(Standard::Msi(Some(ChecksumScheme::Mod10)), "1234", false)
        .unwrap();
    assert_eq!(mod10.data(true), "12346");
    assert_eq!(
        BarcodeValue::parse_msi("12346", true).unwrap().standard(),
        Standard::Msi(Some(ChecksumScheme::Mod10))
    );
    // Mod 10 rejects 12343
    assert_eq!(
        BarcodeValue::parse_msi("12343", true).unwrap().standard(),
        Standard::Msi(Some(ChecksumScheme::Mod11))
    );
    assert_eq!(
        BarcodeValue::parse_msi("123468", true).unwrap().standard(),
        Standard::Msi(Some(ChecksumScheme::DoubleMod10))
    );
    assert_eq!(
        BarcodeValue::parse_msi("123434", true).unwrap().standard(),
        Standard::Msi(Some(ChecksumScheme::Mod1110))
    );
    // nothing matches, the last attempt (Mod 11) is reported
    assert_eq!(
        BarcodeValue::parse_msi("123401", true),
        Err(Error::ChecksumMismatch {
            expected: "4".into(),
            found: "1".into()
        })
    );
    assert_eq!(
        BarcodeValue::parse_msi("1234", false).unwrap().checksum(),
        ""
    );
}

#[test]
fn test_with_checksum_scheme() {
    let plain = BarcodeValue::parse(Standard::Msi(None), "1234", false).unwrap();
    let mod1110 = plain
        .with_checksum_scheme(Some(ChecksumScheme::Mod1110))
        .unwrap();
    assert_eq!(mod1110.data(true), "123434");
    let mod11 = mod1110
        .with_checksum_scheme(Some(ChecksumScheme::Mod11))
        .unwrap();
    assert_eq!(mod11.data(true), "12343");
    assert_eq!(mod11.with_checksum_scheme(None).unwrap(), plain);

    let ean = BarcodeValue::parse(Standard::Ean13, "4006381333931", true).unwrap();
    assert!(matches!(
        ean.with_checksum_scheme(None),
        Err(Error::Incompatible { .. })
    ));
}

#[test]
fn test_parts() {
    let ean = BarcodeValue::parse(Standard::Ean13, "4006381333931", true).unwrap();
    assert_eq!(ean.part(7, 5), "33393");
    assert_eq!(ean.part(11, 5), "31");
    assert_eq!(ean.part(20, 5), "");

    let replaced = ean.with_part("7", 1, 3).unwrap();
    assert_eq!(replaced.data(false), "400738133393");
    assert_eq!(replaced.checksum(), "8");
    assert_eq!(
        ean.with_part("12345", 1, 3),
        Err(Error::LengthViolation { len: 5, width: 3 })
    );
    assert_eq!(
        ean.with_part("1", 10, 3),
        Err(Error::LengthViolation { len: 13, width: 12 })
    );
}

#[test]
fn test_printable() {
    let parse = |standard, data| BarcodeValue::parse(standard, data, true).unwrap();
    assert_eq!(parse(Standard::Ean13, "4006381333931").printable(), "4 006381333931");
    assert_eq!(parse(Standard::UpcA, "036000291452").printable(), "0 36000 29145 2");
    assert_eq!(parse(Standard::UpcE, "01240136").printable(), "0 124013 6");
    assert_eq!(parse(Standard::Ean2, "7").printable(), "07");
    assert_eq!(
        parse(Standard::Msi(Some(ChecksumScheme::Mod10)), "12346").printable(),
        "12346"
    );
}
