use core::fmt;

use crate::std::string::String;

use crate::{upc, BarcodeValue, ChecksumScheme};

/// The barcode standards supported by [`BarcodeValue`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Standard {
    /// EAN-13, twelve digits and a check digit.
    Ean13,
    /// EAN-13 in the `979` prefix range reserved for printed music.
    Ismn,
    /// UPC-A, eleven digits and a check digit.
    UpcA,
    /// UPC-E, a number system digit (0 or 1), six digits and the check
    /// digit of the corresponding UPC-A.
    UpcE,
    /// EAN-2 add-on, two digits without check digit.
    Ean2,
    /// MSI Plessey with an optional checksum scheme.
    ///
    /// Valid schemes are `Mod10`, `Mod11`, `DoubleMod10` and `Mod1110`,
    /// data of `Msi(Some(ChecksumScheme::Ean))` is always rejected.
    Msi(Option<ChecksumScheme>),
}

impl Standard {
    /// The order in which [`BarcodeValue::parse_msi`] tries checksum schemes.
    ///
    /// Two digit schemes come first: any `2 Mod 10` data is also valid
    /// `Mod 10` data.
    pub const MSI_SCHEMES: [ChecksumScheme; 4] = [
        ChecksumScheme::DoubleMod10,
        ChecksumScheme::Mod1110,
        ChecksumScheme::Mod10,
        ChecksumScheme::Mod11,
    ];

    /// The checksum scheme, if the standard has one.
    pub const fn scheme(self) -> Option<ChecksumScheme> {
        match self {
            Self::Ean13 | Self::Ismn | Self::UpcA | Self::UpcE => Some(ChecksumScheme::Ean),
            Self::Ean2 => None,
            Self::Msi(scheme) => scheme,
        }
    }

    /// Number of check digits.
    pub const fn checksum_width(self) -> usize {
        match self.scheme() {
            Some(scheme) => scheme.width(),
            None => 0,
        }
    }

    /// Number of payload digits for fixed length standards.
    pub const fn payload_len(self) -> Option<usize> {
        match self {
            Self::Ean13 | Self::Ismn => Some(12),
            Self::UpcA => Some(11),
            Self::UpcE => Some(7),
            Self::Ean2 => Some(2),
            Self::Msi(_) => None,
        }
    }

    /// Check if `data` is valid for this standard.
    ///
    /// With `has_checksum` the trailing check digit(s) are verified as well.
    /// Returns `false` for any grammar or checksum failure.
    ///
    /// ```
    /// # use linear_barcode::Standard;
    /// assert!(Standard::UpcE.check("01240136", true));
    /// assert!(!Standard::UpcE.check("01240135", true));
    /// assert!(!Standard::UpcE.check("2124013", false));
    /// ```
    pub fn check(self, data: &str, has_checksum: bool) -> bool {
        BarcodeValue::parse(self, data, has_checksum).is_ok()
    }

    /// Whether `data` follows the grammar of this standard.
    pub(crate) fn accepts(self, data: &str, has_checksum: bool) -> bool {
        let checksum_width = if has_checksum {
            self.checksum_width()
        } else {
            0
        };
        if !data.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        match self {
            Self::Msi(Some(ChecksumScheme::Ean)) => false,
            Self::Msi(_) => data.len() >= 2 && data.len() > checksum_width,
            Self::Ismn if !data.starts_with("979") => false,
            Self::UpcE => {
                data.len() == 7 + checksum_width
                    && matches!(data.as_bytes()[0], b'0' | b'1')
                    && upc::is_canonical(&data.as_bytes()[..7])
            }
            _ => self
                .payload_len()
                .is_some_and(|len| data.len() == len + checksum_width),
        }
    }

    /// Compute the check digits of `payload`.
    pub(crate) fn compute_checksum(self, payload: &str) -> Option<String> {
        match (self, self.scheme()) {
            (_, None) => Some(String::new()),
            (Self::UpcE, Some(scheme)) => {
                let body: &[u8; 7] = payload.as_bytes().try_into().ok()?;
                let upca = upc::expand(body);
                scheme.compute(core::str::from_utf8(&upca).ok()?)
            }
            (_, Some(scheme)) => scheme.compute(payload),
        }
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ean13 => f.write_str("EAN-13"),
            Self::Ismn => f.write_str("ISMN"),
            Self::UpcA => f.write_str("UPC-A"),
            Self::UpcE => f.write_str("UPC-E"),
            Self::Ean2 => f.write_str("EAN-2"),
            Self::Msi(None) => f.write_str("MSI"),
            Self::Msi(Some(scheme)) => write!(f, "MSI {scheme}"),
        }
    }
}

#[test]
fn test_grammar() {
    assert!(Standard::Ean13.accepts("4006381333931", true));
    assert!(Standard::Ean13.accepts("400638133393", false));
    assert!(!Standard::Ean13.accepts("400638133393", true));
    assert!(!Standard::Ean13.accepts("40063813339a1", true));
    assert!(Standard::Ean13.accepts("9790340146629", true));
    assert!(Standard::Ismn.accepts("9790340146629", true));
    assert!(!Standard::Ismn.accepts("4006381333931", true));
    assert!(Standard::UpcA.accepts("036000291452", true));
    assert!(!Standard::UpcA.accepts("0036000291452", true));
    assert!(Standard::Ean2.accepts("34", true));
    assert!(Standard::Ean2.accepts("34", false));
    assert!(!Standard::Ean2.accepts("345", false));
    assert!(Standard::Msi(None).accepts("12", false));
    assert!(!Standard::Msi(None).accepts("1", false));
    assert!(!Standard::Msi(Some(ChecksumScheme::Mod1110)).accepts("34", true));
    assert!(!Standard::Msi(Some(ChecksumScheme::Ean)).accepts("1234", false));
}

#[test]
fn test_upce_grammar() {
    assert!(Standard::UpcE.accepts("0124013", false));
    assert!(Standard::UpcE.accepts("01240136", true));
    assert!(!Standard::UpcE.accepts("2124013", false));
    // expands to the same UPC-A as 0120000, only the latter is canonical
    assert!(!Standard::UpcE.accepts("0120003", false));
    assert!(Standard::UpcE.accepts("0120000", false));
}

#[test]
fn test_display() {
    use crate::std::string::ToString;

    assert_eq!(Standard::Ean13.to_string(), "EAN-13");
    assert_eq!(Standard::Msi(None).to_string(), "MSI");
    assert_eq!(
        Standard::Msi(Some(ChecksumScheme::Mod1110)).to_string(),
        "MSI Mod 11/10"
    );
}
