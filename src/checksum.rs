//! Check digit algorithms.
//!
//! All schemes work on ASCII decimal digits and produce one or two ASCII
//! digits. Intermediate results of 10 or 11 are normalised to `0`.

use core::fmt;

use crate::std::string::String;

/// A check digit algorithm.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ChecksumScheme {
    /// Weighted sum used by EAN and UPC: the rightmost payload digit has
    /// weight 3, then weights alternate between 1 and 3 to the left.
    Ean,
    /// MSI modulo 10: the last digit is doubled, then everything is summed.
    Mod10,
    /// MSI modulo 11 with weights 2 to 7 starting at the rightmost digit.
    Mod11,
    /// [`Mod10`](Self::Mod10) applied twice, the second pass over the payload
    /// followed by the first check digit.
    DoubleMod10,
    /// [`Mod11`](Self::Mod11) followed by [`Mod10`](Self::Mod10) over the
    /// payload and the first check digit.
    Mod1110,
}

impl ChecksumScheme {
    /// Number of check digits the scheme appends.
    pub const fn width(self) -> usize {
        match self {
            Self::Ean | Self::Mod10 | Self::Mod11 => 1,
            Self::DoubleMod10 | Self::Mod1110 => 2,
        }
    }

    /// Compute the check digits for `digits`.
    ///
    /// Returns `None` if `digits` contains anything but ASCII digits.
    ///
    /// ```
    /// # use linear_barcode::ChecksumScheme;
    /// assert_eq!(ChecksumScheme::Mod10.compute("1234").as_deref(), Some("6"));
    /// assert_eq!(ChecksumScheme::Mod1110.compute("1234").as_deref(), Some("34"));
    /// ```
    pub fn compute(self, digits: &str) -> Option<String> {
        let digits = digits.as_bytes();
        if !digits.iter().all(u8::is_ascii_digit) {
            return None;
        }
        let mut check = String::with_capacity(self.width());
        match self {
            Self::Ean => check.push(ean(digits)),
            Self::Mod10 => check.push(mod10(digits)),
            Self::Mod11 => check.push(mod11(digits)),
            Self::DoubleMod10 => {
                let first = mod10(digits);
                check.push(first);
                check.push(mod10_extended(digits, first));
            }
            Self::Mod1110 => {
                let first = mod11(digits);
                check.push(first);
                check.push(mod10_extended(digits, first));
            }
        }
        Some(check)
    }

    /// Whether `claimed` are the correct check digits for `digits`.
    pub fn verify(self, digits: &str, claimed: &str) -> bool {
        self.compute(digits).is_some_and(|check| check == claimed)
    }
}

impl fmt::Display for ChecksumScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ean => "EAN",
            Self::Mod10 => "Mod 10",
            Self::Mod11 => "Mod 11",
            Self::DoubleMod10 => "2 Mod 10",
            Self::Mod1110 => "Mod 11/10",
        })
    }
}

#[inline]
fn value(digit: u8) -> u32 {
    (digit - b'0') as u32
}

#[inline]
fn to_digit(n: u32) -> char {
    (b'0' + (n % 10) as u8) as char
}

fn ean(digits: &[u8]) -> char {
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, d)| value(*d) * if i % 2 == 0 { 3 } else { 1 })
        .sum();
    to_digit((10 - sum % 10) % 10)
}

fn mod10_sum(digits: impl DoubleEndedIterator<Item = u32>) -> u32 {
    let mut digits = digits.rev();
    let last = digits.next().unwrap_or(0) * 2;
    last + digits.sum::<u32>()
}

fn mod10_finish(sum: u32) -> char {
    match 10 - sum % 10 {
        10 => '0',
        n => to_digit(n),
    }
}

fn mod10(digits: &[u8]) -> char {
    mod10_finish(mod10_sum(digits.iter().map(|d| value(*d))))
}

/// Mod 10 over `digits` with `extra` appended, without copying the payload.
fn mod10_extended(digits: &[u8], extra: char) -> char {
    let extra = value(extra as u8);
    mod10_finish(mod10_sum(
        digits.iter().map(|d| value(*d)).chain(core::iter::once(extra)),
    ))
}

fn mod11(digits: &[u8]) -> char {
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, d)| value(*d) * (2 + (i % 6) as u32))
        .sum();
    match 11 - sum % 11 {
        10 | 11 => '0',
        n => to_digit(n),
    }
}

#[test]
fn test_ean() {
    let scheme = ChecksumScheme::Ean;
    assert_eq!(scheme.compute("400638133393").as_deref(), Some("1"));
    assert_eq!(scheme.compute("003600029145").as_deref(), Some("2"));
    // UPC-A payloads are one digit shorter, the weights stay anchored right
    assert_eq!(scheme.compute("03600029145").as_deref(), Some("2"));
    assert_eq!(scheme.compute("01240000001").as_deref(), Some("6"));
    assert_eq!(scheme.compute("000000000000").as_deref(), Some("0"));
}

#[test]
fn test_mod10() {
    // 1 + 2 + 3 + 2 * 4 = 14
    assert_eq!(ChecksumScheme::Mod10.compute("1234").as_deref(), Some("6"));
    // sum 10 would give 10 and wraps to 0
    assert_eq!(ChecksumScheme::Mod10.compute("81").as_deref(), Some("0"));
}

#[test]
fn test_mod11() {
    // 4 * 2 + 3 * 3 + 2 * 4 + 1 * 5 = 30, 11 - 8 = 3
    assert_eq!(ChecksumScheme::Mod11.compute("1234").as_deref(), Some("3"));
    // seven digits, weights wrap back to 2 for the leftmost digit
    assert_eq!(ChecksumScheme::Mod11.compute("1234567").as_deref(), Some("4"));
    assert_eq!(ChecksumScheme::Mod11.compute("0").as_deref(), Some("0"));
    // 3 * 2 + 2 * 3 + 5 * 4 + 0 * 5 + 8 * 6 = 80, 11 - 3 = 8
    assert_eq!(ChecksumScheme::Mod11.compute("80523").as_deref(), Some("8"));
}

#[test]
fn test_composites() {
    assert_eq!(
        ChecksumScheme::DoubleMod10.compute("1234").as_deref(),
        Some("68")
    );
    assert_eq!(ChecksumScheme::Mod1110.compute("1234").as_deref(), Some("34"));
    assert_eq!(
        ChecksumScheme::Mod10.compute("12346"),
        ChecksumScheme::DoubleMod10.compute("1234").map(|c| String::from(&c[1..]))
    );
}

#[test]
fn test_non_digits() {
    for scheme in [
        ChecksumScheme::Ean,
        ChecksumScheme::Mod10,
        ChecksumScheme::Mod11,
        ChecksumScheme::DoubleMod10,
        ChecksumScheme::Mod1110,
    ] {
        assert_eq!(scheme.compute("12a4"), None);
        assert!(!scheme.verify("12a4", "0"));
        let check = scheme.compute("987654321").unwrap();
        assert_eq!(check.len(), scheme.width());
        assert!(scheme.verify("987654321", &check));
    }
}
