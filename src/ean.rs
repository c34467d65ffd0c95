//! The EAN-13, UPC-E and EAN-2 symbologies.
//!
//! All share the digit patterns of [`tables`](crate::tables): a parity plan
//! selects odd or even patterns for the left digits, and the plan itself
//! encodes a digit that has no bars of its own (the leading EAN-13 digit, or
//! the number system and check digit of UPC-E). The EAN-2 plan is the value
//! modulo 4.

use crate::std::string::String;

use crate::tables::{
    ean_digit, ean_pattern, is_even, Variant, DIGIT_WIDTH, EAN13_PARITY, UPCE_PARITY,
};
use crate::{BarcodeValue, DecodingError, Error, Standard, Symbol, GUARD_MULTIPLIER};

const START: (u16, usize) = (0b101, 3);
const CENTER: (u16, usize) = (0b01010, 5);
const EAN13_STOP: (u16, usize) = (0b101, 3);
const UPCE_STOP: (u16, usize) = (0b010101, 6);
const ADDON_START: (u16, usize) = (0b1011, 4);
const ADDON_SEPARATOR: (u16, usize) = (0b01, 2);

const EAN13_LEN: usize = START.1 + 12 * DIGIT_WIDTH + CENTER.1 + EAN13_STOP.1;
const UPCE_LEN: usize = START.1 + 6 * DIGIT_WIDTH + UPCE_STOP.1;
const EAN2_LEN: usize = ADDON_START.1 + 2 * DIGIT_WIDTH + ADDON_SEPARATOR.1;

/// Variants of the two EAN-2 digits, keyed by the value modulo 4.
const EAN2_PARITY: [[Variant; 2]; 4] = [
    [Variant::Odd, Variant::Odd],
    [Variant::Odd, Variant::Even],
    [Variant::Even, Variant::Odd],
    [Variant::Even, Variant::Even],
];

fn ean2_parity(digits: &[u8]) -> [Variant; 2] {
    let value = (digits[0] - b'0') * 10 + (digits[1] - b'0');
    EAN2_PARITY[(value % 4) as usize]
}

fn push_guard(symbol: &mut Symbol, (pattern, width): (u16, usize)) {
    symbol.push_section(pattern, width, GUARD_MULTIPLIER);
}

/// Append six left hand digits, opening a data section.
fn push_left(symbol: &mut Symbol, digits: &[u8], plan: u8) {
    symbol.push_section(0, 0, 1.0);
    for (i, &digit) in digits.iter().enumerate() {
        let pattern = ean_pattern(digit - b'0', Variant::from_parity(is_even(plan, i)));
        symbol.push_bits(pattern as u16, DIGIT_WIDTH);
    }
}

/// Encode an EAN-13 given its leading digit and the twelve other ASCII digits.
///
/// A UPC-A is an EAN-13 with leading digit `0`.
pub(crate) fn encode_ean13(leading: u8, digits: &[u8]) -> Symbol {
    debug_assert_eq!(digits.len(), 12);
    let mut symbol = Symbol::new();
    push_guard(&mut symbol, START);
    push_left(&mut symbol, &digits[..6], EAN13_PARITY[leading as usize]);
    push_guard(&mut symbol, CENTER);
    symbol.push_section(0, 0, 1.0);
    for &digit in &digits[6..] {
        symbol.push_bits(ean_pattern(digit - b'0', Variant::Right) as u16, DIGIT_WIDTH);
    }
    push_guard(&mut symbol, EAN13_STOP);
    symbol
}

/// Encode a UPC-E from its eight ASCII digits: number system, body and check
/// digit.
pub(crate) fn encode_upce(digits: &[u8]) -> Symbol {
    debug_assert_eq!(digits.len(), 8);
    let system = (digits[0] - b'0') as usize;
    let check = (digits[7] - b'0') as usize;
    let mut symbol = Symbol::new();
    push_guard(&mut symbol, START);
    push_left(&mut symbol, &digits[1..7], UPCE_PARITY[check][system]);
    push_guard(&mut symbol, UPCE_STOP);
    symbol
}

/// Encode an EAN-2 add-on from its two ASCII digits.
pub(crate) fn encode_ean2(digits: &[u8]) -> Symbol {
    debug_assert_eq!(digits.len(), 2);
    let [first, second] = ean2_parity(digits);
    let mut symbol = Symbol::new();
    symbol.push_bits(ADDON_START.0, ADDON_START.1);
    symbol.push_bits(ean_pattern(digits[0] - b'0', first) as u16, DIGIT_WIDTH);
    symbol.push_bits(ADDON_SEPARATOR.0, ADDON_SEPARATOR.1);
    symbol.push_bits(ean_pattern(digits[1] - b'0', second) as u16, DIGIT_WIDTH);
    symbol
}

fn expect_guard(
    symbol: &Symbol,
    start: usize,
    (pattern, width): (u16, usize),
) -> Result<(), DecodingError> {
    if symbol.matches(start, pattern, width) {
        Ok(())
    } else {
        Err(DecodingError::Guard)
    }
}

/// Read six digits starting at module `start`, collecting the parity plan.
fn read_digits(
    symbol: &Symbol,
    start: usize,
    variants: &[Variant],
    out: &mut String,
) -> Result<u8, DecodingError> {
    let mut plan = 0;
    for i in 0..6 {
        let pattern = symbol
            .read(start + i * DIGIT_WIDTH, DIGIT_WIDTH)
            .ok_or(DecodingError::Short)?;
        let (digit, variant) =
            ean_digit(pattern as u8, variants).ok_or(DecodingError::Pattern(pattern))?;
        if variant == Variant::Even {
            plan |= 1 << (5 - i);
        }
        out.push((b'0' + digit) as char);
    }
    Ok(plan)
}

/// Decode an EAN-13 symbol into its thirteen digits.
///
/// The digits are not validated against the check digit.
pub(crate) fn decode_ean13(symbol: &Symbol) -> Result<String, DecodingError> {
    if symbol.len() != EAN13_LEN {
        return Err(DecodingError::Length);
    }
    let center = START.1 + 6 * DIGIT_WIDTH;
    let right = center + CENTER.1;
    expect_guard(symbol, 0, START)?;
    expect_guard(symbol, center, CENTER)?;
    expect_guard(symbol, right + 6 * DIGIT_WIDTH, EAN13_STOP)?;

    let mut left = String::with_capacity(6);
    let plan = read_digits(symbol, START.1, &[Variant::Odd, Variant::Even], &mut left)?;
    let leading = EAN13_PARITY
        .iter()
        .position(|&row| row == plan)
        .ok_or(DecodingError::Parity)?;

    let mut digits = String::with_capacity(13);
    digits.push((b'0' + leading as u8) as char);
    digits.push_str(&left);
    read_digits(symbol, right, &[Variant::Right], &mut digits)?;
    Ok(digits)
}

/// Decode a UPC-E symbol into its eight digits.
pub(crate) fn decode_upce(symbol: &Symbol) -> Result<String, DecodingError> {
    if symbol.len() != UPCE_LEN {
        return Err(DecodingError::Length);
    }
    expect_guard(symbol, 0, START)?;
    expect_guard(symbol, START.1 + 6 * DIGIT_WIDTH, UPCE_STOP)?;

    let mut body = String::with_capacity(6);
    let plan = read_digits(symbol, START.1, &[Variant::Odd, Variant::Even], &mut body)?;
    let (check, system) = (0..10)
        .flat_map(|check| (0..2).map(move |system| (check, system)))
        .find(|&(check, system)| UPCE_PARITY[check][system] == plan)
        .ok_or(DecodingError::Parity)?;

    let mut digits = String::with_capacity(8);
    digits.push((b'0' + system as u8) as char);
    digits.push_str(&body);
    digits.push((b'0' + check as u8) as char);
    Ok(digits)
}

/// Decode an EAN-2 add-on into its two digits.
pub(crate) fn decode_ean2(symbol: &Symbol) -> Result<String, DecodingError> {
    if symbol.len() != EAN2_LEN {
        return Err(DecodingError::Length);
    }
    let separator = ADDON_START.1 + DIGIT_WIDTH;
    expect_guard(symbol, 0, ADDON_START)?;
    expect_guard(symbol, separator, ADDON_SEPARATOR)?;

    let both = [Variant::Odd, Variant::Even];
    let mut digits = String::with_capacity(2);
    let mut variants = [Variant::Odd; 2];
    for (variant, start) in variants
        .iter_mut()
        .zip([ADDON_START.1, separator + ADDON_SEPARATOR.1])
    {
        let pattern = symbol
            .read(start, DIGIT_WIDTH)
            .ok_or(DecodingError::Short)?;
        let (digit, found) =
            ean_digit(pattern as u8, &both).ok_or(DecodingError::Pattern(pattern))?;
        *variant = found;
        digits.push((b'0' + digit) as char);
    }
    if ean2_parity(digits.as_bytes()) != variants {
        return Err(DecodingError::Parity);
    }
    Ok(digits)
}

impl BarcodeValue {
    fn product_code_range(&self) -> Option<(usize, usize)> {
        match self.standard() {
            Standard::Ean13 | Standard::Ismn => Some((7, 5)),
            Standard::UpcA => Some((6, 5)),
            _ => None,
        }
    }

    /// The five digit product code of an EAN-13 or UPC-A.
    ///
    /// ```
    /// # use linear_barcode::{BarcodeValue, Standard};
    /// let upca = BarcodeValue::parse(Standard::UpcA, "036000291452", true)?;
    /// assert_eq!(upca.product_code(), Some("29145"));
    /// # Ok::<(), linear_barcode::Error>(())
    /// ```
    pub fn product_code(&self) -> Option<&str> {
        self.product_code_range()
            .map(|(start, len)| self.part(start, len))
    }

    /// Replace the product code, padding it with zeros on the left.
    pub fn with_product_code(&self, code: &str) -> Result<Self, Error> {
        let (start, len) = self
            .product_code_range()
            .ok_or_else(|| self.incompatible(Standard::Ean13))?;
        self.with_part(code, start, len)
    }
}

#[cfg(test)]
use crate::std::string::ToString;

#[test]
fn test_encode_ean13() {
    let ean = BarcodeValue::parse(Standard::Ean13, "4006381333931", true).unwrap();
    let symbol = ean.encode();
    assert_eq!(
        symbol.to_string(),
        "10100011010100111010111101111010001001011001101010100001010000101000010111010010000101100110101"
    );
    // start, left, center, right, stop
    let sections: crate::std::vec::Vec<_> = symbol
        .sections()
        .iter()
        .map(|s| (s.len, s.multiplier))
        .collect();
    assert_eq!(
        sections,
        [
            (3, GUARD_MULTIPLIER),
            (42, 1.0),
            (5, GUARD_MULTIPLIER),
            (42, 1.0),
            (3, GUARD_MULTIPLIER)
        ]
    );
}

#[test]
fn test_encode_upca() {
    let upca = BarcodeValue::parse(Standard::UpcA, "036000291452", true).unwrap();
    assert_eq!(
        upca.encode().to_string(),
        "10100011010111101010111100011010001101000110101010110110011101001100110101110010011101101100101"
    );
}

#[test]
fn test_encode_upce() {
    let upce = BarcodeValue::parse(Standard::UpcE, "01240136", true).unwrap();
    let symbol = upce.encode();
    assert_eq!(
        symbol.to_string(),
        "101011001100100110100011000110101100110100001010101"
    );
    assert_eq!(symbol.sections().last().map(|s| s.len), Some(6));
}

#[test]
fn test_decode() {
    let symbol: Symbol = "10100011010100111010111101111010001001011001101010100001010000101000010111010010000101100110101"
        .parse()
        .unwrap();
    assert_eq!(decode_ean13(&symbol).as_deref(), Ok("4006381333931"));
    let symbol: Symbol = "101011001100100110100011000110101100110100001010101"
        .parse()
        .unwrap();
    assert_eq!(decode_upce(&symbol).as_deref(), Ok("01240136"));
}

#[test]
fn test_decode_errors() {
    let valid = "10100011010100111010111101111010001001011001101010100001010000101000010111010010000101100110101";
    let broken = |at: usize| -> Symbol {
        let mut bits: crate::std::vec::Vec<u8> = valid.bytes().collect();
        bits[at] ^= b'0' ^ b'1';
        String::from_utf8(bits).unwrap().parse().unwrap()
    };
    assert_eq!(decode_ean13(&broken(0)), Err(DecodingError::Guard));
    assert_eq!(decode_ean13(&broken(46)), Err(DecodingError::Guard));
    assert_eq!(decode_ean13(&broken(94)), Err(DecodingError::Guard));
    // first left digit 0001101 becomes 0001100
    assert_eq!(
        decode_ean13(&broken(9)),
        Err(DecodingError::Pattern(0b0001100))
    );
    assert_eq!(
        decode_ean13(&valid[..94].parse().unwrap()),
        Err(DecodingError::Length)
    );
    assert_eq!(
        decode_upce(&valid.parse().unwrap()),
        Err(DecodingError::Length)
    );

    // all left digits even is no EAN-13 parity plan
    let mut symbol = Symbol::new();
    symbol.push_bits(0b101, 3);
    for _ in 0..6 {
        symbol.push_bits(ean_pattern(0, Variant::Even) as u16, 7);
    }
    symbol.push_bits(0b01010, 5);
    for _ in 0..6 {
        symbol.push_bits(ean_pattern(0, Variant::Right) as u16, 7);
    }
    symbol.push_bits(0b101, 3);
    assert_eq!(decode_ean13(&symbol), Err(DecodingError::Parity));
}

#[test]
fn test_round_trip() {
    for (standard, data) in [
        (Standard::Ean13, "4006381333931"),
        (Standard::Ismn, "9790340146629"),
        (Standard::UpcA, "036000291452"),
        (Standard::UpcE, "01234565"),
        (Standard::UpcE, "11240133"),
        (Standard::Ean2, "97"),
        (Standard::Ean2, "05"),
    ] {
        let value = BarcodeValue::parse(standard, data, true).unwrap();
        let symbol = value.encode();
        assert_eq!(BarcodeValue::decode(standard, &symbol), Ok(value));
    }
}

#[test]
fn test_encode_ean2() {
    // (data, valid, last digit pattern)
    let cases = [
        ("34", true, "0100011"),
        ("97", true, "0010001"),
        ("1", true, "0110011"),
        ("", false, ""),
        ("x", false, ""),
    ];
    for (data, valid, tail) in cases {
        let value = BarcodeValue::parse(Standard::Ean2, data, true);
        assert_eq!(value.is_ok(), valid, "{data}");
        if let Ok(value) = value {
            let bits = value.encode().to_string();
            assert_eq!(bits.len(), EAN2_LEN);
            assert!(bits.starts_with("1011"));
            assert!(bits.ends_with(tail), "{data}: {bits}");
        }
    }
    let padded = BarcodeValue::parse(Standard::Ean2, "1", false).unwrap();
    assert_eq!(padded.data(true), "01");
    assert_eq!(padded.checksum(), "");
}

#[test]
fn test_decode_ean2() {
    // 34: start, 3 even, separator, 4 odd
    let symbol: Symbol = "10110100001010100011".parse().unwrap();
    assert_eq!(decode_ean2(&symbol).as_deref(), Ok("34"));
    assert_eq!(
        BarcodeValue::decode(Standard::Ean2, &symbol)
            .unwrap()
            .data(true),
        "34"
    );
    // 3 odd instead of even
    let symbol: Symbol = "10110111101010100011".parse().unwrap();
    assert_eq!(decode_ean2(&symbol), Err(DecodingError::Parity));
    let symbol: Symbol = "10100100001010100011".parse().unwrap();
    assert_eq!(decode_ean2(&symbol), Err(DecodingError::Guard));
    let symbol: Symbol = "1011010000101010001".parse().unwrap();
    assert_eq!(decode_ean2(&symbol), Err(DecodingError::Length));
}

#[test]
fn test_decode_upca_needs_leading_zero() {
    let ean = BarcodeValue::parse(Standard::Ean13, "4006381333931", true).unwrap();
    assert_eq!(
        BarcodeValue::decode(Standard::UpcA, &ean.encode()),
        Err(Error::Incompatible {
            from: Standard::Ean13,
            to: Standard::UpcA
        })
    );
}

#[test]
fn test_product_code() {
    let ean = BarcodeValue::parse(Standard::Ean13, "4006381333931", true).unwrap();
    assert_eq!(ean.product_code(), Some("33393"));
    let other = ean.with_product_code("42").unwrap();
    assert_eq!(other.product_code(), Some("00042"));
    assert_eq!(
        ean.with_product_code("123456"),
        Err(Error::LengthViolation { len: 6, width: 5 })
    );
    let upce = BarcodeValue::parse(Standard::UpcE, "01240136", true).unwrap();
    assert_eq!(upce.product_code(), None);
    assert!(upce.with_product_code("1").is_err());
}
