//! Static encoding and parity tables of the EAN/UPC and MSI families.
//!
//! Patterns are stored most significant module first, a set bit is a black
//! module.

/// Width of an EAN/UPC digit in modules.
pub(crate) const DIGIT_WIDTH: usize = 7;

/// Which of the three EAN digit encodings is used.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum Variant {
    /// Left hand side, odd parity ("L").
    Odd,
    /// Left hand side, even parity ("G").
    Even,
    /// Right hand side ("R").
    Right,
}

impl Variant {
    pub(crate) const fn from_parity(even: bool) -> Self {
        if even {
            Variant::Even
        } else {
            Variant::Odd
        }
    }
}

const ODD: [u8; 10] = [
    0b0001101, 0b0011001, 0b0010011, 0b0111101, 0b0100011, 0b0110001, 0b0101111, 0b0111011,
    0b0110111, 0b0001011,
];

const EVEN: [u8; 10] = [
    0b0100111, 0b0110011, 0b0011011, 0b0100001, 0b0011101, 0b0111001, 0b0000101, 0b0010001,
    0b0001001, 0b0010111,
];

const RIGHT: [u8; 10] = [
    0b1110010, 0b1100110, 0b1101100, 0b1000010, 0b1011100, 0b1001110, 0b1010000, 0b1000100,
    0b1001000, 0b1110100,
];

/// The pattern of `digit` (0 to 9) in the given variant.
pub(crate) fn ean_pattern(digit: u8, variant: Variant) -> u8 {
    let table = match variant {
        Variant::Odd => &ODD,
        Variant::Even => &EVEN,
        Variant::Right => &RIGHT,
    };
    table[digit as usize]
}

/// Reverse lookup of a 7 module pattern in the allowed variants.
pub(crate) fn ean_digit(pattern: u8, variants: &[Variant]) -> Option<(u8, Variant)> {
    variants.iter().find_map(|&variant| {
        (0..10u8)
            .find(|&digit| ean_pattern(digit, variant) == pattern)
            .map(|digit| (digit, variant))
    })
}

/// Parity plans of the six left digits of an EAN-13, keyed by the leading
/// digit. Bit 5 is the first digit, a set bit selects the even encoding.
pub(crate) const EAN13_PARITY: [u8; 10] = [
    0b000000, 0b001011, 0b001101, 0b001110, 0b010011, 0b011001, 0b011100, 0b010101, 0b010110,
    0b011010,
];

/// Parity plans of the six UPC-E body digits, keyed by the check digit and
/// then the number system (0 or 1). Same bit layout as [`EAN13_PARITY`].
///
/// Number system 1 is the complement of number system 0, so check digit 0
/// is `111000` (EEEOOO), not `110000`.
pub(crate) const UPCE_PARITY: [[u8; 2]; 10] = [
    [0b111000, 0b000111],
    [0b110100, 0b001011],
    [0b110010, 0b001101],
    [0b110001, 0b001110],
    [0b101100, 0b010011],
    [0b100110, 0b011001],
    [0b100011, 0b011100],
    [0b101010, 0b010101],
    [0b101001, 0b010110],
    [0b100101, 0b011010],
];

/// Whether position `i` (0 to 5) of a parity plan selects the even encoding.
#[inline]
pub(crate) const fn is_even(plan: u8, i: usize) -> bool {
    plan & (1 << (5 - i)) != 0
}

/// Width of an MSI digit in modules.
pub(crate) const MSI_WIDTH: usize = 12;

/// MSI digit patterns, each bit of the BCD value becomes `100` or `110`.
pub(crate) const MSI: [u16; 10] = [
    0b100100100100,
    0b100100100110,
    0b100100110100,
    0b100100110110,
    0b100110100100,
    0b100110100110,
    0b100110110100,
    0b100110110110,
    0b110100100100,
    0b110100100110,
];

#[test]
fn test_msi_is_bcd() {
    for (digit, pattern) in MSI.iter().enumerate() {
        for bit in 0..4 {
            let group = (pattern >> (9 - 3 * bit)) & 0b111;
            let expected = if digit & (1 << (3 - bit)) != 0 {
                0b110
            } else {
                0b100
            };
            assert_eq!(group, expected);
        }
    }
}

#[test]
fn test_even_mirrors_right() {
    // G patterns are the R patterns read backwards
    for digit in 0..10 {
        let right = ean_pattern(digit, Variant::Right);
        let mirrored = (0..7).fold(0u8, |acc, i| (acc << 1) | ((right >> i) & 1));
        assert_eq!(ean_pattern(digit, Variant::Even), mirrored);
        // and R is L with colours swapped
        assert_eq!(ean_pattern(digit, Variant::Odd) ^ 0x7f, right);
    }
}

#[test]
fn test_reverse_lookup() {
    let both = [Variant::Odd, Variant::Even];
    assert_eq!(ean_digit(0b0001011, &both), Some((9, Variant::Odd)));
    assert_eq!(ean_digit(0b0010111, &both), Some((9, Variant::Even)));
    assert_eq!(ean_digit(0b1110100, &both), None);
    assert_eq!(
        ean_digit(0b1110100, &[Variant::Right]),
        Some((9, Variant::Right))
    );
}

#[test]
fn test_parity_rows_unique() {
    for i in 0..10 {
        assert!(is_even(UPCE_PARITY[i][0], 0));
        assert!(!is_even(EAN13_PARITY[i], 0));
        for j in (i + 1)..10 {
            assert_ne!(EAN13_PARITY[i], EAN13_PARITY[j]);
            assert_ne!(UPCE_PARITY[i][0], UPCE_PARITY[j][0]);
        }
        // number system 1 uses the complementary plan
        assert_eq!(UPCE_PARITY[i][0] ^ 0b111111, UPCE_PARITY[i][1]);
    }
}
