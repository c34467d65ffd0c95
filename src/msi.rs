//! MSI Plessey, one 12 module pattern per digit between a start and a stop
//! pattern.

use crate::std::string::String;

use crate::tables::{MSI, MSI_WIDTH};
use crate::{DecodingError, Symbol};

const START: (u16, usize) = (0b110, 3);
const STOP: (u16, usize) = (0b1001, 4);

/// Encode ASCII digits, check digits included.
pub(crate) fn encode(digits: &[u8]) -> Symbol {
    let mut symbol = Symbol::new();
    symbol.push_bits(START.0, START.1);
    for &digit in digits {
        symbol.push_bits(MSI[(digit - b'0') as usize], MSI_WIDTH);
    }
    symbol.push_bits(STOP.0, STOP.1);
    symbol
}

/// Decode a symbol into its digits, check digits included.
pub(crate) fn decode(symbol: &Symbol) -> Result<String, DecodingError> {
    let body = symbol
        .len()
        .checked_sub(START.1 + STOP.1)
        .ok_or(DecodingError::Short)?;
    if body % MSI_WIDTH != 0 {
        return Err(DecodingError::Length);
    }
    if !symbol.matches(0, START.0, START.1) {
        return Err(DecodingError::Guard);
    }
    if !symbol.matches(START.1 + body, STOP.0, STOP.1) {
        return Err(DecodingError::WrongStop);
    }

    (0..body / MSI_WIDTH)
        .map(|i| {
            let pattern = symbol
                .read(START.1 + i * MSI_WIDTH, MSI_WIDTH)
                .ok_or(DecodingError::Short)?;
            MSI.iter()
                .position(|&p| p == pattern)
                .map(|digit| (b'0' + digit as u8) as char)
                .ok_or(DecodingError::Pattern(pattern))
        })
        .collect()
}

#[cfg(test)]
use crate::std::string::ToString;

#[test]
fn test_encode() {
    let symbol = encode(b"12346");
    assert_eq!(
        symbol.to_string(),
        "1101001001001101001001101001001001101101001101001001001101101001001"
    );
    assert_eq!(symbol.sections().len(), 1);
}

#[test]
fn test_decode() {
    let symbol: Symbol = "1101001001001101001001101001001001101101001101001001001101101001001"
        .parse()
        .unwrap();
    assert_eq!(decode(&symbol).as_deref(), Ok("12346"));
    assert_eq!(decode(&"1101001".parse().unwrap()).as_deref(), Ok(""));
}

#[test]
fn test_decode_errors() {
    let parse = |s: &str| -> Symbol { s.parse().unwrap() };
    assert_eq!(decode(&parse("110100")), Err(DecodingError::Short));
    assert_eq!(decode(&parse("11010011")), Err(DecodingError::Length));
    assert_eq!(
        decode(&parse("1111001001001101001")),
        Err(DecodingError::Guard)
    );
    assert_eq!(
        decode(&parse("1101001001001101000")),
        Err(DecodingError::WrongStop)
    );
    assert_eq!(
        decode(&parse("1101101101101101001")),
        Err(DecodingError::Pattern(0b110110110110))
    );
}
