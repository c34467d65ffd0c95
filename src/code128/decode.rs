use crate::std::string::String;
use crate::std::vec::Vec;

use super::{CodeSet, SHIFT, START_A, START_B, START_C, STOP, SWITCH_A, SWITCH_B, SWITCH_C};
use crate::{Bar, DecodingError, Symbol};

pub(crate) fn lookup(pattern: u16) -> Result<u8, DecodingError> {
    const PATTERN_REVERSE: [u16; 109] = [
        0x426, 0x42c, 0x432, 0x434, 0x446, 0x44c, 0x458, 0x45e, 0x462, 0x464, 0x468, 0x46e, 0x476,
        0x47a, 0x486, 0x48c, 0x498, 0x49e, 0x4b0, 0x4bc, 0x4c2, 0x4c4, 0x4c8, 0x4ce, 0x4d0, 0x4dc,
        0x4e6, 0x4ec, 0x4f2, 0x4f4, 0x50c, 0x518, 0x51e, 0x530, 0x53c, 0x578, 0x584, 0x588, 0x58e,
        0x590, 0x59c, 0x5b8, 0x5c6, 0x5cc, 0x5d8, 0x5de, 0x5e2, 0x5e4, 0x5e8, 0x5ee, 0x612, 0x614,
        0x622, 0x624, 0x628, 0x62e, 0x636, 0x63a, 0x642, 0x644, 0x648, 0x64e, 0x650, 0x65c, 0x666,
        0x66c, 0x672, 0x674, 0x684, 0x688, 0x68e, 0x690, 0x69c, 0x6b8, 0x6c6, 0x6cc, 0x6d8, 0x6de,
        0x6e2, 0x6e4, 0x6e8, 0x6ee, 0x6f6, 0x716, 0x71a, 0x726, 0x72c, 0x732, 0x734, 0x746, 0x74c,
        0x758, 0x75e, 0x762, 0x764, 0x768, 0x76e, 0x776, 0x77a, 0x78a, 0x792, 0x794, 0x7a2, 0x7a4,
        0x7a8, 0x7ae, 0x7b6, 0x7ba, 0x18eb,
    ];
    const PATTERN_INDEX: [u8; 109] = [
        0x44, 0x43, 0x4a, 0x49, 0x23, 0x05, 0x22, 0x5e, 0x26, 0x08, 0x25, 0x2c, 0x2f, 0x4f, 0x42,
        0x04, 0x03, 0x52, 0x41, 0x51, 0x48, 0x07, 0x06, 0x0e, 0x47, 0x0d, 0x11, 0x10, 0x55, 0x54,
        0x40, 0x21, 0x5d, 0x3f, 0x50, 0x5c, 0x46, 0x24, 0x2b, 0x45, 0x0c, 0x2a, 0x2e, 0x0f, 0x2d,
        0x63, 0x60, 0x53, 0x5f, 0x64, 0x4b, 0x4e, 0x29, 0x0b, 0x28, 0x32, 0x20, 0x6a, 0x3d, 0x0a,
        0x09, 0x14, 0x4c, 0x13, 0x02, 0x01, 0x12, 0x16, 0x67, 0x27, 0x31, 0x68, 0x69, 0x6b, 0x1f,
        0x00, 0x1e, 0x59, 0x34, 0x15, 0x33, 0x35, 0x5a, 0x38, 0x3b, 0x1a, 0x19, 0x1d, 0x1c, 0x37,
        0x18, 0x36, 0x65, 0x3a, 0x1b, 0x39, 0x17, 0x30, 0x3c, 0x3e, 0x58, 0x57, 0x62, 0x56, 0x61,
        0x66, 0x5b, 0x4d, 0x6c,
    ];
    PATTERN_REVERSE
        .binary_search(&pattern)
        .map_err(|_| DecodingError::Pattern(pattern))
        .map(|i| PATTERN_INDEX[i])
}

fn bars_to_pattern(bars: &[Bar]) -> Result<u16, DecodingError> {
    let mut result = 0;
    for bar in bars {
        match bar.width {
            1 => result = (result << 1) | 0b1,
            2 => result = (result << 2) | 0b11,
            3 => result = (result << 3) | 0b111,
            4 => result = (result << 4) | 0b1111,
            _ => return Err(DecodingError::InvalidBars),
        }
        if bar.space > 4 {
            return Err(DecodingError::InvalidBars);
        }
        result <<= bar.space;
    }
    Ok(result)
}

fn decode_codes(bars: &[Bar]) -> Result<Vec<u8>, DecodingError> {
    if bars.len() < 3 + 3 + 4 {
        return Err(DecodingError::Short);
    }
    let (init, stop) = bars.split_at(bars.len() - 4);

    if bars_to_pattern(stop)? != super::encode::PATTERNS[STOP as usize] {
        return Err(DecodingError::WrongStop);
    }

    let (data, checksum) = init.split_at(init.len() - 3);

    if data.len() % 3 != 0 {
        return Err(DecodingError::Length);
    }

    let checksum = lookup(bars_to_pattern(checksum)?)?;
    let result = data
        .chunks_exact(3)
        .map(|chunk| lookup(bars_to_pattern(chunk)?))
        .collect::<Result<Vec<u8>, _>>()?;
    if checksum != super::checksum(result.iter().copied()) {
        return Err(DecodingError::Checksum);
    }
    Ok(result)
}

fn decode_a(ch: u8) -> Result<u8, DecodingError> {
    match ch {
        0..=0x3F => Ok(ch + b' '),
        0x40..=0x5F => Ok(ch - 0x40),
        _ => Err(DecodingError::Unexpected(ch)),
    }
}

fn decode_b(ch: u8) -> Result<u8, DecodingError> {
    match ch {
        0..=0x5F => Ok(ch + b' '),
        _ => Err(DecodingError::Unexpected(ch)),
    }
}

/// Decode a sequence of bars.
///
/// The checksum is verified. Function codes and the Latin 1 extension are
/// rejected with [`DecodingError::Unexpected`].
pub fn decode(bars: &[Bar]) -> Result<Vec<u8>, DecodingError> {
    let codes = decode_codes(bars)?;
    let mut codes = codes.iter().copied();
    let mut mode = match codes.next() {
        Some(START_A) => CodeSet::A,
        Some(START_B) => CodeSet::B,
        Some(START_C) => CodeSet::C,
        _ => return Err(DecodingError::NoMode),
    };
    let mut data = Vec::with_capacity(2 * codes.len());
    let mut switch_back = None;
    for ch in codes {
        match (mode, ch) {
            (CodeSet::A, SHIFT) | (CodeSet::B, SHIFT) if switch_back.is_none() => {
                switch_back = Some(mode);
                mode = if mode == CodeSet::A {
                    CodeSet::B
                } else {
                    CodeSet::A
                };
                continue;
            }
            (_, SWITCH_A) if mode != CodeSet::A => mode = CodeSet::A,
            (_, SWITCH_B) if mode != CodeSet::B => mode = CodeSet::B,
            (_, SWITCH_C) if mode != CodeSet::C => mode = CodeSet::C,
            (CodeSet::A, ch) => data.push(decode_a(ch)?),
            (CodeSet::B, ch) => data.push(decode_b(ch)?),
            (CodeSet::C, 0..=99) => {
                data.push(ch / 10 + b'0');
                data.push(ch % 10 + b'0');
            }
            (CodeSet::C, ch) => return Err(DecodingError::Unexpected(ch)),
        }
        if let Some(previous) = switch_back.take() {
            // a shift applies to one data character only
            if matches!(ch, SWITCH_A | SWITCH_B | SWITCH_C) {
                return Err(DecodingError::Unexpected(ch));
            }
            mode = previous;
        }
    }
    if switch_back.is_some() {
        return Err(DecodingError::Unexpected(SHIFT));
    }
    Ok(data)
}

/// Decode the bars and interpret the data as ASCII.
pub fn decode_str(bars: &[Bar]) -> Result<String, DecodingError> {
    Ok(decode(bars)?.into_iter().map(char::from).collect())
}

/// Decode the modules of a [`Symbol`], without quiet zones.
pub fn decode_symbol(symbol: &Symbol) -> Result<Vec<u8>, DecodingError> {
    if symbol.modules().first() != Some(&true) {
        return Err(DecodingError::InvalidBars);
    }
    decode(&symbol.bars().collect::<Vec<_>>())
}

#[cfg(test)]
use super::Code128;
#[cfg(test)]
use crate::std::vec;

/// Bars of the given symbol values followed by checksum and stop.
#[cfg(test)]
fn bars_of(indices: &[u8]) -> Vec<Bar> {
    let check = super::checksum(indices.iter().copied());
    indices
        .iter()
        .copied()
        .chain([check, STOP])
        .flat_map(|idx| super::encode::bits_to_bars(super::encode::PATTERNS[idx as usize]))
        .collect()
}

#[test]
fn test_bars_to_pattern() {
    assert_eq!(bars_to_pattern(&[Bar { width: 2, space: 0 }]), Ok(0b11));
    assert_eq!(
        bars_to_pattern(&[
            Bar { width: 2, space: 1 },
            Bar { width: 1, space: 2 },
            Bar { width: 3, space: 2 },
        ]),
        Ok(0b11010011100),
    );
    assert_eq!(
        bars_to_pattern(&[Bar { width: 5, space: 1 }]),
        Err(DecodingError::InvalidBars)
    );

    for pattern in super::encode::PATTERNS {
        let bars = super::encode::bits_to_bars(pattern);
        assert_eq!(bars_to_pattern(&bars), Ok(pattern));
    }
}

#[test]
fn test_hello_world() {
    let msg = b"HELLO\n123456w0r1\rd";
    let bars: Vec<Bar> = Code128::encode(msg).unwrap().bars().collect();
    assert_eq!(decode(&bars), Ok(msg.as_slice().into()));
    assert_eq!(decode_str(&bars).as_deref(), Ok("HELLO\n123456w0r1\rd"));
}

#[test]
fn test_empty() {
    let bars: Vec<Bar> = Code128::encode(b"").unwrap().bars().collect();
    assert_eq!(decode(&bars), Ok(vec![]));
}

#[test]
fn test_symbol() {
    let code = Code128::encode(b"RtGh1452CVB").unwrap();
    assert_eq!(decode_symbol(&code.symbol()), Ok(b"RtGh1452CVB".to_vec()));
    let blank: Symbol = "0".parse().unwrap();
    assert_eq!(decode_symbol(&blank), Err(DecodingError::InvalidBars));
}

#[test]
fn test_errors() {
    let mut bars: Vec<Bar> = Code128::encode(b"abc").unwrap().bars().collect();
    assert_eq!(decode(&bars[..9]), Err(DecodingError::Short));
    assert_eq!(decode(&bars[1..]), Err(DecodingError::Length));

    // "abc" followed by "d" with the checksum of "abc"
    let d = super::encode::bits_to_bars(super::encode::PATTERNS[(b'd' - b' ') as usize]);
    let at = bars.len() - 7;
    let tampered: Vec<Bar> = bars[..at]
        .iter()
        .chain(&d)
        .chain(&bars[at..])
        .copied()
        .collect();
    assert_eq!(decode(&tampered), Err(DecodingError::Checksum));

    let last = bars.len() - 1;
    bars[last].width = 1;
    assert_eq!(decode(&bars), Err(DecodingError::WrongStop));
}

#[test]
fn test_trailing_shift() {
    let bars = bars_of(&[START_B, b'a' - b' ', SHIFT]);
    assert_eq!(decode(&bars), Err(DecodingError::Unexpected(SHIFT)));
    // a shift followed by its character is fine
    let bars = bars_of(&[START_B, b'a' - b' ', SHIFT, 0x40]);
    assert_eq!(decode(&bars), Ok(vec![b'a', 0]));
}

#[test]
fn test_unrecognized_symbols() {
    assert_eq!(
        decode(&bars_of(&[b'a' - b' ', b'b' - b' '])),
        Err(DecodingError::NoMode)
    );
    // FNC4 in code set A
    assert_eq!(
        decode(&bars_of(&[START_A, 33, SWITCH_A])),
        Err(DecodingError::Unexpected(SWITCH_A))
    );
    // FNC1 is not a digit pair
    assert_eq!(
        decode(&bars_of(&[START_C, 12, 102])),
        Err(DecodingError::Unexpected(102))
    );

    // 11100011101 is no symbol
    let bars = bars_of(&[START_B, 33]);
    let bogus = [
        Bar { width: 3, space: 3 },
        Bar { width: 3, space: 1 },
        Bar { width: 1, space: 0 },
    ];
    let bars: Vec<Bar> = bars[..3]
        .iter()
        .chain(&bogus)
        .chain(&bars[6..])
        .copied()
        .collect();
    assert_eq!(decode(&bars), Err(DecodingError::Pattern(0b11100011101)));
}
