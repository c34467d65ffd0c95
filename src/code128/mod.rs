//! Code 128 as defined in ISO/IEC 15417:2007.
//!
//! Input is segmented into runs of the three code sets: A covers ASCII
//! control characters, uppercase letters and punctuation, B covers the
//! printable ASCII range, and C packs two digits into one symbol. The
//! segmentation aims for the smallest number of symbols.
//!
//! ```rust
//! use linear_barcode::code128::{Code128, CodeSet};
//!
//! let code = Code128::encode(b"1234abc")?;
//! let sets: Vec<CodeSet> = code.segments().iter().map(|s| s.code_set).collect();
//! assert_eq!(sets, [CodeSet::C, CodeSet::B]);
//! # Ok::<(), linear_barcode::Error>(())
//! ```
//!
//! Only bytes up to `0x7F` can be encoded, the Latin 1 extension of the
//! standard (FNC4) is not supported.

use crate::std::vec::Vec;

use crate::{Bar, BarCoordinate, Error, Symbol};

mod decode;
mod encode;

pub use decode::{decode, decode_str, decode_symbol};

const SHIFT: u8 = 98;
const SWITCH_C: u8 = 99;
const SWITCH_B: u8 = 100;
const SWITCH_A: u8 = 101;
const START_A: u8 = 103;
const START_B: u8 = 104;
const START_C: u8 = 105;
const STOP: u8 = 108;

/// Modules per symbol, the stop symbol has two more.
const SYMBOL_WIDTH: usize = 11;
const STOP_WIDTH: usize = 13;
/// Quiet zone on each side, in modules.
const QUIET_ZONE: usize = 10;

fn checksum(symbols: impl Iterator<Item = u8>) -> u8 {
    (symbols
        .enumerate()
        .map(|(i, idx)| (i.max(1) as u64) * idx as u64)
        .sum::<u64>()
        % 103) as u8
}

/// The three character sets of Code 128.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum CodeSet {
    /// ASCII `0x00` to `0x5F`.
    A,
    /// ASCII `0x20` to `0x7F`.
    B,
    /// Pairs of digits.
    C,
}

impl CodeSet {
    fn start(self) -> u8 {
        match self {
            CodeSet::A => START_A,
            CodeSet::B => START_B,
            CodeSet::C => START_C,
        }
    }

    fn switch(self) -> u8 {
        match self {
            CodeSet::A => SWITCH_A,
            CodeSet::B => SWITCH_B,
            CodeSet::C => SWITCH_C,
        }
    }
}

/// A run of input bytes encoded in one code set.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Segment {
    /// The code set of this run.
    pub code_set: CodeSet,
    /// The input bytes, an even number of digits for [`CodeSet::C`].
    pub data: Vec<u8>,
    /// Whether this is a single byte encoded after a shift symbol, leaving
    /// the active code set unchanged.
    pub shift: bool,
}

/// A Code 128.
///
/// You can use the bars iterators [`bars()`](Self::bars) or
/// [`bar_coordinates()`](Self::bar_coordinates), and the [size](Self::len)
/// to compute a visualization. A bar is a "black line" of the code and has
/// a unitless width between one and four, as well as a free space after it,
/// also sized between one and four.
///
/// The standard demands a quiet zone of ten modules on the left and right
/// side of the code. To compute the size of a bar, multiply its width with
/// the available space for the code divided by the [code's length](Self::len).
///
/// ```rust
/// # use linear_barcode::code128::Code128;
/// let code = Code128::encode(b"Code128 <3")?;
/// let available_space = 100.0; // unit is, say, "pt"
/// let line_width = available_space / code.len() as f64;
/// for bar in code.bar_coordinates() {
///      let x = bar.x as f64 * line_width;
///      let width = bar.width as f64 * line_width;
///      // print line at `x` pt, `width` pt wide
/// }
/// # Ok::<(), linear_barcode::Error>(())
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Code128 {
    indices: Vec<u8>,
    segments: Vec<Segment>,
}

impl Code128 {
    /// Encode the bytes as Code 128.
    ///
    /// Fails with [`Error::EncodingDomain`] for bytes above `0x7F`.
    pub fn encode(data: &[u8]) -> Result<Self, Error> {
        Code128Builder::default().encode(data)
    }

    /// Encode the ASCII string as Code 128.
    ///
    /// Fails with [`Error::EncodingDomain`] for any character outside of
    /// ASCII.
    pub fn encode_str(text: &str) -> Result<Self, Error> {
        Code128Builder::default().encode_str(text)
    }

    /// The segments the input was split into.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The symbol values from start to stop, checksum included.
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// The modules of the code, quiet zones are not included.
    pub fn symbol(&self) -> Symbol {
        let mut symbol = Symbol::new();
        for &idx in &self.indices {
            let width = if idx == STOP { STOP_WIDTH } else { SYMBOL_WIDTH };
            symbol.push_bits(encode::PATTERNS[idx as usize], width);
        }
        symbol
    }

    /// Get the sequence of bars this Code 128 consists of.
    pub fn bars(&self) -> impl Iterator<Item = Bar> + '_ {
        self.indices
            .iter()
            .flat_map(|idx| encode::bits_to_bars(encode::PATTERNS[*idx as usize]))
    }

    /// Get the coordinates of the bars this Code 128 consists of.
    ///
    /// The first bar is at 10, the offset for the left quiet zone.
    pub fn bar_coordinates(&self) -> impl Iterator<Item = BarCoordinate> + '_ {
        self.bars().scan(QUIET_ZONE as u32, |pos, bar| {
            let x = *pos;
            *pos += bar.width as u32 + bar.space as u32;
            Some(BarCoordinate {
                x,
                width: bar.width,
            })
        })
    }

    /// Get the total width of the code in modules with the quiet zones
    /// included.
    pub fn len(&self) -> usize {
        self.indices.len() * SYMBOL_WIDTH + (STOP_WIDTH - SYMBOL_WIDTH) + 2 * QUIET_ZONE
    }

    /// Whether this Code 128 encodes empty data.
    pub fn is_empty(&self) -> bool {
        self.indices.len() == 3
    }
}

/// Segmentation strategies.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Encoder {
    /// The conventional rules, replaced by the shortest encoding only if
    /// that one saves symbols.
    #[default]
    Mixed,
    /// The conventional rules: code set C for runs of four or more digits,
    /// shift for a single character of the other set.
    Greedy,
    /// A search for the shortest encoding.
    DynamicProgramming,
}

/// Builder for encoding a Code 128 with more control.
///
/// ```rust
/// # use linear_barcode::code128::{Code128Builder, Encoder};
/// let code = Code128Builder::default()
///     .with_encoder(Encoder::Greedy)
///     .encode(b"HELLO\n123456w0r1\rd")?;
/// assert_eq!(code.segments().len(), 5);
/// # Ok::<(), linear_barcode::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Code128Builder {
    encoder: Encoder,
}

impl Code128Builder {
    /// Which segmentation strategy should be used.
    pub fn with_encoder(self, encoder: Encoder) -> Self {
        Self { encoder }
    }

    /// Encode the bytes as Code 128.
    pub fn encode(self, data: &[u8]) -> Result<Code128, Error> {
        if let Some(&byte) = data.iter().find(|&&b| b > 0x7F) {
            return Err(Error::EncodingDomain(byte));
        }
        let assembled = |segments: Vec<Segment>| {
            let indices = encode::assemble(&segments);
            (segments, indices)
        };
        let (segments, mut indices) = match self.encoder {
            Encoder::Greedy => assembled(encode::segment_greedy(data)),
            Encoder::DynamicProgramming => assembled(encode::segment_optimal(data)),
            Encoder::Mixed => {
                let greedy = assembled(encode::segment_greedy(data));
                let optimal = assembled(encode::segment_optimal(data));
                if optimal.1.len() < greedy.1.len() {
                    tracing::trace!(
                        saved = greedy.1.len() - optimal.1.len(),
                        "shortest segmentation saves symbols"
                    );
                    optimal
                } else {
                    greedy
                }
            }
        };
        indices.push(checksum(indices.iter().copied()));
        indices.push(STOP);
        tracing::debug!(
            encoder = ?self.encoder,
            segments = segments.len(),
            symbols = indices.len(),
            "encoded Code 128"
        );
        Ok(Code128 { indices, segments })
    }

    /// Encode the ASCII string as Code 128.
    pub fn encode_str(self, text: &str) -> Result<Code128, Error> {
        self.encode(text.as_bytes())
    }
}

#[test]
fn test_bar_size() {
    for pattern in &encode::PATTERNS[0..107] {
        let size: u32 = encode::bits_to_bars(*pattern)
            .into_iter()
            .map(|m| m.width as u32 + m.space as u32)
            .sum();
        assert_eq!(size, 11);
    }

    let size: u32 = encode::bits_to_bars(encode::PATTERNS[STOP as usize])
        .into_iter()
        .map(|m| m.width as u32 + m.space as u32)
        .sum();
    assert_eq!(size, 13);
}

#[test]
fn test_code_size() {
    let code = Code128::encode(b"foo").unwrap();
    let size = code
        .bars()
        .map(|m| m.width as u32 + m.space as u32)
        .sum::<u32>()
        + 20;
    assert_eq!(code.len(), size as usize);
    assert_eq!(code.symbol().len() + 20, code.len());
}

#[test]
fn test_is_empty() {
    assert!(Code128::encode(b"").unwrap().is_empty());
    assert!(!Code128::encode(b".").unwrap().is_empty());
}

#[test]
fn test_encoding_domain() {
    assert_eq!(Code128::encode(b"ab\x80"), Err(Error::EncodingDomain(0x80)));
    assert_eq!(
        Code128::encode_str("Füße"),
        Err(Error::EncodingDomain(0xC3))
    );
}

#[test]
fn test_ascii() {
    for x in 0..=0x7F {
        let code = Code128::encode(&[x]).unwrap();
        let bars: Vec<Bar> = code.bars().collect();
        assert_eq!(decode(&bars), Ok(crate::std::vec![x]));
    }
}

#[test]
fn test_bar_coordinates() {
    let code = Code128::encode(b"").unwrap();
    let bars: Vec<_> = code.bar_coordinates().collect();
    assert_eq!(bars[0], BarCoordinate { x: 10, width: 2 });
    assert_eq!(bars[1], BarCoordinate { x: 13, width: 1 });
    assert_eq!(bars[2], BarCoordinate { x: 16, width: 1 });
    assert_eq!(bars[3], BarCoordinate { x: 21, width: 2 });
    assert_eq!(bars[4], BarCoordinate { x: 25, width: 2 });
    assert_eq!(bars[5], BarCoordinate { x: 28, width: 2 });
    assert_eq!(bars[6], BarCoordinate { x: 32, width: 2 });
    assert_eq!(bars[7], BarCoordinate { x: 37, width: 3 });
    assert_eq!(bars[8], BarCoordinate { x: 41, width: 1 });
    assert_eq!(bars[9], BarCoordinate { x: 43, width: 2 });
    assert_eq!(bars.len(), 10);
}

#[test]
fn test_reference_vectors() {
    use crate::std::string::ToString;

    let vectors: [(&[u8], &str); 13] = [
        (b"", "11010010000110011011001100011101011"),
        (b"12", "1101001110010110011100100110011101100011101011"),
        (b"123", "11010010000100111001101100111001011001011100100011001001100011101011"),
        (b"1234", "110100111001011001110010001011000100100111101100011101011"),
        (b"1256", "110100111001011001110011100010110111011011101100011101011"),
        (b"123abc", "11010010000100111001101100111001011001011100100101100001001000011010000101100100001101001100011101011"),
        (b"1234abc", "11010011100101100111001000101100010111101110100101100001001000011010000101100100010001101100011101011"),
        (b"1234ABC123", "11010011100101100111001000101100010111101110101000110001000101100010001000110100111001101100111001011001011100101011110001100011101011"),
        (b"856bcg7854", "11010010000111010011001101110010011001110100100100001101000010110010011010000101110111101100001010011101011000111101110101100011101011"),
        (b"RtGh1452CVB", "110100100001100010111010011110100110100010001001100001010111011110100110011101101110001010111101110100010001101110101100010001011000100010111101100011101011"),
        (b"RtGh1CVB", "110100100001100010111010011110100110100010001001100001010011100110100010001101110101100010001011000111010011001100011101011"),
        (b"\x00\x01ABcd", "1101000010010100001100100101100001010001100010001011000101111011101000010110010000100110111000101101100011101011"),
        (b"1245\x7fbcde", "110100111001011001110010111011000101111011101011110100010010000110100001011001000010011010110010000100110000101100011101011"),
    ];
    for (data, bits) in vectors {
        let code = Code128::encode(data).unwrap();
        assert_eq!(code.symbol().to_string(), bits, "{data:?}");
        assert_eq!(decode_symbol(&code.symbol()).as_deref(), Ok(data));
    }
}

#[test]
fn test_strategies() {
    let data = b"8\x009c29bb";
    let encode = |encoder| {
        Code128Builder::default()
            .with_encoder(encoder)
            .encode(data)
            .unwrap()
    };
    let greedy = encode(Encoder::Greedy);
    let optimal = encode(Encoder::DynamicProgramming);
    assert_eq!(greedy.indices().len(), 13);
    assert_eq!(optimal.indices().len(), 12);
    assert_eq!(encode(Encoder::Mixed), optimal);
    assert_eq!(
        optimal.segments()[1],
        Segment {
            code_set: CodeSet::B,
            data: b"c29bb".to_vec(),
            shift: false
        }
    );
    for code in [greedy, optimal] {
        let bars: Vec<Bar> = code.bars().collect();
        assert_eq!(decode(&bars).as_deref(), Ok(&data[..]));
    }
}
