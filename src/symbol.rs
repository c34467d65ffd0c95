use core::fmt;
use core::str::FromStr;

use crate::std::vec::Vec;

use crate::{Bar, DecodingError};

/// Width multiplier renderers apply to guard patterns of the EAN/UPC family.
pub const GUARD_MULTIPLIER: f32 = 1.3;

/// A contiguous run of modules sharing one geometry hint.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Section {
    /// Index of the first module.
    pub start: usize,
    /// Number of modules.
    pub len: usize,
    /// Relative size a renderer should use for these bars, `1.0` for data.
    pub multiplier: f32,
}

/// An encoded barcode: one entry per module, `true` is black.
///
/// A symbol is framed by the guard or start/stop patterns of its standard,
/// quiet zones are not included. The textual form is a string of `0` and `1`:
///
/// ```
/// # use linear_barcode::{BarcodeValue, Standard, Symbol};
/// let ean = BarcodeValue::parse(Standard::Ean13, "4006381333931", true)?;
/// let symbol = ean.encode();
/// assert_eq!(symbol.len(), 95);
/// assert!(symbol.to_string().starts_with("101"));
/// assert_eq!(symbol.to_string().parse::<Symbol>()?, symbol);
/// # Ok::<(), linear_barcode::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Symbol {
    modules: Vec<bool>,
    sections: Vec<Section>,
}

impl Symbol {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append the lowest `width` bits of `pattern` as a new section.
    pub(crate) fn push_section(&mut self, pattern: u16, width: usize, multiplier: f32) {
        self.sections.push(Section {
            start: self.modules.len(),
            len: 0,
            multiplier,
        });
        self.push_bits(pattern, width);
    }

    /// Append the lowest `width` bits of `pattern` to the last section.
    pub(crate) fn push_bits(&mut self, pattern: u16, width: usize) {
        debug_assert!(width <= 16);
        if self.sections.is_empty() {
            self.sections.push(Section {
                start: 0,
                len: 0,
                multiplier: 1.0,
            });
        }
        for i in (0..width).rev() {
            self.modules.push(pattern & (1 << i) != 0);
        }
        if let Some(section) = self.sections.last_mut() {
            section.len += width;
        }
    }

    /// Read `width` modules starting at `start` as a number.
    pub(crate) fn read(&self, start: usize, width: usize) -> Option<u16> {
        let bits = self.modules.get(start..start + width)?;
        Some(bits.iter().fold(0, |acc, &bit| (acc << 1) | bit as u16))
    }

    /// Whether the modules at `start` match the lowest `width` bits of `pattern`.
    pub(crate) fn matches(&self, start: usize, pattern: u16, width: usize) -> bool {
        self.read(start, width) == Some(pattern)
    }

    /// The modules of this symbol, `true` is black.
    pub fn modules(&self) -> &[bool] {
        &self.modules
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the symbol has no modules at all.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Sections with geometry hints for renderers, covering all modules.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Get the sequence of bars this symbol consists of.
    ///
    /// White modules before the first black one are reported as a bar of
    /// width zero.
    pub fn bars(&self) -> impl Iterator<Item = Bar> + '_ {
        let mut modules = self.modules.iter().copied().peekable();
        core::iter::from_fn(move || {
            let mut bar = Bar { width: 0, space: 0 };
            while modules.next_if(|&black| black).is_some() {
                bar.width = bar.width.saturating_add(1);
            }
            while modules.next_if(|&black| !black).is_some() {
                bar.space = bar.space.saturating_add(1);
            }
            (bar.width > 0 || bar.space > 0).then_some(bar)
        })
    }
}

impl PartialEq for Symbol {
    /// Symbols are equal if their modules are, geometry hints are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.modules == other.modules
    }
}

impl Eq for Symbol {}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &black in &self.modules {
            f.write_str(if black { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Symbol {
    type Err = crate::Error;

    /// Parse a string of `0` and `1` into a symbol with a single section.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let modules = s
            .bytes()
            .map(|b| match b {
                b'0' => Ok(false),
                b'1' => Ok(true),
                _ => Err(DecodingError::NotBinary),
            })
            .collect::<Result<Vec<bool>, _>>()?;
        let sections = if modules.is_empty() {
            Vec::new()
        } else {
            crate::std::vec![Section {
                start: 0,
                len: modules.len(),
                multiplier: 1.0,
            }]
        };
        Ok(Self { modules, sections })
    }
}

#[cfg(test)]
use crate::std::string::ToString;

#[test]
fn test_push_and_read() {
    let mut symbol = Symbol::new();
    symbol.push_section(0b101, 3, GUARD_MULTIPLIER);
    symbol.push_section(0b0001101, 7, 1.0);
    symbol.push_bits(0b0011001, 7);
    assert_eq!(symbol.to_string(), "10100011010011001");
    assert_eq!(symbol.read(3, 7), Some(0b0001101));
    assert_eq!(symbol.read(15, 7), None);
    assert!(symbol.matches(0, 0b101, 3));
    assert_eq!(
        symbol.sections(),
        &[
            Section {
                start: 0,
                len: 3,
                multiplier: GUARD_MULTIPLIER
            },
            Section {
                start: 3,
                len: 14,
                multiplier: 1.0
            },
        ]
    );
}

#[test]
fn test_parse() {
    let symbol: Symbol = "1100101".parse().unwrap();
    assert_eq!(symbol.len(), 7);
    assert_eq!(symbol.sections().len(), 1);
    assert_eq!(
        "10x1".parse::<Symbol>(),
        Err(crate::Error::Format(DecodingError::NotBinary))
    );
    assert!("".parse::<Symbol>().unwrap().is_empty());
}

#[test]
fn test_bars() {
    let symbol: Symbol = "0110100111".parse().unwrap();
    let bars: Vec<Bar> = symbol.bars().collect();
    assert_eq!(
        bars,
        crate::std::vec![
            Bar { width: 0, space: 1 },
            Bar { width: 2, space: 1 },
            Bar { width: 1, space: 2 },
            Bar { width: 3, space: 0 },
        ]
    );
}
