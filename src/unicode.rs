use core::iter::repeat;

use crate::std::string::String;

use crate::Bar;

/// Quiet zone on each side, in modules.
const QUIET_ZONE: usize = 10;

/// Create a string representation of the bars using Unicode block characters.
///
/// Each character shows two modules. The quiet zones are included.
///
/// ## Example
/// ```
/// # use linear_barcode::{bars_to_blocks, code128::Code128, BarcodeValue};
/// assert_eq!(
///     bars_to_blocks(Code128::encode(b"<3")?.bars()),
///     "     █▐ ▌ ▐█ █▐ █ ▌█▌▐  ▌█ █ ▐█▐▐▌     ",
/// );
///
/// let msi = BarcodeValue::parse_msi("12346", true)?;
/// println!("{}", bars_to_blocks(msi.encode().bars()));
/// # Ok::<(), linear_barcode::Error>(())
/// ```
pub fn bars_to_blocks(bars: impl IntoIterator<Item = Bar>) -> String {
    let modules = bars.into_iter().flat_map(|bar| {
        repeat(true)
            .take(bar.width as usize)
            .chain(repeat(false).take(bar.space as usize))
    });
    let mut modules = repeat(false)
        .take(QUIET_ZONE)
        .chain(modules)
        .chain(repeat(false).take(QUIET_ZONE));

    let mut blocks = String::new();
    while let Some(left) = modules.next() {
        let right = modules.next().unwrap_or(false);
        blocks.push(match (left, right) {
            (true, true) => '█',
            (true, false) => '▌',
            (false, true) => '▐',
            (false, false) => ' ',
        });
    }
    blocks
}

#[test]
fn test_odd_width() {
    // 101 plus quiet zones is 23 modules, padded to 12 characters
    let symbol: crate::Symbol = "101".parse().unwrap();
    let blocks = bars_to_blocks(symbol.bars());
    assert_eq!(blocks.chars().count(), 12);
    assert_eq!(blocks.trim(), "▌▌");
}
