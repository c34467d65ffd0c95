use std::io::Read;

use linear_barcode::{bars_to_blocks, code128::Code128, BarcodeValue, Standard};

/// Pick the first digit standard accepting the input, Code 128 otherwise.
fn blocks(text: &str) -> Result<(String, String), linear_barcode::Error> {
    let candidates = [
        (Standard::Ean13, true),
        (Standard::Ean13, false),
        (Standard::UpcA, true),
        (Standard::Ean2, false),
        (Standard::UpcE, true),
    ];
    for (standard, has_checksum) in candidates {
        if let Ok(value) = BarcodeValue::parse(standard, text, has_checksum) {
            let label = format!("{}: {}", value.standard(), value.printable());
            return Ok((bars_to_blocks(value.encode().bars()), label));
        }
    }
    let code = Code128::encode_str(text)?;
    Ok((bars_to_blocks(code.bars()), format!("Code 128: {text:?}")))
}

fn main() {
    let mut msg = Vec::new();
    if atty::isnt(atty::Stream::Stdin) {
        let mut stdin = std::io::stdin();
        stdin.read_to_end(&mut msg).unwrap();
    }
    let msg = String::from_utf8(msg).unwrap();
    match blocks(msg.trim_end_matches('\n')) {
        Ok((string, label)) => {
            println!("{}", &string);
            println!("{}", &string);
            println!("{}", &string);
            println!("{label}");
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
