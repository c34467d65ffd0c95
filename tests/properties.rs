//! Property-based tests over all standards.
//!
//! 1. Encoding then decoding gives the value back, and the symbol back
//! 2. Validation agrees with parsing
//! 3. UPC-E survives the trip through UPC-A
//! 4. Code 128 strategies decode to the input and never lose to greedy

use linear_barcode::code128::{decode, Code128Builder, Encoder};
use linear_barcode::{BarcodeValue, ChecksumScheme, Standard, Symbol};
use proptest::prelude::*;

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 128,
        max_shrink_iters: 256,
        ..ProptestConfig::default()
    }
}

fn msi_standard() -> impl Strategy<Value = Standard> {
    prop_oneof![
        Just(Standard::Msi(None)),
        Just(Standard::Msi(Some(ChecksumScheme::Mod10))),
        Just(Standard::Msi(Some(ChecksumScheme::Mod11))),
        Just(Standard::Msi(Some(ChecksumScheme::DoubleMod10))),
        Just(Standard::Msi(Some(ChecksumScheme::Mod1110))),
    ]
}

/// Valid values of every standard, parsed without checksum.
fn barcode_value() -> impl Strategy<Value = BarcodeValue> {
    prop_oneof![
        "[0-9]{12}".prop_map(|d| (Standard::Ean13, d)),
        "[0-9]{9}".prop_map(|d| (Standard::Ismn, format!("979{d}"))),
        "[0-9]{11}".prop_map(|d| (Standard::UpcA, d)),
        "[01][0-9]{6}"
            .prop_filter("canonical UPC-E", |d| Standard::UpcE.check(d, false))
            .prop_map(|d| (Standard::UpcE, d)),
        "[0-9]{1,2}".prop_map(|d| (Standard::Ean2, d)),
        (msi_standard(), "[0-9]{2,20}"),
    ]
    .prop_map(|(standard, data)| BarcodeValue::parse(standard, &data, false).unwrap())
}

fn standard() -> impl Strategy<Value = Standard> {
    prop_oneof![
        Just(Standard::Ean13),
        Just(Standard::Ismn),
        Just(Standard::UpcA),
        Just(Standard::UpcE),
        Just(Standard::Ean2),
        msi_standard(),
    ]
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn value_round_trip(value in barcode_value()) {
        let symbol = value.encode();
        let decoded = BarcodeValue::decode(value.standard(), &symbol).unwrap();
        prop_assert_eq!(&decoded, &value);
        prop_assert_eq!(decoded.encode(), symbol);
    }

    #[test]
    fn symbol_text_round_trip(value in barcode_value()) {
        let symbol = value.encode();
        let parsed: Symbol = symbol.to_string().parse().unwrap();
        prop_assert_eq!(&parsed, &symbol);
        prop_assert_eq!(parsed.len(), symbol.len());
        prop_assert_eq!(symbol.sections().iter().map(|s| s.len).sum::<usize>(), symbol.len());
    }

    #[test]
    fn check_agrees_with_parse(
        standard in standard(),
        data in "[0-9a]{0,16}",
        has_checksum in any::<bool>(),
    ) {
        prop_assert_eq!(
            standard.check(&data, has_checksum),
            BarcodeValue::parse(standard, &data, has_checksum).is_ok()
        );
    }

    #[test]
    fn checksum_is_deterministic(value in barcode_value()) {
        let again = BarcodeValue::parse(value.standard(), value.data(false), false).unwrap();
        prop_assert_eq!(again.checksum(), value.checksum());
        prop_assert!(BarcodeValue::parse(value.standard(), value.data(true), true).is_ok());
    }

    #[test]
    fn upce_closure(data in "[01][0-9]{6}") {
        prop_assume!(Standard::UpcE.check(&data, false));
        let upce = BarcodeValue::parse(Standard::UpcE, &data, false).unwrap();
        let upca = upce.to_upca().unwrap();
        prop_assert_eq!(upca.checksum(), upce.checksum());
        prop_assert_eq!(upca.to_upce().unwrap(), upce.clone());
        prop_assert_eq!(upce.to_ean13().unwrap().to_upce().unwrap(), upce);
    }

    #[test]
    fn code128_round_trip(data in proptest::collection::vec(0u8..0x80, 0..40)) {
        let encode = |encoder| {
            Code128Builder::default().with_encoder(encoder).encode(&data).unwrap()
        };
        let greedy = encode(Encoder::Greedy);
        let mixed = encode(Encoder::Mixed);
        let optimal = encode(Encoder::DynamicProgramming);
        prop_assert!(mixed.len() <= greedy.len());
        prop_assert_eq!(mixed.len(), optimal.len());
        for code in [greedy, mixed, optimal] {
            let bars: Vec<_> = code.bars().collect();
            prop_assert_eq!(decode(&bars), Ok(data.clone()));
        }
    }

    #[test]
    fn code128_digits(data in "[0-9]{0,30}") {
        let code = Code128Builder::default().encode(data.as_bytes()).unwrap();
        let bars: Vec<_> = code.bars().collect();
        prop_assert_eq!(linear_barcode::code128::decode_str(&bars).unwrap(), data);
    }
}
