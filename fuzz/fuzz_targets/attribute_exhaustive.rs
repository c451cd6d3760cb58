//! Exhaustive positive space fuzzer for transform attribute encoding/decoding
//!
//! Unlike random fuzzing (attribute_parse.rs), this fuzzer EXHAUSTIVELY tests
//! all combinations of:
//! - Edge-case attribute types (including ones with the high bit set)
//! - Value lengths around the short/long form boundary and the u16 limit
//! - Sequences of value replacements on one attribute
//!
//! This ensures we don't miss bugs that occur only with specific type+length
//! combinations that random sampling might not hit.

#![no_main]

use ike_proto::{TransformAttribute, generator, parser};
use libfuzzer_sys::fuzz_target;

// Edge-case values for the 16-bit type input
const TYPES: &[u16] = &[
    0,
    1,
    14,     // Key Length
    0x7FFE,
    0x7FFF, // Largest storable type
    0x8000, // Only the format bit
    0x8005,
    u16::MAX,
];

// Value lengths to test
const VALUE_LENS: &[usize] = &[
    0,     // Empty
    1,     // Zero-padded inline
    2,     // Exactly inline
    3,     // Smallest long form
    4,
    255,
    256,
    65535, // Largest long form
];

fuzz_target!(|data: &[u8]| {
    // Use input data to select which combination to test
    // This allows libFuzzer to guide exploration while remaining exhaustive
    if data.len() < 2 {
        return;
    }

    let attribute_type = TYPES[data[0] as usize % TYPES.len()];
    let previous_len = VALUE_LENS[data[1] as usize % VALUE_LENS.len()];
    let fill = &data[2..];

    for &value_len in VALUE_LENS {
        let value: Vec<u8> = (0..value_len).map(|i| fill.get(i).copied().unwrap_or(i as u8)).collect();

        let mut attribute = TransformAttribute::new();
        attribute.set_attribute_type(attribute_type);
        attribute.set_value(&vec![0xEE; previous_len]).expect("set_value should succeed");
        attribute.set_value(&value).expect("set_value should succeed");

        // INVARIANT 1: Type is masked to 15 bits
        assert_eq!(attribute.attribute_type(), attribute_type & 0x7FFF);

        // INVARIANT 2: Form is decided by the last value only
        assert_eq!(attribute.is_short_form(), value_len <= 2, "Form mismatch for len={}", value_len);

        // INVARIANT 3: Reported length follows the form
        let expected_len = if value_len <= 2 { 4 } else { 4 + value_len };
        assert_eq!(attribute.length(), expected_len, "Length mismatch for len={}", value_len);

        // INVARIANT 4: Round-trip must be identity
        let wire = generator::to_bytes(&attribute).expect("encode should never fail");
        assert_eq!(wire.len(), expected_len);
        let decoded: TransformAttribute = parser::parse(&wire).expect("decode should succeed");
        assert_eq!(decoded, attribute, "Round-trip mismatch for len={}", value_len);
    }
});
