//! Snapshot tests for wire format stability.
//!
//! These tests pin the exact bytes produced for representative attributes.
//! If the wire format changes, these tests will fail, ensuring we don't
//! accidentally break protocol compatibility.

use insta::assert_snapshot;
use ike_proto::{TransformAttribute, TransformAttributeType, generator};

/// Helper to encode an attribute to a hex string for snapshot
fn attribute_to_hex(attribute: &TransformAttribute) -> String {
    let wire = generator::to_bytes(attribute).expect("encoding should succeed");
    hex::encode(wire)
}

// =============================================================================
// Short Form (TV)
// =============================================================================

#[test]
fn snapshot_default_attribute() {
    assert_snapshot!(attribute_to_hex(&TransformAttribute::new()), @"80000000");
}

#[test]
fn snapshot_key_length_128() {
    let attribute = TransformAttribute::with_value(
        TransformAttributeType::KeyLength.to_u16(),
        &128u16.to_be_bytes(),
    )
    .expect("short values cannot fail");

    assert_snapshot!(attribute_to_hex(&attribute), @"800e0080");
}

#[test]
fn snapshot_key_length_256() {
    let attribute = TransformAttribute::with_value(
        TransformAttributeType::KeyLength.to_u16(),
        &256u16.to_be_bytes(),
    )
    .expect("short values cannot fail");

    assert_snapshot!(attribute_to_hex(&attribute), @"800e0100");
}

#[test]
fn snapshot_single_byte_value_is_zero_padded() {
    let attribute = TransformAttribute::with_value(1, &[0x10]).expect("short values cannot fail");

    assert_snapshot!(attribute_to_hex(&attribute), @"80011000");
}

#[test]
fn snapshot_max_type_short_form() {
    let attribute = TransformAttribute::with_value(0xFFFF, &[0x00, 0x01]).expect("short values cannot fail");

    // Bit 15 here is the format flag, the type itself is masked to 0x7FFF
    assert_snapshot!(attribute_to_hex(&attribute), @"ffff0001");
}

#[test]
fn snapshot_max_type_long_form_clears_high_bit() {
    let attribute =
        TransformAttribute::with_value(0xFFFF, &[0x01, 0x02, 0x03]).expect("small allocation");

    assert_snapshot!(attribute_to_hex(&attribute), @"7fff0003010203");
}

// =============================================================================
// Long Form (TLV)
// =============================================================================

#[test]
fn snapshot_four_byte_value() {
    let attribute =
        TransformAttribute::with_value(0, &[0x01, 0x02, 0x03, 0x04]).expect("small allocation");

    assert_snapshot!(attribute_to_hex(&attribute), @"0000000401020304");
}

#[test]
fn snapshot_masked_type_with_three_byte_value() {
    let attribute =
        TransformAttribute::with_value(0x8005, &[0xAA, 0xBB, 0xCC]).expect("small allocation");

    assert_snapshot!(attribute_to_hex(&attribute), @"00050003aabbcc");
}

#[test]
fn snapshot_long_value_replaced_by_short() {
    let mut attribute =
        TransformAttribute::with_value(9, &[0xAA, 0xBB, 0xCC]).expect("small allocation");
    attribute.set_value(&[0x01]).expect("short values cannot fail");

    assert_snapshot!(attribute_to_hex(&attribute), @"80090100");
}

// =============================================================================
// Attribute Lists
// =============================================================================

#[test]
fn snapshot_attribute_list() {
    let attributes = [
        TransformAttribute::with_value(14, &[0x00, 0x80]).expect("short values cannot fail"),
        TransformAttribute::with_value(7, &[0x01, 0x02, 0x03]).expect("small allocation"),
        TransformAttribute::new(),
    ];

    let mut wire = Vec::new();
    for attribute in &attributes {
        generator::generate(attribute, &mut wire).expect("encoding should succeed");
    }

    assert_snapshot!(hex::encode(wire), @"800e00800007000301020380000000");
}
