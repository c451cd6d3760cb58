//! Rule-driven payload generator.
//!
//! The generator knows nothing about concrete payloads. It walks the
//! payload's [`EncodingRule`](crate::encodings::EncodingRule)s in order, reads
//! each field through the rule's accessor and writes it in network byte
//! order.
//!
//! # Field Packing
//!
//! - `AttributeFormat` and `AttributeType` share one 16-bit word. The format
//!   bit is held until the type arrives, then both are written together.
//! - `AttributeLengthOrValue` is written as a Big Endian `u16`.
//! - `AttributeValue` is written only when the format bit selected long form.

use bytes::BufMut;

use crate::{
    encodings::EncodingType,
    errors::Result,
    flags::AttributeHeader,
    payloads::Payload,
};

/// Write `payload` to `dst`
///
/// # Errors
///
/// Returns [`ProtocolError::FieldTypeMismatch`](crate::ProtocolError::FieldTypeMismatch)
/// if an accessor hands back a value whose shape does not match its rule.
pub fn generate<P: Payload + 'static>(payload: &P, dst: &mut impl BufMut) -> Result<()> {
    let mut short_form = true;
    let mut written = 0usize;

    for rule in payload.encoding_rules() {
        let value = rule.read_from(payload);
        match rule.kind {
            EncodingType::AttributeFormat => {
                short_form = value.into_flag(rule.kind)?;
            },
            EncodingType::AttributeType => {
                let attribute_type = value.into_u15(rule.kind)?;
                dst.put_u16(AttributeHeader::pack(short_form, attribute_type).to_word());
                written += 2;
            },
            EncodingType::AttributeLengthOrValue => {
                dst.put_u16(value.into_u16(rule.kind)?);
                written += 2;
            },
            EncodingType::AttributeValue => {
                let bytes = value.into_bytes(rule.kind)?;
                if !short_form {
                    dst.put_slice(bytes);
                    written += bytes.len();
                }
            },
        }
    }

    debug_assert_eq!(written, payload.length(), "generated length must match reported length");

    tracing::trace!(
        payload_type = ?payload.payload_type(),
        written,
        "Generated payload"
    );

    Ok(())
}

/// Encode `payload` into a freshly allocated buffer
///
/// # Errors
///
/// Same as [`generate`].
pub fn to_bytes<P: Payload + 'static>(payload: &P) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(payload.length());
    generate(payload, &mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payloads::TransformAttribute;

    #[test]
    fn short_form_sets_format_bit() {
        let attribute = TransformAttribute::with_value(14, &[0x00, 0x80]).unwrap();
        assert_eq!(to_bytes(&attribute).unwrap(), [0x80, 0x0E, 0x00, 0x80]);
    }

    #[test]
    fn long_form_appends_value() {
        let attribute = TransformAttribute::with_value(0x0102, &[0xAA, 0xBB, 0xCC]).unwrap();
        assert_eq!(to_bytes(&attribute).unwrap(), [0x01, 0x02, 0x00, 0x03, 0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn appends_to_existing_buffer() {
        let first = TransformAttribute::with_value(1, &[0x01]).unwrap();
        let second = TransformAttribute::with_value(2, &[1, 2, 3, 4]).unwrap();

        let mut wire = Vec::new();
        generate(&first, &mut wire).unwrap();
        generate(&second, &mut wire).unwrap();

        assert_eq!(wire.len(), first.length() + second.length());
        assert_eq!(&wire[4..8], &[0x00, 0x02, 0x00, 0x04]);
    }
}
