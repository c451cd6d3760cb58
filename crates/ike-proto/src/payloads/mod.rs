//! IKE payload types.
//!
//! Every payload kind implements [`Payload`]. The trait gives the generator
//! and parser a uniform view over heterogeneous payloads: each one reports
//! its own length and type tag, the type of the payload that follows it, and
//! the encoding rules describing its wire layout.
//!
//! # Design Rationale
//!
//! - **Rules Instead of Hand-Written Codecs**: Payloads declare their layout
//!   as data ([`EncodingRule`]). One generator and one parser serve every
//!   payload kind.
//!
//! - **Object Safety**: [`Payload::encoding_rules`] is bound by `Self: Sized`,
//!   so `dyn Payload` remains usable for payload chains while the codec still
//!   gets statically typed accessors.

pub mod transform_attribute;

pub use transform_attribute::{TransformAttribute, TransformAttributeType};

use crate::{PayloadType, encodings::EncodingRule};

/// Contract shared by every payload kind
pub trait Payload {
    /// Ordered wire layout of this payload
    fn encoding_rules(&self) -> &'static [EncodingRule<Self>]
    where
        Self: Sized;

    /// Encoded length in bytes, including any fixed header
    fn length(&self) -> usize;

    /// Type tag of this payload
    fn payload_type(&self) -> PayloadType;

    /// Type tag of the payload that follows this one in a chain
    fn next_payload_type(&self) -> PayloadType;

    /// Tear the payload down, releasing everything it owns
    ///
    /// Consumes the payload, so it cannot be used or destroyed again.
    fn destroy(self: Box<Self>) {
        drop(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payloads_are_object_safe() {
        let mut attribute = TransformAttribute::new();
        attribute.set_value(&[0xAA, 0xBB, 0xCC]).expect("small allocation");

        let payload: Box<dyn Payload> = Box::new(attribute);
        assert_eq!(payload.payload_type(), PayloadType::TransformAttribute);
        assert_eq!(payload.next_payload_type(), PayloadType::NoPayload);
        assert_eq!(payload.length(), 7);
        payload.destroy();
    }
}
