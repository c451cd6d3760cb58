//! Declarative encoding rules.
//!
//! Each payload describes its wire layout as an ordered list of
//! [`EncodingRule`]s. A rule pairs a field role ([`EncodingType`]) with the
//! accessor functions that read the field from, or place it into, a payload
//! instance. The generator and parser walk these lists without knowing the
//! concrete payload type.
//!
//! Rules carry no wire logic. Bit packing, byte order and length-prefixed
//! streaming belong to [`crate::generator`] and [`crate::parser`].

use std::fmt;

use crate::errors::{ProtocolError, Result};

/// Wire field roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingType {
    /// Attribute Format bit (1 bit, MSB of the first word)
    AttributeFormat,
    /// Attribute type (15 bits, rest of the first word)
    AttributeType,
    /// Inline value or length of the following value (16 bits)
    AttributeLengthOrValue,
    /// Variable-length value, present only in long form
    AttributeValue,
}

impl EncodingType {
    /// Width of the field on the wire, in bits
    ///
    /// Returns `None` for variable-length fields.
    #[must_use]
    pub const fn bit_width(self) -> Option<usize> {
        match self {
            Self::AttributeFormat => Some(1),
            Self::AttributeType => Some(15),
            Self::AttributeLengthOrValue => Some(16),
            Self::AttributeValue => None,
        }
    }
}

/// Value of a single field, as exchanged between a payload and the codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Single bit
    Flag(bool),
    /// 15-bit unsigned integer (high bit always clear)
    U15(u16),
    /// 16-bit unsigned integer
    U16(u16),
    /// Borrowed byte sequence
    Bytes(&'a [u8]),
}

impl<'a> FieldValue<'a> {
    /// Unwrap a flag, or report which rule received the wrong shape
    pub fn into_flag(self, kind: EncodingType) -> Result<bool> {
        match self {
            Self::Flag(flag) => Ok(flag),
            _ => Err(ProtocolError::FieldTypeMismatch { kind }),
        }
    }

    /// Unwrap a 15-bit integer
    pub fn into_u15(self, kind: EncodingType) -> Result<u16> {
        match self {
            Self::U15(value) => Ok(value),
            _ => Err(ProtocolError::FieldTypeMismatch { kind }),
        }
    }

    /// Unwrap a 16-bit integer
    pub fn into_u16(self, kind: EncodingType) -> Result<u16> {
        match self {
            Self::U16(value) => Ok(value),
            _ => Err(ProtocolError::FieldTypeMismatch { kind }),
        }
    }

    /// Unwrap a byte sequence
    pub fn into_bytes(self, kind: EncodingType) -> Result<&'a [u8]> {
        match self {
            Self::Bytes(bytes) => Ok(bytes),
            _ => Err(ProtocolError::FieldTypeMismatch { kind }),
        }
    }
}

/// Reads one field out of a payload
pub type FieldGetter<P> = for<'a> fn(&'a P) -> FieldValue<'a>;

/// Places one field into a payload
pub type FieldSetter<P> = fn(&mut P, FieldValue<'_>) -> Result<()>;

/// One entry of a payload's wire layout
///
/// # Invariants
///
/// - **Fixed Order**: A payload's rules are listed in wire order. The codec
///   never reorders them.
/// - **Raw Placement**: `set` stores exactly what it is given. It must not
///   re-derive other fields, since the parser writes every field from wire
///   bits in sequence.
pub struct EncodingRule<P> {
    /// Field role
    pub kind: EncodingType,
    /// Field name (diagnostics only)
    pub field: &'static str,
    /// Accessor used when generating
    pub get: FieldGetter<P>,
    /// Accessor used when parsing
    pub set: FieldSetter<P>,
}

impl<P> EncodingRule<P> {
    /// Read this rule's field from `payload`
    pub fn read_from<'a>(&self, payload: &'a P) -> FieldValue<'a> {
        (self.get)(payload)
    }

    /// Place `value` into this rule's field of `payload`
    ///
    /// # Errors
    ///
    /// Propagates the setter's error (wrong field shape, allocation failure,
    /// length disagreement).
    pub fn write_into(&self, payload: &mut P, value: FieldValue<'_>) -> Result<()> {
        (self.set)(payload, value)
    }
}

// Manual impls: derives would require `P: Clone`/`P: Debug`
impl<P> Clone for EncodingRule<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for EncodingRule<P> {}

impl<P> fmt::Debug for EncodingRule<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodingRule")
            .field("kind", &self.kind)
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}
