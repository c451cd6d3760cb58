//! Transform attribute payload.
//!
//! A transform attribute is a single type/value item inside a transform
//! substructure, e.g. the key length of a variable-length cipher. Its value
//! travels in one of two mutually exclusive forms:
//!
//! - **Short form (TV)**: values of at most 2 bytes live inline in the
//!   length-or-value word. The attribute is always 4 bytes on the wire.
//! - **Long form (TLV)**: longer values are stored in an owned buffer and the
//!   length-or-value word holds their byte length. The attribute is
//!   `4 + length` bytes on the wire.
//!
//! # Invariants
//!
//! - **Type Masking**: The stored attribute type never has its high bit set.
//!   That bit belongs to the format flag on the wire.
//! - **Form Consistency**: The form is a tagged union. An inline value and an
//!   owned buffer can never coexist, and a long-form length is always the
//!   length of the buffer it describes.
//! - **Single Owner**: The value buffer is owned by exactly one attribute.
//!   Replacing the value drops the old buffer before a new one is allocated.

use crate::{
    PayloadType,
    encodings::{EncodingRule, EncodingType, FieldValue},
    errors::{ProtocolError, Result},
    payloads::Payload,
};

/// Fixed part of an attribute on the wire (format/type word + length/value word)
pub const ATTRIBUTE_HEADER_LEN: usize = 4;

/// Largest value that fits the inline short form
pub const MAX_SHORT_VALUE_LEN: usize = 2;

/// Largest value the 16-bit length field can describe
pub const MAX_VALUE_LEN: usize = u16::MAX as usize;

/// Known transform attribute types
///
/// RFC 7296 defines a single attribute for IKEv2. Other values are accepted by
/// [`TransformAttribute::set_attribute_type`] but have no name here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum TransformAttributeType {
    /// Key length in bits for variable-length ciphers (always short form)
    KeyLength = 14,
}

impl TransformAttributeType {
    /// Convert to raw u16 value
    #[must_use]
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// Convert from raw u16 value
    ///
    /// Returns `None` for attribute types without a name.
    #[must_use]
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            14 => Some(Self::KeyLength),
            _ => None,
        }
    }
}

/// Value storage; the variant is the Attribute Format flag
#[derive(Debug, Clone, PartialEq, Eq)]
enum AttributeValue {
    /// Inline bytes, exactly as they appear in the length-or-value word
    Short([u8; MAX_SHORT_VALUE_LEN]),
    /// Owned buffer; its length is the length-or-value word
    Long(Vec<u8>),
}

impl Default for AttributeValue {
    fn default() -> Self {
        Self::Short([0; MAX_SHORT_VALUE_LEN])
    }
}

/// A single IKEv2 transform attribute
///
/// Created in short form with type 0 and a zero value.
///
/// # Examples
///
/// ```
/// use ike_proto::payloads::{TransformAttribute, TransformAttributeType};
///
/// let mut attribute = TransformAttribute::new();
/// attribute.set_attribute_type(TransformAttributeType::KeyLength.to_u16());
/// attribute.set_value(&256u16.to_be_bytes())?;
///
/// assert!(attribute.is_short_form());
/// assert_eq!(attribute.value_u16(), Some(256));
/// assert_eq!(attribute.length(), 4);
/// # Ok::<(), ike_proto::ProtocolError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformAttribute {
    /// Attribute type (15 bits)
    attribute_type: u16,
    /// Inline value or owned buffer
    value: AttributeValue,
}

static TRANSFORM_ATTRIBUTE_ENCODINGS: [EncodingRule<TransformAttribute>; 4] = [
    EncodingRule {
        kind: EncodingType::AttributeFormat,
        field: "attribute_format",
        get: get_format,
        set: set_format,
    },
    EncodingRule {
        kind: EncodingType::AttributeType,
        field: "attribute_type",
        get: get_type,
        set: set_type,
    },
    EncodingRule {
        kind: EncodingType::AttributeLengthOrValue,
        field: "attribute_length_or_value",
        get: get_length_or_value,
        set: set_length_or_value,
    },
    EncodingRule {
        kind: EncodingType::AttributeValue,
        field: "attribute_value",
        get: get_value_bytes,
        set: set_value_bytes,
    },
];

impl TransformAttribute {
    /// Create an attribute with default values (short form, type 0, value 0)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an attribute with the given type and value
    ///
    /// # Errors
    ///
    /// Same as [`Self::set_value`].
    pub fn with_value(attribute_type: u16, value: &[u8]) -> Result<Self> {
        let mut attribute = Self::new();
        attribute.set_attribute_type(attribute_type);
        attribute.set_value(value)?;
        Ok(attribute)
    }

    /// Set the attribute type
    ///
    /// Only the low 15 bits are kept.
    pub fn set_attribute_type(&mut self, attribute_type: u16) {
        self.attribute_type = attribute_type & 0x7FFF;
    }

    /// Get the attribute type (high bit always clear)
    #[must_use]
    pub fn attribute_type(&self) -> u16 {
        self.attribute_type
    }

    /// Get the attribute type as an enum (if known)
    #[must_use]
    pub fn attribute_type_enum(&self) -> Option<TransformAttributeType> {
        TransformAttributeType::from_u16(self.attribute_type)
    }

    /// Assign a value, choosing the wire form from its length
    ///
    /// The form is decided from scratch on every call:
    /// - up to 2 bytes: copied into the leading inline bytes, remaining inline
    ///   bytes zeroed, short form
    /// - more than 2 bytes: copied into a freshly allocated buffer, long form
    ///
    /// Any previously owned buffer is released before the new value is
    /// stored.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::ValueTooLong`] if `value` exceeds 65535 bytes. The
    ///   attribute is left untouched.
    /// - [`ProtocolError::AllocationFailure`] if the buffer cannot be
    ///   allocated. The attribute is left in the default short form with no
    ///   buffer.
    pub fn set_value(&mut self, value: &[u8]) -> Result<()> {
        if value.len() > MAX_VALUE_LEN {
            tracing::warn!(
                attribute_type = self.attribute_type,
                len = value.len(),
                "Rejected attribute value longer than the length field allows"
            );
            return Err(ProtocolError::ValueTooLong { len: value.len(), max: MAX_VALUE_LEN });
        }

        self.value = AttributeValue::default();

        if value.len() > MAX_SHORT_VALUE_LEN {
            let mut buf = allocate(value.len())?;
            buf.extend_from_slice(value);
            self.value = AttributeValue::Long(buf);
        } else {
            let mut inline = [0; MAX_SHORT_VALUE_LEN];
            inline[..value.len()].copy_from_slice(value);
            self.value = AttributeValue::Short(inline);
        }

        tracing::debug!(
            attribute_type = self.attribute_type,
            len = value.len(),
            short_form = self.is_short_form(),
            "Assigned transform attribute value"
        );

        Ok(())
    }

    /// Get the value bytes
    ///
    /// In long form this is exactly the assigned value. In short form it is
    /// always the 2 inline bytes; the meaningful length is a property of the
    /// attribute type, which this payload does not track.
    #[must_use]
    pub fn value(&self) -> &[u8] {
        match &self.value {
            AttributeValue::Short(inline) => inline.as_slice(),
            AttributeValue::Long(buf) => buf.as_slice(),
        }
    }

    /// Get a short-form value as a Big Endian integer
    ///
    /// Returns `None` in long form.
    #[must_use]
    pub fn value_u16(&self) -> Option<u16> {
        match &self.value {
            AttributeValue::Short(inline) => Some(u16::from_be_bytes(*inline)),
            AttributeValue::Long(_) => None,
        }
    }

    /// Attribute Format flag: `true` for short form, `false` for long form
    #[must_use]
    pub fn is_short_form(&self) -> bool {
        matches!(self.value, AttributeValue::Short(_))
    }

    /// Content of the length-or-value word
    ///
    /// The inline value in short form, the buffer length in long form.
    #[must_use]
    pub fn length_or_value(&self) -> u16 {
        match &self.value {
            AttributeValue::Short(inline) => u16::from_be_bytes(*inline),
            AttributeValue::Long(buf) => {
                debug_assert!(buf.len() <= MAX_VALUE_LEN, "value buffer exceeds length field");
                u16::try_from(buf.len()).unwrap_or(u16::MAX)
            },
        }
    }

    /// Encoded length in bytes
    #[must_use]
    pub fn length(&self) -> usize {
        match &self.value {
            AttributeValue::Short(_) => ATTRIBUTE_HEADER_LEN,
            AttributeValue::Long(buf) => ATTRIBUTE_HEADER_LEN + buf.len(),
        }
    }

    /// Release the attribute and any buffer it owns
    pub fn destroy(self) {
        tracing::trace!(
            attribute_type = self.attribute_type,
            owned_bytes = if self.is_short_form() { 0 } else { self.value().len() },
            "Destroying transform attribute"
        );
    }
}

impl Payload for TransformAttribute {
    fn encoding_rules(&self) -> &'static [EncodingRule<Self>] {
        &TRANSFORM_ATTRIBUTE_ENCODINGS
    }

    fn length(&self) -> usize {
        TransformAttribute::length(self)
    }

    fn payload_type(&self) -> PayloadType {
        PayloadType::TransformAttribute
    }

    fn next_payload_type(&self) -> PayloadType {
        PayloadType::NoPayload
    }

    fn destroy(self: Box<Self>) {
        TransformAttribute::destroy(*self);
    }
}

fn allocate(len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    if buf.try_reserve_exact(len).is_err() {
        tracing::warn!(requested = len, "Failed to allocate transform attribute value buffer");
        return Err(ProtocolError::AllocationFailure { requested: len });
    }
    Ok(buf)
}

// Accessors referenced by TRANSFORM_ATTRIBUTE_ENCODINGS. Setters place raw
// wire fields and never re-decide the form.

fn get_format(attribute: &TransformAttribute) -> FieldValue<'_> {
    FieldValue::Flag(attribute.is_short_form())
}

fn set_format(attribute: &mut TransformAttribute, value: FieldValue<'_>) -> Result<()> {
    let short_form = value.into_flag(EncodingType::AttributeFormat)?;
    if short_form != attribute.is_short_form() {
        attribute.value =
            if short_form { AttributeValue::default() } else { AttributeValue::Long(Vec::new()) };
    }
    Ok(())
}

fn get_type(attribute: &TransformAttribute) -> FieldValue<'_> {
    FieldValue::U15(attribute.attribute_type)
}

fn set_type(attribute: &mut TransformAttribute, value: FieldValue<'_>) -> Result<()> {
    attribute.set_attribute_type(value.into_u15(EncodingType::AttributeType)?);
    Ok(())
}

fn get_length_or_value(attribute: &TransformAttribute) -> FieldValue<'_> {
    FieldValue::U16(attribute.length_or_value())
}

fn set_length_or_value(attribute: &mut TransformAttribute, value: FieldValue<'_>) -> Result<()> {
    let word = value.into_u16(EncodingType::AttributeLengthOrValue)?;
    if attribute.is_short_form() {
        attribute.value = AttributeValue::Short(word.to_be_bytes());
        return Ok(());
    }

    // Drop the old buffer first; on failure the attribute holds an empty
    // long-form value whose length (0) is still consistent.
    attribute.value = AttributeValue::Long(Vec::new());
    let mut buf = allocate(usize::from(word))?;
    buf.resize(usize::from(word), 0);
    attribute.value = AttributeValue::Long(buf);
    Ok(())
}

fn get_value_bytes(attribute: &TransformAttribute) -> FieldValue<'_> {
    match &attribute.value {
        AttributeValue::Short(_) => FieldValue::Bytes(&[]),
        AttributeValue::Long(buf) => FieldValue::Bytes(buf),
    }
}

fn set_value_bytes(attribute: &mut TransformAttribute, value: FieldValue<'_>) -> Result<()> {
    let bytes = value.into_bytes(EncodingType::AttributeValue)?;
    match &mut attribute.value {
        AttributeValue::Long(buf) if buf.len() == bytes.len() => {
            buf.copy_from_slice(bytes);
            Ok(())
        },
        AttributeValue::Long(buf) => {
            Err(ProtocolError::ValueLengthMismatch { declared: buf.len(), actual: bytes.len() })
        },
        AttributeValue::Short(_) if bytes.is_empty() => Ok(()),
        AttributeValue::Short(_) => {
            Err(ProtocolError::UnexpectedField { kind: EncodingType::AttributeValue })
        },
    }
}
