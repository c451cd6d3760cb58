//! Bit layout of the first attribute word.
//!
//! The first 16-bit word of a transform attribute carries the Attribute
//! Format bit in its most significant position and the 15-bit attribute type
//! in the rest.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// First word of a transform attribute (16 bits, Big Endian on the wire)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct AttributeHeader: u16 {
        /// Value is carried inline (TV); clear means length-prefixed (TLV)
        const SHORT_FORM = 0x8000;

        /// Attribute type bits
        const TYPE = 0x7FFF;
    }
}

impl AttributeHeader {
    /// Build a header word from its two fields
    ///
    /// The type is masked to 15 bits so it can never collide with the
    /// format bit.
    #[must_use]
    pub const fn pack(short_form: bool, attribute_type: u16) -> Self {
        let format = if short_form { Self::SHORT_FORM.bits() } else { 0 };
        Self::from_bits_retain(format | (attribute_type & Self::TYPE.bits()))
    }

    /// Create a header from a raw wire word
    ///
    /// Infallible: every 16-bit pattern is a valid format/type pair.
    #[must_use]
    pub const fn from_word(word: u16) -> Self {
        Self::from_bits_retain(word)
    }

    /// Convert to raw wire word
    #[must_use]
    pub const fn to_word(self) -> u16 {
        self.bits()
    }

    /// Whether the format bit selects the short (inline) form
    #[must_use]
    pub const fn is_short_form(self) -> bool {
        self.bits() & Self::SHORT_FORM.bits() != 0
    }

    /// The 15-bit attribute type
    #[must_use]
    pub const fn attribute_type(self) -> u16 {
        self.bits() & Self::TYPE.bits()
    }
}

impl Default for AttributeHeader {
    fn default() -> Self {
        Self::empty()
    }
}
