//! Payload type tags for IKEv2 messages.
//!
//! Payload types identify the kind of each payload in a message chain. Every
//! payload reports its own type and the type of the payload that follows it.
//!
//! # Type Ranges
//!
//! - `0`: No Next Payload (end of chain)
//! - `33-48`: Payload types assigned by RFC 7296
//! - `140-143`: Private-use numbers for structures that never appear in a
//!   Next Payload field on the wire (message header, proposal and transform
//!   substructures, transform attributes). They let the codec treat those
//!   structures as payloads too.

use serde_repr::{Deserialize_repr, Serialize_repr};

/// IKEv2 payload types
///
/// # Representation
///
/// Serialized as a single octet in the Next Payload field of the generic
/// payload header. The `#[repr(u8)]` keeps numeric values stable for wire
/// compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum PayloadType {
    /// No payload follows
    NoPayload = 0,

    // RFC 7296 payloads (33-48)
    /// Security Association
    SecurityAssociation = 33,
    /// Key Exchange
    KeyExchange = 34,
    /// Identification - Initiator
    IdInitiator = 35,
    /// Identification - Responder
    IdResponder = 36,
    /// Certificate
    Certificate = 37,
    /// Certificate Request
    CertificateRequest = 38,
    /// Authentication
    Authentication = 39,
    /// Nonce
    Nonce = 40,
    /// Notify
    Notify = 41,
    /// Delete
    Delete = 42,
    /// Vendor ID
    VendorId = 43,
    /// Traffic Selector - Initiator
    TrafficSelectorInitiator = 44,
    /// Traffic Selector - Responder
    TrafficSelectorResponder = 45,
    /// Encrypted and Authenticated
    Encrypted = 46,
    /// Configuration
    Configuration = 47,
    /// Extensible Authentication
    Eap = 48,

    // Private-use structures (140-143)
    /// IKE message header
    Header = 140,
    /// Proposal substructure of an SA payload
    ProposalSubstructure = 141,
    /// Transform substructure of a proposal
    TransformSubstructure = 142,
    /// Attribute of a transform substructure
    TransformAttribute = 143,
}

impl PayloadType {
    /// Convert to raw u8 value
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Convert from raw u8 value
    ///
    /// Returns `None` if the value doesn't correspond to a known payload type.
    /// Callers decide whether an unknown type is skipped or rejected.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::NoPayload),

            33 => Some(Self::SecurityAssociation),
            34 => Some(Self::KeyExchange),
            35 => Some(Self::IdInitiator),
            36 => Some(Self::IdResponder),
            37 => Some(Self::Certificate),
            38 => Some(Self::CertificateRequest),
            39 => Some(Self::Authentication),
            40 => Some(Self::Nonce),
            41 => Some(Self::Notify),
            42 => Some(Self::Delete),
            43 => Some(Self::VendorId),
            44 => Some(Self::TrafficSelectorInitiator),
            45 => Some(Self::TrafficSelectorResponder),
            46 => Some(Self::Encrypted),
            47 => Some(Self::Configuration),
            48 => Some(Self::Eap),

            140 => Some(Self::Header),
            141 => Some(Self::ProposalSubstructure),
            142 => Some(Self::TransformSubstructure),
            143 => Some(Self::TransformAttribute),

            _ => None,
        }
    }
}
