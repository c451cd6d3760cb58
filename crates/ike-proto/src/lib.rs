//! # IKE Protocol: Payload Wire Format
//!
//! This crate implements IKEv2 payload types and the rule-driven codec that
//! moves them on and off the wire.
//!
//! ## Protocol Design
//!
//! Payloads do not encode themselves. Each payload kind implements
//! [`Payload`] and declares its layout as an ordered list of
//! [`EncodingRule`]s. One generic [`generator`] and one generic [`parser`]
//! walk those lists for every payload kind.
//!
//! ## Transform Attributes
//!
//! [`TransformAttribute`] carries a single type/value pair inside a
//! transform. Its value is encoded in one of two forms:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |A|       Attribute Type        |    AF=0  Attribute Length     |
//! |F|                             |    AF=1  Attribute Value      |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                   AF=0  Attribute Value                       |
//! |                   AF=1  Not Transmitted                       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! The form is chosen when a value is assigned and held in a tagged union,
//! so the format flag, the inline value, and the owned buffer cannot drift
//! apart.
//!
//! ## Implementation Notes
//!
//! - **Owned Buffers**: Long-form values live in a `Vec<u8>` owned by the
//!   attribute. Replacement and teardown release it exactly once.
//! - **Fallible Allocation**: Value buffers are reserved with
//!   `try_reserve_exact`, so allocation failure surfaces as
//!   [`ProtocolError::AllocationFailure`] instead of aborting.
//! - **Network Byte Order**: All multi-byte fields are Big Endian.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod encodings;
pub mod errors;
pub mod flags;
pub mod generator;
pub mod parser;
pub mod payload_type;
pub mod payloads;

pub use config::ParserConfig;
pub use encodings::{EncodingRule, EncodingType, FieldValue};
pub use errors::{ProtocolError, Result};
pub use flags::AttributeHeader;
pub use parser::Parser;
pub use payload_type::PayloadType;
pub use payloads::{Payload, TransformAttribute, TransformAttributeType};
