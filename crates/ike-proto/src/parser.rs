//! Rule-driven payload parser.
//!
//! The parser is the inverse of [`crate::generator`]. It builds a default
//! payload and walks its encoding rules in order, placing each field exactly
//! as it appears on the wire. It makes no payload-specific decisions: the
//! format bit read from the wire, not the value length, decides whether a
//! value field follows.
//!
//! # Security
//!
//! - **Bounds Before Allocation**: Every field is checked against the
//!   remaining input before it is read. A long-form length is checked against
//!   [`ParserConfig::max_value_len`] and against the remaining input before
//!   any buffer is allocated.
//!
//! - **No Partial Consumption**: If a payload fails to parse, the read
//!   position is restored to where that payload started.

use bytes::Buf;

use crate::{
    config::ParserConfig,
    encodings::{EncodingType, FieldValue},
    errors::{ProtocolError, Result},
    flags::AttributeHeader,
    payloads::Payload,
};

/// Parse exactly one payload from `input`
///
/// # Errors
///
/// Returns [`ProtocolError::TrailingBytes`] if input remains after the
/// payload, plus any error from [`Parser::parse_payload`].
pub fn parse<P: Payload + Default + 'static>(input: &[u8]) -> Result<P> {
    Parser::new(input).parse_single()
}

/// Sequential reader over a buffer of back-to-back payloads
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    input: &'a [u8],
    offset: usize,
    config: ParserConfig,
}

impl<'a> Parser<'a> {
    /// Create a parser with default limits
    #[must_use]
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_config(input, ParserConfig::default())
    }

    /// Create a parser with explicit limits
    #[must_use]
    pub fn with_config(input: &'a [u8], config: ParserConfig) -> Self {
        Self { input, offset: 0, config }
    }

    /// Bytes consumed so far
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes not yet consumed
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.input.len() - self.offset
    }

    /// Whether all input has been consumed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Parse the next payload
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::BufferTooShort`] if the input ends inside a field
    /// - [`ProtocolError::ValueTooLong`] if a long-form length exceeds the
    ///   configured maximum
    /// - [`ProtocolError::AllocationFailure`] if the value buffer cannot be
    ///   allocated
    pub fn parse_payload<P: Payload + Default + 'static>(&mut self) -> Result<P> {
        let start = self.offset;
        let result = self.parse_fields();

        match &result {
            Ok(payload) => {
                tracing::trace!(
                    payload_type = ?Payload::payload_type(payload),
                    offset = start,
                    len = self.offset - start,
                    "Parsed payload"
                );
            },
            Err(error) => {
                tracing::debug!(offset = start, %error, "Failed to parse payload");
                self.offset = start;
            },
        }

        result
    }

    /// Parse payloads until the input is exhausted
    ///
    /// # Errors
    ///
    /// Fails on the first payload that does not parse.
    pub fn parse_all<P: Payload + Default + 'static>(&mut self) -> Result<Vec<P>> {
        let mut payloads = Vec::new();
        while !self.is_empty() {
            payloads.push(self.parse_payload()?);
        }
        Ok(payloads)
    }

    /// Parse one payload and require the input to end there
    ///
    /// Trailing input is accepted when [`ParserConfig::allow_trailing`] is
    /// set.
    ///
    /// # Errors
    ///
    /// Same as [`Self::parse_payload`], plus [`ProtocolError::TrailingBytes`].
    pub fn parse_single<P: Payload + Default + 'static>(mut self) -> Result<P> {
        let payload = self.parse_payload()?;
        if !self.config.allow_trailing && !self.is_empty() {
            return Err(ProtocolError::TrailingBytes { remaining: self.remaining() });
        }
        Ok(payload)
    }

    fn parse_fields<P: Payload + Default + 'static>(&mut self) -> Result<P> {
        let mut payload = P::default();
        let mut header = AttributeHeader::default();
        let mut value_len = 0usize;

        for rule in payload.encoding_rules() {
            let value = match rule.kind {
                EncodingType::AttributeFormat => {
                    header = AttributeHeader::from_word(self.peek(2)?.get_u16());
                    FieldValue::Flag(header.is_short_form())
                },
                EncodingType::AttributeType => {
                    self.take(2)?;
                    FieldValue::U15(header.attribute_type())
                },
                EncodingType::AttributeLengthOrValue => {
                    let word = self.take(2)?.get_u16();
                    if !header.is_short_form() {
                        if word > self.config.max_value_len {
                            return Err(ProtocolError::ValueTooLong {
                                len: usize::from(word),
                                max: usize::from(self.config.max_value_len),
                            });
                        }
                        value_len = usize::from(word);
                        if self.remaining() < value_len {
                            return Err(ProtocolError::BufferTooShort {
                                expected: value_len,
                                actual: self.remaining(),
                            });
                        }
                    }
                    FieldValue::U16(word)
                },
                EncodingType::AttributeValue => {
                    if header.is_short_form() {
                        continue;
                    }
                    FieldValue::Bytes(self.take(value_len)?)
                },
            };
            rule.write_into(&mut payload, value)?;
        }

        Ok(payload)
    }

    fn peek(&self, len: usize) -> Result<&'a [u8]> {
        let rest = &self.input[self.offset..];
        if rest.len() < len {
            return Err(ProtocolError::BufferTooShort { expected: len, actual: rest.len() });
        }
        Ok(&rest[..len])
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let bytes = self.peek(len)?;
        self.offset += len;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payloads::TransformAttribute;

    #[test]
    fn parse_short_form() {
        let attribute: TransformAttribute = parse(&[0x80, 0x0E, 0x01, 0x00]).unwrap();

        assert!(attribute.is_short_form());
        assert_eq!(attribute.attribute_type(), 14);
        assert_eq!(attribute.value(), &[0x01, 0x00]);
        assert_eq!(attribute.value_u16(), Some(256));
    }

    #[test]
    fn parse_long_form() {
        let attribute: TransformAttribute =
            parse(&[0x00, 0x05, 0x00, 0x04, 0xDE, 0xAD, 0xBE, 0xEF]).unwrap();

        assert!(!attribute.is_short_form());
        assert_eq!(attribute.attribute_type(), 5);
        assert_eq!(attribute.length_or_value(), 4);
        assert_eq!(attribute.value(), &[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(attribute.length(), 8);
    }

    #[test]
    fn parse_long_form_with_short_value_keeps_wire_format() {
        let attribute: TransformAttribute = parse(&[0x00, 0x05, 0x00, 0x01, 0x7F]).unwrap();

        assert!(!attribute.is_short_form());
        assert_eq!(attribute.value(), &[0x7F]);
        assert_eq!(attribute.length(), 5);
    }

    #[test]
    fn parse_empty_long_form() {
        let attribute: TransformAttribute = parse(&[0x00, 0x05, 0x00, 0x00]).unwrap();

        assert!(!attribute.is_short_form());
        assert!(attribute.value().is_empty());
        assert_eq!(attribute.length(), 4);
    }

    #[test]
    fn reject_truncated_header() {
        let result = parse::<TransformAttribute>(&[0x80, 0x0E, 0x01]);
        assert_eq!(result, Err(ProtocolError::BufferTooShort { expected: 2, actual: 1 }));
    }

    #[test]
    fn reject_truncated_value() {
        let result = parse::<TransformAttribute>(&[0x00, 0x05, 0x00, 0x04, 0xDE, 0xAD]);
        assert_eq!(result, Err(ProtocolError::BufferTooShort { expected: 4, actual: 2 }));
    }

    #[test]
    fn reject_declared_length_beyond_input() {
        let result = parse::<TransformAttribute>(&[0x00, 0x05, 0xFF, 0xFF]);
        assert_eq!(result, Err(ProtocolError::BufferTooShort { expected: 0xFFFF, actual: 0 }));
    }

    #[test]
    fn reject_trailing_bytes() {
        let result = parse::<TransformAttribute>(&[0x80, 0x0E, 0x01, 0x00, 0xFF]);
        assert_eq!(result, Err(ProtocolError::TrailingBytes { remaining: 1 }));
    }

    #[test]
    fn allow_trailing_bytes_when_configured() {
        let config = ParserConfig { allow_trailing: true, ..ParserConfig::default() };
        let attribute: TransformAttribute =
            Parser::with_config(&[0x80, 0x0E, 0x01, 0x00, 0xFF], config).parse_single().unwrap();
        assert_eq!(attribute.attribute_type(), 14);
    }

    #[test]
    fn reject_value_over_configured_limit() {
        let config = ParserConfig { max_value_len: 8, ..ParserConfig::default() };
        let mut wire = vec![0x00, 0x05, 0x00, 0x09];
        wire.extend_from_slice(&[0u8; 9]);

        let result = Parser::with_config(&wire, config).parse_payload::<TransformAttribute>();
        assert_eq!(result, Err(ProtocolError::ValueTooLong { len: 9, max: 8 }));
    }

    #[test]
    fn failed_parse_restores_offset() {
        let wire = [0x80, 0x0E, 0x00, 0x80, 0x00, 0x05, 0x00, 0x04, 0xDE];
        let mut parser = Parser::new(&wire);

        parser.parse_payload::<TransformAttribute>().unwrap();
        assert_eq!(parser.offset(), 4);

        assert!(parser.parse_payload::<TransformAttribute>().is_err());
        assert_eq!(parser.offset(), 4);
        assert_eq!(parser.remaining(), 5);
    }

    #[test]
    fn parse_all_attribute_list() {
        let wire = [
            0x80, 0x0E, 0x00, 0x80, // key length = 128
            0x00, 0x07, 0x00, 0x03, 0x01, 0x02, 0x03, // type 7, 3-byte value
        ];

        let attributes: Vec<TransformAttribute> = Parser::new(&wire).parse_all().unwrap();
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes[0].value_u16(), Some(128));
        assert_eq!(attributes[1].value(), &[0x01, 0x02, 0x03]);
    }
}
