//! Parser configuration.

/// Limits applied while parsing payloads from the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Largest long-form value accepted, in bytes
    pub max_value_len: u16,
    /// Accept input with bytes left over after a single payload
    pub allow_trailing: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { max_value_len: u16::MAX, allow_trailing: false }
    }
}
