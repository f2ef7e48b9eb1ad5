//! Load-time configuration.

/// Byte order of the integers framing each section.
///
/// Producers write their native order, so `Native` is the default. Force
/// `Little` or `Big` to read files produced on another architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    #[default]
    Native,
    Little,
    Big,
}

impl ByteOrder {
    #[inline]
    pub(crate) fn read_u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::Native => u32::from_ne_bytes(bytes),
            ByteOrder::Little => u32::from_le_bytes(bytes),
            ByteOrder::Big => u32::from_be_bytes(bytes),
        }
    }

    #[cfg(test)]
    pub(crate) fn write_u32(self, value: u32) -> [u8; 4] {
        match self {
            ByteOrder::Native => value.to_ne_bytes(),
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        }
    }
}

/// Default byte that separates a logical key from its encoded payload.
pub const PAYLOAD_SEPARATOR: u8 = 0x01;

/// Configuration for loading dictionaries.
#[derive(Debug, Clone)]
pub struct Config {
    /// Byte order of section counts and dictionary units
    pub byte_order: ByteOrder,
    /// Separator between key and base64 payload in payload views
    pub payload_separator: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::Native,
            payload_separator: PAYLOAD_SEPARATOR,
        }
    }
}

impl Config {
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    pub fn with_payload_separator(mut self, separator: u8) -> Self {
        self.payload_separator = separator;
        self
    }
}
