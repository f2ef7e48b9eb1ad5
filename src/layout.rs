//! How a view reads its keys: where a stored key ends, and how a raw trie key
//! splits into the logical key and its payload.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::dictionary::Dictionary;
use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KeyLayout {
    /// Every trie key is a logical key; terminals carry the value.
    Plain,
    /// Trie keys are `key + separator + base64(payload)`. One logical key
    /// may appear once per payload.
    Payload { separator: u8 },
}

impl KeyLayout {
    /// For a node reached by following a whole logical key, the node below
    /// which its values live. `None` if the key is not stored.
    #[inline]
    pub fn terminal(self, dct: &Dictionary, index: u32) -> Option<u32> {
        match self {
            KeyLayout::Plain => dct.has_value(index).then_some(index),
            KeyLayout::Payload { separator } => dct.follow_char(separator, index),
        }
    }

    /// Splits a payload key into the logical key and its encoded payload.
    /// `None` for plain layouts and for raw keys without a separator.
    pub fn split_payload(self, raw: &[u8]) -> Option<(&[u8], &[u8])> {
        match self {
            KeyLayout::Plain => None,
            KeyLayout::Payload { separator } => {
                let pos = raw.iter().position(|&b| b == separator)?;
                Some((&raw[..pos], &raw[pos + 1..]))
            }
        }
    }

    /// Splits a raw trie key at the first separator.
    pub fn split(self, raw: &[u8]) -> (&[u8], &[u8]) {
        match self {
            KeyLayout::Plain => (raw, &[]),
            KeyLayout::Payload { separator } => match raw.iter().position(|&b| b == separator) {
                Some(pos) => (&raw[..pos], &raw[pos + 1..]),
                None => (raw, &[]),
            },
        }
    }
}

/// Decodes a stored payload. Producers may terminate the encoding with a
/// newline; it is not part of the data.
pub(crate) fn decode_payload(encoded: &[u8]) -> Result<Vec<u8>> {
    let end = encoded
        .iter()
        .rposition(|b| !matches!(b, b'\n' | b'\r'))
        .map_or(0, |p| p + 1);
    Ok(STANDARD.decode(&encoded[..end])?)
}
