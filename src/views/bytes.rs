use std::io::Read;

use super::{Graph, Keys};
use crate::completer::Completer;
use crate::config::Config;
use crate::dictionary::Dictionary;
use crate::error::{DawgError, Result};
use crate::layout::{decode_payload, KeyLayout};
use crate::load::Load;
use crate::similar::Replaces;

/// Maps each key to one or more byte payloads.
///
/// Every `(key, payload)` pair is stored as the trie key
/// `key + separator + base64(payload)`, so all payloads of a key sit below
/// the node reached by `key + separator`. Payloads of one key come back in
/// the byte order of their encoded form.
#[derive(Clone, Debug)]
pub struct BytesDawg {
    graph: Graph,
}

impl Load for BytesDawg {
    fn read_with<R: Read>(reader: &mut R, config: &Config) -> Result<Self> {
        let layout = KeyLayout::Payload {
            separator: config.payload_separator,
        };
        let graph = Graph::read(reader, config, true, layout)?;
        Ok(Self { graph })
    }
}

impl BytesDawg {
    /// Whether at least one payload is stored for `key`.
    pub fn contains(&self, key: impl AsRef<[u8]>) -> bool {
        self.graph.contains(key.as_ref())
    }

    /// All payloads for `key`, or [`DawgError::KeyNotFound`].
    pub fn get(&self, key: impl AsRef<[u8]>) -> Result<Vec<Vec<u8>>> {
        let index = self.graph.terminal(key.as_ref()).ok_or(DawgError::KeyNotFound)?;
        self.payloads_below(index)
    }

    /// All payloads for `key`, or `default` when it is not stored.
    pub fn get_or(&self, key: impl AsRef<[u8]>, default: Vec<Vec<u8>>) -> Result<Vec<Vec<u8>>> {
        match self.graph.terminal(key.as_ref()) {
            Some(index) => self.payloads_below(index),
            None => Ok(default),
        }
    }

    /// Keys starting with `prefix`, once per payload.
    pub fn keys(&self, prefix: impl AsRef<[u8]>) -> Vec<Vec<u8>> {
        self.iter_keys(prefix).collect()
    }

    pub fn iter_keys(&self, prefix: impl AsRef<[u8]>) -> Keys<'_> {
        Keys::new(&self.graph, prefix.as_ref())
    }

    /// `(key, payload)` pairs for keys starting with `prefix`.
    pub fn items(&self, prefix: impl AsRef<[u8]>) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        self.iter_items(prefix).collect()
    }

    pub fn iter_items(&self, prefix: impl AsRef<[u8]>) -> BytesItems<'_> {
        BytesItems {
            completer: self.graph.complete(prefix.as_ref()),
            layout: self.graph.layout,
        }
    }

    pub fn has_keys_with_prefix(&self, prefix: impl AsRef<[u8]>) -> bool {
        self.graph.has_keys_with_prefix(prefix.as_ref())
    }

    pub fn prefixes(&self, key: impl AsRef<[u8]>) -> Vec<Vec<u8>> {
        self.graph.prefixes(key.as_ref())
    }

    pub fn similar_keys(&self, key: &str, replaces: &Replaces) -> Vec<String> {
        self.graph
            .similar(key, replaces)
            .into_iter()
            .map(|(k, _)| k)
            .collect()
    }

    /// Like [`BytesDawg::similar_keys`], with the payloads of every match.
    pub fn similar_items(
        &self,
        key: &str,
        replaces: &Replaces,
    ) -> Result<Vec<(String, Vec<Vec<u8>>)>> {
        self.graph
            .similar(key, replaces)
            .into_iter()
            .map(|(k, index)| Ok((k, self.payloads_below(index)?)))
            .collect()
    }

    pub fn similar_item_values(&self, key: &str, replaces: &Replaces) -> Result<Vec<Vec<Vec<u8>>>> {
        self.graph
            .similar(key, replaces)
            .into_iter()
            .map(|(_, index)| self.payloads_below(index))
            .collect()
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.graph.dct
    }

    /// Decodes every payload stored below a separator node.
    pub(crate) fn payloads_below(&self, index: u32) -> Result<Vec<Vec<u8>>> {
        let mut completer = self.graph.complete_below(index);
        let mut payloads = Vec::new();
        while completer.advance() {
            payloads.push(decode_payload(completer.key())?);
        }
        Ok(payloads)
    }
}

/// Lazy `(key, payload)` iterator. A stored key without a separator, or a
/// payload that fails to decode, yields an error item; iteration can
/// continue past it.
pub struct BytesItems<'a> {
    completer: Completer<'a>,
    layout: KeyLayout,
}

impl Iterator for BytesItems<'_> {
    type Item = Result<(Vec<u8>, Vec<u8>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.completer.advance() {
            return None;
        }
        let raw = self.completer.key();
        let item = match self.layout.split_payload(raw) {
            Some((key, encoded)) => {
                decode_payload(encoded).map(|payload| (key.to_vec(), payload))
            }
            None => Err(DawgError::format(format!(
                "stored key {:?} has no payload separator",
                String::from_utf8_lossy(raw)
            ))),
        };
        Some(item)
    }
}
