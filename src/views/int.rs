use std::io::Read;

use super::{Graph, Keys};
use crate::completer::Completer;
use crate::config::Config;
use crate::dictionary::Dictionary;
use crate::error::{DawgError, Result};
use crate::layout::KeyLayout;
use crate::load::Load;
use crate::similar::Replaces;

/// Maps keys to non-negative integers (below 2^31) stored in the leaves.
#[derive(Clone, Debug)]
pub struct IntDawg {
    graph: Graph,
}

impl Load for IntDawg {
    fn read_with<R: Read>(reader: &mut R, config: &Config) -> Result<Self> {
        let graph = Graph::read(reader, config, false, KeyLayout::Plain)?;
        Ok(Self { graph })
    }
}

impl IntDawg {
    pub fn contains(&self, key: impl AsRef<[u8]>) -> bool {
        self.graph.contains(key.as_ref())
    }

    /// The value for `key`, or [`DawgError::KeyNotFound`].
    pub fn get(&self, key: impl AsRef<[u8]>) -> Result<u32> {
        self.graph.dct.find(key.as_ref()).ok_or(DawgError::KeyNotFound)
    }

    pub fn get_or(&self, key: impl AsRef<[u8]>, default: u32) -> u32 {
        self.graph.dct.find(key.as_ref()).unwrap_or(default)
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

    pub fn dictionary(&self) -> &Dictionary {
        &self.graph.dct
    }
}

/// An [`IntDawg`] that can also enumerate its keys and values.
#[derive(Clone, Debug)]
pub struct IntCompletionDawg {
    graph: Graph,
}

impl Load for IntCompletionDawg {
    fn read_with<R: Read>(reader: &mut R, config: &Config) -> Result<Self> {
        let graph = Graph::read(reader, config, true, KeyLayout::Plain)?;
        Ok(Self { graph })
    }
}

impl IntCompletionDawg {
    pub fn contains(&self, key: impl AsRef<[u8]>) -> bool {
        self.graph.contains(key.as_ref())
    }

    pub fn get(&self, key: impl AsRef<[u8]>) -> Result<u32> {
        self.graph.dct.find(key.as_ref()).ok_or(DawgError::KeyNotFound)
    }

    pub fn get_or(&self, key: impl AsRef<[u8]>, default: u32) -> u32 {
        self.graph.dct.find(key.as_ref()).unwrap_or(default)
    }

    pub fn keys(&self, prefix: impl AsRef<[u8]>) -> Vec<Vec<u8>> {
        self.iter_keys(prefix).collect()
    }

    pub fn iter_keys(&self, prefix: impl AsRef<[u8]>) -> Keys<'_> {
        Keys::new(&self.graph, prefix.as_ref())
    }

    /// `(key, value)` pairs for keys starting with `prefix`, sorted by key.
    pub fn items(&self, prefix: impl AsRef<[u8]>) -> Vec<(Vec<u8>, u32)> {
        self.iter_items(prefix).collect()
    }

    pub fn iter_items(&self, prefix: impl AsRef<[u8]>) -> IntItems<'_> {
        IntItems {
            completer: self.graph.complete(prefix.as_ref()),
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

    pub fn dictionary(&self) -> &Dictionary {
        &self.graph.dct
    }
}

pub struct IntItems<'a> {
    completer: Completer<'a>,
}

impl Iterator for IntItems<'_> {
    type Item = (Vec<u8>, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.completer.advance() {
            return None;
        }
        let value = self.completer.value()?;
        Some((self.completer.key().to_vec(), value))
    }
}
