use std::io::Read;

use super::{Graph, Keys};
use crate::config::Config;
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::layout::KeyLayout;
use crate::load::Load;
use crate::similar::Replaces;

/// A set of byte-string keys supporting membership tests only.
///
/// ```
/// use dawg_rs::{Dawg, Load};
///
/// # fn run(bytes: &[u8]) -> dawg_rs::Result<()> {
/// let dawg = Dawg::from_bytes(bytes)?;
/// if dawg.contains("foo") {
///     println!("{:?}", dawg.prefixes("foobar"));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Dawg {
    graph: Graph,
}

impl Load for Dawg {
    fn read_with<R: Read>(reader: &mut R, config: &Config) -> Result<Self> {
        let graph = Graph::read(reader, config, false, KeyLayout::Plain)?;
        Ok(Self { graph })
    }
}

impl Dawg {
    pub fn contains(&self, key: impl AsRef<[u8]>) -> bool {
        self.graph.contains(key.as_ref())
    }

    /// Stored keys that are prefixes of `key`, shortest first.
    pub fn prefixes(&self, key: impl AsRef<[u8]>) -> Vec<Vec<u8>> {
        self.graph.prefixes(key.as_ref())
    }

    /// Stored keys equal to `key` after replacing characters per `replaces`.
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

/// A key set that can also list its keys in byte order.
#[derive(Clone, Debug)]
pub struct CompletionDawg {
    graph: Graph,
}

impl Load for CompletionDawg {
    fn read_with<R: Read>(reader: &mut R, config: &Config) -> Result<Self> {
        let graph = Graph::read(reader, config, true, KeyLayout::Plain)?;
        Ok(Self { graph })
    }
}

impl CompletionDawg {
    pub fn contains(&self, key: impl AsRef<[u8]>) -> bool {
        self.graph.contains(key.as_ref())
    }

    /// All keys starting with `prefix`, sorted. An empty prefix lists everything.
    ///
    /// The result can be far larger than the file; prefer
    /// [`CompletionDawg::iter_keys`] with a bound on untrusted input.
    pub fn keys(&self, prefix: impl AsRef<[u8]>) -> Vec<Vec<u8>> {
        self.iter_keys(prefix).collect()
    }

    pub fn iter_keys(&self, prefix: impl AsRef<[u8]>) -> Keys<'_> {
        Keys::new(&self.graph, prefix.as_ref())
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
