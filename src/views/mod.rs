//! Public dictionary types.
//!
//! Every view is a thin wrapper over one [`Graph`]: the loaded dictionary,
//! an optional guide, and the [`KeyLayout`] that says how raw trie keys map
//! to logical keys. Views differ only in how they decode what sits below a
//! terminal.

mod bytes;
mod dawg;
mod int;
mod record;

pub use bytes::{BytesDawg, BytesItems};
pub use dawg::{CompletionDawg, Dawg};
pub use int::{IntCompletionDawg, IntDawg, IntItems};
pub use record::{RecordDawg, RecordItems};

use std::io::Read;

use crate::completer::Completer;
use crate::config::Config;
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::guide::Guide;
use crate::layout::KeyLayout;
use crate::load::Load;
use crate::similar::{self, Replaces};

#[derive(Clone, Debug)]
pub(crate) struct Graph {
    pub(crate) dct: Dictionary,
    pub(crate) guide: Guide,
    pub(crate) layout: KeyLayout,
}

impl Graph {
    /// Reads the dictionary section, then the guide section if `with_guide`.
    pub(crate) fn read<R: Read>(
        reader: &mut R,
        config: &Config,
        with_guide: bool,
        layout: KeyLayout,
    ) -> Result<Self> {
        let dct = Dictionary::read_with(reader, config)?;
        let guide = if with_guide {
            Guide::read(reader, config.byte_order)?
        } else {
            Guide::default()
        };
        Ok(Self { dct, guide, layout })
    }

    pub(crate) fn contains(&self, key: &[u8]) -> bool {
        self.terminal(key).is_some()
    }

    /// Node below which the values of `key` live.
    pub(crate) fn terminal(&self, key: &[u8]) -> Option<u32> {
        let index = self.dct.follow_bytes(key, self.dct.root())?;
        self.layout.terminal(&self.dct, index)
    }

    /// Stored keys that are prefixes of `key`, shortest first.
    pub(crate) fn prefixes(&self, key: &[u8]) -> Vec<Vec<u8>> {
        let mut found = Vec::new();
        let mut index = self.dct.root();
        for (pos, &b) in key.iter().enumerate() {
            match self.dct.follow_char(b, index) {
                Some(next) => index = next,
                None => break,
            }
            if self.layout.terminal(&self.dct, index).is_some() {
                found.push(key[..=pos].to_vec());
            }
        }
        found
    }

    /// A cursor over the raw keys starting with `prefix`. Exhausted from the
    /// start when nothing does.
    pub(crate) fn complete(&self, prefix: &[u8]) -> Completer<'_> {
        let mut completer = Completer::new(&self.dct, &self.guide);
        if let Some(index) = self.dct.follow_bytes(prefix, self.dct.root()) {
            completer.start(index, prefix);
        }
        completer
    }

    /// A cursor over the raw suffixes below `index`.
    pub(crate) fn complete_below(&self, index: u32) -> Completer<'_> {
        let mut completer = Completer::new(&self.dct, &self.guide);
        completer.start(index, b"");
        completer
    }

    pub(crate) fn has_keys_with_prefix(&self, prefix: &[u8]) -> bool {
        self.complete(prefix).advance()
    }

    pub(crate) fn similar(&self, key: &str, replaces: &Replaces) -> Vec<(String, u32)> {
        similar::similar_keys(&self.dct, self.layout, key, replaces)
    }
}

/// Lazy iterator over logical keys in byte order.
///
/// For payload views a key repeats once per stored payload.
pub struct Keys<'a> {
    completer: Completer<'a>,
    layout: KeyLayout,
}

impl<'a> Keys<'a> {
    pub(crate) fn new(graph: &'a Graph, prefix: &[u8]) -> Self {
        Self {
            completer: graph.complete(prefix),
            layout: graph.layout,
        }
    }
}

impl Iterator for Keys<'_> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        if !self.completer.advance() {
            return None;
        }
        let (key, _) = self.layout.split(self.completer.key());
        Some(key.to_vec())
    }
}

#[cfg(test)]
pub(crate) fn load_graph(bytes: &[u8], layout: KeyLayout) -> Graph {
    Graph::read(&mut &bytes[..], &Config::default(), true, layout).unwrap()
}
