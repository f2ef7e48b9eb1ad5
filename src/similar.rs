//! Lookup of keys that differ from a query only at positions covered by a
//! character replacement table (e.g. `е` -> `ё`).

use std::cell::Cell;
use std::collections::HashMap;

use smallvec::SmallVec;

use crate::dictionary::Dictionary;
use crate::error::{DawgError, Result};
use crate::layout::KeyLayout;

/// A compiled replacement table.
///
/// Each source character maps to one or more single-character
/// alternatives. Alternatives are tried in the order the rules were given.
#[derive(Clone, Debug, Default)]
pub struct Replaces {
    table: HashMap<char, SmallVec<[char; 2]>>,
}

fn single_char(s: &str, what: &str) -> Result<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(DawgError::InvalidArgument(format!(
            "{what} must be a single character, got {s:?}"
        ))),
    }
}

impl Replaces {
    /// Compiles `(source, replacement)` rules. Repeating a source adds another
    /// alternative for it.
    ///
    /// ```
    /// use dawg_rs::Replaces;
    ///
    /// let r = Replaces::compile([("е", "ё"), ("е", "ѣ"), ("и", "і")]).unwrap();
    /// assert_eq!(r.get('е'), &['ё', 'ѣ']);
    /// assert!(Replaces::compile([("ab", "c")]).is_err());
    /// ```
    pub fn compile<'r>(rules: impl IntoIterator<Item = (&'r str, &'r str)>) -> Result<Self> {
        let mut table: HashMap<char, SmallVec<[char; 2]>> = HashMap::new();
        for (from, to) in rules {
            let from = single_char(from, "replacement source")?;
            let to = single_char(to, "replacement target")?;
            let alternatives = table.entry(from).or_default();
            if !alternatives.contains(&to) {
                alternatives.push(to);
            }
        }
        Ok(Self { table })
    }

    /// Alternatives for `ch`; empty when it has none.
    pub fn get(&self, ch: char) -> &[char] {
        match self.table.get(&ch) {
            Some(alts) => alts,
            None => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Finds stored keys that match `key` after zero or more substitutions.
///
/// Returns each match with the index the layout designates as its terminal.
/// Within one search level the literal match comes first, then the matches
/// reached through substitutions, by position and then by alternative.
pub(crate) fn similar_keys(
    dct: &Dictionary,
    layout: KeyLayout,
    key: &str,
    replaces: &Replaces,
) -> Vec<(String, u32)> {
    let search = Search {
        dct,
        layout,
        key,
        replaces,
        frames: Cell::new(0),
    };
    let found = search.walk(String::new(), 0, dct.root());
    tracing::trace!(
        key,
        frames = search.frames.get(),
        matches = found.len(),
        "similar key search finished"
    );
    found
}

struct Search<'a> {
    dct: &'a Dictionary,
    layout: KeyLayout,
    key: &'a str,
    replaces: &'a Replaces,
    frames: Cell<usize>,
}

impl Search<'_> {
    /// Matches the rest of the key from byte position `start`, with `prefix`
    /// standing for the (possibly substituted) text before it.
    fn walk(&self, prefix: String, start: usize, mut index: u32) -> Vec<(String, u32)> {
        self.frames.set(self.frames.get() + 1);
        let mut found = Vec::new();
        let mut buf = [0u8; 4];

        for (offset, ch) in self.key[start..].char_indices() {
            let pos = start + offset;
            for &alt in self.replaces.get(ch) {
                let step = alt.encode_utf8(&mut buf).as_bytes();
                if let Some(next) = self.dct.follow_bytes(step, index) {
                    let mut alt_prefix = String::with_capacity(pos + 4);
                    alt_prefix.push_str(&prefix);
                    alt_prefix.push_str(&self.key[start..pos]);
                    alt_prefix.push(alt);
                    let more = self.walk(alt_prefix, pos + ch.len_utf8(), next);
                    found.extend(more);
                }
            }

            let step = ch.encode_utf8(&mut buf).as_bytes();
            match self.dct.follow_bytes(step, index) {
                Some(next) => index = next,
                None => return found,
            }
        }

        if let Some(terminal) = self.layout.terminal(self.dct, index) {
            let mut matched = prefix;
            matched.push_str(&self.key[start..]);
            found.insert(0, (matched, terminal));
        }
        found
    }
}
