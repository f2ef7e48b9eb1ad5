//! Fixture producer for tests: packs a plain (unminimized) trie into the
//! double-array layout read by [`crate::Dictionary`] and [`crate::Guide`].

use std::collections::{BTreeMap, HashSet, VecDeque};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::config::{ByteOrder, PAYLOAD_SEPARATOR};
use crate::units;

#[derive(Default)]
struct Node {
    children: BTreeMap<u8, usize>,
    value: Option<u32>,
}

/// Slot allocator for the shared unit array.
struct Slots {
    used: Vec<bool>,
    bases: HashSet<u32>,
    first_free: u32,
}

impl Slots {
    fn new() -> Self {
        // Slot 0 is the root.
        Self {
            used: vec![true],
            bases: HashSet::new(),
            first_free: 1,
        }
    }

    fn is_used(&self, slot: u32) -> bool {
        self.used.get(slot as usize).copied().unwrap_or(false)
    }

    /// Lowest base whose child slots are all free. Bases are never shared:
    /// two nodes with one base would accept each other's labels.
    fn find_base(&self, labels: &[u8]) -> u32 {
        let first = u32::from(labels[0]);
        let mut slot = self.first_free;
        loop {
            if !self.is_used(slot) {
                let base = slot ^ first;
                if !self.bases.contains(&base)
                    && labels.iter().all(|&l| !self.is_used(base ^ u32::from(l)))
                {
                    return base;
                }
            }
            slot += 1;
        }
    }

    fn claim(&mut self, base: u32, labels: &[u8]) {
        self.bases.insert(base);
        for &l in labels {
            let slot = (base ^ u32::from(l)) as usize;
            if slot >= self.used.len() {
                self.used.resize(slot + 1, false);
            }
            self.used[slot] = true;
        }
        while self.is_used(self.first_free) {
            self.first_free += 1;
        }
    }
}

pub(crate) struct TrieBuilder {
    keys: BTreeMap<Vec<u8>, u32>,
    byte_order: ByteOrder,
    separator: u8,
    payload_newline: bool,
}

impl TrieBuilder {
    pub fn new() -> Self {
        Self {
            keys: BTreeMap::new(),
            byte_order: ByteOrder::Native,
            separator: PAYLOAD_SEPARATOR,
            payload_newline: false,
        }
    }

    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    /// Terminate every encoded payload with `\n`, like producers built on
    /// `binascii.b2a_base64`.
    pub fn with_payload_newline(mut self) -> Self {
        self.payload_newline = true;
        self
    }

    pub fn with_keys<K: AsRef<[u8]>>(self, keys: impl IntoIterator<Item = K>) -> Self {
        self.with_values(keys.into_iter().map(|k| (k, 0)))
    }

    pub fn with_values<K: AsRef<[u8]>>(
        mut self,
        pairs: impl IntoIterator<Item = (K, u32)>,
    ) -> Self {
        for (key, value) in pairs {
            self.keys.insert(key.as_ref().to_vec(), value);
        }
        self
    }

    /// Stores `key + separator + base64(payload)` for every pair.
    pub fn with_payloads<K: AsRef<[u8]>, P: AsRef<[u8]>>(
        mut self,
        pairs: impl IntoIterator<Item = (K, P)>,
    ) -> Self {
        for (key, payload) in pairs {
            let mut raw = key.as_ref().to_vec();
            raw.push(self.separator);
            raw.extend_from_slice(STANDARD.encode(payload.as_ref()).as_bytes());
            if self.payload_newline {
                raw.push(b'\n');
            }
            self.keys.insert(raw, 0);
        }
        self
    }

    fn build(&self) -> (Vec<u32>, Vec<[u8; 2]>) {
        let mut nodes = vec![Node::default()];
        for (key, &value) in &self.keys {
            assert!(!key.contains(&0), "keys may not contain NUL bytes");
            assert!(value < units::IS_LEAF_BIT, "value {value} does not fit a leaf");
            let mut cur = 0;
            for &b in key {
                cur = match nodes[cur].children.get(&b) {
                    Some(&next) => next,
                    None => {
                        nodes.push(Node::default());
                        let next = nodes.len() - 1;
                        nodes[cur].children.insert(b, next);
                        next
                    }
                };
            }
            nodes[cur].value = Some(value);
        }

        let mut slots = Slots::new();
        let mut index_of = vec![0u32; nodes.len()];
        let mut base_of: Vec<Option<u32>> = vec![None; nodes.len()];
        let mut queue = VecDeque::from([0usize]);
        while let Some(n) = queue.pop_front() {
            let mut labels = Vec::new();
            if nodes[n].value.is_some() {
                labels.push(0u8);
            }
            labels.extend(nodes[n].children.keys().copied());
            if labels.is_empty() {
                continue;
            }
            let base = slots.find_base(&labels);
            slots.claim(base, &labels);
            base_of[n] = Some(base);
            for (&label, &child) in &nodes[n].children {
                index_of[child] = base ^ u32::from(label);
                queue.push_back(child);
            }
        }

        let size = slots.used.len();
        let mut unit_words = vec![0u32; size];
        let mut guide = vec![[0u8; 2]; size];

        // (node, label into it, label of its next sibling)
        let mut stack = vec![(0usize, 0u8, 0u8)];
        while let Some((n, label, sibling)) = stack.pop() {
            let idx = index_of[n];
            let mut word = u32::from(label);
            if let Some(base) = base_of[n] {
                let offset = idx ^ base;
                assert!(offset < units::OFFSET_MAX, "offset {offset} needs extension");
                word |= offset << 10;
                if let Some(value) = nodes[n].value {
                    word |= units::HAS_LEAF_BIT;
                    unit_words[base as usize] = units::IS_LEAF_BIT | value;
                }
            }
            unit_words[idx as usize] = word;

            let first_child = nodes[n].children.keys().next().copied().unwrap_or(0);
            guide[idx as usize] = [first_child, sibling];

            let children: Vec<(u8, usize)> =
                nodes[n].children.iter().map(|(&l, &c)| (l, c)).collect();
            for (i, &(l, c)) in children.iter().enumerate() {
                let next = children.get(i + 1).map_or(0, |&(nl, _)| nl);
                stack.push((c, l, next));
            }
        }

        (unit_words, guide)
    }

    fn put_u32(&self, out: &mut Vec<u8>, value: u32) {
        out.extend_from_slice(&self.byte_order.write_u32(value));
    }

    pub fn dictionary_bytes(&self) -> Vec<u8> {
        let (unit_words, _) = self.build();
        let mut out = Vec::new();
        self.put_u32(&mut out, unit_words.len() as u32);
        for w in unit_words {
            self.put_u32(&mut out, w);
        }
        out
    }

    /// Dictionary section followed by the guide section.
    pub fn bytes(&self) -> Vec<u8> {
        let (unit_words, guide) = self.build();
        let mut out = Vec::new();
        self.put_u32(&mut out, unit_words.len() as u32);
        for w in unit_words {
            self.put_u32(&mut out, w);
        }
        self.put_u32(&mut out, guide.len() as u32);
        for pair in guide {
            out.extend_from_slice(&pair);
        }
        out
    }
}
