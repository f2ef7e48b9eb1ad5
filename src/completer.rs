//! Ordered enumeration of the keys below a node.

use crate::dictionary::Dictionary;
use crate::guide::Guide;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Unstarted,
    /// Parked on a terminal (the index of the last key produced).
    Positioned(u32),
    Exhausted,
}

/// Depth-first cursor over a dictionary and its guide.
///
/// The path from the start node is kept on an explicit stack, mirrored by
/// the key buffer: every entry above the start node added one byte. Keys
/// come out in increasing byte order.
///
/// ```text
/// start(i, prefix) -> advance() -> key()/value() -> advance() -> ... -> false
/// ```
///
/// Paths never get deeper than the dictionary has units, so enumeration
/// always ends. A DAWG shares suffixes, though, and the number of keys it
/// holds can grow exponentially with its size; bound the work with
/// `take` when the data is untrusted.
pub struct Completer<'a> {
    dct: &'a Dictionary,
    guide: &'a Guide,
    key: Vec<u8>,
    stack: Vec<u32>,
    state: State,
}

impl<'a> Completer<'a> {
    pub fn new(dct: &'a Dictionary, guide: &'a Guide) -> Self {
        Self {
            dct,
            guide,
            key: Vec::new(),
            stack: Vec::new(),
            state: State::Exhausted,
        }
    }

    /// Positions the cursor before the first key below `index`. `prefix` is
    /// the key that leads to `index` and starts the key buffer.
    pub fn start(&mut self, index: u32, prefix: &[u8]) {
        self.key.clear();
        self.key.extend_from_slice(prefix);
        self.stack.clear();
        if self.guide.is_empty() {
            self.state = State::Exhausted;
        } else {
            self.stack.push(index);
            self.state = State::Unstarted;
        }
    }

    /// Moves to the next key. Returns `false` once every key has been produced,
    /// and keeps returning `false` afterwards.
    pub fn advance(&mut self) -> bool {
        let index = match self.state {
            State::Exhausted => return false,
            State::Unstarted => match self.stack.last() {
                Some(&index) => index,
                None => return self.exhaust(),
            },
            State::Positioned(last) => {
                let child = self.guide.child(last);
                if child != 0 {
                    match self.descend(child, last) {
                        Some(index) => index,
                        None => return self.exhaust(),
                    }
                } else {
                    match self.next_sibling() {
                        Some(index) => index,
                        None => return self.exhaust(),
                    }
                }
            }
        };
        self.find_terminal(index)
    }

    /// The current key, including the prefix given to `start`.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Index of the current terminal.
    pub fn index(&self) -> Option<u32> {
        match self.state {
            State::Positioned(index) => Some(index),
            _ => None,
        }
    }

    /// Value attached to the current key.
    pub fn value(&self) -> Option<u32> {
        self.index().and_then(|index| self.dct.value(index))
    }

    fn exhaust(&mut self) -> bool {
        self.state = State::Exhausted;
        self.stack.clear();
        false
    }

    fn descend(&mut self, label: u8, from: u32) -> Option<u32> {
        // A well-formed path never revisits a unit.
        if self.stack.len() > self.dct.len() {
            return None;
        }
        let next = self.dct.follow_char(label, from)?;
        self.key.push(label);
        self.stack.push(next);
        Some(next)
    }

    /// Backtracks until some node on the path has a next sibling, and moves
    /// onto it. `None` when the start node is popped.
    fn next_sibling(&mut self) -> Option<u32> {
        loop {
            let top = *self.stack.last()?;
            let sibling = self.guide.sibling(top);
            self.stack.pop();
            let &parent = self.stack.last()?;
            let label = self.key.pop()?;
            if sibling != 0 {
                // Siblings ascend; a repeat would cycle forever.
                if sibling <= label {
                    return None;
                }
                return self.descend(sibling, parent);
            }
        }
    }

    fn find_terminal(&mut self, mut index: u32) -> bool {
        while !self.dct.has_value(index) {
            let label = self.guide.child(index);
            if label == 0 {
                return self.exhaust();
            }
            match self.descend(label, index) {
                Some(next) => index = next,
                None => return self.exhaust(),
            }
        }
        self.state = State::Positioned(index);
        true
    }
}
