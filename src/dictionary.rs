//! The double-array unit table: transitions and value lookup.

use std::io::Read;

use crate::config::Config;
use crate::error::Result;
use crate::load::{read_body, read_count, Load};
use crate::units;

/// A flat array of units. Index 0 is the root and stands for the empty key.
///
/// Children are never stored as addresses: the child of `index` over `label`
/// sits at `index ^ offset(index) ^ label`, and the unit found there must
/// carry `label` for the transition to exist.
#[derive(Clone, Default)]
pub struct Dictionary {
    units: Vec<u32>,
}

impl Dictionary {
    pub const ROOT: u32 = 0;

    #[cfg(test)]
    pub(crate) fn from_units(units: Vec<u32>) -> Self {
        Self { units }
    }

    #[inline]
    pub fn root(&self) -> u32 {
        Self::ROOT
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Approximate heap usage in bytes.
    pub fn memory_usage(&self) -> usize {
        self.units.len() * std::mem::size_of::<u32>()
    }

    #[inline]
    fn unit(&self, index: u32) -> Option<u32> {
        self.units.get(index as usize).copied()
    }

    /// Whether `index` terminates a key.
    #[inline]
    pub fn has_value(&self, index: u32) -> bool {
        self.unit(index).is_some_and(units::has_leaf)
    }

    /// Value attached to a terminal. The leaf lives at the companion index
    /// `index ^ offset(index)`.
    ///
    /// Only meaningful after [`Dictionary::has_value`] returned `true`;
    /// `None` means the addressing left the array.
    #[inline]
    pub fn value(&self, index: u32) -> Option<u32> {
        let unit = self.unit(index)?;
        let value_index = index ^ units::offset(unit);
        self.unit(value_index).map(units::value)
    }

    /// Follows one transition.
    #[inline]
    pub fn follow_char(&self, label: u8, index: u32) -> Option<u32> {
        let unit = self.unit(index)?;
        let next = index ^ units::offset(unit) ^ u32::from(label);
        let next_unit = self.unit(next)?;
        (units::label(next_unit) == u32::from(label)).then_some(next)
    }

    /// Follows a transition for each byte, stopping at the first miss.
    pub fn follow_bytes(&self, bytes: &[u8], index: u32) -> Option<u32> {
        bytes
            .iter()
            .try_fold(index, |index, &label| self.follow_char(label, index))
    }

    pub fn contains(&self, key: &[u8]) -> bool {
        self.follow_bytes(key, Self::ROOT)
            .is_some_and(|index| self.has_value(index))
    }

    /// Exact match returning the attached value.
    pub fn find(&self, key: &[u8]) -> Option<u32> {
        let index = self.follow_bytes(key, Self::ROOT)?;
        if !self.has_value(index) {
            return None;
        }
        self.value(index)
    }
}

impl Load for Dictionary {
    fn read_with<R: Read>(reader: &mut R, config: &Config) -> Result<Self> {
        let count = read_count(reader, config.byte_order, "dictionary")?;
        let body = read_body(reader, count, 4, "dictionary")?;
        let units = body
            .chunks_exact(4)
            .map(|c| config.byte_order.read_u32([c[0], c[1], c[2], c[3]]))
            .collect::<Vec<_>>();
        tracing::debug!(
            units = units.len(),
            byte_order = ?config.byte_order,
            "dictionary section loaded"
        );
        Ok(Self { units })
    }
}

impl std::fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dictionary")
            .field("units", &self.units.len())
            .finish()
    }
}
