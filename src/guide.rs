//! Child/sibling labels that give the dictionary a depth-first order.

use std::io::Read;

use crate::config::ByteOrder;
use crate::error::Result;
use crate::load::{read_body, read_count};

/// For every dictionary index, the label of its first child and the label of
/// its next sibling (0 when there is none). Labels are ascending, so walking
/// them yields keys in byte order.
#[derive(Clone, Default)]
pub struct Guide {
    units: Vec<[u8; 2]>,
}

impl Guide {
    #[inline]
    pub fn child(&self, index: u32) -> u8 {
        self.units.get(index as usize).map_or(0, |u| u[0])
    }

    #[inline]
    pub fn sibling(&self, index: u32) -> u8 {
        self.units.get(index as usize).map_or(0, |u| u[1])
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// An empty guide means the structure cannot be enumerated.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn memory_usage(&self) -> usize {
        self.units.len() * 2
    }

    /// Reads a guide section: `count: u32` then `count` label pairs.
    pub fn read<R: Read>(reader: &mut R, byte_order: ByteOrder) -> Result<Self> {
        let count = read_count(reader, byte_order, "guide")?;
        let body = read_body(reader, count, 2, "guide")?;
        let units = body.chunks_exact(2).map(|c| [c[0], c[1]]).collect::<Vec<_>>();
        tracing::debug!(units = units.len(), "guide section loaded");
        Ok(Self { units })
    }
}

impl std::fmt::Debug for Guide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guide").field("units", &self.units.len()).finish()
    }
}
