//! Bit layout of a dictionary unit.
//!
//! Every unit is a `u32`:
//! - Bit 31: leaf flag. Leaf units hold a value in bits 0..=30.
//! - Bit 9: extension flag. When set, the offset is scaled by 256.
//! - Bit 8: the node has a leaf child (it terminates a key).
//! - Bits 0..=7: label of the transition that reaches this unit.
//! - Bits 10..=31: offset from this unit to its children (XOR-relative).

pub const IS_LEAF_BIT: u32 = 1 << 31;
pub const HAS_LEAF_BIT: u32 = 1 << 8;
pub const EXTENSION_BIT: u32 = 1 << 9;

/// Largest offset that fits without the extension flag.
pub const OFFSET_MAX: u32 = 1 << 21;

#[inline]
pub fn is_leaf(unit: u32) -> bool {
    unit & IS_LEAF_BIT != 0
}

/// Whether a unit has a leaf child.
#[inline]
pub fn has_leaf(unit: u32) -> bool {
    unit & HAS_LEAF_BIT != 0
}

/// Value stored in a leaf unit.
#[inline]
pub fn value(unit: u32) -> u32 {
    unit & !IS_LEAF_BIT
}

/// Label together with the leaf flag, so a leaf never matches a byte label.
#[inline]
pub fn label(unit: u32) -> u32 {
    unit & (IS_LEAF_BIT | 0xFF)
}

#[inline]
pub fn offset(unit: u32) -> u32 {
    // (unit & EXTENSION_BIT) >> 6 is either 0 or 8.
    (unit >> 10) << ((unit & EXTENSION_BIT) >> 6)
}
