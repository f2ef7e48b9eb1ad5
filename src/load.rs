//! Section framing and the [`Load`] entry points shared by every structure.
//!
//! A file is a sequence of sections, each a `u32` count followed by the
//! section body:
//!
//! ```text
//! dictionary: count: u32, units: [u32] x count
//! guide:      count: u32, labels: [u8; 2] x count   (enumerable views only)
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use memmap2::Mmap;

use crate::config::{ByteOrder, Config};
use crate::error::{DawgError, Result};

/// Construction from the binary layout.
///
/// Implementors only provide [`Load::read_with`]; the byte-slice and file
/// variants decode through it.
pub trait Load: Sized {
    fn read_with<R: Read>(reader: &mut R, config: &Config) -> Result<Self>;

    fn read<R: Read>(reader: &mut R) -> Result<Self> {
        Self::read_with(reader, &Config::default())
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with(bytes, &Config::default())
    }

    fn from_bytes_with(bytes: &[u8], config: &Config) -> Result<Self> {
        let mut cursor = bytes;
        Self::read_with(&mut cursor, config)
    }

    fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with(path, &Config::default())
    }

    /// Loads from a file. The file is memory-mapped only while decoding; the
    /// result owns its arrays.
    fn load_with<P: AsRef<Path>>(path: P, config: &Config) -> Result<Self> {
        let path = path.as_ref();
        let mmap = map_file(path)?;
        tracing::debug!(path = %path.display(), bytes = mmap.len(), "loading dictionary file");
        Self::from_bytes_with(&mmap[..], config)
    }
}

pub(crate) fn map_file(path: &Path) -> Result<Mmap> {
    let file = File::open(path)?;
    // SAFETY: the map is read-only and lives only until decoding has copied
    // everything into owned buffers.
    let mmap = unsafe { Mmap::map(&file)? };
    Ok(mmap)
}

/// Reads a section's leading element count.
pub(crate) fn read_count<R: Read>(reader: &mut R, order: ByteOrder, section: &str) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader
        .read_exact(&mut buf)
        .map_err(|e| DawgError::from_section_read(e, section))?;
    Ok(order.read_u32(buf))
}

/// Reads exactly `count * width` bytes.
///
/// The count comes from untrusted input, so nothing is preallocated from it:
/// the body is read through `take` and its length checked afterwards.
pub(crate) fn read_body<R: Read>(
    reader: &mut R,
    count: u32,
    width: usize,
    section: &str,
) -> Result<Vec<u8>> {
    let expected = (count as usize)
        .checked_mul(width)
        .ok_or_else(|| DawgError::format(format!("{section} count {count} overflows")))?;

    let mut body = Vec::new();
    reader
        .by_ref()
        .take(expected as u64)
        .read_to_end(&mut body)
        .map_err(|e| DawgError::from_section_read(e, section))?;

    if body.len() != expected {
        return Err(DawgError::format(format!(
            "{section} truncated: {} < {} (count={})",
            body.len(),
            expected,
            count
        )));
    }
    Ok(body)
}
