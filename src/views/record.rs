use std::io::Read;
use std::path::Path;

use super::{BytesDawg, BytesItems, Keys};
use crate::config::Config;
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::load::Load;
use crate::record::{RecordCodec, StructFormat};
use crate::similar::Replaces;

/// A [`BytesDawg`] whose payloads are decoded into records by a codec.
///
/// ```
/// use dawg_rs::{RecordDawg, StructFormat};
///
/// # fn run(bytes: &[u8]) -> dawg_rs::Result<()> {
/// let dawg = RecordDawg::from_bytes(StructFormat::new(">3H")?, bytes)?;
/// for record in dawg.get("foo")? {
///     println!("{record:?}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct RecordDawg<C = StructFormat> {
    bytes: BytesDawg,
    codec: C,
}

impl<C: RecordCodec> RecordDawg<C> {
    pub fn new(codec: C, bytes: BytesDawg) -> Self {
        Self { bytes, codec }
    }

    pub fn read_with<R: Read>(codec: C, reader: &mut R, config: &Config) -> Result<Self> {
        Ok(Self::new(codec, BytesDawg::read_with(reader, config)?))
    }

    pub fn from_bytes(codec: C, bytes: &[u8]) -> Result<Self> {
        Ok(Self::new(codec, BytesDawg::from_bytes(bytes)?))
    }

    pub fn from_bytes_with(codec: C, bytes: &[u8], config: &Config) -> Result<Self> {
        Ok(Self::new(codec, BytesDawg::from_bytes_with(bytes, config)?))
    }

    pub fn load<P: AsRef<Path>>(codec: C, path: P) -> Result<Self> {
        Ok(Self::new(codec, BytesDawg::load(path)?))
    }

    pub fn load_with<P: AsRef<Path>>(codec: C, path: P, config: &Config) -> Result<Self> {
        Ok(Self::new(codec, BytesDawg::load_with(path, config)?))
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn contains(&self, key: impl AsRef<[u8]>) -> bool {
        self.bytes.contains(key)
    }

    /// Every record stored for `key`, or [`crate::DawgError::KeyNotFound`].
    pub fn get(&self, key: impl AsRef<[u8]>) -> Result<Vec<C::Record>> {
        self.decode_all(self.bytes.get(key)?)
    }

    pub fn get_or(&self, key: impl AsRef<[u8]>, default: Vec<C::Record>) -> Result<Vec<C::Record>> {
        if !self.bytes.contains(key.as_ref()) {
            return Ok(default);
        }
        self.get(key)
    }

    pub fn keys(&self, prefix: impl AsRef<[u8]>) -> Vec<Vec<u8>> {
        self.bytes.keys(prefix)
    }

    pub fn iter_keys(&self, prefix: impl AsRef<[u8]>) -> Keys<'_> {
        self.bytes.iter_keys(prefix)
    }

    pub fn items(&self, prefix: impl AsRef<[u8]>) -> Result<Vec<(Vec<u8>, C::Record)>> {
        self.iter_items(prefix).collect()
    }

    pub fn iter_items(&self, prefix: impl AsRef<[u8]>) -> RecordItems<'_, C> {
        RecordItems {
            inner: self.bytes.iter_items(prefix),
            codec: &self.codec,
        }
    }

    pub fn has_keys_with_prefix(&self, prefix: impl AsRef<[u8]>) -> bool {
        self.bytes.has_keys_with_prefix(prefix)
    }

    pub fn prefixes(&self, key: impl AsRef<[u8]>) -> Vec<Vec<u8>> {
        self.bytes.prefixes(key)
    }

    pub fn similar_keys(&self, key: &str, replaces: &Replaces) -> Vec<String> {
        self.bytes.similar_keys(key, replaces)
    }

    pub fn similar_items(
        &self,
        key: &str,
        replaces: &Replaces,
    ) -> Result<Vec<(String, Vec<C::Record>)>> {
        self.bytes
            .similar_items(key, replaces)?
            .into_iter()
            .map(|(k, payloads)| Ok((k, self.decode_all(payloads)?)))
            .collect()
    }

    pub fn similar_item_values(
        &self,
        key: &str,
        replaces: &Replaces,
    ) -> Result<Vec<Vec<C::Record>>> {
        self.bytes
            .similar_item_values(key, replaces)?
            .into_iter()
            .map(|payloads| self.decode_all(payloads))
            .collect()
    }

    pub fn dictionary(&self) -> &Dictionary {
        self.bytes.dictionary()
    }

    fn decode_all(&self, payloads: Vec<Vec<u8>>) -> Result<Vec<C::Record>> {
        payloads.iter().map(|p| self.codec.decode(p)).collect()
    }
}

/// Lazy `(key, record)` iterator.
pub struct RecordItems<'a, C> {
    inner: BytesItems<'a>,
    codec: &'a C,
}

impl<C: RecordCodec> Iterator for RecordItems<'_, C> {
    type Item = Result<(Vec<u8>, C::Record)>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        Some(item.and_then(|(key, payload)| Ok((key, self.codec.decode(&payload)?))))
    }
}
