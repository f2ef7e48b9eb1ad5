//! Fixed-layout binary records stored as payloads.
//!
//! [`RecordCodec`] is the seam: any codec that turns a payload into a value
//! works with [`crate::RecordDawg`]. [`StructFormat`] covers the common case
//! of numeric fields described by a `struct`-style format string such as
//! `">3H"` (three big-endian `u16`) or `"<Iq"`.

use crate::error::{DawgError, Result};

/// Decodes one payload into a record.
pub trait RecordCodec {
    type Record;

    fn decode(&self, bytes: &[u8]) -> Result<Self::Record>;
}

/// One decoded numeric field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Field {
    Int(i64),
    UInt(u64),
    Float(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Endian {
    Little,
    Big,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Pad,
    Bool,
    Signed(usize),
    Unsigned(usize),
    F32,
    F64,
}

impl Kind {
    fn from_code(code: char) -> Option<Self> {
        Some(match code {
            'x' => Kind::Pad,
            '?' => Kind::Bool,
            'b' => Kind::Signed(1),
            'B' => Kind::Unsigned(1),
            'h' => Kind::Signed(2),
            'H' => Kind::Unsigned(2),
            'i' | 'l' => Kind::Signed(4),
            'I' | 'L' => Kind::Unsigned(4),
            'q' => Kind::Signed(8),
            'Q' => Kind::Unsigned(8),
            'f' => Kind::F32,
            'd' => Kind::F64,
            _ => return None,
        })
    }

    fn size(self) -> usize {
        match self {
            Kind::Pad | Kind::Bool => 1,
            Kind::Signed(n) | Kind::Unsigned(n) => n,
            Kind::F32 => 4,
            Kind::F64 => 8,
        }
    }
}

/// Largest record a descriptor may describe, in bytes.
pub const MAX_RECORD_SIZE: usize = 1 << 20;

/// A `struct`-style record layout with standard sizes and no alignment.
///
/// ```
/// use dawg_rs::{Field, RecordCodec, StructFormat};
///
/// let fmt = StructFormat::new(">3H").unwrap();
/// assert_eq!(fmt.size(), 6);
/// let fields = fmt.decode(&[0, 3, 0, 2, 1, 0]).unwrap();
/// assert_eq!(fields, vec![Field::UInt(3), Field::UInt(2), Field::UInt(256)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructFormat {
    descriptor: String,
    endian: Endian,
    /// `(kind, repeat)` runs in descriptor order.
    runs: Vec<(Kind, usize)>,
    size: usize,
    field_count: usize,
}

impl StructFormat {
    /// Parses a format string: an optional byte-order mark (`@`, `=`, `<`,
    /// `>`, `!`), then codes with optional repeat counts. `@` and `=` both
    /// mean native order; alignment is never inserted. Records larger than
    /// [`MAX_RECORD_SIZE`] are rejected.
    pub fn new(descriptor: &str) -> Result<Self> {
        let invalid =
            |msg: String| DawgError::InvalidArgument(format!("format {descriptor:?}: {msg}"));

        let mut chars = descriptor.chars().filter(|c| !c.is_whitespace()).peekable();
        let native = if cfg!(target_endian = "big") {
            Endian::Big
        } else {
            Endian::Little
        };
        let endian = match chars.peek() {
            Some('<') => Endian::Little,
            Some('>') | Some('!') => Endian::Big,
            _ => native,
        };
        if matches!(chars.peek(), Some('@' | '=' | '<' | '>' | '!')) {
            chars.next();
        }

        let mut runs = Vec::new();
        let mut size = 0usize;
        let mut field_count = 0usize;
        let mut count: Option<usize> = None;
        for c in chars {
            if let Some(d) = c.to_digit(10) {
                let n = count
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(d as usize))
                    .ok_or_else(|| invalid("repeat count overflows".into()))?;
                count = Some(n);
                continue;
            }
            let kind =
                Kind::from_code(c).ok_or_else(|| invalid(format!("unsupported code {c:?}")))?;
            let repeat = count.take().unwrap_or(1);
            size = repeat
                .checked_mul(kind.size())
                .and_then(|n| n.checked_add(size))
                .filter(|&n| n <= MAX_RECORD_SIZE)
                .ok_or_else(|| invalid(format!("record exceeds {MAX_RECORD_SIZE} bytes")))?;
            if kind != Kind::Pad {
                field_count += repeat;
            }
            if repeat > 0 {
                runs.push((kind, repeat));
            }
        }
        if count.is_some() {
            return Err(invalid("repeat count without a code".into()));
        }

        Ok(Self {
            descriptor: descriptor.to_owned(),
            endian,
            runs,
            size,
            field_count,
        })
    }

    /// Encoded size of one record in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of fields in a decoded record (padding excluded).
    pub fn field_count(&self) -> usize {
        self.field_count
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    fn kinds(&self) -> impl Iterator<Item = Kind> + '_ {
        self.runs
            .iter()
            .flat_map(|&(kind, repeat)| std::iter::repeat(kind).take(repeat))
    }

    fn read_uint(&self, bytes: &[u8]) -> u64 {
        let mut buf = [0u8; 8];
        match self.endian {
            Endian::Little => {
                buf[..bytes.len()].copy_from_slice(bytes);
                u64::from_le_bytes(buf)
            }
            Endian::Big => {
                buf[8 - bytes.len()..].copy_from_slice(bytes);
                u64::from_be_bytes(buf)
            }
        }
    }

    fn write_uint(&self, value: u64, width: usize, out: &mut Vec<u8>) {
        match self.endian {
            Endian::Little => out.extend_from_slice(&value.to_le_bytes()[..width]),
            Endian::Big => out.extend_from_slice(&value.to_be_bytes()[8 - width..]),
        }
    }

    /// Encodes a record. Every field must fit its slot.
    pub fn encode(&self, fields: &[Field]) -> Result<Vec<u8>> {
        if fields.len() != self.field_count {
            return Err(DawgError::InvalidArgument(format!(
                "format {:?} takes {} fields, got {}",
                self.descriptor,
                self.field_count,
                fields.len()
            )));
        }
        let out_of_range = |field: &Field| {
            DawgError::InvalidArgument(format!(
                "{field:?} does not fit format {:?}",
                self.descriptor
            ))
        };

        let mut out = Vec::with_capacity(self.size);
        let mut fields = fields.iter();
        for kind in self.kinds() {
            if kind == Kind::Pad {
                out.push(0);
                continue;
            }
            // field_count matched above, so there is one field per slot.
            let Some(field) = fields.next() else { break };
            match (kind, *field) {
                (Kind::Bool, Field::UInt(v)) if v <= 1 => out.push(v as u8),
                (Kind::Unsigned(n), Field::UInt(v)) if n == 8 || v >> (n * 8) == 0 => {
                    self.write_uint(v, n, &mut out)
                }
                (Kind::Signed(n), Field::Int(v))
                    if n == 8 || (v >= -(1i64 << (n * 8 - 1)) && v < (1i64 << (n * 8 - 1))) =>
                {
                    self.write_uint(v as u64, n, &mut out)
                }
                (Kind::F32, Field::Float(v)) => {
                    self.write_uint(u64::from((v as f32).to_bits()), 4, &mut out)
                }
                (Kind::F64, Field::Float(v)) => self.write_uint(v.to_bits(), 8, &mut out),
                _ => return Err(out_of_range(field)),
            }
        }
        Ok(out)
    }
}

impl RecordCodec for StructFormat {
    type Record = Vec<Field>;

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Field>> {
        if bytes.len() != self.size {
            return Err(DawgError::format(format!(
                "record for {:?} needs {} bytes, got {}",
                self.descriptor,
                self.size,
                bytes.len()
            )));
        }

        let mut fields = Vec::with_capacity(self.field_count);
        let mut pos = 0;
        for kind in self.kinds() {
            let n = kind.size();
            let raw = &bytes[pos..pos + n];
            pos += n;
            let field = match kind {
                Kind::Pad => continue,
                Kind::Bool => Field::UInt(u64::from(raw[0] != 0)),
                Kind::Unsigned(_) => Field::UInt(self.read_uint(raw)),
                Kind::Signed(n) => {
                    // Sign-extend from the field width.
                    let shift = 64 - n * 8;
                    Field::Int(((self.read_uint(raw) << shift) as i64) >> shift)
                }
                Kind::F32 => Field::Float(f64::from(f32::from_bits(self.read_uint(raw) as u32))),
                Kind::F64 => Field::Float(f64::from_bits(self.read_uint(raw))),
            };
            fields.push(field);
        }
        Ok(fields)
    }
}
