//! Positional binary encoding of `Carro`
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! +------------------------+
//! | Entry Length (u32)     | total length, including this field and checksum
//! +------------------------+
//! | Field Count (u8)       | always FIELD_COUNT
//! +------------------------+
//! | 0: id      (u32)                              |
//! | 1: marca   (u32 length + UTF-8)               |
//! | 2: modelo  (u32 length + UTF-8)               |
//! | 3: ano     (i32)                              |
//! | 4: cor     (u8 flag, then length + UTF-8)     |
//! | 5: preco   (i64 scale, u32 length + digits)   |
//! +------------------------+
//! | Checksum (u32)         | CRC32 over every preceding byte
//! +------------------------+
//! ```
//!
//! Fields are identified by position only. Reordering or removing a field
//! breaks every previously encoded entry.

use std::io::{Cursor, Read};

use bigdecimal::num_bigint::BigInt;
use bigdecimal::BigDecimal;

use super::checksum::compute_checksum;
use super::errors::{DecodeError, DecodeResult};
use crate::model::Carro;

/// Number of positional fields in the current layout.
pub const FIELD_COUNT: u8 = 6;

/// length + count + id + marca len + modelo len + ano + cor flag + scale + digits len + checksum
pub const MIN_ENTRY_SIZE: usize = 4 + 1 + 4 + 4 + 4 + 4 + 1 + 8 + 4 + 4;

const COLOR_ABSENT: u8 = 0;
const COLOR_PRESENT: u8 = 1;

fn put_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
    buf.extend_from_slice(bytes);
}

/// Encode a record into its binary form.
///
/// Deterministic: equal records always produce identical bytes.
pub fn encode(carro: &Carro) -> Vec<u8> {
    let mut body = Vec::with_capacity(64);

    body.push(FIELD_COUNT);
    body.extend_from_slice(&carro.id.to_le_bytes());
    put_bytes(&mut body, carro.brand.as_bytes());
    put_bytes(&mut body, carro.model.as_bytes());
    body.extend_from_slice(&carro.year.to_le_bytes());

    match &carro.color {
        Some(color) => {
            body.push(COLOR_PRESENT);
            put_bytes(&mut body, color.as_bytes());
        }
        None => body.push(COLOR_ABSENT),
    }

    let (digits, scale) = carro.price.as_bigint_and_exponent();
    body.extend_from_slice(&scale.to_le_bytes());
    put_bytes(&mut body, &digits.to_signed_bytes_le());

    let entry_length = (4 + body.len() + 4) as u32;

    let mut entry = Vec::with_capacity(entry_length as usize);
    entry.extend_from_slice(&entry_length.to_le_bytes());
    entry.extend_from_slice(&body);
    let checksum = compute_checksum(&entry);
    entry.extend_from_slice(&checksum.to_le_bytes());

    entry
}

/// Decode an entry produced by [`encode`].
pub fn decode(data: &[u8]) -> DecodeResult<Carro> {
    if data.len() < MIN_ENTRY_SIZE {
        return Err(DecodeError::TooShort {
            len: data.len(),
            min: MIN_ENTRY_SIZE,
        });
    }

    let declared = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
    if declared != data.len() {
        return Err(DecodeError::LengthMismatch {
            declared,
            actual: data.len(),
        });
    }

    let checksum_offset = data.len() - 4;
    let stored = u32::from_le_bytes([
        data[checksum_offset],
        data[checksum_offset + 1],
        data[checksum_offset + 2],
        data[checksum_offset + 3],
    ]);
    let computed = compute_checksum(&data[..checksum_offset]);
    if computed != stored {
        return Err(DecodeError::ChecksumMismatch { computed, stored });
    }

    let mut reader = FieldReader::new(&data[4..checksum_offset]);

    let found = reader.read_u8("field_count")?;
    if found != FIELD_COUNT {
        return Err(DecodeError::FieldLayout {
            expected: FIELD_COUNT,
            found,
        });
    }

    let id = reader.read_u32("id")?;
    let brand = reader.read_string("marca")?;
    let model = reader.read_string("modelo")?;
    let year = reader.read_i32("ano")?;

    let color = match reader.read_u8("cor")? {
        COLOR_ABSENT => None,
        COLOR_PRESENT => Some(reader.read_string("cor")?),
        value => return Err(DecodeError::InvalidFlag { field: "cor", value }),
    };

    let scale = reader.read_i64("preco")?;
    let digits = BigInt::from_signed_bytes_le(&reader.read_bytes("preco")?);
    let price = BigDecimal::new(digits, scale);

    let count = reader.remaining();
    if count != 0 {
        return Err(DecodeError::TrailingBytes { count });
    }

    Ok(Carro {
        id,
        brand,
        model,
        year,
        color,
        price,
    })
}

/// Sequential reader over the entry body.
struct FieldReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> FieldReader<'a> {
    fn new(body: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(body),
        }
    }

    fn remaining(&self) -> usize {
        let len = self.cursor.get_ref().len();
        len.saturating_sub(self.cursor.position() as usize)
    }

    fn read_array<const N: usize>(&mut self, field: &'static str) -> DecodeResult<[u8; N]> {
        let mut buf = [0u8; N];
        self.cursor
            .read_exact(&mut buf)
            .map_err(|_| DecodeError::Truncated { field })?;
        Ok(buf)
    }

    fn read_u8(&mut self, field: &'static str) -> DecodeResult<u8> {
        Ok(self.read_array::<1>(field)?[0])
    }

    fn read_u32(&mut self, field: &'static str) -> DecodeResult<u32> {
        self.read_array(field).map(u32::from_le_bytes)
    }

    fn read_i32(&mut self, field: &'static str) -> DecodeResult<i32> {
        self.read_array(field).map(i32::from_le_bytes)
    }

    fn read_i64(&mut self, field: &'static str) -> DecodeResult<i64> {
        self.read_array(field).map(i64::from_le_bytes)
    }

    fn read_bytes(&mut self, field: &'static str) -> DecodeResult<Vec<u8>> {
        let len = self.read_u32(field)? as usize;
        // Checked before allocating so a corrupt length cannot request a huge buffer.
        if len > self.remaining() {
            return Err(DecodeError::Truncated { field });
        }

        let mut buf = vec![0u8; len];
        self.cursor
            .read_exact(&mut buf)
            .map_err(|_| DecodeError::Truncated { field })?;
        Ok(buf)
    }

    fn read_string(&mut self, field: &'static str) -> DecodeResult<String> {
        String::from_utf8(self.read_bytes(field)?).map_err(|_| DecodeError::InvalidUtf8 { field })
    }
}
