// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::block_buffer::{ExtensibleBuffer, DEFAULT_BLOCK_SIZE};
use crate::ensure;
use crate::error::Error;
use crate::resolver::pool::{BufferPool, ScratchPool};
use crate::types::{
    CompressType, EnumRepr, TextEncoding, TypeMarker, MAX_STRING_BYTES, SIZE_OF_CHAR,
    SIZE_OF_DECIMAL,
};
use crate::util::{from_oa_date, to_oa_date};
use byteorder::{ByteOrder, LittleEndian};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// Bits of the leading flags word of a serialized `Decimal`.
const DECIMAL_SCALE_MASK: u32 = 0x00ff_0000;
const DECIMAL_SIGN_MASK: u32 = 0x8000_0000;
const DECIMAL_MAX_SCALE: u32 = 28;

/// Forward-only byte sink over a pooled [`ExtensibleBuffer`].
///
/// The buffer is checked out of [`BufferPool::global`] on construction and
/// handed back when the writer drops, so every exit path releases it.
pub struct Writer {
    buffer: ExtensibleBuffer,
    len: usize,
    encoding: TextEncoding,
}

impl Writer {
    pub fn new(encoding: TextEncoding) -> Writer {
        Writer::with_block_size(encoding, DEFAULT_BLOCK_SIZE)
    }

    pub fn with_block_size(encoding: TextEncoding, block_size: usize) -> Writer {
        Writer {
            buffer: BufferPool::global().acquire(block_size),
            len: 0,
            encoding,
        }
    }

    /// Total committed bytes.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Next write offset. Writing is forward-only, so this always equals [`Writer::len`].
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Preallocates blocks for `additional` more bytes.
    pub fn reserve(&mut self, additional: usize) {
        self.buffer.reserve(self.len + additional);
    }

    /// Discards everything written so far, keeping the allocated blocks.
    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Copies `[0, len)` out as one contiguous array.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len);
        self.buffer.extend_into(0, self.len, &mut out);
        out
    }

    /// Appends the written bytes to `out`.
    pub fn copy_into(&self, out: &mut Vec<u8>) {
        out.reserve(self.len);
        self.buffer.extend_into(0, self.len, out);
    }

    /// Copies the bytes out and returns the buffer to the pool.
    pub fn into_bytes(self) -> Vec<u8> {
        self.to_bytes()
    }

    /// Returns the buffer to the pool. Same as dropping the writer.
    pub fn dispose(self) {}

    #[inline(always)]
    pub fn write_raw(&mut self, v: &[u8]) {
        self.buffer.write_at(self.len, v);
        self.len += v.len();
    }

    #[inline(always)]
    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(value as u8);
    }

    #[inline(always)]
    pub fn write_u8(&mut self, value: u8) {
        self.write_raw(&[value]);
    }

    #[inline(always)]
    pub fn write_i8(&mut self, value: i8) {
        self.write_raw(&[value as u8]);
    }

    #[inline(always)]
    pub fn write_u16(&mut self, value: u16) {
        let mut b = [0u8; 2];
        LittleEndian::write_u16(&mut b, value);
        self.write_raw(&b);
    }

    #[inline(always)]
    pub fn write_i16(&mut self, value: i16) {
        let mut b = [0u8; 2];
        LittleEndian::write_i16(&mut b, value);
        self.write_raw(&b);
    }

    #[inline(always)]
    pub fn write_u32(&mut self, value: u32) {
        let mut b = [0u8; 4];
        LittleEndian::write_u32(&mut b, value);
        self.write_raw(&b);
    }

    #[inline(always)]
    pub fn write_i32(&mut self, value: i32) {
        let mut b = [0u8; 4];
        LittleEndian::write_i32(&mut b, value);
        self.write_raw(&b);
    }

    #[inline(always)]
    pub fn write_u64(&mut self, value: u64) {
        let mut b = [0u8; 8];
        LittleEndian::write_u64(&mut b, value);
        self.write_raw(&b);
    }

    #[inline(always)]
    pub fn write_i64(&mut self, value: i64) {
        let mut b = [0u8; 8];
        LittleEndian::write_i64(&mut b, value);
        self.write_raw(&b);
    }

    /// Written as its exact bit pattern, so NaN payloads and `-0.0` survive.
    #[inline(always)]
    pub fn write_f32(&mut self, value: f32) {
        self.write_u32(value.to_bits());
    }

    #[inline(always)]
    pub fn write_f64(&mut self, value: f64) {
        self.write_u64(value.to_bits());
    }

    /// One UTF-16 code unit. Characters outside the Basic Multilingual Plane
    /// do not fit and are rejected.
    pub fn write_char(&mut self, value: char) -> Result<(), Error> {
        let unit = u16::try_from(value as u32)
            .map_err(|_| Error::invalid_payload(format!("char {value:?} is not a single UTF-16 unit")))?;
        self.write_u16(unit);
        Ok(())
    }

    pub fn write_decimal(&mut self, value: &Decimal) {
        let raw: [u8; SIZE_OF_DECIMAL] = value.serialize();
        self.write_raw(&raw);
    }

    /// Writes an OA date. Nothing is written for a timestamp outside the OA range.
    pub fn write_datetime(&mut self, value: &NaiveDateTime) -> Result<(), Error> {
        self.write_f64(to_oa_date(value)?);
        Ok(())
    }

    #[inline(always)]
    pub fn write_marker(&mut self, marker: TypeMarker) {
        self.write_u16(marker.into());
    }

    #[inline(always)]
    fn write_tag(&mut self, tag: CompressType) {
        self.write_u8(tag.into());
    }

    /// Writes a tagged string. `None` and `""` share one encoding:
    /// `ByteString` followed by a zero length.
    ///
    /// The length is checked before anything is written, so an oversized
    /// string leaves the writer untouched.
    pub fn write_str(&mut self, value: Option<&str>) -> Result<(), Error> {
        let s = match value {
            None | Some("") => {
                self.write_tag(CompressType::ByteString);
                self.write_u8(0);
                return Ok(());
            }
            Some(s) => s,
        };
        let len = self.encoding.byte_count(s);
        ensure!(
            len <= MAX_STRING_BYTES,
            "string is too long, len: {}, max: {}",
            len,
            MAX_STRING_BYTES
        );
        if len <= u8::MAX as usize {
            self.write_tag(CompressType::ByteString);
            self.write_u8(len as u8);
        } else {
            self.write_tag(CompressType::UInt16String);
            self.write_u16(len as u16);
        }
        match self.encoding {
            TextEncoding::Utf8 => self.write_raw(s.as_bytes()),
            TextEncoding::Utf16 => {
                let mut scratch = ScratchPool::global().borrow(len);
                for unit in s.encode_utf16() {
                    scratch.extend_from_slice(&unit.to_le_bytes());
                }
                self.write_raw(&scratch);
            }
        }
        Ok(())
    }

    /// Compressed length followed by the raw bytes.
    pub fn write_bytes(&mut self, v: &[u8]) -> Result<(), Error> {
        self.write_length(v.len())?;
        self.write_raw(v);
        Ok(())
    }

    /// Element count of the reflection path, compressed as an `i32`.
    pub fn write_length(&mut self, len: usize) -> Result<(), Error> {
        let len = i32::try_from(len)
            .map_err(|_| Error::invalid_payload(format!("length {len} exceeds i32::MAX")))?;
        self.compress_and_write_i32(len);
        Ok(())
    }

    pub fn compress_and_write_u64(&mut self, num: u64) {
        if num <= u32::MAX as u64 {
            self.compress_and_write_u32(num as u32);
            return;
        }
        self.write_tag(CompressType::UInt64);
        self.write_u64(num);
    }

    pub fn compress_and_write_u32(&mut self, num: u32) {
        if num <= u16::MAX as u32 {
            self.compress_and_write_u16(num as u16);
            return;
        }
        self.write_tag(CompressType::UInt32);
        self.write_u32(num);
    }

    pub fn compress_and_write_u16(&mut self, num: u16) {
        if num <= u8::MAX as u16 {
            self.compress_and_write_u8(num as u8);
            return;
        }
        self.write_tag(CompressType::UInt16);
        self.write_u16(num);
    }

    #[inline(always)]
    pub fn compress_and_write_u8(&mut self, num: u8) {
        self.write_tag(CompressType::Byte);
        self.write_u8(num);
    }

    pub fn compress_and_write_i64(&mut self, num: i64) {
        if num < 0 {
            self.compress_and_write_neg_i64(num);
            return;
        }
        if num <= i32::MAX as i64 {
            self.compress_and_write_i32(num as i32);
            return;
        }
        self.write_tag(CompressType::Int64);
        self.write_i64(num);
    }

    pub fn compress_and_write_i32(&mut self, num: i32) {
        if num < 0 {
            self.compress_and_write_neg_i32(num);
            return;
        }
        if num <= i16::MAX as i32 {
            self.compress_and_write_i16(num as i16);
            return;
        }
        self.write_tag(CompressType::Int32);
        self.write_i32(num);
    }

    /// Non-negative values up to 127 take the `SByte` tag and values up to
    /// 255 take the `Byte` tag.
    pub fn compress_and_write_i16(&mut self, num: i16) {
        if num < 0 {
            self.compress_and_write_neg_i16(num);
            return;
        }
        if num <= i8::MAX as i16 {
            self.compress_and_write_i8(num as i8);
            return;
        }
        if num <= u8::MAX as i16 {
            self.compress_and_write_u8(num as u8);
            return;
        }
        self.write_tag(CompressType::Int16);
        self.write_i16(num);
    }

    #[inline(always)]
    pub fn compress_and_write_i8(&mut self, num: i8) {
        self.write_tag(CompressType::SByte);
        self.write_i8(num);
    }

    fn compress_and_write_neg_i64(&mut self, num: i64) {
        if num >= i32::MIN as i64 {
            self.compress_and_write_neg_i32(num as i32);
            return;
        }
        self.write_tag(CompressType::Int64);
        self.write_i64(num);
    }

    fn compress_and_write_neg_i32(&mut self, num: i32) {
        if num >= i16::MIN as i32 {
            self.compress_and_write_neg_i16(num as i16);
            return;
        }
        self.write_tag(CompressType::Int32);
        self.write_i32(num);
    }

    fn compress_and_write_neg_i16(&mut self, num: i16) {
        if num >= i8::MIN as i16 {
            self.compress_and_write_i8(num as i8);
            return;
        }
        self.write_tag(CompressType::Int16);
        self.write_i16(num);
    }

    /// Writes an enum discriminant given as sign-extended bits.
    pub fn compress_and_write_enum(&mut self, repr: EnumRepr, bits: u64) {
        match repr {
            EnumRepr::U8 => self.write_u8(bits as u8),
            EnumRepr::I8 => self.write_i8(bits as i8),
            EnumRepr::U16 => self.write_u16(bits as u16),
            EnumRepr::I16 => self.write_i16(bits as i16),
            EnumRepr::U32 => self.compress_and_write_u32(bits as u32),
            EnumRepr::I32 => self.compress_and_write_i32(bits as i32),
            EnumRepr::U64 => self.compress_and_write_u64(bits),
            EnumRepr::I64 => self.compress_and_write_i64(bits as i64),
        }
    }
}

impl Default for Writer {
    fn default() -> Self {
        Writer::new(TextEncoding::default())
    }
}

impl Drop for Writer {
    fn drop(&mut self) {
        let block_size = self.buffer.block_size();
        let buffer = std::mem::replace(&mut self.buffer, ExtensibleBuffer::detached(block_size));
        BufferPool::global().release(buffer);
    }
}

macro_rules! impl_read_compressed {
    ($($name:ident => $ty:ty),* $(,)?) => {
        $(
            #[inline]
            pub fn $name(&mut self) -> Result<$ty, Error> {
                let v = self.read_compressed()?;
                <$ty>::try_from(v).map_err(|_| {
                    Error::invalid_payload(format!(
                        "compressed value {} does not fit {}",
                        v,
                        stringify!($ty)
                    ))
                })
            }
        )*
    };
}

/// Cursor over an externally owned byte slice.
///
/// Every read is bounds checked and fails with [`Error::OutOfData`] instead of
/// reading past the end.
pub struct Reader<'a> {
    bf: &'a [u8],
    cursor: usize,
    encoding: TextEncoding,
}

impl<'a> Reader<'a> {
    pub fn new(bf: &'a [u8], encoding: TextEncoding) -> Reader<'a> {
        Reader {
            bf,
            cursor: 0,
            encoding,
        }
    }

    #[inline(always)]
    pub fn position(&self) -> usize {
        self.cursor
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.bf.len() - self.cursor
    }

    #[inline(always)]
    pub fn is_end(&self) -> bool {
        self.cursor >= self.bf.len()
    }

    #[inline(always)]
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    #[inline(always)]
    fn take(&mut self, len: usize) -> Result<&'a [u8], Error> {
        ensure!(
            len <= self.remaining(),
            Error::out_of_data(self.cursor, len, self.bf.len())
        );
        let bf = self.bf;
        let slice = &bf[self.cursor..self.cursor + len];
        self.cursor += len;
        Ok(slice)
    }

    /// Borrows the next `len` bytes without copying.
    #[inline(always)]
    pub fn read_raw(&mut self, len: usize) -> Result<&'a [u8], Error> {
        self.take(len)
    }

    #[inline(always)]
    pub fn read_bool(&mut self) -> Result<bool, Error> {
        Ok(self.read_u8()? != 0)
    }

    #[inline(always)]
    pub fn read_u8(&mut self) -> Result<u8, Error> {
        Ok(self.take(1)?[0])
    }

    #[inline(always)]
    pub fn read_i8(&mut self) -> Result<i8, Error> {
        Ok(self.read_u8()? as i8)
    }

    #[inline(always)]
    pub fn read_u16(&mut self) -> Result<u16, Error> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    #[inline(always)]
    pub fn read_i16(&mut self) -> Result<i16, Error> {
        Ok(LittleEndian::read_i16(self.take(2)?))
    }

    #[inline(always)]
    pub fn read_u32(&mut self) -> Result<u32, Error> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    #[inline(always)]
    pub fn read_i32(&mut self) -> Result<i32, Error> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    #[inline(always)]
    pub fn read_u64(&mut self) -> Result<u64, Error> {
        Ok(LittleEndian::read_u64(self.take(8)?))
    }

    #[inline(always)]
    pub fn read_i64(&mut self) -> Result<i64, Error> {
        Ok(LittleEndian::read_i64(self.take(8)?))
    }

    #[inline(always)]
    pub fn read_f32(&mut self) -> Result<f32, Error> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    #[inline(always)]
    pub fn read_f64(&mut self) -> Result<f64, Error> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    pub fn read_char(&mut self) -> Result<char, Error> {
        let offset = self.cursor;
        let unit = LittleEndian::read_u16(self.take(SIZE_OF_CHAR)?);
        char::from_u32(unit as u32).ok_or_else(|| {
            Error::invalid_payload(format!("lone surrogate {unit:#06x} at offset {offset}"))
        })
    }

    /// Reads the 16 bytes of [`Decimal::serialize`]. Flags with a scale above
    /// 28 or stray bits set are rejected rather than masked.
    pub fn read_decimal(&mut self) -> Result<Decimal, Error> {
        let mut raw = [0u8; SIZE_OF_DECIMAL];
        raw.copy_from_slice(self.take(SIZE_OF_DECIMAL)?);
        let flags = LittleEndian::read_u32(&raw[..4]);
        let scale = (flags & DECIMAL_SCALE_MASK) >> 16;
        ensure!(
            flags & !(DECIMAL_SCALE_MASK | DECIMAL_SIGN_MASK) == 0 && scale <= DECIMAL_MAX_SCALE,
            "invalid decimal flags: {:#010x}",
            flags
        );
        Ok(Decimal::deserialize(raw))
    }

    pub fn read_datetime(&mut self) -> Result<NaiveDateTime, Error> {
        from_oa_date(self.read_f64()?)
    }

    #[inline(always)]
    pub fn read_marker(&mut self) -> Result<TypeMarker, Error> {
        TypeMarker::from_id(self.read_u16()?)
    }

    #[inline(always)]
    fn read_tag(&mut self) -> Result<CompressType, Error> {
        CompressType::from_tag(self.read_u8()?)
    }

    /// Reads a tag and the value behind it, sign or zero extended according
    /// to the tag rather than to the type the caller wants.
    pub fn read_compressed(&mut self) -> Result<i128, Error> {
        let tag = self.read_tag()?;
        Ok(match tag {
            CompressType::Byte => self.read_u8()? as i128,
            CompressType::SByte => self.read_i8()? as i128,
            CompressType::Int16 => self.read_i16()? as i128,
            CompressType::UInt16 => self.read_u16()? as i128,
            CompressType::Int32 => self.read_i32()? as i128,
            CompressType::UInt32 => self.read_u32()? as i128,
            CompressType::Int64 => self.read_i64()? as i128,
            CompressType::UInt64 => self.read_u64()? as i128,
            CompressType::ByteString | CompressType::UInt16String => {
                return Err(Error::invalid_payload(format!(
                    "expected an integer tag, found {tag:?}"
                )));
            }
        })
    }

    impl_read_compressed! {
        read_compressed_u8 => u8,
        read_compressed_i8 => i8,
        read_compressed_u16 => u16,
        read_compressed_i16 => i16,
        read_compressed_u32 => u32,
        read_compressed_i32 => i32,
        read_compressed_u64 => u64,
        read_compressed_i64 => i64,
    }

    /// Mirror of [`Writer::write_length`].
    pub fn read_length(&mut self) -> Result<usize, Error> {
        let len = self.read_compressed_i32()?;
        ensure!(len >= 0, "negative length: {}", len);
        Ok(len as usize)
    }

    /// Reads a tagged string. A zero length yields `""`.
    pub fn read_string(&mut self) -> Result<String, Error> {
        let len = match self.read_tag()? {
            CompressType::ByteString => self.read_u8()? as usize,
            CompressType::UInt16String => self.read_u16()? as usize,
            tag => {
                return Err(Error::invalid_payload(format!(
                    "expected a string tag, found {tag:?}"
                )))
            }
        };
        let bytes = self.take(len)?;
        match self.encoding {
            TextEncoding::Utf8 => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|e| Error::invalid_payload(format!("invalid utf-8 string: {e}"))),
            TextEncoding::Utf16 => {
                ensure!(len % 2 == 0, "odd utf-16 byte length: {}", len);
                let units = bytes.chunks_exact(2).map(LittleEndian::read_u16);
                char::decode_utf16(units)
                    .collect::<Result<String, _>>()
                    .map_err(|e| Error::invalid_payload(format!("invalid utf-16 string: {e}")))
            }
        }
    }

    /// Mirror of [`Writer::write_bytes`].
    pub fn read_bytes(&mut self) -> Result<Vec<u8>, Error> {
        let len = self.read_length()?;
        Ok(self.take(len)?.to_vec())
    }

    /// Returns an enum discriminant as sign-extended bits.
    pub fn read_compressed_enum(&mut self, repr: EnumRepr) -> Result<u64, Error> {
        Ok(match repr {
            EnumRepr::U8 => self.read_u8()? as u64,
            EnumRepr::I8 => self.read_i8()? as i64 as u64,
            EnumRepr::U16 => self.read_u16()? as u64,
            EnumRepr::I16 => self.read_i16()? as i64 as u64,
            EnumRepr::U32 => self.read_compressed_u32()? as u64,
            EnumRepr::I32 => self.read_compressed_i32()? as i64 as u64,
            EnumRepr::U64 => self.read_compressed_u64()?,
            EnumRepr::I64 => self.read_compressed_i64()? as u64,
        })
    }
}
