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

use crate::error::Error;
use num_enum::{IntoPrimitive, TryFromPrimitive};

pub const SIZE_OF_BOOL: usize = 1;
pub const SIZE_OF_CHAR: usize = 2;
pub const SIZE_OF_DECIMAL: usize = 16;
pub const SIZE_OF_MARKER: usize = 2;
pub const SIZE_OF_TAG: usize = 1;

/// Largest string payload, in encoded bytes, the `UInt16String` tag can describe.
pub const MAX_STRING_BYTES: usize = u16::MAX as usize;

/// Tag byte written in front of a compressed integer or a string length.
///
/// The tag always names the narrowest width that held the value at encode
/// time; readers widen back to whatever type they were asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum CompressType {
    Byte = 0,
    SByte = 1,
    Int16 = 2,
    UInt16 = 3,
    Int32 = 4,
    UInt32 = 5,
    Int64 = 6,
    UInt64 = 7,
    ByteString = 8,
    UInt16String = 9,
}

impl CompressType {
    /// Number of payload bytes that follow the tag. For string tags this is
    /// the width of the length field.
    #[inline(always)]
    pub const fn payload_size(self) -> usize {
        match self {
            CompressType::Byte | CompressType::SByte | CompressType::ByteString => 1,
            CompressType::Int16 | CompressType::UInt16 | CompressType::UInt16String => 2,
            CompressType::Int32 | CompressType::UInt32 => 4,
            CompressType::Int64 | CompressType::UInt64 => 8,
        }
    }

    #[inline(always)]
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            CompressType::SByte | CompressType::Int16 | CompressType::Int32 | CompressType::Int64
        )
    }

    #[inline(always)]
    pub const fn is_string(self) -> bool {
        matches!(self, CompressType::ByteString | CompressType::UInt16String)
    }

    #[inline(always)]
    pub fn from_tag(tag: u8) -> Result<Self, Error> {
        CompressType::try_from(tag).map_err(|_| Error::unknown_tag("compress type", tag as u32))
    }
}

/// Two-byte discriminator used by the typed path for slots that may be absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum TypeMarker {
    Null = 0,
    Nullable = 1,
    Collection = 2,
}

impl TypeMarker {
    #[inline(always)]
    pub fn from_id(id: u16) -> Result<Self, Error> {
        TypeMarker::try_from(id).map_err(|_| Error::unknown_tag("type marker", id as u32))
    }
}

/// Text encoding used for string payloads. Writer and reader must agree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// UTF-16, little-endian code units.
    Utf16,
}

impl TextEncoding {
    /// Exact encoded byte length of `s`.
    #[inline]
    pub fn byte_count(self, s: &str) -> usize {
        match self {
            TextEncoding::Utf8 => s.len(),
            TextEncoding::Utf16 => s.encode_utf16().count() * 2,
        }
    }
}

/// Underlying integer type of an enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnumRepr {
    U8,
    I8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
}

impl EnumRepr {
    /// 8 and 16 bit enums are written raw, wider ones go through compression.
    #[inline(always)]
    pub const fn is_compressed(self) -> bool {
        matches!(
            self,
            EnumRepr::I32 | EnumRepr::U32 | EnumRepr::I64 | EnumRepr::U64
        )
    }

    #[inline(always)]
    pub const fn size(self) -> usize {
        match self {
            EnumRepr::U8 | EnumRepr::I8 => 1,
            EnumRepr::I16 | EnumRepr::U16 => 2,
            EnumRepr::I32 | EnumRepr::U32 => 4,
            EnumRepr::I64 | EnumRepr::U64 => 8,
        }
    }
}
