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

use packwire_core::buffer::{Reader, Writer};
use packwire_core::error::Error;
use packwire_core::types::{CompressType, EnumRepr, TextEncoding};

fn written(f: impl FnOnce(&mut Writer)) -> Vec<u8> {
    let mut writer = Writer::new(TextEncoding::Utf8);
    f(&mut writer);
    writer.into_bytes()
}

#[test]
fn test_unsigned_narrowing() {
    assert_eq!(written(|w| w.compress_and_write_u64(5)), [0, 5]);
    assert_eq!(written(|w| w.compress_and_write_u64(255)), [0, 255]);
    assert_eq!(written(|w| w.compress_and_write_u64(300)), [3, 0x2c, 0x01]);
    assert_eq!(
        written(|w| w.compress_and_write_u64(70_000)),
        [5, 0x70, 0x11, 0x01, 0x00]
    );
    assert_eq!(
        written(|w| w.compress_and_write_u64(u64::MAX)),
        [7, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
    );
    assert_eq!(written(|w| w.compress_and_write_u32(65_535)), [3, 0xff, 0xff]);
    assert_eq!(written(|w| w.compress_and_write_u8(7)), [0, 7]);
}

#[test]
fn test_signed_non_negative() {
    assert_eq!(written(|w| w.compress_and_write_i32(0)), [1, 0]);
    assert_eq!(written(|w| w.compress_and_write_i32(127)), [1, 127]);
    // 128..=255 fit an unsigned byte
    assert_eq!(written(|w| w.compress_and_write_i32(128)), [0, 128]);
    assert_eq!(written(|w| w.compress_and_write_i32(200)), [0, 200]);
    assert_eq!(written(|w| w.compress_and_write_i32(300)), [2, 0x2c, 0x01]);
    assert_eq!(
        written(|w| w.compress_and_write_i32(40_000)),
        [4, 0x40, 0x9c, 0x00, 0x00]
    );
    assert_eq!(
        written(|w| w.compress_and_write_i64(i32::MAX as i64 + 1)),
        [6, 0x00, 0x00, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00]
    );
    assert_eq!(written(|w| w.compress_and_write_i16(255)), [0, 255]);
    assert_eq!(written(|w| w.compress_and_write_i16(256)), [2, 0x00, 0x01]);
}

#[test]
fn test_signed_negative() {
    assert_eq!(written(|w| w.compress_and_write_i32(-1)), [1, 0xff]);
    assert_eq!(written(|w| w.compress_and_write_i32(-128)), [1, 0x80]);
    assert_eq!(written(|w| w.compress_and_write_i32(-200)), [2, 0x38, 0xff]);
    assert_eq!(
        written(|w| w.compress_and_write_i32(-40_000)),
        [4, 0xc0, 0x63, 0xff, 0xff]
    );
    assert_eq!(
        written(|w| w.compress_and_write_i64(i64::MIN)),
        [6, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80]
    );
    assert_eq!(written(|w| w.compress_and_write_i8(-5)), [1, 0xfb]);
}

#[test]
fn test_boundaries_read_back() {
    let signed = [
        0i64,
        1,
        -1,
        i8::MIN as i64,
        i8::MAX as i64,
        i8::MAX as i64 + 1,
        u8::MAX as i64,
        u8::MAX as i64 + 1,
        i16::MIN as i64,
        i16::MIN as i64 - 1,
        i16::MAX as i64,
        i32::MIN as i64,
        i32::MIN as i64 - 1,
        i32::MAX as i64,
        i64::MIN,
        i64::MAX,
    ];
    let bytes = written(|w| {
        for v in signed {
            w.compress_and_write_i64(v);
        }
    });
    let mut reader = Reader::new(&bytes, TextEncoding::Utf8);
    for v in signed {
        assert_eq!(reader.read_compressed_i64().unwrap(), v);
    }
    assert!(reader.is_end());

    let unsigned = [0u64, 255, 256, 65_535, 65_536, u32::MAX as u64, u64::MAX];
    let bytes = written(|w| {
        for v in unsigned {
            w.compress_and_write_u64(v);
        }
    });
    let mut reader = Reader::new(&bytes, TextEncoding::Utf8);
    for v in unsigned {
        assert_eq!(reader.read_compressed_u64().unwrap(), v);
    }
}

#[test]
fn test_narrow_read_rejects_overflow() {
    let bytes = written(|w| w.compress_and_write_u32(300));
    let mut reader = Reader::new(&bytes, TextEncoding::Utf8);
    assert!(matches!(
        reader.read_compressed_u8(),
        Err(Error::InvalidPayload(_))
    ));

    let bytes = written(|w| w.compress_and_write_i32(-1));
    let mut reader = Reader::new(&bytes, TextEncoding::Utf8);
    assert!(reader.read_compressed_u32().is_err());
}

#[test]
fn test_string_tag_is_not_an_integer() {
    let bytes = [u8::from(CompressType::ByteString), 0];
    let mut reader = Reader::new(&bytes, TextEncoding::Utf8);
    assert!(matches!(
        reader.read_compressed(),
        Err(Error::InvalidPayload(_))
    ));
}

#[test]
fn test_unknown_tag() {
    let bytes = [42u8, 0];
    let mut reader = Reader::new(&bytes, TextEncoding::Utf8);
    assert!(matches!(
        reader.read_compressed_i32(),
        Err(Error::UnknownTag(_, 42))
    ));
}

#[test]
fn test_truncated_value() {
    let bytes = [u8::from(CompressType::Int32), 1, 2];
    let mut reader = Reader::new(&bytes, TextEncoding::Utf8);
    assert!(matches!(
        reader.read_compressed_i32(),
        Err(Error::OutOfData(1, 4, 3))
    ));
}

#[test]
fn test_enum_discriminants() {
    // narrow enums are raw, wide ones compressed
    assert_eq!(written(|w| w.compress_and_write_enum(EnumRepr::U8, 3)), [3]);
    assert_eq!(
        written(|w| w.compress_and_write_enum(EnumRepr::I16, -2i64 as u64)),
        [0xfe, 0xff]
    );
    assert_eq!(written(|w| w.compress_and_write_enum(EnumRepr::I32, 3)), [1, 3]);
    assert_eq!(
        written(|w| w.compress_and_write_enum(EnumRepr::I64, -1i64 as u64)),
        [1, 0xff]
    );

    let bytes = written(|w| w.compress_and_write_enum(EnumRepr::I32, -7i64 as u64));
    let mut reader = Reader::new(&bytes, TextEncoding::Utf8);
    assert_eq!(
        reader.read_compressed_enum(EnumRepr::I32).unwrap(),
        -7i64 as u64
    );
}
