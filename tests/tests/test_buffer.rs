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

use chrono::NaiveDate;
use packwire_core::buffer::{Reader, Writer};
use packwire_core::error::Error;
use packwire_core::packer::Packer;
use packwire_core::shape::Shape;
use packwire_core::types::{TextEncoding, TypeMarker};
use packwire_core::value::Value;
use rust_decimal::Decimal;
use std::str::FromStr;

#[test]
fn test_fixed_width_little_endian() {
    let mut writer = Writer::new(TextEncoding::Utf8);
    writer.write_bool(true);
    writer.write_i16(-2);
    writer.write_u32(0x0102_0304);
    writer.write_i64(-1);
    assert_eq!(
        writer.to_bytes(),
        [
            1, 0xfe, 0xff, 0x04, 0x03, 0x02, 0x01, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff
        ]
    );

    let bytes = writer.into_bytes();
    let mut reader = Reader::new(&bytes, TextEncoding::Utf8);
    assert!(reader.read_bool().unwrap());
    assert_eq!(reader.read_i16().unwrap(), -2);
    assert_eq!(reader.read_u32().unwrap(), 0x0102_0304);
    assert_eq!(reader.read_i64().unwrap(), -1);
    assert!(reader.is_end());
}

#[test]
fn test_floats_keep_their_bits() {
    let mut writer = Writer::new(TextEncoding::Utf8);
    writer.write_f32(1.5);
    writer.write_f64(f64::NAN);
    writer.write_f64(-0.0);
    let bytes = writer.into_bytes();
    assert_eq!(&bytes[..4], 1.5f32.to_le_bytes());

    let mut reader = Reader::new(&bytes, TextEncoding::Utf8);
    assert_eq!(reader.read_f32().unwrap(), 1.5);
    assert!(reader.read_f64().unwrap().is_nan());
    assert!(reader.read_f64().unwrap().is_sign_negative());
}

#[test]
fn test_markers() {
    let mut writer = Writer::new(TextEncoding::Utf8);
    writer.write_marker(TypeMarker::Null);
    writer.write_marker(TypeMarker::Nullable);
    writer.write_marker(TypeMarker::Collection);
    assert_eq!(writer.to_bytes(), [0, 0, 1, 0, 2, 0]);

    let bytes = [9, 0];
    let mut reader = Reader::new(&bytes, TextEncoding::Utf8);
    assert!(matches!(
        reader.read_marker(),
        Err(Error::UnknownTag(_, 9))
    ));
}

#[test]
fn test_growth_across_blocks() {
    let mut writer = Writer::with_block_size(TextEncoding::Utf8, 16);
    let data: Vec<u8> = (0..=255).collect();
    for chunk in data.chunks(7) {
        writer.write_raw(chunk);
    }
    writer.write_raw(&[]);
    assert_eq!(writer.len(), 256);
    assert_eq!(writer.to_bytes(), data);
}

#[test]
fn test_reset_and_copy_into() {
    let mut writer = Writer::new(TextEncoding::Utf8);
    writer.write_u8(9);
    writer.reset();
    assert!(writer.is_empty());
    writer.write_u16(0x0201);

    let mut out = vec![0xaa];
    writer.copy_into(&mut out);
    assert_eq!(out, [0xaa, 0x01, 0x02]);
    assert_eq!(writer.position(), 2);
}

#[test]
fn test_bytes() {
    let mut writer = Writer::new(TextEncoding::Utf8);
    writer.write_bytes(&[7, 8, 9]).unwrap();
    writer.write_bytes(&[]).unwrap();
    let bytes = writer.into_bytes();
    assert_eq!(bytes, [1, 3, 7, 8, 9, 1, 0]);

    let mut reader = Reader::new(&bytes, TextEncoding::Utf8);
    assert_eq!(reader.read_bytes().unwrap(), [7, 8, 9]);
    assert!(reader.read_bytes().unwrap().is_empty());
}

#[test]
fn test_negative_length_is_rejected() {
    let bytes = [1, 0xff];
    let mut reader = Reader::new(&bytes, TextEncoding::Utf8);
    assert!(reader.read_length().is_err());
}

#[test]
fn test_out_of_data() {
    let bytes = [1, 2, 3];
    let mut reader = Reader::new(&bytes, TextEncoding::Utf8);
    assert_eq!(reader.read_u16().unwrap(), 0x0201);
    assert!(matches!(
        reader.read_u32(),
        Err(Error::OutOfData(2, 4, 3))
    ));
    // a failed read does not move the cursor
    assert_eq!(reader.position(), 2);
    assert_eq!(reader.remaining(), 1);
}

#[test]
fn test_decimal() {
    let value = Decimal::from_str("-12345.6789").unwrap();
    let mut writer = Writer::new(TextEncoding::Utf8);
    writer.write_decimal(&value);
    let bytes = writer.into_bytes();
    assert_eq!(bytes.len(), 16);

    let mut reader = Reader::new(&bytes, TextEncoding::Utf8);
    assert_eq!(reader.read_decimal().unwrap(), value);
}

#[test]
fn test_decimal_with_corrupt_flags() {
    let mut bytes = Decimal::from_str("1.5").unwrap().serialize();
    bytes[2] = 200;
    let mut reader = Reader::new(&bytes, TextEncoding::Utf8);
    assert!(matches!(
        reader.read_decimal(),
        Err(Error::InvalidPayload(_))
    ));

    let mut bytes = Decimal::from_str("-1.5").unwrap().serialize();
    bytes[0] = 1;
    let mut reader = Reader::new(&bytes, TextEncoding::Utf8);
    assert!(matches!(
        reader.read_decimal(),
        Err(Error::InvalidPayload(_))
    ));

    let max_scale = Decimal::from_str("0.0000000000000000000000000001").unwrap();
    let bytes = max_scale.serialize();
    let mut reader = Reader::new(&bytes, TextEncoding::Utf8);
    assert_eq!(reader.read_decimal().unwrap(), max_scale);
}

#[test]
fn test_datetime_as_oa_date() {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let noon = NaiveDate::from_ymd_opt(1900, 1, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();

    let mut writer = Writer::new(TextEncoding::Utf8);
    writer.write_datetime(&epoch).unwrap();
    writer.write_datetime(&noon).unwrap();
    let bytes = writer.into_bytes();
    assert_eq!(&bytes[..8], 0.0f64.to_le_bytes());
    assert_eq!(&bytes[8..], 2.5f64.to_le_bytes());

    let mut reader = Reader::new(&bytes, TextEncoding::Utf8);
    assert_eq!(reader.read_datetime().unwrap(), epoch);
    assert_eq!(reader.read_datetime().unwrap(), noon);
}

#[test]
fn test_datetime_out_of_range() {
    let bytes = 1.0e9f64.to_le_bytes();
    let mut reader = Reader::new(&bytes, TextEncoding::Utf8);
    assert!(matches!(
        reader.read_datetime(),
        Err(Error::InvalidPayload(_))
    ));
}

#[test]
fn test_datetime_without_oa_date_writes_nothing() {
    let far_future = NaiveDate::from_ymd_opt(10000, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let antiquity = NaiveDate::from_ymd_opt(50, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let mut writer = Writer::new(TextEncoding::Utf8);
    for value in [far_future, antiquity] {
        assert!(matches!(
            writer.write_datetime(&value),
            Err(Error::InvalidPayload(_))
        ));
    }
    assert_eq!(writer.len(), 0);

    let packer = Packer::default();
    assert!(matches!(
        packer.serialize(&far_future),
        Err(Error::InvalidPayload(_))
    ));
    assert!(matches!(
        packer.serialize_value(&Shape::DateTime, &Value::DateTime(antiquity)),
        Err(Error::InvalidPayload(_))
    ));
}

#[test]
fn test_lone_surrogate_char() {
    let bytes = 0xd800u16.to_le_bytes();
    let mut reader = Reader::new(&bytes, TextEncoding::Utf8);
    assert!(reader.read_char().is_err());
}
