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

mod test_helpers;

use packwire_core::error::Error;
use packwire_core::shape::Shape;
use packwire_core::types::EnumRepr;
use packwire_core::{Packer, Serializer};
use packwire_derive::PackObject;
use test_helpers::{assert_bytes, test_roundtrip};

#[derive(PackObject, Debug, PartialEq, Clone, Copy)]
enum Color {
    Red,
    Green,
    Blue = 300,
}

#[derive(PackObject, Debug, PartialEq)]
#[repr(u8)]
enum Level {
    Low = 1,
    High = 200,
}

#[derive(PackObject, Debug, PartialEq)]
#[repr(i64)]
enum Offset {
    Behind = -5_000_000_000,
    Zero = 0,
}

#[derive(PackObject, Debug, PartialEq)]
struct Pixel {
    color: Color,
    level: Option<Level>,
}

#[test]
fn test_default_repr_is_compressed_i32() {
    let packer = Packer::default();
    assert_bytes(&packer, Color::Red, &[1, 0]);
    assert_bytes(&packer, Color::Green, &[1, 1]);
    assert_bytes(&packer, Color::Blue, &[2, 0x2c, 0x01]);
    assert_eq!(Color::shape(), Shape::Enum(EnumRepr::I32));
}

#[test]
fn test_narrow_repr_is_raw() {
    let packer = Packer::default();
    assert_bytes(&packer, Level::High, &[200]);
    assert_eq!(Level::shape(), Shape::Enum(EnumRepr::U8));
}

#[test]
fn test_wide_negative_discriminant() {
    let packer = Packer::default();
    test_roundtrip(&packer, Offset::Behind);
    let bytes = packer.serialize(&Offset::Behind).unwrap();
    assert_eq!(bytes[0], 6);
}

#[test]
fn test_enum_fields() {
    let packer = Packer::default();
    test_roundtrip(
        &packer,
        Pixel {
            color: Color::Blue,
            level: Some(Level::Low),
        },
    );
    assert_bytes(
        &packer,
        Pixel {
            color: Color::Green,
            level: None,
        },
        &[1, 1, 1, 0, 0],
    );
    test_roundtrip(&packer, vec![Color::Red, Color::Blue, Color::Red]);
}

#[test]
fn test_unknown_discriminant() {
    let packer = Packer::default();
    let err = packer.deserialize::<Color>(&[1, 7]).unwrap_err();
    assert!(matches!(err, Error::UnknownEnum(_)));
    assert!(err.to_string().contains("Color"));

    assert!(matches!(
        packer.deserialize::<Level>(&[2]),
        Err(Error::UnknownEnum(_))
    ));
}
