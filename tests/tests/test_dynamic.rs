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

use packwire_core::error::Error;
use packwire_core::shape::{FieldShape, Shape};
use packwire_core::types::EnumRepr;
use packwire_core::{CustomCodec, Packer, Serializer, Value};
use packwire_derive::PackObject;

fn roundtrip(packer: &Packer, shape: &Shape, value: Value) -> Vec<u8> {
    let bytes = packer.serialize_value(shape, &value).unwrap();
    assert_eq!(packer.deserialize_value(shape, &bytes).unwrap(), value);
    bytes
}

fn point_shape() -> Shape {
    Shape::composite(
        "Point",
        vec![
            FieldShape::new("x", Shape::I32),
            FieldShape::new("label", Shape::String),
        ],
    )
}

#[test]
fn test_list_of_ints() {
    let packer = Packer::default();
    let shape = Shape::list(Shape::I32);
    let bytes = roundtrip(
        &packer,
        &shape,
        Value::List(vec![Value::I32(200), Value::I32(-3)]),
    );
    assert_eq!(bytes, [1, 2, 0, 200, 1, 0xfd]);
}

#[test]
fn test_wide_ints_are_compressed_narrow_ones_raw() {
    let packer = Packer::default();
    assert_eq!(roundtrip(&packer, &Shape::U64, Value::U64(7)), [0, 7]);
    assert_eq!(roundtrip(&packer, &Shape::I64, Value::I64(-1)), [1, 0xff]);
    assert_eq!(roundtrip(&packer, &Shape::U16, Value::U16(7)), [7, 0]);
    assert_eq!(roundtrip(&packer, &Shape::I8, Value::I8(-1)), [0xff]);
    assert_eq!(roundtrip(&packer, &Shape::Bool, Value::Bool(true)), [1]);
}

#[test]
fn test_nullable() {
    let packer = Packer::default();
    let shape = Shape::nullable(Shape::I32);
    assert_eq!(roundtrip(&packer, &shape, Value::Null), [0, 0]);
    assert_eq!(roundtrip(&packer, &shape, Value::I32(5)), [1, 0, 1, 5]);
}

#[test]
fn test_null_string_reads_as_empty() {
    let packer = Packer::default();
    let bytes = packer.serialize_value(&Shape::String, &Value::Null).unwrap();
    assert_eq!(bytes, [8, 0]);
    assert_eq!(
        packer.deserialize_value(&Shape::String, &bytes).unwrap(),
        Value::String(String::new())
    );
}

#[test]
fn test_null_collection_is_empty() {
    let packer = Packer::default();
    let shape = Shape::list(Shape::String);
    let bytes = packer.serialize_value(&shape, &Value::Null).unwrap();
    assert_eq!(bytes, [1, 0]);
    assert_eq!(
        packer.deserialize_value(&shape, &bytes).unwrap(),
        Value::List(vec![])
    );
}

#[test]
fn test_byte_arrays() {
    let packer = Packer::default();
    let shape = Shape::array(Shape::U8);
    assert_eq!(
        roundtrip(&packer, &shape, Value::Bytes(vec![1, 2])),
        [1, 2, 1, 2]
    );
}

#[test]
fn test_dictionary() {
    let packer = Packer::default();
    let shape = Shape::dict(Shape::String, Shape::list(Shape::F64));
    let value = Value::Dict(vec![
        (Value::from("a"), Value::List(vec![Value::F64(0.5)])),
        (Value::from("b"), Value::List(vec![])),
    ]);
    let bytes = roundtrip(&packer, &shape, value);
    assert_eq!(&bytes[..4], [1, 2, 8, 1]);
}

#[test]
fn test_enum() {
    let packer = Packer::default();
    let shape = Shape::Enum(EnumRepr::I32);
    assert_eq!(roundtrip(&packer, &shape, Value::Enum(300)), [2, 0x2c, 0x01]);
    let shape = Shape::Enum(EnumRepr::I8);
    assert_eq!(roundtrip(&packer, &shape, Value::Enum(-2i64 as u64)), [0xfe]);
}

#[test]
fn test_composite_fallback() {
    let packer = Packer::default();
    let shape = point_shape();
    let bytes = roundtrip(
        &packer,
        &shape,
        Value::Composite(vec![Value::I32(5), Value::from("a")]),
    );
    assert_eq!(bytes, [1, 1, 5, 8, 1, b'a']);
    assert_eq!(roundtrip(&packer, &shape, Value::Null), [0]);

    let short = Value::Composite(vec![Value::I32(5)]);
    assert!(packer.serialize_value(&shape, &short).is_err());
}

#[test]
fn test_custom_codec_takes_precedence() {
    let mut packer = Packer::default();
    packer.register_custom(
        "Point",
        CustomCodec::new(
            |value, context| match value {
                Value::Composite(fields) => match fields.as_slice() {
                    [Value::I32(x), _] => {
                        context.writer.write_i32(*x);
                        Ok(())
                    }
                    _ => Err(Error::invalid_payload("bad point")),
                },
                _ => Err(Error::invalid_payload("bad point")),
            },
            |context| {
                let x = context.reader.read_i32()?;
                Ok(Value::Composite(vec![Value::I32(x), Value::from("")]))
            },
        ),
    );
    assert_eq!(packer.registry().codec_count(), 1);

    let bytes = roundtrip(
        &packer,
        &point_shape(),
        Value::Composite(vec![Value::I32(5), Value::from("")]),
    );
    assert_eq!(bytes, [5, 0, 0, 0]);
}

#[test]
fn test_custom_shape_needs_a_codec() {
    let packer = Packer::default();
    let shape = Shape::custom("Uuid");
    assert!(matches!(
        packer.serialize_value(&shape, &Value::Bytes(vec![0; 16])),
        Err(Error::UnsupportedShape(_))
    ));
    assert!(matches!(
        packer.deserialize_value(&shape, &[0]),
        Err(Error::UnsupportedShape(_))
    ));
}

#[test]
fn test_multidimensional_array() {
    let packer = Packer::default();
    let shape = Shape::Array {
        elem: Box::new(Shape::I32),
        rank: 2,
    };
    assert!(matches!(
        packer.serialize_value(&shape, &Value::List(vec![])),
        Err(Error::UnsupportedShape(_))
    ));
}

#[test]
fn test_value_shape_mismatch() {
    let packer = Packer::default();
    let shape = Shape::dict(Shape::I32, Shape::I32);
    assert!(matches!(
        packer.serialize_value(&shape, &Value::List(vec![])),
        Err(Error::InvalidPayload(_))
    ));

    // a primitive slot only accepts its own value kind
    for (shape, value) in [
        (Shape::I32, Value::I16(300)),
        (Shape::Bool, Value::from("hello")),
        (Shape::U64, Value::I64(1)),
        (Shape::F32, Value::F64(0.5)),
        (Shape::I32, Value::Null),
        (Shape::String, Value::Char('a')),
    ] {
        assert!(matches!(
            packer.serialize_value(&shape, &value),
            Err(Error::InvalidPayload(_))
        ));
    }
    let list = Shape::list(Shape::I32);
    assert!(matches!(
        packer.serialize_value(&list, &Value::List(vec![Value::I32(1), Value::U8(2)])),
        Err(Error::InvalidPayload(_))
    ));
}

#[test]
fn test_depth_limit() {
    let packer = Packer::default().max_depth(3);
    let shape = Shape::list(Shape::list(Shape::list(Shape::list(Shape::I32))));
    let value = Value::List(vec![Value::List(vec![Value::List(vec![Value::List(
        vec![Value::I32(1)],
    )])])]);
    assert!(matches!(
        packer.serialize_value(&shape, &value),
        Err(Error::DepthExceed(_))
    ));
    assert!(Packer::default().serialize_value(&shape, &value).is_ok());
}

#[derive(PackObject, Debug, PartialEq)]
struct Reading {
    sensor: u16,
    values: Vec<i64>,
    note: Option<i32>,
}

#[test]
fn test_registered_type_shape() {
    let mut packer = Packer::default();
    assert!(matches!(
        packer.shape_of::<Reading>(),
        Err(Error::NotRegistered(_))
    ));
    packer.register::<Reading>();
    let shape = packer.shape_of::<Reading>().unwrap();
    assert_eq!(shape, Reading::shape());

    let value = Value::Composite(vec![
        Value::U16(3),
        Value::List(vec![Value::I64(1), Value::I64(1 << 40)]),
        Value::Null,
    ]);
    let bytes = roundtrip(&packer, &shape, value);
    assert_eq!(&bytes[..3], [1, 3, 0]);
}

#[derive(PackObject, Debug, PartialEq)]
struct Category {
    id: i32,
    subcategories: Vec<Category>,
}

#[derive(PackObject, Debug, PartialEq)]
struct Catalog {
    roots: Vec<Category>,
}

fn category(id: i32, subcategories: Vec<Value>) -> Value {
    Value::Composite(vec![Value::I32(id), Value::List(subcategories)])
}

#[test]
fn test_recursive_registered_type() {
    let mut packer = Packer::default();
    packer.register::<Category>();
    let shape = packer.shape_of::<Category>().unwrap();

    let value = category(1, vec![category(2, vec![])]);
    let bytes = roundtrip(&packer, &shape, value);
    assert_eq!(bytes, [1, 1, 1, 1, 1, 1, 1, 2, 1, 0]);

    let deep = category(1, vec![category(2, vec![category(3, vec![])])]);
    roundtrip(&packer, &shape, deep);
}

#[test]
fn test_recursive_type_inside_another() {
    // only the outer type is registered; the inner reference is rebuilt
    let mut packer = Packer::default();
    packer.register::<Catalog>();
    let shape = packer.shape_of::<Catalog>().unwrap();

    let value = Value::Composite(vec![Value::List(vec![
        category(1, vec![category(2, vec![])]),
        category(3, vec![]),
    ])]);
    roundtrip(&packer, &shape, value);
}
