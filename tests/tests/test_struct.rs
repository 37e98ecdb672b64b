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

use chrono::{NaiveDate, NaiveDateTime};
use packwire_core::error::Error;
use packwire_core::shape::{FieldShape, Shape, ShapeRef};
use packwire_core::{Packer, Serializer};
use packwire_derive::PackObject;
use rust_decimal::Decimal;
use std::any::TypeId;
use std::collections::HashMap;
use test_helpers::{assert_bytes, test_roundtrip};

#[derive(PackObject, Debug, PartialEq)]
struct AccountMerge {
    old_account_id: i32,
    new_account_id: i32,
    merge_date: NaiveDateTime,
}

#[derive(PackObject, Debug, PartialEq, Default)]
struct Address {
    street: String,
    zip: Option<u32>,
}

#[derive(PackObject, Debug, PartialEq)]
struct Person {
    name: String,
    #[packwire(compress)]
    age: i64,
    home: Address,
    previous: Option<Address>,
    tags: Vec<String>,
    scores: HashMap<String, f32>,
    balance: Decimal,
}

#[derive(PackObject, Debug, PartialEq)]
struct Point(i16, i16);

#[derive(PackObject, Debug, PartialEq)]
struct Marker;

#[derive(PackObject, Debug, PartialEq)]
struct Wrapper<T> {
    inner: T,
    count: u8,
}

#[derive(PackObject, Debug, PartialEq)]
struct Cached {
    id: u64,
    #[packwire(skip)]
    label: String,
    #[packwire(compress)]
    version: u32,
}

fn merge_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 6, 15)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap()
}

#[test]
fn test_account_merge_layout() {
    let packer = Packer::default();
    let merge = AccountMerge {
        old_account_id: 5,
        new_account_id: 9,
        merge_date: merge_date(),
    };

    let mut expected = vec![1u8];
    expected.extend_from_slice(&5i32.to_le_bytes());
    expected.extend_from_slice(&9i32.to_le_bytes());
    expected.extend_from_slice(&packwire_core::util::to_oa_date(&merge_date()).unwrap().to_le_bytes());
    assert_bytes(&packer, merge, &expected);
}

#[test]
fn test_nested_composites() {
    let packer = Packer::default();
    let person = Person {
        name: "Ada".to_string(),
        age: 36,
        home: Address {
            street: "Main".to_string(),
            zip: Some(12345),
        },
        previous: None,
        tags: vec!["math".to_string(), "engines".to_string()],
        scores: HashMap::from([("x".to_string(), 1.5)]),
        balance: Decimal::new(-1050, 2),
    };
    test_roundtrip(&packer, person);
}

#[test]
fn test_absent_composite() {
    let packer = Packer::default();
    assert_bytes(&packer, None::<Address>, &[0]);
    assert_bytes(
        &packer,
        Some(Address::default()),
        &[1, 8, 0, 0, 0],
    );

    // a required composite can not be absent
    let err = packer.deserialize::<Address>(&[0]).unwrap_err();
    assert!(matches!(err, Error::InvalidPayload(_)));
}

#[test]
fn test_tuple_and_unit_structs() {
    let packer = Packer::default();
    assert_bytes(&packer, Point(1, -1), &[1, 1, 0, 0xff, 0xff]);
    assert_bytes(&packer, Marker, &[1]);
    test_roundtrip(&packer, vec![Point(3, 4), Point(-5, 6)]);
}

#[test]
fn test_generic_struct() {
    let packer = Packer::default();
    test_roundtrip(
        &packer,
        Wrapper {
            inner: vec![Point(0, 0)],
            count: 1,
        },
    );
    test_roundtrip(
        &packer,
        Wrapper {
            inner: Some('q'),
            count: 2,
        },
    );
}

#[test]
fn test_skip_and_compress() {
    let packer = Packer::default();
    let value = Cached {
        id: 7,
        label: "not written".to_string(),
        version: 300,
    };
    let bytes = packer.serialize(&value).unwrap();
    let mut expected = vec![1u8];
    expected.extend_from_slice(&7u64.to_le_bytes());
    expected.extend_from_slice(&[3, 0x2c, 0x01]);
    assert_eq!(bytes, expected);

    let back: Cached = packer.deserialize(&bytes).unwrap();
    assert_eq!(back.id, 7);
    assert_eq!(back.label, "");
    assert_eq!(back.version, 300);
}

#[test]
fn test_derived_shape() {
    assert_eq!(
        Cached::shape(),
        Shape::composite(
            "Cached",
            vec![
                FieldShape::new("id", Shape::U64),
                FieldShape::new("version", Shape::U32),
            ],
        )
    );
    assert_eq!(
        Point::shape(),
        Shape::composite(
            "Point",
            vec![
                FieldShape::new("0", Shape::I16),
                FieldShape::new("1", Shape::I16),
            ],
        )
    );
    // composites carry their own null form
    assert_eq!(Option::<Address>::shape(), Address::shape());
    assert_eq!(Option::<i32>::shape(), Shape::nullable(Shape::I32));
}

#[derive(PackObject, Debug, PartialEq)]
struct TreeNode {
    id: i32,
    children: Vec<TreeNode>,
}

#[test]
fn test_self_referential_struct() {
    let packer = Packer::default();
    let leaf = |id| TreeNode {
        id,
        children: vec![],
    };
    test_roundtrip(
        &packer,
        TreeNode {
            id: 1,
            children: vec![
                leaf(2),
                TreeNode {
                    id: 3,
                    children: vec![leaf(4)],
                },
            ],
        },
    );

    // the repeat inside its own fields stops at a reference
    assert_eq!(
        TreeNode::shape(),
        Shape::composite(
            "TreeNode",
            vec![
                FieldShape::new("id", Shape::I32),
                FieldShape::new(
                    "children",
                    Shape::list(Shape::Ref(ShapeRef::new(
                        "TreeNode",
                        TypeId::of::<TreeNode>(),
                        TreeNode::shape,
                    ))),
                ),
            ],
        )
    );
}

#[test]
fn test_reserved_space() {
    assert_eq!(AccountMerge::reserved_space(), 1 + 4 + 4 + 8);
}

#[test]
fn test_truncated_struct() {
    let packer = Packer::default();
    let bytes = packer
        .serialize(&AccountMerge {
            old_account_id: 1,
            new_account_id: 2,
            merge_date: merge_date(),
        })
        .unwrap();
    let result = packer.deserialize::<AccountMerge>(&bytes[..bytes.len() - 1]);
    assert!(matches!(result, Err(Error::OutOfData(..))));
}
