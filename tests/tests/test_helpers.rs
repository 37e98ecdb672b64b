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

use packwire_core::{Packer, Serializer};

/// Generic helper function for roundtrip serialization testing
#[allow(dead_code)]
pub fn test_roundtrip<T>(packer: &Packer, value: T)
where
    T: Serializer + PartialEq + std::fmt::Debug,
{
    let bytes = packer.serialize(&value).unwrap();
    let result: T = packer.deserialize(&bytes).unwrap();
    assert_eq!(value, result);
}

/// Asserts the exact payload of `value`, then reads it back.
#[allow(dead_code)]
pub fn assert_bytes<T>(packer: &Packer, value: T, expected: &[u8])
where
    T: Serializer + PartialEq + std::fmt::Debug,
{
    let bytes = packer.serialize(&value).unwrap();
    assert_eq!(bytes, expected, "payload of {value:?}");
    let result: T = packer.deserialize(&bytes).unwrap();
    assert_eq!(value, result);
}
