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

//! # Packwire
//!
//! A compact binary serialization engine. Integers are narrowed to the
//! smallest width that holds them and prefixed with a one-byte tag, strings
//! carry a tagged length, and composites are framed by a presence byte.
//!
//! There are two ways in:
//!
//! - **Typed**: implement [`Serializer`] with `#[derive(PackObject)]` and call
//!   [`Packer::serialize`] / [`Packer::deserialize`].
//! - **Dynamic**: describe the value with a [`Shape`], hold it as a
//!   [`Value`], and call [`Packer::serialize_value`] /
//!   [`Packer::deserialize_value`]. Types the shape vocabulary can not
//!   express plug in through [`CustomCodec`].
//!
//! ```rust
//! use packwire::{Packer, Shape, Value};
//!
//! let packer = Packer::default();
//! let shape = Shape::dict(Shape::String, Shape::I64);
//! let value = Value::Dict(vec![(Value::from("hits"), Value::I64(300))]);
//! let bytes = packer.serialize_value(&shape, &value).unwrap();
//! assert_eq!(packer.deserialize_value(&shape, &bytes).unwrap(), value);
//! ```
//!
//! The derive macro expands to paths under `::packwire_core`, so crates that
//! derive `PackObject` also depend on `packwire-core`.

pub use packwire_core::{
    buffer::{Reader, Writer},
    error::Error,
    CodecRegistry, CompositeShape, Config, CustomCodec, EnumRepr, FieldShape, NullEncoding,
    Packer, ReadContext, Serializer, Shape, ShapeRef, TextEncoding, TypeMarker, Value,
    WriteContext,
};
pub use packwire_derive::PackObject;
