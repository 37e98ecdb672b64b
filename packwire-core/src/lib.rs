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

//! # Packwire Core
//!
//! Core of the packwire binary serialization engine: values are written as
//! compact little-endian bytes, with integers narrowed to the smallest width
//! that holds them behind a one-byte tag.
//!
//! ## Architecture
//!
//! - **`packer`**: the [`Packer`] entry point and its configuration
//! - **`buffer`**: [`Writer`](buffer::Writer) and [`Reader`](buffer::Reader), including the integer and string codec
//! - **`block_buffer`**: the block-allocated growable byte store behind a writer
//! - **`resolver`**: buffer pools, the custom codec registry and the read/write contexts
//! - **`serializer`**: the typed [`Serializer`] trait, its std impls and the dynamic path
//! - **`shape`** / **`value`**: declared shapes and runtime values for the dynamic path
//! - **`types`**: tags, markers and other wire constants
//! - **`error`**: the [`Error`] type
//!
//! ## Two encoding paths
//!
//! The typed path is what `#[derive(PackObject)]` produces. Fields are written
//! at their natural width, and nullable slots, collections and maps are framed
//! by a two-byte marker, so a `None` vector and an empty one differ on the wire.
//!
//! The dynamic path writes a [`Value`] against a [`Shape`]. Wide integers are
//! compressed and containers carry only a compressed count, so there a null
//! container and an empty one are the same bytes.
//!
//! ```rust
//! use packwire_core::{Packer, Shape, Value};
//!
//! let packer = Packer::default();
//! let shape = Shape::list(Shape::I32);
//! let bytes = packer
//!     .serialize_value(&shape, &Value::List(vec![Value::I32(200)]))
//!     .unwrap();
//! // count: tag SByte, 1; element: tag Byte, 200
//! assert_eq!(bytes, vec![1, 1, 0, 200]);
//! ```

pub mod block_buffer;
pub mod buffer;
pub mod config;
pub mod error;
pub mod packer;
pub mod resolver;
pub mod serializer;
pub mod shape;
pub mod types;
pub mod util;
pub mod value;

pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::packer::Packer;
pub use crate::resolver::context::{ReadContext, WriteContext};
pub use crate::resolver::registry::{CodecRegistry, CustomCodec};
pub use crate::serializer::{NullEncoding, Serializer};
pub use crate::shape::{CompositeShape, FieldShape, Shape, ShapeRef};
pub use crate::types::{CompressType, EnumRepr, TextEncoding, TypeMarker};
pub use crate::value::Value;
