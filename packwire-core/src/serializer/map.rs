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
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::list::{read_collection, write_collection};
use crate::serializer::{read_count, write_count, NullEncoding, Serializer};
use crate::shape::Shape;
use crate::types::SIZE_OF_MARKER;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::mem;

// Entries are written key then value, in the map's iteration order.
macro_rules! impl_map_serializer {
    ($map:ident, $($bound:path),+) => {
        impl<K: Serializer $(+ $bound)+, V: Serializer> Serializer for $map<K, V> {
            fn write(&self, context: &mut WriteContext) -> Result<(), Error> {
                write_collection(self, context)
            }

            fn write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
                write_count(context, self.len())?;
                for (k, v) in self {
                    k.write(context)?;
                    v.write(context)?;
                }
                Ok(())
            }

            fn read(context: &mut ReadContext) -> Result<Self, Error> {
                read_collection(context)
            }

            fn read_data(context: &mut ReadContext) -> Result<Self, Error> {
                let len = read_count(context)?;
                (0..len)
                    .map(|_| {
                        let key = K::read(context)?;
                        let value = V::read(context)?;
                        Ok::<_, Error>((key, value))
                    })
                    .collect()
            }

            fn null_encoding() -> NullEncoding {
                NullEncoding::Collection
            }

            fn shape() -> Shape {
                Shape::dict(K::shape(), V::shape())
            }

            fn reserved_space() -> usize {
                SIZE_OF_MARKER + mem::size_of::<i32>()
            }
        }
    };
}

impl_map_serializer!(HashMap, Eq, Hash);
impl_map_serializer!(BTreeMap, Ord);
