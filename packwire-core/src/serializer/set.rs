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
use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;
use std::mem;

macro_rules! impl_set_serializer {
    ($set:ident, $($bound:path),+) => {
        impl<T: Serializer $(+ $bound)+> Serializer for $set<T> {
            fn write(&self, context: &mut WriteContext) -> Result<(), Error> {
                write_collection(self, context)
            }

            fn write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
                write_count(context, self.len())?;
                for item in self {
                    item.write(context)?;
                }
                Ok(())
            }

            fn read(context: &mut ReadContext) -> Result<Self, Error> {
                read_collection(context)
            }

            fn read_data(context: &mut ReadContext) -> Result<Self, Error> {
                let len = read_count(context)?;
                (0..len).map(|_| T::read(context)).collect()
            }

            fn null_encoding() -> NullEncoding {
                NullEncoding::Collection
            }

            fn shape() -> Shape {
                Shape::list(T::shape())
            }

            fn reserved_space() -> usize {
                SIZE_OF_MARKER + mem::size_of::<i32>()
            }
        }
    };
}

impl_set_serializer!(HashSet, Eq, Hash);
impl_set_serializer!(BTreeSet, Ord);
