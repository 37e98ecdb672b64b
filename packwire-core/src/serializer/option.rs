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
use crate::serializer::{NullEncoding, Serializer};
use crate::shape::Shape;
use crate::types::SIZE_OF_MARKER;

impl<T: Serializer> Serializer for Option<T> {
    #[inline(always)]
    fn write(&self, context: &mut WriteContext) -> Result<(), Error> {
        T::write_option(self.as_ref(), context)
    }

    #[inline(always)]
    fn write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        self.write(context)
    }

    #[inline(always)]
    fn read(context: &mut ReadContext) -> Result<Self, Error> {
        T::read_option(context)
    }

    #[inline(always)]
    fn read_data(context: &mut ReadContext) -> Result<Self, Error> {
        Self::read(context)
    }

    /// Only value types gain a wrapper on the dynamic path. Composites,
    /// collections and strings already have a null form of their own.
    fn shape() -> Shape {
        match T::null_encoding() {
            NullEncoding::Marker => Shape::nullable(T::shape()),
            _ => T::shape(),
        }
    }

    fn reserved_space() -> usize {
        SIZE_OF_MARKER + T::reserved_space()
    }
}
