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
use crate::serializer::{read_count, write_count, NullEncoding, Serializer};
use crate::shape::Shape;
use crate::types::{TypeMarker, SIZE_OF_MARKER};
use std::collections::VecDeque;
use std::mem;

/// Writes the `Collection` marker, then the payload.
#[inline(always)]
pub(super) fn write_collection<T: Serializer>(
    value: &T,
    context: &mut WriteContext,
) -> Result<(), Error> {
    context.writer.write_marker(TypeMarker::Collection);
    value.write_data(context)
}

/// A non-optional collection slot holding a `Null` marker reads as empty.
#[inline(always)]
pub(super) fn read_collection<T: Serializer + Default>(
    context: &mut ReadContext,
) -> Result<T, Error> {
    Ok(T::read_option(context)?.unwrap_or_default())
}

impl<T: Serializer> Serializer for Vec<T> {
    fn write(&self, context: &mut WriteContext) -> Result<(), Error> {
        write_collection(self, context)
    }

    fn write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        write_count(context, self.len())?;
        T::write_seq(self, context)
    }

    fn read(context: &mut ReadContext) -> Result<Self, Error> {
        read_collection(context)
    }

    fn read_data(context: &mut ReadContext) -> Result<Self, Error> {
        let len = read_count(context)?;
        T::read_seq(len, context)
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

impl<T: Serializer> Serializer for VecDeque<T> {
    fn write(&self, context: &mut WriteContext) -> Result<(), Error> {
        write_collection(self, context)
    }

    fn write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        write_count(context, self.len())?;
        let (front, back) = self.as_slices();
        T::write_seq(front, context)?;
        T::write_seq(back, context)
    }

    fn read(context: &mut ReadContext) -> Result<Self, Error> {
        read_collection(context)
    }

    fn read_data(context: &mut ReadContext) -> Result<Self, Error> {
        let len = read_count(context)?;
        Ok(T::read_seq(len, context)?.into())
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
