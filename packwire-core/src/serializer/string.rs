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
use crate::types::{SIZE_OF_CHAR, SIZE_OF_TAG};

// A string slot has no marker; an absent string is written as the empty one,
// so `None` reads back as `Some("")`.
impl Serializer for String {
    #[inline]
    fn write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        context.writer.write_str(Some(self))
    }

    #[inline]
    fn read_data(context: &mut ReadContext) -> Result<Self, Error> {
        context.reader.read_string()
    }

    fn null_encoding() -> NullEncoding {
        NullEncoding::Collapsed
    }

    fn write_none(context: &mut WriteContext) -> Result<(), Error> {
        context.writer.write_str(None)
    }

    fn shape() -> Shape {
        Shape::String
    }

    #[inline]
    fn reserved_space() -> usize {
        SIZE_OF_TAG + 1
    }
}

impl Serializer for char {
    fn write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        context.writer.write_char(*self)
    }

    fn read_data(context: &mut ReadContext) -> Result<Self, Error> {
        context.reader.read_char()
    }

    fn shape() -> Shape {
        Shape::Char
    }

    fn reserved_space() -> usize {
        SIZE_OF_CHAR
    }
}
