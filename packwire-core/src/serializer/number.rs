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

use crate::buffer::{Reader, Writer};
use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::Serializer;
use crate::shape::Shape;
use crate::types::SIZE_OF_DECIMAL;
use rust_decimal::Decimal;

macro_rules! impl_num_serializer {
    ($ty:ty, $writer:expr, $reader:expr, $shape:expr) => {
        impl Serializer for $ty {
            #[inline(always)]
            fn write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
                $writer(&mut context.writer, *self);
                Ok(())
            }

            #[inline(always)]
            fn read_data(context: &mut ReadContext) -> Result<Self, Error> {
                $reader(&mut context.reader)
            }

            #[inline(always)]
            fn shape() -> Shape {
                $shape
            }

            #[inline(always)]
            fn reserved_space() -> usize {
                std::mem::size_of::<$ty>()
            }
        }
    };
}

impl_num_serializer!(i8, Writer::write_i8, Reader::read_i8, Shape::I8);
impl_num_serializer!(i16, Writer::write_i16, Reader::read_i16, Shape::I16);
impl_num_serializer!(u16, Writer::write_u16, Reader::read_u16, Shape::U16);
impl_num_serializer!(i32, Writer::write_i32, Reader::read_i32, Shape::I32);
impl_num_serializer!(u32, Writer::write_u32, Reader::read_u32, Shape::U32);
impl_num_serializer!(i64, Writer::write_i64, Reader::read_i64, Shape::I64);
impl_num_serializer!(u64, Writer::write_u64, Reader::read_u64, Shape::U64);
impl_num_serializer!(f32, Writer::write_f32, Reader::read_f32, Shape::F32);
impl_num_serializer!(f64, Writer::write_f64, Reader::read_f64, Shape::F64);

impl Serializer for u8 {
    #[inline(always)]
    fn write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        context.writer.write_u8(*self);
        Ok(())
    }

    #[inline(always)]
    fn read_data(context: &mut ReadContext) -> Result<Self, Error> {
        context.reader.read_u8()
    }

    fn shape() -> Shape {
        Shape::U8
    }

    fn reserved_space() -> usize {
        1
    }

    fn write_seq(items: &[u8], context: &mut WriteContext) -> Result<(), Error> {
        context.writer.write_raw(items);
        Ok(())
    }

    fn read_seq(len: usize, context: &mut ReadContext) -> Result<Vec<u8>, Error> {
        Ok(context.reader.read_raw(len)?.to_vec())
    }
}

impl Serializer for Decimal {
    fn write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        context.writer.write_decimal(self);
        Ok(())
    }

    fn read_data(context: &mut ReadContext) -> Result<Self, Error> {
        context.reader.read_decimal()
    }

    fn shape() -> Shape {
        Shape::Decimal
    }

    fn reserved_space() -> usize {
        SIZE_OF_DECIMAL
    }
}
