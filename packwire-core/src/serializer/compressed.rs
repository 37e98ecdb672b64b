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

/// Integers written through the tag-prefixed compression codec, used by
/// fields marked `#[packwire(compress)]`.
pub trait CompressedInt: Sized {
    fn write_compressed(&self, writer: &mut Writer);

    fn read_compressed(reader: &mut Reader) -> Result<Self, Error>;
}

macro_rules! impl_compressed_int {
    ($($ty:ty => $write:ident, $read:ident);* $(;)?) => {
        $(
            impl CompressedInt for $ty {
                #[inline(always)]
                fn write_compressed(&self, writer: &mut Writer) {
                    writer.$write(*self);
                }

                #[inline(always)]
                fn read_compressed(reader: &mut Reader) -> Result<Self, Error> {
                    reader.$read()
                }
            }
        )*
    };
}

impl_compressed_int! {
    u8 => compress_and_write_u8, read_compressed_u8;
    i8 => compress_and_write_i8, read_compressed_i8;
    u16 => compress_and_write_u16, read_compressed_u16;
    i16 => compress_and_write_i16, read_compressed_i16;
    u32 => compress_and_write_u32, read_compressed_u32;
    i32 => compress_and_write_i32, read_compressed_i32;
    u64 => compress_and_write_u64, read_compressed_u64;
    i64 => compress_and_write_i64, read_compressed_i64;
}

#[inline(always)]
pub fn write<T: CompressedInt>(value: &T, context: &mut WriteContext) -> Result<(), Error> {
    value.write_compressed(&mut context.writer);
    Ok(())
}

#[inline(always)]
pub fn read<T: CompressedInt>(context: &mut ReadContext) -> Result<T, Error> {
    T::read_compressed(&mut context.reader)
}
