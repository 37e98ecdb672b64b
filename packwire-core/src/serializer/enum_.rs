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

//! Support code for `#[derive(PackObject)]` on fieldless enums.

use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::types::EnumRepr;

/// An integer type usable as the underlying type of an enum.
pub trait EnumBits: Copy + std::fmt::Display + PartialEq + 'static {
    const REPR: EnumRepr;

    /// Sign-extended to 64 bits.
    fn to_bits(self) -> u64;

    fn from_bits(bits: u64) -> Self;
}

macro_rules! impl_enum_bits {
    ($($ty:ty => $repr:ident, $wide:ty);* $(;)?) => {
        $(
            impl EnumBits for $ty {
                const REPR: EnumRepr = EnumRepr::$repr;

                #[inline(always)]
                fn to_bits(self) -> u64 {
                    self as $wide as u64
                }

                #[inline(always)]
                fn from_bits(bits: u64) -> Self {
                    bits as $ty
                }
            }
        )*
    };
}

impl_enum_bits! {
    u8 => U8, u64;
    i8 => I8, i64;
    u16 => U16, u64;
    i16 => I16, i64;
    u32 => U32, u64;
    i32 => I32, i64;
    u64 => U64, u64;
    i64 => I64, i64;
}

#[inline(always)]
pub fn write<R: EnumBits>(discriminant: R, context: &mut WriteContext) -> Result<(), Error> {
    context
        .writer
        .compress_and_write_enum(R::REPR, discriminant.to_bits());
    Ok(())
}

#[inline(always)]
pub fn read<R: EnumBits>(context: &mut ReadContext) -> Result<R, Error> {
    let bits = context.reader.read_compressed_enum(R::REPR)?;
    Ok(R::from_bits(bits))
}

#[cold]
pub fn unknown_discriminant<R: EnumBits>(type_name: &str, discriminant: R) -> Error {
    Error::unknown_enum(format!(
        "unknown discriminant {discriminant} for enum {type_name}"
    ))
}
