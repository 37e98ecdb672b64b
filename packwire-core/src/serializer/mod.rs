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

//! Typed serialization.
//!
//! Every supported type implements [`Serializer`]. Types that can be absent
//! pick a [`NullEncoding`], which decides how `Option<T>` frames them:
//!
//! | encoding | absent | present |
//! |---|---|---|
//! | `Marker` | `Null` marker | `Nullable` marker + value |
//! | `Presence` | `0u8` | `1u8` + fields |
//! | `Collection` | `Null` marker | `Collection` marker + `i32` count + elements |
//! | `Collapsed` | same bytes as the empty value | value |

use crate::ensure;
use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::shape::Shape;
use crate::types::TypeMarker;

mod bool;
pub mod common;
pub mod compressed;
mod datetime;
pub mod enum_;
mod list;
mod map;
mod number;
mod option;
mod set;
mod string;
pub mod struct_;

/// How a type marks its own absence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NullEncoding {
    Marker,
    Presence,
    Collection,
    Collapsed,
}

pub trait Serializer
where
    Self: Sized + 'static,
{
    /// Writes the value into its slot, including any framing such as a
    /// presence flag or a collection marker.
    fn write(&self, context: &mut WriteContext) -> Result<(), Error> {
        self.write_data(context)
    }

    /// Writes the payload only.
    fn write_data(&self, context: &mut WriteContext) -> Result<(), Error>;

    fn read(context: &mut ReadContext) -> Result<Self, Error> {
        Self::read_data(context)
    }

    fn read_data(context: &mut ReadContext) -> Result<Self, Error>;

    fn null_encoding() -> NullEncoding {
        NullEncoding::Marker
    }

    /// Writes the absent form of this type.
    fn write_none(context: &mut WriteContext) -> Result<(), Error> {
        match Self::null_encoding() {
            NullEncoding::Marker | NullEncoding::Collection => {
                context.writer.write_marker(TypeMarker::Null)
            }
            NullEncoding::Presence => context.writer.write_bool(false),
            NullEncoding::Collapsed => {
                return Err(Error::invalid_operation(format!(
                    "{} collapses null but does not override write_none",
                    std::any::type_name::<Self>()
                )))
            }
        }
        Ok(())
    }

    fn write_option(value: Option<&Self>, context: &mut WriteContext) -> Result<(), Error> {
        match value {
            None => Self::write_none(context),
            Some(v) => {
                if Self::null_encoding() == NullEncoding::Marker {
                    context.writer.write_marker(TypeMarker::Nullable);
                }
                v.write(context)
            }
        }
    }

    fn read_option(context: &mut ReadContext) -> Result<Option<Self>, Error> {
        match Self::null_encoding() {
            NullEncoding::Marker => match context.reader.read_marker()? {
                TypeMarker::Null => Ok(None),
                TypeMarker::Nullable => Ok(Some(Self::read(context)?)),
                TypeMarker::Collection => Err(unexpected_marker::<Self>(TypeMarker::Collection)),
            },
            NullEncoding::Presence => {
                if context.reader.read_bool()? {
                    Ok(Some(Self::read_data(context)?))
                } else {
                    Ok(None)
                }
            }
            NullEncoding::Collection => match context.reader.read_marker()? {
                TypeMarker::Null => Ok(None),
                TypeMarker::Collection => Ok(Some(Self::read_data(context)?)),
                TypeMarker::Nullable => Err(unexpected_marker::<Self>(TypeMarker::Nullable)),
            },
            NullEncoding::Collapsed => Ok(Some(Self::read(context)?)),
        }
    }

    /// Declared shape of this type on the dynamic path.
    fn shape() -> Shape;

    /// The possible max memory size of the type.
    /// Used to reserve the buffer space to avoid growing block by block.
    fn reserved_space() -> usize {
        0
    }

    /// Writes a run of elements. Byte sequences override this with a raw copy.
    fn write_seq(items: &[Self], context: &mut WriteContext) -> Result<(), Error> {
        for item in items {
            item.write(context)?;
        }
        Ok(())
    }

    fn read_seq(len: usize, context: &mut ReadContext) -> Result<Vec<Self>, Error> {
        let mut items = Vec::with_capacity(len.min(context.reader.remaining()));
        for _ in 0..len {
            items.push(Self::read(context)?);
        }
        Ok(items)
    }
}

#[cold]
fn unexpected_marker<T>(marker: TypeMarker) -> Error {
    Error::invalid_payload(format!(
        "unexpected {:?} marker for {}",
        marker,
        std::any::type_name::<T>()
    ))
}

/// Writes the raw `i32` element count used by typed collections.
#[inline(always)]
pub(crate) fn write_count(context: &mut WriteContext, len: usize) -> Result<(), Error> {
    ensure!(
        len <= i32::MAX as usize,
        "collection too large, len: {}",
        len
    );
    context.writer.write_i32(len as i32);
    Ok(())
}

#[inline(always)]
pub(crate) fn read_count(context: &mut ReadContext) -> Result<usize, Error> {
    let len = context.reader.read_i32()?;
    ensure!(len >= 0, "negative collection length: {}", len);
    Ok(len as usize)
}
