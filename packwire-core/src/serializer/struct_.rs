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

//! Support code for `#[derive(PackObject)]` on structs.
//!
//! A composite slot is a presence byte followed, when present, by every
//! field in declaration order.

use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::Serializer;
use crate::shape::{FieldShape, Shape, ShapeRef};
use crate::types::SIZE_OF_BOOL;
use std::any::TypeId;
use std::cell::RefCell;

thread_local! {
    /// Composites whose shape is being built on this thread, innermost last.
    static BUILDING: RefCell<Vec<TypeId>> = RefCell::new(Vec::new());
}

struct BuildGuard;

impl Drop for BuildGuard {
    fn drop(&mut self) {
        BUILDING.with(|building| {
            building.borrow_mut().pop();
        });
    }
}

#[inline(always)]
pub fn write<T: Serializer>(this: &T, context: &mut WriteContext) -> Result<(), Error> {
    context.writer.write_bool(true);
    this.write_data(context)
}

/// Reads a composite that must be present.
#[inline(always)]
pub fn read<T: Serializer>(context: &mut ReadContext) -> Result<T, Error> {
    T::read_option(context)?.ok_or_else(|| {
        Error::invalid_payload(format!(
            "null value for non-optional {}",
            std::any::type_name::<T>()
        ))
    })
}

/// Presence byte plus the sum of the field reservations.
#[inline(always)]
pub fn reserved_space(fields: &[usize]) -> usize {
    SIZE_OF_BOOL + fields.iter().sum::<usize>()
}

/// Composite shape of `T`. When `T` turns up again while its fields are
/// being resolved, that occurrence becomes a [`Shape::Ref`] instead.
pub fn shape<T: Serializer>(
    name: &'static str,
    fields: impl FnOnce() -> Vec<FieldShape>,
) -> Shape {
    let type_id = TypeId::of::<T>();
    let reentered = BUILDING.with(|building| {
        let mut building = building.borrow_mut();
        if building.contains(&type_id) {
            return true;
        }
        building.push(type_id);
        false
    });
    if reentered {
        return Shape::Ref(ShapeRef::new(name, type_id, T::shape));
    }
    let _guard = BuildGuard;
    Shape::composite(name, fields())
}
