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

//! Dynamic serialization of a [`Value`] against its declared [`Shape`].
//!
//! Dispatch order is significant:
//!
//! 1. primitive shapes, which only accept the matching value kind;
//! 2. enums;
//! 3. arrays, of rank 1 only;
//! 4. lists;
//! 5. dictionaries;
//! 6. a custom codec registered under the shape's name;
//! 7. the composite fallback, expanding a [`Shape::Ref`] through the
//!    registered shape of its type.
//!
//! Arrays, lists and dictionaries carry a compressed count and nothing else,
//! so on this path a null container and an empty one are the same bytes.
//! The typed path keeps them apart with a marker.

use crate::ensure;
use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::registry::CodecRegistry;
use crate::shape::{CompositeShape, Shape, ShapeRef};
use crate::types::TypeMarker;
use crate::value::Value;

pub fn write_common_val(
    context: &mut WriteContext,
    shape: &Shape,
    value: &Value,
) -> Result<(), Error> {
    context.inc_depth()?;
    let result = write_val(context, shape, value);
    context.dec_depth();
    result
}

fn write_val(context: &mut WriteContext, shape: &Shape, value: &Value) -> Result<(), Error> {
    // a nullable wraps a kind instead of being one, so it is peeled first
    if let Shape::Nullable(inner) = shape {
        if value.is_null() {
            context.writer.write_marker(TypeMarker::Null);
            return Ok(());
        }
        context.writer.write_marker(TypeMarker::Nullable);
        return write_common_val(context, inner, value);
    }

    // the reader decodes by shape, so a primitive slot only takes its own value kind
    let writer = &mut context.writer;
    match (shape, value) {
        (Shape::U64, Value::U64(v)) => writer.compress_and_write_u64(*v),
        (Shape::U32, Value::U32(v)) => writer.compress_and_write_u32(*v),
        (Shape::U16, Value::U16(v)) => writer.write_u16(*v),
        (Shape::U8, Value::U8(v)) => writer.write_u8(*v),
        (Shape::I64, Value::I64(v)) => writer.compress_and_write_i64(*v),
        (Shape::I32, Value::I32(v)) => writer.compress_and_write_i32(*v),
        (Shape::I16, Value::I16(v)) => writer.write_i16(*v),
        (Shape::I8, Value::I8(v)) => writer.write_i8(*v),
        (Shape::Bool, Value::Bool(v)) => writer.write_bool(*v),
        (Shape::F64, Value::F64(v)) => writer.write_f64(*v),
        (Shape::Decimal, Value::Decimal(v)) => writer.write_decimal(v),
        (Shape::F32, Value::F32(v)) => writer.write_f32(*v),
        (Shape::Char, Value::Char(v)) => return writer.write_char(*v),
        (Shape::String, Value::String(v)) => return writer.write_str(Some(v)),
        (Shape::String, Value::Null) => return writer.write_str(None),
        (Shape::DateTime, Value::DateTime(v)) => return writer.write_datetime(v),
        _ if shape.is_primitive() => return Err(mismatch(shape, value)),
        _ => return write_shaped(context, shape, value),
    }
    Ok(())
}

fn write_shaped(context: &mut WriteContext, shape: &Shape, value: &Value) -> Result<(), Error> {
    match shape {
        Shape::Enum(repr) => {
            return match value {
                Value::Enum(bits) => {
                    context.writer.compress_and_write_enum(*repr, *bits);
                    Ok(())
                }
                other => Err(mismatch(shape, other)),
            };
        }
        Shape::Array { elem, rank } => {
            ensure!(
                *rank <= 1,
                Error::unsupported_shape(format!(
                    "can not serialize multidimensional array of rank {rank}, use a jagged array instead"
                ))
            );
            return write_array(context, elem, value);
        }
        Shape::List(elem) => return write_collection(context, elem, value),
        Shape::Dict(key, val) => return write_dictionary(context, key, val, value),
        _ => {}
    }

    if let Some(name) = shape.codec_name() {
        if let Some(codec) = context.registry().get_codec(name) {
            return codec.write(value, context);
        }
    }

    match shape {
        Shape::Composite(composite) => write_composite(context, composite, value),
        Shape::Ref(shape_ref) => {
            let resolved = resolve_ref(context.registry(), shape_ref);
            write_shaped(context, &resolved, value)
        }
        Shape::Custom(name) => Err(Error::unsupported_shape(format!(
            "no custom codec registered for {name}"
        ))),
        _ => Err(mismatch(shape, value)),
    }
}

/// Writes a one-dimensional array: a compressed count, then each element.
/// Byte arrays are copied in one piece.
pub fn write_array(context: &mut WriteContext, elem: &Shape, value: &Value) -> Result<(), Error> {
    write_sequence(context, elem, value)
}

/// Writes a list-like container. Same bytes as [`write_array`].
pub fn write_collection(
    context: &mut WriteContext,
    elem: &Shape,
    value: &Value,
) -> Result<(), Error> {
    write_sequence(context, elem, value)
}

fn write_sequence(context: &mut WriteContext, elem: &Shape, value: &Value) -> Result<(), Error> {
    match value {
        Value::Null => context.writer.write_length(0),
        Value::Bytes(bytes) if *elem == Shape::U8 => context.writer.write_bytes(bytes),
        Value::List(items) => {
            context.writer.write_length(items.len())?;
            for item in items {
                write_common_val(context, elem, item)?;
            }
            Ok(())
        }
        other => Err(mismatch(&Shape::list(elem.clone()), other)),
    }
}

/// Writes a compressed entry count, then each key followed by its value.
pub fn write_dictionary(
    context: &mut WriteContext,
    key: &Shape,
    val: &Shape,
    value: &Value,
) -> Result<(), Error> {
    match value {
        Value::Null => context.writer.write_length(0),
        Value::Dict(entries) => {
            context.writer.write_length(entries.len())?;
            for (k, v) in entries {
                write_common_val(context, key, k)?;
                write_common_val(context, val, v)?;
            }
            Ok(())
        }
        other => Err(mismatch(
            &Shape::dict(key.clone(), val.clone()),
            other,
        )),
    }
}

fn write_composite(
    context: &mut WriteContext,
    composite: &CompositeShape,
    value: &Value,
) -> Result<(), Error> {
    match value {
        Value::Null => {
            context.writer.write_bool(false);
            Ok(())
        }
        Value::Composite(fields) => {
            ensure!(
                fields.len() == composite.fields.len(),
                "{} has {} fields, got {} values",
                composite.name,
                composite.fields.len(),
                fields.len()
            );
            context.writer.write_bool(true);
            for (field, v) in composite.fields.iter().zip(fields) {
                write_common_val(context, &field.shape, v)?;
            }
            Ok(())
        }
        other => Err(Error::invalid_payload(format!(
            "expected a composite value for {}, got {:?}",
            composite.name, other
        ))),
    }
}

#[cold]
/// The registered shape of a referenced composite, or a freshly built one.
fn resolve_ref(registry: &CodecRegistry, shape_ref: &ShapeRef) -> Shape {
    registry
        .get_shape(shape_ref.type_id)
        .cloned()
        .unwrap_or_else(|| shape_ref.build())
}

fn mismatch(shape: &Shape, value: &Value) -> Error {
    Error::invalid_payload(format!(
        "value {value:?} does not match shape {shape:?}"
    ))
}

pub fn read_common_val(context: &mut ReadContext, shape: &Shape) -> Result<Value, Error> {
    context.inc_depth()?;
    let result = read_val(context, shape);
    context.dec_depth();
    result
}

fn read_val(context: &mut ReadContext, shape: &Shape) -> Result<Value, Error> {
    let reader = &mut context.reader;
    let value = match shape {
        Shape::Nullable(inner) => {
            return match reader.read_marker()? {
                TypeMarker::Null => Ok(Value::Null),
                TypeMarker::Nullable => read_common_val(context, inner),
                TypeMarker::Collection => Err(Error::invalid_payload(
                    "unexpected Collection marker for a nullable value",
                )),
            };
        }
        Shape::U64 => Value::U64(reader.read_compressed_u64()?),
        Shape::U32 => Value::U32(reader.read_compressed_u32()?),
        Shape::U16 => Value::U16(reader.read_u16()?),
        Shape::U8 => Value::U8(reader.read_u8()?),
        Shape::I64 => Value::I64(reader.read_compressed_i64()?),
        Shape::I32 => Value::I32(reader.read_compressed_i32()?),
        Shape::I16 => Value::I16(reader.read_i16()?),
        Shape::I8 => Value::I8(reader.read_i8()?),
        Shape::Bool => Value::Bool(reader.read_bool()?),
        Shape::F64 => Value::F64(reader.read_f64()?),
        Shape::Decimal => Value::Decimal(reader.read_decimal()?),
        Shape::F32 => Value::F32(reader.read_f32()?),
        Shape::Char => Value::Char(reader.read_char()?),
        Shape::String => Value::String(reader.read_string()?),
        Shape::DateTime => Value::DateTime(reader.read_datetime()?),
        Shape::Enum(repr) => Value::Enum(reader.read_compressed_enum(*repr)?),
        Shape::Array { elem, rank } => {
            ensure!(
                *rank <= 1,
                Error::unsupported_shape(format!(
                    "can not deserialize multidimensional array of rank {rank}"
                ))
            );
            return read_array(context, elem);
        }
        Shape::List(elem) => return read_collection(context, elem),
        Shape::Dict(key, val) => return read_dictionary(context, key, val),
        Shape::Composite(_) | Shape::Custom(_) | Shape::Ref(_) => {
            return read_named(context, shape)
        }
    };
    Ok(value)
}

fn read_named(context: &mut ReadContext, shape: &Shape) -> Result<Value, Error> {
    if let Some(name) = shape.codec_name() {
        if let Some(codec) = context.registry().get_codec(name) {
            return codec.read(context);
        }
    }
    match shape {
        Shape::Composite(composite) => read_composite(context, composite),
        Shape::Ref(shape_ref) => {
            let resolved = resolve_ref(context.registry(), shape_ref);
            read_named(context, &resolved)
        }
        Shape::Custom(name) => Err(Error::unsupported_shape(format!(
            "no custom codec registered for {name}"
        ))),
        _ => Err(Error::invalid_operation(format!(
            "{shape:?} is not a named shape"
        ))),
    }
}

/// Mirror of [`write_array`]. Byte arrays come back as [`Value::Bytes`].
pub fn read_array(context: &mut ReadContext, elem: &Shape) -> Result<Value, Error> {
    read_sequence(context, elem)
}

pub fn read_collection(context: &mut ReadContext, elem: &Shape) -> Result<Value, Error> {
    read_sequence(context, elem)
}

fn read_sequence(context: &mut ReadContext, elem: &Shape) -> Result<Value, Error> {
    let len = context.reader.read_length()?;
    if *elem == Shape::U8 {
        return Ok(Value::Bytes(context.reader.read_raw(len)?.to_vec()));
    }
    let mut items = Vec::with_capacity(len.min(context.reader.remaining()));
    for _ in 0..len {
        items.push(read_common_val(context, elem)?);
    }
    Ok(Value::List(items))
}

pub fn read_dictionary(
    context: &mut ReadContext,
    key: &Shape,
    val: &Shape,
) -> Result<Value, Error> {
    let len = context.reader.read_length()?;
    let mut entries = Vec::with_capacity(len.min(context.reader.remaining()));
    for _ in 0..len {
        let k = read_common_val(context, key)?;
        let v = read_common_val(context, val)?;
        entries.push((k, v));
    }
    Ok(Value::Dict(entries))
}

fn read_composite(context: &mut ReadContext, composite: &CompositeShape) -> Result<Value, Error> {
    if !context.reader.read_bool()? {
        return Ok(Value::Null);
    }
    let mut fields = Vec::with_capacity(composite.fields.len());
    for field in &composite.fields {
        fields.push(read_common_val(context, &field.shape)?);
    }
    Ok(Value::Composite(fields))
}
