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

use crate::types::EnumRepr;
use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Declared type of a slot on the dynamic path.
///
/// A shape is resolved once per Rust type (see [`crate::Packer::register`])
/// and then drives [`crate::serializer::common`] without any per-call type
/// inspection.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Bool,
    U8,
    I8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Decimal,
    Char,
    DateTime,
    String,
    Enum(EnumRepr),
    /// `rank` above 1 describes a multi-dimensional array, which is rejected.
    Array {
        elem: Box<Shape>,
        rank: u32,
    },
    List(Box<Shape>),
    Dict(Box<Shape>, Box<Shape>),
    Nullable(Box<Shape>),
    Composite(Arc<CompositeShape>),
    /// Handled only by a codec registered under this name.
    Custom(Cow<'static, str>),
    /// A composite met again inside its own fields. Expanded one level at a
    /// time while values are written or read.
    Ref(ShapeRef),
}

impl Shape {
    /// A one-dimensional array of `elem`.
    pub fn array(elem: Shape) -> Shape {
        Shape::Array {
            elem: Box::new(elem),
            rank: 1,
        }
    }

    pub fn list(elem: Shape) -> Shape {
        Shape::List(Box::new(elem))
    }

    pub fn dict(key: Shape, value: Shape) -> Shape {
        Shape::Dict(Box::new(key), Box::new(value))
    }

    pub fn nullable(inner: Shape) -> Shape {
        Shape::Nullable(Box::new(inner))
    }

    pub fn composite(name: impl Into<Cow<'static, str>>, fields: Vec<FieldShape>) -> Shape {
        Shape::Composite(Arc::new(CompositeShape {
            name: name.into(),
            fields,
        }))
    }

    pub fn custom(name: impl Into<Cow<'static, str>>) -> Shape {
        Shape::Custom(name.into())
    }

    /// Name consulted in the custom codec registry, if this shape has one.
    pub fn codec_name(&self) -> Option<&str> {
        match self {
            Shape::Composite(composite) => Some(&composite.name),
            Shape::Custom(name) => Some(name),
            Shape::Ref(shape_ref) => Some(&shape_ref.name),
            _ => None,
        }
    }

    /// Kinds with a direct `Value` counterpart: the raw primitives plus the
    /// compressed integers and strings.
    #[inline]
    pub fn is_primitive(&self) -> bool {
        self.is_raw_primitive()
            || matches!(
                self,
                Shape::U32 | Shape::I32 | Shape::U64 | Shape::I64 | Shape::String
            )
    }

    /// Fixed-size primitives written without a tag on the dynamic path.
    #[inline]
    pub fn is_raw_primitive(&self) -> bool {
        matches!(
            self,
            Shape::Bool
                | Shape::U8
                | Shape::I8
                | Shape::I16
                | Shape::U16
                | Shape::F32
                | Shape::F64
                | Shape::Decimal
                | Shape::Char
                | Shape::DateTime
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompositeShape {
    pub name: Cow<'static, str>,
    /// In declaration order, which is wire order.
    pub fields: Vec<FieldShape>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldShape {
    pub name: Cow<'static, str>,
    pub shape: Shape,
}

impl FieldShape {
    pub fn new(name: impl Into<Cow<'static, str>>, shape: Shape) -> FieldShape {
        FieldShape {
            name: name.into(),
            shape,
        }
    }
}

/// Named pointer back to a composite whose shape is still being built.
#[derive(Clone)]
pub struct ShapeRef {
    pub name: Cow<'static, str>,
    pub type_id: TypeId,
    build: fn() -> Shape,
}

impl ShapeRef {
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        type_id: TypeId,
        build: fn() -> Shape,
    ) -> ShapeRef {
        ShapeRef {
            name: name.into(),
            type_id,
            build,
        }
    }

    /// Builds the referenced shape again. Its own self references stay
    /// unexpanded.
    pub fn build(&self) -> Shape {
        (self.build)()
    }
}

impl PartialEq for ShapeRef {
    fn eq(&self, other: &ShapeRef) -> bool {
        self.type_id == other.type_id && self.name == other.name
    }
}

impl fmt::Debug for ShapeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ShapeRef").field(&self.name).finish()
    }
}
