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
use crate::shape::Shape;
use crate::value::Value;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

type WriteFn = dyn Fn(&Value, &mut WriteContext) -> Result<(), Error> + Send + Sync;
type ReadFn = dyn Fn(&mut ReadContext) -> Result<Value, Error> + Send + Sync;

/// A user supplied encoder and decoder pair for one named type on the
/// dynamic path. The two must be exact inverses.
#[derive(Clone)]
pub struct CustomCodec {
    write: Arc<WriteFn>,
    read: Arc<ReadFn>,
}

impl CustomCodec {
    pub fn new<W, R>(write: W, read: R) -> CustomCodec
    where
        W: Fn(&Value, &mut WriteContext) -> Result<(), Error> + Send + Sync + 'static,
        R: Fn(&mut ReadContext) -> Result<Value, Error> + Send + Sync + 'static,
    {
        CustomCodec {
            write: Arc::new(write),
            read: Arc::new(read),
        }
    }

    #[inline(always)]
    pub fn write(&self, value: &Value, context: &mut WriteContext) -> Result<(), Error> {
        (self.write)(value, context)
    }

    #[inline(always)]
    pub fn read(&self, context: &mut ReadContext) -> Result<Value, Error> {
        (self.read)(context)
    }
}

impl std::fmt::Debug for CustomCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomCodec").finish_non_exhaustive()
    }
}

/// Custom codecs by type name, and the shapes of registered Rust types.
///
/// Filled while configuring a [`crate::Packer`] and only read afterwards;
/// contexts borrow it immutably.
#[derive(Default)]
pub struct CodecRegistry {
    codecs: HashMap<String, CustomCodec>,
    shapes: HashMap<TypeId, Shape>,
}

impl CodecRegistry {
    /// Registers `codec` under `name`, replacing any earlier codec. Returns
    /// `true` when a codec was replaced.
    pub fn register_codec(&mut self, name: impl Into<String>, codec: CustomCodec) -> bool {
        self.codecs.insert(name.into(), codec).is_some()
    }

    #[inline(always)]
    pub fn get_codec(&self, name: &str) -> Option<&CustomCodec> {
        self.codecs.get(name)
    }

    pub fn register_shape(&mut self, type_id: TypeId, shape: Shape) {
        self.shapes.insert(type_id, shape);
    }

    pub fn get_shape(&self, type_id: TypeId) -> Option<&Shape> {
        self.shapes.get(&type_id)
    }

    pub fn codec_count(&self) -> usize {
        self.codecs.len()
    }
}
