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
use crate::config::Config;
use crate::ensure;
use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::registry::{CodecRegistry, CustomCodec};
use crate::serializer::common::{read_common_val, write_common_val};
use crate::serializer::Serializer;
use crate::shape::Shape;
use crate::types::TextEncoding;
use crate::value::Value;
use std::any::TypeId;
use tracing::debug;

/// The packwire serialization entry point.
///
/// A `Packer` owns the [`Config`] and the [`CodecRegistry`]. Configure it
/// once, register types and custom codecs, then share it by reference: every
/// `serialize` and `deserialize` call builds its own context, so concurrent
/// calls never share a buffer.
///
/// # Examples
///
/// Typed round trip:
///
/// ```rust
/// use packwire_core::Packer;
///
/// let packer = Packer::default();
/// let bytes = packer.serialize(&vec![1i32, 2, 3]).unwrap();
/// let back: Vec<i32> = packer.deserialize(&bytes).unwrap();
/// assert_eq!(back, vec![1, 2, 3]);
/// ```
///
/// Custom configuration:
///
/// ```rust
/// use packwire_core::types::TextEncoding;
/// use packwire_core::Packer;
///
/// let packer = Packer::default()
///     .block_size(4096)
///     .encoding(TextEncoding::Utf16)
///     .max_depth(16);
/// ```
#[derive(Default)]
pub struct Packer {
    config: Config,
    registry: CodecRegistry,
}

impl Packer {
    /// Sets the growth granularity of writer buffers. Only buffers with the
    /// same block size are reused from the pool.
    pub fn block_size(mut self, block_size: usize) -> Self {
        self.config.block_size = block_size.max(1);
        self
    }

    /// Sets the string encoding. Both ends of a payload must agree.
    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.config.encoding = encoding;
        self
    }

    /// Sets the maximum nesting depth of the dynamic path.
    ///
    /// ```rust
    /// use packwire_core::Packer;
    ///
    /// // Restrict nesting for safer deserialization
    /// let packer = Packer::default().max_depth(3);
    /// ```
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Whether [`Packer::deserialize`] rejects input with unread bytes left over.
    pub fn check_trailing_bytes(mut self, check: bool) -> Self {
        self.config.check_trailing_bytes = check;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    /// Resolves and caches the dynamic shape of `T`.
    pub fn register<T: Serializer>(&mut self) {
        let shape = T::shape();
        debug!(
            type_name = std::any::type_name::<T>(),
            ?shape,
            "registered type"
        );
        self.registry.register_shape(TypeId::of::<T>(), shape);
    }

    /// Registers a codec consulted on the dynamic path for composite or
    /// custom shapes named `name`, ahead of the composite fallback.
    pub fn register_custom(&mut self, name: impl Into<String>, codec: CustomCodec) {
        let name = name.into();
        debug!(name = name.as_str(), "registered custom codec");
        if self.registry.register_codec(name.clone(), codec) {
            debug!(name = name.as_str(), "replaced an earlier custom codec");
        }
    }

    /// The cached shape of a registered type.
    pub fn shape_of<T: Serializer>(&self) -> Result<Shape, Error> {
        self.registry
            .get_shape(TypeId::of::<T>())
            .cloned()
            .ok_or_else(|| {
                Error::not_registered(format!(
                    "type {} is not registered",
                    std::any::type_name::<T>()
                ))
            })
    }

    /// A fresh write context over a pooled buffer.
    pub fn write_context(&self) -> WriteContext<'_> {
        let writer = Writer::with_block_size(self.config.encoding, self.config.block_size);
        WriteContext::new(writer, &self.registry, self.config.max_depth)
    }

    pub fn read_context<'a, 'bf>(&'a self, bf: &'bf [u8]) -> ReadContext<'a, 'bf> {
        let reader = Reader::new(bf, self.config.encoding);
        ReadContext::new(reader, &self.registry, self.config.max_depth)
    }

    /// Serializes `record` into a new vector. On error nothing is returned and
    /// the partial output is discarded with its buffer.
    pub fn serialize<T: Serializer>(&self, record: &T) -> Result<Vec<u8>, Error> {
        let mut context = self.write_context();
        context.writer.reserve(T::reserved_space());
        record.write(&mut context)?;
        Ok(context.finish())
    }

    /// Appends the serialized bytes of `record` to `buf` and returns how many
    /// were written. `buf` is left untouched on error.
    pub fn serialize_into<T: Serializer>(&self, record: &T, buf: &mut Vec<u8>) -> Result<usize, Error> {
        let mut context = self.write_context();
        context.writer.reserve(T::reserved_space());
        record.write(&mut context)?;
        context.writer.copy_into(buf);
        Ok(context.writer.len())
    }

    pub fn deserialize<T: Serializer>(&self, bf: &[u8]) -> Result<T, Error> {
        let mut context = self.read_context(bf);
        let result = T::read(&mut context)?;
        self.check_end(&context.reader)?;
        Ok(result)
    }

    /// Serializes `value` on the dynamic path.
    pub fn serialize_value(&self, shape: &Shape, value: &Value) -> Result<Vec<u8>, Error> {
        let mut context = self.write_context();
        write_common_val(&mut context, shape, value)?;
        Ok(context.finish())
    }

    pub fn deserialize_value(&self, shape: &Shape, bf: &[u8]) -> Result<Value, Error> {
        let mut context = self.read_context(bf);
        let value = read_common_val(&mut context, shape)?;
        self.check_end(&context.reader)?;
        Ok(value)
    }

    #[inline(always)]
    fn check_end(&self, reader: &Reader) -> Result<(), Error> {
        if self.config.check_trailing_bytes {
            ensure!(
                reader.is_end(),
                "{} trailing bytes after the value",
                reader.remaining()
            );
        }
        Ok(())
    }
}
