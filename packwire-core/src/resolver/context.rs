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
use crate::resolver::registry::CodecRegistry;

pub struct WriteContext<'a> {
    pub writer: Writer,
    registry: &'a CodecRegistry,
    max_depth: u32,
    current_depth: u32,
}

impl<'a> WriteContext<'a> {
    pub fn new(writer: Writer, registry: &'a CodecRegistry, max_depth: u32) -> WriteContext<'a> {
        WriteContext {
            writer,
            registry,
            max_depth,
            current_depth: 0,
        }
    }

    #[inline(always)]
    pub fn registry(&self) -> &'a CodecRegistry {
        self.registry
    }

    /// Takes the written bytes; the writer's buffer goes back to the pool.
    pub fn finish(self) -> Vec<u8> {
        self.writer.into_bytes()
    }

    #[inline(always)]
    pub fn inc_depth(&mut self) -> Result<(), Error> {
        self.current_depth += 1;
        if self.current_depth > self.max_depth {
            return Err(depth_exceeded(self.max_depth));
        }
        Ok(())
    }

    #[inline(always)]
    pub fn dec_depth(&mut self) {
        self.current_depth = self.current_depth.saturating_sub(1);
    }
}

pub struct ReadContext<'a, 'bf> {
    pub reader: Reader<'bf>,
    registry: &'a CodecRegistry,
    max_depth: u32,
    current_depth: u32,
}

impl<'a, 'bf> ReadContext<'a, 'bf> {
    pub fn new(reader: Reader<'bf>, registry: &'a CodecRegistry, max_depth: u32) -> ReadContext<'a, 'bf> {
        ReadContext {
            reader,
            registry,
            max_depth,
            current_depth: 0,
        }
    }

    #[inline(always)]
    pub fn registry(&self) -> &'a CodecRegistry {
        self.registry
    }

    #[inline(always)]
    pub fn inc_depth(&mut self) -> Result<(), Error> {
        self.current_depth += 1;
        if self.current_depth > self.max_depth {
            return Err(depth_exceeded(self.max_depth));
        }
        Ok(())
    }

    #[inline(always)]
    pub fn dec_depth(&mut self) {
        self.current_depth = self.current_depth.saturating_sub(1);
    }
}

#[cold]
fn depth_exceeded(max_depth: u32) -> Error {
    Error::depth_exceed(format!(
        "Maximum nesting depth ({max_depth}) exceeded. This may indicate an overly deep \
        value graph. Consider increasing max_depth if this is expected."
    ))
}
