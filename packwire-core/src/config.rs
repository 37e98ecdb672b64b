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

use crate::block_buffer::DEFAULT_BLOCK_SIZE;
use crate::types::TextEncoding;

/// Configuration for packwire serialization.
///
/// Owned by a [`crate::Packer`] and copied into every write and read context
/// it creates, so both directions see the same settings.
#[derive(Clone, Debug)]
pub struct Config {
    /// Growth granularity of writer buffers.
    pub block_size: usize,
    /// Text encoding of string payloads.
    pub encoding: TextEncoding,
    /// Maximum nesting depth of the dynamic value path.
    pub max_depth: u32,
    /// Whether a top-level read must consume the whole input.
    pub check_trailing_bytes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            block_size: DEFAULT_BLOCK_SIZE,
            encoding: TextEncoding::Utf8,
            max_depth: 64,
            check_trailing_bytes: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    #[inline(always)]
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    #[inline(always)]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    #[inline(always)]
    pub fn is_check_trailing_bytes(&self) -> bool {
        self.check_trailing_bytes
    }
}
