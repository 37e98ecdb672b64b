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

use crate::ensure;
use crate::error::Error;

/// Growth granularity used when no block size is requested.
pub const DEFAULT_BLOCK_SIZE: usize = 2048;

/// A byte store made of fixed-size blocks.
///
/// Logically a flat array indexable by absolute offset. Growing appends
/// blocks and never moves the ones already allocated, so the cost of a large
/// payload is one allocation per block instead of repeated copy-on-grow.
///
/// Content is not cleared when a buffer goes back to a pool; callers must
/// never read an offset they have not written.
pub struct ExtensibleBuffer {
    blocks: Vec<Box<[u8]>>,
    block_size: usize,
    read_only: bool,
}

impl ExtensibleBuffer {
    pub fn new(block_size: usize) -> ExtensibleBuffer {
        let block_size = block_size.max(1);
        ExtensibleBuffer {
            blocks: vec![vec![0u8; block_size].into_boxed_slice()],
            block_size,
            read_only: false,
        }
    }

    /// A buffer with no blocks, used in place of one that went back to a pool.
    pub(crate) fn detached(block_size: usize) -> ExtensibleBuffer {
        ExtensibleBuffer {
            blocks: Vec::new(),
            block_size: block_size.max(1),
            read_only: true,
        }
    }

    /// Copies `data` into a fresh read-only buffer.
    pub fn from_slice(data: &[u8], block_size: usize) -> ExtensibleBuffer {
        let mut buffer = ExtensibleBuffer::new(block_size);
        buffer.write_at(0, data);
        buffer.read_only = true;
        buffer
    }

    #[inline(always)]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.blocks.len() * self.block_size
    }

    #[inline(always)]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Makes sure `[0, len)` is backed by allocated blocks.
    pub fn reserve(&mut self, len: usize) {
        while self.capacity() < len {
            self.blocks
                .push(vec![0u8; self.block_size].into_boxed_slice());
        }
    }

    pub fn get(&self, index: usize) -> Result<u8, Error> {
        ensure!(
            index < self.capacity(),
            Error::out_of_data(index, 1, self.capacity())
        );
        Ok(self.blocks[index / self.block_size][index % self.block_size])
    }

    pub fn set(&mut self, index: usize, value: u8) -> Result<(), Error> {
        self.check_writable()?;
        self.write_at(index, &[value]);
        Ok(())
    }

    /// Copies `src` into the buffer starting at `offset`, growing as needed.
    pub fn copy_from(&mut self, src: &[u8], offset: usize) -> Result<(), Error> {
        self.check_writable()?;
        self.write_at(offset, src);
        Ok(())
    }

    /// Materializes `[start, start + len)` as one contiguous vector.
    pub fn to_array(&self, start: usize, len: usize) -> Result<Vec<u8>, Error> {
        ensure!(
            start + len <= self.capacity(),
            Error::out_of_data(start, len, self.capacity())
        );
        let mut out = Vec::with_capacity(len);
        self.extend_into(start, len, &mut out);
        Ok(out)
    }

    /// Appends `[start, start + len)` to `out`. The range must be allocated.
    pub(crate) fn extend_into(&self, start: usize, len: usize, out: &mut Vec<u8>) {
        debug_assert!(start + len <= self.capacity());
        let mut offset = start;
        let end = start + len;
        while offset < end {
            let block = &self.blocks[offset / self.block_size];
            let from = offset % self.block_size;
            let take = (self.block_size - from).min(end - offset);
            out.extend_from_slice(&block[from..from + take]);
            offset += take;
        }
    }

    #[inline(always)]
    fn check_writable(&self) -> Result<(), Error> {
        ensure!(
            !self.read_only,
            Error::invalid_operation("buffer is read-only")
        );
        Ok(())
    }

    /// Unchecked write used by the owning writer, which never holds a
    /// read-only buffer.
    #[inline(always)]
    pub(crate) fn write_at(&mut self, offset: usize, src: &[u8]) {
        debug_assert!(!self.read_only);
        self.reserve(offset + src.len());
        let block_size = self.block_size;
        let mut index = offset / block_size;
        let mut from = offset % block_size;
        // fast path: fits into a single block
        if from + src.len() <= block_size {
            self.blocks[index][from..from + src.len()].copy_from_slice(src);
            return;
        }
        let mut rest = src;
        while !rest.is_empty() {
            let take = (block_size - from).min(rest.len());
            self.blocks[index][from..from + take].copy_from_slice(&rest[..take]);
            rest = &rest[take..];
            index += 1;
            from = 0;
        }
    }
}

impl Default for ExtensibleBuffer {
    fn default() -> Self {
        ExtensibleBuffer::new(DEFAULT_BLOCK_SIZE)
    }
}
