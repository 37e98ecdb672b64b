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

use crate::block_buffer::ExtensibleBuffer;
use parking_lot::Mutex;
use std::cell::Cell;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use tracing::{trace, warn};

/// Number of segments in a pool. Using 16 segments to reduce contention.
const NUM_SEGMENTS: usize = 16;

/// Idle items kept per segment before releases start dropping them.
pub const MAX_IDLE_PER_SEGMENT: usize = 32;

/// Scratch arrays above this size are not kept around after use.
pub const MAX_POOLED_SCRATCH: usize = 64 * 1024;

/// Global counter to assign unique IDs to threads for segment selection.
static THREAD_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

thread_local! {
    /// Cached segment index for the current thread.
    static SEGMENT_INDEX: Cell<usize> = Cell::new(
        (THREAD_ID_COUNTER.fetch_add(1, Ordering::Relaxed) as usize) % NUM_SEGMENTS
    );
}

#[inline(always)]
fn segment_index() -> usize {
    SEGMENT_INDEX.with(|idx| idx.get())
}

/// A free list of idle items. Each thread is pinned to one segment, so
/// threads acquiring concurrently usually hit different locks.
struct Segments<T> {
    segments: [Mutex<Vec<T>>; NUM_SEGMENTS],
    max_idle: usize,
}

impl<T> Segments<T> {
    fn new(max_idle: usize) -> Self {
        Segments {
            segments: std::array::from_fn(|_| Mutex::new(Vec::new())),
            max_idle,
        }
    }

    #[inline(always)]
    fn current(&self) -> &Mutex<Vec<T>> {
        &self.segments[segment_index()]
    }

    /// Returns `false` when the segment is full and `item` was dropped.
    #[inline(always)]
    fn put(&self, item: T) -> bool {
        let mut items = self.current().lock();
        if items.len() >= self.max_idle {
            return false;
        }
        items.push(item);
        true
    }

    fn idle(&self) -> usize {
        self.segments.iter().map(|s| s.lock().len()).sum()
    }
}

/// Pool of whole [`ExtensibleBuffer`]s.
///
/// A buffer is either checked out to exactly one writer or idle here. Buffers
/// are handed out only to callers asking for the same block size they were
/// created with; otherwise a fresh one is allocated.
pub struct BufferPool {
    idle: Segments<ExtensibleBuffer>,
}

impl BufferPool {
    pub fn new(max_idle_per_segment: usize) -> BufferPool {
        BufferPool {
            idle: Segments::new(max_idle_per_segment),
        }
    }

    /// The process-wide pool used by [`crate::buffer::Writer`].
    pub fn global() -> &'static BufferPool {
        static POOL: OnceLock<BufferPool> = OnceLock::new();
        POOL.get_or_init(|| BufferPool::new(MAX_IDLE_PER_SEGMENT))
    }

    pub fn acquire(&self, block_size: usize) -> ExtensibleBuffer {
        let pooled = {
            let mut items = self.idle.current().lock();
            items
                .iter()
                .rposition(|b| b.block_size() == block_size)
                .map(|pos| items.swap_remove(pos))
        };
        match pooled {
            Some(mut buffer) => {
                trace!(block_size, "buffer pool hit");
                buffer.set_read_only(false);
                buffer
            }
            None => {
                trace!(block_size, "buffer pool miss");
                ExtensibleBuffer::new(block_size)
            }
        }
    }

    /// Takes a buffer back. Its content is retired but not cleared.
    pub fn release(&self, mut buffer: ExtensibleBuffer) {
        buffer.set_read_only(true);
        let block_size = buffer.block_size();
        if self.idle.put(buffer) {
            trace!(block_size, "buffer released to pool");
        } else {
            warn!(block_size, "buffer pool segment full, dropping buffer");
        }
    }

    /// Number of idle buffers across all segments.
    pub fn idle_count(&self) -> usize {
        self.idle.idle()
    }
}

/// Pool of small scratch arrays used transiently, for example while
/// transcoding a string before it is copied into a writer.
pub struct ScratchPool {
    idle: Segments<Vec<u8>>,
}

impl ScratchPool {
    pub fn new(max_idle_per_segment: usize) -> ScratchPool {
        ScratchPool {
            idle: Segments::new(max_idle_per_segment),
        }
    }

    pub fn global() -> &'static ScratchPool {
        static POOL: OnceLock<ScratchPool> = OnceLock::new();
        POOL.get_or_init(|| ScratchPool::new(MAX_IDLE_PER_SEGMENT))
    }

    /// Borrows an empty array with at least `capacity` bytes reserved. It
    /// returns to the pool when the guard drops, including on unwind.
    pub fn borrow(&self, capacity: usize) -> ScratchGuard<'_> {
        let mut buf = self.idle.current().lock().pop().unwrap_or_default();
        buf.clear();
        buf.reserve(capacity);
        ScratchGuard {
            pool: self,
            buf,
        }
    }

    /// Runs `handler` with a borrowed array and returns the array afterwards.
    #[inline(always)]
    pub fn borrow_mut<R>(&self, capacity: usize, handler: impl FnOnce(&mut Vec<u8>) -> R) -> R {
        let mut guard = self.borrow(capacity);
        handler(&mut guard)
    }

    fn put(&self, buf: Vec<u8>) {
        if buf.capacity() <= MAX_POOLED_SCRATCH {
            self.idle.put(buf);
        }
    }

    pub fn idle_count(&self) -> usize {
        self.idle.idle()
    }
}

pub struct ScratchGuard<'a> {
    pool: &'a ScratchPool,
    buf: Vec<u8>,
}

impl Deref for ScratchGuard<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.buf
    }
}

impl DerefMut for ScratchGuard<'_> {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }
}

impl Drop for ScratchGuard<'_> {
    fn drop(&mut self) {
        self.pool.put(std::mem::take(&mut self.buf));
    }
}
