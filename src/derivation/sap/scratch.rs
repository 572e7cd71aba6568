//! Scratch regions backing the chain input buffer.
//!
//! A scratch region is acquired once per chain computation, holds
//! `password || tail` for every round, and is wiped and released when it
//! goes out of scope, on success and on every early return alike.

use std::mem;
use std::sync::{Mutex, PoisonError};

use log::trace;
use smallvec::SmallVec;

/// Inline capacity of [`StackScratch`]. Covers passwords up to 192 bytes
/// with a SHA-512 tail.
pub const STACK_SCRATCH_LEN: usize = 256;

/// Maximum number of idle buffers kept by the pool behind [`PooledScratch`].
pub const POOL_CAPACITY: usize = 32;

/// Smallest buffer the pool hands out. Requests are rounded up to a power
/// of two no smaller than this so buffers can be reused across inputs.
const MIN_POOLED_LEN: usize = 64;

static POOL: Mutex<Vec<Vec<u8>>> = Mutex::new(Vec::new());

/// A call-scoped, zero-initialized byte region of a fixed length.
///
/// Implementations release their storage on drop and wipe it beforehand.
pub trait ScratchBuffer: Sized {
    /// Acquires a zeroed region of exactly `len` bytes.
    fn acquire(len: usize) -> Self;

    /// The region, exactly `len` bytes long.
    fn as_mut_slice(&mut self) -> &mut [u8];
}

/// Scratch region allocated on the heap for every call.
pub struct HeapScratch {
    buf: Vec<u8>,
}

impl ScratchBuffer for HeapScratch {
    fn acquire(len: usize) -> Self {
        Self { buf: vec![0u8; len] }
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buf
    }
}

impl Drop for HeapScratch {
    fn drop(&mut self) {
        self.buf.fill(0);
    }
}

/// Scratch region rented from a process-wide buffer pool.
///
/// Renting moves the buffer out of the pool, so two live guards never share
/// storage. Dropping the guard wipes the buffer and returns it, unless the
/// pool already holds [`POOL_CAPACITY`] idle buffers.
pub struct PooledScratch {
    buf: Vec<u8>,
}

impl PooledScratch {
    /// Number of idle buffers currently held by the pool.
    pub fn idle_buffers() -> usize {
        POOL.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn rent(len: usize) -> Vec<u8> {
        let rented = {
            let mut idle = POOL.lock().unwrap_or_else(PoisonError::into_inner);
            idle.iter()
                .position(|buf| buf.capacity() >= len)
                .map(|pos| idle.swap_remove(pos))
        };

        match rented {
            Some(mut buf) => {
                trace!("scratch pool: reusing buffer of {} bytes", buf.capacity());
                buf.clear();
                buf.resize(len, 0);
                buf
            }
            None => {
                let capacity = len.next_power_of_two().max(MIN_POOLED_LEN);
                trace!("scratch pool: allocating buffer of {capacity} bytes");
                let mut buf = Vec::with_capacity(capacity);
                buf.resize(len, 0);
                buf
            }
        }
    }
}

impl ScratchBuffer for PooledScratch {
    fn acquire(len: usize) -> Self {
        Self {
            buf: Self::rent(len),
        }
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buf
    }
}

impl Drop for PooledScratch {
    fn drop(&mut self) {
        let mut buf = mem::take(&mut self.buf);
        buf.fill(0);

        let mut idle = POOL.lock().unwrap_or_else(PoisonError::into_inner);
        if idle.len() < POOL_CAPACITY {
            trace!("scratch pool: returning buffer of {} bytes", buf.capacity());
            idle.push(buf);
        }
    }
}

/// Scratch region stored inline on the stack.
///
/// Inputs longer than [`STACK_SCRATCH_LEN`] spill to a heap allocation.
pub struct StackScratch {
    buf: SmallVec<[u8; STACK_SCRATCH_LEN]>,
}

impl StackScratch {
    /// Whether the region had to move to the heap.
    pub fn spilled(&self) -> bool {
        self.buf.spilled()
    }
}

impl ScratchBuffer for StackScratch {
    fn acquire(len: usize) -> Self {
        Self {
            buf: SmallVec::from_elem(0, len),
        }
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buf
    }
}

impl Drop for StackScratch {
    fn drop(&mut self) {
        self.buf.fill(0);
    }
}
