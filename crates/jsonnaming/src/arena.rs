//! Short-lived scratch memory for name conversion.
//!
//! Requests of up to [`STACK_THRESHOLD`] elements are served from a stack
//! array owned by the calling frame. Larger requests rent a `Vec` from a
//! process-wide [`BufferPool`] (one per element type); the rented buffer is
//! wrapped in a [`Rented`] guard that hands it back exactly once when dropped,
//! so every exit path, including `?` returns and unwinding, releases it.
//!
//! Scratch memory is only ever lent to a closure, so a buffer cannot outlive
//! the call that acquired it.

use core::{
    mem,
    ops::{Deref, DerefMut},
    sync::atomic::{AtomicUsize, Ordering},
};

use parking_lot::Mutex;
use tracing::{debug, trace};

/// Largest request, in elements, that is served from the stack.
pub const STACK_THRESHOLD: usize = 256;

/// Upper bound on idle buffers a pool keeps around; extra returns are freed.
const MAX_RETAINED: usize = 32;

/// Largest buffer, in elements, a pool keeps after it is returned.
pub const MAX_RETAINED_LEN: usize = 64 * 1024;

static CHAR_POOL: BufferPool<char> = BufferPool::new();
static BYTE_POOL: BufferPool<u8> = BufferPool::new();

/// Element types that can be lent out as scratch memory.
pub trait ScratchElement: Copy + Default + Send + 'static {
    /// The process-wide pool for this element type.
    fn shared_pool() -> &'static BufferPool<Self>;
}

impl ScratchElement for char {
    fn shared_pool() -> &'static BufferPool<Self> {
        &CHAR_POOL
    }
}

impl ScratchElement for u8 {
    fn shared_pool() -> &'static BufferPool<Self> {
        &BYTE_POOL
    }
}

/// Runs `f` with a scratch slice of exactly `min_len` elements.
///
/// The contents of the slice are unspecified; callers overwrite what they
/// read. With `clear` set, pooled memory is reset to `T::default()` before it
/// goes back to the pool.
pub fn with_scratch<T, R>(min_len: usize, clear: bool, f: impl FnOnce(&mut [T]) -> R) -> R
where
    T: ScratchElement,
{
    with_scratch_in(T::shared_pool(), min_len, clear, f)
}

/// Like [`with_scratch`], renting from `pool` instead of the shared pool.
pub fn with_scratch_in<T, R>(
    pool: &BufferPool<T>,
    min_len: usize,
    clear: bool,
    f: impl FnOnce(&mut [T]) -> R,
) -> R
where
    T: Copy + Default,
{
    if min_len <= STACK_THRESHOLD {
        let mut stack = [T::default(); STACK_THRESHOLD];
        return f(&mut stack[..min_len]);
    }

    let mut rented = pool.rent(min_len);
    rented.clear_on_release(clear);
    f(&mut rented[..])
}

/// A thread-safe free list of reusable buffers.
///
/// Renting never blocks beyond a short critical section and never fails: on
/// a miss the pool allocates a fresh buffer, rounded up to a power of two, so
/// a rented buffer may be larger than requested. [`Rented`] only exposes the
/// requested length. Returned buffers longer than [`MAX_RETAINED_LEN`] are
/// freed instead of kept.
#[derive(Debug)]
pub struct BufferPool<T> {
    free: Mutex<Vec<Vec<T>>>,
    rented: AtomicUsize,
    returned: AtomicUsize,
    allocated: AtomicUsize,
}

/// Counters describing a pool's activity since it was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Buffers handed out.
    pub rented: usize,
    /// Buffers handed back.
    pub returned: usize,
    /// Rentals that had to allocate fresh memory.
    pub allocated: usize,
    /// Idle buffers currently held by the pool.
    pub retained: usize,
}

impl PoolStats {
    /// Rentals not yet returned.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.rented - self.returned
    }
}

impl<T> BufferPool<T> {
    /// Creates an empty pool.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            free: parking_lot::const_mutex(Vec::new()),
            rented: AtomicUsize::new(0),
            returned: AtomicUsize::new(0),
            allocated: AtomicUsize::new(0),
        }
    }

    /// Snapshot of the pool counters.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        // Read `returned` first so a concurrent return can never make
        // `outstanding` underflow.
        let returned = self.returned.load(Ordering::Acquire);
        let rented = self.rented.load(Ordering::Acquire);
        PoolStats {
            rented,
            returned,
            allocated: self.allocated.load(Ordering::Relaxed),
            retained: self.free.lock().len(),
        }
    }

    fn give_back(&self, buffer: Vec<T>) {
        if buffer.len() > MAX_RETAINED_LEN {
            trace!(capacity = buffer.len(), "dropping oversized scratch buffer");
        } else {
            let mut free = self.free.lock();
            if free.len() < MAX_RETAINED {
                free.push(buffer);
            }
        }
        self.returned.fetch_add(1, Ordering::AcqRel);
    }
}

impl<T: Copy + Default> BufferPool<T> {
    /// Rents a buffer of at least `min_len` elements.
    pub fn rent(&self, min_len: usize) -> Rented<'_, T> {
        self.rented.fetch_add(1, Ordering::AcqRel);

        let reused = {
            let mut free = self.free.lock();
            free.iter()
                .rposition(|buf| buf.len() >= min_len)
                .map(|idx| free.swap_remove(idx))
        };

        let buffer = if let Some(buffer) = reused {
            trace!(min_len, capacity = buffer.len(), "reusing pooled scratch buffer");
            buffer
        } else {
            self.allocated.fetch_add(1, Ordering::Relaxed);
            let capacity = min_len.checked_next_power_of_two().unwrap_or(min_len);
            debug!(min_len, capacity, "scratch pool miss; allocating");
            vec![T::default(); capacity]
        };

        Rented {
            pool: self,
            buffer,
            len: min_len,
            clear: false,
        }
    }
}

impl<T> Default for BufferPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A buffer on loan from a [`BufferPool`], returned when dropped.
#[derive(Debug)]
pub struct Rented<'p, T: Copy + Default> {
    pool: &'p BufferPool<T>,
    buffer: Vec<T>,
    len: usize,
    clear: bool,
}

impl<T: Copy + Default> Rented<'_, T> {
    /// Reset the buffer to `T::default()` before returning it.
    pub fn clear_on_release(&mut self, clear: bool) {
        self.clear = clear;
    }

    /// Full length of the underlying buffer, which may exceed the request.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
}

impl<T: Copy + Default> Deref for Rented<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.buffer[..self.len]
    }
}

impl<T: Copy + Default> DerefMut for Rented<'_, T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.buffer[..self.len]
    }
}

impl<T: Copy + Default> Drop for Rented<'_, T> {
    fn drop(&mut self) {
        let mut buffer = mem::take(&mut self.buffer);
        if self.clear {
            buffer.fill(T::default());
        }
        self.pool.give_back(buffer);
    }
}
