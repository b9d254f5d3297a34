//! Chunked bump allocation with stack-like rewinding.
//!
//! An [`Arena`] hands out byte ranges from a list of chunks. Each chunk is
//! reserved up front through a [`BaseAllocator`] and committed in
//! `commit_size` steps as the offset grows. Allocations never span chunks.
//! Memory is given back in bulk: [`Arena::clear`] resets every chunk,
//! [`Arena::scope_end`] rewinds to a saved position.
//!
//! Allocations are returned as [`Span`] handles rather than references, so
//! the arena can keep growing while handles are alive. Every allocation and
//! every rewind takes a stamp from a per-arena counter, and each chunk keeps
//! the rewinds that are still relevant. A span is checked against both on
//! every access, so reading a span that was rewound away yields `None` even
//! after its bytes have been handed out again.

use std::{
    array,
    cell::RefCell,
    fmt,
    ops::{Deref, DerefMut},
    str,
    sync::atomic::{AtomicU64, Ordering},
};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, fatal};

/// Default reservation for a new chunk.
const DEFAULT_RESERVE: usize = 1 << 20;
/// Default commit granularity.
const DEFAULT_COMMIT: usize = 64 << 10;
/// Default upper bound for a single chunk.
const DEFAULT_MAX_CHUNK: usize = 256 << 20;
/// Scratch arenas per thread.
const SCRATCH_COUNT: usize = 2;

/// Source of unique arena identifiers.
static NEXT_ARENA_ID: AtomicU64 = AtomicU64::new(1);

/// How the arena sizes chunks after the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Growth {
    /// Every chunk reserves `reserve_size`, or the request if larger.
    Fixed,
    /// Each new chunk doubles the previous one, up to `max_chunk_size`.
    #[default]
    Double,
}

/// Arena sizing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Bytes reserved for the first chunk.
    pub reserve_size: usize,
    /// Commit granularity in bytes.
    pub commit_size: usize,
    /// Largest chunk the arena will ever reserve.
    pub max_chunk_size: usize,
    /// Chunk growth policy.
    pub growth: Growth,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            reserve_size: DEFAULT_RESERVE,
            commit_size: DEFAULT_COMMIT,
            max_chunk_size: DEFAULT_MAX_CHUNK,
            growth: Growth::Double,
        }
    }
}

impl ArenaConfig {
    /// Sizing used for per-thread scratch arenas.
    pub fn scratch() -> Self {
        Self {
            reserve_size: 256 << 10,
            ..Self::default()
        }
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.reserve_size == 0 || self.commit_size == 0 {
            return Err(Error::Config(
                "arena reserve and commit sizes must be non-zero".into(),
            ));
        }
        if self.reserve_size > self.max_chunk_size {
            return Err(Error::Config(format!(
                "arena reserve size {} exceeds max chunk size {}",
                self.reserve_size, self.max_chunk_size
            )));
        }
        Ok(())
    }
}

/// A reserved block of memory, of which a prefix is committed.
#[derive(Debug)]
pub struct Reservation {
    /// Backing buffer. `len` is the committed size; the buffer is never
    /// grown past the reserved capacity, so it never moves.
    buf: Vec<u8>,
    /// Reserved size in bytes.
    cap: usize,
}

impl Reservation {
    /// Reserve `cap` bytes from the heap. Returns `None` if the allocation
    /// fails.
    pub fn heap(cap: usize) -> Option<Self> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(cap).ok()?;
        Some(Self { buf, cap })
    }

    /// Reserved size in bytes.
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Committed size in bytes.
    pub fn committed(&self) -> usize {
        self.buf.len()
    }

    /// Commit up to `size` bytes. Sizes beyond the reservation are clamped.
    pub fn commit_to(&mut self, size: usize) {
        let size = size.min(self.cap);
        if size > self.buf.len() {
            self.buf.resize(size, 0);
        }
    }

    /// Decommit down to `size` bytes. The reservation itself stays.
    pub fn decommit_to(&mut self, size: usize) {
        self.buf.truncate(size);
    }

    /// Address of the first byte, used for alignment arithmetic.
    fn base_addr(&self) -> usize {
        self.buf.as_ptr() as usize
    }
}

/// The memory source behind an arena.
pub trait BaseAllocator {
    /// Reserve a new block of `size` bytes.
    fn reserve(&mut self, size: usize) -> Result<Reservation>;
    /// Make the first `size` bytes of the block usable.
    fn commit(&mut self, mem: &mut Reservation, size: usize);
    /// Give back committed memory beyond `size` bytes.
    fn decommit(&mut self, mem: &mut Reservation, size: usize);
    /// Give back the whole block.
    fn release(&mut self, mem: Reservation);
}

/// The default base allocator, backed by the global heap.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapAllocator;

impl BaseAllocator for HeapAllocator {
    fn reserve(&mut self, size: usize) -> Result<Reservation> {
        Reservation::heap(size).ok_or(Error::Reserve(size))
    }

    fn commit(&mut self, mem: &mut Reservation, size: usize) {
        mem.commit_to(size);
    }

    fn decommit(&mut self, mem: &mut Reservation, size: usize) {
        mem.decommit_to(size);
    }

    fn release(&mut self, mem: Reservation) {
        drop(mem);
    }
}

/// Unique identity of an arena, used to avoid scratch collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaId(u64);

/// A byte range allocated from an arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Chunk index.
    chunk: usize,
    /// Byte offset within the chunk.
    offset: usize,
    /// Length in bytes.
    len: usize,
    /// Allocation stamp.
    stamp: u64,
}

impl Span {
    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for zero-size allocations.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A UTF-8 string stored in an arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaStr(Span);

/// A saved arena position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ArenaPos {
    /// Chunk index.
    chunk: usize,
    /// Offset within that chunk.
    offset: usize,
}

/// A rewind of a chunk to `offset`, taken at `stamp`.
#[derive(Debug, Clone, Copy)]
struct Rewind {
    /// Offset the chunk was rewound to.
    offset: usize,
    /// Stamp of the rewind.
    stamp: u64,
}

/// One contiguous block of arena memory.
#[derive(Debug)]
struct Chunk {
    /// Reserved and partly committed memory.
    mem: Reservation,
    /// Bump offset. Invariant: `offset <= committed <= cap`.
    offset: usize,
    /// Rewinds with strictly increasing offsets and stamps. A rewind to a
    /// lower offset supersedes every earlier one at or above it.
    rewinds: Vec<Rewind>,
}

impl Chunk {
    /// An empty chunk over `mem`.
    fn new(mem: Reservation) -> Self {
        Self {
            mem,
            offset: 0,
            rewinds: Vec::new(),
        }
    }

    /// Move the bump offset back to `offset`, invalidating everything
    /// allocated above it before `stamp`.
    fn rewind(&mut self, offset: usize, stamp: u64) {
        if offset >= self.offset {
            return;
        }
        while self.rewinds.last().is_some_and(|r| r.offset >= offset) {
            self.rewinds.pop();
        }
        self.rewinds.push(Rewind { offset, stamp });
        self.offset = offset;
    }

    /// Is `span` still backed by the bytes it was allocated?
    fn holds(&self, span: Span) -> bool {
        let end = span.offset + span.len;
        if end > self.offset {
            return false;
        }
        // The latest rewind below the span's end is the last one with a
        // lower offset.
        let i = self.rewinds.partition_point(|r| r.offset < end);
        i == 0 || self.rewinds[i - 1].stamp < span.stamp
    }

    /// Offset at which an allocation of `size` bytes aligned to `align`
    /// would start, if it fits within the reservation.
    fn fit(&self, size: usize, align: usize) -> Option<usize> {
        let base = self.mem.base_addr();
        let start = align_up(base + self.offset, align) - base;
        (start.checked_add(size)? <= self.mem.cap()).then_some(start)
    }
}

/// Round `v` up to a multiple of `align`, which must be a power of two.
fn align_up(v: usize, align: usize) -> usize {
    (v + align - 1) & !(align - 1)
}

/// A linear allocator with chunked growth.
pub struct Arena {
    /// Identity for scratch conflict checks.
    id: ArenaId,
    /// Sizing policy.
    config: ArenaConfig,
    /// Memory source.
    base: Box<dyn BaseAllocator>,
    /// Chunks in allocation order. Chunks after `current` are empty.
    chunks: Vec<Chunk>,
    /// Chunk that receives the next allocation.
    current: usize,
    /// Last stamp handed to an allocation or rewind.
    stamp: u64,
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("id", &self.id)
            .field("chunks", &self.chunks.len())
            .field("used", &self.used())
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(ArenaConfig::default())
    }
}

impl Arena {
    /// Construct an arena backed by the heap. No memory is reserved until
    /// the first push.
    pub fn new(config: ArenaConfig) -> Self {
        Self::with_allocator(config, Box::new(HeapAllocator))
    }

    /// Construct an arena with a custom base allocator.
    pub fn with_allocator(config: ArenaConfig, base: Box<dyn BaseAllocator>) -> Self {
        Self {
            id: ArenaId(NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed)),
            config,
            base,
            chunks: Vec::new(),
            current: 0,
            stamp: 0,
        }
    }

    /// This arena's identity.
    pub fn id(&self) -> ArenaId {
        self.id
    }

    /// Take the next stamp.
    fn next_stamp(&mut self) -> u64 {
        self.stamp += 1;
        self.stamp
    }

    /// Allocate `size` bytes aligned to `align`. Exceeding the maximum chunk
    /// size is a fatal usage error.
    #[track_caller]
    pub fn push(&mut self, size: usize, align: usize) -> Span {
        match self.try_push(size, align) {
            Ok(span) => span,
            Err(e) => fatal(e),
        }
    }

    /// Allocate `size` bytes aligned to `align`, reporting requests that no
    /// chunk can hold.
    pub fn try_push(&mut self, size: usize, align: usize) -> Result<Span> {
        assert!(align.is_power_of_two(), "alignment must be a power of two");
        if size == 0 {
            let offset = self.chunks.get(self.current).map_or(0, |c| c.offset);
            return Ok(Span {
                chunk: self.current,
                offset,
                len: 0,
                stamp: self.stamp,
            });
        }
        let mut idx = self.current;
        let start = loop {
            if let Some(chunk) = self.chunks.get(idx) {
                if let Some(start) = chunk.fit(size, align) {
                    break start;
                }
                idx += 1;
                continue;
            }
            self.grow(size, align)?;
            idx = self.chunks.len() - 1;
        };
        self.current = idx;
        let stamp = self.next_stamp();
        let end = start + size;
        let commit_size = self.config.commit_size;
        let chunk = &mut self.chunks[idx];
        if end > chunk.mem.committed() {
            let target = align_up(end, commit_size.next_power_of_two()).min(chunk.mem.cap());
            self.base.commit(&mut chunk.mem, target);
        }
        chunk.offset = end;
        Ok(Span {
            chunk: idx,
            offset: start,
            len: size,
            stamp,
        })
    }

    /// Reserve a chunk large enough for `size` bytes at `align`.
    fn grow(&mut self, size: usize, align: usize) -> Result<()> {
        let limit = self.config.max_chunk_size;
        let need = match size.checked_add(align - 1) {
            Some(need) if need <= limit => need,
            need => {
                return Err(Error::ArenaExhausted {
                    requested: need.unwrap_or(usize::MAX),
                    limit,
                });
            }
        };
        let cap = match (self.config.growth, self.chunks.last()) {
            (Growth::Double, Some(last)) => last.mem.cap().saturating_mul(2).min(limit),
            _ => self.config.reserve_size,
        }
        .max(need);
        let mem = self.base.reserve(cap)?;
        tracing::trace!(arena = self.id.0, cap, "arena chunk reserved");
        self.chunks.push(Chunk::new(mem));
        Ok(())
    }

    /// Copy bytes into the arena.
    #[track_caller]
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Span {
        let span = self.push(bytes.len(), 1);
        if let Some(dst) = self.bytes_mut(span) {
            dst.copy_from_slice(bytes);
        }
        span
    }

    /// Copy a string into the arena.
    #[track_caller]
    pub fn push_str(&mut self, s: &str) -> ArenaStr {
        ArenaStr(self.push_bytes(s.as_bytes()))
    }

    /// Read an allocation. Returns `None` if the span was rewound away.
    pub fn bytes(&self, span: Span) -> Option<&[u8]> {
        if span.len == 0 {
            return Some(&[][..]);
        }
        let chunk = self.chunks.get(span.chunk)?;
        chunk
            .holds(span)
            .then(|| &chunk.mem.buf[span.offset..span.offset + span.len])
    }

    /// Mutably access an allocation. Returns `None` if the span was rewound
    /// away.
    pub fn bytes_mut(&mut self, span: Span) -> Option<&mut [u8]> {
        if span.len == 0 {
            return Some(&mut [][..]);
        }
        let chunk = self.chunks.get_mut(span.chunk)?;
        if chunk.holds(span) {
            Some(&mut chunk.mem.buf[span.offset..span.offset + span.len])
        } else {
            None
        }
    }

    /// Read a string stored with [`Arena::push_str`].
    pub fn str(&self, s: ArenaStr) -> Option<&str> {
        str::from_utf8(self.bytes(s.0)?).ok()
    }

    /// Reset every chunk to empty. Committed memory is kept for reuse.
    pub fn clear(&mut self) {
        let stamp = self.next_stamp();
        for c in &mut self.chunks {
            c.rewind(0, stamp);
        }
        self.current = 0;
    }

    /// Give back chunks past the current one and decommit the unused tail
    /// of the current chunk.
    pub fn release_unused(&mut self) {
        while self.chunks.len() > self.current + 1 {
            if let Some(chunk) = self.chunks.pop() {
                self.base.release(chunk.mem);
            }
        }
        if let Some(chunk) = self.chunks.get_mut(self.current) {
            let keep = align_up(chunk.offset, self.config.commit_size.next_power_of_two());
            let cap = chunk.mem.cap();
            self.base.decommit(&mut chunk.mem, keep.min(cap));
        }
    }

    /// The current allocation position.
    pub fn pos(&self) -> ArenaPos {
        ArenaPos {
            chunk: self.current,
            offset: self.chunks.get(self.current).map_or(0, |c| c.offset),
        }
    }

    /// Save the current position for a later [`Arena::scope_end`].
    ///
    /// Scopes on one arena must be ended in LIFO order. Ending an outer scope
    /// and then an inner one leaves the arena in an inconsistent state; this
    /// is only checked in debug builds.
    pub fn scope_begin(&self) -> ArenaPos {
        self.pos()
    }

    /// Rewind to a position saved by [`Arena::scope_begin`].
    pub fn scope_end(&mut self, pos: ArenaPos) {
        debug_assert!(pos <= self.pos(), "arena scopes ended out of order");
        let stamp = self.next_stamp();
        for c in self.chunks.iter_mut().skip(pos.chunk + 1) {
            c.rewind(0, stamp);
        }
        if let Some(c) = self.chunks.get_mut(pos.chunk) {
            c.rewind(pos.offset, stamp);
        }
        self.current = pos.chunk;
    }

    /// Begin a scope that rewinds when the returned guard is dropped.
    pub fn scope(&mut self) -> Scope<'_> {
        let pos = self.scope_begin();
        Scope { arena: self, pos }
    }

    /// Bytes in use across all chunks.
    pub fn used(&self) -> usize {
        self.chunks.iter().map(|c| c.offset).sum()
    }

    /// Bytes committed across all chunks.
    pub fn committed(&self) -> usize {
        self.chunks.iter().map(|c| c.mem.committed()).sum()
    }

    /// Bytes reserved across all chunks.
    pub fn capacity(&self) -> usize {
        self.chunks.iter().map(|c| c.mem.cap()).sum()
    }

    /// Number of chunks reserved so far.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        for chunk in self.chunks.drain(..) {
            self.base.release(chunk.mem);
        }
    }
}

/// A scope on an arena that rewinds when dropped.
pub struct Scope<'a> {
    /// The scoped arena.
    arena: &'a mut Arena,
    /// Position to rewind to.
    pos: ArenaPos,
}

impl Deref for Scope<'_> {
    type Target = Arena;

    fn deref(&self) -> &Arena {
        self.arena
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut Arena {
        self.arena
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        self.arena.scope_end(self.pos);
    }
}

thread_local! {
    /// Per-thread scratch pool, created on first use and never destroyed.
    static SCRATCH: [RefCell<Arena>; SCRATCH_COUNT] =
        array::from_fn(|_| RefCell::new(Arena::new(ArenaConfig::scratch())));
}

/// Run `f` with a scratch arena that is not checked out and whose id is not
/// in `conflicts`. Everything `f` allocates is rewound when it returns, even
/// if it unwinds. Running out of scratch arenas is fatal.
#[track_caller]
pub fn with_scratch<R>(conflicts: &[ArenaId], f: impl FnOnce(&mut Arena) -> R) -> R {
    match try_with_scratch(conflicts, f) {
        Ok(r) => r,
        Err(e) => fatal(e),
    }
}

/// Like [`with_scratch`], but reports an exhausted pool as an error.
pub fn try_with_scratch<R>(conflicts: &[ArenaId], f: impl FnOnce(&mut Arena) -> R) -> Result<R> {
    SCRATCH.with(|pool| {
        for cell in pool {
            let Ok(arena) = cell.try_borrow_mut() else {
                continue;
            };
            if conflicts.contains(&arena.id()) {
                continue;
            }
            let pos = arena.scope_begin();
            let mut arena = scopeguard::guard(arena, move |mut a| a.scope_end(pos));
            return Ok(f(&mut **arena));
        }
        Err(Error::ScratchUnavailable)
    })
}
