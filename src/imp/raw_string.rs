use core::{
    marker::PhantomData,
    mem::{size_of, MaybeUninit},
    ptr::{self, NonNull},
    slice,
};
use std::alloc::{self, Allocator, Layout};

use crate::{ReserveStrategy, TryReserveError, Unit};

/// Number of payload bytes in the inline representation.
///
/// The whole string is exactly four pointers wide for every unit type; the last byte is the tag, everything before it is
/// inline payload. A unit type of width `w` therefore gets `SSO_BYTES / w` inline slots, one of which is reserved for
/// the terminator.
pub(crate) const SSO_BYTES: usize = 4 * size_of::<usize>() - 1;

/// Padding between the heap descriptor (three pointers) and the tag byte, so the tag lands on the same offset in both
/// union variants.
const HEAP_PAD: usize = SSO_BYTES - 3 * size_of::<usize>();

/// Tag value marking the heap representation. Inline lengths can never reach it, as `SHORT_MAX < 255` on every
/// supported pointer width.
const HEAP_TAG: u8 = u8::MAX;

/// Descriptor of a heap allocation: `begin` points at the first unit, `end` one past the last logical unit, and `last`
/// one past the last usable slot. The slot at `last` itself is the reserved terminator slot, so the allocation spans
/// `[begin, last + 1)` and the usable capacity is `last - begin`.
#[derive(Clone, Copy)]
#[repr(C)]
pub(crate) struct HeapBuf<C> {
    begin: NonNull<C>,
    end:   *mut C,
    last:  NonNull<C>,
}

#[derive(Clone, Copy)]
#[repr(C)]
struct InlineRepr {
    data: [MaybeUninit<u8>; SSO_BYTES],
    tag:  u8,
}

#[derive(Clone, Copy)]
#[repr(C)]
struct HeapRepr<C> {
    buf:  HeapBuf<C>,
    _pad: [MaybeUninit<u8>; HEAP_PAD],
    tag:  u8,
}

/// The two physical layouts share their total size and the offset of the trailing tag byte, which is what allows the
/// tag to be read without knowing the active variant first.
#[repr(C)]
union Repr<C: Unit> {
    inline: InlineRepr,
    heap:   HeapRepr<C>,
}

/// Low level utility for more ergonomically managing the tagged inline/heap storage of a string without having to
/// worry about all the corner cases involved. In particular:
///
/// - Keeps a terminator unit (`C::NUL`) one past the logical end at all times, in both representations.
/// - Keeps the discriminant and the union in sync: a tag in `[0, SHORT_MAX]` is an inline length, the all-ones tag
///   marks the heap representation.
/// - Requests one extra slot from the allocator for the terminator and uses the excess the allocator returns, so the
///   largest available allocation is used.
/// - Catches all overflows in capacity computations (promotes them to "capacity overflow" errors).
/// - Never releases capacity on its own: shrinking the logical size keeps the storage, only [`shrink_to_fit`] goes
///   back to the inline form.
/// - Every fallible operation either succeeds or leaves the string byte-for-byte untouched, which is achieved by
///   allocating and filling the new buffer before the old one is released.
///
/// This type does not interpret the units it manages; encoding is the caller's problem.
///
/// [`shrink_to_fit`]: RawString::shrink_to_fit
pub(crate) struct RawString<C: Unit, A: Allocator, R: ReserveStrategy> {
    repr:     Repr<C>,
    alloc:    A,
    _phantom: PhantomData<R>,
}

impl<C: Unit, A: Allocator, R: ReserveStrategy> RawString<C, A, R> {
    /// The inline capacity: the number of units that fit in the object itself, not counting the terminator slot.
    pub const SHORT_MAX: usize = SSO_BYTES / size_of::<C>() - 1;

    /// Creates an empty inline string without allocating.
    ///
    /// The payload is zeroed rather than left uninit, which establishes the terminator for free (the terminator is
    /// required to be the all-zero unit).
    #[must_use]
    pub const fn new_in(alloc: A) -> Self {
        Self {
            repr: Repr { inline: InlineRepr { data: [MaybeUninit::new(0); SSO_BYTES], tag: 0 } },
            alloc,
            _phantom: PhantomData,
        }
    }

    /// Creates a string with at least the requested capacity: inline if it fits, a fresh heap buffer otherwise.
    ///
    /// # Panics
    ///
    /// Panics if the requested capacity exceeds `isize::MAX` bytes.
    ///
    /// # Aborts
    ///
    /// Aborts on OOM.
    #[must_use]
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        match Self::try_with_capacity_in(capacity, alloc) {
            Ok(s) => s,
            Err(err) => handle_error(err),
        }
    }

    /// The same as `with_capacity_in`, but returns on errors instead of panicking or aborting.
    pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, TryReserveError> {
        let mut s = Self::new_in(alloc);
        if capacity > Self::SHORT_MAX {
            let buf = Self::allocate_buf(&s.alloc, capacity)?;
            // Safety: the buffer was just allocated by our own allocator.
            unsafe { s.adopt_buf(buf, 0) };
        }
        Ok(s)
    }

    /// Get the allocator of the string.
    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    //--------------------------------------------------------------

    /// Returns whether the string currently uses the heap representation.
    #[inline]
    pub const fn is_heap(&self) -> bool {
        // Safety: the tag byte shares its offset between both variants and is always initialized.
        unsafe { self.repr.inline.tag == HEAP_TAG }
    }

    /// Get the logical length in units, excluding the terminator.
    #[inline]
    pub const fn len(&self) -> usize {
        if self.is_heap() {
            // Safety: the tag says the heap variant is active, so the descriptor is valid and both pointers are
            // derived from the same allocation.
            unsafe {
                let buf = &self.repr.heap.buf;
                buf.end.offset_from(buf.begin.as_ptr()) as usize
            }
        } else {
            // Safety: see `is_heap`.
            unsafe { self.repr.inline.tag as usize }
        }
    }

    /// Get the capacity in units, excluding the reserved terminator slot.
    ///
    /// This never decreases over the lifetime of the string, except across [`shrink_to_fit`].
    ///
    /// [`shrink_to_fit`]: RawString::shrink_to_fit
    #[inline]
    pub const fn capacity(&self) -> usize {
        if self.is_heap() {
            // Safety: see `len`.
            unsafe {
                let buf = &self.repr.heap.buf;
                buf.last.as_ptr().offset_from(buf.begin.as_ptr()) as usize
            }
        } else {
            Self::SHORT_MAX
        }
    }

    /// Get a raw pointer to the first unit. Always valid for `capacity() + 1` units, and the unit at `len()` is the
    /// terminator.
    #[inline]
    pub const fn as_ptr(&self) -> *const C {
        if self.is_heap() {
            // Safety: see `len`.
            unsafe { self.repr.heap.buf.begin.as_ptr() }
        } else {
            // Safety: the inline payload sits at offset 0 of a pointer-aligned union, so the cast preserves alignment
            // for every supported unit width.
            unsafe { self.repr.inline.data.as_ptr() as *const C }
        }
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut C {
        if self.is_heap() {
            unsafe { self.repr.heap.buf.begin.as_ptr() }
        } else {
            unsafe { self.repr.inline.data.as_mut_ptr() as *mut C }
        }
    }

    #[inline]
    pub const fn as_slice(&self) -> &[C] {
        // Safety: the first `len` units are always initialized.
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len()) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [C] {
        let len = self.len();
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), len) }
    }

    /// Sets the logical length and rewrites the terminator. Never touches the capacity and never switches
    /// representations.
    ///
    /// # Safety
    ///
    /// - `new_len` must be less than or equal to [`capacity()`].
    /// - The units at `0..new_len` must be initialized.
    ///
    /// [`capacity()`]: RawString::capacity
    #[inline]
    pub unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.capacity());

        if self.is_heap() {
            let buf = &mut self.repr.heap.buf;
            buf.end = buf.begin.as_ptr().add(new_len);
            buf.end.write(C::NUL);
        } else {
            self.repr.inline.tag = new_len as u8;
            (self.repr.inline.data.as_mut_ptr() as *mut C).add(new_len).write(C::NUL);
        }
    }

    //--------------------------------------------------------------

    /// Allocates a heap buffer with at least `capacity` usable slots, plus the reserved terminator slot.
    ///
    /// The allocator may return more memory than requested ("allocate at least" semantics); the excess is folded into
    /// the usable capacity. The returned descriptor has `end == begin`, the caller decides the logical length when
    /// adopting it.
    fn allocate_buf(alloc: &A, capacity: usize) -> Result<HeapBuf<C>, TryReserveError> {
        let units = capacity.checked_add(1).ok_or(TryReserveError::CapacityOverflow)?;
        // `Layout::array` also catches requests over `isize::MAX` bytes.
        let Ok(layout) = Layout::array::<C>(units) else {
            return Err(TryReserveError::CapacityOverflow);
        };

        match alloc.allocate(layout) {
            Ok(ptr) => {
                let granted = ptr.len() / size_of::<C>();
                let begin: NonNull<C> = ptr.cast();
                // Safety: `granted >= units >= 1`, and the offset stays inside the allocation.
                let last = unsafe { NonNull::new_unchecked(begin.as_ptr().add(granted - 1)) };
                Ok(HeapBuf { begin, end: begin.as_ptr(), last })
            },
            Err(_) => Err(TryReserveError::AllocError(layout)),
        }
    }

    /// Releases the span `[begin, last + 1)` of a previously allocated buffer.
    ///
    /// # Safety
    ///
    /// - `buf` must have been allocated by `alloc` and not released yet.
    unsafe fn dealloc_buf(alloc: &A, buf: HeapBuf<C>) {
        let units = buf.last.as_ptr().offset_from(buf.begin.as_ptr()) as usize + 1;
        // This layout fits the allocation: its size lies between what was requested and what was granted, so we can
        // skip the checks `Layout::array` would redo.
        let layout = Layout::from_size_align_unchecked(units * size_of::<C>(), core::mem::align_of::<C>());
        alloc.deallocate(buf.begin.cast(), layout);
    }

    /// Switches to the heap representation described by `buf`, with `len` initialized units.
    ///
    /// The union and the tag are overwritten together and the terminator is re-established, so from the caller's
    /// perspective the representation switch is a single step. The previous heap buffer, if any, is NOT released;
    /// the caller holds a copy and releases it after the switch.
    ///
    /// # Safety
    ///
    /// - `buf` must have been allocated by `self.alloc`.
    /// - The first `len` units of `buf` must be initialized and `len` must not exceed its usable capacity.
    unsafe fn adopt_buf(&mut self, mut buf: HeapBuf<C>, len: usize) {
        buf.end = buf.begin.as_ptr().add(len);
        buf.end.write(C::NUL);
        self.repr.heap = HeapRepr { buf, _pad: [MaybeUninit::uninit(); HEAP_PAD], tag: HEAP_TAG };
    }

    /// Moves the content into a fresh heap buffer of exactly `new_cap` usable slots (more if the allocator grants
    /// excess) and releases the old buffer.
    ///
    /// On failure the string is untouched: the new buffer is allocated and filled before the old one is released.
    fn relocate(&mut self, new_cap: usize) -> Result<(), TryReserveError> {
        debug_assert!(new_cap > self.capacity());

        let len = self.len();
        let new = Self::allocate_buf(&self.alloc, new_cap)?;
        unsafe {
            ptr::copy_nonoverlapping(self.as_ptr(), new.begin.as_ptr(), len);
            let old = self.is_heap().then(|| self.repr.heap.buf);
            self.adopt_buf(new, len);
            if let Some(old) = old {
                Self::dealloc_buf(&self.alloc, old);
            }
        }
        Ok(())
    }

    //--------------------------------------------------------------

    /// Ensures the buffer has space for at least `additional` more units, growing by the reserve strategy to keep
    /// repeated appends amortized *O*(1).
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` bytes.
    ///
    /// # Aborts
    ///
    /// Aborts on OOM.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        // Callers expect this to be very cheap when there already is sufficient capacity, so the growth and error
        // handling sits behind a cold call.
        #[cold]
        fn do_reserve_and_handle<C: Unit, A: Allocator, R: ReserveStrategy>(
            slf: &mut RawString<C, A, R>,
            additional: usize,
        ) {
            if let Err(err) = slf.try_reserve(additional) {
                handle_error(err);
            }
        }

        if additional > self.capacity().wrapping_sub(self.len()) {
            do_reserve_and_handle(self, additional);
        }
    }

    /// A specialized version of `self.reserve(1)`, for the push hot path.
    #[cold]
    pub fn grow_one(&mut self) {
        if let Err(err) = self.try_reserve(1) {
            handle_error(err);
        }
    }

    /// The same as `reserve`, but returns on errors instead of panicking or aborting.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let required = self.len().checked_add(additional).ok_or(TryReserveError::CapacityOverflow)?;
        if required <= self.capacity() {
            return Ok(());
        }
        let new_cap = grow_cap::<R>(self.capacity(), required)?;
        self.relocate(new_cap)
    }

    /// Ensures space for exactly `additional` more units, without the amortization slack.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` bytes.
    ///
    /// # Aborts
    ///
    /// Aborts on OOM.
    pub fn reserve_exact(&mut self, additional: usize) {
        if let Err(err) = self.try_reserve_exact(additional) {
            handle_error(err);
        }
    }

    pub fn try_reserve_exact(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let required = self.len().checked_add(additional).ok_or(TryReserveError::CapacityOverflow)?;
        if required <= self.capacity() {
            return Ok(());
        }
        self.relocate(required)
    }

    /// Copies the content back into the inline buffer and releases the heap allocation.
    ///
    /// This is the only operation that ever gives capacity back. It only takes effect in the heap representation when
    /// the content fits inline; otherwise it does nothing, which also makes it idempotent.
    pub fn shrink_to_fit(&mut self) {
        if !self.is_heap() || self.len() > Self::SHORT_MAX {
            return;
        }

        unsafe {
            let buf = self.repr.heap.buf;
            let len = self.len();
            self.repr.inline = InlineRepr { data: [MaybeUninit::uninit(); SSO_BYTES], tag: len as u8 };
            let dst = self.repr.inline.data.as_mut_ptr() as *mut C;
            ptr::copy_nonoverlapping(buf.begin.as_ptr(), dst, len);
            dst.add(len).write(C::NUL);
            Self::dealloc_buf(&self.alloc, buf);
        }
    }

    //--------------------------------------------------------------

    /// Returns whether `[src, src + n)` intersects the string's own storage, terminator slot included.
    ///
    /// Raw pointers order totally by address, so the interval test is exact at runtime; there is no execution mode in
    /// which it has to pessimize.
    fn overlaps(&self, src: *const C, n: usize) -> bool {
        let start = self.as_ptr() as usize;
        let end = start + (self.capacity() + 1) * size_of::<C>();
        let s = src as usize;
        let e = s + n * size_of::<C>();
        s < end && start < e
    }

    /// Replaces the entire content with `n` units read from `src`.
    ///
    /// If the capacity suffices, the copy happens in place (and is skipped entirely when `src` already is the start of
    /// our own storage); otherwise the content is copied into a fresh allocation of exactly `n` slots before the old
    /// buffer is released.
    ///
    /// # Safety
    ///
    /// - `src` must be valid for `n` reads. It may alias the string's own storage.
    pub unsafe fn assign_raw(&mut self, src: *const C, n: usize) -> Result<(), TryReserveError> {
        if n > self.capacity() {
            let new = Self::allocate_buf(&self.alloc, n)?;
            // The old buffer stays intact until after the copy, so `src` may point into it.
            ptr::copy_nonoverlapping(src, new.begin.as_ptr(), n);
            let old = self.is_heap().then(|| self.repr.heap.buf);
            self.adopt_buf(new, n);
            if let Some(old) = old {
                Self::dealloc_buf(&self.alloc, old);
            }
        } else {
            let base = self.as_mut_ptr();
            if src != base as *const C {
                // `src` may be a subrange of our own content, so this must be an overlap-tolerant copy.
                ptr::copy(src, base, n);
            }
            self.set_len(n);
        }
        Ok(())
    }

    /// Inserts `n` units read from `src` at `index`, shifting the tail right.
    ///
    /// When the capacity suffices the tail is shifted with a backward copy and the new range is written in place; a
    /// source range that aliases the shifted content is re-derived from its moved location instead of being copied
    /// out first. Otherwise the result is assembled in a fresh allocation (prefix, new range, suffix) which is adopted
    /// only once complete, keeping the old state intact on failure.
    ///
    /// # Safety
    ///
    /// - `index <= len()`.
    /// - `src` must be valid for `n` reads. If it aliases the string's own storage, the range must lie entirely within
    ///   the initialized units `[0, len()]`.
    pub unsafe fn insert_raw(&mut self, index: usize, src: *const C, n: usize) -> Result<(), TryReserveError> {
        let len = self.len();
        debug_assert!(index <= len);

        if n == 0 {
            return Ok(());
        }

        let required = len.checked_add(n).ok_or(TryReserveError::CapacityOverflow)?;
        if required > self.capacity() {
            let new_cap = grow_cap::<R>(self.capacity(), required)?;
            let new = Self::allocate_buf(&self.alloc, new_cap)?;
            let old_ptr = self.as_ptr();
            let dst = new.begin.as_ptr();
            // Prefix, new range, suffix. `src` may point into the old buffer, which is untouched until adopted.
            ptr::copy_nonoverlapping(old_ptr, dst, index);
            ptr::copy_nonoverlapping(src, dst.add(index), n);
            ptr::copy_nonoverlapping(old_ptr.add(index), dst.add(index + n), len - index);
            let old = self.is_heap().then(|| self.repr.heap.buf);
            self.adopt_buf(new, required);
            if let Some(old) = old {
                Self::dealloc_buf(&self.alloc, old);
            }
            return Ok(());
        }

        let overlapping = self.overlaps(src, n);
        let base = self.as_mut_ptr();
        // Shift the tail right; the regions overlap whenever `n < len - index`.
        ptr::copy(base.add(index), base.add(index + n), len - index);

        if overlapping {
            // The source lies in our own content, and everything at or after `index` just moved by `n`.
            let split = base.add(index) as *const C;
            if src >= split {
                ptr::copy_nonoverlapping(src.add(n), base.add(index), n);
            } else if src.add(n) <= split {
                ptr::copy_nonoverlapping(src, base.add(index), n);
            } else {
                // The range straddles the insertion point: its head kept its address, its tail moved.
                let head = split.offset_from(src) as usize;
                ptr::copy_nonoverlapping(src, base.add(index), head);
                ptr::copy_nonoverlapping(src.add(head + n), base.add(index + head), n - head);
            }
        } else {
            ptr::copy_nonoverlapping(src, base.add(index), n);
        }
        self.set_len(required);
        Ok(())
    }

    /// Appends `n` units read from `src`. Equivalent to `insert_raw` at `index == len()`, with the same aliasing
    /// contract.
    ///
    /// # Safety
    ///
    /// See [`insert_raw`](RawString::insert_raw).
    #[inline]
    pub unsafe fn append_raw(&mut self, src: *const C, n: usize) -> Result<(), TryReserveError> {
        self.insert_raw(self.len(), src, n)
    }

    /// Replaces the units at `[start, end)` with `n` units read from `src`.
    ///
    /// The in-place path shifts the unaffected tail left or right depending on whether the replacement is shorter or
    /// longer than the replaced span, then overwrites the gap. A source that aliases the disturbed part of the storage
    /// is first materialized into a temporary buffer, and insufficient capacity assembles the result in a fresh
    /// allocation, both of which leave the string untouched on failure.
    ///
    /// # Safety
    ///
    /// - `start <= end <= len()`.
    /// - `src` must be valid for `n` reads. If it aliases the string's own storage, the range must lie entirely within
    ///   the initialized units `[0, len()]`.
    pub unsafe fn replace_raw(&mut self, start: usize, end: usize, src: *const C, n: usize) -> Result<(), TryReserveError> {
        let len = self.len();
        debug_assert!(start <= end && end <= len);

        let count = end - start;
        let new_len = (len - count).checked_add(n).ok_or(TryReserveError::CapacityOverflow)?;

        if new_len > self.capacity() {
            let new_cap = grow_cap::<R>(self.capacity(), new_len)?;
            let new = Self::allocate_buf(&self.alloc, new_cap)?;
            let old_ptr = self.as_ptr();
            let dst = new.begin.as_ptr();
            ptr::copy_nonoverlapping(old_ptr, dst, start);
            ptr::copy_nonoverlapping(src, dst.add(start), n);
            ptr::copy_nonoverlapping(old_ptr.add(end), dst.add(start + n), len - end);
            let old = self.is_heap().then(|| self.repr.heap.buf);
            self.adopt_buf(new, new_len);
            if let Some(old) = old {
                Self::dealloc_buf(&self.alloc, old);
            }
            return Ok(());
        }

        // Everything from `start` on may move or be overwritten. A source before `start` is safe to read after the
        // shift; anything else aliasing that region goes through a temporary copy.
        let disturbed = self.as_ptr().add(start);
        let needs_tmp = self.overlaps(src, n) && src.add(n) > disturbed;
        if needs_tmp {
            let Ok(tmp_layout) = Layout::array::<C>(n) else {
                return Err(TryReserveError::CapacityOverflow);
            };
            let Ok(tmp) = self.alloc.allocate(tmp_layout) else {
                return Err(TryReserveError::AllocError(tmp_layout));
            };
            let tmp_ptr: *mut C = tmp.cast().as_ptr();
            ptr::copy_nonoverlapping(src, tmp_ptr, n);
            self.replace_in_place(start, end, tmp_ptr, n);
            self.alloc.deallocate(tmp.cast(), tmp_layout);
        } else {
            self.replace_in_place(start, end, src, n);
        }
        Ok(())
    }

    /// # Safety
    ///
    /// Capacity checked by the caller, `src` disjoint from the storage at `start` and beyond.
    unsafe fn replace_in_place(&mut self, start: usize, end: usize, src: *const C, n: usize) {
        let len = self.len();
        let base = self.as_mut_ptr();
        ptr::copy(base.add(end), base.add(start + n), len - end);
        ptr::copy_nonoverlapping(src, base.add(start), n);
        self.set_len(len - (end - start) + n);
    }

    /// Removes the units at `[start, end)` by shifting the tail down. Purely in place: never reallocates and never
    /// releases capacity.
    ///
    /// # Safety
    ///
    /// - `start <= end <= len()`.
    pub unsafe fn erase_raw(&mut self, start: usize, end: usize) {
        let len = self.len();
        debug_assert!(start <= end && end <= len);

        let base = self.as_mut_ptr();
        ptr::copy(base.add(end), base.add(start), len - end);
        self.set_len(len - (end - start));
    }
}

impl<C: Unit, A: Allocator, R: ReserveStrategy> Drop for RawString<C, A, R> {
    fn drop(&mut self) {
        if self.is_heap() {
            // Safety: the tag says the heap descriptor is live, and it is released exactly once.
            unsafe { Self::dealloc_buf(&self.alloc, self.repr.heap.buf) };
        }
    }
}

// Units are plain values, so the string is as thread-compatible as its allocator.
unsafe impl<C: Unit, A: Allocator + Send, R: ReserveStrategy> Send for RawString<C, A, R> {}
unsafe impl<C: Unit, A: Allocator + Sync, R: ReserveStrategy> Sync for RawString<C, A, R> {}

//--------------------------------------------------------------

fn grow_cap<R: ReserveStrategy>(cur_capacity: usize, min_capacity: usize) -> Result<usize, TryReserveError> {
    match R::calculate(cur_capacity, min_capacity) {
        Ok(cap) => Ok(cap.max(min_capacity)),
        Err(()) => Err(TryReserveError::CapacityOverflow),
    }
}

/// Central function for reserve error handling
#[cold]
pub(crate) fn handle_error(e: TryReserveError) -> ! {
    match e {
        TryReserveError::CapacityOverflow => capacity_overflow(),
        TryReserveError::AllocError(layout) => alloc::handle_alloc_error(layout),
    }
}

fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}
