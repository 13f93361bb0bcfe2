use core::{
    fmt,
    hash::Hash,
    mem,
    ops::{self, Index, IndexMut, Range, RangeBounds},
    ptr,
    slice::{self, SliceIndex},
};
use std::alloc::{Allocator, Global};

use crate::{
    imp::raw_string::{handle_error, RawString},
    impl_slice_partial_eq, ReserveStrategy, ThreeHalvesReserveStrategy, TryReserveError, Unit,
};

mod into_iter;

pub use into_iter::IntoIter;

#[cfg(test)]
mod tests;

/// A contiguous, growable string of raw character units with a small-string optimization.
///
/// Short content is stored inside the object itself; only content longer than [`INLINE_CAPACITY`] units moves to a
/// heap allocation obtained from the allocator `A`. In both representations the units are followed by a zero-valued
/// terminator, so [`as_ptr`] always yields a null-terminated buffer that C-style consumers can walk.
///
/// _Note: the string stores raw code units (`u8`, `i8`, `u16`, `u32`, or `char`) and attaches no encoding to them;
/// it is not a replacement for [`String`] when UTF-8 correctness is what you want._
///
/// # Examples
///
/// ```
/// use shortstr::ShortString;
///
/// let mut s = ShortString::<u8>::new();
/// s.append(b"hello");
/// s.push(b'!');
///
/// assert_eq!(s, *b"hello!");
/// assert_eq!(s.len(), 6);
/// assert!(!s.is_heap_allocated());
/// ```
///
/// The [`shortstr!`] macro is provided for convenient initialization:
///
/// ```
/// use shortstr::{shortstr, ShortString};
///
/// let a: ShortString<u8> = shortstr![b'a', b'b', b'c'];
/// let b: ShortString<u8> = shortstr![b'x'; 4];
/// assert_eq!(a, *b"abc");
/// assert_eq!(b, *b"xxxx");
/// ```
///
/// # Representation
///
/// The object is always exactly four pointers wide, for every unit type. The last byte is the discriminant: a value
/// up to [`INLINE_CAPACITY`] is the length of inline content, the all-ones value marks heap content described by three
/// pointers (begin, one-past-last unit, one-past-last usable slot). A unit type of width `w` therefore gets
/// `(4 * size_of::<usize>() - 1) / w - 1` inline slots:
///
/// ```text
/// inline  +-----------------------------------+-----+
///         |  units, terminator, spare slots   | tag |
///         +-----------------------------------+-----+
///
/// heap    +----------+----------+----------+--+-----+
///         |  begin   |   end    |   last   |  | tag |
///         +----------+----------+----------+--+-----+
///              |          |          |
///              v          v          v
///         +---------------------------------------+
///         |  units ... | nul | spare slots        |
///         +---------------------------------------+
/// ```
///
/// # Capacity and reallocation
///
/// The capacity never shrinks on its own: erasing, truncating, or assigning something smaller keeps the storage, and
/// a string that moved to the heap stays there. The single exception is [`shrink_to_fit`], which copies content that
/// fits back into the object and releases the allocation.
///
/// When a mutation needs more room, the new buffer is grown by the [`ReserveStrategy`] `R` (by default
/// [`ThreeHalvesReserveStrategy`], a 1.5 growth factor), filled, and only then swapped in, so a failed allocation
/// leaves the string exactly as it was.
///
/// [`INLINE_CAPACITY`]: ShortString::INLINE_CAPACITY
/// [`as_ptr`]: ShortString::as_ptr
/// [`shrink_to_fit`]: ShortString::shrink_to_fit
/// [`String`]: std::string::String
/// [`ReserveStrategy`]: crate::ReserveStrategy
/// [`ThreeHalvesReserveStrategy`]: crate::ThreeHalvesReserveStrategy
pub struct ShortString<C: Unit, A: Allocator = Global, R: ReserveStrategy = ThreeHalvesReserveStrategy> {
    raw: RawString<C, A, R>,
}

const_assert_eq!(mem::size_of::<ShortString<u8>>(), 4 * mem::size_of::<usize>());
const_assert_eq!(mem::size_of::<ShortString<i8>>(), 4 * mem::size_of::<usize>());
const_assert_eq!(mem::size_of::<ShortString<u16>>(), 4 * mem::size_of::<usize>());
const_assert_eq!(mem::size_of::<ShortString<u32>>(), 4 * mem::size_of::<usize>());
const_assert_eq!(mem::size_of::<ShortString<char>>(), 4 * mem::size_of::<usize>());

cfg_if::cfg_if! {
    if #[cfg(target_pointer_width = "64")] {
        const_assert_eq!(ShortString::<u8>::INLINE_CAPACITY, 30);
        const_assert_eq!(ShortString::<u16>::INLINE_CAPACITY, 14);
        const_assert_eq!(ShortString::<u32>::INLINE_CAPACITY, 6);
    } else if #[cfg(target_pointer_width = "32")] {
        const_assert_eq!(ShortString::<u8>::INLINE_CAPACITY, 14);
        const_assert_eq!(ShortString::<u16>::INLINE_CAPACITY, 6);
        const_assert_eq!(ShortString::<u32>::INLINE_CAPACITY, 2);
    }
}

impl<C: Unit, A: Allocator, R: ReserveStrategy> ShortString<C, A, R> {
    /// The number of units that fit in the object itself without allocating, not counting the terminator.
    pub const INLINE_CAPACITY: usize = RawString::<C, A, R>::SHORT_MAX;

    /// Constructs a new, empty `ShortString`.
    ///
    /// The string starts in the inline representation and will not allocate until its content outgrows
    /// [`INLINE_CAPACITY`](ShortString::INLINE_CAPACITY).
    #[inline]
    #[must_use]
    pub fn new() -> Self where
        A: Default
    {
        Self::new_in(A::default())
    }

    /// Constructs a new, empty `ShortString` with the provided allocator.
    ///
    /// Usable in const contexts; the inline representation needs nothing from the allocator.
    ///
    /// # Examples
    ///
    /// ```
    /// #![feature(allocator_api)]
    /// use std::alloc::Global;
    /// use shortstr::ShortString;
    ///
    /// static EMPTY: ShortString<u8> = ShortString::new_in(Global);
    /// assert!(EMPTY.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new_in(alloc: A) -> Self {
        Self { raw: RawString::new_in(alloc) }
    }

    /// Constructs a new, empty `ShortString` with at least the specified capacity.
    ///
    /// A capacity up to [`INLINE_CAPACITY`](ShortString::INLINE_CAPACITY) stays inline and does not allocate;
    /// anything larger allocates up front, and the allocator is allowed to grant more than was asked for.
    ///
    /// # Panics
    ///
    /// Panics if the capacity exceeds `isize::MAX` bytes.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self where
        A: Default
    {
        Self::with_capacity_in(capacity, A::default())
    }

    /// See [`with_capacity`](ShortString::with_capacity).
    #[inline]
    #[must_use]
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        Self { raw: RawString::with_capacity_in(capacity, alloc) }
    }

    /// The same as [`with_capacity`](ShortString::with_capacity), but returns on errors instead of panicking or
    /// aborting.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> where
        A: Default
    {
        Self::try_with_capacity_in(capacity, A::default())
    }

    pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, TryReserveError> {
        Ok(Self { raw: RawString::try_with_capacity_in(capacity, alloc)? })
    }

    /// Constructs a `ShortString` by copying a slice of units.
    #[inline]
    pub fn from_slice_in(src: &[C], alloc: A) -> Self {
        let mut s = Self::with_capacity_in(src.len(), alloc);
        unsafe {
            ptr::copy_nonoverlapping(src.as_ptr(), s.raw.as_mut_ptr(), src.len());
            s.raw.set_len(src.len());
        }
        s
    }

    /// Constructs a `ShortString` holding `n` copies of `unit`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shortstr::ShortString;
    ///
    /// let s = ShortString::<u8>::from_elem(b's', 20);
    /// assert_eq!(s.len(), 20);
    /// assert!(s.iter().all(|&u| u == b's'));
    /// ```
    #[inline]
    pub fn from_elem(unit: C, n: usize) -> Self where
        A: Default
    {
        Self::from_elem_in(unit, n, A::default())
    }

    /// See [`from_elem`](ShortString::from_elem).
    pub fn from_elem_in(unit: C, n: usize, alloc: A) -> Self {
        let mut s = Self::with_capacity_in(n, alloc);
        unsafe {
            let base = s.raw.as_mut_ptr();
            for i in 0..n {
                base.add(i).write(unit);
            }
            s.raw.set_len(n);
        }
        s
    }

    /// Constructs a `ShortString` by copying units from a null-terminated buffer, up to but excluding the first
    /// zero-valued unit.
    ///
    /// # Safety
    ///
    /// - `src` must point to a buffer of initialized units that contains a zero-valued unit, and the buffer must be
    ///   valid for reads up to and including that unit.
    pub unsafe fn from_nul_terminated(src: *const C) -> Self where
        A: Default
    {
        Self::from_nul_terminated_in(src, A::default())
    }

    /// See [`from_nul_terminated`](ShortString::from_nul_terminated).
    ///
    /// # Safety
    ///
    /// See [`from_nul_terminated`](ShortString::from_nul_terminated).
    pub unsafe fn from_nul_terminated_in(src: *const C, alloc: A) -> Self {
        let len = nul_terminated_len(src);
        Self::from_slice_in(slice::from_raw_parts(src, len), alloc)
    }

    //--------------------------------------------------------------

    /// Returns the number of units in the string, excluding the terminator.
    #[inline]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the string contains no units.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of units the string can hold without reallocating, excluding the reserved terminator slot.
    ///
    /// Never less than [`INLINE_CAPACITY`](ShortString::INLINE_CAPACITY), and never decreasing except across
    /// [`shrink_to_fit`](ShortString::shrink_to_fit).
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// The largest length the string can ever reach: allocations are limited to `isize::MAX` bytes, and one slot is
    /// reserved for the terminator.
    #[inline]
    pub const fn max_capacity() -> usize {
        isize::MAX as usize / mem::size_of::<C>() - 1
    }

    /// Returns whether the content currently lives in a heap allocation rather than in the object itself.
    #[inline]
    pub const fn is_heap_allocated(&self) -> bool {
        self.raw.is_heap()
    }

    /// Get the allocator of the string.
    #[inline]
    pub const fn allocator(&self) -> &A {
        self.raw.allocator()
    }

    /// Returns a raw pointer to the first unit.
    ///
    /// The buffer behind it is null-terminated: the unit at `len()` is always the zero-valued terminator, so the
    /// pointer can be handed to C-style consumers directly. The pointer is invalidated by any mutation that may
    /// reallocate.
    #[inline]
    pub const fn as_ptr(&self) -> *const C {
        self.raw.as_ptr()
    }

    /// See [`as_ptr`](ShortString::as_ptr).
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut C {
        self.raw.as_mut_ptr()
    }

    /// Extracts a slice containing the entire string, excluding the terminator.
    #[inline]
    pub const fn as_slice(&self) -> &[C] {
        self.raw.as_slice()
    }

    /// Extracts a mutable slice of the entire string, excluding the terminator.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [C] {
        self.raw.as_mut_slice()
    }

    /// Extracts a slice containing the entire string *including* the terminator.
    ///
    /// # Examples
    ///
    /// ```
    /// use shortstr::ShortString;
    ///
    /// let s = ShortString::<u8>::from(&b"ab"[..]);
    /// assert_eq!(s.as_slice_with_nul(), b"ab\0");
    /// ```
    #[inline]
    pub const fn as_slice_with_nul(&self) -> &[C] {
        // Safety: the terminator one past the content is always initialized.
        unsafe { slice::from_raw_parts(self.raw.as_ptr(), self.len() + 1) }
    }

    /// Forces the length of the string to `new_len`, rewriting the terminator.
    ///
    /// # Safety
    ///
    /// - `new_len` must be less than or equal to [`capacity()`](ShortString::capacity).
    /// - The units at `0..new_len` must be initialized.
    #[inline]
    pub unsafe fn set_len(&mut self, new_len: usize) {
        self.raw.set_len(new_len);
    }

    //--------------------------------------------------------------

    /// Reserves capacity for at least `additional` more units, growing by the reserve strategy to amortize repeated
    /// appends. Does nothing if the capacity is already sufficient.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` bytes.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.raw.reserve(additional);
    }

    /// Reserves capacity for exactly `additional` more units, without amortization slack (the allocator may still
    /// grant excess). Does nothing if the capacity is already sufficient.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` bytes.
    #[inline]
    pub fn reserve_exact(&mut self, additional: usize) {
        self.raw.reserve_exact(additional);
    }

    /// The same as [`reserve`](ShortString::reserve), but returns on errors instead of panicking or aborting.
    /// The string is untouched when an error is returned.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.raw.try_reserve(additional)
    }

    /// The same as [`reserve_exact`](ShortString::reserve_exact), but returns on errors instead of panicking or
    /// aborting. The string is untouched when an error is returned.
    pub fn try_reserve_exact(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.raw.try_reserve_exact(additional)
    }

    /// Moves heap content that fits back into the object and releases the allocation.
    ///
    /// This is the only way the string ever gives capacity back. A string whose content is longer than
    /// [`INLINE_CAPACITY`](ShortString::INLINE_CAPACITY), or that never left the inline representation, is not
    /// changed, which also makes the operation idempotent.
    ///
    /// # Examples
    ///
    /// ```
    /// use shortstr::ShortString;
    ///
    /// let mut s = ShortString::<u8>::from_elem(b'x', 100);
    /// s.truncate(3);
    /// assert!(s.is_heap_allocated());
    ///
    /// s.shrink_to_fit();
    /// assert!(!s.is_heap_allocated());
    /// assert_eq!(s, *b"xxx");
    /// ```
    pub fn shrink_to_fit(&mut self) {
        self.raw.shrink_to_fit();
    }

    //--------------------------------------------------------------

    /// Appends a unit to the end of the string.
    ///
    /// When the string is full it grows by the reserve strategy (1.5 by default), which keeps repeated pushes
    /// amortized *O*(1).
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` bytes.
    #[inline]
    pub fn push(&mut self, unit: C) {
        let len = self.len();
        if len == self.capacity() {
            self.raw.grow_one();
        }
        unsafe {
            self.raw.as_mut_ptr().add(len).write(unit);
            self.raw.set_len(len + 1);
        }
    }

    /// Removes the last unit from the string and returns it, or [`None`] if it is empty.
    pub fn pop(&mut self) -> Option<C> {
        let len = self.len();
        if len == 0 {
            None
        } else {
            unsafe {
                let unit = self.raw.as_ptr().add(len - 1).read();
                self.raw.set_len(len - 1);
                Some(unit)
            }
        }
    }

    /// Removes and returns the last unit if the predicate returns `true`, or [`None`] if the predicate returns
    /// `false` or the string is empty.
    pub fn pop_if<F>(&mut self, f: F) -> Option<C> where
        F: FnOnce(&mut C) -> bool
    {
        let last = self.as_mut_slice().last_mut()?;
        if f(last) { self.pop() } else { None }
    }

    /// Shortens the string, keeping the first `len` units.
    ///
    /// If `len` is greater or equal to the string's current length, this has no effect. The capacity is never
    /// affected.
    pub fn truncate(&mut self, len: usize) {
        if len < self.len() {
            // Safety: shrinking only, the prefix stays initialized.
            unsafe { self.raw.set_len(len) };
        }
    }

    /// Clears the string, removing all units. The capacity is not affected.
    #[inline]
    pub fn clear(&mut self) {
        unsafe { self.raw.set_len(0) };
    }

    /// Resizes the string so that its length equals `new_len`, filling new slots with `unit` when growing.
    ///
    /// Shrinking only moves the terminator; the capacity is never released.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` bytes.
    pub fn resize(&mut self, new_len: usize, unit: C) {
        let len = self.len();
        if new_len > len {
            self.raw.reserve_exact(new_len - len);
            unsafe {
                let base = self.raw.as_mut_ptr();
                for i in len..new_len {
                    base.add(i).write(unit);
                }
                self.raw.set_len(new_len);
            }
        } else {
            unsafe { self.raw.set_len(new_len) };
        }
    }

    //--------------------------------------------------------------

    /// Replaces the entire content with a copy of `src`.
    ///
    /// Reuses the existing storage when it is large enough; the capacity never shrinks.
    ///
    /// # Examples
    ///
    /// ```
    /// use shortstr::ShortString;
    ///
    /// let mut s = ShortString::<u8>::from(&b"old content"[..]);
    /// s.assign(b"new");
    /// assert_eq!(s, *b"new");
    /// ```
    pub fn assign(&mut self, src: &[C]) {
        // Safety: a borrowed slice is always valid for its own length.
        if let Err(err) = unsafe { self.raw.assign_raw(src.as_ptr(), src.len()) } {
            handle_error(err);
        }
    }

    /// Replaces the entire content with `n` copies of `unit`.
    pub fn assign_units(&mut self, n: usize, unit: C) {
        self.raw.reserve(n.saturating_sub(self.len()));
        unsafe {
            let base = self.raw.as_mut_ptr();
            for i in 0..n {
                base.add(i).write(unit);
            }
            self.raw.set_len(n);
        }
    }

    /// Appends a copy of `src` to the end of the string.
    pub fn append(&mut self, src: &[C]) {
        // Safety: a borrowed slice is always valid for its own length.
        if let Err(err) = unsafe { self.raw.append_raw(src.as_ptr(), src.len()) } {
            handle_error(err);
        }
    }

    /// Appends `n` copies of `unit` to the end of the string.
    pub fn append_units(&mut self, n: usize, unit: C) {
        self.raw.reserve(n);
        let len = self.len();
        unsafe {
            let base = self.raw.as_mut_ptr();
            for i in 0..n {
                base.add(len + i).write(unit);
            }
            self.raw.set_len(len + n);
        }
    }

    /// Appends a copy of the string's own units at `src` to the end.
    ///
    /// This is the self-referential form of [`append`](ShortString::append): the borrow rules make
    /// `s.append(&s[1..3])` impossible to write, while `s.extend_from_within(1..3)` expresses exactly that, and is
    /// guaranteed to behave as if the source range had been copied out first.
    ///
    /// # Panics
    ///
    /// Panics if the starting point is greater than the end point or if the end point is greater than the length of
    /// the string.
    ///
    /// # Examples
    ///
    /// ```
    /// use shortstr::ShortString;
    ///
    /// let mut s = ShortString::<u8>::from(&b"abcd"[..]);
    /// s.extend_from_within(1..3);
    /// assert_eq!(s, *b"abcdbc");
    /// ```
    pub fn extend_from_within<RB>(&mut self, src: RB) where
        RB: RangeBounds<usize>
    {
        let Range { start, end } = slice::range(src, ..self.len());
        unsafe {
            let ptr = self.raw.as_ptr().add(start);
            // Safety: the range was validated against the initialized content above.
            if let Err(err) = self.raw.append_raw(ptr, end - start) {
                handle_error(err);
            }
        }
    }

    /// Inserts a copy of `src` at position `index`, shifting all units after it to the right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shortstr::ShortString;
    ///
    /// let mut s = ShortString::<u8>::from(&b"12345678"[..]);
    /// s.insert(8, b"90");
    /// assert_eq!(s, *b"1234567890");
    /// ```
    pub fn insert(&mut self, index: usize, src: &[C]) {
        #[cold]
        #[track_caller]
        fn assert_failed(index: usize, len: usize) -> ! {
            panic!("insertion index (is {index}) should be <= len (is {len})");
        }

        let len = self.len();
        if index > len {
            assert_failed(index, len);
        }
        // Safety: a borrowed slice is always valid for its own length, and `index` was just validated.
        if let Err(err) = unsafe { self.raw.insert_raw(index, src.as_ptr(), src.len()) } {
            handle_error(err);
        }
    }

    /// Inserts `n` copies of `unit` at position `index`, shifting all units after it to the right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_units(&mut self, index: usize, n: usize, unit: C) {
        #[cold]
        #[track_caller]
        fn assert_failed(index: usize, len: usize) -> ! {
            panic!("insertion index (is {index}) should be <= len (is {len})");
        }

        let len = self.len();
        if index > len {
            assert_failed(index, len);
        }
        self.raw.reserve(n);
        unsafe {
            let base = self.raw.as_mut_ptr();
            ptr::copy(base.add(index), base.add(index + n), len - index);
            for i in 0..n {
                base.add(index + i).write(unit);
            }
            self.raw.set_len(len + n);
        }
    }

    /// Inserts a copy of the string's own units at `src` at position `index`.
    ///
    /// The self-referential form of [`insert`](ShortString::insert); the result is the same as materializing the
    /// source range into a separate buffer first, even when the range straddles the insertion point.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`, if the starting point of `src` is greater than its end point, or if its end point is
    /// greater than the length of the string.
    pub fn insert_from_within<RB>(&mut self, index: usize, src: RB) where
        RB: RangeBounds<usize>
    {
        #[cold]
        #[track_caller]
        fn assert_failed(index: usize, len: usize) -> ! {
            panic!("insertion index (is {index}) should be <= len (is {len})");
        }

        let len = self.len();
        if index > len {
            assert_failed(index, len);
        }
        let Range { start, end } = slice::range(src, ..len);
        unsafe {
            let ptr = self.raw.as_ptr().add(start);
            // Safety: both the index and the source range were validated against the initialized content.
            if let Err(err) = self.raw.insert_raw(index, ptr, end - start) {
                handle_error(err);
            }
        }
    }

    /// Removes the units in the given range, shifting the tail down. Purely in place: the capacity is never affected.
    ///
    /// # Panics
    ///
    /// Panics if the starting point is greater than the end point or if the end point is greater than the length of
    /// the string.
    ///
    /// # Examples
    ///
    /// ```
    /// use shortstr::ShortString;
    ///
    /// let mut s = ShortString::<u8>::from_elem(b's', 20);
    /// s.erase(10..20);
    /// assert_eq!(s.len(), 10);
    /// ```
    pub fn erase<RB>(&mut self, range: RB) where
        RB: RangeBounds<usize>
    {
        let Range { start, end } = slice::range(range, ..self.len());
        // Safety: the range was just validated.
        unsafe { self.raw.erase_raw(start, end) };
    }

    /// Replaces the units in `range` with a copy of `src`, which does not need to have the same length.
    ///
    /// The start of the range must be a valid position; the end is clamped to the length of the string, mirroring the
    /// count-clamping of the positional APIs this models.
    ///
    /// # Panics
    ///
    /// Panics if the starting point of the range is greater than the length of the string, or greater than the
    /// (unclamped) end point.
    ///
    /// # Examples
    ///
    /// ```
    /// use shortstr::ShortString;
    ///
    /// let mut s = ShortString::<u8>::from(&b"hello world"[..]);
    /// s.replace(0..5, b"goodbye");
    /// assert_eq!(s, *b"goodbye world");
    /// ```
    pub fn replace<RB>(&mut self, range: RB, src: &[C]) where
        RB: RangeBounds<usize>
    {
        let Range { start, end } = clamp_range(range, self.len());
        // Safety: the range was validated/clamped, and a borrowed slice is always valid for its own length.
        if let Err(err) = unsafe { self.raw.replace_raw(start, end, src.as_ptr(), src.len()) } {
            handle_error(err);
        }
    }

    /// Replaces the units in `range` with a copy of the string's own units at `src`.
    ///
    /// The self-referential form of [`replace`](ShortString::replace); the result is the same as materializing the
    /// source range into a separate buffer first, whichever way the two ranges intersect.
    ///
    /// # Panics
    ///
    /// Panics if the starting point of `range` is greater than the length of the string or greater than its
    /// (unclamped) end point, if the starting point of `src` is greater than its end point, or if the end point of
    /// `src` is greater than the length of the string.
    pub fn replace_from_within<RB1, RB2>(&mut self, range: RB1, src: RB2) where
        RB1: RangeBounds<usize>,
        RB2: RangeBounds<usize>
    {
        let len = self.len();
        let Range { start, end } = clamp_range(range, len);
        let Range { start: src_start, end: src_end } = slice::range(src, ..len);
        unsafe {
            let ptr = self.raw.as_ptr().add(src_start);
            // Safety: both ranges were validated against the initialized content.
            if let Err(err) = self.raw.replace_raw(start, end, ptr, src_end - src_start) {
                handle_error(err);
            }
        }
    }

    /// Retains only the units specified by the predicate, in order, compacting the string in place.
    pub fn retain<F>(&mut self, mut f: F) where
        F: FnMut(&C) -> bool
    {
        // Units are plain values, so every intermediate state is a valid string; a panicking predicate simply leaves
        // a partially compacted prefix behind.
        let len = self.len();
        let mut write = 0;
        for read in 0..len {
            let unit = self.as_slice()[read];
            if f(&unit) {
                self.as_mut_slice()[write] = unit;
                write += 1;
            }
        }
        if write < len {
            unsafe { self.raw.set_len(write) };
        }
    }

    /// Returns a new string holding a copy of the units in `range`, allocated from a clone of this string's
    /// allocator.
    ///
    /// The start of the range must be a valid position; the end is clamped to the length of the string.
    ///
    /// # Panics
    ///
    /// Panics if the starting point of the range is greater than the length of the string, or greater than the
    /// (unclamped) end point.
    ///
    /// # Examples
    ///
    /// ```
    /// use shortstr::ShortString;
    ///
    /// let s = ShortString::<u8>::from(&b"hello world"[..]);
    /// assert_eq!(s.substr(6..), *b"world");
    /// assert_eq!(s.substr(6..100), *b"world");
    /// ```
    #[must_use]
    pub fn substr<RB>(&self, range: RB) -> Self where
        RB: RangeBounds<usize>,
        A: Clone
    {
        let Range { start, end } = clamp_range(range, self.len());
        Self::from_slice_in(&self.as_slice()[start..end], self.allocator().clone())
    }

    //--------------------------------------------------------------

    /// Returns `true` if the string begins with the given units.
    #[inline]
    pub fn starts_with(&self, needle: &[C]) -> bool {
        self.as_slice().starts_with(needle)
    }

    /// Returns `true` if the string begins with the given unit.
    #[inline]
    pub fn starts_with_unit(&self, unit: C) -> bool {
        self.as_slice().first() == Some(&unit)
    }

    /// Returns `true` if the string ends with the given units.
    #[inline]
    pub fn ends_with(&self, needle: &[C]) -> bool {
        self.as_slice().ends_with(needle)
    }

    /// Returns `true` if the string ends with the given unit.
    #[inline]
    pub fn ends_with_unit(&self, unit: C) -> bool {
        self.as_slice().last() == Some(&unit)
    }

    /// Returns `true` if the given units occur contiguously anywhere in the string.
    ///
    /// An empty needle is contained in every string.
    pub fn contains(&self, needle: &[C]) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.len() >= needle.len() && self.as_slice().windows(needle.len()).any(|w| w == needle)
    }

    /// Returns `true` if the given unit occurs anywhere in the string.
    #[inline]
    pub fn contains_unit(&self, unit: C) -> bool {
        self.as_slice().contains(&unit)
    }
}

//------------------------------------------------------------------------------------------------------------------------------

/// Caculates the length of a null-terminated buffer of units, excluding the terminator.
///
/// # Safety
///
/// - `begin` must point to a buffer of initialized units that contains a zero-valued unit, and the buffer must be
///   valid for reads up to and including that unit.
pub unsafe fn nul_terminated_len<C: Unit>(begin: *const C) -> usize {
    let mut end = begin;
    while *end != C::NUL {
        end = end.add(1);
    }
    end.offset_from(begin) as usize
}

/// Validates the start of a range and clamps its end to `len`, for the position-plus-count shaped operations.
fn clamp_range<RB: RangeBounds<usize>>(range: RB, len: usize) -> Range<usize> {
    #[cold]
    #[track_caller]
    fn start_assert_failed(start: usize, len: usize) -> ! {
        panic!("range start (is {start}) should be <= len (is {len})");
    }

    #[cold]
    #[track_caller]
    fn order_assert_failed(start: usize, end: usize) -> ! {
        panic!("range start (is {start}) should be <= range end (is {end})");
    }

    let start = match range.start_bound() {
        ops::Bound::Included(&start) => start,
        ops::Bound::Excluded(&start) => start + 1,
        ops::Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        ops::Bound::Included(&end) => end + 1,
        ops::Bound::Excluded(&end) => end,
        ops::Bound::Unbounded => len,
    };

    if start > len {
        start_assert_failed(start, len);
    }
    if start > end {
        order_assert_failed(start, end);
    }
    start..end.min(len)
}

#[doc(hidden)]
pub fn from_elem<C: Unit, A: Allocator + Default, R: ReserveStrategy>(unit: C, n: usize) -> ShortString<C, A, R> {
    ShortString::from_elem_in(unit, n, A::default())
}

#[doc(hidden)]
pub fn from_units<C: Unit, A: Allocator + Default, R: ReserveStrategy>(units: &[C]) -> ShortString<C, A, R> {
    ShortString::from_slice_in(units, A::default())
}

/// Creates a [`ShortString`] containing the given units.
///
/// Analogous to array expressions, there are two forms: a list of units, or a `unit; count` repetition.
///
/// # Examples
///
/// ```
/// use shortstr::{shortstr, ShortString};
///
/// let a: ShortString<u8> = shortstr![b'a', b'b', b'c'];
/// let b: ShortString<u16> = shortstr![0x2603; 3];
///
/// assert_eq!(a, *b"abc");
/// assert_eq!(b.len(), 3);
/// ```
#[macro_export]
macro_rules! shortstr {
    () => {
        $crate::ShortString::new()
    };
    ($unit:expr; $n:expr) => {
        $crate::string::from_elem($unit, $n)
    };
    ($($unit:expr),+ $(,)?) => {
        $crate::string::from_units(&[$($unit),+])
    };
}

//------------------------------------------------------------------------------------------------------------------------------

impl<C: Unit, A: Allocator, R: ReserveStrategy> ops::Deref for ShortString<C, A, R> {
    type Target = [C];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.raw.as_slice()
    }
}

impl<C: Unit, A: Allocator, R: ReserveStrategy> ops::DerefMut for ShortString<C, A, R> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.raw.as_mut_slice()
    }
}

impl<C: Unit, A: Allocator + Default, R: ReserveStrategy> Default for ShortString<C, A, R> {
    /// Creates an empty `ShortString`, without allocating.
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Unit, A: Allocator + Clone, R: ReserveStrategy> Clone for ShortString<C, A, R> {
    fn clone(&self) -> Self {
        Self::from_slice_in(self.as_slice(), self.allocator().clone())
    }

    /// Overwrites the contents of `self` with a copy of the contents of `source`.
    ///
    /// This is preferred over simply assigning `source.clone()` to `self`, as it reuses `self`'s storage when it is
    /// large enough.
    fn clone_from(&mut self, source: &Self) {
        self.assign(source.as_slice());
    }
}

impl<C: Unit, A: Allocator, R: ReserveStrategy> fmt::Debug for ShortString<C, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<C: Unit, A: Allocator, R: ReserveStrategy> Hash for ShortString<C, A, R> {
    /// Hashes the content exactly like the equivalent `&[C]` slice would hash, so lookups keyed by slices of the same
    /// content agree.
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        Hash::hash(&**self, state)
    }
}

impl<C: Unit, I: SliceIndex<[C]>, A: Allocator, R: ReserveStrategy> Index<I> for ShortString<C, A, R> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(&**self, index)
    }
}

impl<C: Unit, I: SliceIndex<[C]>, A: Allocator, R: ReserveStrategy> IndexMut<I> for ShortString<C, A, R> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(&mut **self, index)
    }
}

impl<C: Unit, A: Allocator, R: ReserveStrategy> AsRef<ShortString<C, A, R>> for ShortString<C, A, R> {
    fn as_ref(&self) -> &ShortString<C, A, R> {
        self
    }
}

impl<C: Unit, A: Allocator, R: ReserveStrategy> AsRef<[C]> for ShortString<C, A, R> {
    fn as_ref(&self) -> &[C] {
        self
    }
}

impl<C: Unit, A: Allocator, R: ReserveStrategy> AsMut<[C]> for ShortString<C, A, R> {
    fn as_mut(&mut self) -> &mut [C] {
        self
    }
}

//------------------------------------------------------------------------------------------------------------------------------

impl_slice_partial_eq!([A0: Allocator, A1: Allocator, R0: ReserveStrategy, R1: ReserveStrategy] ShortString<C, A0, R0>, ShortString<C, A1, R1>);
impl_slice_partial_eq!([A: Allocator, R: ReserveStrategy] ShortString<C, A, R>, &[C]);
impl_slice_partial_eq!([A: Allocator, R: ReserveStrategy] ShortString<C, A, R>, &mut [C]);
impl_slice_partial_eq!([A: Allocator, R: ReserveStrategy] &[C], ShortString<C, A, R>);
impl_slice_partial_eq!([A: Allocator, R: ReserveStrategy] &mut [C], ShortString<C, A, R>);
impl_slice_partial_eq!([A: Allocator, R: ReserveStrategy] ShortString<C, A, R>, [C]);
impl_slice_partial_eq!([A: Allocator, R: ReserveStrategy] [C], ShortString<C, A, R>);
impl_slice_partial_eq!([A: Allocator, R: ReserveStrategy, const N: usize] ShortString<C, A, R>, [C; N]);
impl_slice_partial_eq!([A: Allocator, R: ReserveStrategy, const N: usize] [C; N], ShortString<C, A, R>);

impl<C: Unit, A: Allocator, R: ReserveStrategy> Eq for ShortString<C, A, R> {}

impl<C, A0, A1, R0, R1> PartialOrd<ShortString<C, A1, R1>> for ShortString<C, A0, R0> where
    C: Unit,
    A0: Allocator,
    A1: Allocator,
    R0: ReserveStrategy,
    R1: ReserveStrategy
{
    /// Lexicographic by unit value, with the length as the final tiebreaker: a string that is a strict prefix of
    /// another orders before it.
    #[inline]
    fn partial_cmp(&self, other: &ShortString<C, A1, R1>) -> Option<core::cmp::Ordering> {
        PartialOrd::partial_cmp(&**self, &**other)
    }
}

impl<C: Unit, A: Allocator, R: ReserveStrategy> Ord for ShortString<C, A, R> {
    #[inline]
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        Ord::cmp(&**self, &**other)
    }
}

//------------------------------------------------------------------------------------------------------------------------------

impl<C: Unit, A: Allocator + Default, R: ReserveStrategy> FromIterator<C> for ShortString<C, A, R> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        let mut s = Self::new();
        s.extend(iter);
        s
    }
}

impl<C: Unit, A: Allocator, R: ReserveStrategy> Extend<C> for ShortString<C, A, R> {
    fn extend<I: IntoIterator<Item = C>>(&mut self, iter: I) {
        let mut iter = iter.into_iter();
        while let Some(unit) = iter.next() {
            let len = self.len();
            if len == self.capacity() {
                let (lower, _) = iter.size_hint();
                self.raw.reserve(lower.saturating_add(1));
            }
            unsafe {
                self.raw.as_mut_ptr().add(len).write(unit);
                // `next` runs user code which may panic, so the length and terminator are re-established every step.
                self.raw.set_len(len + 1);
            }
        }
    }

    #[inline]
    fn extend_one(&mut self, unit: C) {
        self.push(unit);
    }

    #[inline]
    fn extend_reserve(&mut self, additional: usize) {
        self.reserve(additional);
    }
}

impl<'a, C: Unit, A: Allocator, R: ReserveStrategy> Extend<&'a C> for ShortString<C, A, R> {
    fn extend<I: IntoIterator<Item = &'a C>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }

    #[inline]
    fn extend_one(&mut self, unit: &'a C) {
        self.push(*unit);
    }

    #[inline]
    fn extend_reserve(&mut self, additional: usize) {
        self.reserve(additional);
    }
}

impl<C: Unit, A: Allocator, R: ReserveStrategy> IntoIterator for ShortString<C, A, R> {
    type Item = C;
    type IntoIter = IntoIter<C, A, R>;

    /// Creates a consuming iterator over the units, from front to back.
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, C: Unit, A: Allocator, R: ReserveStrategy> IntoIterator for &'a ShortString<C, A, R> {
    type Item = &'a C;
    type IntoIter = slice::Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, C: Unit, A: Allocator, R: ReserveStrategy> IntoIterator for &'a mut ShortString<C, A, R> {
    type Item = &'a mut C;
    type IntoIter = slice::IterMut<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

//------------------------------------------------------------------------------------------------------------------------------

impl<C: Unit, A: Allocator + Default, R: ReserveStrategy> From<&[C]> for ShortString<C, A, R> {
    fn from(src: &[C]) -> Self {
        Self::from_slice_in(src, A::default())
    }
}

impl<C: Unit, A: Allocator + Default, R: ReserveStrategy, const N: usize> From<&[C; N]> for ShortString<C, A, R> {
    fn from(src: &[C; N]) -> Self {
        Self::from_slice_in(src.as_slice(), A::default())
    }
}

impl<C: Unit, A: Allocator + Default, R: ReserveStrategy, const N: usize> From<[C; N]> for ShortString<C, A, R> {
    fn from(src: [C; N]) -> Self {
        Self::from_slice_in(src.as_slice(), A::default())
    }
}

impl<A: Allocator + Default, R: ReserveStrategy> From<&str> for ShortString<u8, A, R> {
    /// Copies the UTF-8 bytes of `src`; no further validation is attached to them.
    fn from(src: &str) -> Self {
        Self::from_slice_in(src.as_bytes(), A::default())
    }
}

//------------------------------------------------------------------------------------------------------------------------------

impl<C: Unit, A: Allocator, R: ReserveStrategy> ops::Add<&[C]> for ShortString<C, A, R> {
    type Output = Self;

    /// Concatenation that consumes and reuses the left operand's buffer.
    fn add(mut self, rhs: &[C]) -> Self {
        self.append(rhs);
        self
    }
}

impl<C, A0, A1, R0, R1> ops::Add<&ShortString<C, A1, R1>> for ShortString<C, A0, R0> where
    C: Unit,
    A0: Allocator,
    A1: Allocator,
    R0: ReserveStrategy,
    R1: ReserveStrategy
{
    type Output = Self;

    /// Concatenation that consumes and reuses the left operand's buffer.
    fn add(mut self, rhs: &ShortString<C, A1, R1>) -> Self {
        self.append(rhs.as_slice());
        self
    }
}

impl<C: Unit, A: Allocator + Clone, R: ReserveStrategy> ops::Add<&[C]> for &ShortString<C, A, R> {
    type Output = ShortString<C, A, R>;

    /// Concatenation of two borrowed operands into a fresh string.
    fn add(self, rhs: &[C]) -> ShortString<C, A, R> {
        let mut out = ShortString::with_capacity_in(self.len() + rhs.len(), self.allocator().clone());
        out.append(self.as_slice());
        out.append(rhs);
        out
    }
}

impl<C: Unit, A: Allocator, R: ReserveStrategy> ops::AddAssign<&[C]> for ShortString<C, A, R> {
    fn add_assign(&mut self, rhs: &[C]) {
        self.append(rhs);
    }
}

impl<C, A0, A1, R0, R1> ops::AddAssign<&ShortString<C, A1, R1>> for ShortString<C, A0, R0> where
    C: Unit,
    A0: Allocator,
    A1: Allocator,
    R0: ReserveStrategy,
    R1: ReserveStrategy
{
    fn add_assign(&mut self, rhs: &ShortString<C, A1, R1>) {
        self.append(rhs.as_slice());
    }
}
