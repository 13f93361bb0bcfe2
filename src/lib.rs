#![allow(unused)]

// NOTE: Currently we need a couple of unstable features for the implementation, we should be looking to reduce this in the future.
//            `allocator_api` is load-bearing (the string is allocator-parameterized), the others are conveniences.

// Used for the allocator parameter
#![feature(allocator_api)]

// Used in the container implementation
#![feature(slice_range)]
#![feature(extend_one)]

#[macro_use]
extern crate static_assertions;

use core::alloc::Layout;

mod unit;
mod imp;

pub mod string;

pub use unit::Unit;
pub use string::{IntoIter, ShortString};

//------------------------------------------------------------------------------------------------------------------------------

macro_rules! impl_slice_partial_eq {
    ([$($vars:tt)*] $lhs:ty, $rhs:ty) => {
        impl<C: crate::Unit, $($vars)*> PartialEq<$rhs> for $lhs {
            #[inline]
            fn eq(&self, other: &$rhs) -> bool { self[..] == other[..] }
            #[inline]
            fn ne(&self, other: &$rhs) -> bool { self[..] != other[..] }
        }
    };
}
pub(crate) use impl_slice_partial_eq;

//------------------------------------------------------------------------------------------------------------------------------

/// The error returned by the `try_` family of reserving operations.
///
/// Either the requested capacity does not fit the addressable range, or the allocator reported a failure for the given layout.
/// The string is left untouched in both cases.
#[derive(Debug)]
pub enum TryReserveError {
    CapacityOverflow,
    AllocError(Layout),
}

//------------------------------------------------------------------------------------------------------------------------------

/// A trait used to define a strategy to reserve additional memory for the string.
pub trait ReserveStrategy {
    /// Calculate the new capacity for a string.
    ///
    /// `cur_capacity` represents the current capacity of the string.
    ///
    /// `min_capacity` represents the minimum required capacity to be able to resize.
    ///
    /// Returns `Err(())` if the capacity were to overflow
    fn calculate(cur_capacity: usize, min_capacity: usize) -> Result<usize, ()>;
}

/// A reserve strategy that grows the capacity by 1.5 until the required capacity is reached.
///
/// This is the default strategy, it amortizes repeated single-unit appends to *O*(1) while wasting less slack than doubling.
pub struct ThreeHalvesReserveStrategy;

impl ReserveStrategy for ThreeHalvesReserveStrategy {
    fn calculate(cur_capacity: usize, min_capacity: usize) -> Result<usize, ()> {
        let mut cap = if cur_capacity == 0 { 1 } else { cur_capacity };
        while cap < min_capacity {
            cap = (cap << 1) - (cap >> 1);
            if cap >= isize::MAX as usize {
                return Err(());
            }
        }
        Ok(cap)
    }
}

/// A reserve strategy that will try to either return double the current capacity, or the minimum required capacity, whichever is bigger.
pub struct DoubleOrMinReserveStrategy;

impl ReserveStrategy for DoubleOrMinReserveStrategy {
    fn calculate(cur_capacity: usize, min_capacity: usize) -> Result<usize, ()> {
        let double_cap = cur_capacity.saturating_mul(2);
        let new_cap = if double_cap > min_capacity { double_cap } else { min_capacity };
        if new_cap <= isize::MAX as usize {
            Ok(new_cap)
        } else {
            Err(())
        }
    }
}
