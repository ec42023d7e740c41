//! Toroidal coordinate wrapping.
//!
//! Rolling treats each image axis as a circle: a coordinate that walks off
//! one edge reappears at the other. [`offset_coord`] maps any integer
//! coordinate back into `[0, total)`.
//!
//! ```rust
//! use std::num::NonZeroU32;
//! use tileroll_ops::wrap::offset_coord;
//!
//! let w = NonZeroU32::new(10).unwrap();
//! assert_eq!(offset_coord(3, w), 3);
//! assert_eq!(offset_coord(-1, w), 9);
//! assert_eq!(offset_coord(10, w), 0);
//! assert_eq!(offset_coord(-35, w), 5);
//! ```

use std::num::NonZeroU32;

/// Wraps `coord` into `[0, total)` using Euclidean modulo.
///
/// The result is always a valid index: `coord == total` maps to `0`, and
/// coordinates several periods below zero are fully normalised rather than
/// corrected by a single period. A zero modulus is unrepresentable.
#[inline]
pub fn offset_coord(coord: i64, total: NonZeroU32) -> u32 {
    // rem_euclid of a positive modulus is in [0, total), which fits in u32.
    coord.rem_euclid(i64::from(total.get())) as u32
}
