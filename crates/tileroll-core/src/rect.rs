//! Bounding boxes for image data.
//!
//! A [`Rect`] describes the pixel region an image or a request covers.
//! Unlike a display window, the origin may be negative: upstream nodes can
//! produce data outside the frame, and the box records where it lives.
//!
//! # Coordinate System
//!
//! - Origin (0, 0) is at the **top-left** corner of the frame
//! - X increases to the right
//! - Y increases downward
//! - Ranges are half-open: `[x, right)` and `[y, bottom)`
//!
//! ```rust
//! use tileroll_core::Rect;
//!
//! let a = Rect::new(-10, 0, 100, 50);
//! let b = Rect::from_size(64, 64);
//! assert_eq!(a.intersect(&b), Some(Rect::new(0, 0, 64, 50)));
//! ```

/// A rectangle defined by a signed origin and unsigned dimensions.
///
/// # Invariants
///
/// - A rectangle with zero width or height is empty
/// - `right()` and `bottom()` are exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: i32,
    /// Y coordinate of the top edge (inclusive)
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle at origin (0, 0) with given dimensions.
    ///
    /// ```rust
    /// use tileroll_core::Rect;
    ///
    /// let rect = Rect::from_size(1920, 1080);
    /// assert_eq!((rect.x, rect.y), (0, 0));
    /// ```
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Creates a rectangle from half-open edges `[x, r) x [y, t)`.
    ///
    /// Inverted edges produce an empty rectangle at `(x, y)`.
    #[inline]
    pub fn from_edges(x: i32, y: i32, r: i32, t: i32) -> Self {
        let width = (i64::from(r) - i64::from(x)).max(0) as u32;
        let height = (i64::from(t) - i64::from(y)).max(0) as u32;
        Self::new(x, y, width, height)
    }

    /// X coordinate of the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add_unsigned(self.width)
    }

    /// Y coordinate of the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add_unsigned(self.height)
    }

    /// Number of pixels covered.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns `true` if either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if the point (px, py) is inside this rectangle.
    #[inline]
    pub const fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Returns the overlapping region of two rectangles.
    ///
    /// Returns `None` if they don't overlap.
    ///
    /// ```rust
    /// use tileroll_core::Rect;
    ///
    /// let a = Rect::new(0, 0, 100, 100);
    /// let b = Rect::new(50, 50, 100, 100);
    /// assert_eq!(a.intersect(&b), Some(Rect::new(50, 50, 50, 50)));
    /// ```
    #[inline]
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::from_edges(x, y, right, bottom))
        } else {
            None
        }
    }

    /// Iterates row indices `[y, bottom)`.
    #[inline]
    pub fn rows(&self) -> std::ops::Range<i32> {
        self.y..self.bottom()
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rect({}, {}, {}x{})",
            self.x, self.y, self.width, self.height
        )
    }
}
