//! Frame format: the nominal width and height of an image.
//!
//! The format is distinct from the data bounding box. A node may carry
//! data outside its format (overscan) or less than the whole format, but
//! wrapping always happens modulo the format dimensions.

use std::num::NonZeroU32;

use crate::{Error, Rect, Result};

/// Nominal frame size. Both dimensions are guaranteed non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Format {
    width: NonZeroU32,
    height: NonZeroU32,
}

impl Format {
    /// Creates a format, rejecting zero dimensions.
    ///
    /// ```rust
    /// use tileroll_core::Format;
    ///
    /// let hd = Format::new(1920, 1080).unwrap();
    /// assert_eq!(hd.width(), 1920);
    /// assert!(Format::new(1920, 0).is_err());
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        match (NonZeroU32::new(width), NonZeroU32::new(height)) {
            (Some(width), Some(height)) => Ok(Self { width, height }),
            _ => Err(Error::invalid_dimensions(
                width,
                height,
                "format width and height must be > 0",
            )),
        }
    }

    /// Frame width in pixels.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width.get()
    }

    /// Frame height in pixels.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.height.get()
    }

    /// Frame width as a wrap modulus.
    #[inline]
    pub const fn width_nz(&self) -> NonZeroU32 {
        self.width
    }

    /// Frame height as a wrap modulus.
    #[inline]
    pub const fn height_nz(&self) -> NonZeroU32 {
        self.height
    }

    /// The full frame as a rectangle at the origin.
    #[inline]
    pub const fn rect(&self) -> Rect {
        Rect::from_size(self.width.get(), self.height.get())
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
