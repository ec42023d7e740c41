//! In-memory planar image.
//!
//! [`PlanarImage`] stores one row-major `f32` plane per channel, covering
//! its data bounding box. It is the buffer the in-memory host reads from
//! and renders into.
//!
//! # Memory Layout
//!
//! ```text
//! plane[r]: [r r r r ...]  ← Row bounds.y
//!           [r r r r ...]  ← Row bounds.y + 1
//! plane[g]: [g g g g ...]
//! ...
//! ```
//!
//! # Usage
//!
//! ```rust
//! use tileroll_core::{Channel, ChannelSet, Format, PlanarImage};
//!
//! let format = Format::new(4, 2).unwrap();
//! let img = PlanarImage::from_fn(format, ChannelSet::RGB, |x, y, _| (y * 4 + x) as f32);
//! assert_eq!(img.get(3, 1, Channel::Green), Some(7.0));
//! assert_eq!(img.get(4, 1, Channel::Green), None);
//! ```

use crate::{Channel, ChannelSet, Error, Format, Pixel, Rect, Result, Row};

/// Per-channel image buffer over a bounding box.
#[derive(Clone, PartialEq)]
pub struct PlanarImage {
    format: Format,
    bounds: Rect,
    channels: ChannelSet,
    planes: [Vec<f32>; Channel::COUNT],
}

impl PlanarImage {
    /// Creates a zeroed image covering `bounds` with planes for `channels`.
    pub fn new(format: Format, bounds: Rect, channels: ChannelSet) -> Self {
        let len = bounds.area() as usize;
        let planes = std::array::from_fn(|i| {
            if channels.has(Channel::ALL[i]) {
                vec![0.0; len]
            } else {
                Vec::new()
            }
        });
        Self {
            format,
            bounds,
            channels,
            planes,
        }
    }

    /// Creates an image covering the whole format, computing each sample.
    pub fn from_fn<F>(format: Format, channels: ChannelSet, mut f: F) -> Self
    where
        F: FnMut(i32, i32, Channel) -> f32,
    {
        let mut img = Self::new(format, format.rect(), channels);
        let bounds = img.bounds;
        for c in channels.channels() {
            let plane = &mut img.planes[c.index()];
            for (i, v) in plane.iter_mut().enumerate() {
                let x = bounds.x + (i % bounds.width as usize) as i32;
                let y = bounds.y + (i / bounds.width as usize) as i32;
                *v = f(x, y, c);
            }
        }
        img
    }

    /// Replaces the plane for `channel` with `data`.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if `data` does not hold exactly one
    /// sample per pixel of the bounds.
    pub fn with_plane(mut self, channel: Channel, data: Vec<f32>) -> Result<Self> {
        let expected = self.bounds.area() as usize;
        if data.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                got: data.len(),
            });
        }
        self.planes[channel.index()] = data;
        self.channels |= channel.mask();
        Ok(self)
    }

    /// Nominal frame format.
    #[inline]
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Data bounding box.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Channels with stored planes.
    #[inline]
    pub const fn channels(&self) -> ChannelSet {
        self.channels
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        let col = (i64::from(x) - i64::from(self.bounds.x)) as usize;
        let row = (i64::from(y) - i64::from(self.bounds.y)) as usize;
        Some(row * self.bounds.width as usize + col)
    }

    /// Sample of `channel` at (x, y), or `None` outside the bounds or mask.
    #[inline]
    pub fn get(&self, x: i32, y: i32, channel: Channel) -> Option<f32> {
        if !self.channels.has(channel) {
            return None;
        }
        let offset = self.offset(x, y)?;
        Some(self.planes[channel.index()][offset])
    }

    /// Sets a single sample.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] outside the bounds, [`Error::ChannelMismatch`]
    /// if the image has no plane for `channel`.
    pub fn set(&mut self, x: i32, y: i32, channel: Channel, value: f32) -> Result<()> {
        if !self.channels.has(channel) {
            return Err(Error::ChannelMismatch {
                expected: channel.to_string(),
                got: self.channels.to_string(),
            });
        }
        let offset = self.offset(x, y).ok_or_else(|| Error::OutOfBounds {
            x,
            y,
            bounds: self.bounds.to_string(),
        })?;
        self.planes[channel.index()][offset] = value;
        Ok(())
    }

    /// Fetches the masked channels at (x, y) into `pixel`.
    ///
    /// Outside the bounds, or for channels without a plane, the sample is
    /// black (0.0).
    pub fn sample(&self, x: i32, y: i32, channels: ChannelSet, pixel: &mut Pixel) {
        let offset = self.offset(x, y);
        for c in channels.channels() {
            pixel[c] = match offset {
                Some(o) if self.channels.has(c) => self.planes[c.index()][o],
                _ => 0.0,
            };
        }
    }

    /// Samples of `channel` on row `y`, spanning the bounds' width.
    pub fn row_plane(&self, y: i32, channel: Channel) -> Option<&[f32]> {
        let start = self.offset(self.bounds.x, y)?;
        if !self.channels.has(channel) {
            return None;
        }
        Some(&self.planes[channel.index()][start..start + self.bounds.width as usize])
    }

    /// Copies a rendered row into scanline `y`.
    ///
    /// Only channels present in both the row and the image are copied, and
    /// only over the columns the two share.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if `y` is outside the bounds.
    pub fn write_row(&mut self, y: i32, row: &Row) -> Result<()> {
        if y < self.bounds.y || y >= self.bounds.bottom() {
            return Err(Error::OutOfBounds {
                x: row.x(),
                y,
                bounds: self.bounds.to_string(),
            });
        }
        let x0 = row.x().max(self.bounds.x);
        let x1 = row.r().min(self.bounds.right());
        if x0 >= x1 {
            return Ok(());
        }
        let len = (i64::from(x1) - i64::from(x0)) as usize;
        let src_start = (i64::from(x0) - i64::from(row.x())) as usize;
        // offset() is Some: (x0, y) lies inside the bounds.
        let Some(dst_start) = self.offset(x0, y) else {
            return Ok(());
        };
        for c in (self.channels & row.channels()).channels() {
            if let Some(src) = row.plane(c) {
                self.planes[c.index()][dst_start..dst_start + len]
                    .copy_from_slice(&src[src_start..src_start + len]);
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for PlanarImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanarImage")
            .field("format", &self.format)
            .field("bounds", &self.bounds)
            .field("channels", &self.channels)
            .finish()
    }
}
