//! Scanline output buffer.
//!
//! A [`Row`] covers the half-open column span `[x, r)` of one scanline and
//! holds a separate plane per allocated channel. Operators receive a row,
//! fill the columns they were asked for, and hand it back to the caller.
//!
//! Columns are addressed in image coordinates, not buffer offsets:
//!
//! ```rust
//! use tileroll_core::{Channel, ChannelSet, Row};
//!
//! let mut row = Row::new(-2, 2, ChannelSet::RGB);
//! row.writable(Channel::Red).unwrap()[0] = 1.0; // column -2
//! assert_eq!(row.value(Channel::Red, -2), Some(1.0));
//! ```

use crate::{Channel, ChannelSet};

/// Per-channel storage for the columns `[x, r)` of a scanline.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    x: i32,
    r: i32,
    channels: ChannelSet,
    planes: [Vec<f32>; Channel::COUNT],
}

impl Row {
    /// Allocates a zeroed row for `[x, r)` with planes for `channels`.
    ///
    /// An inverted span (`r < x`) yields an empty row.
    pub fn new(x: i32, r: i32, channels: ChannelSet) -> Self {
        let r = r.max(x);
        let len = (i64::from(r) - i64::from(x)) as usize;
        let planes = std::array::from_fn(|i| {
            if channels.has(Channel::ALL[i]) {
                vec![0.0; len]
            } else {
                Vec::new()
            }
        });
        Self {
            x,
            r,
            channels,
            planes,
        }
    }

    /// First column (inclusive).
    #[inline]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Last column (exclusive).
    #[inline]
    pub const fn r(&self) -> i32 {
        self.r
    }

    /// Number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        (i64::from(self.r) - i64::from(self.x)) as usize
    }

    /// Returns `true` if the row spans no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.r == self.x
    }

    /// Channels with allocated planes.
    #[inline]
    pub const fn channels(&self) -> ChannelSet {
        self.channels
    }

    /// Returns `true` if the row covers every column of `[x, r)`.
    #[inline]
    pub fn covers(&self, x: i32, r: i32) -> bool {
        x >= self.x && r <= self.r
    }

    /// Read access to a channel plane, indexed from column `x()`.
    pub fn plane(&self, channel: Channel) -> Option<&[f32]> {
        self.channels
            .has(channel)
            .then(|| self.planes[channel.index()].as_slice())
    }

    /// Write access to a channel plane, indexed from column `x()`.
    ///
    /// Returns `None` if the row has no plane for `channel`.
    pub fn writable(&mut self, channel: Channel) -> Option<&mut [f32]> {
        if self.channels.has(channel) {
            Some(self.planes[channel.index()].as_mut_slice())
        } else {
            None
        }
    }

    /// Value of `channel` at image column `col`.
    pub fn value(&self, channel: Channel, col: i32) -> Option<f32> {
        let offset = usize::try_from(i64::from(col) - i64::from(self.x)).ok()?;
        self.plane(channel)?.get(offset).copied()
    }
}
