//! Image channels and channel masks.
//!
//! Every request names the channels it needs as a [`ChannelSet`]. Operators
//! must touch exactly that set: reading or writing a plane outside the mask
//! is a bug even when the data happens to be there.
//!
//! ```rust
//! use tileroll_core::{Channel, ChannelSet};
//!
//! let mask = ChannelSet::RGB | ChannelSet::ALPHA;
//! assert!(mask.has(Channel::Alpha));
//! assert_eq!(mask.channels().count(), 4);
//! ```

use bitflags::bitflags;

/// A single image plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    /// Red color plane
    Red,
    /// Green color plane
    Green,
    /// Blue color plane
    Blue,
    /// Alpha (coverage)
    Alpha,
    /// Depth (Z)
    Depth,
}

impl Channel {
    /// Number of distinct channels.
    pub const COUNT: usize = 5;

    /// All channels in storage order.
    pub const ALL: [Channel; Self::COUNT] = [
        Channel::Red,
        Channel::Green,
        Channel::Blue,
        Channel::Alpha,
        Channel::Depth,
    ];

    /// Storage index in `[0, COUNT)`.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short conventional name ("r", "g", "b", "a", "z").
    pub const fn name(self) -> &'static str {
        match self {
            Channel::Red => "r",
            Channel::Green => "g",
            Channel::Blue => "b",
            Channel::Alpha => "a",
            Channel::Depth => "z",
        }
    }

    /// The mask containing only this channel.
    #[inline]
    pub const fn mask(self) -> ChannelSet {
        ChannelSet::from_bits_truncate(1 << self.index())
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Set of channels a request reads or writes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ChannelSet: u8 {
        /// Red plane
        const RED = 1 << 0;
        /// Green plane
        const GREEN = 1 << 1;
        /// Blue plane
        const BLUE = 1 << 2;
        /// Alpha plane
        const ALPHA = 1 << 3;
        /// Depth plane
        const DEPTH = 1 << 4;

        /// Color planes
        const RGB = Self::RED.bits() | Self::GREEN.bits() | Self::BLUE.bits();
        /// Color planes plus alpha
        const RGBA = Self::RGB.bits() | Self::ALPHA.bits();
    }
}

impl ChannelSet {
    /// Returns `true` if `channel` is in the set.
    #[inline]
    pub const fn has(self, channel: Channel) -> bool {
        self.contains(channel.mask())
    }

    /// Iterates the channels in the set in storage order.
    pub fn channels(self) -> impl Iterator<Item = Channel> {
        Channel::ALL.into_iter().filter(move |c| self.has(*c))
    }
}

impl From<Channel> for ChannelSet {
    fn from(channel: Channel) -> Self {
        channel.mask()
    }
}

impl FromIterator<Channel> for ChannelSet {
    fn from_iter<I: IntoIterator<Item = Channel>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ChannelSet::empty(), |set, c| set | c.mask())
    }
}

impl std::fmt::Display for ChannelSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        for c in self.channels() {
            f.write_str(c.name())?;
        }
        Ok(())
    }
}
