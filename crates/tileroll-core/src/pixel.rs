//! A single sample across all channels.

use crate::{Channel, ChannelSet};

/// One pixel's values, tagged with the channels that are meaningful.
///
/// Slots outside [`Pixel::channels`] hold stale or zero data and must not
/// be read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixel {
    channels: ChannelSet,
    values: [f32; Channel::COUNT],
}

impl Pixel {
    /// Creates a zeroed pixel carrying `channels`.
    #[inline]
    pub const fn new(channels: ChannelSet) -> Self {
        Self {
            channels,
            values: [0.0; Channel::COUNT],
        }
    }

    /// The channels this pixel carries.
    #[inline]
    pub const fn channels(&self) -> ChannelSet {
        self.channels
    }

    /// Value of `channel`.
    #[inline]
    pub fn get(&self, channel: Channel) -> f32 {
        self.values[channel.index()]
    }

    /// Sets the value of `channel`.
    #[inline]
    pub fn set(&mut self, channel: Channel, value: f32) {
        self.values[channel.index()] = value;
    }
}

impl std::ops::Index<Channel> for Pixel {
    type Output = f32;

    #[inline]
    fn index(&self, channel: Channel) -> &f32 {
        &self.values[channel.index()]
    }
}

impl std::ops::IndexMut<Channel> for Pixel {
    #[inline]
    fn index_mut(&mut self, channel: Channel) -> &mut f32 {
        &mut self.values[channel.index()]
    }
}
