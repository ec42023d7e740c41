//! In-memory upstream for driving operators without a host pipeline.
//!
//! [`ImageInput`] serves a [`PlanarImage`] through the [`Input`] pull
//! interface and records the requests it receives. [`InputNode`] is the
//! matching default [`NodeBase`].
//!
//! ```rust
//! use tileroll_core::{ChannelSet, Format, PlanarImage};
//! use tileroll_ops::{ImageInput, InputNode, Operator, RollParams, TileRoll};
//!
//! let format = Format::new(8, 8).unwrap();
//! let img = PlanarImage::from_fn(format, ChannelSet::RGB, |x, _, _| x as f32);
//! let mut op = TileRoll::with_params(InputNode::new(ImageInput::new(img)), RollParams::new(2.0, 0.0));
//! assert_eq!(op.validate().unwrap().bounds, format.rect());
//! ```

use std::sync::{Mutex, PoisonError};

use tileroll_core::{ChannelSet, Pixel, PlanarImage, Rect};

use crate::hash::{CacheHash, CacheKey};
use crate::node::{Info, Input, NodeBase};

/// One call to [`Input::request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputRequest {
    /// Requested region.
    pub bounds: Rect,
    /// Requested channels.
    pub channels: ChannelSet,
    /// Expected read count.
    pub count: u32,
}

/// A [`PlanarImage`] exposed as an upstream input.
pub struct ImageInput {
    image: PlanarImage,
    info: Info,
    content_key: CacheKey,
    requests: Mutex<Vec<InputRequest>>,
}

impl ImageInput {
    /// Wraps an image. Its content is digested once for cache keys.
    pub fn new(image: PlanarImage) -> Self {
        let info = Info {
            bounds: image.bounds(),
            format: image.format(),
            channels: image.channels(),
        };
        let content_key = digest(&image);
        Self {
            image,
            info,
            content_key,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<InputRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn digest(image: &PlanarImage) -> CacheKey {
    let mut hash = CacheHash::new();
    let b = image.bounds();
    hash.append_i64(i64::from(b.x));
    hash.append_i64(i64::from(b.y));
    hash.append_i64(i64::from(b.width));
    hash.append_i64(i64::from(b.height));
    hash.append_i64(i64::from(image.format().width()));
    hash.append_i64(i64::from(image.format().height()));
    for c in image.channels().channels() {
        hash.append_str(c.name());
        for y in b.rows() {
            if let Some(plane) = image.row_plane(y, c) {
                let bytes: Vec<u8> = plane.iter().flat_map(|v| v.to_le_bytes()).collect();
                hash.append_bytes(&bytes);
            }
        }
    }
    hash.key()
}

impl Input for ImageInput {
    fn info(&self) -> &Info {
        &self.info
    }

    fn request(&self, bounds: Rect, channels: ChannelSet, count: u32) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(InputRequest {
                bounds,
                channels,
                count,
            });
    }

    #[inline]
    fn at(&self, x: i32, y: i32, channels: ChannelSet, pixel: &mut Pixel) {
        self.image.sample(x, y, channels, pixel);
    }

    fn append(&self, hash: &mut CacheHash) {
        hash.append_key(&self.content_key);
    }
}

/// Default node base: a single input and no extra bookkeeping.
pub struct InputNode<I> {
    input: I,
}

impl<I: Input> InputNode<I> {
    /// Wraps the primary input.
    pub fn new(input: I) -> Self {
        Self { input }
    }

    /// The concrete input.
    pub fn input(&self) -> &I {
        &self.input
    }
}

impl<I: Input> NodeBase for InputNode<I> {
    fn input0(&self) -> &dyn Input {
        &self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tileroll_core::{Channel, Format};

    fn image(seed: f32) -> PlanarImage {
        let format = Format::new(4, 3).unwrap();
        PlanarImage::from_fn(format, ChannelSet::RGBA, |x, y, _| seed + (y * 4 + x) as f32)
    }

    #[test]
    fn test_info_mirrors_image() {
        let input = ImageInput::new(image(0.0));
        assert_eq!(input.info().bounds, Rect::from_size(4, 3));
        assert_eq!(input.info().channels, ChannelSet::RGBA);
    }

    #[test]
    fn test_requests_are_recorded() {
        let input = ImageInput::new(image(0.0));
        input.request(Rect::from_size(2, 2), ChannelSet::RED, 1);
        input.request(Rect::from_size(4, 3), ChannelSet::RGB, 2);
        let reqs = input.requests();
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[1].channels, ChannelSet::RGB);
        assert_eq!(reqs[1].count, 2);
    }

    #[test]
    fn test_at_reads_masked_channels() {
        let input = ImageInput::new(image(0.0));
        let mut px = Pixel::new(ChannelSet::RED);
        input.at(1, 2, ChannelSet::RED, &mut px);
        assert_eq!(px[Channel::Red], 9.0);
        assert_eq!(px[Channel::Green], 0.0);
        input.at(7, 2, ChannelSet::RED, &mut px);
        assert_eq!(px[Channel::Red], 0.0);
    }

    #[test]
    fn test_content_changes_cache_key() {
        let key = |seed| {
            let mut h = CacheHash::new();
            ImageInput::new(image(seed)).append(&mut h);
            h.key()
        };
        assert_eq!(key(0.0), key(0.0));
        assert_ne!(key(0.0), key(1.0));
    }

    #[test]
    fn test_node_base_copies_input_info() {
        let node = InputNode::new(ImageInput::new(image(0.0)));
        assert_eq!(node.copy_info(), *node.input().info());
    }
}
