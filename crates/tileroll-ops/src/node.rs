//! Host seams: upstream inputs, base-node bookkeeping and the operator
//! interface.
//!
//! The host pipeline owns scheduling, caching and persistence. An operator
//! sees it through three traits:
//!
//! - [`Input`] - pull interface to upstream image data
//! - [`NodeBase`] - generic node bookkeeping (input access, info, hashing),
//!   injected into the operator rather than inherited
//! - [`Operator`] - what the host calls: validate, request, sample
//!
//! # Call Order
//!
//! ```text
//! set params ──► validate() ──► request_input() ──► sample() × rows
//!      ▲                                              (any thread)
//!      └──────────── parameter change ◄───────────────┘
//! ```
//!
//! `validate` takes `&mut self` and `sample` takes `&self`, so a host cannot
//! revalidate while a sampling pass still borrows the operator.

use tileroll_core::{ChannelSet, Format, Pixel, Rect, Row};

use crate::hash::CacheHash;
use crate::OpsResult;

/// Image metadata a node publishes downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Info {
    /// Data bounding box.
    pub bounds: Rect,
    /// Nominal frame size.
    pub format: Format,
    /// Channels the node can produce.
    pub channels: ChannelSet,
}

/// Pull interface to upstream image data.
///
/// Implementations must be safe to call from many threads at once and must
/// not block.
pub trait Input: Send + Sync {
    /// Metadata of the upstream image.
    fn info(&self) -> &Info;

    /// Declares that `bounds` over `channels` will be read `count` times.
    fn request(&self, bounds: Rect, channels: ChannelSet, count: u32);

    /// Fetches the masked channels at (x, y) into `pixel`.
    ///
    /// Coordinates outside the data bounds read as black.
    fn at(&self, x: i32, y: i32, channels: ChannelSet, pixel: &mut Pixel);

    /// Appends the identity of the upstream data to a cache key.
    fn append(&self, hash: &mut CacheHash);
}

/// Generic node bookkeeping shared by all operators.
pub trait NodeBase: Send + Sync {
    /// The primary input.
    fn input0(&self) -> &dyn Input;

    /// Starting info for this node: a copy of the input's.
    fn copy_info(&self) -> Info {
        *self.input0().info()
    }

    /// Appends the node's generic identity (its inputs) to a cache key.
    fn append(&self, hash: &mut CacheHash) {
        self.input0().append(hash);
    }
}

impl<B: NodeBase + ?Sized> NodeBase for Box<B> {
    fn input0(&self) -> &dyn Input {
        (**self).input0()
    }

    fn copy_info(&self) -> Info {
        (**self).copy_info()
    }

    fn append(&self, hash: &mut CacheHash) {
        (**self).append(hash);
    }
}

/// An image operator as seen by the host scheduler.
pub trait Operator: Send + Sync {
    /// Stable class name.
    fn class(&self) -> &'static str;

    /// One-line help for menus and catalogs.
    fn node_help(&self) -> &'static str;

    /// Relative cost hint for the scheduler; lower is cheaper.
    fn slowness(&self) -> u32 {
        10
    }

    /// Recomputes derived state from the current parameters and input.
    ///
    /// Must succeed before [`Operator::request_input`] or
    /// [`Operator::sample`] are called.
    fn validate(&mut self) -> OpsResult<&Info>;

    /// Output metadata, or `None` until validated.
    fn info(&self) -> Option<&Info>;

    /// Declares the input needed to produce `bounds` over `channels`.
    fn request_input(&self, bounds: Rect, channels: ChannelSet, count: u32) -> OpsResult<()>;

    /// Fills columns `[x, r)` of output row `y` for `channels` into `row`.
    ///
    /// Must be callable concurrently for different rows.
    fn sample(&self, y: i32, x: i32, r: i32, channels: ChannelSet, row: &mut Row)
        -> OpsResult<()>;

    /// Appends everything that determines this operator's output.
    fn append(&self, hash: &mut CacheHash);
}

impl<O: Operator + ?Sized> Operator for Box<O> {
    fn class(&self) -> &'static str {
        (**self).class()
    }

    fn node_help(&self) -> &'static str {
        (**self).node_help()
    }

    fn slowness(&self) -> u32 {
        (**self).slowness()
    }

    fn validate(&mut self) -> OpsResult<&Info> {
        (**self).validate()
    }

    fn info(&self) -> Option<&Info> {
        (**self).info()
    }

    fn request_input(&self, bounds: Rect, channels: ChannelSet, count: u32) -> OpsResult<()> {
        (**self).request_input(bounds, channels, count)
    }

    fn sample(
        &self,
        y: i32,
        x: i32,
        r: i32,
        channels: ChannelSet,
        row: &mut Row,
    ) -> OpsResult<()> {
        (**self).sample(y, x, r, channels, row)
    }

    fn append(&self, hash: &mut CacheHash) {
        (**self).append(hash);
    }
}
