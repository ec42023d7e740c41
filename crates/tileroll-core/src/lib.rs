//! # tileroll-core
//!
//! Foundation types for the TileRoll operator and its in-memory host.
//!
//! - [`Rect`] - Signed, half-open bounding box
//! - [`Format`] - Nominal frame size (never zero)
//! - [`Channel`], [`ChannelSet`] - Image planes and channel masks
//! - [`Pixel`] - One sample across the masked channels
//! - [`Row`] - Scanline output buffer addressed in image columns
//! - [`PlanarImage`] - Per-channel in-memory image
//!
//! ## Crate Structure
//!
//! ```text
//! tileroll-core (this crate)
//!    ^
//!    |
//!    +-- tileroll-ops (roll engine, host traits, registry, renderer)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod channel;
pub mod error;
pub mod format;
pub mod image;
pub mod pixel;
pub mod rect;
pub mod row;

pub use channel::{Channel, ChannelSet};
pub use error::{Error, Result};
pub use format::Format;
pub use image::PlanarImage;
pub use pixel::Pixel;
pub use rect::Rect;
pub use row::Row;

/// Prelude module for convenient imports.
///
/// ```
/// use tileroll_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::channel::{Channel, ChannelSet};
    pub use crate::error::{Error, Result};
    pub use crate::format::Format;
    pub use crate::image::PlanarImage;
    pub use crate::pixel::Pixel;
    pub use crate::rect::Rect;
    pub use crate::row::Row;
}
