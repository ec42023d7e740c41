//! # tileroll-ops
//!
//! Toroidal image roll for seamless tile painting.
//!
//! [`TileRoll`] offsets its input by a whole number of pixels and wraps
//! whatever leaves one edge back in on the opposite edge. Rolling a texture
//! by half its size brings the tiling seams to the middle of the frame,
//! where they are easy to paint away.
//!
//! # Modules
//!
//! - [`roll`] - The roll operator
//! - [`wrap`] - Coordinate wrapping
//! - [`displacement`] - Rounding offsets to whole pixels
//! - [`node`] - Host seams: `Input`, `NodeBase`, `Operator`
//! - [`params`] - Parameters, UI metadata, persistence
//! - [`hash`] - Cache keys and build identity
//! - [`registry`] - Operator catalog
//! - [`source`] - In-memory input
//! - [`render`] - Row-parallel rendering
//!
//! # Example
//!
//! ```rust
//! use tileroll_core::{Channel, ChannelSet, Format, PlanarImage};
//! use tileroll_ops::{render, ImageInput, InputNode, Operator, RollParams, TileRoll};
//!
//! let format = Format::new(64, 64).unwrap();
//! let texture = PlanarImage::from_fn(format, ChannelSet::RGBA, |x, y, _| (x ^ y) as f32);
//!
//! // Half a tile in each direction: the seams cross at the center.
//! let params = RollParams::new(32.0, 32.0);
//! let mut op = TileRoll::with_params(InputNode::new(ImageInput::new(texture)), params);
//! op.validate()?;
//!
//! let rolled = render(&op, ChannelSet::RGBA)?;
//! assert_eq!(rolled.bounds(), format.rect());
//! assert_eq!(rolled.get(32, 32, Channel::Red), Some(0.0));
//! # Ok::<(), tileroll_ops::OpsError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` (default) - Sample rows on the rayon thread pool

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod displacement;
pub mod hash;
pub mod node;
pub mod params;
pub mod registry;
pub mod render;
pub mod roll;
pub mod source;
pub mod wrap;

pub use error::{OpsError, OpsResult};
pub use displacement::Displacement;
pub use hash::{CacheHash, CacheKey, BUILD_ID};
pub use node::{Info, Input, NodeBase, Operator};
pub use params::{Knob, RollParams};
pub use registry::{Description, Registry};
pub use render::{render, render_sequential};
pub use roll::TileRoll;
pub use source::{ImageInput, InputNode};
