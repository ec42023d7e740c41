//! Toroidal roll: offset an image by whole pixels and wrap it around.
//!
//! Rolling moves the seams of a tileable texture into the middle of the
//! frame, where they can be painted out. Rolling back by the same amount
//! afterwards restores the original framing with the seams gone.
//!
//! ```text
//!  input           roll (2, 0)
//! ┌─────────┐      ┌─────────┐
//! │ a b c d │  ──► │ c d a b │
//! └─────────┘      └─────────┘
//! ```
//!
//! The output pixel at (x, y) is the input pixel at
//! `(wrap(x - dx, W), wrap(y - dy, H))`, where (W, H) is the input format
//! and (dx, dy) the rounded offset. The output bounding box is always the
//! input's.
//!
//! # Example
//!
//! ```rust
//! use tileroll_core::{Channel, ChannelSet, Format, PlanarImage};
//! use tileroll_ops::{render, ImageInput, InputNode, Operator, RollParams, TileRoll};
//!
//! let format = Format::new(4, 1).unwrap();
//! let img = PlanarImage::from_fn(format, ChannelSet::RED, |x, _, _| x as f32);
//! let mut op = TileRoll::with_params(InputNode::new(ImageInput::new(img)), RollParams::new(1.0, 0.0));
//! op.validate().unwrap();
//!
//! let out = render(&op, ChannelSet::RED).unwrap();
//! assert_eq!(out.row_plane(0, Channel::Red), Some(&[3.0, 0.0, 1.0, 2.0][..]));
//! ```

use std::num::NonZeroU32;

use glam::DMat4;
use tileroll_core::{ChannelSet, Pixel, Rect, Row};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::displacement::{overlay_matrix, Displacement};
use crate::hash::{CacheHash, BUILD_ID};
use crate::node::{Info, NodeBase, Operator};
use crate::params::{Knob, RollParams, KNOBS};
use crate::registry::Description;
use crate::wrap::offset_coord;
use crate::{OpsError, OpsResult};

/// Class name under which the operator registers.
pub const CLASS: &str = "TileRoll";

/// Menu path; the first segment is the category.
pub const MENU: &str = "Transform/TileRoll";

/// One-line help.
pub const HELP: &str =
    "Rolls the input by an integer number of pixels and loops it, for painting away tiling";

/// Registry entry for [`TileRoll`].
pub const DESCRIPTION: Description = Description {
    class: CLASS,
    menu: MENU,
    help: HELP,
    build,
};

fn build(base: Box<dyn NodeBase>) -> Box<dyn Operator> {
    Box::new(TileRoll::new(base))
}

/// State computed by a successful validate.
#[derive(Debug, Clone, Copy)]
struct Validated {
    displacement: Displacement,
    width: NonZeroU32,
    height: NonZeroU32,
    info: Info,
}

/// The roll operator.
///
/// Owns the parameters and the displacement derived from them. Everything
/// else (input access, generic hashing) goes through the injected
/// [`NodeBase`].
pub struct TileRoll<B> {
    base: B,
    params: RollParams,
    matrix: DMat4,
    state: Option<Validated>,
}

impl<B: NodeBase> TileRoll<B> {
    /// Creates an operator with default parameters (no roll).
    pub fn new(base: B) -> Self {
        Self::with_params(base, RollParams::default())
    }

    /// Creates an operator with the given parameters.
    pub fn with_params(base: B, params: RollParams) -> Self {
        Self {
            base,
            params,
            matrix: overlay_matrix(params.roll_vec()),
            state: None,
        }
    }

    /// The injected node base.
    pub fn base(&self) -> &B {
        &self.base
    }

    /// Current parameter values.
    pub fn params(&self) -> RollParams {
        self.params
    }

    /// Replaces all parameters. Invalidates on change.
    pub fn set_params(&mut self, params: RollParams) {
        if params != self.params {
            self.params = params;
            self.state = None;
        }
    }

    /// Sets the visible roll offset.
    pub fn set_roll(&mut self, x: f64, y: f64) {
        self.set_params(RollParams {
            roll: [x, y],
            ..self.params
        });
    }

    /// Sets the hidden origin.
    pub fn set_origin(&mut self, x0: f64, y0: f64) {
        self.set_params(RollParams {
            origin: [x0, y0],
            ..self.params
        });
    }

    /// Returns `true` after a successful validate with unchanged params.
    pub fn is_valid(&self) -> bool {
        self.state.is_some()
    }

    /// The rounded offset, once validated.
    pub fn displacement(&self) -> Option<Displacement> {
        self.state.map(|s| s.displacement)
    }

    /// Viewer overlay transform, translation by the raw roll offset.
    pub fn matrix(&self) -> &DMat4 {
        &self.matrix
    }

    /// Controls this operator publishes.
    pub fn knobs() -> &'static [Knob] {
        &KNOBS
    }
}

impl<B: NodeBase> Operator for TileRoll<B> {
    fn class(&self) -> &'static str {
        CLASS
    }

    fn node_help(&self) -> &'static str {
        HELP
    }

    fn slowness(&self) -> u32 {
        1
    }

    fn validate(&mut self) -> OpsResult<&Info> {
        trace!(roll = ?self.params.roll, origin = ?self.params.origin, "tileroll::validate");
        self.state = None;

        let displacement = Displacement::from_params(&self.params)?;

        let input = self.base.input0().info();
        let input_bounds = input.bounds;
        let format = input.format;
        if format.width() > i32::MAX as u32 || format.height() > i32::MAX as u32 {
            return Err(OpsError::InvalidDimensions(format!(
                "format {} exceeds the pixel coordinate range",
                format
            )));
        }

        let mut info = self.base.copy_info();
        self.matrix = overlay_matrix(self.params.roll_vec());
        // Same bbox as the input: rolling never grows or shrinks the frame.
        info.bounds = info.bounds.intersect(&input_bounds).unwrap_or(input_bounds);

        debug!(
            dx = displacement.dx,
            dy = displacement.dy,
            bounds = %info.bounds,
            format = %format,
            "Validated roll"
        );

        let state = self.state.insert(Validated {
            displacement,
            width: format.width_nz(),
            height: format.height_nz(),
            info,
        });
        Ok(&state.info)
    }

    fn info(&self) -> Option<&Info> {
        self.state.as_ref().map(|s| &s.info)
    }

    fn request_input(&self, bounds: Rect, channels: ChannelSet, count: u32) -> OpsResult<()> {
        if self.state.is_none() {
            return Err(OpsError::NotValidated(CLASS));
        }
        let input = self.base.input0();
        let whole = input.info().bounds;
        trace!(output = %bounds, input = %whole, channels = %channels, count, "tileroll::request_input");
        // Any output pixel can read any input pixel.
        input.request(whole, channels, count);
        Ok(())
    }

    fn sample(
        &self,
        y: i32,
        x: i32,
        r: i32,
        channels: ChannelSet,
        row: &mut Row,
    ) -> OpsResult<()> {
        let state = self.state.as_ref().ok_or(OpsError::NotValidated(CLASS))?;
        if r < x {
            return Err(OpsError::InvalidParameter(format!(
                "inverted column span [{}, {})",
                x, r
            )));
        }
        if !row.covers(x, r) {
            return Err(OpsError::InvalidParameter(format!(
                "row buffer [{}, {}) does not cover [{}, {})",
                row.x(),
                row.r(),
                x,
                r
            )));
        }
        if !row.channels().contains(channels) {
            return Err(OpsError::InvalidParameter(format!(
                "row buffer has channels {}, request needs {}",
                row.channels(),
                channels
            )));
        }

        let input = self.base.input0();
        let Displacement { dx, dy } = state.displacement;
        // Format dimensions were checked to fit in i32 by validate().
        let the_y = offset_coord(i64::from(y) - i64::from(dy), state.height) as i32;
        let start = (i64::from(x) - i64::from(row.x())) as usize;
        let mut pixel = Pixel::new(channels);

        for (i, col) in (x..r).enumerate() {
            let the_x = offset_coord(i64::from(col) - i64::from(dx), state.width) as i32;
            input.at(the_x, the_y, channels, &mut pixel);
            for c in channels.channels() {
                if let Some(plane) = row.writable(c) {
                    plane[start + i] = pixel[c];
                }
            }
        }
        Ok(())
    }

    fn append(&self, hash: &mut CacheHash) {
        hash.append_str(BUILD_ID);
        hash.append_str(CLASS);
        self.params.append(hash);
        self.base.append(hash);
    }
}
