//! Drive an operator over its full output, one scanline per task.
//!
//! This is the scheduling half of the host: request the input once, then
//! sample every row of the output bounds. With the `parallel` feature
//! (default) rows are distributed over the rayon thread pool; otherwise
//! they run in order on the calling thread. Both paths produce identical
//! images.

use std::ops::Range;

use tileroll_core::{ChannelSet, PlanarImage, Row};
#[allow(unused_imports)]
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::node::{Info, Operator};
use crate::{OpsError, OpsResult};

fn validated_info<O: Operator + ?Sized>(op: &O) -> OpsResult<Info> {
    op.info().copied().ok_or(OpsError::NotValidated(op.class()))
}

fn sample_row<O: Operator + ?Sized>(
    op: &O,
    info: &Info,
    y: i32,
    channels: ChannelSet,
) -> OpsResult<Row> {
    let x = info.bounds.x;
    let r = info.bounds.right();
    let mut row = Row::new(x, r, channels);
    op.sample(y, x, r, channels, &mut row)?;
    Ok(row)
}

/// Samples rows `rows` of a validated operator across the thread pool.
///
/// Rows come back in order. Each task owns its row buffer, so no output
/// memory is shared between threads.
#[cfg(feature = "parallel")]
pub fn render_rows<O: Operator + ?Sized>(
    op: &O,
    rows: Range<i32>,
    channels: ChannelSet,
) -> OpsResult<Vec<Row>> {
    let info = validated_info(op)?;
    trace!(start = rows.start, end = rows.end, channels = %channels, "render::render_rows");
    rows.into_par_iter()
        .map(|y| sample_row(op, &info, y, channels))
        .collect()
}

/// Samples rows `rows` of a validated operator (single-threaded fallback).
#[cfg(not(feature = "parallel"))]
pub fn render_rows<O: Operator + ?Sized>(
    op: &O,
    rows: Range<i32>,
    channels: ChannelSet,
) -> OpsResult<Vec<Row>> {
    render_rows_sequential(op, rows, channels)
}

/// Samples rows `rows` in order on the calling thread.
pub fn render_rows_sequential<O: Operator + ?Sized>(
    op: &O,
    rows: Range<i32>,
    channels: ChannelSet,
) -> OpsResult<Vec<Row>> {
    let info = validated_info(op)?;
    trace!(start = rows.start, end = rows.end, channels = %channels, "render::render_rows_sequential");
    rows.map(|y| sample_row(op, &info, y, channels)).collect()
}

fn assemble(info: &Info, channels: ChannelSet, rows: Vec<Row>) -> OpsResult<PlanarImage> {
    let mut out = PlanarImage::new(info.format, info.bounds, channels);
    for (y, row) in info.bounds.rows().zip(&rows) {
        out.write_row(y, row)?;
    }
    Ok(out)
}

/// Renders the whole output of a validated operator.
///
/// Requests the input once, then samples every row of the output bounds.
///
/// # Errors
///
/// [`OpsError::NotValidated`] if `op` has not been validated, or any error
/// the operator raises while sampling.
pub fn render<O: Operator + ?Sized>(op: &O, channels: ChannelSet) -> OpsResult<PlanarImage> {
    let info = validated_info(op)?;
    debug!(class = op.class(), bounds = %info.bounds, channels = %channels, "Rendering");
    op.request_input(info.bounds, channels, 1)?;
    let rows = render_rows(op, info.bounds.rows(), channels)?;
    assemble(&info, channels, rows)
}

/// Like [`render`], but samples every row on the calling thread.
pub fn render_sequential<O: Operator + ?Sized>(
    op: &O,
    channels: ChannelSet,
) -> OpsResult<PlanarImage> {
    let info = validated_info(op)?;
    op.request_input(info.bounds, channels, 1)?;
    let rows = render_rows_sequential(op, info.bounds.rows(), channels)?;
    assemble(&info, channels, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ImageInput, InputNode};
    use crate::{RollParams, TileRoll};
    use tileroll_core::{Channel, Format};

    fn op(params: RollParams) -> TileRoll<InputNode<ImageInput>> {
        let format = Format::new(5, 4).unwrap();
        let img = PlanarImage::from_fn(format, ChannelSet::RGB, |x, y, _| (y * 10 + x) as f32);
        TileRoll::with_params(InputNode::new(ImageInput::new(img)), params)
    }

    #[test]
    fn test_render_requires_validate() {
        let op = op(RollParams::default());
        assert!(matches!(
            render(&op, ChannelSet::RGB),
            Err(OpsError::NotValidated(_))
        ));
    }

    #[test]
    fn test_render_matches_sequential() {
        let mut op = op(RollParams::new(3.0, -1.0));
        op.validate().unwrap();
        let a = render(&op, ChannelSet::RGB).unwrap();
        let b = render_sequential(&op, ChannelSet::RGB).unwrap();
        assert!(a == b);
        assert_eq!(a.get(0, 0, Channel::Green), Some(12.0));
    }

    #[test]
    fn test_render_requests_input_once() {
        let mut op = op(RollParams::default());
        op.validate().unwrap();
        render(&op, ChannelSet::RED).unwrap();
        assert_eq!(op.base().input().requests().len(), 1);
    }

    #[test]
    fn test_render_rows_in_order() {
        let mut op = op(RollParams::default());
        op.validate().unwrap();
        let rows = render_rows(&op, 1..3, ChannelSet::RED).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].value(Channel::Red, 0), Some(10.0));
        assert_eq!(rows[1].value(Channel::Red, 4), Some(24.0));
    }
}
