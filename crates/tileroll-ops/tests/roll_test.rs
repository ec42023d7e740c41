//! End-to-end tests for the roll operator through the in-memory host.

use tileroll_core::{Channel, ChannelSet, Format, PlanarImage, Rect, Row};
use tileroll_ops::render::{render_rows, render_rows_sequential};
use tileroll_ops::{
    render, render_sequential, CacheHash, Displacement, ImageInput, InputNode, NodeBase, Operator,
    Registry, RollParams, TileRoll,
};

const W: u32 = 7;
const H: u32 = 5;

fn texture() -> PlanarImage {
    let format = Format::new(W, H).unwrap();
    PlanarImage::from_fn(format, ChannelSet::RGBA, |x, y, c| {
        (y * 100 + x) as f32 + c.index() as f32 * 0.125
    })
}

fn rolled(params: RollParams) -> TileRoll<InputNode<ImageInput>> {
    let mut op = TileRoll::with_params(InputNode::new(ImageInput::new(texture())), params);
    op.validate().unwrap();
    op
}

fn assert_same(a: &PlanarImage, b: &PlanarImage) {
    assert_eq!(a.bounds(), b.bounds());
    for c in ChannelSet::RGBA.channels() {
        for y in a.bounds().rows() {
            assert_eq!(a.row_plane(y, c), b.row_plane(y, c), "row {} channel {}", y, c);
        }
    }
}

#[test]
fn test_zero_roll_is_identity() {
    let out = render(&rolled(RollParams::default()), ChannelSet::RGBA).unwrap();
    assert_same(&out, &texture());
}

#[test]
fn test_full_cycle_roll_is_identity() {
    let src = texture();
    for params in [
        RollParams::new(W as f64, H as f64),
        RollParams::new(-(W as f64), 0.0),
        RollParams::new(3.0 * W as f64, -2.0 * H as f64),
    ] {
        let out = render(&rolled(params), ChannelSet::RGBA).unwrap();
        assert_same(&out, &src);
    }
}

#[test]
fn test_roll_right_by_one() {
    let src = texture();
    let out = render(&rolled(RollParams::new(1.0, 0.0)), ChannelSet::RGBA).unwrap();
    let last = W as i32 - 1;
    for y in src.bounds().rows() {
        for c in ChannelSet::RGBA.channels() {
            assert_eq!(out.get(0, y, c), src.get(last, y, c));
            for x in 1..W as i32 {
                assert_eq!(out.get(x, y, c), src.get(x - 1, y, c));
            }
        }
    }
}

#[test]
fn test_roll_matches_modular_reference() {
    let src = texture();
    for (dx, dy) in [(2, 3), (-9, 4), (13, -17), (-36, -26)] {
        let out = render(&rolled(RollParams::new(dx as f64, dy as f64)), ChannelSet::RGB).unwrap();
        for y in 0..H as i32 {
            for x in 0..W as i32 {
                let sx = (x - dx).rem_euclid(W as i32);
                let sy = (y - dy).rem_euclid(H as i32);
                assert_eq!(
                    out.get(x, y, Channel::Blue),
                    src.get(sx, sy, Channel::Blue),
                    "roll ({}, {}) at ({}, {})",
                    dx,
                    dy,
                    x,
                    y
                );
            }
        }
    }
}

#[test]
fn test_roll_there_and_back() {
    let there = render(&rolled(RollParams::new(3.0, 2.0)), ChannelSet::RGBA).unwrap();
    let mut back = TileRoll::with_params(
        InputNode::new(ImageInput::new(there)),
        RollParams::new(-3.0, -2.0),
    );
    back.validate().unwrap();
    assert_same(&render(&back, ChannelSet::RGBA).unwrap(), &texture());
}

#[test]
fn test_bounds_always_match_input() {
    let format = Format::new(W, H).unwrap();
    // Data box offset from the format, partly outside it.
    let offset = PlanarImage::new(format, Rect::new(-2, 1, 6, 8), ChannelSet::RGB);
    for params in [
        RollParams::default(),
        RollParams::new(1.5, -2.5),
        RollParams::new(-1000.0, 1e6),
    ] {
        let mut op = rolled(params);
        assert_eq!(op.validate().unwrap().bounds, Rect::from_size(W, H));

        let mut op = TileRoll::with_params(InputNode::new(ImageInput::new(offset.clone())), params);
        let info = *op.validate().unwrap();
        assert_eq!(info.bounds, Rect::new(-2, 1, 6, 8));
        assert_eq!(info.format, format);
        assert_eq!(render(&op, ChannelSet::RGB).unwrap().bounds(), info.bounds);
    }
}

#[test]
fn test_rounding_half_up() {
    let d = |x: f64| rolled(RollParams::new(x, -x)).displacement().unwrap();
    assert_eq!(d(2.5), Displacement::new(3, -2));
    assert_eq!(d(-2.5), Displacement::new(-2, 3));
    assert_eq!(d(0.49), Displacement::new(0, 0));
}

#[test]
fn test_fractional_roll_samples_like_rounded() {
    let a = render(&rolled(RollParams::new(1.6, -0.6)), ChannelSet::RGBA).unwrap();
    let b = render(&rolled(RollParams::new(2.0, -1.0)), ChannelSet::RGBA).unwrap();
    assert_same(&a, &b);
}

#[test]
fn test_parallel_matches_sequential() {
    let op = rolled(RollParams::new(4.0, -3.0));
    let a = render(&op, ChannelSet::RGBA).unwrap();
    let b = render_sequential(&op, ChannelSet::RGBA).unwrap();
    assert_same(&a, &b);
}

#[test]
fn test_disjoint_row_ranges_concatenate() {
    let op = rolled(RollParams::new(-2.0, 6.0));
    let full = render_rows_sequential(&op, 0..H as i32, ChannelSet::RGBA).unwrap();
    let mut pieces = render_rows(&op, 0..2, ChannelSet::RGBA).unwrap();
    pieces.extend(render_rows(&op, 2..H as i32, ChannelSet::RGBA).unwrap());
    assert_eq!(pieces, full);
}

#[test]
fn test_concurrent_sampling_from_threads() {
    let op = rolled(RollParams::new(5.0, 2.0));
    let expected = render_sequential(&op, ChannelSet::RGBA).unwrap();

    let rows: Vec<(i32, Row)> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..H as i32)
            .map(|y| {
                let op = &op;
                s.spawn(move || {
                    let mut row = Row::new(0, W as i32, ChannelSet::RGBA);
                    op.sample(y, 0, W as i32, ChannelSet::RGBA, &mut row).unwrap();
                    (y, row)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (y, row) in rows {
        for c in ChannelSet::RGBA.channels() {
            assert_eq!(row.plane(c), expected.row_plane(y, c));
        }
    }
}

#[test]
fn test_masked_render_leaves_other_channels_out() {
    let out = render(&rolled(RollParams::new(1.0, 1.0)), ChannelSet::ALPHA).unwrap();
    assert_eq!(out.channels(), ChannelSet::ALPHA);
    assert_eq!(out.get(0, 0, Channel::Red), None);
    assert_eq!(out.get(0, 0, Channel::Alpha), Some(406.375));
}

#[test]
fn test_registry_round_trip_with_persisted_params() {
    let registry = Registry::with_builtins();
    let base: Box<dyn NodeBase> = Box::new(InputNode::new(ImageInput::new(texture())));
    let mut op = registry.create("TileRoll", base).unwrap();
    op.validate().unwrap();
    assert_same(&render(&op, ChannelSet::RGBA).unwrap(), &texture());

    let yaml = RollParams::new(1.0, 0.0).to_yaml().unwrap();
    let restored = RollParams::from_yaml(&yaml).unwrap();
    let direct = render(&rolled(restored), ChannelSet::RGB).unwrap();
    assert_eq!(direct.get(0, 0, Channel::Red), Some(6.0));
}

#[test]
fn test_cache_key_changes_with_input_and_params() {
    fn key(op: &dyn Operator) -> tileroll_ops::CacheKey {
        let mut h = CacheHash::new();
        op.append(&mut h);
        h.key()
    }
    let a = rolled(RollParams::new(1.0, 0.0));
    let b = rolled(RollParams::new(1.0, 0.0));
    let c = rolled(RollParams::new(1.0, 1.0));
    assert_eq!(key(&a), key(&b));
    assert_ne!(key(&a), key(&c));

    let format = Format::new(W, H).unwrap();
    let other = PlanarImage::from_fn(format, ChannelSet::RGBA, |_, _, _| 0.5);
    let mut d = TileRoll::with_params(InputNode::new(ImageInput::new(other)), RollParams::new(1.0, 0.0));
    d.validate().unwrap();
    assert_ne!(key(&a), key(&d));
}

#[test]
fn test_non_finite_roll_reported_by_validate() {
    let mut op = TileRoll::with_params(
        InputNode::new(ImageInput::new(texture())),
        RollParams::new(f64::NAN, 0.0),
    );
    assert!(op.validate().is_err());
    assert!(render(&op, ChannelSet::RGB).is_err());
}
