use kurbo::Shape as _;

use super::*;
use crate::{
    clouds::{cluster::Cluster, lobes::build_lobes, seed::Seed},
    config::CloudConfig,
    foundation::rng::{Rng64, SequenceRng},
};

const PADDING: Interval = Interval(14.0, 28.0);
const JITTER: Interval = Interval(0.45, 0.55);

fn assert_contained(shape: &CompositeShape) {
    let w = f64::from(shape.width);
    let h = f64::from(shape.height);
    for l in &shape.lobes {
        assert!(l.cx - l.rx >= -1e-9, "{l:?} leaks left of 0");
        assert!(l.cy - l.ry >= -1e-9, "{l:?} leaks above 0");
        assert!(l.cx + l.rx <= w + 1e-9, "{l:?} leaks right of {w}");
        assert!(l.cy + l.ry <= h + 1e-9, "{l:?} leaks below {h}");
    }
}

#[test]
fn single_lobe_exact_layout() {
    // rx, ry at the low end of the jitter, then padding at its low end
    let mut rng = SequenceRng::new(vec![0.0, 0.0, 0.0]);
    let lobe = Seed::new(100.0, 200.0, 100.0, 40.0);
    let shape = build_composite_shape(&mut rng, &[lobe], PADDING, JITTER).unwrap();

    assert_eq!(shape.width, 128);
    assert_eq!(shape.height, 68);
    assert_eq!(shape.padding, 14.0);
    assert_eq!(shape.origin, Point::new(36.0, 166.0));
    let l = shape.lobes[0];
    assert!((l.cx - 64.0).abs() < 1e-9);
    assert!((l.cy - 34.0).abs() < 1e-9);
    assert!((l.rx - 45.0).abs() < 1e-9);
    assert!((l.ry - 18.0).abs() < 1e-9);
    assert_eq!(rng.draws(), 3);
}

#[test]
fn wide_jitter_still_fits_the_frame() {
    // Radii at the top of the jitter range exceed w/2 and must widen the box.
    let mut rng = SequenceRng::new(vec![0.999_999, 0.999_999, 0.0]);
    let lobe = Seed::new(0.0, 0.0, 800.0, 400.0);
    let shape = build_composite_shape(&mut rng, &[lobe], Interval(0.0, 0.0), JITTER).unwrap();
    assert_contained(&shape);
    assert!(shape.width >= 880);
}

#[test]
fn every_lobe_is_contained_for_random_clusters() {
    let cfg = CloudConfig::default();
    for seed in 0..40u64 {
        let mut rng = Rng64::new(seed);
        let cluster = Cluster::new(
            (0..(seed % 7 + 1))
                .map(|_| {
                    Seed::new(
                        rng.range(-300.0, 1600.0),
                        rng.range(-100.0, 900.0),
                        rng.range(220.0, 700.0),
                        rng.range(100.0, 490.0),
                    )
                })
                .collect(),
        );
        let lobes = build_lobes(&mut rng, &cluster, &cfg.lobes, cfg.aspect).unwrap();
        let shape = build_composite_shape(&mut rng, &lobes, cfg.padding, cfg.radius_jitter).unwrap();
        assert_eq!(shape.lobes.len(), lobes.len());
        assert!(shape.width >= 1 && shape.height >= 1);
        assert_contained(&shape);

        let frame = shape.local_bounds();
        for l in &shape.lobes {
            let bb = l.ellipse().bounding_box();
            assert!(bb.x0 >= frame.x0 - 1e-6 && bb.x1 <= frame.x1 + 1e-6);
            assert!(bb.y0 >= frame.y0 - 1e-6 && bb.y1 <= frame.y1 + 1e-6);
        }
    }
}

#[test]
fn degenerate_lobes_still_give_a_pixel() {
    let mut rng = Rng64::new(1);
    let lobe = Seed::new(5.0, 5.0, 0.0, 0.0);
    let shape = build_composite_shape(&mut rng, &[lobe], Interval(0.0, 0.0), JITTER).unwrap();
    assert_eq!((shape.width, shape.height), (1, 1));
}

#[test]
fn world_bounds_offset_local_frame() {
    let mut rng = SequenceRng::new(vec![0.0]);
    let lobe = Seed::new(100.0, 200.0, 100.0, 40.0);
    let shape = build_composite_shape(&mut rng, &[lobe], PADDING, JITTER).unwrap();
    assert_eq!(shape.world_bounds(), Rect::new(36.0, 166.0, 164.0, 234.0));
}

#[test]
fn empty_lobes_are_rejected() {
    let mut rng = Rng64::new(0);
    assert!(build_composite_shape(&mut rng, &[], PADDING, JITTER).is_err());
}
