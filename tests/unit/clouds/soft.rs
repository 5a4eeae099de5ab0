use super::*;
use crate::{
    config::CloudConfig,
    foundation::core::Interval,
    foundation::rng::{Rng64, SequenceRng},
};

fn palette() -> Vec<String> {
    CloudConfig::default().palette
}

#[test]
fn draws_in_documented_order() {
    // width, aspect, colour, frequency, octaves, noise seed, displacement, blur, top, left, opacity
    let mut rng = SequenceRng::new(vec![0.5, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    let viewport = Viewport::new(1000.0, 800.0).unwrap();
    let (seed, cloud) = build_soft_cloud(
        &mut rng,
        "cloud-0".to_string(),
        viewport,
        &SoftConfig::default(),
        &palette(),
    )
    .unwrap();
    assert_eq!(rng.draws(), 11);

    assert_eq!(cloud.color, "#ffffff");
    assert_eq!(cloud.seed_count, 1);
    assert_eq!(cloud.filter.octaves, 2);
    assert_eq!(cloud.filter.seed, 1);
    assert_eq!(cloud.filter.displacement, 15);
    assert_eq!(cloud.filter.blur, 2.0);
    assert!((cloud.opacity - 0.6).abs() < 1e-12);

    let shape = &cloud.shape;
    assert_eq!((shape.width, shape.height), (235, 135));
    assert!((shape.origin.x + 100.0).abs() < 1e-9);
    assert!((shape.origin.y + 64.0).abs() < 1e-9);
    assert_eq!(shape.padding, 0.0);
    assert_eq!(
        shape.lobes,
        vec![ShapeLobe {
            cx: 118.0,
            cy: 68.0,
            rx: 89.0,
            ry: 51.0
        }]
    );

    assert!((seed.x - 17.5).abs() < 1e-9);
    assert!((seed.w - 235.0).abs() < 1e-9);
}

#[test]
fn ellipse_stays_inside_its_box() {
    let cfg = SoftConfig {
        size: Interval(1.0, 40.0),
        narrow_size_scale: 1.0,
        radius_scale: 0.5,
        ..SoftConfig::default()
    };
    let viewport = Viewport::new(1280.0, 720.0).unwrap();
    for s in 0..200u64 {
        let mut rng = Rng64::new(s);
        let (_, cloud) =
            build_soft_cloud(&mut rng, format!("c{s}"), viewport, &cfg, &palette()).unwrap();
        let shape = &cloud.shape;
        let l = shape.lobes[0];
        assert!(shape.width >= 1 && shape.height >= 1);
        assert!(l.cx - l.rx >= 0.0 && l.cy - l.ry >= 0.0, "{l:?}");
        assert!(l.cx + l.rx <= f64::from(shape.width), "{l:?} in {}", shape.width);
        assert!(l.cy + l.ry <= f64::from(shape.height), "{l:?} in {}", shape.height);
    }
}

#[test]
fn narrow_viewports_shrink_size_and_count() {
    let cfg = SoftConfig::default();
    let narrow = Viewport::new(390.0, 844.0).unwrap();
    let wide = Viewport::new(1440.0, 900.0).unwrap();
    for s in 0..50u64 {
        let mut rng = Rng64::new(s);
        assert!((6..12).contains(&soft_count(&mut rng, narrow, &cfg)));
        assert!((12..22).contains(&soft_count(&mut rng, wide, &cfg)));

        let (seed, _) =
            build_soft_cloud(&mut rng, "c".to_string(), narrow, &cfg, &palette()).unwrap();
        assert!(seed.w >= 120.0 && seed.w < 350.0 * 0.65);
    }
}

#[test]
fn empty_palette_is_rejected() {
    let mut rng = Rng64::new(1);
    let viewport = Viewport::new(800.0, 600.0).unwrap();
    let err = build_soft_cloud(&mut rng, "c".to_string(), viewport, &SoftConfig::default(), &[])
        .unwrap_err();
    assert!(matches!(err, NubesError::Config(_)));
}
