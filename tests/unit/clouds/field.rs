use super::*;
use crate::foundation::rng::Rng64;

fn vp() -> Viewport {
    Viewport::new(1440.0, 900.0).unwrap()
}

#[test]
fn same_seed_same_field() {
    let cfg = CloudConfig::default();
    let a = CloudField::generate(&mut Rng64::new(42), vp(), &cfg).unwrap();
    let b = CloudField::generate(&mut Rng64::new(42), vp(), &cfg).unwrap();
    assert_eq!(a, b);

    let c = CloudField::generate(&mut Rng64::new(43), vp(), &cfg).unwrap();
    assert_ne!(a, c);
}

#[test]
fn every_seed_is_accounted_for() {
    let cfg = CloudConfig::default();
    for seed in 0..20u64 {
        let field = CloudField::generate(&mut Rng64::new(seed), vp(), &cfg).unwrap();
        assert!((12..18).contains(&field.seeds.len()));
        let total: usize = field.clouds.iter().map(|c| c.seed_count).sum();
        assert_eq!(total, field.seeds.len());
        for cloud in &field.clouds {
            assert!((8..=12).contains(&cloud.shape.lobes.len()));
            assert!(cfg.palette.contains(&cloud.color));
            assert!(cloud.opacity >= 0.62 && cloud.opacity < 0.95);
        }
    }
}

#[test]
fn cloud_ids_are_unique_and_ordered() {
    let cfg = CloudConfig {
        merge_factor: 0.05,
        ..CloudConfig::default()
    };
    let field = CloudField::generate(&mut Rng64::new(7), vp(), &cfg).unwrap();
    assert!(field.clouds.len() > 1);
    for (i, cloud) in field.clouds.iter().enumerate() {
        assert_eq!(cloud.id, format!("cloud-{i}"));
    }
}

#[test]
fn invalid_config_is_rejected_before_drawing() {
    let cfg = CloudConfig {
        palette: vec![],
        ..CloudConfig::default()
    };
    let err = CloudField::generate(&mut Rng64::new(1), vp(), &cfg).unwrap_err();
    assert!(matches!(err, NubesError::Config(_)));
}

#[test]
fn soft_style_builds_one_cloud_per_seed() {
    let cfg = CloudConfig {
        style: CloudStyle::Soft,
        ..CloudConfig::default()
    };
    for seed in 0..20u64 {
        let field = CloudField::generate(&mut Rng64::new(seed), vp(), &cfg).unwrap();
        assert!((12..22).contains(&field.clouds.len()));
        assert_eq!(field.seeds.len(), field.clouds.len());
        assert_eq!(field.center, Point::new(720.0, 450.0));
        for (i, cloud) in field.clouds.iter().enumerate() {
            assert_eq!(cloud.id, format!("cloud-{i}"));
            assert_eq!(cloud.seed_count, 1);
            assert_eq!(cloud.shape.lobes.len(), 1);
            assert!((15..40).contains(&cloud.filter.displacement));
            assert!(cloud.filter.blur >= 2.0 && cloud.filter.blur <= 5.0);
            assert!(cloud.opacity >= 0.6 && cloud.opacity < 0.95);
        }
    }
}

#[test]
fn style_changes_the_output_for_the_same_seed() {
    let clustered = CloudField::generate(&mut Rng64::new(3), vp(), &CloudConfig::default()).unwrap();
    let soft = CloudField::generate(
        &mut Rng64::new(3),
        vp(),
        &CloudConfig {
            style: CloudStyle::Soft,
            ..CloudConfig::default()
        },
    )
    .unwrap();
    assert_ne!(clustered, soft);
}
