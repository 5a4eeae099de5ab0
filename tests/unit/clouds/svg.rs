use super::*;
use crate::{
    clouds::{
        filter::TurbulenceFilter,
        shape::{CompositeShape, ShapeLobe},
    },
    config::CloudConfig,
    foundation::core::{Point, Viewport},
    foundation::rng::Rng64,
};

fn fixture_cloud() -> Cloud {
    Cloud {
        id: "cloud-0".to_string(),
        seed_count: 1,
        color: "#ffe1ec".to_string(),
        opacity: 0.8,
        filter: TurbulenceFilter {
            base_frequency: 0.0137,
            octaves: 3,
            seed: 42,
            displacement: 20,
            blur: 3.5,
        },
        shape: CompositeShape {
            width: 128,
            height: 68,
            origin: Point::new(36.4, 165.6),
            padding: 14.0,
            lobes: vec![ShapeLobe {
                cx: 64.0,
                cy: 34.0,
                rx: 45.0,
                ry: 18.0,
            }],
        },
    }
}

#[test]
fn shape_markup_carries_filter_and_lobes() {
    let svg = render_shape(&fixture_cloud());
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="128" height="68" viewBox="0 0 128 68">"#));
    assert!(svg.contains(r#"<filter id="cloud-0-f""#));
    assert!(svg.contains(r#"baseFrequency="0.0137" numOctaves="3" seed="42""#));
    assert!(svg.contains(r#"scale="20""#));
    assert!(svg.contains(r#"stdDeviation="3.5""#));
    assert!(svg.contains(r#"<g filter="url(#cloud-0-f)" opacity="0.80">"#));
    assert!(svg.contains(r##"<ellipse cx="64.0" cy="34.0" rx="45.0" ry="18.0" fill="#ffe1ec"/>"##));
}

#[test]
fn rendering_is_stable() {
    let cloud = fixture_cloud();
    assert_eq!(render_shape(&cloud), render_shape(&cloud));
}

#[test]
fn field_nests_clouds_at_rounded_origin() {
    let field = CloudField {
        viewport: Viewport::new(800.0, 600.0).unwrap(),
        center: Point::new(400.0, 300.0),
        seeds: vec![],
        clouds: vec![fixture_cloud()],
    };
    let svg = render_field(&field);
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="600""#));
    assert!(svg.contains(r#"<svg x="36" y="166" width="128" height="68""#));
    assert_eq!(svg.matches("<ellipse").count(), 1);
}

#[test]
fn attribute_values_are_escaped() {
    let mut cloud = fixture_cloud();
    cloud.color = r#"red" onload="x"#.to_string();
    let svg = render_shape(&cloud);
    assert!(svg.contains("fill=\"red&quot; onload=&quot;x\""));
}

#[test]
fn generated_field_parses_as_svg() {
    let field =
        CloudField::generate(&mut Rng64::new(5), Viewport::new(1024.0, 768.0).unwrap(), &CloudConfig::default())
            .unwrap();
    let svg = render_field(&field);
    let tree = usvg::Tree::from_str(&svg, &usvg::Options::default()).unwrap();
    assert_eq!(tree.size().width(), 1024.0);
    let lobes: usize = field.clouds.iter().map(|c| c.shape.lobes.len()).sum();
    assert_eq!(svg.matches("<ellipse").count(), lobes);
}
