//! SVG serialization of clouds.
//!
//! Each cloud becomes one `<svg>` element holding a noise-displacement filter and one ellipse
//! per lobe inside a filtered group. Output depends only on the cloud value, so re-rendering a
//! cloud never changes its silhouette.

use std::fmt::Write as _;

use crate::clouds::field::{Cloud, CloudField};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Standalone document for a single cloud, sized to its padded bounding box.
pub fn render_shape(cloud: &Cloud) -> String {
    let (w, h) = (cloud.shape.width, cloud.shape.height);
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="{SVG_NS}" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    write_cloud_body(&mut out, cloud);
    out.push_str("</svg>\n");
    out
}

/// Viewport-sized document with every cloud nested at its rounded world position.
pub fn render_field(field: &CloudField) -> String {
    let vw = field.viewport.width.round().max(1.0) as u32;
    let vh = field.viewport.height.round().max(1.0) as u32;

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="{SVG_NS}" width="{vw}" height="{vh}" viewBox="0 0 {vw} {vh}">"#
    );
    for cloud in &field.clouds {
        let (w, h) = (cloud.shape.width, cloud.shape.height);
        let x = cloud.shape.origin.x.round();
        let y = cloud.shape.origin.y.round();
        let _ = write!(
            out,
            r#"<svg x="{x}" y="{y}" width="{w}" height="{h}" viewBox="0 0 {w} {h}" overflow="visible">"#
        );
        write_cloud_body(&mut out, cloud);
        out.push_str("</svg>\n");
    }
    out.push_str("</svg>\n");
    out
}

fn write_cloud_body(out: &mut String, cloud: &Cloud) {
    let id = escape_attr(&cloud.id);
    let f = &cloud.filter;
    let _ = write!(
        out,
        concat!(
            r#"<defs><filter id="{id}-f" x="-30%" y="-30%" width="160%" height="160%">"#,
            r#"<feTurbulence type="fractalNoise" baseFrequency="{freq:.4}" numOctaves="{oct}" seed="{seed}" result="noise"/>"#,
            r#"<feDisplacementMap in="SourceGraphic" in2="noise" scale="{disp}" xChannelSelector="R" yChannelSelector="G" result="displaced"/>"#,
            r#"<feGaussianBlur in="displaced" stdDeviation="{blur:.1}" result="blurred"/>"#,
            r#"<feComposite in="blurred" in2="blurred" operator="atop"/>"#,
            r#"</filter></defs>"#,
        ),
        id = id,
        freq = f.base_frequency,
        oct = f.octaves,
        seed = f.seed,
        disp = f.displacement,
        blur = f.blur,
    );

    let fill = escape_attr(&cloud.color);
    let _ = write!(
        out,
        r#"<g filter="url(#{id}-f)" opacity="{:.2}">"#,
        cloud.opacity
    );
    for l in &cloud.shape.lobes {
        let _ = write!(
            out,
            r#"<ellipse cx="{:.1}" cy="{:.1}" rx="{:.1}" ry="{:.1}" fill="{fill}"/>"#,
            l.cx, l.cy, l.rx, l.ry
        );
    }
    out.push_str("</g>");
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/clouds/svg.rs"]
mod tests;
