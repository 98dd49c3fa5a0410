//! Flat top-down scalp map layout.

use crate::api::ChannelValue;
use crate::knowledge::{region_of, Region};
use crate::montage::{scalp_position, MONTAGE_64, SCALP_EXTRAS};
use crate::report::normalize;
use glam::Vec2;

pub const MAP_SIZE: f32 = 520.0;
pub const MAP_PAD: f32 = 50.0;

/// Map a montage coordinate to SVG pixels (y grows downward).
pub fn to_svg(p: Vec2) -> Vec2 {
    let inner = MAP_SIZE - 2.0 * MAP_PAD;
    Vec2::new(
        ((p.x + 1.15) / 2.3) * inner + MAP_PAD,
        ((1.05 - p.y) / 2.1) * inner + MAP_PAD,
    )
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScalpNode {
    pub name: &'static str,
    pub svg: Vec2,
    pub region: Region,
}

/// Every montage electrode plus the dataset extras, in SVG space.
pub fn scalp_nodes() -> Vec<ScalpNode> {
    MONTAGE_64
        .iter()
        .chain(SCALP_EXTRAS.iter())
        .map(|m| ScalpNode {
            name: m.name,
            svg: to_svg(Vec2::new(m.x, m.y)),
            region: region_of(m.name),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeatPoint {
    pub channel: String,
    pub svg: Vec2,
    pub value: f64,
    /// Value normalized across the plotted channels.
    pub t: f32,
}

/// Place per-channel values on the map. Channels without a known position
/// are skipped.
pub fn scalp_heat(values: &[ChannelValue]) -> Vec<HeatPoint> {
    let placed: Vec<(&ChannelValue, Vec2)> = values
        .iter()
        .filter(|v| v.value.is_finite())
        .filter_map(|v| scalp_position(&v.channel).map(|p| (v, p)))
        .collect();
    let min = placed.iter().map(|(v, _)| v.value).fold(f64::INFINITY, f64::min);
    let max = placed.iter().map(|(v, _)| v.value).fold(f64::NEG_INFINITY, f64::max);
    placed
        .into_iter()
        .map(|(v, p)| HeatPoint {
            channel: v.channel.to_ascii_uppercase(),
            svg: to_svg(p),
            value: v.value,
            t: normalize(v.value, min, max),
        })
        .collect()
}

/// Standalone SVG document of the scalp map, optionally highlighting one
/// electrode and overlaying heat values.
pub fn render_svg(selected: Option<&str>, heat: &[HeatPoint]) -> String {
    let mut s = String::with_capacity(16 * 1024);
    s.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {0} {0}" width="{0}" height="{0}">"#,
        MAP_SIZE
    ));
    let c = MAP_SIZE / 2.0;
    let r = (MAP_SIZE - 2.0 * MAP_PAD) / 2.0;
    s.push_str(&format!(
        r#"<circle cx="{c}" cy="{c}" r="{r}" fill="rgba(255,255,255,0.04)" stroke="rgba(255,255,255,0.25)"/>"#
    ));
    s.push_str(&format!(
        r#"<path d="M {} {} L {} {} L {} {} Z" fill="rgba(255,255,255,0.12)"/>"#,
        c - 14.0,
        MAP_PAD + 4.0,
        c,
        MAP_PAD - 18.0,
        c + 14.0,
        MAP_PAD + 4.0
    ));
    for h in heat {
        s.push_str(&format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="18" fill="{}" opacity="0.55"/>"#,
            h.svg.x,
            h.svg.y,
            crate::report::heat_css(h.t)
        ));
    }
    let selected = selected.map(|n| n.trim().to_ascii_uppercase());
    for n in scalp_nodes() {
        let is_sel = selected.as_deref() == Some(n.name);
        let (radius, fill) = if is_sel {
            (9, "rgba(165,180,252,0.95)".to_string())
        } else {
            (7, n.region.css_color())
        };
        s.push_str(&format!(
            r#"<g data-electrode="{name}" style="cursor:pointer"><circle cx="{x:.1}" cy="{y:.1}" r="{radius}" fill="{fill}" stroke="rgba(0,0,0,0.25)"/><text x="{tx:.1}" y="{ty:.1}" font-size="11" fill="rgba(255,255,255,0.75)">{name}</text></g>"#,
            name = n.name,
            x = n.svg.x,
            y = n.svg.y,
            tx = n.svg.x + 10.0,
            ty = n.svg.y + 4.0,
        ));
    }
    s.push_str("</svg>");
    s
}
