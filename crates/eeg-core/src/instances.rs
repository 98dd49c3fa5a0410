//! GPU-ready per-marker instance data.

use crate::constants::{MARKER_COLOR, MARKER_COLOR_ACTIVE, MARKER_RADIUS, MARKER_RADIUS_ACTIVE};
use crate::projection::ProjectedMarker;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub pos: [f32; 3],
    pub scale: f32,
    pub color: [f32; 4],
    pub pulse: f32,
}

/// One instance per marker; the selected or hovered marker is enlarged and
/// recolored, and the selected one gets a highlight ring.
pub fn marker_instances(
    markers: &[ProjectedMarker],
    selected: Option<usize>,
    hovered: Option<usize>,
) -> Vec<InstanceData> {
    markers
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let active = selected == Some(i) || hovered == Some(i);
            InstanceData {
                pos: m.position.to_array(),
                scale: if active { MARKER_RADIUS_ACTIVE } else { MARKER_RADIUS },
                color: if active { MARKER_COLOR_ACTIVE } else { MARKER_COLOR },
                pulse: if selected == Some(i) { 1.0 } else { 0.0 },
            }
        })
        .collect()
}
