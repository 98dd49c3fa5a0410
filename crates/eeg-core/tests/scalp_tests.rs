use eeg_core::api::ChannelValue;
use eeg_core::demo::{band_shares, trial_matrix};
use eeg_core::scalp::{render_svg, scalp_heat, scalp_nodes, to_svg, MAP_PAD, MAP_SIZE};
use eeg_core::{marker_instances, Placement, ProjectedMarker, MARKER_RADIUS, MARKER_RADIUS_ACTIVE};
use glam::{Vec2, Vec3};

#[test]
fn svg_layout_maps_corners_inside_padding() {
    let tl = to_svg(Vec2::new(-1.15, 1.05));
    let br = to_svg(Vec2::new(1.15, -1.05));
    assert!((tl - Vec2::splat(MAP_PAD)).length() < 1e-4);
    assert!((br - Vec2::splat(MAP_SIZE - MAP_PAD)).length() < 1e-4);
    // Front of the head is at the top of the map.
    assert!(to_svg(Vec2::new(0.0, 0.98)).y < to_svg(Vec2::new(0.0, -0.94)).y);
}

#[test]
fn nodes_include_dataset_extras() {
    let nodes = scalp_nodes();
    assert_eq!(nodes.len(), 63);
    assert!(nodes.iter().any(|n| n.name == "ND"));
}

#[test]
fn heat_normalizes_known_channels_only() {
    let values = vec![
        ChannelValue { channel: "o1".into(), value: 2.0 },
        ChannelValue { channel: "O2".into(), value: 4.0 },
        ChannelValue { channel: "ND".into(), value: 3.0 },
        ChannelValue { channel: "nowhere".into(), value: 100.0 },
        ChannelValue { channel: "CZ".into(), value: f64::NAN },
    ];
    let heat = scalp_heat(&values);
    assert_eq!(heat.len(), 3);
    assert_eq!(heat[0].channel, "O1");
    assert_eq!(heat[0].t, 0.0);
    assert_eq!(heat[1].t, 1.0);
    assert_eq!(heat[2].t, 0.5);
}

#[test]
fn svg_marks_selected_electrode() {
    let svg = render_svg(Some("cz"), &[]);
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains(r#"data-electrode="CZ""#));
    assert!(svg.contains("rgba(165,180,252,0.95)"));
}

#[test]
fn instances_highlight_active_marker() {
    let markers: Vec<ProjectedMarker> = (0..3)
        .map(|i| ProjectedMarker {
            name: format!("M{i}"),
            position: Vec3::new(i as f32, 1.0, 0.0),
            placement: Placement::Surface,
        })
        .collect();
    let inst = marker_instances(&markers, Some(1), Some(2));
    assert_eq!(inst[0].scale, MARKER_RADIUS);
    assert_eq!(inst[1].scale, MARKER_RADIUS_ACTIVE);
    assert_eq!(inst[1].pulse, 1.0);
    assert_eq!(inst[2].scale, MARKER_RADIUS_ACTIVE);
    assert_eq!(inst[2].pulse, 0.0);
    assert_eq!(bytemuck::cast_slice::<_, u8>(&inst).len(), 3 * 36);
}

#[test]
fn demo_data_is_seeded() {
    let a = trial_matrix(7, 4, 256);
    assert_eq!(a.len(), 4);
    assert_eq!(a[0].len(), 256);
    assert_eq!(a, trial_matrix(7, 4, 256));
    assert_ne!(a, trial_matrix(8, 4, 256));
    let shares = band_shares(3);
    assert!((shares.iter().map(|(_, v)| v).sum::<f32>() - 1.0).abs() < 1e-5);
}
