use eeg_core::primitives::{fallback_head, uv_sphere};
use eeg_core::projection::{candidate_directions, project_direction};
use eeg_core::{
    project_electrodes, resolve_channels, HeadModel, Placement, ProjectionConfig, TriMesh,
};
use glam::{Affine3A, Vec3};

fn floor_plane(y: f32) -> TriMesh {
    // One large triangle with the origin well inside it.
    TriMesh::new(
        vec![
            Vec3::new(-10.0, y, -10.0),
            Vec3::new(10.0, y, -10.0),
            Vec3::new(0.0, y, 20.0),
        ],
        vec![[0, 1, 2]],
    )
}

#[test]
fn candidates_start_with_lifted_base_and_are_unit() {
    let cfg = ProjectionConfig::default();
    let low = Vec3::new(1.0, 0.05, 0.0).normalize();
    let c = candidate_directions(low, &cfg);
    assert_eq!(c.len(), 4);
    assert!((c[0] - eeg_core::bias_upward(low, cfg.min_direction_y)).length() < 1e-6);
    for d in &c {
        assert!((d.length() - 1.0).abs() < 1e-5);
    }
    // Later candidates lean up or back relative to the base.
    assert!(c[1].y > c[0].y);
    assert!(c[3].z < c[0].z);
}

#[test]
fn no_model_leaves_every_marker_unprojected() {
    let cfg = ProjectionConfig::default();
    let electrodes = resolve_channels::<&str>(&[], 64);
    let markers = project_electrodes(None, &electrodes, &cfg);
    assert_eq!(markers.len(), 64);
    for (m, e) in markers.iter().zip(&electrodes) {
        assert_eq!(m.placement, Placement::Unprojected);
        assert!((m.position - e.direction * cfg.unprojected_radius).length() < 1e-6);
    }
}

#[test]
fn empty_mesh_degrades_to_unprojected() {
    let cfg = ProjectionConfig::default();
    let model = HeadModel::identity(TriMesh::default());
    let electrodes = resolve_channels(&["cz", "oz"], 2);
    let markers = project_electrodes(Some(&model), &electrodes, &cfg);
    assert!(markers.iter().all(|m| m.placement == Placement::Unprojected));
}

#[test]
fn best_scoring_hit_is_used_when_nothing_passes() {
    // Every inward ray passes through the origin, so all of them hit a floor
    // at y = 0, which is below the scalp threshold.
    let cfg = ProjectionConfig::default();
    let model = HeadModel::identity(floor_plane(0.0));
    let electrodes = resolve_channels(&["c3"], 1);
    let markers = project_electrodes(Some(&model), &electrodes, &cfg);
    assert_eq!(markers[0].placement, Placement::BestEffort);
    let expected = Vec3::new(0.0, cfg.normal_offset, 0.0);
    assert!((markers[0].position - expected).length() < 1e-4);
    assert!((markers[0].position - electrodes[0].direction * cfg.unprojected_radius).length() > 0.5);
}

#[test]
fn relaxed_thresholds_accept_the_same_hit() {
    let cfg = ProjectionConfig {
        min_scalp_y: -1.0,
        ..ProjectionConfig::default()
    };
    let model = HeadModel::identity(floor_plane(0.0));
    let (_, placement) = project_direction(&model, Vec3::Y, &cfg).unwrap();
    assert_eq!(placement, Placement::Surface);
}

#[test]
fn top_and_back_channels_land_on_fallback_scalp() {
    let cfg = ProjectionConfig::default();
    let model = HeadModel::identity(fallback_head());
    let electrodes = resolve_channels(&["cz", "oz", "pz"], 3);
    let markers = project_electrodes(Some(&model), &electrodes, &cfg);
    for m in &markers {
        assert_eq!(m.placement, Placement::Surface, "{}", m.name);
        let expected = 1.05 + cfg.normal_offset;
        assert!((m.position.length() - expected).abs() < 0.01, "{}", m.name);
        assert!(m.position.y >= cfg.min_scalp_y);
    }
}

#[test]
fn accepted_markers_respect_the_scalp_filter() {
    let cfg = ProjectionConfig::default();
    let model = HeadModel::identity(fallback_head());
    let markers = project_electrodes(Some(&model), &resolve_channels::<&str>(&[], 64), &cfg);
    for m in markers.iter().filter(|m| m.placement == Placement::Surface) {
        // The marker is lifted along the normal, so allow the offset.
        assert!(m.position.y >= cfg.min_scalp_y - cfg.normal_offset, "{}", m.name);
        assert!(m.position.z <= cfg.max_front_z + cfg.normal_offset, "{}", m.name);
    }
    assert!(markers.iter().all(|m| m.placement != Placement::Unprojected));
}

#[test]
fn positions_are_reported_in_model_local_space() {
    let cfg = ProjectionConfig::default();
    let world_from_local = Affine3A::from_scale_rotation_translation(
        Vec3::splat(2.0),
        glam::Quat::IDENTITY,
        Vec3::new(0.0, -0.5, 0.0),
    );
    let model = HeadModel::new(uv_sphere(1.0, 48, 48), world_from_local);
    let markers = project_electrodes(Some(&model), &resolve_channels(&["cz"], 1), &cfg);
    assert_eq!(markers[0].placement, Placement::Surface);
    // Local radius 1 plus the world offset shrunk by the scale.
    let expected = 1.0 + cfg.normal_offset / 2.0;
    assert!((markers[0].position.length() - expected).abs() < 0.01);
}

#[test]
fn projection_is_deterministic() {
    let cfg = ProjectionConfig::default();
    let model = HeadModel::fitted(fallback_head(), 2.2);
    let e = resolve_channels::<&str>(&[], 64);
    assert_eq!(
        project_electrodes(Some(&model), &e, &cfg),
        project_electrodes(Some(&model), &e, &cfg)
    );
}

/// Horizontal rectangle at height `y` spanning `x0..x1` and a thin band in z.
fn ledge(y: f32, x0: f32, x1: f32) -> TriMesh {
    TriMesh::new(
        vec![
            Vec3::new(x0, y, -0.1),
            Vec3::new(x1, y, -0.1),
            Vec3::new(x1, y, 0.1),
            Vec3::new(x0, y, 0.1),
        ],
        vec![[0, 1, 2], [0, 2, 3]],
    )
}

/// A low ledge only the base ray of `ledge_direction()` hits, plus a higher
/// ledge only the first upward candidate hits.
fn two_ledges() -> HeadModel {
    let mut mesh = ledge(0.3, 0.4, 0.6);
    mesh.append(&ledge(0.8, 0.6, 1.0));
    HeadModel::identity(mesh)
}

fn ledge_direction() -> Vec3 {
    Vec3::new(1.0, 0.6, 0.0).normalize()
}

#[test]
fn first_passing_candidate_wins_over_a_higher_score() {
    let cfg = ProjectionConfig::default();
    let model = two_ledges();
    let (hit, placement) = project_direction(&model, ledge_direction(), &cfg).unwrap();
    assert_eq!(placement, Placement::Surface);
    // Base ray hits the low ledge at x = 0.5; the upward candidate would have
    // scored higher on the upper ledge.
    assert!((hit.point - Vec3::new(0.5, 0.3, 0.0)).length() < 1e-4, "{:?}", hit.point);
    assert!(cfg.score(Vec3::new(0.79, 0.8, 0.0)) > cfg.score(hit.point));
}

#[test]
fn rejected_candidates_still_compete_for_best_effort() {
    let cfg = ProjectionConfig {
        min_scalp_y: 0.9,
        ..ProjectionConfig::default()
    };
    let model = two_ledges();
    let (hit, placement) = project_direction(&model, ledge_direction(), &cfg).unwrap();
    assert_eq!(placement, Placement::BestEffort);
    // Both hits fail the raised floor; the upper one scores higher.
    assert!((hit.point.y - 0.8).abs() < 1e-4, "{:?}", hit.point);
    assert!(hit.point.x > 0.6 && hit.point.x < 1.0);
}
