// Host-side tests for the 3D view's scene state.

#![allow(dead_code)]
#[path = "../src/constants.rs"]
mod constants;
#[path = "../src/input.rs"]
mod input;
#[path = "../src/scene.rs"]
mod scene;

use eeg_core::{primitives, HeadModel, Placement, Ray, DEFAULT_CHANNEL_COUNT, HEAD_FIT_SIZE};
use glam::Vec3;
use scene::{SceneState, ViewMode};

fn fresh() -> SceneState {
    SceneState::new(HeadModel::identity(primitives::fallback_head()))
}

#[test]
fn head_view_holds_full_montage() {
    let s = fresh();
    assert_eq!(s.mode, ViewMode::Head);
    assert_eq!(s.active().markers.len(), DEFAULT_CHANNEL_COUNT);
    assert!(s.mesh_dirty && s.markers_dirty);
    assert_eq!(s.instances().len(), DEFAULT_CHANNEL_COUNT);
}

#[test]
fn channel_change_reorders_and_clears_selection() {
    let mut s = fresh();
    s.select(Some(3));
    s.mesh_dirty = false;
    s.set_channels(vec!["cz".into(), "nope".into(), "O1".into()]);
    let names: Vec<_> = s.active().markers.iter().take(3).map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["CZ", "O1", "FP1"]);
    assert_eq!(s.active().markers.len(), DEFAULT_CHANNEL_COUNT);
    assert_eq!(s.selected, None);
    assert!(s.mesh_dirty);
}

#[test]
fn toggling_switches_to_classic_brain_markers() {
    let mut s = fresh();
    assert_eq!(s.toggle_mode(), ViewMode::Brain);
    assert_eq!(s.active().markers.len(), 20);
    assert_eq!(s.toggle_mode(), ViewMode::Head);
}

#[test]
fn select_by_name_is_case_insensitive() {
    let mut s = fresh();
    let i = s.select_by_name(" pz ").unwrap();
    assert_eq!(s.selected, Some(i));
    assert_eq!(s.active().markers[i].name, "PZ");
    assert_eq!(s.select_by_name("missing"), None);
    assert_eq!(s.selected, None);
}

#[test]
fn ray_through_marker_picks_it() {
    let s = fresh();
    let target = s
        .active()
        .markers
        .iter()
        .position(|m| m.name == "CZ")
        .unwrap();
    let center = s.active().markers[target].position;
    let origin = center + Vec3::Y * 5.0;
    let picked = s.pick(&Ray::new(origin, center - origin));
    assert_eq!(picked, Some(target));
    assert_eq!(s.pick(&Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z)), None);
}

#[test]
fn hover_only_dirties_on_change() {
    let mut s = fresh();
    s.markers_dirty = false;
    s.set_hovered(None);
    assert!(!s.markers_dirty);
    s.set_hovered(Some(2));
    assert!(s.markers_dirty);
}

#[test]
fn placeholder_head_keeps_raw_directions_until_an_asset_loads() {
    let mut s = fresh();
    assert!(s
        .active()
        .markers
        .iter()
        .all(|m| m.placement == Placement::Unprojected));

    s.mesh_dirty = false;
    s.set_head_model(HeadModel::fitted(primitives::uv_sphere(1.0, 32, 32), HEAD_FIT_SIZE));
    assert!(s.mesh_dirty);
    let cz = s.active().markers.iter().find(|m| m.name == "CZ").unwrap();
    assert_eq!(cz.placement, Placement::Surface);
}
