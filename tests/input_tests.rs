// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/input.rs"]
mod input;

use glam::{Vec2, Vec3};
use input::*;

#[test]
fn ray_sphere_hits_in_front_only() {
    let center = Vec3::new(0.0, 0.0, 5.0);
    let t = ray_sphere(Vec3::ZERO, Vec3::Z, center, 2.0).unwrap();
    assert!((t - 3.0).abs() < 1e-5);
    assert!(ray_sphere(Vec3::ZERO, Vec3::X, center, 2.0).is_none());
    assert!(ray_sphere(Vec3::ZERO, -Vec3::Z, center, 2.0).is_none());
}

#[test]
fn pick_prefers_nearest_hit() {
    let centers = [
        Vec3::new(0.0, 0.0, 8.0),
        Vec3::new(0.0, 0.0, 4.0),
        Vec3::new(3.0, 0.0, 2.0),
    ];
    assert_eq!(pick_nearest(Vec3::ZERO, Vec3::Z, &centers, 0.5), Some(1));
    assert_eq!(pick_nearest(Vec3::ZERO, Vec3::Y, &centers, 0.5), None);
    assert_eq!(pick_nearest(Vec3::ZERO, Vec3::Z, &[], 0.5), None);
}

#[test]
fn short_press_is_a_click() {
    let mut drag = DragState::default();
    drag.begin(Vec2::new(10.0, 10.0));
    assert_eq!(drag.update(Vec2::new(12.0, 11.0)), Vec2::new(2.0, 1.0));
    assert!(drag.end(5.0));
    assert!(!drag.active);
}

#[test]
fn long_drag_is_not_a_click() {
    let mut drag = DragState::default();
    drag.begin(Vec2::ZERO);
    drag.update(Vec2::new(30.0, 0.0));
    drag.update(Vec2::new(0.0, 0.0));
    assert!((drag.travel - 60.0).abs() < 1e-4);
    assert!(!drag.end(5.0));
}

#[test]
fn idle_update_and_release_do_nothing() {
    let mut drag = DragState::default();
    assert_eq!(drag.update(Vec2::new(5.0, 5.0)), Vec2::ZERO);
    assert!(!drag.end(5.0));
}

#[test]
fn wheel_zoom_is_clamped() {
    assert_eq!(wheel_zoom_factor(0.0, 0.0015, 0.8, 1.25), 1.0);
    assert!(wheel_zoom_factor(100.0, 0.0015, 0.8, 1.25) > 1.0);
    assert_eq!(wheel_zoom_factor(-10_000.0, 0.0015, 0.8, 1.25), 0.8);
    assert_eq!(wheel_zoom_factor(10_000.0, 0.0015, 0.8, 1.25), 1.25);
}

#[test]
fn channel_list_accepts_commas_and_spaces() {
    assert_eq!(parse_channel_list(" fp1, cz ,,O1  oz"), vec!["fp1", "cz", "O1", "oz"]);
    assert!(parse_channel_list("  , ").is_empty());
}
