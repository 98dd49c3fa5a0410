// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/constants.rs"]
mod constants;

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn interaction_constants_are_sane() {
    assert!(DRAG_RADIANS_PER_PX > 0.0 && DRAG_RADIANS_PER_PX < 0.1);
    assert!(WHEEL_ZOOM_MIN_FACTOR < 1.0 && WHEEL_ZOOM_MAX_FACTOR > 1.0);
    assert!(CLICK_SLOP_PX > 0.0);
    // Picking spheres must not be smaller than what is drawn.
    assert!(PICK_RADIUS_SCALE >= 1.0);
    assert!(MAX_FRAME_DT_SEC > 0.0 && MAX_FRAME_DT_SEC <= 0.25);
}

#[test]
fn element_ids_are_unique() {
    let ids = [
        CANVAS_ID,
        VIEW_TOGGLE_ID,
        CHANNELS_INPUT_ID,
        CHANNELS_APPLY_ID,
        SCENE_INFO_ID,
        STATUS_ID,
        MODELS_SELECT_ID,
        METRICS_ID,
        CONFUSION_ID,
        EDA_ID,
        PCA_CANVAS_ID,
        FILE_INPUT_ID,
        PREDICT_BTN_ID,
        ANALYZE_BTN_ID,
        RESULT_ID,
        RESULT_ERROR_ID,
        SPECTRO_CANVAS_ID,
        PSD_CANVAS_ID,
        SIGNAL_CANVAS_ID,
        BANDPOWER_CANVAS_ID,
        SCALP_ID,
        SCALP_BAND_ID,
        ELECTRODE_ID,
        BANDS_ID,
        OVERLAY_ID,
        OVERLAY_TOGGLE_ID,
        OVERLAY_CLOSE_ID,
    ];
    let mut sorted = ids.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), ids.len());
}

#[test]
fn clear_color_is_opaque_and_dark() {
    let [r, g, b, a] = CLEAR_COLOR;
    assert_eq!(a, 1.0);
    assert!(r < 0.2 && g < 0.2 && b < 0.2);
    let l = LIGHT_DIR;
    assert!(l[0] * l[0] + l[1] * l[1] + l[2] * l[2] > 0.0);
    assert_eq!(l[3], 0.0);
}
