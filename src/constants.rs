/// DOM wiring and interaction tuning for the browser dashboard.
///
/// Element ids match `index.html`; tuning values keep magic numbers out of
/// the event and frame code.

// Config
pub const META_API_BASE: &str = "eeg-api-base"; // <meta name=... content="http://host:port">

// Scene
pub const CANVAS_ID: &str = "head-canvas";
pub const VIEW_TOGGLE_ID: &str = "view-toggle";
pub const CHANNELS_INPUT_ID: &str = "channels-input";
pub const CHANNELS_APPLY_ID: &str = "channels-apply";
pub const SCENE_INFO_ID: &str = "scene-info";

// Panels
pub const STATUS_ID: &str = "status";
pub const MODELS_SELECT_ID: &str = "model-select";
pub const METRICS_ID: &str = "metrics-panel";
pub const CONFUSION_ID: &str = "confusion-panel";
pub const EDA_ID: &str = "eda-panel";
pub const PCA_CANVAS_ID: &str = "pca-canvas";
pub const FILE_INPUT_ID: &str = "csv-file";
pub const PREDICT_BTN_ID: &str = "predict-btn";
pub const ANALYZE_BTN_ID: &str = "analyze-btn";
pub const RESULT_ID: &str = "result-panel";
pub const RESULT_ERROR_ID: &str = "result-error";
pub const SPECTRO_CANVAS_ID: &str = "spectrogram-canvas";
pub const PSD_CANVAS_ID: &str = "psd-canvas";
pub const SIGNAL_CANVAS_ID: &str = "signal-canvas";
pub const BANDPOWER_CANVAS_ID: &str = "bandpower-canvas";
pub const SCALP_ID: &str = "scalp-map";
pub const SCALP_BAND_ID: &str = "scalp-band";
pub const ELECTRODE_ID: &str = "electrode-panel";
pub const BANDS_ID: &str = "bands-panel";

// Help overlay
pub const OVERLAY_ID: &str = "help-overlay";
pub const OVERLAY_TOGGLE_ID: &str = "help-toggle";
pub const OVERLAY_CLOSE_ID: &str = "help-close";

// Pointer interaction
pub const DRAG_RADIANS_PER_PX: f32 = 0.006;
pub const WHEEL_ZOOM_PER_PX: f32 = 0.0015;
pub const WHEEL_ZOOM_MIN_FACTOR: f32 = 0.8; // clamp for a single wheel event
pub const WHEEL_ZOOM_MAX_FACTOR: f32 = 1.25;
pub const CLICK_SLOP_PX: f32 = 5.0; // total pointer travel still counted as a click
pub const PICK_RADIUS_SCALE: f32 = 1.8; // pick spheres are larger than drawn markers

// Frame
pub const MAX_FRAME_DT_SEC: f32 = 0.1;
pub const CLEAR_COLOR: [f64; 4] = [0.035, 0.04, 0.07, 1.0];
pub const LIGHT_DIR: [f32; 4] = [0.35, 0.8, 0.55, 0.0];

// Charts
pub const CHART_PAD_PX: f64 = 34.0;
pub const SPECTRO_TICKS: usize = 6;
pub const DEMO_SEED: u64 = 7;
pub const DEMO_CHANNELS: usize = 4;
