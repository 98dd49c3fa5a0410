use glam::Vec3;

// Shared visual and projection tuning constants used by both web and native frontends.

// Montage -> direction mapping
pub const DIRECTION_UP: f32 = 1.0; // vertical component before normalizing a top-map point
pub const SYNTHETIC_RING_RADIUS: f32 = 0.85; // top-map radius of generated CH{n} channels
pub const DEFAULT_CHANNEL_COUNT: usize = 64;

// Surface projection
pub const RAY_ORIGIN_RADIUS: f32 = 6.0; // rays start this far out along the candidate direction
pub const NORMAL_OFFSET: f32 = 0.035; // markers float this far above the surface
pub const MIN_DIRECTION_Y: f32 = 0.45; // base directions are lifted to at least this height
pub const MIN_SCALP_Y: f32 = 0.25; // local hits below this are face/neck
pub const MAX_FRONT_Z: f32 = 0.18; // local hits in front of this are face
pub const SCORE_UP_WEIGHT: f32 = 2.0;
pub const SCORE_FRONT_WEIGHT: f32 = 3.0;
pub const UNPROJECTED_RADIUS: f32 = 1.08; // raw direction length when nothing was hit

// Candidate biases, tried in order after the base direction
pub const CANDIDATE_BIASES: [[f32; 3]; 3] = [
    [0.0, 0.35, 0.0],   // straight up
    [0.0, 0.55, -0.25], // up and back
    [0.0, 0.35, -0.45], // back, around the ears
];

// Head model
pub const HEAD_FIT_SIZE: f32 = 2.2; // largest bbox side after fitting a loaded mesh
pub const FALLBACK_HEAD_RADIUS: f32 = 1.05;
pub const FALLBACK_HEAD_SEGMENTS: u32 = 48;
pub const NOSE_RADIUS: f32 = 0.12;
pub const NOSE_HEIGHT: f32 = 0.28;
pub const NOSE_POSITION: [f32; 3] = [0.0, 0.05, 1.08];
pub const BRAIN_RADIUS: f32 = 1.05;
pub const BRAIN_SUBDIVISIONS: u32 = 4;
pub const CLASSIC_RADIUS: f32 = 1.12; // 10-20 positions are pushed out to this radius

// Marker sizing and palette
pub const MARKER_RADIUS: f32 = 0.042;
pub const MARKER_RADIUS_ACTIVE: f32 = 0.05;
pub const MARKER_COLOR: [f32; 4] = [0.925, 0.282, 0.600, 1.0]; // #ec4899
pub const MARKER_COLOR_ACTIVE: [f32; 4] = [0.204, 0.827, 0.600, 1.0]; // #34d399
pub const HEAD_COLOR: [f32; 4] = [0.82, 0.84, 0.90, 0.55];
pub const BRAIN_COLOR: [f32; 4] = [0.93, 0.62, 0.70, 0.85];

// Camera
pub const CAMERA_EYE: [f32; 3] = [0.0, 0.35, 3.2];
pub const CAMERA_FOVY_DEG: f32 = 50.0;
pub const ORBIT_MIN_DISTANCE: f32 = 2.1;
pub const ORBIT_MAX_DISTANCE: f32 = 4.8;
pub const ORBIT_AUTO_SPEED: f32 = 0.25; // radians per second while idle

#[inline]
pub fn nose_position_vec3() -> Vec3 {
    Vec3::from_array(NOSE_POSITION)
}

#[inline]
pub fn camera_eye_vec3() -> Vec3 {
    Vec3::from_array(CAMERA_EYE)
}
