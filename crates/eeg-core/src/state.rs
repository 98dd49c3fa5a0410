//! View-side state types shared with the web and native frontends.
//!
//! These types avoid platform APIs. The web frontend builds its camera
//! matrices and picking rays from them.

use crate::constants::{
    camera_eye_vec3, CAMERA_FOVY_DEG, ORBIT_AUTO_SPEED, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE,
};
use crate::mesh::Ray;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a pixel of a `size` viewport (y down).
    pub fn screen_ray(&self, pixel: Vec2, size: Vec2) -> Ray {
        let ndc_x = (2.0 * pixel.x / size.x.max(1.0)) - 1.0;
        let ndc_y = 1.0 - (2.0 * pixel.y / size.y.max(1.0));
        let inv = self.view_proj().inverse();
        let far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let far: Vec3 = far.truncate() / far.w;
        Ray::new(self.eye, far - self.eye)
    }
}

/// Orbit controller around a fixed target: yaw/pitch on drag, dolly on wheel,
/// slow auto-rotate when idle.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub auto_rotate: bool,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_from(camera_eye_vec3(), Vec3::ZERO)
    }
}

impl OrbitCamera {
    const PITCH_LIMIT: f32 = 1.4;

    pub fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / offset.length().max(1e-6)).clamp(-1.0, 1.0).asin();
        Self {
            target,
            yaw,
            pitch,
            distance,
            auto_rotate: true,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(sy * cp, sp, cy * cp) * self.distance
    }

    /// Rotate by a pointer delta in radians.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx;
        self.pitch = (self.pitch + dy).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
        self.auto_rotate = false;
    }

    pub fn zoom(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.distance = (self.distance * factor).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
        }
    }

    pub fn tick(&mut self, dt_sec: f32) {
        if self.auto_rotate {
            self.yaw += ORBIT_AUTO_SPEED * dt_sec.max(0.0);
        }
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: self.target,
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: 0.05,
            zfar: 50.0,
        }
    }
}
