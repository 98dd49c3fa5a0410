use glam::{Vec2, Vec3};
use web_sys as web;

/// Pointer drag tracking for the orbit camera. A press that travels less
/// than the click slop is reported as a click on release.
#[derive(Default, Clone, Copy)]
pub struct DragState {
    pub active: bool,
    pub last: Vec2,
    pub travel: f32,
}

impl DragState {
    pub fn begin(&mut self, pos: Vec2) {
        self.active = true;
        self.last = pos;
        self.travel = 0.0;
    }

    /// Delta since the previous position; zero when not dragging.
    pub fn update(&mut self, pos: Vec2) -> Vec2 {
        if !self.active {
            return Vec2::ZERO;
        }
        let delta = pos - self.last;
        self.last = pos;
        self.travel += delta.length();
        delta
    }

    /// Ends the drag and returns true if it was a click.
    pub fn end(&mut self, click_slop: f32) -> bool {
        let was_click = self.active && self.travel <= click_slop;
        self.active = false;
        was_click
    }
}

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Index of the nearest sphere hit by the ray, if any.
pub fn pick_nearest(ray_origin: Vec3, ray_dir: Vec3, centers: &[Vec3], radius: f32) -> Option<usize> {
    let mut best = None::<(usize, f32)>;
    for (i, c) in centers.iter().enumerate() {
        if let Some(t) = ray_sphere(ray_origin, ray_dir, *c, radius) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((i, t)),
            }
        }
    }
    best.map(|(i, _)| i)
}

/// Multiplicative zoom for one wheel event; positive delta moves away.
#[inline]
pub fn wheel_zoom_factor(delta_y: f32, per_px: f32, min: f32, max: f32) -> f32 {
    (1.0 + delta_y * per_px).clamp(min, max)
}

#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let sx = (x_css / rect.width() as f32) * canvas.width() as f32;
    let sy = (y_css / rect.height() as f32) * canvas.height() as f32;
    Vec2::new(sx, sy)
}

/// Parse a comma/whitespace separated channel list typed by the user.
pub fn parse_channel_list(text: &str) -> Vec<String> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
