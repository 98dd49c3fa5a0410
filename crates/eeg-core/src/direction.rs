use crate::constants::DIRECTION_UP;
use glam::Vec3;

/// Map a top-down montage point (`x` left-right, `y` back-front) to a unit
/// direction from the head center. Degenerate input yields straight up.
pub fn map_to_direction(x: f32, y: f32) -> Vec3 {
    Vec3::new(x, DIRECTION_UP, y)
        .try_normalize()
        .unwrap_or(Vec3::Y)
}

/// Raise a direction's vertical component to at least `min_y`, then renormalize.
pub fn bias_upward(dir: Vec3, min_y: f32) -> Vec3 {
    let mut d = dir;
    if d.y < min_y {
        d.y = min_y;
    }
    d.try_normalize().unwrap_or(Vec3::Y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_length_and_upper_hemisphere() {
        for (x, y) in [(0.0, 0.0), (-1.08, 0.12), (0.38, -0.9), (5.0, -5.0)] {
            let d = map_to_direction(x, y);
            assert!((d.length() - 1.0).abs() < 1e-5);
            assert!(d.y >= 0.0);
        }
    }

    #[test]
    fn non_finite_input_falls_back_to_up() {
        assert_eq!(map_to_direction(f32::NAN, 0.0), Vec3::Y);
        assert_eq!(bias_upward(Vec3::ZERO, 0.0), Vec3::Y);
    }

    #[test]
    fn bias_lifts_low_directions_only() {
        let low = bias_upward(Vec3::new(1.0, 0.1, 0.0).normalize(), 0.45);
        assert!(low.y > 0.1);
        let high = Vec3::new(0.0, 0.9, 0.43).normalize();
        assert!((bias_upward(high, 0.45) - high).length() < 1e-6);
    }
}
