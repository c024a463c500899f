//! Per-point signed distance evaluation.
//!
//! Distances are measured in samples and quantized so that a distance of
//! `radius` maps to [`SAMPLE_MAX`]. Positive values are inside the shape.

/// Largest magnitude a quantized sample can take.
pub const SAMPLE_MAX: i8 = 127;

/// Shape rasterized into a [`DistanceField`](crate::DistanceField).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Shape {
    #[default]
    Circle,
    /// Axis-aligned square with half-width `radius` and sharp corners.
    Square,
}

impl Shape {
    /// Quantized sample for the offset `(fx, fy)` from the shape center.
    #[inline]
    pub fn sample(self, fx: f32, fy: f32, radius: f32) -> i8 {
        match self {
            Shape::Circle => circle_sample(fx, fy, radius),
            Shape::Square => square_sample(fx, fy, radius),
        }
    }
}

/// Signed distance to a circle of `radius` centered at the origin.
#[inline]
pub fn circle_sample(fx: f32, fy: f32, radius: f32) -> i8 {
    quantize(radius - (fx * fx + fy * fy).sqrt(), radius)
}

/// Signed distance to a square of half-width `radius` centered at the origin.
///
/// Inside the square this is the distance to the nearest edge. Outside, the
/// result depends on the region: beside an edge it is the distance to that
/// edge's line, past a corner it is the Euclidean distance to the corner.
pub fn square_sample(fx: f32, fy: f32, radius: f32) -> i8 {
    let inside_x = fx.abs() <= radius;
    let inside_y = fy.abs() <= radius;

    let distance = match (inside_x, inside_y) {
        (true, true) => (radius - fx)
            .min(radius + fx)
            .min(radius - fy)
            .min(radius + fy),
        (true, false) => radius - fy.abs(),
        (false, true) => radius - fx.abs(),
        (false, false) => {
            let dx = fx.abs() - radius;
            let dy = fy.abs() - radius;
            -(dx * dx + dy * dy).sqrt()
        }
    };

    quantize(distance, radius)
}

/// Scales `distance` so `radius` maps to `SAMPLE_MAX`, then rounds and clamps.
///
/// Clamping (rather than wrapping) keeps far-away samples saturated at
/// `-SAMPLE_MAX` instead of flipping sign.
#[inline]
fn quantize(distance: f32, radius: f32) -> i8 {
    let max = SAMPLE_MAX as f32;
    (distance * max / radius).round().clamp(-max, max) as i8
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── circle ────────────────────────────────────────────────────────────

    #[test]
    fn circle_center_is_max() {
        assert_eq!(circle_sample(0.0, 0.0, 5.0), SAMPLE_MAX);
    }

    #[test]
    fn circle_boundary_is_zero() {
        assert_eq!(circle_sample(3.0, 4.0, 5.0), 0);
    }

    #[test]
    fn circle_far_outside_saturates() {
        assert_eq!(circle_sample(100.0, 100.0, 2.0), -SAMPLE_MAX);
    }

    #[test]
    fn circle_halfway_is_half_range() {
        // 2.5 of 5.0 → 63.5 → rounds away from zero.
        assert_eq!(circle_sample(2.5, 0.0, 5.0), 64);
    }

    // ── square ────────────────────────────────────────────────────────────

    #[test]
    fn square_center_is_max() {
        assert_eq!(square_sample(0.0, 0.0, 4.0), SAMPLE_MAX);
    }

    #[test]
    fn square_edge_is_zero() {
        assert_eq!(square_sample(4.0, 1.0, 4.0), 0);
        assert_eq!(square_sample(-1.0, -4.0, 4.0), 0);
    }

    #[test]
    fn square_beside_edge_uses_edge_distance() {
        // 2 samples right of the right edge, within the vertical band.
        assert_eq!(square_sample(6.0, 0.0, 4.0), circle_sample(6.0, 0.0, 4.0));
        assert_eq!(square_sample(6.0, 0.0, 4.0), -64);
    }

    #[test]
    fn square_corner_region_uses_corner_distance() {
        // (7, 8) is (3, 4) away from the corner (4, 4): distance 5.
        let s = square_sample(7.0, 8.0, 4.0);
        assert_eq!(s, -SAMPLE_MAX); // 5 / 4 of the range saturates
        let s = square_sample(5.0, 5.0, 10.0);
        assert!(s > 0);
        let s = square_sample(11.0, 11.0, 10.0);
        // sqrt(2) / 10 * 127 ≈ 17.96
        assert_eq!(s, -18);
    }

    #[test]
    fn square_is_inside_where_circle_is_not() {
        // Near the corner the square still covers points the circle misses.
        assert!(square_sample(3.5, 3.5, 4.0) > 0);
        assert!(circle_sample(3.5, 3.5, 4.0) < 0);
    }

    // ── shape dispatch ───────────────────────────────────────────────────

    #[test]
    fn shape_sample_dispatches() {
        assert_eq!(Shape::Circle.sample(1.0, 2.0, 3.0), circle_sample(1.0, 2.0, 3.0));
        assert_eq!(Shape::Square.sample(1.0, 2.0, 3.0), square_sample(1.0, 2.0, 3.0));
    }
}
