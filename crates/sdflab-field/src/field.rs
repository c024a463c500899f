use crate::error::FieldError;
use crate::shape::Shape;

/// Square grid of signed 8-bit distance samples, stored row-major.
///
/// Row `y = 0` is the first row uploaded to the texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceField {
    size: u32,
    samples: Vec<i8>,
}

impl DistanceField {
    /// Rasterizes `shape` into a fresh `size × size` field.
    ///
    /// `radius` is in samples. Each sample is evaluated at its pixel center,
    /// measured from the center of the grid.
    pub fn generate(shape: Shape, size: u32, radius: f32) -> Result<Self, FieldError> {
        let mut field = Self { size: 0, samples: Vec::new() };
        field.regenerate(shape, size, radius)?;
        Ok(field)
    }

    /// Rasterizes into `self`, reusing the sample storage.
    ///
    /// On error the field is left untouched.
    pub fn regenerate(&mut self, shape: Shape, size: u32, radius: f32) -> Result<(), FieldError> {
        validate(size, radius)?;

        let n = size as usize;
        self.samples.clear();
        self.samples.reserve(n * n);

        let half = size as f32 * 0.5;
        for y in 0..size {
            let fy = y as f32 + 0.5 - half;
            for x in 0..size {
                let fx = x as f32 + 0.5 - half;
                self.samples.push(shape.sample(fx, fy, radius));
            }
        }
        self.size = size;
        Ok(())
    }

    /// Side length in samples.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Row-major samples, `size * size` long.
    #[inline]
    pub fn samples(&self) -> &[i8] {
        &self.samples
    }

    /// Samples reinterpreted as bytes, ready for an `R8Snorm` texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.samples)
    }

    /// Sample at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<i8> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.samples.get((y * self.size + x) as usize).copied()
    }
}

fn validate(size: u32, radius: f32) -> Result<(), FieldError> {
    if size == 0 {
        return Err(FieldError::ZeroSize);
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(FieldError::InvalidRadius(radius));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::SAMPLE_MAX;

    fn circle(size: u32, radius: f32) -> DistanceField {
        DistanceField::generate(Shape::Circle, size, radius).unwrap()
    }

    fn square(size: u32, radius: f32) -> DistanceField {
        DistanceField::generate(Shape::Square, size, radius).unwrap()
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn sample_count_matches_size() {
        for n in [1, 4, 7, 32, 64] {
            let f = circle(n, 2.0);
            assert_eq!(f.size(), n);
            assert_eq!(f.samples().len(), (n * n) as usize);
            assert_eq!(f.as_bytes().len(), (n * n) as usize);
        }
    }

    #[test]
    fn get_out_of_bounds_is_none() {
        let f = circle(4, 1.0);
        assert_eq!(f.get(4, 0), None);
        assert_eq!(f.get(0, 4), None);
        assert!(f.get(3, 3).is_some());
    }

    #[test]
    fn bytes_reinterpret_samples() {
        let f = circle(8, 2.0);
        assert_eq!(f.as_bytes()[0], f.samples()[0] as u8);
        assert_eq!(f.get(0, 0), Some(-SAMPLE_MAX));
        assert_eq!(f.as_bytes()[0], 0x81);
    }

    // ── circle ────────────────────────────────────────────────────────────

    #[test]
    fn circle_is_symmetric() {
        for (n, r) in [(4, 1.3), (16, 5.0), (32, 8.0), (64, 20.5), (9, 3.0)] {
            let f = circle(n, r);
            for y in 0..n {
                for x in 0..n {
                    let v = f.get(x, y);
                    assert_eq!(v, f.get(n - 1 - x, y), "x mirror at ({x}, {y}), n={n}");
                    assert_eq!(v, f.get(x, n - 1 - y), "y mirror at ({x}, {y}), n={n}");
                    assert_eq!(v, f.get(n - 1 - x, n - 1 - y), "xy mirror at ({x}, {y}), n={n}");
                }
            }
        }
    }

    #[test]
    fn circle_center_is_grid_max() {
        for (n, r) in [(16, 4.0), (32, 8.0), (64, 12.0)] {
            let f = circle(n, r);
            let max = *f.samples().iter().max().unwrap();
            assert_eq!(f.get(n / 2, n / 2), Some(max));
        }
    }

    #[test]
    fn circle_zero_crossing_near_radius() {
        let (n, r) = (64u32, 20.0f32);
        let f = circle(n, r);
        let half = n as f32 * 0.5;
        for y in 0..n {
            for x in 0..n {
                let fx = x as f32 + 0.5 - half;
                let fy = y as f32 + 0.5 - half;
                let d = (fx * fx + fy * fy).sqrt();
                let s = f.get(x, y).unwrap();
                if d < r - 1.0 {
                    assert!(s > 0, "({x}, {y}) at distance {d} should be inside, got {s}");
                } else if d > r + 1.0 {
                    assert!(s < 0, "({x}, {y}) at distance {d} should be outside, got {s}");
                }
            }
        }
    }

    #[test]
    fn circle_32_by_8() {
        let f = circle(32, 8.0);
        // Center pixel sits half a pixel off the true center on both axes.
        let center = f.get(16, 16).unwrap();
        assert!(center > 110, "center was {center}");
        assert_eq!(f.get(0, 0), Some(-SAMPLE_MAX));
        assert_eq!(f.get(31, 31), Some(-SAMPLE_MAX));
    }

    #[test]
    fn single_sample_field_is_center() {
        let f = circle(1, 3.0);
        assert_eq!(f.samples(), &[SAMPLE_MAX]);
    }

    // ── square ────────────────────────────────────────────────────────────

    #[test]
    fn square_corner_regions_are_negative() {
        let (n, r) = (32u32, 6.0f32);
        let f = square(n, r);
        let half = n as f32 * 0.5;
        for y in 0..n {
            for x in 0..n {
                let fx = x as f32 + 0.5 - half;
                let fy = y as f32 + 0.5 - half;
                if fx.abs() > r && fy.abs() > r {
                    assert!(f.get(x, y).unwrap() < 0, "({x}, {y}) should be outside");
                }
            }
        }
    }

    #[test]
    fn square_covers_its_corners() {
        let f = square(32, 8.0);
        // Offset (-7.5, -7.5) lies inside the square but outside the circle.
        assert!(f.get(8, 8).unwrap() > 0);
        assert!(circle(32, 8.0).get(8, 8).unwrap() < 0);
    }

    #[test]
    fn square_is_symmetric() {
        let n = 16;
        let f = square(n, 4.5);
        for y in 0..n {
            for x in 0..n {
                assert_eq!(f.get(x, y), f.get(n - 1 - x, n - 1 - y));
                assert_eq!(f.get(x, y), f.get(y, x));
            }
        }
    }

    // ── regeneration ─────────────────────────────────────────────────────

    #[test]
    fn generation_is_idempotent() {
        assert_eq!(circle(32, 7.3), circle(32, 7.3));
        assert_eq!(square(16, 2.2), square(16, 2.2));
    }

    #[test]
    fn regenerate_replaces_contents() {
        let mut f = circle(8, 2.0);
        f.regenerate(Shape::Square, 16, 5.0).unwrap();
        assert_eq!(f, square(16, 5.0));
    }

    // ── errors ────────────────────────────────────────────────────────────

    #[test]
    fn rejects_zero_size() {
        assert_eq!(DistanceField::generate(Shape::Circle, 0, 1.0), Err(FieldError::ZeroSize));
    }

    #[test]
    fn rejects_bad_radius() {
        assert_eq!(
            DistanceField::generate(Shape::Circle, 8, 0.0),
            Err(FieldError::InvalidRadius(0.0))
        );
        assert_eq!(
            DistanceField::generate(Shape::Square, 8, -1.0),
            Err(FieldError::InvalidRadius(-1.0))
        );
        assert!(DistanceField::generate(Shape::Circle, 8, f32::NAN).is_err());
        assert!(DistanceField::generate(Shape::Circle, 8, f32::INFINITY).is_err());
    }

    #[test]
    fn failed_regenerate_keeps_old_field() {
        let mut f = circle(8, 2.0);
        let before = f.clone();
        assert!(f.regenerate(Shape::Square, 0, 2.0).is_err());
        assert_eq!(f, before);
    }
}
