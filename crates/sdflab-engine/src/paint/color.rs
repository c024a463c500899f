/// Premultiplied RGBA color.
///
/// The `r`, `g`, `b` channels are already multiplied by `a`, matching the
/// `One, OneMinusSrcAlpha` blend state of the overlay renderers.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    /// From straight-alpha components in `[0, 1]`.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// From straight-alpha bytes, e.g. a hex literal.
    #[inline]
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Straight-alpha channels; all zero for a fully transparent color.
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / self.a;
            (self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }

    /// Same hue with straight alpha replaced by `a`.
    pub fn with_alpha(self, a: f32) -> Self {
        let (r, g, b, _) = self.to_straight();
        Self::from_straight(r, g, b, a)
    }

    /// Moves the straight channels toward white by `amount` in `[0, 1]`.
    pub fn lighten(self, amount: f32) -> Self {
        let (r, g, b, a) = self.to_straight();
        let t = amount.clamp(0.0, 1.0);
        Self::from_straight(r + (1.0 - r) * t, g + (1.0 - g) * t, b + (1.0 - b) * t, a)
    }

    /// Moves the straight channels toward black by `amount` in `[0, 1]`.
    pub fn darken(self, amount: f32) -> Self {
        let (r, g, b, a) = self.to_straight();
        let k = 1.0 - amount.clamp(0.0, 1.0);
        Self::from_straight(r * k, g * k, b * k, a)
    }

    #[inline]
    pub(crate) fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn straight_alpha_is_premultiplied() {
        let c = Color::from_straight(1.0, 0.5, 0.0, 0.5);
        assert!(close(c.r, 0.5) && close(c.g, 0.25) && close(c.b, 0.0) && close(c.a, 0.5));
    }

    #[test]
    fn bytes_map_to_unit_range() {
        let c = Color::from_rgba_u8(255, 0, 51, 255);
        assert!(close(c.r, 1.0) && close(c.g, 0.0) && close(c.b, 0.2));
    }

    #[test]
    fn to_straight_inverts() {
        let (r, g, b, a) = Color::from_straight(0.2, 0.4, 0.6, 0.5).to_straight();
        assert!(close(r, 0.2) && close(g, 0.4) && close(b, 0.6) && close(a, 0.5));
        assert_eq!(Color::TRANSPARENT.to_straight(), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn with_alpha_keeps_hue() {
        let c = Color::from_straight(0.8, 0.4, 0.2, 1.0).with_alpha(0.5);
        let (r, g, b, a) = c.to_straight();
        assert!(close(r, 0.8) && close(g, 0.4) && close(b, 0.2) && close(a, 0.5));
    }

    #[test]
    fn lighten_and_darken_move_toward_extremes() {
        let c = Color::from_straight(0.5, 0.5, 0.5, 1.0);
        assert!(close(c.lighten(1.0).r, 1.0));
        assert!(close(c.lighten(0.5).g, 0.75));
        assert!(close(c.darken(1.0).b, 0.0));
        assert!(close(c.darken(0.5).r, 0.25));
    }
}
