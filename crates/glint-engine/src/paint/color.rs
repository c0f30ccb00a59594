/// Straight (non-premultiplied) RGBA color, components in `[0, 1]`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// RGB triple for a `Float32x3` vertex attribute.
    #[inline]
    pub const fn to_rgb_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Clear value for a render pass load op.
    #[inline]
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

    #[test]
    fn yellow_is_opaque_red_plus_green() {
        assert_eq!(Color::YELLOW, Color::rgba(1.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn wgpu_clear_value_widens_components() {
        let c = Color::rgba(0.25, 0.5, 0.75, 1.0).to_wgpu();
        assert_eq!((c.r, c.g, c.b, c.a), (0.25, 0.5, 0.75, 1.0));
    }

    #[test]
    fn rgb_array_drops_alpha() {
        assert_eq!(Color::BLUE.to_rgb_array(), [0.0, 0.0, 1.0]);
    }
}
