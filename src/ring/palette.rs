/// Runner colour, linear RGB in [0, 1].
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// HSL (all components in [0, 1]) to RGB.
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Color {
    if saturation == 0.0 {
        let l = lightness as f32;
        return Color::new(l, l, l);
    }

    let q = if lightness < 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let p = 2.0 * lightness - q;

    Color::new(
        hue_to_channel(p, q, hue + 1.0 / 3.0) as f32,
        hue_to_channel(p, q, hue) as f32,
        hue_to_channel(p, q, hue - 1.0 / 3.0) as f32,
    )
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-6 && (a.g - b.g).abs() < 1e-6 && (a.b - b.b).abs() < 1e-6
    }

    #[test]
    fn test_grey_when_unsaturated() {
        assert_eq!(hsl_to_rgb(0.3, 0.0, 0.25), Color::new(0.25, 0.25, 0.25));
    }

    #[test]
    fn test_primaries() {
        assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), Color::new(1.0, 0.0, 0.0)));
        assert!(close(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), Color::new(0.0, 1.0, 0.0)));
        assert!(close(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), Color::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_full_lightness_is_white() {
        assert!(close(hsl_to_rgb(0.42, 0.7, 1.0), Color::WHITE));
    }
}
