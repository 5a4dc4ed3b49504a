/// State of one wave cell.
///
/// `pressure` is the displacement rendered as height, `velocity` its time
/// derivative. The gradient pair is derived from the neighbour pressures of
/// the step that produced this cell and is only consumed for lighting.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cell {
    pub pressure: f64,
    pub velocity: f64,
    pub gradient_x: f64,
    pub gradient_y: f64,
}

impl Cell {
    /// Cell at rest
    pub const ZERO: Cell = Cell {
        pressure: 0.0,
        velocity: 0.0,
        gradient_x: 0.0,
        gradient_y: 0.0,
    };

    pub fn is_at_rest(&self) -> bool {
        self.pressure == 0.0 && self.velocity == 0.0
    }

    pub fn to_texel(&self) -> Texel {
        Texel {
            pressure: self.pressure as f32,
            velocity: self.velocity as f32,
            gradient_x: self.gradient_x as f32,
            gradient_y: self.gradient_y as f32,
        }
    }
}

/// Render-upload layout of a cell, one RGBA float texel.
///
/// Layout: 16 bytes total.
/// - r: pressure
/// - g: pressure velocity
/// - b: x gradient `(right - left) / 2`
/// - a: y gradient `(up - down) / 2`
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Texel {
    pub pressure: f32,
    pub velocity: f32,
    pub gradient_x: f32,
    pub gradient_y: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texel_size() {
        assert_eq!(std::mem::size_of::<Texel>(), 16);
    }

    #[test]
    fn test_texel_byte_order() {
        let cell = Cell {
            pressure: 1.0,
            velocity: -2.0,
            gradient_x: 0.5,
            gradient_y: 0.25,
        };
        let texel = cell.to_texel();
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&texel));
        assert_eq!(floats, &[1.0, -2.0, 0.5, 0.25]);
    }

    #[test]
    fn test_zero_is_at_rest() {
        assert!(Cell::ZERO.is_at_rest());
        assert_eq!(Cell::default(), Cell::ZERO);
        let moving = Cell { velocity: 0.1, ..Cell::ZERO };
        assert!(!moving.is_at_rest());
    }
}
