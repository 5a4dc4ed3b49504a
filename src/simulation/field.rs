use crate::error::ConfigError;

/// Static 2D scalar field in [0, 1], the "jets" forcing map.
///
/// Sampled by normalized `(u, v)` with nearest-cell lookup, so it need not
/// share the grid's resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl ScalarField {
    /// Build from row-major values; each must lie in [0, 1].
    pub fn new(width: usize, height: usize, values: Vec<f64>) -> Result<Self, ConfigError> {
        let expected = width * height;
        if expected == 0 || values.len() != expected {
            return Err(ConfigError::FieldSize {
                width,
                height,
                expected,
                got: values.len(),
            });
        }
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..=1.0).contains(*v))
        {
            return Err(ConfigError::ForcingOutOfRange { index, value });
        }
        Ok(Self { width, height, values })
    }

    /// Field with no forcing anywhere
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            values: vec![0.0; width.max(1) * height.max(1)],
        }
    }

    /// Build from a closure over cell-centre `(u, v)`
    pub fn from_fn(
        width: usize,
        height: usize,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Self, ConfigError> {
        let mut values = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let u = (x as f64 + 0.5) / width as f64;
                let v = (y as f64 + 0.5) / height as f64;
                values.push(f(u, v));
            }
        }
        Self::new(width, height, values)
    }

    /// Build from the alpha channel of tightly packed RGBA8 pixels
    pub fn from_rgba8_alpha(width: usize, height: usize, rgba: &[u8]) -> Result<Self, ConfigError> {
        if rgba.len() != width * height * 4 {
            return Err(ConfigError::FieldSize {
                width,
                height,
                expected: width * height,
                got: rgba.len() / 4,
            });
        }
        let values = rgba
            .chunks_exact(4)
            .map(|px| px[3] as f64 / 255.0)
            .collect();
        Self::new(width, height, values)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Nearest-cell value at normalized coordinates, clamped to the edge
    pub fn sample(&self, u: f64, v: f64) -> f64 {
        let x = ((u * self.width as f64).floor().max(0.0) as usize).min(self.width - 1);
        let y = ((v * self.height as f64).floor().max(0.0) as usize).min(self.height - 1);
        self.values[y * self.width + x]
    }

    /// Resample onto a `width` x `height` grid of cell centres
    pub fn resample(&self, width: usize, height: usize) -> Vec<f64> {
        let mut out = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let u = (x as f64 + 0.5) / width as f64;
                let v = (y as f64 + 0.5) / height as f64;
                out.push(self.sample(u, v));
            }
        }
        out
    }
}

/// Circular basin: cells whose centre lies farther than `radius_fraction`
/// of the half-width from the grid centre are outside.
#[derive(Clone, Debug)]
pub struct BoundaryMask {
    width: usize,
    inside: Vec<bool>,
}

impl BoundaryMask {
    pub fn new(width: usize, height: usize, radius_fraction: f64) -> Self {
        let mut inside = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let u = (x as f64 + 0.5) / width as f64;
                let v = (y as f64 + 0.5) / height as f64;
                inside.push(normalized_radius(u, v) <= radius_fraction);
            }
        }
        Self { width, inside }
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.inside[y * self.width + x]
    }

    /// Row-major flags, true inside the basin
    pub fn as_slice(&self) -> &[bool] {
        &self.inside
    }

    pub fn inside_count(&self) -> usize {
        self.inside.iter().filter(|&&c| c).count()
    }
}

/// Distance of `(u, v)` from the centre, 1.0 at the inscribed circle
pub fn normalized_radius(u: f64, v: f64) -> f64 {
    let du = u - 0.5;
    let dv = v - 0.5;
    (du * du + dv * dv).sqrt() / 0.5
}
