use noise::{NoiseFn, OpenSimplex};
use rayon::prelude::*;

use crate::config::{
    WaveConfig, JET_COARSE_FREQUENCY, JET_COARSE_SHIFT, JET_FREQUENCY, JET_TIME_SCALE,
    NOISE_AMPLITUDE, TURBULENCE_FREQUENCY, TURBULENCE_TIME_SCALE,
};
use crate::error::ConfigError;
use crate::simulation::cell::{Cell, Texel};
use crate::simulation::field::{BoundaryMask, ScalarField};
use crate::simulation::grid::Grid;
use crate::simulation::interaction::Interaction;

/// Damped 2D wave field of the fountain basin.
///
/// Each cell carries a pressure and a pressure velocity. One `step` applies a
/// four-neighbour wave term, a spring term pulling velocity back toward rest,
/// multiplicative dampening, jet/ambient noise forcing and an optional
/// pointer ripple, all read from the previous buffer only.
pub struct WaveGridSimulator {
    grid: Grid,
    config: WaveConfig,
    /// Forcing field resampled onto the grid's cell centres
    forcing: Vec<f64>,
    mask: BoundaryMask,
    noise: OpenSimplex,
    steps: u64,
}

/// Everything a single cell update reads besides the previous buffer
struct StepContext<'a> {
    width: usize,
    height: usize,
    config: WaveConfig,
    time: f64,
    interaction: Option<Interaction>,
    forcing: &'a [f64],
    inside: &'a [bool],
    noise: &'a OpenSimplex,
}

impl WaveGridSimulator {
    pub fn new(
        width: usize,
        height: usize,
        config: WaveConfig,
        forcing: ScalarField,
    ) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        if width != height {
            return Err(ConfigError::NonSquareGrid { width, height });
        }
        config.validate()?;

        let mask = BoundaryMask::new(width, height, config.radius_fraction);
        log::info!(
            "Wave grid {}x{}: {} of {} cells inside the basin, dampening {}",
            width,
            height,
            mask.inside_count(),
            width * height,
            config.dampening
        );

        Ok(Self {
            grid: Grid::new(width, height),
            forcing: forcing.resample(width, height),
            mask,
            noise: OpenSimplex::new(config.noise_seed),
            config,
            steps: 0,
        })
    }

    /// Grid with the default configuration and no jets
    pub fn without_forcing(size: usize) -> Result<Self, ConfigError> {
        Self::new(size, size, WaveConfig::default(), ScalarField::zeros(1, 1))
    }

    /// Advance the field by one step at `elapsed_time` seconds.
    pub fn step(&mut self, elapsed_time: f64, interaction: Option<Interaction>) {
        let ctx = StepContext {
            width: self.grid.width(),
            height: self.grid.height(),
            config: self.config,
            time: elapsed_time,
            interaction,
            forcing: &self.forcing,
            inside: self.mask.as_slice(),
            noise: &self.noise,
        };

        let width = ctx.width;
        let (previous, next) = self.grid.io_buffers();
        next.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, out) in row.iter_mut().enumerate() {
                    *out = evolve_cell(&ctx, previous, x, y);
                }
            });

        self.grid.swap();
        self.steps += 1;
    }

    /// Deposit a ripple bump into the current state between steps.
    /// Uses the configured interaction radius; cells outside the basin are untouched.
    pub fn apply_impulse(&mut self, u: f64, v: f64, strength: f64) {
        let bump = Interaction::new(u, v, self.config.interaction_radius).with_strength(strength);
        let width = self.grid.width();
        let height = self.grid.height();
        let inside = self.mask.as_slice();
        for (i, cell) in self.grid.current_mut().iter_mut().enumerate() {
            if !inside[i] {
                continue;
            }
            let (cu, cv) = cell_uv(i % width, i / width, width, height);
            cell.pressure += bump.bump_at(cu, cv);
        }
        log::debug!("Impulse {:.3} at ({:.3}, {:.3})", strength, u, v);
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    /// Number of steps taken since construction or the last reset
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_inside(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height() && self.mask.contains(x, y)
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.grid.get(x, y).copied()
    }

    /// Current state, row-major
    pub fn cells(&self) -> &[Cell] {
        self.grid.current()
    }

    /// Current state in render-upload layout
    pub fn texels(&self) -> Vec<Texel> {
        self.grid.current().iter().map(Cell::to_texel).collect()
    }

    /// Current state as raw texture bytes
    pub fn texel_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.texels()).to_vec()
    }

    /// Sum of squared pressure over the grid
    pub fn pressure_energy(&self) -> f64 {
        self.grid.current().iter().map(|c| c.pressure * c.pressure).sum()
    }

    /// Quadratic wave energy of the current state.
    ///
    /// Without forcing or interaction the undamped update is symplectic and
    /// conserves this form exactly, so the damped update scales it by
    /// `dampening²` every step. It is positive for any non-rest state.
    pub fn wave_energy(&self) -> f64 {
        let width = self.grid.width();
        let height = self.grid.height();
        let cells = self.grid.current();
        let a = self.config.dampening;
        let s = self.config.spring * a;

        let mut p_kp = 0.0;
        let mut v_kp = 0.0;
        let mut p_v = 0.0;
        let mut p_p = 0.0;
        let mut v_v = 0.0;
        for y in 0..height {
            for x in 0..width {
                let cell = cells[y * width + x];
                if cell.is_at_rest() {
                    continue;
                }
                let kp = -laplacian(cells, width, height, x, y) / 4.0;
                p_kp += cell.pressure * kp;
                v_kp += cell.velocity * kp;
                p_v += cell.pressure * cell.velocity;
                p_p += cell.pressure * cell.pressure;
                v_v += cell.velocity * cell.velocity;
            }
        }

        (a - s * a * a) * p_kp + s * p_p + s * a * p_v - a * a * v_kp + a * v_v
    }

    /// Put the whole field back at rest
    pub fn reset(&mut self) {
        self.grid.clear();
        self.steps = 0;
        log::debug!("Wave grid reset");
    }
}

#[inline]
fn cell_uv(x: usize, y: usize, width: usize, height: usize) -> (f64, f64) {
    ((x as f64 + 0.5) / width as f64, (y as f64 + 0.5) / height as f64)
}

/// Five-point Laplacian of pressure with zero outside the grid
fn laplacian(cells: &[Cell], width: usize, height: usize, x: usize, y: usize) -> f64 {
    let (xi, yi) = (x as isize, y as isize);
    let p = cells[y * width + x].pressure;
    Grid::pressure_or_zero(cells, width, height, xi - 1, yi)
        + Grid::pressure_or_zero(cells, width, height, xi + 1, yi)
        + Grid::pressure_or_zero(cells, width, height, xi, yi - 1)
        + Grid::pressure_or_zero(cells, width, height, xi, yi + 1)
        - 4.0 * p
}

fn evolve_cell(ctx: &StepContext<'_>, previous: &[Cell], x: usize, y: usize) -> Cell {
    let index = y * ctx.width + x;
    if !ctx.inside[index] {
        return Cell::ZERO;
    }

    let (xi, yi) = (x as isize, y as isize);
    let (w, h) = (ctx.width, ctx.height);
    let up = Grid::pressure_or_zero(previous, w, h, xi, yi - 1);
    let down = Grid::pressure_or_zero(previous, w, h, xi, yi + 1);
    let left = Grid::pressure_or_zero(previous, w, h, xi - 1, yi);
    let right = Grid::pressure_or_zero(previous, w, h, xi + 1, yi);

    let d = ctx.config.dampening;
    let mut pressure = previous[index].pressure;
    let mut velocity = previous[index].velocity;

    // Horizontal and vertical wave terms
    velocity += d * ((right + left) / 2.0 - pressure) / 2.0;
    velocity += d * ((up + down) / 2.0 - pressure) / 2.0;

    pressure += d * velocity;

    // Spring
    velocity -= ctx.config.spring * d * pressure;

    velocity *= d;
    pressure *= d;

    let (u, v) = cell_uv(x, y, w, h);
    let jets = ctx.forcing[index];
    if jets > 0.0 {
        // Low frequency components stay small or the jet map pulses as a whole
        let n = jet_noise(ctx, u * JET_FREQUENCY, v * JET_FREQUENCY)
            + 0.5
                * jet_noise(
                    ctx,
                    u * JET_COARSE_FREQUENCY - JET_COARSE_SHIFT[0],
                    v * JET_COARSE_FREQUENCY - JET_COARSE_SHIFT[1],
                );
        pressure += ctx.config.jet_gain * jets * n;
        velocity += ctx.config.jet_gain * jets * n;
    } else if ctx.config.ambient_gain != 0.0 {
        let n = NOISE_AMPLITUDE
            * ctx.noise.get([
                u * TURBULENCE_FREQUENCY,
                v * TURBULENCE_FREQUENCY,
                TURBULENCE_TIME_SCALE * ctx.time,
            ]);
        pressure += ctx.config.ambient_gain * n;
    }

    if let Some(interaction) = &ctx.interaction {
        pressure += interaction.bump_at(u, v);
    }

    Cell {
        pressure,
        velocity,
        gradient_x: (right - left) / 2.0,
        gradient_y: (up - down) / 2.0,
    }
}

fn jet_noise(ctx: &StepContext<'_>, x: f64, y: f64) -> f64 {
    NOISE_AMPLITUDE * ctx.noise.get([x, y, JET_TIME_SCALE * ctx.time])
}
