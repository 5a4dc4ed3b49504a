use crate::config::{
    NUM_RINGS, PAUSE_DELAY_SECS, RING_SPEED_SCALE, RING_TIME_SCALE, WaveConfig,
};
use crate::error::{IndexError, Result};
use crate::math::signed_angle_delta;
use crate::ring::{RingConfig, RingLonelinessSimulator};
use crate::simulation::{
    interaction_radius_for_viewport, normalized_radius, ContactSmoother, Interaction, ScalarField,
    WaveGridSimulator,
};

/// Keeps a toy running for a grace period after it scrolls out of view so
/// ripples can settle; resumes immediately when it is visible again.
#[derive(Clone, Debug)]
pub struct VisibilityGate {
    pause_delay: f64,
    visible: bool,
    hidden_since: Option<f64>,
}

impl VisibilityGate {
    pub fn new(pause_delay: f64) -> Self {
        Self {
            pause_delay,
            visible: true,
            hidden_since: None,
        }
    }

    pub fn set_visible(&mut self, visible: bool, now: f64) {
        if visible {
            if self.hidden_since.take().is_some() {
                log::debug!("Visible again, resuming");
            }
        } else if self.visible {
            log::debug!("Hidden, pausing in {:.1}s", self.pause_delay);
            self.hidden_since = Some(now);
        }
        self.visible = visible;
    }

    /// Whether the driver should advance the simulations at `now`
    pub fn is_running(&self, now: f64) -> bool {
        match self.hidden_since {
            None => self.visible,
            Some(since) => now - since < self.pause_delay,
        }
    }
}

impl Default for VisibilityGate {
    fn default() -> Self {
        Self::new(PAUSE_DELAY_SECS)
    }
}

/// A runner being dragged around its ring
#[derive(Clone, Copy, Debug)]
struct RingDrag {
    ring: usize,
    agent: usize,
    last_angle: f64,
}

/// What one driven frame produced
#[derive(Clone, Debug, PartialEq)]
pub struct FrameStats {
    pub frame: u64,
    pub pressure_energy: f64,
    /// Been-lonely runners per ring, the input of the drone gain
    pub been_lonely: Vec<usize>,
}

/// Frame driver: advances the fountain and the rings once per tick and
/// translates pointer input into simulator calls.
pub struct App {
    wave: WaveGridSimulator,
    rings: RingLonelinessSimulator,
    contact: ContactSmoother,
    gate: VisibilityGate,
    fps_counter: FpsCounter,
    /// Basin canvas size in CSS pixels
    canvas_px: f64,
    interaction_radius: f64,
    pointer: Option<(f64, f64)>,
    drag: Option<RingDrag>,
    frame_rate: f64,
    frame_number: u64,
}

impl App {
    pub fn new(
        wave: WaveGridSimulator,
        rings: RingLonelinessSimulator,
        canvas_px: f64,
        viewport_width_px: f64,
    ) -> Self {
        Self {
            wave,
            rings,
            contact: ContactSmoother::new(),
            gate: VisibilityGate::default(),
            fps_counter: FpsCounter::new(),
            canvas_px,
            interaction_radius: interaction_radius_for_viewport(viewport_width_px),
            pointer: None,
            drag: None,
            frame_rate: 60.0,
            frame_number: 0,
        }
    }

    /// Default fountain with a ring of jets plus the standard lonely-runner rings
    pub fn with_defaults(grid_size: usize, canvas_px: f64) -> Result<Self> {
        log::info!("Initializing fountain {}x{}...", grid_size, grid_size);
        let wave = WaveGridSimulator::new(grid_size, grid_size, WaveConfig::default(), nozzle_ring()?)?;

        log::info!("Generating {} runner rings...", NUM_RINGS);
        let rings = RingLonelinessSimulator::new(RingConfig::generate(NUM_RINGS), RING_SPEED_SCALE)?;

        Ok(Self::new(wave, rings, canvas_px, canvas_px))
    }

    pub fn wave(&self) -> &WaveGridSimulator {
        &self.wave
    }

    pub fn rings(&self) -> &RingLonelinessSimulator {
        &self.rings
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn pointer(&self) -> Option<(f64, f64)> {
        self.pointer
    }

    pub fn set_visible(&mut self, visible: bool, now: f64) {
        self.gate.set_visible(visible, now);
    }

    /// Pressed pointer over the basin in CSS pixels, `None` when released.
    ///
    /// A press that starts outside the basin circle is ignored; once a press
    /// is accepted it follows the pointer anywhere until release.
    pub fn set_pointer(&mut self, pointer: Option<(f64, f64)>) {
        if let (None, Some((x, y))) = (self.pointer, pointer) {
            let radius = normalized_radius(x / self.canvas_px, y / self.canvas_px);
            if radius > self.wave.config().radius_fraction {
                log::debug!("Press at ({:.0}, {:.0}) outside the basin", x, y);
                return;
            }
        }
        self.pointer = pointer;
    }

    /// Grab the runner nearest `angle` on `ring`
    pub fn begin_drag(&mut self, ring: usize, angle: f64, now: f64) -> std::result::Result<(), IndexError> {
        let agent = self.rings.nearest_agent(ring, angle, now * RING_TIME_SCALE)?;
        log::debug!("Dragging runner {} on ring {}", agent, ring);
        self.drag = Some(RingDrag {
            ring,
            agent,
            last_angle: angle,
        });
        Ok(())
    }

    /// Move the grabbed runner so it follows the pointer angle
    pub fn drag_to(&mut self, angle: f64) -> std::result::Result<(), IndexError> {
        if let Some(drag) = &mut self.drag {
            let delta = signed_angle_delta(drag.last_angle, angle);
            self.rings.apply_offset(drag.ring, drag.agent, delta)?;
            drag.last_angle = angle;
        }
        Ok(())
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Drive one frame at `now` seconds. Returns `None` while paused.
    pub fn frame(&mut self, now: f64) -> Option<FrameStats> {
        if !self.gate.is_running(now) {
            return None;
        }

        let interaction = self
            .contact
            .update(self.pointer, self.frame_rate)
            .map(|(x, y)| Interaction::new(x / self.canvas_px, y / self.canvas_px, self.interaction_radius));
        self.wave.step(now, interaction);
        self.rings.observe_all(now * RING_TIME_SCALE);
        self.frame_number += 1;

        let pressure_energy = self.wave.pressure_energy();
        if !pressure_energy.is_finite() {
            log::warn!("Wave energy diverged at frame {}", self.frame_number);
        }

        let been_lonely = self.rings.been_lonely_counts();

        if let Some(fps) = self.fps_counter.tick(now) {
            self.frame_rate = fps;
            log::info!(
                "Frame {} - {:.0} FPS - energy {:.4}",
                self.frame_number,
                fps,
                pressure_energy
            );
        }

        Some(FrameStats {
            frame: self.frame_number,
            pressure_energy,
            been_lonely,
        })
    }
}

/// Forcing map with a ring of eight nozzles around the basin
fn nozzle_ring() -> std::result::Result<ScalarField, crate::error::ConfigError> {
    const NOZZLES: usize = 8;
    const RING_RADIUS: f64 = 0.3;
    const NOZZLE_RADIUS: f64 = 0.04;

    ScalarField::from_fn(256, 256, |u, v| {
        (0..NOZZLES)
            .map(|k| {
                let angle = k as f64 * std::f64::consts::TAU / NOZZLES as f64;
                let cu = 0.5 + RING_RADIUS * angle.cos();
                let cv = 0.5 + RING_RADIUS * angle.sin();
                let d = ((u - cu).powi(2) + (v - cv).powi(2)).sqrt();
                (1.0 - d / NOZZLE_RADIUS).clamp(0.0, 1.0)
            })
            .fold(0.0, f64::max)
    })
}

/// Frame counter, reports frames per second once per second
struct FpsCounter {
    last_update: Option<f64>,
    frame_count: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last_update: None,
            frame_count: 0,
        }
    }

    /// Tick the counter at `now` seconds, returns Some(fps) every second
    fn tick(&mut self, now: f64) -> Option<f64> {
        let Some(last) = self.last_update else {
            self.last_update = Some(now);
            return None;
        };
        self.frame_count += 1;
        let elapsed = now - last;

        if elapsed >= 1.0 {
            let fps = self.frame_count as f64 / elapsed;
            self.frame_count = 0;
            self.last_update = Some(now);
            Some(fps)
        } else {
            None
        }
    }
}
