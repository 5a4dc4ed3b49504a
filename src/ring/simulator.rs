use std::f64::consts::TAU;

use crate::error::{ConfigError, IndexError};
use crate::math::{angular_distance, wrap_angle, wraparound_distance};
use crate::ring::config::RingConfig;

/// Mutable per-ring state: drag offsets and the cumulative lonely history.
#[derive(Clone, Debug, PartialEq)]
pub struct RingState {
    offsets: Vec<f64>,
    has_been_lonely: Vec<bool>,
}

impl RingState {
    fn new(runners: usize) -> Self {
        Self {
            offsets: vec![0.0; runners],
            has_been_lonely: vec![false; runners],
        }
    }

    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    pub fn has_been_lonely(&self) -> &[bool] {
        &self.has_been_lonely
    }
}

/// One runner as handed to renderers and the audio layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentSample {
    /// Angle in [0, 2π)
    pub position: f64,
    /// Half the angular gap to the nearest neighbour
    pub loneliness: f64,
    pub has_been_lonely: bool,
}

/// Concentric rings of runners moving at constant angular velocity.
///
/// Positions and loneliness are pure functions of time and the drag offsets.
/// The "has been lonely" history is the only state that depends on call
/// order: it accumulates over every `observe`, so drivers call `observe` once
/// per frame.
#[derive(Clone, Debug)]
pub struct RingLonelinessSimulator {
    rings: Vec<RingConfig>,
    states: Vec<RingState>,
    speed_scale: f64,
}

impl RingLonelinessSimulator {
    pub fn new(rings: Vec<RingConfig>, speed_scale: f64) -> Result<Self, ConfigError> {
        if !speed_scale.is_finite() {
            return Err(ConfigError::NonFinite {
                name: "speed_scale",
                value: speed_scale,
            });
        }
        for (i, ring) in rings.iter().enumerate() {
            ring.validate(i)?;
        }

        let states = rings.iter().map(|r| RingState::new(r.len())).collect();
        log::info!(
            "Ring simulator: {} rings, {} runners, speed scale {}",
            rings.len(),
            rings.iter().map(RingConfig::len).sum::<usize>(),
            speed_scale
        );

        Ok(Self {
            rings,
            states,
            speed_scale,
        })
    }

    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    pub fn speed_scale(&self) -> f64 {
        self.speed_scale
    }

    pub fn ring(&self, ring: usize) -> Result<&RingConfig, IndexError> {
        self.rings.get(ring).ok_or(IndexError::Ring {
            index: ring,
            count: self.rings.len(),
        })
    }

    pub fn state(&self, ring: usize) -> Result<&RingState, IndexError> {
        self.ring(ring)?;
        Ok(&self.states[ring])
    }

    /// Angle of every runner on `ring` at time `t`, each in [0, 2π).
    ///
    /// `t * velocity * speed_scale` must stay finite; times large enough to
    /// overflow it yield NaN positions.
    pub fn positions_at(&self, ring: usize, t: f64) -> Result<Vec<f64>, IndexError> {
        self.ring(ring)?;
        Ok(self.positions_of(ring, t))
    }

    /// `positions_at` for a ring index already known to be in range
    fn positions_of(&self, ring: usize, t: f64) -> Vec<f64> {
        self.rings[ring]
            .velocities()
            .iter()
            .zip(&self.states[ring].offsets)
            .map(|(&velocity, &offset)| wrap_angle(t * velocity * self.speed_scale + offset))
            .collect()
    }

    /// Loneliness of every runner on `ring` at time `t`.
    ///
    /// A ring with a single runner has no neighbour; it reports π, half of a
    /// full turn, which also meets its own threshold π / 1.
    pub fn loneliness_at(&self, ring: usize, t: f64) -> Result<Vec<f64>, IndexError> {
        Ok(loneliness_of(&self.positions_at(ring, t)?))
    }

    /// Fold the loneliness at `t` into the history of `ring`.
    pub fn observe(&mut self, ring: usize, t: f64) -> Result<(), IndexError> {
        self.ring(ring)?;
        self.observe_ring(ring, t);
        Ok(())
    }

    /// `observe` every ring at `t`
    pub fn observe_all(&mut self, t: f64) {
        for ring in 0..self.rings.len() {
            self.observe_ring(ring, t);
        }
    }

    fn observe_ring(&mut self, ring: usize, t: f64) {
        let loneliness = loneliness_of(&self.positions_of(ring, t));
        let threshold = self.rings[ring].lonely_threshold();
        for (seen, l) in self.states[ring].has_been_lonely.iter_mut().zip(loneliness) {
            *seen |= l >= threshold;
        }
    }

    /// Accumulate a drag offset (radians) on one runner.
    pub fn apply_offset(&mut self, ring: usize, agent: usize, delta: f64) -> Result<(), IndexError> {
        self.check_agent(ring, agent)?;
        self.states[ring].offsets[agent] += delta;
        Ok(())
    }

    /// Whether the runner is lonely right now, regardless of history
    pub fn is_lonely(&self, ring: usize, agent: usize, t: f64) -> Result<bool, IndexError> {
        self.check_agent(ring, agent)?;
        let loneliness = self.loneliness_at(ring, t)?;
        Ok(loneliness[agent] >= self.rings[ring].lonely_threshold())
    }

    pub fn has_been_lonely(&self, ring: usize) -> Result<&[bool], IndexError> {
        Ok(self.state(ring)?.has_been_lonely())
    }

    /// Runners on `ring` that have ever been observed lonely
    pub fn been_lonely_count(&self, ring: usize) -> Result<usize, IndexError> {
        Ok(self.has_been_lonely(ring)?.iter().filter(|&&b| b).count())
    }

    /// `been_lonely_count` of every ring, in ring order
    pub fn been_lonely_counts(&self) -> Vec<usize> {
        self.states
            .iter()
            .map(|state| state.has_been_lonely.iter().filter(|&&b| b).count())
            .collect()
    }

    /// Position, loneliness and history of every runner on `ring` at `t`.
    pub fn snapshot(&self, ring: usize, t: f64) -> Result<Vec<AgentSample>, IndexError> {
        let positions = self.positions_at(ring, t)?;
        let loneliness = loneliness_of(&positions);
        Ok(positions
            .into_iter()
            .zip(loneliness)
            .zip(&self.states[ring].has_been_lonely)
            .map(|((position, loneliness), &has_been_lonely)| AgentSample {
                position,
                loneliness,
                has_been_lonely,
            })
            .collect())
    }

    /// Runner nearest to `angle` on `ring` at `t`, lowest index on ties.
    /// Used to pick the runner under a pointer before dragging it.
    pub fn nearest_agent(&self, ring: usize, angle: f64, t: f64) -> Result<usize, IndexError> {
        let positions = self.positions_at(ring, t)?;
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (i, &position) in positions.iter().enumerate() {
            let distance = angular_distance(angle, position);
            if distance < best_distance {
                best = i;
                best_distance = distance;
            }
        }
        Ok(best)
    }

    fn check_agent(&self, ring: usize, agent: usize) -> Result<(), IndexError> {
        let count = self.ring(ring)?.len();
        if agent >= count {
            return Err(IndexError::Agent {
                ring,
                index: agent,
                count,
            });
        }
        Ok(())
    }
}

/// Half the wraparound gap from each position to its nearest other position.
fn loneliness_of(positions: &[f64]) -> Vec<f64> {
    positions
        .iter()
        .enumerate()
        .map(|(i, &a)| {
            let nearest = positions
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, &b)| wraparound_distance(a, b))
                .fold(TAU, f64::min);
            0.5 * nearest
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn three_runners() -> RingLonelinessSimulator {
        RingLonelinessSimulator::new(
            vec![RingConfig::from_velocities(vec![1.0, 2.0, 3.0])],
            1.0,
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_empty_ring() {
        let err = RingLonelinessSimulator::new(
            vec![
                RingConfig::from_velocities(vec![1.0]),
                RingConfig::from_velocities(vec![]),
            ],
            1.0,
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::EmptyRing { ring: 1 });
    }

    #[test]
    fn test_rejects_non_finite_speed() {
        assert!(RingLonelinessSimulator::new(RingConfig::generate(2), f64::NAN).is_err());
    }

    #[test]
    fn test_all_coincide_at_zero() {
        let sim = three_runners();
        assert_eq!(sim.positions_at(0, 0.0).unwrap(), vec![0.0, 0.0, 0.0]);
        assert_eq!(sim.loneliness_at(0, 0.0).unwrap(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_single_runner_is_always_lonely() {
        let mut sim =
            RingLonelinessSimulator::new(vec![RingConfig::from_velocities(vec![1.0])], 1.0).unwrap();
        assert_eq!(sim.loneliness_at(0, 12.3).unwrap(), vec![PI]);
        assert!(sim.is_lonely(0, 0, 0.0).unwrap());
        sim.observe(0, 0.0).unwrap();
        assert_eq!(sim.has_been_lonely(0).unwrap(), &[true]);
    }

    #[test]
    fn test_two_opposite_runners() {
        let sim = RingLonelinessSimulator::new(
            vec![RingConfig::from_velocities(vec![0.0, 1.0])],
            1.0,
        )
        .unwrap();
        let l = sim.loneliness_at(0, PI).unwrap();
        assert!((l[0] - PI / 2.0).abs() < 1e-12);
        assert!((l[1] - PI / 2.0).abs() < 1e-12);
        assert!(sim.is_lonely(0, 0, PI).unwrap());
        assert!(!sim.is_lonely(0, 0, 0.1).unwrap());
    }

    #[test]
    fn test_offset_shifts_position() {
        let mut sim = three_runners();
        sim.apply_offset(0, 1, 0.5).unwrap();
        sim.apply_offset(0, 1, 0.25).unwrap();
        let positions = sim.positions_at(0, 0.0).unwrap();
        assert_eq!(positions, vec![0.0, 0.75, 0.0]);

        sim.apply_offset(0, 2, -1.0).unwrap();
        let positions = sim.positions_at(0, 0.0).unwrap();
        assert!((positions[2] - (TAU - 1.0)).abs() < 1e-12);
        assert_eq!(sim.state(0).unwrap().offsets(), &[0.0, 0.75, -1.0]);
    }

    #[test]
    fn test_index_errors() {
        let mut sim = three_runners();
        assert_eq!(
            sim.positions_at(1, 0.0),
            Err(IndexError::Ring { index: 1, count: 1 })
        );
        assert_eq!(
            sim.apply_offset(0, 3, 1.0),
            Err(IndexError::Agent { ring: 0, index: 3, count: 3 })
        );
        assert!(sim.is_lonely(0, 7, 0.0).is_err());
        assert!(sim.observe(4, 0.0).is_err());
        assert!(sim.snapshot(2, 0.0).is_err());
    }

    #[test]
    fn test_history_is_sticky() {
        let mut sim = RingLonelinessSimulator::new(
            vec![RingConfig::from_velocities(vec![0.0, 1.0])],
            1.0,
        )
        .unwrap();
        sim.observe(0, PI).unwrap();
        assert_eq!(sim.been_lonely_count(0).unwrap(), 2);

        // Back together: no longer lonely, still remembered
        sim.observe(0, TAU).unwrap();
        assert!(!sim.is_lonely(0, 0, TAU).unwrap());
        assert_eq!(sim.has_been_lonely(0).unwrap(), &[true, true]);
    }

    #[test]
    fn test_observe_all_matches_per_ring_observe() {
        let mut all = RingLonelinessSimulator::new(RingConfig::generate(5), 0.5).unwrap();
        let mut each = all.clone();
        for frame in 0..200 {
            let t = frame as f64 * 0.07;
            all.observe_all(t);
            for ring in 0..each.ring_count() {
                each.observe(ring, t).unwrap();
            }
        }
        for ring in 0..all.ring_count() {
            assert_eq!(all.has_been_lonely(ring).unwrap(), each.has_been_lonely(ring).unwrap());
        }
        let counts = all.been_lonely_counts();
        assert_eq!(counts.len(), 5);
        for (ring, &count) in counts.iter().enumerate() {
            assert_eq!(count, all.been_lonely_count(ring).unwrap());
        }
        assert!(counts[0] > 0);
    }

    #[test]
    fn test_positions_wrapped_at_large_times() {
        let sim = three_runners();
        for t in [1e6, -1e9, 1e12, 1e300] {
            for position in sim.positions_at(0, t).unwrap() {
                assert!((0.0..TAU).contains(&position), "t={t}: {position}");
            }
        }
    }

    #[test]
    fn test_snapshot_triples() {
        let mut sim = three_runners();
        sim.observe(0, 1.0).unwrap();
        let snapshot = sim.snapshot(0, 1.0).unwrap();
        let positions = sim.positions_at(0, 1.0).unwrap();
        let loneliness = sim.loneliness_at(0, 1.0).unwrap();
        let history = sim.has_been_lonely(0).unwrap();
        for (i, sample) in snapshot.iter().enumerate() {
            assert_eq!(sample.position, positions[i]);
            assert_eq!(sample.loneliness, loneliness[i]);
            assert_eq!(sample.has_been_lonely, history[i]);
        }
    }

    #[test]
    fn test_nearest_agent_wraps() {
        let mut sim = three_runners();
        sim.apply_offset(0, 1, 2.0).unwrap();
        sim.apply_offset(0, 2, 4.0).unwrap();
        // Runner 0 sits at 0; an angle just below 2π is next to it
        assert_eq!(sim.nearest_agent(0, TAU - 0.1, 0.0).unwrap(), 0);
        assert_eq!(sim.nearest_agent(0, 2.2, 0.0).unwrap(), 1);
        assert_eq!(sim.nearest_agent(0, 3.9, 0.0).unwrap(), 2);
    }
}
