//! Slow, non-interactive drift between preset viewpoints.
//!
//! The track alternates between holding its current view and easing
//! towards a randomly drawn preset. Holds end on a ticker boundary with a
//! one-in-twenty chance, so their length varies widely.

use rand::Rng;

use super::core::ViewAngles;
use crate::util::{
    easing::quarter_sine,
    random::{integer_uniform, one_in},
    ticker::Ticker,
};

/// Preset `(pitch, yaw)` viewpoints. The repeated front view biases the
/// drift towards looking straight on.
pub const PRESETS: [ViewAngles; 16] = [
    ViewAngles::new(0.0, 0.0),
    ViewAngles::new(0.0, -20.0),
    ViewAngles::new(0.0, 20.0),
    ViewAngles::new(25.0, 0.0),
    ViewAngles::new(-25.0, 0.0),
    ViewAngles::new(25.0, 20.0),
    ViewAngles::new(-25.0, 20.0),
    ViewAngles::new(25.0, -20.0),
    ViewAngles::new(-25.0, -20.0),
    ViewAngles::new(10.0, 0.0),
    ViewAngles::new(-10.0, 0.0),
    ViewAngles::new(0.0, 0.0),
    ViewAngles::new(0.0, 0.0),
    ViewAngles::new(0.0, 0.0),
    ViewAngles::new(0.0, 0.0),
    ViewAngles::new(0.0, 0.0),
];

/// Length of the very first move, in ticks.
const FIRST_MOVE_STEPS: u32 = 100;
/// Length of later moves at speed 1, in ticks.
const MOVE_STEPS: f32 = 350.0;
/// Hold ticker period at speed 1, in ticks.
const HOLD_PERIOD: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Hold,
    Move { step: u32, steps: u32 },
}

/// Camera auto-track state.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraTrack {
    last: ViewAngles,
    target: ViewAngles,
    phase: Phase,
    next_steps: u32,
    move_steps: u32,
    hold: Ticker,
    enabled: bool,
}

impl CameraTrack {
    /// Track starting at the front view. `speed` scales hold and move
    /// durations; a disabled track always returns the front view.
    pub fn new(speed: f32, enabled: bool) -> Self {
        Self {
            last: PRESETS[0],
            target: PRESETS[0],
            phase: Phase::Hold,
            next_steps: FIRST_MOVE_STEPS,
            move_steps: ((MOVE_STEPS / speed).ceil() as u32).max(1),
            hold: Ticker::new(HOLD_PERIOD / speed),
            enabled,
        }
    }

    /// Advance one tick and return the view to draw with.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> ViewAngles {
        if !self.enabled {
            return PRESETS[0];
        }
        loop {
            match self.phase {
                Phase::Hold => {
                    if self.hold.advance() && one_in(rng, 20) {
                        self.phase = Phase::Move {
                            step: 0,
                            steps: self.next_steps,
                        };
                        continue;
                    }
                    return self.last;
                }
                Phase::Move { step, steps } if step < steps => {
                    self.phase = Phase::Move {
                        step: step + 1,
                        steps,
                    };
                    let th = quarter_sine(step as f32 / steps as f32);
                    return self.last.lerp(self.target, th);
                }
                Phase::Move { .. } => {
                    self.last = self.target;
                    let pick = integer_uniform(rng, PRESETS.len() as u32);
                    self.target = PRESETS[pick as usize];
                    self.next_steps = self.move_steps;
                    self.phase = Phase::Hold;
                    log::trace!(
                        "camera track retargeted to ({}, {})",
                        self.target.pitch,
                        self.target.yaw
                    );
                }
            }
        }
    }

    /// Whether the track is currently easing between views.
    pub fn is_moving(&self) -> bool {
        matches!(self.phase, Phase::Move { .. })
    }

    /// View the current move started from.
    pub fn last(&self) -> ViewAngles {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn stays_inside_preset_bounds() {
        let mut track = CameraTrack::new(1.0, true);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100_000 {
            let v = track.advance(&mut rng);
            assert!(v.pitch.abs() <= 25.0 + 1e-4, "{v:?}");
            assert!(v.yaw.abs() <= 20.0 + 1e-4, "{v:?}");
        }
    }

    #[test]
    fn holds_then_moves() {
        let mut track = CameraTrack::new(1.0, true);
        let mut rng = StdRng::seed_from_u64(2);
        // Hold can only end on a ticker boundary
        for _ in 0..20 {
            assert_eq!(track.advance(&mut rng), PRESETS[0]);
            assert!(!track.is_moving());
        }
        let mut moved = false;
        for _ in 0..50_000 {
            let _ = track.advance(&mut rng);
            moved |= track.is_moving();
        }
        assert!(moved);
    }

    #[test]
    fn move_eases_from_last_to_target() {
        let mut track = CameraTrack::new(1.0, true);
        track.target = ViewAngles::new(25.0, 20.0);
        track.phase = Phase::Move { step: 0, steps: 4 };
        let mut rng = StdRng::seed_from_u64(3);

        let views: Vec<ViewAngles> =
            (0..4).map(|_| track.advance(&mut rng)).collect();
        assert_eq!(views[0], PRESETS[0]);
        // Quarter sine eases out: each step covers less ground
        let d1 = views[1].pitch - views[0].pitch;
        let d3 = views[3].pitch - views[2].pitch;
        assert!(d1 > d3 && d3 > 0.0);
        assert!(views[3].pitch < 25.0);

        // Completing the move makes the old target the new origin
        let _ = track.advance(&mut rng);
        assert_eq!(track.last(), ViewAngles::new(25.0, 20.0));
    }

    #[test]
    fn later_moves_scale_with_speed() {
        let track = CameraTrack::new(2.0, true);
        assert_eq!(track.move_steps, 175);
        let slow = CameraTrack::new(0.3, true);
        assert_eq!(slow.move_steps, 1167);
    }

    #[test]
    fn disabled_track_is_fixed() {
        let mut track = CameraTrack::new(10.0, false);
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..10_000 {
            assert_eq!(track.advance(&mut rng), PRESETS[0]);
        }
    }
}
