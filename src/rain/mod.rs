//! Strip simulation.
//!
//! [`RainField`] owns the pool of [`Strip`]s and advances all of them once
//! per frame. The simulation is pure CPU state driven by an injected
//! random source and clock, so it runs headless in tests and benches.

pub mod clock;
pub mod params;
pub mod strip;

use rand::Rng;

use self::{
    clock::ClockText,
    params::RainParams,
    strip::{Strip, StripEvent},
};

/// Counts of strip events from one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Strips that started erasing.
    pub started_erasing: usize,
    /// Strips that respawned after passing the splash depth.
    pub splashed: usize,
    /// Strips that respawned after finishing their erase.
    pub recycled: usize,
}

/// All strips plus the parameters they were spawned with.
#[derive(Debug, Clone, PartialEq)]
pub struct RainField {
    params: RainParams,
    strips: Vec<Strip>,
}

impl RainField {
    /// Spawn `params.strips` strips, primed mid-erase when
    /// `params.prefill` is set.
    pub fn new<R: Rng + ?Sized>(
        params: RainParams,
        rng: &mut R,
        clock: &dyn ClockText,
    ) -> Self {
        let strips = (0..params.strips)
            .map(|_| {
                let mut strip = Strip::spawn(&params, rng, clock);
                if params.prefill {
                    strip.prime(&params, rng);
                }
                strip
            })
            .collect();
        log::debug!(
            "spawned {} strips of {} glyphs ({} mode)",
            params.strips,
            params.grid_size,
            params.mode.name()
        );
        Self { params, strips }
    }

    /// Advance every strip by one tick.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        clock: &dyn ClockText,
    ) -> TickSummary {
        let mut summary = TickSummary::default();
        for strip in &mut self.strips {
            match strip.tick(&self.params, rng, clock) {
                StripEvent::Falling => {}
                StripEvent::StartedErasing => summary.started_erasing += 1,
                StripEvent::Splashed => summary.splashed += 1,
                StripEvent::Recycled => summary.recycled += 1,
            }
        }
        summary
    }

    /// Current strips, in draw order.
    pub fn strips(&self) -> &[Strip] {
        &self.strips
    }

    /// Parameters the field runs with.
    pub fn params(&self) -> &RainParams {
        &self.params
    }

    /// Glyph instances per frame.
    pub fn instance_count(&self) -> u32 {
        self.params.instance_count()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{options::RainOptions, rain::clock::FixedClock};

    fn field(opts: &RainOptions, seed: u64) -> RainField {
        let params = RainParams::new(opts).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        RainField::new(params, &mut rng, &FixedClock("00:00".to_owned()))
    }

    #[test]
    fn spawns_requested_strip_count() {
        let opts = RainOptions {
            strips: 7,
            grid_size: 12,
            ..RainOptions::default()
        };
        let f = field(&opts, 1);
        assert_eq!(f.strips().len(), 7);
        assert_eq!(f.instance_count(), 7 * 13);
        assert!(f.strips().iter().all(|s| s.glyphs().len() == 13));
    }

    #[test]
    fn prefill_controls_initial_phase() {
        let primed = field(&RainOptions::default(), 2);
        assert!(primed.strips().iter().all(Strip::is_erasing));

        let opts = RainOptions {
            prefill: false,
            ..RainOptions::default()
        };
        let fresh = field(&opts, 2);
        assert!(fresh.strips().iter().all(|s| !s.is_erasing()));
    }

    #[test]
    fn strips_cycle_over_time() {
        let opts = RainOptions {
            prefill: false,
            speed: 4.0,
            ..RainOptions::default()
        };
        let mut f = field(&opts, 3);
        let mut rng = StdRng::seed_from_u64(3);
        let clock = FixedClock(String::new());
        let mut total = TickSummary::default();
        for _ in 0..2_000 {
            let s = f.tick(&mut rng, &clock);
            total.started_erasing += s.started_erasing;
            total.splashed += s.splashed;
            total.recycled += s.recycled;
        }
        assert!(total.started_erasing > 0);
        assert!(total.splashed + total.recycled > 0);
        assert_eq!(f.strips().len(), 44);
    }
}
