//! A single falling strip of glyphs.
//!
//! A strip is a vertical column of `grid_size` glyph slots plus one spinner
//! slot at index `grid_size`. The spinner runs down the column revealing
//! glyphs; once it reaches the bottom the strip switches to erasing and the
//! spinner climbs back, hiding glyphs from the top. A strip respawns when
//! the erase completes or when it drifts past the splash depth.

use rand::Rng;

use super::{clock::ClockText, params::RainParams};
use crate::{
    glyph::{is_literal, random_glyph, text_glyph, BLANK},
    util::{
        easing::{lerp, ramp},
        random::{bell, integer_uniform, one_in, uniform},
        ticker::Ticker,
    },
};

/// Brightness of literal text (clock) glyphs.
const TEXT_BRIGHTNESS: f32 = 2.0;
/// Brightness of the spinner glyph.
const SPINNER_BRIGHTNESS: f32 = 1.5;

/// What happened to a strip during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripEvent {
    /// Still revealing or erasing.
    Falling,
    /// The spinner reached the bottom; erasing starts.
    StartedErasing,
    /// The strip passed the splash depth and respawned.
    Splashed,
    /// The erase finished and the strip respawned.
    Recycled,
}

/// State of one strip.
#[derive(Debug, Clone, PartialEq)]
pub struct Strip {
    x: f32,
    y: f32,
    z: f32,
    /// Per-tick depth advance.
    dz: f32,
    /// Signed spinner position: `[0, grid)` while revealing,
    /// `(-grid, 0)` while erasing.
    spinner: f32,
    /// Per-tick spinner advance, negative while erasing.
    spinner_speed: f32,
    /// Brightness wave phase, `0..wave_size`.
    wave: u32,
    /// `grid_size + 1` glyph codes, spinner last.
    glyphs: Vec<u8>,
    /// Slots that get a fresh glyph on every spin boundary.
    spinning: Vec<bool>,
    erasing: bool,
    spin_ticker: Ticker,
    wave_ticker: Ticker,
}

impl Strip {
    /// Spawn a fresh strip.
    pub fn spawn<R: Rng + ?Sized>(
        params: &RainParams,
        rng: &mut R,
        clock: &dyn ClockText,
    ) -> Self {
        let slots = params.slots();
        let mut strip = Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            dz: 0.0,
            spinner: 0.0,
            spinner_speed: 0.0,
            wave: 0,
            glyphs: vec![BLANK; slots],
            spinning: vec![false; slots],
            erasing: false,
            spin_ticker: Ticker::new(1.0),
            wave_ticker: Ticker::new(1.0),
        };
        strip.reset(params, rng, clock);
        strip
    }

    /// Re-randomize position, speeds, and glyphs, and start revealing
    /// from the top.
    pub fn reset<R: Rng + ?Sized>(
        &mut self,
        params: &RainParams,
        rng: &mut R,
        clock: &dyn ClockText,
    ) {
        let grid = params.grid;
        let depth = params.depth;
        let speed = params.speed;

        self.x = uniform(rng, grid) - grid / 2.0;
        self.y = grid / 2.0 + bell(rng, 0.5);
        self.z = depth * 0.2 - uniform(rng, depth * 0.7);
        self.dz = bell(rng, 0.02) * speed;

        self.spinner = 0.0;
        self.spinner_speed = bell(rng, 0.3) * speed;
        self.spin_ticker = Ticker::new(bell(rng, 2.0 / speed) + 1.0);

        self.wave = 0;
        self.wave_ticker = Ticker::new(bell(rng, 3.0 / speed) + 1.0);

        self.erasing = false;
        self.glyphs.fill(BLANK);

        let n = params.grid_size;
        for j in 0..=n {
            self.spinning[j] = j == n || one_in(rng, 20);
        }
        for j in 0..=n {
            if j < n && one_in(rng, 7) {
                self.spinning[j] = false;
            } else {
                self.glyphs[j] = random_glyph(params.mode, rng);
            }
        }

        if one_in(rng, 5) && params.clock_text {
            self.embed_text(&clock.text(), rng);
        }
    }

    /// Write `text` as literal glyphs at a random offset that leaves the
    /// spinner untouched. Text that does not fit is skipped.
    fn embed_text<R: Rng + ?Sized>(&mut self, text: &str, rng: &mut R) {
        let n = self.glyphs.len() - 1;
        let len = text.chars().count();
        if len == 0 || len >= n {
            return;
        }
        let offset = integer_uniform(rng, (n - len) as u32) as usize;
        for (k, c) in text.chars().enumerate() {
            self.glyphs[offset + k] = text_glyph(c);
            self.spinning[offset + k] = false;
        }
        log::debug!("clock text at offset {offset}: {text}");
    }

    /// Put a freshly spawned strip partway through its erase, so a
    /// populated field can be shown from the first frame.
    pub fn prime<R: Rng + ?Sized>(&mut self, params: &RainParams, rng: &mut R) {
        // Strictly negative: zero would read as revealing
        self.spinner = -uniform(rng, params.grid).max(0.001);
        self.begin_erase(params.grid_size);
    }

    fn begin_erase(&mut self, n: usize) {
        self.erasing = true;
        self.spinner_speed = -self.spinner_speed / 2.0;
        self.glyphs[n] = BLANK;
        self.spinning[n] = false;
    }

    /// Advance the strip by one simulation tick.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        params: &RainParams,
        rng: &mut R,
        clock: &dyn ClockText,
    ) -> StripEvent {
        self.z += self.dz;
        if self.z > params.splash_depth() {
            self.reset(params, rng, clock);
            return StripEvent::Splashed;
        }

        let mut event = StripEvent::Falling;
        self.spinner += self.spinner_speed;
        if !self.erasing && self.spinner >= params.grid {
            self.spinner = -0.001;
            self.begin_erase(params.grid_size);
            event = StripEvent::StartedErasing;
        } else if self.erasing && self.spinner <= -params.grid {
            self.reset(params, rng, clock);
            return StripEvent::Recycled;
        }

        if self.spin_ticker.advance() {
            let n = params.grid_size;
            for j in 0..=n {
                if !self.spinning[j] {
                    continue;
                }
                if j < n && one_in(rng, 800) {
                    self.spinning[j] = false;
                } else {
                    self.glyphs[j] = random_glyph(params.mode, rng);
                }
            }
        }

        if self.wave_ticker.advance() {
            self.wave = (self.wave + 1) % params.wave_size;
        }

        event
    }

    /// Depth attenuation: brighter towards the viewer, with the brightness
    /// ramp replayed over the splash transition past half depth.
    pub fn depth_factor(&self, params: &RainParams) -> f32 {
        let rel = self.z / params.depth;
        let mut factor = lerp(1.0, rel + 0.5, 0.2);
        if rel > 0.5 {
            let fade =
                ((rel - 0.5) / (params.splash_ratio - 0.5)).clamp(0.0, 1.0);
            factor *= ramp(fade);
        }
        factor
    }

    /// Whether slot `i` is currently shown.
    pub fn is_visible(&self, i: usize) -> bool {
        let spinner_slot = i + 1 == self.glyphs.len();
        let i = i as f32;
        if self.erasing {
            !spinner_slot && i > -self.spinner
        } else {
            spinner_slot || i < self.spinner
        }
    }

    /// Final brightness of slot `i`, zero when hidden.
    pub fn glyph_brightness(&self, i: usize, params: &RainParams) -> f32 {
        if !self.is_visible(i) {
            return 0.0;
        }
        let base = if is_literal(self.glyphs[i]) {
            TEXT_BRIGHTNESS
        } else if i == params.grid_size {
            SPINNER_BRIGHTNESS
        } else {
            let phase = (i as f32 + params.grid - self.wave as f32)
                / params.wave_size as f32;
            ramp(phase.rem_euclid(1.0))
        };
        base * self.depth_factor(params)
    }

    /// Horizontal position.
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Vertical position of the top glyph.
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Depth position.
    pub fn z(&self) -> f32 {
        self.z
    }

    /// Signed spinner position.
    pub fn spinner(&self) -> f32 {
        self.spinner
    }

    /// Brightness wave phase.
    pub fn wave(&self) -> u32 {
        self.wave
    }

    /// Glyph codes, spinner last.
    pub fn glyphs(&self) -> &[u8] {
        &self.glyphs
    }

    /// Whether slot `i` re-rolls its glyph on spin boundaries.
    pub fn is_spinning(&self, i: usize) -> bool {
        self.spinning.get(i).copied().unwrap_or(false)
    }

    /// Whether the strip is in its erase phase.
    pub fn is_erasing(&self) -> bool {
        self.erasing
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        glyph::{GlyphMode, ENCODED_BASE},
        options::RainOptions,
        rain::clock::FixedClock,
    };

    fn params() -> RainParams {
        RainParams::new(&RainOptions::default()).unwrap()
    }

    fn no_clock() -> FixedClock {
        FixedClock(String::new())
    }

    #[test]
    fn spawn_ranges() {
        let p = params();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            let s = Strip::spawn(&p, &mut rng, &no_clock());
            assert!(s.x >= -p.grid / 2.0 && s.x < p.grid / 2.0);
            assert!(s.y >= p.grid / 2.0 && s.y < p.grid / 2.0 + 0.5);
            assert!(s.z > -0.5 * p.depth - 1e-4 && s.z <= 0.2 * p.depth);
            assert!(s.dz >= 0.0 && s.dz < 0.02);
            assert!(s.spinner_speed >= 0.0 && s.spinner_speed < 0.3);
            assert_eq!(s.spinner, 0.0);
            assert!(!s.erasing);
            assert_eq!(s.glyphs.len(), p.slots());
            assert!(s.is_spinning(p.grid_size));
        }
    }

    #[test]
    fn glyphs_come_from_the_mode() {
        let opts = RainOptions {
            mode: GlyphMode::Binary,
            clock_text: false,
            ..RainOptions::default()
        };
        let p = RainParams::new(&opts).unwrap();
        let (offset, range) = GlyphMode::Binary.span();
        let mut rng = StdRng::seed_from_u64(2);
        let mut s = Strip::spawn(&p, &mut rng, &no_clock());
        for _ in 0..300 {
            let _ = s.tick(&p, &mut rng, &no_clock());
            for &g in s.glyphs() {
                assert!(
                    g == BLANK
                        || (ENCODED_BASE + offset..ENCODED_BASE + offset + range)
                            .contains(&g),
                    "unexpected code {g}"
                );
            }
        }
    }

    #[test]
    fn spinner_reaching_bottom_starts_erase() {
        let p = params();
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = Strip::spawn(&p, &mut rng, &no_clock());
        s.z = 0.0;
        s.spinner = p.grid - 0.01;
        s.spinner_speed = 0.2;

        assert_eq!(s.tick(&p, &mut rng, &no_clock()), StripEvent::StartedErasing);
        assert!(s.is_erasing());
        assert!(s.spinner < 0.0);
        assert!((s.spinner_speed + 0.1).abs() < 1e-6);
        assert_eq!(s.glyphs[p.grid_size], BLANK);
        assert!(!s.is_spinning(p.grid_size));
    }

    #[test]
    fn finished_erase_recycles() {
        let p = params();
        let mut rng = StdRng::seed_from_u64(4);
        let mut s = Strip::spawn(&p, &mut rng, &no_clock());
        s.z = 0.0;
        s.spinner = -p.grid + 0.05;
        s.begin_erase(p.grid_size);
        s.spinner_speed = -0.1;

        assert_eq!(s.tick(&p, &mut rng, &no_clock()), StripEvent::Recycled);
        assert!(!s.is_erasing());
        assert_eq!(s.spinner, 0.0);
    }

    #[test]
    fn passing_splash_depth_respawns() {
        let p = params();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let mut s = Strip::spawn(&p, &mut rng, &no_clock());
            s.prime(&p, &mut rng);
            s.x = p.grid;
            s.y = -p.grid;
            s.z = p.splash_depth() - 0.001;
            s.dz = 0.01;

            assert_eq!(s.tick(&p, &mut rng, &no_clock()), StripEvent::Splashed);
            assert!(s.x >= -p.grid / 2.0 && s.x < p.grid / 2.0);
            assert!(s.y >= p.grid / 2.0 && s.y < p.grid / 2.0 + 0.5);
            assert!(s.z > -0.5 * p.depth - 1e-4 && s.z <= 0.2 * p.depth);
            assert!(!s.is_erasing());
            assert_eq!(s.spinner, 0.0);
            assert!(s.spinner_speed >= 0.0);
            // Spinner slot is live again after the erase blanked it
            assert!(s.is_spinning(p.grid_size));
            assert_ne!(s.glyphs[p.grid_size], BLANK);
        }
    }

    #[test]
    fn spin_boundary_rerolls_only_spinning_slots() {
        let opts = RainOptions {
            clock_text: false,
            ..RainOptions::default()
        };
        let p = RainParams::new(&opts).unwrap();
        let mut rng = StdRng::seed_from_u64(13);
        let mut s = Strip::spawn(&p, &mut rng, &no_clock());
        s.z = 0.0;
        s.dz = 0.0;
        s.spinner_speed = 0.0;
        s.spin_ticker = Ticker::new(0.0);
        s.spinning[0] = true;
        s.spinning[1] = false;
        s.glyphs[1] = ENCODED_BASE;

        let mut spinner_seen = HashSet::new();
        let mut slot0_seen = HashSet::new();
        for _ in 0..200 {
            let _ = s.tick(&p, &mut rng, &no_clock());
            let _ = spinner_seen.insert(s.glyphs[p.grid_size]);
            if s.is_spinning(0) {
                let _ = slot0_seen.insert(s.glyphs[0]);
            }
            assert_eq!(s.glyphs[1], ENCODED_BASE);
            assert!(!s.is_spinning(1));
        }
        // 26 matrix glyphs: a redraw every tick must visit many of them
        assert!(spinner_seen.len() > 10, "{}", spinner_seen.len());
        assert!(slot0_seen.len() > 1);
    }

    #[test]
    fn spinner_stays_in_bounds() {
        let p = params();
        let mut rng = StdRng::seed_from_u64(6);
        let mut s = Strip::spawn(&p, &mut rng, &no_clock());
        for _ in 0..20_000 {
            let _ = s.tick(&p, &mut rng, &no_clock());
            if s.is_erasing() {
                assert!(s.spinner < 0.0 && s.spinner > -p.grid);
            } else {
                assert!(s.spinner >= 0.0 && s.spinner < p.grid);
            }
            assert!(s.wave < p.wave_size);
            assert!(s.z <= p.splash_depth());
        }
    }

    #[test]
    fn reveal_and_erase_visibility() {
        let p = params();
        let mut rng = StdRng::seed_from_u64(7);
        let mut s = Strip::spawn(&p, &mut rng, &no_clock());
        s.spinner = 10.5;
        assert!(s.is_visible(0) && s.is_visible(10));
        assert!(!s.is_visible(11));
        assert!(s.is_visible(p.grid_size));

        s.spinner = -10.5;
        s.begin_erase(p.grid_size);
        assert!(!s.is_visible(10));
        assert!(s.is_visible(11) && s.is_visible(p.grid_size - 1));
        assert!(!s.is_visible(p.grid_size));
        assert_eq!(s.glyph_brightness(3, &p), 0.0);
    }

    #[test]
    fn depth_factor_shape() {
        let p = params();
        let mut rng = StdRng::seed_from_u64(8);
        let mut s = Strip::spawn(&p, &mut rng, &no_clock());

        s.z = 0.0;
        assert!((s.depth_factor(&p) - 0.9).abs() < 1e-5);
        s.z = p.depth / 2.0;
        assert!((s.depth_factor(&p) - 1.0).abs() < 1e-5);
        // Splash transition just started: ramp(0)
        s.z = p.depth / 2.0 + 0.01;
        assert!((s.depth_factor(&p) - 0.8).abs() < 1e-3);
        // Transition complete at the splash depth: lerp(1, 1.2, 0.2) * ramp(1)
        s.z = p.splash_depth();
        assert!((s.depth_factor(&p) - 1.04).abs() < 1e-4);
        // Halfway: ramp(0.5) = lerp(1, sin(45deg), 0.2)
        s.z = p.depth * 0.6;
        let expected = lerp(1.0, 1.1, 0.2) * ramp(0.5);
        assert!((s.depth_factor(&p) - expected).abs() < 1e-4);
    }

    #[test]
    fn spinner_and_wave_brightness() {
        let p = params();
        let mut rng = StdRng::seed_from_u64(9);
        let mut s = Strip::spawn(&p, &mut rng, &no_clock());
        s.z = 0.0;
        s.spinner = p.grid - 1.0;
        s.glyphs[p.grid_size] = ENCODED_BASE;
        s.glyphs[5] = ENCODED_BASE;

        let df = s.depth_factor(&p);
        assert!((s.glyph_brightness(p.grid_size, &p) - 1.5 * df).abs() < 1e-5);
        let b = s.glyph_brightness(5, &p);
        assert!(b >= 0.8 * df - 1e-5 && b <= df + 1e-5);
    }

    #[test]
    fn clock_text_is_embedded_as_literals() {
        let p = params();
        let clock = FixedClock("12:34".to_owned());
        let expected: Vec<u8> = "12:34".chars().map(text_glyph).collect();
        let mut rng = StdRng::seed_from_u64(10);

        let mut found = 0;
        for _ in 0..200 {
            let s = Strip::spawn(&p, &mut rng, &clock);
            let Some(start) = s
                .glyphs
                .windows(expected.len())
                .position(|w| w == expected.as_slice())
            else {
                continue;
            };
            found += 1;
            for k in start..start + expected.len() {
                assert!(!s.is_spinning(k));
            }
            assert!(start + expected.len() < p.grid_size);
        }
        // Roughly one spawn in five carries the text
        assert!(found > 10, "found {found}");
    }

    #[test]
    fn oversized_clock_text_is_skipped() {
        let opts = RainOptions {
            grid_size: 8,
            ..RainOptions::default()
        };
        let p = RainParams::new(&opts).unwrap();
        let clock = FixedClock("Thu Oct 16 2026".to_owned());
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let s = Strip::spawn(&p, &mut rng, &clock);
            assert!(s.glyphs.iter().all(|&g| g == BLANK || !is_literal(g)));
        }
    }

    #[test]
    fn primed_strip_is_mid_erase() {
        let p = params();
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..200 {
            let mut s = Strip::spawn(&p, &mut rng, &no_clock());
            s.prime(&p, &mut rng);
            assert!(s.is_erasing());
            assert!(s.spinner < 0.0 && s.spinner > -p.grid);
            assert!(s.spinner_speed <= 0.0);
            assert!(!s.is_visible(p.grid_size));
        }
    }

    #[test]
    fn same_seed_same_strip() {
        let p = params();
        let clock = FixedClock("Mon Jan 01".to_owned());
        let mut a_rng = StdRng::seed_from_u64(99);
        let mut b_rng = StdRng::seed_from_u64(99);
        let mut a = Strip::spawn(&p, &mut a_rng, &clock);
        let mut b = Strip::spawn(&p, &mut b_rng, &clock);
        for _ in 0..1_000 {
            assert_eq!(
                a.tick(&p, &mut a_rng, &clock),
                b.tick(&p, &mut b_rng, &clock)
            );
        }
        assert_eq!(a, b);
    }
}
