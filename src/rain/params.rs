//! Validated simulation parameters.

use crate::{error::ConfigError, glyph::GlyphMode, options::RainOptions};

/// [`RainOptions`] that passed validation, with the float forms the
/// simulation uses every tick precomputed.
///
/// Holding one of these guarantees that no timer period, wave phase, or
/// splash ratio can divide by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct RainParams {
    /// Number of strips.
    pub strips: usize,
    /// Glyphs per strip, excluding the spinner slot.
    pub grid_size: usize,
    /// `grid_size` as a float.
    pub grid: f32,
    /// Depth of the fall volume.
    pub depth: f32,
    /// Brightness wave length in glyphs.
    pub wave_size: u32,
    /// Fraction of `depth` at which strips splash.
    pub splash_ratio: f32,
    /// Global speed multiplier.
    pub speed: f32,
    /// Glyph character set.
    pub mode: GlyphMode,
    /// Start strips mid-erase.
    pub prefill: bool,
    /// Allow clock text to be embedded on reset.
    pub clock_text: bool,
}

impl RainParams {
    /// Validate `options`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for zero counts, non-finite or non-positive
    /// depth/speed, a splash ratio outside `(0.5, 1.0]`, or an instance
    /// count that does not fit a draw call.
    pub fn new(options: &RainOptions) -> Result<Self, ConfigError> {
        if options.strips == 0 {
            return Err(ConfigError::ZeroStrips);
        }
        if options.grid_size == 0 {
            return Err(ConfigError::ZeroGridSize);
        }
        if options.wave_size == 0 {
            return Err(ConfigError::ZeroWaveSize);
        }
        if !(options.grid_depth.is_finite() && options.grid_depth > 0.0) {
            return Err(ConfigError::GridDepth(options.grid_depth));
        }
        if !(options.speed.is_finite() && options.speed > 0.0) {
            return Err(ConfigError::Speed(options.speed));
        }
        // The splash fade divides by (ratio - 0.5)
        if !(options.splash_ratio > 0.5 && options.splash_ratio <= 1.0) {
            return Err(ConfigError::SplashRatio(options.splash_ratio));
        }
        let too_many = || ConfigError::TooManyInstances {
            strips: options.strips,
            grid_size: options.grid_size,
        };
        let _ = options
            .grid_size
            .checked_add(1)
            .and_then(|slots| slots.checked_mul(options.strips))
            .ok_or_else(too_many)?;

        Ok(Self {
            strips: options.strips as usize,
            grid_size: options.grid_size as usize,
            grid: options.grid_size as f32,
            depth: options.grid_depth,
            wave_size: options.wave_size,
            splash_ratio: options.splash_ratio,
            speed: options.speed,
            mode: options.mode,
            prefill: options.prefill,
            clock_text: options.clock_text,
        })
    }

    /// Glyph slots per strip, spinner included.
    pub fn slots(&self) -> usize {
        self.grid_size + 1
    }

    /// Instances drawn per frame.
    pub fn instance_count(&self) -> u32 {
        (self.slots() * self.strips) as u32
    }

    /// Depth past which a strip splashes and respawns.
    pub fn splash_depth(&self) -> f32 {
        self.depth * self.splash_ratio
    }
}
