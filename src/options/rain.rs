use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::glyph::GlyphMode;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Rain", inline)]
#[serde(default)]
/// Strip simulation parameters.
pub struct RainOptions {
    /// Number of falling strips.
    #[schemars(title = "Strips", range(min = 1, max = 400))]
    pub strips: u32,
    /// Glyphs per strip (strip height in characters).
    #[schemars(title = "Grid Size", range(min = 1, max = 200))]
    pub grid_size: u32,
    /// Depth of the volume strips fall through.
    #[schemars(title = "Grid Depth", range(min = 5.0, max = 100.0), extend("step" = 1.0))]
    pub grid_depth: f32,
    /// Length of the brightness wave, in glyphs.
    #[schemars(title = "Wave Size", range(min = 1, max = 100))]
    pub wave_size: u32,
    /// Fraction of the depth at which strips splash and respawn.
    #[schemars(title = "Splash Ratio", range(min = 0.55, max = 1.0), extend("step" = 0.05))]
    pub splash_ratio: f32,
    /// Global speed multiplier.
    #[schemars(title = "Speed", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub speed: f32,
    /// Character set glyphs are drawn from.
    #[schemars(title = "Glyph Mode")]
    pub mode: GlyphMode,
    /// Start strips mid-erase so the first frame is already populated.
    #[schemars(skip)]
    pub prefill: bool,
    /// Occasionally embed the current date and time in a strip.
    #[schemars(title = "Clock Text")]
    pub clock_text: bool,
}

impl Default for RainOptions {
    fn default() -> Self {
        Self {
            strips: 44,
            grid_size: 70,
            grid_depth: 35.0,
            wave_size: 22,
            splash_ratio: 0.7,
            speed: 1.0,
            mode: GlyphMode::Matrix,
            prefill: true,
            clock_text: true,
        }
    }
}
