//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the glyphfall crate.
#[derive(Debug)]
pub enum GlyphfallError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Shader composition or pipeline validation failure, with the
    /// compiler's diagnostic text.
    Shader(String),
    /// Options rejected before entering the frame loop.
    Config(ConfigError),
    /// Glyph atlas image could not be decoded.
    Atlas(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for GlyphfallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Shader(msg) => write!(f, "shader error: {msg}"),
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::Atlas(msg) => write!(f, "glyph atlas error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for GlyphfallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for GlyphfallError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<ConfigError> for GlyphfallError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<std::io::Error> for GlyphfallError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Option values that cannot drive the simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `rain.strips` is zero.
    ZeroStrips,
    /// `rain.grid_size` is zero.
    ZeroGridSize,
    /// `rain.wave_size` is zero.
    ZeroWaveSize,
    /// `rain.grid_depth` is not a positive finite number.
    GridDepth(f32),
    /// `rain.speed` is not a positive finite number.
    Speed(f32),
    /// `rain.splash_ratio` is outside `(0.5, 1.0]`.
    SplashRatio(f32),
    /// Strips times glyph slots does not fit a `u32` instance count.
    TooManyInstances {
        /// Requested strip count.
        strips: u32,
        /// Requested strip height.
        grid_size: u32,
    },
    /// Camera projection parameters are degenerate.
    Camera(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroStrips => write!(f, "rain.strips must be at least 1"),
            Self::ZeroGridSize => {
                write!(f, "rain.grid_size must be at least 1")
            }
            Self::ZeroWaveSize => {
                write!(f, "rain.wave_size must be at least 1")
            }
            Self::GridDepth(v) => {
                write!(f, "rain.grid_depth must be positive and finite, got {v}")
            }
            Self::Speed(v) => {
                write!(f, "rain.speed must be positive and finite, got {v}")
            }
            Self::SplashRatio(v) => {
                write!(f, "rain.splash_ratio must be in (0.5, 1.0], got {v}")
            }
            Self::TooManyInstances { strips, grid_size } => write!(
                f,
                "{strips} strips of {grid_size} glyphs exceed the instance \
                 limit"
            ),
            Self::Camera(msg) => write!(f, "camera: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
