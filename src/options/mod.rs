//! Centralized simulation/display options with TOML preset support.
//!
//! Every tweakable setting (strip simulation, camera, window behaviour) is
//! consolidated here. Options serialize to/from TOML for presets stored in
//! `assets/presets/`.

mod camera;
mod display;
mod rain;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use rain::RainOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    camera::core::Camera,
    error::{ConfigError, GlyphfallError},
    rain::params::RainParams,
};

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[rain]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Strip simulation parameters.
    pub rain: RainOptions,
    /// Camera projection and auto-track parameters.
    pub camera: CameraOptions,
    /// Window and frame-loop behaviour.
    pub display: DisplayOptions,
}

impl Options {
    /// Generate JSON Schema describing the user-facing options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, GlyphfallError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| GlyphfallError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), GlyphfallError> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(GlyphfallError::Io)
    }

    /// Serialize to pretty-printed TOML.
    pub fn to_toml(&self) -> Result<String, GlyphfallError> {
        toml::to_string_pretty(self)
            .map_err(|e| GlyphfallError::OptionsParse(e.to_string()))
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Reject options that would put NaN or division by zero into the
    /// simulation or projection.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let _ = RainParams::new(&self.rain)?;
        Camera::validate(&self.camera)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::GlyphMode;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[rain]
strips = 12
mode = "dna"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.rain.strips, 12);
        assert_eq!(opts.rain.mode, GlyphMode::Dna);
        // Everything else should be default
        assert_eq!(opts.rain.grid_size, 70);
        assert_eq!(opts.camera.fovy, 80.0);
        assert_eq!(opts.display.resize_debounce_ms, 500);
    }

    #[test]
    fn defaults_validate() {
        assert_eq!(Options::default().validate(), Ok(()));
    }

    #[test]
    fn zero_strips_is_rejected() {
        let mut opts = Options::default();
        opts.rain.strips = 0;
        assert_eq!(opts.validate(), Err(ConfigError::ZeroStrips));
    }

    #[test]
    fn broken_camera_is_rejected() {
        let mut opts = Options::default();
        opts.camera.zfar = 0.5;
        assert!(matches!(
            opts.validate(),
            Err(ConfigError::Camera(_))
        ));
    }

    #[test]
    fn save_and_load_preset() {
        let dir = std::env::temp_dir()
            .join(format!("glyphfall-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.rain.speed = 2.5;
        opts.save(&dir.join("fast.toml")).unwrap();

        assert_eq!(Options::list_presets(&dir), vec!["fast".to_owned()]);
        let loaded = Options::load(&dir.join("fast.toml")).unwrap();
        assert_eq!(loaded, opts);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn bundled_presets_load_and_validate() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/presets");
        let names = Options::list_presets(&dir);
        assert_eq!(names, vec!["binary_storm".to_owned(), "dna".to_owned()]);
        for name in names {
            let opts = Options::load(&dir.join(format!("{name}.toml"))).unwrap();
            assert_eq!(opts.validate(), Ok(()), "{name}");
        }
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("rain"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("display"));

        // Exposed fields present, skipped ones absent
        let rain = &props["rain"]["properties"];
        assert!(rain.get("strips").is_some());
        assert!(rain.get("mode").is_some());
        assert!(rain.get("prefill").is_none());
        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("znear").is_none());
    }
}
