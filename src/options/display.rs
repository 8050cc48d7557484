use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Window and frame-loop behaviour.
pub struct DisplayOptions {
    /// Window title prefix.
    #[schemars(skip)]
    pub title: String,
    /// Show the measured frame rate in the window title.
    #[schemars(title = "FPS in Title")]
    pub fps_in_title: bool,
    /// Quiet period after the last resize before GPU resources are rebuilt.
    #[schemars(title = "Resize Debounce (ms)", range(min = 0, max = 2000))]
    pub resize_debounce_ms: u64,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            title: "glyphfall".into(),
            fps_in_title: true,
            resize_debounce_ms: 500,
        }
    }
}
