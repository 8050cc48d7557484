use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and auto-track parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 120.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Distance from the eye to the centre of the volume.
    #[schemars(title = "Eye Distance", range(min = 5.0, max = 80.0), extend("step" = 1.0))]
    pub eye_distance: f32,
    /// Drift slowly between preset viewpoints.
    #[schemars(title = "Auto Track")]
    pub auto_track: bool,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 80.0,
            znear: 1.0,
            zfar: 100.0,
            eye_distance: 25.0,
            auto_track: true,
        }
    }
}
