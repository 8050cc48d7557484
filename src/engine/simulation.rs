//! Everything that advances per frame, minus the GPU.

use glam::Mat4;
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    camera::{
        auto_track::CameraTrack,
        core::{Camera, ViewAngles},
    },
    error::ConfigError,
    options::Options,
    rain::{clock::ClockText, params::RainParams, RainField, TickSummary},
    renderer::frame::FrameData,
};

/// Strip field, camera track, and the staged frame they produce.
///
/// [`step`](Self::step) runs the whole simulation for one frame and then
/// stages it; nothing here is touched again until the next step, so
/// rendering always sees a complete tick.
pub struct Simulation {
    field: RainField,
    track: CameraTrack,
    camera: Camera,
    view: ViewAngles,
    rng: StdRng,
    clock: Box<dyn ClockText>,
    frame: FrameData,
}

impl Simulation {
    /// Validate `options` and spawn the field.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the options cannot drive the simulation.
    pub fn new(
        options: &Options,
        size: (u32, u32),
        seed: u64,
        clock: Box<dyn ClockText>,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        let params = RainParams::new(&options.rain)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let field = RainField::new(params, &mut rng, clock.as_ref());
        let track =
            CameraTrack::new(options.rain.speed, options.camera.auto_track);
        let camera = Camera::new(&options.camera, size.0, size.1);
        let view = ViewAngles::default();
        let frame = FrameData::build(&field, camera.build_matrix(view));
        Ok(Self {
            field,
            track,
            camera,
            view,
            rng,
            clock,
            frame,
        })
    }

    /// Advance strips and camera by one tick, then stage the frame.
    pub fn step(&mut self) -> TickSummary {
        let summary = self.field.tick(&mut self.rng, self.clock.as_ref());
        self.view = self.track.advance(&mut self.rng);
        self.frame.update(&self.field, self.view_proj());
        summary
    }

    /// Update the projection aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
        self.frame.uniform.view_proj = self.view_proj().to_cols_array_2d();
    }

    /// Current projection * view * rotation.
    pub fn view_proj(&self) -> Mat4 {
        self.camera.build_matrix(self.view)
    }

    /// Staged GPU data for the latest step.
    pub fn frame(&self) -> &FrameData {
        &self.frame
    }

    /// View angles used by the latest step.
    pub fn view(&self) -> ViewAngles {
        self.view
    }

    /// Camera rig.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rain::clock::FixedClock;

    fn sim(seed: u64) -> Simulation {
        Simulation::new(
            &Options::default(),
            (1280, 720),
            seed,
            Box::new(FixedClock("Thu Oct 16 2026".to_owned())),
        )
        .unwrap()
    }

    #[test]
    fn rejects_invalid_options() {
        let mut opts = Options::default();
        opts.rain.wave_size = 0;
        let result = Simulation::new(
            &opts,
            (10, 10),
            0,
            Box::new(FixedClock(String::new())),
        );
        assert!(matches!(result, Err(ConfigError::ZeroWaveSize)));
    }

    #[test]
    fn first_frame_is_staged_before_any_step() {
        let s = sim(1);
        assert_eq!(s.frame().instance_count(), 71 * 44);
        assert_eq!(s.frame().strips.len(), 44);
    }

    #[test]
    fn same_seed_replays_identically() {
        let mut a = sim(42);
        let mut b = sim(42);
        for _ in 0..500 {
            assert_eq!(a.step(), b.step());
            assert_eq!(a.view(), b.view());
        }
        assert_eq!(a.frame(), b.frame());
    }

    #[test]
    fn resize_changes_projection_only() {
        let mut s = sim(3);
        let before = s.frame().clone();
        s.resize(720, 1280);
        assert_ne!(s.frame().uniform.view_proj, before.uniform.view_proj);
        assert_eq!(s.frame().glyphs, before.glyphs);
        assert!((s.camera().aspect - 0.5625).abs() < 1e-6);
    }
}
