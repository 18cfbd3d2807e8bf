use std::mem;

use glam::{vec2, Vec2};
use log::{info, trace};
use rand::Rng;

use crate::{
    gpu, Backend, Camera, Config, Error, FrameTimer, Invalidation,
    InvalidationDetector, Result, SampleAccumulator, SurfaceManager,
};

/// Outcome of a successful [`Orchestrator::render()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// A new sample got traced and composited with given index.
    Rendered { sample: u32 },

    /// [`Config::max_samples`] got reached - nothing was dispatched and the
    /// destination was left untouched.
    Converged,
}

/// Runs the kernel once per frame, progressively accumulating its output.
///
/// The destination passed to [`Self::render()`] is expected to persist between
/// frames, since it's where the running average lives.
pub struct Orchestrator<B>
where
    B: Backend,
{
    backend: B,
    config: Config,
    skybox: B::Skybox,
    surfaces: SurfaceManager<B::Surface>,
    detector: InvalidationDetector,
    accumulator: SampleAccumulator,
    parameters_set: bool,
}

impl<B> Orchestrator<B>
where
    B: Backend,
{
    pub fn new(backend: B, config: Config, skybox: B::Skybox) -> Self {
        info!("Initializing; config={config:?}");

        Self {
            backend,
            config,
            skybox,
            surfaces: Default::default(),
            detector: Default::default(),
            accumulator: Default::default(),
            parameters_set: false,
        }
    }

    /// Pushes camera, skybox and a freshly drawn jitter into the kernel.
    ///
    /// Must be called once per frame, before [`Self::render()`]; this is also
    /// when camera movement gets detected, so a camera mutated after this call
    /// affects the next frame, not the current one.
    pub fn set_parameters(&mut self, camera: &mut Camera) {
        if self.detector.check_and_consume(camera) {
            self.accumulator.reset(Invalidation::CameraMoved);
        }

        let pixel_offset = self.next_pixel_offset();

        trace!("Setting parameters; pixel_offset={pixel_offset}");

        let params = gpu::KernelParams::new(
            camera.camera_to_world,
            camera.inverse_projection,
            pixel_offset,
        );

        self.backend.write_kernel_params(&params, &self.skybox);
        self.parameters_set = true;
    }

    /// Traces a new sample and blends it into `destination`.
    ///
    /// On error the sample counter stays where it was and the surface stays
    /// allocated; the frame is simply lost.
    pub fn render(&mut self, destination: &B::Target) -> Result<FrameStatus> {
        if !mem::take(&mut self.parameters_set) {
            return Err(Error::ParametersNotSet);
        }

        let timer = FrameTimer::start();
        let size = self.backend.target_size(destination);

        let surface = self.surfaces.ensure_current(
            &mut self.backend,
            size,
            &mut self.accumulator,
        )?;

        if let Some(max_samples) = self.config.max_samples {
            if self.accumulator.current_index() >= max_samples {
                trace!("Converged at {max_samples} samples");

                return Ok(FrameStatus::Converged);
            }
        }

        let grid = gpu::dispatch_size(size);

        trace!("Dispatching kernel; size={size}, grid={grid}");

        self.backend
            .dispatch_kernel(surface, grid)
            .map_err(Error::KernelDispatchFailed)?;

        let sample = self.accumulator.current_index();

        self.backend
            .composite(surface, destination, &gpu::CompositeParams::new(sample))
            .map_err(Error::CompositeFailed)?;

        self.accumulator.advance();
        timer.finish(sample);

        Ok(FrameStatus::Rendered { sample })
    }

    /// Frame entry point for display frameworks that hand over a
    /// `(source, destination)` pair; `source` is ignored.
    pub fn render_image(
        &mut self,
        _source: &B::Target,
        destination: &B::Target,
    ) -> Result<FrameStatus> {
        self.render(destination)
    }

    /// Replaces the environment texture, restarting accumulation.
    pub fn set_skybox(&mut self, skybox: B::Skybox) {
        self.skybox = skybox;
        self.accumulator.reset(Invalidation::SkyboxChanged);
    }

    /// Restarts accumulation, e.g. after the scene got modified in a way
    /// Sediment can't see.
    pub fn invalidate(&mut self) {
        self.accumulator.reset(Invalidation::Requested);
    }

    fn next_pixel_offset(&self) -> Vec2 {
        if self.config.jitter {
            let mut rng = rand::thread_rng();

            vec2(rng.gen(), rng.gen())
        } else {
            Vec2::splat(0.5)
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn accumulator(&self) -> &SampleAccumulator {
        &self.accumulator
    }

    pub fn surfaces(&self) -> &SurfaceManager<B::Surface> {
        &self.surfaces
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl<B> Drop for Orchestrator<B>
where
    B: Backend,
{
    fn drop(&mut self) {
        info!("Deleting; had {} samples", self.accumulator.current_index());

        self.surfaces.release(&mut self.backend);
    }
}
