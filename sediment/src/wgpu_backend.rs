mod composite_pass;
mod kernel_pass;
mod texture;
mod uniform_buffer;

use std::sync::Arc;

use glam::{uvec2, UVec2, UVec3};
use log::info;

use self::composite_pass::*;
use self::kernel_pass::*;
pub use self::texture::*;
use self::uniform_buffer::*;
use crate::{gpu, Backend, BackendError, WgpuConfig};

/// [`Backend`] running on an actual GPU.
///
/// The destination passed to [`crate::Orchestrator::render()`] is a
/// `wgpu::Texture` created with `RENDER_ATTACHMENT` usage and the
/// `target_format` given here; it should be blendable, which rules out the
/// 32-bit float formats.
#[derive(Debug)]
pub struct WgpuBackend {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    surface_format: wgpu::TextureFormat,
    kernel: KernelPass,
    composite: CompositePass,
}

impl WgpuBackend {
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        kernel: &wgpu::ShaderModule,
        target_format: wgpu::TextureFormat,
        config: &WgpuConfig,
    ) -> Self {
        info!("Initializing wgpu backend; config={config:?}");

        let surface_format = config.surface_format.texture_format();

        let kernel = KernelPass::new(
            &device,
            kernel,
            &config.kernel_entry_point,
            surface_format,
        );

        let composite = CompositePass::new(&device, target_format);

        Self {
            device,
            queue,
            surface_format,
            kernel,
            composite,
        }
    }

    /// Records commands via `f` and submits them, waiting for the device to
    /// report whether they were valid.
    fn submit(
        &self,
        label: &str,
        f: impl FnOnce(&mut wgpu::CommandEncoder) -> Result<(), BackendError>,
    ) -> Result<(), BackendError> {
        self.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let mut encoder =
            self.device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some(label),
                });

        let recorded = f(&mut encoder);

        if recorded.is_ok() {
            self.queue.submit(Some(encoder.finish()));
        }

        let validation = pollster::block_on(self.device.pop_error_scope());
        let out_of_memory = pollster::block_on(self.device.pop_error_scope());

        recorded?;

        match validation.or(out_of_memory) {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

impl Backend for WgpuBackend {
    type Surface = Texture;
    type Skybox = wgpu::TextureView;
    type Target = wgpu::Texture;

    fn target_size(&self, target: &Self::Target) -> UVec2 {
        uvec2(target.width(), target.height())
    }

    fn create_surface(&mut self, size: UVec2) -> Self::Surface {
        Texture::new(
            &self.device,
            "sediment_surface",
            size,
            self.surface_format,
        )
    }

    fn release_surface(&mut self, surface: Self::Surface) {
        surface.destroy();
    }

    fn write_kernel_params(
        &mut self,
        params: &gpu::KernelParams,
        skybox: &Self::Skybox,
    ) {
        self.kernel
            .write_params(&self.device, &self.queue, params, skybox);
    }

    fn dispatch_kernel(
        &mut self,
        surface: &Self::Surface,
        grid: UVec3,
    ) -> Result<(), BackendError> {
        self.submit("sediment_kernel", |encoder| {
            self.kernel.run(&self.device, encoder, surface, grid)
        })
    }

    fn composite(
        &mut self,
        surface: &Self::Surface,
        target: &Self::Target,
        params: &gpu::CompositeParams,
    ) -> Result<(), BackendError> {
        self.composite.write_params(&self.queue, params);

        let target = target.create_view(&Default::default());

        self.submit("sediment_composite", |encoder| {
            self.composite.run(&self.device, encoder, surface, &target);

            Ok(())
        })
    }
}
