use glam::UVec3;
use log::debug;

use super::{Texture, UniformBuffer};
use crate::{gpu, BackendError};

/// Dispatches the external ray-tracing kernel.
///
/// The kernel is expected to declare two bind groups:
///
/// - group 0 (parameters, rebuilt on each [`Self::write_params()`]):
///   - binding 0: `var<uniform>` [`gpu::KernelParams`],
///   - binding 1: `texture_2d<f32>` skybox,
///   - binding 2: filtering `sampler` for the skybox,
/// - group 1 (output, rebuilt on each [`Self::run()`]):
///   - binding 0: `texture_storage_2d<surface-format, write>`.
#[derive(Debug)]
pub struct KernelPass {
    params: UniformBuffer<gpu::KernelParams>,
    params_layout: wgpu::BindGroupLayout,
    params_bind_group: Option<wgpu::BindGroup>,
    output_layout: wgpu::BindGroupLayout,
    skybox_sampler: wgpu::Sampler,
    pipeline: wgpu::ComputePipeline,
}

impl KernelPass {
    pub fn new(
        device: &wgpu::Device,
        module: &wgpu::ShaderModule,
        entry_point: &str,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        debug!("Initializing pass: kernel:{entry_point}");

        let params = UniformBuffer::new(device, "sediment_kernel_params");

        let params_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("sediment_kernel_params_layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::COMPUTE,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::COMPUTE,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float {
                                filterable: true,
                            },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::COMPUTE,
                        ty: wgpu::BindingType::Sampler(
                            wgpu::SamplerBindingType::Filtering,
                        ),
                        count: None,
                    },
                ],
            });

        let output_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("sediment_kernel_output_layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::StorageTexture {
                        access: wgpu::StorageTextureAccess::WriteOnly,
                        format: surface_format,
                        view_dimension: wgpu::TextureViewDimension::D2,
                    },
                    count: None,
                }],
            });

        let skybox_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sediment_skybox_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("sediment_kernel_pipeline_layout"),
                bind_group_layouts: &[&params_layout, &output_layout],
                push_constant_ranges: &[],
            });

        let pipeline =
            device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
                label: Some("sediment_kernel_pipeline"),
                layout: Some(&pipeline_layout),
                module,
                entry_point,
            });

        Self {
            params,
            params_layout,
            params_bind_group: None,
            output_layout,
            skybox_sampler,
            pipeline,
        }
    }

    pub fn write_params(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        params: &gpu::KernelParams,
        skybox: &wgpu::TextureView,
    ) {
        self.params.write(queue, params);

        self.params_bind_group =
            Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("sediment_kernel_params"),
                layout: &self.params_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: self.params.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(skybox),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(
                            &self.skybox_sampler,
                        ),
                    },
                ],
            }));
    }

    pub fn run(
        &self,
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        surface: &Texture,
        grid: UVec3,
    ) -> Result<(), BackendError> {
        let params_bind_group =
            self.params_bind_group.as_ref().ok_or_else(|| {
                BackendError::new("kernel parameters haven't been written")
            })?;

        let output_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("sediment_kernel_output"),
                layout: &self.output_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(
                        surface.view(),
                    ),
                }],
            });

        let mut pass =
            encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("sediment_kernel_pass"),
            });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, params_bind_group, &[]);
        pass.set_bind_group(1, &output_bind_group, &[]);
        pass.dispatch_workgroups(grid.x, grid.y, grid.z);

        Ok(())
    }
}
