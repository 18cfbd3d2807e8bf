use std::sync::Arc;

use glam::{uvec2, Mat4, UVec2, Vec2};
use sediment::{
    gpu, Backend, Camera, Config, FrameStatus, Orchestrator, WgpuBackend,
    WgpuConfig,
};

const KERNEL: &str = r#"
struct KernelParams {
    camera_to_world: mat4x4<f32>,
    camera_inverse_projection: mat4x4<f32>,
    pixel_offset: vec4<f32>,
}

@group(0) @binding(0)
var<uniform> params: KernelParams;

@group(0) @binding(1)
var skybox: texture_2d<f32>;

@group(0) @binding(2)
var skybox_sampler: sampler;

@group(1) @binding(0)
var output: texture_storage_2d<rgba32float, write>;

@compute @workgroup_size(8, 8, 1)
fn main(@builtin(global_invocation_id) id: vec3<u32>) {
    let size = textureDimensions(output);

    if (id.x >= size.x || id.y >= size.y) {
        return;
    }

    let sky = textureSampleLevel(
        skybox,
        skybox_sampler,
        vec2<f32>(0.5, 0.5) + 0.0 * params.pixel_offset.xy,
        0.0,
    );

    textureStore(output, vec2<i32>(id.xy), vec4<f32>(sky.rgb, 1.0));
}
"#;

const SKY_A: [u8; 4] = [200, 40, 100, 255];
const SKY_B: [u8; 4] = [40, 200, 20, 255];
const SIZE: u32 = 13;

/// Rgba8 destination rounds after every blend.
const TOLERANCE: u8 = 2;

struct Gpu {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
}

impl Gpu {
    fn new() -> Option<Self> {
        let _ = env_logger::builder().is_test(true).try_init();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());

        // Prefer a real adapter, falling back to a software one (e.g.
        // lavapipe or WARP) on headless machines
        let adapter = [false, true].into_iter().find_map(|fallback| {
            pollster::block_on(instance.request_adapter(
                &wgpu::RequestAdapterOptions {
                    force_fallback_adapter: fallback,
                    ..Default::default()
                },
            ))
        })?;

        let compute = adapter
            .get_downlevel_capabilities()
            .flags
            .contains(wgpu::DownlevelFlags::COMPUTE_SHADERS);

        let storage = adapter
            .get_texture_format_features(wgpu::TextureFormat::Rgba32Float)
            .allowed_usages
            .contains(wgpu::TextureUsages::STORAGE_BINDING);

        if !compute || !storage {
            return None;
        }

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: None,
                features: wgpu::Features::empty(),
                limits: adapter.limits(),
            },
            None,
        ))
        .ok()?;

        Some(Self {
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }

    fn backend(&self) -> WgpuBackend {
        let kernel =
            self.device
                .create_shader_module(wgpu::ShaderModuleDescriptor {
                    label: Some("kernel"),
                    source: wgpu::ShaderSource::Wgsl(KERNEL.into()),
                });

        WgpuBackend::new(
            self.device.clone(),
            self.queue.clone(),
            &kernel,
            wgpu::TextureFormat::Rgba8Unorm,
            &WgpuConfig::default(),
        )
    }

    fn skybox(&self, color: [u8; 4]) -> wgpu::TextureView {
        let size = wgpu::Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        };

        let tex = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("skybox"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &tex,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &color,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4),
                rows_per_image: None,
            },
            size,
        );

        tex.create_view(&Default::default())
    }

    fn destination(&self) -> wgpu::Texture {
        self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("destination"),
            size: wgpu::Extent3d {
                width: SIZE,
                height: SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        })
    }

    fn read_pixels(&self, tex: &wgpu::Texture) -> Vec<[u8; 4]> {
        const BYTES_PER_ROW: u32 = 256;

        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("readback"),
            size: (BYTES_PER_ROW * SIZE) as _,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder =
            self.device.create_command_encoder(&Default::default());

        encoder.copy_texture_to_buffer(
            tex.as_image_copy(),
            wgpu::ImageCopyBuffer {
                buffer: &buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(BYTES_PER_ROW),
                    rows_per_image: None,
                },
            },
            tex.size(),
        );

        self.queue.submit(Some(encoder.finish()));

        let slice = buffer.slice(..);

        slice.map_async(wgpu::MapMode::Read, |_| ());
        self.device.poll(wgpu::Maintain::Wait);

        let data = slice.get_mapped_range();

        data.chunks(BYTES_PER_ROW as usize)
            .flat_map(|row| row[..(4 * SIZE) as usize].chunks(4))
            .map(|px| [px[0], px[1], px[2], px[3]])
            .collect()
    }
}

fn assert_rgb(expected: [f32; 3], pixels: &[[u8; 4]]) {
    assert_eq!((SIZE * SIZE) as usize, pixels.len());

    for px in pixels {
        for (&actual, expected) in px.iter().zip(expected) {
            let expected = expected.round() as u8;

            assert!(
                actual.abs_diff(expected) <= TOLERANCE,
                "px={px:?}, expected={expected:?}"
            );
        }
    }
}

fn mix(colors: &[([u8; 4], f32)]) -> [f32; 3] {
    let mut out = [0.0; 3];

    for (color, weight) in colors {
        for (out, &channel) in out.iter_mut().zip(color) {
            *out += channel as f32 * weight;
        }
    }

    out
}

#[test]
fn blends_samples_with_decreasing_weights() {
    let Some(ctx) = Gpu::new() else {
        eprintln!("no suitable adapter found, skipping");
        return;
    };

    let mut backend = ctx.backend();
    let size = UVec2::splat(SIZE);
    let surface = backend.create_surface(size);
    let dst = ctx.destination();
    let sky_a = ctx.skybox(SKY_A);
    let sky_b = ctx.skybox(SKY_B);

    let params =
        gpu::KernelParams::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec2::ZERO);

    let mut sample = |sky: &wgpu::TextureView, idx: u32| {
        backend.write_kernel_params(&params, sky);

        backend
            .dispatch_kernel(&surface, gpu::dispatch_size(size))
            .unwrap();

        backend
            .composite(&surface, &dst, &gpu::CompositeParams::new(idx))
            .unwrap();
    };

    // First sample overwrites whatever the destination held
    sample(&sky_a, 0);
    assert_rgb(mix(&[(SKY_A, 1.0)]), &ctx.read_pixels(&dst));

    sample(&sky_b, 1);
    assert_rgb(mix(&[(SKY_A, 0.5), (SKY_B, 0.5)]), &ctx.read_pixels(&dst));

    sample(&sky_a, 2);

    assert_rgb(
        mix(&[(SKY_A, 2.0 / 3.0), (SKY_B, 1.0 / 3.0)]),
        &ctx.read_pixels(&dst),
    );

    backend.release_surface(surface);
}

#[test]
fn skybox_change_restarts_accumulation() {
    let Some(ctx) = Gpu::new() else {
        eprintln!("no suitable adapter found, skipping");
        return;
    };

    let mut target = Orchestrator::new(
        ctx.backend(),
        Config::default(),
        ctx.skybox(SKY_A),
    );

    let dst = ctx.destination();
    let mut camera = Camera::new(Mat4::IDENTITY, Mat4::IDENTITY);

    for sample in 0..3 {
        target.set_parameters(&mut camera);

        assert_eq!(
            FrameStatus::Rendered { sample },
            target.render(&dst).unwrap()
        );
    }

    assert_eq!(Some(uvec2(SIZE, SIZE)), target.surfaces().size());
    assert_rgb(mix(&[(SKY_A, 1.0)]), &ctx.read_pixels(&dst));

    target.set_skybox(ctx.skybox(SKY_B));
    target.set_parameters(&mut camera);

    assert_eq!(
        FrameStatus::Rendered { sample: 0 },
        target.render(&dst).unwrap()
    );

    assert_rgb(mix(&[(SKY_B, 1.0)]), &ctx.read_pixels(&dst));

    target.set_parameters(&mut camera);
    target.render(&dst).unwrap();

    assert_rgb(mix(&[(SKY_B, 1.0)]), &ctx.read_pixels(&dst));
}
