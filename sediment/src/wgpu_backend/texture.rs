use glam::UVec2;

/// Surface the kernel writes into and the composite pass reads from.
#[derive(Debug)]
pub struct Texture {
    tex: wgpu::Texture,
    view: wgpu::TextureView,
    size: UVec2,
}

impl Texture {
    pub fn new(
        device: &wgpu::Device,
        label: impl AsRef<str>,
        size: UVec2,
        format: wgpu::TextureFormat,
    ) -> Self {
        let label = label.as_ref();

        log::debug!(
            "Allocating texture `{label}`; size={}x{}, format={format:?}",
            size.x,
            size.y
        );

        let tex = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&format!("{label}_tex")),
            size: wgpu::Extent3d {
                width: size.x,
                height: size.y,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::STORAGE_BINDING,
            view_formats: &[],
        });

        let view = tex.create_view(&Default::default());

        Self { tex, view, size }
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Frees texture's memory; wgpu keeps it alive until work that's already
    /// been submitted against it completes.
    pub fn destroy(self) {
        log::debug!("Destroying texture; size={}x{}", self.size.x, self.size.y);

        self.tex.destroy();
    }
}
