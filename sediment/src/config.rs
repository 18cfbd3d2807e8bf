/// Knobs of the [`crate::Orchestrator`].
#[derive(Clone, Debug)]
pub struct Config {
    /// Whether each frame should sample a random point within the pixel.
    ///
    /// When disabled, the kernel always gets the pixel's center, which makes
    /// the output deterministic (and aliased).
    pub jitter: bool,

    /// Number of samples after which the image is considered converged and
    /// rendering stops until the next invalidation; `None` renders forever.
    pub max_samples: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jitter: true,
            max_samples: None,
        }
    }
}

/// Knobs of the [`crate::WgpuBackend`].
#[derive(Clone, Debug)]
pub struct WgpuConfig {
    /// Format of the surface the kernel writes into; the kernel's `Result`
    /// binding must be declared with the same format.
    pub surface_format: SurfaceFormat,

    /// Name of the kernel's compute entry point.
    pub kernel_entry_point: String,
}

impl Default for WgpuConfig {
    fn default() -> Self {
        Self {
            surface_format: SurfaceFormat::default(),
            kernel_entry_point: "main".into(),
        }
    }
}

/// Linear floating-point formats precise enough to accumulate in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SurfaceFormat {
    Rgba16Float,

    #[default]
    Rgba32Float,
}

impl SurfaceFormat {
    pub fn texture_format(self) -> wgpu::TextureFormat {
        match self {
            SurfaceFormat::Rgba16Float => wgpu::TextureFormat::Rgba16Float,
            SurfaceFormat::Rgba32Float => wgpu::TextureFormat::Rgba32Float,
        }
    }

    pub fn bits_per_channel(self) -> u32 {
        match self {
            SurfaceFormat::Rgba16Float => 16,
            SurfaceFormat::Rgba32Float => 32,
        }
    }
}
