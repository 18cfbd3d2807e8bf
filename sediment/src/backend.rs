use glam::{UVec2, UVec3};

use crate::{gpu, BackendError};

/// Device-side half of Sediment - allocates surfaces, runs the kernel and
/// composites its output.
///
/// [`crate::Orchestrator`] decides *when* each of those happens; backends
/// decide *how*. [`crate::WgpuBackend`] is the real thing, tests use a CPU
/// implementation.
pub trait Backend {
    /// Image the kernel writes into; see [`crate::SurfaceManager`].
    type Surface;

    /// Environment texture sampled by the kernel for rays that escape.
    type Skybox;

    /// Image the accumulated result gets composited into.
    type Target;

    fn target_size(&self, target: &Self::Target) -> UVec2;

    /// Allocates a surface writable by the kernel and readable by the
    /// composite pass.
    fn create_surface(&mut self, size: UVec2) -> Self::Surface;

    /// Releases a surface; called before its replacement gets allocated.
    fn release_surface(&mut self, surface: Self::Surface);

    /// Updates kernel's parameter set for the upcoming dispatch.
    fn write_kernel_params(
        &mut self,
        params: &gpu::KernelParams,
        skybox: &Self::Skybox,
    );

    /// Runs the kernel over `grid` workgroups, writing into `surface`.
    ///
    /// Must not return before the failure (if any) is known, since a failed
    /// dispatch must never get composited.
    fn dispatch_kernel(
        &mut self,
        surface: &Self::Surface,
        grid: UVec3,
    ) -> Result<(), BackendError>;

    /// Blends `surface` into `target` with weight derived from `params`; must
    /// observe the writes of the preceding [`Self::dispatch_kernel()`].
    fn composite(
        &mut self,
        surface: &Self::Surface,
        target: &Self::Target,
        params: &gpu::CompositeParams,
    ) -> Result<(), BackendError>;
}
