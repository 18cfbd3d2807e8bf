use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec4, Vec4Swizzles};

/// Parameters consumed by the ray-tracing kernel.
///
/// Mirrors the kernel's uniform block; `pixel_offset` is a `Vec4` so that the
/// struct doesn't depend on the GPU's padding rules - only `.xy` is used.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct KernelParams {
    pub camera_to_world: Mat4,
    pub camera_inverse_projection: Mat4,
    pub pixel_offset: Vec4,
}

impl KernelParams {
    pub fn new(
        camera_to_world: Mat4,
        camera_inverse_projection: Mat4,
        pixel_offset: Vec2,
    ) -> Self {
        Self {
            camera_to_world,
            camera_inverse_projection,
            pixel_offset: pixel_offset.extend(0.0).extend(0.0),
        }
    }

    /// Sub-pixel jitter, in `[0, 1)` on both axes.
    pub fn pixel_offset(&self) -> Vec2 {
        self.pixel_offset.xy()
    }
}
