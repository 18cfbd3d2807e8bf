use glam::{uvec3, UVec2, UVec3};

/// Number of threads along each axis of kernel's workgroup; kernels driven by
/// Sediment are expected to declare `@workgroup_size(8, 8, 1)`.
pub const WORKGROUP_SIZE: u32 = 8;

/// Returns how many workgroups are needed to cover an image of given size.
///
/// Rounds up, so that the partial tiles at the right and bottom edges still
/// get dispatched - kernels are expected to discard out-of-bounds threads.
pub fn dispatch_size(size: UVec2) -> UVec3 {
    uvec3(
        size.x.div_ceil(WORKGROUP_SIZE),
        size.y.div_ceil(WORKGROUP_SIZE),
        1,
    )
}
