use bytemuck::{Pod, Zeroable};
use glam::{vec4, Vec4};

/// Parameters consumed by the composite pass.
///
/// `sample.x` holds the index of the sample being blended in (as a float,
/// since that's what the blend math operates on); the rest is padding.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct CompositeParams {
    pub sample: Vec4,
}

impl CompositeParams {
    pub fn new(sample_idx: u32) -> Self {
        Self {
            sample: vec4(sample_idx as f32, 0.0, 0.0, 0.0),
        }
    }

    pub fn sample_idx(&self) -> u32 {
        self.sample.x as u32
    }

    /// See: [`blend_weight()`].
    pub fn weight(&self) -> f32 {
        1.0 / (self.sample.x + 1.0)
    }
}

/// Returns the weight with which the `sample_idx`-th sample contributes to the
/// running average: `1, 1/2, 1/3, ...`.
pub fn blend_weight(sample_idx: u32) -> f32 {
    CompositeParams::new(sample_idx).weight()
}

/// Blends a new sample into the running average, the same way the composite
/// pass does it on the GPU.
///
/// Applied to samples `0..n` (each with its own index), this yields their
/// arithmetic mean without having to keep the previous samples around.
pub fn accumulate(accumulated: Vec4, sample: Vec4, sample_idx: u32) -> Vec4 {
    let weight = blend_weight(sample_idx);

    accumulated * (1.0 - weight) + sample * weight
}
