use log::{debug, trace};

use crate::{gpu, Invalidation};

/// Counts samples accumulated since the last invalidation.
///
/// The counter is read right before compositing and advanced only after the
/// composite succeeded, so that the `n`-th sample always gets blended in with
/// weight `1 / (n + 1)`.
#[derive(Debug, Default)]
pub struct SampleAccumulator {
    sample_idx: u32,
    last_invalidation: Option<Invalidation>,
}

impl SampleAccumulator {
    pub fn reset(&mut self, reason: Invalidation) {
        debug!(
            "Resetting accumulation ({reason}); had {} samples",
            self.sample_idx
        );

        self.sample_idx = 0;
        self.last_invalidation = Some(reason);
    }

    pub fn current_index(&self) -> u32 {
        self.sample_idx
    }

    pub fn current_weight(&self) -> f32 {
        gpu::blend_weight(self.sample_idx)
    }

    pub fn advance(&mut self) {
        self.sample_idx = self.sample_idx.saturating_add(1);

        trace!("Advanced to sample {}", self.sample_idx);
    }

    pub fn last_invalidation(&self) -> Option<Invalidation> {
        self.last_invalidation
    }
}
