#[cfg(feature = "metrics")]
use std::time::Instant;

/// Measures how long a frame took to render; a no-op unless the `metrics`
/// feature is enabled.
pub struct FrameTimer {
    #[cfg(feature = "metrics")]
    started_at: Instant,
}

impl FrameTimer {
    pub fn start() -> Self {
        Self {
            #[cfg(feature = "metrics")]
            started_at: Instant::now(),
        }
    }

    #[cfg(feature = "metrics")]
    pub fn finish(self, sample: u32) {
        log::debug!(
            "Frame rendered in {}; sample={sample}",
            humantime::format_duration(self.started_at.elapsed())
        );
    }

    #[cfg(not(feature = "metrics"))]
    pub fn finish(self, _: u32) {
        //
    }
}
