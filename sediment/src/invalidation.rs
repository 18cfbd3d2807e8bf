use std::fmt;
use std::mem;

use glam::Mat4;
use log::debug;

use crate::Camera;

/// Reason the accumulated image got thrown away.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Invalidation {
    CameraMoved,
    Resized,
    SkyboxChanged,
    Requested,
}

impl fmt::Display for Invalidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Invalidation::CameraMoved => "camera moved",
            Invalidation::Resized => "surface resized",
            Invalidation::SkyboxChanged => "skybox changed",
            Invalidation::Requested => "requested",
        };

        write!(f, "{reason}")
    }
}

/// Watches camera for changes that make the accumulated image stale.
#[derive(Debug, Default)]
pub struct InvalidationDetector {
    observed: Option<(Mat4, Mat4)>,
}

impl InvalidationDetector {
    /// Returns whether the camera changed since the previous call, consuming
    /// the camera's [`Camera::transform_changed`] flag.
    ///
    /// A change is either the flag being raised or any of the matrices handed
    /// to the kernel (camera-to-world, inverse projection) differing from
    /// what's been seen before; the very first observation is not considered
    /// a change.
    pub fn check_and_consume(&mut self, camera: &mut Camera) -> bool {
        let flagged = mem::take(&mut camera.transform_changed);
        let current = (camera.camera_to_world, camera.inverse_projection);

        let moved = self
            .observed
            .replace(current)
            .is_some_and(|observed| observed != current);

        if flagged || moved {
            debug!(
                "Camera changed (flagged={flagged}, moved={moved}): {}",
                camera.describe()
            );

            true
        } else {
            false
        }
    }
}
