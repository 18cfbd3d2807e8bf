use glam::UVec2;
use log::{debug, info};

use crate::{Backend, Error, Invalidation, Result, SampleAccumulator};

/// Owns the surface the kernel writes into, keeping it the same size as the
/// destination.
#[derive(Debug)]
pub struct SurfaceManager<S> {
    current: Option<AllocatedSurface<S>>,
    allocations: usize,
}

#[derive(Debug)]
struct AllocatedSurface<S> {
    surface: S,
    size: UVec2,
}

impl<S> SurfaceManager<S> {
    /// Returns a surface of exactly given size, (re)allocating it if needed.
    ///
    /// Reallocation releases the previous surface first and resets the
    /// accumulator, since samples of different sizes can't be blended
    /// together. The returned surface remains valid until the next call that
    /// asks for a different size.
    pub fn ensure_current<B>(
        &mut self,
        backend: &mut B,
        size: UVec2,
        accumulator: &mut SampleAccumulator,
    ) -> Result<&S>
    where
        B: Backend<Surface = S>,
    {
        if size.x == 0 || size.y == 0 {
            return Err(Error::InvalidDimensions {
                width: size.x,
                height: size.y,
            });
        }

        let current = match self.current.take() {
            Some(current) if current.size == size => current,

            stale => {
                if let Some(stale) = stale {
                    debug!(
                        "Releasing surface; size={}x{}",
                        stale.size.x, stale.size.y
                    );

                    backend.release_surface(stale.surface);
                }

                info!("Allocating surface; size={}x{}", size.x, size.y);

                let surface = backend.create_surface(size);

                self.allocations += 1;
                accumulator.reset(Invalidation::Resized);

                AllocatedSurface { surface, size }
            }
        };

        Ok(&self.current.insert(current).surface)
    }

    /// Releases the surface, if any; the next [`Self::ensure_current()`] will
    /// allocate a new one.
    pub fn release<B>(&mut self, backend: &mut B)
    where
        B: Backend<Surface = S>,
    {
        if let Some(current) = self.current.take() {
            debug!(
                "Releasing surface; size={}x{}",
                current.size.x, current.size.y
            );

            backend.release_surface(current.surface);
        }
    }

    pub fn size(&self) -> Option<UVec2> {
        self.current.as_ref().map(|current| current.size)
    }

    /// Number of surfaces allocated so far.
    pub fn allocations(&self) -> usize {
        self.allocations
    }
}

impl<S> Default for SurfaceManager<S> {
    fn default() -> Self {
        Self {
            current: None,
            allocations: 0,
        }
    }
}
