//! Sediment drives a ray-tracing compute kernel frame after frame, averaging
//! its noisy output into a progressively converging image.
//!
//! The kernel itself is external - Sediment owns everything around it: the
//! output surface (reallocated whenever the display gets resized), detecting
//! when the accumulated image has to be thrown away (camera moved, display
//! resized, environment changed), the sample counter, and compositing each
//! new sample into the destination with a `1 / (n + 1)` weight.
//!
//! A frame looks like this:
//!
//! ```ignore
//! orchestrator.set_parameters(&mut camera);
//! orchestrator.render(&destination)?;
//! ```

mod accumulator;
mod backend;
mod camera;
mod config;
mod error;
mod invalidation;
mod orchestrator;
mod surface_manager;
mod utils;
mod wgpu_backend;

pub use sediment_gpu as gpu;

pub use self::accumulator::*;
pub use self::backend::*;
pub use self::camera::*;
pub use self::config::*;
pub use self::error::*;
pub use self::invalidation::*;
pub use self::orchestrator::*;
pub use self::surface_manager::*;
pub(crate) use self::utils::*;
pub use self::wgpu_backend::*;
