//! Common structs and algorithms shared between Sediment's host code and the
//! GPU programs it drives (the ray-tracing kernel and the composite pass).

mod composite;
mod dispatch;
mod kernel;

pub use self::composite::*;
pub use self::dispatch::*;
pub use self::kernel::*;
