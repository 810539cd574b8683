//! GPU device + surface management.
//!
//! - [`Gpu`]: instance/adapter/device/queue plus the window surface.
//! - [`request_headless_device`]: device/queue without a surface, for
//!   offscreen rendering and GPU-backed tests.

mod error;
mod frame;
mod gpu;
mod headless;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use headless::request_headless_device;
pub use init::GpuInit;
