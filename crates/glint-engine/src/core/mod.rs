//! Contracts between the runtime loop and applications.
//!
//! Applications implement [`App`] and receive a context per callback; they
//! never touch the event loop directly.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{EventCtx, FrameCtx, SetupCtx};
