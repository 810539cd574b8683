//! Frame timing.
//!
//! - [`FrameClock`]: clamped delta time and frame index, ticked once per frame.
//! - [`FramePacer`]: redraw deadlines for a target frame rate.

mod frame_clock;
mod pacer;

pub use frame_clock::{FrameClock, FrameTime};
pub use pacer::FramePacer;
