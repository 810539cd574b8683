use std::time::{Duration, Instant};

/// Timing of one frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,
    /// Seconds since the clock was created or reset.
    pub elapsed: f32,
    pub now: Instant,
    pub frame_index: u64,
}

/// Produces a [`FrameTime`] per tick.
///
/// Delta time is clamped so a debugger pause or a minimized window does not
/// produce a huge step in animations.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the baseline, e.g. after the window was occluded.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    pub(crate) fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dt_is_clamped() {
        let mut clock = FrameClock::new();
        let t0 = clock.last;

        let ft = clock.tick_at(t0 + Duration::from_secs(5));
        assert_eq!(ft.dt, 0.25);
        assert_eq!(ft.frame_index, 0);

        let ft = clock.tick_at(t0 + Duration::from_secs(5));
        assert!((ft.dt - 0.0001).abs() < 1e-7);
        assert_eq!(ft.frame_index, 1);
    }

    #[test]
    fn elapsed_is_not_clamped() {
        let mut clock = FrameClock::new();
        let t0 = clock.start;
        let ft = clock.tick_at(t0 + Duration::from_secs(3));
        assert!((ft.elapsed - 3.0).abs() < 1e-6);
    }
}
