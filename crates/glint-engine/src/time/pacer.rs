use std::time::{Duration, Instant};

/// Schedules redraws at a fixed target rate.
///
/// The runtime waits until [`next_deadline`](Self::next_deadline) before
/// requesting the next redraw. Deadlines advance by whole intervals from the
/// previous one, so short hiccups do not shift the cadence; after a long stall
/// the schedule restarts from now instead of bursting to catch up.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Option<Duration>,
    next: Instant,
}

impl FramePacer {
    /// `target_fps == 0` disables pacing (redraw as fast as presented).
    pub fn new(target_fps: u32) -> Self {
        let interval = (target_fps > 0).then(|| Duration::from_secs_f64(1.0 / target_fps as f64));
        Self {
            interval,
            next: Instant::now(),
        }
    }

    #[inline]
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Deadline for the next frame, `None` when unpaced.
    #[inline]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.interval.map(|_| self.next)
    }

    /// True when a frame is due at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        self.interval.is_none() || now >= self.next
    }

    /// Records that a frame was produced at `now` and schedules the next one.
    pub fn frame_presented(&mut self, now: Instant) {
        let Some(interval) = self.interval else {
            self.next = now;
            return;
        };

        self.next += interval;
        if self.next <= now {
            self.next = now + interval;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirty_fps_interval() {
        let pacer = FramePacer::new(30);
        let interval = pacer.interval().unwrap();
        assert!((interval.as_secs_f64() - 1.0 / 30.0).abs() < 1e-9);
    }

    #[test]
    fn deadlines_keep_cadence() {
        let mut pacer = FramePacer::new(10);
        let t0 = pacer.next;

        // Presented slightly late: the next deadline is still on the grid.
        pacer.frame_presented(t0 + Duration::from_millis(20));
        assert_eq!(pacer.next_deadline(), Some(t0 + Duration::from_millis(100)));
        assert!(!pacer.is_due(t0 + Duration::from_millis(50)));
        assert!(pacer.is_due(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn long_stall_restarts_schedule() {
        let mut pacer = FramePacer::new(10);
        let t0 = pacer.next;
        let late = t0 + Duration::from_secs(2);
        pacer.frame_presented(late);
        assert_eq!(pacer.next_deadline(), Some(late + Duration::from_millis(100)));
    }

    #[test]
    fn zero_fps_is_unpaced() {
        let mut pacer = FramePacer::new(0);
        assert_eq!(pacer.next_deadline(), None);
        pacer.frame_presented(Instant::now());
        assert!(pacer.is_due(Instant::now()));
    }
}
