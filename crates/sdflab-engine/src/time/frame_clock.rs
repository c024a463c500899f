use std::time::{Duration, Instant};

/// Timing of one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped to
    /// [`FrameClock::MIN_STEP`]..=[`FrameClock::MAX_STEP`].
    pub dt: f32,
    /// Ticks before this one.
    pub frame: u64,
}

/// Monotonic clock ticked once per frame.
///
/// A stalled loop (debugger, dragged window) yields at most `MAX_STEP`
/// instead of one huge step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    previous: Instant,
    frames: u64,
}

impl FrameClock {
    pub const MIN_STEP: Duration = Duration::from_micros(100);
    pub const MAX_STEP: Duration = Duration::from_millis(250);

    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(previous: Instant) -> Self {
        Self { previous, frames: 0 }
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let step = now.saturating_duration_since(self.previous).clamp(Self::MIN_STEP, Self::MAX_STEP);
        self.previous = now;
        let time = FrameTime { dt: step.as_secs_f32(), frame: self.frames };
        self.frames += 1;
        time
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

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn dt_measures_the_gap_between_ticks() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        assert!((clock.tick_at(t0 + ms(16)).dt - 0.016).abs() < 1e-6);
        assert!((clock.tick_at(t0 + ms(50)).dt - 0.034).abs() < 1e-6);
    }

    #[test]
    fn stalls_and_repeats_are_clamped() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        assert_eq!(clock.tick_at(t0).dt, FrameClock::MIN_STEP.as_secs_f32());
        assert_eq!(clock.tick_at(t0 + Duration::from_secs(5)).dt, 0.25);
    }

    #[test]
    fn frames_are_numbered_from_zero() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        let frames: Vec<u64> = (1..=3).map(|i| clock.tick_at(t0 + ms(i)).frame).collect();
        assert_eq!(frames, [0, 1, 2]);
    }
}
