/// Frame clock: accumulates per-frame delta time.
///
/// Deltas are clamped to be finite and non-negative so elapsed time is monotonic.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    frame: u64,
    elapsed: f64,
    last_delta: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame. Returns the delta actually applied.
    pub fn tick(&mut self, delta: f32) -> f32 {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        self.frame += 1;
        self.elapsed += delta as f64;
        self.last_delta = delta;
        delta
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Seconds since the first frame.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn delta(&self) -> f32 {
        self.last_delta
    }
}
