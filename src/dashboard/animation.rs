use std::time::Duration;

/// Upper bound on the values `Tween::frames` returns before the final one
pub const MAX_FRAMES: u32 = 600;

/// Maps linear progress in `0..=1` to eased progress
pub type Easing = fn(f64) -> f64;

pub fn ease_out_cubic(progress: f64) -> f64 {
    1.0 - (1.0 - progress).powi(3)
}

/// Interpolates from `start` to `end` over `duration`
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    pub start: f64,
    pub end: f64,
    pub duration: Duration,
    pub easing: Easing,
}

impl Tween {
    pub fn new(start: f64, end: f64, duration: Duration) -> Self {
        Self {
            start,
            end,
            duration,
            easing: ease_out_cubic,
        }
    }

    /// Linear progress after `elapsed`, clamped to 1
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn value_at(&self, elapsed: Duration) -> f64 {
        let progress = self.progress(elapsed);
        if progress >= 1.0 {
            return self.end;
        }
        self.start + (self.end - self.start) * (self.easing)(progress)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.progress(elapsed) >= 1.0
    }

    /// Values sampled every `interval`, always ending with exactly `end`.
    /// The interval is widened when it would yield more than `MAX_FRAMES`.
    pub fn frames(&self, interval: Duration) -> Vec<f64> {
        let mut frames = Vec::new();
        if !interval.is_zero() {
            let interval = interval.max(self.duration / MAX_FRAMES);
            let mut elapsed = Duration::ZERO;
            while !self.is_finished(elapsed) && frames.len() < MAX_FRAMES as usize {
                frames.push(self.value_at(elapsed));
                elapsed += interval;
            }
        }
        frames.push(self.end);
        frames
    }
}

/// Percentage label text, one decimal
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}
