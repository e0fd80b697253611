use std::time::{Duration, Instant};

/// GIFs play at a fixed rate regardless of the delays stored in the file.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Frame cursor for a looping animation. Dropping it cancels playback.
#[derive(Debug, Clone)]
pub struct Animation {
    frame_count: usize,
    frame: usize,
    shown_at: Instant,
}

impl Animation {
    pub fn start(frame_count: usize, now: Instant) -> Self {
        Self {
            frame_count,
            frame: 0,
            shown_at: now,
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Advances to the next frame (wrapping) once the interval has elapsed.
    /// Returns whether the frame changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.frame_count < 2 || now.duration_since(self.shown_at) < FRAME_INTERVAL {
            return false;
        }
        self.frame = (self.frame + 1) % self.frame_count;
        self.shown_at = now;
        true
    }

    /// How long until the next frame is due, `None` for single-frame images.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        if self.frame_count < 2 {
            return None;
        }
        Some(FRAME_INTERVAL.saturating_sub(now.duration_since(self.shown_at)))
    }
}
