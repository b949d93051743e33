//! Scroll-mode transport: the timing state machine behind the render loop.
//!
//! All decisions are made against caller-supplied `Instant`s, never the
//! wall clock, so the dwell/pause/advance logic is testable without a
//! window. The winit shell in `render::app` feeds it once per wake-up.

use std::time::{Duration, Instant};

/// Cadence while paused; stop is still honored at this rate.
pub const PAUSE_POLL: Duration = Duration::from_millis(100);
/// Cadence while dwelling at the bottom of the strip.
pub const DWELL_POLL: Duration = Duration::from_millis(500);
/// Cadence of the tiled overview loop (no auto-advance, just signal polls).
pub const TILED_POLL: Duration = Duration::from_millis(30);
/// Default hold at the bottom before looping back to the top.
pub const DEFAULT_DWELL: Duration = Duration::from_secs(120);

/// Speed-derived stepping parameters.
///
/// Speed scales both knobs at once: higher speed means bigger steps *and*
/// shorter waits, so perceived speed rises smoothly across the range.
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    /// Pixels advanced per step: `max(1, round(speed))`.
    pub step_px: u32,
    /// Wait between steps: `max(1, round(50 / speed))` milliseconds.
    pub frame_delay: Duration,
    /// Hold at the bottom before restarting from the top.
    pub dwell: Duration,
}

impl Timing {
    #[must_use]
    pub fn for_speed(speed: f32, dwell: Duration) -> Self {
        let speed = if speed.is_finite() && speed > 0.0 {
            speed
        } else {
            1.0
        };
        let step_px = (speed.round() as u32).max(1);
        let delay_ms = ((50.0 / speed).round() as u64).max(1);
        Self {
            step_px,
            frame_delay: Duration::from_millis(delay_ms),
            dwell,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Running,
    Paused,
    Dwell { until: Instant },
}

/// What the render loop should do this wake-up, and when to wake next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Move the scroll offset down by this many pixels.
    Advance { px: u32, next: Instant },
    /// Dwell elapsed: reset the offset to the top and keep going.
    Restart { next: Instant },
    /// Keep showing the current frame.
    Hold { next: Instant },
}

impl Tick {
    /// The instant the loop should wake again.
    #[must_use]
    pub fn next_wake(&self) -> Instant {
        match *self {
            Tick::Advance { next, .. } | Tick::Restart { next } | Tick::Hold { next } => next,
        }
    }
}

/// Scroll-mode state machine. One per session.
#[derive(Debug)]
pub struct Transport {
    timing: Timing,
    phase: Phase,
    next_step: Instant,
}

impl Transport {
    /// A fresh transport advances on its first tick.
    #[must_use]
    pub fn new(timing: Timing, now: Instant) -> Self {
        Self {
            timing,
            phase: Phase::Running,
            next_step: now,
        }
    }

    /// Decide the next action.
    ///
    /// `paused` is the externally-set pause flag; `at_bottom` must be
    /// computed by the caller against the *current* display buffer height
    /// (`offset + window_height >= buffer_height`), in the same tick as
    /// any rescale, so the end check never lags the buffer by a frame.
    pub fn tick(&mut self, now: Instant, paused: bool, at_bottom: bool) -> Tick {
        if paused {
            if self.phase == Phase::Running {
                self.phase = Phase::Paused;
            }
            return Tick::Hold {
                next: now + PAUSE_POLL,
            };
        }
        if self.phase == Phase::Paused {
            // Resume without a burst of catch-up steps.
            self.phase = Phase::Running;
            self.next_step = now + self.timing.frame_delay;
            return Tick::Hold {
                next: self.next_step,
            };
        }

        if let Phase::Dwell { until } = self.phase {
            if now >= until {
                self.phase = Phase::Running;
                self.next_step = now + self.timing.frame_delay;
                return Tick::Restart {
                    next: self.next_step,
                };
            }
            return Tick::Hold {
                next: until.min(now + DWELL_POLL),
            };
        }

        if at_bottom {
            let until = now + self.timing.dwell;
            self.phase = Phase::Dwell { until };
            return Tick::Hold {
                next: until.min(now + DWELL_POLL),
            };
        }

        if now >= self.next_step {
            self.next_step = now + self.timing.frame_delay;
            return Tick::Advance {
                px: self.timing.step_px,
                next: self.next_step,
            };
        }
        Tick::Hold {
            next: self.next_step,
        }
    }
}
