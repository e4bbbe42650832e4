//! Time-driven interpolation of scalar visual properties.
//!
//! Times are milliseconds on the explorer's virtual clock. A tween never
//! needs cancelling: retargeting starts a new interpolation from whatever
//! value the old one had reached.

pub const ENTRANCE_MS: f64 = 700.0;
pub const HOVER_MS: f64 = 120.0;
pub const TOOLTIP_IN_MS: f64 = 100.0;
pub const TOOLTIP_OUT_MS: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    start: f64,
    duration: f64,
}

impl Tween {
    /// A value that is not moving
    pub fn still(value: f64) -> Self {
        Self { from: value, to: value, start: 0.0, duration: 0.0 }
    }

    pub fn new(from: f64, to: f64, start: f64, duration: f64) -> Self {
        Self { from, to, start, duration: duration.max(0.0) }
    }

    pub fn value_at(&self, now: f64) -> f64 {
        if self.duration == 0.0 || now >= self.start + self.duration {
            return self.to;
        }
        if now <= self.start {
            return self.from;
        }
        let t = (now - self.start) / self.duration;
        self.from + (self.to - self.from) * ease_cubic_in_out(t)
    }

    /// Head for `to` from the value reached at `now`
    pub fn retarget(&mut self, now: f64, to: f64, duration: f64) {
        let from = self.value_at(now);
        *self = Self::new(from, to, now, duration);
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}
