use std::sync::Mutex;
use std::time::Instant;

use foundation::time::Time;

/// Injectable time source.
///
/// Everything with temporal behavior (animation progress, poll cadence)
/// reads time through this trait so tests can drive it deterministically.
pub trait Clock {
    fn now(&self) -> Time;
}

/// Wall-clock time in milliseconds since the clock was created.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Time {
        Time(self.origin.elapsed().as_secs_f64() * 1000.0)
    }
}

/// Hand-advanced clock for deterministic tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Mutex<f64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(now_ms: f64) -> Self {
        Self {
            now_ms: Mutex::new(now_ms),
        }
    }

    pub fn set(&self, now_ms: f64) {
        *self.now_ms.lock().unwrap() = now_ms;
    }

    pub fn advance(&self, delta_ms: f64) {
        *self.now_ms.lock().unwrap() += delta_ms;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Time {
        Time(*self.now_ms.lock().unwrap())
    }
}
