//! Monotonic time source and frame pacing

use std::time::Instant;

/// Milliseconds since an arbitrary fixed epoch; never goes backwards
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock backed by `Instant`, epoch taken at construction
#[derive(Debug, Clone)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }
}

/// Lets at most one tick through per `interval_ms`
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    interval_ms: u64,
    last_tick_ms: Option<u64>,
}

impl FrameLimiter {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_tick_ms: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Whether a tick is due at `now_ms`; records it if so.
    ///
    /// The first call is always due.
    pub fn ready(&mut self, now_ms: u64) -> bool {
        let due = match self.last_tick_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms,
        };
        if due {
            self.last_tick_ms = Some(now_ms);
        }
        due
    }

    /// Milliseconds until the next tick is due
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        match self.last_tick_ms {
            None => 0,
            Some(last) => (last + self.interval_ms).saturating_sub(now_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limiter_gates_ticks() {
        let mut limiter = FrameLimiter::new(16);
        assert!(limiter.ready(100));
        assert!(!limiter.ready(110));
        assert_eq!(limiter.remaining_ms(110), 6);
        assert!(limiter.ready(116));
        assert!(!limiter.ready(131));
        assert!(limiter.ready(200));
        assert_eq!(limiter.remaining_ms(250), 0);
    }

    #[test]
    fn test_zero_interval_always_ready() {
        let mut limiter = FrameLimiter::new(0);
        assert!(limiter.ready(5));
        assert!(limiter.ready(5));
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
