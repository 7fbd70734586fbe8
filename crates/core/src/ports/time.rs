use std::sync::Mutex;
use std::time::Duration;

/// Clock abstraction for testability
pub trait Clock: Send + Sync {
    /// Monotonic time elapsed since the clock started; drives timers
    fn now(&self) -> Duration;

    /// Wall-clock label stamped onto transcript lines
    fn timestamp(&self) -> String;
}

/// Hand-driven clock for tests and replays
#[derive(Debug, Default)]
pub struct ManualClock {
    elapsed: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        let mut elapsed = self.elapsed.lock().unwrap_or_else(|e| e.into_inner());
        *elapsed += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.elapsed.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Renders the elapsed time as `HH:MM:SS` past midnight
    fn timestamp(&self) -> String {
        let secs = self.now().as_secs();
        format!("{:02}:{:02}:{:02}", (secs / 3600) % 24, (secs / 60) % 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);
        assert_eq!(clock.timestamp(), "00:00:00");

        clock.advance(Duration::from_millis(3_661_500));
        assert_eq!(clock.now(), Duration::from_millis(3_661_500));
        assert_eq!(clock.timestamp(), "01:01:01");
    }
}
