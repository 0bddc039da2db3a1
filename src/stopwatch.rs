use std::time::{Duration, Instant};

/// Simple start/stop timer for measuring map workloads.
///
/// Not started: every reading is zero. Started but not stopped: readings are
/// live. Stopped: readings are frozen until the next `start` or `reset`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stopwatch {
    start: Option<Instant>,
    end: Option<Instant>,
}

impl Stopwatch {
    /// Create a stopwatch that has not been started.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stopwatch and start it immediately.
    pub fn started() -> Self {
        let mut watch = Self::new();
        watch.start();
        watch
    }

    /// Start (or restart) timing from now.
    pub fn start(&mut self) {
        self.start = Some(Instant::now());
        self.end = None;
    }

    /// Freeze the reading. No effect unless running, so a second `stop`
    /// keeps the first reading.
    pub fn stop(&mut self) {
        if self.is_running() {
            self.end = Some(Instant::now());
        }
    }

    /// Forget both the start and stop points.
    pub fn reset(&mut self) {
        self.start = None;
        self.end = None;
    }

    /// Started and not yet stopped.
    pub fn is_running(&self) -> bool {
        self.start.is_some() && self.end.is_none()
    }

    /// Time between start and stop (or now, while running).
    pub fn elapsed(&self) -> Duration {
        match (self.start, self.end) {
            (Some(start), Some(end)) => end.saturating_duration_since(start),
            (Some(start), None) => start.elapsed(),
            (None, _) => Duration::ZERO,
        }
    }

    /// [`elapsed`](Self::elapsed) in whole seconds.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed().as_secs()
    }

    /// [`elapsed`](Self::elapsed) in whole milliseconds.
    pub fn elapsed_millis(&self) -> u128 {
        self.elapsed().as_millis()
    }

    /// [`elapsed`](Self::elapsed) in whole microseconds.
    pub fn elapsed_micros(&self) -> u128 {
        self.elapsed().as_micros()
    }

    /// [`elapsed`](Self::elapsed) in whole nanoseconds.
    pub fn elapsed_nanos(&self) -> u128 {
        self.elapsed().as_nanos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn unstarted_reads_zero() {
        let watch = Stopwatch::new();
        assert_eq!(watch.elapsed(), Duration::ZERO);
        assert!(!watch.is_running());
    }

    #[test]
    fn stop_freezes_reading() {
        let mut watch = Stopwatch::started();
        thread::sleep(Duration::from_millis(5));
        watch.stop();
        let frozen = watch.elapsed();
        assert!(frozen >= Duration::from_millis(5));
        thread::sleep(Duration::from_millis(5));
        assert_eq!(watch.elapsed(), frozen);
        assert!(watch.elapsed_micros() >= 5_000);
        assert_eq!(watch.elapsed_nanos(), frozen.as_nanos());
    }

    #[test]
    fn running_reading_is_live() {
        let watch = Stopwatch::started();
        let first = watch.elapsed();
        thread::sleep(Duration::from_millis(5));
        assert!(watch.is_running());
        assert!(watch.elapsed() >= first + Duration::from_millis(5));
    }

    #[test]
    fn second_stop_keeps_first_reading() {
        let mut watch = Stopwatch::started();
        watch.stop();
        let frozen = watch.elapsed();
        thread::sleep(Duration::from_millis(5));
        watch.stop();
        assert_eq!(watch.elapsed(), frozen);
    }

    #[test]
    fn reset_clears() {
        let mut watch = Stopwatch::started();
        watch.stop();
        watch.reset();
        assert_eq!(watch.elapsed_millis(), 0);
        assert_eq!(watch.elapsed_secs(), 0);
    }
}
