use std::time::{Duration, Instant};

/// Wall-clock stopwatch. `start` returns the value that `stop` consumes.
///
/// # Examples
/// ```
/// # use lbflow2d::timer::Stopwatch;
/// let stopwatch = Stopwatch::start();
/// let elapsed = stopwatch.stop();
///
/// assert!(elapsed.as_secs() < 60);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Stopwatch {
            start: Instant::now(),
        }
    }

    pub fn lap(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn stop(self) -> Duration {
        self.start.elapsed()
    }
}

/// Runs `f` and returns its result together with the time it took.
pub fn profile<T, F>(f: F) -> (T, Duration)
where
    F: FnOnce() -> T,
{
    let stopwatch = Stopwatch::start();
    let result = f();
    (result, stopwatch.stop())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_returns_result() {
        let (value, elapsed) = profile(|| (1..=10).sum::<u32>());

        assert_eq!(value, 55);
        assert!(elapsed < Duration::from_secs(60));
    }

    #[test]
    fn test_lap_is_monotonic() {
        let stopwatch = Stopwatch::start();
        let first = stopwatch.lap();
        let second = stopwatch.lap();

        assert!(second >= first);
        assert!(stopwatch.stop() >= second);
    }
}
