/// Elapsed-time counter for a session.
///
/// The timer is a plain state machine: it only advances when `tick` is
/// called while running. The recurring one-second callback that drives
/// `tick` is owned by the presentation layer, which must cancel it on
/// stop/reset/teardown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizTimer {
    elapsed_secs: u64,
    running: bool,
}

impl QuizTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts counting. Idempotent: starting a running timer never makes it
    /// count faster.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Freezes the elapsed count.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stops and zeroes the timer.
    pub fn reset(&mut self) {
        self.running = false;
        self.elapsed_secs = 0;
    }

    /// Advances by one second if running; returns whether it advanced.
    pub fn tick(&mut self) -> bool {
        if self.running {
            self.elapsed_secs += 1;
        }
        self.running
    }
}

/// Renders elapsed seconds as `m:ss`.
#[must_use]
pub fn format_elapsed(elapsed_secs: u64) -> String {
    let minutes = elapsed_secs / 60;
    let seconds = elapsed_secs % 60;
    format!("{minutes}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_only_counts_while_running() {
        let mut timer = QuizTimer::new();
        assert!(!timer.tick());
        assert_eq!(timer.elapsed_secs(), 0);

        timer.start();
        assert!(timer.tick());
        assert!(timer.tick());
        assert_eq!(timer.elapsed_secs(), 2);

        timer.stop();
        assert!(!timer.tick());
        assert_eq!(timer.elapsed_secs(), 2);
    }

    #[test]
    fn start_is_idempotent() {
        let mut timer = QuizTimer::new();
        timer.start();
        timer.start();
        timer.tick();
        // A second start never doubles the rate: one tick, one second.
        assert_eq!(timer.elapsed_secs(), 1);
    }

    #[test]
    fn reset_stops_and_zeroes() {
        let mut timer = QuizTimer::new();
        timer.start();
        timer.tick();
        timer.reset();
        assert_eq!(timer.elapsed_secs(), 0);
        assert!(!timer.is_running());
    }

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(5), "0:05");
        assert_eq!(format_elapsed(65), "1:05");
        assert_eq!(format_elapsed(754), "12:34");
    }
}
