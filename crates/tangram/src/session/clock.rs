//! Elapsed play time for one level attempt.

/// Seconds of play, advanced by the host once per second while running.
///
/// Ticks after `stop` are ignored, so a host that forgets to cancel its timer
/// cannot keep charging time to a finished or abandoned level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayClock {
    elapsed: u64,
    stopped: bool,
}

impl PlayClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one second; returns whether the tick counted.
    pub fn tick(&mut self) -> bool {
        if self.stopped {
            return false;
        }
        self.elapsed += 1;
        true
    }

    pub fn add_penalty(&mut self, secs: u64) {
        self.elapsed = self.elapsed.saturating_add(secs);
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        !self.stopped
    }

    #[inline]
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }
}
