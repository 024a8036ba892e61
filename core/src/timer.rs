use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    /// The timer is not running, nothing changed.
    Idle,
    Remaining(u32),
    /// Reached zero on this tick, the timer stopped itself.
    Expired,
}

/// Countdown in whole seconds. The caller delivers one [`RoundTimer::tick`] per second while it runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTimer {
    round_secs: u32,
    remaining: u32,
    running: bool,
}

impl RoundTimer {
    pub fn new(round_secs: u32) -> Self {
        Self {
            round_secs,
            remaining: round_secs,
            running: false,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// (Re)starts the countdown from the full round length and returns it for display.
    pub fn start(&mut self) -> u32 {
        if self.running {
            log::debug!("restarting timer with {}s left", self.remaining);
        }
        self.remaining = self.round_secs;
        self.running = true;
        self.remaining
    }

    pub fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick::Idle;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            Tick::Expired
        } else {
            Tick::Remaining(self.remaining)
        }
    }

    /// Returns whether the timer was running.
    pub fn stop(&mut self) -> bool {
        core::mem::replace(&mut self.running, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_to_expiry() {
        let mut timer = RoundTimer::new(60);

        assert_eq!(timer.start(), 60);
        for expected in (1..60).rev() {
            assert_eq!(timer.tick(), Tick::Remaining(expected));
        }
        assert_eq!(timer.tick(), Tick::Expired);
        assert_eq!(timer.remaining(), 0);
        assert!(!timer.is_running());
        assert_eq!(timer.tick(), Tick::Idle);
    }

    #[test]
    fn restart_resets_remaining_time() {
        let mut timer = RoundTimer::new(10);
        timer.start();
        timer.tick();
        timer.tick();

        assert_eq!(timer.start(), 10);
        assert_eq!(timer.tick(), Tick::Remaining(9));
    }

    #[test]
    fn stop_ignores_further_ticks() {
        let mut timer = RoundTimer::new(10);
        timer.start();

        assert!(timer.stop());
        assert!(!timer.stop());
        assert_eq!(timer.tick(), Tick::Idle);
    }
}
