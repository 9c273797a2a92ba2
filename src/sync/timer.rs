use crate::types::GameTime;

/// Minimum-interval timer for one sync channel, measured against the logical
/// simulation clock. Owned by the channel it paces.
#[derive(Debug, Clone)]
pub struct ChannelTimer {
    interval: GameTime,
    last_sent: GameTime,
}

impl ChannelTimer {
    pub fn new(interval: GameTime) -> Self {
        Self {
            interval,
            last_sent: 0,
        }
    }

    /// Returns whether the channel may fire now, marking the send time if so.
    /// If the clock was corrected backward since the last send, the timer
    /// resets instead of computing a negative interval.
    pub fn ready(&mut self, now: GameTime) -> bool {
        if self.last_sent > now {
            self.last_sent = 0;
        }

        if now - self.last_sent < self.interval {
            return false;
        }

        self.last_sent = now;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enforces_minimum_interval() {
        let mut timer = ChannelTimer::new(100);

        assert!(timer.ready(100));
        assert!(!timer.ready(150));
        assert!(!timer.ready(199));
        assert!(timer.ready(200));
    }

    #[test]
    fn backward_clock_resets() {
        let mut timer = ChannelTimer::new(100);

        assert!(timer.ready(5000));
        // clock corrected backward; timer must not underflow
        assert!(timer.ready(400));
        assert!(!timer.ready(450));
    }

    #[test]
    fn fires_at_time_zero_plus_interval() {
        let mut timer = ChannelTimer::new(100);
        assert!(!timer.ready(50));
        assert!(timer.ready(100));
    }
}
