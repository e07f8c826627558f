//! Fixed-period poll scheduling for the dashboard feeds.
//!
//! Each feed has its own interval and fires independently of the others. The
//! schedule is driven by a caller-supplied millisecond clock, so it works with
//! any time source.
//!
//! | Feed | Interval | Consumer |
//! |------|----------|----------|
//! | Battery | 10 s | status strip |
//! | Charging | 10 s | status strip |
//! | Logs | 1 s | log viewport |
//! | Lidar | 0.5 s | plotter (activation check, then packet) |
//!
//! A tick that is late fires once; missed periods are not queued up.

use heapless::Vec;

use crate::config::{BATTERY_POLL_MS, CHARGING_POLL_MS, LIDAR_POLL_MS, LOG_POLL_MS};

/// Number of independently scheduled feeds.
pub const FEED_COUNT: usize = 4;

/// A periodically polled data source.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Feed {
    Battery,
    Charging,
    Logs,
    Lidar,
}

impl Feed {
    /// All feeds, in slot order.
    pub const ALL: [Self; FEED_COUNT] = [Self::Battery, Self::Charging, Self::Logs, Self::Lidar];

    const fn slot(self) -> usize {
        match self {
            Self::Battery => 0,
            Self::Charging => 1,
            Self::Logs => 2,
            Self::Lidar => 3,
        }
    }

    /// Default poll interval for this feed.
    pub const fn default_interval_ms(self) -> u32 {
        match self {
            Self::Battery => BATTERY_POLL_MS,
            Self::Charging => CHARGING_POLL_MS,
            Self::Logs => LOG_POLL_MS,
            Self::Lidar => LIDAR_POLL_MS,
        }
    }
}

/// Per-feed interval timers.
#[derive(Debug)]
pub struct PollSchedule {
    intervals: [u32; FEED_COUNT],
    next_due: [Option<u64>; FEED_COUNT],
}

impl PollSchedule {
    /// Schedule with the default intervals. Every feed is due on the first tick.
    pub const fn new() -> Self {
        Self {
            intervals: [BATTERY_POLL_MS, CHARGING_POLL_MS, LOG_POLL_MS, LIDAR_POLL_MS],
            next_due: [None; FEED_COUNT],
        }
    }

    /// Override one feed's interval. A zero interval is raised to 1 ms.
    pub fn with_interval(
        mut self,
        feed: Feed,
        interval_ms: u32,
    ) -> Self {
        self.intervals[feed.slot()] = interval_ms.max(1);
        self
    }

    /// Interval currently configured for `feed`.
    #[inline]
    pub const fn interval_ms(
        &self,
        feed: Feed,
    ) -> u32 {
        self.intervals[feed.slot()]
    }

    /// Feeds due at `now_ms`, in slot order. Each returned feed is rescheduled
    /// one interval after `now_ms`.
    pub fn due(
        &mut self,
        now_ms: u64,
    ) -> Vec<Feed, FEED_COUNT> {
        let mut due = Vec::new();
        for feed in Feed::ALL {
            let slot = feed.slot();
            let fire = self.next_due[slot].is_none_or(|at| now_ms >= at);
            if fire {
                self.next_due[slot] = Some(now_ms + u64::from(self.intervals[slot]));
                // Capacity equals the feed count, so this cannot fail.
                let _ = due.push(feed);
            }
        }
        due
    }
}

impl Default for PollSchedule {
    fn default() -> Self { Self::new() }
}
