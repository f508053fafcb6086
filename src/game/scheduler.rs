//! Tick clock for the game loop
//!
//! The scheduler owns at most one [`Interval`]. Changing the period replaces
//! the interval inside a single `&mut self` call, so a tick at the old period
//! can never fire once [`TickScheduler::reconfigure`] returns, and two
//! intervals are never live at the same time.

use std::time::Duration;

use log::debug;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

#[derive(Debug, Default)]
pub struct TickScheduler {
    timer: Option<Interval>,
    period: Option<Duration>,
}

impl TickScheduler {
    /// An idle scheduler; `tick()` never completes until it is armed
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ticking every `period`, first tick one period from now
    pub fn arm(&mut self, period: Duration) {
        self.reconfigure(period);
    }

    /// Cancel the current schedule and arm a new one at `period`
    pub fn reconfigure(&mut self, period: Duration) {
        self.cancel();

        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        debug!("tick scheduler armed at {}ms", period.as_millis());
        self.timer = Some(timer);
        self.period = Some(period);
    }

    /// Drop any pending ticks
    pub fn cancel(&mut self) {
        if let Some(period) = self.period.take() {
            debug!("tick scheduler cancelled ({}ms)", period.as_millis());
        }
        self.timer = None;
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Wait for the next tick. Pending forever while cancelled, which keeps
    /// a `tokio::select!` branch on it inert.
    pub async fn tick(&mut self) -> Instant {
        match self.timer.as_mut() {
            Some(timer) => timer.tick().await,
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, timeout};

    async fn ticks_within(scheduler: &mut TickScheduler, window: Duration) -> usize {
        let deadline = Instant::now() + window;
        let mut count = 0;
        while timeout(deadline - Instant::now(), scheduler.tick()).await.is_ok() {
            count += 1;
        }
        count
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_scheduler_never_ticks() {
        let mut scheduler = TickScheduler::new();
        assert!(!scheduler.is_armed());
        assert_eq!(ticks_within(&mut scheduler, Duration::from_secs(5)).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let mut scheduler = TickScheduler::new();
        scheduler.arm(Duration::from_millis(200));
        let armed_at = Instant::now();

        let fired_at = scheduler.tick().await;

        assert_eq!(fired_at - armed_at, Duration::from_millis(200));
        assert_eq!(scheduler.period(), Some(Duration::from_millis(200)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_at_period() {
        let mut scheduler = TickScheduler::new();
        scheduler.arm(Duration::from_millis(200));

        // 200, 400, 600, 800, 1000
        assert_eq!(
            ticks_within(&mut scheduler, Duration::from_millis(1_100)).await,
            5
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconfigure_replaces_old_period() {
        let mut scheduler = TickScheduler::new();
        scheduler.arm(Duration::from_millis(200));
        scheduler.tick().await;

        advance(Duration::from_millis(150)).await;
        scheduler.reconfigure(Duration::from_millis(100));
        let rearmed_at = Instant::now();

        // The old schedule would have fired 50ms from here
        let fired_at = scheduler.tick().await;
        assert_eq!(fired_at - rearmed_at, Duration::from_millis(100));
        assert_eq!(scheduler.period(), Some(Duration::from_millis(100)));

        // 200, 300, 400 after the re-arm tick at 100
        assert_eq!(
            ticks_within(&mut scheduler, Duration::from_millis(350)).await,
            3
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_halts_ticks() {
        let mut scheduler = TickScheduler::new();
        scheduler.arm(Duration::from_millis(50));
        scheduler.tick().await;

        scheduler.cancel();

        assert!(!scheduler.is_armed());
        assert_eq!(scheduler.period(), None);
        assert_eq!(ticks_within(&mut scheduler, Duration::from_secs(1)).await, 0);
    }
}
