//! Tick sources that drive a [`FocusTimer`].

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use super::engine::{FocusTimer, TimerStatus};
use crate::events::Event;

/// Something that yields one tick per elapsed second of focus.
#[async_trait]
pub trait TickSource: Send {
    async fn next_tick(&mut self);
}

/// Real-time ticks from a tokio interval.
pub struct IntervalTicks {
    interval: Interval,
}

impl IntervalTicks {
    pub fn new(period: Duration) -> Self {
        // First tick after one full period, not immediately.
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
        Self { interval }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[async_trait]
impl TickSource for IntervalTicks {
    async fn next_tick(&mut self) {
        self.interval.tick().await;
    }
}

/// Ticks that are always ready. Replays a whole countdown instantly.
#[derive(Debug, Default)]
pub struct ImmediateTicks {
    pub fired: u64,
}

#[async_trait]
impl TickSource for ImmediateTicks {
    async fn next_tick(&mut self) {
        self.fired += 1;
    }
}

/// What the review step receives once the timer hands off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    pub topic: String,
    pub focused_minutes: u32,
}

/// Tick a running timer until it hands off to review.
///
/// Every emitted event is passed to `on_event`. Returns `None` without
/// ticking if the timer is idle or paused.
pub async fn run_to_handoff<T, F>(
    timer: &mut FocusTimer,
    ticks: &mut T,
    mut on_event: F,
) -> Option<Handoff>
where
    T: TickSource + ?Sized,
    F: FnMut(&Event),
{
    loop {
        match timer.status() {
            TimerStatus::Idle | TimerStatus::Paused => return None,
            TimerStatus::Expired if timer.is_handed_off() => return None,
            _ => {}
        }
        ticks.next_tick().await;
        if let Some(event) = timer.tick() {
            on_event(&event);
            if let Event::ReviewReady {
                topic,
                focused_minutes,
                ..
            } = event
            {
                return Some(Handoff {
                    topic,
                    focused_minutes,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn immediate_ticks_run_full_session() {
        let mut timer = FocusTimer::new(1500, 1);
        timer.start("Math").unwrap();
        let mut ticks = ImmediateTicks::default();
        let mut seen = Vec::new();

        let handoff = run_to_handoff(&mut timer, &mut ticks, |e| seen.push(e.clone()))
            .await
            .unwrap();

        assert_eq!(handoff.topic, "Math");
        assert_eq!(handoff.focused_minutes, 25);
        assert_eq!(ticks.fired, 1501);
        assert!(matches!(seen[0], Event::TimerExpired { .. }));
        assert!(matches!(seen[1], Event::ReviewReady { .. }));
    }

    #[tokio::test]
    async fn idle_timer_is_not_driven() {
        let mut timer = FocusTimer::new(60, 1);
        let mut ticks = ImmediateTicks::default();
        assert!(run_to_handoff(&mut timer, &mut ticks, |_| {}).await.is_none());
        assert_eq!(ticks.fired, 0);
    }

    #[tokio::test]
    async fn interval_ticks_wait_one_period() {
        let mut ticks = IntervalTicks::new(Duration::from_millis(5));
        let started = Instant::now();
        ticks.next_tick().await;
        assert!(started.elapsed() >= Duration::from_millis(5));
    }
}
