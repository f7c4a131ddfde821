//! Periodic tick tasks.
//!
//! Each [`Ticker`] owns one tokio task that sends [`AppEvent::Tick`] at a
//! fixed period. Dropping the handle aborts the task, so a ticker lives
//! exactly as long as the counter that needs it.

use std::collections::HashMap;
use std::time::Duration;

use stage_clock_core::TickSource;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::event::AppEvent;

pub struct Ticker {
    source: TickSource,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Start sending ticks for `source`. The first tick arrives one
    /// `period` from now.
    pub fn spawn(source: TickSource, period: Duration, tx: UnboundedSender<AppEvent>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if tx.send(AppEvent::Tick(source)).is_err() {
                    break;
                }
            }
        });
        debug!(?source, period_ms = period.as_millis() as u64, "ticker started");
        Self { source, handle }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
        debug!(source = ?self.source, "ticker cancelled");
    }
}

/// Firing period per tick source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickPeriods {
    pub wall: Duration,
    pub timer: Duration,
    pub stopwatch: Duration,
}

impl Default for TickPeriods {
    fn default() -> Self {
        Self {
            wall: TickSource::Wall.default_period(),
            timer: TickSource::Timer.default_period(),
            stopwatch: TickSource::Stopwatch.default_period(),
        }
    }
}

impl TickPeriods {
    pub fn period(&self, source: TickSource) -> Duration {
        match source {
            TickSource::Wall => self.wall,
            TickSource::Timer => self.timer,
            TickSource::Stopwatch => self.stopwatch,
        }
    }
}

/// The set of live tickers, kept in line with what the engine wants.
pub struct Tickers {
    live: HashMap<TickSource, Ticker>,
    periods: TickPeriods,
    tx: UnboundedSender<AppEvent>,
}

impl Tickers {
    pub fn new(periods: TickPeriods, tx: UnboundedSender<AppEvent>) -> Self {
        Self {
            live: HashMap::new(),
            periods,
            tx,
        }
    }

    /// Cancel tickers not in `wanted` and start the missing ones. Tickers
    /// that stay wanted keep their phase.
    pub fn reconcile(&mut self, wanted: &[TickSource]) {
        self.live.retain(|source, _| wanted.contains(source));
        for &source in wanted {
            let period = self.periods.period(source);
            let tx = &self.tx;
            self.live
                .entry(source)
                .or_insert_with(|| Ticker::spawn(source, period, tx.clone()));
        }
    }

    #[cfg(test)]
    fn is_live(&self, source: TickSource) -> bool {
        self.live.contains_key(&source)
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.live.clear();
    }
}
