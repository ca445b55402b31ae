//! Repeated tick execution.
//!
//! The [`Driver`] owns a [`Scheduler`] and a [`WorldSource`] and runs
//! `refresh → tick → settle → wait` until it is told to stop. How long it
//! waits depends on what the tick did: a short settle delay after an order, a
//! longer delay after a retirement so the page can reload, the regular
//! interval otherwise.
//!
//! Ticks never overlap. The next tick starts only after the previous one has
//! settled and its wait has elapsed.

use std::{future::Future, time::Duration};

use log::{debug, info, warn};

use crate::{
    error::Result,
    scheduler::{Scheduler, TickReport},
    store::PlanStore,
    world::{PageAction, WorldSource},
};

/// Wait after a tick that neither ordered nor retired.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Wait after a tick that issued an order.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Wait after a tick that retired a goal.
pub const DEFAULT_RETIRE_DELAY: Duration = Duration::from_millis(2000);

/// Timing and bounds of a driver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverSettings {
    pub interval: Duration,
    pub settle_delay: Duration,
    pub retire_delay: Duration,
    /// Stop after this many attempted ticks; run until shutdown when `None`
    pub max_ticks: Option<u64>,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            settle_delay: DEFAULT_SETTLE_DELAY,
            retire_delay: DEFAULT_RETIRE_DELAY,
            max_ticks: None,
        }
    }
}

impl DriverSettings {
    /// How long to wait before the tick after `report`.
    pub fn pause_after(&self, report: &TickReport) -> Duration {
        if report.retired_goal() {
            self.retire_delay
        } else if report.issued_order() {
            self.settle_delay
        } else {
            self.interval
        }
    }
}

/// Totals of a finished driver run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverSummary {
    /// Ticks that ran against a refreshed world
    pub ticks: u64,
    /// Ticks skipped because the world could not be refreshed
    pub skipped: u64,
    pub orders: u64,
    pub retirements: u64,
}

impl DriverSummary {
    fn attempts(&self) -> u64 {
        self.ticks + self.skipped
    }

    fn record(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.orders += u64::from(report.issued_order());
        self.retirements += u64::from(report.retired_goal());
    }
}

/// Runs the scheduler against a world source on a timer.
pub struct Driver<S, W> {
    scheduler: Scheduler<S>,
    source: W,
    settings: DriverSettings,
}

impl<S: PlanStore, W: WorldSource> Driver<S, W> {
    /// Creates a driver.
    pub fn new(scheduler: Scheduler<S>, source: W, settings: DriverSettings) -> Self {
        Self {
            scheduler,
            source,
            settings,
        }
    }

    /// The driver's timing settings.
    pub fn settings(&self) -> &DriverSettings {
        &self.settings
    }

    /// The scheduler being driven.
    pub fn scheduler(&self) -> &Scheduler<S> {
        &self.scheduler
    }

    /// Consumes the driver, returning the scheduler and the world source.
    pub fn into_parts(self) -> (Scheduler<S>, W) {
        (self.scheduler, self.source)
    }

    /// Refreshes the world, runs a single tick and hands the resulting page
    /// actions back to the source.
    ///
    /// # Errors
    ///
    /// Fails when the world cannot be refreshed or the actions cannot be
    /// settled. The tick itself never fails.
    pub fn tick_once(&mut self) -> Result<(TickReport, Vec<PageAction>)> {
        let mut world = self.source.refresh()?;
        let report = self.scheduler.tick(&mut world);
        let actions = self.source.settle(world)?;
        Ok((report, actions))
    }

    /// Runs until Ctrl-C or until `max_ticks` is reached.
    pub async fn run<F>(&mut self, on_tick: F) -> DriverSummary
    where
        F: FnMut(&TickReport, &[PageAction]),
    {
        self.run_until(
            async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!("Could not listen for Ctrl-C: {e}");
                    std::future::pending::<()>().await;
                }
            },
            on_tick,
        )
        .await
    }

    /// Runs until `shutdown` completes or until `max_ticks` is reached.
    ///
    /// `on_tick` sees every completed tick together with the page actions it
    /// produced.
    pub async fn run_until<Sd, F>(&mut self, shutdown: Sd, mut on_tick: F) -> DriverSummary
    where
        Sd: Future<Output = ()>,
        F: FnMut(&TickReport, &[PageAction]),
    {
        tokio::pin!(shutdown);
        let mut summary = DriverSummary::default();

        loop {
            let pause = match self.tick_once() {
                Ok((report, actions)) => {
                    summary.record(&report);
                    on_tick(&report, &actions);
                    self.settings.pause_after(&report)
                }
                Err(e) => {
                    warn!("Skipping tick: {e}");
                    summary.skipped += 1;
                    self.settings.interval
                }
            };

            if self
                .settings
                .max_ticks
                .is_some_and(|max| summary.attempts() >= max)
            {
                debug!("Reached {} ticks, stopping", summary.attempts());
                break;
            }

            debug!("Next tick in {pause:?}");
            tokio::select! {
                () = tokio::time::sleep(pause) => {}
                () = &mut shutdown => {
                    info!("Shutdown requested, stopping");
                    break;
                }
            }
        }

        info!(
            "Driver stopped after {} ticks ({} orders, {} retirements, {} skipped)",
            summary.ticks, summary.orders, summary.retirements, summary.skipped
        );
        summary
    }
}
