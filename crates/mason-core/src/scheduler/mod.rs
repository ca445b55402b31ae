//! The per-tick decision core.
//!
//! A tick runs four steps in a fixed order:
//!
//! ```text
//! long-build pass ─▶ throttle check ─▶ retirement ─▶ ordering
//! ```
//!
//! 1. **Long-build pass**: if enabled, the first in-progress slot (in finish
//!    order) whose remaining time exceeds the threshold gets one non-instant
//!    time reduction. At most one reduction per tick.
//! 2. **Throttle**: while the world reports an outstanding construction
//!    order, the tick ends. This is what keeps an order whose effect is not
//!    yet visible from being issued twice.
//! 3. **Retirement**: if the active goal is met it is removed, the plan is
//!    saved, and the tick ends without ordering so the next goal is judged
//!    against a fresh observation.
//! 4. **Ordering**: otherwise the active goal is ordered through the
//!    configured pathway, followed by a time reduction on the new order when
//!    the discount option is on.
//!
//! Sensor and actuator failures never abort a tick: a failed read counts as
//! "absent" and a failed action as "not done". Nothing is retried within a
//! tick; the driver's cadence is the retry mechanism.

use std::{fmt::Display, time::Duration};

use jiff::Timestamp;
use log::{debug, info, warn};

use crate::{
    models::{BuildOptions, EntityObservation, Goal, Level, Plan, SlotPosition, NEVER},
    store::PlanStore,
    world::{ActionActuator, ReductionTarget, WorldSensor},
};

pub mod report;

#[cfg(test)]
mod tests;

pub use report::{Persistence, TickOutcome, TickReport};

/// Default look-ahead for "the active building finishes soon".
pub const DEFAULT_SOON_WINDOW: Duration = Duration::from_secs(10 * 60);

/// Sequential construction scheduler over one plan store.
pub struct Scheduler<S> {
    store: S,
    soon_window: Duration,
}

impl<S: PlanStore> Scheduler<S> {
    /// Creates a scheduler persisting through `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            soon_window: DEFAULT_SOON_WINDOW,
        }
    }

    /// Sets the look-ahead window reported as `finishing_soon`.
    pub fn with_soon_window(mut self, window: Duration) -> Self {
        self.soon_window = window;
        self
    }

    /// The underlying plan store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the scheduler, returning its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Runs one tick against a freshly observed world.
    pub fn tick<W>(&mut self, world: &mut W) -> TickReport
    where
        W: WorldSensor + ActionActuator + ?Sized,
    {
        let started_at = Timestamp::now();
        let mut plan = self.store.load();

        let long_build_reduction = reduce_long_builds(&plan.options, world);
        let outcome = self.advance(&mut plan, world);

        let persistence = match &outcome {
            TickOutcome::Retired { .. } => self.persist(&plan),
            _ => Persistence::Unchanged,
        };
        let finishing_soon = match &outcome {
            TickOutcome::Waiting { observation, .. } | TickOutcome::Ordered { observation, .. } => {
                observation.finishes_within(self.soon_window)
            }
            _ => false,
        };

        let report = TickReport {
            started_at,
            long_build_reduction,
            outcome,
            persistence,
            finishing_soon,
        };
        debug!("Tick finished: {:?}", report.outcome);
        report
    }

    /// Throttle, retirement and ordering.
    fn advance<W>(&self, plan: &mut Plan, world: &mut W) -> TickOutcome
    where
        W: WorldSensor + ActionActuator + ?Sized,
    {
        if sense(
            "construction check",
            world.has_active_construction(),
            false,
        ) {
            info!("Construction in progress, not ordering");
            return TickOutcome::Throttled;
        }

        let Some(goal) = plan.active_goal().cloned() else {
            debug!("Build sequence is empty");
            return TickOutcome::Idle;
        };

        let observation = observe(&*world, &goal.building);
        let level = match observation.current_level {
            Level::Known(level) => level,
            Level::Unknown => {
                warn!(
                    "Level of '{}' is unknown, skipping this tick",
                    goal.building
                );
                return TickOutcome::LevelUnknown { goal };
            }
        };

        if goal.is_satisfied_by(level) {
            plan.retire(&goal);
            info!(
                "'{}' reached level {level} (target {}), goal retired",
                goal.building, goal.target_level
            );
            return TickOutcome::Retired { goal, level };
        }

        let discounted = plan.options.use_discount;
        if !observation.can_order(discounted) {
            debug!(
                "'{}' at level {level} cannot be ordered ({}) yet",
                goal.building,
                pathway(discounted)
            );
            return TickOutcome::Waiting { goal, observation };
        }

        if !act(
            &format!("{} order for '{}'", pathway(discounted), goal.building),
            world.order(&goal.building, discounted),
        ) {
            return TickOutcome::Rejected { goal };
        }
        info!(
            "Ordered '{}' level {} ({})",
            goal.building,
            level + 1,
            pathway(discounted)
        );

        let time_reduced = discounted
            && act(
                "time reduction on the new order",
                world.apply_time_reduction(ReductionTarget::Latest),
            );

        TickOutcome::Ordered {
            goal,
            discounted,
            time_reduced,
            observation,
        }
    }

    fn persist(&mut self, plan: &Plan) -> Persistence {
        match self.store.save(plan) {
            Ok(()) => Persistence::Saved,
            Err(e) => {
                warn!("Could not save plan, keeping this tick's decision: {e}");
                Persistence::Failed
            }
        }
    }
}

/// Spends at most one reduction on the first slot running past the
/// threshold. A qualifying slot without a usable control does not use up the
/// pass.
fn reduce_long_builds<W>(options: &BuildOptions, world: &mut W) -> Option<SlotPosition>
where
    W: WorldSensor + ActionActuator + ?Sized,
{
    if !options.use_long_build_reduction {
        return None;
    }

    let mut slots = sense("slot query", world.active_slots(), Vec::new());
    slots.sort_by_key(|slot| slot.position);

    for slot in slots {
        if !options.is_long_build(slot.remaining) {
            continue;
        }
        let target = ReductionTarget::Slot(slot.position);
        if act(
            &format!("long-build reduction on {target} ('{}')", slot.building),
            world.apply_time_reduction(target),
        ) {
            info!(
                "Reduced long build of '{}' in slot {} ({:.1}h left)",
                slot.building,
                slot.position,
                slot.remaining.as_secs_f64() / 3600.0
            );
            return Some(slot.position);
        }
    }
    None
}

/// Reads everything about one building, degrading failed reads.
fn observe<W>(world: &W, building: &str) -> EntityObservation
where
    W: WorldSensor + ?Sized,
{
    EntityObservation {
        building: building.to_string(),
        current_level: sense("level query", world.current_level(building), Level::Unknown),
        remaining: sense("timer query", world.remaining_action_time(building), NEVER),
        can_order_discounted: sense(
            "discounted order check",
            world.can_order(building, true),
            false,
        ),
        can_order_standard: sense(
            "standard order check",
            world.can_order(building, false),
            false,
        ),
    }
}

fn sense<T, E: Display>(what: &str, result: Result<T, E>, absent: T) -> T {
    result.unwrap_or_else(|e| {
        warn!("{what} failed, treating as absent: {e}");
        absent
    })
}

fn act<E: Display>(what: &str, result: Result<bool, E>) -> bool {
    match result {
        Ok(true) => true,
        Ok(false) => {
            debug!("{what}: no eligible control");
            false
        }
        Err(e) => {
            warn!("{what} failed: {e}");
            false
        }
    }
}

fn pathway(discounted: bool) -> &'static str {
    if discounted {
        "discounted"
    } else {
        "standard"
    }
}
