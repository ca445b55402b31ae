//! Tests for the scheduler's tick logic.

use std::time::Duration;

use mockall::predicate::eq;

use super::*;
use crate::{
    error::{MasonError, Result},
    models::{SlotObservation, SlotPosition},
    store::MemoryPlanStore,
    world::{MockActionActuator, MockWorldSensor},
};

/// Sensor and actuator mocks behind one world.
struct MockWorld {
    sensor: MockWorldSensor,
    actuator: MockActionActuator,
}

impl WorldSensor for MockWorld {
    fn current_level(&self, building: &str) -> Result<Level> {
        self.sensor.current_level(building)
    }

    fn remaining_action_time(&self, building: &str) -> Result<Duration> {
        self.sensor.remaining_action_time(building)
    }

    fn can_order(&self, building: &str, discounted: bool) -> Result<bool> {
        self.sensor.can_order(building, discounted)
    }

    fn has_active_construction(&self) -> Result<bool> {
        self.sensor.has_active_construction()
    }

    fn active_slots(&self) -> Result<Vec<SlotObservation>> {
        self.sensor.active_slots()
    }
}

impl ActionActuator for MockWorld {
    fn order(&mut self, building: &str, discounted: bool) -> Result<bool> {
        self.actuator.order(building, discounted)
    }

    fn apply_time_reduction(&mut self, target: ReductionTarget) -> Result<bool> {
        self.actuator.apply_time_reduction(target)
    }
}

/// A world with no construction running, no slots, and `building` at
/// `level` with both pathways open. The actuator expects nothing.
fn world_with_level(level: Level) -> MockWorld {
    let mut sensor = MockWorldSensor::new();
    sensor
        .expect_has_active_construction()
        .returning(|| Ok(false));
    sensor.expect_active_slots().returning(|| Ok(Vec::new()));
    sensor
        .expect_current_level()
        .returning(move |_| Ok(level));
    sensor
        .expect_remaining_action_time()
        .returning(|_| Ok(NEVER));
    sensor.expect_can_order().returning(|_, _| Ok(true));

    let mut actuator = MockActionActuator::new();
    actuator.expect_order().never();
    actuator.expect_apply_time_reduction().never();

    MockWorld { sensor, actuator }
}

fn wood_pit_plan() -> Plan {
    let mut plan = Plan::default();
    plan.push_goal(Goal::new("wood_pit", 5));
    plan
}

fn scheduler_with(plan: Plan) -> Scheduler<MemoryPlanStore> {
    Scheduler::new(MemoryPlanStore::with_plan(plan))
}

fn slot(position: SlotPosition, hours: u64) -> SlotObservation {
    SlotObservation {
        position,
        building: format!("building_{position}"),
        remaining: Duration::from_secs(hours * 3600),
    }
}

#[test]
fn test_goal_met_is_retired_without_ordering() {
    let mut scheduler = scheduler_with(wood_pit_plan());
    let mut world = world_with_level(Level::Known(5));

    let report = scheduler.tick(&mut world);

    assert_eq!(
        report.outcome,
        TickOutcome::Retired {
            goal: Goal::new("wood_pit", 5),
            level: 5
        }
    );
    assert_eq!(report.persistence, Persistence::Saved);
    assert!(scheduler.store().stored().unwrap().goals.is_empty());
    assert_eq!(scheduler.store().save_count(), 1);
}

#[test]
fn test_goal_exceeded_is_retired() {
    let mut scheduler = scheduler_with(wood_pit_plan());
    let mut world = world_with_level(Level::Known(9));

    let report = scheduler.tick(&mut world);

    assert!(report.retired_goal());
    assert!(!report.issued_order());
}

#[test]
fn test_below_target_orders_discounted_then_reduces() {
    let mut scheduler = scheduler_with(wood_pit_plan());
    let mut world = world_with_level(Level::Known(3));
    world.actuator.checkpoint();

    let mut seq = mockall::Sequence::new();
    world
        .actuator
        .expect_order()
        .withf(|building: &str, discounted: &bool| building == "wood_pit" && *discounted)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(true));
    world
        .actuator
        .expect_apply_time_reduction()
        .with(eq(ReductionTarget::Latest))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(true));

    let report = scheduler.tick(&mut world);

    match &report.outcome {
        TickOutcome::Ordered {
            goal,
            discounted,
            time_reduced,
            observation,
        } => {
            assert_eq!(goal, &Goal::new("wood_pit", 5));
            assert!(*discounted);
            assert!(*time_reduced);
            assert_eq!(observation.current_level, Level::Known(3));
        }
        other => panic!("expected an order, got {other:?}"),
    }
    assert_eq!(report.persistence, Persistence::Unchanged);
    assert_eq!(scheduler.store().save_count(), 0);
    assert_eq!(scheduler.store().load(), wood_pit_plan());
}

#[test]
fn test_standard_order_skips_time_reduction() {
    let mut plan = wood_pit_plan();
    plan.options.use_discount = false;
    let mut scheduler = scheduler_with(plan);
    let mut world = world_with_level(Level::Known(3));
    world.actuator.checkpoint();
    world
        .actuator
        .expect_order()
        .withf(|building: &str, discounted: &bool| building == "wood_pit" && !*discounted)
        .times(1)
        .returning(|_, _| Ok(true));
    world.actuator.expect_apply_time_reduction().never();

    let report = scheduler.tick(&mut world);

    assert!(matches!(
        report.outcome,
        TickOutcome::Ordered {
            discounted: false,
            time_reduced: false,
            ..
        }
    ));
}

#[test]
fn test_failed_follow_up_reduction_keeps_order() {
    let mut scheduler = scheduler_with(wood_pit_plan());
    let mut world = world_with_level(Level::Known(3));
    world.actuator.checkpoint();
    world
        .actuator
        .expect_order()
        .times(1)
        .returning(|_, _| Ok(true));
    world
        .actuator
        .expect_apply_time_reduction()
        .times(1)
        .returning(|_| {
            Err(MasonError::ActionRejected {
                entity: "wood_pit".to_string(),
                reason: "button vanished".to_string(),
            })
        });

    let report = scheduler.tick(&mut world);

    assert!(report.issued_order());
    assert!(matches!(
        report.outcome,
        TickOutcome::Ordered {
            time_reduced: false,
            ..
        }
    ));
}

#[test]
fn test_not_orderable_waits() {
    let mut scheduler = scheduler_with(wood_pit_plan());
    let mut world = world_with_level(Level::Known(3));
    world.sensor.checkpoint();
    world
        .sensor
        .expect_has_active_construction()
        .returning(|| Ok(false));
    world.sensor.expect_active_slots().returning(|| Ok(Vec::new()));
    world
        .sensor
        .expect_current_level()
        .returning(|_| Ok(Level::Known(3)));
    world
        .sensor
        .expect_remaining_action_time()
        .returning(|_| Ok(Duration::from_secs(120)));
    world
        .sensor
        .expect_can_order()
        .returning(|_, discounted| Ok(!discounted));

    let report = scheduler.tick(&mut world);

    assert!(matches!(report.outcome, TickOutcome::Waiting { .. }));
    assert!(report.finishing_soon);
    assert_eq!(scheduler.store().load(), wood_pit_plan());
}

#[test]
fn test_rejected_order_keeps_goal() {
    let mut scheduler = scheduler_with(wood_pit_plan());
    let mut world = world_with_level(Level::Known(3));
    world.actuator.checkpoint();
    world
        .actuator
        .expect_order()
        .times(1)
        .returning(|_, _| Ok(false));
    world.actuator.expect_apply_time_reduction().never();

    let report = scheduler.tick(&mut world);

    assert_eq!(
        report.outcome,
        TickOutcome::Rejected {
            goal: Goal::new("wood_pit", 5)
        }
    );
    assert_eq!(scheduler.store().load(), wood_pit_plan());
}

#[test]
fn test_unknown_level_is_left_alone() {
    let mut scheduler = scheduler_with(wood_pit_plan());
    let mut world = world_with_level(Level::Unknown);

    let report = scheduler.tick(&mut world);

    assert_eq!(
        report.outcome,
        TickOutcome::LevelUnknown {
            goal: Goal::new("wood_pit", 5)
        }
    );
    assert_eq!(report.persistence, Persistence::Unchanged);
    assert_eq!(scheduler.store().load(), wood_pit_plan());
    assert_eq!(scheduler.store().save_count(), 0);
}

#[test]
fn test_failed_level_read_counts_as_unknown() {
    let mut scheduler = scheduler_with(wood_pit_plan());
    let mut world = world_with_level(Level::Known(0));
    world.sensor.checkpoint();
    world
        .sensor
        .expect_has_active_construction()
        .returning(|| Ok(false));
    world.sensor.expect_active_slots().returning(|| Ok(Vec::new()));
    world
        .sensor
        .expect_current_level()
        .returning(|building| Err(MasonError::observation_gap(building, "row missing")));
    world
        .sensor
        .expect_remaining_action_time()
        .returning(|_| Ok(NEVER));
    world.sensor.expect_can_order().returning(|_, _| Ok(true));

    let report = scheduler.tick(&mut world);

    assert!(matches!(report.outcome, TickOutcome::LevelUnknown { .. }));
    assert_eq!(scheduler.store().load(), wood_pit_plan());
}

#[test]
fn test_active_construction_blocks_ordering() {
    let mut scheduler = scheduler_with(wood_pit_plan());
    let mut world = world_with_level(Level::Known(3));
    world.sensor.checkpoint();
    world
        .sensor
        .expect_has_active_construction()
        .returning(|| Ok(true));
    world.sensor.expect_active_slots().returning(|| Ok(Vec::new()));
    world.sensor.expect_current_level().never();

    let report = scheduler.tick(&mut world);

    assert_eq!(report.outcome, TickOutcome::Throttled);
    assert_eq!(report.action_count(), 0);
}

#[test]
fn test_active_construction_still_allows_long_build_pass() {
    let mut scheduler = scheduler_with(wood_pit_plan());
    let mut world = world_with_level(Level::Known(3));
    world.sensor.checkpoint();
    world.actuator.checkpoint();
    world
        .sensor
        .expect_has_active_construction()
        .returning(|| Ok(true));
    world
        .sensor
        .expect_active_slots()
        .returning(|| Ok(vec![slot(SlotPosition::First, 6)]));
    world.actuator.expect_order().never();
    world
        .actuator
        .expect_apply_time_reduction()
        .with(eq(ReductionTarget::Slot(SlotPosition::First)))
        .times(1)
        .returning(|_| Ok(true));

    let report = scheduler.tick(&mut world);

    assert_eq!(report.outcome, TickOutcome::Throttled);
    assert_eq!(report.long_build_reduction, Some(SlotPosition::First));
}

#[test]
fn test_long_build_pass_reduces_only_first_qualifying_slot() {
    let mut scheduler = scheduler_with(Plan::default());
    let mut world = world_with_level(Level::Known(3));
    world.sensor.checkpoint();
    world.actuator.checkpoint();
    world
        .sensor
        .expect_has_active_construction()
        .returning(|| Ok(false));
    world.sensor.expect_active_slots().returning(|| {
        Ok(vec![
            slot(SlotPosition::Second, 5),
            slot(SlotPosition::First, 3),
        ])
    });
    world
        .actuator
        .expect_apply_time_reduction()
        .with(eq(ReductionTarget::Slot(SlotPosition::First)))
        .times(1)
        .returning(|_| Ok(true));
    world
        .actuator
        .expect_apply_time_reduction()
        .with(eq(ReductionTarget::Slot(SlotPosition::Second)))
        .never();

    let report = scheduler.tick(&mut world);

    assert_eq!(report.long_build_reduction, Some(SlotPosition::First));
    assert_eq!(report.outcome, TickOutcome::Idle);
}

#[test]
fn test_long_build_pass_skips_short_builds() {
    let mut scheduler = scheduler_with(Plan::default());
    let mut world = world_with_level(Level::Known(3));
    world.sensor.checkpoint();
    world.actuator.checkpoint();
    world
        .sensor
        .expect_has_active_construction()
        .returning(|| Ok(false));
    world.sensor.expect_active_slots().returning(|| {
        Ok(vec![
            slot(SlotPosition::First, 1),
            slot(SlotPosition::Second, 4),
        ])
    });
    world
        .actuator
        .expect_apply_time_reduction()
        .with(eq(ReductionTarget::Slot(SlotPosition::Second)))
        .times(1)
        .returning(|_| Ok(true));

    let report = scheduler.tick(&mut world);

    assert_eq!(report.long_build_reduction, Some(SlotPosition::Second));
}

#[test]
fn test_long_build_pass_moves_on_when_control_missing() {
    let mut scheduler = scheduler_with(Plan::default());
    let mut world = world_with_level(Level::Known(3));
    world.sensor.checkpoint();
    world.actuator.checkpoint();
    world
        .sensor
        .expect_has_active_construction()
        .returning(|| Ok(false));
    world.sensor.expect_active_slots().returning(|| {
        Ok(vec![
            slot(SlotPosition::First, 3),
            slot(SlotPosition::Second, 5),
        ])
    });
    world
        .actuator
        .expect_apply_time_reduction()
        .with(eq(ReductionTarget::Slot(SlotPosition::First)))
        .times(1)
        .returning(|_| Ok(false));
    world
        .actuator
        .expect_apply_time_reduction()
        .with(eq(ReductionTarget::Slot(SlotPosition::Second)))
        .times(1)
        .returning(|_| Ok(true));

    let report = scheduler.tick(&mut world);

    assert_eq!(report.long_build_reduction, Some(SlotPosition::Second));
}

#[test]
fn test_long_build_pass_disabled() {
    let mut plan = Plan::default();
    plan.options.use_long_build_reduction = false;
    let mut scheduler = scheduler_with(plan);
    let mut world = world_with_level(Level::Known(3));
    world.sensor.checkpoint();
    world
        .sensor
        .expect_has_active_construction()
        .returning(|| Ok(false));
    world.sensor.expect_active_slots().never();

    let report = scheduler.tick(&mut world);

    assert_eq!(report.long_build_reduction, None);
    assert_eq!(report.outcome, TickOutcome::Idle);
}

#[test]
fn test_save_failure_keeps_decision() {
    let mut store = MemoryPlanStore::with_plan(wood_pit_plan());
    store.fail_saves(true);
    let mut scheduler = Scheduler::new(store);
    let mut world = world_with_level(Level::Known(5));

    let report = scheduler.tick(&mut world);

    assert!(report.retired_goal());
    assert_eq!(report.persistence, Persistence::Failed);
    // Nothing was written, so the next tick sees the goal again and retires
    // it again
    assert_eq!(scheduler.store().load(), wood_pit_plan());
}

#[test]
fn test_sequence_only_shrinks_across_ticks() {
    let mut plan = wood_pit_plan();
    plan.push_goal(Goal::new("wood_pit", 6));
    plan.push_goal(Goal::new("clay_pit", 2));
    let mut scheduler = scheduler_with(plan);
    let mut world = world_with_level(Level::Known(6));
    world.sensor.checkpoint();
    world
        .sensor
        .expect_has_active_construction()
        .returning(|| Ok(false));
    world.sensor.expect_active_slots().returning(|| Ok(Vec::new()));
    world
        .sensor
        .expect_current_level()
        .returning(|building| {
            Ok(if building == "wood_pit" {
                Level::Known(6)
            } else {
                Level::Unknown
            })
        });
    world
        .sensor
        .expect_remaining_action_time()
        .returning(|_| Ok(NEVER));
    world.sensor.expect_can_order().returning(|_, _| Ok(false));

    let mut lengths = vec![scheduler.store().load().goals.len()];
    for _ in 0..4 {
        scheduler.tick(&mut world);
        lengths.push(scheduler.store().load().goals.len());
    }

    assert_eq!(lengths, vec![3, 2, 1, 1, 1]);
    assert!(lengths.windows(2).all(|pair| pair[1] <= pair[0]));
}
