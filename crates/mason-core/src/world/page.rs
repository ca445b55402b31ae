//! Sensor and actuator over a page snapshot.

use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{
    snapshot::{parse_clock, OrderControl, PageSnapshot},
    ActionActuator, ReductionTarget, WorldSensor,
};
use crate::{
    error::{MasonError, Result},
    models::{Level, SlotObservation, SlotPosition, NEVER},
};

/// Marker that distinguishes discounted order links from standard ones.
const DISCOUNT_MARKER: &str = "cheap";

/// A navigation the host must perform on the page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PageAction {
    /// Open an order link
    Order {
        building: String,
        discounted: bool,
        href: String,
    },
    /// Follow a reduction link on an existing queue entry
    Reduce {
        #[serde(skip_serializing_if = "Option::is_none")]
        slot: Option<SlotPosition>,
        href: String,
    },
    /// After the preceding order has loaded, press the newest reduction
    /// control on the page
    ReduceLatestAfterLoad,
}

/// A world backed by one page snapshot.
///
/// Reads come straight from the snapshot. Actions are not performed here;
/// they are collected as [`PageAction`]s for the host to carry out. At most
/// one order can be collected, because following an order link leaves the
/// page.
#[derive(Debug, Clone, Default)]
pub struct SnapshotWorld {
    page: PageSnapshot,
    actions: Vec<PageAction>,
    order_pending: bool,
}

impl SnapshotWorld {
    /// Wraps a snapshot.
    pub fn new(page: PageSnapshot) -> Self {
        Self {
            page,
            actions: Vec::new(),
            order_pending: false,
        }
    }

    /// The snapshot being observed.
    pub fn page(&self) -> &PageSnapshot {
        &self.page
    }

    /// Actions collected so far, in the order they must be performed.
    pub fn actions(&self) -> &[PageAction] {
        &self.actions
    }

    /// Drains the collected actions.
    pub fn take_actions(&mut self) -> Vec<PageAction> {
        self.order_pending = false;
        std::mem::take(&mut self.actions)
    }

    fn order_control(&self, building: &str, discounted: bool) -> Option<&OrderControl> {
        let row = self.page.row(building)?;
        if discounted {
            row.discounted.as_ref()
        } else {
            row.standard.as_ref()
        }
    }
}

/// A real link on the requested pathway whose control is enabled and sits
/// inside the build options.
fn is_orderable(control: &OrderControl, discounted: bool) -> bool {
    let href = control.href.trim();
    let has_link = !href.is_empty() && href != "#";
    let on_pathway = href.contains(DISCOUNT_MARKER) == discounted;
    has_link && on_pathway && control.in_build_options && !control.disabled
}

impl WorldSensor for SnapshotWorld {
    fn current_level(&self, building: &str) -> Result<Level> {
        Ok(self
            .page
            .row(building)
            .and_then(|row| row.next_level)
            .map_or(Level::Unknown, |next| Level::Known(next.saturating_sub(1))))
    }

    fn remaining_action_time(&self, building: &str) -> Result<Duration> {
        let Some(timer) = self.page.row(building).and_then(|row| row.timer.as_deref()) else {
            return Ok(NEVER);
        };
        if timer.trim().is_empty() {
            return Ok(Duration::ZERO);
        }
        parse_clock(timer).ok_or_else(|| {
            MasonError::observation_gap(building, format!("timer text '{timer}' is not a clock"))
        })
    }

    fn can_order(&self, building: &str, discounted: bool) -> Result<bool> {
        Ok(self
            .order_control(building, discounted)
            .is_some_and(|control| is_orderable(control, discounted)))
    }

    fn has_active_construction(&self) -> Result<bool> {
        Ok(self.page.construction_blocked)
    }

    fn active_slots(&self) -> Result<Vec<SlotObservation>> {
        let mut slots: Vec<SlotObservation> = self
            .page
            .queue
            .iter()
            .filter_map(|entry| {
                let position = SlotPosition::try_from(entry.position).ok()?;
                let Some(remaining) = parse_clock(&entry.remaining) else {
                    debug!(
                        "Skipping queue entry {} ({}): unreadable duration '{}'",
                        entry.position, entry.building, entry.remaining
                    );
                    return None;
                };
                Some(SlotObservation {
                    position,
                    building: entry.building.clone(),
                    remaining,
                })
            })
            .collect();
        slots.sort_by_key(|slot| slot.position);
        slots.dedup_by_key(|slot| slot.position);
        Ok(slots)
    }
}

impl ActionActuator for SnapshotWorld {
    fn order(&mut self, building: &str, discounted: bool) -> Result<bool> {
        if self.order_pending {
            return Err(MasonError::ActionRejected {
                entity: building.to_string(),
                reason: "another order is already waiting for navigation".to_string(),
            });
        }
        let Some(control) = self
            .order_control(building, discounted)
            .filter(|control| is_orderable(control, discounted))
        else {
            return Ok(false);
        };

        let href = control.href.clone();
        self.actions.push(PageAction::Order {
            building: building.to_string(),
            discounted,
            href,
        });
        self.order_pending = true;
        Ok(true)
    }

    fn apply_time_reduction(&mut self, target: ReductionTarget) -> Result<bool> {
        let action = match target {
            // The new order's control only exists once its page has loaded
            ReductionTarget::Latest if self.order_pending => Some(PageAction::ReduceLatestAfterLoad),
            ReductionTarget::Latest => self
                .page
                .queue
                .iter()
                .flat_map(|entry| entry.reductions.iter())
                .last()
                .map(|control| PageAction::Reduce {
                    slot: None,
                    href: control.href.clone(),
                }),
            ReductionTarget::Slot(position) => self
                .page
                .queue
                .iter()
                .find(|entry| entry.position == position.number())
                .and_then(|entry| entry.reductions.iter().find(|control| !control.instant))
                .map(|control| PageAction::Reduce {
                    slot: Some(position),
                    href: control.href.clone(),
                }),
        };

        match action {
            Some(action) => {
                self.actions.push(action);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
