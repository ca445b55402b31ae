//! Serialised construction-screen snapshot.
//!
//! A host that renders the game page extracts the facts the scheduler needs
//! into this structure and hands it over as JSON. Field names are camelCase.
//!
//! ```json
//! {
//!   "constructionBlocked": false,
//!   "buildings": [
//!     {
//!       "id": "wood_pit",
//!       "name": "Timber camp",
//!       "levelLabel": "Level 3",
//!       "nextLevel": 4,
//!       "timer": "0:41:10",
//!       "standard": { "href": "/game.php?screen=main&action=upgrade_building&id=wood_pit" },
//!       "discounted": { "href": "/game.php?screen=main&action=upgrade_building&id=wood_pit&type=cheap" }
//!     }
//!   ],
//!   "queue": [
//!     { "position": 1, "building": "clay_pit", "remaining": "3:10:00",
//!       "reductions": [{ "href": "/game.php?screen=main&action=btr&id=17" }] }
//!   ]
//! }
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The construction screen as observed at one instant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    /// The page reports an outstanding top-level construction order that
    /// blocks new orders
    #[serde(default)]
    pub construction_blocked: bool,

    /// Building rows, in page order
    #[serde(default)]
    pub buildings: Vec<BuildingRow>,

    /// In-progress orders
    #[serde(default)]
    pub queue: Vec<QueueEntry>,
}

/// One row of the building table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BuildingRow {
    pub id: String,
    pub name: String,
    /// Level text as displayed next to the name, e.g. `Level 3`
    #[serde(default)]
    pub level_label: Option<String>,
    /// The level the standard order control would upgrade to
    #[serde(default)]
    pub next_level: Option<u32>,
    /// Timer column text (`H:MM:SS`); absent when the row has no timer cell
    #[serde(default)]
    pub timer: Option<String>,
    /// The row says the building is fully upgraded
    #[serde(default)]
    pub fully_upgraded: bool,
    #[serde(default)]
    pub standard: Option<OrderControl>,
    #[serde(default)]
    pub discounted: Option<OrderControl>,
}

/// An order button.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderControl {
    #[serde(default)]
    pub href: String,
    /// The control sits inside the row's build-options cell
    #[serde(default = "default_true")]
    pub in_build_options: bool,
    #[serde(default)]
    pub disabled: bool,
}

/// An in-progress order in the construction queue.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    /// 1-based position in finish order
    pub position: u8,
    pub building: String,
    /// Remaining duration text (`H:MM:SS`)
    pub remaining: String,
    #[serde(default)]
    pub reductions: Vec<ReductionControl>,
}

/// A build-time reduction button on a queue entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReductionControl {
    pub href: String,
    /// Completes the order immediately instead of shortening it
    #[serde(default)]
    pub instant: bool,
}

/// A building as offered to the configuration surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EntityListing {
    pub id: String,
    pub display_name: String,
    pub current_level_label: String,
}

impl EntityListing {
    /// Numeric level read from the label; labels without digits count as 0.
    pub fn current_level(&self) -> u32 {
        let digits: String = self
            .current_level_label
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        digits.parse().unwrap_or(0)
    }
}

fn default_true() -> bool {
    true
}

impl PageSnapshot {
    /// Parses a snapshot from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The row of a building, if it is listed.
    pub fn row(&self, building: &str) -> Option<&BuildingRow> {
        self.buildings.iter().find(|row| row.id == building)
    }

    /// Buildings that can still be planned, for the configuration surface.
    /// Fully upgraded buildings are left out.
    pub fn entities(&self) -> Vec<EntityListing> {
        self.buildings
            .iter()
            .filter(|row| !row.fully_upgraded && !row.id.is_empty())
            .map(|row| EntityListing {
                id: row.id.clone(),
                display_name: row.name.clone(),
                current_level_label: row
                    .level_label
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string()),
            })
            .collect()
    }
}

/// Parses `H:MM:SS` (hours may exceed 24) into a duration.
pub fn parse_clock(text: &str) -> Option<Duration> {
    let mut parts = text.trim().split(':').map(|part| part.trim().parse::<u64>());
    let (Some(Ok(hours)), Some(Ok(minutes)), Some(Ok(seconds)), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    if minutes >= 60 || seconds >= 60 {
        return None;
    }
    let secs = hours.checked_mul(3600)?.checked_add(minutes * 60 + seconds)?;
    Some(Duration::from_secs(secs))
}
