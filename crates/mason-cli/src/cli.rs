//! Command-line argument wrappers using clap
//!
//! Each wrapper carries the clap-specific attributes and converts into the
//! framework-free parameter type of `mason_core::params`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → PlanEditor
//! ```

use std::{path::PathBuf, time::Duration};

use clap::{Args, Subcommand, ValueEnum};
use mason_core::{
    driver::{DEFAULT_INTERVAL, DEFAULT_RETIRE_DELAY, DEFAULT_SETTLE_DELAY},
    params::*,
    DriverSettings, MoveDirection,
};

/// Append a goal to the build sequence
#[derive(Args)]
pub struct AddGoalArgs {
    /// Building identifier, as listed by `mason buildings`
    pub building: String,
    /// Level to upgrade the building to
    pub target_level: u32,
    /// Current level of the building; targets at or below it are rejected
    #[arg(long, conflicts_with = "snapshot")]
    pub current_level: Option<u32>,
    /// Page snapshot to check the building against and read its current
    /// level from
    #[arg(long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,
}

impl From<AddGoalArgs> for AddGoal {
    fn from(val: AddGoalArgs) -> Self {
        AddGoal {
            building: val.building,
            target_level: val.target_level,
            current_level: val.current_level,
        }
    }
}

/// Insert a goal at a position in the build sequence
///
/// Positions are 1-based. Goals at or after the position move back by one;
/// one past the last position appends.
#[derive(Args)]
pub struct InsertGoalArgs {
    #[arg(help = "1-based position to insert at")]
    pub position: usize,
    /// Building identifier
    pub building: String,
    /// Level to upgrade the building to
    pub target_level: u32,
    /// Current level of the building; targets at or below it are rejected
    #[arg(long, conflicts_with = "snapshot")]
    pub current_level: Option<u32>,
    /// Page snapshot to check the building against
    #[arg(long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,
}

impl From<InsertGoalArgs> for InsertGoal {
    fn from(val: InsertGoalArgs) -> Self {
        InsertGoal {
            goal: AddGoal {
                building: val.building,
                target_level: val.target_level,
                current_level: val.current_level,
            },
            position: val.position,
        }
    }
}

/// Address a goal by its position
#[derive(Args)]
pub struct PositionArgs {
    #[arg(help = "1-based position in the build sequence")]
    pub position: usize,
}

impl From<PositionArgs> for Position {
    fn from(val: PositionArgs) -> Self {
        Position {
            position: val.position,
        }
    }
}

/// Move a goal one place up or down
#[derive(Args)]
pub struct MoveGoalArgs {
    #[arg(help = "1-based position of the goal to move")]
    pub position: usize,
    #[arg(value_enum, help = "Direction to move the goal in")]
    pub direction: DirectionArg,
}

impl From<MoveGoalArgs> for MoveGoal {
    fn from(val: MoveGoalArgs) -> Self {
        MoveGoal {
            position: val.position,
            direction: val.direction.into(),
        }
    }
}

/// Swap two goals
#[derive(Args)]
pub struct SwapGoalsArgs {
    #[arg(help = "1-based position of the first goal")]
    pub first: usize,
    #[arg(help = "1-based position of the second goal")]
    pub second: usize,
}

impl From<SwapGoalsArgs> for SwapGoals {
    fn from(val: SwapGoalsArgs) -> Self {
        SwapGoals {
            first: val.first,
            second: val.second,
        }
    }
}

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Append a goal to the build sequence
    #[command(alias = "a")]
    Add(AddGoalArgs),
    /// Insert a goal at a position
    #[command(alias = "i")]
    Insert(InsertGoalArgs),
    /// Remove the goal at a position
    #[command(aliases = ["rm", "d"])]
    Remove(PositionArgs),
    /// Move a goal one place up or down
    #[command(alias = "m")]
    Move(MoveGoalArgs),
    /// Swap two goals
    #[command(alias = "sw")]
    Swap(SwapGoalsArgs),
    /// Remove every goal, keeping the options
    Clear,
    /// Show the build sequence and options
    #[command(aliases = ["l", "ls"])]
    List,
}

/// Change the long-build reduction settings
#[derive(Args)]
pub struct LongBuildArgs {
    /// Turn the long-build reduction on
    #[arg(long, conflicts_with = "disable")]
    pub enable: bool,
    /// Turn the long-build reduction off
    #[arg(long)]
    pub disable: bool,
    /// Remaining build time in hours above which an order counts as long
    /// (at least 0.5)
    #[arg(long)]
    pub threshold: Option<f64>,
}

impl From<LongBuildArgs> for SetLongBuild {
    fn from(val: LongBuildArgs) -> Self {
        let enabled = match (val.enable, val.disable) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        SetLongBuild {
            enabled,
            threshold_hours: val.threshold,
        }
    }
}

#[derive(Subcommand)]
pub enum OptionCommands {
    /// Order through the discounted pathway (on) or the standard one (off)
    Discount {
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Change the long-build reduction flag and threshold
    #[command(name = "long-build")]
    LongBuild(LongBuildArgs),
    /// Show the current options
    Show,
}

/// Read the construction screen from a page snapshot
#[derive(Args)]
pub struct SnapshotArgs {
    /// JSON snapshot of the construction screen
    #[arg(long)]
    pub snapshot: PathBuf,
}

/// Tick repeatedly against a page snapshot
///
/// The snapshot is re-read before every tick; page actions are written to
/// standard output as JSON lines.
#[derive(Args)]
pub struct RunArgs {
    /// JSON snapshot of the construction screen
    #[arg(long)]
    pub snapshot: PathBuf,
    /// Seconds to wait after a tick that neither ordered nor retired
    #[arg(long, default_value_t = DEFAULT_INTERVAL.as_secs())]
    pub interval_secs: u64,
    /// Milliseconds to wait after a tick that issued an order
    #[arg(long, default_value_t = millis(DEFAULT_SETTLE_DELAY))]
    pub settle_ms: u64,
    /// Milliseconds to wait after a tick that retired a goal
    #[arg(long, default_value_t = millis(DEFAULT_RETIRE_DELAY))]
    pub retire_delay_ms: u64,
    /// Stop after this many ticks
    #[arg(long)]
    pub max_ticks: Option<u64>,
}

impl From<&RunArgs> for DriverSettings {
    fn from(val: &RunArgs) -> Self {
        DriverSettings {
            interval: Duration::from_secs(val.interval_secs),
            settle_delay: Duration::from_millis(val.settle_ms),
            retire_delay: Duration::from_millis(val.retire_delay_ms),
            max_ticks: val.max_ticks,
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// On/off switch argument
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl From<Toggle> for bool {
    fn from(val: Toggle) -> Self {
        val == Toggle::On
    }
}

/// Direction argument for `goal move`
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    Up,
    Down,
}

impl From<DirectionArg> for MoveDirection {
    fn from(val: DirectionArg) -> Self {
        match val {
            DirectionArg::Up => MoveDirection::Up,
            DirectionArg::Down => MoveDirection::Down,
        }
    }
}
