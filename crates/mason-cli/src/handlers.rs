//! Command handlers for the Mason CLI.

use std::{io, path::Path};

use anyhow::{Context, Result};
use log::{info, warn};
use mason_core::{
    params::{AddGoal, InsertGoal, Position, SetLongBuild},
    world::PageSnapshot,
    Contexts, CreateResult, DeleteResult, Driver, DriverSettings, Entities, OperationStatus,
    PageActions, PlanEditor, Scheduler, SnapshotFile, UpdateResult,
};

use crate::{
    cli::{GoalCommands, OptionCommands, RunArgs, SnapshotArgs},
    renderer::TerminalRenderer,
};

/// Runs CLI commands against one managed context.
pub struct Cli {
    editor: PlanEditor,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(editor: PlanEditor, renderer: TerminalRenderer) -> Self {
        Self { editor, renderer }
    }

    pub async fn handle_goal_command(&self, command: GoalCommands) -> Result<()> {
        match command {
            GoalCommands::Add(mut args) => {
                let snapshot = args.snapshot.take();
                let params = listed_goal(args.into(), snapshot.as_deref())?;
                self.add_goal(&params).await
            }
            GoalCommands::Insert(mut args) => {
                let snapshot = args.snapshot.take();
                let mut params: InsertGoal = args.into();
                params.goal = listed_goal(params.goal, snapshot.as_deref())?;
                let goal = self
                    .editor
                    .insert_goal(&params)
                    .await
                    .context("Failed to insert goal")?;
                self.render_status(format!("Inserted {goal} at position {}", params.position))
            }
            GoalCommands::Remove(args) => {
                let params: Position = args.into();
                let goal = self
                    .editor
                    .remove_goal(&params)
                    .await
                    .context("Failed to remove goal")?;
                self.renderer.render(&DeleteResult::new(goal).to_string())
            }
            GoalCommands::Move(args) => {
                let params = args.into();
                let position = self
                    .editor
                    .move_goal(&params)
                    .await
                    .context("Failed to move goal")?;
                self.render_status(format!("Goal is now at position {position}"))
            }
            GoalCommands::Swap(args) => {
                let params = args.into();
                self.editor
                    .swap_goals(&params)
                    .await
                    .context("Failed to swap goals")?;
                self.render_status(format!(
                    "Swapped goals {} and {}",
                    params.first, params.second
                ))
            }
            GoalCommands::Clear => {
                let removed = self
                    .editor
                    .clear_goals()
                    .await
                    .context("Failed to clear goals")?;
                self.render_status(format!("Removed {removed} goals"))
            }
            GoalCommands::List => self.show_plan().await,
        }
    }

    pub async fn handle_option_command(&self, command: OptionCommands) -> Result<()> {
        match command {
            OptionCommands::Discount { state } => {
                let enabled = state.into();
                let options = self
                    .editor
                    .set_discount(enabled)
                    .await
                    .context("Failed to change discount option")?;
                let change = format!(
                    "Discounted orders turned {}",
                    if enabled { "on" } else { "off" }
                );
                self.renderer
                    .render(&UpdateResult::with_changes(options, vec![change]).to_string())
            }
            OptionCommands::LongBuild(args) => {
                let params: SetLongBuild = args.into();
                let options = self
                    .editor
                    .set_long_build(&params)
                    .await
                    .context("Failed to change long-build option")?;

                let mut changes = Vec::new();
                if let Some(enabled) = params.enabled {
                    changes.push(format!(
                        "Long-build reduction turned {}",
                        if enabled { "on" } else { "off" }
                    ));
                }
                if let Some(hours) = params.threshold_hours {
                    changes.push(format!("Threshold set to {hours}h"));
                }
                self.renderer
                    .render(&UpdateResult::with_changes(options, changes).to_string())
            }
            OptionCommands::Show => {
                let view = self
                    .editor
                    .show_plan()
                    .await
                    .context("Failed to load plan")?;
                self.renderer.render(&format!(
                    "# Options for {}\n\n{}",
                    view.context, view.plan.options
                ))
            }
        }
    }

    pub async fn add_goal(&self, params: &AddGoal) -> Result<()> {
        let added = self
            .editor
            .add_goal(params)
            .await
            .context("Failed to add goal")?;
        self.renderer.render(&CreateResult::new(added).to_string())
    }

    pub async fn show_plan(&self) -> Result<()> {
        let view = self
            .editor
            .show_plan()
            .await
            .context("Failed to load plan")?;
        self.renderer.render(&view.to_string())
    }

    pub async fn list_contexts(&self) -> Result<()> {
        let contexts = self
            .editor
            .list_contexts()
            .await
            .context("Failed to list contexts")?;
        self.renderer.render(&Contexts(contexts).to_string())
    }

    pub fn list_buildings(&self, args: &SnapshotArgs) -> Result<()> {
        let page = read_page(&args.snapshot)?;
        let entities = Entities(page.entities());
        self.renderer
            .render(&format!("# Buildings\n\n{entities}"))
    }

    /// Runs one tick. The report and a summary of the page actions go to
    /// standard error; the actions themselves are printed to standard output
    /// as JSON lines.
    pub fn tick(&self, args: &SnapshotArgs) -> Result<()> {
        let store = self.editor.open_store().context("Failed to open plan store")?;
        let source = SnapshotFile::new(&args.snapshot, io::stdout());
        let mut driver = Driver::new(Scheduler::new(store), source, DriverSettings::default());

        let (report, actions) = driver
            .tick_once()
            .with_context(|| snapshot_error(&args.snapshot))?;
        self.renderer.render_to_stderr(&report.to_string())?;
        self.renderer
            .render_to_stderr(&PageActions(actions).to_string())
    }

    /// Ticks until Ctrl-C or `--max-ticks`. Page actions are written to
    /// standard output as JSON lines while they are produced; tick reports
    /// and the final summary go to standard error.
    pub async fn run(&self, args: &RunArgs) -> Result<()> {
        let store = self.editor.open_store().context("Failed to open plan store")?;
        let settings = DriverSettings::from(args);
        info!(
            "Running against {} every {:?}",
            args.snapshot.display(),
            settings.interval
        );

        let source = SnapshotFile::new(&args.snapshot, io::stdout());
        let mut driver = Driver::new(Scheduler::new(store), source, settings);
        let summary = driver
            .run(|report, _| {
                if let Err(e) = self.renderer.render_to_stderr(&report.to_string()) {
                    warn!("Could not render tick report: {e}");
                }
            })
            .await;

        let message = format!(
            "Stopped after {} ticks: {} orders, {} retirements, {} skipped",
            summary.ticks, summary.orders, summary.retirements, summary.skipped
        );
        let status = if summary.ticks == 0 && summary.skipped > 0 {
            OperationStatus::failure(message)
        } else {
            OperationStatus::success(message)
        };
        self.renderer.render_to_stderr(&status.to_string())
    }

    fn render_status(&self, message: String) -> Result<()> {
        self.renderer
            .render(&OperationStatus::success(message).to_string())
    }
}

/// Checks a new goal against the buildings listed in `snapshot`, when given.
fn listed_goal(params: AddGoal, snapshot: Option<&Path>) -> Result<AddGoal> {
    let Some(path) = snapshot else {
        return Ok(params);
    };
    let entities = read_page(path)?.entities();
    params
        .with_listing(&entities)
        .context("Failed to check goal against the page")
}

fn read_page(path: &Path) -> Result<PageSnapshot> {
    SnapshotFile::new(path, io::sink())
        .read_snapshot()
        .with_context(|| snapshot_error(path))
}

fn snapshot_error(path: &Path) -> String {
    format!("Failed to read page snapshot {}", path.display())
}
