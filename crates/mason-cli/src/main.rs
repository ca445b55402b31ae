//! Mason CLI Application
//!
//! Command-line interface for the Mason construction scheduler.

mod args;
mod cli;
mod handlers;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use handlers::Cli;
use log::info;
use mason_core::PlanEditorBuilder;
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        context,
        no_color,
        command,
    } = Args::parse();

    let editor = PlanEditorBuilder::new()
        .with_database_path(database_file)
        .with_context(context)
        .build()
        .await
        .context("Failed to initialize plan storage")?;

    info!("Mason started for context '{}'", editor.context());

    let cli = Cli::new(editor, TerminalRenderer::new(!no_color));
    match command {
        Some(Commands::Goal { command }) => cli.handle_goal_command(command).await,
        Some(Commands::Options { command }) => cli.handle_option_command(command).await,
        Some(Commands::Buildings(args)) => cli.list_buildings(&args),
        Some(Commands::Tick(args)) => cli.tick(&args),
        Some(Commands::Run(args)) => cli.run(&args).await,
        Some(Commands::Contexts) => cli.list_contexts().await,
        None => cli.show_plan().await,
    }
}
