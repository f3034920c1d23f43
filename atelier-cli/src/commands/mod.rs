//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod handbook;
mod project;
mod requirements;
mod run;

pub use handbook::HandbookCommands;
pub use project::ProjectCommands;
pub use requirements::RequirementCommands;
pub use run::RunCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Project workspace management
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Product requirements revisions
    Requirements {
        #[command(subcommand)]
        command: RequirementCommands,
    },
    /// Agent handbooks (per-role guidelines)
    Handbook {
        #[command(subcommand)]
        command: HandbookCommands,
    },
    /// Agent team runs
    Run {
        #[command(subcommand)]
        command: RunCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Project { command } => project::handle_project_command(command, config).await,
        Commands::Requirements { command } => {
            requirements::handle_requirement_command(command, config).await
        }
        Commands::Handbook { command } => handbook::handle_handbook_command(command, config).await,
        Commands::Run { command } => run::handle_run_command(command, config).await,
    }
}
