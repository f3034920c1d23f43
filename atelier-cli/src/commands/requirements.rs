//! Requirement command handlers
//!
//! Handles the product requirements revision log: showing the current
//! revision and pushing new ones.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use atelier_core::dto::requirement::CreateRequirement;

use crate::config::Config;
use crate::id_resolver::resolve_project_id;
use crate::types::ProjectRef;
use atelier_client::StudioClient;

/// Requirement subcommands
#[derive(Subcommand)]
pub enum RequirementCommands {
    /// Show the current requirements revision
    Show {
        /// Project id or title prefix
        reference: String,
    },
    /// Append a new requirements revision from a file
    Push {
        /// Project id or title prefix
        reference: String,

        /// Path to the requirements text
        #[arg(short, long)]
        file: String,
    },
}

/// Handle requirement commands
///
/// # Arguments
/// * `command` - The requirement command to execute
/// * `config` - The CLI configuration
pub async fn handle_requirement_command(
    command: RequirementCommands,
    config: &Config,
) -> Result<()> {
    let client = StudioClient::new(&config.studio_url);

    match command {
        RequirementCommands::Show { reference } => show_requirements(&client, &reference).await,
        RequirementCommands::Push { reference, file } => {
            push_requirements(&client, &reference, &file).await
        }
    }
}

/// Show the current requirements revision
async fn show_requirements(client: &StudioClient, reference: &str) -> Result<()> {
    let reference = ProjectRef::parse(reference);
    let id = resolve_project_id(client, &reference).await?;

    let project = client.get_project(id).await?;

    match project.current_requirements() {
        Some(content) => {
            println!(
                "{}",
                format!(
                    "Requirements for '{}' (revision {}):",
                    project.title,
                    project.requirements.len()
                )
                .bold()
            );
            println!("{}", "─".repeat(80).dimmed());
            println!("{}", content);
            println!("{}", "─".repeat(80).dimmed());
        }
        None => println!("{}", "No requirements pushed yet.".yellow()),
    }

    Ok(())
}

/// Push a new requirements revision
async fn push_requirements(client: &StudioClient, reference: &str, file: &str) -> Result<()> {
    let reference = ProjectRef::parse(reference);
    let id = resolve_project_id(client, &reference).await?;

    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read requirements file: {}", file))?;

    let revision = client
        .append_requirement(id, CreateRequirement { content })
        .await?;

    println!("{}", "✓ Requirements revision saved!".green().bold());
    println!("  Revision ID: {}", revision.id.to_string().cyan());

    Ok(())
}
