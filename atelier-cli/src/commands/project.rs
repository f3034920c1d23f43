//! Project command handlers
//!
//! Handles all project-related CLI commands including listing,
//! creation and viewing details.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use atelier_core::domain::project::{Project, ProjectStatus};
use atelier_core::dto::project::CreateProject;

use crate::config::Config;
use crate::id_resolver::resolve_project_id;
use crate::types::ProjectRef;
use atelier_client::StudioClient;

/// Project subcommands
#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List all projects
    List,
    /// Create a new project workspace
    Create {
        /// Product name
        #[arg(short, long)]
        title: String,

        /// Short description shown on the dashboard
        #[arg(short, long)]
        description: Option<String>,

        /// Existing repository for the agents to analyze first
        #[arg(long)]
        github_url: Option<String>,
    },
    /// Get project details
    Get {
        /// Project id or title prefix
        reference: String,
    },
}

/// Handle project commands
///
/// Routes project subcommands to their respective handlers.
///
/// # Arguments
/// * `command` - The project command to execute
/// * `config` - The CLI configuration
pub async fn handle_project_command(command: ProjectCommands, config: &Config) -> Result<()> {
    let client = StudioClient::new(&config.studio_url);

    match command {
        ProjectCommands::List => list_projects(&client).await,
        ProjectCommands::Create {
            title,
            description,
            github_url,
        } => create_project(&client, title, description, github_url).await,
        ProjectCommands::Get { reference } => get_project(&client, &reference).await,
    }
}

/// List all projects
async fn list_projects(client: &StudioClient) -> Result<()> {
    let projects = client.list_projects().await?;

    if projects.is_empty() {
        println!("{}", "No projects found.".yellow());
    } else {
        println!("{}", format!("Found {} project(s):", projects.len()).bold());
        println!();
        for project in projects {
            print_project_summary(&project);
        }
    }

    Ok(())
}

/// Create a new project workspace
async fn create_project(
    client: &StudioClient,
    title: String,
    description: Option<String>,
    github_url: Option<String>,
) -> Result<()> {
    let project = client
        .create_project(CreateProject {
            title,
            description,
            github_url,
        })
        .await?;

    println!("{}", "✓ Project created successfully!".green().bold());
    println!("  ID:     {}", project.id.to_string().cyan());
    println!("  Title:  {}", project.title.bold());
    println!("  Status: {}", colorize_status(&project.status));

    Ok(())
}

/// Get and display a single project
async fn get_project(client: &StudioClient, reference: &str) -> Result<()> {
    let reference = ProjectRef::parse(reference);
    let id = resolve_project_id(client, &reference).await?;

    let project = client.get_project(id).await?;

    print_project_details(&project);

    Ok(())
}

/// Print a project summary
fn print_project_summary(project: &Project) {
    println!("  {} {}", "▸".cyan(), project.title.bold());
    println!("    ID:      {}", project.id.to_string().dimmed());
    println!("    Status:  {}", colorize_status(&project.status));
    println!(
        "    Created: {}",
        project
            .created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    if let Some(desc) = &project.description {
        println!("    Description: {}", desc.dimmed());
    }
    println!();
}

/// Print detailed project information
fn print_project_details(project: &Project) {
    println!("{}", "Project Details:".bold());
    println!("  ID:          {}", project.id.to_string().cyan());
    println!("  Title:       {}", project.title.bold());
    println!("  Status:      {}", colorize_status(&project.status));
    println!(
        "  Created:     {}",
        project.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    if let Some(desc) = &project.description {
        println!("  Description: {}", desc);
    }
    if let Some(url) = &project.github_url {
        println!("  Repository:  {}", url);
    }

    match project.current_requirements() {
        Some(content) => {
            println!(
                "\n{}",
                format!("Requirements (revision {}):", project.requirements.len()).bold()
            );
            println!("{}", "─".repeat(80).dimmed());
            println!("{}", content);
            println!("{}", "─".repeat(80).dimmed());
        }
        None => println!("\n{}", "No requirements pushed yet.".yellow()),
    }

    match &project.knowledge_base {
        Some(kb) => {
            println!("\n{}", "Handbooks:".bold());
            for (role, text) in kb.sections() {
                match text {
                    Some(text) => println!(
                        "  {} {}",
                        format!("{}:", role).cyan(),
                        format!("{} chars", text.len()).dimmed()
                    ),
                    None => println!("  {} {}", format!("{}:", role).cyan(), "(not set)".dimmed()),
                }
            }
        }
        None => println!("\n{}", "No handbooks saved yet.".yellow()),
    }

    if !project.agent_outputs.is_empty() {
        println!(
            "\n{}",
            format!("{} agent output(s) recorded.", project.agent_outputs.len()).bold()
        );
    }
}

/// Colorize project status for display
pub fn colorize_status(status: &ProjectStatus) -> colored::ColoredString {
    let status_str = status.to_string();
    match status {
        ProjectStatus::Draft => status_str.yellow(),
        ProjectStatus::Starting => status_str.cyan(),
        ProjectStatus::Running => status_str.cyan(),
        ProjectStatus::Completed => status_str.green(),
        ProjectStatus::Error(_) => status_str.red(),
        ProjectStatus::Other(_) => status_str.dimmed(),
    }
}
