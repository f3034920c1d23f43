//! Handbook command handlers
//!
//! Handles the per-role agent handbooks: showing the saved guidelines and
//! updating individual sections from files.

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use colored::*;
use atelier_core::dto::knowledge::UpdateKnowledgeBase;

use crate::config::Config;
use crate::id_resolver::resolve_project_id;
use crate::types::ProjectRef;
use atelier_client::StudioClient;

/// Handbook subcommands
#[derive(Subcommand)]
pub enum HandbookCommands {
    /// Show the saved agent handbooks
    Show {
        /// Project id or title prefix
        reference: String,
    },
    /// Update handbook sections from files
    ///
    /// Sections not named on the command line keep their saved text.
    Set {
        /// Project id or title prefix
        reference: String,

        /// Product manager guidelines file
        #[arg(long)]
        pm: Option<String>,

        /// Lead architect guidelines file
        #[arg(long)]
        architect: Option<String>,

        /// Systems engineer guidelines file
        #[arg(long)]
        systems: Option<String>,

        /// AI specialist guidelines file
        #[arg(long)]
        ai: Option<String>,

        /// UX designer guidelines file
        #[arg(long)]
        ux: Option<String>,

        /// Security standards file
        #[arg(long)]
        security: Option<String>,
    },
}

/// Handle handbook commands
///
/// # Arguments
/// * `command` - The handbook command to execute
/// * `config` - The CLI configuration
pub async fn handle_handbook_command(command: HandbookCommands, config: &Config) -> Result<()> {
    let client = StudioClient::new(&config.studio_url);

    match command {
        HandbookCommands::Show { reference } => show_handbooks(&client, &reference).await,
        HandbookCommands::Set {
            reference,
            pm,
            architect,
            systems,
            ai,
            ux,
            security,
        } => {
            let sections = [pm, architect, systems, ai, ux, security];
            set_handbooks(&client, &reference, sections).await
        }
    }
}

/// Show the saved handbooks for a project
async fn show_handbooks(client: &StudioClient, reference: &str) -> Result<()> {
    let reference = ProjectRef::parse(reference);
    let id = resolve_project_id(client, &reference).await?;

    let project = client.get_project(id).await?;

    let Some(kb) = &project.knowledge_base else {
        println!("{}", "No handbooks saved yet.".yellow());
        return Ok(());
    };

    println!(
        "{}",
        format!("Handbooks for '{}':", project.title).bold()
    );
    for (role, text) in kb.sections() {
        println!();
        println!("{}", role.cyan().bold());
        println!("{}", "─".repeat(80).dimmed());
        match text {
            Some(text) => println!("{}", text),
            None => println!("{}", "(not set)".dimmed()),
        }
    }

    Ok(())
}

/// Update handbook sections, keeping unspecified ones
///
/// The backend replaces the whole set on every save, so the saved record
/// is fetched first and only the named sections are overwritten.
async fn set_handbooks(
    client: &StudioClient,
    reference: &str,
    sections: [Option<String>; 6],
) -> Result<()> {
    if sections.iter().all(Option::is_none) {
        bail!("No handbook section given; pass at least one of --pm, --architect, --systems, --ai, --ux, --security");
    }

    let reference = ProjectRef::parse(reference);
    let id = resolve_project_id(client, &reference).await?;

    let project = client.get_project(id).await?;
    let mut update = project
        .knowledge_base
        .map(UpdateKnowledgeBase::from)
        .unwrap_or_default();

    let [pm, architect, systems, ai, ux, security] = sections;
    let mut updated: Vec<&str> = Vec::new();

    if let Some(path) = pm {
        update.pm_guidelines = Some(read_section(&path)?);
        updated.push("Product Manager");
    }
    if let Some(path) = architect {
        update.architect_guidelines = Some(read_section(&path)?);
        updated.push("Lead Architect");
    }
    if let Some(path) = systems {
        update.systems_guidelines = Some(read_section(&path)?);
        updated.push("Systems Engineer");
    }
    if let Some(path) = ai {
        update.ai_guidelines = Some(read_section(&path)?);
        updated.push("AI Specialist");
    }
    if let Some(path) = ux {
        update.ux_guidelines = Some(read_section(&path)?);
        updated.push("UX Designer");
    }
    if let Some(path) = security {
        update.security_standards = Some(read_section(&path)?);
        updated.push("Security Officer");
    }

    client.update_knowledge_base(id, update).await?;

    println!("{}", "✓ Handbooks saved!".green().bold());
    println!("  Updated: {}", updated.join(", ").cyan());

    Ok(())
}

/// Read one guideline file
fn read_section(path: &str) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read handbook file: {}", path))
}
