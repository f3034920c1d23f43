//! Run command handlers
//!
//! Handles starting agent team runs and watching them live. Watching is a
//! poll session: the project status and output list are fetched as a pair
//! on a fixed cadence, newly observed outputs are printed once, and the
//! session ends on a terminal status or ctrl-c.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use atelier_core::domain::output::AgentOutput;
use atelier_core::domain::project::ProjectStatus;

use crate::commands::project::colorize_status;
use crate::config::Config;
use crate::id_resolver::resolve_project_id;
use crate::types::ProjectRef;
use atelier_client::{RunPoller, StudioClient};

/// Run subcommands
#[derive(Subcommand)]
pub enum RunCommands {
    /// Start the agent team run
    Start {
        /// Project id or title prefix
        reference: String,

        /// Watch the run after starting it
        #[arg(short, long)]
        watch: bool,

        /// Poll interval in seconds when watching
        #[arg(long, default_value = "5")]
        interval: u64,
    },
    /// Watch a run in progress
    Watch {
        /// Project id or title prefix
        reference: String,

        /// Poll interval in seconds
        #[arg(long, default_value = "5")]
        interval: u64,
    },
    /// List accumulated agent outputs
    Outputs {
        /// Project id or title prefix
        reference: String,
    },
}

/// Handle run commands
///
/// Routes run subcommands to their respective handlers.
///
/// # Arguments
/// * `command` - The run command to execute
/// * `config` - The CLI configuration
pub async fn handle_run_command(command: RunCommands, config: &Config) -> Result<()> {
    let client = StudioClient::new(&config.studio_url);

    match command {
        RunCommands::Start {
            reference,
            watch,
            interval,
        } => start_run(&client, &reference, watch, interval).await,
        RunCommands::Watch {
            reference,
            interval,
        } => {
            let reference = ProjectRef::parse(&reference);
            let id = resolve_project_id(&client, &reference).await?;
            watch_run(&client, id, Duration::from_secs(interval)).await
        }
        RunCommands::Outputs { reference } => list_outputs(&client, &reference).await,
    }
}

/// Start the run, optionally chaining into the live view
async fn start_run(client: &StudioClient, reference: &str, watch: bool, interval: u64) -> Result<()> {
    let reference = ProjectRef::parse(reference);
    let id = resolve_project_id(client, &reference).await?;

    let accepted = client.start_run(id).await?;

    println!("{}", "✓ Run started!".green().bold());
    println!("  Project: {}", id.to_string().cyan());
    println!("  {}", accepted.message.dimmed());

    if watch {
        println!();
        watch_run(client, id, Duration::from_secs(interval)).await?;
    }

    Ok(())
}

/// Watch a run until it reaches a terminal status
async fn watch_run(client: &StudioClient, project_id: i64, interval: Duration) -> Result<()> {
    if interval.is_zero() {
        anyhow::bail!("Poll interval must be greater than 0");
    }

    println!(
        "{}",
        format!(
            "Watching project {} (every {}s, ctrl-c to stop)...",
            project_id,
            interval.as_secs()
        )
        .dimmed()
    );

    let final_status: Arc<Mutex<Option<ProjectStatus>>> = Arc::new(Mutex::new(None));
    let observed = Arc::clone(&final_status);

    let mut printed = 0usize;
    let mut last_status: Option<ProjectStatus> = None;

    let source = Arc::new(client.clone());
    let poller = RunPoller::start(source, project_id, interval, move |snapshot| {
        if last_status.as_ref() != Some(&snapshot.project.status) {
            println!(
                "{} {}",
                "Status:".bold(),
                colorize_status(&snapshot.project.status)
            );
            last_status = Some(snapshot.project.status.clone());
        }

        for output in snapshot.outputs.iter().skip(printed) {
            print_agent_output(output);
        }
        printed = printed.max(snapshot.outputs.len());

        *observed.lock().unwrap() = Some(snapshot.project.status.clone());
    });

    // Ctrl-c stops the session cooperatively; the poller discards any
    // response still in flight.
    let stop = poller.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stop.stop();
        }
    });

    let stats = poller.wait().await;

    println!();
    match final_status.lock().unwrap().as_ref() {
        Some(ProjectStatus::Completed) => {
            println!("{}", "✓ Run completed.".green().bold());
        }
        Some(ProjectStatus::Error(message)) => {
            println!("{} {}", "✗ Run failed:".red().bold(), message.red());
        }
        Some(status) => {
            println!(
                "{} {}",
                "Watch stopped; last status:".yellow(),
                colorize_status(status)
            );
        }
        None => println!("{}", "Watch stopped before any update arrived.".yellow()),
    }

    if stats.failures > 0 {
        println!(
            "{}",
            format!(
                "{} of {} poll tick(s) failed; last error: {}",
                stats.failures,
                stats.ticks,
                stats.last_error.as_deref().unwrap_or("unknown")
            )
            .yellow()
        );
    } else {
        println!("{}", format!("{} poll tick(s).", stats.ticks).dimmed());
    }

    Ok(())
}

/// List the accumulated outputs once, without polling
async fn list_outputs(client: &StudioClient, reference: &str) -> Result<()> {
    let reference = ProjectRef::parse(reference);
    let id = resolve_project_id(client, &reference).await?;

    let outputs = client.list_outputs(id).await?;

    if outputs.is_empty() {
        println!("{}", "No outputs recorded for this project.".yellow());
    } else {
        println!("{}", format!("Found {} output(s):", outputs.len()).bold());
        for output in &outputs {
            print_agent_output(output);
        }
    }

    Ok(())
}

/// Print one agent output
fn print_agent_output(output: &AgentOutput) {
    println!();
    println!("{}", "─".repeat(80).dimmed());
    println!(
        "{} {} {}",
        "▸".cyan(),
        output.agent_name.bold(),
        format!("({})", output.task_name).dimmed()
    );
    println!(
        "  {}",
        output
            .created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    println!();
    println!("{}", output.output_content);
}
