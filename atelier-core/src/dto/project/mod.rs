//! Project DTOs

use serde::{Deserialize, Serialize};

/// Request to create a new project workspace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: Option<String>,
    /// Existing repository for the agents to analyze before designing;
    /// absent means they architect from scratch.
    pub github_url: Option<String>,
}

/// Acknowledgement returned when the backend accepts a run request
///
/// The run itself executes in the background; progress is observed through
/// the project status and output endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunAccepted {
    pub status: String,
    pub message: String,
}
