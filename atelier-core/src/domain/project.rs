//! Project domain types

use serde::{Deserialize, Serialize};

use crate::domain::knowledge::KnowledgeBase;
use crate::domain::output::AgentOutput;

/// A product workspace tracked by the studio backend
///
/// Structure shared between the backend (persists) and the client (reads).
/// The embedded collections are only populated by the single-project
/// endpoint; list responses may omit them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub github_url: Option<String>,
    pub status: ProjectStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
    #[serde(default)]
    pub knowledge_base: Option<KnowledgeBase>,
    #[serde(default)]
    pub agent_outputs: Vec<AgentOutput>,
}

impl Project {
    /// The current requirements text, if any revision has been pushed
    ///
    /// Revisions are append-only; the last one is authoritative.
    pub fn current_requirements(&self) -> Option<&str> {
        self.requirements.last().map(|r| r.content.as_str())
    }
}

/// Run status of a project as reported by the backend
///
/// The wire format is a plain string. `Error` captures the whole
/// "error"-prefixed family (e.g. `"error: agent timeout"`) and keeps the
/// full message; `Other` preserves any unrecognized value so it survives a
/// round-trip. Unrecognized statuses are never treated as terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectStatus {
    Draft,
    Starting,
    Running,
    Completed,
    Error(String),
    Other(String),
}

impl ProjectStatus {
    /// Whether further state transitions are impossible without a new run
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProjectStatus::Completed | ProjectStatus::Error(_))
    }

    /// The wire representation of this status
    pub fn as_str(&self) -> &str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::Starting => "starting",
            ProjectStatus::Running => "running",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Error(s) | ProjectStatus::Other(s) => s,
        }
    }
}

impl From<String> for ProjectStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "draft" => ProjectStatus::Draft,
            "starting" => ProjectStatus::Starting,
            "running" => ProjectStatus::Running,
            "completed" => ProjectStatus::Completed,
            _ if s.starts_with("error") => ProjectStatus::Error(s),
            _ => ProjectStatus::Other(s),
        }
    }
}

impl From<ProjectStatus> for String {
    fn from(status: ProjectStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One revision of the product requirements text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirement {
    pub id: i64,
    pub project_id: i64,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_parse() {
        assert_eq!(ProjectStatus::from("draft".to_string()), ProjectStatus::Draft);
        assert_eq!(
            ProjectStatus::from("starting".to_string()),
            ProjectStatus::Starting
        );
        assert_eq!(
            ProjectStatus::from("running".to_string()),
            ProjectStatus::Running
        );
        assert_eq!(
            ProjectStatus::from("completed".to_string()),
            ProjectStatus::Completed
        );
    }

    #[test]
    fn error_prefix_family_is_terminal() {
        let status = ProjectStatus::from("error: agent timeout".to_string());
        assert_eq!(
            status,
            ProjectStatus::Error("error: agent timeout".to_string())
        );
        assert!(status.is_terminal());
        assert!(ProjectStatus::from("error".to_string()).is_terminal());
        assert!(ProjectStatus::Completed.is_terminal());
    }

    #[test]
    fn unrecognized_status_is_not_terminal_and_round_trips() {
        let status = ProjectStatus::from("paused".to_string());
        assert_eq!(status, ProjectStatus::Other("paused".to_string()));
        assert!(!status.is_terminal());
        assert!(!ProjectStatus::Draft.is_terminal());
        assert!(!ProjectStatus::Starting.is_terminal());
        assert!(!ProjectStatus::Running.is_terminal());

        let wire: String = serde_json::from_str::<ProjectStatus>("\"paused\"")
            .map(String::from)
            .unwrap();
        assert_eq!(wire, "paused");
    }

    #[test]
    fn project_deserializes_with_missing_collections() {
        let project: Project = serde_json::from_value(serde_json::json!({
            "id": 7,
            "title": "AI Amenities Map",
            "status": "draft",
            "created_at": "2026-02-11T09:30:00Z",
        }))
        .unwrap();

        assert_eq!(project.id, 7);
        assert_eq!(project.status, ProjectStatus::Draft);
        assert!(project.requirements.is_empty());
        assert!(project.agent_outputs.is_empty());
        assert!(project.knowledge_base.is_none());
        assert!(project.description.is_none());
        assert!(project.current_requirements().is_none());
    }

    #[test]
    fn current_requirements_is_the_last_revision() {
        let project: Project = serde_json::from_value(serde_json::json!({
            "id": 7,
            "title": "AI Amenities Map",
            "status": "draft",
            "created_at": "2026-02-11T09:30:00Z",
            "requirements": [
                { "id": 1, "project_id": 7, "content": "first draft" },
                { "id": 2, "project_id": 7, "content": "second draft" },
            ],
        }))
        .unwrap();

        assert_eq!(project.current_requirements(), Some("second draft"));
    }
}
