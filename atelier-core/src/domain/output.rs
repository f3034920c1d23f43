//! Agent output domain types

use serde::{Deserialize, Serialize};

/// One unit of generated text attributed to a named agent and task
///
/// Outputs accumulate in order while a run progresses; the backend is the
/// sole writer. The content is free text and may contain markdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentOutput {
    pub id: i64,
    pub project_id: i64,
    pub agent_name: String,
    pub task_name: String,
    pub output_content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
