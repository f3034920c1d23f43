//! Agent output endpoints

use crate::StudioClient;
use crate::error::Result;
use atelier_core::domain::output::AgentOutput;

impl StudioClient {
    /// Fetch the accumulated agent outputs for a project
    ///
    /// Returns the full ordered list on every call; the backend may rewrite
    /// earlier entries, so callers replace their local copy rather than
    /// merging.
    ///
    /// # Arguments
    /// * `project_id` - The project id
    pub async fn list_outputs(&self, project_id: i64) -> Result<Vec<AgentOutput>> {
        let url = format!("{}/projects/{}/outputs/", self.base_url, project_id);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}
