//! Project-related API endpoints

use crate::StudioClient;
use crate::error::Result;
use atelier_core::domain::project::Project;
use atelier_core::dto::project::{CreateProject, RunAccepted};

impl StudioClient {
    // =============================================================================
    // Project Lifecycle
    // =============================================================================

    /// Create a new project workspace
    ///
    /// # Arguments
    /// * `req` - The project creation request
    ///
    /// # Returns
    /// The created project
    ///
    /// # Example
    /// ```no_run
    /// # use atelier_client::StudioClient;
    /// # use atelier_core::dto::project::CreateProject;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = StudioClient::new("http://localhost:8000");
    /// let project = client.create_project(CreateProject {
    ///     title: "AI Amenities Map".to_string(),
    ///     description: None,
    ///     github_url: None,
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_project(&self, req: CreateProject) -> Result<Project> {
        let url = format!("{}/projects/", self.base_url);
        let response = self.client.post(&url).json(&req).send().await?;

        self.handle_response(response).await
    }

    /// List all projects
    ///
    /// # Returns
    /// A list of all projects
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let url = format!("{}/projects/", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Get a project by id
    ///
    /// The returned record embeds the requirements revisions and the
    /// knowledge base, when present.
    ///
    /// # Arguments
    /// * `project_id` - The project id
    pub async fn get_project(&self, project_id: i64) -> Result<Project> {
        let url = format!("{}/projects/{}", self.base_url, project_id);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Start the agent team run for a project
    ///
    /// The backend executes the run asynchronously; this call only enqueues
    /// it. The backend rejects the request if a run is already in progress.
    ///
    /// # Arguments
    /// * `project_id` - The project id
    ///
    /// # Returns
    /// The acknowledgement from the backend
    pub async fn start_run(&self, project_id: i64) -> Result<RunAccepted> {
        let url = format!("{}/projects/{}/run", self.base_url, project_id);
        let response = self.client.post(&url).send().await?;

        self.handle_response(response).await
    }
}
