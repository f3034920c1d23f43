//! Requirements and agent handbook endpoints

use crate::StudioClient;
use crate::error::Result;
use atelier_core::domain::knowledge::KnowledgeBase;
use atelier_core::domain::project::Requirement;
use atelier_core::dto::knowledge::UpdateKnowledgeBase;
use atelier_core::dto::requirement::CreateRequirement;

impl StudioClient {
    /// Append a requirements revision to a project
    ///
    /// Revisions are never overwritten; each save adds a new one and the
    /// latest revision is the one the agent team reads.
    ///
    /// # Arguments
    /// * `project_id` - The project id
    /// * `req` - The revision content
    ///
    /// # Returns
    /// The stored revision
    pub async fn append_requirement(
        &self,
        project_id: i64,
        req: CreateRequirement,
    ) -> Result<Requirement> {
        let url = format!("{}/projects/{}/requirements/", self.base_url, project_id);
        let response = self.client.post(&url).json(&req).send().await?;

        self.handle_response(response).await
    }

    /// Replace a project's agent handbooks
    ///
    /// The backend replaces the whole set; use
    /// [`UpdateKnowledgeBase::from`] on the saved record for partial edits.
    ///
    /// # Arguments
    /// * `project_id` - The project id
    /// * `req` - The full set of guideline texts
    ///
    /// # Returns
    /// The stored knowledge base
    pub async fn update_knowledge_base(
        &self,
        project_id: i64,
        req: UpdateKnowledgeBase,
    ) -> Result<KnowledgeBase> {
        let url = format!("{}/projects/{}/knowledge_base/", self.base_url, project_id);
        let response = self.client.put(&url).json(&req).send().await?;

        self.handle_response(response).await
    }
}
