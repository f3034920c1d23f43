//! Knowledge base DTOs

use serde::{Deserialize, Serialize};

use crate::domain::knowledge::KnowledgeBase;

/// Request to replace a project's agent handbooks
///
/// The backend replaces the whole set on every save, so callers doing a
/// partial edit should start from the saved record (`From<KnowledgeBase>`)
/// and overwrite only the sections they mean to change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateKnowledgeBase {
    pub pm_guidelines: Option<String>,
    pub architect_guidelines: Option<String>,
    pub systems_guidelines: Option<String>,
    pub ai_guidelines: Option<String>,
    pub ux_guidelines: Option<String>,
    pub security_standards: Option<String>,
}

impl From<KnowledgeBase> for UpdateKnowledgeBase {
    fn from(kb: KnowledgeBase) -> Self {
        UpdateKnowledgeBase {
            pm_guidelines: kb.pm_guidelines,
            architect_guidelines: kb.architect_guidelines,
            systems_guidelines: kb.systems_guidelines,
            ai_guidelines: kb.ai_guidelines,
            ux_guidelines: kb.ux_guidelines,
            security_standards: kb.security_standards,
        }
    }
}
