//! Agent handbook domain types

use serde::{Deserialize, Serialize};

/// Per-role guideline texts consulted by the agent team during a run
///
/// One record per project. Every section is free text and optional; an
/// unset section means the corresponding agent runs without extra
/// guidance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub id: i64,
    pub project_id: i64,
    pub pm_guidelines: Option<String>,
    pub architect_guidelines: Option<String>,
    pub systems_guidelines: Option<String>,
    pub ai_guidelines: Option<String>,
    pub ux_guidelines: Option<String>,
    pub security_standards: Option<String>,
}

impl KnowledgeBase {
    /// Role label / guideline text pairs, in display order
    pub fn sections(&self) -> [(&'static str, Option<&str>); 6] {
        [
            ("Product Manager", self.pm_guidelines.as_deref()),
            ("Lead Architect", self.architect_guidelines.as_deref()),
            ("Systems Engineer", self.systems_guidelines.as_deref()),
            ("AI Specialist", self.ai_guidelines.as_deref()),
            ("UX Designer", self.ux_guidelines.as_deref()),
            ("Security Officer", self.security_standards.as_deref()),
        ]
    }
}
