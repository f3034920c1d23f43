//! Requirement DTOs

use serde::{Deserialize, Serialize};

/// Request to append a requirements revision to a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequirement {
    pub content: String,
}
