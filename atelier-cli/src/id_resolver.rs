//! Reference resolver module
//!
//! Handles resolution of project references to backend ids by querying the
//! API. This allows users to name projects by a short title prefix instead
//! of a numeric id.

use anyhow::{Context, Result, anyhow};

use crate::types::ProjectRef;
use atelier_client::StudioClient;

/// Resolve a project reference to a backend id
///
/// A numeric reference is used as-is. A title reference fetches the
/// project list and matches titles case-insensitively: an exact match wins,
/// otherwise the prefix must be unambiguous.
///
/// # Errors
/// Returns an error if:
/// - No project title matches the prefix
/// - Multiple project titles match the prefix (ambiguous)
/// - API call fails
pub async fn resolve_project_id(client: &StudioClient, reference: &ProjectRef) -> Result<i64> {
    if let Some(id) = reference.as_id() {
        return Ok(id);
    }

    let raw = reference.to_string();
    let needle = raw.to_lowercase();

    let projects = client
        .list_projects()
        .await
        .context("Failed to fetch projects for reference resolution")?;

    let matches: Vec<_> = projects
        .iter()
        .filter(|p| p.title.to_lowercase().starts_with(&needle))
        .collect();

    if let Some(exact) = matches.iter().find(|p| p.title.eq_ignore_ascii_case(&raw)) {
        return Ok(exact.id);
    }

    match matches.len() {
        0 => Err(anyhow!(
            "No project found with title starting with '{}'",
            raw
        )),
        1 => Ok(matches[0].id),
        _ => {
            let titles: Vec<&str> = matches.iter().map(|p| p.title.as_str()).collect();
            Err(anyhow!(
                "Ambiguous reference '{}' matches multiple projects: {}",
                raw,
                titles.join(", ")
            ))
        }
    }
}
