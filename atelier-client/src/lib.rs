//! Atelier Studio HTTP Client
//!
//! A simple, type-safe HTTP client for the AI product-team studio backend.
//!
//! The backend owns the hard parts (agent orchestration, task scheduling,
//! knowledge-base-grounded generation); this crate only speaks its HTTP API
//! and adds the one piece of client-side machinery worth having: a run
//! status poller that observes a backend run until it reaches a terminal
//! state.
//!
//! # Example
//!
//! ```no_run
//! use atelier_client::StudioClient;
//! use atelier_core::dto::project::CreateProject;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = StudioClient::new("http://localhost:8000");
//!
//!     let project = client.create_project(CreateProject {
//!         title: "AI Amenities Map".to_string(),
//!         description: Some("Search amenities near any address".to_string()),
//!         github_url: None,
//!     }).await?;
//!
//!     println!("Created project: {}", project.id);
//!     Ok(())
//! }
//! ```

pub mod error;
mod knowledge;
mod outputs;
pub mod poller;
mod projects;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use poller::{PollStats, RunPoller, RunSnapshot, RunSource, StopHandle};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the studio backend API
///
/// This client provides methods for all backend endpoints, organized into
/// logical groups:
/// - Project lifecycle (create, list, get, start a run)
/// - Requirements revisions and agent handbooks
/// - Accumulated agent outputs
#[derive(Debug, Clone)]
pub struct StudioClient {
    /// Base URL of the studio backend (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl StudioClient {
    /// Create a new studio client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the backend API (e.g., "http://localhost:8000")
    ///
    /// # Example
    /// ```
    /// use atelier_client::StudioClient;
    ///
    /// let client = StudioClient::new("http://localhost:8000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new studio client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use atelier_client::StudioClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = StudioClient::with_client("http://localhost:8000", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the
    /// request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = StudioClient::new("http://localhost:8000");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = StudioClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = StudioClient::with_client("http://localhost:8000", http_client);
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
