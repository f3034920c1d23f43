//! Configuration module
//!
//! Handles CLI configuration including the studio backend URL.

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the studio backend service
    pub studio_url: String,
}
