//! Data Transfer Objects for the studio HTTP API
//!
//! This module contains the request and response shapes exchanged with the
//! studio backend. DTOs are lightweight representations of domain entities
//! optimized for network transfer.

pub mod knowledge;
pub mod project;
pub mod requirement;
