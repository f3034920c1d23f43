//! Core domain types
//!
//! This module contains the domain structures shared between the studio
//! client library and the CLI. They mirror the records the studio backend
//! persists and serves over its HTTP API.

pub mod knowledge;
pub mod output;
pub mod project;
