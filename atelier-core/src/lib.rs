//! Atelier Core
//!
//! Core types for the Atelier studio client suite.
//!
//! This crate contains:
//! - Domain types: core business entities (Project, AgentOutput, etc.)
//! - DTOs: request and response shapes for the studio HTTP API

pub mod domain;
pub mod dto;
