// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for formtest.
//!
//! This module contains the values a scenario is described with and the
//! outcome it evaluates to. It performs no I/O and calls no collaborators;
//! those are reached through the ports in `crate::application`.
//!
//! - **No tracing**: observability belongs to the application layer
//! - **Plain values**: every type is Clone + PartialEq
//! - **Serde everywhere**: payloads and errors round-trip through JSON
//
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{
    outcome::{ValidationErrors, ValidationOutcome},
    request::{MatchedRoute, Principal, Redirect, SimulatedRequest},
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{OneOrMany, HttpMethod, Payload};
