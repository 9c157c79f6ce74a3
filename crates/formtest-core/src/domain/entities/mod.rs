//! Domain entities.

pub mod outcome;
pub mod request;
