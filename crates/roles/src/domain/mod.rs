//! # Role Domain
//!
//! Pure role types and the escalation-secret comparison.

pub mod assignment;
pub mod escalation;
