//! # Event Domain
//!
//! The event record and the attendance book, both pure data.

pub mod attendance;
pub mod event;
