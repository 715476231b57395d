//! Core library for the HireNova resume-screening demo.
//!
//! Everything here is session-scoped and memory-resident: the upload wizard,
//! the mock analysis stand-in, the candidate listing, and the shortlist with
//! interview scheduling. There is no persistence and no real document
//! pipeline behind any of it.

pub mod config;
pub mod error;
pub mod screening;
pub mod telemetry;
