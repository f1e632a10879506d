//! # ZoškaGram Models
//!
//! Domain models and DTOs for the ZoškaGram gate.
//!
//! - [`profiles`]: The per-user profile record and the completion form DTO

pub mod profiles;

pub use profiles::{Profile, UpsertProfileDto};
