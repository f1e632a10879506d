//! # ZoškaGram Core
//!
//! Core types shared by every crate of the ZoškaGram gate.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//!
//! # Example
//!
//! ```ignore
//! use zoskagram_core::AppError;
//!
//! let error = AppError::unauthorized("Missing session cookie");
//! ```

pub mod errors;

pub use errors::{AppError, ErrorResponse};
