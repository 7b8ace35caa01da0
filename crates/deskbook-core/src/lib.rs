//! # deskbook-core
//!
//! Core crate for DeskBook. Contains configuration schemas, typed
//! identifiers, the injectable clock, and the unified error system.
//!
//! This crate has **no** internal dependencies on other DeskBook crates.

pub mod clock;
pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::AppError;
pub use result::AppResult;
