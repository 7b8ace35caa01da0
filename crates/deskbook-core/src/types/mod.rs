//! Core type definitions used across the DeskBook workspace.

pub mod id;

pub use id::*;
