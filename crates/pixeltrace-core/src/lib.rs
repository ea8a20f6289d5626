//! # pixeltrace-core
//!
//! Core crate for PixelTrace. Contains configuration schemas, the tracking
//! record model shared by the collector and the HTTP layer, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other PixelTrace crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
