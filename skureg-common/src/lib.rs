//! # SKU Registry Common Library
//!
//! Shared code for the SKU registry services:
//! - Error type
//! - Configuration loading and root folder resolution
//! - Server-Sent Events helpers

pub mod config;
pub mod error;
pub mod sse;

pub use error::{Error, Result};
