//! # Cosmic Journey Common Library
//!
//! Shared code for the Cosmic Journey services:
//! - Error and result types
//! - Configuration loading and credential resolution
//! - Planet naming and classification

pub mod config;
pub mod error;
pub mod planet;

pub use error::{Error, Result};
pub use planet::{BodyClass, PlanetQuery};
