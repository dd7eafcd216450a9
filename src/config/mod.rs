//! Configuration module for soterrado
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SoterradoPaths;
pub use settings::Settings;
