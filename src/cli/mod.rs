//! CLI command handlers
//!
//! This module contains the implementation of CLI commands and the
//! interactive menu, bridging clap argument parsing with the service layer.

pub mod context;
pub mod menu;
pub mod records;

pub use context::Context;
pub use menu::Menu;
pub use records::{handle_record_command, RecordCommands};
