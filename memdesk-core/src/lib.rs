//! Core types for memdesk
//!
//! This crate provides configuration loading, logging setup, the memory file
//! layout and the guarded file accessor shared by the server and the CLI.

pub mod config;
pub mod error;
pub mod guard;
pub mod layout;
pub mod logging;
pub mod utils;

pub use error::{Error, Result};
pub use guard::{ContainmentPolicy, GuardedDir, OpenMode};
pub use layout::{MemoryKind, MemoryLayout};
