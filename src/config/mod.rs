// src/config/mod.rs

//! Configuration loading for trsync-fleet.
//!
//! Responsibilities:
//! - Define the TOML-backed document model and the resolved, immutable
//!   fleet model (`model.rs`).
//! - Load the document and resolve it into a `FleetConfig`, collecting
//!   secrets and validating references (`loader.rs`).
//! - Abstract password entry behind a trait so resolution is testable
//!   without a terminal (`prompt.rs`).

pub mod loader;
pub mod model;
pub mod prompt;

pub use loader::{load_from_path, load_from_str, resolve, split_list};
pub use model::{ConfigDoc, FleetConfig, Instance, MainSection, Workspace};
pub use prompt::{PasswordPrompt, StaticSecrets, TerminalPrompt};
