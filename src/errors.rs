// src/errors.rs

//! Crate-wide error type.
//!
//! Configuration failures carry the specific missing key/section so the
//! one-line message printed by `main` names the failed assertion.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FleetError {
    #[error("config must list at least one instance in [main] instance_names")]
    MissingInstances,

    #[error("password id '{0}' is unknown (not listed in [main] ask_password_ids)")]
    UnknownPasswordId(String),

    #[error("section '{0}' not found in config")]
    MissingSection(String),

    #[error("missing key '{key}' in section '{section}'")]
    MissingKey { section: String, key: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, FleetError>;
