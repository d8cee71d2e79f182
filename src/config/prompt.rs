// src/config/prompt.rs

//! Password entry seam.
//!
//! The loader collects one secret per password id. Production code uses
//! [`TerminalPrompt`] (echo suppressed via `rpassword`); tests and
//! `--dry-run` use [`StaticSecrets`] so resolution never touches a
//! terminal. This is the only place in the crate allowed to perform
//! blocking interactive I/O.

use std::collections::BTreeMap;

use crate::errors::Result;

/// Supplies the secret for a given password id.
pub trait PasswordPrompt {
    fn prompt(&self, password_id: &str) -> Result<String>;
}

/// Interactive prompt on the controlling terminal, input echo suppressed.
pub struct TerminalPrompt;

impl PasswordPrompt for TerminalPrompt {
    fn prompt(&self, password_id: &str) -> Result<String> {
        let password = rpassword::prompt_password(format!("Enter password for '{password_id}': "))?;
        Ok(password)
    }
}

/// Map-backed secrets; ids without an entry resolve to an empty string.
///
/// `StaticSecrets::default()` is what `--dry-run` uses: password-id
/// validation is list membership, so resolution behaves identically with
/// placeholder values.
#[derive(Debug, Clone, Default)]
pub struct StaticSecrets(BTreeMap<String, String>);

impl StaticSecrets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, password_id: impl Into<String>, secret: impl Into<String>) -> Self {
        self.0.insert(password_id.into(), secret.into());
        self
    }
}

impl PasswordPrompt for StaticSecrets {
    fn prompt(&self, password_id: &str) -> Result<String> {
        Ok(self.0.get(password_id).cloned().unwrap_or_default())
    }
}
