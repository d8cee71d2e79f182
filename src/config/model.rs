// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::errors::{FleetError, Result};

/// Raw fleet configuration as read from a TOML file.
///
/// The file is organized as a `[main]` section plus one section per
/// instance plus one section per (instance, workspace) pair. Workspace
/// sections are addressed by the composite name `"{instance}::{workspace}"`,
/// which in TOML is a quoted table name:
///
/// ```toml
/// [main]
/// ask_password_ids = "p1"
/// instance_names = "acme"
/// bin = "/usr/bin/trsync"
/// log_to = "/var/log/trsync/{instance_name}_{workspace_name}.log"
///
/// [acme]
/// domain = "acme.example"
/// username = "alice"
/// password_id = "p1"
/// workspace_names = "ws1, ws2"
///
/// ["acme::ws1"]
/// folder_path = "/home/alice/ws1"
/// remote_id = "10"
/// ```
///
/// All values are strings; list-valued keys are comma separated.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigDoc {
    /// The `[main]` section.
    pub main: MainSection,

    /// Every other named section: instance sections keyed by instance
    /// name, workspace sections keyed by the composite name.
    #[serde(flatten)]
    pub sections: BTreeMap<String, Section>,
}

/// A named section's keys, all string valued.
pub type Section = BTreeMap<String, String>;

/// `[main]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct MainSection {
    /// Comma list of password ids to collect interactively at startup.
    #[serde(default)]
    pub ask_password_ids: String,

    /// Comma list of instance sections to activate. Must be non-empty.
    #[serde(default)]
    pub instance_names: String,

    /// Path to the trsync worker executable.
    pub bin: String,

    /// Log file path template; `{instance_name}` and `{workspace_name}`
    /// are substituted per job.
    pub log_to: String,
}

impl ConfigDoc {
    /// Look up a named section, failing with the section name when absent.
    pub fn section(&self, name: &str) -> Result<&Section> {
        self.sections
            .get(name)
            .ok_or_else(|| FleetError::MissingSection(name.to_string()))
    }
}

/// Read a required key from a section, failing with both names when absent.
pub fn section_key<'a>(section: &'a Section, section_name: &str, key: &str) -> Result<&'a str> {
    section
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| FleetError::MissingKey {
            section: section_name.to_string(),
            key: key.to_string(),
        })
}

/// Composite section name for an (instance, workspace) pair.
pub fn workspace_section_name(instance: &str, workspace: &str) -> String {
    format!("{instance}::{workspace}")
}

/// A single local-folder-to-remote-location binding.
///
/// `folder_path` is taken verbatim from configuration; it is the worker's
/// job to create or reject it. `remote_id` is opaque to the supervisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub name: String,
    pub folder_path: String,
    pub remote_id: String,
}

/// One remote account: a credential plus its workspace bindings.
///
/// `password` is the resolved secret value; unresolved password-id
/// references never survive loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub name: String,
    pub domain: String,
    pub username: String,
    pub password: String,
    pub workspaces: Vec<Workspace>,
}

/// The fully resolved fleet configuration, immutable after load.
///
/// Instances (and their workspaces) keep declaration order, which fixes
/// the launch and shutdown order of the whole fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetConfig {
    pub bin: String,
    pub log_to: String,
    pub instances: Vec<Instance>,
}
