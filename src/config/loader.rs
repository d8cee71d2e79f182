// src/config/loader.rs

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::config::model::{
    section_key, workspace_section_name, ConfigDoc, FleetConfig, Instance, Workspace,
};
use crate::config::prompt::PasswordPrompt;
use crate::errors::{FleetError, Result};

/// Load a configuration file from a given path and return the raw
/// [`ConfigDoc`].
///
/// This only performs TOML deserialization; referential validation and
/// secret collection happen in [`resolve`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigDoc> {
    let path = path.as_ref();
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading config file at {path:?}"))?;
    load_from_str(&contents)
}

/// Deserialize a raw [`ConfigDoc`] from TOML text.
pub fn load_from_str(contents: &str) -> Result<ConfigDoc> {
    let doc: ConfigDoc = toml::from_str(contents)?;
    Ok(doc)
}

/// Resolve a raw document into a fully populated [`FleetConfig`].
///
/// This is the recommended entry point for the rest of the application:
///
/// - Parses the `[main]` comma lists and requires a non-empty
///   `instance_names`.
/// - Collects one secret per listed password id (in list order, never
///   re-prompting a duplicate id) through the given [`PasswordPrompt`].
/// - Resolves every activated instance section, failing on a
///   `password_id` that was not collected.
/// - Resolves every `"{instance}::{workspace}"` section, failing when
///   one is absent.
///
/// Any failure aborts the whole load; no partial config is produced.
pub fn resolve(doc: &ConfigDoc, prompt: &dyn PasswordPrompt) -> Result<FleetConfig> {
    let ask_password_ids = split_list(&doc.main.ask_password_ids);
    let instance_names = split_list(&doc.main.instance_names);

    if instance_names.is_empty() {
        return Err(FleetError::MissingInstances);
    }

    let passwords = collect_secrets(&ask_password_ids, prompt)?;

    let mut instances = Vec::with_capacity(instance_names.len());
    for instance_name in &instance_names {
        let section = doc.section(instance_name)?;
        let domain = section_key(section, instance_name, "domain")?;
        let username = section_key(section, instance_name, "username")?;
        let password_id = section_key(section, instance_name, "password_id")?;

        let password = passwords
            .get(password_id)
            .ok_or_else(|| FleetError::UnknownPasswordId(password_id.to_string()))?;

        let workspace_names = split_list(section_key(section, instance_name, "workspace_names")?);
        let mut workspaces = Vec::with_capacity(workspace_names.len());
        for workspace_name in &workspace_names {
            let section_name = workspace_section_name(instance_name, workspace_name);
            let ws_section = doc.section(&section_name)?;
            workspaces.push(Workspace {
                name: workspace_name.clone(),
                folder_path: section_key(ws_section, &section_name, "folder_path")?.to_string(),
                remote_id: section_key(ws_section, &section_name, "remote_id")?.to_string(),
            });
        }

        debug!(
            instance = %instance_name,
            workspaces = workspaces.len(),
            "resolved instance section"
        );

        instances.push(Instance {
            name: instance_name.clone(),
            domain: domain.to_string(),
            username: username.to_string(),
            password: password.clone(),
            workspaces,
        });
    }

    Ok(FleetConfig {
        bin: doc.main.bin.clone(),
        log_to: doc.main.log_to.clone(),
        instances,
    })
}

/// Collect one secret per password id, in list order.
///
/// A duplicate id is never prompted twice; the first collected value wins.
fn collect_secrets(
    password_ids: &[String],
    prompt: &dyn PasswordPrompt,
) -> Result<BTreeMap<String, String>> {
    let mut passwords = BTreeMap::new();
    for password_id in password_ids {
        if passwords.contains_key(password_id) {
            continue;
        }
        let secret = prompt.prompt(password_id)?;
        passwords.insert(password_id.clone(), secret);
    }
    Ok(passwords)
}

/// Parse a comma-separated list field.
///
/// Elements are trimmed and empties discarded, so trailing commas and
/// repeated separators are tolerated: `" a, b ,,c "` yields
/// `["a", "b", "c"]`.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
