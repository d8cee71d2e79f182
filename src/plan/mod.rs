// src/plan/mod.rs

//! Job planning.
//!
//! Expands a resolved [`FleetConfig`] into the flat, ordered list of
//! worker invocations: one [`Job`] per (instance, workspace) pair, in
//! declaration order. Planning is pure data transformation over an
//! already-validated config and cannot fail.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::FleetConfig;

/// Environment variable carrying the secret into the worker process.
///
/// The worker is told its name via [`ENV_VAR_PASS_FLAG`] so the secret
/// never appears in argv (and therefore never in process listings).
pub const PASSWORD_ENV_VAR: &str = "TRSYNC_PASSWORD";

/// Worker flag naming the environment variable that carries the secret.
pub const ENV_VAR_PASS_FLAG: &str = "--env-var-pass";

/// A planned, not-yet-launched worker invocation.
///
/// Consumed exactly once by the supervisor to spawn a child; once the
/// child exists, the live handle (not the job) is what persists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub instance_name: String,
    pub workspace_name: String,

    /// Full command line, worker binary first.
    pub argv: Vec<String>,

    /// Complete child environment: a copy of the supervisor's own
    /// environment with [`PASSWORD_ENV_VAR`] set. Each job gets its own
    /// copy so sibling jobs never share a secret.
    pub env: BTreeMap<String, String>,

    pub log_file_path: PathBuf,
}

impl Job {
    /// `instance::workspace` label used in announcements and logs.
    pub fn pair(&self) -> String {
        format!("{}::{}", self.instance_name, self.workspace_name)
    }

    /// Space-joined command line for human-readable output.
    pub fn command_line(&self) -> String {
        self.argv.join(" ")
    }
}

/// Produce one job per workspace, in (instance, workspace) declaration
/// order. The ordering is stable and fixes launch, log-creation and
/// shutdown order.
pub fn plan(config: &FleetConfig) -> Vec<Job> {
    // Non-UTF-8 environment entries cannot be represented in the job
    // model and are skipped; `env::vars()` would panic on them.
    let base_env: BTreeMap<String, String> = std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect();

    let mut jobs = Vec::new();
    for instance in &config.instances {
        for workspace in &instance.workspaces {
            let argv = vec![
                config.bin.clone(),
                workspace.folder_path.clone(),
                instance.domain.clone(),
                workspace.remote_id.clone(),
                instance.username.clone(),
                ENV_VAR_PASS_FLAG.to_string(),
                PASSWORD_ENV_VAR.to_string(),
            ];

            let mut env = base_env.clone();
            env.insert(PASSWORD_ENV_VAR.to_string(), instance.password.clone());

            jobs.push(Job {
                instance_name: instance.name.clone(),
                workspace_name: workspace.name.clone(),
                argv,
                env,
                log_file_path: PathBuf::from(render_log_path(
                    &config.log_to,
                    &instance.name,
                    &workspace.name,
                )),
            });
        }
    }
    jobs
}

/// Substitute `{instance_name}` and `{workspace_name}` in the log path
/// template.
pub fn render_log_path(template: &str, instance_name: &str, workspace_name: &str) -> String {
    template
        .replace("{instance_name}", instance_name)
        .replace("{workspace_name}", workspace_name)
}
