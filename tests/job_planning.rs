use std::error::Error;
use std::path::PathBuf;

use trsync_fleet::config::{FleetConfig, Instance, Workspace};
use trsync_fleet::plan::{plan, render_log_path, ENV_VAR_PASS_FLAG, PASSWORD_ENV_VAR};

type TestResult = Result<(), Box<dyn Error>>;

fn acme_config() -> FleetConfig {
    FleetConfig {
        bin: "/usr/bin/trsync".to_string(),
        log_to: "/tmp/trsync-logs/{instance_name}_{workspace_name}.log".to_string(),
        instances: vec![Instance {
            name: "acme".to_string(),
            domain: "acme.example".to_string(),
            username: "alice".to_string(),
            password: "hunter2".to_string(),
            workspaces: vec![
                Workspace {
                    name: "ws1".to_string(),
                    folder_path: "/tmp/a".to_string(),
                    remote_id: "10".to_string(),
                },
                Workspace {
                    name: "ws2".to_string(),
                    folder_path: "/tmp/b".to_string(),
                    remote_id: "20".to_string(),
                },
            ],
        }],
    }
}

#[test]
fn one_job_per_workspace_in_declaration_order() -> TestResult {
    let mut config = acme_config();
    config.instances.push(Instance {
        name: "beta".to_string(),
        domain: "beta.example".to_string(),
        username: "bob".to_string(),
        password: "swordfish".to_string(),
        workspaces: vec![Workspace {
            name: "docs".to_string(),
            folder_path: "/srv/docs".to_string(),
            remote_id: "7".to_string(),
        }],
    });

    let jobs = plan(&config);
    let pairs: Vec<String> = jobs.iter().map(|j| j.pair()).collect();
    assert_eq!(pairs, vec!["acme::ws1", "acme::ws2", "beta::docs"]);

    Ok(())
}

#[test]
fn argv_follows_the_worker_contract() -> TestResult {
    let jobs = plan(&acme_config());
    assert_eq!(jobs.len(), 2);

    assert_eq!(
        jobs[0].argv,
        vec![
            "/usr/bin/trsync",
            "/tmp/a",
            "acme.example",
            "10",
            "alice",
            ENV_VAR_PASS_FLAG,
            PASSWORD_ENV_VAR,
        ]
    );

    // The two argvs differ only in folder path and remote id.
    assert_eq!(jobs[1].argv[1], "/tmp/b");
    assert_eq!(jobs[1].argv[3], "20");
    for idx in [0, 2, 4, 5, 6] {
        assert_eq!(jobs[0].argv[idx], jobs[1].argv[idx]);
    }

    Ok(())
}

#[test]
fn secret_travels_in_env_and_never_in_argv() -> TestResult {
    let jobs = plan(&acme_config());

    for job in &jobs {
        assert_eq!(job.env.get(PASSWORD_ENV_VAR).map(String::as_str), Some("hunter2"));
        assert!(!job.argv.iter().any(|arg| arg.contains("hunter2")));
    }

    Ok(())
}

#[test]
fn sibling_instances_do_not_share_secrets() -> TestResult {
    let mut config = acme_config();
    config.instances.push(Instance {
        name: "beta".to_string(),
        domain: "beta.example".to_string(),
        username: "bob".to_string(),
        password: "swordfish".to_string(),
        workspaces: vec![Workspace {
            name: "docs".to_string(),
            folder_path: "/srv/docs".to_string(),
            remote_id: "7".to_string(),
        }],
    });

    let jobs = plan(&config);
    let acme_job = &jobs[0];
    let beta_job = &jobs[2];

    assert_eq!(
        acme_job.env.get(PASSWORD_ENV_VAR).map(String::as_str),
        Some("hunter2")
    );
    assert_eq!(
        beta_job.env.get(PASSWORD_ENV_VAR).map(String::as_str),
        Some("swordfish")
    );
    assert!(!acme_job.env.values().any(|v| v == "swordfish"));
    assert!(!beta_job.env.values().any(|v| v == "hunter2"));

    Ok(())
}

#[test]
fn env_is_a_copy_of_the_supervisor_environment() -> TestResult {
    let jobs = plan(&acme_config());

    for (key, value) in std::env::vars() {
        assert_eq!(jobs[0].env.get(&key), Some(&value), "env var {key} not copied");
    }

    Ok(())
}

#[test]
fn log_paths_are_rendered_per_pair() -> TestResult {
    let jobs = plan(&acme_config());
    assert_eq!(
        jobs[0].log_file_path,
        PathBuf::from("/tmp/trsync-logs/acme_ws1.log")
    );
    assert_eq!(
        jobs[1].log_file_path,
        PathBuf::from("/tmp/trsync-logs/acme_ws2.log")
    );

    assert_eq!(
        render_log_path("{workspace_name}/{instance_name}", "i", "w"),
        "w/i"
    );

    Ok(())
}

#[test]
fn instance_without_workspaces_yields_no_jobs() -> TestResult {
    let mut config = acme_config();
    config.instances[0].workspaces.clear();

    assert!(plan(&config).is_empty());

    Ok(())
}
