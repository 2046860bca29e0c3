//! Commands behind the `ncserver` binary, kept here so they can be tested
//! without spawning a process.

use anyhow::{Context, Result};
use ncserver_credentials::{
    project_users, AuthDecision, CredentialConfig, CredentialProvider, HostKeyType, PasswdFile,
    PublicKey, TreeFile, UsersProjection,
};
use ncserver_reconcile::{
    BatchSummary, ErrorCode, MemoryServer, ReconcileConfig, Reconciler, ReplayStep,
};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Loads the credential configuration, or the defaults when no file is given.
pub fn credential_config(path: Option<&Path>) -> Result<CredentialConfig> {
    match path {
        Some(path) => CredentialConfig::load(path)
            .with_context(|| format!("Failed to load credential config {}", path.display())),
        None => Ok(CredentialConfig::default()),
    }
}

/// Projects every account and its authorized keys.
pub fn users(config: &CredentialConfig) -> Result<UsersProjection> {
    let accounts = PasswdFile::new(&config.passwd_path);
    project_users(&accounts, config).context("Failed to project users")
}

/// What `host-key` reports. The private key itself is never printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostKeyReport {
    pub name: String,
    pub key_type: HostKeyType,
    pub private_key_len: usize,
}

/// Resolves host key `name` from the configuration tree stored at `tree`.
pub fn host_key(config: &CredentialConfig, tree: &Path, name: &str) -> Result<HostKeyReport> {
    let provider = CredentialProvider::new(
        PasswdFile::new(&config.passwd_path),
        TreeFile::new(tree),
        config.clone(),
    );
    let key = provider
        .resolve_host_key(name)
        .with_context(|| format!("Failed to resolve host key \"{name}\""))?;
    Ok(HostKeyReport {
        name: name.to_string(),
        key_type: key.key_type,
        private_key_len: key.private_key.expose().len(),
    })
}

/// Checks an `authorized_keys`-style key line against `user`'s keys.
pub fn check_key(config: &CredentialConfig, user: &str, key_line: &str) -> Result<AuthDecision> {
    let offered = PublicKey::from_openssh(key_line).context("Failed to parse offered key")?;
    let provider = CredentialProvider::new(
        PasswdFile::new(&config.passwd_path),
        ncserver_types::ConfigTree::new(),
        config.clone(),
    );
    Ok(provider.authenticate_public_key(user, &offered))
}

/// The step that aborted a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayFailure {
    pub step: usize,
    pub code: ErrorCode,
    pub message: String,
}

/// Outcome of replaying a recorded file against an in-memory runtime.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub summaries: Vec<BatchSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<ReplayFailure>,
    pub runtime: MemoryServer,
}

/// Reads a JSON array of replay steps.
pub fn load_steps(path: &Path) -> Result<Vec<ReplayStep>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read replay file {}", path.display()))?;
    let steps: Vec<ReplayStep> = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse replay file {}", path.display()))?;
    for (index, step) in steps.iter().enumerate() {
        step.batch
            .tree()
            .check_links()
            .with_context(|| format!("Replay step {index} has a malformed tree"))?;
    }
    Ok(steps)
}

/// Applies `steps` in order. Stops at the first failing step and reports it
/// along with the state reached so far.
pub fn replay(steps: &[ReplayStep], config: ReconcileConfig) -> ReplayReport {
    let reconciler = Reconciler::new(config);
    let mut runtime = MemoryServer::new();
    let mut summaries = Vec::with_capacity(steps.len());
    let mut failure = None;

    for (index, step) in steps.iter().enumerate() {
        match reconciler.reconcile(step.subtree, &step.batch, &mut runtime) {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                warn!("Replay stopped at step {}: {}", index, e);
                failure = Some(ReplayFailure {
                    step: index,
                    code: e.code(),
                    message: e.to_string(),
                });
                break;
            }
        }
    }
    info!("Replayed {} of {} steps", summaries.len(), steps.len());

    ReplayReport {
        summaries,
        failure,
        runtime,
    }
}
