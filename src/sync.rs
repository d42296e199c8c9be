//! Reconciliation of the declared command set with the remote catalog.
//!
//! The diff keeps every remote command that is structurally equal to its
//! desired counterpart, deletes the rest and creates what is missing, so an
//! unchanged set performs zero create/delete calls and remote command ids
//! stay stable across deploys. Registration runs sequentially and honors the
//! rate-limit headers after every call; run it once at startup or as a
//! one-shot admin step, never concurrently.

use crate::error::RegisterError;
use crate::http::{cooldown, CommandScope, CommandsApi};
use crate::option::CommandSpec;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// What a sync run did, and the remote ids of the commands now registered.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Names of the commands created by this run.
    pub created: Vec<String>,
    /// Names of the remote commands deleted by this run.
    pub deleted: Vec<String>,
    /// Names of the remote commands left untouched.
    pub unchanged: Vec<String>,
    /// Remote id per command name after the run.
    pub ids: HashMap<String, String>,
}

/// Makes the remote catalog at `scope` equal to `desired` with per-command
/// diffing.
pub async fn run<A>(
    api: &A,
    scope: &CommandScope,
    desired: &[CommandSpec],
) -> Result<SyncReport, RegisterError>
where
    A: CommandsApi + ?Sized,
{
    let mut report = SyncReport::default();

    let response = api.fetch_commands(scope).await?;
    cooldown(response.rate_limit).await;

    let mut satisfied = HashSet::new();
    for remote in response.value {
        let matching = desired
            .iter()
            .find(|want| want.name == remote.name && want.structurally_eq(&remote));

        match (matching, &remote.id) {
            (Some(want), Some(id)) => {
                debug!("Command [{}] is up to date", want.name);
                satisfied.insert(want.name.clone());
                report.ids.insert(want.name.clone(), id.clone());
                report.unchanged.push(remote.name.clone());
            }
            (_, Some(id)) => {
                debug!("Deleting stale remote command [{}]", remote.name);
                let deleted = api.delete_command(scope, id).await?;
                cooldown(deleted.rate_limit).await;
                report.deleted.push(remote.name.clone());
            }
            // a remote command without an id cannot be deleted, leave it to
            // the next bulk overwrite
            (_, None) => {}
        }
    }

    for want in desired {
        if satisfied.contains(&want.name) {
            continue;
        }

        debug!("Creating command [{}]", want.name);
        let created = api.create_command(scope, want).await?;
        cooldown(created.rate_limit).await;

        if let Some(id) = created.value.id {
            report.ids.insert(want.name.clone(), id);
        }
        report.created.push(want.name.clone());
    }

    Ok(report)
}

/// Makes the remote catalog at `scope` equal to `desired` with a single
/// whole-catalog overwrite, the simpler alternative to [`run`].
pub async fn overwrite<A>(
    api: &A,
    scope: &CommandScope,
    desired: &[CommandSpec],
) -> Result<SyncReport, RegisterError>
where
    A: CommandsApi + ?Sized,
{
    let mut report = SyncReport::default();

    let response = api.overwrite_commands(scope, desired).await?;
    cooldown(response.rate_limit).await;

    for command in response.value {
        if let Some(id) = command.id {
            report.ids.insert(command.name.clone(), id);
        }
        report.created.push(command.name);
    }

    Ok(report)
}
