//! Scoped sync entrypoint used by the CLI.

use labelsync_core::{DesiredState, LabelApi, OrgName};

use crate::error::SyncError;
use crate::reconcile::{reconcile, sync_organization, SyncOptions, SyncReport};

/// Scope for a sync pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncScope {
    /// Every organization in the config.
    All,
    /// Only the named organizations, in the order given.
    Organizations(Vec<OrgName>),
}

/// Run the sync pipeline for a scope.
///
/// Every named organization is checked against the config before the first
/// API call, so a typo fails fast instead of half-way through a run.
pub fn run<A: LabelApi + ?Sized>(
    state: &DesiredState,
    api: &mut A,
    scope: SyncScope,
    options: SyncOptions,
) -> Result<SyncReport, SyncError> {
    let orgs = match scope {
        SyncScope::All => return reconcile(state, api, options),
        SyncScope::Organizations(orgs) => orgs,
    };

    if let Some(missing) = orgs.iter().find(|org| state.policy(&org.0).is_none()) {
        return Err(SyncError::UnknownOrganization {
            org: missing.clone(),
        });
    }

    let mut report = SyncReport {
        dry_run: options.dry_run,
        repositories: Vec::new(),
    };
    for org in &orgs {
        if let Some(policy) = state.policy(&org.0) {
            report
                .repositories
                .extend(sync_organization(api, org, policy, options)?);
        }
    }
    Ok(report)
}
