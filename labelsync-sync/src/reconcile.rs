//! Label reconciliation.
//!
//! ## Per-repository protocol
//!
//! 1. Skip forks unless the policy opts in.
//! 2. Compute the expected label set from the policy's rules.
//! 3. Empty expected set → leave the repository untouched, no API calls.
//! 4. List current labels and diff them against the expected set.
//! 5. Delete every stale label (already-absent is fine).
//! 6. For every expected label: look it up, edit it in place if present,
//!    create it otherwise.
//!
//! Any API failure aborts the whole run; there is no per-repository isolation.

use labelsync_core::{
    Deletion, DesiredState, Label, LabelApi, OrgName, OrganizationPolicy, RepoName,
    RepositoryRef,
};

use crate::diff::diff;
use crate::error::SyncError;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Run-wide switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Look everything up but issue no create/edit/delete calls.
    pub dry_run: bool,
}

/// Outcome of reconciling a single label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelAction {
    Created { name: String },
    Updated { name: String },
    Deleted { name: String },
    /// Delete was requested but the label was already gone.
    AlreadyAbsent { name: String },
    /// `--dry-run` mode: the label *would* have been created.
    WouldCreate { name: String },
    WouldUpdate { name: String },
    WouldDelete { name: String },
}

impl LabelAction {
    pub fn name(&self) -> &str {
        match self {
            LabelAction::Created { name }
            | LabelAction::Updated { name }
            | LabelAction::Deleted { name }
            | LabelAction::AlreadyAbsent { name }
            | LabelAction::WouldCreate { name }
            | LabelAction::WouldUpdate { name }
            | LabelAction::WouldDelete { name } => name,
        }
    }
}

/// What happened to a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoOutcome {
    /// Fork, and the organization policy does not manage forks.
    SkippedFork,
    /// No rule applies; the repository was not touched.
    NoExpectedLabels,
    Synced(Vec<LabelAction>),
}

/// Outcome of reconciling a single repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSyncResult {
    pub org: OrgName,
    pub repo: RepoName,
    pub outcome: RepoOutcome,
}

impl RepoSyncResult {
    pub fn actions(&self) -> &[LabelAction] {
        match &self.outcome {
            RepoOutcome::Synced(actions) => actions,
            _ => &[],
        }
    }
}

/// Per-action counts across a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub repositories: usize,
    pub skipped: usize,
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    pub already_absent: usize,
}

/// Everything a run did, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub dry_run: bool,
    pub repositories: Vec<RepoSyncResult>,
}

impl SyncReport {
    /// Counts, with dry-run actions counted as what they would have been.
    pub fn summary(&self) -> SyncSummary {
        let mut summary = SyncSummary {
            repositories: self.repositories.len(),
            ..SyncSummary::default()
        };
        for result in &self.repositories {
            if !matches!(result.outcome, RepoOutcome::Synced(_)) {
                summary.skipped += 1;
            }
            for action in result.actions() {
                match action {
                    LabelAction::Created { .. } | LabelAction::WouldCreate { .. } => {
                        summary.created += 1
                    }
                    LabelAction::Updated { .. } | LabelAction::WouldUpdate { .. } => {
                        summary.updated += 1
                    }
                    LabelAction::Deleted { .. } | LabelAction::WouldDelete { .. } => {
                        summary.deleted += 1
                    }
                    LabelAction::AlreadyAbsent { .. } => summary.already_absent += 1,
                }
            }
        }
        summary
    }
}

// ---------------------------------------------------------------------------
// sync_repository
// ---------------------------------------------------------------------------

/// Reconcile the labels of one repository against `policy`.
pub fn sync_repository<A: LabelApi + ?Sized>(
    api: &mut A,
    org: &OrgName,
    policy: &OrganizationPolicy,
    repository: &RepositoryRef,
    options: SyncOptions,
) -> Result<RepoSyncResult, SyncError> {
    let repo = &repository.name;
    let result = |outcome| RepoSyncResult {
        org: org.clone(),
        repo: repo.clone(),
        outcome,
    };

    if !policy.manages(repository) {
        tracing::debug!(org = %org, repo = %repo, "skipping fork");
        return Ok(result(RepoOutcome::SkippedFork));
    }

    let expected = policy.expected_labels(&repo.0);
    if expected.is_empty() {
        tracing::debug!(org = %org, repo = %repo, "no labels expected; leaving untouched");
        return Ok(result(RepoOutcome::NoExpectedLabels));
    }

    let current = api
        .list_labels(org, repo)
        .map_err(|source| SyncError::ListLabels {
            org: org.clone(),
            repo: repo.clone(),
            source,
        })?;
    let plan = diff(&current, &expected);
    let mut actions = Vec::with_capacity(plan.to_delete.len() + plan.to_apply.len());

    for name in &plan.to_delete {
        actions.push(delete_label(api, org, repo, name, options)?);
    }

    for label in policy
        .definitions_for(&repo.0)
        .iter()
        .filter(|label| plan.to_apply.contains(&label.name))
    {
        actions.push(apply_label(api, org, repo, label, options)?);
    }

    Ok(result(RepoOutcome::Synced(actions)))
}

fn delete_label<A: LabelApi + ?Sized>(
    api: &mut A,
    org: &OrgName,
    repo: &RepoName,
    name: &str,
    options: SyncOptions,
) -> Result<LabelAction, SyncError> {
    let name_owned = name.to_string();
    if options.dry_run {
        tracing::info!(org = %org, repo = %repo, label = name, "[dry-run] would delete label");
        return Ok(LabelAction::WouldDelete { name: name_owned });
    }

    let deletion = api
        .delete_label(org, repo, name)
        .map_err(|source| SyncError::DeleteLabel {
            org: org.clone(),
            repo: repo.clone(),
            label: name_owned.clone(),
            source,
        })?;

    match deletion {
        Deletion::Deleted => {
            tracing::info!(org = %org, repo = %repo, label = name, "deleted label");
            Ok(LabelAction::Deleted { name: name_owned })
        }
        Deletion::AlreadyAbsent => {
            tracing::debug!(org = %org, repo = %repo, label = name, "label already absent");
            Ok(LabelAction::AlreadyAbsent { name: name_owned })
        }
    }
}

fn apply_label<A: LabelApi + ?Sized>(
    api: &mut A,
    org: &OrgName,
    repo: &RepoName,
    label: &Label,
    options: SyncOptions,
) -> Result<LabelAction, SyncError> {
    let name = label.name.clone();
    tracing::info!(org = %org, repo = %repo, label = %name, "creating or updating label");

    let existing = api
        .get_label(org, repo, &label.name)
        .map_err(|source| SyncError::GetLabel {
            org: org.clone(),
            repo: repo.clone(),
            label: name.clone(),
            source,
        })?;

    match (existing, options.dry_run) {
        (Some(_), true) => Ok(LabelAction::WouldUpdate { name }),
        (None, true) => Ok(LabelAction::WouldCreate { name }),
        (Some(_), false) => {
            api.edit_label(org, repo, &label.name, label)
                .map_err(|source| SyncError::EditLabel {
                    org: org.clone(),
                    repo: repo.clone(),
                    label: name.clone(),
                    source,
                })?;
            tracing::info!(org = %org, repo = %repo, label = %name, "updated label");
            Ok(LabelAction::Updated { name })
        }
        (None, false) => {
            api.create_label(org, repo, label)
                .map_err(|source| SyncError::CreateLabel {
                    org: org.clone(),
                    repo: repo.clone(),
                    label: name.clone(),
                    source,
                })?;
            tracing::info!(org = %org, repo = %repo, label = %name, "created label");
            Ok(LabelAction::Created { name })
        }
    }
}

// ---------------------------------------------------------------------------
// sync_organization / reconcile
// ---------------------------------------------------------------------------

/// Reconcile every repository owned by `org`.
pub fn sync_organization<A: LabelApi + ?Sized>(
    api: &mut A,
    org: &OrgName,
    policy: &OrganizationPolicy,
    options: SyncOptions,
) -> Result<Vec<RepoSyncResult>, SyncError> {
    let repositories = api
        .list_repositories(org)
        .map_err(|source| SyncError::ListRepositories {
            org: org.clone(),
            source,
        })?;
    tracing::info!(org = %org, repositories = repositories.len(), "syncing organization");

    let mut results = Vec::with_capacity(repositories.len());
    for repository in &repositories {
        results.push(sync_repository(api, org, policy, repository, options)?);
    }
    Ok(results)
}

/// Reconcile every organization in `state`, in sorted order.
pub fn reconcile<A: LabelApi + ?Sized>(
    state: &DesiredState,
    api: &mut A,
    options: SyncOptions,
) -> Result<SyncReport, SyncError> {
    let mut report = SyncReport {
        dry_run: options.dry_run,
        repositories: Vec::new(),
    };
    for (org, policy) in state.iter() {
        report
            .repositories
            .extend(sync_organization(api, org, policy, options)?);
    }
    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn result(outcome: RepoOutcome) -> RepoSyncResult {
        RepoSyncResult {
            org: OrgName::from("acme"),
            repo: RepoName::from("app"),
            outcome,
        }
    }

    #[test]
    fn action_name() {
        let action = LabelAction::AlreadyAbsent {
            name: "wontfix".to_string(),
        };
        assert_eq!(action.name(), "wontfix");
    }

    #[test]
    fn skipped_repositories_have_no_actions() {
        assert!(result(RepoOutcome::SkippedFork).actions().is_empty());
        assert!(result(RepoOutcome::NoExpectedLabels).actions().is_empty());
    }

    #[test]
    fn summary_counts_dry_run_as_planned_actions() {
        let report = SyncReport {
            dry_run: true,
            repositories: vec![
                result(RepoOutcome::Synced(vec![
                    LabelAction::WouldDelete {
                        name: "wontfix".to_string(),
                    },
                    LabelAction::WouldCreate {
                        name: "bug".to_string(),
                    },
                    LabelAction::WouldUpdate {
                        name: "docs".to_string(),
                    },
                ])),
                result(RepoOutcome::SkippedFork),
            ],
        };
        let summary = report.summary();
        assert_eq!(summary.repositories, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.created, 1);
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.deleted, 1);
        assert_eq!(summary.already_absent, 0);
    }
}
