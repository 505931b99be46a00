//! Error types for labelsync-sync.

use thiserror::Error;

use labelsync_core::{ApiError, OrgName, RepoName};

/// All errors that can abort a sync run.
///
/// Every variant carries the organization, repository and label the failing
/// call was made for.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A scoped run named an organization the config does not declare.
    #[error("organization {org} is not declared in the config")]
    UnknownOrganization { org: OrgName },

    #[error("failed to list repositories for {org}: {source}")]
    ListRepositories {
        org: OrgName,
        #[source]
        source: ApiError,
    },

    #[error("{org}/{repo}: failed to list labels: {source}")]
    ListLabels {
        org: OrgName,
        repo: RepoName,
        #[source]
        source: ApiError,
    },

    #[error("{org}/{repo}: failed to look up label \"{label}\": {source}")]
    GetLabel {
        org: OrgName,
        repo: RepoName,
        label: String,
        #[source]
        source: ApiError,
    },

    #[error("{org}/{repo}: failed to create label \"{label}\": {source}")]
    CreateLabel {
        org: OrgName,
        repo: RepoName,
        label: String,
        #[source]
        source: ApiError,
    },

    #[error("{org}/{repo}: failed to update label \"{label}\": {source}")]
    EditLabel {
        org: OrgName,
        repo: RepoName,
        label: String,
        #[source]
        source: ApiError,
    },

    #[error("{org}/{repo}: failed to delete label \"{label}\": {source}")]
    DeleteLabel {
        org: OrgName,
        repo: RepoName,
        label: String,
        #[source]
        source: ApiError,
    },
}

impl SyncError {
    /// The underlying API error, when the failure came from a remote call.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            SyncError::UnknownOrganization { .. } => None,
            SyncError::ListRepositories { source, .. }
            | SyncError::ListLabels { source, .. }
            | SyncError::GetLabel { source, .. }
            | SyncError::CreateLabel { source, .. }
            | SyncError::EditLabel { source, .. }
            | SyncError::DeleteLabel { source, .. } => Some(source),
        }
    }
}
