//! The remote label API port.
//!
//! The reconciler only ever talks to a [`LabelApi`]; concrete transports
//! (the GitHub REST client, test fakes) implement it. Implementations are
//! expected to follow every page of a listing before returning.

use std::collections::BTreeSet;

use crate::error::ApiError;
use crate::types::{Deletion, Label, OrgName, RepoName, RepositoryRef};

/// Label and repository operations against a remote issue tracker.
///
/// Methods take `&mut self` so implementations can keep request bookkeeping
/// (rate-limit windows, call logs) without interior mutability.
pub trait LabelApi {
    /// Every repository owned by `org`.
    fn list_repositories(&mut self, org: &OrgName) -> Result<Vec<RepositoryRef>, ApiError>;

    /// Names of every label currently on `org/repo`.
    fn list_labels(&mut self, org: &OrgName, repo: &RepoName)
        -> Result<BTreeSet<String>, ApiError>;

    /// The label called `name`, or `None` when the repository has no such label.
    fn get_label(
        &mut self,
        org: &OrgName,
        repo: &RepoName,
        name: &str,
    ) -> Result<Option<Label>, ApiError>;

    fn create_label(&mut self, org: &OrgName, repo: &RepoName, label: &Label)
        -> Result<(), ApiError>;

    /// Replace name, description and color of the existing label `name`.
    fn edit_label(
        &mut self,
        org: &OrgName,
        repo: &RepoName,
        name: &str,
        label: &Label,
    ) -> Result<(), ApiError>;

    /// Delete `name`. A label that is already gone is not an error.
    fn delete_label(
        &mut self,
        org: &OrgName,
        repo: &RepoName,
        name: &str,
    ) -> Result<Deletion, ApiError>;
}
