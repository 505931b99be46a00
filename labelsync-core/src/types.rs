//! Domain types for the label desired state.
//!
//! The YAML document maps organization names to an [`OrganizationPolicy`];
//! each policy carries the ordered [`LabelRule`]s for that organization.
//! All types deserialize via serde + serde_yaml.

use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed organization (or account) name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgName(pub String);

impl fmt::Display for OrgName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for OrgName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrgName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl Borrow<str> for OrgName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A strongly-typed repository name, without the owner prefix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoName(pub String);

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RepoName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RepoName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl Borrow<str> for RepoName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Desired state
// ---------------------------------------------------------------------------

/// One declared label and the repositories it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelRule {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Six hex digits, no leading `#` once loaded.
    pub color: String,
    /// When non-empty, only these repositories get the label.
    #[serde(default)]
    pub repositories: BTreeSet<RepoName>,
    /// These repositories never get the label. Wins over `repositories`.
    #[serde(default, rename = "ignoreRepositories")]
    pub ignore_repositories: BTreeSet<RepoName>,
}

impl LabelRule {
    /// The label payload this rule asks the remote side to hold.
    pub fn to_label(&self) -> Label {
        Label {
            name: self.name.clone(),
            description: self.description.clone(),
            color: self.color.clone(),
        }
    }
}

/// Label policy for a single organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct OrganizationPolicy {
    /// Whether forked repositories are managed.
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub labels: Vec<LabelRule>,
}

/// Root of the label configuration: organization name → policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct DesiredState {
    pub organizations: BTreeMap<OrgName, OrganizationPolicy>,
}

impl DesiredState {
    pub fn is_empty(&self) -> bool {
        self.organizations.is_empty()
    }

    pub fn policy(&self, org: &str) -> Option<&OrganizationPolicy> {
        self.organizations.get(org)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OrgName, &OrganizationPolicy)> {
        self.organizations.iter()
    }
}

// ---------------------------------------------------------------------------
// Remote side
// ---------------------------------------------------------------------------

/// A label as held by the remote tracker, identified by name per repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub color: String,
}

/// A repository as returned by the organization listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub name: RepoName,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
}

impl RepositoryRef {
    pub fn new(name: impl Into<RepoName>, fork: bool) -> Self {
        Self {
            name: name.into(),
            fork,
            archived: false,
        }
    }
}

/// Outcome of a delete request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    /// The label was not on the repository to begin with.
    AlreadyAbsent,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newtype_display() {
        assert_eq!(OrgName::from("acme").to_string(), "acme");
        assert_eq!(RepoName::from("app").to_string(), "app");
    }

    #[test]
    fn repo_set_lookup_by_str() {
        let set: BTreeSet<RepoName> = [RepoName::from("app"), RepoName::from("web")]
            .into_iter()
            .collect();
        assert!(set.contains("app"));
        assert!(!set.contains("api"));
    }

    #[test]
    fn rule_to_label_copies_display_fields() {
        let rule = LabelRule {
            name: "bug".to_string(),
            description: "Something is broken".to_string(),
            color: "d73a4a".to_string(),
            repositories: BTreeSet::new(),
            ignore_repositories: BTreeSet::new(),
        };
        let label = rule.to_label();
        assert_eq!(label.name, "bug");
        assert_eq!(label.description, "Something is broken");
        assert_eq!(label.color, "d73a4a");
    }

    #[test]
    fn repository_ref_defaults_flags() {
        let repo: RepositoryRef = serde_yaml::from_str("name: app").expect("deserialize");
        assert_eq!(repo, RepositoryRef::new("app", false));
    }
}
