//! Label rule evaluation: which labels belong on which repository.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{Label, LabelRule, OrganizationPolicy, RepositoryRef};

/// Whether `rule` wants its label on `repository`.
///
/// Exclusion wins; a non-empty inclusion list restricts; otherwise the rule
/// applies everywhere.
pub fn is_expected(rule: &LabelRule, repository: &str) -> bool {
    if rule.ignore_repositories.contains(repository) {
        return false;
    }
    if !rule.repositories.is_empty() {
        return rule.repositories.contains(repository);
    }
    true
}

impl OrganizationPolicy {
    /// Fork gate: forks are only managed when the policy opts in.
    pub fn manages(&self, repository: &RepositoryRef) -> bool {
        self.fork || !repository.fork
    }

    /// Union of label names whose rule applies to `repository`.
    pub fn expected_labels(&self, repository: &str) -> BTreeSet<String> {
        self.labels
            .iter()
            .filter(|rule| is_expected(rule, repository))
            .map(|rule| rule.name.clone())
            .collect()
    }

    /// The label definition to apply for each expected name, in rule order.
    ///
    /// When several applicable rules share a name, the last one's description
    /// and color are used and the label appears once, at its first position.
    pub fn definitions_for(&self, repository: &str) -> Vec<Label> {
        let mut order: Vec<&str> = Vec::new();
        let mut by_name: BTreeMap<&str, &LabelRule> = BTreeMap::new();
        for rule in self.labels.iter().filter(|r| is_expected(r, repository)) {
            if by_name.insert(rule.name.as_str(), rule).is_none() {
                order.push(rule.name.as_str());
            }
        }
        order
            .into_iter()
            .filter_map(|name| by_name.get(name).map(|rule| rule.to_label()))
            .collect()
    }
}
