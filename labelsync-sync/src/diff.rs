//! Current-vs-expected label set difference for one repository.

use std::collections::BTreeSet;

/// What has to happen to a repository's labels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelDiff {
    /// Present on the repository but not expected.
    pub to_delete: BTreeSet<String>,
    /// Every expected label. Applied even when it already matches so
    /// description and color converge.
    pub to_apply: BTreeSet<String>,
}

/// Compute the label diff for a repository. Names compare exactly.
pub fn diff(current: &BTreeSet<String>, expected: &BTreeSet<String>) -> LabelDiff {
    LabelDiff {
        to_delete: current.difference(expected).cloned().collect(),
        to_apply: expected.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn stale_label_is_deleted() {
        let d = diff(&set(&["bug", "wontfix"]), &set(&["bug"]));
        assert_eq!(d.to_delete, set(&["wontfix"]));
        assert_eq!(d.to_apply, set(&["bug"]));
    }

    #[test]
    fn matching_labels_are_still_applied() {
        let d = diff(&set(&["bug"]), &set(&["bug"]));
        assert!(d.to_delete.is_empty());
        assert_eq!(d.to_apply, set(&["bug"]));
    }

    #[test]
    fn empty_repository_gets_everything() {
        let d = diff(&BTreeSet::new(), &set(&["bug", "docs"]));
        assert!(d.to_delete.is_empty());
        assert_eq!(d.to_apply, set(&["bug", "docs"]));
    }

    #[test]
    fn case_differences_are_distinct_labels() {
        let d = diff(&set(&["Bug"]), &set(&["bug"]));
        assert_eq!(d.to_delete, set(&["Bug"]));
    }

    #[rstest]
    #[case(&[], &[])]
    #[case(&["a", "b", "c"], &[])]
    #[case(&["a", "b"], &["b", "c"])]
    #[case(&["x"], &["x", "y", "z"])]
    fn deletes_are_disjoint_and_cover_current(#[case] current: &[&str], #[case] expected: &[&str]) {
        let current = set(current);
        let expected = set(expected);
        let d = diff(&current, &expected);

        assert!(d.to_delete.is_disjoint(&expected));
        let covered: BTreeSet<String> = d.to_delete.union(&expected).cloned().collect();
        assert!(covered.is_superset(&current));
        assert_eq!(d.to_apply, expected);
    }
}
