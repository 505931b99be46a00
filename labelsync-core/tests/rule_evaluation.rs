//! Parameterised rule evaluation tests for `labelsync-core`.
//!
//! Each `#[case]` builds its own rule.

use labelsync_core::types::{LabelRule, OrganizationPolicy, RepoName};
use labelsync_core::{config, is_expected};
use rstest::rstest;
use std::path::Path;

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

fn rule(include: &[&str], ignore: &[&str]) -> LabelRule {
    LabelRule {
        name: "bug".to_string(),
        description: "Something isn't working".to_string(),
        color: "d73a4a".to_string(),
        repositories: include.iter().map(|r| RepoName::from(*r)).collect(),
        ignore_repositories: ignore.iter().map(|r| RepoName::from(*r)).collect(),
    }
}

// ---------------------------------------------------------------------------
// Exclusion always wins
// ---------------------------------------------------------------------------

#[rstest]
#[case(&[], &["app"])]
#[case(&["app"], &["app"])]
#[case(&["app", "web"], &["app", "docs"])]
fn excluded_repository_never_expected(#[case] include: &[&str], #[case] ignore: &[&str]) {
    let r = rule(include, ignore);
    assert!(!is_expected(&r, "app"));
}

// ---------------------------------------------------------------------------
// Empty inclusion list applies everywhere else
// ---------------------------------------------------------------------------

#[rstest]
#[case("app")]
#[case("web")]
#[case("archived-repo")]
#[case("")]
fn empty_inclusion_applies_to_all(#[case] repo: &str) {
    assert!(is_expected(&rule(&[], &[]), repo));
}

#[rstest]
#[case("app", true)]
#[case("archived-repo", false)]
fn empty_inclusion_respects_exclusion(#[case] repo: &str, #[case] expected: bool) {
    assert_eq!(is_expected(&rule(&[], &["archived-repo"]), repo), expected);
}

// ---------------------------------------------------------------------------
// Non-empty inclusion list restricts
// ---------------------------------------------------------------------------

#[rstest]
#[case("app", true)]
#[case("web", true)]
#[case("docs", false)]
#[case("legacy", false)]
fn inclusion_list_restricts(#[case] repo: &str, #[case] expected: bool) {
    let r = rule(&["app", "web", "legacy"], &["legacy"]);
    assert_eq!(is_expected(&r, repo), expected);
}

#[test]
fn names_are_case_sensitive() {
    let r = rule(&["App"], &[]);
    assert!(is_expected(&r, "App"));
    assert!(!is_expected(&r, "app"));
}

// ---------------------------------------------------------------------------
// Policy level: loaded from YAML
// ---------------------------------------------------------------------------

#[test]
fn expected_set_is_union_over_rules() {
    let yaml = r#"
acme:
  labels:
    - name: bug
      color: d73a4a
    - name: frontend
      color: 0e8a16
      repositories: [web]
    - name: backend
      color: 1d76db
      ignoreRepositories: [web]
"#;
    let state = config::from_yaml_str(Path::new("labels.yml"), yaml).expect("parse");
    let policy: &OrganizationPolicy = state.policy("acme").expect("acme");

    let web: Vec<String> = policy.expected_labels("web").into_iter().collect();
    assert_eq!(web, ["bug", "frontend"]);

    let api: Vec<String> = policy.expected_labels("api").into_iter().collect();
    assert_eq!(api, ["backend", "bug"]);
}

#[test]
fn policy_without_rules_expects_nothing() {
    let policy = OrganizationPolicy::default();
    assert!(policy.expected_labels("app").is_empty());
    assert!(policy.definitions_for("app").is_empty());
}
