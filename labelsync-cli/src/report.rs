//! Human-readable run report.

use std::collections::BTreeMap;

use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use labelsync_sync::{LabelAction, RepoOutcome, RepoSyncResult, SyncReport};

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "organization")]
    org: String,
    #[tabled(rename = "repositories")]
    repositories: usize,
    #[tabled(rename = "skipped")]
    skipped: usize,
    #[tabled(rename = "created")]
    created: usize,
    #[tabled(rename = "updated")]
    updated: usize,
    #[tabled(rename = "deleted")]
    deleted: usize,
}

pub fn print(report: &SyncReport) {
    let prefix = if report.dry_run { "[dry-run] " } else { "" };

    if report.repositories.is_empty() {
        println!("{prefix}No repositories found, nothing to do");
        return;
    }

    for result in &report.repositories {
        print_repository(prefix, result);
    }

    let mut table = Table::new(summary_rows(report));
    table.with(Style::rounded());
    println!("{table}");

    let summary = report.summary();
    println!(
        "{prefix}{} repositories: {} created, {} updated, {} deleted, {} skipped",
        summary.repositories, summary.created, summary.updated, summary.deleted, summary.skipped
    );
}

fn print_repository(prefix: &str, result: &RepoSyncResult) {
    let full_name = format!("{}/{}", result.org, result.repo);
    match &result.outcome {
        RepoOutcome::SkippedFork => {
            println!("{prefix}{} {full_name} skipped (fork)", "·".bright_black());
        }
        RepoOutcome::NoExpectedLabels => {
            println!("{prefix}{} {full_name} skipped (no labels apply)", "·".bright_black());
        }
        RepoOutcome::Synced(actions) => {
            println!("{prefix}{} {full_name}", "✓".green().bold());
            for action in actions {
                println!("    {} {}", action_marker(action), action.name());
            }
        }
    }
}

fn action_marker(action: &LabelAction) -> String {
    match action {
        LabelAction::Created { .. } => "+".green().to_string(),
        LabelAction::Updated { .. } => "✎".normal().to_string(),
        LabelAction::Deleted { .. } => "-".red().to_string(),
        LabelAction::AlreadyAbsent { .. } => "·".bright_black().to_string(),
        LabelAction::WouldCreate { .. } => "~+".green().to_string(),
        LabelAction::WouldUpdate { .. } => "~✎".normal().to_string(),
        LabelAction::WouldDelete { .. } => "~-".red().to_string(),
    }
}

fn summary_rows(report: &SyncReport) -> Vec<SummaryRow> {
    let mut by_org = BTreeMap::<String, Vec<&RepoSyncResult>>::new();
    for result in &report.repositories {
        by_org.entry(result.org.0.clone()).or_default().push(result);
    }

    by_org
        .into_iter()
        .map(|(org, results)| {
            let scoped = SyncReport {
                dry_run: report.dry_run,
                repositories: results.into_iter().cloned().collect(),
            };
            let summary = scoped.summary();
            SummaryRow {
                org,
                repositories: summary.repositories,
                skipped: summary.skipped,
                created: summary.created,
                updated: summary.updated,
                deleted: summary.deleted,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelsync_core::{OrgName, RepoName};

    fn result(org: &str, repo: &str, outcome: RepoOutcome) -> RepoSyncResult {
        RepoSyncResult {
            org: OrgName::from(org),
            repo: RepoName::from(repo),
            outcome,
        }
    }

    #[test]
    fn summary_rows_group_by_organization() {
        let report = SyncReport {
            dry_run: false,
            repositories: vec![
                result(
                    "globex",
                    "site",
                    RepoOutcome::Synced(vec![LabelAction::Created {
                        name: "bug".to_string(),
                    }]),
                ),
                result("acme", "mirror", RepoOutcome::SkippedFork),
                result(
                    "acme",
                    "app",
                    RepoOutcome::Synced(vec![
                        LabelAction::Deleted {
                            name: "wontfix".to_string(),
                        },
                        LabelAction::Updated {
                            name: "bug".to_string(),
                        },
                    ]),
                ),
            ],
        };

        let rows = summary_rows(&report);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].org, "acme");
        assert_eq!(rows[0].repositories, 2);
        assert_eq!(rows[0].skipped, 1);
        assert_eq!(rows[0].deleted, 1);
        assert_eq!(rows[0].updated, 1);
        assert_eq!(rows[1].org, "globex");
        assert_eq!(rows[1].created, 1);
    }
}
