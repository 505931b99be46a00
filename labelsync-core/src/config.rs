//! Loading the label desired state from YAML.
//!
//! # Document shape
//!
//! ```yaml
//! acme:
//!   fork: false
//!   labels:
//!     - name: bug
//!       description: Something isn't working
//!       color: d73a4a
//!       repositories: []
//!       ignoreRepositories: [archived-repo]
//! ```
//!
//! The state is read once per run and never written back.

use std::path::Path;

use crate::error::ConfigError;
use crate::types::DesiredState;

/// Load and validate the desired state at `path`.
///
/// Returns `ConfigError::Io` if the file cannot be read,
/// `ConfigError::Parse` (with path + line context) if malformed YAML,
/// `ConfigError::Invalid` if a label rule fails validation.
pub fn load(path: &Path) -> Result<DesiredState, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_yaml_str(path, &contents)
}

/// Parse and validate an in-memory document. `path` is only used for error context.
pub fn from_yaml_str(path: &Path, contents: &str) -> Result<DesiredState, ConfigError> {
    if is_blank_document(contents) {
        return Ok(DesiredState::default());
    }
    let mut state: DesiredState =
        serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    validate(&mut state)?;
    Ok(state)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Empty, comment-only, or a lone null node (`~` / `null`).
fn is_blank_document(contents: &str) -> bool {
    let mut nodes = contents.lines().map(str::trim).filter(|line| {
        !(line.is_empty() || line.starts_with('#') || *line == "---" || *line == "...")
    });
    match (nodes.next(), nodes.next()) {
        (None, _) => true,
        (Some(node), None) => matches!(node, "~" | "null" | "Null" | "NULL"),
        _ => false,
    }
}

/// Checks every rule and strips a leading `#` from colors.
fn validate(state: &mut DesiredState) -> Result<(), ConfigError> {
    for (org, policy) in state.organizations.iter_mut() {
        for rule in policy.labels.iter_mut() {
            let invalid = |reason: String| ConfigError::Invalid {
                org: org.0.clone(),
                label: rule.name.clone(),
                reason,
            };

            if rule.name.trim().is_empty() {
                return Err(invalid("name must not be empty".to_string()));
            }

            let color = rule.color.trim().trim_start_matches('#');
            if color.len() != 6 || !color.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid(format!(
                    "color '{}' must be six hex digits",
                    rule.color
                )));
            }
            rule.color = color.to_string();
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
