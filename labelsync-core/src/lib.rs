//! labelsync core library: desired-state types, config loading, rule
//! evaluation and the remote label API port.
//!
//! - [`types`]: newtypes and domain structs
//! - [`config`]: load / parse the YAML desired state
//! - [`rules`]: which labels a repository should carry
//! - [`api`]: [`LabelApi`], the trait every remote backend implements
//! - [`error`]: [`ConfigError`], [`ApiError`]

pub mod api;
pub mod config;
pub mod error;
pub mod rules;
pub mod types;

pub use api::LabelApi;
pub use error::{ApiError, ConfigError};
pub use rules::is_expected;
pub use types::{
    Deletion, DesiredState, Label, LabelRule, OrgName, OrganizationPolicy, RepoName,
    RepositoryRef,
};
