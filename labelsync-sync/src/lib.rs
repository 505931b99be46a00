//! # labelsync-sync
//!
//! Label diffing and reconciliation against a [`labelsync_core::LabelApi`].
//!
//! Call [`reconcile`] to converge every organization in a desired state, or
//! [`pipeline::run`] to restrict the run to selected organizations.

pub mod diff;
pub mod error;
pub mod pipeline;
pub mod reconcile;

pub use diff::{diff, LabelDiff};
pub use error::SyncError;
pub use reconcile::{
    reconcile, sync_organization, sync_repository, LabelAction, RepoOutcome, RepoSyncResult,
    SyncOptions, SyncReport, SyncSummary,
};
