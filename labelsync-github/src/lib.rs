//! # labelsync-github
//!
//! GitHub REST v3 backend for [`labelsync_core::LabelApi`]: bearer-token
//! authentication, Link-header pagination and rate-limit tracking over a
//! blocking `ureq` agent.

pub mod client;

pub use client::{GitHubClient, DEFAULT_API_URL};
