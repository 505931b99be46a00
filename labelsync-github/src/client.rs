//! Blocking GitHub REST client implementing [`LabelApi`].
//!
//! Listings follow the `Link: <…>; rel="next"` header until it disappears.
//! Rate-limit headers are tracked on every response; once the budget is spent
//! further calls fail fast with [`ApiError::RateLimited`] until the reset time.
//! Nothing is retried.

use std::collections::BTreeSet;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use labelsync_core::{ApiError, Deletion, Label, LabelApi, OrgName, RepoName, RepositoryRef};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("labelsync/", env!("CARGO_PKG_VERSION"));
const PER_PAGE: u32 = 100;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GitHubLabel {
    name: String,
    #[serde(default)]
    description: Option<String>,
    color: String,
}

impl From<GitHubLabel> for Label {
    fn from(label: GitHubLabel) -> Self {
        Label {
            name: label.name,
            description: label.description.unwrap_or_default(),
            color: label.color,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GitHubRepository {
    name: String,
    #[serde(default)]
    fork: bool,
    #[serde(default)]
    archived: bool,
}

#[derive(Debug, Deserialize)]
struct GitHubError {
    message: String,
}

// ---------------------------------------------------------------------------
// Rate limit bookkeeping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RateLimit {
    remaining: Option<u64>,
    /// Unix seconds at which the window resets.
    reset_at: Option<u64>,
}

impl RateLimit {
    fn observe(&mut self, response: &ureq::Response) {
        if let Some(remaining) = header_u64(response, "x-ratelimit-remaining") {
            self.remaining = Some(remaining);
        }
        if let Some(reset) = header_u64(response, "x-ratelimit-reset") {
            self.reset_at = Some(reset);
        }
    }

    /// Time left until the window resets, if the budget is spent.
    fn exhausted_for(&self, now: u64) -> Option<Duration> {
        match (self.remaining, self.reset_at) {
            (Some(0), Some(reset)) if reset > now => Some(Duration::from_secs(reset - now)),
            _ => None,
        }
    }
}

fn header_u64(response: &ureq::Response, name: &str) -> Option<u64> {
    response.header(name).and_then(|v| v.trim().parse().ok())
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// GitHub label client authenticated with a bearer token.
pub struct GitHubClient {
    agent: ureq::Agent,
    base_url: String,
    token: String,
    rate_limit: RateLimit,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .field("rate_limit", &self.rate_limit)
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Client for public GitHub.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, DEFAULT_API_URL)
    }

    /// Client for a GitHub Enterprise (or test) endpoint.
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            rate_limit: RateLimit::default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn repo_url(&self, org: &OrgName, repo: &RepoName) -> String {
        format!(
            "{}/repos/{}/{}",
            self.base_url,
            urlencoding::encode(&org.0),
            urlencoding::encode(&repo.0)
        )
    }

    fn label_url(&self, org: &OrgName, repo: &RepoName, name: &str) -> String {
        format!(
            "{}/labels/{}",
            self.repo_url(org, repo),
            urlencoding::encode(name)
        )
    }

    /// Issue one request. Non-2xx responses become [`ApiError`]s.
    fn send(
        &mut self,
        method: &str,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<ureq::Response, ApiError> {
        if let Some(reset_in) = self.rate_limit.exhausted_for(now_unix()) {
            return Err(ApiError::RateLimited { reset_in });
        }

        tracing::debug!(method, url, "GitHub request");
        let request = self
            .agent
            .request(method, url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/vnd.github+json")
            .set("X-GitHub-Api-Version", API_VERSION);
        let outcome = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };

        match outcome {
            Ok(response) => {
                self.rate_limit.observe(&response);
                Ok(response)
            }
            Err(ureq::Error::Status(status, response)) => {
                self.rate_limit.observe(&response);
                Err(self.status_error(status, response))
            }
            Err(ureq::Error::Transport(transport)) => Err(ApiError::Transport(transport.to_string())),
        }
    }

    fn status_error(&self, status: u16, response: ureq::Response) -> ApiError {
        let raw = response.into_string().unwrap_or_default();
        let message = serde_json::from_str::<GitHubError>(&raw)
            .map(|e| e.message)
            .unwrap_or(raw);

        match status {
            401 => ApiError::Unauthorized { status, message },
            403 | 429 => match self.rate_limit.exhausted_for(now_unix()) {
                Some(reset_in) => ApiError::RateLimited { reset_in },
                None => ApiError::Status { status, message },
            },
            _ => ApiError::Status { status, message },
        }
    }

    /// GET every page starting at `first_url`.
    fn get_all<T: DeserializeOwned>(&mut self, first_url: String) -> Result<Vec<T>, ApiError> {
        let mut items = Vec::new();
        let mut next = Some(first_url);
        while let Some(url) = next {
            let response = self.send("GET", &url, None)?;
            next = response.header("link").and_then(next_link);
            let page: Vec<T> = response
                .into_json()
                .map_err(|e| ApiError::Decode(e.to_string()))?;
            items.extend(page);
        }
        Ok(items)
    }

    fn list_owner_repositories(&mut self, url: String) -> Result<Vec<RepositoryRef>, ApiError> {
        let repos: Vec<GitHubRepository> = self.get_all(url)?;
        Ok(repos
            .into_iter()
            .map(|r| RepositoryRef {
                name: RepoName::from(r.name),
                fork: r.fork,
                archived: r.archived,
            })
            .collect())
    }
}

impl LabelApi for GitHubClient {
    fn list_repositories(&mut self, org: &OrgName) -> Result<Vec<RepositoryRef>, ApiError> {
        let owner = urlencoding::encode(&org.0).into_owned();
        let org_url = format!(
            "{}/orgs/{owner}/repos?type=all&per_page={PER_PAGE}",
            self.base_url
        );
        match self.list_owner_repositories(org_url) {
            Err(err) if err.status() == Some(404) => {
                tracing::debug!(owner = %org, "not an organization; listing user repositories");
                let user_url = format!("{}/users/{owner}/repos?per_page={PER_PAGE}", self.base_url);
                self.list_owner_repositories(user_url)
            }
            other => other,
        }
    }

    fn list_labels(
        &mut self,
        org: &OrgName,
        repo: &RepoName,
    ) -> Result<BTreeSet<String>, ApiError> {
        let url = format!("{}/labels?per_page={PER_PAGE}", self.repo_url(org, repo));
        let labels: Vec<GitHubLabel> = self.get_all(url)?;
        Ok(labels.into_iter().map(|l| l.name).collect())
    }

    fn get_label(
        &mut self,
        org: &OrgName,
        repo: &RepoName,
        name: &str,
    ) -> Result<Option<Label>, ApiError> {
        let url = self.label_url(org, repo, name);
        match self.send("GET", &url, None) {
            Ok(response) => {
                let label: GitHubLabel = response
                    .into_json()
                    .map_err(|e| ApiError::Decode(e.to_string()))?;
                Ok(Some(label.into()))
            }
            Err(err) if err.status() == Some(404) => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn create_label(
        &mut self,
        org: &OrgName,
        repo: &RepoName,
        label: &Label,
    ) -> Result<(), ApiError> {
        let url = format!("{}/labels", self.repo_url(org, repo));
        let body = json!({
            "name": label.name,
            "color": label.color,
            "description": label.description,
        });
        self.send("POST", &url, Some(body))?;
        Ok(())
    }

    fn edit_label(
        &mut self,
        org: &OrgName,
        repo: &RepoName,
        name: &str,
        label: &Label,
    ) -> Result<(), ApiError> {
        let url = self.label_url(org, repo, name);
        let body = json!({
            "new_name": label.name,
            "color": label.color,
            "description": label.description,
        });
        self.send("PATCH", &url, Some(body))?;
        Ok(())
    }

    fn delete_label(
        &mut self,
        org: &OrgName,
        repo: &RepoName,
        name: &str,
    ) -> Result<Deletion, ApiError> {
        let url = self.label_url(org, repo, name);
        match self.send("DELETE", &url, None) {
            Ok(_) => Ok(Deletion::Deleted),
            Err(err) if err.status() == Some(404) => Ok(Deletion::AlreadyAbsent),
            Err(err) => Err(err),
        }
    }
}

/// Extract the `rel="next"` target from a `Link` header.
pub(crate) fn next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|part| {
        let mut segments = part.split(';');
        let target = segments.next()?.trim();
        let is_next = segments.any(|s| s.trim() == r#"rel="next""#);
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_link_picks_next_relation() {
        let header = r#"<https://api.github.com/repos/acme/app/labels?page=2>; rel="next", <https://api.github.com/repos/acme/app/labels?page=5>; rel="last""#;
        assert_eq!(
            next_link(header).as_deref(),
            Some("https://api.github.com/repos/acme/app/labels?page=2")
        );
    }

    #[test]
    fn next_link_absent_on_last_page() {
        let header = r#"<https://api.github.com/x?page=1>; rel="first", <https://api.github.com/x?page=4>; rel="prev""#;
        assert_eq!(next_link(header), None);
    }

    #[test]
    fn label_names_are_percent_encoded() {
        let client = GitHubClient::with_base_url("token", "https://ghe.example.com/api/v3/");
        let url = client.label_url(
            &OrgName::from("acme"),
            &RepoName::from("app"),
            "good first issue",
        );
        assert_eq!(
            url,
            "https://ghe.example.com/api/v3/repos/acme/app/labels/good%20first%20issue"
        );
        assert_eq!(
            client.label_url(&OrgName::from("acme"), &RepoName::from("app"), "area/ui"),
            "https://ghe.example.com/api/v3/repos/acme/app/labels/area%2Fui"
        );
    }

    #[test]
    fn rate_limit_exhaustion_window() {
        let limit = RateLimit {
            remaining: Some(0),
            reset_at: Some(1_000),
        };
        assert_eq!(limit.exhausted_for(940), Some(Duration::from_secs(60)));
        assert_eq!(limit.exhausted_for(1_000), None);

        let healthy = RateLimit {
            remaining: Some(12),
            reset_at: Some(1_000),
        };
        assert_eq!(healthy.exhausted_for(940), None);
        assert_eq!(RateLimit::default().exhausted_for(940), None);
    }

    #[test]
    fn debug_output_hides_token() {
        let client = GitHubClient::new("super-secret");
        let debug = format!("{client:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains(DEFAULT_API_URL));
    }
}
