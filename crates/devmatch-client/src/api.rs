use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use devmatch_types::api::{ResolveUserRequest, ResolveUserResponse};
use devmatch_types::models::{Decision, Profile};

use crate::error::ClientError;

/// Bound on every backend call so an unreachable server cannot stall a
/// loading state indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin typed client over the matching backend's REST surface.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve-or-create a user by username. Returns the durable
    /// identifier the rest of the client is keyed on.
    pub async fn resolve_user(&self, username: &str) -> Result<String, ClientError> {
        let resp = self
            .http
            .post(format!("{}/devs", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .json(&ResolveUserRequest {
                username: username.to_string(),
            })
            .send()
            .await?;
        let resp = check_status(resp)?;

        let body: ResolveUserResponse = resp.json().await?;
        debug!("resolved username {:?} to id {}", username, body.id);
        Ok(body.id)
    }

    /// Fetch the ordered candidate queue for `user_id`. The server is
    /// responsible for excluding the user itself and already-decided
    /// profiles.
    pub async fn list_candidates(&self, user_id: &str) -> Result<Vec<Profile>, ClientError> {
        let resp = self
            .http
            .get(format!("{}/devs", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .header("user", user_id)
            .send()
            .await?;
        let resp = check_status(resp)?;

        Ok(resp.json().await?)
    }

    /// Record a like/dislike of `candidate_id` by `user_id`. Mutual-like
    /// detection and the resulting push happen server-side.
    pub async fn record_decision(
        &self,
        user_id: &str,
        candidate_id: &str,
        decision: Decision,
    ) -> Result<(), ClientError> {
        let resp = self
            .http
            .post(format!(
                "{}/devs/{}/{}",
                self.base_url,
                candidate_id,
                decision.path_segment()
            ))
            .timeout(REQUEST_TIMEOUT)
            .header("user", user_id)
            .send()
            .await?;
        check_status(resp)?;
        Ok(())
    }
}

fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if resp.status().is_success() {
        Ok(resp)
    } else {
        Err(ClientError::RequestRejected {
            status: resp.status(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_trailing_slashes() {
        let client = ApiClient::new("http://localhost:3333///");
        assert_eq!(client.base_url(), "http://localhost:3333");
    }
}
