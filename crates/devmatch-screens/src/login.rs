use tracing::{debug, warn};

use devmatch_client::{ApiClient, ClientError};
use devmatch_store::{SessionStore, USER_ID_KEY};

/// Login screen states. `Submitting` covers the in-flight resolve call;
/// a successful submit routes out of the screen entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    Checking,
    Unauthenticated,
    Submitting,
}

/// The identity gate: resolves a persisted identity, or exchanges a
/// username for one and persists it. The store and API client are passed
/// in explicitly so the machine stays testable in isolation.
pub struct IdentityGate {
    state: LoginState,
}

impl IdentityGate {
    pub fn new() -> Self {
        Self {
            state: LoginState::Checking,
        }
    }

    pub fn state(&self) -> LoginState {
        self.state
    }

    /// Startup check. A stored, non-empty identifier routes straight to
    /// browsing — no network call. A store read failure is treated as no
    /// persisted identity: fail open to the login flow.
    pub fn check_persisted_identity(&mut self, store: &SessionStore) -> Option<String> {
        let stored = match store.get(USER_ID_KEY) {
            Ok(value) => value,
            Err(e) => {
                warn!("session store read failed, treating as signed out: {:#}", e);
                None
            }
        };

        match stored {
            Some(id) if !id.is_empty() => {
                debug!("persisted identity found, skipping login");
                Some(id)
            }
            _ => {
                self.state = LoginState::Unauthenticated;
                None
            }
        }
    }

    /// Exchange `username` for a durable identifier, persist it, and hand
    /// it back for routing. After a successful return the persisted
    /// identifier and the returned one are identical.
    ///
    /// On failure the screen drops back to `Unauthenticated` and the error
    /// surfaces to the caller for a retry prompt. A blank username never
    /// reaches the backend.
    pub async fn submit_username(
        &mut self,
        api: &ApiClient,
        store: &SessionStore,
        username: &str,
    ) -> Result<String, ClientError> {
        if username.trim().is_empty() {
            return Err(ClientError::EmptyUsername);
        }

        self.state = LoginState::Submitting;

        let result = resolve_and_persist(api, store, username).await;
        if result.is_err() {
            self.state = LoginState::Unauthenticated;
        }
        result
    }
}

async fn resolve_and_persist(
    api: &ApiClient,
    store: &SessionStore,
    username: &str,
) -> Result<String, ClientError> {
    let id = api.resolve_user(username).await?;
    store
        .set(USER_ID_KEY, &id)
        .map_err(ClientError::Persistence)?;
    Ok(id)
}
