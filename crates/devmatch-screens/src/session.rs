use tracing::{info, warn};

use devmatch_client::{ApiClient, ClientError, MatchSubscription};
use devmatch_store::SessionStore;
use devmatch_types::events::PushEvent;
use devmatch_types::models::{Decision, Profile};

use crate::browser::CandidateBrowser;

/// One browsing session: the pure browser machine plus its live
/// collaborators (typed API client, push subscription, user identity).
#[derive(Debug)]
pub struct BrowserSession {
    user_id: String,
    api: ApiClient,
    browser: CandidateBrowser,
    subscription: Option<MatchSubscription>,
}

impl BrowserSession {
    /// Enter browsing for `user_id`: fetch the candidate queue and open
    /// the push subscription concurrently. The fetch failing is fatal to
    /// entry; a dead push channel only costs live match events.
    pub async fn enter(api: ApiClient, user_id: String) -> Result<Self, ClientError> {
        let (candidates, subscription) = tokio::join!(
            api.list_candidates(&user_id),
            MatchSubscription::connect(api.base_url(), &user_id),
        );

        let candidates = candidates?;
        let subscription = match subscription {
            Ok(sub) => Some(sub),
            Err(e) => {
                warn!("push channel unavailable, match events disabled: {}", e);
                None
            }
        };

        let mut browser = CandidateBrowser::new();
        browser.queue_loaded(candidates);
        info!(
            "entered browsing as {} with {} candidates",
            user_id,
            browser.remaining()
        );

        Ok(Self {
            user_id,
            api,
            browser,
            subscription,
        })
    }

    pub fn browser(&self) -> &CandidateBrowser {
        &self.browser
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Like the queue head. The local pop happens synchronously, before
    /// the network call; recording is fire-and-forget and never rolled
    /// back or re-queued.
    pub fn like(&mut self) -> Option<Profile> {
        let profile = self.browser.like()?;
        self.record(Decision::Like, &profile);
        Some(profile)
    }

    /// Dislike the queue head. Same contract as `like`.
    pub fn dislike(&mut self) -> Option<Profile> {
        let profile = self.browser.dislike()?;
        self.record(Decision::Dislike, &profile);
        Some(profile)
    }

    fn record(&self, decision: Decision, profile: &Profile) {
        let api = self.api.clone();
        let user_id = self.user_id.clone();
        let candidate_id = profile.id.clone();
        tokio::spawn(async move {
            if let Err(e) = api.record_decision(&user_id, &candidate_id, decision).await {
                warn!("failed to record {:?} of {}: {}", decision, candidate_id, e);
            }
        });
    }

    /// Await the next pushed match and fold it into the overlay. Returns
    /// `None` once when the channel dies; pends forever after that (and
    /// when no channel was ever established), so it is safe to poll in a
    /// select loop.
    pub async fn next_push(&mut self) -> Option<Profile> {
        match &mut self.subscription {
            Some(sub) => match sub.next_event().await {
                Some(PushEvent::Match(profile)) => {
                    info!("match with {}", profile.name);
                    self.browser.record_match(profile.clone());
                    Some(profile)
                }
                None => {
                    warn!("push channel closed, match events disabled");
                    self.subscription = None;
                    None
                }
            },
            None => std::future::pending::<Option<Profile>>().await,
        }
    }

    /// Hide the match overlay. No network effect.
    pub fn dismiss_match(&mut self) {
        self.browser.dismiss_match();
    }

    /// End the session: clear the persisted identity, close the push
    /// channel, and park the machine in its terminal state.
    pub fn logout(mut self, store: &SessionStore) -> Result<(), ClientError> {
        if let Some(sub) = self.subscription.take() {
            sub.close();
        }
        self.browser.log_out();
        store.clear().map_err(ClientError::Persistence)?;
        info!("{} signed out", self.user_id);
        Ok(())
    }
}
