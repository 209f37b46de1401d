use std::collections::VecDeque;

use devmatch_types::models::Profile;

/// Primary browsing states. The match overlay is orthogonal and tracked
/// separately; it never blocks these transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserState {
    Loading,
    Ready,
    LoggedOut,
}

/// View-state machine for the main screen: an ordered candidate queue
/// consumed strictly from the front, plus the match overlay.
///
/// The queue is the source of truth for what the user sees. Backend
/// notification of a decision is a best-effort side effect handled by the
/// session layer; there is no rollback path.
#[derive(Debug)]
pub struct CandidateBrowser {
    state: BrowserState,
    queue: VecDeque<Profile>,
    overlay: Option<Profile>,
}

impl CandidateBrowser {
    pub fn new() -> Self {
        Self {
            state: BrowserState::Loading,
            queue: VecDeque::new(),
            overlay: None,
        }
    }

    pub fn state(&self) -> BrowserState {
        self.state
    }

    /// Wholesale queue replacement on the initial fetch. Moves to `Ready`
    /// even when the fetch came back empty.
    pub fn queue_loaded(&mut self, profiles: Vec<Profile>) {
        self.queue = profiles.into();
        self.state = BrowserState::Ready;
    }

    /// Consume the queue head for a like. `None` on an empty queue or
    /// outside `Ready` — acting with no defined head is a no-op.
    pub fn like(&mut self) -> Option<Profile> {
        self.pop_head()
    }

    /// Consume the queue head for a dislike. Same contract as `like`.
    pub fn dislike(&mut self) -> Option<Profile> {
        self.pop_head()
    }

    fn pop_head(&mut self) -> Option<Profile> {
        if self.state != BrowserState::Ready {
            return None;
        }
        self.queue.pop_front()
    }

    /// Apply a pushed match: the overlay becomes visible with exactly this
    /// profile, overwriting any unacknowledged previous match. Independent
    /// of the queue — the profile may no longer (or never) be in it.
    pub fn record_match(&mut self, profile: Profile) {
        self.overlay = Some(profile);
    }

    /// Hide the overlay, whatever its prior state.
    pub fn dismiss_match(&mut self) {
        self.overlay = None;
    }

    pub fn match_overlay(&self) -> Option<&Profile> {
        self.overlay.as_ref()
    }

    /// Next profile to act on, if any.
    pub fn current(&self) -> Option<&Profile> {
        self.queue.front()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Terminal transition; control returns to the login screen.
    pub fn log_out(&mut self) {
        self.state = BrowserState::LoggedOut;
    }
}
