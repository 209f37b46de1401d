use serde::{Deserialize, Serialize};

use crate::models::Profile;

/// Events pushed server→client over the persistent match channel.
///
/// The channel currently carries a single event type; the server emits it
/// to both parties whenever it detects a mutual like.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PushEvent {
    /// A mutual like involving this user was detected.
    Match(Profile),
}
