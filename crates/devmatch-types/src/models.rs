use serde::{Deserialize, Serialize};

/// Another user available for swiping. Immutable once fetched; the
/// candidate queue owns it for its lifetime.
///
/// The backend keys profiles by `_id` and may attach fields the client has
/// no use for (like/dislike bookkeeping), so unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub bio: String,
    pub avatar: String,
}

/// A swipe decision on the queue head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Like,
    Dislike,
}

impl Decision {
    /// Path segment of the decision endpoint (`POST /devs/{id}/<segment>`).
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Like => "likes",
            Self::Dislike => "dislikes",
        }
    }
}
