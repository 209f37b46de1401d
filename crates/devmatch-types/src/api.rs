use serde::{Deserialize, Serialize};

// -- Identity --

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolveUserRequest {
    pub username: String,
}

/// Response of the resolve-or-create call. Only the identifier matters to
/// the client; the rest of the user document is ignored.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResolveUserResponse {
    #[serde(rename = "_id")]
    pub id: String,
}
