/// Typed client for the matching backend: the REST surface (resolve a
/// username, list candidates, record decisions) and the per-session push
/// channel that delivers match events.
pub mod api;
pub mod error;
pub mod gateway;

// Re-export key types for convenience.
pub use api::ApiClient;
pub use error::ClientError;
pub use gateway::MatchSubscription;
