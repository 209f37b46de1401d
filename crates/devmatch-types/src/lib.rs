/// Shared data model for the devmatch client: candidate profiles, swipe
/// decisions, the REST wire types, and the push-channel event enum.
pub mod api;
pub mod events;
pub mod models;

// Re-export key types for convenience.
pub use events::PushEvent;
pub use models::{Decision, Profile};
