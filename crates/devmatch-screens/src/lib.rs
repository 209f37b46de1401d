/// The two view-state machines of the client: the identity gate (login
/// screen) and the candidate browser (main screen), plus the session glue
/// that binds the browser to its live collaborators.
pub mod browser;
pub mod login;
pub mod session;

// Re-export key types for convenience.
pub use browser::{BrowserState, CandidateBrowser};
pub use login::{IdentityGate, LoginState};
pub use session::BrowserSession;
