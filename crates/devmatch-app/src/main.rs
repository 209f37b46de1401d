use std::path::PathBuf;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

use devmatch_client::{ApiClient, ClientError};
use devmatch_screens::{BrowserSession, CandidateBrowser, IdentityGate};
use devmatch_store::SessionStore;
use devmatch_types::models::Profile;

type Input = Lines<BufReader<Stdin>>;

enum BrowseOutcome {
    LoggedOut,
    Quit,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devmatch=debug".into()),
        )
        .init();

    // Config
    let api_url =
        std::env::var("DEVMATCH_API_URL").unwrap_or_else(|_| "http://localhost:3333".into());
    let store_path = std::env::var("DEVMATCH_STORE_PATH").unwrap_or_else(|_| "devmatch.db".into());

    let store = SessionStore::open(&PathBuf::from(&store_path))?;
    let api = ApiClient::new(api_url);
    info!("devmatch client pointed at {}", api.base_url());

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let Some(user_id) = run_login(&api, &store, &mut input).await? else {
            break;
        };
        match run_browse(&api, &store, user_id, &mut input).await? {
            BrowseOutcome::LoggedOut => continue,
            BrowseOutcome::Quit => break,
        }
    }

    Ok(())
}

/// Login screen. Returns the user identifier to browse with, or `None`
/// when stdin is gone.
async fn run_login(api: &ApiClient, store: &SessionStore, input: &mut Input) -> Result<Option<String>> {
    let mut gate = IdentityGate::new();

    // A persisted identity skips the login screen entirely.
    if let Some(user_id) = gate.check_persisted_identity(store) {
        return Ok(Some(user_id));
    }

    loop {
        println!();
        println!("Enter your GitHub username to start swiping:");
        let Some(line) = input.next_line().await? else {
            return Ok(None);
        };

        match gate.submit_username(api, store, line.trim()).await {
            Ok(user_id) => return Ok(Some(user_id)),
            Err(ClientError::EmptyUsername) => {
                println!("Username must not be empty.");
            }
            Err(e) => {
                // Everything else scopes to this one attempt; prompt again.
                println!("Could not sign in ({e}). Try again.");
            }
        }
    }
}

/// Main screen: swipe through the candidate queue while listening for
/// match pushes. Stdin lines and push events interleave in one select
/// loop; the queue and overlay are only ever touched from here.
async fn run_browse(
    api: &ApiClient,
    store: &SessionStore,
    user_id: String,
    input: &mut Input,
) -> Result<BrowseOutcome> {
    println!("Loading candidates...");

    let mut session = loop {
        match BrowserSession::enter(api.clone(), user_id.clone()).await {
            Ok(session) => break session,
            Err(e) => {
                println!("Could not load candidates ({e}). Press Enter to retry, q to quit.");
                match input.next_line().await? {
                    Some(line) if line.trim() == "q" => return Ok(BrowseOutcome::Quit),
                    Some(_) => continue,
                    None => return Ok(BrowseOutcome::Quit),
                }
            }
        }
    };

    render_card(session.browser());

    loop {
        tokio::select! {
            line = input.next_line() => {
                let Some(line) = line? else {
                    return Ok(BrowseOutcome::Quit);
                };
                match line.trim() {
                    "q" => {
                        session.logout(store)?;
                        println!("Signed out.");
                        return Ok(BrowseOutcome::LoggedOut);
                    }
                    "x" => {
                        session.dismiss_match();
                        render_card(session.browser());
                    }
                    _ if session.browser().match_overlay().is_some() => {
                        // The overlay sits on top of the swipe controls.
                        println!("[x] close the match first");
                    }
                    "l" => {
                        if let Some(profile) = session.like() {
                            println!("Liked {}.", profile.name);
                        }
                        render_card(session.browser());
                    }
                    "d" => {
                        if let Some(profile) = session.dislike() {
                            println!("Passed on {}.", profile.name);
                        }
                        render_card(session.browser());
                    }
                    "" => {}
                    other => {
                        println!("Unknown command {other:?}.");
                        render_card(session.browser());
                    }
                }
            }
            pushed = session.next_push() => {
                if let Some(profile) = pushed {
                    render_match(&profile);
                }
            }
        }
    }
}

fn render_card(browser: &CandidateBrowser) {
    println!();
    match browser.current() {
        Some(profile) => {
            println!("{}  ({} left)", profile.name, browser.remaining());
            if !profile.bio.is_empty() {
                println!("{}", profile.bio);
            }
            println!("{}", profile.avatar);
            println!("[l] like  [d] dislike  [q] sign out");
        }
        None => {
            println!("No more devs to show :(");
            println!("[q] sign out");
        }
    }
}

fn render_match(profile: &Profile) {
    println!();
    println!("It's a match!");
    println!("{}", profile.name);
    if !profile.bio.is_empty() {
        println!("{}", profile.bio);
    }
    println!("{}", profile.avatar);
    println!("[x] close");
}
