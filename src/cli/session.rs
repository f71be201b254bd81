use std::{
    io::{BufRead, Write},
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;

use crate::{
    Res,
    export::Exporter,
    info,
    management::TokenStore,
    spotify::auth::{PollOptions, wait_for_token},
    success,
    types::Query,
    utils::{self, MenuChoice},
    warning,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    WaitingForAuth,
    Ready,
}

/// The interactive part of a run.
///
/// Starts in [`SessionState::WaitingForAuth`] and moves to
/// [`SessionState::Ready`] once the token store has been observed holding a
/// token by this session's own poll. Only a `Ready` session shows the menu.
pub struct Session<'a> {
    store: TokenStore,
    exporter: &'a dyn Exporter,
    state: SessionState,
}

impl<'a> Session<'a> {
    pub fn new(store: TokenStore, exporter: &'a dyn Exporter) -> Self {
        Self {
            store,
            exporter,
            state: SessionState::WaitingForAuth,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Polls for the token; returns whether the session became ready.
    pub async fn authenticate(&mut self, poll: PollOptions, cancel: &CancellationToken) -> bool {
        if self.state == SessionState::Ready {
            return true;
        }

        if wait_for_token(&self.store, poll, cancel).await.is_some() {
            self.state = SessionState::Ready;
            success!("Logged in to Spotify.");
        }

        self.state == SessionState::Ready
    }

    /// Runs the menu until the user exits or `input` ends.
    pub async fn run_menu<R: BufRead>(&mut self, input: &mut R) -> Res<()> {
        if self.state != SessionState::Ready {
            return Err("session is not authenticated".into());
        }

        loop {
            println!("\nChoose an option:");
            println!("1. Top Tracks");
            println!("2. Top Artists");
            println!("3. Recently Played Tracks");
            println!("4. Exit");

            let Some(line) = prompt(input, "Enter your choice (1, 2, 3, or 4): ")? else {
                info!("Exiting...");
                return Ok(());
            };

            let query = match utils::parse_menu_choice(&line) {
                Some(MenuChoice::Exit) => {
                    info!("Exiting...");
                    return Ok(());
                }
                Some(MenuChoice::TopTracks) => Query::TopTracks(ask_time_range(input)?),
                Some(MenuChoice::TopArtists) => Query::TopArtists(ask_time_range(input)?),
                Some(MenuChoice::RecentlyPlayed) => Query::RecentlyPlayed,
                None => {
                    warning!("Unknown choice '{}'", line.trim());
                    continue;
                }
            };

            self.export(query, input).await?;
        }
    }

    async fn export<R: BufRead>(&self, query: Query, input: &mut R) -> Res<()> {
        let Some(token) = self.store.get() else {
            warning!("No access token available. Please log in again.");
            return Ok(());
        };

        let label = utils::query_label(&query);
        let pb = spinner(format!("Fetching {}...", label));
        let result = self.exporter.fetch(&token, query).await;
        pb.finish_and_clear();

        let records = match result {
            Ok(records) => records,
            Err(e) => {
                warning!("Failed to fetch {}: {}", label, e);
                return Ok(());
            }
        };

        if records.is_empty() {
            info!("No {} found.", label);
            return Ok(());
        }

        println!("\nDo you want to send the results to Datadog?");
        println!("1. Yes");
        println!("2. No");
        let send = prompt(input, "Enter your choice (1 or 2): ")?
            .map(|answer| utils::parse_yes_no(&answer))
            .unwrap_or(false);

        if send {
            let report = self.exporter.forward(&records).await;
            if report.failed == 0 {
                success!("Sent {} records.", report.sent);
            } else {
                warning!("Sent {} records, {} failed.", report.sent, report.failed);
            }
        }

        println!("{}", utils::render_records(&records));
        Ok(())
    }
}

fn ask_time_range<R: BufRead>(input: &mut R) -> Res<crate::types::TimeRange> {
    println!("1. Short Term");
    println!("2. Medium Term");
    println!("3. Long Term");
    let answer = prompt(input, "Enter your choice (1, 2, or 3): ")?.unwrap_or_default();
    Ok(utils::parse_time_range(&answer))
}

/// Prints `message` and reads one line. `None` means the input is exhausted.
fn prompt<R: BufRead>(input: &mut R, message: &str) -> Res<Option<String>> {
    print!("{}", message);
    std::io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
