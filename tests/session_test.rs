use std::{
    io::Cursor,
    sync::Mutex,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use reqwest::StatusCode;
use spotlog::{
    cli::{Session, SessionState},
    error::TransportError,
    export::Exporter,
    management::TokenStore,
    spotify::auth::{PollOptions, wait_for_token},
    types::{ForwardReport, Query, Records, TimeRange, TopTrackRecord},
};
use tokio_util::sync::CancellationToken;

fn fast_poll(max_wait: Option<Duration>) -> PollOptions {
    PollOptions {
        interval: Duration::from_millis(10),
        max_wait,
    }
}

fn track_record(name: &str) -> TopTrackRecord {
    TopTrackRecord {
        host: "test-host".to_string(),
        service: "spotify".to_string(),
        list: "top_tracks".to_string(),
        time_frame: "short_term".to_string(),
        artist: "Artist".to_string(),
        track: name.to_string(),
        album: "Album".to_string(),
    }
}

/// Records every call made by the session.
#[derive(Default)]
struct RecordingExporter {
    fetches: Mutex<Vec<(String, Query)>>,
    forwards: Mutex<usize>,
    fail_fetch: bool,
}

#[async_trait]
impl Exporter for RecordingExporter {
    async fn fetch(&self, token: &str, query: Query) -> Result<Records, TransportError> {
        self.fetches.lock().unwrap().push((token.to_string(), query));
        if self.fail_fetch {
            return Err(TransportError::Status {
                status: StatusCode::UNAUTHORIZED,
                body: "expired".to_string(),
            });
        }
        Ok(Records::TopTracks(vec![track_record("One"), track_record("Two")]))
    }

    async fn forward(&self, records: &Records) -> ForwardReport {
        *self.forwards.lock().unwrap() += 1;
        ForwardReport {
            sent: records.len(),
            failed: 0,
        }
    }
}

#[tokio::test]
async fn test_wait_returns_stored_token_immediately() {
    let store = TokenStore::new();
    store.set("ready");

    let token = wait_for_token(&store, fast_poll(None), &CancellationToken::new()).await;
    assert_eq!(token.as_deref(), Some("ready"));
}

#[tokio::test]
async fn test_wait_sees_concurrent_set() {
    let store = TokenStore::new();
    let writer = store.clone();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(35)).await;
        writer.set("late");
    });

    let token = wait_for_token(
        &store,
        fast_poll(Some(Duration::from_secs(5))),
        &CancellationToken::new(),
    )
    .await;
    assert_eq!(token.as_deref(), Some("late"));
}

#[tokio::test]
async fn test_wait_gives_up_after_max_wait() {
    let store = TokenStore::new();
    let started = Instant::now();

    let token = wait_for_token(
        &store,
        fast_poll(Some(Duration::from_millis(50))),
        &CancellationToken::new(),
    )
    .await;

    assert_eq!(token, None);
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_wait_stops_on_cancel() {
    let store = TokenStore::new();
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(30)).await;
        trigger.cancel();
    });

    // a long interval proves cancellation interrupts the sleep
    let options = PollOptions {
        interval: Duration::from_secs(60),
        max_wait: None,
    };
    let result = tokio::time::timeout(
        Duration::from_secs(5),
        wait_for_token(&store, options, &cancel),
    )
    .await;

    assert_eq!(result.unwrap(), None);
}

#[tokio::test]
async fn test_session_starts_waiting_and_refuses_menu() {
    let exporter = RecordingExporter::default();
    let mut session = Session::new(TokenStore::new(), &exporter);

    assert_eq!(session.state(), SessionState::WaitingForAuth);
    assert!(session.run_menu(&mut Cursor::new("4\n")).await.is_err());
    assert!(exporter.fetches.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_session_stays_waiting_without_token() {
    let exporter = RecordingExporter::default();
    let mut session = Session::new(TokenStore::new(), &exporter);

    let ready = session
        .authenticate(
            fast_poll(Some(Duration::from_millis(30))),
            &CancellationToken::new(),
        )
        .await;

    assert!(!ready);
    assert_eq!(session.state(), SessionState::WaitingForAuth);
}

#[tokio::test]
async fn test_menu_dispatches_and_forwards() {
    let store = TokenStore::new();
    store.set("abc123");
    let exporter = RecordingExporter::default();
    let mut session = Session::new(store, &exporter);

    assert!(
        session
            .authenticate(fast_poll(None), &CancellationToken::new())
            .await
    );
    assert_eq!(session.state(), SessionState::Ready);

    // top tracks (short term) and send, unknown choice, recently played without sending, exit
    let mut input = Cursor::new("1\n1\n1\n9\n3\n2\n4\n");
    session.run_menu(&mut input).await.unwrap();

    let fetches = exporter.fetches.lock().unwrap();
    assert_eq!(
        *fetches,
        vec![
            ("abc123".to_string(), Query::TopTracks(TimeRange::Short)),
            ("abc123".to_string(), Query::RecentlyPlayed),
        ]
    );
    assert_eq!(*exporter.forwards.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_menu_ends_with_input() {
    let store = TokenStore::new();
    store.set("abc123");
    let exporter = RecordingExporter::default();
    let mut session = Session::new(store, &exporter);
    session
        .authenticate(fast_poll(None), &CancellationToken::new())
        .await;

    // invalid time range falls back to medium; input ends before the send prompt
    let mut input = Cursor::new("2\nx\n");
    session.run_menu(&mut input).await.unwrap();

    let fetches = exporter.fetches.lock().unwrap();
    assert_eq!(fetches[0].1, Query::TopArtists(TimeRange::Medium));
    assert_eq!(*exporter.forwards.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_fetch_failure_keeps_session_running() {
    let store = TokenStore::new();
    store.set("abc123");
    let exporter = RecordingExporter {
        fail_fetch: true,
        ..Default::default()
    };
    let mut session = Session::new(store, &exporter);
    session
        .authenticate(fast_poll(None), &CancellationToken::new())
        .await;

    let mut input = Cursor::new("3\n3\n4\n");
    session.run_menu(&mut input).await.unwrap();

    assert_eq!(exporter.fetches.lock().unwrap().len(), 2);
    assert_eq!(*exporter.forwards.lock().unwrap(), 0);
}
