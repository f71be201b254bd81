use tokio_util::sync::CancellationToken;

use crate::{
    Res,
    api::AppState,
    cli::session::Session,
    config::Config,
    export::SpotifyExporter,
    info,
    management::TokenStore,
    server,
    spotify::auth::PollOptions,
    warning,
};

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub poll: PollOptions,
    pub open_browser: bool,
}

/// Runs a full session: listener, browser login, token wait, menu.
///
/// The listener is bound first so a taken port fails the run before the user
/// is sent to the browser. It is then served on a detached task and the
/// calling task waits for the token and drives the menu on stdin.
pub async fn run(config: &Config, options: RunOptions) -> Res<()> {
    let store = TokenStore::new();
    let state = AppState::from_config(config, store.clone());
    let auth_url = state.authorize_url.clone();

    let listener = server::bind(config.server_addr).await?;
    server::spawn_api_server(listener, state);
    info!(
        "Waiting for the login callback on http://{}/callback",
        config.server_addr
    );

    if !options.open_browser || webbrowser::open(&auth_url).is_err() {
        warning!(
            "Please navigate to the following URL to log in:\n{}",
            auth_url
        );
    }

    let exporter = SpotifyExporter::new(config);
    let mut session = Session::new(store, &exporter);

    let cancel = CancellationToken::new();
    if !session.authenticate(options.poll, &cancel).await {
        return Err("gave up waiting for authentication".into());
    }

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    session.run_menu(&mut input).await
}
