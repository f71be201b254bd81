use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::{
    config::PAGE_SIZE,
    error::TransportError,
    types::{RecentlyPlayedResponse, TimeRange, TopArtistsResponse, TopTracksResponse},
};

fn endpoint(api_url: &Url, path: &str) -> String {
    format!(
        "{uri}/{path}",
        uri = api_url.as_str().trim_end_matches('/'),
        path = path
    )
}

async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
    token: &str,
) -> Result<T, TransportError> {
    let res = client.get(url).query(query).bearer_auth(token).send().await?;

    if !res.status().is_success() {
        return Err(TransportError::from_response(res).await);
    }

    let body = res.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Fetches the user's most recently played tracks.
///
/// Calls `GET {api_url}/me/player/recently-played` with a single page of
/// [`PAGE_SIZE`] items.
///
/// # Arguments
///
/// * `client` - HTTP client used for the request
/// * `api_url` - Base URL of the Spotify Web API
/// * `token` - Access token sent as a bearer credential
///
/// # Returns
///
/// The decoded play history, or a [`TransportError`] for connection failures,
/// non-2xx answers and undecodable bodies.
pub async fn get_recently_played(
    client: &Client,
    api_url: &Url,
    token: &str,
) -> Result<RecentlyPlayedResponse, TransportError> {
    let url = endpoint(api_url, "me/player/recently-played");
    get_json(client, &url, &[("limit", PAGE_SIZE.to_string())], token).await
}

/// Fetches the user's top tracks for a time range.
///
/// Calls `GET {api_url}/me/top/tracks` with `limit` set to [`PAGE_SIZE`] and
/// `time_range` set to the Spotify name of `time_range`.
///
/// # Arguments
///
/// * `client` - HTTP client used for the request
/// * `api_url` - Base URL of the Spotify Web API
/// * `token` - Access token sent as a bearer credential
/// * `time_range` - Period the ranking covers
///
/// # Returns
///
/// The decoded ranking or a [`TransportError`].
pub async fn get_top_tracks(
    client: &Client,
    api_url: &Url,
    token: &str,
    time_range: TimeRange,
) -> Result<TopTracksResponse, TransportError> {
    let url = endpoint(api_url, "me/top/tracks");
    let query = [
        ("limit", PAGE_SIZE.to_string()),
        ("time_range", time_range.to_string()),
    ];
    get_json(client, &url, &query, token).await
}

/// Fetches the user's top artists for a time range.
///
/// Same request shape as [`get_top_tracks`], against `/me/top/artists`.
pub async fn get_top_artists(
    client: &Client,
    api_url: &Url,
    token: &str,
    time_range: TimeRange,
) -> Result<TopArtistsResponse, TransportError> {
    let url = endpoint(api_url, "me/top/artists");
    let query = [
        ("limit", PAGE_SIZE.to_string()),
        ("time_range", time_range.to_string()),
    ];
    get_json(client, &url, &query, token).await
}
