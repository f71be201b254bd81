use tabled::Table;

use crate::types::{
    Artist, PlayHistoryItem, Query, RecentlyPlayedRecord, RecentlyPlayedResponse,
    RecentlyPlayedTableRow, Records, SimpleArtist, TimeRange, TopArtistRecord,
    TopArtistTableRow, TopArtistsResponse, TopTrackRecord, TopTrackTableRow, TopTracksResponse,
};

pub const SERVICE: &str = "spotify";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_TRACK: &str = "Unknown Track";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    TopTracks,
    TopArtists,
    RecentlyPlayed,
    Exit,
}

/// Maps a line typed at the main menu to a [`MenuChoice`].
///
/// Surrounding whitespace is ignored. Returns `None` for anything that is not
/// one of the listed options.
pub fn parse_menu_choice(input: &str) -> Option<MenuChoice> {
    match input.trim() {
        "1" => Some(MenuChoice::TopTracks),
        "2" => Some(MenuChoice::TopArtists),
        "3" => Some(MenuChoice::RecentlyPlayed),
        "4" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// Anything other than `1` or `3` falls back to the medium range.
pub fn parse_time_range(input: &str) -> TimeRange {
    match input.trim() {
        "1" => TimeRange::Short,
        "3" => TimeRange::Long,
        _ => TimeRange::Medium,
    }
}

pub fn parse_yes_no(input: &str) -> bool {
    matches!(input.trim(), "1" | "y" | "Y" | "yes")
}

fn join_artist_names(artists: &[SimpleArtist]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_deref().unwrap_or(UNKNOWN_ARTIST))
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_artist_ids(artists: &[SimpleArtist]) -> String {
    artists
        .iter()
        .map(|a| a.id.as_deref().unwrap_or_default())
        .collect::<Vec<_>>()
        .join(", ")
}

fn recently_played_record(host: &str, item: &PlayHistoryItem) -> RecentlyPlayedRecord {
    let track = &item.track;
    let album = track.album.clone().unwrap_or_default();

    RecentlyPlayedRecord {
        host: host.to_string(),
        service: SERVICE.to_string(),
        list: "recently_played".to_string(),
        track_name: track.name.clone().unwrap_or_else(|| UNKNOWN_TRACK.to_string()),
        artist: join_artist_names(&track.artists),
        artist_id: join_artist_ids(&track.artists),
        played_at: item.played_at.clone(),
        duration_ms: track.duration_ms,
        image_url: album
            .images
            .first()
            .map(|i| i.url.clone())
            .unwrap_or_default(),
        external_url: track.external_urls.spotify.clone().unwrap_or_default(),
        release_date: album.release_date.unwrap_or_default(),
        album_name: album.name.unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
        track_id: track.id.clone().unwrap_or_default(),
    }
}

/// Flattens a recently played response into records.
///
/// # Arguments
///
/// * `host` - Value for the `host` field of every record
/// * `data` - Decoded `/me/player/recently-played` response
///
/// # Returns
///
/// One record per play, in response order. Artist names and ids are joined
/// with `", "`; `image_url` is the first album image or empty.
pub fn extract_recently_played(
    host: &str,
    data: &RecentlyPlayedResponse,
) -> Vec<RecentlyPlayedRecord> {
    data.items
        .iter()
        .map(|item| recently_played_record(host, item))
        .collect()
}

/// Flattens a top tracks response into records.
///
/// # Arguments
///
/// * `host` - Value for the `host` field of every record
/// * `data` - Decoded `/me/top/tracks` response
/// * `time_range` - Range the ranking was requested for, stored as `time_frame`
///
/// # Returns
///
/// One record per track, in rank order. Missing names fall back to
/// [`UNKNOWN_TRACK`], [`UNKNOWN_ARTIST`] and [`UNKNOWN_ALBUM`].
pub fn extract_top_tracks(
    host: &str,
    data: &TopTracksResponse,
    time_range: TimeRange,
) -> Vec<TopTrackRecord> {
    data.items
        .iter()
        .map(|track| TopTrackRecord {
            host: host.to_string(),
            service: SERVICE.to_string(),
            list: "top_tracks".to_string(),
            time_frame: time_range.to_string(),
            artist: join_artist_names(&track.artists),
            track: track.name.clone().unwrap_or_else(|| UNKNOWN_TRACK.to_string()),
            album: track
                .album
                .as_ref()
                .and_then(|a| a.name.clone())
                .unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
        })
        .collect()
}

fn top_artist_record(host: &str, artist: &Artist, time_range: TimeRange) -> TopArtistRecord {
    TopArtistRecord {
        host: host.to_string(),
        service: SERVICE.to_string(),
        list: "top_artists".to_string(),
        time_frame: time_range.to_string(),
        artist: artist
            .name
            .clone()
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
        followers: artist.followers.as_ref().map(|f| f.total).unwrap_or(0),
        genres: artist.genres.join(", "),
    }
}

/// Flattens a top artists response into records, in rank order.
///
/// Missing names become [`UNKNOWN_ARTIST`] and missing follower counts `0`.
pub fn extract_top_artists(
    host: &str,
    data: &TopArtistsResponse,
    time_range: TimeRange,
) -> Vec<TopArtistRecord> {
    data.items
        .iter()
        .map(|artist| top_artist_record(host, artist, time_range))
        .collect()
}

/// Human readable title for a query, used in prompts and spinners.
pub fn query_label(query: &Query) -> String {
    match query {
        Query::TopTracks(range) => format!("top tracks ({})", range),
        Query::TopArtists(range) => format!("top artists ({})", range),
        Query::RecentlyPlayed => "recently played tracks".to_string(),
    }
}

/// Renders records as a table for the terminal.
pub fn render_records(records: &Records) -> String {
    match records {
        Records::RecentlyPlayed(r) => Table::new(r.iter().map(|rec| RecentlyPlayedTableRow {
            played_at: rec.played_at.clone(),
            track: rec.track_name.clone(),
            artist: rec.artist.clone(),
            album: rec.album_name.clone(),
        }))
        .to_string(),
        Records::TopTracks(r) => Table::new(r.iter().enumerate().map(|(i, rec)| TopTrackTableRow {
            rank: i + 1,
            track: rec.track.clone(),
            artist: rec.artist.clone(),
            album: rec.album.clone(),
        }))
        .to_string(),
        Records::TopArtists(r) => Table::new(r.iter().enumerate().map(|(i, rec)| {
            TopArtistTableRow {
                rank: i + 1,
                artist: rec.artist.clone(),
                followers: rec.followers,
                // keep the table narrow
                genres: rec
                    .genres
                    .split(", ")
                    .take(3)
                    .collect::<Vec<_>>()
                    .join(","),
            }
        }))
        .to_string(),
    }
}
