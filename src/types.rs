use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Result of a successful authorization-code exchange.
#[derive(Debug, Clone)]
pub struct TokenPayload {
    pub access_token: String,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
    pub scope: Option<String>,
    pub refresh_token: Option<String>,
    pub obtained_at: DateTime<Utc>,
}

impl TokenPayload {
    /// Reads a token endpoint body.
    ///
    /// Only `access_token` has to be a non-empty string. The metadata fields are
    /// optional and anything of an unexpected type is treated as absent.
    ///
    /// # Returns
    ///
    /// `None` if `access_token` is missing, empty or not a string.
    pub fn from_json(body: &serde_json::Value, obtained_at: DateTime<Utc>) -> Option<Self> {
        let text = |key: &str| body.get(key).and_then(|v| v.as_str()).map(str::to_string);

        Some(Self {
            access_token: text("access_token").filter(|t| !t.is_empty())?,
            token_type: text("token_type"),
            expires_in: body.get("expires_in").and_then(|v| v.as_u64()),
            scope: text("scope"),
            refresh_token: text("refresh_token"),
            obtained_at,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    Short,
    Medium,
    Long,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Short => "short_term",
            TimeRange::Medium => "medium_term",
            TimeRange::Long => "long_term",
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A data export the user can pick from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    TopTracks(TimeRange),
    TopArtists(TimeRange),
    RecentlyPlayed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentlyPlayedResponse {
    #[serde(default)]
    pub items: Vec<PlayHistoryItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayHistoryItem {
    pub track: Track,
    pub played_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTracksResponse {
    #[serde(default)]
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopArtistsResponse {
    #[serde(default)]
    pub items: Vec<Artist>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
    pub album: Option<Album>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimpleArtist {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Album {
    pub name: Option<String>,
    pub release_date: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Artist {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub followers: Option<Followers>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Followers {
    #[serde(default)]
    pub total: u64,
}

/// Flat record for one recently played track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentlyPlayedRecord {
    pub host: String,
    pub service: String,
    pub list: String,
    pub track_name: String,
    pub artist: String,
    pub artist_id: String,
    pub played_at: String,
    pub duration_ms: u64,
    pub image_url: String,
    pub external_url: String,
    pub release_date: String,
    pub album_name: String,
    pub track_id: String,
}

/// Flat record for one entry of the user's top tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopTrackRecord {
    pub host: String,
    pub service: String,
    pub list: String,
    pub time_frame: String,
    pub artist: String,
    pub track: String,
    pub album: String,
}

/// Flat record for one entry of the user's top artists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopArtistRecord {
    pub host: String,
    pub service: String,
    pub list: String,
    pub time_frame: String,
    pub artist: String,
    pub followers: u64,
    pub genres: String,
}

/// A batch of records of a single kind, as produced by one query.
#[derive(Debug, Clone, PartialEq)]
pub enum Records {
    RecentlyPlayed(Vec<RecentlyPlayedRecord>),
    TopTracks(Vec<TopTrackRecord>),
    TopArtists(Vec<TopArtistRecord>),
}

impl Records {
    pub fn len(&self) -> usize {
        match self {
            Records::RecentlyPlayed(r) => r.len(),
            Records::TopTracks(r) => r.len(),
            Records::TopArtists(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serializes every record to the JSON object sent to the intake endpoint.
    pub fn to_json(&self) -> Result<Vec<serde_json::Value>, serde_json::Error> {
        match self {
            Records::RecentlyPlayed(r) => r.iter().map(serde_json::to_value).collect(),
            Records::TopTracks(r) => r.iter().map(serde_json::to_value).collect(),
            Records::TopArtists(r) => r.iter().map(serde_json::to_value).collect(),
        }
    }
}

#[derive(Tabled)]
pub struct RecentlyPlayedTableRow {
    pub played_at: String,
    pub track: String,
    pub artist: String,
    pub album: String,
}

#[derive(Tabled)]
pub struct TopTrackTableRow {
    pub rank: usize,
    pub track: String,
    pub artist: String,
    pub album: String,
}

#[derive(Tabled)]
pub struct TopArtistTableRow {
    pub rank: usize,
    pub artist: String,
    pub followers: u64,
    pub genres: String,
}

/// Outcome of forwarding a batch of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForwardReport {
    pub sent: usize,
    pub failed: usize,
}
