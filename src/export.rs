use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::{
    config::Config,
    error::TransportError,
    ingest::IngestClient,
    spotify::history,
    types::{ForwardReport, Query, Records},
    utils, warning,
};

/// Fetches, shapes and forwards listening data on behalf of the session loop.
///
/// The loop only ever talks to this trait, so it can be driven against a
/// recording double in tests.
#[async_trait]
pub trait Exporter: Send + Sync {
    /// Runs `query` against the data API with `token` and returns flat records.
    async fn fetch(&self, token: &str, query: Query) -> Result<Records, TransportError>;

    /// Ships `records` to the intake endpoint. Best effort.
    async fn forward(&self, records: &Records) -> ForwardReport;
}

/// [`Exporter`] backed by the Spotify Web API and the log intake endpoint.
#[derive(Debug, Clone)]
pub struct SpotifyExporter {
    client: Client,
    api_url: Url,
    host: String,
    ingest: IngestClient,
}

impl SpotifyExporter {
    pub fn new(config: &Config) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &Config) -> Self {
        Self {
            ingest: IngestClient::new(
                client.clone(),
                config.ingest_url.clone(),
                config.ingest_api_key.clone(),
            ),
            client,
            api_url: config.api_url.clone(),
            host: config.log_host.clone(),
        }
    }
}

#[async_trait]
impl Exporter for SpotifyExporter {
    async fn fetch(&self, token: &str, query: Query) -> Result<Records, TransportError> {
        let records = match query {
            Query::RecentlyPlayed => {
                let data = history::get_recently_played(&self.client, &self.api_url, token).await?;
                Records::RecentlyPlayed(utils::extract_recently_played(&self.host, &data))
            }
            Query::TopTracks(range) => {
                let data =
                    history::get_top_tracks(&self.client, &self.api_url, token, range).await?;
                Records::TopTracks(utils::extract_top_tracks(&self.host, &data, range))
            }
            Query::TopArtists(range) => {
                let data =
                    history::get_top_artists(&self.client, &self.api_url, token, range).await?;
                Records::TopArtists(utils::extract_top_artists(&self.host, &data, range))
            }
        };

        Ok(records)
    }

    async fn forward(&self, records: &Records) -> ForwardReport {
        match records.to_json() {
            Ok(values) => self.ingest.forward(&values).await,
            Err(e) => {
                warning!("Cannot serialize records: {}", e);
                ForwardReport {
                    sent: 0,
                    failed: records.len(),
                }
            }
        }
    }
}
