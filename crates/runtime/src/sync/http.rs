//! HTTP client for the remote score service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use skat_core::AggregateUpdate;

use super::{ScoreSync, SyncError};

const UPDATE_PATH: &str = "/update_player_points";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Wire format expected by `POST /update_player_points`.
#[derive(Debug, Serialize)]
struct PlayerPointsPayload<'a> {
    #[serde(rename = "playerId")]
    player_id: u8,
    #[serde(rename = "seriesId")]
    series_id: &'a str,
    #[serde(rename = "tischId", skip_serializing_if = "Option::is_none")]
    table_id: Option<&'a str>,
    total_points: i64,
    won_games: u32,
    lost_games: u32,
}

impl<'a> From<&'a AggregateUpdate> for PlayerPointsPayload<'a> {
    fn from(update: &'a AggregateUpdate) -> Self {
        Self {
            player_id: update.participant.0,
            series_id: &update.series_id,
            table_id: update.table_id.as_deref(),
            total_points: update.total_points,
            won_games: update.won_count,
            lost_games: update.lost_count,
        }
    }
}

/// Optional acknowledgement body. Services that answer with an empty or
/// non-JSON body are treated as having accepted the update.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// [`ScoreSync`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpScoreSync {
    client: Client,
    endpoint: String,
}

impl HttpScoreSync {
    /// Creates a client posting to `{base_url}/update_player_points`.
    pub fn new(base_url: &str) -> Result<Self, SyncError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), UPDATE_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ScoreSync for HttpScoreSync {
    async fn push(&self, update: &AggregateUpdate) -> Result<(), SyncError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&PlayerPointsPayload::from(update))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(
            participant = %update.participant,
            status = status.as_u16(),
            "score service responded"
        );
        if !status.is_success() {
            return Err(SyncError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        match serde_json::from_str::<ApiResponse>(&body) {
            Ok(ApiResponse {
                success: false,
                error,
            }) => Err(SyncError::Rejected(
                error.unwrap_or_else(|| "unknown error".to_owned()),
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skat_core::ParticipantIndex;

    #[test]
    fn payload_uses_service_field_names() {
        let update = AggregateUpdate {
            participant: ParticipantIndex(2),
            series_id: "series-9".into(),
            table_id: None,
            total_points: -74,
            won_count: 3,
            lost_count: 1,
        };

        let json = serde_json::to_value(PlayerPointsPayload::from(&update)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "playerId": 2,
                "seriesId": "series-9",
                "total_points": -74,
                "won_games": 3,
                "lost_games": 1,
            })
        );
    }

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let sync = HttpScoreSync::with_client(Client::new(), "http://localhost:8080/");
        assert_eq!(sync.endpoint(), "http://localhost:8080/update_player_points");
    }
}
