//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use directories::ProjectDirs;

use skat_core::{ConfigError, DealerRotation, ParticipantIndex, SeriesConfig, TableMode};
use skat_runtime::RuntimeConfig;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ClientConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error(transparent)]
    Series(#[from] ConfigError),
}

/// Configuration required to bootstrap a score sheet runtime.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub series_id: String,
    pub table_id: Option<String>,
    pub series: SeriesConfig,
    /// Root for stored series and logs. Platform data dir when unset.
    pub data_dir: Option<PathBuf>,
    /// Base URL of the remote score service. No remote sync when unset.
    pub sync_url: Option<String>,
    pub channels: ChannelConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            series_id: generated_series_id(),
            table_id: None,
            series: SeriesConfig::default(),
            data_dir: None,
            sync_url: None,
            channels: ChannelConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables, loading a
    /// `.env` file first when one exists.
    ///
    /// Environment variables:
    /// - `SKAT_SERIES_ID` - Series identifier (default: generated from the current time)
    /// - `SKAT_TABLE_ID` - Remote table identifier sent with aggregate updates
    /// - `SKAT_PARTICIPANTS` - 3 or 4 (default: 4)
    /// - `SKAT_TOTAL_ROUNDS` - Rounds in the series (default: 36 for three, 48 for four)
    /// - `SKAT_DEALER_ROTATION` - `round_robin` or `blocked` (default: per table size)
    /// - `SKAT_FIRST_DEALER` - Seat of the first dealer (default: 0)
    /// - `SKAT_PARTICIPANT_NAMES` - Comma-separated display names, one per seat (default: none)
    /// - `SKAT_DATA_DIR` - Directory for stored series and logs (default: platform-specific)
    /// - `SKAT_SYNC_URL` - Base URL of the score service (default: no remote sync)
    /// - `SKAT_COMMAND_BUFFER` - Command queue size (default: 32)
    /// - `SKAT_EVENT_BUFFER` - Event channel capacity per topic (default: 100)
    /// - `SKAT_EFFECT_BUFFER` - Sync queue size (default: 64)
    pub fn from_env() -> Result<Self, ClientConfigError> {
        // Missing .env is fine
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(series_id) = non_empty(lookup("SKAT_SERIES_ID")) {
            config.series_id = series_id;
        }
        config.table_id = non_empty(lookup("SKAT_TABLE_ID"));

        let mode = match read_var::<u8>(&lookup, "SKAT_PARTICIPANTS")? {
            Some(count) => TableMode::from_participants(count)?,
            None => TableMode::default(),
        };
        let mut series = SeriesConfig::new(mode);
        if let Some(total_rounds) = read_var::<u32>(&lookup, "SKAT_TOTAL_ROUNDS")? {
            series = series.with_total_rounds(total_rounds);
        }
        if let Some(rotation) = read_var::<DealerRotation>(&lookup, "SKAT_DEALER_ROTATION")? {
            series = series.with_rotation(rotation);
        }
        if let Some(first_dealer) = read_var::<u8>(&lookup, "SKAT_FIRST_DEALER")? {
            series = series.with_first_dealer(ParticipantIndex(first_dealer));
        }
        if let Some(names) = non_empty(lookup("SKAT_PARTICIPANT_NAMES")) {
            series = series.with_participant_names(names.split(',').map(str::trim));
        }
        series.validate()?;
        config.series = series;

        config.data_dir = non_empty(lookup("SKAT_DATA_DIR")).map(PathBuf::from);
        config.sync_url = non_empty(lookup("SKAT_SYNC_URL"));

        if let Some(capacity) = read_var::<usize>(&lookup, "SKAT_COMMAND_BUFFER")? {
            config.channels.command_buffer = capacity.max(1);
        }
        if let Some(capacity) = read_var::<usize>(&lookup, "SKAT_EVENT_BUFFER")? {
            config.channels.event_buffer = capacity.max(1);
        }
        if let Some(capacity) = read_var::<usize>(&lookup, "SKAT_EFFECT_BUFFER")? {
            config.channels.effect_buffer = capacity.max(1);
        }

        Ok(config)
    }

    /// Runtime-side view of this configuration.
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            series: self.series.clone(),
            series_id: self.series_id.clone(),
            table_id: self.table_id.clone(),
            event_buffer_size: self.channels.event_buffer,
            command_buffer_size: self.channels.command_buffer,
            effect_buffer_size: self.channels.effect_buffer,
        }
    }

    /// Data directory, falling back to the platform default.
    pub fn resolved_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        ProjectDirs::from("org", "skat", "skat-sheet")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("skat-data"))
    }

    /// Directory holding one JSON document per series.
    pub fn series_dir(&self) -> PathBuf {
        self.resolved_data_dir().join("series")
    }

    /// Per-series log directory.
    pub fn log_dir(&self) -> PathBuf {
        self.resolved_data_dir().join("logs").join(&self.series_id)
    }
}

#[derive(Clone, Debug)]
pub struct ChannelConfig {
    pub command_buffer: usize,
    pub event_buffer: usize,
    pub effect_buffer: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        let runtime = RuntimeConfig::default();
        Self {
            command_buffer: runtime.command_buffer_size,
            event_buffer: runtime.event_buffer_size,
            effect_buffer: runtime.effect_buffer_size,
        }
    }
}

fn generated_series_id() -> String {
    chrono::Local::now()
        .format("series_%Y%m%d_%H%M%S")
        .to_string()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn read_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ClientConfigError>
where
    T: FromStr,
{
    let Some(value) = non_empty(lookup(key)) else {
        return Ok(None);
    };
    value
        .parse()
        .map(Some)
        .map_err(|_| ClientConfigError::InvalidValue { key, value })
}
