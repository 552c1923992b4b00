//! Builds the runtime and its collaborators from a [`ClientConfig`].
use std::sync::Arc;

use anyhow::{Context, Result};
use skat_runtime::{
    FileSeriesRepository, HttpScoreSync, NoopScoreSync, Runtime, ScoreSync, SeriesRepository,
};

use crate::config::ClientConfig;

/// Builder that assembles runtime state, collaborators, and configuration for
/// clients.
pub struct RuntimeBuilder {
    config: ClientConfig,
    repository: Option<Arc<dyn SeriesRepository>>,
    score_sync: Option<Arc<dyn ScoreSync>>,
    resume: bool,
}

impl RuntimeBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            repository: None,
            score_sync: None,
            resume: true,
        }
    }

    /// Replace the file repository under the data directory.
    pub fn repository(mut self, repository: impl SeriesRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    /// Replace the sync client derived from `sync_url`.
    pub fn score_sync(mut self, score_sync: impl ScoreSync + 'static) -> Self {
        self.score_sync = Some(Arc::new(score_sync));
        self
    }

    /// Ignore any stored series and start fresh.
    pub fn resume(mut self, resume: bool) -> Self {
        self.resume = resume;
        self
    }

    pub async fn build(self) -> Result<RuntimeSetup> {
        let repository = match self.repository {
            Some(repository) => repository,
            None => {
                let dir = self.config.series_dir();
                let repository = FileSeriesRepository::new(&dir).with_context(|| {
                    format!("failed to open series directory {}", dir.display())
                })?;
                Arc::new(repository) as Arc<dyn SeriesRepository>
            }
        };

        let score_sync = match (self.score_sync, self.config.sync_url.as_deref()) {
            (Some(score_sync), _) => score_sync,
            (None, Some(url)) => {
                let client = HttpScoreSync::new(url)
                    .with_context(|| format!("failed to build sync client for {url}"))?;
                tracing::info!(endpoint = client.endpoint(), "remote score sync enabled");
                Arc::new(client) as Arc<dyn ScoreSync>
            }
            (None, None) => {
                tracing::info!("no sync url configured, aggregates stay local");
                Arc::new(NoopScoreSync) as Arc<dyn ScoreSync>
            }
        };

        let runtime = Runtime::builder()
            .config(self.config.runtime_config())
            .shared_repository(repository)
            .shared_score_sync(score_sync)
            .resume(self.resume)
            .build()
            .await
            .context("failed to start score sheet runtime")?;

        Ok(RuntimeSetup {
            config: self.config,
            runtime,
        })
    }
}

pub struct RuntimeSetup {
    pub config: ClientConfig,
    pub runtime: Runtime,
}
