/// One poll cycle against the Comet Server admin API

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::api::{AdminApi, ApiError};
use crate::core::metrics::{MetricSet, ServerSnapshot};
use crate::utils::{JOBS_WINDOW_AFTER_SECS, JOBS_WINDOW_BEFORE_SECS};

/// Wall-clock source
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub struct MetricsSampler<A, C> {
    api: A,
    clock: C,
}

impl<A: AdminApi, C: Clock> MetricsSampler<A, C> {
    pub fn new(api: A, clock: C) -> Self {
        Self { api, clock }
    }

    /// Fetch all four admin resources in order, bracketed by timestamps
    pub async fn snapshot(&self) -> Result<ServerSnapshot, ApiError> {
        let poll_start = self.clock.now();
        let start_secs = poll_start.timestamp();

        let user_count = self.api.list_users().await?;
        let connections = self.api.list_active_connections().await?;
        let jobs_48h = self
            .api
            .jobs_for_date_range(
                start_secs - JOBS_WINDOW_BEFORE_SECS,
                start_secs + JOBS_WINDOW_AFTER_SECS,
            )
            .await?;
        let meta = self.api.server_meta().await?;

        let poll_end = self.clock.now();

        Ok(ServerSnapshot {
            user_count,
            connections,
            jobs_48h,
            meta,
            poll_start,
            poll_end,
        })
    }

    /// Produce the metric set for one poll cycle
    pub async fn sample(&self) -> Result<MetricSet, ApiError> {
        let snapshot = self.snapshot().await?;
        debug!(
            users = snapshot.user_count,
            connections = snapshot.connections.len(),
            version = %snapshot.meta.version,
            api_ms = (snapshot.poll_end - snapshot.poll_start).num_milliseconds(),
            "poll cycle complete"
        );
        Ok(snapshot.derive_metrics())
    }
}
