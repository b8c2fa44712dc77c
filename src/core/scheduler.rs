/// Poll loop: sample, emit, wait, repeat

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::api::AdminApi;
use crate::core::putval::MetricSink;
use crate::core::sampler::{Clock, MetricsSampler};

/// Fixed delay between the end of one cycle and the start of the next
pub struct PollSchedule {
    interval: Duration,
    ticks: u64,
}

impl PollSchedule {
    pub fn new(interval: Duration) -> Self {
        Self { interval, ticks: 0 }
    }

    /// Number of completed waits
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub async fn wait(&mut self) {
        tokio::time::sleep(self.interval).await;
        self.ticks += 1;
    }
}

/// Run poll cycles until an error occurs or `max_cycles` have been emitted
///
/// There is no wait after the final cycle when `max_cycles` is set.
pub async fn run<A, C, S>(
    sampler: &MetricsSampler<A, C>,
    sink: &mut S,
    schedule: &mut PollSchedule,
    max_cycles: Option<u64>,
) -> Result<u64>
where
    A: AdminApi,
    C: Clock,
    S: MetricSink,
{
    let mut cycles = 0u64;

    loop {
        let metrics = sampler
            .sample()
            .await
            .with_context(|| format!("poll cycle {} failed", cycles + 1))?;

        sink.emit(&metrics).context("failed to write metrics")?;
        cycles += 1;
        debug!(cycle = cycles, metrics = metrics.len(), "metrics emitted");

        if max_cycles.is_some_and(|max| cycles >= max) {
            return Ok(cycles);
        }

        schedule.wait().await;
    }
}
