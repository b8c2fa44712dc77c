/// Comet Server health metrics
///
/// Turns the raw results of one poll cycle into the fixed set of named
/// values reported to collectd.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::core::api::{LiveConnection, SelfBackupRun, ServerMeta};
use crate::utils::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Int(i64),
    Float(f64),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Int(v) => write!(f, "{}", v),
            MetricValue::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for MetricValue {
    fn from(v: i64) -> Self {
        MetricValue::Int(v)
    }
}

impl From<usize> for MetricValue {
    fn from(v: usize) -> Self {
        MetricValue::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Float(v)
    }
}

/// Ordered metric name -> value pairs for one poll cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSet {
    entries: Vec<(&'static str, MetricValue)>,
}

impl MetricSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a metric, keeping its first insertion position
    pub fn insert(&mut self, name: &'static str, value: impl Into<MetricValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<MetricValue> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, MetricValue)> + '_ {
        self.entries.iter().copied()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(n, _)| *n).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything fetched during one poll cycle, bracketed by its timestamps
#[derive(Debug, Clone)]
pub struct ServerSnapshot {
    pub user_count: usize,
    pub connections: HashMap<String, LiveConnection>,
    pub jobs_48h: usize,
    pub meta: ServerMeta,
    pub poll_start: DateTime<Utc>,
    pub poll_end: DateTime<Utc>,
}

impl ServerSnapshot {
    pub fn derive_metrics(&self) -> MetricSet {
        let mut set = MetricSet::new();

        set.insert(METRIC_USER_COUNT, self.user_count);
        set.insert(METRIC_LIVECONN_COUNT, self.connections.len());
        set.insert(
            METRIC_LIVECONN_CURRENTVERSION_COUNT,
            count_current_version(&self.connections, &self.meta.version),
        );
        set.insert(METRIC_TOTAL_JOBS_48H, self.jobs_48h);
        set.insert(
            METRIC_UPTIME,
            self.poll_start
                .timestamp()
                .saturating_sub(self.meta.server_start_time),
        );
        set.insert(
            METRIC_SELFBACKUP_AGE,
            selfbackup_age(&self.meta.self_backup, self.poll_end.timestamp()),
        );
        set.insert(METRIC_VERSION_NUMBER, version_number(&self.meta.version));
        set.insert(
            METRIC_TOTAL_API_TIME,
            (self.poll_end - self.poll_start).num_milliseconds(),
        );

        set
    }
}

/// Connections whose client reports exactly the server's version
pub fn count_current_version(connections: &HashMap<String, LiveConnection>, version: &str) -> usize {
    connections
        .values()
        .filter(|conn| conn.reported_version == version)
        .count()
}

/// Seconds since the first successful self-backup run in the list
///
/// The list order is whatever the server returns; the first success wins,
/// not the most recent one. No success at all reports one year.
pub fn selfbackup_age(runs: &[SelfBackupRun], now: i64) -> i64 {
    runs.iter()
        .find(|run| run.last_run_success)
        .map(|run| now.saturating_sub(run.last_run_end))
        .unwrap_or(SELFBACKUP_NEVER_SUCCEEDED_SECS)
}

/// Encode `major.minor.patch` as `major*10000 + minor*100 + patch`
///
/// Anything other than exactly three integer components yields 0, as does
/// a result that does not fit in an i64.
pub fn version_number(version: &str) -> i64 {
    let parts: Vec<&str> = version.split('.').collect();
    if parts.len() != 3 {
        return 0;
    }

    let mut numbers = [0i64; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        match part.trim().parse::<i64>() {
            Ok(n) => *slot = n,
            Err(_) => return 0,
        }
    }

    numbers[0]
        .checked_mul(10000)
        .and_then(|v| v.checked_add(numbers[1].checked_mul(100)?))
        .and_then(|v| v.checked_add(numbers[2]))
        .unwrap_or(0)
}
