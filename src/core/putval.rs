/// collectd exec plugin output
///
/// Emits one `PUTVAL` line per metric and flushes after the whole set,
/// so collectd never sees a partial cycle.

use std::io::{self, Write};

use crate::core::config::Config;
use crate::core::metrics::MetricSet;

/// Destination for the metrics of each poll cycle
pub trait MetricSink {
    fn emit(&mut self, metrics: &MetricSet) -> io::Result<()>;
}

pub struct PutvalWriter<W: Write> {
    out: W,
    hostname: String,
    namespace: String,
    interval_secs: u64,
}

impl<W: Write> PutvalWriter<W> {
    pub fn new(
        out: W,
        hostname: impl Into<String>,
        namespace: impl Into<String>,
        interval_secs: u64,
    ) -> Self {
        Self {
            out,
            hostname: hostname.into(),
            namespace: namespace.into(),
            interval_secs,
        }
    }

    pub fn from_config(out: W, config: &Config) -> Self {
        Self::new(
            out,
            config.hostname.clone(),
            config.namespace.clone(),
            config.interval_secs(),
        )
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Format a single PUTVAL line (without trailing newline)
    pub fn format_line(&self, name: &str, value: impl std::fmt::Display) -> String {
        format!(
            "PUTVAL \"{}/{}/{}\" interval={} N:{}",
            self.hostname, self.namespace, name, self.interval_secs, value
        )
    }
}

impl<W: Write> MetricSink for PutvalWriter<W> {
    fn emit(&mut self, metrics: &MetricSet) -> io::Result<()> {
        for (name, value) in metrics.iter() {
            let line = self.format_line(name, value);
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }
}
