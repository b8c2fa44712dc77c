pub mod api;
pub mod config;
pub mod metrics;
pub mod putval;
pub mod sampler;
pub mod scheduler;

pub use api::{AdminApi, ApiError, CometClient};
pub use config::{Config, ConfigError, Credentials};
pub use metrics::{MetricSet, MetricValue, ServerSnapshot};
pub use putval::{MetricSink, PutvalWriter};
pub use sampler::{Clock, MetricsSampler, SystemClock};
pub use scheduler::{run, PollSchedule};
