/// Comet Server admin API and collectd protocol constants

/// Admin API endpoints, relative to the server base URL
pub const ENDPOINT_LIST_USERS: &str = "api/v1/admin/list-users";
pub const ENDPOINT_LIST_ACTIVE: &str = "api/v1/admin/dispatcher/list-active";
pub const ENDPOINT_JOBS_FOR_DATE_RANGE: &str = "api/v1/admin/get-jobs-for-date-range";
pub const ENDPOINT_META_VERSION: &str = "api/v1/admin/meta/version";

/// Only supported admin authentication mode
pub const AUTH_TYPE_PASSWORD: &str = "Password";

/// Environment variables set by the collectd exec plugin
pub const ENV_COLLECTD_HOSTNAME: &str = "COLLECTD_HOSTNAME";
pub const ENV_COLLECTD_INTERVAL: &str = "COLLECTD_INTERVAL";

/// Job history window: 48 hours back, 3 minutes ahead of the poll start
pub const JOBS_WINDOW_BEFORE_SECS: i64 = 86400 * 2;
pub const JOBS_WINDOW_AFTER_SECS: i64 = 180;

/// Reported self-backup age when no successful run exists (one year)
pub const SELFBACKUP_NEVER_SUCCEEDED_SECS: i64 = 365 * 86400;

/// Default per-request HTTP timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Metric names, in emission order
pub const METRIC_USER_COUNT: &str = "user_count";
pub const METRIC_LIVECONN_COUNT: &str = "liveconn_count";
pub const METRIC_LIVECONN_CURRENTVERSION_COUNT: &str = "liveconn_currentversion_count";
pub const METRIC_TOTAL_JOBS_48H: &str = "total_jobs_48h";
pub const METRIC_UPTIME: &str = "uptime";
pub const METRIC_SELFBACKUP_AGE: &str = "selfbackup_age";
pub const METRIC_VERSION_NUMBER: &str = "version_number";
pub const METRIC_TOTAL_API_TIME: &str = "total_api_time";

pub const METRIC_NAMES: &[&str] = &[
    METRIC_USER_COUNT,
    METRIC_LIVECONN_COUNT,
    METRIC_LIVECONN_CURRENTVERSION_COUNT,
    METRIC_TOTAL_JOBS_48H,
    METRIC_UPTIME,
    METRIC_SELFBACKUP_AGE,
    METRIC_VERSION_NUMBER,
    METRIC_TOTAL_API_TIME,
];
