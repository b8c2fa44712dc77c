/// Helper utilities for the collectd plugin

/// Format duration to human-readable string
pub fn format_duration(seconds: u64) -> String {
    let days = seconds / 86400;
    let hours = (seconds % 86400) / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Join a base URL and a relative endpoint path with exactly one slash
pub fn join_url(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(30), "30s");
        assert_eq!(format_duration(60), "1m 0s");
        assert_eq!(format_duration(3661), "1h 1m");
        assert_eq!(format_duration(86400), "1d 0h");
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://comet.example.com/", "api/v1/admin/list-users"),
            "https://comet.example.com/api/v1/admin/list-users"
        );
        assert_eq!(
            join_url("https://comet.example.com", "/api/v1/admin/list-users"),
            "https://comet.example.com/api/v1/admin/list-users"
        );
        assert_eq!(
            join_url("http://10.0.0.5:8060/comet/", "api/v1/admin/meta/version"),
            "http://10.0.0.5:8060/comet/api/v1/admin/meta/version"
        );
    }
}
