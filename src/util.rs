//! Shared utility functions.

use std::time::Duration;

/// Format a run duration for display, e.g. `1 min 5 sec` or `2 hr 3 min`.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs >= 3600 {
        format!("{} hr {} min", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{} min {} sec", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{} sec", secs)
    } else {
        format!("{} ms", d.as_millis())
    }
}

/// Case-insensitive job name comparison.
pub fn job_names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_hours() {
        assert_eq!(format_duration(Duration::from_secs(7380)), "2 hr 3 min");
    }

    #[test]
    fn test_format_duration_minutes() {
        assert_eq!(format_duration(Duration::from_secs(65)), "1 min 5 sec");
    }

    #[test]
    fn test_format_duration_seconds() {
        assert_eq!(format_duration(Duration::from_secs(12)), "12 sec");
    }

    #[test]
    fn test_format_duration_sub_second() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250 ms");
    }

    #[test]
    fn test_job_names_match_ignores_case() {
        assert!(job_names_match("Build-X", "build-x"));
        assert!(!job_names_match("build-x", "build-y"));
    }
}
