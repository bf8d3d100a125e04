// Display formatting for raw upstream numbers
//
// Everything the UI shows is a pre-formatted string; raw counts never
// leave the aggregation layer.

/// Format a raw view count for display ("999", "1.5K", "2.3M").
pub fn format_views(views: u64) -> String {
    if views == 0 {
        return "0".to_string();
    }
    if views >= 1_000_000 {
        return format!("{:.1}M", views as f64 / 1_000_000.0);
    }
    if views >= 1_000 {
        return format!("{:.1}K", views as f64 / 1_000.0);
    }
    views.to_string()
}

/// Format a duration in seconds as "m:ss" or "h:mm:ss".
pub fn format_duration(seconds: u64) -> String {
    if seconds == 0 {
        return "00:00".to_string();
    }
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

/// Duration label for an upstream payload. Piped marks live streams with a
/// negative duration; those render as the literal "live".
pub fn duration_label(raw_seconds: i64) -> String {
    if raw_seconds < 0 {
        return "live".to_string();
    }
    format_duration(raw_seconds as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_views_below_thousand_verbatim() {
        assert_eq!(format_views(0), "0");
        assert_eq!(format_views(7), "7");
        assert_eq!(format_views(999), "999");
    }

    #[test]
    fn test_views_thousands() {
        assert_eq!(format_views(1_000), "1.0K");
        assert_eq!(format_views(1_500), "1.5K");
        assert_eq!(format_views(999_999), "1000.0K");
    }

    #[test]
    fn test_views_millions() {
        assert_eq!(format_views(1_000_000), "1.0M");
        assert_eq!(format_views(2_300_000), "2.3M");
    }

    #[test]
    fn test_duration_minutes() {
        assert_eq!(format_duration(65), "1:05");
        assert_eq!(format_duration(599), "9:59");
    }

    #[test]
    fn test_duration_hours() {
        assert_eq!(format_duration(3725), "1:02:05");
        assert_eq!(format_duration(3600), "1:00:00");
    }

    #[test]
    fn test_duration_zero() {
        assert_eq!(format_duration(0), "00:00");
    }

    #[test]
    fn test_live_marker() {
        assert_eq!(duration_label(-1), "live");
        assert_eq!(duration_label(65), "1:05");
    }
}
