use chrono::{DateTime, Local, NaiveDateTime};

/// Render a server timestamp for display. The archive sends ISO-8601
/// date-times; anything unparseable is shown verbatim.
pub fn format_date(raw: &str) -> String {
    if raw.is_empty() {
        return "--".to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}

/// Header wall clock, updated by the 1s tick.
pub fn clock_now() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Profile card rendering of a username: uppercased, spaces dotted.
pub fn subject_name(username: &str) -> String {
    username.to_uppercase().replace(' ', ".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_variants() {
        assert_eq!(format_date("2024-06-11T01:30:00"), "2024-06-11 01:30");
        assert_eq!(format_date(""), "--");
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_subject_name() {
        assert_eq!(subject_name("night watcher"), "NIGHT.WATCHER");
    }
}
