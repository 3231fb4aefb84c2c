//! Rendering of minute counts as "2h 5 min" style durations.

/// Formats a total number of minutes for display.
///
/// Under an hour renders as minutes only, exact hours drop the minute
/// suffix, everything else shows both. Callers guarantee a positive total
/// (prep and cook times must each be > 0 to save).
pub fn format_duration(total_minutes: i32) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    match (hours, minutes) {
        (0, m) => format!("{} min", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {} min", h, m),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_under_an_hour() {
        assert_eq!(format_duration(45), "45 min");
        assert_eq!(format_duration(1), "1 min");
        assert_eq!(format_duration(59), "59 min");
    }

    #[test]
    fn test_exact_hours() {
        assert_eq!(format_duration(60), "1h");
        assert_eq!(format_duration(120), "2h");
    }

    #[test]
    fn test_hours_and_minutes() {
        assert_eq!(format_duration(90), "1h 30 min");
        assert_eq!(format_duration(125), "2h 5 min");
        assert_eq!(format_duration(61), "1h 1 min");
    }
}
