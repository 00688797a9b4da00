#[cfg(test)]
mod tests {
    use chrono::Duration;
    use lpa::libs::formatter::{format_count, format_decimal, format_duration, format_minutes, format_percent};

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(&Duration::zero()), "00:00");
        assert_eq!(format_duration(&Duration::minutes(90)), "01:30");
        assert_eq!(format_duration(&Duration::hours(100)), "100:00");
        assert_eq!(format_duration(&Duration::minutes(-30)), "00:00");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(240.0), "04:00");
        assert_eq!(format_minutes(29.6), "00:30");
        assert_eq!(format_minutes(f64::NAN), "00:00");
    }

    #[test]
    fn test_format_minutes_out_of_duration_range() {
        // "99999999999999:00" parses to this many minutes
        assert_eq!(format_minutes(5_999_999_999_999_940.0), "5 999 999 999 999 940 min");
        assert_eq!(format_minutes(-6e15), "-6 000 000 000 000 000 min");
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(0.0, 2), "0.00");
        assert_eq!(format_decimal(6.0, 1), "6.0");
        assert_eq!(format_decimal(1234.5, 1), "1 234.5");
        assert_eq!(format_decimal(1234567.0, 0), "1 234 567");
        assert_eq!(format_decimal(-1500.25, 2), "-1 500.25");
        assert_eq!(format_decimal(-0.001, 1), "0.0");
    }

    #[test]
    fn test_format_count_and_percent() {
        assert_eq!(format_count(12000), "12 000");
        assert_eq!(format_percent(1, 8), "12.5 %");
        assert_eq!(format_percent(3, 0), "0.0 %");
    }
}
