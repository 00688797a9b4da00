#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use lpa::libs::error::TimeParseError;
    use lpa::libs::table::CellValue;
    use lpa::libs::time::{parse_clock, parse_clock_str, parse_minutes, ParseOptions};

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    fn tolerant() -> ParseOptions {
        ParseOptions::default()
    }

    fn strict() -> ParseOptions {
        ParseOptions {
            decimal_clock: true,
            strict_clock: true,
        }
    }

    #[test]
    fn test_hh_mm_ss() {
        assert_eq!(parse_clock(&text("08:15:30"), &tolerant()), Ok(8.0 * 60.0 + 15.0 + 0.5));
        assert_eq!(parse_clock(&text("00:00:00"), &tolerant()), Ok(0.0));
    }

    #[test]
    fn test_hh_mm() {
        assert_eq!(parse_clock(&text("14:30"), &tolerant()), Ok(870.0));
        assert_eq!(parse_clock(&text("  7:05  "), &tolerant()), Ok(425.0));
    }

    #[test]
    fn test_date_prefix_is_dropped() {
        assert_eq!(parse_clock(&text("1900-01-01 14:00:00"), &tolerant()), Ok(840.0));
        assert_eq!(parse_clock(&text("2024-03-01 06:00"), &tolerant()), Ok(360.0));
    }

    #[test]
    fn test_decimal_clock() {
        assert_eq!(parse_clock(&text("14.30"), &tolerant()), Ok(870.0));

        let options = ParseOptions {
            decimal_clock: false,
            strict_clock: false,
        };
        assert!(matches!(
            parse_clock(&text("14.30"), &options),
            Err(TimeParseError::BadFormat(_))
        ));
    }

    #[test]
    fn test_native_values() {
        let datetime = NaiveDate::from_ymd_opt(2024, 5, 2)
            .unwrap()
            .and_hms_opt(22, 10, 30)
            .unwrap();
        assert_eq!(parse_clock(&CellValue::DateTime(datetime), &tolerant()), Ok(1330.5));

        let time = NaiveTime::from_hms_opt(2, 0, 0).unwrap();
        assert_eq!(parse_clock(&CellValue::Time(time), &tolerant()), Ok(120.0));
    }

    #[test]
    fn test_missing_values() {
        assert_eq!(parse_clock(&CellValue::Empty, &tolerant()), Err(TimeParseError::Missing));
        assert_eq!(parse_clock(&text(""), &tolerant()), Err(TimeParseError::Missing));
        assert_eq!(parse_clock(&text("   "), &tolerant()), Err(TimeParseError::Missing));
        assert_eq!(parse_minutes(&CellValue::Empty, &tolerant()), None);
    }

    #[test]
    fn test_bad_format() {
        for raw in ["not a time", "12", "1:2:3:4", "ab:cd", "12:"] {
            assert!(
                matches!(parse_clock_str(raw, &tolerant()), Err(TimeParseError::BadFormat(_))),
                "{} should be rejected",
                raw
            );
        }
        assert_eq!(parse_minutes(&text("not a time"), &tolerant()), None);
    }

    #[test]
    fn test_out_of_range_accepted_by_default() {
        assert_eq!(parse_clock_str("99:99", &tolerant()), Ok(6039.0));
        assert_eq!(parse_clock_str("25:00", &tolerant()), Ok(1500.0));
    }

    #[test]
    fn test_strict_clock_rejects_out_of_range() {
        assert!(matches!(
            parse_clock_str("99:99", &strict()),
            Err(TimeParseError::OutOfRange(_))
        ));
        assert!(matches!(
            parse_clock_str("10:60", &strict()),
            Err(TimeParseError::OutOfRange(_))
        ));
        assert_eq!(parse_clock_str("23:59:59", &strict()).map(|m| m.floor()), Ok(1439.0));
    }

    #[test]
    fn test_numeric_cell_goes_through_text() {
        assert_eq!(parse_clock(&CellValue::Number(6.45), &tolerant()), Ok(405.0));
    }
}
