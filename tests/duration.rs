#[cfg(test)]
mod tests {
    use lpa::libs::duration::{
        derive_durations, resolve, span_minutes, DurationSource, InvalidReason, ZeroDurationPolicy,
    };
    use lpa::libs::error::TimeParseError;
    use lpa::libs::schema::{ColumnMapping, SchemaConfig};
    use lpa::libs::table::{CellValue, RawTable};
    use lpa::libs::time::ParseOptions;

    fn text(value: &str) -> CellValue {
        CellValue::from_text(value)
    }

    fn table(columns: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter().map(|r| r.iter().map(|v| text(v)).collect()).collect(),
        )
    }

    #[test]
    fn test_midnight_rollover() {
        assert_eq!(span_minutes(1320.0, 120.0, ZeroDurationPolicy::Keep), 240.0);
        assert_eq!(span_minutes(480.0, 510.0, ZeroDurationPolicy::Keep), 30.0);
    }

    #[test]
    fn test_zero_span_policy() {
        assert_eq!(span_minutes(600.0, 600.0, ZeroDurationPolicy::Keep), 0.0);
        assert_eq!(span_minutes(600.0, 600.0, ZeroDurationPolicy::OneMinute), 1.0);
    }

    #[test]
    fn test_positive_primary_wins() {
        let resolved = resolve(
            Some(12.5),
            &text("22:00"),
            &text("02:00"),
            &ParseOptions::default(),
            ZeroDurationPolicy::Keep,
        )
        .unwrap();
        assert_eq!(resolved.minutes, 12.5);
        assert_eq!(resolved.source, DurationSource::Primary);
    }

    #[test]
    fn test_fallback_to_start_end() {
        for primary in [None, Some(0.0), Some(-3.0)] {
            let resolved = resolve(
                primary,
                &text("22:00"),
                &text("02:00"),
                &ParseOptions::default(),
                ZeroDurationPolicy::Keep,
            )
            .unwrap();
            assert_eq!(resolved.minutes, 240.0);
            assert_eq!(resolved.source, DurationSource::StartEnd);
        }
    }

    #[test]
    fn test_unparseable_start_or_end() {
        let options = ParseOptions::default();
        assert_eq!(
            resolve(None, &CellValue::Empty, &text("02:00"), &options, ZeroDurationPolicy::Keep),
            Err(InvalidReason::Start(TimeParseError::Missing))
        );
        assert!(matches!(
            resolve(None, &text("08:00"), &text("later"), &options, ZeroDurationPolicy::Keep),
            Err(InvalidReason::End(TimeParseError::BadFormat(_)))
        ));
    }

    #[test]
    fn test_derive_durations_with_start_end() {
        let table = table(
            &["Order", "Process Time", "START", "END"],
            &[
                &["A1", "00:45", "08:00", "09:00"],
                &["A2", "", "22:00", "02:00"],
                &["A3", "", "10:00", "10:00"],
                &["A4", "", "", "10:00"],
            ],
        );
        let mapping = ColumnMapping::resolve(&table, &SchemaConfig::default(), 10);
        let derived = derive_durations(&table, &mapping, &ParseOptions::default(), ZeroDurationPolicy::Keep);

        assert_eq!(derived.len(), 4);
        assert_eq!(derived[0].outcome.as_ref().map(|r| r.minutes), Ok(45.0));
        assert_eq!(derived[0].start_minutes, Some(480.0));
        assert_eq!(derived[1].outcome.as_ref().map(|r| r.minutes), Ok(240.0));
        assert_eq!(derived[2].outcome.as_ref().map(|r| r.minutes), Ok(0.0));
        assert!(derived[3].outcome.is_err());
        assert_eq!(derived[3].start_minutes, None);
    }

    #[test]
    fn test_derive_durations_without_start_end() {
        let table = table(&["Order", "Process Time"], &[&["A1", "00:30"], &["A2", "soon"], &["A3", ""]]);
        let mapping = ColumnMapping::resolve(&table, &SchemaConfig::default(), 10);
        let derived = derive_durations(&table, &mapping, &ParseOptions::default(), ZeroDurationPolicy::Keep);

        assert_eq!(derived[0].outcome.as_ref().map(|r| r.source), Ok(DurationSource::Primary));
        assert!(matches!(
            derived[1].outcome,
            Err(InvalidReason::Primary(TimeParseError::BadFormat(_)))
        ));
        assert_eq!(derived[2].outcome, Err(InvalidReason::Primary(TimeParseError::Missing)));
    }

    #[test]
    fn test_no_duration_source() {
        let table = table(&["Order", "Comment"], &[&["A1", "x"]]);
        let mapping = ColumnMapping::resolve(&table, &SchemaConfig::default(), 10);
        let derived = derive_durations(&table, &mapping, &ParseOptions::default(), ZeroDurationPolicy::Keep);
        assert_eq!(derived[0].outcome, Err(InvalidReason::NoDurationSource));
    }
}
