#[cfg(test)]
mod tests {
    use lpa::libs::config::{split_synonyms, AnalysisConfig, Config, CONFIG_FILE_NAME};
    use lpa::libs::data_storage::DataStorage;
    use lpa::libs::duration::ZeroDurationPolicy;
    use lpa::libs::schema::SchemaConfig;
    use lpa::libs::time::ParseOptions;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Points the platform data directory at a scratch directory.
    ///
    /// Holds a lock for the whole test since `HOME` is process-wide.
    struct ConfigTestContext {
        _temp_dir: TempDir,
        _guard: MutexGuard<'static, ()>,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext {
                _temp_dir: temp_dir,
                _guard: guard,
            }
        }
    }

    #[test]
    fn test_analysis_defaults() {
        let settings = AnalysisConfig::default();
        assert_eq!(settings.zero_duration_policy, ZeroDurationPolicy::Keep);
        assert!(settings.decimal_clock);
        assert!(!settings.strict_clock);
        assert_eq!(settings.min_cleaned_rows, 10);
        assert_eq!(settings.top_n, 10);
        assert_eq!(settings.anomaly_factor, 3.0);
        assert_eq!(settings.parse_options(), ParseOptions::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"analysis": {"zero_duration_policy": "one_minute", "top_n": 5}}"#).unwrap();
        let settings = config.analysis();

        assert_eq!(settings.zero_duration_policy, ZeroDurationPolicy::OneMinute);
        assert_eq!(settings.top_n, 5);
        assert_eq!(settings.min_cleaned_rows, 10);
        assert_eq!(config.schema(), SchemaConfig::default());
    }

    #[test]
    fn test_split_synonyms() {
        assert_eq!(split_synonyms(" piece, kus ,,"), vec!["piece".to_string(), "kus".to_string()]);
        assert!(split_synonyms("").is_empty());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(_ctx: &mut ConfigTestContext) {
        let config = Config::read().unwrap();
        assert!(config.analysis.is_none());
        assert!(config.schema.is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(_ctx: &mut ConfigTestContext) {
        let config = Config {
            analysis: Some(AnalysisConfig {
                strict_clock: true,
                anomaly_factor: 2.5,
                ..AnalysisConfig::default()
            }),
            schema: Some(SchemaConfig {
                pieces: vec!["stk".to_string()],
                ..SchemaConfig::default()
            }),
        };
        config.save().unwrap();

        let read_config = Config::read().unwrap();
        assert_eq!(read_config.analysis, config.analysis);
        assert_eq!(read_config.schema, config.schema);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_corrupted_config(_ctx: &mut ConfigTestContext) {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME).unwrap();
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Config::read().is_err());
    }
}
