//! Persistent settings for the analyzer.
//!
//! Settings live in a JSON file in the platform data directory (see
//! [`DataStorage`]). Both sections are optional; a missing section, or a
//! missing file, means built-in defaults.
//!
//! ```json
//! {
//!   "analysis": {
//!     "zero_duration_policy": "keep",
//!     "decimal_clock": true,
//!     "strict_clock": false,
//!     "min_cleaned_rows": 10,
//!     "top_n": 10,
//!     "anomaly_factor": 3.0,
//!     "invalid_preview_rows": 10
//!   },
//!   "schema": { "pieces": ["piece", "kus"] }
//! }
//! ```

use super::data_storage::DataStorage;
use crate::libs::duration::ZeroDurationPolicy;
use crate::libs::messages::Message;
use crate::libs::schema::SchemaConfig;
use crate::libs::time::ParseOptions;
use crate::msg_print;
use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// A section offered by the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Tunables of the duration pipeline and the dashboard.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// What to do with orders whose START equals END.
    pub zero_duration_policy: ZeroDurationPolicy,

    /// Read `14.30` as `14:30`.
    pub decimal_clock: bool,

    /// Reject clock values such as `25:00` or `10:75`.
    pub strict_clock: bool,

    /// A cleaned time column needs more filled cells than this to be used.
    pub min_cleaned_rows: usize,

    /// Length of the material, customer and anomaly rankings.
    pub top_n: usize,

    /// Orders slower per piece than this multiple of the weighted average are
    /// listed as anomalies.
    pub anomaly_factor: f64,

    /// Invalid orders shown in the diagnostic preview.
    pub invalid_preview_rows: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            zero_duration_policy: ZeroDurationPolicy::Keep,
            decimal_clock: true,
            strict_clock: false,
            min_cleaned_rows: 10,
            top_n: 10,
            anomaly_factor: 3.0,
            invalid_preview_rows: 10,
        }
    }
}

impl AnalysisConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            decimal_clock: self.decimal_clock,
            strict_clock: self.strict_clock,
        }
    }
}

/// Root of `config.json`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaConfig>,
}

impl Config {
    /// Reads `config.json`, returning defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Fails when the file exists but cannot be read or is not valid JSON.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(&config_file_path)?;
        let config: Config = serde_json::from_str(&config_str).with_context(|| Message::ConfigParseError.to_string())?;
        tracing::debug!(path = %config_file_path.display(), "configuration loaded");
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Analysis settings, or defaults.
    pub fn analysis(&self) -> AnalysisConfig {
        self.analysis.clone().unwrap_or_default()
    }

    /// Column synonyms, or defaults.
    pub fn schema(&self) -> SchemaConfig {
        self.schema.clone().unwrap_or_default()
    }

    /// Interactive setup wizard. Current values are offered as defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "analysis".to_string(),
                name: "Analysis".to_string(),
            },
            ConfigModule {
                key: "schema".to_string(),
                name: "Column names".to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "analysis" => {
                    msg_print!(Message::ConfigModuleAnalysis);
                    config.analysis = Some(AnalysisConfig::init(&config.analysis())?);
                }
                "schema" => {
                    msg_print!(Message::ConfigModuleSchema);
                    config.schema = Some(schema_init(&config.schema())?);
                }
                _ => {}
            }
        }

        Ok(config)
    }
}

impl AnalysisConfig {
    fn init(default: &AnalysisConfig) -> Result<Self> {
        let theme = ColorfulTheme::default();
        let policies = [ZeroDurationPolicy::Keep, ZeroDurationPolicy::OneMinute];
        let current = policies.iter().position(|p| *p == default.zero_duration_policy).unwrap_or(0);

        let policy = Select::with_theme(&theme)
            .with_prompt(Message::PromptZeroDurationPolicy.to_string())
            .items(&policies)
            .default(current)
            .interact()?;

        Ok(AnalysisConfig {
            zero_duration_policy: policies[policy],
            decimal_clock: Confirm::with_theme(&theme)
                .with_prompt(Message::PromptDecimalClock.to_string())
                .default(default.decimal_clock)
                .interact()?,
            strict_clock: Confirm::with_theme(&theme)
                .with_prompt(Message::PromptStrictClock.to_string())
                .default(default.strict_clock)
                .interact()?,
            min_cleaned_rows: Input::with_theme(&theme)
                .with_prompt(Message::PromptMinCleanedRows.to_string())
                .default(default.min_cleaned_rows)
                .interact_text()?,
            top_n: Input::with_theme(&theme)
                .with_prompt(Message::PromptTopN.to_string())
                .default(default.top_n)
                .interact_text()?,
            anomaly_factor: Input::with_theme(&theme)
                .with_prompt(Message::PromptAnomalyFactor.to_string())
                .default(default.anomaly_factor)
                .interact_text()?,
            invalid_preview_rows: Input::with_theme(&theme)
                .with_prompt(Message::PromptInvalidPreviewRows.to_string())
                .default(default.invalid_preview_rows)
                .interact_text()?,
        })
    }
}

fn schema_init(default: &SchemaConfig) -> Result<SchemaConfig> {
    let ask = |field: &str, current: &[String]| -> Result<Vec<String>> {
        let answer: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSynonyms(field.to_string()).to_string())
            .default(current.join(", "))
            .interact_text()?;
        Ok(split_synonyms(&answer))
    };

    Ok(SchemaConfig {
        cleaned_time: ask("cleaned time", &default.cleaned_time)?,
        process_time: ask("process time", &default.process_time)?,
        start: ask("START", &default.start)?,
        end: ask("END", &default.end)?,
        pieces: ask("pieces", &default.pieces)?,
        pallets: ask("pallets", &default.pallets)?,
        klts: ask("KLTs", &default.klts)?,
        cartons: ask("cartons", &default.cartons)?,
        material: ask("material", &default.material)?,
        customer: ask("customer", &default.customer)?,
        order_id: ask("order id", &default.order_id)?,
    })
}

/// Splits a comma separated answer into trimmed, non-empty synonyms.
pub fn split_synonyms(answer: &str) -> Vec<String> {
    answer
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
