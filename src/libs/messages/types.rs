#[derive(Debug, Clone)]
pub enum Message {
    // === LOAD MESSAGES ===
    LoadingFile(String),              // path
    FileLoaded(usize, usize),         // rows, columns
    DecodedAsWindows1250,

    // === COLUMN MAPPING MESSAGES ===
    ColumnsHeader(String),            // path
    UsingExportedDurationColumn(String), // column
    UsingCleanedTimeColumn(String),   // column
    UsingProcessTimeColumn(String),   // column
    CleanedColumnTooSparse(String, usize, usize), // column, filled, required
    NoDurationSource(Vec<String>),    // expected columns
    DurationComputedFromStartEnd(usize), // resolved rows
    PiecesColumnMissing,
    MaterialColumnMissing,
    CustomerColumnFallback(String),   // column
    DetectedColumns(Vec<String>),

    // === ANALYSIS MESSAGES ===
    NoUsableRows,
    CheckDurationColumns(Vec<String>), // expected columns
    InvalidRowsExcluded(usize, usize), // invalid, total
    DashboardHeader(String),           // file name
    HeadlineHeader,
    SlowestMaterialsHeader(usize),     // min occurrences
    NoMaterialsRanked(usize),          // min occurrences
    TopCustomersHeader,
    PackagingHeader,
    NoPackagingColumns,
    HourlyLoadHeader,
    UnknownHourRows(usize),
    AnomaliesHeader(f64),              // factor
    NoAnomalies,
    InvalidPreviewHeader(usize, usize), // shown, total

    // === EXPORT MESSAGES ===
    ExportingData(String),             // format
    ExportCompleted(String),           // path
    ExportFailed(String),              // path

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigParseError,
    ConfigModuleAnalysis,
    ConfigModuleSchema,
    DataStoragePathError,

    // === PROMPTS ===
    PromptSelectModules,
    PromptZeroDurationPolicy,
    PromptDecimalClock,
    PromptStrictClock,
    PromptMinCleanedRows,
    PromptTopN,
    PromptAnomalyFactor,
    PromptInvalidPreviewRows,
    PromptSynonyms(String), // field name

    // === GENERAL MESSAGES ===
    CriticalError(String),
    ReportIssueHint,
}
