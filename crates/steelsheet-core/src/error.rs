#[derive(Debug, thiserror::Error)]
pub enum SteelsheetError {
    #[error("failed to open workbook: {0}")]
    Workbook(String),

    #[error("unsupported file type '{0}'. Supported: .xls, .xlsx, .xlsm")]
    UnsupportedFile(String),

    #[error("workbook contains no sheets")]
    NoSheets,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(String),
}
