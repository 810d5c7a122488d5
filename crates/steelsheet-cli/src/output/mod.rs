pub mod csv;
pub mod json;
pub mod table;

use steelsheet_core::ProcessOutput;

/// One processed workbook: the source file name plus the engine output
/// for its first sheet.
pub struct FileResult {
    pub file: String,
    pub result: ProcessOutput,
}
