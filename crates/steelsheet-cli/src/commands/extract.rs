use std::path::{Path, PathBuf};

use steelsheet_core::error::SteelsheetError;
use steelsheet_core::extraction;

use crate::output::{self, FileResult};

const SUPPORTED: [&str; 3] = ["xls", "xlsx", "xlsm"];

pub fn run(
    input_files: &[PathBuf],
    manufacturer: Option<&str>,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), SteelsheetError> {
    let mut results = Vec::new();

    for path in input_files {
        check_extension(path)?;
        let bytes = std::fs::read(path)?;
        let sheets = extraction::read_workbook(&bytes)?;

        // Suppliers put the price list on the first sheet; the rest is
        // boilerplate (contact pages, old lists).
        let Some(named) = sheets.into_iter().next() else {
            continue;
        };

        let file = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let result = steelsheet_core::process_grid(&named.grid, &file, manufacturer);

        if result.records.is_empty() {
            eprintln!("warning: {}: no price records found", path.display());
        } else {
            eprintln!(
                "{}: {} record(s) via {} layout",
                path.display(),
                result.records.len(),
                result.strategy
            );
        }
        results.push(FileResult { file, result });
    }

    let rendered = match output_format {
        "json" => output::json::render(&results)?,
        "csv" => output::csv::render(&results)?,
        _ => output::table::render(&results).into_bytes(),
    };

    match output_file {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            eprintln!("written to {}", path.display());
        }
        None => {
            use std::io::Write;
            std::io::stdout().write_all(&rendered)?;
        }
    }

    Ok(())
}

fn check_extension(path: &Path) -> Result<(), SteelsheetError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if SUPPORTED.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(SteelsheetError::UnsupportedFile(
            path.display().to_string(),
        ))
    }
}
