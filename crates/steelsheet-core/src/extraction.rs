//! Workbook decoding boundary: raw spreadsheet bytes in, `Grid`s out.
//! The engine itself never touches file bytes; callers decode here and
//! hand grids to `process_grid`.

use std::io::Cursor;

use calamine::{Data, Reader};

use crate::error::SteelsheetError;
use crate::grid::{Cell, Grid};

/// One decoded sheet with its workbook sheet name.
#[derive(Debug, Clone)]
pub struct NamedGrid {
    pub sheet: String,
    pub grid: Grid,
}

/// Decode an xls/xlsx/xlsm workbook into one grid per sheet, in workbook
/// order. Sheet ranges are re-anchored at A1 so header-row offsets match
/// what the supplier sees in their spreadsheet app.
pub fn read_workbook(bytes: &[u8]) -> Result<Vec<NamedGrid>, SteelsheetError> {
    let cursor = Cursor::new(bytes);
    let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
        .map_err(|e| SteelsheetError::Workbook(e.to_string()))?;

    let sheets = workbook.worksheets();
    if sheets.is_empty() {
        return Err(SteelsheetError::NoSheets);
    }

    Ok(sheets
        .into_iter()
        .map(|(sheet, range)| {
            let (start_row, start_col) = range.start().unwrap_or((0, 0));
            let mut rows: Vec<Vec<Cell>> =
                vec![Vec::new(); start_row as usize];
            for data_row in range.rows() {
                let mut row = vec![Cell::Empty; start_col as usize];
                row.extend(data_row.iter().map(to_cell));
                rows.push(row);
            }
            NamedGrid {
                sheet,
                grid: Grid::new(rows),
            }
        })
        .collect())
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => {
            if s.trim().is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => Cell::Text(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) => Cell::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_maps_to_cells() {
        assert_eq!(to_cell(&Data::Empty), Cell::Empty);
        assert_eq!(to_cell(&Data::String("  ".into())), Cell::Empty);
        assert_eq!(
            to_cell(&Data::String("规格".into())),
            Cell::Text("规格".into())
        );
        assert_eq!(to_cell(&Data::Float(5200.0)), Cell::Number(5200.0));
        assert_eq!(to_cell(&Data::Int(50)), Cell::Number(50.0));
    }

    #[test]
    fn garbage_bytes_are_a_workbook_error() {
        let err = read_workbook(b"not a workbook").unwrap_err();
        assert!(matches!(
            err,
            SteelsheetError::Workbook(_) | SteelsheetError::NoSheets
        ));
    }
}
