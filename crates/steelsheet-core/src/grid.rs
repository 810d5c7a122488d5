use serde::{Deserialize, Serialize};
use std::fmt;

/// One spreadsheet cell. Source sheets are untyped, so a cell is either
/// text, a number, or empty; everything downstream decides per use whether
/// it wants the textual or the numeric view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// Textual view of the cell. Integer-valued numbers render without a
    /// trailing `.0` so that `40` in a spec cell reads as "40", matching how
    /// the source sheets display them.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) => render_number(*n),
        }
    }

    /// Numeric view. Text cells that parse cleanly as a float count as
    /// numbers; price lists frequently carry numbers typed as text.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok(),
            Cell::Empty => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

pub(crate) fn render_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Immutable 2-D cell array for one decoded sheet. Built once by the
/// spreadsheet-decoding boundary and never mutated by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Grid { rows, width }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Cell at (row, col); out-of-range positions read as empty, which lets
    /// ragged source rows behave like a rectangular grid.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    pub fn row_is_blank(&self, row: usize) -> bool {
        match self.rows.get(row) {
            Some(r) => r.iter().all(Cell::is_empty),
            None => true,
        }
    }

    /// All non-empty cells of a row joined with single spaces, the unit the
    /// signature scans run over.
    pub fn row_text(&self, row: usize) -> String {
        match self.rows.get(row) {
            Some(r) => r
                .iter()
                .filter(|c| !c.is_empty())
                .map(Cell::as_text)
                .collect::<Vec<_>>()
                .join(" "),
            None => String::new(),
        }
    }

    /// The whole grid rendered to searchable text, one line per row.
    pub fn to_text(&self) -> String {
        (0..self.height())
            .map(|r| self.row_text(r))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub fn grid_of(rows: &[&[&str]]) -> Grid {
        Grid::new(
            rows.iter()
                .map(|r| {
                    r.iter()
                        .map(|s| {
                            if s.is_empty() {
                                Cell::Empty
                            } else if let Ok(n) = s.parse::<f64>() {
                                Cell::Number(n)
                            } else {
                                Cell::Text(s.to_string())
                            }
                        })
                        .collect()
                })
                .collect(),
        )
    }

    #[test]
    fn integer_number_renders_without_decimal_point() {
        assert_eq!(Cell::Number(40.0).as_text(), "40");
        assert_eq!(Cell::Number(2.5).as_text(), "2.5");
    }

    #[test]
    fn text_number_has_numeric_view() {
        assert_eq!(Cell::Text(" 5200 ".into()), Cell::Text(" 5200 ".into()));
        assert_eq!(Cell::Text("5200".into()).as_number(), Some(5200.0));
        assert_eq!(Cell::Text("规格".into()).as_number(), None);
    }

    #[test]
    fn out_of_range_reads_empty() {
        let g = grid_of(&[&["a"]]);
        assert!(g.cell(5, 5).is_empty());
        assert!(g.row_is_blank(9));
    }

    #[test]
    fn row_text_skips_empty_cells() {
        let g = grid_of(&[&["规格", "", "价格"]]);
        assert_eq!(g.row_text(0), "规格 价格");
    }
}
