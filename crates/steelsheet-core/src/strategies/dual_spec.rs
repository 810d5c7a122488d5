//! Supplier layout: repeating (square spec, rect spec, thickness, price)
//! column blocks. Both spec cells may hold several values at once and each
//! inherits its last non-blank value independently per anchor column.

use std::collections::HashMap;

use crate::grid::Grid;
use crate::normalize::{format_thickness, parse_spec_cell};
use crate::strategies::{header_labels, find_header_row, Extraction, LayoutMatch, LayoutStrategy, RawPriceRecord};

pub struct DualSpecStrategy;

impl LayoutStrategy for DualSpecStrategy {
    fn name(&self) -> &'static str {
        "dual-spec"
    }

    fn match_grid(&self, grid: &Grid) -> Option<LayoutMatch> {
        find_header_row(grid, 20, |row| {
            row.contains("方管")
                && row.contains("矩管")
                && row.contains("厚度")
                && row.contains("价格")
        })
    }

    fn extract(&self, grid: &Grid, at: LayoutMatch) -> Extraction {
        let headers = header_labels(grid, at.header_row);
        let mut records = Vec::new();
        let mut last_specs: HashMap<usize, Vec<String>> = HashMap::new();

        for row in at.data_start_row..grid.height() {
            if grid.row_is_blank(row) {
                continue;
            }
            for anchor in (0..grid.width().saturating_sub(3)).step_by(4) {
                let square = inherited_specs(grid, row, anchor, &mut last_specs);
                let rect = inherited_specs(grid, row, anchor + 1, &mut last_specs);

                let thickness = grid.cell(row, anchor + 2).as_text();
                let price = grid.cell(row, anchor + 3).as_number();

                let price = match price {
                    Some(p) if p != 0.0 => p,
                    _ => continue,
                };
                if thickness.is_empty() {
                    continue;
                }

                for spec in square.into_iter().chain(rect) {
                    records.push(RawPriceRecord {
                        spec,
                        thickness: format_thickness(&thickness),
                        price,
                        ..Default::default()
                    });
                }
            }
        }

        Extraction { records, headers }
    }
}

/// Parse a spec cell; a non-blank cell replaces the column's remembered
/// values, a blank one reuses them.
fn inherited_specs(
    grid: &Grid,
    row: usize,
    col: usize,
    last_specs: &mut HashMap<usize, Vec<String>>,
) -> Vec<String> {
    let parsed = parse_spec_cell(&grid.cell(row, col).as_text());
    if !parsed.is_empty() {
        last_specs.insert(col, parsed.clone());
        parsed
    } else {
        last_specs.get(&col).cloned().unwrap_or_default()
    }
}
