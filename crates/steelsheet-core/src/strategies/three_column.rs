//! Generic layout: repeating (spec, thickness, price) column triads.
//!
//! Terminal registry entry. Matching relaxes in three steps: full
//! spec/thickness/price header, then a bare spec label in the first ten
//! rows, then an unconditional fixed header/data position so dispatch is
//! total over any grid.

use std::collections::HashMap;

use crate::grid::Grid;
use crate::normalize::{format_thickness, parse_spec_cell};
use crate::strategies::{header_labels, find_header_row, Extraction, LayoutMatch, LayoutStrategy, RawPriceRecord};

/// Header/data rows assumed when no signature is found anywhere.
const FALLBACK_HEADER_ROW: usize = 6;

pub struct ThreeColumnStrategy;

impl LayoutStrategy for ThreeColumnStrategy {
    fn name(&self) -> &'static str {
        "three-column"
    }

    fn match_grid(&self, grid: &Grid) -> Option<LayoutMatch> {
        find_header_row(grid, 20, |row| {
            row.contains("规格") && row.contains("厚度") && row.contains("价格")
        })
        .or_else(|| find_header_row(grid, 10, |row| row.contains("规格")))
        .or(Some(LayoutMatch {
            header_row: FALLBACK_HEADER_ROW,
            data_start_row: FALLBACK_HEADER_ROW + 1,
        }))
    }

    fn extract(&self, grid: &Grid, at: LayoutMatch) -> Extraction {
        let headers = header_labels(grid, at.header_row);
        let mut records = Vec::new();
        let mut last_specs: HashMap<usize, Vec<String>> = HashMap::new();

        for row in at.data_start_row..grid.height() {
            if grid.row_is_blank(row) {
                continue;
            }
            for anchor in (0..grid.width().saturating_sub(2)).step_by(3) {
                let parsed = parse_spec_cell(&grid.cell(row, anchor).as_text());
                if !parsed.is_empty() {
                    last_specs.insert(anchor, parsed.clone());
                }
                let specs = if !parsed.is_empty() {
                    parsed
                } else {
                    last_specs.get(&anchor).cloned().unwrap_or_default()
                };

                let thickness = grid.cell(row, anchor + 1).as_text();
                let price = grid.cell(row, anchor + 2).as_number();

                let price = match price {
                    Some(p) if p != 0.0 => p,
                    _ => continue,
                };
                if specs.is_empty() || thickness.is_empty() {
                    continue;
                }

                for spec in specs {
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
