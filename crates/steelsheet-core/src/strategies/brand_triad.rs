//! Supplier layout: repeating (spec, price, count) column triads.
//!
//! Spec cells alternate between full `size*thickness` tokens and bare
//! thickness tokens that reuse the last full size seen in the same column
//! block; counts stick per block until replaced.

use std::collections::HashMap;

use crate::grid::Grid;
use crate::normalize::format_thickness;
use crate::strategies::{header_labels, find_header_row, Extraction, LayoutMatch, LayoutStrategy, RawPriceRecord};

pub struct BrandTriadStrategy;

impl LayoutStrategy for BrandTriadStrategy {
    fn name(&self) -> &'static str {
        "brand-triad"
    }

    fn match_grid(&self, grid: &Grid) -> Option<LayoutMatch> {
        find_header_row(grid, 20, |row| {
            row.contains("正大热镀") && row.contains("规格")
        })
    }

    fn extract(&self, grid: &Grid, at: LayoutMatch) -> Extraction {
        let headers = header_labels(grid, at.header_row);
        let mut records = Vec::new();
        // Inheritance state, keyed by block-anchor column, scoped to this call.
        let mut last_sizes: HashMap<usize, String> = HashMap::new();
        let mut last_counts: HashMap<usize, String> = HashMap::new();

        for row in at.data_start_row..grid.height() {
            if grid.row_is_blank(row) {
                continue;
            }
            for anchor in (0..grid.width().saturating_sub(2)).step_by(3) {
                let spec_val = grid.cell(row, anchor).as_text();
                let price = grid.cell(row, anchor + 1).as_number();

                let count_val = grid.cell(row, anchor + 2).as_text();
                if !count_val.is_empty() {
                    last_counts.insert(anchor, count_val);
                }
                let count = last_counts.get(&anchor).cloned().unwrap_or_default();

                let price = match price {
                    Some(p) if p != 0.0 => p,
                    _ => continue,
                };
                if spec_val.is_empty() {
                    continue;
                }

                let (full_spec, thickness) = if spec_val.contains('*') {
                    let parts: Vec<&str> = spec_val.split('*').collect();
                    if parts.len() < 2 {
                        continue;
                    }
                    last_sizes.insert(anchor, parts[0].trim().to_string());
                    (spec_val.clone(), parts[1].trim().to_string())
                } else if let Some(size) = last_sizes.get(&anchor) {
                    // Bare thickness row: reuse the block's current size.
                    (format!("{size}*{spec_val}"), spec_val.clone())
                } else {
                    continue;
                };

                records.push(RawPriceRecord {
                    spec: full_spec,
                    thickness: format_thickness(&thickness),
                    price,
                    count,
                    ..Default::default()
                });
            }
        }

        Extraction { records, headers }
    }
}
