//! Supplier layout: repeating (spec, wall thickness, weighed price,
//! theoretical price) column blocks, with the block's brand/product phrase
//! sitting in the row directly above the header.
//!
//! The spec cell mixes a bore-size token (`1寸`, `4分`) with loose numeric
//! sub-tokens; the last sub-token that parses as a float is taken as the
//! per-support unit weight. That heuristic is known-imprecise when a cell
//! carries coincidental numeric tokens, and is kept as documented.

use std::collections::HashMap;

use regex::Regex;
use std::sync::LazyLock;

use crate::grid::{render_number, Grid};
use crate::normalize::format_thickness;
use crate::strategies::{header_labels, find_header_row, Extraction, LayoutMatch, LayoutStrategy, RawPriceRecord};

static BORE_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([\d.]+[寸分])").unwrap());

/// Fallback brand for generic welded-pipe block headers.
const DEFAULT_BRAND: &str = "亨旺";

pub struct PipeBlockStrategy;

impl LayoutStrategy for PipeBlockStrategy {
    fn name(&self) -> &'static str {
        "pipe-blocks"
    }

    fn match_grid(&self, grid: &Grid) -> Option<LayoutMatch> {
        find_header_row(grid, 20, |row| {
            row.contains("壁厚") && row.contains("检斤") && row.contains("理论")
        })
    }

    fn extract(&self, grid: &Grid, at: LayoutMatch) -> Extraction {
        let headers = header_labels(grid, at.header_row);
        let mut records = Vec::new();
        // Per-anchor (bore, unit weight) inheritance for blank spec cells.
        let mut last_specs: HashMap<usize, (String, String)> = HashMap::new();

        for row in at.data_start_row..grid.height() {
            if grid.row_is_blank(row) {
                continue;
            }
            for anchor in (0..grid.width().saturating_sub(3)).step_by(4) {
                let (brand, name) = block_identity(grid, at.header_row, anchor);

                let spec_text = grid.cell(row, anchor).as_text();
                if !spec_text.is_empty() {
                    if let Some(parsed) = parse_spec(&spec_text) {
                        last_specs.insert(anchor, parsed);
                    }
                }
                let Some((bore, weight)) = last_specs.get(&anchor).cloned() else {
                    continue;
                };

                let Some(wall) = grid.cell(row, anchor + 1).as_number() else {
                    continue;
                };
                let weighed = grid.cell(row, anchor + 2).as_number().unwrap_or(0.0);
                let theoretical = grid.cell(row, anchor + 3).as_number().unwrap_or(0.0);
                if weighed == 0.0 && theoretical == 0.0 {
                    continue;
                }

                records.push(RawPriceRecord {
                    spec: bore,
                    thickness: format_thickness(&render_number(wall)),
                    price: weighed,
                    secondary_price: theoretical,
                    unit_weight: weight,
                    brand: brand.clone(),
                    name: name.clone(),
                    ..Default::default()
                });
            }
        }

        Extraction { records, headers }
    }
}

/// Split a spec cell into the bore token and the unit weight (last
/// float-parsing sub-token among the rest).
fn parse_spec(text: &str) -> Option<(String, String)> {
    let bore = BORE_TOKEN.captures(text).map(|c| c[1].to_string())?;
    let mut weight = String::new();
    for token in text.split_whitespace() {
        if token.contains(&bore) {
            continue;
        }
        if let Ok(w) = token.parse::<f64>() {
            weight = render_number(w);
        }
    }
    Some((bore, weight))
}

/// Brand and product name for one block, read from the row above the header
/// at the block's anchor column and classified by keyword.
fn block_identity(grid: &Grid, header_row: usize, anchor: usize) -> (Option<String>, Option<String>) {
    if header_row == 0 {
        return (None, None);
    }
    let phrase = grid.cell(header_row - 1, anchor).as_text();
    if phrase.contains(DEFAULT_BRAND) {
        (Some(DEFAULT_BRAND.to_string()), Some("镀锌管".to_string()))
    } else if phrase.contains("焊管") {
        (Some(DEFAULT_BRAND.to_string()), Some("焊管".to_string()))
    } else if phrase.contains('管') {
        let name = if phrase.contains("镀锌") || phrase.contains("热镀") {
            "镀锌管"
        } else {
            "焊管"
        };
        (Some(phrase), Some(name.to_string()))
    } else {
        (None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    fn grid_of(rows: &[&[&str]]) -> Grid {
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
    fn matches_on_triple_price_header() {
        let g = grid_of(&[
            &["亨旺镀锌管"],
            &["规格", "壁厚", "检斤价", "理论价"],
        ]);
        let at = PipeBlockStrategy.match_grid(&g).unwrap();
        assert_eq!(at.header_row, 1);
    }

    #[test]
    fn extracts_bore_weight_and_both_prices() {
        let g = grid_of(&[
            &["亨旺镀锌管"],
            &["规格", "壁厚", "检斤价", "理论价"],
            &["1寸 9.2", "2.75", "4900", "4850"],
        ]);
        let at = PipeBlockStrategy.match_grid(&g).unwrap();
        let out = PipeBlockStrategy.extract(&g, at);
        assert_eq!(out.records.len(), 1);
        let r = &out.records[0];
        assert_eq!(r.spec, "1寸");
        assert_eq!(r.unit_weight, "9.2");
        assert_eq!(r.thickness, "2.75");
        assert_eq!(r.price, 4900.0);
        assert_eq!(r.secondary_price, 4850.0);
        assert_eq!(r.brand.as_deref(), Some("亨旺"));
        assert_eq!(r.name.as_deref(), Some("镀锌管"));
    }

    #[test]
    fn weight_heuristic_takes_last_numeric_token() {
        // Any trailing numeric token wins, even a coincidental one.
        let (bore, weight) = parse_spec("4分 7.5 8.1").unwrap();
        assert_eq!(bore, "4分");
        assert_eq!(weight, "8.1");
    }

    #[test]
    fn blank_spec_inherits_bore_and_weight() {
        let g = grid_of(&[
            &["亨旺镀锌管"],
            &["规格", "壁厚", "检斤价", "理论价"],
            &["6分 5.1", "2.5", "4950", "4900"],
            &["", "2.75", "4930", ""],
        ]);
        let at = PipeBlockStrategy.match_grid(&g).unwrap();
        let out = PipeBlockStrategy.extract(&g, at);
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.records[1].spec, "6分");
        assert_eq!(out.records[1].unit_weight, "5.1");
        assert_eq!(out.records[1].secondary_price, 0.0);
    }

    #[test]
    fn row_needs_wall_thickness_and_one_price() {
        let g = grid_of(&[
            &["亨旺镀锌管"],
            &["规格", "壁厚", "检斤价", "理论价"],
            &["1寸 9.2", "厚", "4900", "4850"],
            &["1.5寸 12", "3.25", "", ""],
        ]);
        let at = PipeBlockStrategy.match_grid(&g).unwrap();
        let out = PipeBlockStrategy.extract(&g, at);
        assert!(out.records.is_empty());
    }

    #[test]
    fn generic_welded_block_header_gets_fallback_brand() {
        let g = grid_of(&[
            &["优质焊管"],
            &["规格", "壁厚", "检斤价", "理论价"],
            &["4分 5.5", "2.5", "4700", ""],
        ]);
        let at = PipeBlockStrategy.match_grid(&g).unwrap();
        let out = PipeBlockStrategy.extract(&g, at);
        assert_eq!(out.records[0].brand.as_deref(), Some("亨旺"));
        assert_eq!(out.records[0].name.as_deref(), Some("焊管"));
    }

    #[test]
    fn other_pipe_phrase_becomes_its_own_brand() {
        let g = grid_of(&[
            &["华岐热镀管"],
            &["规格", "壁厚", "检斤价", "理论价"],
            &["1寸 9.2", "2.75", "4900", "4850"],
        ]);
        let at = PipeBlockStrategy.match_grid(&g).unwrap();
        let out = PipeBlockStrategy.extract(&g, at);
        assert_eq!(out.records[0].brand.as_deref(), Some("华岐热镀管"));
        assert_eq!(out.records[0].name.as_deref(), Some("镀锌管"));
    }
}
