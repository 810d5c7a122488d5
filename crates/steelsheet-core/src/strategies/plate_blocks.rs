//! Supplier layout: one or more independent thickness-anchored column
//! groups for plate, each laid out as
//! (merged material, material, thickness, width, length, origin,
//! pickup location, price, unit weight). Banner rows naming a product
//! reset the running product-name context; contact rows are skipped.

use std::collections::HashMap;

use crate::grid::Grid;
use crate::normalize::format_thickness;
use crate::strategies::{header_labels, find_header_row, Extraction, LayoutMatch, LayoutStrategy, RawPriceRecord};

/// Banner phrases that name the product for the rows beneath them.
const NAME_MARKERS: [&str; 5] = ["开平板", "中厚板", "花纹板", "热轧卷板", "锰板"];

/// Column offsets within one group, relative to the thickness column.
const MERGED_MATERIAL: usize = 2; // to the left
const MATERIAL: usize = 1; // to the left
const WIDTH: usize = 1;
const LENGTH: usize = 2;
const ORIGIN: usize = 3;
const PICKUP: usize = 4;
const PRICE: usize = 5;
const UNIT_WEIGHT: usize = 6;

pub struct PlateBlockStrategy;

impl LayoutStrategy for PlateBlockStrategy {
    fn name(&self) -> &'static str {
        "plate-blocks"
    }

    fn match_grid(&self, grid: &Grid) -> Option<LayoutMatch> {
        find_header_row(grid, 20, |row| {
            row.contains("材质")
                && row.contains("厚度")
                && row.contains("宽度")
                && row.contains("长度")
                && row.contains("产地")
        })
    }

    fn extract(&self, grid: &Grid, at: LayoutMatch) -> Extraction {
        let headers = header_labels(grid, at.header_row);
        let anchors = thickness_anchors(grid, at.header_row);
        let mut records = Vec::new();
        let mut merged_cache: HashMap<usize, String> = HashMap::new();
        let mut current_name: Option<String> = None;

        for row in at.data_start_row..grid.height() {
            if grid.row_is_blank(row) {
                continue;
            }
            let row_text = grid.row_text(row);
            if row_text.contains("电话") || row_text.contains("联系") {
                continue;
            }
            if let Some(marker) = NAME_MARKERS.iter().find(|m| row_text.contains(*m)) {
                current_name = Some(marker.to_string());
                merged_cache.clear();
                continue;
            }

            for &anchor in &anchors {
                let merged = anchor
                    .checked_sub(MERGED_MATERIAL)
                    .map(|c| grid.cell(row, c).as_text())
                    .unwrap_or_default();
                if !merged.is_empty() {
                    merged_cache.insert(anchor, merged);
                }
                let specific = anchor
                    .checked_sub(MATERIAL)
                    .map(|c| grid.cell(row, c).as_text())
                    .unwrap_or_default();
                let material = merged_cache
                    .get(&anchor)
                    .cloned()
                    .filter(|m| !m.is_empty())
                    .unwrap_or(specific);

                let price = match grid.cell(row, anchor + PRICE).as_number() {
                    Some(p) if p != 0.0 => p,
                    _ => continue,
                };
                if material.is_empty() {
                    continue;
                }

                let width = grid.cell(row, anchor + WIDTH).as_text();
                let length = grid.cell(row, anchor + LENGTH).as_text();
                let spec = match (width.is_empty(), length.is_empty()) {
                    (false, false) => format!("{width}*{length}"),
                    (false, true) => width,
                    (true, false) => length,
                    (true, true) => String::new(),
                };

                let origin = grid.cell(row, anchor + ORIGIN).as_text();
                let pickup = grid.cell(row, anchor + PICKUP).as_text();

                records.push(RawPriceRecord {
                    spec,
                    thickness: format_thickness(&grid.cell(row, anchor).as_text()),
                    price,
                    unit_weight: grid.cell(row, anchor + UNIT_WEIGHT).as_text(),
                    material: Some(material),
                    name: current_name.clone(),
                    brand: (!origin.is_empty()).then_some(origin),
                    pickup_location: (!pickup.is_empty()).then_some(pickup),
                    product_type: Some("板材".to_string()),
                    ..Default::default()
                });
            }
        }

        Extraction { records, headers }
    }
}

/// Every header column labelled as a thickness anchors one group.
fn thickness_anchors(grid: &Grid, header_row: usize) -> Vec<usize> {
    (0..grid.width())
        .filter(|&col| grid.cell(header_row, col).as_text().contains("厚度"))
        .collect()
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

    const HEADER: &[&str] = &[
        "材质", "材质", "厚度", "宽度", "长度", "产地", "提货地", "价格", "重量",
    ];

    #[test]
    fn matches_on_full_plate_header() {
        let g = grid_of(&[HEADER]);
        assert!(PlateBlockStrategy.match_grid(&g).is_some());
        let g = grid_of(&[&["材质", "厚度", "价格"]]);
        assert!(PlateBlockStrategy.match_grid(&g).is_none());
    }

    #[test]
    fn extracts_one_record_per_group_row() {
        let g = grid_of(&[
            HEADER,
            &["普碳", "Q235B", "10", "1500", "6000", "鞍钢", "南库", "3850", "706"],
        ]);
        let at = PlateBlockStrategy.match_grid(&g).unwrap();
        let out = PlateBlockStrategy.extract(&g, at);
        assert_eq!(out.records.len(), 1);
        let r = &out.records[0];
        assert_eq!(r.spec, "1500*6000");
        assert_eq!(r.thickness, "10.0");
        assert_eq!(r.price, 3850.0);
        assert_eq!(r.material.as_deref(), Some("普碳"));
        assert_eq!(r.brand.as_deref(), Some("鞍钢"));
        assert_eq!(r.pickup_location.as_deref(), Some("南库"));
        assert_eq!(r.unit_weight, "706");
        assert_eq!(r.product_type.as_deref(), Some("板材"));
    }

    #[test]
    fn merged_material_inherits_until_banner_resets_it() {
        let g = grid_of(&[
            HEADER,
            &["普碳", "", "10", "1500", "6000", "鞍钢", "", "3850", ""],
            &["", "", "12", "1500", "6000", "鞍钢", "", "3830", ""],
            &["花纹板"],
            &["", "Q235B", "3", "1260", "6000", "本钢", "", "4050", ""],
        ]);
        let at = PlateBlockStrategy.match_grid(&g).unwrap();
        let out = PlateBlockStrategy.extract(&g, at);
        assert_eq!(out.records.len(), 3);
        assert_eq!(out.records[1].material.as_deref(), Some("普碳"));
        // Banner cleared the merged cache, so the next row falls back to
        // its own material cell and carries the banner name.
        assert_eq!(out.records[2].material.as_deref(), Some("Q235B"));
        assert_eq!(out.records[2].name.as_deref(), Some("花纹板"));
        assert!(out.records[0].name.is_none());
    }

    #[test]
    fn contact_rows_are_skipped() {
        let g = grid_of(&[
            HEADER,
            &["电话", "", "13800000000", "", "", "", "", "99999", ""],
        ]);
        let at = PlateBlockStrategy.match_grid(&g).unwrap();
        let out = PlateBlockStrategy.extract(&g, at);
        assert!(out.records.is_empty());
    }

    #[test]
    fn rows_without_material_or_price_are_skipped() {
        let g = grid_of(&[
            HEADER,
            &["", "", "10", "1500", "6000", "鞍钢", "", "3850", ""],
            &["普碳", "Q235B", "12", "1500", "6000", "鞍钢", "", "电议", ""],
        ]);
        let at = PlateBlockStrategy.match_grid(&g).unwrap();
        let out = PlateBlockStrategy.extract(&g, at);
        assert!(out.records.is_empty());
    }

    #[test]
    fn two_groups_side_by_side() {
        let mut header: Vec<&str> = HEADER.to_vec();
        header.extend_from_slice(HEADER);
        let mut row: Vec<&str> = vec![
            "普碳", "Q235B", "10", "1500", "6000", "鞍钢", "", "3850", "",
        ];
        row.extend_from_slice(&[
            "锰", "Q355B", "16", "1800", "8000", "营口", "", "4150", "",
        ]);
        let g = grid_of(&[header.as_slice(), row.as_slice()]);
        let at = PlateBlockStrategy.match_grid(&g).unwrap();
        let out = PlateBlockStrategy.extract(&g, at);
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.records[1].material.as_deref(), Some("锰"));
        assert_eq!(out.records[1].spec, "1800*8000");
    }
}
