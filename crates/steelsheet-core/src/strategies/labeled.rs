//! Inventory-export layout: single columns located by header label text
//! (inventory name, spec/model, sale price) rather than fixed offsets.
//! The spec string is a grab bag: embedded brand tokens, a loose-goods
//! marker and pickup-location fragments all have to be peeled off before
//! it can serve as a model.

use crate::grid::Grid;
use crate::normalize::{format_thickness, is_plain_numeric};
use crate::strategies::{header_labels, Extraction, LayoutMatch, LayoutStrategy, RawPriceRecord};

/// Brand tokens that suppliers embed into the spec column, with the
/// canonical brand each one stands for.
const KNOWN_BRANDS: [(&str, &str); 3] =
    [("正大", "正大制管"), ("亨旺", "亨旺"), ("屹恒", "屹恒")];

/// Loose/bulk goods marker stripped from specs.
const BULK_MARKER: &str = "散";

/// Inventory-name keyword to product-type table, checked in order.
const TYPE_TABLE: [(&[&str], &str); 5] = [
    (&["槽钢", "角钢", "工字钢", "H型钢", "型钢"], "型材"),
    (&["板", "卷"], "板材"),
    (&["方矩管", "方管", "矩管"], "方矩管"),
    (&["管"], "管材"),
    (&["圆钢", "螺纹钢"], "棒材"),
];

pub struct LabeledColumnStrategy;

struct Columns {
    name: usize,
    spec: usize,
    price: usize,
}

impl LayoutStrategy for LabeledColumnStrategy {
    fn name(&self) -> &'static str {
        "labeled-column"
    }

    fn match_grid(&self, grid: &Grid) -> Option<LayoutMatch> {
        for row in 0..grid.height().min(20) {
            if locate_columns(grid, row).is_some() {
                return Some(LayoutMatch {
                    header_row: row,
                    data_start_row: row + 1,
                });
            }
        }
        None
    }

    fn extract(&self, grid: &Grid, at: LayoutMatch) -> Extraction {
        let headers = header_labels(grid, at.header_row);
        let Some(cols) = locate_columns(grid, at.header_row) else {
            return Extraction {
                records: Vec::new(),
                headers,
            };
        };

        let mut records = Vec::new();
        let mut last_name = String::new();

        for row in at.data_start_row..grid.height() {
            if grid.row_is_blank(row) {
                continue;
            }
            let name_cell = grid.cell(row, cols.name).as_text();
            if !name_cell.is_empty() {
                last_name = name_cell;
            }
            if last_name.is_empty() {
                continue;
            }

            let price = match grid.cell(row, cols.price).as_number() {
                Some(p) if p != 0.0 => p,
                _ => continue,
            };

            let raw_spec = grid.cell(row, cols.spec).as_text();
            let (spec, brand, pickup) = clean_spec(&raw_spec);

            let thickness = spec
                .rsplit_once('*')
                .map(|(_, tail)| tail.trim())
                .filter(|tail| is_plain_numeric(tail))
                .map(format_thickness)
                .unwrap_or_default();

            records.push(RawPriceRecord {
                spec,
                thickness,
                price,
                brand,
                name: Some(last_name.clone()),
                product_type: classify_type(&last_name),
                pickup_location: pickup,
                ..Default::default()
            });
        }

        Extraction { records, headers }
    }
}

fn locate_columns(grid: &Grid, row: usize) -> Option<Columns> {
    let mut name = None;
    let mut spec = None;
    let mut price = None;
    for col in 0..grid.width() {
        let label = grid.cell(row, col).as_text();
        if label.contains("存货名称") && name.is_none() {
            name = Some(col);
        } else if label.contains("规格") && spec.is_none() {
            spec = Some(col);
        } else if label.contains("销售价") && price.is_none() {
            price = Some(col);
        }
    }
    Some(Columns {
        name: name?,
        spec: spec?,
        price: price?,
    })
}

/// Peel brand token, bulk marker and location fragments off a raw spec
/// string. Returns (cleaned spec, brand override, pickup location).
fn clean_spec(raw: &str) -> (String, Option<String>, Option<String>) {
    let mut spec = raw.to_string();
    let mut brand = None;
    for (token, canonical) in KNOWN_BRANDS {
        if spec.contains(token) {
            brand = Some(canonical.to_string());
            spec = spec.replace(token, "");
            break;
        }
    }
    spec = spec.replace(BULK_MARKER, "");

    let mut pickup = None;
    for island in cjk_islands(&spec) {
        // A manganese grade fragment is part of the spec, not a location.
        if island.contains('锰') {
            continue;
        }
        spec = spec.replacen(&island, "", 1);
        if pickup.is_none() {
            pickup = Some(island);
        }
    }

    (spec.trim().to_string(), brand, pickup)
}

/// Maximal runs of CJK ideographs within a string.
fn cjk_islands(s: &str) -> Vec<String> {
    let mut islands = Vec::new();
    let mut current = String::new();
    for c in s.chars() {
        if ('\u{4e00}'..='\u{9fff}').contains(&c) {
            current.push(c);
        } else if !current.is_empty() {
            islands.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        islands.push(current);
    }
    islands
}

fn classify_type(inventory_name: &str) -> Option<String> {
    for (keywords, p_type) in TYPE_TABLE {
        if keywords.iter().any(|kw| inventory_name.contains(kw)) {
            return Some(p_type.to_string());
        }
    }
    None
}
