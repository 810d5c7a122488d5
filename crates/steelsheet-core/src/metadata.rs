//! Whole-grid signature scan for document-level facts.
//!
//! A price list states things like length, material or pricing basis once,
//! anywhere on the sheet, so this pass renders the grid to text and runs
//! ordered keyword/regex checks over it rather than addressing cells.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::grid::Grid;
use crate::normalize::normalize_length;

/// Sentinel for the manufacturer override meaning "keep the detected brand".
pub const AUTO_DETECT: &str = "自动识别";

/// Document-level facts detected once per grid. All fields default empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub product_type: String,
    pub product_name: String,
    pub length: String,
    pub price_basis: String,
    pub brand: String,
    pub contact: String,
    pub unit: String,
    pub material: String,
    pub standard: String,
    pub location_province: String,
    pub location_city: String,
    pub location_area: String,
    pub notes: Vec<String>,
}

const PRODUCT_TYPES: [&str; 8] = [
    "方矩管", "板材", "型材", "管材", "矿用品", "棒材", "彩涂卷", "不锈钢",
];

const PRODUCT_NAME_KEYWORDS: [&str; 8] = [
    "热镀锌", "冷轧", "热轧", "镀锌", "不锈钢", "彩涂", "黑退", "热镀",
];

const NOTE_KEYWORDS: [&str; 5] = ["说明", "备注", "注意", "提示", "要求"];

static LENGTH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"长度\s*([\d.]+)\s*(毫米|mm|米|m)").unwrap());

static BRAND_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"品牌[：:]\s*(\S+)",
        r"厂家[：:]\s*(\S+)",
        r"(\S+制管)",
        r"(\S+钢铁)",
        r"(\S+公司)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[电话：:]\s*(\d{3,4}-\d{7,8}|\d{11}|400-\d{3,4}-\d{3,4})").unwrap()
});

static MATERIAL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"材质[：:]\s*(\S+)",
        r"([Qq]\d+[A-Fa-f]?)",
        r"(不锈钢\d{3,4})",
        r"(SPCC|SPHC|SS400)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static STANDARD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(GB/T?\s*\d+|YB/T?\s*\d+|Q/BQB|ASTM|JIS|DIN)").unwrap());

/// Scan a grid (plus filename and optional manufacturer override) into
/// document metadata. Pure function; the grid is only read.
pub fn extract_metadata(grid: &Grid, filename: &str, manufacturer: Option<&str>) -> DocumentMetadata {
    let text = grid.to_text();
    // Some sheets space out CJK labels ("方 矩 管"); a whitespace-stripped
    // rendering makes those match the compact vocabulary.
    let text_compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    let mut meta = DocumentMetadata::default();

    for p_type in PRODUCT_TYPES {
        if text.contains(p_type) || text_compact.contains(p_type) {
            meta.product_type = p_type.to_string();
            break;
        }
    }
    if meta.product_type.is_empty() && (text.contains("热镀管") || text.contains("镀锌管")) {
        meta.product_type = "管材".to_string();
    }

    for keyword in PRODUCT_NAME_KEYWORDS {
        if filename.contains(keyword) {
            meta.product_name = keyword.to_string();
            break;
        }
    }
    if meta.product_name.is_empty() {
        for keyword in PRODUCT_NAME_KEYWORDS {
            if text.contains(keyword) {
                meta.product_name = keyword.to_string();
                break;
            }
        }
    }
    // Known supplier+product phrase forces the canonical name.
    if text.contains("正大热镀管") || filename.contains("正大热镀管") {
        meta.product_name = "镀锌管".to_string();
        if meta.product_type.is_empty() {
            meta.product_type = "管材".to_string();
        }
    }
    if meta.product_name.is_empty() && meta.product_type.contains("方矩管") {
        meta.product_name = "黑".to_string();
    }

    if let Some(caps) = LENGTH_PATTERN.captures(&text) {
        meta.length = normalize_length(&format!("{}{}", &caps[1], &caps[2]));
    }

    if text.contains("检斤价") || text.contains("过磅") {
        meta.price_basis = "过磅".to_string();
    } else if text.contains("理计") || text.contains("理论") {
        meta.price_basis = "理计".to_string();
    }

    if text.contains("正大") || filename.contains("正大") {
        meta.brand = "正大制管".to_string();
    } else {
        for pattern in BRAND_PATTERNS.iter() {
            if let Some(caps) = pattern.captures(&text) {
                let candidate = caps[1].to_string();
                // Long matches are almost always disclaimer sentences, not
                // brand names.
                if candidate.chars().count() < 10 {
                    meta.brand = candidate;
                    break;
                }
            }
        }
    }

    if let Some(caps) = PHONE_PATTERN.captures(&text) {
        meta.contact = caps[1].to_string();
    }

    for pattern in MATERIAL_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(&text) {
            meta.material = caps[1].to_string();
            break;
        }
    }

    if let Some(caps) = STANDARD_PATTERN.captures(&text) {
        meta.standard = caps[1].to_string();
    }

    for row in 0..grid.height().min(20) {
        let row_text = grid.row_text(row);
        if NOTE_KEYWORDS.iter().any(|kw| row_text.contains(kw)) {
            meta.notes.push(row_text.trim().to_string());
        }
    }

    // Always 件: price units on these sheets are per-ton amounts and would
    // be misread as the count unit if inferred from content.
    meta.unit = "件".to_string();

    match manufacturer {
        Some(m) if !m.is_empty() && m != AUTO_DETECT => meta.brand = m.to_string(),
        _ => {}
    }

    meta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, Grid};

    fn text_grid(rows: &[&[&str]]) -> Grid {
        Grid::new(
            rows.iter()
                .map(|r| r.iter().map(|s| Cell::Text(s.to_string())).collect())
                .collect(),
        )
    }

    #[test]
    fn detects_product_type_from_vocabulary() {
        let g = text_grid(&[&["方矩管价格表"]]);
        let m = extract_metadata(&g, "report.xlsx", None);
        assert_eq!(m.product_type, "方矩管");
        assert_eq!(m.product_name, "黑");
        assert_eq!(m.unit, "件");
    }

    #[test]
    fn spaced_out_type_still_matches() {
        let g = text_grid(&[&["方 矩 管 报价"]]);
        let m = extract_metadata(&g, "a.xlsx", None);
        assert_eq!(m.product_type, "方矩管");
    }

    #[test]
    fn galvanized_keywords_coerce_type_to_pipe() {
        let g = text_grid(&[&["镀锌管 报价单"]]);
        let m = extract_metadata(&g, "a.xlsx", None);
        assert_eq!(m.product_type, "管材");
    }

    #[test]
    fn supplier_phrase_forces_name_and_backfills_type() {
        let g = text_grid(&[&["正大热镀管价格"]]);
        let m = extract_metadata(&g, "a.xlsx", None);
        assert_eq!(m.product_name, "镀锌管");
        assert_eq!(m.product_type, "管材");
        assert_eq!(m.brand, "正大制管");
    }

    #[test]
    fn filename_name_keyword_beats_content() {
        let g = text_grid(&[&["冷轧 价格"]]);
        let m = extract_metadata(&g, "热镀锌报价.xlsx", None);
        assert_eq!(m.product_name, "热镀锌");
    }

    #[test]
    fn length_is_normalized_to_mm() {
        let g = text_grid(&[&["长度 6 米"]]);
        let m = extract_metadata(&g, "a.xlsx", None);
        assert_eq!(m.length, "6000");
    }

    #[test]
    fn price_basis_weighed_wins_over_theoretical() {
        let g = text_grid(&[&["检斤价", "理论重量"]]);
        let m = extract_metadata(&g, "a.xlsx", None);
        assert_eq!(m.price_basis, "过磅");
    }

    #[test]
    fn brand_suffix_match_detected() {
        let g = text_grid(&[&["鑫达钢铁"]]);
        let m = extract_metadata(&g, "a.xlsx", None);
        assert_eq!(m.brand, "鑫达钢铁");
    }

    #[test]
    fn brand_suffix_match_rejects_long_sentences() {
        let g = text_grid(&[&["本报价仅供参考最终解释权归某某某某某某钢铁"]]);
        let m = extract_metadata(&g, "a.xlsx", None);
        assert_eq!(m.brand, "");
    }

    #[test]
    fn manufacturer_override_replaces_brand() {
        let g = text_grid(&[&["正大热镀管"]]);
        let m = extract_metadata(&g, "a.xlsx", Some("亨旺"));
        assert_eq!(m.brand, "亨旺");
    }

    #[test]
    fn auto_detect_sentinel_keeps_detected_brand() {
        let g = text_grid(&[&["正大热镀管"]]);
        let m = extract_metadata(&g, "a.xlsx", Some(AUTO_DETECT));
        assert_eq!(m.brand, "正大制管");
    }

    #[test]
    fn contact_material_standard_detection() {
        let g = text_grid(&[&["材质: Q235B", "执行标准 GB/T 6728", "电话: 13812345678"]]);
        let m = extract_metadata(&g, "a.xlsx", None);
        assert_eq!(m.material, "Q235B");
        assert!(m.standard.starts_with("GB/T"));
        assert_eq!(m.contact, "13812345678");
    }

    #[test]
    fn note_rows_collected_in_order_once_per_row() {
        let g = text_grid(&[
            &["说明 备注 以实物为准"],
            &["数据"],
            &["注意 含税出库"],
        ]);
        let m = extract_metadata(&g, "a.xlsx", None);
        assert_eq!(
            m.notes,
            vec!["说明 备注 以实物为准", "注意 含税出库"]
        );
    }
}
