//! Canonical record schema and the raw-record classifier.
//!
//! Each product type fixes which physical quantity lands in spec1..spec4
//! and which unit the record carries; everything else is carried over from
//! document metadata unless the extracting strategy attached an override.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::grid::render_number;
use crate::metadata::DocumentMetadata;
use crate::strategies::RawPriceRecord;

/// The output schema every strategy converges to. Serde renames match the
/// column headers of the downstream template sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    #[serde(rename = "类型")]
    pub product_type: String,
    #[serde(rename = "品名")]
    pub name: String,
    #[serde(rename = "型号")]
    pub model: String,
    #[serde(rename = "规格1")]
    pub spec1: String,
    #[serde(rename = "规格2")]
    pub spec2: String,
    #[serde(rename = "规格3")]
    pub spec3: String,
    #[serde(rename = "规格4")]
    pub spec4: String,
    #[serde(rename = "规格5")]
    pub spec5: String,
    #[serde(rename = "单位")]
    pub unit: String,
    #[serde(rename = "材质")]
    pub material: String,
    #[serde(rename = "执行标准")]
    pub standard: String,
    #[serde(rename = "品牌/厂家")]
    pub brand: String,
    #[serde(rename = "提货地/省")]
    pub location_province: String,
    #[serde(rename = "提货地/市")]
    pub location_city: String,
    #[serde(rename = "提货地/区")]
    pub location_area: String,
    #[serde(rename = "默认价格/元/吨")]
    pub price_default: f64,
    #[serde(rename = "二等价格/元/吨")]
    pub price_tier2: String,
    #[serde(rename = "三等价格/元/吨")]
    pub price_tier3: String,
    #[serde(rename = "四等价格/元/吨")]
    pub price_tier4: String,
    #[serde(rename = "五等价格/元/吨")]
    pub price_tier5: String,
    #[serde(rename = "过磅/理计")]
    pub price_basis: String,
    #[serde(rename = "备注")]
    pub notes: String,
    #[serde(rename = "库存")]
    pub inventory: String,
    #[serde(rename = "供应商/联系方式")]
    pub contact: String,
    #[serde(rename = "供货价/元")]
    pub supply_price: f64,
    #[serde(rename = "差价/元")]
    pub margin: String,
    #[serde(rename = "是否显示")]
    pub visible: String,
}

static LEADING_DIMENSIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*\*\s*(\d+)").unwrap());
static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Map raw price tuples into the canonical schema.
pub fn build_records(raw: &[RawPriceRecord], meta: &DocumentMetadata) -> Vec<CanonicalRecord> {
    raw.iter().map(|r| build_one(r, meta)).collect()
}

fn build_one(raw: &RawPriceRecord, meta: &DocumentMetadata) -> CanonicalRecord {
    let p_type = raw
        .product_type
        .clone()
        .unwrap_or_else(|| meta.product_type.clone());

    let full_name = compose_name(raw, meta);
    let model = reduce_model(&raw.spec, &p_type, &full_name);

    let dims: Vec<String> = DIGIT_RUN
        .find_iter(&raw.spec)
        .map(|m| m.as_str().to_string())
        .collect();

    let mut spec1 = String::new();
    let mut spec2 = String::new();
    let mut spec3 = String::new();
    let mut spec4 = String::new();
    let unit;

    match p_type.as_str() {
        "方矩管" => {
            spec1 = raw.thickness.clone();
            spec2 = meta.length.clone();
            unit = "件";
        }
        "板材" => {
            spec1 = raw.thickness.clone();
            if dims.len() >= 2 {
                let d1: i64 = dims[0].parse().unwrap_or(0);
                let d2: i64 = dims[1].parse().unwrap_or(0);
                spec2 = d1.min(d2).to_string();
                spec3 = d1.max(d2).to_string();
            } else if dims.len() == 1 {
                spec2 = dims[0].clone();
                spec3 = meta.length.clone();
            } else {
                spec3 = meta.length.clone();
            }
            unit = "块";
        }
        "型材" => {
            spec2 = meta.length.clone();
            unit = "件";
        }
        "管材" => {
            spec1 = raw.thickness.clone();
            spec2 = meta.length.clone();
            spec4 = raw.count.clone();
            unit = "件";
        }
        "矿用品" => {
            spec2 = meta.length.clone();
            unit = "件";
        }
        "棒材" => {
            spec1 = meta.length.clone();
            unit = "件";
        }
        "彩涂卷" => {
            spec1 = raw.thickness.clone();
            if !dims.is_empty() {
                spec2 = dims[0].clone();
            }
            spec3 = meta.length.clone();
            unit = "块";
        }
        _ => {
            spec1 = raw.thickness.clone();
            spec2 = raw.spec.clone();
            unit = "件";
        }
    }

    let notes = if meta.notes.is_empty() {
        format!("规格: {model}")
    } else {
        meta.notes.join("; ")
    };

    CanonicalRecord {
        product_type: p_type,
        name: full_name,
        model,
        spec1,
        spec2,
        spec3,
        spec4,
        spec5: String::new(),
        unit: unit.to_string(),
        material: raw
            .material
            .clone()
            .unwrap_or_else(|| meta.material.clone()),
        standard: meta.standard.clone(),
        brand: raw.brand.clone().unwrap_or_else(|| meta.brand.clone()),
        location_province: meta.location_province.clone(),
        location_city: meta.location_city.clone(),
        location_area: raw
            .pickup_location
            .clone()
            .unwrap_or_else(|| meta.location_area.clone()),
        price_default: raw.price,
        price_tier2: if raw.secondary_price != 0.0 {
            render_number(raw.secondary_price)
        } else {
            String::new()
        },
        price_tier3: String::new(),
        price_tier4: String::new(),
        price_tier5: String::new(),
        price_basis: meta.price_basis.clone(),
        notes,
        inventory: String::new(),
        contact: meta.contact.clone(),
        supply_price: raw.price,
        margin: String::new(),
        visible: String::new(),
    }
}

/// Base name plus shape suffix, with the black-marker and galvanized-pipe
/// special cases. A name attached by the strategy is taken verbatim; the
/// suffix machinery only fills in for document-level base names.
fn compose_name(raw: &RawPriceRecord, meta: &DocumentMetadata) -> String {
    if let Some(name) = &raw.name {
        return name.clone();
    }
    let base = meta.product_name.clone();

    let shape_suffix = match LEADING_DIMENSIONS.captures(&raw.spec) {
        Some(caps) => {
            let d1: i64 = caps[1].parse().unwrap_or(0);
            let d2: i64 = caps[2].parse().unwrap_or(0);
            if d1 == d2 {
                "方管"
            } else {
                "矩管"
            }
        }
        None if raw.spec.contains('方') => "方管",
        None if raw.spec.contains('矩') => "矩管",
        None => "",
    };

    let mut full = base.clone();
    if !shape_suffix.is_empty() {
        if base == "黑" {
            full = format!("黑{shape_suffix}");
        } else if !base.contains(shape_suffix) {
            if base.contains("方矩管") {
                full = base.replace("方矩管", shape_suffix);
            } else {
                full = format!("{base}{shape_suffix}");
            }
        }
    }

    // Galvanized-pipe documents force the canonical name.
    if (meta.product_name.contains("热镀") || meta.product_name.contains("镀锌"))
        && meta.product_type == "管材"
    {
        full = "镀锌管".to_string();
    }

    full
}

/// Round-pipe models keep only the bore part ahead of the first `*`.
fn reduce_model(spec: &str, p_type: &str, full_name: &str) -> String {
    let is_round_pipe = p_type == "管材"
        || (full_name.contains('管')
            && p_type != "方矩管"
            && !full_name.contains('方')
            && !full_name.contains('矩'));
    if is_round_pipe {
        if let Some((bore, _)) = spec.split_once('*') {
            return bore.trim().to_string();
        }
    }
    spec.to_string()
}
