//! Token normalization for values coming out of loosely formatted sheets.

use regex::Regex;
use std::sync::LazyLock;

static RANGE_SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-－]").unwrap());
static STAR_SPACING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\*\s*").unwrap());
static SPEC_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<br>|[\n,，\s]+").unwrap());
static LENGTH_WITH_UNIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\d.]+)\s*(毫米|mm|米|m)").unwrap());

/// Format a thickness (or negative-tolerance) token so spreadsheet engines
/// cannot reinterpret it as a date: integral values always carry an explicit
/// decimal point (`3` -> `"3.0"`). Ranges like `2.5-3` are formatted
/// component-wise and rejoined with `-`. Non-numeric components pass through.
pub fn format_thickness(thickness: &str) -> String {
    if thickness.trim().is_empty() {
        return String::new();
    }
    let parts: Vec<String> = RANGE_SPLIT
        .split(thickness)
        .map(|part| {
            let part = part.trim();
            match part.parse::<f64>() {
                Ok(val) if val.fract() == 0.0 => format!("{}.0", val as i64),
                Ok(val) => format!("{val}"),
                Err(_) => part.to_string(),
            }
        })
        .collect();
    parts.join("-")
}

/// Normalize a length expression to millimeters.
///
/// `"1.2米"` -> `"1200"`, `"6000mm"` -> `"6000"`. A bare number below 20 is
/// read as meters (nobody sells 6 mm long tube), anything else is already
/// millimeters. Unparsable input passes through unchanged.
pub fn normalize_length(length: &str) -> String {
    let trimmed = length.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let lower = trimmed.to_lowercase();
    if let Some(caps) = LENGTH_WITH_UNIT.captures(&lower) {
        if let Ok(value) = caps[1].parse::<f64>() {
            let millimeters = match &caps[2] {
                "米" | "m" => value * 1000.0,
                _ => value,
            };
            return format!("{}", millimeters as i64);
        }
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value < 20.0 => format!("{}", (value * 1000.0) as i64),
        Ok(value) => format!("{}", value as i64),
        Err(_) => trimmed.to_string(),
    }
}

/// Split a spec cell that may encode several values at once, separated by
/// `<br>`, line breaks, commas (ASCII or full-width) or runs of spaces.
/// Spacing around `*` is collapsed first so `30 * 30` survives the space
/// split as one token. Result is de-duplicated, original order kept.
pub fn parse_spec_cell(content: &str) -> Vec<String> {
    if content.trim().is_empty() {
        return Vec::new();
    }
    let compact = STAR_SPACING.replace_all(content, "*");
    let mut specs = Vec::new();
    for part in SPEC_SEPARATORS.split(&compact) {
        let token = part.trim();
        if !token.is_empty() && !specs.iter().any(|s| s == token) {
            specs.push(token.to_string());
        }
    }
    specs
}

/// True when every character of the token is part of a plain number.
pub fn is_plain_numeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit() || c == '.')
}
