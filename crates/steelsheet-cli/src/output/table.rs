use std::fmt::Write;

use steelsheet_core::CanonicalRecord;

use super::FileResult;

pub fn render(results: &[FileResult]) -> String {
    let mut out = String::new();

    for (i, fr) in results.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "=== {} ===", fr.file);
        let m = &fr.result.metadata;
        let _ = writeln!(
            out,
            "layout: {}   type: {}   brand: {}   records: {}",
            fr.result.strategy,
            blank_dash(&m.product_type),
            blank_dash(&m.brand),
            fr.result.records.len()
        );
        out.push('\n');

        if fr.result.records.is_empty() {
            out.push_str("(no records)\n");
            continue;
        }
        render_table(&mut out, &fr.result.records);
    }

    out
}

const COLUMNS: [&str; 8] = ["类型", "品名", "型号", "规格1", "规格2", "单位", "品牌", "价格"];

fn render_table(out: &mut String, records: &[CanonicalRecord]) {
    let rows: Vec<[String; 8]> = records
        .iter()
        .map(|r| {
            [
                r.product_type.clone(),
                r.name.clone(),
                r.model.clone(),
                r.spec1.clone(),
                r.spec2.clone(),
                r.unit.clone(),
                r.brand.clone(),
                r.price_default.to_string(),
            ]
        })
        .collect();

    // Width per column in chars; CJK double-width is not worth chasing
    // for a terminal preview, the CSV export is the real artifact.
    let mut widths: [usize; 8] = COLUMNS.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut line = String::new();
    for (w, h) in widths.iter().zip(COLUMNS.iter()) {
        let _ = write!(line, "{}  ", pad(h, *w));
    }
    out.push_str(line.trim_end());
    out.push('\n');

    for row in &rows {
        let mut line = String::new();
        for (w, cell) in widths.iter().zip(row.iter()) {
            let _ = write!(line, "{}  ", pad(cell, *w));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
}

fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    let mut padded = s.to_string();
    padded.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
    padded
}

fn blank_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use steelsheet_core::{DocumentMetadata, ProcessOutput};

    #[test]
    fn empty_result_renders_placeholder() {
        let results = vec![FileResult {
            file: "a.xlsx".into(),
            result: ProcessOutput {
                metadata: DocumentMetadata::default(),
                records: vec![],
                headers: vec![],
                strategy: "three-column",
            },
        }];
        let text = render(&results);
        assert!(text.contains("=== a.xlsx ==="));
        assert!(text.contains("(no records)"));
    }

    #[test]
    fn records_align_under_column_headers() {
        let record = CanonicalRecord {
            product_type: "方矩管".into(),
            name: "黑方管".into(),
            model: "40*40".into(),
            spec1: "3.0".into(),
            unit: "件".into(),
            price_default: 5200.0,
            ..Default::default()
        };
        let results = vec![FileResult {
            file: "a.xlsx".into(),
            result: ProcessOutput {
                metadata: DocumentMetadata::default(),
                records: vec![record],
                headers: vec![],
                strategy: "three-column",
            },
        }];
        let text = render(&results);
        assert!(text.contains("类型"));
        assert!(text.contains("5200"));
    }
}
