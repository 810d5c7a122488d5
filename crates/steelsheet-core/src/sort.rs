//! Deterministic ordering of canonical records.
//!
//! Keys are first-seen ranks (order of first appearance, not alphabetical)
//! for product name and model, then the numeric value of spec1. The sort is
//! stable, so fully tied records keep their original relative order.

use std::collections::HashMap;

use crate::canonical::CanonicalRecord;

pub fn sort_records(records: &mut Vec<CanonicalRecord>) {
    let mut name_ranks: HashMap<String, usize> = HashMap::new();
    let mut model_ranks: HashMap<String, usize> = HashMap::new();

    let keys: Vec<(usize, usize, f64)> = records
        .iter()
        .map(|r| {
            (
                first_seen_rank(&mut name_ranks, r.name.trim()),
                first_seen_rank(&mut model_ranks, r.model.trim()),
                spec1_value(&r.spec1),
            )
        })
        .collect();

    let mut tagged: Vec<((usize, usize, f64), CanonicalRecord)> =
        keys.into_iter().zip(std::mem::take(records)).collect();
    tagged.sort_by(|(a, _), (b, _)| {
        a.0.cmp(&b.0)
            .then(a.1.cmp(&b.1))
            .then(a.2.total_cmp(&b.2))
    });
    *records = tagged.into_iter().map(|(_, r)| r).collect();
}

fn first_seen_rank(ranks: &mut HashMap<String, usize>, key: &str) -> usize {
    let next = ranks.len();
    *ranks.entry(key.to_string()).or_insert(next)
}

/// Numeric sort value of spec1: the first `-`/`－`-separated segment as a
/// float, or 0 when unparsable.
fn spec1_value(spec1: &str) -> f64 {
    spec1
        .split(['-', '－'])
        .next()
        .and_then(|part| part.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}
