//! Layout strategies: each one encodes a supplier's physical sheet geometry
//! behind a common match/extract capability, dispatched first-match-wins
//! over a fixed priority order.

mod brand_triad;
mod dual_spec;
mod labeled;
mod pipe_blocks;
mod plate_blocks;
mod three_column;

pub use brand_triad::BrandTriadStrategy;
pub use dual_spec::DualSpecStrategy;
pub use labeled::LabeledColumnStrategy;
pub use pipe_blocks::PipeBlockStrategy;
pub use plate_blocks::PlateBlockStrategy;
pub use three_column::ThreeColumnStrategy;

use serde::{Deserialize, Serialize};

use crate::grid::Grid;

/// One generic price tuple pulled out of a sheet, before canonical mapping.
/// The optional fields are strategy-specific extras; a strategy that knows
/// better than the document-level scan attaches an override here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPriceRecord {
    pub spec: String,
    pub thickness: String,
    pub price: f64,
    pub count: String,
    /// Theoretical (derived-weight) price where the layout carries both.
    pub secondary_price: f64,
    pub unit_weight: String,
    pub brand: Option<String>,
    pub name: Option<String>,
    pub material: Option<String>,
    pub product_type: Option<String>,
    pub pickup_location: Option<String>,
}

/// Where a strategy found the header and the first data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutMatch {
    pub header_row: usize,
    pub data_start_row: usize,
}

/// Records plus the header labels of the matched region.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub records: Vec<RawPriceRecord>,
    pub headers: Vec<String>,
}

pub trait LayoutStrategy {
    fn name(&self) -> &'static str;

    /// Decide whether this layout applies and where its data region starts.
    fn match_grid(&self, grid: &Grid) -> Option<LayoutMatch>;

    /// Pull records out of the matched region. Malformed rows or cells are
    /// skipped; extraction never fails past this boundary.
    fn extract(&self, grid: &Grid, at: LayoutMatch) -> Extraction;
}

#[derive(Debug)]
pub struct StrategyOutcome {
    pub records: Vec<RawPriceRecord>,
    pub headers: Vec<String>,
    pub strategy: &'static str,
}

/// The fixed-priority registry. The generic three-column strategy sits last
/// because its final clause matches unconditionally; it is the terminal
/// entry that makes dispatch total.
fn registry() -> Vec<Box<dyn LayoutStrategy>> {
    vec![
        Box::new(BrandTriadStrategy),
        Box::new(DualSpecStrategy),
        Box::new(PipeBlockStrategy),
        Box::new(PlateBlockStrategy),
        Box::new(LabeledColumnStrategy),
        Box::new(ThreeColumnStrategy),
    ]
}

/// Try each strategy in priority order and extract with the first that
/// matches. Total over any grid: the terminal strategy always matches, so
/// the worst case is zero records, never a failure.
pub fn extract_price_data(grid: &Grid) -> StrategyOutcome {
    for strategy in registry() {
        if let Some(at) = strategy.match_grid(grid) {
            let Extraction { records, headers } = strategy.extract(grid, at);
            return StrategyOutcome {
                records,
                headers,
                strategy: strategy.name(),
            };
        }
    }
    // Unreachable: the terminal strategy matches unconditionally.
    StrategyOutcome {
        records: Vec::new(),
        headers: Vec::new(),
        strategy: "none",
    }
}

/// Non-empty cell texts of the header row, in column order.
pub(crate) fn header_labels(grid: &Grid, header_row: usize) -> Vec<String> {
    (0..grid.width())
        .map(|col| grid.cell(header_row, col).as_text())
        .filter(|label| !label.is_empty())
        .collect()
}

/// Search the first `limit` rows for one whose text satisfies `pred`.
pub(crate) fn find_header_row<F>(grid: &Grid, limit: usize, pred: F) -> Option<LayoutMatch>
where
    F: Fn(&str) -> bool,
{
    for row in 0..grid.height().min(limit) {
        if pred(&grid.row_text(row)) {
            return Some(LayoutMatch {
                header_row: row,
                data_start_row: row + 1,
            });
        }
    }
    None
}
