pub mod canonical;
pub mod error;
pub mod extraction;
pub mod grid;
pub mod metadata;
pub mod normalize;
pub mod sort;
pub mod strategies;

pub use canonical::CanonicalRecord;
pub use grid::{Cell, Grid};
pub use metadata::{DocumentMetadata, AUTO_DETECT};
pub use strategies::RawPriceRecord;

use serde::Serialize;

/// Everything one sheet yields: document metadata, the ordered canonical
/// records, the header labels of the matched region and which strategy won.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutput {
    pub metadata: DocumentMetadata,
    pub records: Vec<CanonicalRecord>,
    pub headers: Vec<String>,
    pub strategy: &'static str,
}

/// Main API entry point: normalize one decoded sheet into canonical
/// records.
///
/// Total over any grid: strategy dispatch always resolves (the terminal
/// strategy matches unconditionally) and an unrecognizable sheet simply
/// yields zero records. The filename only serves as an extra metadata
/// signal; `manufacturer` (unless the auto-detect sentinel) replaces the
/// detected brand on the metadata and on every record.
pub fn process_grid(grid: &Grid, filename: &str, manufacturer: Option<&str>) -> ProcessOutput {
    let metadata = metadata::extract_metadata(grid, filename, manufacturer);

    let outcome = strategies::extract_price_data(grid);
    let mut records = canonical::build_records(&outcome.records, &metadata);

    if let Some(m) = manufacturer {
        if !m.is_empty() && m != AUTO_DETECT {
            for record in &mut records {
                record.brand = m.to_string();
            }
        }
    }

    sort::sort_records(&mut records);

    ProcessOutput {
        metadata,
        records,
        headers: outcome.headers,
        strategy: outcome.strategy,
    }
}
