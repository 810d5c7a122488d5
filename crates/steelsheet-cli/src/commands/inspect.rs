use std::path::Path;

use steelsheet_core::error::SteelsheetError;
use steelsheet_core::extraction;

pub fn run(input_file: &Path) -> Result<(), SteelsheetError> {
    let bytes = std::fs::read(input_file)?;
    let sheets = extraction::read_workbook(&bytes)?;

    let file = input_file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    for (i, named) in sheets.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("=== sheet: {} ===", named.sheet);

        let result = steelsheet_core::process_grid(&named.grid, file, None);
        let m = &result.metadata;

        println!("  layout:       {}", result.strategy);
        println!("  headers:      {}", result.headers.join(" | "));
        println!("  records:      {}", result.records.len());
        println!("  product type: {}", m.product_type);
        println!("  product name: {}", m.product_name);
        println!("  brand:        {}", m.brand);
        println!("  length:       {}", m.length);
        println!("  price basis:  {}", m.price_basis);
        println!("  material:     {}", m.material);
        println!("  standard:     {}", m.standard);
        println!("  contact:      {}", m.contact);
        if !m.notes.is_empty() {
            println!("  notes:        {}", m.notes.join("; "));
        }
    }

    Ok(())
}
