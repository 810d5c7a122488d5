use serde_json::json;

use steelsheet_core::error::SteelsheetError;

use super::FileResult;

pub fn render(results: &[FileResult]) -> Result<Vec<u8>, SteelsheetError> {
    let docs: Vec<serde_json::Value> = results
        .iter()
        .map(|fr| {
            json!({
                "file": fr.file,
                "strategy": fr.result.strategy,
                "headers": fr.result.headers,
                "metadata": fr.result.metadata,
                "records": fr.result.records,
            })
        })
        .collect();

    let mut out = serde_json::to_vec_pretty(&docs)?;
    out.push(b'\n');
    Ok(out)
}
