use steelsheet_core::error::SteelsheetError;
use steelsheet_core::CanonicalRecord;

use super::FileResult;

/// Column order of the downstream template sheet, with the source file
/// prepended so merged exports stay traceable.
const HEADERS: [&str; 28] = [
    "来源文件",
    "类型",
    "品名",
    "型号",
    "规格1",
    "规格2",
    "规格3",
    "规格4",
    "规格5",
    "单位",
    "材质",
    "执行标准",
    "品牌/厂家",
    "提货地/省",
    "提货地/市",
    "提货地/区",
    "默认价格/元/吨",
    "二等价格/元/吨",
    "三等价格/元/吨",
    "四等价格/元/吨",
    "五等价格/元/吨",
    "过磅/理计",
    "备注",
    "库存",
    "供应商/联系方式",
    "供货价/元",
    "差价/元",
    "是否显示",
];

pub fn render(results: &[FileResult]) -> Result<Vec<u8>, SteelsheetError> {
    // UTF-8 BOM so the file opens with readable CJK in spreadsheet apps.
    let mut buf = Vec::new();
    buf.extend_from_slice(b"\xef\xbb\xbf");

    let mut writer = csv::Writer::from_writer(buf);
    writer
        .write_record(HEADERS)
        .map_err(|e| SteelsheetError::Csv(e.to_string()))?;

    for fr in results {
        for record in &fr.result.records {
            writer
                .write_record(fields(&fr.file, record))
                .map_err(|e| SteelsheetError::Csv(e.to_string()))?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| SteelsheetError::Csv(e.to_string()))
}

fn fields(file: &str, r: &CanonicalRecord) -> Vec<String> {
    vec![
        file.to_string(),
        r.product_type.clone(),
        r.name.clone(),
        r.model.clone(),
        r.spec1.clone(),
        r.spec2.clone(),
        r.spec3.clone(),
        r.spec4.clone(),
        r.spec5.clone(),
        r.unit.clone(),
        r.material.clone(),
        r.standard.clone(),
        r.brand.clone(),
        r.location_province.clone(),
        r.location_city.clone(),
        r.location_area.clone(),
        r.price_default.to_string(),
        r.price_tier2.clone(),
        r.price_tier3.clone(),
        r.price_tier4.clone(),
        r.price_tier5.clone(),
        r.price_basis.clone(),
        r.notes.clone(),
        r.inventory.clone(),
        r.contact.clone(),
        r.supply_price.to_string(),
        r.margin.clone(),
        r.visible.clone(),
    ]
}
