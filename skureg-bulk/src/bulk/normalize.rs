//! Row normalization: raw sheet row → typed SKU record
//!
//! Text cells are trimmed and empty text becomes absent. Numeric cells keep
//! only digits and decimal points before parsing; anything unparseable is
//! absent, never zero. Rows without a SKU code are rejected.

use serde::Serialize;
use serde_json::Value;

use crate::sheet::columns;
use crate::sheet::RawRow;

/// Physical measurements and packaging attributes of one SKU
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionFields {
    pub length: Option<f64>,
    pub breadth: Option<f64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub master_carton_qty: Option<f64>,
    pub master_carton_length: Option<f64>,
    pub master_carton_breadth: Option<f64>,
    pub master_carton_height: Option<f64>,
    pub master_carton_weight: Option<f64>,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl DimensionFields {
    /// True when no field carries a value
    pub fn is_empty(&self) -> bool {
        let numbers = [
            self.length,
            self.breadth,
            self.height,
            self.weight,
            self.master_carton_qty,
            self.master_carton_length,
            self.master_carton_breadth,
            self.master_carton_height,
            self.master_carton_weight,
        ];
        numbers.iter().all(Option::is_none) && self.size.is_none() && self.color.is_none()
    }
}

/// A cleaned SKU row ready for persistence
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuRecord {
    pub sku_code: String,
    pub name: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub sap_code: Option<String>,
    pub hsn: Option<String>,
    pub ean: Option<String>,
    pub model_number: Option<String>,
    pub mrp: Option<f64>,
    pub gst: Option<f64>,
    pub dimensions: DimensionFields,
}

/// Normalize one raw row; `None` when the SKU code is absent
pub fn normalize_row(row: &RawRow) -> Option<SkuRecord> {
    let text = |header: &str| row.get(header).and_then(clean_text);
    let number = |header: &str| row.get(header).and_then(clean_number);

    let sku_code = text(columns::SKU_CODE)?;

    Some(SkuRecord {
        sku_code,
        name: text(columns::PRODUCT_TITLE),
        category: text(columns::CATEGORY),
        sub_category: text(columns::SUB_CATEGORY),
        sap_code: text(columns::SAP_CODE),
        hsn: text(columns::HSN),
        ean: text(columns::EAN),
        model_number: text(columns::MODEL_NUMBER),
        mrp: number(columns::MRP),
        gst: number(columns::GST),
        dimensions: DimensionFields {
            length: number(columns::LENGTH),
            breadth: number(columns::BREADTH),
            height: number(columns::HEIGHT),
            weight: number(columns::WEIGHT),
            master_carton_qty: number(columns::MASTER_CARTON_QTY),
            master_carton_length: number(columns::MASTER_CARTON_LENGTH),
            master_carton_breadth: number(columns::MASTER_CARTON_BREADTH),
            master_carton_height: number(columns::MASTER_CARTON_HEIGHT),
            master_carton_weight: number(columns::MASTER_CARTON_WEIGHT),
            size: text(columns::SIZE),
            color: text(columns::COLOR),
        },
    })
}

/// Normalize a batch, keeping input order
///
/// Returns the records and the number of rows dropped for a missing SKU code.
pub fn normalize_rows(rows: &[RawRow]) -> (Vec<SkuRecord>, usize) {
    let records: Vec<SkuRecord> = rows.iter().filter_map(normalize_row).collect();
    let dropped = rows.len() - records.len();
    (records, dropped)
}

/// Trimmed text of a cell; numbers and booleans render as text first
pub fn clean_text(value: &Value) -> Option<String> {
    let rendered = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    (!rendered.is_empty()).then_some(rendered)
}

/// Numeric value of a cell
///
/// Numbers are rendered to text first. Text keeps only ASCII digits and `.`
/// before parsing, so `"₹1,250.50"` reads as `1250.5` and a sign is dropped
/// whichever cell type carried it. Empty or unparseable input is `None`.
pub fn clean_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => parse_cleaned(&n.to_string()),
        Value::String(s) => parse_cleaned(s),
        _ => None,
    }
}

fn parse_cleaned(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse::<f64>().ok().filter(|f| f.is_finite())
}
