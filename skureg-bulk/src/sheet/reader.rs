//! Read uploaded SKU sheets into row mappings
//!
//! The first worksheet is used; its first row is the header. Every following
//! non-blank row becomes a mapping from header to cell value with empty cells
//! left out. Parsing works on the in-memory upload buffer.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use serde_json::{Map, Value};
use thiserror::Error;

/// One spreadsheet row keyed by column header, in column order
pub type RawRow = Map<String, Value>;

/// Largest integer an f64 holds exactly
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook has no sheets")]
    NoSheets,
}

/// Upload container format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    /// xlsx/xlsm/xlsb/xls/ods, detected from content
    Workbook,
    Csv,
}

impl SheetFormat {
    /// Pick the format from the uploaded file name
    pub fn from_file_name(file_name: Option<&str>) -> Self {
        match file_name {
            Some(name) if name.to_ascii_lowercase().ends_with(".csv") => SheetFormat::Csv,
            _ => SheetFormat::Workbook,
        }
    }
}

/// Parse an uploaded sheet into ordered row mappings
pub fn read_rows(bytes: Vec<u8>, format: SheetFormat) -> Result<Vec<RawRow>, SheetError> {
    match format {
        SheetFormat::Workbook => read_workbook(bytes),
        SheetFormat::Csv => read_csv(&bytes),
    }
}

fn read_workbook(bytes: Vec<u8>) -> Result<Vec<RawRow>, SheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(SheetError::NoSheets)?;

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows = range.rows();

    let headers: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(header_text).collect(),
        None => return Ok(Vec::new()),
    };

    let mut out = Vec::new();
    for row in rows {
        let mut mapped = RawRow::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            if header.is_empty() {
                continue;
            }
            if let Some(value) = cell_value(cell) {
                mapped.insert(header.clone(), value);
            }
        }
        if !mapped.is_empty() {
            out.push(mapped);
        }
    }

    Ok(out)
}

fn read_csv(bytes: &[u8]) -> Result<Vec<RawRow>, SheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut out = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut mapped = RawRow::new();
        for (header, field) in headers.iter().zip(record.iter()) {
            if header.is_empty() || field.is_empty() {
                continue;
            }
            mapped.insert(header.clone(), Value::String(field.to_string()));
        }
        if !mapped.is_empty() {
            out.push(mapped);
        }
    }

    Ok(out)
}

fn header_text(cell: &Data) -> String {
    match cell_value(cell) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Convert one cell to JSON; `None` for empty and error cells
fn cell_value(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            Some(Value::String(s.clone()))
        }
        Data::Int(i) => Some(Value::from(*i)),
        Data::Float(f) => float_value(*f),
        Data::Bool(b) => Some(Value::Bool(*b)),
        Data::DateTime(dt) => float_value(dt.as_f64()),
    }
}

/// Integral floats become integers so `12345.0` reads as `12345`
fn float_value(f: f64) -> Option<Value> {
    if f.fract() == 0.0 && f.abs() < MAX_EXACT_INT {
        Some(Value::from(f as i64))
    } else {
        serde_json::Number::from_f64(f).map(Value::Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(SheetFormat::from_file_name(Some("skus.CSV")), SheetFormat::Csv);
        assert_eq!(SheetFormat::from_file_name(Some("skus.xlsx")), SheetFormat::Workbook);
        assert_eq!(SheetFormat::from_file_name(None), SheetFormat::Workbook);
    }

    #[test]
    fn test_csv_rows_skip_empty_cells_and_blank_rows() {
        let csv = "\u{feff}SKU Code,MRP,Prdct L(cm)\n  SKU1 ,\"₹1,250.50\",\n,,\nSKU2,99,12\n";
        let rows = read_rows(csv.as_bytes().to_vec(), SheetFormat::Csv).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["SKU Code"], "  SKU1 ");
        assert_eq!(rows[0]["MRP"], "₹1,250.50");
        assert!(rows[0].get("Prdct L(cm)").is_none());
        assert_eq!(rows[1]["Prdct L(cm)"], "12");
    }

    #[test]
    fn test_xlsx_first_sheet_header_and_values() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "SKU Code").unwrap();
        sheet.write_string(0, 1, "MRP").unwrap();
        sheet.write_string(0, 2, "GST(%)").unwrap();
        sheet.write_number(1, 0, 12345.0).unwrap();
        sheet.write_number(1, 1, 499.5).unwrap();
        sheet.write_string(1, 2, "18%").unwrap();
        // Row 2 left blank, row 3 has data
        sheet.write_string(3, 0, "ABC-1").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let rows = read_rows(bytes, SheetFormat::Workbook).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["SKU Code"], 12345);
        assert_eq!(rows[0]["MRP"], 499.5);
        assert_eq!(rows[0]["GST(%)"], "18%");
        assert_eq!(rows[1]["SKU Code"], "ABC-1");
        assert!(rows[1].get("MRP").is_none());

        let keys: Vec<&String> = rows[0].keys().collect();
        assert_eq!(keys, ["SKU Code", "MRP", "GST(%)"]);
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        let result = read_rows(b"definitely not a workbook".to_vec(), SheetFormat::Workbook);
        assert!(matches!(result, Err(SheetError::Workbook(_))));
    }
}
