//! Sample SKU sheet generation

use rust_xlsxwriter::{Workbook, XlsxError};

use super::columns::LAYOUT;

/// Worksheet name of the sample sheet
pub const SAMPLE_SHEET_NAME: &str = "SampleSKU";

/// Download file name of the sample sheet
pub const SAMPLE_FILE_NAME: &str = "Sample_SKU_Sheet.xlsx";

/// Build the blank sample workbook in memory
///
/// One header row in canonical column order with fixed widths; no data rows.
pub fn build_sample_template() -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SAMPLE_SHEET_NAME)?;

    for (col, (header, width)) in LAYOUT.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string(0, col, *header)?;
        worksheet.set_column_width(col, *width)?;
    }

    workbook.save_to_buffer()
}
