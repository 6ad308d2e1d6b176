//! Spreadsheet handling for the fixed SKU column layout
//!
//! - [`reader`]: uploaded workbook/CSV bytes → ordered row mappings
//! - [`template`]: blank sample sheet with the header row

pub mod reader;
pub mod template;

pub use reader::{read_rows, RawRow, SheetError, SheetFormat};
pub use template::{build_sample_template, SAMPLE_FILE_NAME, SAMPLE_SHEET_NAME};

/// Column headers of the SKU sheet, in template order
pub mod columns {
    pub const SKU_CODE: &str = "SKU Code";
    pub const CATEGORY: &str = "Category";
    pub const SUB_CATEGORY: &str = "Sub Category";
    pub const PRODUCT_TITLE: &str = "Product Title";
    pub const SAP_CODE: &str = "SAP Code";
    pub const HSN: &str = "HSN";
    pub const EAN: &str = "EAN";
    pub const MODEL_NUMBER: &str = "Model Number";
    pub const SIZE: &str = "Size";
    pub const COLOR: &str = "Color";
    pub const LENGTH: &str = "Prdct L(cm)";
    pub const BREADTH: &str = "Prdct B(cm)";
    pub const HEIGHT: &str = "Prdct H(cm)";
    pub const WEIGHT: &str = "Wght(kg)";
    pub const MASTER_CARTON_QTY: &str = "MSTRCTN Box Qty";
    pub const MASTER_CARTON_LENGTH: &str = "MSTRCTN L(cm)";
    pub const MASTER_CARTON_BREADTH: &str = "MSTRCTN B(cm)";
    pub const MASTER_CARTON_HEIGHT: &str = "MSTRCTN H(cm)";
    pub const MASTER_CARTON_WEIGHT: &str = "MSTRCTN Wght(kg)";
    pub const MRP: &str = "MRP";
    pub const GST: &str = "GST(%)";

    /// Header row with column widths (characters)
    pub const LAYOUT: [(&str, f64); 21] = [
        (SKU_CODE, 15.0),
        (CATEGORY, 20.0),
        (SUB_CATEGORY, 15.0),
        (PRODUCT_TITLE, 30.0),
        (SAP_CODE, 15.0),
        (HSN, 15.0),
        (EAN, 15.0),
        (MODEL_NUMBER, 15.0),
        (SIZE, 15.0),
        (COLOR, 15.0),
        (LENGTH, 15.0),
        (BREADTH, 15.0),
        (HEIGHT, 15.0),
        (WEIGHT, 15.0),
        (MASTER_CARTON_QTY, 15.0),
        (MASTER_CARTON_LENGTH, 15.0),
        (MASTER_CARTON_BREADTH, 15.0),
        (MASTER_CARTON_HEIGHT, 15.0),
        (MASTER_CARTON_WEIGHT, 15.0),
        (MRP, 15.0),
        (GST, 15.0),
    ];
}
