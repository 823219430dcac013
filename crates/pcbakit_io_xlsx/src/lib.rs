//! `pcbakit_io_xlsx` v1:
//! Workbook kernel for the PCBA report pipeline.
//!
//! - `conf`   : constants and default presets
//! - `spec`   : formats, values, ranges, tables, policies
//! - `util`   : pure helper functions
//! - `model`  : in-memory workbook mutated between load and save
//! - `writer` : rust_xlsxwriter serializer
//! - `reader` : calamine-backed reopen
//! - `styles` : cell formats and column widths recovered on reopen
//! - `error`  : kernel error type
pub mod conf;
pub mod error;
pub mod model;
pub mod reader;
pub mod spec;
mod styles;
pub mod util;
pub mod writer;

pub use conf::{
    C_TABLE_STYLE_DEFAULT, EnumFmtKey, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX,
    N_NROWS_EXCEL_MAX, derive_default_xlsx_formats, derive_thin_border_format,
};
pub use error::{Result, XlsxKitError};
pub use model::{ModelCell, ModelSheet, ModelWorkbook};
pub use reader::open_workbook_model;
pub use spec::{
    EnumCellValue, SpecAutofitCellsPolicy, SpecCellFormat, SpecCellRange, SpecTable,
    SpecXlsxReport,
};
pub use util::{
    calculate_autofit_width, derive_column_letter, derive_display_len, derive_range_reference,
    derive_table_name, sanitize_sheet_name,
};
pub use writer::{XlsxWriter, save_workbook};
