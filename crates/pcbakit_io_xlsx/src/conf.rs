//! XLSX constants and default preset factories.

use std::collections::BTreeMap;

use crate::spec::SpecCellFormat;

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Excel table name maximum length.
pub const N_LEN_EXCEL_TABLE_NAME_MAX: usize = 255;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Built-in table style used for table bindings.
pub const C_TABLE_STYLE_DEFAULT: &str = "TableStyleMedium2";
/// Thin border style code (see `derive_format_border` in the writer).
pub const N_BORDER_THIN: i64 = 1;

/// Canonical format preset keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EnumFmtKey {
    /// Body text cell, left unstyled.
    Text,
    /// Integer number format.
    Integer,
    /// Header cell of a freshly written record table.
    Header,
}

/// Build default named format presets used when writing record tables.
///
/// The header preset mimics a plain DataFrame export: bold, centered, thin border.
pub fn derive_default_xlsx_formats() -> BTreeMap<EnumFmtKey, SpecCellFormat> {
    let cfg_base_fmt_spec = SpecCellFormat::default();

    let mut dict_fmt = BTreeMap::new();
    dict_fmt.insert(EnumFmtKey::Text, cfg_base_fmt_spec.clone());
    dict_fmt.insert(
        EnumFmtKey::Integer,
        cfg_base_fmt_spec.with_(SpecCellFormat {
            num_format: Some("0".to_string()),
            ..Default::default()
        }),
    );
    dict_fmt.insert(
        EnumFmtKey::Header,
        cfg_base_fmt_spec.with_(SpecCellFormat {
            bold: Some(true),
            align: Some("center".to_string()),
            valign: Some("top".to_string()),
            border: Some(N_BORDER_THIN),
            ..Default::default()
        }),
    );

    dict_fmt
}

/// Thin border on all four sides.
pub fn derive_thin_border_format() -> SpecCellFormat {
    SpecCellFormat {
        border: Some(N_BORDER_THIN),
        ..Default::default()
    }
}
