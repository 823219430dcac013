//! Builder stage: writes each record table to its own sheet.

use std::collections::BTreeMap;

use pcbakit_io_xlsx::{
    EnumCellValue, EnumFmtKey, ModelSheet, ModelWorkbook, SpecCellFormat,
    derive_default_xlsx_formats,
};
use polars::prelude::{AnyValue, DataFrame};

use crate::error::{ReportError, Result};
use crate::report::ReportStageBuilder;
use crate::spec::SpecRecordTable;

/// Replace `model` with a new workbook holding one sheet per record table.
///
/// Row 1 carries the column names with the default header preset; records
/// follow from row 2 in table order.
pub fn build_workbook(
    model: &mut ModelWorkbook,
    l_tables: &[SpecRecordTable],
    report: &mut ReportStageBuilder,
) -> Result<()> {
    *model = ModelWorkbook::new();
    for table in l_tables {
        let sheet = model.create_sheet(table.sheet_name, None)?;
        if sheet.name() != table.sheet_name {
            let c_warning = format!(
                "Record table {:?} was written to sheet {:?}",
                table.sheet_name,
                sheet.name()
            );
            log::warn!("{c_warning}");
            report.add_warning(c_warning);
        }
        let n_cells = write_record_table(sheet, table)?;
        log::debug!(
            "wrote {} records to {:?}",
            table.height(),
            table.sheet_name
        );
        report.add_cells(n_cells);
    }
    Ok(())
}

/// Write header and records of `table` into `sheet`; returns cells written.
pub fn write_record_table(sheet: &mut ModelSheet, table: &SpecRecordTable) -> Result<u64> {
    let dict_formats = derive_default_xlsx_formats();
    let fmt_header = derive_preset(&dict_formats, EnumFmtKey::Header);
    let fmt_text = derive_preset(&dict_formats, EnumFmtKey::Text);
    let fmt_integer = derive_preset(&dict_formats, EnumFmtKey::Integer);

    validate_record_table(table)?;
    let df: &DataFrame = &table.df;
    let mut n_cells = 0_u64;

    for (n_col, column) in df.get_columns().iter().enumerate() {
        let c_col_name = column.name().as_str();
        sheet.write_with_format(0, n_col, c_col_name, &fmt_header)?;
        n_cells += 1;

        let if_integer = table.cols_integer.iter().any(|c| c == c_col_name);
        let series = column.as_materialized_series();
        for n_row in 0..df.height() {
            let value = derive_cell_value(series.get(n_row)?, if_integer);
            if value.is_blank() {
                continue;
            }
            let fmt = match value {
                EnumCellValue::Number(_) if if_integer => &fmt_integer,
                _ => &fmt_text,
            };
            sheet.write_with_format(n_row + 1, n_col, value, fmt)?;
            n_cells += 1;
        }
    }
    Ok(n_cells)
}

fn derive_preset(
    dict_formats: &BTreeMap<EnumFmtKey, SpecCellFormat>,
    key: EnumFmtKey,
) -> SpecCellFormat {
    dict_formats.get(&key).cloned().unwrap_or_default()
}

fn validate_record_table(table: &SpecRecordTable) -> Result<()> {
    if table.df.width() == 0 {
        return Err(ReportError::InvalidRecords {
            sheet: table.sheet_name.to_string(),
            reason: "no columns".to_string(),
        });
    }
    if let Some(c_missing) = table
        .cols_integer
        .iter()
        .find(|c| !table.df.get_column_names().iter().any(|name| name.as_str() == c.as_str()))
    {
        return Err(ReportError::InvalidRecords {
            sheet: table.sheet_name.to_string(),
            reason: format!("integer column {c_missing:?} does not exist"),
        });
    }
    Ok(())
}

/// Convert one polars value into a cell value.
///
/// In integer columns, texts that parse as `i64` become numbers.
fn derive_cell_value(value: AnyValue<'_>, if_integer: bool) -> EnumCellValue {
    let cell = match value {
        AnyValue::Null => EnumCellValue::None,
        AnyValue::Boolean(v) => EnumCellValue::String(if v { "TRUE" } else { "FALSE" }.into()),
        AnyValue::String(v) => EnumCellValue::String(v.to_string()),
        AnyValue::StringOwned(v) => EnumCellValue::String(v.to_string()),
        AnyValue::Int32(v) => EnumCellValue::Number(v as f64),
        AnyValue::Int64(v) => EnumCellValue::Number(v as f64),
        AnyValue::UInt32(v) => EnumCellValue::Number(v as f64),
        AnyValue::UInt64(v) => EnumCellValue::Number(v as f64),
        AnyValue::Float32(v) => EnumCellValue::Number(v as f64),
        AnyValue::Float64(v) => EnumCellValue::Number(v),
        other => EnumCellValue::String(other.to_string()),
    };
    if if_integer
        && let EnumCellValue::String(c) = &cell
        && let Ok(n) = c.trim().parse::<i64>()
    {
        return EnumCellValue::Number(n as f64);
    }
    cell
}
