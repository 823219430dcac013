//! XLSX reader that rebuilds a [`ModelWorkbook`] from a saved file.
//!
//! calamine supplies sheet order, cell values, merged ranges, and table
//! bindings; cell formats and custom column widths come from the package
//! parts. Autofilters are not recovered.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};

use crate::error::{Result, XlsxKitError};
use crate::model::ModelWorkbook;
use crate::spec::{EnumCellValue, SpecCellRange, SpecTable, SpecXlsxReport};
use crate::styles::read_sheet_styles;

/// Open `path` and rebuild the workbook model.
pub fn open_workbook_model(path: impl AsRef<Path>) -> Result<(ModelWorkbook, SpecXlsxReport)> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(XlsxKitError::FileNotFound(path.to_path_buf()));
    }

    let mut workbook: Xlsx<BufReader<File>> = open_workbook(path)?;
    workbook.load_merged_regions()?;
    workbook.load_tables()?;
    let mut dict_styles = read_sheet_styles(path)?;

    let mut model = ModelWorkbook::new();
    let mut report = SpecXlsxReport::default();

    for sheet_name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&sheet_name)?;
        let (n_row_offset, n_col_offset) = range.start().unwrap_or((0, 0));

        let sheet = model.create_sheet(&sheet_name, None)?;
        if sheet.name() != sheet_name {
            report.warn(format!(
                "Sheet {sheet_name:?} reopened as {:?}",
                sheet.name()
            ));
        }

        for (row_idx, col_idx, data) in range.used_cells() {
            let value = derive_cell_value_from_data(data);
            if matches!(value, EnumCellValue::None) {
                continue;
            }
            sheet.write(
                n_row_offset as usize + row_idx,
                n_col_offset as usize + col_idx,
                value,
            )?;
        }

        match dict_styles.remove(&sheet_name) {
            Some(styles) => {
                for ((row_idx, col_idx), format) in &styles.dict_cell_formats {
                    sheet.patch_format(*row_idx, *col_idx, format)?;
                }
                for (col_idx, width) in styles.dict_col_widths {
                    sheet.set_column_width(col_idx, width)?;
                }
            }
            None => report.warn(format!("No styles recovered for {sheet_name:?}")),
        }

        for (_, _, dims) in workbook.merged_regions_by_sheet(&sheet_name) {
            let range_merge = SpecCellRange::new(
                dims.start.0 as usize,
                dims.start.1 as usize,
                dims.end.0 as usize,
                dims.end.1 as usize,
            );
            if let Err(err) = sheet.merge_range(range_merge) {
                report.warn(format!("Skip merged range on {sheet_name:?}: {err}"));
            }
        }

        let l_table_names: Vec<String> = workbook
            .table_names_in_sheet(&sheet_name)
            .into_iter()
            .cloned()
            .collect();
        for table_name in l_table_names {
            let table = workbook.table_by_name(&table_name)?;
            let n_width = table.columns().len();
            match (table.data().start(), table.data().end()) {
                (Some((row_data_start, col_start)), Some((row_end, _)))
                    if row_data_start > 0 && n_width > 0 =>
                {
                    let range_table = SpecCellRange::new(
                        row_data_start as usize - 1,
                        col_start as usize,
                        row_end as usize,
                        col_start as usize + n_width - 1,
                    );
                    sheet.push_table_unchecked(SpecTable::new(table_name.clone(), range_table));
                }
                _ => report.warn(format!(
                    "Skip table {table_name:?} on {sheet_name:?}: no data range"
                )),
            }
        }

        report.sheets.push(sheet.name().to_string());
    }

    log::info!(
        "reopened {} sheet(s) from {}",
        report.sheets.len(),
        path.display()
    );
    Ok((model, report))
}

fn derive_cell_value_from_data(data: &Data) -> EnumCellValue {
    match data {
        Data::Empty => EnumCellValue::None,
        Data::String(val) => EnumCellValue::String(val.clone()),
        Data::Float(val) => EnumCellValue::Number(*val),
        Data::Int(val) => EnumCellValue::Number(*val as f64),
        Data::Bool(val) => EnumCellValue::String(if *val { "TRUE" } else { "FALSE" }.to_string()),
        other => EnumCellValue::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::spec::SpecCellFormat;
    use crate::writer::save_workbook;

    #[test]
    fn reopen_recovers_values_merges_and_tables() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("book.xlsx");

        let mut model = ModelWorkbook::new();
        {
            let sheet = model.create_sheet("Summary", None).expect("create");
            sheet.write(0, 0, "PCBA IMPORT DATA SUMMARY").expect("write");
            sheet
                .merge_range(SpecCellRange::new(0, 0, 0, 3))
                .expect("merge");
        }
        {
            let sheet = model.create_sheet("Import by Country", None).expect("create");
            sheet.write(0, 0, "Country").expect("write");
            sheet.write(0, 1, "Import Rank").expect("write");
            sheet.write(1, 0, "China").expect("write");
            sheet.write(1, 1, 1.0).expect("write");
            sheet.write(2, 0, "Vietnam").expect("write");
            sheet.write(2, 1, "Not in top 5").expect("write");
        }
        model
            .add_table(
                "Import by Country",
                SpecTable::new("Table_Import_by_Country", SpecCellRange::new(0, 0, 2, 1)),
            )
            .expect("table");
        save_workbook(&model, &path).expect("save");

        let (reopened, report) = open_workbook_model(&path).expect("reopen");
        assert_eq!(report.sheets, vec!["Summary", "Import by Country"]);
        assert!(report.warnings.is_empty());

        let summary = reopened.sheet("Summary").expect("summary");
        assert_eq!(summary.merged_ranges(), &[SpecCellRange::new(0, 0, 0, 3)]);

        let country = reopened.sheet("Import by Country").expect("country");
        assert_eq!(country.value(1, 1), EnumCellValue::Number(1.0));
        assert_eq!(country.value(2, 1), EnumCellValue::from("Not in top 5"));
        assert_eq!(country.max_row(), 3);
        assert_eq!(reopened.table_names(), vec!["Table_Import_by_Country"]);
        assert_eq!(country.tables()[0].range, SpecCellRange::new(0, 0, 2, 1));
    }

    #[test]
    fn reopen_recovers_cell_formats_and_widths() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("book.xlsx");

        let fmt_title = SpecCellFormat {
            font_name: Some("Arial".to_string()),
            font_size: Some(16),
            bold: Some(true),
            align: Some("center".to_string()),
            valign: Some("vcenter".to_string()),
            border: Some(1),
            ..Default::default()
        };
        let fmt_stripe = SpecCellFormat {
            bg_color: Some("#EBF1DE".to_string()),
            text_wrap: Some(true),
            border: Some(1),
            ..Default::default()
        };
        let fmt_integer = SpecCellFormat {
            num_format: Some("0".to_string()),
            ..Default::default()
        };

        let mut model = ModelWorkbook::new();
        {
            let sheet = model.create_sheet("Summary", None).expect("create");
            sheet
                .write_with_format(0, 0, "PCBA IMPORT DATA SUMMARY", &fmt_title)
                .expect("write");
            sheet
                .merge_range(SpecCellRange::new(0, 0, 0, 3))
                .expect("merge");
            sheet.write_with_format(1, 0, "Overview", &fmt_stripe).expect("write");
            sheet.patch_format(1, 2, &fmt_stripe).expect("styled blank");
            sheet.write_with_format(1, 1, 4.0, &fmt_integer).expect("write");
            sheet.write(2, 0, "plain").expect("write");
            sheet.set_column_width(0, 20.0).expect("width");
            sheet.set_column_width(2, 40.0).expect("width");
        }
        save_workbook(&model, &path).expect("save");

        let (reopened, report) = open_workbook_model(&path).expect("reopen");
        assert!(report.warnings.is_empty());
        let summary = reopened.sheet("Summary").expect("summary");

        assert_eq!(summary.cell(0, 0).expect("title").format, fmt_title);
        assert_eq!(summary.cell(1, 0).expect("stripe").format, fmt_stripe);
        assert_eq!(summary.cell(1, 2).expect("styled blank").format, fmt_stripe);
        assert_eq!(summary.value(1, 2), EnumCellValue::None);
        assert_eq!(summary.cell(1, 1).expect("integer").format, fmt_integer);
        assert_eq!(summary.cell(2, 0).expect("plain").format, SpecCellFormat::default());
        assert_eq!(summary.column_width(0), Some(20.0));
        assert_eq!(summary.column_width(1), None);
        assert_eq!(summary.column_width(2), Some(40.0));
    }

    #[test]
    fn booleans_read_as_upper_case_text() {
        assert_eq!(
            derive_cell_value_from_data(&Data::Bool(true)),
            EnumCellValue::from("TRUE")
        );
        assert_eq!(
            derive_cell_value_from_data(&Data::Bool(false)),
            EnumCellValue::from("FALSE")
        );
    }

    #[test]
    fn reopen_missing_file_fails() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = open_workbook_model(tmp.path().join("absent.xlsx")).expect_err("missing");
        assert!(matches!(err, XlsxKitError::FileNotFound(_)));
    }
}
