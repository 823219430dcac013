//! Formatter stage: header styling, best-fit widths, tables and autofilters.

use pcbakit_io_xlsx::{
    ModelSheet, ModelWorkbook, SpecAutofitCellsPolicy, SpecCellFormat, SpecTable,
    calculate_autofit_width, derive_display_len, derive_table_name,
};

use crate::conf::{derive_body_format, derive_header_format};
use crate::error::Result;
use crate::report::ReportStageBuilder;

/// Format every sheet of `model` in workbook order.
///
/// Sheets with more than one row get a `Table_<sheet>` table and an
/// autofilter over the used range. A rejected table is skipped.
pub fn format_workbook(
    model: &mut ModelWorkbook,
    policy: &SpecAutofitCellsPolicy,
    report: &mut ReportStageBuilder,
) -> Result<()> {
    let fmt_header = derive_header_format();
    let fmt_body = derive_body_format();

    for c_sheet_name in model.sheet_names() {
        let sheet = model.sheet_mut(&c_sheet_name)?;
        let n_cells = format_sheet(sheet, &fmt_header, &fmt_body, policy)?;
        report.add_cells(n_cells);

        let Some(range) = sheet.used_range() else {
            continue;
        };
        if sheet.max_row() <= 1 {
            continue;
        }

        let table = SpecTable::new(derive_table_name(&c_sheet_name), range);
        match model.add_table(&c_sheet_name, table) {
            Ok(()) => report.add_table_added(),
            Err(err) => {
                log::debug!("skip table on {c_sheet_name:?}: {err}");
                report.add_table_skipped();
            }
        }
        model.sheet_mut(&c_sheet_name)?.set_autofilter(range)?;
    }
    Ok(())
}

/// Style header and body cells of `sheet` and set best-fit widths.
///
/// Returns the number of cells restyled.
pub fn format_sheet(
    sheet: &mut ModelSheet,
    fmt_header: &SpecCellFormat,
    fmt_body: &SpecCellFormat,
    policy: &SpecAutofitCellsPolicy,
) -> Result<u64> {
    let (n_rows, n_cols) = (sheet.max_row(), sheet.max_column());
    if n_rows == 0 || n_cols == 0 {
        return Ok(0);
    }

    for n_col in 0..n_cols {
        sheet.patch_format(0, n_col, fmt_header)?;
    }
    for n_row in 1..n_rows {
        for n_col in 0..n_cols {
            sheet.patch_format(n_row, n_col, fmt_body)?;
        }
    }

    for n_col in 0..n_cols {
        let n_len_max = (0..n_rows)
            .map(|n_row| derive_display_len(&sheet.value(n_row, n_col).to_display_string()))
            .max()
            .unwrap_or(0);
        sheet.set_column_width(n_col, calculate_autofit_width(n_len_max, policy))?;
    }

    log::debug!("formatted {:?} ({n_rows}x{n_cols})", sheet.name());
    Ok((n_rows * n_cols) as u64)
}

#[cfg(test)]
mod tests {
    use pcbakit_io_xlsx::{
        EnumCellValue, ModelWorkbook, SpecAutofitCellsPolicy, SpecCellRange,
    };
    use pretty_assertions::assert_eq;

    use super::format_workbook;
    use crate::conf::C_COLOR_HEADER_FILL;
    use crate::finalizer::finalize_workbook;
    use crate::report::ReportStageBuilder;
    use crate::spec::EnumStage;

    fn derive_data_workbook() -> ModelWorkbook {
        let mut model = ModelWorkbook::new();
        let sheet = model.create_sheet("Top Importers", None).expect("sheet");
        sheet.write(0, 0, "Company Name").expect("write");
        sheet.write(0, 1, "Notes").expect("write");
        sheet.write(1, 0, "Robert Bosch Corporation").expect("write");
        sheet.write(1, 1, "x".repeat(80)).expect("write");
        sheet.write(2, 0, EnumCellValue::Number(3.0)).expect("write");
        sheet.write(0, 2, "Volume").expect("write");
        sheet.write(1, 2, "$1 million \u{2013} $10 million").expect("write");
        model.create_sheet("Empty", None).expect("sheet");
        model
    }

    #[test]
    fn format_styles_fits_and_binds_table() {
        let mut model = derive_data_workbook();
        let mut report = ReportStageBuilder::new(EnumStage::Format);
        format_workbook(&mut model, &SpecAutofitCellsPolicy::default(), &mut report)
            .expect("format");

        let sheet = model.sheet("Top Importers").expect("sheet");
        let fmt_header = &sheet.cell(0, 1).expect("header").format;
        assert_eq!(fmt_header.bg_color, Some(C_COLOR_HEADER_FILL.to_string()));
        assert_eq!(fmt_header.font_size, Some(12));
        let fmt_blank = &sheet.cell(2, 1).expect("styled blank").format;
        assert_eq!(fmt_blank.valign.as_deref(), Some("vcenter"));
        assert_eq!(fmt_blank.border, Some(1));

        // "Robert Bosch Corporation" is 24 wide: (24 + 2) * 1.2.
        let width_a = sheet.column_width(0).expect("width");
        assert!((width_a - 31.2).abs() < 1e-9);
        assert_eq!(sheet.column_width(1), Some(50.0));
        // The en dash counts as one character, like every other.
        let width_c = sheet.column_width(2).expect("width");
        assert!((width_c - 31.2).abs() < 1e-9);

        assert_eq!(sheet.tables().len(), 1);
        assert_eq!(sheet.tables()[0].name, "Table_Top_Importers");
        assert_eq!(sheet.autofilter(), Some(SpecCellRange::new(0, 0, 2, 2)));

        let sheet_empty = model.sheet("Empty").expect("sheet");
        assert!(sheet_empty.tables().is_empty());
        assert_eq!(sheet_empty.autofilter(), None);

        let report = report.build();
        assert_eq!(report.cnt_tables_added, 1);
        assert_eq!(report.cnt_tables_skipped, 0);
    }

    #[test]
    fn repeated_format_skips_taken_table_names() {
        let mut model = derive_data_workbook();
        let policy = SpecAutofitCellsPolicy::default();
        let mut report = ReportStageBuilder::new(EnumStage::Format);
        format_workbook(&mut model, &policy, &mut report).expect("first");
        let mut report = ReportStageBuilder::new(EnumStage::Format);
        format_workbook(&mut model, &policy, &mut report).expect("second");

        let report = report.build();
        assert_eq!(report.cnt_tables_added, 0);
        assert_eq!(report.cnt_tables_skipped, 1);
        assert_eq!(model.table_names(), vec!["Table_Top_Importers"]);
    }

    #[test]
    fn summary_gets_autofilter_but_no_table() {
        let mut model = ModelWorkbook::new();
        let mut report = ReportStageBuilder::new(EnumStage::Format);
        finalize_workbook(&mut model, &mut report).expect("finalize");
        format_workbook(&mut model, &SpecAutofitCellsPolicy::default(), &mut report)
            .expect("format");

        let sheet = model.sheet("Summary").expect("summary");
        assert!(sheet.tables().is_empty());
        assert_eq!(sheet.autofilter(), Some(SpecCellRange::new(0, 0, 27, 3)));
        assert!(sheet.column_widths().values().all(|width| *width <= 50.0));
        assert_eq!(report.build().cnt_tables_skipped, 1);
    }
}
