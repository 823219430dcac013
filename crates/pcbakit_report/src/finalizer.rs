//! Finalizer stage: inserts the Summary sheet in front of the data sheets.

use pcbakit_io_xlsx::{ModelSheet, ModelWorkbook, SpecCellRange, derive_thin_border_format};

use crate::conf::{
    C_SHEET_SUMMARY, C_SUMMARY_FILTER_TITLE, C_SUMMARY_GUIDE_TITLE, C_SUMMARY_NOTE,
    C_SUMMARY_TITLE, TUP_SUMMARY_COLUMN_WIDTHS, TUP_SUMMARY_FILTER_ROWS,
    TUP_SUMMARY_GUIDE_HEADERS, TUP_SUMMARY_GUIDE_ROWS, TUP_SUMMARY_INTRO, derive_section_format,
    derive_stripe_format, derive_title_format, derive_wrap_format,
};
use crate::error::Result;
use crate::report::ReportStageBuilder;

// Zero-based layout anchors.
const N_ROW_TITLE: usize = 0;
const N_ROW_INTRO: usize = 2;
const N_ROW_GUIDE_TITLE: usize = 7;
const N_ROW_GUIDE_HEADER: usize = 8;
const N_ROW_GUIDE_FIRST: usize = 9;
const N_ROW_FILTER_TITLE: usize = 19;
const N_ROW_FILTER_FIRST: usize = 20;
const N_ROW_NOTE: usize = 25;
const N_ROW_LAST: usize = 27;
const N_COL_LAST: usize = 3;
const N_COLS_STRIPED: usize = 3;

/// Insert the Summary sheet at position 0.
///
/// An existing `Summary` sheet is kept; the new one gets a suffixed name and
/// a warning is recorded.
pub fn finalize_workbook(model: &mut ModelWorkbook, report: &mut ReportStageBuilder) -> Result<()> {
    let sheet = model.create_sheet(C_SHEET_SUMMARY, Some(0))?;
    if sheet.name() != C_SHEET_SUMMARY {
        let c_warning = format!(
            "Sheet {C_SHEET_SUMMARY:?} already exists; summary written to {:?}",
            sheet.name()
        );
        log::warn!("{c_warning}");
        report.add_warning(c_warning);
    }
    write_summary(sheet)?;
    log::debug!("summary written to {:?}", sheet.name());
    report.add_cells(sheet.cells().count() as u64);
    Ok(())
}

/// Lay out the summary text, guide table, and filtering steps in `sheet`.
pub fn write_summary(sheet: &mut ModelSheet) -> Result<()> {
    let fmt_title = derive_title_format();
    let fmt_section = derive_section_format();
    let fmt_wrap = derive_wrap_format();

    sheet.write_with_format(N_ROW_TITLE, 0, C_SUMMARY_TITLE, &fmt_title)?;
    merge_row(sheet, N_ROW_TITLE)?;

    for (n_offset, c_line) in TUP_SUMMARY_INTRO.iter().enumerate() {
        let n_row = N_ROW_INTRO + n_offset;
        sheet.write_with_format(n_row, 0, *c_line, &fmt_wrap)?;
        merge_row(sheet, n_row)?;
    }

    sheet.write_with_format(N_ROW_GUIDE_TITLE, 0, C_SUMMARY_GUIDE_TITLE, &fmt_section)?;
    merge_row(sheet, N_ROW_GUIDE_TITLE)?;
    for (n_col, c_header) in TUP_SUMMARY_GUIDE_HEADERS.iter().enumerate() {
        sheet.write_with_format(N_ROW_GUIDE_HEADER, n_col, *c_header, &fmt_section)?;
    }
    write_text_rows(sheet, N_ROW_GUIDE_FIRST, &TUP_SUMMARY_GUIDE_ROWS)?;

    for (n_col, width) in TUP_SUMMARY_COLUMN_WIDTHS.iter().enumerate() {
        sheet.set_column_width(n_col, *width)?;
    }

    sheet.write_with_format(N_ROW_FILTER_TITLE, 0, C_SUMMARY_FILTER_TITLE, &fmt_section)?;
    merge_row(sheet, N_ROW_FILTER_TITLE)?;
    write_text_rows(sheet, N_ROW_FILTER_FIRST, &TUP_SUMMARY_FILTER_ROWS)?;

    sheet.write_with_format(N_ROW_NOTE, 0, C_SUMMARY_NOTE, &fmt_wrap)?;
    sheet.merge_range(SpecCellRange::new(N_ROW_NOTE, 0, N_ROW_LAST, N_COL_LAST))?;

    let fmt_border = derive_thin_border_format();
    for n_row in 0..=N_ROW_LAST {
        for n_col in 0..=N_COL_LAST {
            sheet.patch_format(n_row, n_col, &fmt_border)?;
        }
    }

    // Every other guide row, then every other filter row.
    let fmt_stripe = derive_stripe_format();
    let l_rows_striped = (N_ROW_GUIDE_FIRST..N_ROW_GUIDE_FIRST + TUP_SUMMARY_GUIDE_ROWS.len())
        .step_by(2)
        .chain((N_ROW_FILTER_FIRST..N_ROW_FILTER_FIRST + TUP_SUMMARY_FILTER_ROWS.len()).step_by(2));
    for n_row in l_rows_striped {
        for n_col in 0..N_COLS_STRIPED {
            sheet.patch_format(n_row, n_col, &fmt_stripe)?;
        }
    }
    Ok(())
}

fn merge_row(sheet: &mut ModelSheet, n_row: usize) -> Result<()> {
    sheet.merge_range(SpecCellRange::new(n_row, 0, n_row, N_COL_LAST))?;
    Ok(())
}

fn write_text_rows(sheet: &mut ModelSheet, n_row_first: usize, l_rows: &[[&str; 3]]) -> Result<()> {
    let fmt_wrap = derive_wrap_format();
    for (n_offset, l_values) in l_rows.iter().enumerate() {
        for (n_col, c_value) in l_values.iter().enumerate() {
            sheet.write_with_format(n_row_first + n_offset, n_col, *c_value, &fmt_wrap)?;
        }
    }
    Ok(())
}
