//! XLSX writer kernel that serializes a [`ModelWorkbook`] to disk.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{
    Format, FormatAlign, FormatBorder, Table, TableColumn, TableStyle, Workbook, Worksheet,
};

use crate::error::{Result, XlsxKitError};
use crate::model::{ModelSheet, ModelWorkbook};
use crate::spec::{EnumCellValue, SpecCellFormat, SpecTable, SpecXlsxReport};

/// Stateful workbook writer.
///
/// The workbook is buffered in memory until [`Self::close`] is called.
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    dict_fmt_cache: HashMap<SpecCellFormat, Format>,
    report: SpecXlsxReport,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to output path.
    pub fn new(path_file_out: impl Into<PathBuf>) -> Self {
        Self {
            path_file_out: path_file_out.into(),
            workbook: Workbook::new(),
            dict_fmt_cache: HashMap::new(),
            report: SpecXlsxReport::default(),
            if_closed: false,
        }
    }

    /// Return snapshot of the write report.
    pub fn report(&self) -> SpecXlsxReport {
        self.report.clone()
    }

    /// Buffer every sheet of `model`, in order.
    pub fn write_workbook(&mut self, model: &ModelWorkbook) -> Result<()> {
        if self.if_closed {
            return Err(XlsxKitError::Io(std::io::Error::other(
                "Cannot write after close().",
            )));
        }
        for sheet in model.sheets() {
            self.write_sheet(sheet)?;
        }
        Ok(())
    }

    /// Flush workbook to disk, creating the parent directory. Idempotent.
    pub fn close(&mut self) -> Result<()> {
        if self.if_closed {
            return Ok(());
        }
        if let Some(path_dir) = self.path_file_out.parent()
            && !path_dir.as_os_str().is_empty()
        {
            fs::create_dir_all(path_dir)?;
        }
        self.workbook.save(&self.path_file_out)?;
        self.if_closed = true;
        log::info!(
            "saved {} sheet(s) to {}",
            self.report.sheets.len(),
            self.path_file_out.display()
        );
        Ok(())
    }

    fn write_sheet(&mut self, sheet: &ModelSheet) -> Result<()> {
        let mut dict_fmt_cache = std::mem::take(&mut self.dict_fmt_cache);
        let mut derive_format = |spec: &SpecCellFormat| -> Format {
            dict_fmt_cache
                .entry(spec.clone())
                .or_insert_with(|| derive_rust_xlsx_format(spec))
                .clone()
        };

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(sheet.name())?;

        for (&(row_idx, col_idx), cell) in sheet.cells() {
            if sheet.merge_at(row_idx, col_idx).is_some() {
                continue;
            }
            let format = derive_format(&cell.format);
            write_cell_with_format(worksheet, row_idx, col_idx, &cell.value, &format)?;
        }

        for range in sheet.merged_ranges() {
            let cell = sheet.cell(range.row_start, range.col_start);
            let value = cell.map(|c| c.value.clone()).unwrap_or_default();
            let format = derive_format(&cell.map(|c| c.format.clone()).unwrap_or_default());

            let c_text = match &value {
                EnumCellValue::String(val) => val.as_str(),
                _ => "",
            };
            worksheet.merge_range(
                cast_row_num(range.row_start)?,
                cast_col_num(range.col_start)?,
                cast_row_num(range.row_end)?,
                cast_col_num(range.col_end)?,
                c_text,
                &format,
            )?;
            if let EnumCellValue::Number(val) = value {
                worksheet.write_number_with_format(
                    cast_row_num(range.row_start)?,
                    cast_col_num(range.col_start)?,
                    val,
                    &format,
                )?;
            }
        }

        for (&col_idx, &width) in sheet.column_widths() {
            worksheet.set_column_width(cast_col_num(col_idx)?, width)?;
        }

        for spec_table in sheet.tables() {
            let l_header_formats: Vec<Format> = (spec_table.range.col_start
                ..=spec_table.range.col_end)
                .map(|col_idx| {
                    derive_format(
                        &sheet
                            .cell(spec_table.range.row_start, col_idx)
                            .map(|c| c.format.clone())
                            .unwrap_or_default(),
                    )
                })
                .collect();
            let table = derive_rust_xlsx_table(sheet, spec_table, &l_header_formats);
            worksheet.add_table(
                cast_row_num(spec_table.range.row_start)?,
                cast_col_num(spec_table.range.col_start)?,
                cast_row_num(spec_table.range.row_end)?,
                cast_col_num(spec_table.range.col_end)?,
                &table,
            )?;
        }

        if let Some(range) = sheet.autofilter() {
            if let Some(spec_table) = sheet.table_covering(&range) {
                log::debug!(
                    "autofilter {} on {:?} carried by table {:?}",
                    range.to_a1(),
                    sheet.name(),
                    spec_table.name
                );
            } else {
                write_autofilter(worksheet, sheet, &range)?;
            }
        }

        self.dict_fmt_cache = dict_fmt_cache;
        self.report.sheets.push(sheet.name().to_string());
        Ok(())
    }
}

/// Serialize `model` to `path` in one call.
pub fn save_workbook(model: &ModelWorkbook, path: impl AsRef<Path>) -> Result<SpecXlsxReport> {
    let mut writer = XlsxWriter::new(path.as_ref());
    writer.write_workbook(model)?;
    writer.close()?;
    Ok(writer.report())
}

fn write_autofilter(
    worksheet: &mut Worksheet,
    sheet: &ModelSheet,
    range: &crate::spec::SpecCellRange,
) -> Result<()> {
    if let Some(spec_table) = sheet.tables().iter().find(|tbl| tbl.range.overlaps(range)) {
        log::warn!(
            "skip autofilter {} on {:?}: partially overlaps table {:?}",
            range.to_a1(),
            sheet.name(),
            spec_table.name
        );
        return Ok(());
    }
    worksheet.autofilter(
        cast_row_num(range.row_start)?,
        cast_col_num(range.col_start)?,
        cast_row_num(range.row_end)?,
        cast_col_num(range.col_end)?,
    )?;
    Ok(())
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    format: &Format,
) -> Result<()> {
    match value {
        EnumCellValue::None => {
            worksheet.write_blank(cast_row_num(row_idx)?, cast_col_num(col_idx)?, format)?;
        }
        EnumCellValue::String(val) => {
            worksheet.write_string_with_format(
                cast_row_num(row_idx)?,
                cast_col_num(col_idx)?,
                val,
                format,
            )?;
        }
        EnumCellValue::Number(val) => {
            worksheet.write_number_with_format(
                cast_row_num(row_idx)?,
                cast_col_num(col_idx)?,
                *val,
                format,
            )?;
        }
    }
    Ok(())
}

/// Build the serializer table; headers are re-emitted with their cell formats.
fn derive_rust_xlsx_table(
    sheet: &ModelSheet,
    spec_table: &SpecTable,
    header_formats: &[Format],
) -> Table {
    let l_columns: Vec<TableColumn> = (spec_table.range.col_start..=spec_table.range.col_end)
        .zip(header_formats)
        .map(|(col_idx, format)| {
            TableColumn::new()
                .set_header(
                    sheet
                        .value(spec_table.range.row_start, col_idx)
                        .to_display_string(),
                )
                .set_header_format(format.clone())
        })
        .collect();

    Table::new()
        .set_name(&spec_table.name)
        .set_style(derive_table_style(&spec_table.style_name))
        .set_banded_rows(spec_table.if_show_row_stripes)
        .set_banded_columns(spec_table.if_show_column_stripes)
        .set_first_column(spec_table.if_show_first_column)
        .set_last_column(spec_table.if_show_last_column)
        .set_autofilter(spec_table.if_show_autofilter)
        .set_columns(&l_columns)
}

macro_rules! match_table_style {
    ($name:expr; $($variant:ident),+ $(,)?) => {
        match $name {
            $(concat!("TableStyle", stringify!($variant)) => TableStyle::$variant,)+
            _ => TableStyle::None,
        }
    };
}

/// Map an Excel built-in style name to the serializer enum; unknown names mean no style.
fn derive_table_style(style_name: &str) -> TableStyle {
    match_table_style!(style_name;
        Light1, Light2, Light3, Light4, Light5, Light6, Light7, Light8, Light9, Light10,
        Light11, Light12, Light13, Light14, Light15, Light16, Light17, Light18, Light19,
        Light20, Light21,
        Medium1, Medium2, Medium3, Medium4, Medium5, Medium6, Medium7, Medium8, Medium9,
        Medium10, Medium11, Medium12, Medium13, Medium14, Medium15, Medium16, Medium17,
        Medium18, Medium19, Medium20, Medium21, Medium22, Medium23, Medium24, Medium25,
        Medium26, Medium27, Medium28,
        Dark1, Dark2, Dark3, Dark4, Dark5, Dark6, Dark7, Dark8, Dark9, Dark10, Dark11,
    )
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }
    if spec.italic.unwrap_or(false) {
        format = format.set_italic();
    }
    if let Some(val) = &spec.font_color {
        format = format.set_font_color(val.as_str());
    }
    if let Some(val) = &spec.bg_color {
        format = format.set_background_color(val.as_str());
    }

    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if spec.text_wrap.unwrap_or(false) {
        format = format.set_text_wrap();
    }

    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }
    if let Some(val) = spec.top {
        format = format.set_border_top(derive_format_border(val));
    }
    if let Some(val) = spec.bottom {
        format = format.set_border_bottom(derive_format_border(val));
    }
    if let Some(val) = spec.left {
        format = format.set_border_left(derive_format_border(val));
    }
    if let Some(val) = spec.right {
        format = format.set_border_right(derive_format_border(val));
    }

    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.clone());
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Dashed,
        4 => FormatBorder::Dotted,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        7 => FormatBorder::Hair,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "justify" => Some(FormatAlign::Justify),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

fn cast_row_num(value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| XlsxKitError::CellOutOfBounds {
        row: value,
        col: 0,
    })
}

fn cast_col_num(value: usize) -> Result<u16> {
    u16::try_from(value).map_err(|_| XlsxKitError::CellOutOfBounds {
        row: 0,
        col: value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_table_style_known_and_unknown() {
        assert!(matches!(
            derive_table_style("TableStyleMedium2"),
            TableStyle::Medium2
        ));
        assert!(matches!(
            derive_table_style("TableStyleLight21"),
            TableStyle::Light21
        ));
        assert!(matches!(derive_table_style("Fancy"), TableStyle::None));
    }

    #[test]
    fn test_close_is_idempotent_and_creates_parent_dir() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("nested").join("book.xlsx");

        let mut model = ModelWorkbook::new();
        model
            .create_sheet("Overview", None)
            .expect("create")
            .write(0, 0, "Category")
            .expect("write");

        let mut writer = XlsxWriter::new(&path);
        writer.write_workbook(&model).expect("write");
        writer.close().expect("close");
        writer.close().expect("close again");

        assert!(path.exists());
        assert_eq!(writer.report().sheets, vec!["Overview".to_string()]);
        assert!(writer.write_workbook(&model).is_err());
    }
}
