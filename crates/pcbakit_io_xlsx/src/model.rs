//! In-memory workbook model mutated by pipeline stages between load and save.
//!
//! The model mirrors what the XLSX writer can express: sparse cells with a
//! value and a format, column widths, merged ranges, one autofilter, and
//! native tables. Coordinates are zero-based `(row, col)`.

use std::collections::{BTreeMap, BTreeSet};

use crate::conf::{N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX};
use crate::error::{Result, XlsxKitError};
use crate::spec::{EnumCellValue, SpecCellFormat, SpecCellRange, SpecTable};
use crate::util::{derive_unique_sheet_name, sanitize_sheet_name, validate_table_name};

/// One cell: value plus style.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelCell {
    /// Stored value.
    pub value: EnumCellValue,
    /// Applied style.
    pub format: SpecCellFormat,
}

////////////////////////////////////////////////////////////////////////////////
// #region Sheet

/// One worksheet.
#[derive(Debug, Clone, Default)]
pub struct ModelSheet {
    name: String,
    dict_cells: BTreeMap<(usize, usize), ModelCell>,
    dict_col_widths: BTreeMap<usize, f64>,
    l_merges: Vec<SpecCellRange>,
    autofilter: Option<SpecCellRange>,
    l_tables: Vec<SpecTable>,
}

impl ModelSheet {
    fn new(name: String) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// Sheet name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store `value` at `(row, col)`, keeping any existing format.
    pub fn write(&mut self, row: usize, col: usize, value: impl Into<EnumCellValue>) -> Result<()> {
        self.cell_entry(row, col)?.value = value.into();
        Ok(())
    }

    /// Store `value` and replace the cell format.
    pub fn write_with_format(
        &mut self,
        row: usize,
        col: usize,
        value: impl Into<EnumCellValue>,
        format: &SpecCellFormat,
    ) -> Result<()> {
        let cell = self.cell_entry(row, col)?;
        cell.value = value.into();
        cell.format = format.clone();
        Ok(())
    }

    /// Overlay `patch` onto the cell format (creates a styled blank if absent).
    pub fn patch_format(&mut self, row: usize, col: usize, patch: &SpecCellFormat) -> Result<()> {
        let cell = self.cell_entry(row, col)?;
        cell.format = cell.format.merge(patch);
        Ok(())
    }

    /// Cell at `(row, col)`, if it was ever written or styled.
    pub fn cell(&self, row: usize, col: usize) -> Option<&ModelCell> {
        self.dict_cells.get(&(row, col))
    }

    /// Value at `(row, col)`; blank when absent.
    pub fn value(&self, row: usize, col: usize) -> EnumCellValue {
        self.cell(row, col)
            .map(|cell| cell.value.clone())
            .unwrap_or_default()
    }

    /// All stored cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (&(usize, usize), &ModelCell)> {
        self.dict_cells.iter()
    }

    /// One-based index of the last row holding a value, a format, or part of a
    /// merged range; 0 when empty.
    pub fn max_row(&self) -> usize {
        let n_row_cells = self.dict_cells.keys().map(|(row, _)| row + 1).max();
        let n_row_merges = self.l_merges.iter().map(|rng| rng.row_end + 1).max();
        usize::max(n_row_cells.unwrap_or(0), n_row_merges.unwrap_or(0))
    }

    /// One-based index of the last column holding a value, a format, or part of
    /// a merged range; 0 when empty.
    pub fn max_column(&self) -> usize {
        let n_col_cells = self.dict_cells.keys().map(|(_, col)| col + 1).max();
        let n_col_merges = self.l_merges.iter().map(|rng| rng.col_end + 1).max();
        usize::max(n_col_cells.unwrap_or(0), n_col_merges.unwrap_or(0))
    }

    /// `A1` to the last populated cell, `None` when the sheet is empty.
    pub fn used_range(&self) -> Option<SpecCellRange> {
        let (n_rows, n_cols) = (self.max_row(), self.max_column());
        if n_rows == 0 || n_cols == 0 {
            return None;
        }
        Some(SpecCellRange::new(0, 0, n_rows - 1, n_cols - 1))
    }

    /// Set an explicit column width.
    pub fn set_column_width(&mut self, col: usize, width: f64) -> Result<()> {
        validate_cell_bounds(0, col)?;
        self.dict_col_widths.insert(col, width);
        Ok(())
    }

    /// Explicit width of `col`, if set.
    pub fn column_width(&self, col: usize) -> Option<f64> {
        self.dict_col_widths.get(&col).copied()
    }

    /// All explicit column widths.
    pub fn column_widths(&self) -> &BTreeMap<usize, f64> {
        &self.dict_col_widths
    }

    /// Merge `range`; the anchor cell keeps the value.
    ///
    /// Rejects single cells and overlaps with existing merges or tables.
    pub fn merge_range(&mut self, range: SpecCellRange) -> Result<()> {
        validate_cell_bounds(range.row_end, range.col_end)?;
        if range.is_single_cell() {
            return Err(XlsxKitError::InvalidMerge {
                range: range.to_a1(),
                reason: "a merge must span more than one cell".to_string(),
            });
        }
        if let Some(other) = self.l_merges.iter().find(|other| other.overlaps(&range)) {
            return Err(XlsxKitError::InvalidMerge {
                range: range.to_a1(),
                reason: format!("overlaps merged range {}", other.to_a1()),
            });
        }
        if let Some(table) = self.l_tables.iter().find(|tbl| tbl.range.overlaps(&range)) {
            return Err(XlsxKitError::InvalidMerge {
                range: range.to_a1(),
                reason: format!("overlaps table {:?}", table.name),
            });
        }
        self.cell_entry(range.row_start, range.col_start)?;
        self.l_merges.push(range);
        Ok(())
    }

    /// Merged ranges in insertion order.
    pub fn merged_ranges(&self) -> &[SpecCellRange] {
        &self.l_merges
    }

    /// Merge containing `(row, col)`, if any.
    pub fn merge_at(&self, row: usize, col: usize) -> Option<&SpecCellRange> {
        self.l_merges.iter().find(|rng| rng.contains(row, col))
    }

    /// Set the sheet autofilter range, replacing any previous one.
    pub fn set_autofilter(&mut self, range: SpecCellRange) -> Result<()> {
        validate_cell_bounds(range.row_end, range.col_end)?;
        self.autofilter = Some(range);
        Ok(())
    }

    /// Sheet autofilter range.
    pub fn autofilter(&self) -> Option<SpecCellRange> {
        self.autofilter
    }

    /// Tables bound to this sheet.
    pub fn tables(&self) -> &[SpecTable] {
        &self.l_tables
    }

    /// Table whose range covers `range`, if any.
    pub fn table_covering(&self, range: &SpecCellRange) -> Option<&SpecTable> {
        self.l_tables.iter().find(|tbl| tbl.range.covers(range))
    }

    fn validate_table_placement(&self, table: &SpecTable) -> Result<()> {
        if let Some(other) = self
            .l_tables
            .iter()
            .find(|other| other.range.overlaps(&table.range))
        {
            return Err(XlsxKitError::TableRangeOverlaps {
                name: table.name.clone(),
                range: table.range.to_a1(),
                other: format!("table {:?}", other.name),
            });
        }
        if let Some(rng_merge) = self
            .l_merges
            .iter()
            .find(|rng| rng.overlaps(&table.range))
        {
            return Err(XlsxKitError::TableRangeOverlaps {
                name: table.name.clone(),
                range: table.range.to_a1(),
                other: format!("merged range {}", rng_merge.to_a1()),
            });
        }

        let mut set_headers = BTreeSet::new();
        for col in table.range.col_start..=table.range.col_end {
            let c_header = self.value(table.range.row_start, col).to_display_string();
            if c_header.trim().is_empty() {
                return Err(XlsxKitError::InvalidTableHeader {
                    name: table.name.clone(),
                    reason: format!(
                        "blank header at {}",
                        crate::util::derive_cell_reference(table.range.row_start, col)
                    ),
                });
            }
            if !set_headers.insert(c_header.to_lowercase()) {
                return Err(XlsxKitError::InvalidTableHeader {
                    name: table.name.clone(),
                    reason: format!("duplicate header {c_header:?}"),
                });
            }
        }
        Ok(())
    }

    /// Register a table read back from a file, skipping placement checks.
    pub(crate) fn push_table_unchecked(&mut self, table: SpecTable) {
        self.l_tables.push(table);
    }

    fn cell_entry(&mut self, row: usize, col: usize) -> Result<&mut ModelCell> {
        validate_cell_bounds(row, col)?;
        Ok(self.dict_cells.entry((row, col)).or_default())
    }
}

fn validate_cell_bounds(row: usize, col: usize) -> Result<()> {
    if row >= N_NROWS_EXCEL_MAX || col >= N_NCOLS_EXCEL_MAX {
        return Err(XlsxKitError::CellOutOfBounds { row, col });
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Workbook

/// Ordered collection of sheets.
#[derive(Debug, Clone, Default)]
pub struct ModelWorkbook {
    l_sheets: Vec<ModelSheet>,
}

impl ModelWorkbook {
    /// Empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sheets in workbook order.
    pub fn sheets(&self) -> &[ModelSheet] {
        &self.l_sheets
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.l_sheets
            .iter()
            .map(|sheet| sheet.name.clone())
            .collect()
    }

    /// Create a sheet at `index` (appended when `None`).
    ///
    /// The name is sanitized and, when taken, suffixed (`name__2`); read the
    /// final name from the returned sheet.
    pub fn create_sheet(&mut self, name: &str, index: Option<usize>) -> Result<&mut ModelSheet> {
        let n_len = self.l_sheets.len();
        let n_idx = index.unwrap_or(n_len);
        if n_idx > n_len {
            return Err(XlsxKitError::SheetIndexOutOfBounds {
                index: n_idx,
                len: n_len,
            });
        }

        let c_name = derive_unique_sheet_name(&sanitize_sheet_name(name, "_"), &self.sheet_names());
        log::debug!("create sheet {c_name:?} at position {n_idx}");
        self.l_sheets.insert(n_idx, ModelSheet::new(c_name));
        Ok(&mut self.l_sheets[n_idx])
    }

    /// Sheet by exact name.
    pub fn sheet(&self, name: &str) -> Result<&ModelSheet> {
        self.l_sheets
            .iter()
            .find(|sheet| sheet.name == name)
            .ok_or_else(|| self.derive_sheet_not_found(name))
    }

    /// Mutable sheet by exact name.
    pub fn sheet_mut(&mut self, name: &str) -> Result<&mut ModelSheet> {
        let err = self.derive_sheet_not_found(name);
        self.l_sheets
            .iter_mut()
            .find(|sheet| sheet.name == name)
            .ok_or(err)
    }

    /// Names of every table in the workbook.
    pub fn table_names(&self) -> Vec<String> {
        self.l_sheets
            .iter()
            .flat_map(|sheet| sheet.l_tables.iter().map(|tbl| tbl.name.clone()))
            .collect()
    }

    /// Bind `table` to `sheet_name`.
    ///
    /// Fails when the name is invalid or already used anywhere in the workbook
    /// (case-insensitive), when the range overlaps another table or a merged
    /// range, or when the header row is not a set of unique non-empty texts.
    pub fn add_table(&mut self, sheet_name: &str, table: SpecTable) -> Result<()> {
        validate_table_name(&table.name)
            .map_err(|_| XlsxKitError::InvalidTableName(table.name.clone()))?;
        validate_cell_bounds(table.range.row_end, table.range.col_end)?;

        let c_name_lower = table.name.to_lowercase();
        if self
            .table_names()
            .iter()
            .any(|c_name| c_name.to_lowercase() == c_name_lower)
        {
            return Err(XlsxKitError::TableNameTaken(table.name));
        }

        let sheet = self.sheet_mut(sheet_name)?;
        sheet.validate_table_placement(&table)?;
        log::debug!(
            "bind table {:?} to {:?}!{}",
            table.name,
            sheet.name,
            table.range.to_a1()
        );
        sheet.l_tables.push(table);
        Ok(())
    }

    fn derive_sheet_not_found(&self, name: &str) -> XlsxKitError {
        XlsxKitError::SheetNotFound {
            sheet: name.to_string(),
            available: self.sheet_names().join(", "),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn build_sheet_with_header(wb: &mut ModelWorkbook, name: &str) {
        let sheet = wb.create_sheet(name, None).expect("create sheet");
        sheet.write(0, 0, "Country").expect("write");
        sheet.write(0, 1, "Notes").expect("write");
        sheet.write(1, 0, "China").expect("write");
        sheet.write(1, 1, "Primary source").expect("write");
    }

    #[test]
    fn max_row_counts_styled_blank_cells() {
        let mut wb = ModelWorkbook::new();
        let sheet = wb.create_sheet("Summary", None).expect("create sheet");
        sheet.write(0, 0, "title").expect("write");
        sheet
            .patch_format(27, 3, &SpecCellFormat {
                border: Some(1),
                ..Default::default()
            })
            .expect("patch");

        assert_eq!(sheet.max_row(), 28);
        assert_eq!(sheet.max_column(), 4);
        assert_eq!(sheet.used_range().map(|rng| rng.to_a1()).as_deref(), Some("A1:D28"));
    }

    #[test]
    fn create_sheet_inserts_at_position_and_dedupes() {
        let mut wb = ModelWorkbook::new();
        wb.create_sheet("Overview", None).expect("create");
        wb.create_sheet("Summary", Some(0)).expect("create");
        let c_name = wb
            .create_sheet("Summary", Some(0))
            .expect("create")
            .name()
            .to_string();

        assert_eq!(c_name, "Summary__2");
        assert_eq!(wb.sheet_names(), vec!["Summary__2", "Summary", "Overview"]);
        assert!(matches!(
            wb.create_sheet("Late", Some(9)),
            Err(XlsxKitError::SheetIndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn add_table_rejects_duplicate_name() {
        let mut wb = ModelWorkbook::new();
        build_sheet_with_header(&mut wb, "Import by Country");
        let rng = SpecCellRange::new(0, 0, 1, 1);

        wb.add_table("Import by Country", SpecTable::new("Table_Import_by_Country", rng))
            .expect("first table");
        let err = wb
            .add_table("Import by Country", SpecTable::new("table_import_by_country", rng))
            .expect_err("duplicate");
        assert!(matches!(err, XlsxKitError::TableNameTaken(_)));
        assert_eq!(wb.table_names(), vec!["Table_Import_by_Country"]);
    }

    #[test]
    fn add_table_rejects_merge_overlap_and_blank_header() {
        let mut wb = ModelWorkbook::new();
        build_sheet_with_header(&mut wb, "Summary");
        {
            let sheet = wb.sheet_mut("Summary").expect("sheet");
            sheet.write(3, 0, "note").expect("write");
            sheet
                .merge_range(SpecCellRange::new(3, 0, 3, 1))
                .expect("merge");
        }

        let err = wb
            .add_table("Summary", SpecTable::new("Table_Summary", SpecCellRange::new(0, 0, 3, 1)))
            .expect_err("overlaps merge");
        assert!(matches!(err, XlsxKitError::TableRangeOverlaps { .. }));

        let err = wb
            .add_table("Summary", SpecTable::new("Table_Wide", SpecCellRange::new(0, 0, 1, 2)))
            .expect_err("blank header");
        assert!(matches!(err, XlsxKitError::InvalidTableHeader { .. }));
        assert!(wb.table_names().is_empty());
    }

    #[test]
    fn max_extent_includes_merged_ranges() {
        let mut wb = ModelWorkbook::new();
        let sheet = wb.create_sheet("Summary", None).expect("create");
        sheet.write(25, 0, "note").expect("write");
        sheet
            .merge_range(SpecCellRange::new(25, 0, 27, 3))
            .expect("merge");

        assert_eq!(sheet.max_row(), 28);
        assert_eq!(sheet.max_column(), 4);
    }

    #[test]
    fn merge_range_rejects_single_cell_and_overlap() {
        let mut wb = ModelWorkbook::new();
        let sheet = wb.create_sheet("Summary", None).expect("create");
        sheet
            .merge_range(SpecCellRange::new(0, 0, 0, 3))
            .expect("merge");

        assert!(sheet.merge_range(SpecCellRange::new(2, 0, 2, 0)).is_err());
        assert!(sheet.merge_range(SpecCellRange::new(0, 2, 1, 2)).is_err());
        assert_eq!(sheet.merge_at(0, 2), Some(&SpecCellRange::new(0, 0, 0, 3)));
    }

    #[test]
    fn sheet_lookup_error_lists_available() {
        let mut wb = ModelWorkbook::new();
        wb.create_sheet("Overview", None).expect("create");
        let err = wb.sheet("Missing").expect_err("missing");
        assert_eq!(
            err.to_string(),
            "Sheet \"Missing\" not found. Available sheets: Overview"
        );
    }
}
