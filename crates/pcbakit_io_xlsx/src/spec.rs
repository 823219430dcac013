//! Shared workbook models: formats, values, ranges, tables, policies, reports.

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell style attributes. `None` means "not set" and leaves the cell default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Italic style.
    pub italic: Option<bool>,
    /// Font color as `#RRGGBB`.
    pub font_color: Option<String>,
    /// Solid background fill as `#RRGGBB`.
    pub bg_color: Option<String>,

    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Text wrap.
    pub text_wrap: Option<bool>,

    /// Border style for all sides.
    pub border: Option<i64>,
    /// Top border override.
    pub top: Option<i64>,
    /// Bottom border override.
    pub bottom: Option<i64>,
    /// Left border override.
    pub left: Option<i64>,
    /// Right border override.
    pub right: Option<i64>,

    /// Number format code.
    pub num_format: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            italic: other.italic.or(self.italic),
            font_color: other.font_color.clone().or_else(|| self.font_color.clone()),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            text_wrap: other.text_wrap.or(self.text_wrap),
            border: other.border.or(self.border),
            top: other.top.or(self.top),
            bottom: other.bottom.or(self.bottom),
            left: other.left.or(self.left),
            right: other.right.or(self.right),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellValue

/// Scalar cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EnumCellValue {
    /// Blank cell.
    #[default]
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
}

impl EnumCellValue {
    /// Text as a spreadsheet would display it; integral numbers drop the `.0`.
    pub fn to_display_string(&self) -> String {
        match self {
            EnumCellValue::None => String::new(),
            EnumCellValue::String(s) => s.clone(),
            EnumCellValue::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
        }
    }

    /// `true` for blank cells and empty strings.
    pub fn is_blank(&self) -> bool {
        match self {
            EnumCellValue::None => true,
            EnumCellValue::String(s) => s.is_empty(),
            EnumCellValue::Number(_) => false,
        }
    }
}

impl From<&str> for EnumCellValue {
    fn from(value: &str) -> Self {
        EnumCellValue::String(value.to_string())
    }
}

impl From<String> for EnumCellValue {
    fn from(value: String) -> Self {
        EnumCellValue::String(value)
    }
}

impl From<f64> for EnumCellValue {
    fn from(value: f64) -> Self {
        EnumCellValue::Number(value)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RangeAndTableSpecification

/// Zero-based inclusive cell rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpecCellRange {
    /// First row.
    pub row_start: usize,
    /// First column.
    pub col_start: usize,
    /// Last row (inclusive).
    pub row_end: usize,
    /// Last column (inclusive).
    pub col_end: usize,
}

impl SpecCellRange {
    /// Build a range, normalizing swapped corners.
    pub fn new(row_start: usize, col_start: usize, row_end: usize, col_end: usize) -> Self {
        Self {
            row_start: usize::min(row_start, row_end),
            col_start: usize::min(col_start, col_end),
            row_end: usize::max(row_start, row_end),
            col_end: usize::max(col_start, col_end),
        }
    }

    /// `true` when both ranges share at least one cell.
    pub fn overlaps(&self, other: &SpecCellRange) -> bool {
        self.row_start <= other.row_end
            && other.row_start <= self.row_end
            && self.col_start <= other.col_end
            && other.col_start <= self.col_end
    }

    /// `true` when `(row, col)` lies inside the range.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.row_start..=self.row_end).contains(&row)
            && (self.col_start..=self.col_end).contains(&col)
    }

    /// `true` when `other` lies fully inside `self`.
    pub fn covers(&self, other: &SpecCellRange) -> bool {
        self.contains(other.row_start, other.col_start) && self.contains(other.row_end, other.col_end)
    }

    /// `true` for a one-cell range.
    pub fn is_single_cell(&self) -> bool {
        self.row_start == self.row_end && self.col_start == self.col_end
    }

    /// Render as an `A1:D28` reference.
    pub fn to_a1(&self) -> String {
        crate::util::derive_range_reference(self)
    }
}

/// Native table binding stored on a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecTable {
    /// Workbook-unique table name.
    pub name: String,
    /// Cells covered, header row included.
    pub range: SpecCellRange,
    /// Built-in style name, e.g. `TableStyleMedium2`.
    pub style_name: String,
    /// Alternate row shading.
    pub if_show_row_stripes: bool,
    /// Alternate column shading.
    pub if_show_column_stripes: bool,
    /// Emphasize the first column.
    pub if_show_first_column: bool,
    /// Emphasize the last column.
    pub if_show_last_column: bool,
    /// Header dropdown filters.
    pub if_show_autofilter: bool,
}

impl SpecTable {
    /// Table with the default style and row stripes.
    pub fn new(name: impl Into<String>, range: SpecCellRange) -> Self {
        Self {
            name: name.into(),
            range,
            style_name: crate::conf::C_TABLE_STYLE_DEFAULT.to_string(),
            if_show_row_stripes: true,
            if_show_column_stripes: false,
            if_show_first_column: false,
            if_show_last_column: false,
            if_show_autofilter: true,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region AutofitPolicy

/// Best-fit column width policy.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecAutofitCellsPolicy {
    /// Characters added to the longest value.
    pub width_cell_padding: usize,
    /// Multiplier applied after padding.
    pub width_scale: f64,
    /// Maximum final width.
    pub width_cell_max: f64,
}

impl Default for SpecAutofitCellsPolicy {
    fn default() -> Self {
        Self {
            width_cell_padding: 2,
            width_scale: 1.2,
            width_cell_max: 50.0,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Per save/load call report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Sheet names in workbook order.
    pub sheets: Vec<String>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        log::warn!("{}", msg.as_ref());
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_left_attributes_not_set_on_right() {
        let fmt_base = SpecCellFormat {
            bold: Some(true),
            bg_color: Some("#EBF1DE".to_string()),
            ..Default::default()
        };
        let fmt_patch = SpecCellFormat {
            border: Some(1),
            bold: Some(false),
            ..Default::default()
        };

        let fmt_merged = fmt_base.merge(&fmt_patch);
        assert_eq!(fmt_merged.bold, Some(false));
        assert_eq!(fmt_merged.border, Some(1));
        assert_eq!(fmt_merged.bg_color.as_deref(), Some("#EBF1DE"));
    }

    #[test]
    fn display_string_drops_integral_fraction() {
        assert_eq!(EnumCellValue::Number(3.0).to_display_string(), "3");
        assert_eq!(EnumCellValue::Number(2.5).to_display_string(), "2.5");
        assert_eq!(EnumCellValue::None.to_display_string(), "");
    }

    #[test]
    fn range_overlap_and_cover() {
        let rng_table = SpecCellRange::new(0, 0, 27, 3);
        let rng_merge = SpecCellRange::new(0, 0, 0, 3);
        let rng_far = SpecCellRange::new(30, 0, 31, 1);

        assert!(rng_table.overlaps(&rng_merge));
        assert!(rng_table.covers(&rng_merge));
        assert!(!rng_table.overlaps(&rng_far));
        assert_eq!(rng_table.to_a1(), "A1:D28");
    }
}
