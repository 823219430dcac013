//! Stage enum, run options, and record table models.

use std::fmt;
use std::path::PathBuf;

use pcbakit_io_xlsx::SpecAutofitCellsPolicy;
use polars::prelude::DataFrame;

use crate::conf::C_PATH_FILE_OUT_DEFAULT;

/// Pipeline stage. Order is a hard dependency: build, finalize, format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumStage {
    /// Write the eight record tables to a new workbook.
    Build,
    /// Insert the Summary sheet.
    Finalize,
    /// Style headers, fit columns, bind tables and autofilters.
    Format,
}

impl EnumStage {
    /// All stages in execution order.
    pub const ALL: [EnumStage; 3] = [EnumStage::Build, EnumStage::Finalize, EnumStage::Format];

    /// Past-tense verb for completion messages.
    pub fn verb_past(&self) -> &'static str {
        match self {
            EnumStage::Build => "created",
            EnumStage::Finalize => "finalized",
            EnumStage::Format => "formatted",
        }
    }
}

impl fmt::Display for EnumStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c_label = match self {
            EnumStage::Build => "BUILD",
            EnumStage::Finalize => "FINALIZE",
            EnumStage::Format => "FORMAT",
        };
        write!(f, "{c_label}")
    }
}

/// Options shared by every stage.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecReportOptions {
    /// Workbook read and rewritten by every stage.
    pub path_file_out: PathBuf,
    /// Best-fit column width policy used by the Formatter.
    pub policy_autofit: SpecAutofitCellsPolicy,
}

impl Default for SpecReportOptions {
    fn default() -> Self {
        Self {
            path_file_out: PathBuf::from(C_PATH_FILE_OUT_DEFAULT),
            policy_autofit: SpecAutofitCellsPolicy::default(),
        }
    }
}

/// One static record table destined for one sheet.
#[derive(Debug, Clone)]
pub struct SpecRecordTable {
    /// Target sheet name.
    pub sheet_name: &'static str,
    /// Column name -> ordered row values.
    pub df: DataFrame,
    /// Columns whose integer-looking texts are written as numbers.
    pub cols_integer: Vec<String>,
}

impl SpecRecordTable {
    /// Record table without integer columns.
    pub fn new(sheet_name: &'static str, df: DataFrame) -> Self {
        Self {
            sheet_name,
            df,
            cols_integer: vec![],
        }
    }

    /// Mark `cols` as integer columns.
    pub fn with_integer_cols(mut self, cols: &[&str]) -> Self {
        self.cols_integer = cols.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Number of record rows (header excluded).
    pub fn height(&self) -> usize {
        self.df.height()
    }
}
