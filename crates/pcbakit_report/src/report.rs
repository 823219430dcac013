//! Stage report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

use crate::spec::EnumStage;

/// Aggregate counters and diagnostics for one stage run.
#[derive(Debug, Clone)]
pub struct ReportStage {
    /// Stage that produced this report.
    pub stage: EnumStage,
    /// Sheets in the saved workbook.
    pub cnt_sheets: u64,
    /// Cells written or restyled by the stage.
    pub cnt_cells: u64,
    /// Tables bound by the stage.
    pub cnt_tables_added: u64,
    /// Table bindings rejected and ignored.
    pub cnt_tables_skipped: u64,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl ReportStage {
    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_sheets".to_string(), self.cnt_sheets);
        dict_counts.insert("cnt_cells".to_string(), self.cnt_cells);
        dict_counts.insert("cnt_tables_added".to_string(), self.cnt_tables_added);
        dict_counts.insert("cnt_tables_skipped".to_string(), self.cnt_tables_skipped);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} sheets={} cells={} tables_added={} tables_skipped={} warnings={}",
            self.cnt_sheets,
            self.cnt_cells,
            self.cnt_tables_added,
            self.cnt_tables_skipped,
            self.warning_count()
        )
    }
}

impl fmt::Display for ReportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(&format!("[{}]", self.stage)))
    }
}

/// Mutable accumulator for stage statistics.
#[derive(Debug, Clone)]
pub struct ReportStageBuilder {
    stage: EnumStage,
    /// See [`ReportStage::cnt_sheets`].
    pub cnt_sheets: u64,
    /// See [`ReportStage::cnt_cells`].
    pub cnt_cells: u64,
    /// See [`ReportStage::cnt_tables_added`].
    pub cnt_tables_added: u64,
    /// See [`ReportStage::cnt_tables_skipped`].
    pub cnt_tables_skipped: u64,
    /// See [`ReportStage::warnings`].
    pub warnings: Vec<String>,
}

impl ReportStageBuilder {
    /// Empty builder for `stage`.
    pub fn new(stage: EnumStage) -> Self {
        Self {
            stage,
            cnt_sheets: 0,
            cnt_cells: 0,
            cnt_tables_added: 0,
            cnt_tables_skipped: 0,
            warnings: vec![],
        }
    }

    /// Add `value` cells to the cell counter.
    pub fn add_cells(&mut self, value: u64) {
        self.cnt_cells += value;
    }

    /// Increment added-table count by one.
    pub fn add_table_added(&mut self) {
        self.cnt_tables_added += 1;
    }

    /// Increment skipped-table count by one.
    pub fn add_table_skipped(&mut self) {
        self.cnt_tables_skipped += 1;
    }

    /// Record the sheet count of the saved workbook.
    pub fn set_sheets(&mut self, value: usize) {
        self.cnt_sheets = value as u64;
    }

    /// Add warning message.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportStage {
        ReportStage {
            stage: self.stage,
            cnt_sheets: self.cnt_sheets,
            cnt_cells: self.cnt_cells,
            cnt_tables_added: self.cnt_tables_added,
            cnt_tables_skipped: self.cnt_tables_skipped,
            warnings: self.warnings,
        }
    }
}
