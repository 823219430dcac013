//! `pcbakit_report` v1:
//! Three-stage PCBA import data workbook generator.
//!
//! - `records`   : static record tables
//! - `builder`   : record tables -> data sheets
//! - `finalizer` : Summary sheet
//! - `formatter` : header styles, widths, tables, autofilters
//! - `pipeline`  : stage load/apply/save orchestration
//! - `report`    : per-stage counters
pub mod builder;
pub mod conf;
pub mod error;
pub mod finalizer;
pub mod formatter;
pub mod pipeline;
pub mod records;
pub mod report;
pub mod spec;

pub use conf::{C_PATH_FILE_OUT_DEFAULT, C_SHEET_SUMMARY, TUP_DATA_SHEETS};
pub use error::{ReportError, Result};
pub use pipeline::{apply_stage, run_pipeline, run_stage};
pub use records::derive_record_tables;
pub use report::{ReportStage, ReportStageBuilder};
pub use spec::{EnumStage, SpecRecordTable, SpecReportOptions};
