//! Error type shared by the workbook model, writer, and reader.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for workbook kernel operations.
pub type Result<T> = std::result::Result<T, XlsxKitError>;

/// Errors raised by the workbook kernel.
#[derive(Debug, Error)]
pub enum XlsxKitError {
    /// No sheet with the requested name.
    #[error("Sheet {sheet:?} not found. Available sheets: {available}")]
    SheetNotFound {
        /// Requested sheet name.
        sheet: String,
        /// Comma-separated names of existing sheets.
        available: String,
    },

    /// Sheet insert position beyond the current sheet count.
    #[error("Sheet index {index} out of bounds for {len} sheet(s)")]
    SheetIndexOutOfBounds {
        /// Requested position.
        index: usize,
        /// Current sheet count.
        len: usize,
    },

    /// Cell coordinate outside Excel limits.
    #[error("Cell ({row}, {col}) exceeds Excel worksheet limits")]
    CellOutOfBounds {
        /// Zero-based row.
        row: usize,
        /// Zero-based column.
        col: usize,
    },

    /// Merge request covering a single cell or overlapping an existing merge/table.
    #[error("Invalid merge {range}: {reason}")]
    InvalidMerge {
        /// A1 reference of the rejected range.
        range: String,
        /// Rejection reason.
        reason: String,
    },

    /// Table name already used somewhere in the workbook.
    #[error("Table name {0:?} already exists in workbook")]
    TableNameTaken(String),

    /// Table name not accepted by Excel.
    #[error("Invalid table name {0:?}")]
    InvalidTableName(String),

    /// Table range overlapping another table or a merged range.
    #[error("Table {name:?} range {range} overlaps {other}")]
    TableRangeOverlaps {
        /// Table name.
        name: String,
        /// A1 reference of the table.
        range: String,
        /// Description of the conflicting object.
        other: String,
    },

    /// Table header row not made of unique non-empty texts.
    #[error("Table {name:?} header row is invalid: {reason}")]
    InvalidTableHeader {
        /// Table name.
        name: String,
        /// Rejection reason.
        reason: String,
    },

    /// Workbook file missing when reopening.
    #[error("Workbook file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// IO failure while preparing the output location.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure raised by the XLSX serializer.
    #[error("xlsx write error: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// Failure raised by the XLSX reader.
    #[error("xlsx read error: {0}")]
    Read(#[from] calamine::XlsxError),

    /// Failure opening the workbook package while recovering styles.
    #[error("xlsx package error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Malformed XML in a workbook part.
    #[error("xlsx part xml error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Required package part missing or unusable.
    #[error("Invalid xlsx package part {part:?}: {reason}")]
    InvalidPackage {
        /// Part name inside the package.
        part: String,
        /// Rejection reason.
        reason: String,
    },
}
