//! Report pipeline error type.

use pcbakit_io_xlsx::XlsxKitError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Result alias for report pipeline operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors raised while building, finalizing, or formatting the workbook.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Workbook kernel failure (model, save, reopen).
    #[error(transparent)]
    Xlsx(#[from] XlsxKitError),

    /// Record table construction or access failure.
    #[error("record table error: {0}")]
    Polars(#[from] PolarsError),

    /// Record table unusable as a sheet.
    #[error("record table {sheet:?} is invalid: {reason}")]
    InvalidRecords {
        /// Target sheet name.
        sheet: String,
        /// Rejection reason.
        reason: String,
    },
}
