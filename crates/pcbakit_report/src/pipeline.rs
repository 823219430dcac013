//! Stage orchestration: load, apply, save.

use pcbakit_io_xlsx::{ModelWorkbook, SpecXlsxReport, open_workbook_model, save_workbook};

use crate::builder::build_workbook;
use crate::error::Result;
use crate::finalizer::finalize_workbook;
use crate::formatter::format_workbook;
use crate::records::derive_record_tables;
use crate::report::{ReportStage, ReportStageBuilder};
use crate::spec::{EnumStage, SpecReportOptions};

/// Run one stage against the workbook at `options.path_file_out`.
///
/// `Build` starts from an empty workbook; `Finalize` and `Format` reopen the
/// file, which must exist. Reopened sheets keep values, merges, tables, cell
/// formats and column widths.
pub fn run_stage(stage: EnumStage, options: &SpecReportOptions) -> Result<ReportStage> {
    let mut builder = ReportStageBuilder::new(stage);
    let mut model = match stage {
        EnumStage::Build => ModelWorkbook::new(),
        EnumStage::Finalize | EnumStage::Format => {
            let (model, report_load) = open_workbook_model(&options.path_file_out)?;
            merge_xlsx_warnings(&mut builder, report_load);
            model
        }
    };
    apply_stage(stage, &mut model, options, &mut builder)?;
    save_stage(&model, options, builder)
}

/// Run every stage in order, saving after each one.
///
/// The in-memory workbook is handed from stage to stage instead of being
/// reopened; the file on disk matches each stage's output in turn.
pub fn run_pipeline(options: &SpecReportOptions) -> Result<Vec<ReportStage>> {
    let mut model = ModelWorkbook::new();
    let mut l_reports = Vec::with_capacity(EnumStage::ALL.len());
    for stage in EnumStage::ALL {
        let mut builder = ReportStageBuilder::new(stage);
        apply_stage(stage, &mut model, options, &mut builder)?;
        l_reports.push(save_stage(&model, options, builder)?);
    }
    Ok(l_reports)
}

/// Apply `stage` to `model` in memory.
pub fn apply_stage(
    stage: EnumStage,
    model: &mut ModelWorkbook,
    options: &SpecReportOptions,
    builder: &mut ReportStageBuilder,
) -> Result<()> {
    log::info!("[{stage}] start: {}", options.path_file_out.display());
    match stage {
        EnumStage::Build => build_workbook(model, &derive_record_tables()?, builder),
        EnumStage::Finalize => finalize_workbook(model, builder),
        EnumStage::Format => format_workbook(model, &options.policy_autofit, builder),
    }
}

fn save_stage(
    model: &ModelWorkbook,
    options: &SpecReportOptions,
    mut builder: ReportStageBuilder,
) -> Result<ReportStage> {
    let report_save = save_workbook(model, &options.path_file_out)?;
    builder.set_sheets(report_save.sheets.len());
    merge_xlsx_warnings(&mut builder, report_save);

    let report = builder.build();
    log::info!("{report}");
    Ok(report)
}

fn merge_xlsx_warnings(builder: &mut ReportStageBuilder, report: SpecXlsxReport) {
    for c_warning in report.warnings {
        builder.add_warning(c_warning);
    }
}
