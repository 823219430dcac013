use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pcbakit_report::{
    C_PATH_FILE_OUT_DEFAULT, EnumStage, ReportStage, SpecReportOptions, run_pipeline, run_stage,
};

#[derive(Parser)]
#[command(about = "Build, summarize, and format the PCBA import data workbook.")]
struct Args {
    /// Workbook written by `build` and rewritten by `finalize` and `format`.
    #[arg(long, global = true, value_name = "PATH", default_value = C_PATH_FILE_OUT_DEFAULT)]
    output: PathBuf,

    /// Stage to run (default: all, in order).
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Run build, finalize, and format in order.
    All,
    /// Write the record tables to a new workbook.
    Build,
    /// Insert the Summary sheet into an existing workbook.
    Finalize,
    /// Style, fit, and filter every sheet of an existing workbook.
    Format,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let options = SpecReportOptions {
        path_file_out: args.output,
        ..Default::default()
    };

    match args.command.unwrap_or(Command::All) {
        Command::All => {
            let l_reports = run_pipeline(&options)
                .with_context(|| format!("pipeline failed for {}", options.path_file_out.display()))?;
            for report in &l_reports {
                print_stage_done(report, &options.path_file_out)?;
            }
        }
        Command::Build => run_one(EnumStage::Build, &options)?,
        Command::Finalize => run_one(EnumStage::Finalize, &options)?,
        Command::Format => run_one(EnumStage::Format, &options)?,
    }
    Ok(())
}

fn run_one(stage: EnumStage, options: &SpecReportOptions) -> Result<()> {
    let report = run_stage(stage, options).with_context(|| {
        format!(
            "{} stage failed for {}",
            stage.to_string().to_lowercase(),
            options.path_file_out.display()
        )
    })?;
    print_stage_done(&report, &options.path_file_out)
}

fn print_stage_done(report: &ReportStage, path: &Path) -> Result<()> {
    let path_abs = std::path::absolute(path)
        .with_context(|| format!("cannot resolve {}", path.display()))?;
    println!(
        "PCBA Import Data spreadsheet {} successfully at {}",
        report.stage.verb_past(),
        path_abs.display()
    );
    println!("{report}");
    Ok(())
}
