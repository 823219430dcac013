use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn run_pcbakit(dir: &Path, l_args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pcbakit"))
        .args(l_args)
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .output()
        .expect("run pcbakit")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "expected exit 0\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr),
    );
}

fn derive_stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

fn derive_done_line(c_verb: &str, path: &Path) -> String {
    format!(
        "PCBA Import Data spreadsheet {c_verb} successfully at {}",
        path.display()
    )
}

#[test]
fn cli_without_subcommand_runs_every_stage() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let dir = tmp.path().canonicalize().expect("canonical tempdir");

    let output = run_pcbakit(&dir, &[]);
    assert_success(&output);

    let path_out = dir.join("output").join("PCBA_Import_Data.xlsx");
    assert!(path_out.is_file(), "missing {}", path_out.display());

    let l_lines = derive_stdout_lines(&output);
    assert_eq!(l_lines.len(), 6, "{l_lines:#?}");
    assert_eq!(l_lines[0], derive_done_line("created", &path_out));
    assert!(l_lines[1].starts_with("[BUILD] sheets=8 "), "{}", l_lines[1]);
    assert_eq!(l_lines[2], derive_done_line("finalized", &path_out));
    assert!(l_lines[3].starts_with("[FINALIZE] sheets=9 "), "{}", l_lines[3]);
    assert_eq!(l_lines[4], derive_done_line("formatted", &path_out));
    assert!(
        l_lines[5].starts_with("[FORMAT] sheets=9 ") && l_lines[5].contains("tables_added=8"),
        "{}",
        l_lines[5]
    );
}

#[test]
fn cli_output_override_and_single_stages() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let dir = tmp.path().canonicalize().expect("canonical tempdir");
    let path_out = dir.join("reports").join("pcba.xlsx");

    for (c_stage, c_verb, c_report) in [
        ("build", "created", "[BUILD]"),
        ("finalize", "finalized", "[FINALIZE]"),
        ("format", "formatted", "[FORMAT]"),
    ] {
        let output = run_pcbakit(&dir, &[c_stage, "--output", "reports/pcba.xlsx"]);
        assert_success(&output);

        let l_lines = derive_stdout_lines(&output);
        assert_eq!(l_lines.len(), 2, "{l_lines:#?}");
        assert_eq!(l_lines[0], derive_done_line(c_verb, &path_out));
        assert!(l_lines[1].starts_with(c_report), "{}", l_lines[1]);
    }

    assert!(path_out.is_file());
    assert!(!dir.join("output").exists());
}

#[test]
fn cli_finalize_without_workbook_fails() {
    let tmp = tempfile::tempdir().expect("tempdir");

    let output = run_pcbakit(tmp.path(), &["finalize"]);
    assert!(
        !output.status.success(),
        "expected non-zero exit status\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr),
    );
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "{stderr}");
    assert!(!tmp.path().join("output").exists());
}
