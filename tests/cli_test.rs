//! Integration tests for the nswrap binary
//!
//! These tests build small C trees in temporary directories, run the
//! binary against them and inspect the mirrored output.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const HEADER: &str = "#ifndef FOO_H\n#define FOO_H\nint x;\n#include <stdio.h>\nint y;\n#endif\n";
const SOURCE: &str = "#include \"a.h\"\n#include \"b.h\"\nint z;\n";

fn nswrap(src: &Path, out: &Path, extra: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_nswrap"))
        .arg(src)
        .arg(out)
        .args(extra)
        .current_dir(cwd)
        .output()
        .expect("Failed to execute nswrap")
}

fn create_tree() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let src = dir.path().join("src");
    fs::create_dir_all(src.join("lib")).unwrap();
    fs::write(src.join("foo.h"), HEADER).unwrap();
    fs::write(src.join("lib").join("main.c"), SOURCE).unwrap();
    fs::write(src.join("README.md"), "# docs\n").unwrap();
    fs::write(src.join("lib").join("build.sh"), "make\n").unwrap();
    dir
}

#[test]
fn test_wraps_tree_with_default_namespace() {
    let tree = create_tree();
    let src = tree.path().join("src");
    let out = tree.path().join("out");

    let output = nswrap(&src, &out, &["--quiet"], tree.path());
    assert!(
        output.status.success(),
        "nswrap failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert_eq!(
        fs::read_to_string(out.join("foo.h")).unwrap(),
        "#ifndef FOO_H\n\nnamespace clips {\n#define FOO_H\nint x;\n} // namespace clips\n\
         #include <stdio.h>\n\nnamespace clips {\nint y;\n} // namespace clips\n#endif\n"
    );
    assert_eq!(
        fs::read_to_string(out.join("lib").join("main.c")).unwrap(),
        "namespace clips {\n} // namespace clips\n#include \"a.h\"\n#include \"b.h\"\n\
         namespace clips {\nint z;\n} // namespace clips\n"
    );

    assert!(!out.join("README.md").exists());
    assert!(!out.join("lib").join("build.sh").exists());
}

#[test]
fn test_namespace_flag() {
    let tree = create_tree();
    let src = tree.path().join("src");
    let out = tree.path().join("out");

    let output = nswrap(&src, &out, &["--namespace", "engine", "-q"], tree.path());
    assert!(output.status.success());

    let main_c = fs::read_to_string(out.join("lib").join("main.c")).unwrap();
    assert!(main_c.starts_with("namespace engine {\n"));
    assert!(main_c.ends_with("} // namespace engine\n"));
}

#[test]
fn test_config_file_in_working_directory() {
    let tree = create_tree();
    fs::write(
        tree.path().join("nswrap.toml"),
        "[wrap]\nnamespace = \"fromconfig\"\nheader_mode = \"source\"\n",
    )
    .unwrap();

    let output = nswrap(Path::new("src"), Path::new("out"), &["-q"], tree.path());
    assert!(output.status.success());

    let header = fs::read_to_string(tree.path().join("out").join("foo.h")).unwrap();
    assert!(header.starts_with("namespace fromconfig {\n#ifndef FOO_H\n"));
}

#[test]
fn test_cli_overrides_config_file() {
    let tree = create_tree();
    fs::write(tree.path().join("nswrap.toml"), "[wrap]\nnamespace = \"fromconfig\"\n").unwrap();

    let output = nswrap(
        Path::new("src"),
        Path::new("out"),
        &["-q", "--namespace", "fromcli"],
        tree.path(),
    );
    assert!(output.status.success());

    let header = fs::read_to_string(tree.path().join("out").join("foo.h")).unwrap();
    assert!(header.contains("namespace fromcli {"));
    assert!(!header.contains("fromconfig"));
}

#[test]
fn test_missing_source_dir_fails() {
    let tree = tempfile::tempdir().unwrap();
    let output = nswrap(
        &tree.path().join("missing"),
        &tree.path().join("out"),
        &[],
        tree.path(),
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}

#[test]
fn test_strict_fails_on_unterminated_guard() {
    let tree = tempfile::tempdir().unwrap();
    let src = tree.path().join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("open.h"), "#ifndef OPEN_H\nint a;\n").unwrap();
    let out = tree.path().join("out");

    let lenient = nswrap(&src, &out, &["-q"], tree.path());
    assert!(lenient.status.success());
    assert!(out.join("open.h").exists());

    let strict_out = tree.path().join("strict");
    let strict = nswrap(&src, &strict_out, &["--strict"], tree.path());
    assert!(!strict.status.success());
    assert!(String::from_utf8_lossy(&strict.stderr).contains("include guard never closed"));
    assert!(!strict_out.join("open.h").exists());
}

#[test]
fn test_dry_run_json_report() {
    let tree = create_tree();
    let src = tree.path().join("src");
    let out = tree.path().join("out");

    let output = nswrap(&src, &out, &["--dry-run", "--json"], tree.path());
    assert!(output.status.success());
    assert!(!out.exists());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(report["namespace"], "clips");
    assert_eq!(report["headers"], 1);
    assert_eq!(report["sources"], 1);
    assert_eq!(report["skipped"], 2);
    assert_eq!(report["dry_run"], true);
    assert_eq!(report["warnings"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_invalid_namespace_is_warning_unless_strict() {
    let tree = create_tree();
    let src = tree.path().join("src");

    let lenient = nswrap(
        &src,
        &tree.path().join("a"),
        &["--namespace", "my-lib"],
        tree.path(),
    );
    assert!(lenient.status.success());
    assert!(String::from_utf8_lossy(&lenient.stdout).contains("not a valid C++ namespace name"));

    let strict = nswrap(
        &src,
        &tree.path().join("b"),
        &["--namespace", "my-lib", "--strict"],
        tree.path(),
    );
    assert!(!strict.status.success());
    assert!(!tree.path().join("b").exists());
}

#[test]
fn test_completions_need_no_directories() {
    let tree = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_nswrap"))
        .args(["--completions", "bash"])
        .current_dir(tree.path())
        .output()
        .expect("Failed to execute nswrap");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("nswrap"));
}
