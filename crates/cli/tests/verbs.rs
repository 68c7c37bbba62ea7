use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

#[allow(deprecated)]
fn simkit(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("simkit").expect("binary");
    cmd.arg("--root").arg(root).arg("--quiet");
    cmd
}

fn setup_sources() -> TempDir {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("src/common")).unwrap();
    fs::create_dir_all(root.join("src/headers")).unwrap();
    fs::write(
        root.join("src/common/convert.c"),
        "#include<stdio.h>\n#include<headers/common.h>\n    \nint convert() {\n    return 0;\n}\n",
    )
    .unwrap();
    fs::write(root.join("src/headers/common.h"), "#pragma once\nint convert();").unwrap();
    temp
}

#[test]
fn unknown_verb_is_a_silent_no_op() {
    let temp = setup_sources();
    let root = temp.path();

    simkit(root)
        .args(["deploy", "m"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(!root.join("bin").exists());
    assert_eq!(
        fs::read_to_string(root.join("src/common/convert.c")).unwrap(),
        "#include<stdio.h>\n#include<headers/common.h>\n    \nint convert() {\n    return 0;\n}\n"
    );
}

#[test]
fn missing_verb_fails() {
    let temp = tempdir().unwrap();
    simkit(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing verb"));
}

#[test]
fn arity_violation_fails_before_side_effects() {
    let temp = tempdir().unwrap();
    let root = temp.path();

    simkit(root)
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("takes 1 argument"));
    simkit(root).args(["clean", "extra"]).assert().failure();

    assert!(!root.join("bin").exists());
}

#[test]
fn build_unknown_key_lists_valid_keys() {
    let temp = tempdir().unwrap();
    let root = temp.path();

    simkit(root)
        .args(["--cc", "/bin/true", "b", "zz"])
        .assert()
        .success()
        .stdout("input the correct build key: ['m', 'l', 'so']\n");

    assert!(root.join("bin").is_dir());
}

#[cfg(unix)]
#[test]
fn build_runs_every_linker_step_in_order() {
    let temp = tempdir().unwrap();
    let root = temp.path();

    let output = simkit(root)
        .args(["--cc", "/bin/echo", "BUILD", "l"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3, "{stdout}");
    assert!(lines[0].ends_with("-o ./bin/test_elf"));
    assert!(lines[1].contains("-shared -fPIC"));
    assert!(lines[1].ends_with("-o ./bin/staticLinker.so"));
    assert!(lines[2].ends_with("-ldl -o ./bin/link"));
}

#[cfg(unix)]
#[test]
fn failing_compiler_does_not_fail_the_tool() {
    let temp = tempdir().unwrap();
    simkit(temp.path())
        .args(["--cc", "/bin/false", "build", "l"])
        .assert()
        .success();
}

#[test]
fn run_before_build_is_a_precondition_failure() {
    let temp = tempdir().unwrap();
    simkit(temp.path())
        .args(["run", "m"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn run_unknown_key_lists_runnable_keys() {
    let temp = tempdir().unwrap();
    fs::create_dir_all(temp.path().join("bin")).unwrap();
    simkit(temp.path())
        .args(["run", "zz"])
        .assert()
        .success()
        .stdout("input the correct binary key: ['m', 'l', 'ld']\n");
}

#[test]
fn debug_rejects_composite_key() {
    let temp = tempdir().unwrap();
    fs::create_dir_all(temp.path().join("bin")).unwrap();
    simkit(temp.path())
        .args(["--gdb", "/bin/true", "debug", "ld"])
        .assert()
        .success()
        .stdout("input the correct binary key: ['m', 'l']\n");
}

#[cfg(unix)]
#[test]
fn shorthand_builds_then_runs_without_failing_on_missing_binary() {
    let temp = tempdir().unwrap();
    let root = temp.path();

    // `m` builds with a no-op compiler, then tries to run a binary that was never produced
    simkit(root)
        .args(["--cc", "/bin/true", "m"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(root.join("bin").is_dir());
}

#[test]
fn clean_on_fresh_workspace_succeeds() {
    let temp = tempdir().unwrap();
    simkit(temp.path()).arg("clean").assert().success();
}

#[test]
fn count_prints_sorted_table_and_total() {
    let temp = setup_sources();

    simkit(temp.path())
        .arg("co")
        .assert()
        .success()
        .stdout(
            "count .c and .h files lines:\n\
             src/common/convert.c    6\n\
             src/headers/common.h    2\n\
             \n\
             Total: 8\n",
        );
}

#[test]
fn count_json_output() {
    let temp = setup_sources();

    let output = simkit(temp.path())
        .args(["--json", "count"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["total"], 8);
    assert_eq!(body["records"][0]["path"], "src/common/convert.c");
    assert_eq!(body["records"][1]["lines"], 2);
}

#[test]
fn options_after_the_verb_are_not_verb_arguments() {
    let temp = setup_sources();

    let output = simkit(temp.path())
        .args(["count", "--json", "-v"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["total"], 8);

    simkit(temp.path())
        .args(["build", "zz", "--cc", "/bin/true"])
        .assert()
        .success()
        .stdout("input the correct build key: ['m', 'l', 'so']\n");
}

#[test]
fn format_rewrites_and_reports_skipped_files() {
    let temp = setup_sources();
    let root = temp.path();
    fs::write(root.join("src/common/latin.c"), b"// \xff\n").unwrap();

    simkit(root)
        .arg("FORM")
        .assert()
        .success()
        .stdout("src/common/latin.c\n");

    assert_eq!(
        fs::read_to_string(root.join("src/common/convert.c")).unwrap(),
        "#include <stdio.h>\n#include \"headers/common.h\"\n\nint convert() {\n    return 0;\n}\n"
    );

    // second pass is a no-op
    simkit(root).arg("format").assert().success();
    assert_eq!(
        fs::read_to_string(root.join("src/common/convert.c")).unwrap(),
        "#include <stdio.h>\n#include \"headers/common.h\"\n\nint convert() {\n    return 0;\n}\n"
    );
}

#[test]
fn format_can_strip_the_local_marker() {
    let temp = setup_sources();
    let root = temp.path();

    simkit(root)
        .args(["--marker-policy", "strip", "f"])
        .assert()
        .success();

    let text = fs::read_to_string(root.join("src/common/convert.c")).unwrap();
    assert!(text.starts_with("#include <stdio.h>\n#include \"common.h\"\n\n"));
}
