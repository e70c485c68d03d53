#![cfg(unix)]

use basis_exec::{Error, ExecOptions, execute, execute_capture, execute_line};
use basis_target::{Context, Registry, RegistrySource, TargetKind};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::tempdir;

fn write_script(path: &Path, body: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn empty_context() -> Context {
    Context::from_registry(Registry::empty("/"))
}

#[test]
fn test_nonzero_exit_fails_by_default() {
    let ctx = empty_context();
    let err = execute(&ctx, &ExecOptions::new(), "sh", &["-c", "exit 2"]).unwrap_err();

    match &err {
        Error::SubprocessFailure { cmdline, status } => {
            assert_eq!(*status, 2);
            assert!(cmdline.ends_with(r#"sh -c "exit 2""#), "{cmdline}");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().starts_with("Command "));
    assert!(err.to_string().ends_with(" failed"));
}

#[test]
fn test_allow_fail_returns_status() {
    let ctx = empty_context();
    let options = ExecOptions::new().allow_fail(true);
    assert_eq!(execute(&ctx, &options, "sh", &["-c", "exit 2"]).unwrap(), 2);
    assert_eq!(execute(&ctx, &options, "sh", &["-c", "exit 0"]).unwrap(), 0);
}

#[test]
fn test_registered_target_runs_from_its_tree() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out.txt");
    write_script(
        &dir.path().join("bin/writer"),
        &format!("printf '%s|' \"$@\" > '{}'", out.display()),
    );
    fs::write(
        dir.path().join("targets.toml"),
        "namespace = \"proj.sub\"\n[targets.proj_writer]\nuid = \"proj.writer\"\nlocation = \"bin/writer\"\ntype = \"executable\"\n",
    )
    .unwrap();

    let ctx = Context::from_source(RegistrySource::File(dir.path().join("targets.toml")));
    let status = execute(&ctx, &ExecOptions::new(), "writer", &["a b", "", "c\"d"]).unwrap();

    assert_eq!(status, 0);
    assert_eq!(fs::read_to_string(&out).unwrap(), "a b||c\"d|");
}

#[test]
fn test_execute_line_splits_quoted_arguments() {
    let ctx = empty_context();
    let (status, stdout) = execute_capture(
        &ctx,
        &ExecOptions::new(),
        "sh",
        &["-c", "printf '%s\\n' \"$@\"", "sh", "one two", "three"],
    )
    .unwrap();
    assert_eq!(status, 0);
    assert_eq!(stdout, "one two\nthree\n");

    let options = ExecOptions::new().allow_fail(true);
    assert_eq!(
        execute_line(&ctx, &options, r#"sh -c "exit 5""#).unwrap(),
        5
    );
}

#[test]
fn test_capture_applies_failure_policy() {
    let ctx = empty_context();
    let err = execute_capture(&ctx, &ExecOptions::new(), "sh", &["-c", "echo out; exit 3"])
        .unwrap_err();
    assert_eq!(err.status(), Some(3));

    let options = ExecOptions::new().allow_fail(true);
    let (status, stdout) = execute_capture(&ctx, &options, "sh", &["-c", "echo out; exit 3"]).unwrap();
    assert_eq!(status, 3);
    assert_eq!(stdout, "out\n");
}

#[test]
fn test_quiet_still_reports_status() {
    let ctx = empty_context();
    let options = ExecOptions::new().quiet(true).allow_fail(true);
    assert_eq!(
        execute(&ctx, &options, "sh", &["-c", "echo noise; echo err >&2; exit 4"]).unwrap(),
        4
    );
}

#[test]
fn test_simulate_skips_side_effects() {
    let dir = tempdir().unwrap();
    let marker = dir.path().join("marker");
    let ctx = empty_context();
    let options = ExecOptions::new().simulate(true);

    let script = format!("touch '{}'", marker.display());
    assert_eq!(execute(&ctx, &options, "sh", &["-c", script.as_str()]).unwrap(), 0);
    assert!(!marker.exists());
}

#[test]
fn test_registered_absolute_location() {
    let mut builder = Registry::builder();
    builder
        .target("sys.shell", "/bin/sh", TargetKind::Executable)
        .unwrap();
    let ctx = Context::from_registry(builder.build("/unused").unwrap()).with_namespace("sys");

    let options = ExecOptions::new().allow_fail(true);
    assert_eq!(execute(&ctx, &options, "shell", &["-c", "exit 7"]).unwrap(), 7);
}
