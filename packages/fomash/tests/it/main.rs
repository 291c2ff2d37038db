//! Integration tests for the fomash binary.
//!
//! These tests run the built binary against `tests/fixtures/fake-rewriter`, a
//! shell script standing in for gofmt, and check:
//! - the exact arguments each invocation receives
//! - when the run stops, carries on, or fails
//! - what ends up on stdout and stderr

#![cfg(unix)]

mod cli;
mod show;

use std::fs;
use std::os::unix::fs::PermissionsExt as _;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use xshell::{Shell, cmd};

/// Result of a single fomash run.
#[derive(Debug)]
pub struct Run {
    pub exit_code: i32,
    pub stdout: String,
    pub raw_stdout: Vec<u8>,
    pub stderr: String,

    /// Arguments of every rewriter invocation, in order, space separated.
    pub calls: Vec<String>,
}

/// Path to the fake rewriter, made executable if a checkout lost the bit.
pub fn fake_rewriter() -> PathBuf {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fake-rewriter");
    let mut permissions = fs::metadata(&path)
        .expect("fake rewriter exists")
        .permissions();
    if permissions.mode() & 0o111 != 0o111 {
        permissions.set_mode(0o755);
        fs::set_permissions(&path, permissions).expect("make fake rewriter executable");
    }
    path
}

/// Run fomash with the fake rewriter and the given arguments.
pub fn run_fomash(args: &[&str]) -> Run {
    run_fomash_with_env(args, &[])
}

/// Run fomash with the fake rewriter, extra environment, and arguments.
pub fn run_fomash_with_env(args: &[&str], env: &[(&str, &str)]) -> Run {
    run_fomash_from(None, args, env)
}

/// Run fomash with the fake rewriter from inside `dir`.
pub fn run_fomash_in(dir: &Path, args: &[&str]) -> Run {
    run_fomash_from(Some(dir), args, &[])
}

fn run_fomash_from(dir: Option<&Path>, args: &[&str], env: &[(&str, &str)]) -> Run {
    let sh = Shell::new().expect("create shell");
    if let Some(dir) = dir {
        sh.change_dir(dir);
    }
    let scratch = TempDir::new().expect("create temp dir");
    let log = scratch.path().join("calls.log");

    let bin = env!("CARGO_BIN_EXE_fomash");
    let fake = fake_rewriter();

    let mut command = cmd!(sh, "{bin} --binary {fake} {args...}")
        .env("FAKE_REWRITER_LOG", &log)
        .env_remove("FAKE_REWRITER_SYNTAX_DIFF")
        .env_remove("COLUMNS")
        .ignore_status()
        .quiet();
    for (key, value) in env {
        command = command.env(key, value);
    }

    let output = command.output().expect("failed to run fomash");
    let calls = fs::read_to_string(&log)
        .map(|log| log.lines().map(String::from).collect())
        .unwrap_or_default();

    Run {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        raw_stdout: output.stdout.clone(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        calls,
    }
}

/// Run fomash without the fake rewriter, for commands that never invoke it.
pub fn run_plain(args: &[&str]) -> Run {
    let sh = Shell::new().expect("create shell");
    let bin = env!("CARGO_BIN_EXE_fomash");
    let output = cmd!(sh, "{bin} {args...}")
        .ignore_status()
        .quiet()
        .output()
        .expect("failed to run fomash");

    Run {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        raw_stdout: output.stdout.clone(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        calls: vec![],
    }
}

/// Create `files` (relative paths) under a fresh directory.
pub fn tree(files: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    for file in files {
        let path = dir.path().join(file);
        fs::create_dir_all(path.parent().expect("file has parent")).expect("create parent");
        fs::write(&path, "package x\n").expect("write file");
    }
    dir
}
