#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::{
    env, fs,
    io::Write,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

pub fn bwsweep_binary_path() -> PathBuf {
    env::var_os("CARGO_BIN_EXE_bwsweep")
        .map_or_else(|| PathBuf::from("target/debug/bwsweep"), PathBuf::from)
}

/// Write an executable stub agent script into `dir` and return its path
pub fn write_stub_script(dir: &Path, script: &str) -> PathBuf {
    let path = dir.join("bw");
    fs::write(&path, script).expect("failed to write stub agent");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("failed to chmod stub agent");
    path
}

/// Stub agent that records every invocation and replays canned behavior
///
/// The stub appends each argv line to `invocations.log` next to itself,
/// answers `--version` and `sync`, prints `items_json` for `list items` and
/// exits `delete_exit` for `delete item <id>`.
pub fn standard_stub(dir: &Path, items_json: &str, delete_exit: i32) -> PathBuf {
    let log = dir.join("invocations.log");
    let script = format!(
        r#"#!/bin/sh
echo "$@" >> "{log}"
case "$1" in
--version)
    echo "2025.2.0"
    ;;
sync)
    echo "Syncing complete."
    ;;
list)
    cat <<'PAYLOAD'
{items_json}
PAYLOAD
    ;;
delete)
    exit {delete_exit}
    ;;
esac
"#,
        log = log.display(),
    );

    write_stub_script(dir, &script)
}

/// Read the stub's invocation log, one argv line per entry
pub fn read_invocations(dir: &Path) -> Vec<String> {
    let log = dir.join("invocations.log");
    fs::read_to_string(&log)
        .unwrap_or_default()
        .lines()
        .map(ToString::to_string)
        .collect()
}

pub fn delete_invocations(dir: &Path) -> Vec<String> {
    read_invocations(dir)
        .into_iter()
        .filter(|line| line.starts_with("delete item"))
        .collect()
}

/// JSON payload with `n` items, ids id-0..id-n
pub fn items_payload(n: usize) -> String {
    let items: Vec<String> = (0..n)
        .map(|i| format!(r#"{{"id": "id-{i}", "name": "item-{i}", "type": 1}}"#))
        .collect();
    format!("[{}]", items.join(","))
}

/// Run the bwsweep binary against a stub agent, feeding `input` on stdin
pub fn run_bwsweep(stub: &Path, args: &[&str], input: &str) -> Output {
    let mut child = Command::new(bwsweep_binary_path())
        .arg("--bw-bin")
        .arg(stub)
        .args(args)
        .env_remove("BWSWEEP_SEARCH")
        .env_remove("BWSWEEP_BATCH")
        .env_remove("BWSWEEP_PERMANENT")
        .env_remove("BWSWEEP_BW_BIN")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn bwsweep");

    if let Some(mut stdin) = child.stdin.take() {
        let _ = stdin.write_all(input.as_bytes());
    }

    child
        .wait_with_output()
        .expect("failed to wait for bwsweep")
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
