use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::tempdir;

fn bin() -> String {
    env!("CARGO_BIN_EXE_zlc").to_string()
}

fn sample() -> Vec<u8> {
    (0..20_000u32).map(|i| (i * 31 % 97) as u8).collect()
}

/// Run zlc with `stdin` piped in and capture everything.
fn run_piped(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(bin())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(stdin).unwrap();
    child.wait_with_output().unwrap()
}

fn compress_file(input: &Path, output: &Path) {
    let st = Command::new(bin())
        .arg(input)
        .arg(output)
        .status()
        .unwrap();
    assert!(st.success());
}

#[test]
fn cli_file_roundtrip() {
    let dir = tempdir().unwrap();
    let raw = dir.path().join("raw.bin");
    let packed = dir.path().join("raw.bin.z");
    let restored = dir.path().join("restored.bin");
    std::fs::write(&raw, sample()).unwrap();

    compress_file(&raw, &packed);
    assert_eq!(&std::fs::read(&packed).unwrap()[..1], &[0x78]);

    let st = Command::new(bin())
        .arg("-d")
        .arg(&packed)
        .arg(&restored)
        .status()
        .unwrap();
    assert!(st.success());
    assert_eq!(std::fs::read(&restored).unwrap(), sample());
}

#[test]
fn cli_stdin_stdout_roundtrip() {
    let packed = run_piped(&["-l", "9"], &sample());
    assert!(packed.status.success());
    assert!(packed.stdout.len() < sample().len());

    let restored = run_piped(&["--decompress", "-", "-"], &packed.stdout);
    assert!(restored.status.success());
    assert_eq!(restored.stdout, sample());
}

#[test]
fn cli_empty_input_roundtrip() {
    let packed = run_piped(&[], b"");
    assert!(packed.status.success());
    assert!(!packed.stdout.is_empty());

    let restored = run_piped(&["-d"], &packed.stdout);
    assert!(restored.status.success());
    assert!(restored.stdout.is_empty());
}

#[test]
fn cli_refuses_to_overwrite() {
    let dir = tempdir().unwrap();
    let raw = dir.path().join("raw.bin");
    let packed = dir.path().join("raw.bin.z");
    std::fs::write(&raw, sample()).unwrap();
    compress_file(&raw, &packed);

    // Compress onto an existing file.
    let existing = dir.path().join("existing");
    std::fs::write(&existing, b"keep me").unwrap();
    let out = Command::new(bin())
        .arg(&raw)
        .arg(&existing)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).starts_with("zlc: "));
    assert_eq!(std::fs::read(&existing).unwrap(), b"keep me");

    // Decompress onto an existing file.
    let out = Command::new(bin())
        .arg("-d")
        .arg(&packed)
        .arg(&existing)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("use -f to overwrite"));
    assert_eq!(std::fs::read(&existing).unwrap(), b"keep me");
}

#[test]
fn cli_force_overwrites() {
    let dir = tempdir().unwrap();
    let raw = dir.path().join("raw.bin");
    let packed = dir.path().join("raw.bin.z");
    std::fs::write(&raw, sample()).unwrap();
    compress_file(&raw, &packed);

    let existing = dir.path().join("existing");
    std::fs::write(&existing, vec![0xAA; 100_000]).unwrap();
    let st = Command::new(bin())
        .args(["--force", "-d"])
        .arg(&packed)
        .arg(&existing)
        .status()
        .unwrap();
    assert!(st.success());
    assert_eq!(std::fs::read(&existing).unwrap(), sample());
}

#[test]
fn cli_discard_sink() {
    let dir = tempdir().unwrap();
    let raw = dir.path().join("raw.bin");
    let packed = dir.path().join("raw.bin.z");
    std::fs::write(&raw, sample()).unwrap();
    compress_file(&raw, &packed);
    let before: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();

    let st = Command::new(bin())
        .current_dir(dir.path())
        .arg("-d")
        .arg(&packed)
        .arg("∅")
        .status()
        .unwrap();
    assert!(st.success());

    let out = Command::new(bin())
        .current_dir(dir.path())
        .args(["-d", "--test"])
        .arg(&packed)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(out.stdout.is_empty());

    let after: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(before.len(), after.len());
    assert!(!dir.path().join("∅").exists());
}

#[test]
fn cli_malformed_input() {
    let out = run_piped(&["-d"], b"hi");
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("zlc: failed creating decompress reader"), "{stderr}");
}

#[test]
fn cli_truncated_input() {
    let packed = run_piped(&[], &sample());
    let truncated = &packed.stdout[..packed.stdout.len() / 2];
    let out = run_piped(&["-d", "-", "∅"], truncated);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).starts_with("zlc: decompress:"));
}

#[test]
fn cli_missing_input_file() {
    let dir = tempdir().unwrap();
    let out = Command::new(bin())
        .arg(dir.path().join("absent"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("open input"));
}

#[test]
fn cli_usage_error_before_io() {
    let dir = tempdir().unwrap();
    let raw = dir.path().join("raw.bin");
    let target = dir.path().join("never.z");
    std::fs::write(&raw, sample()).unwrap();

    let out = Command::new(bin())
        .args(["--level", "42"])
        .arg(&raw)
        .arg(&target)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("zlc: "), "{stderr}");
    assert!(!stderr.starts_with("zlc: error:"), "{stderr}");
    assert_eq!(stderr.lines().count(), 1, "{stderr}");
    assert!(!target.exists());

    let out = Command::new(bin())
        .arg(&raw)
        .arg(&target)
        .arg("extra")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
    assert!(!target.exists());
}

#[test]
fn cli_help_precedence() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("never.z");
    let out = Command::new(bin())
        .args(["--bogus", "--level", "99", "--help"])
        .arg(&target)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Usage"));
    assert!(stdout.contains('∅'));
    assert!(!target.exists());
}

#[test]
fn cli_version() {
    let out = Command::new(bin()).arg("--version").output().unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains(env!("CARGO_PKG_VERSION")));
}
