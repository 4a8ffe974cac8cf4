use assert_cmd::Command;
use std::path::PathBuf;

fn source(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("files")
        .join(name)
}

fn run(args: &[&str], file: &str) -> std::process::Output {
    let mut command = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    command.args(args).arg(source(file));
    println!("{command:?}");

    let output = command.output().unwrap();
    println!(
        "STDOUT: {:?}, STDERR: {:?}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

#[test]
fn test_arithmetic_report() {
    let output = run(&[], "arithmetic.cm");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "Parsing completed successfully!\n\
         x : int = 11\n\
         a : int[3] = [0, 5, 10]\n\
         f : float = 3.0\n"
    );
}

#[test]
fn test_control_flow_single_pass() {
    let output = run(&[], "control_flow.cm");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("i : int = 1\n"));
    assert!(stdout.contains("big : int = 0\n"));
}

#[test]
fn test_type_mismatch_is_fatal() {
    let output = run(&[], "type_mismatch.cm");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.lines().count(), 1);
    assert!(stderr.contains("type mismatch at line 4"));
    assert!(stderr.contains("assignment to `x`"));
}

#[test]
fn test_division_by_zero_is_fatal() {
    let output = run(&[], "div_zero.cm");
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("division by zero at line 3"));
    assert!(stderr.contains("(at \"/\")"));
}

#[test]
fn test_syntax_error_is_fatal() {
    let output = run(&[], "missing_dot.cm");
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("syntax error"));
    assert!(stderr.contains("expected `.`, found <eof>"));
}

#[test]
fn test_token_dump() {
    let output = run(&["--tokens"], "div_zero.cm");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 13);
    assert!(stdout.lines().next().unwrap().contains("`Program`"));
}

#[test]
fn test_debug_trace() {
    let output = run(&["--debug"], "arithmetic.cm");
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("4 * 2 => 8"));
    assert!(stderr.contains("x = 11"));
}

#[test]
fn test_assignments_with_semicolons() {
    let output = run(&[], "semicolons.cm");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("a : int[3] = [0, 5, 10]\n"));
}

#[test]
fn test_oversized_array_is_rejected() {
    let output = run(&[], "huge_array.cm");
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.lines().count(), 1);
    assert!(stderr.contains("invalid array size at line 2"));
}
