use assert_cmd::Command;
use std::process::Output;

fn sample(name: &str) -> String {
    format!("{}/tests/files/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn run(args: &[&str], stdin: &str) -> Output {
    let mut command = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    command.args(args).env("NO_COLOR", "1").write_stdin(stdin);
    println!("{command:?}");
    command.output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
#[cfg(feature = "interpret")]
fn test_hello() {
    let output = run(&[&sample("hello.lx")], "");
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("Lexer: Lexical analyzer was successfully completed"));
    assert!(out.contains("x has value 2 (Int)"));
    assert!(out.contains("y has value 7 (Int)"));
    assert!(out.contains("f has value 3.5 (Float)"));
    assert!(out.contains("Interpreter: program has finished successfully"));
}

#[test]
#[cfg(feature = "interpret")]
fn test_input_from_stdin() {
    let output = run(&[&sample("input.lx")], "12\nfalse\n");
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("n has value 144 (Int)"));
    assert!(out.contains("ok has value false (Bool)"));
}

#[test]
#[cfg(feature = "interpret")]
fn test_runtime_error_exit_code() {
    let output = run(&[&sample("div_zero.lx")], "");
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("a has value 1 (Int)"));
    assert!(stderr(&output).contains("Runtime Error:\n\tdivision by zero"));
}

#[test]
fn test_postfix_check_only() {
    let output = run(&["--check", "--postfix", &sample("hello.lx")], "");
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("Postfix: x 2 = y x 3 * 1 + = f y 2.0 / = x print y print f print"));
    assert!(!out.contains("has value"));
}

#[test]
fn test_trace_flag() {
    let output = run(&["--check", "--trace", &sample("hello.lx")], "");
    assert!(stdout(&output).contains("ParseToken: in row 1 lexeme - 'program'|token - 'keyword'"));

    let output = run(&["--check", &sample("hello.lx")], "");
    assert!(!stdout(&output).contains("ParseToken"));
}

#[test]
fn test_unclosed_bracket() {
    let output = run(&[&sample("unclosed.lx")], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Parser Error:"));
    assert!(!stdout(&output).contains("has value"));
}

#[test]
fn test_duplicate_declaration() {
    let output = run(&[&sample("duplicate.lx")], "");
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Line 3"));
    assert!(err.contains("duplicate declaration of 'x'"));
}

#[test]
fn test_lexer_error() {
    let output = run(&[&sample("lexer_error.lx")], "");
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Lexer: in line 4"));
    assert!(err.contains("Lexer: Analysis failed with status 103"));
}

#[test]
fn test_missing_file() {
    let output = run(&[&sample("missing.lx")], "");
    assert_eq!(output.status.code(), Some(3));
}
