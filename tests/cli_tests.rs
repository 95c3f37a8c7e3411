//! tests/cli_tests.rs
//! The `keybrute` binary: output and exit codes

#![cfg(feature = "cli")]

mod common;

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

use common::{fixture, NO_MATCH_WORDS, WORDS};
use tempfile::NamedTempFile;

fn wordlist_file(words: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", words.join("\n")).unwrap();
    file
}

fn keybrute(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_keybrute"))
        .args(args)
        .output()
        .unwrap()
}

fn run_with(words: &Path, key: &str, extra: &[&str]) -> Output {
    let key = fixture(key);
    let mut args = vec![
        "-l",
        words.to_str().unwrap(),
        "-k",
        key.to_str().unwrap(),
    ];
    args.extend_from_slice(extra);
    keybrute(&args)
}

#[test]
fn prints_passphrase_and_exits_zero() {
    let words = wordlist_file(WORDS);
    let out = run_with(words.path(), "rsa_aes128.pem", &["-c", "4"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(out.stdout, b"test\n");
}

#[test]
fn all_reports_every_match() {
    let words = wordlist_file(&["test", "nope", "test"]);
    let out = run_with(words.path(), "pkcs8_aes128_sha1.pem", &["--all"]);
    assert!(out.status.success());
    assert_eq!(out.stdout, b"test\ntest\n");
}

#[test]
fn no_match_exits_one() {
    let words = wordlist_file(NO_MATCH_WORDS);
    let out = run_with(words.path(), "rsa_des3.pem", &[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}

#[test]
fn unencrypted_key_exits_one() {
    let words = wordlist_file(WORDS);
    let out = run_with(words.path(), "rsa_plain.pem", &[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("not encrypted"));
}

#[test]
fn missing_files_exit_one() {
    let words = wordlist_file(WORDS);
    let out = run_with(words.path(), "does_not_exist.pem", &[]);
    assert_eq!(out.status.code(), Some(1));

    let key = fixture("rsa_aes128.pem");
    let out = keybrute(&["-l", "/nonexistent/words.txt", "-k", key.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn bad_arguments_exit_one() {
    assert_eq!(keybrute(&[]).status.code(), Some(1));
    assert_eq!(keybrute(&["-l", "words.txt"]).status.code(), Some(1));
    assert_eq!(
        keybrute(&["-l", "w", "-k", "k", "-c", "zero"]).status.code(),
        Some(1)
    );
}

#[test]
fn help_exits_zero() {
    let out = keybrute(&["--help"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("--wordlist"));
}
