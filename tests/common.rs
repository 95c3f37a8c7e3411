//! tests/common.rs
//! Common constants and utilities shared across test files

#![allow(dead_code)] // each test binary uses a different subset

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use keybrute::{Oracle, Rejection};

/// Passphrase of every encrypted key under `tests/test_data/`.
pub const TEST_PASSWORD: &str = "test";

/// Wordlist containing [`TEST_PASSWORD`] exactly once.
pub const WORDS: &[&str] = &[
    "some", "stupid", "passwords", "for", "the", "key", "brute", "force", "test", "and",
    "this",
];

/// Wordlist without [`TEST_PASSWORD`].
pub const NO_MATCH_WORDS: &[&str] = &["nothing", "to", "see", "here"];

/// Encrypted fixtures and the PEM label each one carries.
pub const ENCRYPTED_FIXTURES: &[(&str, &str)] = &[
    ("rsa_aes128.pem", "RSA PRIVATE KEY"),
    ("rsa_des3.pem", "RSA PRIVATE KEY"),
    ("ec_aes256.pem", "EC PRIVATE KEY"),
    ("pkcs8_aes256_sha256.pem", "ENCRYPTED PRIVATE KEY"),
    ("pkcs8_aes128_sha1.pem", "ENCRYPTED PRIVATE KEY"),
];

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("test_data")
        .join(name)
}

pub fn read_fixture(name: &str) -> Vec<u8> {
    std::fs::read(fixture(name)).unwrap()
}

/// Newline-joined wordlist as an in-memory reader.
pub fn wordlist(words: &[&str]) -> Cursor<Vec<u8>> {
    Cursor::new(words.join("\n").into_bytes())
}

/// Accepts exactly `expected`.
pub fn accept(expected: &'static str) -> Arc<impl Oracle> {
    Arc::new(move |candidate: &[u8]| {
        if candidate == expected.as_bytes() {
            Ok(())
        } else {
            Err(Rejection::Candidate("wrong passphrase"))
        }
    })
}

/// Oracle that records the peak number of simultaneous invocations.
pub struct PeakOracle {
    pub running: AtomicUsize,
    pub peak: AtomicUsize,
    pub calls: AtomicUsize,
    pub hold: Duration,
}

impl PeakOracle {
    pub fn new(hold: Duration) -> Arc<Self> {
        Arc::new(Self {
            running: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
            hold,
        })
    }
}

impl Oracle for PeakOracle {
    fn attempt(&self, _candidate: &[u8]) -> Result<(), Rejection> {
        let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
        thread::sleep(self.hold);
        self.running.fetch_sub(1, Ordering::SeqCst);
        Err(Rejection::Candidate("never matches"))
    }
}
