//! tests/pem_tests.rs
//! Encrypted key fixtures: parsing, decryption, and search end to end

mod common;

use std::sync::Arc;

use common::{read_fixture, wordlist, ENCRYPTED_FIXTURES, NO_MATCH_WORDS, TEST_PASSWORD, WORDS};
use keybrute::{search, BruteError, CancelToken, EncryptedKey, KeyFormat, Oracle, Rejection};

fn load(name: &str) -> EncryptedKey {
    EncryptedKey::from_pem(&read_fixture(name))
        .unwrap_or_else(|e| panic!("{name} should parse: {e}"))
}

#[test]
fn fixtures_carry_expected_labels() {
    for &(name, label) in ENCRYPTED_FIXTURES {
        assert_eq!(load(name).label(), label, "{name}");
    }
}

#[test]
fn correct_passphrase_yields_expected_structure() {
    let expected = [
        ("rsa_aes128.pem", KeyFormat::Pkcs1),
        ("rsa_des3.pem", KeyFormat::Pkcs1),
        ("ec_aes256.pem", KeyFormat::Sec1),
        ("pkcs8_aes256_sha256.pem", KeyFormat::Pkcs8),
        ("pkcs8_aes128_sha1.pem", KeyFormat::Pkcs8),
    ];
    for (name, format) in expected {
        assert_eq!(load(name).decrypt(TEST_PASSWORD.as_bytes()), Ok(format), "{name}");
    }
}

#[test]
fn wrong_passphrases_are_rejected() {
    for &(name, _) in ENCRYPTED_FIXTURES {
        let key = load(name);
        for word in NO_MATCH_WORDS.iter().chain(&["", "Test", "test "]) {
            assert!(key.attempt(word.as_bytes()).is_err(), "{name} accepted {word:?}");
        }
    }
}

#[test]
fn schemes_are_described() {
    assert_eq!(load("rsa_des3.pem").scheme(), "legacy/DES-EDE3-CBC");
    assert_eq!(
        load("pkcs8_aes256_sha256.pem").scheme(),
        "PBES2/hmacWithSHA256/AES-256-CBC (1000 iterations)"
    );
    // No PRF field: PKCS#5 default.
    assert_eq!(
        load("pkcs8_aes128_sha1.pem").scheme(),
        "PBES2/hmacWithSHA1/AES-128-CBC (1000 iterations)"
    );
}

#[test]
fn valid_padding_but_no_key_is_a_structure_rejection() {
    let key = load("rsa_garbage_aes128.pem");
    assert!(matches!(
        key.attempt(TEST_PASSWORD.as_bytes()),
        Err(Rejection::Structure(_))
    ));
}

#[test]
fn plain_keys_are_refused() {
    for (name, label) in [
        ("rsa_plain.pem", "RSA PRIVATE KEY"),
        ("pkcs8_plain.pem", "PRIVATE KEY"),
    ] {
        match EncryptedKey::from_pem(&read_fixture(name)) {
            Err(BruteError::NotEncrypted { label: found }) => assert_eq!(found, label),
            other => panic!("{name}: expected NotEncrypted, got {other:?}"),
        }
    }
}

#[test]
fn non_pem_input_is_refused() {
    assert!(matches!(
        EncryptedKey::from_pem(b"not a key at all"),
        Err(BruteError::Pem(_))
    ));
}

#[test]
fn search_finds_passphrase_for_every_fixture() {
    for &(name, _) in ENCRYPTED_FIXTURES {
        let results = search(Arc::new(load(name)), wordlist(WORDS), 8, &CancelToken::new()).unwrap();
        let found: Vec<_> = results.map(|c| c.to_string_lossy()).collect();
        assert_eq!(found, vec![TEST_PASSWORD.to_string()], "{name}");
    }
}

#[test]
fn search_without_passphrase_finds_nothing() {
    let key = Arc::new(load("pkcs8_aes256_sha256.pem"));
    let results = search(key, wordlist(NO_MATCH_WORDS), 4, &CancelToken::new()).unwrap();
    assert_eq!(results.count(), 0);
}
