//! src/cli.rs
//! Command line arguments for the `keybrute` binary

use std::path::PathBuf;

use clap::Parser;

/// Recover the passphrase of an encrypted PEM private key from a wordlist.
#[derive(Parser, Debug, Clone)]
#[command(name = "keybrute", author, version, about, long_about = None)]
pub struct Cli {
    /// Wordlist, one candidate passphrase per line
    #[arg(short = 'l', long = "wordlist", value_name = "PATH")]
    pub wordlist: PathBuf,

    /// Encrypted PEM private key
    #[arg(short = 'k', long = "key", value_name = "PATH")]
    pub key: PathBuf,

    /// Maximum simultaneous decryption attempts (default: number of cores)
    #[arg(short = 'c', long = "concurrency", value_name = "N", value_parser = parse_concurrency)]
    pub concurrency: Option<usize>,

    /// Log every attempt to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Give up after this many seconds
    #[arg(short = 't', long = "timeout", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Report every matching passphrase instead of stopping at the first
    #[arg(short = 'a', long = "all")]
    pub all: bool,
}

fn parse_concurrency(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("concurrency must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("invalid concurrency '{value}': {e}")),
    }
}
