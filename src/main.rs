// src/main.rs

mod cli;

use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info, warn, Level};

use cli::Cli;
use keybrute::{CancelToken, EncryptedKey, SearchBuilder, StopReason};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("keybrute: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Run the search; `Ok(true)` when at least one passphrase was printed.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let pem = fs::read(&cli.key)
        .with_context(|| format!("cannot read key file {}", cli.key.display()))?;
    let key = EncryptedKey::from_pem(&pem)
        .with_context(|| format!("cannot use key file {}", cli.key.display()))?;
    info!(label = key.label(), scheme = %key.scheme(), "key loaded");

    let wordlist = File::open(&cli.wordlist)
        .with_context(|| format!("cannot open wordlist {}", cli.wordlist.display()))?;

    let mut builder = SearchBuilder::new().with_concurrency(cli.concurrency.unwrap_or(0));
    if let Some(secs) = cli.timeout {
        builder = builder.with_timeout(Duration::from_secs(secs));
    }

    let cancel = CancelToken::new();
    let results = builder
        .start(Arc::new(key), BufReader::new(wordlist), &cancel)
        .context("cannot start search")?;

    let mut stdout = io::stdout().lock();
    let mut found = 0u64;
    while let Some(candidate) = results.recv() {
        stdout.write_all(candidate.as_bytes())?;
        stdout.write_all(b"\n")?;
        stdout.flush()?;
        found += 1;
        if !cli.all {
            results.cancel();
            break;
        }
    }

    match results.finish() {
        Ok(report) => {
            debug!(read = report.read, admitted = report.admitted, found, "done");
            if found == 0 {
                match report.stop {
                    StopReason::Exhausted => eprintln!("keybrute: no passphrase found"),
                    StopReason::Cancelled => eprintln!("keybrute: timed out, no passphrase found"),
                }
            }
        }
        Err(e) if found > 0 => warn!(error = %e, "search ended with an error"),
        Err(e) => {
            return Err(e).with_context(|| format!("search over {} failed", cli.wordlist.display()))
        }
    }

    Ok(found > 0)
}
