// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Command line front end.
//!
//! ```text
//! collide [OPTIONS] [search]          print collisions with a reference string
//! collide [OPTIONS] plist             print a property list of colliding keys
//! collide [OPTIONS] stress            time hash table insertions of colliding keys
//! ```
//!
//! Diagnostics go to stderr through `env_logger` (`RUST_LOG`, default `info`);
//! results go to stdout.

use std::io::{self, BufWriter, Write};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use rolling_collide::config::{SearchConfig, Strategy};
use rolling_collide::drivers::{multicollisions, plist, stress};
use rolling_collide::model::constants::{
    DEFAULT_ALPHABET, DEFAULT_BLOCK_LEN, DEFAULT_REFERENCE_ALPHABET, DEFAULT_ROWS,
};
use rolling_collide::model::Alphabet;
use rolling_collide::reference::Reference;
use rolling_collide::session;

#[derive(Debug, Parser)]
#[command(
    name = "collide",
    version,
    about = "Find strings colliding under the base-257 rolling string hash"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    search: SearchArgs,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every collision found (the default)
    Search,
    /// Write an XML property list whose keys all share one hash
    Plist(KeyArgs),
    /// Compare insertion time of colliding and ordinary keys
    Stress(KeyArgs),
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Search strategy
    #[arg(long, value_enum, default_value_t = Strategy::MeetInMiddle, global = true)]
    strategy: Strategy,

    /// Characters collisions are built from
    #[arg(long, default_value = DEFAULT_ALPHABET, global = true)]
    alphabet: String,

    /// Characters the random reference string is drawn from
    #[arg(long, default_value = DEFAULT_REFERENCE_ALPHABET, global = true)]
    reference_alphabet: String,

    /// Block length; strings are four blocks long
    #[arg(long, default_value_t = DEFAULT_BLOCK_LEN, global = true)]
    block_len: usize,

    /// Coefficient rows used by the bounded strategy
    #[arg(long, default_value_t = DEFAULT_ROWS, global = true)]
    rows: usize,

    /// Use this reference string instead of a random one
    #[arg(long, global = true)]
    reference: Option<String>,

    /// Seed for the random reference string
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Stop after this many collisions
    #[arg(long, global = true)]
    limit: Option<usize>,

    /// Worker threads; 0 searches sequentially
    #[arg(long, default_value_t = 0, global = true)]
    threads: usize,
}

impl SearchArgs {
    fn config(&self) -> Result<SearchConfig> {
        let alphabet: Alphabet = self.alphabet.parse().context("invalid --alphabet")?;
        let reference_alphabet: Alphabet = self
            .reference_alphabet
            .parse()
            .context("invalid --reference-alphabet")?;
        let mut config = SearchConfig::new(alphabet, self.block_len)?
            .with_strategy(self.strategy)
            .with_reference_alphabet(reference_alphabet)
            .with_rows(self.rows)?
            .with_seed(self.seed)
            .with_limit(self.limit)
            .with_threads(self.threads);
        if let Some(reference) = &self.reference {
            config = config
                .with_reference(reference.as_bytes())
                .context("invalid --reference")?;
        }
        Ok(config)
    }
}

#[derive(Debug, Args)]
struct KeyArgs {
    /// Number of keys to produce
    #[arg(long, default_value_t = 1000)]
    count: usize,

    /// Collisions concatenated into each key
    #[arg(long, default_value_t = 10)]
    width: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let config = cli.search.config()?;

    match cli.command.unwrap_or(Command::Search) {
        Command::Search => search(&config),
        Command::Plist(args) => write_plist(&config, &args),
        Command::Stress(args) => run_stress(&config, &args),
    }
}

fn search(config: &SearchConfig) -> Result<()> {
    let reference = config.reference();
    println!("Collide: {}", reference);
    println!();

    let mut alternates = 0;
    let report = session::run(config, &reference, |collision| {
        println!("{}", collision);
        if collision.text() != reference.text() {
            alternates += 1;
        }
    })
    .context("search aborted")?;

    if alternates == 0 {
        println!("no collision found in this run");
    }
    info!("{} strings found, {} differ from the reference", report.found, alternates);
    Ok(())
}

/// The reference plus every distinct collision found with it.
fn colliding_strings(config: &SearchConfig) -> Result<Vec<Vec<u8>>> {
    let reference: Reference = config.reference();
    info!("Collecting collisions with {}", reference);
    let mut strings = vec![reference.text().to_vec()];
    session::run(config, &reference, |collision| {
        if !strings.iter().any(|s| s.as_slice() == collision.text()) {
            strings.push(collision.text().to_vec());
        }
    })
    .context("search aborted")?;
    if strings.len() < 2 {
        bail!("no collision found in this run");
    }
    Ok(strings)
}

fn write_plist(config: &SearchConfig, args: &KeyArgs) -> Result<()> {
    let strings = colliding_strings(config)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let written = plist::write_plist(&mut out, multicollisions(&strings, args.width).take(args.count))
        .context("writing property list")?;
    out.flush().context("writing property list")?;
    info!("Wrote {} colliding keys", written);
    Ok(())
}

fn run_stress(config: &SearchConfig, args: &KeyArgs) -> Result<()> {
    let strings = colliding_strings(config)?;
    let key_len = args.width * strings[0].len();

    println!("Start fast iteration");
    let fast = stress::measure(stress::distinct_keys(args.count, key_len));
    println!("Finished fast iteration: {} keys in {:?}", fast.inserted, fast.elapsed);

    println!("Start slow iteration");
    let slow = stress::measure(multicollisions(&strings, args.width).take(args.count));
    println!("Finished slow iteration: {} keys in {:?}", slow.inserted, slow.elapsed);
    Ok(())
}
