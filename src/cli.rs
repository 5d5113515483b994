//! This module defines the command line interface (CLI) of the demo binary.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Backend {
    /// Unbounded cache, at most one computation per key
    Concurrent,
    /// `cached::SizedCache` behind a lock, least recently used keys are evicted
    Sized,
    /// `cached::UnboundCache` behind a lock
    Unbound,
}

#[derive(Parser, Debug)]
#[command(version, about = "Runs a parallel workload through a memoized function", long_about = None)]
pub struct Args {
    #[arg(
        short = 'b',
        long = "backend",
        value_enum,
        default_value = "concurrent",
        help = "The cache backing the memoizer"
    )]
    pub backend: Backend,

    #[arg(
        long,
        default_value_t = 64,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Capacity of the sized backend"
    )]
    pub capacity: u64,

    #[arg(
        short = 'n',
        long,
        default_value_t = 100_000,
        help = "Number of memoized calls"
    )]
    pub calls: u64,

    #[arg(
        short = 'd',
        long,
        default_value_t = 128,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Number of distinct keys the calls cycle through"
    )]
    pub distinct: u64,

    #[arg(
        short = 'j',
        long,
        default_value_t = 0,
        help = "Worker threads; 0 uses one per core"
    )]
    pub threads: usize,

    #[arg(
        short = 'w',
        long,
        default_value_t = 20_000,
        help = "Cost of one computation: primes are counted up to WORK + key"
    )]
    pub work: u64,

    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase verbosity level"
    )]
    pub verbosity: u8,

    #[arg(
        long,
        short = 'l',
        value_name = "LOG_FILE",
        help = "Optional path to the log file. Defaults to stderr if not specified."
    )]
    pub log_output: Option<PathBuf>,
}
