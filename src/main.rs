use cached::{SizedCache, UnboundCache};
use clap::Parser;
use log::info;
use memoization::{Cache, ConcurrentCache, LockedCache, MemoizedFunction};
use rayon::prelude::*;
use std::fmt;
use std::process;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

mod cli;
mod logging;

struct Report {
    backend: cli::Backend,
    calls: u64,
    distinct: u64,
    invocations: usize,
    entries: usize,
    store_lookups: Option<(u64, u64)>,
    elapsed: Duration,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "backend:      {:?}", self.backend)?;
        writeln!(f, "calls:        {}", self.calls)?;
        writeln!(f, "distinct:     {}", self.distinct)?;
        writeln!(f, "invocations:  {}", self.invocations)?;
        writeln!(f, "entries:      {}", self.entries)?;
        if let Some((hits, misses)) = self.store_lookups {
            writeln!(f, "store hits:   {}", hits)?;
            writeln!(f, "store misses: {}", misses)?;
        }
        write!(f, "elapsed:      {:.2?}", self.elapsed)
    }
}

fn is_prime(n: u64) -> bool {
    n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

fn count_primes(limit: u64) -> usize {
    (2..=limit).filter(|&n| is_prime(n)).count()
}

/// Runs the workload through `cache` and returns the number of computations
/// and the number of entries left in the cache.
fn run<C>(cache: Arc<C>, args: &cli::Args) -> (usize, usize)
where
    C: Cache<u64, usize> + 'static,
{
    let invocations = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&invocations);
    let work = args.work;
    let primes = MemoizedFunction::with_cache(Arc::clone(&cache), move |key: u64| {
        counter.fetch_add(1, Ordering::Relaxed);
        count_primes(work + key)
    });

    let distinct = args.distinct;
    (0..args.calls).into_par_iter().for_each(|i| {
        primes.apply(i % distinct);
    });

    (invocations.load(Ordering::SeqCst), cache.len())
}

fn main() {
    // parse CLI arguments
    let args = cli::Args::parse();

    // set up logging
    logging::setup_logger(args.verbosity, args.log_output.clone());

    let pool = match rayon::ThreadPoolBuilder::new().num_threads(args.threads).build() {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Could not start the thread pool: {}", e);
            process::exit(1);
        }
    };
    info!(
        "running {} calls over {} keys on {} threads with the {:?} backend",
        args.calls,
        args.distinct,
        pool.current_num_threads(),
        args.backend
    );

    let started = Instant::now();
    let (invocations, entries, store_lookups) = pool.install(|| match args.backend {
        cli::Backend::Concurrent => {
            let (invocations, entries) = run(Arc::new(ConcurrentCache::new()), &args);
            (invocations, entries, None)
        }
        cli::Backend::Sized => {
            let capacity = usize::try_from(args.capacity).unwrap_or(usize::MAX);
            let cache = Arc::new(LockedCache::new(SizedCache::with_size(capacity)));
            let (invocations, entries) = run(Arc::clone(&cache), &args);
            (invocations, entries, Some((cache.hits(), cache.misses())))
        }
        cli::Backend::Unbound => {
            let cache = Arc::new(LockedCache::new(UnboundCache::new()));
            let (invocations, entries) = run(Arc::clone(&cache), &args);
            (invocations, entries, Some((cache.hits(), cache.misses())))
        }
    });

    let report = Report {
        backend: args.backend,
        calls: args.calls,
        distinct: args.distinct,
        invocations,
        entries,
        store_lookups,
        elapsed: started.elapsed(),
    };
    println!("{}", report);
}
