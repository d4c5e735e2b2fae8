use foldkit::fold::{Layout, MergeOrder, Parallel, ParallelConfig, Partitioned, Sequential};
use foldkit::gen_sequences::gen_words;
use foldkit::utils::{TimingRuns, type_of};
use foldkit::{FoldError, Longest, LongestReducer, Strategy};

use clap::Parser;
use mem_dbg::*;

const DEFAULT_N_RUNS: usize = 5;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of random words.
    #[arg(short, long)]
    n: usize,
    /// Maximum word length.
    #[arg(short, long, default_value_t = 16)]
    max_len: usize,
    /// Worker threads for the parallel driver (0 = one per CPU).
    #[arg(short, long, default_value_t = 0)]
    threads: usize,
    /// Partitions for the partitioned driver.
    #[arg(short, long, default_value_t = 8)]
    partitions: usize,
    #[arg(short, long, default_value_t = DEFAULT_N_RUNS)]
    runs: usize,
}

fn bench<S: Strategy>(driver: &S, words: &[String], n_runs: usize) -> Result<(), FoldError> {
    let reducer = LongestReducer::new();
    let mut t = TimingRuns::new(n_runs, words.len());
    let mut found = 0;

    for _ in 0..n_runs {
        t.start();
        let out = driver.fold(&reducer, words.iter().map(String::as_str))?;
        t.stop();
        found = out.len();
    }

    if let Some((t_min, t_max, t_avg)) = t.per_item() {
        println!(
            "LONGEST: [driver: {}, n: {}, min_time (ns): {:.2}, max_time (ns): {:.2}, avg_time (ns): {:.2}, found: {}, num_runs: {}]",
            type_of(driver),
            words.len(),
            t_min,
            t_max,
            t_avg,
            found,
            n_runs
        );
    }
    Ok(())
}

fn main() -> Result<(), FoldError> {
    let args = Args::parse();

    let words = gen_words(args.n, args.max_len);
    println!("n = {}, max_len = {}", args.n, args.max_len);

    bench(&Sequential, &words, args.runs)?;
    for order in [MergeOrder::LeftToRight, MergeOrder::Tree] {
        for layout in [Layout::Contiguous, Layout::Interleaved] {
            let driver = Partitioned::new(args.partitions, layout).merge_order(order);
            println!("partitioned: {layout:?}, {order:?}");
            bench(&driver, &words, args.runs)?;
        }
    }
    let parallel = Parallel::new(ParallelConfig::default().with_threads(args.threads))?;
    println!("parallel: {} threads", parallel.threads());
    bench(&parallel, &words, args.runs)?;

    println!();
    let longest: Longest<&str> = words.iter().map(String::as_str).collect();
    let _ = longest.mem_dbg(DbgFlags::empty());

    Ok(())
}
