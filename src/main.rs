// Load generator for the tree flavours. Measure:
// * Initial load of N random keys, duplicates included.
// * Delete of a random subset, missing keys included.
// * Validate the tree afterwards and report its shape.
//
// For each phase log the elapsed time and throughput, then dump the
// leaf-depth statistics for plotting.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use clap::{Parser, ValueEnum};
use log::{debug, info};
use rand::{rngs::SmallRng, Rng, SeedableRng};

use balanced_bst::{AvlTree, Error, OrderedTree, RedBlackTree, SearchTree};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Flavour {
    Ordered,
    Avl,
    Rb,
}

#[derive(Debug, Parser)]
#[command(name = "bstload")]
#[command(about = "Load, delete and validate a binary search tree.", long_about = None)]
struct Opt {
    /// Tree flavour to exercise.
    #[arg(long, value_enum, default_value = "rb")]
    tree: Flavour,

    /// Number of random keys to insert.
    #[arg(long, default_value_t = 1_000_000)]
    load: usize,

    /// Number of random deletes after the load.
    #[arg(long, default_value_t = 100_000)]
    deletes: usize,

    /// Seed for the random generator, defaults to the wall clock.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Error> {
    pretty_env_logger::init();

    let opt = Opt::parse();
    let seed = match opt.seed {
        Some(seed) => seed,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default(),
    };
    info!("bstload {:?} seed {}", opt.tree, seed);

    let mut rng = SmallRng::seed_from_u64(seed);
    match opt.tree {
        Flavour::Ordered => run(OrderedTree::new(), &opt, &mut rng),
        Flavour::Avl => run(AvlTree::new(), &opt, &mut rng),
        Flavour::Rb => run(RedBlackTree::new(), &opt, &mut rng),
    }
}

fn run<B>(mut tree: B, opt: &Opt, rng: &mut SmallRng) -> Result<(), Error>
where
    B: SearchTree<i64>,
{
    // key space as wide as the load, collisions give duplicates.
    let span = (opt.load as i64).max(1);

    let start = Instant::now();
    for _ in 0..opt.load {
        tree.insert(rng.gen_range(0..span))?;
    }
    report("load", opt.load, start);

    let (start, mut hits) = (Instant::now(), 0);
    for _ in 0..opt.deletes {
        if tree.delete(&rng.gen_range(0..span)).is_some() {
            hits += 1;
        }
    }
    report("delete", opt.deletes, start);
    debug!("deleted {} of {} attempts", hits, opt.deletes);

    let start = Instant::now();
    let stats = tree.validate()?;
    report("validate", tree.len(), start);

    info!(
        "entries {} node-size {} height {}",
        stats.entries(),
        stats.node_size(),
        tree.depth()
    );
    if let Some(blacks) = stats.blacks() {
        info!("blacks {}", blacks);
    }
    if let Some(depths) = stats.depths() {
        depths.pretty_print("");
        println!("{}", depths.json());
    }
    Ok(())
}

fn report(phase: &str, ops: usize, start: Instant) {
    let elapsed = start.elapsed();
    let rate = match elapsed.as_secs_f64() {
        secs if secs > 0.0 => (ops as f64 / secs) as u64,
        _ => 0,
    };
    info!("{} {} ops in {:?}, {} ops/sec", phase, ops, elapsed, rate);
}
