// Load, lookup and delete measurement for Rbtree instances:
// * Initial load of N shuffled keys, N defaults to 1M.
// * Get operation on all N keys.
// * Delete operation on half of the keys.
// * Validate the remaining tree and log its depth statistics.
//
// Usage: rbtree-index [N]

use std::{
    env, process,
    time::{Instant, SystemTime, UNIX_EPOCH},
};

use log::{error, info};
use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use rbtree_index::Rbtree;

fn main() {
    let res = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
    if let Err(err) = res {
        eprintln!("logger: {}", err);
    }

    let n: u64 = match env::args().nth(1).map(|arg| arg.parse()) {
        None => 1_000_000,
        Some(Ok(n)) => n,
        Some(Err(err)) => {
            error!("invalid entry count: {}", err);
            process::exit(2);
        }
    };

    let seed = make_seed();
    info!("seed {}", seed);
    let mut rng = SmallRng::from_seed(seed.to_le_bytes());
    let mut keys: Vec<u64> = (0..n).collect();
    keys.shuffle(&mut rng);

    let mut index: Rbtree<u64, u64> = Rbtree::new("perf");
    let start = Instant::now();
    for key in keys.iter() {
        index.insert_entry(*key, key * 10);
    }
    info!("load {} entries took {:?}", index.len(), start.elapsed());

    keys.shuffle(&mut rng);
    let start = Instant::now();
    for key in keys.iter() {
        if let Err(err) = index.get(key) {
            error!("get {}: {}", key, err);
            process::exit(1);
        }
    }
    info!("get {} entries took {:?}", keys.len(), start.elapsed());

    let start = Instant::now();
    for key in keys.iter().take(keys.len() / 2) {
        if let Err(err) = index.remove(key) {
            error!("remove {}: {}", key, err);
            process::exit(1);
        }
    }
    info!("remove {} entries took {:?}", keys.len() / 2, start.elapsed());

    match index.validate() {
        Ok(stats) => {
            info!("entries {} blacks {:?}", stats.entries(), stats.blacks());
            if let Some(depths) = stats.depths() {
                depths.pretty_print("  ");
                info!("{}", depths.json());
            }
        }
        Err(err) => {
            error!("validate: {}", err);
            process::exit(1);
        }
    }
}

fn make_seed() -> u128 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_nanos(),
        Err(_) => 0,
    }
}
