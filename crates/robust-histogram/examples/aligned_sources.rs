//! Demonstrates binning two sources against shared Freedman-Diaconis bounds

use rand::prelude::*;
use rand_distr::Normal;
use robust_core::{Sample, SamplePool, SourceId};
use robust_histogram::{histogram, EmptyBinPolicy};

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let baseline = Normal::new(10.0, 2.0).unwrap();
    let shifted = Normal::new(14.0, 2.0).unwrap();

    let before = SourceId::new(0);
    let after = SourceId::new(1);

    let mut pool = SamplePool::with_capacity(2000);
    for _ in 0..1000 {
        pool.push(Sample::new(baseline.sample(&mut rng), before)).unwrap();
        pool.push(Sample::new(shifted.sample(&mut rng), after)).unwrap();
    }
    let pool = pool.sort();

    // Emit empty bins so both columns line up row by row
    let (stats, hist) = histogram(&pool, EmptyBinPolicy::Emit).unwrap();

    println!("=== Statistics ===");
    stats.write_report(&mut std::io::stdout()).unwrap();

    println!("\n=== Aligned bins ===");
    println!("{:>10} {:>8} {:>8}", "bound", "before", "after");
    for (a, b) in hist.rows(before).iter().zip(hist.rows(after)) {
        println!("{:>10.3} {:>8} {:>8}", a.lower, a.count, b.count);
    }
}
