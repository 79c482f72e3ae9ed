// ============================================================================
// Basic Usage Example
// ============================================================================

use deferred_fractions::prelude::*;

fn main() {
    println!("=== Deferred Fractions Example ===\n");

    // Two independent values computed on the shared parallel pool
    let half = Schedulers::submit(&Schedulers::parallel(), || "1/2".parse::<Fraction>());
    let third = Schedulers::submit(&Schedulers::parallel(), || "1/3".parse::<Fraction>());

    // Combine once both are available; the sum is left unreduced
    let sum = half
        .zip(&third, |a, b| a.add(&b))
        .block_and_get();

    match sum {
        Some(sum) => {
            println!("1/2 + 1/3 = {}", sum);
            println!("mixed:      {}", sum.reduce().to_mixed_string());
        }
        None => println!("combine failed"),
    }

    // Reduction on the single worker, rendered as a mixed number
    let mixed = Deferred::from_work(|| "5000000000/3768296432".parse::<Fraction>())
        .schedule_on(Schedulers::single())
        .map(|f| f.reduce().to_mixed_string())
        .block_and_get();
    println!("\n5000000000/3768296432 = {}", mixed.unwrap_or_default());

    // Failures surface through block()
    let broken = Deferred::from_work(|| "1/0".parse::<Fraction>())
        .schedule_on(Schedulers::parallel());
    if let Err(error) = broken.block() {
        println!("\n1/0 failed: {}", error);
    }

    println!("\n=== Example Complete ===");
}
