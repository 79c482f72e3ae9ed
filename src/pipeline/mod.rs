// ============================================================================
// Pipeline Module
// Demo drivers that push fractions through deferred pipelines
// ============================================================================
//
// Drivers:
// - fraction_reduction_async: reduce on "single", render, print
// - fraction_multiplication_blocking: multiply on "single", block for it
// - fraction_multiplication_async: multiply on "single", print from worker
// - fraction_combine: two random products on "parallel", zip with add
//
// Each driver returns a Deferred<()> that completes once its output has been
// printed. Nothing runs until the caller starts or blocks on it (except the
// blocking driver, which waits internally).

mod combine;
mod multiplication;
mod reduction;
mod report;

pub mod constants;

pub use combine::{fraction_combine, random_product};
pub use multiplication::{fraction_multiplication_async, fraction_multiplication_blocking};
pub use reduction::fraction_reduction_async;

use crate::config::Diagnostics;
use crate::deferred::TaskError;

/// Run every driver in turn, blocking on each.
pub fn run_all(diagnostics: &Diagnostics, random_bits: u64) -> Vec<(&'static str, Result<(), TaskError>)> {
    vec![
        (
            "fraction_reduction_async",
            fraction_reduction_async(diagnostics).block(),
        ),
        (
            "fraction_multiplication_blocking",
            fraction_multiplication_blocking(diagnostics).block(),
        ),
        (
            "fraction_multiplication_async",
            fraction_multiplication_async(diagnostics).block(),
        ),
        (
            "fraction_combine",
            fraction_combine(diagnostics, random_bits).block(),
        ),
    ]
}
