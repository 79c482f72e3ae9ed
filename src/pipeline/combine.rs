// ============================================================================
// Combine Pipeline
// Two random products computed in parallel, then added with zip
// ============================================================================

use super::constants::{big_reduced_fraction, TAG_COMBINE};
use super::report::Report;
use crate::config::Diagnostics;
use crate::deferred::Deferred;
use crate::numeric::{Fraction, FractionError};
use crate::scheduler::Schedulers;

/// A random reduced fraction of `bits` bits multiplied by the big reduced
/// fraction, computed on the parallel pool.
pub fn random_product(bits: u64) -> Deferred<Fraction> {
    Deferred::from_work(move || {
        let multiplier = big_reduced_fraction()?;
        let random = Fraction::random(&mut rand::thread_rng(), bits, true);
        Ok::<_, FractionError>(random.multiply(&multiplier))
    })
    .schedule_on(Schedulers::parallel())
}

/// Add two random products once both are available and print the sum.
pub fn fraction_combine(diagnostics: &Diagnostics, bits: u64) -> Deferred<()> {
    let report = Report::new("fraction_combine");
    let tracer = diagnostics.clone();
    let printer = diagnostics.clone();

    random_product(bits)
        .zip(&random_product(bits), move |a, b| {
            tracer.debug_tagged(TAG_COMBINE, "both products ready, adding");
            a.add(&b)
        })
        .on_success(move |sum| {
            report.append(format!("     combined result = {}\n", sum.to_mixed_string()));
            report.display(&printer);
        })
        .then()
}
