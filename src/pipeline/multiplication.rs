// ============================================================================
// Multiplication Pipelines
// Multiply two fractions on the single worker, blocking and non-blocking
// ============================================================================

use super::constants::{FACTOR_1, FACTOR_2, TAG_MULTIPLY};
use super::report::Report;
use crate::config::Diagnostics;
use crate::deferred::Deferred;
use crate::numeric::{Fraction, FractionError};
use crate::scheduler::Schedulers;

fn multiply_factors(diagnostics: Diagnostics) -> impl FnOnce() -> Result<Fraction, FractionError> {
    move || {
        let a = FACTOR_1.parse::<Fraction>()?;
        let b = FACTOR_2.parse::<Fraction>()?;
        let product = a.multiply(&b);
        diagnostics.debug_tagged(TAG_MULTIPLY, format!("{} * {} = {}", a, b, product));
        Ok(product)
    }
}

/// Multiply in the background, then block the calling thread for the result.
///
/// A failed multiplication prints "error" instead of the product. Returns an
/// already completed value.
pub fn fraction_multiplication_blocking(diagnostics: &Diagnostics) -> Deferred<()> {
    let report = Report::new("fraction_multiplication_blocking");

    let product = Deferred::from_work(multiply_factors(diagnostics.clone()))
        .schedule_on(Schedulers::single())
        .block_and_get();

    report.append(format!(
        "     product = {}\n",
        product
            .map(|f| f.reduce().to_mixed_string())
            .unwrap_or_else(|| "error".to_string())
    ));
    report.display(diagnostics);

    Deferred::fulfilled(())
}

/// Multiply in the background and print the result from the worker thread.
pub fn fraction_multiplication_async(diagnostics: &Diagnostics) -> Deferred<()> {
    let report = Report::new("fraction_multiplication_async");
    let printer = diagnostics.clone();

    Deferred::from_work(multiply_factors(diagnostics.clone()))
        .schedule_on(Schedulers::single())
        .on_success(move |product| {
            report.append(format!(
                "     mixed reduced fraction = {}\n",
                product.reduce().to_mixed_string()
            ));
            report.display(&printer);
        })
        .then()
}
