// ============================================================================
// Reduction Pipeline
// Reduce a large fraction on the single worker and print it as a mixed number
// ============================================================================

use super::constants::{TAG_REDUCE, UNREDUCED_FRACTION};
use super::report::Report;
use crate::config::Diagnostics;
use crate::deferred::Deferred;
use crate::numeric::Fraction;
use crate::scheduler::Schedulers;

/// Reduce `UNREDUCED_FRACTION` in the background, convert it to a mixed
/// string, then print the accumulated report.
///
/// The printing step is skipped if anything upstream fails.
pub fn fraction_reduction_async(diagnostics: &Diagnostics) -> Deferred<()> {
    let report = Report::new("fraction_reduction_async");

    let reduce = {
        let report = report.clone();
        let diagnostics = diagnostics.clone();
        move || {
            let unreduced = UNREDUCED_FRACTION.parse::<Fraction>()?;
            let reduced = unreduced.reduce();
            diagnostics.debug_tagged(TAG_REDUCE, format!("reduced {} to {}", unreduced, reduced));

            report.append(format!(
                "     unreduced fraction {}\n     reduced improper fraction = {}",
                unreduced, reduced
            ));
            Ok::<_, crate::numeric::FractionError>(reduced)
        }
    };

    let to_mixed = {
        let report = report.clone();
        move |reduced: Fraction| {
            report.append("\n     calling Fraction::to_mixed_string\n");
            reduced.to_mixed_string()
        }
    };

    let diagnostics = diagnostics.clone();
    Deferred::from_work(reduce)
        .schedule_on(Schedulers::single())
        .map(to_mixed)
        .on_success(move |mixed| {
            report.append(format!("     mixed reduced fraction = {}\n", mixed));
            report.display(&diagnostics);
        })
        .then()
}
