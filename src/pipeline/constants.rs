// ============================================================================
// Pipeline Constants
// ============================================================================

use crate::numeric::{Fraction, FractionResult};

/// Fraction reduced by `fraction_reduction_async`.
pub const UNREDUCED_FRACTION: &str = "5000000000/3768296432";

/// Operands multiplied by the multiplication drivers.
pub const FACTOR_1: &str = "62675744/15668936";
pub const FACTOR_2: &str = "609136/913704";

/// Bits of the random numerators used by `fraction_combine` in the binary.
pub const DEFAULT_RANDOM_BITS: u64 = 1024;

/// Debug tags understood by the drivers.
pub const TAG_REDUCE: &str = "reduce";
pub const TAG_MULTIPLY: &str = "multiply";
pub const TAG_COMBINE: &str = "combine";

/// `UNREDUCED_FRACTION` in lowest terms; the multiplier of `fraction_combine`.
pub fn big_reduced_fraction() -> FractionResult<Fraction> {
    Ok(UNREDUCED_FRACTION.parse::<Fraction>()?.reduce())
}
