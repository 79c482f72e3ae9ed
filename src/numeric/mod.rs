// ============================================================================
// Numeric Module
// Arbitrary-precision fractions carried through deferred pipelines
// ============================================================================
//
// This module provides:
// - Fraction: immutable numerator/denominator pair over BigInt
// - FractionError: parse and zero-denominator failures
//
// Design principles:
// - multiply/add/subtract never reduce; reduction is an explicit step
// - Denominator is never zero once a Fraction exists
// - Equality is structural so unreduced intermediates can be compared

mod errors;
mod fraction;

pub use errors::{FractionError, FractionResult};
pub use fraction::Fraction;
pub use num_bigint::BigInt;
