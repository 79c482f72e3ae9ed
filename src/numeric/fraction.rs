// ============================================================================
// Fraction
// Immutable arbitrary-precision rational number
// ============================================================================

use super::errors::{FractionError, FractionResult};
use num_bigint::{BigInt, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use rand::Rng;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

/// Arbitrary-precision fraction.
///
/// A `Fraction` is never normalized behind the caller's back: `multiply`,
/// `add` and `subtract` return the plain cross-multiplied pair, and callers
/// reduce explicitly with [`Fraction::reduce`]. Equality is structural over
/// the `(numerator, denominator)` pair; use [`Fraction::value_eq`] or
/// [`Fraction::value_cmp`] to compare rational values.
///
/// # Example
/// ```
/// use deferred_fractions::numeric::Fraction;
///
/// let a: Fraction = "1/2".parse().unwrap();
/// let b: Fraction = "1/3".parse().unwrap();
/// let sum = a.add(&b);
/// assert_eq!(sum.to_string(), "5/6");
///
/// let big: Fraction = "5000000000/3768296432".parse().unwrap();
/// assert_eq!(big.reduce().to_mixed_string(), "1 76981473/235518527");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fraction {
    numerator: BigInt,
    denominator: BigInt,
}

impl Fraction {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create an unreduced fraction.
    ///
    /// # Errors
    /// Returns `ZeroDenominator` if `denominator` is zero.
    pub fn new(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> FractionResult<Self> {
        let denominator = denominator.into();
        if denominator.is_zero() {
            return Err(FractionError::ZeroDenominator);
        }
        Ok(Self {
            numerator: numerator.into(),
            denominator,
        })
    }

    /// Create a fraction, reducing it to lowest terms when `reduce` is set.
    pub fn with_reduction(
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
        reduce: bool,
    ) -> FractionResult<Self> {
        let fraction = Self::new(numerator, denominator)?;
        Ok(if reduce { fraction.reduce() } else { fraction })
    }

    /// Create `value/1`.
    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self {
            numerator: value.into(),
            denominator: BigInt::one(),
        }
    }

    /// Generate a large random fraction.
    ///
    /// The numerator is a random integer of up to `bits` bits and the
    /// denominator is the numerator divided by a random factor in `1..=10`,
    /// so the value lies roughly between 1 and 10.
    pub fn random<R: Rng>(rng: &mut R, bits: u64, reduce: bool) -> Self {
        let mut numerator = BigInt::from(rng.gen_biguint(bits));
        if numerator.is_zero() {
            numerator = BigInt::one();
        }
        let divisor = BigInt::from(rng.gen_range(1u32..=10));
        let mut denominator = &numerator / divisor;
        if denominator.is_zero() {
            denominator = BigInt::one();
        }

        let fraction = Self {
            numerator,
            denominator,
        };
        if reduce {
            fraction.reduce()
        } else {
            fraction
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    #[inline]
    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    /// True when the rational value is below zero, whatever the signs are stored on.
    #[inline]
    pub fn is_negative(&self) -> bool {
        !self.numerator.is_zero() && self.numerator.is_negative() != self.denominator.is_negative()
    }

    /// True when `gcd(|n|, d) == 1` and the denominator is positive.
    pub fn is_reduced(&self) -> bool {
        self.denominator.is_positive() && self.numerator.gcd(&self.denominator).is_one()
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Reduce to lowest terms with a positive denominator.
    ///
    /// A zero numerator reduces to `0/1`.
    pub fn reduce(&self) -> Self {
        if self.numerator.is_zero() {
            return Self::from_integer(0);
        }

        let gcd = self.numerator.gcd(&self.denominator);
        let mut numerator = &self.numerator / &gcd;
        let mut denominator = &self.denominator / &gcd;
        if denominator.is_negative() {
            numerator = -numerator;
            denominator = -denominator;
        }

        Self {
            numerator,
            denominator,
        }
    }

    /// Unreduced product: `(a.n * b.n) / (a.d * b.d)`.
    pub fn multiply(&self, other: &Fraction) -> Self {
        Self {
            numerator: &self.numerator * &other.numerator,
            denominator: &self.denominator * &other.denominator,
        }
    }

    /// Unreduced sum: `(a.n * b.d + b.n * a.d) / (a.d * b.d)`.
    pub fn add(&self, other: &Fraction) -> Self {
        Self {
            numerator: &self.numerator * &other.denominator + &other.numerator * &self.denominator,
            denominator: &self.denominator * &other.denominator,
        }
    }

    /// Unreduced difference: `(a.n * b.d - b.n * a.d) / (a.d * b.d)`.
    pub fn subtract(&self, other: &Fraction) -> Self {
        Self {
            numerator: &self.numerator * &other.denominator - &other.numerator * &self.denominator,
            denominator: &self.denominator * &other.denominator,
        }
    }

    /// Unreduced quotient: `(a.n * b.d) / (a.d * b.n)`.
    ///
    /// # Errors
    /// Returns `ZeroDenominator` when `other` is zero.
    pub fn divide(&self, other: &Fraction) -> FractionResult<Self> {
        if other.is_zero() {
            return Err(FractionError::ZeroDenominator);
        }
        Ok(Self {
            numerator: &self.numerator * &other.denominator,
            denominator: &self.denominator * &other.numerator,
        })
    }

    pub fn negate(&self) -> Self {
        Self {
            numerator: -&self.numerator,
            denominator: self.denominator.clone(),
        }
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Compare rational values, ignoring how each side is represented.
    pub fn value_cmp(&self, other: &Fraction) -> Ordering {
        let (a, b) = (self.sign_normalized(), other.sign_normalized());
        (&a.numerator * &b.denominator).cmp(&(&b.numerator * &a.denominator))
    }

    /// True when both fractions denote the same rational value.
    pub fn value_eq(&self, other: &Fraction) -> bool {
        self.value_cmp(other) == Ordering::Equal
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render as a mixed number, e.g. `"3 1/2"`.
    ///
    /// Proper fractions render as `"n/d"`, whole values as `"w"`. The sign
    /// goes on the whole part. The value is not reduced first.
    pub fn to_mixed_string(&self) -> String {
        let normalized = self.sign_normalized();
        let sign = if normalized.numerator.is_negative() { "-" } else { "" };
        let magnitude = normalized.numerator.abs();
        let (whole, remainder) = magnitude.div_rem(&normalized.denominator);

        if whole.is_zero() {
            format!("{}/{}", normalized.numerator, normalized.denominator)
        } else if remainder.is_zero() {
            format!("{}{}", sign, whole)
        } else {
            format!("{}{} {}/{}", sign, whole, remainder, normalized.denominator)
        }
    }

    fn sign_normalized(&self) -> Self {
        if self.denominator.is_negative() {
            Self {
                numerator: -&self.numerator,
                denominator: -&self.denominator,
            }
        } else {
            self.clone()
        }
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl FromStr for Fraction {
    type Err = FractionError;

    /// Parse `"numerator/denominator"`.
    ///
    /// # Examples
    /// - "1/2" -> 1/2
    /// - " -6 / 8 " -> -6/8 (not reduced)
    /// - "3" -> Format error
    /// - "1/0" -> ZeroDenominator
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.trim().split('/');
        let (numerator, denominator) = match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(n), Some(d), None) => (n.trim(), d.trim()),
            (_, None, _) => return Err(FractionError::format(s, "missing '/'")),
            _ => return Err(FractionError::format(s, "more than one '/'")),
        };

        if !is_integer_token(numerator) {
            return Err(FractionError::format(s, "numerator is not an integer"));
        }
        if !is_integer_token(denominator) {
            return Err(FractionError::format(s, "denominator is not an integer"));
        }

        let numerator = numerator
            .parse::<BigInt>()
            .map_err(|_| FractionError::format(s, "numerator is not an integer"))?;
        let denominator = denominator
            .parse::<BigInt>()
            .map_err(|_| FractionError::format(s, "denominator is not an integer"))?;

        Self::new(numerator, denominator)
    }
}

/// Optional sign followed by ASCII digits only. `BigInt`'s own parser also
/// accepts `_` separators, which are not valid here.
fn is_integer_token(token: &str) -> bool {
    let digits = token
        .strip_prefix('-')
        .or_else(|| token.strip_prefix('+'))
        .unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl Mul for &Fraction {
    type Output = Fraction;

    #[inline]
    fn mul(self, rhs: &Fraction) -> Fraction {
        self.multiply(rhs)
    }
}

impl Add for &Fraction {
    type Output = Fraction;

    #[inline]
    fn add(self, rhs: &Fraction) -> Fraction {
        Fraction::add(self, rhs)
    }
}

impl Sub for &Fraction {
    type Output = Fraction;

    #[inline]
    fn sub(self, rhs: &Fraction) -> Fraction {
        self.subtract(rhs)
    }
}

impl Neg for Fraction {
    type Output = Fraction;

    #[inline]
    fn neg(self) -> Fraction {
        Fraction {
            numerator: -self.numerator,
            denominator: self.denominator,
        }
    }
}

// ============================================================================
// Serde (as "n/d" strings)
// ============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Fraction {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Fraction {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
