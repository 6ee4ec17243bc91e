//! Bounded integer and fixed-point arithmetic.
//!
//! `Int`/`UInt` are arbitrary precision; `IntN`/`UIntN` are checked against
//! their declared bit width and error on overflow; `WordN` wraps modulo
//! `2^n` and never errors. `Fix64`/`UFix64` are 64-bit fixed-point with 8
//! fractional decimal digits, multiplied/divided through a 128-bit
//! intermediate to avoid losing precision mid-computation.

use crate::error::{ErrorKind, InterpreterError};
use cadence_common::Span;
use cadence_types::Primitive;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

/// The number of fractional decimal digits `Fix64`/`UFix64` carry.
pub const FIX64_SCALE: i64 = 100_000_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegerValue {
    pub primitive: Primitive,
    pub magnitude: BigInt,
}

impl IntegerValue {
    #[must_use]
    pub fn new_unchecked(primitive: Primitive, magnitude: BigInt) -> Self {
        IntegerValue { primitive, magnitude }
    }
}

/// `(min, max)` inclusive bound for a checked-overflow integer family.
/// `None` on either side means unbounded in that direction (`Int`/`UInt`).
fn checked_range(primitive: Primitive) -> (Option<BigInt>, Option<BigInt>) {
    match primitive {
        Primitive::Int => (None, None),
        Primitive::UInt => (Some(BigInt::zero()), None),
        Primitive::IntN(w) => {
            let bound: BigInt = BigInt::from(1) << (w - 1);
            (Some(-&bound), Some(&bound - 1))
        }
        Primitive::UIntN(w) => {
            let bound: BigInt = BigInt::from(1) << w;
            (Some(BigInt::zero()), Some(&bound - 1))
        }
        _ => (None, None),
    }
}

fn finalize(primitive: Primitive, raw: BigInt, span: Span) -> Result<IntegerValue, InterpreterError> {
    if primitive.wraps_on_overflow() {
        let w = primitive.bit_width().expect("WordN always has a bit width");
        let modulus: BigInt = BigInt::from(1) << w;
        let wrapped = ((raw % &modulus) + &modulus) % &modulus;
        return Ok(IntegerValue::new_unchecked(primitive, wrapped));
    }
    let (min, max) = checked_range(primitive);
    if let Some(min) = &min {
        if &raw < min {
            return Err(InterpreterError::new(span, ErrorKind::OverflowError));
        }
    }
    if let Some(max) = &max {
        if &raw > max {
            return Err(InterpreterError::new(span, ErrorKind::OverflowError));
        }
    }
    Ok(IntegerValue::new_unchecked(primitive, raw))
}

fn same_family(a: &IntegerValue, b: &IntegerValue) -> Primitive {
    debug_assert_eq!(a.primitive, b.primitive, "checker guarantees operands share a numeric type");
    a.primitive
}

pub fn add(a: &IntegerValue, b: &IntegerValue, span: Span) -> Result<IntegerValue, InterpreterError> {
    finalize(same_family(a, b), &a.magnitude + &b.magnitude, span)
}

pub fn sub(a: &IntegerValue, b: &IntegerValue, span: Span) -> Result<IntegerValue, InterpreterError> {
    finalize(same_family(a, b), &a.magnitude - &b.magnitude, span)
}

pub fn mul(a: &IntegerValue, b: &IntegerValue, span: Span) -> Result<IntegerValue, InterpreterError> {
    finalize(same_family(a, b), &a.magnitude * &b.magnitude, span)
}

pub fn div(a: &IntegerValue, b: &IntegerValue, span: Span) -> Result<IntegerValue, InterpreterError> {
    if b.magnitude.is_zero() {
        return Err(InterpreterError::new(span, ErrorKind::DivisionByZero));
    }
    finalize(same_family(a, b), &a.magnitude / &b.magnitude, span)
}

pub fn rem(a: &IntegerValue, b: &IntegerValue, span: Span) -> Result<IntegerValue, InterpreterError> {
    if b.magnitude.is_zero() {
        return Err(InterpreterError::new(span, ErrorKind::DivisionByZero));
    }
    finalize(same_family(a, b), &a.magnitude % &b.magnitude, span)
}

pub fn negate(a: &IntegerValue, span: Span) -> Result<IntegerValue, InterpreterError> {
    finalize(a.primitive, -&a.magnitude, span)
}

pub fn bitand(a: &IntegerValue, b: &IntegerValue, span: Span) -> Result<IntegerValue, InterpreterError> {
    finalize(same_family(a, b), &a.magnitude & &b.magnitude, span)
}

pub fn bitor(a: &IntegerValue, b: &IntegerValue, span: Span) -> Result<IntegerValue, InterpreterError> {
    finalize(same_family(a, b), &a.magnitude | &b.magnitude, span)
}

pub fn bitxor(a: &IntegerValue, b: &IntegerValue, span: Span) -> Result<IntegerValue, InterpreterError> {
    finalize(same_family(a, b), &a.magnitude ^ &b.magnitude, span)
}

pub fn shift_left(a: &IntegerValue, bits: u32, span: Span) -> Result<IntegerValue, InterpreterError> {
    finalize(a.primitive, &a.magnitude << bits, span)
}

pub fn shift_right(a: &IntegerValue, bits: u32, span: Span) -> Result<IntegerValue, InterpreterError> {
    finalize(a.primitive, &a.magnitude >> bits, span)
}

pub fn abs_magnitude_is_negative(a: &IntegerValue) -> bool {
    a.magnitude.is_negative()
}

/// Reinterprets `magnitude` as `primitive`, applying that family's
/// overflow/wraparound rule. Used to give an otherwise-untyped integer
/// literal its declared width (e.g. `let x: UInt8 = 255`).
pub fn coerce(primitive: Primitive, magnitude: BigInt, span: Span) -> Result<IntegerValue, InterpreterError> {
    finalize(primitive, magnitude, span)
}

/// `Fix64`/`UFix64`: fixed-point, stored as the underlying integer scaled
/// by `FIX64_SCALE`. Multiplication/division run through `i128` so the
/// intermediate product/quotient doesn't overflow `i64` before rescaling.
pub fn fix64_mul(a: i64, b: i64, span: Span) -> Result<i64, InterpreterError> {
    let product = i128::from(a) * i128::from(b) / i128::from(FIX64_SCALE);
    i64::try_from(product).map_err(|_| InterpreterError::new(span, ErrorKind::OverflowError))
}

pub fn fix64_div(a: i64, b: i64, span: Span) -> Result<i64, InterpreterError> {
    if b == 0 {
        return Err(InterpreterError::new(span, ErrorKind::DivisionByZero));
    }
    let scaled = i128::from(a) * i128::from(FIX64_SCALE) / i128::from(b);
    i64::try_from(scaled).map_err(|_| InterpreterError::new(span, ErrorKind::OverflowError))
}

pub fn ufix64_mul(a: u64, b: u64, span: Span) -> Result<u64, InterpreterError> {
    let product = u128::from(a) * u128::from(b) / u128::from(FIX64_SCALE as u64);
    u64::try_from(product).map_err(|_| InterpreterError::new(span, ErrorKind::OverflowError))
}

pub fn ufix64_div(a: u64, b: u64, span: Span) -> Result<u64, InterpreterError> {
    if b == 0 {
        return Err(InterpreterError::new(span, ErrorKind::DivisionByZero));
    }
    let scaled = u128::from(a) * u128::from(FIX64_SCALE as u64) / u128::from(b);
    u64::try_from(scaled).map_err(|_| InterpreterError::new(span, ErrorKind::OverflowError))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span() -> Span {
        Span::new(0, 0)
    }

    #[test]
    fn uint8_overflow_errors_but_word8_wraps() {
        let a = IntegerValue::new_unchecked(Primitive::UIntN(8), BigInt::from(255));
        let one = IntegerValue::new_unchecked(Primitive::UIntN(8), BigInt::from(1));
        assert!(add(&a, &one, span()).is_err());

        let w = IntegerValue::new_unchecked(Primitive::WordN(8), BigInt::from(255));
        let w_one = IntegerValue::new_unchecked(Primitive::WordN(8), BigInt::from(1));
        let wrapped = add(&w, &w_one, span()).unwrap();
        assert_eq!(wrapped.magnitude, BigInt::zero());
    }

    #[test]
    fn int_is_unbounded() {
        let huge = IntegerValue::new_unchecked(Primitive::Int, BigInt::from(i64::MAX));
        let one = IntegerValue::new_unchecked(Primitive::Int, BigInt::from(1));
        let sum = add(&huge, &one, span()).unwrap();
        assert_eq!(sum.magnitude, BigInt::from(i64::MAX) + 1);
    }

    #[test]
    fn uint_underflow_below_zero_errors() {
        let zero = IntegerValue::new_unchecked(Primitive::UInt, BigInt::zero());
        let one = IntegerValue::new_unchecked(Primitive::UInt, BigInt::from(1));
        assert!(sub(&zero, &one, span()).is_err());
    }

    #[test]
    fn division_by_zero_errors_for_every_family() {
        let a = IntegerValue::new_unchecked(Primitive::Int, BigInt::from(10));
        let zero = IntegerValue::new_unchecked(Primitive::Int, BigInt::zero());
        assert!(div(&a, &zero, span()).is_err());
    }

    #[test]
    fn fix64_multiplication_scales_correctly() {
        // 2.0 * 3.0 == 6.0, all scaled by 1e8.
        let two = 2 * FIX64_SCALE;
        let three = 3 * FIX64_SCALE;
        let six = fix64_mul(two, three, span()).unwrap();
        assert_eq!(six, 6 * FIX64_SCALE);
    }
}
