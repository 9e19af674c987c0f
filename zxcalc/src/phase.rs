// zxcalc - Rust library for quantum circuit rewriting and optimisation
//          using the ZX-calculus
// Copyright (C) 2021 - Aleks Kissinger
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::ZXError;
use num::rational::{Ratio, Rational64};
use num::traits::{ToPrimitive, Zero};
use std::fmt::{self, Display};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Largest denominator produced when rationalizing a floating-point phase.
pub const MAX_DENOM: i64 = 1_000_000;

/// A phase, given as an exact rational multiple of pi.
///
/// Phases are kept normalized to the range [0, 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Phase {
    r: Rational64,
}

impl Phase {
    /// Creates a new phase, normalized to [0, 2).
    pub fn new(r: impl Into<Rational64>) -> Self {
        let r = r.into();
        Self::from_wide(*r.numer() as i128, *r.denom() as i128)
    }

    /// The phase pi.
    pub fn pi() -> Self {
        Self::new(1)
    }

    pub fn to_rational(&self) -> Rational64 {
        self.r
    }

    /// Returns the phase as a floating point number of half-turns.
    pub fn to_f64(&self) -> f64 {
        self.r.to_f64().unwrap_or(0.0)
    }

    /// Rationalizes a floating point number of half-turns.
    ///
    /// Returns `None` for non-finite input or if no rational with
    /// denominator at most [MAX_DENOM] can be found.
    pub fn from_f64(f: f64) -> Option<Self> {
        if !f.is_finite() {
            return None;
        }
        rationalize(f.rem_euclid(2.0), MAX_DENOM).map(Self::new)
    }

    /// Normalizes `num/denom` in 128 bits, with `denom > 0`.
    ///
    /// If the reduced result doesn't fit in 64 bits it is replaced by its
    /// last continued-fraction convergent with a denominator of at most
    /// `i64::MAX / 2`.
    fn from_wide(num: i128, denom: i128) -> Phase {
        let r = Ratio::new(num.rem_euclid(2 * denom), denom);
        let (n, d) = match (i64::try_from(*r.numer()), i64::try_from(*r.denom())) {
            (Ok(n), Ok(d)) => (n, d),
            _ => convergent(*r.numer(), *r.denom(), (i64::MAX / 2) as i128),
        };
        Phase {
            r: Rational64::new(n, d),
        }
    }

    /// Returns `true` if the phase is a multiple of 1/2.
    pub fn is_clifford(&self) -> bool {
        *self.r.denom() <= 2
    }

    /// Returns `true` if the phase is 1/2 or 3/2.
    pub fn is_proper_clifford(&self) -> bool {
        *self.r.denom() == 2
    }

    /// Returns `true` if the phase is 0 or 1.
    pub fn is_pauli(&self) -> bool {
        *self.r.denom() == 1
    }

    pub fn is_pi(&self) -> bool {
        self.r == Rational64::from_integer(1)
    }
}

/// Last convergent of `0 <= n/d < 2`, modulo 2, whose denominator is at most `max_denom`.
fn convergent(n: i128, d: i128, max_denom: i128) -> (i64, i64) {
    let (mut h0, mut k0, mut h1, mut k1) = (0i128, 1i128, 1i128, 0i128);
    let (mut n, mut d) = (n, d);
    while d != 0 {
        let a = n / d;
        let h2 = a.checked_mul(h1).and_then(|x| x.checked_add(h0));
        let k2 = a.checked_mul(k1).and_then(|x| x.checked_add(k0));
        match (h2, k2) {
            (Some(h2), Some(k2)) if k2 <= max_denom => (h0, k0, h1, k1) = (h1, k1, h2, k2),
            _ => break,
        }
        (n, d) = (d, n - a * d);
    }
    // the convergent can round up to 2
    ((h1 % (2 * k1)) as i64, k1 as i64)
}

/// Best rational approximation of `x` by continued fractions.
fn rationalize(x: f64, max_denom: i64) -> Option<Rational64> {
    // convergents h/k, seeded with h_{-2}/k_{-2} = 0/1 and h_{-1}/k_{-1} = 1/0
    let (mut h0, mut k0, mut h1, mut k1) = (0i64, 1i64, 1i64, 0i64);
    let mut y = x;
    loop {
        let a = y.floor();
        if a.abs() >= (i64::MAX / 4) as f64 {
            return None;
        }
        let a = a as i64;
        let h2 = a.checked_mul(h1)?.checked_add(h0)?;
        let k2 = a.checked_mul(k1)?.checked_add(k0)?;
        if k2 > max_denom {
            break;
        }
        (h0, k0, h1, k1) = (h1, k1, h2, k2);

        let frac = y - a as f64;
        if frac.abs() < 1e-12 || (h1 as f64 / k1 as f64 - x).abs() < 1e-12 {
            break;
        }
        y = 1.0 / frac;
    }

    if k1 == 0 {
        None
    } else {
        Some(Rational64::new(h1, k1))
    }
}

/// A phase as supplied by a caller: either exact or floating-point.
///
/// Floating-point angles are only accepted when autoconverting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Angle {
    Exact(Phase),
    Float(f64),
}

impl Angle {
    pub fn to_phase(self, autoconvert: bool) -> Result<Phase, ZXError> {
        match self {
            Angle::Exact(p) => Ok(p),
            Angle::Float(f) if autoconvert => Phase::from_f64(f).ok_or(ZXError::InvalidPhase(f)),
            Angle::Float(f) => Err(ZXError::InvalidPhase(f)),
        }
    }
}

impl From<Phase> for Angle {
    fn from(p: Phase) -> Angle {
        Angle::Exact(p)
    }
}

impl From<Rational64> for Angle {
    fn from(r: Rational64) -> Angle {
        Angle::Exact(r.into())
    }
}

impl From<i64> for Angle {
    fn from(i: i64) -> Angle {
        Angle::Exact(i.into())
    }
}

impl From<(i64, i64)> for Angle {
    fn from(r: (i64, i64)) -> Angle {
        Angle::Exact(r.into())
    }
}

impl From<f64> for Angle {
    fn from(f: f64) -> Angle {
        Angle::Float(f)
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.r)
    }
}

impl From<Rational64> for Phase {
    fn from(r: Rational64) -> Phase {
        Phase::new(r)
    }
}

impl From<i64> for Phase {
    fn from(i: i64) -> Phase {
        Phase::new(Rational64::from_integer(i))
    }
}

impl From<(i64, i64)> for Phase {
    fn from((n, d): (i64, i64)) -> Phase {
        Phase::new(Rational64::new(n, d))
    }
}

impl From<Phase> for Rational64 {
    fn from(p: Phase) -> Rational64 {
        p.r
    }
}

impl Zero for Phase {
    fn zero() -> Self {
        Phase {
            r: Rational64::zero(),
        }
    }

    fn is_zero(&self) -> bool {
        self.r.is_zero()
    }
}

impl Neg for Phase {
    type Output = Self;

    fn neg(self) -> Self {
        let (a, b) = wide(self);
        Self::from_wide(-a, b)
    }
}

impl Add for Phase {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let ((a, b), (c, d)) = (wide(self), wide(other));
        // both phases are below 2, so taking 2 off one keeps the sum in range
        Self::from_wide((a - 2 * b) * d + c * b, b * d)
    }
}

impl AddAssign for Phase {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Phase {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        let ((a, b), (c, d)) = (wide(self), wide(other));
        Self::from_wide(a * d - c * b, b * d)
    }
}

impl SubAssign for Phase {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Mul<i64> for Phase {
    type Output = Self;

    fn mul(self, k: i64) -> Self {
        let (a, b) = wide(self);
        Self::from_wide(a * k as i128, b)
    }
}

fn wide(p: Phase) -> (i128, i128) {
    (*p.r.numer() as i128, *p.r.denom() as i128)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case((7, 4), (7, 4))]
    #[case((-1, 4), (7, 4))]
    #[case((9, 4), (1, 4))]
    #[case((2, 1), (0, 1))]
    #[case((-3, 1), (1, 1))]
    fn normalizes_into_range(#[case] input: (i64, i64), #[case] expected: (i64, i64)) {
        assert_eq!(Phase::from(input).to_rational(), Rational64::new(expected.0, expected.1));
    }

    #[test]
    fn addition_wraps() {
        let p = Phase::from((3, 2)) + Phase::from((3, 4));
        assert_eq!(p, Phase::from((1, 4)));
        assert_eq!(-Phase::from((1, 4)), Phase::from((7, 4)));
        assert_eq!(Phase::from((1, 2)) * 4, Phase::zero());
    }

    #[test]
    fn large_denominators_stay_exact() {
        let p = Phase::from((i64::MAX, 1 << 62));
        assert_eq!(p.to_rational(), Rational64::new(i64::MAX, 1 << 62));
        assert_eq!(Phase::from((-1, 1 << 62)), p);
        assert_eq!(p + Phase::from((1, 1 << 62)), Phase::zero());
        assert_eq!(p - p, Phase::zero());
    }

    #[test]
    fn unrepresentable_sums_are_approximated() {
        let p = Phase::from((1, i64::MAX)) + Phase::from((1, i64::MAX - 1));
        assert_eq!(p.to_rational(), Rational64::new(1, (1 << 62) - 1));
    }

    #[test]
    fn classification() {
        assert!(Phase::zero().is_pauli());
        assert!(Phase::pi().is_pauli());
        assert!(Phase::pi().is_pi());
        assert!(Phase::from((3, 2)).is_proper_clifford());
        assert!(Phase::from((1, 2)).is_clifford());
        assert!(!Phase::from((1, 2)).is_pauli());
        assert!(!Phase::from((1, 4)).is_clifford());
    }

    #[rstest]
    #[case(0.25, (1, 4))]
    #[case(1.0 / 3.0, (1, 3))]
    #[case(1.75, (7, 4))]
    #[case(-0.5, (3, 2))]
    #[case(0.0, (0, 1))]
    fn rationalizes_floats(#[case] f: f64, #[case] expected: (i64, i64)) {
        assert_eq!(Phase::from_f64(f), Some(Phase::from(expected)));
    }

    #[test]
    fn angle_conversion() {
        assert_eq!(Angle::from(0.5).to_phase(true), Ok(Phase::from((1, 2))));
        assert_eq!(Angle::from(0.5).to_phase(false), Err(ZXError::InvalidPhase(0.5)));
        assert_eq!(Angle::from((1, 4)).to_phase(false), Ok(Phase::from((1, 4))));
        assert!(Angle::from(f64::NAN).to_phase(true).is_err());
    }
}
