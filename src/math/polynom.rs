use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result};

use crate::error::MathError;
use crate::math::Complex;
use crate::math::root_finding::roots_4;

const MAXIMUM_SOLVABLE_DEGREE: usize = 4;

/// `None` when no closed form exists for the current degree.
type RootCache = std::result::Result<Option<Vec<Complex>>, MathError>;

/// Sparse polynomial with complex coefficients.
///
/// Zero coefficients are never stored, so the highest key is always the degree.
/// Roots are solved lazily and memoized until the next coefficient change.
#[derive(Debug, Clone, Default)]
pub struct Polynom {
    coefficients: BTreeMap<usize, Complex>,
    degree: Option<usize>,
    roots: OnceCell<RootCache>,
}

impl Polynom {
    pub fn new() -> Self {
        Polynom::default()
    }

    /// Coefficients are given highest degree first.
    pub fn from_coefficients(coefficients: &[Complex]) -> Self {
        let mut polynom = Polynom::new();
        let length = coefficients.len();

        for (index, &coefficient) in coefficients.iter().enumerate() {
            polynom.add(length - 1 - index, coefficient);
        }

        polynom
    }

    /// Highest degree with a non-zero coefficient, `None` for the zero polynomial.
    #[inline]
    pub fn degree(&self) -> Option<usize> {
        self.degree
    }

    #[inline]
    pub fn coefficient(&self, degree: usize) -> Complex {
        self.coefficients.get(&degree).copied().unwrap_or(Complex::ZERO)
    }

    /// Adds `coefficient` to the term of the given degree.
    pub fn add(&mut self, degree: usize, coefficient: Complex) {
        if coefficient.is_null() {
            return;
        }

        let value = self.coefficient(degree) + coefficient;
        self.store(degree, value);
    }

    /// Replaces the term of the given degree.
    pub fn set(&mut self, degree: usize, coefficient: Complex) {
        if self.coefficient(degree) == coefficient {
            return;
        }

        self.store(degree, coefficient);
    }

    /// Multiplies by `(x - root)`.
    pub fn add_root(&mut self, root: Complex) {
        let known_roots = self.roots.take();
        let previous = std::mem::take(&mut self.coefficients);
        self.degree = None;

        if previous.is_empty() {
            self.store(1, Complex::ONE);
            self.store(0, -root);
        } else {
            for (&degree, &value) in previous.iter() {
                self.add(degree + 1, value);
                self.add(degree, Complex::product(-1.0, &[value, root]));
            }
        }

        if let Some(Ok(Some(mut roots))) = known_roots {
            roots.push(root);
            self.roots = OnceCell::from(Ok(Some(roots)));
        }
    }

    /// Evaluates with Horner's method.
    pub fn value(&self, z: Complex) -> Complex {
        let degree = match self.degree {
            Some(degree) => degree,
            None => return Complex::ZERO
        };

        let mut output = Complex::ZERO;

        for index in (0..=degree).rev() {
            output += self.coefficient(index);

            if index > 0 {
                output *= z;
            }
        }

        output
    }

    pub fn derive(&self) -> Polynom {
        let mut derivative = Polynom::new();

        for (&degree, &value) in self.coefficients.range(1..) {
            derivative.add(degree - 1, value.scale(degree as f64));
        }

        derivative
    }

    /// Antiderivative whose constant term is `value_0`.
    pub fn integrate(&self, value_0: Complex) -> Polynom {
        let mut primitive = Polynom::new();
        primitive.add(0, value_0);

        for (&degree, &value) in self.coefficients.iter() {
            let order = (degree + 1) as f64;
            primitive.add(degree + 1, Complex::new(value.re / order, value.im / order));
        }

        primitive
    }

    /// Closed-form roots, `Ok(None)` above degree four.
    pub fn roots(&self) -> std::result::Result<Option<&[Complex]>, MathError> {
        match self.roots.get_or_init(|| self.compute_roots()) {
            Ok(roots) => Ok(roots.as_deref()),
            Err(error) => Err(error.clone())
        }
    }

    fn compute_roots(&self) -> RootCache {
        if self.degree.map_or(false, |degree| degree > MAXIMUM_SOLVABLE_DEGREE) {
            return Ok(None);
        }

        roots_4(
            self.coefficient(4),
            self.coefficient(3),
            self.coefficient(2),
            self.coefficient(1),
            self.coefficient(0),
        ).map(Some)
    }

    // Every coefficient change goes through here
    fn store(&mut self, degree: usize, value: Complex) {
        self.roots = OnceCell::new();

        if value.is_null() {
            self.coefficients.remove(&degree);

            if self.degree == Some(degree) {
                self.degree = self.coefficients.keys().next_back().copied();
            }
        } else {
            self.coefficients.insert(degree, value);

            if self.degree.map_or(true, |current| degree > current) {
                self.degree = Some(degree);
            }
        }
    }
}

impl PartialEq for Polynom {
    fn eq(&self, other: &Polynom) -> bool {
        self.coefficients == other.coefficients
    }
}

impl Display for Polynom {
    fn fmt(&self, f: &mut Formatter) -> Result {
        if self.coefficients.is_empty() {
            return write!(f, "0");
        }

        for (position, (&degree, coefficient)) in self.coefficients.iter().rev().enumerate() {
            if position > 0 {
                write!(f, " + ")?;
            }

            if degree == 0 {
                write!(f, "{}", coefficient)?;
                continue;
            }

            if !coefficient.is_real() && !coefficient.is_pure_imaginary() {
                write!(f, "({}) ", coefficient)?;
            } else if *coefficient != Complex::ONE {
                write!(f, "{} ", coefficient)?;
            }

            write!(f, "z")?;

            if degree > 1 {
                write!(f, "{}", degree)?;
            }
        }

        Ok(())
    }
}
