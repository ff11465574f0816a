use std::fmt::{Display, Formatter, Result};

use crate::error::MathError;
use crate::util::ComplexFixed;

/// Immutable complex number. Equality is exact on both components.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Complex {
    pub re: f64,
    pub im: f64
}

impl Complex {
    pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };
    pub const ONE: Complex = Complex { re: 1.0, im: 0.0 };
    pub const I: Complex = Complex { re: 0.0, im: 1.0 };
    /// Primitive cube root of unity, e^(2iπ/3)
    pub const J: Complex = Complex { re: -0.5, im: 0.866_025_403_784_438_6 };
    /// e^(-2iπ/3), the conjugate of `J`
    pub const J2: Complex = Complex { re: -0.5, im: -0.866_025_403_784_438_6 };

    #[inline]
    pub fn new(re: f64, im: f64) -> Self {
        Complex {
            re,
            im
        }
    }

    #[inline]
    pub fn real(re: f64) -> Self {
        Complex::new(re, 0.0)
    }

    pub fn from_angle(angle: f64, magnitude: f64) -> Self {
        ComplexFixed::from_polar(&magnitude, &angle).into()
    }

    /// `coef + terms[0] + terms[1] + ...`
    pub fn sum(coef: f64, terms: &[Complex]) -> Self {
        terms.iter().fold(Complex::real(coef), |sum, &term| sum + term)
    }

    /// `coef * factors[0] * factors[1] * ...`
    pub fn product(coef: f64, factors: &[Complex]) -> Self {
        factors.iter().fold(Complex::real(coef), |product, &factor| product * factor)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }

    #[inline]
    pub fn is_real(&self) -> bool {
        self.im == 0.0
    }

    #[inline]
    pub fn is_pure_imaginary(&self) -> bool {
        self.re == 0.0
    }

    #[inline]
    pub fn square_modulus(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    #[inline]
    pub fn modulus(&self) -> f64 {
        self.square_modulus().sqrt()
    }

    /// Argument in (-π, π]. The root functions inherit the cut along the negative real axis.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.im.atan2(self.re)
    }

    pub fn angle_cos(&self) -> f64 {
        if self.is_null() {
            0.0
        } else {
            self.re / self.modulus()
        }
    }

    pub fn angle_sin(&self) -> f64 {
        if self.is_null() {
            0.0
        } else {
            self.im / self.modulus()
        }
    }

    #[inline]
    pub fn add_re(&self, value: f64) -> Self {
        Complex::new(self.re + value, self.im)
    }

    #[inline]
    pub fn add_im(&self, value: f64) -> Self {
        Complex::new(self.re, self.im + value)
    }

    #[inline]
    pub fn scale(&self, value: f64) -> Self {
        Complex::new(self.re * value, self.im * value)
    }

    #[inline]
    pub fn square(&self) -> Self {
        Complex::new(
            self.re * self.re - self.im * self.im,
            2.0 * self.re * self.im
        )
    }

    #[inline]
    pub fn cube(&self) -> Self {
        Complex::new(
            self.re * self.re * self.re - 3.0 * self.re * self.im * self.im,
            3.0 * self.re * self.re * self.im - self.im * self.im * self.im
        )
    }

    pub fn square_root(&self) -> Self {
        Complex::from_angle(self.angle() / 2.0, self.modulus().sqrt())
    }

    pub fn cube_root(&self) -> Self {
        if self.is_real() {
            return Complex::real(self.re.cbrt());
        }

        // (-i)^3 = i
        if self.is_pure_imaginary() {
            return Complex::new(0.0, -self.im.cbrt());
        }

        Complex::from_angle(self.angle() / 3.0, self.modulus().cbrt())
    }

    pub fn pow(&self, exponent: f64) -> Self {
        Complex::from_angle(self.angle() * exponent, self.modulus().powf(exponent))
    }

    pub fn divide(&self, other: Complex) -> std::result::Result<Complex, MathError> {
        let denominator = other.square_modulus();

        if denominator == 0.0 {
            return Err(MathError::DivisionByZero);
        }

        Ok(Complex::new(
            (self.re * other.re + self.im * other.im) / denominator,
            (self.im * other.re - self.re * other.im) / denominator
        ))
    }

    pub fn divide_by_real(&self, value: f64) -> std::result::Result<Complex, MathError> {
        if value == 0.0 {
            return Err(MathError::DivisionByZero);
        }

        Ok(Complex::new(self.re / value, self.im / value))
    }

    #[inline]
    pub fn square_distance_from(&self, other: Complex) -> f64 {
        (*self - other).square_modulus()
    }
}

impl From<ComplexFixed<f64>> for Complex {
    fn from(value: ComplexFixed<f64>) -> Self {
        Complex::new(value.re, value.im)
    }
}

impl From<Complex> for ComplexFixed<f64> {
    fn from(value: Complex) -> Self {
        ComplexFixed::new(value.re, value.im)
    }
}

impl Display for Complex {
    fn fmt(&self, f: &mut Formatter) -> Result {
        if self.is_real() {
            return write!(f, "{}", self.re);
        }

        if self.is_pure_imaginary() {
            return if self.im == 1.0 {
                write!(f, "i")
            } else {
                write!(f, "{}i", self.im)
            };
        }

        if self.im < 0.0 {
            write!(f, "{}{}i", self.re, self.im)
        } else if self.im == 1.0 {
            write!(f, "{}+i", self.re)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}

impl std::ops::Add<Complex> for Complex {
    type Output = Complex;

    #[inline]
    fn add(self, other: Complex) -> Complex {
        Complex {
            re: self.re + other.re,
            im: self.im + other.im
        }
    }
}

impl std::ops::Sub<Complex> for Complex {
    type Output = Complex;

    #[inline]
    fn sub(self, other: Complex) -> Complex {
        Complex {
            re: self.re - other.re,
            im: self.im - other.im
        }
    }
}

impl std::ops::Mul<Complex> for Complex {
    type Output = Complex;

    #[inline]
    fn mul(self, other: Complex) -> Complex {
        Complex {
            re: self.re * other.re - self.im * other.im,
            im: self.im * other.re + self.re * other.im
        }
    }
}

impl std::ops::Mul<f64> for Complex {
    type Output = Complex;

    #[inline]
    fn mul(self, other: f64) -> Complex {
        self.scale(other)
    }
}

impl std::ops::Mul<Complex> for f64 {
    type Output = Complex;

    #[inline]
    fn mul(self, other: Complex) -> Complex {
        other.scale(self)
    }
}

impl std::ops::Neg for Complex {
    type Output = Complex;

    #[inline]
    fn neg(self) -> Complex {
        Complex {
            re: -self.re,
            im: -self.im
        }
    }
}

impl std::ops::AddAssign<Complex> for Complex {
    #[inline]
    fn add_assign(&mut self, other: Complex) {
        *self = *self + other;
    }
}

impl std::ops::SubAssign<Complex> for Complex {
    #[inline]
    fn sub_assign(&mut self, other: Complex) {
        *self = *self - other;
    }
}

impl std::ops::MulAssign<Complex> for Complex {
    #[inline]
    fn mul_assign(&mut self, other: Complex) {
        *self = *self * other;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Complex, expected: Complex) {
        assert!(
            actual.square_distance_from(expected) < 1e-20,
            "expected {} but got {}", expected, actual
        );
    }

    #[test]
    fn modulus_of_three_four_is_five() {
        assert_eq!(Complex::new(3.0, 4.0).modulus(), 5.0);
        assert_eq!(Complex::new(3.0, 4.0).square_modulus(), 25.0);
    }

    #[test]
    fn divide_then_multiply_round_trips() {
        let pairs = [
            (Complex::new(1.0, 2.0), Complex::new(3.0, -4.0)),
            (Complex::new(-0.5, 0.25), Complex::new(0.0, 1.0)),
            (Complex::new(7.0, 0.0), Complex::new(-2.0, 0.5)),
            (Complex::ZERO, Complex::J),
        ];

        for (a, b) in pairs.iter() {
            let quotient = a.divide(*b).unwrap();
            assert_close(quotient * *b, *a);
        }
    }

    #[test]
    fn division_by_zero_fails() {
        assert_eq!(Complex::ONE.divide(Complex::ZERO), Err(MathError::DivisionByZero));
        assert_eq!(Complex::I.divide_by_real(0.0), Err(MathError::DivisionByZero));
        assert_eq!(Complex::I.divide_by_real(2.0), Ok(Complex::new(0.0, 0.5)));
    }

    #[test]
    fn equality_is_exact() {
        let a = Complex::new(0.1, 0.2);
        let b = Complex::new(0.1 + 1e-18, 0.2);
        let c = Complex::new(0.1 + 1e-15, 0.2);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn square_and_cube_match_multiplication() {
        let z = Complex::new(1.5, -0.75);

        assert_close(z.square(), z * z);
        assert_close(z.cube(), z * z * z);
    }

    #[test]
    fn square_root_squares_back() {
        let values = [
            Complex::new(4.0, 0.0),
            Complex::new(-4.0, 0.0),
            Complex::new(3.0, -4.0),
            Complex::new(-1.0, -1.0),
            Complex::new(0.0, 2.0),
        ];

        for z in values.iter() {
            assert_close(z.square_root().square(), *z);
        }

        assert_close(Complex::new(-4.0, 0.0).square_root(), Complex::new(0.0, 2.0));
    }

    #[test]
    fn cube_root_cubes_back() {
        let values = [
            Complex::new(8.0, 0.0),
            Complex::new(-27.0, 0.0),
            Complex::new(0.0, 8.0),
            Complex::new(0.0, -1.0),
            Complex::new(2.0, 3.0),
        ];

        for z in values.iter() {
            assert_close(z.cube_root().cube(), *z);
        }
    }

    #[test]
    fn real_cube_root_stays_real() {
        assert_eq!(Complex::real(-8.0).cube_root(), Complex::real(-2.0));
        assert_eq!(Complex::new(0.0, 8.0).cube_root(), Complex::new(0.0, -2.0));
    }

    #[test]
    fn pow_uses_polar_form() {
        let z = Complex::new(1.0, 1.0);

        assert_close(z.pow(2.0), z.square());
        assert_close(z.pow(4.0), Complex::real(-4.0));
        assert_close(Complex::real(9.0).pow(0.5), Complex::real(3.0));
    }

    #[test]
    fn cube_roots_of_unity_constants() {
        assert_close(Complex::J.cube(), Complex::ONE);
        assert_close(Complex::J2.cube(), Complex::ONE);
        assert_close(Complex::J * Complex::J, Complex::J2);
    }

    #[test]
    fn angle_helpers() {
        let z = Complex::new(3.0, 4.0);

        assert_eq!(z.angle_cos(), 0.6);
        assert_eq!(z.angle_sin(), 0.8);
        assert_eq!(Complex::ZERO.angle_cos(), 0.0);
        assert_eq!(Complex::ZERO.angle_sin(), 0.0);
        assert_close(Complex::from_angle(z.angle(), z.modulus()), z);
    }

    #[test]
    fn sum_and_product_fold_with_coefficient() {
        let terms = [Complex::new(1.0, 1.0), Complex::new(2.0, -3.0)];

        assert_eq!(Complex::sum(0.5, &terms), Complex::new(3.5, -2.0));
        assert_eq!(Complex::product(-1.0, &terms), Complex::new(-5.0, 1.0));
        assert_eq!(Complex::sum(2.0, &[]), Complex::real(2.0));
    }

    #[test]
    fn display_simplifies_real_and_imaginary() {
        assert_eq!(Complex::real(3.0).to_string(), "3");
        assert_eq!(Complex::ZERO.to_string(), "0");
        assert_eq!(Complex::I.to_string(), "i");
        assert_eq!(Complex::new(0.0, -2.5).to_string(), "-2.5i");
        assert_eq!(Complex::new(1.0, -2.0).to_string(), "1-2i");
        assert_eq!(Complex::new(1.0, 1.0).to_string(), "1+i");
        assert_eq!(Complex::new(1.5, 2.0).to_string(), "1.5+2i");
    }

    #[test]
    fn converts_to_and_from_num_complex() {
        let fixed: ComplexFixed<f64> = Complex::new(1.0, -2.0).into();

        assert_eq!(fixed, ComplexFixed::new(1.0, -2.0));
        assert_eq!(Complex::from(fixed), Complex::new(1.0, -2.0));
    }
}
