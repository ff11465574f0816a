//! Closed-form polynomial roots up to degree four.
//!
//! Coefficients are passed highest degree first. A null leading coefficient
//! falls through to the next lower degree, so `roots_4` accepts any polynomial
//! of degree at most four.

use std::f64::consts::PI;

use crate::error::MathError;
use crate::math::{Complex, Polynom};

/// Root of `c1 x + c0`. Empty when there is no variable term.
pub fn roots_1(c1: Complex, c0: Complex) -> Result<Vec<Complex>, MathError> {
    if c1.is_null() {
        return Ok(Vec::new());
    }

    Ok(vec![(-c0).divide(c1)?])
}

/// Both roots of `c2 x^2 + c1 x + c0`, possibly equal.
pub fn roots_2(c2: Complex, c1: Complex, c0: Complex) -> Result<Vec<Complex>, MathError> {
    if c2.is_null() {
        return roots_1(c1, c0);
    }

    let delta = Complex::sum(0.0, &[c1.square(), Complex::product(-4.0, &[c2, c0])]);
    let delta_root = delta.square_root();

    Ok(vec![
        (c1 + delta_root).divide(c2)?.scale(-0.5),
        (c1 - delta_root).divide(c2)?.scale(-0.5),
    ])
}

/// Cardano for one root, then deflation for the remaining two.
pub fn roots_3(c3: Complex, c2: Complex, c1: Complex, c0: Complex) -> Result<Vec<Complex>, MathError> {
    if c3.is_null() {
        return roots_2(c2, c1, c0);
    }

    let c3_square = c3.square();

    // x = t + shift gives t^3 + p t + q = 0
    let p = Complex::sum(0.0, &[
        c1.divide(c3)?,
        c2.square().divide(c3_square)?.scale(-1.0 / 3.0),
    ]);
    let q = Complex::sum(0.0, &[
        c0.divide(c3)?,
        (c2 * c1).divide(c3_square)?.scale(-1.0 / 3.0),
        c2.cube().divide(c3.cube())?.scale(2.0 / 27.0),
    ]);
    let shift = c2.divide(c3)?.scale(-1.0 / 3.0);

    // u^3 and v^3 are the roots of X^2 + q X - p^3 / 27
    let cardano = roots_2(Complex::ONE, q, p.cube().scale(-1.0 / 27.0))?;

    let cube = if cardano[1].square_modulus() > cardano[0].square_modulus() {
        cardano[1]
    } else {
        cardano[0]
    };

    let u = cube.cube_root();

    // Pairing v with u through u v = -p / 3 keeps both on matching branches
    let t = if u.is_null() {
        Complex::ZERO
    } else {
        u + p.divide(u)?.scale(-1.0 / 3.0)
    };

    let root = shift + t;

    // Synthetic division by (x - root)
    let b = c2 + c3 * root;
    let c = c1 + b * root;

    let mut roots = Vec::with_capacity(3);
    roots.push(root);
    roots.extend(roots_2(c3, b, c)?);

    Ok(roots)
}

/// Ferrari's method through a resolvent cubic.
pub fn roots_4(c4: Complex, c3: Complex, c2: Complex, c1: Complex, c0: Complex) -> Result<Vec<Complex>, MathError> {
    if c4.is_null() {
        return roots_3(c3, c2, c1, c0);
    }

    let c4_square = c4.square();
    let c4_cube = c4.cube();
    let ratio = c3.divide(c4)?;

    // x = y + shift gives y^4 + p y^2 + q y + r = 0
    let p = Complex::sum(0.0, &[
        c2.divide(c4)?,
        c3.square().divide(c4_square)?.scale(-0.375),
    ]);
    let q = Complex::sum(0.0, &[
        c1.divide(c4)?,
        (c3 * c2).divide(c4_square)?.scale(-0.5),
        c3.cube().divide(c4_cube)?.scale(0.125),
    ]);
    let r = Complex::sum(0.0, &[
        c0.divide(c4)?,
        (c3 * c1).divide(c4_square)?.scale(-0.25),
        (c3.square() * c2).divide(c4_cube)?.scale(0.0625),
        ratio.square().square().scale(-3.0 / 256.0),
    ]);
    let shift = ratio.scale(-0.25);

    let resolvent = roots_3(
        Complex::real(8.0),
        p.scale(-4.0),
        r.scale(-8.0),
        (r * p).scale(4.0) - q.square(),
    )?;

    // Every resolvent root factors the quartic; the one furthest from p / 2
    // keeps the division by a below well conditioned.
    let mut m = resolvent[0];
    for &candidate in resolvent.iter().skip(1) {
        if (candidate.scale(2.0) - p).square_modulus() > (m.scale(2.0) - p).square_modulus() {
            m = candidate;
        }
    }

    // (y^2 + m)^2 = (a y + b)^2
    let a = (m.scale(2.0) - p).square_root();
    let b = if a.is_null() {
        (m.square() - r).square_root()
    } else {
        q.divide(a)?.scale(-0.5)
    };

    let mut roots = Vec::with_capacity(4);
    roots.extend(roots_2(Complex::ONE, a, m + b)?);
    roots.extend(roots_2(Complex::ONE, -a, m - b)?);

    Ok(roots.into_iter().map(|root| root + shift).collect())
}

/// Polynomial whose roots are the n-th roots of unity, with the exact roots cached.
pub fn unity_roots_polynom(n: i32) -> Result<Polynom, MathError> {
    if n <= 0 {
        return Err(MathError::InvalidArgument(format!("no roots of unity of order {}", n)));
    }

    let mut polynom = Polynom::new();

    // Seed the cache so every added root is recorded exactly
    polynom.roots()?;
    polynom.add_root(Complex::ONE);

    match n {
        1 => {},
        2 => {
            polynom.add_root(Complex::real(-1.0));
        },
        3 => {
            polynom.add_root(Complex::J);
            polynom.add_root(Complex::J2);
        },
        4 => {
            polynom.add_root(Complex::real(-1.0));
            polynom.add_root(Complex::I);
            polynom.add_root(Complex::new(0.0, -1.0));
        },
        _ => {
            for k in 1..n {
                let theta = 2.0 * PI * k as f64 / n as f64;
                polynom.add_root(Complex::from_angle(theta, 1.0));
            }
        }
    }

    Ok(polynom)
}
