// ─────────────────────────────────────────────────────────────────────
// SCPN Numeric Core — Polynomial Roots
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Real roots of low-degree polynomials.
//!
//! Two families plus one iterative scheme:
//!
//! - a degree-descending closed-form family ([`solve_linear`],
//!   [`solve_quadratic`], [`solve_cubic`]) where a zero leading
//!   coefficient delegates to the next-lower degree and the outcome is a
//!   qualitative [`RootSet`];
//! - multiplicity-aware solvers for monic polynomials
//!   ([`quadratic_roots`], [`cubic_roots`], [`quartic_roots`]) returning
//!   `(value, multiplicity)` records, used internally by Ferrari's quartic
//!   scheme;
//! - [`lin_bairstow`], an even/odd-degree quadratic-factor deflation for
//!   arbitrary degree.

use num_complex::Complex64;
use numeric_types::error::{NumericError, NumericResult};
use rand::Rng;
use std::cmp::Ordering;
use std::f64::consts::PI;

const INV3: f64 = 1.0 / 3.0;
const SQRT3: f64 = 1.732_050_807_568_877_2;

/// A real root together with its multiplicity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    pub value: f64,
    pub multiplicity: usize,
}

impl Root {
    pub fn new(value: f64, multiplicity: usize) -> Self {
        Root {
            value,
            multiplicity,
        }
    }
}

/// Qualitative outcome of the closed-form linear/quadratic/cubic solvers.
#[derive(Debug, Clone, PartialEq)]
pub enum RootSet {
    /// Every value solves the (identically zero) equation.
    Infinite,
    /// The equation has no solution at all.
    Empty,
    /// Distinct real roots, in no particular order.
    Distinct(Vec<f64>),
    /// A complex conjugate pair and no real roots.
    ComplexPair,
    /// One real root plus a complex conjugate pair `re ± im*i`.
    RealAndComplexPair { real: f64, pair: Complex64 },
}

/// Outcome of the multiplicity-aware quadratic solver.
#[derive(Debug, Clone, PartialEq)]
pub enum QuadraticRoots {
    /// All coefficients vanish: any value is a root.
    Infinite,
    /// The real roots with multiplicities; empty for a negative
    /// discriminant.
    Roots(Vec<Root>),
}

#[inline]
fn sign(x: f64) -> f64 {
    if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

// ───────────────────── closed-form, degree-descending ─────────────────

/// Solve `c2*t + c3 = 0`.
pub fn solve_linear(c2: f64, c3: f64) -> RootSet {
    if c2 != 0.0 {
        RootSet::Distinct(vec![-c3 / c2])
    } else if c3 == 0.0 {
        RootSet::Infinite
    } else {
        RootSet::Empty
    }
}

/// Solve `c1*t^2 + c2*t + c3 = 0`.
///
/// A positive discriminant yields two roots computed through the
/// sign-matched intermediate `Q = -(c2 + sign(c2)*sqrt(disc)) / 2`, which
/// sidesteps the cancellation of the textbook formula; the second root is
/// `c3 / Q`. A negative discriminant reports the conjugate pair without
/// root values. Zero `c1` delegates to [`solve_linear`].
pub fn solve_quadratic(c1: f64, c2: f64, c3: f64) -> RootSet {
    if c1 == 0.0 {
        return solve_linear(c2, c3);
    }

    let discriminant = c2 * c2 - 4.0 * c1 * c3;
    if discriminant >= 0.0 {
        let q = -0.5 * (c2 + sign(c2) * discriminant.sqrt());
        let r1 = q / c1;
        let r2 = if q == 0.0 { 0.0 } else { c3 / q };
        if r1 == r2 {
            RootSet::Distinct(vec![r1])
        } else {
            RootSet::Distinct(vec![r1, r2])
        }
    } else {
        RootSet::ComplexPair
    }
}

/// Solve `c0*t^3 + c1*t^2 + c2*t + c3 = 0`.
///
/// Reduces to depressed form and branches on `R^2 <= Q^3`: the
/// trigonometric (arccos) formula for three real roots (duplicates
/// collapsed by direct comparison, the `Q^3 = 0` triple root handled
/// separately), or Cardano's formula for one real root plus a conjugate
/// pair. Zero `c0` delegates to [`solve_quadratic`].
pub fn solve_cubic(c0: f64, c1: f64, c2: f64, c3: f64) -> RootSet {
    if c0 == 0.0 {
        return solve_quadratic(c1, c2, c3);
    }

    let c1 = c1 / c0;
    let c2 = c2 / c0;
    let c3 = c3 / c0;

    let q = (c1 * c1 - 3.0 * c2) / 9.0;
    let r = (2.0 * c1 * c1 * c1 - 9.0 * c1 * c2 + 27.0 * c3) / 54.0;
    let r_squared = r * r;
    let q_cubed = q * q * q;

    if r_squared <= q_cubed {
        if q_cubed == 0.0 {
            // triple real root
            return RootSet::Distinct(vec![-c1 / 3.0]);
        }

        let theta = (r / q_cubed.sqrt()).acos();
        let r1 = -2.0 * q.sqrt() * (theta / 3.0).cos() - c1 / 3.0;
        let mut r2 = -2.0 * q.sqrt() * ((theta + 2.0 * PI) / 3.0).cos() - c1 / 3.0;
        let r3 = -2.0 * q.sqrt() * ((theta - 2.0 * PI) / 3.0).cos() - c1 / 3.0;

        // collapse exactly equal values into a shorter distinct list
        let mut num_roots = 3;
        if r1 == r2 {
            num_roots = 2;
            r2 = r3;
        } else if r1 == r3 {
            num_roots = 2;
        }
        if r2 == r3 && num_roots == 3 {
            num_roots = 2;
        }
        if r1 == r2 {
            num_roots = 1;
        }

        match num_roots {
            1 => RootSet::Distinct(vec![r1]),
            2 => RootSet::Distinct(vec![r1, r2]),
            _ => RootSet::Distinct(vec![r1, r2, r3]),
        }
    } else {
        // single real root and a complex conjugate pair
        let a = -sign(r) * (r.abs() + (r_squared - q_cubed).sqrt()).powf(INV3);
        let b = if a == 0.0 { 0.0 } else { q / a };

        let real = (a + b) - c1 / 3.0;
        let pair_re = -0.5 * (a + b) - c1 / 3.0;
        let pair_im = SQRT3 / 2.0 * (a - b);
        RootSet::RealAndComplexPair {
            real,
            pair: Complex64::new(pair_re, pair_im),
        }
    }
}

// ───────────────────── multiplicity-aware, monic ──────────────────────

/// Real roots, with multiplicities, of `c[0]*x^2 + c[1]*x + c[2]`.
///
/// Returns [`QuadraticRoots::Infinite`] when every coefficient vanishes,
/// and an empty root list for a negative discriminant.
pub fn quadratic_roots(c: &[f64; 3]) -> QuadraticRoots {
    if c[0] == 0.0 {
        if c[1] != 0.0 {
            return QuadraticRoots::Roots(vec![Root::new(-c[2] / c[1], 1)]);
        }
        if c[2] != 0.0 {
            return QuadraticRoots::Roots(Vec::new());
        }
        return QuadraticRoots::Infinite;
    }

    let delta = c[1] * c[1] - 4.0 * c[0] * c[2];
    if delta >= 0.0 {
        let fac = 1.0 / (2.0 * c[0]);
        if delta != 0.0 {
            let s = delta.sqrt();
            QuadraticRoots::Roots(vec![
                Root::new((-s - c[1]) * fac, 1),
                Root::new((s - c[1]) * fac, 1),
            ])
        } else {
            QuadraticRoots::Roots(vec![Root::new(-c[1] * fac, 2)])
        }
    } else {
        QuadraticRoots::Roots(Vec::new())
    }
}

/// Unpack the root list of a quadratic known to be non-degenerate.
fn quadratic_root_list(c: &[f64; 3]) -> Vec<Root> {
    match quadratic_roots(c) {
        QuadraticRoots::Roots(roots) => roots,
        // unreachable for a monic polynomial
        QuadraticRoots::Infinite => Vec::new(),
    }
}

/// Real roots, with multiplicities, of the monic cubic
/// `x^3 + c[0]*x^2 + c[1]*x + c[2]`.
///
/// Specialized Tartaglia–Cardano extraction: zero constant, linear, and
/// quadratic coefficients are peeled off before any cube root or
/// trigonometric evaluation, so the trivial configurations cost a few
/// comparisons only. Unlike [`solve_cubic`], repeated roots are stored
/// once, and nothing is reported about complex roots.
pub fn cubic_roots(c: &[f64; 3]) -> Vec<Root> {
    let eps = f64::EPSILON;

    // constant term vanishes: x = 0 plus a quadratic factor
    if c[2].abs() < eps {
        if c[1].abs() < eps {
            if c[0].abs() < eps {
                return vec![Root::new(0.0, 3)];
            }
            return vec![Root::new(0.0, 2), Root::new(-c[0], 1)];
        }

        let mut roots = vec![Root::new(0.0, 1)];
        let delta = c[0] * c[0] - 4.0 * c[1];
        if delta > eps {
            let s = delta.sqrt();
            roots.push(Root::new((-s - c[0]) * 0.5, 1));
            roots.push(Root::new((s - c[0]) * 0.5, 1));
        } else if delta >= -eps {
            roots.push(Root::new(-c[0] * 0.5, 2));
        }
        return roots;
    }

    // reduce to x^3 + p*x + q
    let shift = -c[0] * INV3;
    let a2 = c[0] * c[0];
    let p = c[1] - a2 / 3.0;
    let q = c[0] * (2.0 * a2 / 9.0 - c[1]) / 3.0 + c[2];

    if p.abs() < eps {
        if q.abs() < eps {
            return vec![Root::new(shift, 3)];
        }
        return vec![Root::new((-q).cbrt() + shift, 3)];
    }

    if q.abs() < eps {
        let mut roots = vec![Root::new(shift, 1)];
        if p < 0.0 {
            let x = (-p).sqrt();
            roots.push(Root::new(x + shift, 1));
            roots.push(Root::new(-x + shift, 1));
        }
        return roots;
    }

    let p_3 = p * INV3;
    let q_2 = q * 0.5;
    let d = p_3 * p_3 * p_3 + q_2 * q_2;

    if d.abs() < eps {
        // one simple and one double real root
        let u = (-q_2).cbrt();
        return vec![Root::new(2.0 * u + shift, 1), Root::new(-u + shift, 2)];
    }
    if d > 0.0 {
        // one simple real root
        let u = (d.sqrt() - q_2).cbrt();
        return vec![Root::new(u - p_3 / u + shift, 1)];
    }

    // three simple real roots
    let smp_3 = (-p_3).sqrt();
    let argu = (q_2 / (p_3 * smp_3)).acos() * INV3;
    let mut x1 = argu.cos();
    let mut x2 = SQRT3 * (1.0 - x1 * x1).sqrt();
    x1 *= smp_3;
    x2 *= smp_3;

    let r0 = 2.0 * x1 + shift;
    let r1 = x2 - x1 + shift;
    let r2 = r1 - 2.0 * x2;
    vec![
        Root::new(r0, 1),
        Root::new(r1, 1),
        Root::new(r2, 1),
    ]
}

/// Real roots, with multiplicities, of the monic quartic
/// `x^4 + c[0]*x^3 + c[1]*x^2 + c[2]*x + c[3]`.
///
/// Ferrari's method. Trivial coefficient configurations are eliminated
/// first; a depressed quartic whose odd coefficient vanishes is solved as
/// a biquadratic; the general case goes through the resolvent cubic
/// `y^3 + 2a*y^2 + (a^2 - 4d)*y - b^2`, whose extracted root `alpha^2`
/// splits the quartic into two quadratics. Candidate roots are sorted,
/// exactly equal neighbors merged (multiplicities summed), and shifted
/// back by the depression offset.
pub fn quartic_roots(c: &[f64; 4]) -> Vec<Root> {
    let eps = f64::EPSILON;

    // constant term vanishes: x = 0 plus a cubic factor
    if c[3].abs() < eps {
        if c[2].abs() < eps {
            if c[1].abs() < eps {
                if c[0].abs() < eps {
                    return vec![Root::new(0.0, 4)];
                }
                return vec![Root::new(-c[1], 1), Root::new(0.0, 3)];
            }
            let mut roots = quadratic_root_list(&[1.0, c[0], c[1]]);
            roots.push(Root::new(0.0, 2));
            return roots;
        }
        let mut roots = cubic_roots(&[c[0], c[1], c[2]]);
        roots.push(Root::new(0.0, 1));
        return roots;
    }

    // already biquadratic: x^4 + c[1]*x^2 + c[3]
    if c[0].abs() < eps && c[2].abs() < eps {
        if c[1].abs() < eps {
            if c[3] < 0.0 {
                return Vec::new();
            }
            return vec![Root::new(c[3].sqrt().sqrt(), 4)];
        }
        return unpack_squared_roots(&quadratic_root_list(&[1.0, c[1], c[3]]), 0.0, eps);
    }

    // step 1: reduce to x^4 + a*x^2 + b*x + d
    let p2d8 = c[0] * c[0] * 0.125;
    let qd2 = c[1] * 0.5;
    let a = c[1] - 3.0 * p2d8;
    let b = c[0] * (p2d8 - qd2) + c[2];
    let d = p2d8 * (qd2 - 0.75 * p2d8) - c[0] * c[2] * 0.25 + c[3];
    let shift = -c[0] * 0.25;

    // the reduced equation is biquadratic
    if b.abs() < eps {
        return unpack_squared_roots(&quadratic_root_list(&[1.0, a, d]), shift, eps);
    }

    // step 2: solve the resolvent cubic
    let resolvent = cubic_roots(&[2.0 * a, a * a - 4.0 * d, -b * b]);

    // step 3: pick alpha^2, scanning the root list from the back while
    // negative (the resolvent always has a non-negative root)
    let mut idx = resolvent.len() - 1;
    let mut alpha2 = resolvent[idx].value;
    while alpha2 < 0.0 && idx > 0 {
        idx -= 1;
        alpha2 = resolvent[idx].value;
    }

    // step 4: split into two quadratics
    let alpha = alpha2.sqrt();
    let rho = -b / alpha;
    let cc2 = (a + alpha2 + rho) * 0.5;
    let mut candidates = quadratic_root_list(&[1.0, alpha, cc2]);
    candidates.extend(quadratic_root_list(&[1.0, -alpha, cc2 - rho]));
    if candidates.is_empty() {
        return Vec::new();
    }

    // step 5: sort, merge equal values, shift back
    candidates.sort_by(|x, y| x.value.partial_cmp(&y.value).unwrap_or(Ordering::Equal));
    let mut merged: Vec<Root> = Vec::with_capacity(candidates.len());
    for root in candidates {
        match merged.last_mut() {
            Some(last) if last.value == root.value => last.multiplicity += root.multiplicity,
            _ => merged.push(root),
        }
    }
    for root in &mut merged {
        root.value += shift;
    }
    merged
}

/// Map the roots of a quadratic in `x^2` back to roots in `x`: a zero
/// root keeps the shift with doubled multiplicity, a positive root yields
/// a `±sqrt` pair, a negative root contributes nothing.
fn unpack_squared_roots(squared: &[Root], shift: f64, eps: f64) -> Vec<Root> {
    let mut roots = Vec::with_capacity(2 * squared.len());
    for root in squared {
        if root.value.abs() < eps {
            roots.push(Root::new(shift, 2 * root.multiplicity));
        } else if root.value > eps {
            let s = root.value.sqrt();
            roots.push(Root::new(s + shift, root.multiplicity));
            roots.push(Root::new(-s + shift, root.multiplicity));
        }
    }
    roots
}

// ───────────────────── Lin–Bairstow deflation ─────────────────────────

/// Extract the real roots of `c[0]*x^d + ... + c[d]` by repeated
/// quadratic-factor deflation (Lin–Bairstow's method).
///
/// `c` is normalized to monic form and consumed by the deflation in
/// place. Each factor `x^2 + R*x + S` is found by Newton iteration on
/// `(R, S)` over two synthetic-division remainder rows; the 2x2 update is
/// solved with explicit determinants, a vanishing determinant forcing a
/// unit step. Stagnation escapes: every 100 iterations `R` is reseeded
/// from `rng` (uniform in `[0, 2)`), and every 200 iterations the
/// tolerance is relaxed tenfold; the relaxation is visible to the caller
/// through `tolerance`. Factors with complex roots contribute nothing to
/// the returned list.
///
/// Fails with [`NumericError::ZeroLeadingCoefficient`] when `c[0]` is
/// zero.
pub fn lin_bairstow<R: Rng>(
    c: &mut [f64],
    tolerance: &mut f64,
    rng: &mut R,
) -> NumericResult<Vec<f64>> {
    if c.is_empty() || c[0] == 0.0 {
        return Err(NumericError::ZeroLeadingCoefficient);
    }

    let d = c.len() - 1;
    let lead = c[0];
    for coeff in c.iter_mut().skip(1) {
        *coeff /= lead;
    }

    let mut div1 = vec![0.0; d + 1];
    let mut div2 = vec![0.0; d + 1];
    div1[0] = 1.0;
    div2[0] = 1.0;

    let mut i = d;
    while i > 2 {
        let mut r = 0.0;
        let mut s = 0.0;
        let mut dr: f64 = 1.0;
        let mut ds: f64 = 0.0;
        let mut n_iterations: usize = 1;

        while dr.abs() + ds.abs() > *tolerance {
            // relax the tolerance after 100 iterations did not suffice to
            // converge within the current tolerance
            if n_iterations % 100 == 0 {
                r = rng.gen_range(0.0..2.0);
                if n_iterations % 200 == 0 {
                    *tolerance *= 10.0;
                }
            }

            div1[1] = c[1] - r;
            div2[1] = div1[1] - r;
            for j in 2..=i {
                div1[j] = c[j] - r * div1[j - 1] - s * div1[j - 2];
                div2[j] = div1[j] - r * div2[j - 1] - s * div2[j - 2];
            }

            let mut det = div2[i - 1] * div2[i - 3] - div2[i - 2] * div2[i - 2];
            let mut det_r = div1[i] * div2[i - 3] - div1[i - 1] * div2[i - 2];
            let mut det_s = div1[i - 1] * div2[i - 1] - div1[i] * div2[i - 2];
            if det.abs() < f64::EPSILON {
                det = 1.0;
                det_r = 1.0;
                det_s = 1.0;
            }

            dr = det_r / det;
            ds = det_s / det;
            r += dr;
            s += ds;
            n_iterations += 1;
        }

        // deflate by x^2 + R*x + S
        for j in 0..i - 1 {
            c[j] = div1[j];
        }
        c[i] = s;
        c[i - 1] = r;
        i -= 2;
    }

    let mut roots = Vec::with_capacity(d);
    let mut i = d;
    while i >= 2 {
        let mut delta = c[i - 1] * c[i - 1] - 4.0 * c[i];
        if delta >= 0.0 {
            if delta != 0.0 {
                delta = delta.sqrt();
                roots.push((-c[i - 1] - delta) / 2.0);
                roots.push((-c[i - 1] + delta) / 2.0);
            } else {
                roots.push(-c[1]);
                roots.push(-c[1]);
            }
        }
        i -= 2;
    }
    if d % 2 == 1 {
        // what's left when the degree is odd
        roots.push(-c[1]);
    }

    Ok(roots)
}
