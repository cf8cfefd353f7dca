// ─────────────────────────────────────────────────────────────────────
// SCPN Numeric Core — Linear Systems
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Dense linear system solving via Crout LU with partial pivoting.
//!
//! All routines work in place on caller-owned buffers: factorization
//! overwrites its matrix argument with the packed LU factors, and the
//! solve routines overwrite the right-hand side with the solution.
//! Callers that need the original matrix must copy it first.

use ndarray::Array2;
use numeric_types::constants::SMALL_NUMBER;
use numeric_types::error::{NumericError, NumericResult};

/// 2x2 determinant.
#[inline]
pub fn determinant_2x2(a: f64, b: f64, c: f64, d: f64) -> f64 {
    a * d - b * c
}

/// Solve the linear system `A x = b`.
///
/// On entry `x` holds the right-hand side; on exit it holds the solution.
/// Systems of dimension 1 and 2 are solved closed-form without touching
/// `a`; larger systems are factored in place (`a` is overwritten with its
/// LU factors).
///
/// Fails when the system is singular: an exactly zero determinant for the
/// small closed-form paths, a zero row or vanishing pivot for the general
/// path.
pub fn solve_linear_system(a: &mut Array2<f64>, x: &mut [f64]) -> NumericResult<()> {
    let n = check_square(a)?;
    if x.len() != n {
        return Err(NumericError::DimensionMismatch(format!(
            "right-hand side has {} entries for a {n}x{n} system",
            x.len()
        )));
    }

    if n == 2 {
        let det = determinant_2x2(a[[0, 0]], a[[0, 1]], a[[1, 0]], a[[1, 1]]);
        if det == 0.0 {
            return Err(NumericError::Singular("2x2 determinant is zero".into()));
        }
        let y0 = (a[[1, 1]] * x[0] - a[[0, 1]] * x[1]) / det;
        let y1 = (-a[[1, 0]] * x[0] + a[[0, 0]] * x[1]) / det;
        x[0] = y0;
        x[1] = y1;
        return Ok(());
    }
    if n == 1 {
        if a[[0, 0]] == 0.0 {
            return Err(NumericError::Singular("1x1 coefficient is zero".into()));
        }
        x[0] /= a[[0, 0]];
        return Ok(());
    }

    let pivots = lu_factor(a)?;
    lu_solve(a, &pivots, x);
    Ok(())
}

/// Factor `A = LU` in place using Crout's method with implicit row scaling
/// and partial pivoting.
///
/// On success `a` holds the packed factors (unit lower triangle implicit)
/// and the returned vector records the row interchange made at each
/// column; it must be handed unmodified to [`lu_solve`]. On failure `a`
/// is left partially factored.
pub fn lu_factor(a: &mut Array2<f64>) -> NumericResult<Vec<usize>> {
    let n = check_square(a)?;

    // Per-row scale factors: 1 / (largest magnitude in the row).
    let mut scale = vec![0.0; n];
    for i in 0..n {
        let mut largest = 0.0_f64;
        for j in 0..n {
            let t = a[[i, j]].abs();
            if t > largest {
                largest = t;
            }
        }
        if largest == 0.0 {
            return Err(NumericError::Singular(format!("row {i} is entirely zero")));
        }
        scale[i] = 1.0 / largest;
    }

    let mut pivots = vec![0_usize; n];
    for j in 0..n {
        for i in 0..j {
            let mut sum = a[[i, j]];
            for k in 0..i {
                sum -= a[[i, k]] * a[[k, j]];
            }
            a[[i, j]] = sum;
        }

        // Search for the largest scaled pivot in the remainder of the column.
        let mut largest = 0.0_f64;
        let mut max_i = j;
        for i in j..n {
            let mut sum = a[[i, j]];
            for k in 0..j {
                sum -= a[[i, k]] * a[[k, j]];
            }
            a[[i, j]] = sum;

            let t = scale[i] * sum.abs();
            if t >= largest {
                largest = t;
                max_i = i;
            }
        }

        if j != max_i {
            for k in 0..n {
                let t = a[[max_i, k]];
                a[[max_i, k]] = a[[j, k]];
                a[[j, k]] = t;
            }
            scale[max_i] = scale[j];
        }
        pivots[j] = max_i;

        if a[[j, j]].abs() <= SMALL_NUMBER {
            return Err(NumericError::Singular(format!(
                "pivot {j} has magnitude {} (below threshold)",
                a[[j, j]].abs()
            )));
        }

        if j != n - 1 {
            let inv_pivot = 1.0 / a[[j, j]];
            for i in j + 1..n {
                a[[i, j]] *= inv_pivot;
            }
        }
    }

    Ok(pivots)
}

/// Solve `A x = b` from the packed factorization produced by [`lu_factor`].
///
/// `x` holds the right-hand side on entry and the solution on exit. The
/// forward pass applies the recorded permutation while substituting, and
/// skips the leading run of zero right-hand-side entries.
pub fn lu_solve(lu: &Array2<f64>, pivots: &[usize], x: &mut [f64]) {
    let n = pivots.len();

    // Forward substitution; `first` is the index of the first nonzero entry.
    let mut first: Option<usize> = None;
    for i in 0..n {
        let idx = pivots[i];
        let mut sum = x[idx];
        x[idx] = x[i];

        if let Some(f) = first {
            for j in f..i {
                sum -= lu[[i, j]] * x[j];
            }
        } else if sum != 0.0 {
            first = Some(i);
        }
        x[i] = sum;
    }

    // Back substitution.
    for i in (0..n).rev() {
        let mut sum = x[i];
        for j in i + 1..n {
            sum -= lu[[i, j]] * x[j];
        }
        x[i] = sum / lu[[i, i]];
    }
}

/// Invert a square matrix.
///
/// `a` is factored in place (and left that way); the inverse is built one
/// identity column at a time from the single factorization.
pub fn invert_matrix(a: &mut Array2<f64>) -> NumericResult<Array2<f64>> {
    let n = check_square(a)?;
    let pivots = lu_factor(a)?;

    let mut inverse = Array2::zeros((n, n));
    let mut column = vec![0.0; n];
    for j in 0..n {
        column.fill(0.0);
        column[j] = 1.0;
        lu_solve(a, &pivots, &mut column);
        for i in 0..n {
            inverse[[i, j]] = column[i];
        }
    }
    Ok(inverse)
}

/// Estimate the condition number of an already-factored matrix as the
/// ratio of the largest entry magnitude in the (triangular) factors to the
/// smallest diagonal magnitude. Returns `f64::MAX` when a diagonal entry
/// is exactly zero. Meaningless on an unfactored matrix.
pub fn estimate_condition(lu: &Array2<f64>) -> f64 {
    let n = lu.nrows();

    let mut max = 0.0_f64;
    for i in 0..n {
        for j in i..n {
            if lu[[i, j]].abs() > max {
                max = lu[[i, j]].abs();
            }
        }
    }

    let mut min = f64::MAX;
    for i in 0..n {
        if lu[[i, i]].abs() < min {
            min = lu[[i, i]].abs();
        }
    }

    if min == 0.0 {
        f64::MAX
    } else {
        max / min
    }
}

fn check_square(a: &Array2<f64>) -> NumericResult<usize> {
    let n = a.nrows();
    if a.ncols() != n || n == 0 {
        return Err(NumericError::DimensionMismatch(format!(
            "expected a nonempty square matrix, got {}x{}",
            a.nrows(),
            a.ncols()
        )));
    }
    Ok(n)
}
