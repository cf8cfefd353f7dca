// ─────────────────────────────────────────────────────────────────────
// SCPN Numeric Core — Least Squares
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Ordinary and homogeneous least-squares fitting.
//!
//! Both fitters take the transposed sample matrix `X'` (one sample per
//! row, one unknown per column). The ordinary fit solves `X'M' = Y'`
//! through the normal equations and a matrix inversion; the homogeneous
//! fit solves `X'M' = 0'` as a smallest-eigenvalue problem, since the
//! normal-equation route collapses on a zero right-hand side.

use ndarray::{Array1, Array2};
use numeric_types::constants::SMALL_NUMBER;
use numeric_types::error::{NumericError, NumericResult};

use crate::eigen::jacobi_n;
use crate::linear::invert_matrix;

/// Fit the homogeneous system `X'M' = 0'`.
///
/// The solution is the eigenvector of `X'X` paired with the smallest
/// eigenvalue. Fails with [`NumericError::Underdetermined`] when there are
/// fewer samples than unknowns, before any computation.
pub fn solve_homogeneous_least_squares(xt: &Array2<f64>) -> NumericResult<Array1<f64>> {
    let num_samples = xt.nrows();
    let x_order = xt.ncols();
    if num_samples < x_order {
        return Err(NumericError::Underdetermined {
            samples: num_samples,
            unknowns: x_order,
        });
    }

    // X'X, upper half only (symmetric), then mirrored
    let mut xxt = Array2::zeros((x_order, x_order));
    for k in 0..num_samples {
        for i in 0..x_order {
            for j in i..x_order {
                xxt[[i, j]] += xt[[k, i]] * xt[[k, j]];
            }
        }
    }
    for i in 0..x_order {
        for j in 0..i {
            xxt[[i, j]] = xxt[[j, i]];
        }
    }

    let mut eigenvalues = vec![0.0; x_order];
    let mut eigenvectors = Array2::zeros((x_order, x_order));
    // an eigenbasis that hit the sweep limit is still used as-is
    let _ = jacobi_n(&mut xxt, &mut eigenvalues, &mut eigenvectors);

    // smallest eigenvalue sits at the end of the descending order
    let mut mt = Array1::zeros(x_order);
    for i in 0..x_order {
        mt[i] = eigenvectors[[i, x_order - 1]];
    }
    Ok(mt)
}

/// Fit `X'M' = Y'` by ordinary least squares, returning `M'` with one
/// column per output column of `Y'`.
///
/// With `check_homogeneous` set, each column of `Y'` whose entries are all
/// within [`SMALL_NUMBER`] of zero is treated as a homogeneous system: if
/// every column qualifies and there is a single output column, the call
/// reduces entirely to [`solve_homogeneous_least_squares`]; a mixed set of
/// columns solves the homogeneous problem once and substitutes it into
/// just those columns. Skip the scan (`check_homogeneous = false`) when
/// the system is known not to be homogeneous.
///
/// Fails fast, without touching any output, when there are fewer samples
/// than unknowns or output columns; fails with
/// [`NumericError::Singular`] when `X'X` cannot be inverted.
pub fn solve_least_squares(
    xt: &Array2<f64>,
    yt: &Array2<f64>,
    check_homogeneous: bool,
) -> NumericResult<Array2<f64>> {
    let num_samples = xt.nrows();
    let x_order = xt.ncols();
    let y_order = yt.ncols();

    if yt.nrows() != num_samples {
        return Err(NumericError::DimensionMismatch(format!(
            "X' has {num_samples} samples but Y' has {}",
            yt.nrows()
        )));
    }
    if num_samples < x_order || num_samples < y_order {
        return Err(NumericError::Underdetermined {
            samples: num_samples,
            unknowns: x_order.max(y_order),
        });
    }

    // Scan Y' for homogeneous (all-zero) output columns
    let mut homogeneous_flags = vec![false; y_order];
    let mut some_homogeneous = false;
    if check_homogeneous {
        let mut all_homogeneous = true;
        for flag in homogeneous_flags.iter_mut() {
            *flag = true;
        }
        for i in 0..num_samples {
            for j in 0..y_order {
                if yt[[i, j]].abs() > SMALL_NUMBER {
                    all_homogeneous = false;
                    homogeneous_flags[j] = false;
                }
            }
        }

        if all_homogeneous && y_order == 1 {
            let hmt = solve_homogeneous_least_squares(xt)?;
            let mut mt = Array2::zeros((x_order, 1));
            for i in 0..x_order {
                mt[[i, 0]] = hmt[i];
            }
            return Ok(mt);
        }

        some_homogeneous = homogeneous_flags.iter().any(|&f| f);
    }

    let hmt = if some_homogeneous {
        Some(solve_homogeneous_least_squares(xt)?)
    } else {
        None
    };

    // Normal equations: X'X (upper half, mirrored) and X'Y
    let mut xxt = Array2::zeros((x_order, x_order));
    let mut xyt: Array2<f64> = Array2::zeros((x_order, y_order));
    for k in 0..num_samples {
        for i in 0..x_order {
            for j in i..x_order {
                xxt[[i, j]] += xt[[k, i]] * xt[[k, j]];
            }
            for j in 0..y_order {
                xyt[[i, j]] += xt[[k, i]] * yt[[k, j]];
            }
        }
    }
    for i in 0..x_order {
        for j in 0..i {
            xxt[[i, j]] = xxt[[j, i]];
        }
    }

    let xxt_inverse = invert_matrix(&mut xxt)?;

    // M' = (X'X)^-1 X'Y
    let mut mt = Array2::zeros((x_order, y_order));
    for i in 0..x_order {
        for j in 0..y_order {
            let mut sum = 0.0;
            for k in 0..x_order {
                sum += xxt_inverse[[i, k]] * xyt[[k, j]];
            }
            mt[[i, j]] = sum;
        }
    }

    // Substitute the homogeneous solution into the columns it belongs to
    if let Some(hmt) = hmt {
        for j in 0..y_order {
            if homogeneous_flags[j] {
                for i in 0..x_order {
                    mt[[i, j]] = hmt[i];
                }
            }
        }
    }

    Ok(mt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_exact_line_fit() {
        // y = 2x + 1 sampled exactly; columns of X' are [x, 1]
        let xt = array![[0.0, 1.0], [1.0, 1.0], [2.0, 1.0], [3.0, 1.0]];
        let yt = array![[1.0], [3.0], [5.0], [7.0]];
        let mt = solve_least_squares(&xt, &yt, true).unwrap();
        assert!((mt[[0, 0]] - 2.0).abs() < 1e-10, "slope = {}", mt[[0, 0]]);
        assert!((mt[[1, 0]] - 1.0).abs() < 1e-10, "intercept = {}", mt[[1, 0]]);
    }

    #[test]
    fn test_overdetermined_fit_minimizes_residual() {
        // noisy line; the fit must reproduce numpy's lstsq solution
        // >>> X = np.array([[0,1],[1,1],[2,1],[3,1],[4,1]], float)
        // >>> y = np.array([0.1, 0.9, 2.1, 2.9, 4.1])
        // >>> np.linalg.lstsq(X, y, rcond=None)[0]
        // array([1.  , 0.02])
        let xt = array![[0.0, 1.0], [1.0, 1.0], [2.0, 1.0], [3.0, 1.0], [4.0, 1.0]];
        let yt = array![[0.1], [0.9], [2.1], [2.9], [4.1]];
        let mt = solve_least_squares(&xt, &yt, true).unwrap();
        assert!((mt[[0, 0]] - 1.0).abs() < 1e-10);
        assert!((mt[[1, 0]] - 0.02).abs() < 1e-10);
    }

    #[test]
    fn test_homogeneous_fit_line_through_origin() {
        // samples on y = 2x; null direction of X'X is (2, -1)/sqrt(5)
        let xt = array![[1.0, 2.0], [2.0, 4.0], [3.0, 6.0]];
        let m = solve_homogeneous_least_squares(&xt).unwrap();

        // X m ~ 0
        for k in 0..3 {
            let residual = xt[[k, 0]] * m[0] + xt[[k, 1]] * m[1];
            assert!(residual.abs() < 1e-10, "residual[{k}] = {residual}");
        }
        // normalized
        let norm = (m[0] * m[0] + m[1] * m[1]).sqrt();
        assert!((norm - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_y_matches_homogeneous_fit_exactly() {
        let xt = array![[1.0, 2.0], [2.0, 4.1], [3.0, 5.9], [4.0, 8.2]];
        let yt = array![[0.0], [0.0], [0.0], [0.0]];

        let via_least_squares = solve_least_squares(&xt, &yt, true).unwrap();
        let direct = solve_homogeneous_least_squares(&xt).unwrap();

        for i in 0..2 {
            assert_eq!(
                via_least_squares[[i, 0]], direct[i],
                "short-circuited fit must be bit-identical"
            );
        }
    }

    #[test]
    fn test_mixed_homogeneous_columns() {
        // first output column zero, second a plain line fit
        let xt = array![[0.0, 1.0], [1.0, 1.0], [2.0, 1.0], [3.0, 1.0]];
        let yt = array![[0.0, 1.0], [0.0, 3.0], [0.0, 5.0], [0.0, 7.0]];
        let mt = solve_least_squares(&xt, &yt, true).unwrap();

        let homog = solve_homogeneous_least_squares(&xt).unwrap();
        for i in 0..2 {
            assert_eq!(mt[[i, 0]], homog[i], "homogeneous column substituted");
        }
        assert!((mt[[0, 1]] - 2.0).abs() < 1e-10);
        assert!((mt[[1, 1]] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_check_homogeneous_disabled() {
        // zero Y without the scan goes through the normal equations and
        // yields the zero matrix instead of the null eigenvector
        let xt = array![[0.0, 1.0], [1.0, 1.0], [2.0, 1.0]];
        let yt = array![[0.0], [0.0], [0.0]];
        let mt = solve_least_squares(&xt, &yt, false).unwrap();
        for i in 0..2 {
            assert!(mt[[i, 0]].abs() < 1e-12);
        }
    }

    #[test]
    fn test_exactly_determined_succeeds() {
        // num_samples == x_order
        let xt = array![[1.0, 0.0], [1.0, 1.0]];
        let yt = array![[1.0], [3.0]];
        let mt = solve_least_squares(&xt, &yt, true).unwrap();
        assert!((mt[[0, 0]] - 1.0).abs() < 1e-10);
        assert!((mt[[1, 0]] - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_underdetermined_fails_fast() {
        let xt = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let yt = array![[1.0], [2.0]];
        assert!(solve_least_squares(&xt, &yt, true).is_err());
        assert!(solve_homogeneous_least_squares(&xt).is_err());
    }

    #[test]
    fn test_sample_count_mismatch() {
        let xt = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let yt = array![[1.0], [2.0]];
        assert!(solve_least_squares(&xt, &yt, true).is_err());
    }

    #[test]
    fn test_singular_normal_equations() {
        // duplicate columns make X'X singular
        let xt = array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]];
        let yt = array![[1.0], [2.0], [3.0]];
        assert!(solve_least_squares(&xt, &yt, false).is_err());
    }
}
