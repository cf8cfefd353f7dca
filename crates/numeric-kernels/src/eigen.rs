//! Symmetric eigendecomposition via cyclic Jacobi rotations.
//!
//! Diagonalizes a real symmetric matrix with a bounded sequence of plane
//! rotations, accumulating the eigenvectors alongside. Eigenpairs come out
//! sorted by descending eigenvalue and with a canonical sign: an
//! eigenvector whose components are mostly negative is flipped, so that
//! repeated runs produce reproducible orientations.

use ndarray::Array2;
use numeric_types::error::{NumericError, NumericResult};

/// Sweep limit of the rotation sequence.
const MAX_ROTATIONS: usize = 20;

/// One Jacobi plane rotation applied to the entry pair `(i,j)`, `(k,l)`.
#[inline]
fn rotate(m: &mut Array2<f64>, s: f64, tau: f64, i: usize, j: usize, k: usize, l: usize) {
    let g = m[[i, j]];
    let h = m[[k, l]];
    m[[i, j]] = g - s * (h + g * tau);
    m[[k, l]] = h + s * (g - h * tau);
}

/// Compute all eigenvalues and eigenvectors of the real symmetric matrix
/// `a`.
///
/// - `a`: symmetric n x n input; destroyed (its upper triangle is zeroed
///   out by the rotation sequence).
/// - `w`: receives the n eigenvalues, descending.
/// - `v`: receives the eigenvectors as columns, matching `w`'s order; each
///   is normalized.
///
/// Runs at most 20 sweeps over the off-diagonal entries. The first three
/// sweeps rotate only pairs above a coarse threshold `0.2 * sum / n^2`;
/// later sweeps rotate every remaining pair, zeroing outright those whose
/// contribution is negligible against the diagonal.
///
/// Fails with [`NumericError::NoConvergence`] when the sweep limit is
/// exhausted; `w` and `v` then hold the unsorted partial state, which
/// callers may inspect but should not trust as a decomposition.
pub fn jacobi_n(a: &mut Array2<f64>, w: &mut [f64], v: &mut Array2<f64>) -> NumericResult<()> {
    let n = a.nrows();
    if n == 0
        || a.ncols() != n
        || w.len() != n
        || v.nrows() != n
        || v.ncols() != n
    {
        return Err(NumericError::DimensionMismatch(format!(
            "jacobi: a is {}x{}, w has {} entries, v is {}x{}",
            a.nrows(),
            a.ncols(),
            w.len(),
            v.nrows(),
            v.ncols()
        )));
    }

    for ip in 0..n {
        for iq in 0..n {
            v[[ip, iq]] = 0.0;
        }
        v[[ip, ip]] = 1.0;
    }
    // b carries the running diagonal, z the corrections of the current
    // sweep; z is folded back into b once per sweep.
    let mut b = vec![0.0; n];
    let mut z = vec![0.0; n];
    for ip in 0..n {
        b[ip] = a[[ip, ip]];
        w[ip] = b[ip];
        z[ip] = 0.0;
    }

    let mut converged = false;
    for sweep in 0..MAX_ROTATIONS {
        let mut sm = 0.0;
        for ip in 0..n - 1 {
            for iq in ip + 1..n {
                sm += a[[ip, iq]].abs();
            }
        }
        if sm == 0.0 {
            converged = true;
            break;
        }

        let tresh = if sweep < 3 {
            0.2 * sm / ((n * n) as f64)
        } else {
            0.0
        };

        for ip in 0..n - 1 {
            for iq in ip + 1..n {
                let g = 100.0 * a[[ip, iq]].abs();

                // after four sweeps, skip the rotation if the off-diagonal
                // entry is negligible against both diagonal entries
                if sweep > 3
                    && (w[ip].abs() + g) == w[ip].abs()
                    && (w[iq].abs() + g) == w[iq].abs()
                {
                    a[[ip, iq]] = 0.0;
                } else if a[[ip, iq]].abs() > tresh {
                    let mut h = w[iq] - w[ip];
                    let t = if (h.abs() + g) == h.abs() {
                        a[[ip, iq]] / h
                    } else {
                        let theta = 0.5 * h / a[[ip, iq]];
                        let t = 1.0 / (theta.abs() + (1.0 + theta * theta).sqrt());
                        if theta < 0.0 {
                            -t
                        } else {
                            t
                        }
                    };

                    let c = 1.0 / (1.0 + t * t).sqrt();
                    let s = t * c;
                    let tau = s / (1.0 + c);
                    h = t * a[[ip, iq]];
                    z[ip] -= h;
                    z[iq] += h;
                    w[ip] -= h;
                    w[iq] += h;
                    a[[ip, iq]] = 0.0;

                    for j in 0..ip {
                        rotate(a, s, tau, j, ip, j, iq);
                    }
                    for j in ip + 1..iq {
                        rotate(a, s, tau, ip, j, j, iq);
                    }
                    for j in iq + 1..n {
                        rotate(a, s, tau, ip, j, iq, j);
                    }
                    for j in 0..n {
                        rotate(v, s, tau, j, ip, j, iq);
                    }
                }
            }
        }

        for ip in 0..n {
            b[ip] += z[ip];
            w[ip] = b[ip];
            z[ip] = 0.0;
        }
    }

    if !converged {
        return Err(NumericError::NoConvergence {
            max_sweeps: MAX_ROTATIONS,
        });
    }

    // Sort eigenpairs by descending eigenvalue. The selection scan
    // exchanges on exact ties (>=), which fixes the iteration order inside
    // degenerate eigenspaces; existing behavior, kept as-is.
    for j in 0..n - 1 {
        let mut k = j;
        let mut tmp = w[k];
        for i in j + 1..n {
            if w[i] >= tmp {
                k = i;
                tmp = w[k];
            }
        }
        if k != j {
            w[k] = w[j];
            w[j] = tmp;
            for i in 0..n {
                let t = v[[i, j]];
                v[[i, j]] = v[[i, k]];
                v[[i, k]] = t;
            }
        }
    }

    // Canonical orientation: a rotation sequence can produce either of two
    // opposite vectors for the same eigenvalue; pick the mostly-positive one.
    let ceil_half_n = (n >> 1) + (n & 1);
    for j in 0..n {
        let num_pos = (0..n).filter(|&i| v[[i, j]] >= 0.0).count();
        if num_pos < ceil_half_n {
            for i in 0..n {
                v[[i, j]] = -v[[i, j]];
            }
        }
    }

    Ok(())
}

/// 3x3 eigendecomposition.
///
/// Runs [`jacobi_n`] on a fixed-size symmetric matrix and returns
/// `(eigenvalues, eigenvectors)` with the eigenvectors as rows, sorted by
/// descending eigenvalue.
pub fn eig_3x3(a: &[[f64; 3]; 3]) -> NumericResult<([f64; 3], [[f64; 3]; 3])> {
    let mut m = Array2::from_shape_fn((3, 3), |(i, j)| a[i][j]);
    let mut w = [0.0; 3];
    let mut v = Array2::zeros((3, 3));
    jacobi_n(&mut m, &mut w, &mut v)?;

    let mut vectors = [[0.0; 3]; 3];
    for j in 0..3 {
        for i in 0..3 {
            vectors[j][i] = v[[i, j]];
        }
    }
    Ok((w, vectors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    fn decompose(a0: &Array2<f64>) -> (Vec<f64>, Array2<f64>) {
        let n = a0.nrows();
        let mut a = a0.clone();
        let mut w = vec![0.0; n];
        let mut v = Array2::zeros((n, n));
        jacobi_n(&mut a, &mut w, &mut v).unwrap();
        (w, v)
    }

    #[test]
    fn test_diagonal_matrix() {
        let a0 = array![[1.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 2.0]];
        let (w, _v) = decompose(&a0);
        assert!((w[0] - 3.0).abs() < 1e-12);
        assert!((w[1] - 2.0).abs() < 1e-12);
        assert!((w[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_eigenvalues_descending() {
        let a0 = array![
            [4.0, 1.0, 0.5, 0.0],
            [1.0, 3.0, 0.2, 0.1],
            [0.5, 0.2, 2.0, 0.3],
            [0.0, 0.1, 0.3, 1.0],
        ];
        let (w, _v) = decompose(&a0);
        for i in 1..4 {
            assert!(w[i - 1] >= w[i], "eigenvalues not descending: {w:?}");
        }
    }

    #[test]
    fn test_eigenpairs_satisfy_definition() {
        let a0 = array![
            [2.0, 1.0, 0.0],
            [1.0, 2.0, 1.0],
            [0.0, 1.0, 2.0],
        ];
        let (w, v) = decompose(&a0);

        // A * v_j = w_j * v_j for every column j
        for j in 0..3 {
            for i in 0..3 {
                let mut av = 0.0;
                for k in 0..3 {
                    av += a0[[i, k]] * v[[k, j]];
                }
                assert!(
                    (av - w[j] * v[[i, j]]).abs() < 1e-10,
                    "A*v != w*v at ({i}, {j})"
                );
            }
        }
    }

    #[test]
    fn test_eigenvectors_orthonormal() {
        let a0 = array![
            [5.0, 2.0, 1.0],
            [2.0, 4.0, 0.5],
            [1.0, 0.5, 3.0],
        ];
        let (_w, v) = decompose(&a0);

        for j1 in 0..3 {
            for j2 in 0..3 {
                let mut dot = 0.0;
                for i in 0..3 {
                    dot += v[[i, j1]] * v[[i, j2]];
                }
                let expected = if j1 == j2 { 1.0 } else { 0.0 };
                assert!(
                    (dot - expected).abs() < 1e-10,
                    "columns {j1} and {j2} not orthonormal: {dot}"
                );
            }
        }
    }

    #[test]
    fn test_canonical_orientation() {
        let a0 = array![
            [2.0, -1.0, 0.0],
            [-1.0, 2.0, -1.0],
            [0.0, -1.0, 2.0],
        ];
        let (_w, v) = decompose(&a0);

        // at least half the components of every eigenvector are non-negative
        for j in 0..3 {
            let num_pos = (0..3).filter(|&i| v[[i, j]] >= 0.0).count();
            assert!(num_pos >= 2, "column {j} not canonically oriented");
        }
    }

    #[test]
    fn test_eig_3x3_matches_general_routine() {
        let a = [[2.0, 1.0, 0.0], [1.0, 2.0, 1.0], [0.0, 1.0, 2.0]];
        let (w, vectors) = eig_3x3(&a).unwrap();

        let a0 = array![[2.0, 1.0, 0.0], [1.0, 2.0, 1.0], [0.0, 1.0, 2.0]];
        let (w_ref, v_ref) = decompose(&a0);
        for j in 0..3 {
            assert!((w[j] - w_ref[j]).abs() < 1e-14);
            for i in 0..3 {
                assert!((vectors[j][i] - v_ref[[i, j]]).abs() < 1e-14);
            }
        }
    }

    #[test]
    fn test_2x2_known_pair() {
        let a0 = array![[2.0, 1.0], [1.0, 2.0]];
        let (w, _v) = decompose(&a0);
        assert!((w[0] - 3.0).abs() < 1e-12);
        assert!((w[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut a = Array2::zeros((3, 3));
        let mut w = vec![0.0; 2];
        let mut v = Array2::zeros((3, 3));
        assert!(jacobi_n(&mut a, &mut w, &mut v).is_err());
    }
}
