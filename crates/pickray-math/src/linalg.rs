//! Small dense linear-algebra kernels.
//!
//! Every routine here is allocation-free: each matrix is a
//! fixed-size nalgebra [`SMatrix`] owned by the caller, so independent rays
//! can run them concurrently without sharing scratch space.

use nalgebra::{Matrix3x4, SMatrix};

use crate::{Mat4, Vec3};

/// Reduce `m` to reduced row-echelon form in place.
///
/// Gauss-Jordan elimination with partial pivoting: for each column the row
/// with the largest magnitude among the rows not yet used as pivots is
/// swapped up, normalized to 1, and eliminated from every other row.
/// Columns whose largest remaining entry is exactly zero are skipped.
///
/// Returns the number of pivot columns found. Singular systems are not an
/// error; the unpivoted columns are simply left as they are.
pub fn rref<const R: usize, const C: usize>(m: &mut SMatrix<f64, R, C>) -> usize {
    rref_with_tolerance(m, 0.0)
}

/// [`rref`] that also skips columns whose largest remaining magnitude is
/// `<= eps`.
///
/// Ties between equal-magnitude candidates keep the topmost row.
pub fn rref_with_tolerance<const R: usize, const C: usize>(
    m: &mut SMatrix<f64, R, C>,
    eps: f64,
) -> usize {
    let mut pivot_row = 0;

    for col in 0..C {
        if pivot_row == R {
            break;
        }

        let mut best = pivot_row;
        let mut best_mag = m[(pivot_row, col)].abs();
        for row in pivot_row + 1..R {
            let mag = m[(row, col)].abs();
            if mag > best_mag {
                best = row;
                best_mag = mag;
            }
        }

        if best_mag.is_nan() || best_mag <= eps {
            continue;
        }

        if best != pivot_row {
            m.swap_rows(best, pivot_row);
        }

        let pivot = m[(pivot_row, col)];
        for c in 0..C {
            m[(pivot_row, c)] /= pivot;
        }
        m[(pivot_row, col)] = 1.0;

        for row in 0..R {
            if row == pivot_row {
                continue;
            }
            let factor = m[(row, col)];
            if factor == 0.0 {
                continue;
            }
            for c in 0..C {
                let delta = factor * m[(pivot_row, c)];
                m[(row, c)] -= delta;
            }
            m[(row, col)] = 0.0;
        }

        pivot_row += 1;
    }

    pivot_row
}

/// Augmented system `[a b c | point]`, one row per coordinate.
fn augmented(a: &Vec3, b: &Vec3, c: &Vec3, point: &Vec3) -> Matrix3x4<f64> {
    Matrix3x4::from_columns(&[*a, *b, *c, *point])
}

/// Express `point` as `c0 * a + c1 * b + c2 * c`.
///
/// Returns `(c0, c1, c2)`. When the basis is degenerate the result is
/// whatever the reduction leaves in the augmented column; it is not unique
/// and must not be trusted. Use [`lin_comb_solution_checked`] to detect that
/// case.
pub fn lin_comb_solution(a: &Vec3, b: &Vec3, c: &Vec3, point: &Vec3) -> Vec3 {
    let mut m = augmented(a, b, c, point);
    rref(&mut m);
    m.column(3).into_owned()
}

/// Like [`lin_comb_solution`], but returns `None` when `a`, `b`, `c` do not
/// span 3D space.
pub fn lin_comb_solution_checked(a: &Vec3, b: &Vec3, c: &Vec3, point: &Vec3) -> Option<Vec3> {
    let mut m = augmented(a, b, c, point);
    rref(&mut m);
    // Full rank reduces the coefficient block to exactly the identity.
    if m.fixed_view::<3, 3>(0, 0).is_identity(0.0) {
        Some(m.column(3).into_owned())
    } else {
        None
    }
}

/// Apply `m` to `v` as a homogeneous point with implicit `w = 1`.
///
/// Computes `m * (v, 1)` and keeps the first three components. There is no
/// perspective divide, so this is only meaningful for affine matrices.
pub fn transform_point(m: &Mat4, v: &Vec3) -> Vec3 {
    (m * v.push(1.0)).xyz()
}
