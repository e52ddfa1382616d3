/* ************************************************************************ **
** This file is part of stridemat, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Determinant, inverse and chain multiplication.
//!
//! The kernels only ever read their inputs through the coordinate accessor
//! (into a dense row-major scratch copy), so they are oblivious to how the
//! input is laid out in its buffer. A transposed view is just another matrix.

use crate::matrix::{Matrix, Matrix_, MatrixRef};
use crate::{Error, Result};

use ::std::cmp::Ordering;
use ::num_traits::Float;
use ::log::{debug, warn};

impl<T: Float, Vs: AsRef<[T]>> Matrix_<T, Vs> {
    /// Determinant, by LU decomposition with partial pivoting.
    ///
    /// The determinant of a 0x0 matrix is 1.
    pub fn determinant(&self) -> Result<T>
    { determinant(&self.as_matrix_ref()) }

    /// A fresh matrix holding the inverse of this one, in the default layout.
    ///
    /// See [`inverse`] for the singularity criterion.
    pub fn inverting_clone(&self) -> Result<Matrix<T>>
    { inverse(&self.as_matrix_ref()) }
}

/// Row-major scratch copy of a square matrix.
fn square_scratch<T: Float>(m: &MatrixRef<'_, T>) -> Result<(usize, Vec<T>)>
{
    let [rows, cols] = m.dims();
    if rows != cols {
        return Err(Error::NotSquare { rows, cols });
    }
    Ok((rows, m.to_row_major_vec()?))
}

// index of the row at or below `k` with the largest magnitude in column `k`
fn pivot_row<T: Float>(a: &[T], n: usize, k: usize) -> usize
{
    (k..n).fold(k, |best, i| {
        match a[i * n + k].abs().partial_cmp(&a[best * n + k].abs()) {
            Some(Ordering::Greater) => i,
            _ => best,
        }
    })
}

fn swap_rows<T>(a: &mut [T], n: usize, i: usize, j: usize)
{
    for c in 0..n {
        a.swap(i * n + c, j * n + c);
    }
}

pub fn determinant<T: Float>(m: &MatrixRef<'_, T>) -> Result<T>
{
    let (n, mut a) = square_scratch(m)?;

    let mut det = T::one();
    for k in 0..n {
        let p = pivot_row(&a, n, k);
        if a[p * n + k] == T::zero() {
            return Ok(T::zero());
        }
        if p != k {
            swap_rows(&mut a, n, p, k);
            det = -det;
        }

        let pivot = a[k * n + k];
        det = det * pivot;
        for i in k + 1..n {
            let factor = a[i * n + k] / pivot;
            for j in k..n {
                a[i * n + j] = a[i * n + j] - factor * a[k * n + j];
            }
        }
    }
    Ok(det)
}

/// Matrix inverse, by Gauss-Jordan elimination with partial pivoting.
///
/// The matrix is reported [`Error::Singular`] when the best available pivot at
/// some step has magnitude `<= n * ε * max|a_ij|`, where `ε` is the machine
/// epsilon of `T`. (so in particular, the zero matrix is singular)
pub fn inverse<T: Float>(m: &MatrixRef<'_, T>) -> Result<Matrix<T>>
{
    let (n, mut a) = square_scratch(m)?;

    let scale = a.iter().fold(T::zero(), |acc, x| acc.max(x.abs()));
    let n_float: T = ::num_traits::NumCast::from(n).expect("(BUG) usize not castable to float");
    let tol = n_float * T::epsilon() * scale;

    let mut inv = vec![T::zero(); n * n];
    for i in 0..n {
        inv[i * n + i] = T::one();
    }

    for k in 0..n {
        let p = pivot_row(&a, n, k);
        // (written this way so that NaN is also rejected)
        if !(a[p * n + k].abs() > tol) {
            warn!("singular matrix: no usable pivot in column {} of {}", k, n);
            return Err(Error::Singular);
        }
        if p != k {
            swap_rows(&mut a, n, p, k);
            swap_rows(&mut inv, n, p, k);
        }

        let pivot = a[k * n + k];
        for j in 0..n {
            a[k * n + j] = a[k * n + j] / pivot;
            inv[k * n + j] = inv[k * n + j] / pivot;
        }

        for i in (0..n).filter(|&i| i != k) {
            let factor = a[i * n + k];
            if factor == T::zero() {
                continue;
            }
            for j in 0..n {
                a[i * n + j] = a[i * n + j] - factor * a[k * n + j];
                inv[i * n + j] = inv[i * n + j] - factor * inv[k * n + j];
            }
        }
    }
    Matrix::from_row_major([n, n], &inv)
}

/// Product of two dense row-major operands.
fn matmul<T: Float>(
    (a, [m, k]): (&[T], [usize; 2]),
    (b, [_, n]): (&[T], [usize; 2]),
) -> Vec<T>
{
    let mut out = Vec::with_capacity(m * n);
    for i in 0..m {
        for j in 0..n {
            let dot = (0..k).fold(T::zero(), |acc, p| acc + a[i * k + p] * b[p * n + j]);
            out.push(dot);
        }
    }
    out
}

fn check_chain<T>(operands: &[MatrixRef<'_, T>]) -> Result<[usize; 2]>
{
    if operands.len() < 2 {
        return Err(Error::ChainTooShort(operands.len()));
    }
    for pair in operands.windows(2) {
        if pair[0].num_cols() != pair[1].num_rows() {
            return Err(Error::ShapeMismatch(pair[0].dims().to_vec(), pair[1].dims().to_vec()));
        }
    }
    Ok([operands[0].num_rows(), operands[operands.len() - 1].num_cols()])
}

// returns (row-major data, dims)
fn chain_product<T: Float>(operands: &[MatrixRef<'_, T>]) -> Result<(Vec<T>, [usize; 2])>
{
    let dims = check_chain(operands)?;
    debug!("multiplying chain of {} matrices into {:?}", operands.len(), dims);

    let first = &operands[0];
    let mut acc = (first.to_row_major_vec()?, first.dims());
    for rhs in &operands[1..] {
        let rhs_data = rhs.to_row_major_vec()?;
        let data = matmul((&acc.0[..], acc.1), (&rhs_data[..], rhs.dims()));
        acc = (data, [acc.1[0], rhs.num_cols()]);
    }
    debug_assert_eq!(acc.1, dims);
    Ok(acc)
}

/// Multiply a chain of at least two matrices, strictly left to right,
/// into a freshly allocated matrix.
pub fn mul<T: Float>(operands: &[MatrixRef<'_, T>]) -> Result<Matrix<T>>
{
    let (data, dims) = chain_product(operands)?;
    Matrix::from_row_major(dims, &data)
}

/// Multiply a chain of at least two matrices, strictly left to right,
/// overwriting `dst`.
///
/// `dst` must already have the shape of the product. It is not touched unless
/// the whole chain succeeds. Returns `dst`, for chaining.
pub fn mul_into<'d, T, Vs>(
    dst: &'d mut Matrix_<T, Vs>,
    operands: &[MatrixRef<'_, T>],
) -> Result<&'d mut Matrix_<T, Vs>>
where
    T: Float,
    Vs: AsRef<[T]> + AsMut<[T]>,
{
    let (data, dims) = chain_product(operands)?;
    if dst.dims() != dims {
        return Err(Error::ShapeMismatch(dims.to_vec(), dst.dims().to_vec()));
    }
    dst.copy(&data)
}
