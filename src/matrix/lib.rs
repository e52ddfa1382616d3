/* ************************************************************************ **
** This file is part of stridemat, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Dense matrices over flat, strided buffers.
//!
//! A [`Matrix`] is a buffer plus `dims`, `strides` and an `offset`. Rows and
//! columns are handed out as [`VectorView`]s borrowing the same buffer, so
//! writing through a view is seen by the matrix and by every other view that
//! overlaps it.
//!
//! ```
//! use stridemat_matrix::{Matrix, linalg};
//!
//! let mut a = Matrix::<f64>::make([2, 2]);
//! a.copy(&[3.0, -2.0, 2.0, 3.0]).unwrap();
//! let b = Matrix::from_row_major([2, 1], &[1.0, 2.0]).unwrap();
//!
//! let a_inv = a.inverting_clone().unwrap();
//! let x = linalg::mul(&[a_inv.as_matrix_ref(), b.as_matrix_ref()]).unwrap();
//! assert!((x[(0, 0)] - 7.0 / 13.0).abs() < 1e-12);
//! assert!((x[(1, 0)] - 4.0 / 13.0).abs() < 1e-12);
//! ```
//!
//! Storage is column-major by default, but nothing outside of [`geometry`]
//! cares; values always go in and come out in row-major reading order.
//!
//! Geometry may be changed after construction (`set_dims`, `set_strides`,
//! `set_offset`). Views that would then reach outside of the buffer are
//! shrunk rather than refused; see [`Extent`].

pub mod geometry;
pub mod linalg;
pub mod display;

mod error;
mod matrix;
mod view;

pub use crate::error::{Error, Result};
pub use crate::matrix::{Matrix_, Matrix, MatrixRef, MatrixMut, MatrixConfig};
pub use crate::view::{Vector_, VectorView, VectorViewMut, Extent, ViewKind};
