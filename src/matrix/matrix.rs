/* ************************************************************************ **
** This file is part of stridemat, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::geometry;
use crate::view::{Vector_, VectorView, VectorViewMut};
use crate::{Error, Result};

use ::std::marker::PhantomData;
use ::std::ops::{Index, IndexMut};
use ::num_traits::{Zero, One};

/// A 2-D matrix over a flat buffer, addressed through `dims`, `strides` and `offset`.
///
/// The buffer type decides ownership:
///
/// * [`Matrix`] owns a `Vec<T>`.
/// * [`MatrixRef`] and [`MatrixMut`] borrow a buffer belonging to someone else,
///   who keeps seeing every write.
///
/// The geometry is plain data and may be changed at any time with
/// [`set_dims`](Matrix_::set_dims) and friends. Nothing is reallocated; views made
/// afterwards simply follow the new geometry, shrinking where it no longer fits
/// the buffer.
// please resist the urge to go n-dimensional
#[derive(Debug, Clone)]
pub struct Matrix_<T, Vs> {
    data: Vs,
    dims: [usize; 2],
    strides: [isize; 2],
    offset: isize,
    _dummy: PhantomData<T>,
}

pub type Matrix<T = f64> = Matrix_<T, Vec<T>>;
pub type MatrixRef<'a, T = f64> = Matrix_<T, &'a [T]>;
pub type MatrixMut<'a, T = f64> = Matrix_<T, &'a mut [T]>;

/// Explicit description of a matrix: geometry plus buffer.
///
/// `strides` default to the internal column-major layout for `dims` and `offset`
/// defaults to zero. The buffer need not be large enough for the geometry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub struct MatrixConfig<T = f64> {
    pub dims: Vec<usize>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub strides: Option<Vec<isize>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub offset: Option<isize>,
    pub buffer: Vec<T>,
}

fn rank2<A: Copy>(v: &[A]) -> Result<[A; 2]>
{
    match *v {
        [a, b] => Ok([a, b]),
        _ => Err(Error::RankMismatch(2, v.len())),
    }
}

// ---------------------------------------------------------------------------
// construction

impl<T: Clone + Zero> Matrix<T> {
    /// A zero-filled matrix in the default layout.
    pub fn make(dims: [usize; 2]) -> Self
    {
        let data = vec![T::zero(); geometry::element_count(&dims)];
        Matrix_::from_parts(data, dims, geometry::default_strides(dims), 0)
    }

    /// A square matrix from row-major values, whose count must be a perfect square.
    pub fn make_square(values: &[T]) -> Result<Self>
    {
        let n = (values.len() as f64).sqrt().round() as usize;
        if n * n != values.len() {
            return Err(Error::ShapeMismatch(vec![n, n], vec![values.len()]));
        }
        let mut out = Matrix::make([n, n]);
        out.copy(values)?;
        Ok(out)
    }

    /// A matrix from row-major values.
    pub fn from_row_major(dims: [usize; 2], values: &[T]) -> Result<Self>
    {
        let mut out = Matrix::make(dims);
        out.copy(values)?;
        Ok(out)
    }

    pub fn identity(n: usize) -> Self
    where T: One,
    {
        let mut out = Matrix::make([n, n]);
        for i in 0..n {
            out[(i, i)] = T::one();
        }
        out
    }
}

impl<T> Matrix<T> {
    /// Explicit construction. The buffer is taken as-is (it is not reordered).
    pub fn from_config(config: MatrixConfig<T>) -> Result<Self>
    {
        let MatrixConfig { dims, strides, offset, buffer } = config;
        let dims = rank2(&dims)?;
        let strides = match strides {
            Some(strides) => rank2(&strides)?,
            None => geometry::default_strides(dims),
        };
        Ok(Matrix_::from_parts(buffer, dims, strides, offset.unwrap_or(0)))
    }

    pub fn into_buffer(self) -> Vec<T> { self.data }
}

impl<T, Vs: AsRef<[T]>> Matrix_<T, Vs> {
    /// Wrap an existing buffer with arbitrary geometry.
    ///
    /// This never fails, even if the geometry reaches outside of `data`.
    pub fn from_parts(data: Vs, dims: [usize; 2], strides: [isize; 2], offset: isize) -> Self
    { Matrix_ { data, dims, strides, offset, _dummy: PhantomData } }

    /// Wrap a caller-owned buffer in the default layout.
    pub fn with_default_layout(data: Vs, dims: [usize; 2]) -> Self
    { Matrix_::from_parts(data, dims, geometry::default_strides(dims), 0) }
}

// ---------------------------------------------------------------------------
// geometry

impl<T, Vs> Matrix_<T, Vs> {
    pub fn dims(&self) -> [usize; 2] { self.dims }
    pub fn strides(&self) -> [isize; 2] { self.strides }
    pub fn offset(&self) -> isize { self.offset }
    pub fn num_rows(&self) -> usize { self.dims[0] }
    pub fn num_cols(&self) -> usize { self.dims[1] }
    pub fn is_square(&self) -> bool { self.dims[0] == self.dims[1] }
    pub fn size(&self) -> usize { self.dims[0] * self.dims[1] }

    /// Change the dimensions in place. The buffer is left untouched.
    pub fn set_dims(&mut self, dims: [usize; 2]) -> &mut Self
    { self.dims = dims; self }

    /// Change the strides in place. The buffer is left untouched.
    pub fn set_strides(&mut self, strides: [isize; 2]) -> &mut Self
    { self.strides = strides; self }

    pub fn set_offset(&mut self, offset: isize) -> &mut Self
    { self.offset = offset; self }

    #[inline(always)]
    fn physical_index(&self, r: usize, c: usize) -> Option<isize>
    { geometry::physical_index(&[r, c], &self.strides, self.offset) }

    // Start of a row or column window. An overflowing start lies outside any
    // buffer, so the view built on it shrinks to nothing.
    fn window_start(&self, r: usize, c: usize) -> isize
    { self.physical_index(r, c).unwrap_or(isize::MIN) }
}

// ---------------------------------------------------------------------------
// reading

impl<T, Vs: AsRef<[T]>> Matrix_<T, Vs> {
    /// The raw buffer, in whatever order it is stored.
    pub fn buffer(&self) -> &[T] { self.data.as_ref() }

    pub fn as_matrix_ref(&self) -> MatrixRef<'_, T>
    {
        let Matrix_ { dims, strides, offset, .. } = *self;
        let data = self.data.as_ref();
        Matrix_ { data, dims, strides, offset, _dummy: PhantomData }
    }

    /// Zero-copy transpose, by swapping dims and strides.
    pub fn transpose(&self) -> MatrixRef<'_, T>
    {
        let Matrix_ { dims, strides, offset, .. } = *self;
        let dims = [dims[1], dims[0]];
        let strides = [strides[1], strides[0]];
        let data = self.data.as_ref();
        Matrix_ { data, dims, strides, offset, _dummy: PhantomData }
    }

    fn position(&self, r: usize, c: usize) -> Result<usize>
    {
        if r >= self.dims[0] {
            return Err(Error::IndexOutOfRange { index: r, len: self.dims[0] });
        }
        if c >= self.dims[1] {
            return Err(Error::IndexOutOfRange { index: c, len: self.dims[1] });
        }
        let len = self.data.as_ref().len();
        match self.physical_index(r, c) {
            Some(index) => geometry::checked_index(index, len)
                .ok_or(Error::IndexOutOfRange { index: index.max(0) as usize, len }),
            None => Err(Error::IndexOutOfRange { index: usize::MAX, len }),
        }
    }

    /// Scalar at `(r, c)`.
    ///
    /// Fails if the coordinate is outside `dims`, or if the geometry maps it
    /// outside of the buffer.
    pub fn get(&self, r: usize, c: usize) -> Result<T>
    where T: Copy,
    { self.position(r, c).map(|p| self.data.as_ref()[p]) }

    /// Row `r`, as a view.
    ///
    /// This is the element accessor of a matrix; the scalars are reached through
    /// the view's own `e_get`.
    pub fn e_get(&self, r: usize) -> Result<VectorView<'_, T>>
    { self.row_get(r) }

    /// Row `r`, as a view.
    pub fn row_get(&self, r: usize) -> Result<VectorView<'_, T>>
    {
        let (offset, len, stride) = self.row_window(r)?;
        Ok(Vector_::new(self.data.as_ref(), offset, len, stride))
    }

    /// Same as [`row_get`](Matrix_::row_get).
    pub fn row_vector_get(&self, r: usize) -> Result<VectorView<'_, T>>
    { self.row_get(r) }

    /// Column `c`, as a view.
    pub fn col_vector_get(&self, c: usize) -> Result<VectorView<'_, T>>
    {
        let (offset, len, stride) = self.col_window(c)?;
        Ok(Vector_::new(self.data.as_ref(), offset, len, stride))
    }

    fn row_window(&self, r: usize) -> Result<(isize, usize, isize)>
    {
        if r >= self.dims[0] {
            return Err(Error::IndexOutOfRange { index: r, len: self.dims[0] });
        }
        Ok((self.window_start(r, 0), self.dims[1], self.strides[1]))
    }

    fn col_window(&self, c: usize) -> Result<(isize, usize, isize)>
    {
        if c >= self.dims[1] {
            return Err(Error::IndexOutOfRange { index: c, len: self.dims[1] });
        }
        Ok((self.window_start(0, c), self.dims[0], self.strides[0]))
    }

    /// All elements in row-major reading order.
    pub fn to_row_major_vec(&self) -> Result<Vec<T>>
    where T: Copy,
    {
        let mut out = Vec::with_capacity(self.size());
        for r in 0..self.num_rows() {
            for c in 0..self.num_cols() {
                out.push(self.get(r, c)?);
            }
        }
        Ok(out)
    }

    /// Dense copy in the default layout.
    pub fn to_owned_matrix(&self) -> Result<Matrix<T>>
    where T: Copy + Zero,
    { Matrix::from_row_major(self.dims, &self.to_row_major_vec()?) }
}

// ---------------------------------------------------------------------------
// writing

impl<T, Vs: AsRef<[T]> + AsMut<[T]>> Matrix_<T, Vs> {
    pub fn as_matrix_mut(&mut self) -> MatrixMut<'_, T>
    {
        let Matrix_ { dims, strides, offset, .. } = *self;
        let data = self.data.as_mut();
        Matrix_ { data, dims, strides, offset, _dummy: PhantomData }
    }

    pub fn buffer_mut(&mut self) -> &mut [T] { self.data.as_mut() }

    pub fn set(&mut self, r: usize, c: usize, value: T) -> Result<()>
    {
        let p = self.position(r, c)?;
        self.data.as_mut()[p] = value;
        Ok(())
    }

    /// Fill the matrix from values in row-major reading order.
    ///
    /// The values are written through the current geometry, so with the default
    /// layout the buffer ends up column-major. Only the buffer is modified, and
    /// nothing at all is written unless every coordinate lands inside it.
    pub fn copy(&mut self, values: &[T]) -> Result<&mut Self>
    where T: Clone,
    {
        if values.len() != self.size() {
            return Err(Error::ShapeMismatch(self.dims.to_vec(), vec![values.len()]));
        }
        let cols = self.num_cols();
        let mut positions = Vec::with_capacity(values.len());
        for r in 0..self.num_rows() {
            for c in 0..cols {
                positions.push(self.position(r, c)?);
            }
        }
        let data = self.data.as_mut();
        for (p, value) in positions.into_iter().zip(values) {
            data[p] = value.clone();
        }
        Ok(self)
    }

    pub fn row_mut(&mut self, r: usize) -> Result<VectorViewMut<'_, T>>
    {
        let (offset, len, stride) = self.row_window(r)?;
        Ok(Vector_::new(self.data.as_mut(), offset, len, stride))
    }

    pub fn col_mut(&mut self, c: usize) -> Result<VectorViewMut<'_, T>>
    {
        let (offset, len, stride) = self.col_window(c)?;
        Ok(Vector_::new(self.data.as_mut(), offset, len, stride))
    }
}

impl<T, Vs: AsRef<[T]>> Index<(usize, usize)> for Matrix_<T, Vs> {
    type Output = T;

    #[inline]
    fn index(&self, (r, c): (usize, usize)) -> &T
    {
        match self.position(r, c) {
            Ok(p) => &self.data.as_ref()[p],
            Err(e) => panic!("matrix index ({}, {}): {}", r, c, e),
        }
    }
}

impl<T, Vs: AsRef<[T]> + AsMut<[T]>> IndexMut<(usize, usize)> for Matrix_<T, Vs> {
    #[inline]
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut T
    {
        match self.position(r, c) {
            Ok(p) => &mut self.data.as_mut()[p],
            Err(e) => panic!("matrix index ({}, {}): {}", r, c, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{Extent, ViewKind};

    fn sample() -> Matrix {
        let mut m = Matrix::make([3, 3]);
        m.copy(&[
            1., 2., 3.,
            4., 5., 6.,
            7., 8., -9.,
        ]).unwrap();
        m
    }

    #[test]
    fn make_is_zero_filled() {
        let m = Matrix::<f64>::make([3, 3]);
        assert_eq!(m.buffer(), &[0.0; 9]);
        assert_eq!(m.strides(), [1, 3]);
        assert_eq!(m.offset(), 0);
    }

    #[test]
    fn copy_stores_col_major() {
        let mut m = Matrix::make([3, 3]);
        m.copy(&[1., 2., 3., 4., 5., 6., 7., 8., 9.]).unwrap();
        assert_eq!(m.buffer(), &[1., 4., 7., 2., 5., 8., 3., 6., 9.]);
        assert_eq!(m.dims(), [3, 3]);
        assert_eq!(m.strides(), [1, 3]);
    }

    #[test]
    fn copy_rejects_wrong_count() {
        let mut m = Matrix::make([2, 3]);
        let err = m.copy(&[1., 2., 3.]).unwrap_err();
        assert_eq!(err, Error::ShapeMismatch(vec![2, 3], vec![3]));
        assert_eq!(m.buffer(), &[0.0; 6]);
    }

    #[test]
    fn copy_is_all_or_nothing() {
        let mut m = Matrix::make([2, 2]);
        m.set_dims([2, 3]);
        let err = m.copy(&[1., 2., 3., 4., 5., 6.]).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { .. }));
        assert_eq!(m.buffer(), &[0.0; 4]);
    }

    #[test]
    fn rows_and_cols() {
        let m = sample();
        assert_eq!(m.row_get(1).unwrap().to_vec(), vec![4., 5., 6.]);
        assert_eq!(m.col_vector_get(2).unwrap().to_vec(), vec![3., 6., -9.]);
        assert_eq!(m.e_get(2).unwrap().e_get(1), Ok(8.));
        assert_eq!(m.row_vector_get(0).unwrap().stride(), 3);
        assert_eq!(m.col_vector_get(0).unwrap().stride(), 1);
        assert_eq!(m.row_get(3).unwrap_err(), Error::IndexOutOfRange { index: 3, len: 3 });
        assert_eq!(m.col_vector_get(5).unwrap_err(), Error::IndexOutOfRange { index: 5, len: 3 });
    }

    #[test]
    fn strides_override_shrinks_last_row() {
        let mut m = sample();
        m.set_strides([3, 2]);

        let row = m.row_vector_get(0).unwrap();
        assert_eq!((row.offset(), row.len(), row.stride()), (0, 3, 2));
        assert_eq!(row.kind(), ViewKind::Full);
        assert_eq!(row.to_vec(), vec![1., 7., 5.]);

        // starts at 6 and wants 6, 8, 10
        let row = m.row_vector_get(2).unwrap();
        assert_eq!(row.len(), 2);
        assert_eq!(row.extent(), Extent::Shrunk { requested: 3 });
        assert_eq!(row.kind(), ViewKind::StridedShrunk);
    }

    #[test]
    fn overflowing_strides_shrink_to_nothing() {
        let mut m = sample();
        m.set_strides([1 << 62, 1]);
        // row 0 still walks the column-major buffer with unit stride
        assert_eq!(m.row_vector_get(0).unwrap().to_vec(), vec![1., 4., 7.]);

        let row = m.row_vector_get(2).unwrap();
        assert!(row.is_empty());
        assert_eq!(row.extent(), Extent::Shrunk { requested: 3 });
        assert!(matches!(m.get(2, 0), Err(Error::IndexOutOfRange { .. })));
        assert!(matches!(m.to_row_major_vec(), Err(Error::IndexOutOfRange { .. })));

        // would wrap around to a small index if the arithmetic were unchecked
        m.set_strides([isize::MIN + 1, 1]);
        assert!(m.row_vector_get(2).unwrap().is_empty());
        assert!(m.get(2, 2).is_err());

        m.set_strides([isize::MIN, isize::MAX]).set_offset(isize::MAX);
        for i in 0..3 {
            assert!(m.row_vector_get(i).unwrap().len() <= 1);
            assert!(m.col_vector_get(i).unwrap().len() <= 1);
        }
        assert!(m.copy(&[0.; 9]).is_err());
        assert_eq!(m.buffer()[0], 1.);
    }

    #[test]
    fn short_buffer_from_config() {
        let m = Matrix::from_config(MatrixConfig {
            dims: vec![3, 3],
            strides: Some(vec![3, 2]),
            offset: None,
            buffer: vec![1., 2., 3., 4., 5., 6., 7.],
        }).unwrap();
        assert_eq!(m.row_vector_get(0).unwrap().to_vec(), vec![1., 3., 5.]);

        let row = m.row_vector_get(1).unwrap();
        assert_eq!(row.to_vec(), vec![4., 6.]);
        assert!(row.is_shrunk());
        assert_eq!(m.row_vector_get(2).unwrap().to_vec(), vec![7.]);

        let mut m = m;
        m.set_offset(7);
        assert!(m.row_vector_get(0).unwrap().is_empty());
    }

    #[test]
    fn config_rank_is_checked() {
        let err = Matrix::from_config(MatrixConfig {
            dims: vec![3, 3, 3],
            strides: None,
            offset: None,
            buffer: vec![0.0; 27],
        }).unwrap_err();
        assert_eq!(err, Error::RankMismatch(2, 3));
    }

    #[test]
    fn dims_override_changes_views_only() {
        let mut m = sample();
        m.set_dims([3, 2]);
        assert_eq!(m.row_vector_get(0).unwrap().to_vec(), vec![1., 2.]);
        assert_eq!(m.buffer(), &[1., 4., 7., 2., 5., 8., 3., 6., -9.]);

        // growing past the buffer shrinks the views instead of reading out of bounds
        m.set_dims([3, 5]);
        let row = m.row_vector_get(2).unwrap();
        assert_eq!(row.to_vec(), vec![7., 8., -9.]);
        assert_eq!(row.extent(), Extent::Shrunk { requested: 5 });
        assert_eq!(row.kind(), ViewKind::StridedShrunk);
    }

    #[test]
    fn writes_through_views_alias() {
        let mut m = sample();
        m.row_mut(0).unwrap().e_set(1, 20.).unwrap();
        assert_eq!(m[(0, 1)], 20.);
        assert_eq!(m.col_vector_get(1).unwrap().to_vec(), vec![20., 5., 8.]);

        // a stride of zero makes every column of a row the same element
        m.set_strides([1, 0]);
        m.row_mut(2).unwrap().e_set(0, 42.).unwrap();
        assert_eq!(m.row_get(2).unwrap().to_vec(), vec![42., 42., 42.]);
    }

    #[test]
    fn borrowed_buffer_is_shared_with_caller() {
        let mut data = vec![0.0; 4];
        {
            let mut m = MatrixMut::with_default_layout(&mut data[..], [2, 2]);
            m.copy(&[1., 2., 3., 4.]).unwrap();
        }
        assert_eq!(data, vec![1., 3., 2., 4.]);
        let m = MatrixRef::with_default_layout(&data[..], [2, 2]);
        assert_eq!(m.to_row_major_vec().unwrap(), vec![1., 2., 3., 4.]);
    }

    #[test]
    fn transpose_swaps_geometry() {
        let m = Matrix::from_row_major([2, 3], &[1., 2., 3., 4., 5., 6.]).unwrap();
        let t = m.transpose();
        assert_eq!(t.dims(), [3, 2]);
        assert_eq!(t.to_row_major_vec().unwrap(), vec![1., 4., 2., 5., 3., 6.]);
        assert_eq!(t.row_get(2).unwrap().to_vec(), vec![3., 6.]);
    }

    #[test]
    fn make_square_requires_perfect_square() {
        let m = Matrix::make_square(&[1., 2., 3., 4.]).unwrap();
        assert_eq!(m.dims(), [2, 2]);
        assert_eq!(m.get(1, 0), Ok(3.));
        assert_eq!(
            Matrix::make_square(&[1., 2., 3.]).unwrap_err(),
            Error::ShapeMismatch(vec![2, 2], vec![3]),
        );
        assert_eq!(Matrix::<f64>::make_square(&[]).unwrap().dims(), [0, 0]);
    }

    #[test]
    fn offset_moves_origin() {
        let mut m = Matrix::from_row_major([2, 2], &[1., 2., 3., 4.]).unwrap();
        m.set_dims([1, 2]).set_offset(1);
        assert_eq!(m.to_row_major_vec().unwrap(), vec![3., 4.]);
    }

    #[test]
    fn identity() {
        let m = Matrix::<f64>::identity(3);
        assert_eq!(m.to_row_major_vec().unwrap(), vec![1., 0., 0., 0., 1., 0., 0., 0., 1.]);
    }
}
