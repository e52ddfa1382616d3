/* ************************************************************************ **
** This file is part of stridemat, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::geometry;
use crate::{Error, Result};

use ::std::marker::PhantomData;
use ::std::ops::{Index, IndexMut};
use ::log::{debug, trace};

/// A 1-D window over a buffer that it does not own.
///
/// The window is described by `offset`, `len` and `stride`, and borrows its
/// buffer for its whole lifetime (`&'a [T]` for [`VectorView`], `&'a mut [T]`
/// for [`VectorViewMut`]); a fresh one is produced by every row/column accessor.
///
/// If the requested window would leave the buffer, it is shrunk on construction
/// to the longest prefix that stays inside, and its [`Extent`] records this.
#[derive(Debug, Clone)]
pub struct Vector_<T, Vs> {
    data: Vs,
    // invariant: offset + k * stride is inside data for all k < len
    len: usize,
    offset: isize,
    stride: isize,
    extent: Extent,
    _dummy: PhantomData<T>,
}

pub type VectorView<'a, T = f64> = Vector_<T, &'a [T]>;
pub type VectorViewMut<'a, T = f64> = Vector_<T, &'a mut [T]>;

/// Whether a view got the length it asked for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Extent {
    Full,
    /// The view was cut short to stay inside its buffer.
    Shrunk { requested: usize },
}

/// Which construction path produced a view.
///
/// This is purely descriptive; all kinds behave identically.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ViewKind {
    Full,
    /// Shrunk, with unit stride.
    Shrunk,
    /// Shrunk, with a non-unit stride.
    StridedShrunk,
}

impl<T, Vs: AsRef<[T]>> Vector_<T, Vs> {
    /// Construct a view, shrinking it if it does not fit in `data`.
    ///
    /// Never fails; an out-of-bounds request merely produces a shorter
    /// (possibly empty) view.
    pub fn new(data: Vs, offset: isize, len: usize, stride: isize) -> Self
    {
        let buffer_len = data.as_ref().len();
        let fit = geometry::fitting_len(buffer_len, offset, stride, len);
        let extent = match fit == len {
            true => Extent::Full,
            false => {
                debug!(
                    "shrinking view (offset {}, stride {}) from {} to {} elements of a {}-element buffer",
                    offset, stride, len, fit, buffer_len,
                );
                Extent::Shrunk { requested: len }
            },
        };
        trace!("new view: offset={} len={} stride={}", offset, fit, stride);
        Vector_ { data, len: fit, offset, stride, extent, _dummy: PhantomData }
    }

    pub fn len(&self) -> usize { self.len }
    pub fn is_empty(&self) -> bool { self.len == 0 }
    pub fn offset(&self) -> isize { self.offset }
    pub fn stride(&self) -> isize { self.stride }
    pub fn extent(&self) -> Extent { self.extent }
    pub fn is_shrunk(&self) -> bool { self.extent != Extent::Full }

    pub fn kind(&self) -> ViewKind
    {
        match (self.extent, self.stride) {
            (Extent::Full, _) => ViewKind::Full,
            (Extent::Shrunk { .. }, 1) => ViewKind::Shrunk,
            (Extent::Shrunk { .. }, _) => ViewKind::StridedShrunk,
        }
    }

    /// The whole underlying buffer, not just the part covered by this view.
    pub fn buffer(&self) -> &[T] { self.data.as_ref() }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> VectorView<'_, T>
    {
        let Vector_ { len, offset, stride, extent, .. } = *self;
        let data = self.data.as_ref();
        Vector_ { data, len, offset, stride, extent, _dummy: PhantomData }
    }

    #[inline]
    fn position(&self, index: usize) -> Result<usize>
    {
        match index < self.len {
            true => Ok(self.unchecked_position(index)),
            false => Err(Error::IndexOutOfRange { index, len: self.len }),
        }
    }

    #[inline(always)]
    fn unchecked_position(&self, index: usize) -> usize
    { (self.offset + index as isize * self.stride) as usize }

    /// Read the element at `index`.
    pub fn e_get(&self, index: usize) -> Result<T>
    where T: Copy,
    { self.position(index).map(|p| self.data.as_ref()[p]) }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_
    {
        let data = self.data.as_ref();
        (0..self.len).map(move |i| &data[self.unchecked_position(i)])
    }

    pub fn to_vec(&self) -> Vec<T>
    where T: Clone,
    { self.iter().cloned().collect() }
}

impl<T, Vs: AsRef<[T]> + AsMut<[T]>> Vector_<T, Vs> {
    /// Write the element at `index`, through to the shared buffer.
    pub fn e_set(&mut self, index: usize, value: T) -> Result<()>
    {
        let p = self.position(index)?;
        self.data.as_mut()[p] = value;
        Ok(())
    }

    pub fn e_mut(&mut self, index: usize) -> Result<&mut T>
    {
        let p = self.position(index)?;
        Ok(&mut self.data.as_mut()[p])
    }

    /// Overwrite every element of the view from `values`.
    pub fn assign(&mut self, values: &[T]) -> Result<()>
    where T: Clone,
    {
        if values.len() != self.len {
            return Err(Error::ShapeMismatch(vec![self.len], vec![values.len()]));
        }
        for (i, value) in values.iter().enumerate() {
            let p = self.unchecked_position(i);
            self.data.as_mut()[p] = value.clone();
        }
        Ok(())
    }
}

impl<T, Vs: AsRef<[T]>> Index<usize> for Vector_<T, Vs> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T
    {
        match self.position(index) {
            Ok(p) => &self.data.as_ref()[p],
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T, Vs: AsRef<[T]> + AsMut<[T]>> IndexMut<usize> for Vector_<T, Vs> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T
    {
        match self.e_mut(index) {
            Ok(x) => x,
            Err(e) => panic!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_view_reads_strided() {
        let buf = [1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, -9.0];
        let v = VectorView::new(&buf[..], 1, 3, 3);
        assert_eq!(v.kind(), ViewKind::Full);
        assert_eq!(v.to_vec(), vec![4.0, 5.0, 6.0]);
        assert_eq!(v.e_get(2), Ok(6.0));
        assert_eq!(v[0], 4.0);
    }

    #[test]
    fn shrunk_view_kinds() {
        let buf = [0.0; 7];
        let v = VectorView::new(&buf[..], 4, 3, 2);
        assert_eq!(v.len(), 2);
        assert_eq!(v.extent(), Extent::Shrunk { requested: 3 });
        assert_eq!(v.kind(), ViewKind::StridedShrunk);

        let v = VectorView::new(&buf[..], 5, 3, 1);
        assert_eq!(v.len(), 2);
        assert_eq!(v.kind(), ViewKind::Shrunk);

        let v = VectorView::new(&buf[..], 100, 3, 1);
        assert!(v.is_empty());
        assert!(v.is_shrunk());
    }

    #[test]
    fn out_of_range_is_an_error() {
        let buf = [1.0, 2.0, 3.0];
        let v = VectorView::new(&buf[..], 1, 5, 1);
        assert_eq!(v.len(), 2);
        assert_eq!(v.e_get(1), Ok(3.0));
        assert_eq!(v.e_get(2), Err(Error::IndexOutOfRange { index: 2, len: 2 }));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn index_panics_past_end() {
        let buf = [1.0, 2.0, 3.0];
        let v = VectorView::new(&buf[..], 0, 2, 1);
        let _ = v[2];
    }

    #[test]
    fn writes_go_through_to_buffer() {
        let mut buf = vec![0.0; 6];
        {
            let mut v = VectorViewMut::new(&mut buf[..], 1, 3, 2);
            v.e_set(0, 1.0).unwrap();
            v[2] = 3.0;
            *v.e_mut(1).unwrap() = 2.0;
            assert_eq!(v.e_set(3, 4.0), Err(Error::IndexOutOfRange { index: 3, len: 3 }));
        }
        assert_eq!(buf, vec![0.0, 1.0, 0.0, 2.0, 0.0, 3.0]);
    }

    #[test]
    fn assign_checks_length() {
        let mut buf = vec![0.0; 4];
        let mut v = VectorViewMut::new(&mut buf[..], 0, 2, 2);
        assert_eq!(v.assign(&[1.0]), Err(Error::ShapeMismatch(vec![2], vec![1])));
        v.assign(&[1.0, 2.0]).unwrap();
        assert_eq!(v.buffer(), &[1.0, 0.0, 2.0, 0.0]);
    }

    #[test]
    fn negative_stride_walks_backwards() {
        let buf = [1.0, 2.0, 3.0, 4.0];
        let v = VectorView::new(&buf[..], 3, 4, -1);
        assert_eq!(v.kind(), ViewKind::Full);
        assert_eq!(v.to_vec(), vec![4.0, 3.0, 2.0, 1.0]);
    }
}
