/* ************************************************************************ **
** This file is part of stridemat, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Index geometry.
//!
//! Pure functions mapping logical coordinates onto positions in a flat buffer.
//! Nothing in here looks at the buffer itself; at most it is told the buffer's length.
//!
//! These are rank-generic even though everything built on top of them is 2-D.

use ::std::convert::TryFrom;

/// Physical index of a logical coordinate: `offset + Σ coord[i] * strides[i]`.
///
/// The result may be negative or past the end of a buffer; callers are
/// responsible for checking it (see [`checked_index`]). `None` means the sum
/// does not fit in an `isize`, which is past either end of any buffer.
///
/// # Panics
///
/// Panics if `coord` and `strides` have different lengths.
#[inline]
pub fn physical_index(coord: &[usize], strides: &[isize], offset: isize) -> Option<isize>
{
    assert_eq!(coord.len(), strides.len(), "coordinate and strides differ in rank");
    coord.iter().zip(strides).try_fold(offset, |acc, (&c, &s)| {
        let c = isize::try_from(c).ok()?;
        acc.checked_add(c.checked_mul(s)?)
    })
}

/// Converts a physical index into a buffer position, if it lies in `[0, buffer_len)`.
#[inline]
pub fn checked_index(index: isize, buffer_len: usize) -> Option<usize>
{
    match index {
        i if i < 0 => None,
        i if i as usize >= buffer_len => None,
        i => Some(i as usize),
    }
}

/// Strides for the internal storage convention of a fresh matrix.
///
/// Storage is column-major: consecutive rows of one column are adjacent.
pub fn default_strides(dims: [usize; 2]) -> [isize; 2]
{
    let strides = col_major_strides(&dims);
    [strides[0], strides[1]]
}

/// Column-major (first axis fastest) strides for `dims`.
pub fn col_major_strides(dims: &[usize]) -> Vec<isize>
{
    let mut stride = 1isize;
    dims.iter().map(|&d| {
        let out = stride;
        stride = stride.saturating_mul(isize::try_from(d.max(1)).unwrap_or(isize::MAX));
        out
    }).collect()
}

/// Row-major (last axis fastest) strides for `dims`.
pub fn row_major_strides(dims: &[usize]) -> Vec<isize>
{
    let mut out = vec![0; dims.len()];
    let mut stride = 1isize;
    for (s, &d) in out.iter_mut().zip(dims).rev() {
        *s = stride;
        stride = stride.saturating_mul(isize::try_from(d.max(1)).unwrap_or(isize::MAX));
    }
    out
}

/// Number of buffer elements needed to hold `dims` densely.
pub fn element_count(dims: &[usize]) -> usize
{ dims.iter().product() }

/// The largest `len <= requested` such that `offset + k * stride` lies in
/// `[0, buffer_len)` for every `k < len`.
///
/// This is what a 1-D window is shrunk to when stale dims or strides would
/// otherwise make it read past either end of the buffer.
pub fn fitting_len(buffer_len: usize, offset: isize, stride: isize, requested: usize) -> usize
{
    if requested == 0 || checked_index(offset, buffer_len).is_none() {
        return 0;
    }
    let last = buffer_len as isize - 1;
    // number of whole steps that can be taken before leaving the buffer
    let steps = match stride {
        0 => return requested,
        s if s > 0 => (last - offset) / s,
        // a stride of isize::MIN leaves any buffer in one step
        s => s.checked_neg().map_or(0, |s| offset / s),
    };
    usize::min(requested, steps as usize + 1)
}
