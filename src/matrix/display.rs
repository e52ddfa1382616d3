/* ************************************************************************ **
** This file is part of stridemat, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Text rendering of matrices and views.
//!
//! A matrix renders as a grid, one line per row, each cell signed and
//! right-aligned to the widest cell and followed by a comma:
//!
//! ```text
//! +1, +2,
//! +3, +4,
//! ```
//!
//! Whole numbers are shown without decimals; anything else with three (or the
//! precision given to the formatter, as in `{:.5}`).
//!
//! A view renders as a single line: `1.000, 2.000`.
//!
//! Both go through row views, so rows cut short by stale geometry show up
//! cut short here too.

use crate::matrix::Matrix_;
use crate::view::Vector_;

use ::std::fmt;
use ::num_traits::Float;

const DEFAULT_PRECISION: usize = 3;

fn grid_cell<T: Float + fmt::Display>(x: T, precision: usize) -> String
{
    match x.is_finite() && x.fract() == T::zero() {
        true => format!("{:+.0}", x),
        false => format!("{:+.*}", precision, x),
    }
}

impl<T: Float + fmt::Display, Vs: AsRef<[T]>> fmt::Display for Matrix_<T, Vs> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let precision = f.precision().unwrap_or(DEFAULT_PRECISION);
        let rows: Vec<Vec<String>> = (0..self.num_rows())
            .filter_map(|r| self.row_get(r).ok())
            .map(|row| row.iter().map(|&x| grid_cell(x, precision)).collect())
            .collect();

        let width = rows.iter().flatten().map(|s| s.len()).max().unwrap_or(0);
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>width$},", cell, width = width)?;
            }
        }
        Ok(())
    }
}

impl<T: Float + fmt::Display, Vs: AsRef<[T]>> fmt::Display for Vector_<T, Vs> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let precision = f.precision().unwrap_or(DEFAULT_PRECISION);
        for (i, x) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.*}", precision, x)?;
        }
        Ok(())
    }
}

impl<T: Float + fmt::Display, Vs: AsRef<[T]>> Matrix_<T, Vs> {
    /// The grid rendering; see the [module docs](crate::display).
    pub fn to_str(&self) -> String { self.to_string() }
}

impl<T: Float + fmt::Display, Vs: AsRef<[T]>> Vector_<T, Vs> {
    /// The one-line rendering; see the [module docs](crate::display).
    pub fn to_str(&self) -> String { self.to_string() }
}
