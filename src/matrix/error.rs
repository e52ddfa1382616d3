/* ************************************************************************ **
** This file is part of stridemat, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

/// Errors produced by matrix construction, access and the linear algebra kernels.
///
/// Every failing operation leaves its outputs untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Value or operand counts disagree with the declared dimensions.
    #[error("shape mismatch: expected {0:?}, got {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// A configuration supplied the wrong number of dims or strides.
    #[error("rank mismatch: expected rank {0}, got rank {1}")]
    RankMismatch(usize, usize),

    /// A square-only operation was given a non-square matrix.
    #[error("non-square matrix: rows={rows}, cols={cols}")]
    NotSquare { rows: usize, cols: usize },

    /// The matrix has no inverse.
    #[error("matrix is singular")]
    Singular,

    /// An index was past the end of a view, or a coordinate fell outside the buffer.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A chain multiplication needs at least two operands.
    #[error("chain multiplication needs at least 2 operands, got {0}")]
    ChainTooShort(usize),
}

pub type Result<T> = ::std::result::Result<T, Error>;
