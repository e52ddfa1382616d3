/* ************************************************************************ **
** This file is part of stridemat, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Umbrella crate for the workspace; the matrix library lives in
//! [`stridemat_matrix`] and the script runner in [`stridemat_tasks`].

pub use ::stridemat_matrix::*;
pub use ::stridemat_tasks::run_script;

pub mod version {
    pub fn get() -> &'static str { env!("CARGO_PKG_VERSION") }
}
