/* ************************************************************************ **
** This file is part of stridemat, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

// HERE BE SCRIPTS
//
// Everything that is not the matrix library itself: reading scripts, running
// them, logging, and the entry points for the binary shims.

#![allow(non_snake_case)]

#[macro_use] extern crate log;

mod color;
mod logging;
pub mod config;
mod cmd;
pub mod entry_points;

pub use crate::config::{Settings, YamlRead};
pub use crate::cmd::{run_script, build_matrix};
pub use crate::logging::GlobalLogger;

pub type FailResult<T> = Result<T, ::failure::Error>;
