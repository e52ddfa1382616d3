/* ************************************************************************ **
** This file is part of stridemat, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Script format for the `stridemat` binary.
//!
//! ```yaml
//! matrices:
//!   a:
//!     square: [1, 2, 3, 4, 5, 6, 7, 8, -9]
//!   b:
//!     make: { dims: [2, 1], values: [1, 2] }
//!   c:
//!     raw: { dims: [3, 3], strides: [3, 2], buffer: [1, 2, 3, 4, 5, 6, 7] }
//! format:
//!   precision: 3
//! steps:
//!   - determinant: a
//!   - invert: { matrix: a, into: a-inv }
//!   - row: { matrix: c, index: 1 }
//! ```

// NOTE: Please use the YamlRead trait rather than serde_yaml::from_* directly,
//       so that typos in a script show up as warnings.

use ::std::collections::BTreeMap;
use ::std::io::Read;
use ::serde::{Deserialize, Serialize};
use ::stridemat_matrix::MatrixConfig;

/// Deserialize from YAML, warning about any keys that went unused.
pub trait YamlRead: for<'de> Deserialize<'de> {
    fn from_reader(mut r: impl Read) -> Result<Self, ::serde_yaml::Error>
    { YamlRead::from_dyn_reader(&mut r) }

    fn from_dyn_reader(r: &mut dyn Read) -> Result<Self, ::serde_yaml::Error> {
        // serde_ignored needs a Deserializer, and serde_yaml::Value is one.
        Self::from_value(value_from_dyn_reader(r)?)
    }

    fn from_value(value: ::serde_yaml::Value) -> Result<Self, ::serde_yaml::Error>;
}

macro_rules! derive_yaml_read {
    ($Type:ty) => {
        impl YamlRead for $Type {
            fn from_value(value: ::serde_yaml::Value) -> Result<$Type, ::serde_yaml::Error> {
                ::serde_ignored::deserialize(
                    value,
                    |path| warn!("Unused config item (possible typo?): {}", path),
                )
            }
        }
    };
}

fn value_from_dyn_reader(r: &mut dyn Read) -> Result<::serde_yaml::Value, ::serde_yaml::Error>
{ ::serde_yaml::from_reader(r) }

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// Named matrices, built before any step runs.
    #[serde(default)]
    pub matrices: BTreeMap<String, MatrixSource>,

    #[serde(default)]
    pub format: Format,

    pub steps: Vec<Step>,
}
derive_yaml_read!{Settings}

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum MatrixSource {
    /// Zero-filled with the given dims, then optionally filled in row-major order.
    Make {
        dims: [usize; 2],
        #[serde(default)]
        values: Option<Vec<f64>>,
    },
    /// A square matrix whose size is inferred from the number of values.
    Square(Vec<f64>),
    /// Explicit geometry over an explicit buffer.
    Raw(MatrixConfig<f64>),
}

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Format {
    /// Digits after the decimal point.
    #[serde(default = "_format__precision")]
    pub precision: usize,
}
fn _format__precision() -> usize { 3 }

impl Default for Format {
    fn default() -> Self { Format { precision: _format__precision() } }
}

/// One action of a script. Each step produces one block of output.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    /// Render the matrix as a grid.
    Show(String),
    /// Print the raw buffer.
    Dump(String),
    Determinant(String),
    /// Print the inverse, and optionally store it under a new name.
    Invert {
        matrix: String,
        #[serde(default)]
        into: Option<String>,
    },
    /// Chain-multiply left to right.
    ///
    /// If `into` names an existing matrix, the product is written into its
    /// geometry; otherwise a new matrix is stored under that name.
    Mul {
        operands: Vec<String>,
        #[serde(default)]
        into: Option<String>,
    },
    Row { matrix: String, index: usize },
    Col { matrix: String, index: usize },
    /// Like `row`, but spelled the way element-wise access is.
    Element { matrix: String, index: usize },
    SetDims { matrix: String, dims: [usize; 2] },
    SetStrides { matrix: String, strides: [isize; 2] },
}
