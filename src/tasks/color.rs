/* ************************************************************************ **
** This file is part of stridemat, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use ::std::fmt;
use ::std::sync::atomic::{AtomicBool, Ordering};
use ::ansi_term::Style;

static COLOR_ENABLED: AtomicBool = AtomicBool::new(true);

/// Globally switch escape codes on or off (e.g. for `--no-color`).
pub fn set_enabled(enabled: bool)
{ COLOR_ENABLED.store(enabled, Ordering::SeqCst) }

pub fn is_enabled() -> bool
{ COLOR_ENABLED.load(Ordering::SeqCst) }

pub fn paint<T>(style: Style, value: T) -> Wrapper<T>
{ Wrapper { style, value } }

/// Colorizes the `Display` impl of a value, unless colors are disabled.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Wrapper<T> {
    style: Style,
    value: T,
}

impl<T: fmt::Display> fmt::Display for Wrapper<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        if !is_enabled() {
            return self.value.fmt(f);
        }
        write!(f, "{}", self.style.prefix())?;
        self.value.fmt(f)?;
        write!(f, "{}", self.style.suffix())
    }
}
