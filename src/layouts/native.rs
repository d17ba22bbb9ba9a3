//! Pass-throughs to the window manager's own layouts. The first window
//! sets the layout once; everything else is native behavior, except that
//! the role marks are still maintained for mark-based addressing.

use std::fmt;
use std::str::FromStr;

use crate::context::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Native {
    Tabbed,
    Splitv,
    Splith,
    Stacking,
}

impl Native {
    pub fn name(self) -> &'static str {
        match self {
            Native::Tabbed => "tabbed",
            Native::Splitv => "splitv",
            Native::Splith => "splith",
            Native::Stacking => "stacking",
        }
    }

    pub fn arrange(self, ctx: &mut Context, count: usize) {
        if count == 1 {
            ctx.exec(&format!("layout {self}"));
        }
    }
}

impl fmt::Display for Native {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Native {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tabbed" => Ok(Native::Tabbed),
            "splitv" => Ok(Native::Splitv),
            "splith" => Ok(Native::Splith),
            "stacking" => Ok(Native::Stacking),
            other => Err(format!("not a native layout: {other}")),
        }
    }
}
