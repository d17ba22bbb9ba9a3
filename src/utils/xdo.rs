//! The OS-level show/hide collaborator.
//!
//! Unmapping a window makes the window manager drop its container;
//! remapping it at its recorded geometry makes the manager re-attach it
//! next to the currently focused container. The rebuild replay is built on
//! exactly this round trip. Both calls block until the invocation
//! completes, so subsequent tree queries observe the change.

use std::process::Command;

use crate::errors::Result;
use crate::models::Rect;

pub trait WindowGate {
    /// Hide a window by its X11 handle.
    fn hide(&mut self, window: u64) -> Result<()>;
    /// Show a window again, restoring its original geometry first so the
    /// recreated container inherits sensible dimensions.
    fn show(&mut self, window: u64, geometry: Rect) -> Result<()>;
}

/// Shells out to `xdotool`, the same primitive the window manager's users
/// reach for. Invocation failure is reported; a non-zero exit is logged by
/// xdotool itself and treated as "no corrective action this round".
#[derive(Default)]
pub struct XdoGate;

impl WindowGate for XdoGate {
    fn hide(&mut self, window: u64) -> Result<()> {
        Command::new("xdotool")
            .arg("windowunmap")
            .arg(window.to_string())
            .status()?;
        Ok(())
    }

    fn show(&mut self, window: u64, geometry: Rect) -> Result<()> {
        let window = window.to_string();
        Command::new("xdotool")
            .args(["windowsize", &window])
            .args([geometry.width.to_string(), geometry.height.to_string()])
            .args(["windowmove", &window])
            .args([geometry.x.to_string(), geometry.y.to_string()])
            .args(["windowmap", &window])
            .status()?;
        Ok(())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;

    /// Records hide/show calls in order.
    #[derive(Default)]
    pub struct MockGate {
        pub hidden: Vec<u64>,
        pub shown: Vec<u64>,
    }

    impl WindowGate for MockGate {
        fn hide(&mut self, window: u64) -> Result<()> {
            self.hidden.push(window);
            Ok(())
        }

        fn show(&mut self, window: u64, _geometry: Rect) -> Result<()> {
            self.shown.push(window);
            Ok(())
        }
    }
}
