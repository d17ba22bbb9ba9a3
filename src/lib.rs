//! Layout manager for the i3 window manager.
//!
//! i3 tiles new windows by splitting whatever has focus, which drifts into
//! arbitrary shapes over a day of work. This crate listens on the IPC
//! event stream and re-derives a deterministic shape per workspace from a
//! declared layout strategy: every window insertion, closure and move is
//! answered with the splits, moves and resizes that restore the strategy's
//! geometry. Workspaces without an assigned strategy keep native behavior.

pub mod config;
pub mod context;
pub mod errors;
pub mod handlers;
pub mod ipc;
pub mod layouts;
pub mod models;
pub mod mover;
pub mod splitter;
pub mod state;
pub mod utils;

pub use errors::{LaymanError, Result};
