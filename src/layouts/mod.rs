//! The layout strategy library.
//!
//! Each strategy is a parameter struct plus command generators driven by
//! the workspace's container count. The shared attach contract lives here:
//! move the new window next to the anchor mark, run the strategy's own
//! split/move/resize commands, then maintain the `main`/`last` role marks.

mod autosplit;
mod companion;
mod native;
mod spiral;
mod stack;
mod three_columns;
mod two_columns;

pub use companion::Companion;
pub use native::Native;
pub use spiral::Spiral;
pub use stack::{HStack, VStack};
pub use three_columns::ThreeColumns;
pub use two_columns::TwoColumns;

use std::collections::HashMap;

use crate::context::Context;
use crate::models::{mark, Container, Orientation};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Layout {
    VStack(VStack),
    HStack(HStack),
    Spiral(Spiral),
    Companion(Companion),
    TwoColumns(TwoColumns),
    ThreeColumns(ThreeColumns),
    Autosplit,
    Native(Native),
}

impl Layout {
    /// Build a strategy from its command name and parameter tokens.
    /// Unknown names yield `None`; malformed parameters fall back to the
    /// strategy's defaults with a warning.
    pub fn parse(name: &str, params: &[String]) -> Option<Self> {
        match name {
            "vstack" => Some(Layout::VStack(VStack::from_params(params))),
            "hstack" => Some(Layout::HStack(HStack::from_params(params))),
            "spiral" => Some(Layout::Spiral(Spiral::from_params(params))),
            "companion" => Some(Layout::Companion(Companion::from_params(params))),
            "2columns" => Some(Layout::TwoColumns(TwoColumns::from_params(params))),
            "3columns" => Some(Layout::ThreeColumns(ThreeColumns::from_params(params))),
            "autosplit" => Some(Layout::Autosplit),
            other => other.parse::<Native>().ok().map(Layout::Native),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Layout::VStack(_) => "vstack",
            Layout::HStack(_) => "hstack",
            Layout::Spiral(_) => "spiral",
            Layout::Companion(_) => "companion",
            Layout::TwoColumns(_) => "2columns",
            Layout::ThreeColumns(_) => "3columns",
            Layout::Autosplit => "autosplit",
            Layout::Native(native) => native.name(),
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Layout::Native(_))
    }

    /// Whether the `last` role mark travels along on directional swaps.
    /// True exactly for the strategies that anchor new windows at `last`.
    pub fn swap_mark_last(&self) -> bool {
        matches!(
            self,
            Layout::VStack(_) | Layout::HStack(_) | Layout::Spiral(_) | Layout::Companion(_)
        )
    }

    pub fn anchor_mark(&self, workspace: &str) -> String {
        if self.swap_mark_last() {
            mark::last(workspace)
        } else {
            mark::main(workspace)
        }
    }

    fn moves_to_anchor(&self) -> bool {
        !matches!(self, Layout::Autosplit | Layout::Native(_))
    }

    /// Orientation the container holding the anchor should be split in
    /// before the new window attaches, if any.
    pub fn split_orientation(&self, count: usize) -> Option<Orientation> {
        match self {
            Layout::VStack(layout) => layout.split_orientation(count),
            Layout::HStack(layout) => layout.split_orientation(count),
            Layout::Spiral(layout) => layout.split_orientation(count),
            Layout::Companion(layout) => layout.split_orientation(count),
            Layout::TwoColumns(layout) => layout.split_orientation(count),
            Layout::ThreeColumns(layout) => layout.split_orientation(count),
            Layout::Autosplit | Layout::Native(_) => None,
        }
    }

    /// Orientation of the stack region new windows keep joining, once the
    /// layout has settled into one.
    pub fn stack_orientation(&self, count: usize) -> Option<Orientation> {
        match self {
            Layout::VStack(layout) => layout.stack_orientation(count),
            Layout::HStack(layout) => layout.stack_orientation(count),
            _ => None,
        }
    }

    /// Place the just-inserted container. `new` is already the focused
    /// container and part of the context's snapshot.
    pub fn attach(&self, ctx: &mut Context, new: &Container) -> crate::Result<()> {
        let workspace = ctx.workspace_name.clone();
        let count = ctx.containers.len();
        if count > 1 && self.moves_to_anchor() {
            ctx.exec(&format!(
                r#"[con_id="{}"] move window to mark {}"#,
                new.id,
                self.anchor_mark(&workspace)
            ));
        }
        self.arrange(ctx, new, count)?;
        if count == 1 {
            ctx.exec(&format!("mark --add {}", mark::main(&workspace)));
        }
        ctx.exec(&format!("mark --add {}", mark::last(&workspace)));
        Ok(())
    }

    fn arrange(&self, ctx: &mut Context, new: &Container, count: usize) -> crate::Result<()> {
        match self {
            Layout::VStack(layout) => layout.arrange(ctx, count),
            Layout::HStack(layout) => layout.arrange(ctx, count),
            Layout::Spiral(layout) => layout.arrange(ctx, count),
            Layout::Companion(layout) => layout.arrange(ctx, count),
            Layout::TwoColumns(layout) => layout.arrange(ctx, new, count),
            Layout::ThreeColumns(layout) => return layout.arrange(ctx, count),
            Layout::Autosplit => autosplit::arrange(ctx),
            Layout::Native(layout) => layout.arrange(ctx, count),
        }
        Ok(())
    }
}

/// The workspace → strategy assignment map. A workspace without an entry
/// is unmanaged and keeps native behavior.
#[derive(Default)]
pub struct Layouts {
    assignments: HashMap<String, Layout>,
}

impl Layouts {
    pub fn get(&self, workspace: &str) -> Option<&Layout> {
        self.assignments.get(workspace)
    }

    pub fn set(&mut self, workspace: &str, layout: Layout) {
        self.assignments.insert(workspace.to_string(), layout);
    }

    pub fn unset(&mut self, workspace: &str) {
        self.assignments.remove(workspace);
    }

    pub fn exists_for(&self, workspace: &str) -> bool {
        self.assignments.contains_key(workspace)
    }
}
