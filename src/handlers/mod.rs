//! Event dispatch.
//!
//! One handler per event kind, each building a fresh [`Context`] snapshot
//! and running to completion before the next event is looked at. The
//! manager owns everything that outlives an event: the connection, the
//! show/hide collaborator, the layout assignments and the rebuild state.

mod tick;
mod window;
mod workspace;

use crate::context::Context;
use crate::ipc::{Conn, Event};
use crate::layouts::{Layout, Layouts};
use crate::state::State;
use crate::utils::xdo::WindowGate;

pub struct Manager<C: Conn, G: WindowGate> {
    pub conn: C,
    pub gate: G,
    pub layouts: Layouts,
    pub state: State,
}

impl<C: Conn, G: WindowGate> Manager<C, G> {
    pub fn new(conn: C, gate: G) -> Self {
        Self {
            conn,
            gate,
            layouts: Layouts::default(),
            state: State::default(),
        }
    }

    /// Load startup layout assignments and seed the ledger of the
    /// currently focused workspace.
    pub fn startup(&mut self, assignments: Vec<(String, Layout)>) -> crate::Result<()> {
        for (workspace, layout) in assignments {
            tracing::info!("workspace {workspace} starts with layout {}", layout.name());
            self.layouts.set(&workspace, layout);
        }
        let Self {
            conn, gate, state, ..
        } = self;
        let workspaces = conn.get_workspaces()?;
        let ctx = Context::new(conn, gate)?;
        for workspace in workspaces {
            if workspace.focused {
                state.add_workspace_ledger(&workspace.name, &ctx);
                state.prev_workspace_name = workspace.name.clone();
            }
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: &Event) -> crate::Result<()> {
        match event {
            Event::Window(window) => match window.change.as_str() {
                "new" => self.on_window_new(window),
                "close" => self.on_window_close(window),
                "move" => self.on_window_move(window),
                "floating" => self.on_window_floating(window),
                "focus" => self.on_window_focus(window),
                other => {
                    tracing::debug!("ignoring window event change {other}");
                    Ok(())
                }
            },
            Event::Workspace(workspace) => {
                if workspace.change == "focus" {
                    self.on_workspace_focus(workspace)
                } else {
                    Ok(())
                }
            }
            Event::Tick(tick) => self.on_tick(tick),
            Event::Shutdown => Ok(()),
        }
    }
}
