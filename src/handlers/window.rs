//! Window lifecycle handlers: new, close, move, floating, focus.

use crate::context::Context;
use crate::handlers::Manager;
use crate::ipc::{Conn, NodeType, WindowEvent};
use crate::layouts::Layout;
use crate::models::{mark, Container};
use crate::splitter;
use crate::state::RebuildCause;
use crate::utils::xdo::WindowGate;

impl<C: Conn, G: WindowGate> Manager<C, G> {
    pub fn on_window_new(&mut self, event: &WindowEvent) -> crate::Result<()> {
        tracing::debug!("window new - container {}", event.container.id);
        let Self {
            conn,
            gate,
            layouts,
            state,
        } = self;
        let mut ctx = Context::new(conn, gate)?;
        let workspace = ctx.workspace_name.clone();
        if !layouts.exists_for(&workspace) || !state.has_ledger(&workspace) {
            tracing::debug!("window new - no workspace layout");
            return Ok(());
        }
        if !event.container.is_layout_container() {
            tracing::debug!("window new - not a layout container");
            return Ok(());
        }
        if ctx.containers.is_empty() {
            tracing::debug!("window new - no container to handle");
            return Ok(());
        }
        state.sync_ledger(&ctx);
        if let Some(ledger) = state.ledger_mut(&workspace) {
            ledger.record(event.container.id);
        }

        let layout = match layouts.get(&workspace) {
            Some(layout) => *layout,
            None => return Ok(()),
        };
        splitter::handle_split(&mut ctx, &layout);
        let new = Container::from(&event.container);
        layout.attach(&mut ctx, &new)?;
        state.handle_rebuild(&mut ctx, &new);
        Ok(())
    }

    pub fn on_window_close(&mut self, event: &WindowEvent) -> crate::Result<()> {
        tracing::debug!("window close - container {}", event.container.id);
        let Self {
            conn,
            gate,
            layouts,
            state,
        } = self;
        let mut ctx = Context::new(conn, gate)?;
        let workspace = ctx.workspace_name.clone();
        if !layouts.exists_for(&workspace) {
            tracing::debug!("window close - no workspace layout");
            return Ok(());
        }
        state.sync_ledger(&ctx);
        if !state.swallow_closed(event.container.window) {
            state.start_rebuild(&mut ctx, RebuildCause::WindowClose, event.container.id);
        }
        Ok(())
    }

    /// A window that left its workspace invalidates the source ledger
    /// from that window's position onward; the workspace it is looked at
    /// from gets rebuilt right away.
    pub fn on_window_move(&mut self, event: &WindowEvent) -> crate::Result<()> {
        tracing::debug!("window move - container {}", event.container.id);
        let Self {
            conn,
            gate,
            layouts,
            state,
        } = self;
        let mut ctx = Context::new(conn, gate)?;
        if ctx.contains_container(event.container.id)
            || event.container.node_type != NodeType::Con
        {
            tracing::debug!("window move - inside workspace");
            return Ok(());
        }
        let workspace = ctx.workspace_name.clone();
        let old_workspace = state.old_workspace_name.clone();
        if layouts.exists_for(&old_workspace) {
            if let Some(ledger) = state.ledger_mut(&old_workspace) {
                ledger.record(event.container.id);
                ledger.mark_stale(event.container.id);
            }
        }
        if layouts.exists_for(&workspace) {
            state.sync_ledger(&ctx);
            state.start_rebuild(&mut ctx, RebuildCause::WindowMove, event.container.id);
        }
        Ok(())
    }

    /// Floating a window takes it out of layout management, which is a
    /// close as far as the ledger is concerned. The exception is the
    /// window just replayed by a rebuild: the manager floats those
    /// spontaneously and we put them straight back.
    pub fn on_window_floating(&mut self, event: &WindowEvent) -> crate::Result<()> {
        tracing::debug!("window floating - container {}", event.container.id);
        if event.container.is_floating() {
            let container = Container::from(&event.container);
            if self.state.is_last_replayed(&container) {
                self.state.clear_last_replayed();
                let Self { conn, gate, .. } = self;
                let mut ctx = Context::new(conn, gate)?;
                ctx.exec(&format!(
                    r#"[con_id="{}"] floating disable"#,
                    event.container.id
                ));
                Ok(())
            } else {
                self.state.set_focus_after(event.container.id);
                self.on_window_close(event)
            }
        } else {
            self.on_window_new(event)
        }
    }

    /// Keeps the `previous`/`current` focus marks up to date, and runs
    /// the autosplit re-split when that layout is active.
    pub fn on_window_focus(&mut self, event: &WindowEvent) -> crate::Result<()> {
        tracing::debug!("window focus - container {}", event.container.id);
        let Self {
            conn,
            gate,
            layouts,
            state,
        } = self;
        let mut ctx = Context::new(conn, gate)?;
        let focused_id = match ctx.tree.find_focused() {
            Some(node) if node.is_layout_container() => node.id,
            _ => {
                tracing::debug!("window focus - not a layout container");
                return Ok(());
            }
        };
        state.sync_ledger(&ctx);
        ctx.exec(&format!(
            r#"[con_mark="{}"] mark --add {}"#,
            mark::current(),
            mark::previous()
        ));
        ctx.exec(&format!(
            r#"[con_id="{focused_id}"] mark --add {}"#,
            mark::current()
        ));

        if let Some(Layout::Autosplit) = layouts.get(&ctx.workspace_name) {
            let focused = ctx.focused.clone();
            Layout::Autosplit.attach(&mut ctx, &focused)?;
        }
        Ok(())
    }
}
