//! Workspace focus handler: repairs stale orders when a managed
//! workspace comes back into view.

use crate::context::Context;
use crate::handlers::Manager;
use crate::ipc::{Conn, WorkspaceEvent};
use crate::state::RebuildCause;
use crate::utils::xdo::WindowGate;

impl<C: Conn, G: WindowGate> Manager<C, G> {
    pub fn on_workspace_focus(&mut self, event: &WorkspaceEvent) -> crate::Result<()> {
        let Some(current) = event.current.as_ref().and_then(|node| node.name.clone()) else {
            return Ok(());
        };
        let old = event.old.as_ref().and_then(|node| node.name.clone());
        tracing::debug!(
            "workspace focus - workspace {current}, old {}",
            old.as_deref().unwrap_or("none")
        );

        let Self {
            conn,
            gate,
            layouts,
            state,
        } = self;
        let mut ctx = Context::new(conn, gate)?;
        if layouts.exists_for(&current) {
            state.sync_ledger(&ctx);
            state.add_workspace_ledger(&current, &ctx);
            let (is_stale, anchor) = state
                .ledger(&current)
                .map(|ledger| (ledger.is_stale(), ledger.stale_anchor()))
                .unwrap_or_default();
            if state.prev_workspace_name != current && is_stale {
                state.start_rebuild(&mut ctx, RebuildCause::WorkspaceFocus, anchor);
                if let Some(ledger) = state.ledger_mut(&current) {
                    ledger.clear_stale();
                }
            } else if state.prev_workspace_name != current {
                state.end_rebuild(&mut ctx, Some(RebuildCause::WorkspaceFocus));
            }
        } else {
            tracing::debug!("workspace focus - no layout for {current}");
            state.end_rebuild(&mut ctx, Some(RebuildCause::WorkspaceFocus));
        }

        state.prev_workspace_name = current;
        if let Some(old) = old {
            state.old_workspace_name = old.clone();
            if layouts.exists_for(&old) {
                state.add_workspace_ledger(&old, &ctx);
            }
        }
        Ok(())
    }
}
