//! The rebuild/replay state machine and the per-workspace ledgers.
//!
//! When a structural change invalidates the trailing part of a
//! workspace's logical order, every affected window is hidden and then
//! re-shown one at a time; each re-appearance runs the normal attach path,
//! which re-derives the correct tree. The synthetic close events produced
//! by the hiding are swallowed through a pending set so they are never
//! mistaken for genuine closures. At most one replay episode is in flight
//! per workspace, enforced by the strictly serial event loop.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use crate::context::Context;
use crate::models::{mark, Container, Rect, WorkspaceLedger, FROM_START};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildCause {
    WindowNew,
    WindowClose,
    WindowMove,
    WorkspaceFocus,
    LayoutChange(&'static str),
}

impl fmt::Display for RebuildCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RebuildCause::WindowNew => write!(f, "window_new"),
            RebuildCause::WindowClose => write!(f, "window_close"),
            RebuildCause::WindowMove => write!(f, "window_move"),
            RebuildCause::WorkspaceFocus => write!(f, "workspace_focus"),
            RebuildCause::LayoutChange(name) => write!(f, "layout_change_{name}"),
        }
    }
}

/// What survives a container's hide/show round trip: the window handle
/// and the geometry to restore it at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RebuildWindow {
    window: u64,
    geometry: Rect,
}

impl RebuildWindow {
    fn of(container: &Container) -> Option<Self> {
        container.window.map(|window| Self {
            window,
            geometry: container.geometry,
        })
    }
}

#[derive(Default)]
struct RebuildAction {
    cause: Option<RebuildCause>,
    pending_close: Vec<u64>,
    replay_queue: VecDeque<RebuildWindow>,
    focus_after: Option<i64>,
    last_replayed: Option<RebuildWindow>,
}

#[derive(Default)]
pub struct State {
    ledgers: HashMap<String, WorkspaceLedger>,
    rebuild: RebuildAction,
    pub prev_workspace_name: String,
    pub old_workspace_name: String,
}

impl State {
    pub fn ledger(&self, workspace: &str) -> Option<&WorkspaceLedger> {
        self.ledgers.get(workspace)
    }

    pub fn ledger_mut(&mut self, workspace: &str) -> Option<&mut WorkspaceLedger> {
        self.ledgers.get_mut(workspace)
    }

    pub fn has_ledger(&self, workspace: &str) -> bool {
        self.ledgers.contains_key(workspace)
    }

    /// Ensure a ledger exists for the workspace. When the context is
    /// looking at that workspace, containers the ledger has never seen are
    /// recorded and the whole order flagged stale, since their true
    /// positions are unknown.
    pub fn add_workspace_ledger(&mut self, workspace: &str, ctx: &Context) {
        let ledger = self.ledgers.entry(workspace.to_string()).or_default();
        if ctx.workspace_name == workspace {
            for container in &ctx.containers {
                if !ledger.contains(container.id) {
                    ledger.record(container.id);
                    ledger.mark_stale(FROM_START);
                }
            }
        }
    }

    /// Record containers the current workspace's ledger has not seen yet.
    /// Runs at the top of every handler so lookups never miss.
    pub fn sync_ledger(&mut self, ctx: &Context) {
        if let Some(ledger) = self.ledgers.get_mut(&ctx.workspace_name) {
            for container in &ctx.containers {
                ledger.record(container.id);
            }
        }
    }

    /// Begin a replay of every container at or after `anchor`'s position
    /// (the whole workspace when `anchor` is 0). Degenerate cases signal
    /// completion immediately; a single trailing container just gets its
    /// role marks back without any hiding.
    pub fn start_rebuild(&mut self, ctx: &mut Context, cause: RebuildCause, anchor: i64) {
        tracing::debug!("rebuilding {} for {cause}", ctx.workspace_name);
        self.rebuild.cause = Some(cause);

        let Some(ledger) = self.ledgers.get(&ctx.workspace_name) else {
            self.end_rebuild(ctx, None);
            return;
        };
        let containers = ctx.sorted_containers(ledger);
        if containers.is_empty() || (anchor != FROM_START && !ledger.contains(anchor)) {
            self.end_rebuild(ctx, None);
            return;
        }
        let anchor_position = ledger.position(anchor);
        let to_recreate: Vec<RebuildWindow> = containers
            .iter()
            .filter(|container| {
                anchor == FROM_START
                    || ledger.position(container.id) >= anchor_position
            })
            .filter_map(RebuildWindow::of)
            .collect();

        self.rebuild.pending_close.clear();
        if to_recreate.len() > 1 {
            for window in &to_recreate {
                ctx.hide_window(window.window);
                self.rebuild.pending_close.push(window.window);
            }
            let mut queue: VecDeque<RebuildWindow> = to_recreate.into();
            if let Some(first) = queue.pop_front() {
                ctx.show_window(first.window, first.geometry);
                self.rebuild.last_replayed = Some(first);
            }
            self.rebuild.replay_queue = queue;
        } else if let Some(trailing) = containers.last() {
            let workspace = ctx.workspace_name.clone();
            if containers.len() == 1 {
                ctx.exec(&format!(
                    r#"[con_id="{}"] mark --add {}"#,
                    trailing.id,
                    mark::main(&workspace)
                ));
            }
            ctx.exec(&format!(
                r#"[con_id="{}"] mark --add {}"#,
                trailing.id,
                mark::last(&workspace)
            ));
            self.end_rebuild(ctx, None);
        }
    }

    /// Bookkeeping after a container appeared and was attached: during a
    /// replay, show the next queued window or signal completion; outside
    /// one, just announce the insertion.
    pub fn handle_rebuild(&mut self, ctx: &mut Context, container: &Container) {
        if self.rebuild.cause.is_none() {
            self.end_rebuild(ctx, Some(RebuildCause::WindowNew));
        } else if self.rebuild.replay_queue.is_empty() {
            self.end_rebuild(ctx, None);
        } else {
            if self.rebuild.focus_after.is_none() {
                self.rebuild.focus_after = Some(container.id);
            }
            if let Some(next) = self.rebuild.replay_queue.pop_front() {
                ctx.show_window(next.window, next.geometry);
                self.rebuild.last_replayed = Some(next);
            }
        }
    }

    /// Completion: broadcast the cause, refocus if one was recorded. The
    /// stored cause survives when an override is given, so an episode
    /// interrupted by e.g. a workspace switch still ends with its own
    /// cause later.
    pub fn end_rebuild(&mut self, ctx: &mut Context, cause: Option<RebuildCause>) {
        if let Some(effective) = cause.or(self.rebuild.cause) {
            ctx.send_tick(&format!("{} rebuild {effective}", mark::NAMESPACE));
        }
        if let Some(con_id) = self.rebuild.focus_after.take() {
            ctx.exec(&format!(r#"[con_id="{con_id}"] focus"#));
        }
        if cause.is_none() {
            self.rebuild.cause = None;
        }
    }

    /// True when this close event is an artifact of a replay's hide and
    /// must be suppressed. Each pending handle is swallowed exactly once.
    pub fn swallow_closed(&mut self, window: Option<u64>) -> bool {
        let Some(window) = window else {
            return false;
        };
        if let Some(index) = self
            .rebuild
            .pending_close
            .iter()
            .position(|pending| *pending == window)
        {
            self.rebuild.pending_close.remove(index);
            true
        } else {
            false
        }
    }

    pub fn is_last_replayed(&self, container: &Container) -> bool {
        match (&self.rebuild.last_replayed, container.window) {
            (Some(last), Some(window)) => last.window == window,
            _ => false,
        }
    }

    pub fn clear_last_replayed(&mut self) {
        self.rebuild.last_replayed = None;
    }

    pub fn set_focus_after(&mut self, con_id: i64) {
        self.rebuild.focus_after = Some(con_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test::simple_tree;
    use crate::ipc::MockConn;
    use crate::utils::xdo::mock::MockGate;

    fn managed_state(workspace: &str, ids: &[i64]) -> State {
        let mut state = State::default();
        let mut ledger = WorkspaceLedger::default();
        for id in ids {
            ledger.record(*id);
        }
        state.ledgers.insert(workspace.to_string(), ledger);
        state
    }

    #[test]
    fn rebuild_replays_every_trailing_container_once() {
        let mut conn = MockConn::with_tree(simple_tree("1", 3));
        let mut gate = MockGate::default();
        let mut state = managed_state("1", &[10, 11, 12]);
        {
            let mut ctx = Context::new(&mut conn, &mut gate).unwrap();
            state.start_rebuild(&mut ctx, RebuildCause::WindowClose, 10);
            // Each appearance consumes one queued window.
            let first = ctx.containers[0].clone();
            state.handle_rebuild(&mut ctx, &first);
            let second = ctx.containers[1].clone();
            state.handle_rebuild(&mut ctx, &second);
            let third = ctx.containers[2].clone();
            state.handle_rebuild(&mut ctx, &third);
        }
        assert_eq!(gate.hidden, vec![100, 101, 102]);
        assert_eq!(gate.shown, vec![100, 101, 102]);
        assert_eq!(conn.ticks, vec!["layman rebuild window_close".to_string()]);
        // The first replayed appearance is the one refocused at the end.
        assert_eq!(conn.commands, vec![r#"[con_id="10"] focus"#.to_string()]);
    }

    #[test]
    fn pending_closes_are_swallowed_exactly_once() {
        let mut conn = MockConn::with_tree(simple_tree("1", 3));
        let mut gate = MockGate::default();
        let mut state = managed_state("1", &[10, 11, 12]);
        {
            let mut ctx = Context::new(&mut conn, &mut gate).unwrap();
            state.start_rebuild(&mut ctx, RebuildCause::WindowMove, FROM_START);
        }
        assert!(state.swallow_closed(Some(101)));
        assert!(!state.swallow_closed(Some(101)));
        assert!(!state.swallow_closed(None));
    }

    #[test]
    fn single_trailing_container_is_marked_without_hiding() {
        let mut conn = MockConn::with_tree(simple_tree("1", 3));
        let mut gate = MockGate::default();
        let mut state = managed_state("1", &[10, 11, 12]);
        {
            let mut ctx = Context::new(&mut conn, &mut gate).unwrap();
            state.start_rebuild(&mut ctx, RebuildCause::WindowClose, 12);
        }
        assert!(gate.hidden.is_empty());
        assert_eq!(
            conn.commands,
            vec![r#"[con_id="12"] mark --add layman:1:last"#.to_string()]
        );
        assert_eq!(conn.ticks, vec!["layman rebuild window_close".to_string()]);
    }

    #[test]
    fn only_container_gets_both_role_marks() {
        let mut conn = MockConn::with_tree(simple_tree("1", 1));
        let mut gate = MockGate::default();
        let mut state = managed_state("1", &[10]);
        {
            let mut ctx = Context::new(&mut conn, &mut gate).unwrap();
            state.start_rebuild(&mut ctx, RebuildCause::WindowClose, 10);
        }
        assert_eq!(
            conn.commands,
            vec![
                r#"[con_id="10"] mark --add layman:1:main"#.to_string(),
                r#"[con_id="10"] mark --add layman:1:last"#.to_string(),
            ]
        );
    }

    #[test]
    fn unknown_anchor_signals_completion_immediately() {
        let mut conn = MockConn::with_tree(simple_tree("1", 2));
        let mut gate = MockGate::default();
        let mut state = managed_state("1", &[10, 11]);
        {
            let mut ctx = Context::new(&mut conn, &mut gate).unwrap();
            state.start_rebuild(&mut ctx, RebuildCause::WindowClose, 999);
        }
        assert!(gate.hidden.is_empty());
        assert_eq!(conn.ticks, vec!["layman rebuild window_close".to_string()]);
    }

    #[test]
    fn layout_change_causes_carry_the_layout_name() {
        assert_eq!(
            RebuildCause::LayoutChange("vstack").to_string(),
            "layout_change_vstack"
        );
        assert_eq!(RebuildCause::WorkspaceFocus.to_string(), "workspace_focus");
    }
}
