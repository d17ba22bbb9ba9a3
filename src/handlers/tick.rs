//! Control-signal router.
//!
//! Any protocol client (typically a keybinding) can broadcast
//! `layman <verb> ...` on the tick channel: a layout name with parameters
//! assigns a layout to the focused workspace, `none` unsets it, `move`,
//! `swap` and `mark` drive the mover and marks, and `rebuild` is our own
//! completion announcement coming back around.

use crate::context::Context;
use crate::handlers::Manager;
use crate::ipc::{Conn, TickEvent};
use crate::layouts::Layout;
use crate::models::{mark, MoveDirection, FROM_START};
use crate::mover;
use crate::state::RebuildCause;
use crate::utils::xdo::WindowGate;

impl<C: Conn, G: WindowGate> Manager<C, G> {
    pub fn on_tick(&mut self, event: &TickEvent) -> crate::Result<()> {
        let Some(rest) = event
            .payload
            .strip_prefix(mark::NAMESPACE)
            .and_then(|rest| rest.strip_prefix(' '))
        else {
            return Ok(());
        };
        tracing::debug!("tick - payload: {}", event.payload);
        let tokens: Vec<&str> = rest.split(' ').collect();
        let (verb, params) = match tokens.split_first() {
            Some((verb, params)) => (*verb, params),
            None => return Ok(()),
        };

        let Self {
            conn,
            gate,
            layouts,
            state,
        } = self;
        let mut ctx = Context::new(conn, gate)?;
        state.sync_ledger(&ctx);
        let workspace = ctx.workspace_name.clone();

        match verb {
            // Our own completion broadcast looping back.
            "rebuild" => {}
            "move" => {
                let Some(direction) = params.first() else {
                    tracing::warn!("tick - move without a direction");
                    return Ok(());
                };
                match layouts.get(&workspace) {
                    Some(layout) if !layout.is_native() => {
                        match direction.parse::<MoveDirection>() {
                            Ok(direction) => {
                                let swap_last = layout.swap_mark_last();
                                mover::move_to_direction(
                                    &mut ctx,
                                    state.ledger_mut(&workspace),
                                    direction,
                                    swap_last,
                                );
                            }
                            Err(err) => tracing::warn!("tick - {err}"),
                        }
                    }
                    _ => mover::forward(&mut ctx, direction),
                }
            }
            "swap" => {
                let [scope, .., target] = params else {
                    tracing::debug!("tick - swap needs a scope and a target");
                    return Ok(());
                };
                let destination_mark = if *target == "previous" {
                    mark::previous()
                } else {
                    (*target).to_string()
                };
                let swap_marks: Vec<String> = if *scope == "container" {
                    Vec::new()
                } else {
                    vec![destination_mark.clone()]
                };
                if let Some(destination) = ctx.find_marked(&destination_mark) {
                    let swap_last = layouts
                        .get(&workspace)
                        .map(Layout::swap_mark_last)
                        .unwrap_or(false);
                    mover::swap(
                        &mut ctx,
                        state.ledger_mut(&workspace),
                        &destination,
                        swap_last,
                        &swap_marks,
                    );
                }
            }
            "mark" => {
                if let Some(tag) = params.first() {
                    let focused_id = ctx.focused.id;
                    ctx.exec(&format!(r#"[con_id="{focused_id}"] mark --add {tag}"#));
                }
            }
            "none" => {
                tracing::debug!("tick - unset layout for {workspace}");
                layouts.unset(&workspace);
            }
            name => {
                let params: Vec<String> = params.iter().map(|p| (*p).to_string()).collect();
                match Layout::parse(name, &params) {
                    Some(layout) => {
                        tracing::debug!("tick - set layout for {workspace} to {name}");
                        layouts.set(&workspace, layout);
                        state.add_workspace_ledger(&workspace, &ctx);
                        state.start_rebuild(
                            &mut ctx,
                            RebuildCause::LayoutChange(layout.name()),
                            FROM_START,
                        );
                    }
                    None => tracing::warn!("tick - unknown command {name}, ignored"),
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test::{leaf, tree_with, workspace};
    use crate::ipc::{MockConn, Node, WorkspaceInfo};
    use crate::models::Rect;
    use crate::utils::xdo::mock::MockGate;

    fn rect(x: i32, y: i32, width: i32, height: i32) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    fn tick(payload: &str) -> TickEvent {
        TickEvent {
            first: false,
            payload: payload.to_string(),
        }
    }

    fn side_by_side_tree() -> Node {
        tree_with(vec![workspace(
            "1",
            vec![
                leaf(10, 100, rect(0, 0, 640, 800), &["layman:1:main"], true),
                leaf(11, 101, rect(640, 0, 640, 800), &["layman:1:last"], false),
            ],
        )])
    }

    fn manager() -> Manager<MockConn, MockGate> {
        let mut conn = MockConn::with_tree(side_by_side_tree());
        conn.workspaces = vec![WorkspaceInfo {
            name: "1".to_string(),
            focused: true,
            visible: true,
            rect: rect(0, 0, 1280, 800),
        }];
        let mut manager = Manager::new(conn, MockGate::default());
        manager.startup(vec![]).unwrap();
        manager
    }

    #[test]
    fn foreign_payloads_are_ignored() {
        let mut manager = manager();
        manager.on_tick(&tick("someone-else move right")).unwrap();
        assert!(manager.conn.commands.is_empty());
    }

    #[test]
    fn rebuild_acknowledgements_are_dropped() {
        let mut manager = manager();
        manager.on_tick(&tick("layman rebuild window_new")).unwrap();
        assert!(manager.conn.commands.is_empty());
        assert!(manager.conn.ticks.is_empty());
    }

    #[test]
    fn move_on_an_unmanaged_workspace_is_forwarded() {
        let mut manager = manager();
        manager.on_tick(&tick("layman move right")).unwrap();
        assert_eq!(manager.conn.commands, vec!["move right".to_string()]);
    }

    #[test]
    fn move_on_a_managed_workspace_swaps_containers() {
        let mut manager = manager();
        manager
            .layouts
            .set("1", Layout::parse("vstack", &[]).unwrap());
        manager.on_tick(&tick("layman move right")).unwrap();
        assert_eq!(
            manager.conn.commands,
            vec![
                r#"[con_id="10"] mark --add layman:1:last"#.to_string(),
                r#"[con_id="11"] mark --add layman:1:main"#.to_string(),
                "swap container with con_id 11".to_string(),
            ]
        );
    }

    #[test]
    fn setting_a_layout_starts_a_full_rebuild() {
        let mut manager = manager();
        manager.on_tick(&tick("layman vstack 0.6 left")).unwrap();
        assert!(manager.layouts.exists_for("1"));
        assert_eq!(manager.gate.hidden, vec![100, 101]);
        assert_eq!(manager.gate.shown, vec![100]);
    }

    #[test]
    fn none_unsets_the_layout_and_unknown_verbs_do_not() {
        let mut manager = manager();
        manager.on_tick(&tick("layman vstack")).unwrap();
        assert!(manager.layouts.exists_for("1"));
        manager.on_tick(&tick("layman frobnicate 1 2")).unwrap();
        assert!(manager.layouts.exists_for("1"));
        manager.on_tick(&tick("layman none")).unwrap();
        assert!(!manager.layouts.exists_for("1"));
    }

    #[test]
    fn mark_tags_the_focused_container() {
        let mut manager = manager();
        manager.on_tick(&tick("layman mark scratch")).unwrap();
        assert_eq!(
            manager.conn.commands,
            vec![r#"[con_id="10"] mark --add scratch"#.to_string()]
        );
    }

    #[test]
    fn swap_by_container_leaves_the_target_mark_in_place() {
        let mut manager = manager();
        manager
            .on_tick(&tick("layman swap container layman:1:last"))
            .unwrap();
        assert_eq!(
            manager.conn.commands,
            vec![
                r#"[con_id="11"] mark --add layman:1:main"#.to_string(),
                "swap container with con_id 11".to_string(),
            ]
        );
    }

    #[test]
    fn swap_by_mark_exchanges_the_target_mark_too() {
        let mut manager = manager();
        manager
            .on_tick(&tick("layman swap mark layman:1:last"))
            .unwrap();
        assert_eq!(
            manager.conn.commands,
            vec![
                r#"[con_id="10"] mark --add layman:1:last"#.to_string(),
                r#"[con_id="11"] mark --add layman:1:main"#.to_string(),
                "swap container with con_id 11".to_string(),
            ]
        );
    }
}
