//! Directional nearest-neighbor moves and mark-preserving swaps.
//!
//! A directional move finds the closest container strictly past the
//! focused one along the requested axis, exchanges the workspace's role
//! marks between the two, swaps their ledger positions, and finally asks
//! the window manager to swap the containers themselves. Everything
//! degrades to a no-op when no destination resolves.

use crate::context::Context;
use crate::models::{mark, Container, MoveDirection, WorkspaceLedger};

/// Hand a plain directional move straight to the window manager. Used on
/// unmanaged workspaces and native layouts.
pub fn forward(ctx: &mut Context, direction: &str) {
    ctx.exec(&format!("move {direction}"));
}

/// Relocate the focused container next to `con_id` using a transient
/// pivot mark, with an optional directional nudge afterwards.
pub fn move_to_container(ctx: &mut Context, con_id: i64, direction: Option<MoveDirection>) {
    if ctx.focused.id != con_id {
        ctx.exec(&format!(r#"[con_id="{con_id}"] mark --add {}"#, mark::TEMP));
        ctx.exec(&format!("move container to mark {}", mark::TEMP));
        ctx.exec(&format!("unmark {}", mark::TEMP));
    }
    if let Some(direction) = direction {
        ctx.exec(&format!("move {direction}"));
    }
}

pub fn move_to_direction(
    ctx: &mut Context,
    ledger: Option<&mut WorkspaceLedger>,
    direction: MoveDirection,
    swap_mark_last: bool,
) {
    let origin = ctx.focused.clone();
    let candidates = destination_candidates(ctx, direction, &origin);
    if let Some(destination) = shortest_distance(&origin, &candidates) {
        let destination = destination.clone();
        swap(ctx, ledger, &destination, swap_mark_last, &[]);
    }
}

/// Swap the focused container with `destination`, keeping role marks and
/// ledger positions consistent.
pub fn swap(
    ctx: &mut Context,
    ledger: Option<&mut WorkspaceLedger>,
    destination: &Container,
    swap_mark_last: bool,
    swap_marks: &[String],
) {
    switch_marks(ctx, destination, swap_mark_last, swap_marks);
    if let Some(ledger) = ledger {
        ledger.swap_positions(ctx.focused.id, destination.id);
    }
    ctx.exec(&format!("swap container with con_id {}", destination.id));
}

/// Exchange role marks between the focused container and the destination.
/// Role marks scoped to a different workspace are stripped from the
/// destination instead of travelling with the swap.
fn switch_marks(
    ctx: &mut Context,
    destination: &Container,
    swap_mark_last: bool,
    swap_marks: &[String],
) {
    let origin = ctx.focused.clone();
    let workspace = ctx.workspace_name.clone();
    let mut roles: Vec<&str> = if swap_mark_last {
        vec![mark::MAIN, mark::LAST]
    } else {
        vec![mark::MAIN]
    };
    roles.extend(swap_marks.iter().map(String::as_str));

    for m in &destination.marks {
        if !mark::belongs_to(m, &workspace) {
            ctx.exec(&format!(r#"[con_id="{}"] unmark {m}"#, destination.id));
            continue;
        }
        if mark::has_any_role(m, &roles) {
            ctx.exec(&format!(r#"[con_id="{}"] mark --add {m}"#, origin.id));
        }
    }
    for m in &origin.marks {
        if mark::has_any_role(m, &roles) {
            ctx.exec(&format!(r#"[con_id="{}"] mark --add {m}"#, destination.id));
        }
    }
}

fn destination_candidates(
    ctx: &Context,
    direction: MoveDirection,
    origin: &Container,
) -> Vec<Container> {
    ctx.containers
        .iter()
        .filter(|candidate| match direction {
            MoveDirection::Left => {
                candidate.rect.x < origin.rect.x && origin.rect.overlaps_vertically(&candidate.rect)
            }
            MoveDirection::Right => {
                candidate.rect.x > origin.rect.x && origin.rect.overlaps_vertically(&candidate.rect)
            }
            MoveDirection::Up => {
                candidate.rect.y < origin.rect.y
                    && origin.rect.overlaps_horizontally(&candidate.rect)
            }
            MoveDirection::Down => {
                candidate.rect.y > origin.rect.y
                    && origin.rect.overlaps_horizontally(&candidate.rect)
            }
        })
        .cloned()
        .collect()
}

/// Closest candidate by origin distance; exact coordinate ties with the
/// origin are skipped, and the first-found candidate wins distance ties.
fn shortest_distance<'a>(origin: &Container, candidates: &'a [Container]) -> Option<&'a Container> {
    let mut shortest = f64::MAX;
    let mut destination = None;
    for candidate in candidates {
        let distance = origin.rect.origin_distance(&candidate.rect);
        if distance < shortest && !origin.rect.same_origin(&candidate.rect) {
            destination = Some(candidate);
            shortest = distance;
        }
    }
    destination
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test::{leaf, tree_with, workspace};
    use crate::ipc::MockConn;
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

    fn stacked_tree() -> crate::ipc::Node {
        tree_with(vec![workspace(
            "1",
            vec![
                leaf(10, 100, rect(0, 0, 600, 800), &["layman:1:main"], true),
                leaf(11, 101, rect(600, 0, 600, 400), &["layman:1:last"], false),
                leaf(12, 102, rect(600, 400, 600, 400), &[], false),
            ],
        )])
    }

    #[test]
    fn closest_candidate_past_the_origin_wins() {
        let mut conn = MockConn::with_tree(stacked_tree());
        let mut gate = MockGate::default();
        let mut ledger = WorkspaceLedger::default();
        ledger.record(10);
        ledger.record(11);
        ledger.record(12);
        {
            let mut ctx = Context::new(&mut conn, &mut gate).unwrap();
            move_to_direction(&mut ctx, Some(&mut ledger), MoveDirection::Right, true);
        }
        assert_eq!(
            conn.drain_commands(),
            vec![
                r#"[con_id="10"] mark --add layman:1:last"#.to_string(),
                r#"[con_id="11"] mark --add layman:1:main"#.to_string(),
                "swap container with con_id 11".to_string(),
            ]
        );
        // Ledger positions swapped along with the containers.
        assert_eq!(ledger.position(10), Some(2));
        assert_eq!(ledger.position(11), Some(1));
    }

    #[test]
    fn no_candidate_means_no_commands() {
        let mut conn = MockConn::with_tree(stacked_tree());
        let mut gate = MockGate::default();
        let mut ledger = WorkspaceLedger::default();
        ledger.record(10);
        {
            let mut ctx = Context::new(&mut conn, &mut gate).unwrap();
            move_to_direction(&mut ctx, Some(&mut ledger), MoveDirection::Left, true);
        }
        assert!(conn.drain_commands().is_empty());
        assert_eq!(ledger.position(10), Some(1));
    }

    #[test]
    fn foreign_workspace_marks_are_stripped_not_exchanged() {
        let tree = tree_with(vec![workspace(
            "1",
            vec![
                leaf(10, 100, rect(0, 0, 600, 800), &[], true),
                leaf(11, 101, rect(600, 0, 600, 800), &["layman:2:main"], false),
            ],
        )]);
        let mut conn = MockConn::with_tree(tree);
        let mut gate = MockGate::default();
        {
            let mut ctx = Context::new(&mut conn, &mut gate).unwrap();
            move_to_direction(&mut ctx, None, MoveDirection::Right, false);
        }
        assert_eq!(
            conn.drain_commands(),
            vec![
                r#"[con_id="11"] unmark layman:2:main"#.to_string(),
                "swap container with con_id 11".to_string(),
            ]
        );
    }

    #[test]
    fn move_to_container_pivots_through_the_temp_mark() {
        let mut conn = MockConn::with_tree(stacked_tree());
        let mut gate = MockGate::default();
        {
            let mut ctx = Context::new(&mut conn, &mut gate).unwrap();
            move_to_container(&mut ctx, 12, Some(MoveDirection::Down));
        }
        assert_eq!(
            conn.drain_commands(),
            vec![
                r#"[con_id="12"] mark --add layman:temp"#.to_string(),
                "move container to mark layman:temp".to_string(),
                "unmark layman:temp".to_string(),
                "move down".to_string(),
            ]
        );
    }
}
