//! Pre-attach tree surgery.
//!
//! Before a new window is moved next to the anchor, the container holding
//! the `last` mark may need a split so the newcomer lands on the right
//! axis, or a directional shove when the layout has settled into a stack.
//! The double move compensates for the window manager inserting new
//! windows adjacent to the focused container rather than at the stack end.

use crate::context::Context;
use crate::layouts::Layout;
use crate::models::{mark, Orientation};

pub fn handle_split(ctx: &mut Context, layout: &Layout) {
    let last_mark = mark::last(&ctx.workspace_name);
    let Some((con_id, sibling_ids, parent_orientation)) = previous_last(ctx, &last_mark) else {
        return;
    };
    let count = ctx.containers.len();
    if let Some(orientation) = layout.split_orientation(count) {
        ctx.exec(&format!(r#"[con_id="{con_id}"] split {orientation}"#));
    } else if let Some(orientation) = layout.stack_orientation(count) {
        let direction = match orientation {
            Orientation::Vertical => "down",
            Orientation::Horizontal => "right",
        };
        let contains_focused = sibling_ids.len() == 2 && sibling_ids.contains(&ctx.focused.id);
        if sibling_ids.len() == 1 || contains_focused {
            ctx.exec(&format!(r#"[con_id="{con_id}"] move {direction}"#));
            if contains_focused && parent_orientation == orientation.to_string() {
                ctx.exec(&format!(r#"[con_id="{con_id}"] move {direction}"#));
            }
        }
    }
}

/// Id of the `last`-marked container plus the ids below its parent and
/// the parent's split orientation. `None` when the mark does not resolve
/// (the workspace is empty).
fn previous_last(ctx: &Context, last_mark: &str) -> Option<(i64, Vec<i64>, String)> {
    let marked = ctx.tree.find_marked(last_mark)?;
    let (sibling_ids, parent_orientation) = match ctx.tree.parent_of(marked.id) {
        Some(parent) => (
            // descendants() starts with the parent itself; skip it.
            parent
                .descendants()
                .iter()
                .skip(1)
                .map(|node| node.id)
                .collect(),
            parent.orientation.clone(),
        ),
        None => (Vec::new(), String::new()),
    };
    Some((marked.id, sibling_ids, parent_orientation))
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

    fn split_commands(tree: crate::ipc::Node, layout: &Layout) -> Vec<String> {
        let mut conn = MockConn::with_tree(tree);
        let mut gate = MockGate::default();
        {
            let mut ctx = Context::new(&mut conn, &mut gate).unwrap();
            handle_split(&mut ctx, layout);
        }
        conn.drain_commands()
    }

    #[test]
    fn second_window_splits_the_marked_container() {
        let tree = tree_with(vec![workspace(
            "1",
            vec![
                leaf(10, 100, rect(0, 0, 640, 800), &["layman:1:main", "layman:1:last"], false),
                leaf(11, 101, rect(640, 0, 640, 800), &[], true),
            ],
        )]);
        let layout = Layout::parse("vstack", &[]).unwrap();
        assert_eq!(
            split_commands(tree, &layout),
            vec![r#"[con_id="10"] split horizontal"#.to_string()]
        );
    }

    #[test]
    fn missing_last_mark_is_a_no_op() {
        let tree = tree_with(vec![workspace(
            "1",
            vec![leaf(10, 100, rect(0, 0, 1280, 800), &[], true)],
        )]);
        let layout = Layout::parse("vstack", &[]).unwrap();
        assert!(split_commands(tree, &layout).is_empty());
    }

    #[test]
    fn settled_stack_shoves_the_marked_container_twice() {
        // Marked container and the new focused one are alone under a
        // vertical parent, which matches the stack orientation.
        let mut stack = workspace(
            "1",
            vec![
                leaf(11, 101, rect(640, 0, 640, 400), &["layman:1:last"], false),
                leaf(12, 102, rect(640, 400, 640, 400), &[], true),
                leaf(13, 103, rect(0, 0, 640, 800), &["layman:1:main"], false),
                leaf(14, 104, rect(0, 0, 640, 800), &[], false),
            ],
        );
        // Wrap the first two leaves in a vertical split container.
        let mut split = crate::ipc::Node {
            id: 2000,
            node_type: crate::ipc::NodeType::Con,
            orientation: "vertical".to_string(),
            rect: rect(640, 0, 640, 800),
            ..crate::ipc::Node::default()
        };
        split.nodes = stack.nodes.drain(0..2).collect();
        stack.nodes.insert(0, split);
        let tree = tree_with(vec![stack]);

        let layout = Layout::parse("vstack", &[]).unwrap();
        assert_eq!(
            split_commands(tree, &layout),
            vec![
                r#"[con_id="11"] move down"#.to_string(),
                r#"[con_id="11"] move down"#.to_string(),
            ]
        );
    }
}
