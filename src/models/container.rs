use crate::ipc::{Node, NodeType};
use crate::models::Rect;

/// Value snapshot of one window-manager tree leaf.
///
/// The live tree is owned by the window manager and mutates under us, so we
/// never hold references into it across event boundaries. Everything a
/// handler needs is copied out when the tree is queried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Tree node id, valid only for the node's current lifetime.
    pub id: i64,
    /// X11 window handle, the only id that survives a hide/show cycle.
    pub window: Option<u64>,
    pub rect: Rect,
    pub geometry: Rect,
    pub marks: Vec<String>,
}

impl Container {
    /// Collect the layout containers of a workspace subtree, ordered by
    /// window handle so the enumeration is stable across tree queries.
    pub fn collect(workspace: &Node) -> Vec<Container> {
        let mut containers: Vec<Container> = workspace
            .descendants()
            .into_iter()
            .filter(|node| node.is_layout_container())
            .map(Container::from)
            .collect();
        containers.sort_by_key(|container| container.window);
        containers
    }
}

impl From<&Node> for Container {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id,
            window: node.window,
            rect: node.rect,
            geometry: node.geometry,
            marks: node.marks.clone(),
        }
    }
}

impl Node {
    /// A container this program manages: a non-floating `con` holding a
    /// real window. Splits, workspaces and floating windows are left to i3.
    pub fn is_layout_container(&self) -> bool {
        self.window.is_some() && self.node_type == NodeType::Con && !self.is_floating()
    }

    pub fn is_floating(&self) -> bool {
        matches!(self.floating.as_deref(), Some("auto_on") | Some("user_on"))
    }
}
