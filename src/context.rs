use crate::ipc::{Conn, Node};
use crate::models::{Container, Rect, WorkspaceLedger};
use crate::utils::xdo::WindowGate;

/// Everything an event handler needs: a fresh snapshot of the tree focused
/// on the current workspace, plus the command, tick and show/hide
/// effectors. Built once per event and thrown away afterwards; nothing in
/// here survives an event boundary.
pub struct Context<'a> {
    conn: &'a mut dyn Conn,
    gate: &'a mut dyn WindowGate,
    pub tree: Node,
    pub focused: Container,
    pub workspace_name: String,
    pub workspace_rect: Rect,
    pub containers: Vec<Container>,
}

impl<'a> Context<'a> {
    pub fn new(conn: &'a mut dyn Conn, gate: &'a mut dyn WindowGate) -> crate::Result<Self> {
        let tree = conn.get_tree()?;
        let (focused, workspace_name, workspace_rect, containers) = snapshot(&tree)?;
        Ok(Self {
            conn,
            gate,
            tree,
            focused,
            workspace_name,
            workspace_rect,
            containers,
        })
    }

    /// Re-query the tree after structural commands, refreshing the
    /// snapshot in place. Needed when a layout must read rectangles its
    /// own commands just changed.
    pub fn resync(&mut self) -> crate::Result<()> {
        self.tree = self.conn.get_tree()?;
        let (focused, workspace_name, workspace_rect, containers) = snapshot(&self.tree)?;
        self.focused = focused;
        self.workspace_name = workspace_name;
        self.workspace_rect = workspace_rect;
        self.containers = containers;
        Ok(())
    }

    /// Run a command, blocking for the reply. Rejected commands are logged
    /// and otherwise ignored: the tree is the source of truth and may have
    /// changed between query and use, so a miss means "nothing to do".
    pub fn exec(&mut self, payload: &str) {
        tracing::debug!("exec: {payload}");
        match self.conn.run_command(payload) {
            Ok(outcomes) => {
                for outcome in outcomes.iter().filter(|o| !o.success) {
                    tracing::warn!(
                        "command rejected: {payload}: {}",
                        outcome.error.as_deref().unwrap_or("unknown error")
                    );
                }
            }
            Err(err) => tracing::error!("command failed: {payload}: {err}"),
        }
    }

    pub fn send_tick(&mut self, payload: &str) {
        tracing::debug!("tick: {payload}");
        if let Err(err) = self.conn.send_tick(payload) {
            tracing::error!("tick broadcast failed: {payload}: {err}");
        }
    }

    pub fn hide_window(&mut self, window: u64) {
        if let Err(err) = self.gate.hide(window) {
            tracing::error!("could not hide window {window}: {err}");
        }
    }

    pub fn show_window(&mut self, window: u64, geometry: Rect) {
        if let Err(err) = self.gate.show(window, geometry) {
            tracing::error!("could not show window {window}: {err}");
        }
    }

    pub fn workspace_width(&self, ratio: f64) -> i32 {
        (f64::from(self.workspace_rect.width) * ratio) as i32
    }

    pub fn workspace_height(&self, ratio: f64) -> i32 {
        (f64::from(self.workspace_rect.height) * ratio) as i32
    }

    pub fn contains_container(&self, con_id: i64) -> bool {
        self.containers.iter().any(|c| c.id == con_id)
    }

    /// The workspace's containers in ledger order. Containers the ledger
    /// has not seen sort last, in enumeration order.
    pub fn sorted_containers(&self, ledger: &WorkspaceLedger) -> Vec<Container> {
        let mut containers = self.containers.clone();
        containers.sort_by_key(|c| ledger.position(c.id).unwrap_or(u32::MAX));
        containers
    }

    pub fn find_marked(&self, mark: &str) -> Option<Container> {
        self.tree.find_marked(mark).map(Container::from)
    }
}

fn snapshot(tree: &Node) -> crate::Result<(Container, String, Rect, Vec<Container>)> {
    let focused = tree.find_focused().ok_or(crate::LaymanError::NoFocus)?;
    let workspace = tree
        .workspace_of(focused.id)
        .ok_or(crate::LaymanError::NoFocus)?;
    let name = workspace.name.clone().unwrap_or_default();
    Ok((
        Container::from(focused),
        name,
        workspace.rect,
        Container::collect(workspace),
    ))
}
