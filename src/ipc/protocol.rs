//! Wire-level types of the i3 IPC protocol.
//!
//! Every frame is `"i3-ipc" <u32 payload length> <u32 type> <payload>` with
//! little-endian integers and a JSON payload. Event frames set the high bit
//! of the type field.

use serde::{Deserialize, Serialize};

use crate::models::Rect;

pub const MAGIC: &[u8; 6] = b"i3-ipc";
pub const HEADER_LEN: usize = 14;
pub const EVENT_FLAG: u32 = 1 << 31;

/// Request/reply message types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum MessageType {
    RunCommand = 0,
    GetWorkspaces = 1,
    Subscribe = 2,
    GetTree = 4,
    GetConfig = 9,
    SendTick = 10,
}

/// Event type codes, i.e. the type field with the event flag stripped.
pub const EVENT_WORKSPACE: u32 = 0;
pub const EVENT_WINDOW: u32 = 3;
pub const EVENT_SHUTDOWN: u32 = 6;
pub const EVENT_TICK: u32 = 7;

/// Outcome of one command in a `RUN_COMMAND` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommandOutcome {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConfigReply {
    pub config: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TickReply {
    pub success: bool,
}

/// One entry of a `GET_WORKSPACES` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkspaceInfo {
    pub name: String,
    #[serde(default)]
    pub focused: bool,
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Root,
    Output,
    Con,
    FloatingCon,
    Workspace,
    Dockarea,
    #[serde(other)]
    Unknown,
}

impl Default for NodeType {
    fn default() -> Self {
        NodeType::Unknown
    }
}

/// One node of the layout tree, as returned by `GET_TREE` and embedded in
/// window events. Only the fields this program reads are modeled.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Node {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
    /// `"horizontal"`, `"vertical"` or `"none"`.
    #[serde(default)]
    pub orientation: String,
    #[serde(default)]
    pub rect: Rect,
    #[serde(default)]
    pub geometry: Rect,
    #[serde(default)]
    pub window: Option<u64>,
    #[serde(default)]
    pub marks: Vec<String>,
    #[serde(default)]
    pub floating: Option<String>,
    #[serde(default)]
    pub focused: bool,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub floating_nodes: Vec<Node>,
}

impl Node {
    fn children(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().chain(self.floating_nodes.iter())
    }

    /// All nodes of this subtree in depth-first document order, starting
    /// with self. Lookup tie-breaks rely on this order matching the window
    /// manager's own enumeration.
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    fn collect_into<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(self);
        for child in self.children() {
            child.collect_into(out);
        }
    }

    pub fn find(&self, id: i64) -> Option<&Node> {
        self.descendants().into_iter().find(|n| n.id == id)
    }

    pub fn find_focused(&self) -> Option<&Node> {
        self.descendants().into_iter().find(|n| n.focused)
    }

    pub fn find_marked(&self, mark: &str) -> Option<&Node> {
        self.descendants()
            .into_iter()
            .find(|n| n.marks.iter().any(|m| m == mark))
    }

    /// The direct parent of the node with the given id.
    pub fn parent_of(&self, id: i64) -> Option<&Node> {
        self.descendants()
            .into_iter()
            .find(|n| n.children().any(|child| child.id == id))
    }

    /// The workspace node whose subtree holds the given id. A workspace
    /// node is its own workspace.
    pub fn workspace_of(&self, id: i64) -> Option<&Node> {
        self.descendants()
            .into_iter()
            .filter(|n| n.node_type == NodeType::Workspace)
            .find(|ws| ws.find(id).is_some())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowEvent {
    pub change: String,
    pub container: Node,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceEvent {
    pub change: String,
    #[serde(default)]
    pub current: Option<Node>,
    #[serde(default)]
    pub old: Option<Node>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TickEvent {
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub payload: String,
}

/// A decoded event frame from the subscription stream.
#[derive(Debug, Clone)]
pub enum Event {
    Workspace(WorkspaceEvent),
    Window(WindowEvent),
    Tick(TickEvent),
    Shutdown,
}
