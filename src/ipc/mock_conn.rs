//! Scripted connection for tests: serves a fixed tree and records every
//! command and tick in issue order.

use std::collections::VecDeque;

use crate::errors::Result;
use crate::ipc::{CommandOutcome, Conn, Node, WorkspaceInfo};

#[derive(Default)]
pub struct MockConn {
    pub tree: Node,
    pub next_trees: VecDeque<Node>,
    pub workspaces: Vec<WorkspaceInfo>,
    pub config: String,
    pub commands: Vec<String>,
    pub ticks: Vec<String>,
}

impl MockConn {
    pub fn with_tree(tree: Node) -> Self {
        Self {
            tree,
            ..Self::default()
        }
    }

    /// Script the snapshot served by the next `get_tree` call; once the
    /// queue drains, `tree` is served again. Lets a test change geometry
    /// between two re-queries.
    pub fn queue_tree(&mut self, tree: Node) {
        self.next_trees.push_back(tree);
    }

    /// Recorded commands in issue order, clearing the log.
    pub fn drain_commands(&mut self) -> Vec<String> {
        std::mem::take(&mut self.commands)
    }
}

impl Conn for MockConn {
    fn run_command(&mut self, payload: &str) -> Result<Vec<CommandOutcome>> {
        self.commands.push(payload.to_string());
        Ok(vec![CommandOutcome {
            success: true,
            error: None,
        }])
    }

    fn send_tick(&mut self, payload: &str) -> Result<()> {
        self.ticks.push(payload.to_string());
        Ok(())
    }

    fn get_tree(&mut self) -> Result<Node> {
        match self.next_trees.pop_front() {
            Some(tree) => Ok(tree),
            None => Ok(self.tree.clone()),
        }
    }

    fn get_workspaces(&mut self) -> Result<Vec<WorkspaceInfo>> {
        Ok(self.workspaces.clone())
    }

    fn get_config(&mut self) -> Result<String> {
        Ok(self.config.clone())
    }
}
