use std::collections::HashMap;

/// Anchor value meaning "from the very start of the workspace order".
pub const FROM_START: i64 = 0;

/// Logical ordering of containers within one workspace.
///
/// The window manager does not track the order windows were attached in, so
/// this ledger assigns every container a monotonically increasing position
/// the first time it is observed. Positions are unique for the lifetime of
/// the workspace and never reused; a swap exchanges exactly two positions.
///
/// The staleness flag records that the live tree no longer matches the
/// ledger from some container onward (the "low-water" anchor); a rebuild
/// from that anchor repairs it.
#[derive(Debug, Default)]
pub struct WorkspaceLedger {
    next_position: u32,
    positions: HashMap<i64, u32>,
    stale: bool,
    stale_anchor: i64,
}

impl WorkspaceLedger {
    pub fn contains(&self, con_id: i64) -> bool {
        self.positions.contains_key(&con_id)
    }

    /// Assign the next free position to `con_id` if it is unseen.
    pub fn record(&mut self, con_id: i64) {
        if self.positions.contains_key(&con_id) {
            return;
        }
        self.next_position += 1;
        self.positions.insert(con_id, self.next_position);
    }

    pub fn position(&self, con_id: i64) -> Option<u32> {
        self.positions.get(&con_id).copied()
    }

    /// Exchange the positions of two containers, leaving all others as-is.
    pub fn swap_positions(&mut self, a: i64, b: i64) {
        let pos_a = self.position(a);
        let pos_b = self.position(b);
        if let Some(pos) = pos_b {
            self.positions.insert(a, pos);
        }
        if let Some(pos) = pos_a {
            self.positions.insert(b, pos);
        }
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn stale_anchor(&self) -> i64 {
        self.stale_anchor
    }

    /// Flag the order as stale from `anchor` onward. The stored anchor only
    /// ever moves toward the earliest position; `FROM_START` clears it so
    /// the whole workspace is rebuilt. An anchor whose position is unknown
    /// never blocks other containers.
    pub fn mark_stale(&mut self, anchor: i64) {
        let had_anchor = self.stale;
        self.stale = true;
        // A from-start anchor is the floor; nothing can raise it back up.
        if anchor == FROM_START || (had_anchor && self.stale_anchor == FROM_START) {
            self.stale_anchor = FROM_START;
            return;
        }
        if !had_anchor {
            self.stale_anchor = anchor;
            return;
        }
        match (self.position(anchor), self.position(self.stale_anchor)) {
            (Some(new), Some(current)) if new < current => self.stale_anchor = anchor,
            (Some(_), None) => self.stale_anchor = anchor,
            _ => {}
        }
    }

    pub fn clear_stale(&mut self) {
        self.stale = false;
        self.stale_anchor = FROM_START;
    }
}
