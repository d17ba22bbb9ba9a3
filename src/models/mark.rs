//! Mark naming scheme.
//!
//! Marks are the only handle into the window manager's tree that survives
//! across events, since raw container ids are transient. Every mark this
//! program owns is namespaced as `layman:<workspace>:<role>`; the
//! focus-tracking marks leave the workspace field empty.

pub const NAMESPACE: &str = "layman";

pub const MAIN: &str = "main";
pub const LAST: &str = "last";
pub const PREVIOUS: &str = "previous";
pub const CURRENT: &str = "current";

/// Transient pivot used by targeted moves, removed right after use.
pub const TEMP: &str = "layman:temp";

fn scoped(role: &str, workspace: Option<&str>) -> String {
    match workspace {
        Some(name) => format!("{NAMESPACE}:{name}:{role}"),
        None => format!("{NAMESPACE}::{role}"),
    }
}

/// Mark of the first-ever container of a workspace.
pub fn main(workspace: &str) -> String {
    scoped(MAIN, Some(workspace))
}

/// Mark of the most recently attached container of a workspace.
pub fn last(workspace: &str) -> String {
    scoped(LAST, Some(workspace))
}

pub fn previous() -> String {
    scoped(PREVIOUS, None)
}

pub fn current() -> String {
    scoped(CURRENT, None)
}

/// The role part of a mark, i.e. everything after the last `:`.
pub fn role(mark: &str) -> &str {
    mark.rsplit(':').next().unwrap_or(mark)
}

/// True when `mark` has one of the given roles.
pub fn has_any_role(mark: &str, roles: &[&str]) -> bool {
    roles.iter().any(|r| role(mark) == role(r))
}

/// True unless `mark` is one of ours scoped to a different workspace.
/// Foreign-workspace role marks must not travel with a swapped container.
pub fn belongs_to(mark: &str, workspace: &str) -> bool {
    if !mark.starts_with(NAMESPACE) {
        return true;
    }
    match mark.split(':').nth(1) {
        Some("") | None => true,
        Some(ws) => ws == workspace,
    }
}
