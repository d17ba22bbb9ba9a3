//! Startup layout assignments from the window manager's own config.
//!
//! The config text comes over IPC, so users declare layouts right next to
//! their workspace keybindings. `$layman` may be set any number of times;
//! each value reads `<layout> <params...> to workspace "<name>"`, with
//! `$VAR` tokens substituted from the other `set` variables. Malformed
//! lines are logged and skipped so one typo never takes down the rest.

use std::collections::HashMap;

use crate::layouts::Layout;

const VAR: &str = "$layman";
const SEPARATOR: &str = " to workspace ";

pub fn workspace_assignments(config: &str) -> Vec<(String, Layout)> {
    let (vars, options) = collect_variables(config);
    options
        .iter()
        .filter_map(|option| parse_assignment(&substitute(option, &vars)))
        .collect()
}

/// Scan `set $VAR value` lines. `$layman` values accumulate, any other
/// variable keeps its last value.
fn collect_variables(config: &str) -> (HashMap<String, String>, Vec<String>) {
    let mut vars = HashMap::new();
    let mut options = Vec::new();
    for line in config.lines() {
        let Some(rest) = line.trim_start().strip_prefix("set ") else {
            continue;
        };
        let mut parts = rest.trim_start().splitn(2, char::is_whitespace);
        let (Some(name), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        if !name.starts_with('$') {
            continue;
        }
        if name == VAR {
            options.push(value.trim().to_string());
        } else {
            vars.insert(name.to_string(), value.trim().to_string());
        }
    }
    (vars, options)
}

fn substitute(option: &str, vars: &HashMap<String, String>) -> String {
    let tokens: Vec<String> = option
        .split_whitespace()
        .map(|token| match vars.get(token) {
            Some(value) => value.clone(),
            None if token.starts_with('$') => {
                tracing::error!("config - undefined variable {token}");
                token.to_string()
            }
            None => token.to_string(),
        })
        .collect();
    tokens.join(" ")
}

fn parse_assignment(option: &str) -> Option<(String, Layout)> {
    let Some((left, right)) = option.split_once(SEPARATOR) else {
        tracing::error!("config - invalid workspace layout definition: {option}");
        return None;
    };
    let workspace = right.trim().trim_matches('"').to_string();
    let mut tokens = left.split_whitespace();
    let name = tokens.next()?;
    let params: Vec<String> = tokens.map(str::to_string).collect();
    match Layout::parse(name, &params) {
        Some(layout) => Some((workspace, layout)),
        None => {
            tracing::error!("config - unknown layout {name} for workspace {workspace}");
            None
        }
    }
}
